//! `hadron-acpi` --- the AML object model shared by Hadron's ACPI drivers.
//!
//! Firmware methods return loosely typed object graphs. This crate gives
//! drivers a tagged [`aml::AmlObject`] to decode them with, name segments and
//! paths for addressing namespace objects, and the byte-exact argument
//! encoding of the `_DSM` (Device Specific Method) call.
//!
//! # Usage
//!
//! ```ignore
//! let args = DsmArgs::new(LPS0_GUID, 0, 1).to_objects();
//! let result = device.evaluate_object(NameSeg::DSM, &args)?;
//! if let Some(table) = result.as_ref().and_then(AmlObject::as_package) {
//!     // ...
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod aml;
pub mod dsm;

// Re-export key types at crate root for convenience.
pub use aml::{AmlError, AmlObject, AmlPath, NameSeg};
pub use dsm::{DsmArgs, DsmGuid, swap_mixed_endian};
