//! Driver subsystem API traits and types.
//!
//! Defines what a platform driver sees of the kernel:
//!
//! - **Firmware** -- [`AcpiPlatformDevice`], the ACPI namespace device a driver is bound to.
//! - **Power** -- [`PowerManagement`] and [`PowerStateHandler`], the two halves of
//!   power-state table registration and state-change delivery.
//! - **Properties** -- [`PropertyTable`] / [`PropertyValue`], the diagnostic state a
//!   driver publishes and the requests it accepts.
//! - **Logging** -- the [`klog!`] macro family.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod acpi_device;
pub mod error;
pub mod log;
pub mod power;
pub mod property;

// Re-export all public types at the module root for ergonomic imports.
pub use acpi_device::AcpiPlatformDevice;
pub use error::DriverError;
pub use log::LogLevel;
pub use power::{PowerAck, PowerManagement, PowerStateDesc, PowerStateFlags, PowerStateHandler};
pub use property::{PropertyTable, PropertyValue};
