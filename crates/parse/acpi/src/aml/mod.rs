//! AML (ACPI Machine Language) objects as seen by a driver.
//!
//! Method evaluation hands back a dynamically typed object graph. Every
//! access goes through a fallible accessor on [`AmlObject`], so callers decide
//! per field whether a type mismatch skips, defaults, or fails.

pub mod path;
pub mod value;

pub use path::{AmlPath, NameSeg};
pub use value::{AmlError, AmlObject};
