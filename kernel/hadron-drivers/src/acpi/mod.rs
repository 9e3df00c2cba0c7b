//! Drivers bound to ACPI namespace devices.
//!
//! These drivers talk to firmware only through control-method evaluation on
//! an [`AcpiPlatformDevice`](hadron_driver_api::AcpiPlatformDevice); they own
//! no MMIO or port I/O.

pub mod lps0;
