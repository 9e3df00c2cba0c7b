//! ACPI platform device access for drivers bound to namespace devices.
//!
//! When a driver is matched to an ACPI device it receives an
//! [`AcpiPlatformDevice`], its only window onto the firmware: the device's
//! namespace identity and synchronous evaluation of control methods beneath
//! it.

use hadron_acpi::aml::{AmlError, AmlObject, AmlPath, NameSeg};

/// An ACPI namespace device a driver is bound to.
///
/// Implementations are provided by the kernel's AML interpreter (or by a
/// test double). Evaluation is synchronous and carries no per-call isolation:
/// drivers that call in from several threads must serialize their calls.
pub trait AcpiPlatformDevice: Send + Sync {
    /// Full ACPI namespace path (e.g., `\_SB_.PEPD`).
    fn path(&self) -> &AmlPath;

    /// Short device name used to prefix log lines.
    fn name(&self) -> &str;

    /// Evaluates the control method `method` under this device.
    ///
    /// `args` are passed as `Arg0..ArgN` in order and remain owned by the
    /// caller. Returns the method's result object, or `None` for methods
    /// that return nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AmlError`] if the method is absent, rejects its arguments,
    /// or fails while running.
    fn evaluate_object(
        &self,
        method: NameSeg,
        args: &[AmlObject],
    ) -> Result<Option<AmlObject>, AmlError>;
}
