//! `_DSM` invocation.
//!
//! Builds the four-argument call, evaluates it on the bound device and hands
//! back the raw result. Argument objects live only for the duration of the
//! evaluation. No retries: a failed evaluation is reported as-is.

use hadron_acpi::{AmlError, AmlObject, DsmArgs, DsmGuid, NameSeg};
use hadron_driver_api::AcpiPlatformDevice;

use super::Lps0Config;

/// Evaluates `_DSM` on `device` with `args`.
///
/// # Errors
///
/// Returns the platform's [`AmlError`] unchanged.
pub fn evaluate_dsm<D: AcpiPlatformDevice + ?Sized>(
    device: &D,
    args: &DsmArgs<'_>,
) -> Result<Option<AmlObject>, AmlError> {
    let objects = args.to_objects();
    device.evaluate_object(NameSeg::DSM, &objects)
}

/// A device paired with the GUID and revision every call carries.
///
/// Evaluation is not reentrant: callers reachable from several threads must
/// issue their calls from inside the device's `CommandGate`.
pub struct DsmInvoker<'a, D: ?Sized> {
    device: &'a D,
    guid: DsmGuid,
    revision: u32,
}

impl<'a, D: AcpiPlatformDevice + ?Sized> DsmInvoker<'a, D> {
    /// Creates an invoker for `device` using the interface in `config`.
    #[must_use]
    pub fn new(device: &'a D, config: &Lps0Config) -> Self {
        Self {
            device,
            guid: config.guid,
            revision: config.revision,
        }
    }

    /// The device calls are issued against.
    #[must_use]
    pub fn device(&self) -> &'a D {
        self.device
    }

    /// Evaluates function `function` with optional function-specific
    /// arguments.
    ///
    /// # Errors
    ///
    /// Returns the platform's [`AmlError`] unchanged.
    pub fn evaluate(
        &self,
        function: u32,
        extra: Option<&[AmlObject]>,
    ) -> Result<Option<AmlObject>, AmlError> {
        let args = DsmArgs {
            guid: self.guid,
            revision: self.revision,
            function,
            extra,
        };
        evaluate_dsm(self.device, &args)
    }
}
