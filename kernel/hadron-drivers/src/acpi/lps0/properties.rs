//! Ad hoc `_DSM` invocation through property writes.
//!
//! Writing `{ "DSM": n }` to the device evaluates function `n` and publishes
//! whatever firmware returned under `"raw"`. This is a diagnostic path; it
//! bypasses the capability mask on purpose.

use hadron_driver_api::{AcpiPlatformDevice, PropertyTable, PropertyValue, kdebug, kerr};

use super::dsm::DsmInvoker;
use super::{DSM_REQUEST_KEY, RAW_RESULT_KEY};

/// Applies a property write.
///
/// Anything other than a dictionary carrying a numeric `"DSM"` entry is
/// ignored.
pub fn apply<D: AcpiPlatformDevice + ?Sized>(
    invoker: &DsmInvoker<'_, D>,
    request: &PropertyValue,
    properties: &mut PropertyTable,
) {
    let Some(function) = request
        .as_dictionary()
        .and_then(|dict| dict.get(DSM_REQUEST_KEY))
        .and_then(PropertyValue::as_number)
    else {
        return;
    };
    // The low 32 bits select the function.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "function indices are 32-bit"
    )]
    let function = function as u32;
    let name = invoker.device().name();

    match invoker.evaluate(function, None) {
        Ok(result) => {
            if let Some(obj) = &result {
                properties.set(RAW_RESULT_KEY, PropertyValue::from(obj));
            }
            kdebug!("lps0::{} evaluated _DSM function {}", name, function);
        }
        Err(e) => kerr!("lps0::{} _DSM function {} failed: {}", name, function, e),
    }
}
