//! Function-support bitmask (function 0).
//!
//! Firmware answers the capability query with a one-byte buffer where bit
//! `n` set means function `n` is implemented. Anything else means nothing is
//! supported.

use hadron_acpi::AmlObject;
use hadron_driver_api::{AcpiPlatformDevice, kdebug};

use super::dsm::DsmInvoker;
use super::{Lps0Error, Lps0Function, Lps0Functions};

/// Decodes a capability query result.
///
/// # Errors
///
/// Returns [`Lps0Error::ShapeMismatch`] unless `result` is a buffer of
/// exactly one byte.
pub fn decode_capability(result: Option<&AmlObject>) -> Result<Lps0Functions, Lps0Error> {
    match result {
        Some(AmlObject::Buffer(bytes)) => match bytes.as_slice() {
            [mask] => Ok(Lps0Functions::from_bits_retain(*mask)),
            _ => Err(Lps0Error::ShapeMismatch(
                "capability buffer is not one byte",
            )),
        },
        Some(_) => Err(Lps0Error::ShapeMismatch("capability is not a buffer")),
        None => Err(Lps0Error::ShapeMismatch("capability query returned nothing")),
    }
}

/// Queries which functions firmware supports.
///
/// Every failure is logged and reported as an empty mask.
pub fn read_capability<D: AcpiPlatformDevice + ?Sized>(
    invoker: &DsmInvoker<'_, D>,
) -> Lps0Functions {
    let name = invoker.device().name();
    let result = invoker
        .evaluate(Lps0Function::Capability.index(), None)
        .map_err(Lps0Error::from)
        .and_then(|obj| decode_capability(obj.as_ref()));

    match result {
        Ok(functions) => {
            kdebug!("lps0::{} functions {}", name, functions);
            functions
        }
        Err(e) => {
            kdebug!("lps0::{} capability unavailable: {}", name, e);
            Lps0Functions::empty()
        }
    }
}
