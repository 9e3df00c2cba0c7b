//! Internal failure reasons.
//!
//! None of these escape the driver's public operations: every failure is
//! logged and degrades to a safe default (empty bitmask, skipped entry, no
//! call issued).

use core::fmt;

use hadron_acpi::AmlError;

/// Why an LPS0 operation produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lps0Error {
    /// The `_DSM` evaluation itself failed.
    MethodUnavailable(AmlError),
    /// Firmware returned an object of the wrong shape.
    ShapeMismatch(&'static str),
    /// The device has not finished starting.
    SetupIncomplete,
}

impl fmt::Display for Lps0Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MethodUnavailable(e) => write!(f, "_DSM evaluation failed: {e}"),
            Self::ShapeMismatch(what) => write!(f, "unexpected result shape: {what}"),
            Self::SetupIncomplete => f.write_str("device not ready"),
        }
    }
}

impl From<AmlError> for Lps0Error {
    fn from(e: AmlError) -> Self {
        Self::MethodUnavailable(e)
    }
}
