//! Driver error types.

use core::fmt;

/// Errors that can occur during driver lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Driver initialization failed.
    InitFailed,
    /// The requested operation is not supported by this driver.
    Unsupported,
    /// The driver is not in a valid state for this operation.
    InvalidState,
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitFailed => f.write_str("driver initialization failed"),
            Self::Unsupported => f.write_str("operation not supported"),
            Self::InvalidState => f.write_str("invalid driver state"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_all_variants() {
        assert_eq!(
            format!("{}", DriverError::InitFailed),
            "driver initialization failed"
        );
        assert_eq!(
            format!("{}", DriverError::Unsupported),
            "operation not supported"
        );
        assert_eq!(
            format!("{}", DriverError::InvalidState),
            "invalid driver state"
        );
    }
}
