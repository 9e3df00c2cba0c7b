//! Low Power S0 Idle (LPS0) platform driver.
//!
//! Platforms that support S0ix expose a power-engine plugin device (usually
//! `\_SB.PEPD`) with a `_DSM` method under the LPS0 GUID. The OS uses it to
//! read which notifications firmware wants, to fetch the per-device
//! constraints firmware expects before deep idle, and to announce display-off
//! and idle-entry transitions.
//!
//! The driver is split along those lines:
//!
//! - `dsm` -- argument marshalling for a single `_DSM` evaluation.
//! - `capability` -- the function-support bitmask (function 0).
//! - `constraint` -- the constraint table (function 1).
//! - `power` -- notification sequencing on power-state changes.
//! - `properties` -- ad hoc `_DSM` invocation through property writes.
//! - [`Lps0Device`] -- lifecycle and the command gate tying it together.

mod capability;
mod config;
mod constraint;
mod device;
mod dsm;
mod error;
mod power;
mod properties;

#[cfg(test)]
mod testing;

use hadron_acpi::DsmGuid;

pub use self::config::Lps0Config;
pub use self::constraint::{ConstraintRecord, ConstraintTable};
pub use self::device::Lps0Device;
pub use self::dsm::DsmInvoker;
pub use self::error::Lps0Error;

/// Name the driver registers under with power management.
pub const DRIVER_NAME: &str = "lps0";

/// The LPS0 `_DSM` interface GUID, `c4eb40a0-6cd2-11e2-bcfd-0800200c9a66`.
#[expect(
    clippy::unreadable_literal,
    reason = "GUID fields are inherently opaque"
)]
pub const LPS0_DSM_GUID: DsmGuid = DsmGuid::new(
    0xc4eb40a0,
    0x6cd2,
    0x11e2,
    [0xbc, 0xfd, 0x08, 0x00, 0x20, 0x0c, 0x9a, 0x66],
);

/// Interface revision passed in `Arg1`.
pub const LPS0_DSM_REVISION: u32 = 0;

/// Property holding the function-support bitmask.
pub const CAPABILITY_KEY: &str = "Capability";
/// Property holding the parsed constraint table.
pub const CONSTRAINTS_KEY: &str = "Constraints";
/// Property-write key requesting an ad hoc `_DSM` evaluation.
pub const DSM_REQUEST_KEY: &str = "DSM";
/// Property holding the result of the last ad hoc `_DSM` evaluation.
pub const RAW_RESULT_KEY: &str = "raw";

/// LPS0 `_DSM` function indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Lps0Function {
    /// Query supported functions.
    Capability = 0,
    /// Fetch the device constraint table.
    Constraints = 1,
    /// Request a crash dump.
    CrashDump = 2,
    /// Display turned off.
    ScreenOff = 3,
    /// Display turned on.
    ScreenOn = 4,
    /// Entering low-power idle.
    Entry = 5,
    /// Leaving low-power idle.
    Exit = 6,
}

impl Lps0Function {
    /// Returns the function index passed in `Arg2`.
    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Returns the capability bit announcing support for this function.
    #[must_use]
    pub const fn bit(self) -> Lps0Functions {
        Lps0Functions::from_bits_retain(1 << (self as u32))
    }

    /// Returns the conventional name used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Capability => "LPS0_DSM_CAPABILITY",
            Self::Constraints => "LPS0_DSM_CONSTRAINTS",
            Self::CrashDump => "LPS0_DSM_CRASH_DUMP",
            Self::ScreenOff => "LPS0_DSM_SCREEN_OFF",
            Self::ScreenOn => "LPS0_DSM_SCREEN_ON",
            Self::Entry => "LPS0_DSM_ENTRY",
            Self::Exit => "LPS0_DSM_EXIT",
        }
    }
}

bitflags::bitflags! {
    /// Functions firmware reports as supported, one bit per function index.
    ///
    /// Unknown bits are kept as reported.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Lps0Functions: u8 {
        /// Bit 0: the query itself.
        const CAPABILITY  = 1 << 0;
        /// Bit 1: the constraint table.
        const CONSTRAINTS = 1 << 1;
        /// Bit 2: crash dump.
        const CRASH_DUMP  = 1 << 2;
        /// Bit 3: display-off notification.
        const SCREEN_OFF  = 1 << 3;
        /// Bit 4: display-on notification.
        const SCREEN_ON   = 1 << 4;
        /// Bit 5: idle-entry notification.
        const ENTRY       = 1 << 5;
        /// Bit 6: idle-exit notification.
        const EXIT        = 1 << 6;
    }
}

impl core::fmt::Display for Lps0Functions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#04x}", self.bits())
    }
}
