//! Power-management framework interface.
//!
//! A driver that takes part in device power management registers a table of
//! [`PowerStateDesc`]s with the framework through [`PowerManagement`], then
//! receives state changes through [`PowerStateHandler`]. Ordinal 0 is always
//! the lowest-power state.

use hadron_acpi::aml::AmlPath;

use super::error::DriverError;

bitflags::bitflags! {
    /// Properties of a registered power state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PowerStateFlags: u32 {
        /// The device has power in this state.
        const POWER_ON      = 1 << 0;
        /// The device can service requests in this state.
        const DEVICE_USABLE = 1 << 1;
    }
}

impl core::fmt::Display for PowerStateFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// One entry of a driver's power-state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerStateDesc {
    /// Position in the table; higher is more power.
    pub ordinal: u32,
    /// What holds in this state.
    pub flags: PowerStateFlags,
}

impl PowerStateDesc {
    /// Creates a table entry.
    #[must_use]
    pub const fn new(ordinal: u32, flags: PowerStateFlags) -> Self {
        Self { ordinal, flags }
    }
}

/// A driver's answer to a power-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAck {
    /// The change is complete; the framework need not wait.
    Implied,
    /// The request was not meant for this driver's device.
    Invalid,
}

/// Framework side: the services a driver calls during start and stop.
pub trait PowerManagement {
    /// Attaches `driver` to the power tree under its provider.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the framework cannot track the driver.
    fn join_power_tree(&mut self, driver: &str) -> Result<(), DriverError>;

    /// Registers `driver` as the power controller for its device with the
    /// given state table.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError`] if the table is rejected.
    fn register_power_driver(
        &mut self,
        driver: &str,
        states: &[PowerStateDesc],
    ) -> Result<(), DriverError>;

    /// Stops delivering power-state changes to `driver`.
    fn stop(&mut self, driver: &str);
}

/// Driver side: receives power-state changes from the framework.
///
/// May be called from any thread.
pub trait PowerStateHandler: Send + Sync {
    /// Moves the device at `target` to power-state `ordinal`.
    fn set_power_state(&self, ordinal: u32, target: &AmlPath) -> PowerAck;
}
