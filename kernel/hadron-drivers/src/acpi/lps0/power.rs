//! Notification sequencing on power-state changes.
//!
//! Two states are registered: ordinal 0 (idle) and ordinal 1 (active).
//! Leaving idle sends exit (if supported) and then screen-on; entering idle
//! sends screen-off and then entry. Notifications are best effort: a failed
//! call is logged and the sequence continues.

use hadron_driver_api::{AcpiPlatformDevice, PowerStateDesc, PowerStateFlags, kdebug, kerr};

use super::dsm::DsmInvoker;
use super::{Lps0Function, Lps0Functions};

/// The state table registered with power management.
pub const POWER_STATES: [PowerStateDesc; 2] = [
    PowerStateDesc::new(0, PowerStateFlags::empty()),
    PowerStateDesc::new(
        1,
        PowerStateFlags::POWER_ON.union(PowerStateFlags::DEVICE_USABLE),
    ),
];

/// Sends `function` and logs the outcome.
fn notify<D: AcpiPlatformDevice + ?Sized>(invoker: &DsmInvoker<'_, D>, function: Lps0Function) {
    let name = invoker.device().name();
    match invoker.evaluate(function.index(), None) {
        Ok(_) => kdebug!("lps0::{} {} ok", name, function.name()),
        Err(e) => kerr!("lps0::{} {} failed: {}", name, function.name(), e),
    }
}

/// Issues the notifications for a move to `ordinal`.
///
/// Any nonzero ordinal is treated as active. Screen-on is sent on every
/// wake regardless of the mask; the idle path needs entry or exit support.
pub fn transition<D: AcpiPlatformDevice + ?Sized>(
    invoker: &DsmInvoker<'_, D>,
    functions: Lps0Functions,
    ordinal: u32,
) {
    if ordinal != 0 {
        if functions.contains(Lps0Function::Exit.bit()) {
            notify(invoker, Lps0Function::Exit);
        }
        notify(invoker, Lps0Function::ScreenOn);
    } else if functions.intersects(Lps0Function::Entry.bit() | Lps0Function::Exit.bit()) {
        notify(invoker, Lps0Function::ScreenOff);
        notify(invoker, Lps0Function::Entry);
    }
}
