//! Synchronization primitives for drivers.
//!
//! Provides [`CommandGate`], the serializing execution context that driver
//! entry points reachable from several threads run their actions on. Usable
//! in `static` items and before any scheduler is available.

mod gate;

pub(crate) mod loom_compat;

pub use gate::CommandGate;
