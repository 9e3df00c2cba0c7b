//! Command gate: a single logical execution context for driver actions.
//!
//! Requests that reach a driver from arbitrary threads (power-state changes,
//! property writes) are funnelled through one [`CommandGate`], so at most one
//! action runs against the guarded state at a time. Entry uses
//! test-and-test-and-set (TTAS) to reduce cache-line contention.

use super::loom_compat::{AtomicBool, Ordering, UnsafeCell, spin_hint};

/// Serializes actions against a piece of driver state.
///
/// The only way to reach the state through a shared reference is
/// [`run_action`](Self::run_action) (or its non-blocking sibling), which
/// hands the action exclusive access for its whole duration.
///
/// The gate is **not** reentrant: calling `run_action` on the same gate from
/// inside an action spins forever.
pub struct CommandGate<T> {
    busy: AtomicBool,
    state: UnsafeCell<T>,
}

// SAFETY: The gate ensures exclusive access to `T` via the `busy` flag.
// `T: Send` is required because actions may run on different threads.
unsafe impl<T: Send> Send for CommandGate<T> {}
unsafe impl<T: Send> Sync for CommandGate<T> {}

impl<T> CommandGate<T> {
    /// Creates an idle gate guarding `state`.
    #[cfg(not(loom))]
    pub const fn new(state: T) -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: UnsafeCell::new(state),
        }
    }

    /// Creates an idle gate guarding `state`.
    #[cfg(loom)]
    pub fn new(state: T) -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: UnsafeCell::new(state),
        }
    }

    /// Runs `action` with exclusive access to the state, waiting for any
    /// action already in progress to finish first.
    pub fn run_action<R>(&self, action: impl FnOnce(&mut T) -> R) -> R {
        let _entry = self.enter();
        // SAFETY: `_entry` holds the gate, so no other action can observe the
        // state until it is dropped after `action` returns.
        self.state.with_mut(|state| action(unsafe { &mut *state }))
    }

    /// Runs `action` only if the gate is idle.
    ///
    /// Returns `None` without running anything if another action holds it.
    pub fn try_run_action<R>(&self, action: impl FnOnce(&mut T) -> R) -> Option<R> {
        let _entry = self.try_enter()?;
        // SAFETY: As in `run_action`.
        Some(self.state.with_mut(|state| action(unsafe { &mut *state })))
    }

    /// Returns `true` while an action is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }

    /// Returns a mutable reference to the state.
    ///
    /// No gating is needed: `&mut self` proves nothing else can reach it.
    pub fn get_mut(&mut self) -> &mut T {
        // SAFETY: `&mut self` excludes every other access path.
        self.state.with_mut(|state| unsafe { &mut *state })
    }

    /// Consumes the gate, returning the state.
    pub fn into_inner(self) -> T {
        self.state.into_inner()
    }

    fn enter(&self) -> GateEntry<'_> {
        loop {
            // Fast path: try to enter directly.
            if let Some(entry) = self.try_enter_weak() {
                return entry;
            }

            // TTAS: spin on a read (shared cache line) until it looks idle.
            while self.busy.load(Ordering::Relaxed) {
                spin_hint();
            }
        }
    }

    fn try_enter_weak(&self) -> Option<GateEntry<'_>> {
        self.busy
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GateEntry { busy: &self.busy })
    }

    fn try_enter(&self) -> Option<GateEntry<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| GateEntry { busy: &self.busy })
    }
}

impl<T: Default> Default for CommandGate<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Marks the gate busy; leaving the gate happens on drop, so an action that
/// panics still releases it.
struct GateEntry<'a> {
    busy: &'a AtomicBool,
}

impl Drop for GateEntry<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}


#[cfg(all(test, loom))]
mod loom_tests {
    use super::*;
    use loom::sync::Arc;
    use loom::thread;

    #[test]
    fn two_actions_are_serialized() {
        loom::model(|| {
            let gate = Arc::new(CommandGate::new(0u32));
            let other = Arc::clone(&gate);
            let t = thread::spawn(move || other.run_action(|n| *n += 1));
            gate.run_action(|n| *n += 1);
            t.join().unwrap();
            assert_eq!(gate.run_action(|n| *n), 2);
        });
    }
}
