//! Hardware drivers for Hadron OS.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

// ── Subsystem modules ───────────────────────────────────────────────────

pub mod acpi;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use self::acpi::lps0;
