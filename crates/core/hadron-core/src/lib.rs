//! Core synchronization primitives for Hadron drivers.
//!
//! This crate holds host-testable building blocks shared by driver crates.
//! Living outside the kernel crate, they can be tested with `cargo test`
//! and loom on the host without a kernel target.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod sync;
