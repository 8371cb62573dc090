#![cfg_attr(not(test), no_std)]

//! RV32I instruction-coverage fixture.
//!
//! The library holds everything that is architecture independent: the body of
//! `main`, the called helper, and the checkpoint probe used to observe the
//! accumulator from host tests. The bare-metal image in `main.rs` only adds the
//! naked `_start` routine and the `main` symbol on top of this.

pub mod fixture;
pub mod probe;

pub use fixture::{branch_ladder, run_fixture, simple_function};
pub use probe::{NoopProbe, Probe, Recorder, Stage};

/// Value `_start` loads into `sp` before calling `main`.
pub const STACK_TOP: u32 = 4096;

/// Value returned by `main`. Nothing ever reads it.
pub const EXIT_CODE: i32 = 0;
