//! RV32I execution harness.
//!
//! Runs bare-metal images (raw machine code or ELF) on a single interpreted
//! hart so tests can inspect registers and memory at chosen addresses. Only
//! the base integer instruction set is supported.

pub mod cpu;
pub mod decoder;
pub mod elf;
pub mod global;
pub mod instruction;
pub mod isa;
pub mod memory;
pub mod registers;
pub mod runner;
pub mod trap;
pub mod vm;
