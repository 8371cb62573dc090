use core::hint::black_box;
use core::ptr;

use crate::probe::{Probe, Stage};
use crate::EXIT_CODE;

/// First operand seeded into `main`.
pub const A: i32 = 5;
/// Second operand seeded into `main`.
pub const B: i32 = 10;

/// Iteration count of the branch ladder.
pub const LOOP_BOUND: i32 = 5;
/// Index the ladder compares against.
pub const PIVOT: i32 = 3;

/// Returns `x + y` with two's-complement wraparound.
///
/// Kept out of line and unmangled so the call from `main` stays a real
/// `jal`/`jalr` pair with arguments in `a0`/`a1`.
#[inline(never)]
#[unsafe(no_mangle)]
pub extern "C" fn simple_function(x: i32, y: i32) -> i32 {
    x.wrapping_add(y)
}

/// Stores `value` through a volatile write so the instruction that produced
/// it survives optimisation.
#[inline(always)]
fn sink(slot: &mut i32, value: i32) {
    unsafe { ptr::write_volatile(slot, value) };
}

/// Body of `main`.
///
/// Operands go through `black_box` so the compiler cannot fold the literals,
/// and every intermediate accumulator is stored to a volatile sink so no
/// statement is dead. The probe sees the value after each one.
#[inline(always)]
pub fn run_fixture<P: Probe>(probe: &mut P) -> i32 {
    let a = black_box(A);
    let b = black_box(B);
    let mut slot = 0i32;
    let mut result: i32;

    // add, sub
    result = a.wrapping_add(b);
    sink(&mut slot, result);
    probe.observe(Stage::Add, result);
    result = b.wrapping_sub(a);
    sink(&mut slot, result);
    probe.observe(Stage::Sub, result);

    // and, or, xor
    result = a & b;
    sink(&mut slot, result);
    probe.observe(Stage::And, result);
    result = a | b;
    sink(&mut slot, result);
    probe.observe(Stage::Or, result);
    result = a ^ b;
    sink(&mut slot, result);
    probe.observe(Stage::Xor, result);

    // addi, andi, ori
    result = a.wrapping_add(1);
    sink(&mut slot, result);
    probe.observe(Stage::AddImm, result);
    result = a & 0xF;
    sink(&mut slot, result);
    probe.observe(Stage::AndImm, result);
    result = a | 0xF;
    sink(&mut slot, result);
    probe.observe(Stage::OrImm, result);

    // sll, srl, sra
    result = b << 1;
    sink(&mut slot, result);
    probe.observe(Stage::ShiftLeft, result);
    result = ((b as u32) >> 1) as i32;
    sink(&mut slot, result);
    probe.observe(Stage::ShiftRightLogical, result);
    result = b >> 1;
    sink(&mut slot, result);
    probe.observe(Stage::ShiftRightArith, result);

    // sw, lw
    let mut array = [0i32; 2];
    unsafe { ptr::write_volatile(&mut array[0], result) };
    probe.observe(Stage::Store, array[0]);
    let load_result = unsafe { ptr::read_volatile(&array[0]) };
    sink(&mut slot, load_result);
    probe.observe(Stage::Load, load_result);

    // beq, bne, blt, bge
    let _ = branch_ladder(result, &mut slot, probe);

    // jal, jalr
    result = simple_function(a, b);
    sink(&mut slot, result);
    probe.observe(Stage::Call, result);

    EXIT_CODE
}

/// Runs the counted loop of `main` starting from `acc` and returns the new
/// accumulator. Every update is also written to `slot`.
///
/// The four conditions stay independent `if`s. Each one re-reads the index
/// through `black_box` and stores from its arm, so none of them can be merged
/// with its complement or turned into a select. Each pair is mutually
/// exclusive, so every iteration adds one of {2, 1} and one of {3, 4}; the
/// total over the five iterations is 23 for any starting value.
#[inline(always)]
pub fn branch_ladder<P: Probe>(mut acc: i32, slot: &mut i32, probe: &mut P) -> i32 {
    for i in 0..black_box(LOOP_BOUND) {
        if black_box(i) == PIVOT {
            acc = acc.wrapping_add(2);
            sink(slot, acc);
        }
        if black_box(i) != PIVOT {
            acc = acc.wrapping_add(1);
            sink(slot, acc);
        }
        if black_box(i) < PIVOT {
            acc = acc.wrapping_add(3);
            sink(slot, acc);
        }
        if black_box(i) >= PIVOT {
            acc = acc.wrapping_add(4);
            sink(slot, acc);
        }
        probe.observe(Stage::Loop(i), acc);
    }
    acc
}
