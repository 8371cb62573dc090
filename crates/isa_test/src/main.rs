#![no_std]
#![no_main]

use core::panic::PanicInfo;

use isa_test::{NoopProbe, STACK_TOP, run_fixture};

#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

/// Reset entry, linked at address 0 through the `.text.init` section.
///
/// Naked because no stack exists until the first instruction sets `sp`. Once
/// `main` returns, the image parks in a self-jump since RV32I has no halt
/// instruction.
#[unsafe(naked)]
#[unsafe(no_mangle)]
#[unsafe(link_section = ".text.init")]
pub extern "C" fn _start() -> ! {
    core::arch::naked_asm!(
        "li sp, {stack_top}",
        "call main",
        "1:",
        "j 1b",
        stack_top = const STACK_TOP,
    )
}

#[unsafe(no_mangle)]
pub extern "C" fn main() -> i32 {
    run_fixture(&mut NoopProbe)
}
