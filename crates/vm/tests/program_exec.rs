//! Runs the cross-built `isa_test` image, if present, and checks it at the
//! checkpoints a debugger would use.
//!
//! Build the image first:
//!   cargo build -p isa_test --features binaries --release --target riscv32i-unknown-none-elf
//! or point `ISA_TEST_ELF` at an existing build.

use std::collections::BTreeSet;
use std::path::PathBuf;

use vm::decoder::decode;
use vm::elf::parse_elf_from_bytes;
use vm::instruction::Instruction;
use vm::global::Config;
use vm::registers::Register;
use vm::runner::{ExitReason, Runner};
use vm::vm::VM;

fn fixture_path() -> PathBuf {
    if let Ok(path) = std::env::var("ISA_TEST_ELF") {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../target/riscv32i-unknown-none-elf/release/isa_test")
}

fn read_fixture() -> Option<(PathBuf, Vec<u8>)> {
    let path = fixture_path();
    if !path.exists() {
        println!("ELF file not found at {}, skipping...", path.display());
        return None;
    }
    let bytes = std::fs::read(&path).expect("Failed to read ELF file");
    Some((path, bytes))
}

/// Variant name of a decoded instruction, e.g. `Addi`.
fn mnemonic(instr: &Instruction) -> String {
    let debug = format!("{:?}", instr);
    debug.split(' ').next().unwrap_or_default().to_string()
}

#[test]
fn test_isa_test_image() {
    let Some((path, bytes)) = read_fixture() else {
        return;
    };
    let elf = parse_elf_from_bytes(&bytes).expect("Failed to parse ELF");

    let start = elf.symbol_addr("_start").expect("_start symbol");
    let main = elf.symbol_addr("main").expect("main symbol");
    let simple_function = elf.symbol_addr("simple_function").expect("simple_function symbol");
    assert_eq!(start, 0, "_start must be the first instruction of the image");
    assert_eq!(elf.entry, 0);

    let (code, code_start) = elf.get_flat_code().expect("No code section in ELF");
    let init = elf.get_section_by_name(".text").expect(".text section");
    assert_eq!(code_start, 0);
    assert_eq!(init.addr, 0);
    assert!(code.len() as u64 >= init.size);

    let mut vm = VM::new(Config::MEMORY_SIZE);
    vm.load_elf(&elf).expect("image fits in memory");
    println!("📦 loaded {} (main = 0x{:08x})", path.display(), main);

    let report = Runner::new()
        .with_watch(main)
        .with_watch(simple_function)
        .run(&mut vm)
        .expect("fixture must not trap");

    // The stack exists before anything else runs.
    assert_eq!(report.first_sp, Some(isa_test::STACK_TOP));
    let entry: Vec<_> = report.hits(main).collect();
    assert_eq!(entry.len(), 1, "main runs exactly once");
    assert_eq!(entry[0].reg(Register::Sp), isa_test::STACK_TOP);

    // simple_function(a, b) receives the unmodified operands.
    let call: Vec<_> = report.hits(simple_function).collect();
    assert_eq!(call.len(), 1);
    assert_eq!(call[0].reg(Register::A0), 5);
    assert_eq!(call[0].reg(Register::A1), 10);

    // main returned 0 and control parked in _start's spin loop.
    let ExitReason::Spin { pc } = report.exit else {
        panic!("expected spin loop, got {:?}", report.exit);
    };
    assert!(pc < main.min(simple_function), "spin at 0x{:08x} is outside _start", pc);
    assert_eq!(vm.cpu.reg(Register::A0), isa_test::EXIT_CODE as u32);
    assert_eq!(vm.cpu.reg(Register::Sp), isa_test::STACK_TOP);

    // Once spinning, it stays there.
    for _ in 0..100 {
        vm.step().expect("spin loop must not trap");
        assert_eq!(vm.cpu.pc, pc);
    }
}

#[test]
fn test_main_covers_every_instruction_class() {
    let Some((_, bytes)) = read_fixture() else {
        return;
    };
    let elf = parse_elf_from_bytes(&bytes).expect("Failed to parse ELF");
    let main = elf.symbol("main").expect("main symbol");
    assert!(main.size > 0, "main has no recorded size");

    let mut vm = VM::new(Config::MEMORY_SIZE);
    vm.load_elf(&elf).expect("image fits in memory");

    let start = main.addr as u32;
    let end = start + main.size as u32;
    let seen: BTreeSet<String> = (start..end)
        .step_by(4)
        .filter_map(|pc| vm.memory.fetch(pc).ok())
        .filter_map(decode)
        .map(|instr| mnemonic(&instr))
        .collect();
    println!("📋 instructions in main: {:?}", seen);

    let required: &[&[&str]] = &[
        &["Add"],
        &["Sub"],
        &["And"],
        &["Or"],
        &["Xor"],
        &["Addi"],
        &["Andi"],
        &["Ori"],
        &["Sll", "Slli"],
        &["Srl", "Srli"],
        &["Sra", "Srai"],
        &["Sw"],
        &["Lw"],
        &["Beq"],
        &["Bne"],
        &["Blt"],
        &["Bge"],
        &["Jal", "Jalr"],
    ];
    let missing: Vec<_> = required
        .iter()
        .filter(|any_of| !any_of.iter().any(|m| seen.contains(*m)))
        .collect();
    assert!(missing.is_empty(), "main is missing {:?}", missing);
}

#[test]
fn test_image_stores_every_checkpoint() {
    let Some((_, bytes)) = read_fixture() else {
        return;
    };
    let elf = parse_elf_from_bytes(&bytes).expect("Failed to parse ELF");

    let mut vm = VM::new(Config::MEMORY_SIZE);
    vm.load_elf(&elf).expect("image fits in memory");

    // Every word the guest stores, in program order, up to the spin loop.
    let mut stored = Vec::new();
    for _ in 0..Config::DEFAULT_MAX_STEPS {
        let (_, instr) = vm.cpu.next_instruction(&vm.memory).expect("valid instruction");
        if let Instruction::Sw { rs2, .. } = instr {
            stored.push(vm.cpu.regs[rs2] as i32);
        }
        let pc = vm.cpu.pc;
        let regs = vm.cpu.regs;
        vm.step().expect("fixture must not trap");
        if vm.cpu.pc == pc && vm.cpu.regs == regs {
            break;
        }
    }

    // add, sub, and, or, xor, addi, andi, ori, sll, srl, sra, sw, lw,
    // five loop iterations, call.
    let checkpoints = [15, 5, 0, 15, 15, 6, 5, 15, 20, 5, 5, 5, 5, 9, 13, 17, 23, 28, 15];
    let mut rest = stored.iter();
    for value in checkpoints {
        assert!(
            rest.any(|&v| v == value),
            "checkpoint {} not stored in order; stores were {:?}",
            value,
            stored
        );
    }
}
