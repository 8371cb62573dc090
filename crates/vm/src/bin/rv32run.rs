use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use vm::elf::parse_elf_from_bytes;
use vm::global::Config;
use vm::registers::Register;
use vm::runner::{ExitReason, Runner};
use vm::vm::VM;

/// Run a bare-metal RV32I ELF image until it spins, halts, or traps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the RV32I ELF image
    elf: PathBuf,

    /// Maximum number of instructions to execute
    #[arg(short = 'n', long, default_value_t = Config::DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Guest memory size in bytes
    #[arg(short, long, default_value_t = Config::MEMORY_SIZE)]
    memory_size: usize,

    /// Print every executed instruction
    #[arg(short, long)]
    verbose: bool,

    /// Print the register file when the run ends
    #[arg(short = 'r', long)]
    dump_registers: bool,

    /// Symbol to snapshot registers at (repeatable)
    #[arg(short, long = "watch", value_name = "SYMBOL")]
    watch: Vec<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let bytes = fs::read(&args.elf)
        .with_context(|| format!("Failed to read ELF file {}", args.elf.display()))?;
    let elf = parse_elf_from_bytes(&bytes).context("Failed to parse ELF")?;

    let mut runner = Runner::new()
        .with_max_steps(args.max_steps)
        .with_verbose(args.verbose);
    let mut watched = Vec::new();
    for symbol in &args.watch {
        let Some(addr) = elf.symbol_addr(symbol) else {
            bail!("Symbol not found in {}: {}", args.elf.display(), symbol);
        };
        runner = runner.with_watch(addr);
        watched.push((symbol.as_str(), addr));
    }

    let mut vm = VM::new(args.memory_size);
    vm.cpu.verbose = args.verbose;
    vm.load_elf(&elf).context("Image does not fit in guest memory")?;
    println!(
        "🚀 {} entry = 0x{:08x}, memory = {} bytes",
        args.elf.display(),
        vm.cpu.pc,
        vm.memory.size()
    );

    let report = runner.run(&mut vm).context("Guest trapped")?;

    for (symbol, addr) in watched {
        for hit in report.hits(addr) {
            println!(
                "👀 {} (0x{:08x}) at step {}: sp = 0x{:08x}, ra = 0x{:08x}, a0 = {}, a1 = {}",
                symbol,
                addr,
                hit.step,
                hit.reg(Register::Sp),
                hit.reg(Register::Ra),
                hit.reg(Register::A0) as i32,
                hit.reg(Register::A1) as i32,
            );
        }
    }
    if let Some(sp) = report.first_sp {
        println!("📌 first sp = 0x{:08x}", sp);
    }

    if args.dump_registers {
        vm.dump_registers();
    }

    match report.exit {
        ExitReason::Spin { pc } => {
            println!("✅ spinning at pc = 0x{:08x} after {} steps", pc, report.steps);
            Ok(())
        }
        ExitReason::Halted { pc } => {
            println!("✅ halted at pc = 0x{:08x} after {} steps", pc, report.steps);
            Ok(())
        }
        ExitReason::StepLimit => bail!("Step limit of {} reached without spinning", args.max_steps),
    }
}
