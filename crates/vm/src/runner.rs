use crate::cpu::StepOutcome;
use crate::global::Config;
use crate::registers::Register;
use crate::trap::Trap;
use crate::vm::VM;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The instruction at `pc` jumped to itself without changing any
    /// register, so the hart would repeat it forever.
    Spin { pc: u32 },
    /// `ecall`/`ebreak` retired at `pc`.
    Halted { pc: u32 },
    /// The step budget ran out first.
    StepLimit,
}

/// Register file captured when the pc reached a watched address, before the
/// instruction there executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pc: u32,
    pub step: usize,
    pub regs: [u32; 32],
}

impl Snapshot {
    pub fn reg(&self, reg: Register) -> u32 {
        self.regs[reg as usize]
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub exit: ExitReason,
    /// Instructions retired, including the one that ended the run.
    pub steps: usize,
    /// First value an instruction wrote into `sp`, even when it matched the
    /// value already there.
    pub first_sp: Option<u32>,
    pub snapshots: Vec<Snapshot>,
}

impl RunReport {
    /// Snapshots taken at `pc`, in the order they were hit.
    pub fn hits(&self, pc: u32) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter().filter(move |s| s.pc == pc)
    }
}

/// Drives a [`VM`] until it spins, halts, traps, or runs out of steps.
#[derive(Debug, Clone)]
pub struct Runner {
    max_steps: usize,
    watch: Vec<u32>,
    verbose: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner {
    pub fn new() -> Self {
        Self {
            max_steps: Config::DEFAULT_MAX_STEPS,
            watch: Vec::new(),
            verbose: false,
        }
    }

    /// Set the step budget
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Snapshot registers whenever the pc reaches `addr`
    pub fn with_watch(mut self, addr: u32) -> Self {
        self.watch.push(addr);
        self
    }

    /// Enable or disable the per-instruction trace
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn run(&self, vm: &mut VM) -> Result<RunReport, Trap> {
        if self.verbose {
            vm.cpu.verbose = true;
            println!("--- Begin execution trace ---");
        }

        let mut report = RunReport {
            exit: ExitReason::StepLimit,
            steps: 0,
            first_sp: None,
            snapshots: Vec::new(),
        };

        while report.steps < self.max_steps {
            let pc = vm.cpu.pc;
            if self.watch.contains(&pc) {
                if self.verbose {
                    println!("👀 watch hit at pc = 0x{:08x}", pc);
                }
                report.snapshots.push(Snapshot {
                    pc,
                    step: report.steps,
                    regs: vm.cpu.regs,
                });
            }

            let (_, instr) = vm.cpu.next_instruction(&vm.memory)?;
            let regs_before = vm.cpu.regs;
            let outcome = vm.step()?;
            report.steps += 1;

            if report.first_sp.is_none() && instr.destination() == Some(Register::Sp as usize) {
                report.first_sp = Some(vm.cpu.reg(Register::Sp));
            }

            if outcome == StepOutcome::Halt {
                report.exit = ExitReason::Halted { pc };
                break;
            }
            if vm.cpu.pc == pc && vm.cpu.regs == regs_before {
                report.exit = ExitReason::Spin { pc };
                break;
            }
        }

        if self.verbose {
            println!("--- End execution trace ({:?} after {} steps) ---\n", report.exit, report.steps);
        }
        Ok(report)
    }
}
