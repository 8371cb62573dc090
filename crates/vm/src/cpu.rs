use crate::decoder::decode;
use crate::global::Config;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::registers::{Register, ABI_NAMES};
use crate::trap::Trap;

/// Single RV32I hart.
///
/// STATE:
/// - `pc`: address of the next instruction to fetch
/// - `regs`: x0-x31, with x0 hardwired to zero
/// - `verbose`: print every executed instruction
///
/// The CPU owns no memory; each `step` borrows the guest [`Memory`] so a test
/// can inspect or patch it between steps.
#[derive(Debug, Clone)]
pub struct CPU {
    pub pc: u32,
    pub regs: [u32; 32],
    pub verbose: bool,
}

/// What the harness should do after an instruction retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    /// `ecall` or `ebreak` retired; the hart stops.
    Halt,
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

impl CPU {
    /// Reset state: pc at the reset vector, every register zero.
    pub fn new() -> Self {
        Self {
            pc: Config::RESET_PC,
            regs: [0; 32],
            verbose: false,
        }
    }

    pub fn reg(&self, reg: Register) -> u32 {
        self.regs[reg as usize]
    }

    /// Fetches and decodes the instruction at `pc` without executing it.
    pub fn next_instruction(&self, memory: &Memory) -> Result<(u32, Instruction), Trap> {
        let word = memory.fetch(self.pc)?;
        let instr = decode(word).ok_or(Trap::IllegalInstruction { pc: self.pc, word })?;
        Ok((word, instr))
    }

    /// Runs one fetch / decode / execute cycle.
    ///
    /// The next pc is computed explicitly for every instruction, so a jump to
    /// its own address (`j .`) leaves `pc` unchanged; the runner relies on that
    /// to recognise spin loops.
    pub fn step(&mut self, memory: &mut Memory) -> Result<StepOutcome, Trap> {
        let (word, instr) = self.next_instruction(memory)?;

        if self.verbose {
            println!(
                "PC = 0x{:08x}, Bytes = [{}], Instr = {}",
                self.pc,
                hex::encode(word.to_le_bytes()),
                instr.pretty_print()
            );
        }

        self.execute(instr, memory)
    }

    /// Writes a register; writes to x0 are discarded.
    fn write_reg(&mut self, rd: usize, value: u32) {
        if rd != 0 {
            self.regs[rd] = value;
        }
    }

    fn addr(&self, rs1: usize, offset: i32) -> u32 {
        self.regs[rs1].wrapping_add(offset as u32)
    }

    fn branch(&self, taken: bool, offset: i32) -> u32 {
        if taken {
            self.pc.wrapping_add(offset as u32)
        } else {
            self.pc.wrapping_add(4)
        }
    }

    /// Executes a decoded instruction and advances `pc`.
    pub fn execute(&mut self, instr: Instruction, memory: &mut Memory) -> Result<StepOutcome, Trap> {
        let pc = self.pc;
        let mut next_pc = pc.wrapping_add(4);
        let mut outcome = StepOutcome::Continue;

        match instr {
            // Arithmetic; overflow wraps, RV32I has no overflow trap.
            Instruction::Add { rd, rs1, rs2 } => {
                self.write_reg(rd, self.regs[rs1].wrapping_add(self.regs[rs2]))
            }
            Instruction::Sub { rd, rs1, rs2 } => {
                self.write_reg(rd, self.regs[rs1].wrapping_sub(self.regs[rs2]))
            }
            Instruction::Addi { rd, rs1, imm } => {
                self.write_reg(rd, self.regs[rs1].wrapping_add(imm as u32))
            }

            // Logical
            Instruction::And { rd, rs1, rs2 } => self.write_reg(rd, self.regs[rs1] & self.regs[rs2]),
            Instruction::Or { rd, rs1, rs2 } => self.write_reg(rd, self.regs[rs1] | self.regs[rs2]),
            Instruction::Xor { rd, rs1, rs2 } => self.write_reg(rd, self.regs[rs1] ^ self.regs[rs2]),
            Instruction::Andi { rd, rs1, imm } => self.write_reg(rd, self.regs[rs1] & (imm as u32)),
            Instruction::Ori { rd, rs1, imm } => self.write_reg(rd, self.regs[rs1] | (imm as u32)),
            Instruction::Xori { rd, rs1, imm } => self.write_reg(rd, self.regs[rs1] ^ (imm as u32)),

            // Comparison
            Instruction::Slt { rd, rs1, rs2 } => {
                self.write_reg(rd, ((self.regs[rs1] as i32) < (self.regs[rs2] as i32)) as u32)
            }
            Instruction::Sltu { rd, rs1, rs2 } => {
                self.write_reg(rd, (self.regs[rs1] < self.regs[rs2]) as u32)
            }
            Instruction::Slti { rd, rs1, imm } => {
                self.write_reg(rd, ((self.regs[rs1] as i32) < imm) as u32)
            }
            Instruction::Sltiu { rd, rs1, imm } => {
                self.write_reg(rd, (self.regs[rs1] < imm as u32) as u32)
            }

            // Shifts use the low 5 bits of the shift amount.
            Instruction::Sll { rd, rs1, rs2 } => {
                self.write_reg(rd, self.regs[rs1] << (self.regs[rs2] & 0x1f))
            }
            Instruction::Srl { rd, rs1, rs2 } => {
                self.write_reg(rd, self.regs[rs1] >> (self.regs[rs2] & 0x1f))
            }
            Instruction::Sra { rd, rs1, rs2 } => {
                self.write_reg(rd, ((self.regs[rs1] as i32) >> (self.regs[rs2] & 0x1f)) as u32)
            }
            Instruction::Slli { rd, rs1, shamt } => self.write_reg(rd, self.regs[rs1] << shamt),
            Instruction::Srli { rd, rs1, shamt } => self.write_reg(rd, self.regs[rs1] >> shamt),
            Instruction::Srai { rd, rs1, shamt } => {
                self.write_reg(rd, ((self.regs[rs1] as i32) >> shamt) as u32)
            }

            // Loads
            Instruction::Lb { rd, rs1, offset } => {
                let byte = memory.load_u8(self.addr(rs1, offset))?;
                self.write_reg(rd, byte as i8 as i32 as u32);
            }
            Instruction::Lh { rd, rs1, offset } => {
                let half = memory.load_u16(self.addr(rs1, offset))?;
                self.write_reg(rd, half as i16 as i32 as u32);
            }
            Instruction::Lw { rd, rs1, offset } => {
                let word = memory.load_u32(self.addr(rs1, offset))?;
                self.write_reg(rd, word);
            }
            Instruction::Lbu { rd, rs1, offset } => {
                let byte = memory.load_u8(self.addr(rs1, offset))?;
                self.write_reg(rd, byte as u32);
            }
            Instruction::Lhu { rd, rs1, offset } => {
                let half = memory.load_u16(self.addr(rs1, offset))?;
                self.write_reg(rd, half as u32);
            }

            // Stores
            Instruction::Sb { rs1, rs2, offset } => {
                memory.store_u8(self.addr(rs1, offset), self.regs[rs2] as u8)?
            }
            Instruction::Sh { rs1, rs2, offset } => {
                memory.store_u16(self.addr(rs1, offset), self.regs[rs2] as u16)?
            }
            Instruction::Sw { rs1, rs2, offset } => {
                memory.store_u32(self.addr(rs1, offset), self.regs[rs2])?
            }

            // Branches
            Instruction::Beq { rs1, rs2, offset } => {
                next_pc = self.branch(self.regs[rs1] == self.regs[rs2], offset)
            }
            Instruction::Bne { rs1, rs2, offset } => {
                next_pc = self.branch(self.regs[rs1] != self.regs[rs2], offset)
            }
            Instruction::Blt { rs1, rs2, offset } => {
                next_pc = self.branch((self.regs[rs1] as i32) < (self.regs[rs2] as i32), offset)
            }
            Instruction::Bge { rs1, rs2, offset } => {
                next_pc = self.branch((self.regs[rs1] as i32) >= (self.regs[rs2] as i32), offset)
            }
            Instruction::Bltu { rs1, rs2, offset } => {
                next_pc = self.branch(self.regs[rs1] < self.regs[rs2], offset)
            }
            Instruction::Bgeu { rs1, rs2, offset } => {
                next_pc = self.branch(self.regs[rs1] >= self.regs[rs2], offset)
            }

            // Jumps. The target is read before rd is written so `jalr ra, 0(ra)` works.
            Instruction::Jal { rd, offset } => {
                next_pc = pc.wrapping_add(offset as u32);
                self.write_reg(rd, pc.wrapping_add(4));
            }
            Instruction::Jalr { rd, rs1, offset } => {
                next_pc = self.addr(rs1, offset) & !1;
                self.write_reg(rd, pc.wrapping_add(4));
            }

            Instruction::Lui { rd, imm } => self.write_reg(rd, imm as u32),
            Instruction::Auipc { rd, imm } => self.write_reg(rd, pc.wrapping_add(imm as u32)),

            Instruction::Fence => {}
            Instruction::Ecall | Instruction::Ebreak => {
                if self.verbose {
                    println!("🛑 {} at pc = 0x{:08x}, halting", instr.pretty_print(), pc);
                }
                outcome = StepOutcome::Halt;
            }
        }

        self.pc = next_pc;
        Ok(outcome)
    }

    pub fn dump_registers(&self) -> String {
        let mut out = String::from("Registers:\n");
        for (i, name) in ABI_NAMES.iter().enumerate() {
            let val = self.regs[i];
            out.push_str(&format!("x{:02} ({:<4}) = 0x{:08x} ({})\n", i, name, val, val as i32));
        }
        out.push_str(&format!("pc          = 0x{:08x}\n", self.pc));
        out
    }
}
