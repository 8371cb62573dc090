use crate::registers::abi_name;

/// Decoded RV32I base integer instruction.
///
/// Register fields are indices into the 32-entry register file. Immediates are
/// already sign-extended; branch and jump offsets are byte offsets relative to
/// the instruction's own pc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Add: rd = rs1 + rs2
    Add { rd: usize, rs1: usize, rs2: usize },
    /// Subtract: rd = rs1 - rs2
    Sub { rd: usize, rs1: usize, rs2: usize },
    /// Add immediate: rd = rs1 + imm
    Addi { rd: usize, rs1: usize, imm: i32 },

    /// AND: rd = rs1 & rs2
    And { rd: usize, rs1: usize, rs2: usize },
    /// OR: rd = rs1 | rs2
    Or { rd: usize, rs1: usize, rs2: usize },
    /// XOR: rd = rs1 ^ rs2
    Xor { rd: usize, rs1: usize, rs2: usize },

    /// ANDI: rd = rs1 & imm
    Andi { rd: usize, rs1: usize, imm: i32 },
    /// ORI: rd = rs1 | imm
    Ori { rd: usize, rs1: usize, imm: i32 },
    /// XORI: rd = rs1 ^ imm
    Xori { rd: usize, rs1: usize, imm: i32 },

    /// Set less than: rd = (rs1 < rs2)
    Slt { rd: usize, rs1: usize, rs2: usize },
    /// Set less than unsigned: rd = (rs1 < rs2) as u32
    Sltu { rd: usize, rs1: usize, rs2: usize },
    /// Set less than immediate: rd = (rs1 < imm)
    Slti { rd: usize, rs1: usize, imm: i32 },
    /// Set less than immediate unsigned: rd = (rs1 < imm as u32)
    Sltiu { rd: usize, rs1: usize, imm: i32 },

    /// Shift left logical: rd = rs1 << rs2
    Sll { rd: usize, rs1: usize, rs2: usize },
    /// Shift right logical: rd = rs1 >> rs2 (logical)
    Srl { rd: usize, rs1: usize, rs2: usize },
    /// Shift right arithmetic: rd = rs1 >> rs2 (arithmetic)
    Sra { rd: usize, rs1: usize, rs2: usize },

    /// Shift left immediate: rd = rs1 << shamt
    Slli { rd: usize, rs1: usize, shamt: u8 },
    /// Shift right logical immediate: rd = rs1 >> shamt (logical)
    Srli { rd: usize, rs1: usize, shamt: u8 },
    /// Shift right arithmetic immediate: rd = rs1 >> shamt (arithmetic)
    Srai { rd: usize, rs1: usize, shamt: u8 },

    /// Load byte: rd = sign_extend(*(rs1 + offset) as i8)
    Lb { rd: usize, rs1: usize, offset: i32 },
    /// Load halfword: rd = sign_extend(*(rs1 + offset) as i16)
    Lh { rd: usize, rs1: usize, offset: i32 },
    /// Load word: rd = *(rs1 + offset)
    Lw { rd: usize, rs1: usize, offset: i32 },
    /// Load byte unsigned: rd = zero_extend(*(rs1 + offset) as u8)
    Lbu { rd: usize, rs1: usize, offset: i32 },
    /// Load halfword unsigned: rd = zero_extend(*(rs1 + offset) as u16)
    Lhu { rd: usize, rs1: usize, offset: i32 },

    /// Store byte: *(rs1 + offset) = rs2 & 0xFF
    Sb { rs1: usize, rs2: usize, offset: i32 },
    /// Store halfword: *(rs1 + offset) = rs2 & 0xFFFF
    Sh { rs1: usize, rs2: usize, offset: i32 },
    /// Store word: *(rs1 + offset) = rs2
    Sw { rs1: usize, rs2: usize, offset: i32 },

    /// Branch if equal: if (rs1 == rs2) pc += offset
    Beq { rs1: usize, rs2: usize, offset: i32 },
    /// Branch if not equal
    Bne { rs1: usize, rs2: usize, offset: i32 },
    /// Branch if less than (signed)
    Blt { rs1: usize, rs2: usize, offset: i32 },
    /// Branch if greater or equal (signed)
    Bge { rs1: usize, rs2: usize, offset: i32 },
    /// Branch if less than (unsigned)
    Bltu { rs1: usize, rs2: usize, offset: i32 },
    /// Branch if greater or equal (unsigned)
    Bgeu { rs1: usize, rs2: usize, offset: i32 },

    /// Jump and link: rd = pc + 4; pc += offset
    Jal { rd: usize, offset: i32 },
    /// Jump and link register: rd = pc + 4; pc = (rs1 + offset) & !1
    Jalr { rd: usize, rs1: usize, offset: i32 },

    /// Load upper immediate: rd = imm (low 12 bits already zero)
    Lui { rd: usize, imm: i32 },
    /// Add upper immediate to PC: rd = pc + imm
    Auipc { rd: usize, imm: i32 },

    /// Memory ordering fence. A no-op on a single hart.
    Fence,
    /// Environment call. Halts the harness.
    Ecall,
    /// Breakpoint. Halts the harness.
    Ebreak,
}

impl Instruction {
    /// Register written by this instruction, if any. A write to x0 still
    /// reports index 0.
    pub fn destination(&self) -> Option<usize> {
        match *self {
            Instruction::Add { rd, .. }
            | Instruction::Sub { rd, .. }
            | Instruction::Addi { rd, .. }
            | Instruction::And { rd, .. }
            | Instruction::Or { rd, .. }
            | Instruction::Xor { rd, .. }
            | Instruction::Andi { rd, .. }
            | Instruction::Ori { rd, .. }
            | Instruction::Xori { rd, .. }
            | Instruction::Slt { rd, .. }
            | Instruction::Sltu { rd, .. }
            | Instruction::Slti { rd, .. }
            | Instruction::Sltiu { rd, .. }
            | Instruction::Sll { rd, .. }
            | Instruction::Srl { rd, .. }
            | Instruction::Sra { rd, .. }
            | Instruction::Slli { rd, .. }
            | Instruction::Srli { rd, .. }
            | Instruction::Srai { rd, .. }
            | Instruction::Lb { rd, .. }
            | Instruction::Lh { rd, .. }
            | Instruction::Lw { rd, .. }
            | Instruction::Lbu { rd, .. }
            | Instruction::Lhu { rd, .. }
            | Instruction::Jal { rd, .. }
            | Instruction::Jalr { rd, .. }
            | Instruction::Lui { rd, .. }
            | Instruction::Auipc { rd, .. } => Some(rd),
            Instruction::Sb { .. }
            | Instruction::Sh { .. }
            | Instruction::Sw { .. }
            | Instruction::Beq { .. }
            | Instruction::Bne { .. }
            | Instruction::Blt { .. }
            | Instruction::Bge { .. }
            | Instruction::Bltu { .. }
            | Instruction::Bgeu { .. }
            | Instruction::Fence
            | Instruction::Ecall
            | Instruction::Ebreak => None,
        }
    }

    pub fn pretty_print(&self) -> String {
        let reg = abi_name;

        match *self {
            Instruction::Add { rd, rs1, rs2 } => format!("add  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Sub { rd, rs1, rs2 } => format!("sub  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Addi { rd, rs1, imm } => format!("addi {}, {}, {}", reg(rd), reg(rs1), imm),

            Instruction::And { rd, rs1, rs2 } => format!("and  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Or { rd, rs1, rs2 } => format!("or   {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Xor { rd, rs1, rs2 } => format!("xor  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),

            Instruction::Andi { rd, rs1, imm } => format!("andi {}, {}, {}", reg(rd), reg(rs1), imm),
            Instruction::Ori { rd, rs1, imm } => format!("ori  {}, {}, {}", reg(rd), reg(rs1), imm),
            Instruction::Xori { rd, rs1, imm } => format!("xori {}, {}, {}", reg(rd), reg(rs1), imm),

            Instruction::Slt { rd, rs1, rs2 } => format!("slt  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Sltu { rd, rs1, rs2 } => format!("sltu {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Slti { rd, rs1, imm } => format!("slti {}, {}, {}", reg(rd), reg(rs1), imm),
            Instruction::Sltiu { rd, rs1, imm } => format!("sltiu {}, {}, {}", reg(rd), reg(rs1), imm),

            Instruction::Sll { rd, rs1, rs2 } => format!("sll  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Srl { rd, rs1, rs2 } => format!("srl  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Sra { rd, rs1, rs2 } => format!("sra  {}, {}, {}", reg(rd), reg(rs1), reg(rs2)),
            Instruction::Slli { rd, rs1, shamt } => format!("slli {}, {}, {}", reg(rd), reg(rs1), shamt),
            Instruction::Srli { rd, rs1, shamt } => format!("srli {}, {}, {}", reg(rd), reg(rs1), shamt),
            Instruction::Srai { rd, rs1, shamt } => format!("srai {}, {}, {}", reg(rd), reg(rs1), shamt),

            Instruction::Lb { rd, rs1, offset } => format!("lb   {}, {}({})", reg(rd), offset, reg(rs1)),
            Instruction::Lh { rd, rs1, offset } => format!("lh   {}, {}({})", reg(rd), offset, reg(rs1)),
            Instruction::Lw { rd, rs1, offset } => format!("lw   {}, {}({})", reg(rd), offset, reg(rs1)),
            Instruction::Lbu { rd, rs1, offset } => format!("lbu  {}, {}({})", reg(rd), offset, reg(rs1)),
            Instruction::Lhu { rd, rs1, offset } => format!("lhu  {}, {}({})", reg(rd), offset, reg(rs1)),

            Instruction::Sb { rs1, rs2, offset } => format!("sb   {}, {}({})", reg(rs2), offset, reg(rs1)),
            Instruction::Sh { rs1, rs2, offset } => format!("sh   {}, {}({})", reg(rs2), offset, reg(rs1)),
            Instruction::Sw { rs1, rs2, offset } => format!("sw   {}, {}({})", reg(rs2), offset, reg(rs1)),

            Instruction::Beq { rs1, rs2, offset } => format!("beq  {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),
            Instruction::Bne { rs1, rs2, offset } => format!("bne  {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),
            Instruction::Blt { rs1, rs2, offset } => format!("blt  {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),
            Instruction::Bge { rs1, rs2, offset } => format!("bge  {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),
            Instruction::Bltu { rs1, rs2, offset } => format!("bltu {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),
            Instruction::Bgeu { rs1, rs2, offset } => format!("bgeu {}, {}, pc{:+}", reg(rs1), reg(rs2), offset),

            Instruction::Jal { rd, offset } => format!("jal  {}, pc{:+}", reg(rd), offset),
            Instruction::Jalr { rd, rs1, offset } => format!("jalr {}, {}({})", reg(rd), offset, reg(rs1)),

            Instruction::Lui { rd, imm } => format!("lui  {}, 0x{:x}", reg(rd), (imm as u32) >> 12),
            Instruction::Auipc { rd, imm } => format!("auipc {}, 0x{:x}", reg(rd), (imm as u32) >> 12),

            Instruction::Fence => "fence".to_string(),
            Instruction::Ecall => "ecall".to_string(),
            Instruction::Ebreak => "ebreak".to_string(),
        }
    }
}
