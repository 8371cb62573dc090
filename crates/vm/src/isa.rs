/// RV32I major opcodes (bits 6:0 of every 32-bit instruction word).
///
/// The opcode selects the encoding format; `funct3`/`funct7` pick the
/// operation within it:
/// - R-type: `Op`
/// - I-type: `OpImm`, `Load`, `Jalr`, `System`, `MiscMem`
/// - S-type: `Store`
/// - B-type: `Branch`
/// - U-type: `Lui`, `Auipc`
/// - J-type: `Jal`
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// LB, LH, LW, LBU, LHU
    Load = 0x03,
    /// FENCE, FENCE.I
    MiscMem = 0x0f,
    /// ADDI, SLTI, SLTIU, XORI, ORI, ANDI, SLLI, SRLI, SRAI
    OpImm = 0x13,
    /// AUIPC
    Auipc = 0x17,
    /// SB, SH, SW
    Store = 0x23,
    /// ADD, SUB, SLL, SLT, SLTU, XOR, SRL, SRA, OR, AND
    Op = 0x33,
    /// LUI
    Lui = 0x37,
    /// BEQ, BNE, BLT, BGE, BLTU, BGEU
    Branch = 0x63,
    /// JALR
    Jalr = 0x67,
    /// JAL
    Jal = 0x6f,
    /// ECALL, EBREAK
    System = 0x73,
}

impl Opcode {
    pub fn from_u8(value: u8) -> Option<Self> {
        use Opcode::*;
        Some(match value {
            0x03 => Load,
            0x0f => MiscMem,
            0x13 => OpImm,
            0x17 => Auipc,
            0x23 => Store,
            0x33 => Op,
            0x37 => Lui,
            0x63 => Branch,
            0x67 => Jalr,
            0x6f => Jal,
            0x73 => System,
            _ => return None,
        })
    }
}
