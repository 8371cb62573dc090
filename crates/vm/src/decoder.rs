use crate::instruction::Instruction;
use crate::isa::Opcode;

/// Decodes a 32-bit RV32I instruction word.
///
/// Field layout shared by every format:
/// ```text
/// 31:25  funct7
/// 24:20  rs2 / shamt
/// 19:15  rs1
/// 14:12  funct3
/// 11:7   rd
/// 6:0    opcode
/// ```
///
/// Immediates are scattered differently per format; the `imm_*` helpers below
/// reassemble and sign-extend them. Returns `None` for anything outside the
/// base integer set, including compressed (16-bit) encodings.
pub fn decode(word: u32) -> Option<Instruction> {
    // Low two bits are 0b11 for every 32-bit encoding.
    if word & 0b11 != 0b11 {
        return None;
    }

    let opcode = Opcode::from_u8((word & 0x7f) as u8)?;

    let rd = ((word >> 7) & 0x1f) as usize;
    let funct3 = ((word >> 12) & 0x07) as u8;
    let rs1 = ((word >> 15) & 0x1f) as usize;
    let rs2 = ((word >> 20) & 0x1f) as usize;
    let funct7 = ((word >> 25) & 0x7f) as u8;

    match opcode {
        Opcode::Op => match (funct3, funct7) {
            (0x0, 0x00) => Some(Instruction::Add { rd, rs1, rs2 }),
            (0x0, 0x20) => Some(Instruction::Sub { rd, rs1, rs2 }),
            (0x1, 0x00) => Some(Instruction::Sll { rd, rs1, rs2 }),
            (0x2, 0x00) => Some(Instruction::Slt { rd, rs1, rs2 }),
            (0x3, 0x00) => Some(Instruction::Sltu { rd, rs1, rs2 }),
            (0x4, 0x00) => Some(Instruction::Xor { rd, rs1, rs2 }),
            (0x5, 0x00) => Some(Instruction::Srl { rd, rs1, rs2 }),
            (0x5, 0x20) => Some(Instruction::Sra { rd, rs1, rs2 }),
            (0x6, 0x00) => Some(Instruction::Or { rd, rs1, rs2 }),
            (0x7, 0x00) => Some(Instruction::And { rd, rs1, rs2 }),
            _ => None,
        },

        Opcode::OpImm => {
            let imm = imm_i(word);
            let shamt = rs2 as u8;
            match funct3 {
                0x0 => Some(Instruction::Addi { rd, rs1, imm }),
                0x2 => Some(Instruction::Slti { rd, rs1, imm }),
                0x3 => Some(Instruction::Sltiu { rd, rs1, imm }),
                0x4 => Some(Instruction::Xori { rd, rs1, imm }),
                0x6 => Some(Instruction::Ori { rd, rs1, imm }),
                0x7 => Some(Instruction::Andi { rd, rs1, imm }),
                0x1 if funct7 == 0x00 => Some(Instruction::Slli { rd, rs1, shamt }),
                0x5 if funct7 == 0x00 => Some(Instruction::Srli { rd, rs1, shamt }),
                0x5 if funct7 == 0x20 => Some(Instruction::Srai { rd, rs1, shamt }),
                _ => None,
            }
        }

        Opcode::Load => {
            let offset = imm_i(word);
            match funct3 {
                0x0 => Some(Instruction::Lb { rd, rs1, offset }),
                0x1 => Some(Instruction::Lh { rd, rs1, offset }),
                0x2 => Some(Instruction::Lw { rd, rs1, offset }),
                0x4 => Some(Instruction::Lbu { rd, rs1, offset }),
                0x5 => Some(Instruction::Lhu { rd, rs1, offset }),
                _ => None,
            }
        }

        Opcode::Store => {
            let offset = imm_s(word);
            match funct3 {
                0x0 => Some(Instruction::Sb { rs1, rs2, offset }),
                0x1 => Some(Instruction::Sh { rs1, rs2, offset }),
                0x2 => Some(Instruction::Sw { rs1, rs2, offset }),
                _ => None,
            }
        }

        Opcode::Branch => {
            let offset = imm_b(word);
            match funct3 {
                0x0 => Some(Instruction::Beq { rs1, rs2, offset }),
                0x1 => Some(Instruction::Bne { rs1, rs2, offset }),
                0x4 => Some(Instruction::Blt { rs1, rs2, offset }),
                0x5 => Some(Instruction::Bge { rs1, rs2, offset }),
                0x6 => Some(Instruction::Bltu { rs1, rs2, offset }),
                0x7 => Some(Instruction::Bgeu { rs1, rs2, offset }),
                _ => None,
            }
        }

        Opcode::Jal => Some(Instruction::Jal { rd, offset: imm_j(word) }),
        Opcode::Jalr if funct3 == 0 => Some(Instruction::Jalr { rd, rs1, offset: imm_i(word) }),
        Opcode::Jalr => None,

        Opcode::Lui => Some(Instruction::Lui { rd, imm: imm_u(word) }),
        Opcode::Auipc => Some(Instruction::Auipc { rd, imm: imm_u(word) }),

        // FENCE and FENCE.I both order memory only; nothing to do on one hart.
        Opcode::MiscMem if funct3 <= 0x1 => Some(Instruction::Fence),
        Opcode::MiscMem => None,

        Opcode::System => match word {
            0x0000_0073 => Some(Instruction::Ecall),
            0x0010_0073 => Some(Instruction::Ebreak),
            _ => None,
        },
    }
}

/// I-type: imm[11:0] = inst[31:20]
fn imm_i(word: u32) -> i32 {
    (word as i32) >> 20
}

/// S-type: imm[11:5] = inst[31:25], imm[4:0] = inst[11:7]
fn imm_s(word: u32) -> i32 {
    (((word & 0xfe00_0000) as i32) >> 20) | ((word >> 7) & 0x1f) as i32
}

/// B-type: imm[12|10:5] = inst[31:25], imm[4:1|11] = inst[11:7]
fn imm_b(word: u32) -> i32 {
    (((word & 0x8000_0000) as i32) >> 19)
        | ((word & 0x80) << 4) as i32
        | ((word >> 20) & 0x7e0) as i32
        | ((word >> 7) & 0x1e) as i32
}

/// U-type: imm[31:12] = inst[31:12]
fn imm_u(word: u32) -> i32 {
    (word & 0xffff_f000) as i32
}

/// J-type: imm[20|10:1|11|19:12] = inst[31:12]
fn imm_j(word: u32) -> i32 {
    (((word & 0x8000_0000) as i32) >> 11)
        | (word & 0x000f_f000) as i32
        | ((word >> 9) & 0x800) as i32
        | ((word >> 20) & 0x7fe) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_offsets_sign_extend() {
        // blt t0, t2, -36
        assert_eq!(
            decode(0xfc72_cee3),
            Some(Instruction::Blt { rs1: 5, rs2: 7, offset: -36 })
        );
        // bne t0, t1, +8
        assert_eq!(
            decode(0x0062_9463),
            Some(Instruction::Bne { rs1: 5, rs2: 6, offset: 8 })
        );
    }

    #[test]
    fn test_jump_offsets() {
        // jal ra, +8
        assert_eq!(decode(0x0080_00ef), Some(Instruction::Jal { rd: 1, offset: 8 }));
        // j .
        assert_eq!(decode(0x0000_006f), Some(Instruction::Jal { rd: 0, offset: 0 }));
        // jal x0, -4
        assert_eq!(decode(0xffdf_f06f), Some(Instruction::Jal { rd: 0, offset: -4 }));
    }

    #[test]
    fn test_store_offset_negative() {
        // sw t0, -4(sp)
        assert_eq!(
            decode(0xfe51_2e23),
            Some(Instruction::Sw { rs1: 2, rs2: 5, offset: -4 })
        );
    }

    #[test]
    fn test_rejects_non_base_encodings() {
        // compressed c.nop
        assert_eq!(decode(0x0000_0001), None);
        // mul a0, a0, a1 (M extension)
        assert_eq!(decode(0x02b5_0533), None);
        // csrrw (Zicsr)
        assert_eq!(decode(0x3400_1073), None);
        // all zeros is defined illegal
        assert_eq!(decode(0x0000_0000), None);
    }
}
