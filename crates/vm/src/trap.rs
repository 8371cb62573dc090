use std::fmt;

/// Synchronous fault raised while executing guest code.
///
/// The harness has no trap vector: every trap stops the run and is handed back
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trap {
    /// Word at `pc` is not an RV32I instruction.
    IllegalInstruction { pc: u32, word: u32 },
    /// `pc` is not 4-byte aligned (no compressed extension).
    MisalignedFetch { pc: u32 },
    /// `pc` lies outside guest memory.
    FetchFault { pc: u32 },
    /// Load of `width` bytes at `addr` falls outside guest memory.
    LoadFault { addr: u32, width: usize },
    /// Store of `width` bytes at `addr` falls outside guest memory.
    StoreFault { addr: u32, width: usize },
    /// An image section or entry point lies outside guest memory.
    ImageOutOfBounds { addr: u64, size: u64 },
}

impl fmt::Display for Trap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trap::IllegalInstruction { pc, word } => write!(
                f,
                "illegal instruction 0x{:08x} at pc = 0x{:08x}",
                word, pc
            ),
            Trap::MisalignedFetch { pc } => write!(f, "misaligned fetch at pc = 0x{:08x}", pc),
            Trap::FetchFault { pc } => write!(f, "fetch out of bounds at pc = 0x{:08x}", pc),
            Trap::LoadFault { addr, width } => {
                write!(f, "load u{} out of bounds: addr = 0x{:08x}", width * 8, addr)
            }
            Trap::StoreFault { addr, width } => {
                write!(f, "store u{} out of bounds: addr = 0x{:08x}", width * 8, addr)
            }
            Trap::ImageOutOfBounds { addr, size } => write!(
                f,
                "image region 0x{:x}..0x{:x} outside guest memory",
                addr,
                addr.saturating_add(*size)
            ),
        }
    }
}

impl std::error::Error for Trap {}
