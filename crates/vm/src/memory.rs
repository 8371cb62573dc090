use std::ops::Range;

use crate::trap::Trap;

/// Flat little-endian guest memory starting at address 0.
///
/// Every access is bounds checked and reports a [`Trap`] instead of panicking.
/// Data accesses may be misaligned; RV32I allows an implementation to handle
/// them in hardware.
#[derive(Debug, Clone)]
pub struct Memory {
    mem: Vec<u8>,
}

impl Memory {
    pub fn new(memory_size: usize) -> Self {
        Self {
            mem: vec![0u8; memory_size],
        }
    }

    pub fn size(&self) -> usize {
        self.mem.len()
    }

    fn range(&self, addr: u32, width: usize) -> Option<Range<usize>> {
        let start = addr as usize;
        let end = start.checked_add(width)?;
        (end <= self.mem.len()).then_some(start..end)
    }

    fn load<const N: usize>(&self, addr: u32) -> Result<[u8; N], Trap> {
        let range = self
            .range(addr, N)
            .ok_or(Trap::LoadFault { addr, width: N })?;
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.mem[range]);
        Ok(bytes)
    }

    fn store<const N: usize>(&mut self, addr: u32, bytes: [u8; N]) -> Result<(), Trap> {
        let range = self
            .range(addr, N)
            .ok_or(Trap::StoreFault { addr, width: N })?;
        self.mem[range].copy_from_slice(&bytes);
        Ok(())
    }

    pub fn load_u8(&self, addr: u32) -> Result<u8, Trap> {
        self.load::<1>(addr).map(|b| b[0])
    }

    pub fn load_u16(&self, addr: u32) -> Result<u16, Trap> {
        self.load::<2>(addr).map(u16::from_le_bytes)
    }

    pub fn load_u32(&self, addr: u32) -> Result<u32, Trap> {
        self.load::<4>(addr).map(u32::from_le_bytes)
    }

    pub fn store_u8(&mut self, addr: u32, val: u8) -> Result<(), Trap> {
        self.store(addr, [val])
    }

    pub fn store_u16(&mut self, addr: u32, val: u16) -> Result<(), Trap> {
        self.store(addr, val.to_le_bytes())
    }

    pub fn store_u32(&mut self, addr: u32, val: u32) -> Result<(), Trap> {
        self.store(addr, val.to_le_bytes())
    }

    /// Reads the instruction word at `pc`.
    pub fn fetch(&self, pc: u32) -> Result<u32, Trap> {
        if pc % 4 != 0 {
            return Err(Trap::MisalignedFetch { pc });
        }
        self.load::<4>(pc)
            .map(u32::from_le_bytes)
            .map_err(|_| Trap::FetchFault { pc })
    }

    /// Copies `data` into memory at `addr`. Used by the image loader.
    pub fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), Trap> {
        let range = self.range(addr, data.len()).ok_or(Trap::StoreFault {
            addr,
            width: data.len(),
        })?;
        self.mem[range].copy_from_slice(data);
        Ok(())
    }

    /// Clears `len` bytes starting at `addr`.
    pub fn zero(&mut self, addr: u32, len: usize) -> Result<(), Trap> {
        let range = self
            .range(addr, len)
            .ok_or(Trap::StoreFault { addr, width: len })?;
        self.mem[range].fill(0);
        Ok(())
    }

    pub fn mem_slice(&self, start: usize, end: usize) -> Option<&[u8]> {
        if end > self.mem.len() || start > end {
            return None;
        }
        Some(&self.mem[start..end])
    }
}
