use crate::cpu::{StepOutcome, CPU};
use crate::elf::ElfInfo;
use crate::memory::Memory;
use crate::trap::Trap;

/// A hart plus its guest memory.
pub struct VM {
    pub cpu: CPU,
    pub memory: Memory,
}

impl VM {
    pub fn new(memory_size: usize) -> Self {
        Self {
            cpu: CPU::new(),
            memory: Memory::new(memory_size),
        }
    }

    /// Copies raw machine code to `addr` and points the pc at it.
    pub fn set_code(&mut self, addr: u32, code: &[u8]) -> Result<(), Trap> {
        self.memory.write_bytes(addr, code)?;
        self.cpu.pc = addr;
        Ok(())
    }

    /// Copies every allocated section of `elf` into memory and jumps to its
    /// entry point. `.bss` is zeroed explicitly so an image can be reloaded.
    ///
    /// Every section and the entry point are checked against guest memory
    /// before anything is written.
    pub fn load_elf(&mut self, elf: &ElfInfo) -> Result<(), Trap> {
        let limit = self.memory.size() as u64;
        let in_bounds = |addr: u64, size: u64| addr.checked_add(size).is_some_and(|end| end <= limit);

        for section in elf.loadable_sections() {
            if !in_bounds(section.addr, section.size) {
                return Err(Trap::ImageOutOfBounds {
                    addr: section.addr,
                    size: section.size,
                });
            }
        }
        if !in_bounds(elf.entry, 4) {
            return Err(Trap::ImageOutOfBounds {
                addr: elf.entry,
                size: 4,
            });
        }

        for section in elf.loadable_sections() {
            let addr = section.addr as u32;
            if section.nobits {
                self.memory.zero(addr, section.size as usize)?;
            } else {
                self.memory.write_bytes(addr, section.data)?;
            }
            if self.cpu.verbose {
                println!(
                    "📦 {:<10} -> 0x{:08x} ({} bytes)",
                    section.name, addr, section.size
                );
            }
        }
        self.cpu.pc = elf.entry as u32;
        Ok(())
    }

    pub fn step(&mut self) -> Result<StepOutcome, Trap> {
        self.cpu.step(&mut self.memory)
    }

    pub fn dump_registers(&self) {
        println!("--- Register Dump ---");
        print!("{}", self.cpu.dump_registers());
        println!("---------------------");
    }
}
