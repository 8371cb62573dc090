use goblin::elf::section_header::{SHF_ALLOC, SHT_NOBITS};
use goblin::elf::Elf;

pub struct ElfInfo<'a> {
    pub entry: u64,
    pub sections: Vec<ElfSection<'a>>,
    pub symbols: Vec<ElfSymbol>,
}

pub struct ElfSection<'a> {
    pub name: String,
    pub addr: u64,
    pub size: u64,
    /// Occupies memory at run time (`SHF_ALLOC`).
    pub alloc: bool,
    /// Has no file contents (`.bss`); `data` is empty.
    pub nobits: bool,
    pub data: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElfSymbol {
    pub name: String,
    pub addr: u64,
    pub size: u64,
}

impl<'a> ElfInfo<'a> {
    /// Merges the sections accepted by `filter` into one buffer and returns it
    /// with its base address. Gaps between sections are zero-filled.
    fn flatten(&self, filter: impl Fn(&ElfSection) -> bool) -> Option<(Vec<u8>, u64)> {
        let selected: Vec<&ElfSection> = self.sections.iter().filter(|s| filter(s)).collect();

        let min_addr = selected.iter().map(|s| s.addr).min()?;
        let max_addr = selected.iter().map(|s| s.addr + s.size).max()?;

        let mut flat = vec![0u8; (max_addr - min_addr) as usize];
        for section in selected {
            let offset = (section.addr - min_addr) as usize;
            flat[offset..offset + section.data.len()].copy_from_slice(section.data);
        }

        Some((flat, min_addr))
    }

    /// Returns a flat buffer with all `.text*` sections merged, and the base address.
    pub fn get_flat_code(&self) -> Option<(Vec<u8>, u64)> {
        self.flatten(|s| s.name.starts_with(".text"))
    }

    /// Sections that occupy guest memory, in header order.
    pub fn loadable_sections(&self) -> impl Iterator<Item = &ElfSection<'a>> {
        self.sections.iter().filter(|s| s.alloc && s.size > 0)
    }

    /// Returns a reference to a section by its name, if it exists.
    /// Only the first section with the given name is returned, or None if not found.
    pub fn get_section_by_name(&self, name: &str) -> Option<&ElfSection<'a>> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn symbol(&self, name: &str) -> Option<&ElfSymbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Address of `name` truncated to the 32-bit guest address space.
    pub fn symbol_addr(&self, name: &str) -> Option<u32> {
        self.symbol(name).map(|s| s.addr as u32)
    }
}

pub fn parse_elf_from_bytes(bytes: &[u8]) -> Result<ElfInfo<'_>, goblin::error::Error> {
    let elf = Elf::parse(bytes)?;

    let mut sections = Vec::new();
    for section in elf.section_headers.iter() {
        let Some(name) = elf.shdr_strtab.get_at(section.sh_name) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let offset = section.sh_offset as usize;
        let size = section.sh_size as usize;
        let nobits = section.sh_type == SHT_NOBITS;

        let data = if nobits {
            &bytes[0..0]
        } else if offset + size <= bytes.len() {
            &bytes[offset..offset + size]
        } else {
            continue;
        };

        sections.push(ElfSection {
            name: name.to_string(),
            addr: section.sh_addr,
            size: section.sh_size,
            alloc: section.sh_flags & u64::from(SHF_ALLOC) != 0,
            nobits,
            data,
        });
    }

    let symbols = elf
        .syms
        .iter()
        .filter_map(|sym| {
            let name = elf.strtab.get_at(sym.st_name)?;
            (!name.is_empty()).then(|| ElfSymbol {
                name: name.to_string(),
                addr: sym.st_value,
                size: sym.st_size,
            })
        })
        .collect();

    Ok(ElfInfo {
        entry: elf.entry,
        sections,
        symbols,
    })
}
