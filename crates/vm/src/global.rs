pub struct Config;

impl Config {
    /// Guest memory, based at address 0. Covers the image and the 4 KiB stack.
    pub const MEMORY_SIZE: usize = 0x1_0000;
    /// Instructions executed before a run is declared runaway.
    pub const DEFAULT_MAX_STEPS: usize = 100_000;
    /// Reset vector: the first instruction of the image.
    pub const RESET_PC: u32 = 0x0;
}
