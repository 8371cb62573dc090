/// Named checkpoints in the fixture body, in execution order.
///
/// Each variant is reported together with the value the accumulator (or the
/// loaded scalar, for [`Stage::Load`]) holds right after that operation ran.
/// The mnemonic in each comment is the instruction the operation is meant to
/// exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Add,               // add
    Sub,               // sub
    And,               // and
    Or,                // or
    Xor,               // xor
    AddImm,            // addi
    AndImm,            // andi
    OrImm,             // ori
    ShiftLeft,         // sll
    ShiftRightLogical, // srl
    ShiftRightArith,   // sra
    Store,             // sw
    Load,              // lw
    /// End of one loop iteration (beq, bne, blt, bge).
    Loop(i32),
    /// Return value of `simple_function` (jal / jalr).
    Call,
}

/// Observer hooked into the fixture body.
///
/// The default method does nothing so the bare-metal build, which uses
/// [`NoopProbe`], compiles to the plain instruction sequence.
pub trait Probe {
    fn observe(&mut self, _stage: Stage, _value: i32) {}
}

/// Probe that discards every checkpoint.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProbe;

impl Probe for NoopProbe {}

const RECORDER_CAPACITY: usize = 32;

/// Fixed-capacity checkpoint log. Needs no allocator, so it also works on target.
#[derive(Debug, Clone)]
pub struct Recorder {
    entries: [(Stage, i32); RECORDER_CAPACITY],
    len: usize,
    dropped: usize,
}

impl Recorder {
    pub const CAPACITY: usize = RECORDER_CAPACITY;

    pub fn new() -> Self {
        Self {
            entries: [(Stage::Add, 0); Self::CAPACITY],
            len: 0,
            dropped: 0,
        }
    }

    /// Recorded checkpoints in the order they were observed.
    pub fn entries(&self) -> &[(Stage, i32)] {
        &self.entries[..self.len]
    }

    /// Last value observed for `stage`, if any.
    pub fn value_at(&self, stage: Stage) -> Option<i32> {
        self.entries()
            .iter()
            .rev()
            .find(|(s, _)| *s == stage)
            .map(|(_, v)| *v)
    }

    /// Number of checkpoints that arrived after the log was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for Recorder {
    fn observe(&mut self, stage: Stage, value: i32) {
        if self.len == Self::CAPACITY {
            self.dropped += 1;
            return;
        }
        self.entries[self.len] = (stage, value);
        self.len += 1;
    }
}
