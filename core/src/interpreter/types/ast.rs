//! Instruction and program tree types

use serde::{Deserialize, Serialize};

/* ===================== Instruction Bytes ===================== */

pub const INCREMENT: u8 = b'+';
pub const DECREMENT: u8 = b'-';
pub const MOVE_RIGHT: u8 = b'>';
pub const MOVE_LEFT: u8 = b'<';
pub const READ: u8 = b',';
pub const WRITE: u8 = b'.';
pub const LOOP_START: u8 = b'[';
pub const LOOP_END: u8 = b']';

/// Bytes at or below this value are treated as formatting noise by default
pub const DEFAULT_NOISE_THRESHOLD: u8 = 20;

/* ===================== Commands ===================== */

/// A single tape operation (every instruction except the loop markers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Increment,
    Decrement,
    MoveRight,
    MoveLeft,
    Read,
    Write,
}

impl Command {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            INCREMENT => Some(Command::Increment),
            DECREMENT => Some(Command::Decrement),
            MOVE_RIGHT => Some(Command::MoveRight),
            MOVE_LEFT => Some(Command::MoveLeft),
            READ => Some(Command::Read),
            WRITE => Some(Command::Write),
            _ => None,
        }
    }
}

/* ===================== Tokens ===================== */

/// Classification of one program byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Command(Command),
    LoopStart,
    LoopEnd,
    /// Whitespace or control byte, skipped silently
    Noise,
    /// Anything else above the noise threshold
    Unknown(u8),
}

impl Token {
    pub fn classify(byte: u8, noise_threshold: u8) -> Self {
        if let Some(cmd) = Command::from_byte(byte) {
            return Token::Command(cmd);
        }

        match byte {
            LOOP_START => Token::LoopStart,
            LOOP_END => Token::LoopEnd,
            b if b > noise_threshold => Token::Unknown(b),
            _ => Token::Noise,
        }
    }
}

/* ===================== Program Tree ===================== */

/// Program tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Op {
    Command(Command),
    /// Loop body, repeated while the cell under the cursor at loop entry is nonzero
    Loop(Vec<Op>),
}

/// A fully parsed program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub body: Vec<Op>,
}

impl Program {
    pub fn new(body: Vec<Op>) -> Self {
        Self { body }
    }

    /// Number of loops in the program, at any depth
    pub fn loop_count(&self) -> usize {
        let mut pending: Vec<&[Op]> = vec![self.body.as_slice()];
        let mut count = 0;
        while let Some(ops) = pending.pop() {
            for op in ops {
                if let Op::Loop(body) = op {
                    count += 1;
                    pending.push(body);
                }
            }
        }
        count
    }
}

// The derived drop recurses once per nesting level; flatten instead.
impl Drop for Program {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.body);
        while let Some(op) = pending.pop() {
            if let Op::Loop(body) = op {
                pending.extend(body);
            }
        }
    }
}
