//! Machine state
//!
//! The machine holds everything a run needs:
//! - tape: cells and cursor
//! - input/output: where `,` reads from and `.` writes to
//! - settings: noise threshold and I/O encodings
//!
//! Both execution paths (streaming in `engine`, tree in `tree`) drive the same
//! machine through [`Machine::apply`].

use super::errors::ExecError;
use super::source::read_byte;
use super::types::{Command, Tape, DEFAULT_NOISE_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::io::{self, ErrorKind, Read, Write};

/* ===================== Settings ===================== */

/// How `,` turns external input into a cell value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// One raw byte per read
    #[default]
    Byte,
    /// One whitespace-delimited decimal number (0-255) per read
    Decimal,
}

/// How `.` renders a cell value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// The raw byte
    #[default]
    Byte,
    /// The byte as a Unicode scalar (U+0000..=U+00FF), UTF-8 encoded
    Char,
}

impl InputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            InputMode::Byte => "byte",
            InputMode::Decimal => "decimal",
        }
    }
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Byte => "byte",
            OutputMode::Char => "char",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Unrecognized bytes above this value are errors; the rest are ignored
    pub noise_threshold: u8,
    pub input: InputMode,
    pub output: OutputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            noise_threshold: DEFAULT_NOISE_THRESHOLD,
            input: InputMode::default(),
            output: OutputMode::default(),
        }
    }
}

/* ===================== Machine ===================== */

pub struct Machine<R, W> {
    pub(crate) tape: Tape,
    pub(crate) settings: Settings,
    input: R,
    output: W,
}

impl<R: Read, W: Write> Machine<R, W> {
    /// Create a machine with a default-length tape and default settings
    pub fn new(input: R, output: W) -> Self {
        Self {
            tape: Tape::default(),
            settings: Settings::default(),
            input,
            output,
        }
    }

    pub fn with_tape(mut self, tape: Tape) -> Self {
        self.tape = tape;
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn tape_mut(&mut self) -> &mut Tape {
        &mut self.tape
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Execute one tape operation
    pub fn apply(&mut self, cmd: Command) -> Result<(), ExecError> {
        match cmd {
            Command::Increment => self.tape.increment(),
            Command::Decrement => self.tape.decrement(),
            Command::MoveRight => self.tape.move_right()?,
            Command::MoveLeft => self.tape.move_left()?,
            Command::Read => {
                let value = self.read_value().map_err(ExecError::Input)?;
                self.tape.set(value);
            }
            Command::Write => self.write_value().map_err(ExecError::Output)?,
        }
        Ok(())
    }

    fn read_value(&mut self) -> io::Result<u8> {
        match self.settings.input {
            InputMode::Byte => read_byte(&mut self.input)?.ok_or_else(|| {
                io::Error::new(ErrorKind::UnexpectedEof, "end of input")
            }),
            InputMode::Decimal => read_decimal(&mut self.input),
        }
    }

    fn write_value(&mut self) -> io::Result<()> {
        let value = self.tape.get();
        match self.settings.output {
            OutputMode::Byte => self.output.write_all(&[value])?,
            OutputMode::Char => {
                let mut buf = [0u8; 4];
                let encoded = char::from(value).encode_utf8(&mut buf);
                self.output.write_all(encoded.as_bytes())?;
            }
        }
        self.output.flush()
    }
}

/// Skip leading whitespace, then read digits up to the next whitespace or
/// end-of-stream. The terminating whitespace byte is consumed.
fn read_decimal<R: Read>(input: &mut R) -> io::Result<u8> {
    let mut digits = String::new();
    loop {
        match read_byte(input)? {
            Some(b) if b.is_ascii_whitespace() => {
                if !digits.is_empty() {
                    break;
                }
            }
            Some(b) => digits.push(char::from(b)),
            None if digits.is_empty() => {
                return Err(io::Error::new(ErrorKind::UnexpectedEof, "end of input"));
            }
            None => break,
        }
    }

    digits.parse::<u8>().map_err(|e| {
        io::Error::new(
            ErrorKind::InvalidData,
            format!("expected a number between 0 and 255, got {digits:?}: {e}"),
        )
    })
}
