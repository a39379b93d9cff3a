//! Token sources
//!
//! The engine pulls program bytes one at a time through [`TokenSource`] and
//! never learns where they come from. Three origins exist:
//! - [`FileSource`]: a program file (or any reader); read errors other than a
//!   clean end-of-stream are reported
//! - [`InteractiveSource`]: standard input in the read-eval loop; any read
//!   failure simply ends the stream
//! - [`ReplaySource`]: a captured loop body, rewound for every iteration
//!
//! Once a source reports exhaustion it keeps doing so.

use super::errors::ExecError;
use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

/// Produces the next program byte, or `None` once the program is exhausted
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<u8>, ExecError>;
}

/// Read one byte, retrying on `Interrupted`. `Ok(None)` means end-of-stream.
pub(crate) fn read_byte<R: Read + ?Sized>(reader: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/* ===================== File ===================== */

pub struct FileSource<R> {
    reader: R,
    done: bool,
}

impl<R: Read> FileSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl FileSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: Read> TokenSource for FileSource<R> {
    fn next_token(&mut self) -> Result<Option<u8>, ExecError> {
        if self.done {
            return Ok(None);
        }
        match read_byte(&mut self.reader) {
            Ok(Some(byte)) => Ok(Some(byte)),
            Ok(None) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                self.done = true;
                Err(ExecError::Source(e))
            }
        }
    }
}

/* ===================== Interactive ===================== */

pub struct InteractiveSource<R> {
    reader: R,
    done: bool,
}

impl<R: Read> InteractiveSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            done: false,
        }
    }
}

impl<R: Read> TokenSource for InteractiveSource<R> {
    fn next_token(&mut self) -> Result<Option<u8>, ExecError> {
        if self.done {
            return Ok(None);
        }
        match read_byte(&mut self.reader) {
            Ok(Some(byte)) => Ok(Some(byte)),
            Ok(None) => {
                self.done = true;
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(error = %e, "interactive input failed, ending stream");
                self.done = true;
                Ok(None)
            }
        }
    }
}

/* ===================== Replay ===================== */

/// In-memory source over a captured loop body
pub struct ReplaySource<'a> {
    body: &'a [u8],
    pos: usize,
}

impl<'a> ReplaySource<'a> {
    pub fn new(body: &'a [u8]) -> Self {
        Self { body, pos: 0 }
    }

    /// Restart from the first byte of the body
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl TokenSource for ReplaySource<'_> {
    fn next_token(&mut self) -> Result<Option<u8>, ExecError> {
        let Some(&byte) = self.body.get(self.pos) else {
            return Ok(None);
        };
        self.pos += 1;
        Ok(Some(byte))
    }
}
