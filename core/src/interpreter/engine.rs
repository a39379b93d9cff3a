//! Streaming execution engine
//!
//! Tokens are pulled lazily from a [`TokenSource`] and executed as they arrive.
//! A `[` switches the current invocation into buffering: every following byte
//! is copied verbatim (nested markers only adjust the depth count) until the
//! matching `]`. Bytes are still classified while buffering, so an unknown
//! command fails the run even inside a loop that never executes. The captured
//! body is then replayed through a [`ReplaySource`] by a recursive call to
//! [`Machine::run`] for as long as the anchor cell, the cell under the cursor
//! when `[` was seen, is nonzero.
//!
//! Each invocation keeps its own buffering state on the call stack, so every
//! nesting level costs one recursive call; depth is bounded by the thread's
//! stack (roughly 10,000 levels on an 8 MiB stack in debug builds). The tree
//! executor has no such limit. The first error unwinds every level immediately.

use super::errors::ExecError;
use super::machine::Machine;
use super::source::{ReplaySource, TokenSource};
use super::types::Token;
use std::io::{Read, Write};
use tracing::trace;

impl<R: Read, W: Write> Machine<R, W> {
    /// Run tokens from `source` until it is exhausted or an operation fails
    pub fn run<S: TokenSource + ?Sized>(&mut self, source: &mut S) -> Result<(), ExecError> {
        while let Some(byte) = source.next_token()? {
            match Token::classify(byte, self.settings.noise_threshold) {
                Token::Command(cmd) => self.apply(cmd)?,

                Token::LoopStart => {
                    let anchor = self.tape.cursor();
                    let body = capture_body(source, self.settings.noise_threshold)?;
                    self.replay(anchor, &body)?;
                }

                Token::LoopEnd => return Err(ExecError::UnmatchedLoopEnd),

                Token::Noise => {}

                Token::Unknown(byte) => return Err(ExecError::UnknownCommand { byte }),
            }
        }

        Ok(())
    }

    fn replay(&mut self, anchor: usize, body: &[u8]) -> Result<(), ExecError> {
        let mut source = ReplaySource::new(body);
        let mut iterations: u64 = 0;

        while self.tape.cell(anchor) != 0 {
            source.rewind();
            self.run(&mut source)?;
            iterations += 1;
        }

        trace!(anchor, iterations, body_len = body.len(), "loop finished");
        Ok(())
    }
}

/// Copy bytes up to (not including) the `]` that closes the loop just opened
///
/// Stops at the first byte above `noise_threshold` that isn't an instruction.
fn capture_body<S: TokenSource + ?Sized>(
    source: &mut S,
    noise_threshold: u8,
) -> Result<Vec<u8>, ExecError> {
    let mut body = Vec::new();
    let mut depth = 0usize;

    loop {
        let Some(byte) = source.next_token()? else {
            return Err(ExecError::UnmatchedLoopStart);
        };

        match Token::classify(byte, noise_threshold) {
            Token::LoopStart => depth += 1,
            Token::LoopEnd if depth == 0 => return Ok(body),
            Token::LoopEnd => depth -= 1,
            Token::Unknown(byte) => return Err(ExecError::UnknownCommand { byte }),
            Token::Command(_) | Token::Noise => {}
        }

        body.push(byte);
    }
}
