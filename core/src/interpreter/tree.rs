//! Tree executor
//!
//! Runs a parsed [`Program`] on the same machine and with the same per-command
//! semantics as the streaming engine. A loop records its anchor cell on entry
//! and repeats its body while that cell is nonzero.
//!
//! Nesting is tracked in an explicit frame stack rather than the call stack,
//! so loop depth is limited only by memory.

use super::errors::ExecError;
use super::machine::Machine;
use super::types::{Op, Program};
use std::io::{Read, Write};
use tracing::trace;

/// One active op sequence: the program body or a running loop body
struct Frame<'a> {
    ops: &'a [Op],
    idx: usize,
    /// Anchor cell for loop frames; `None` for the program body
    anchor: Option<usize>,
}

impl<R: Read, W: Write> Machine<R, W> {
    /// Execute a parsed program
    pub fn execute(&mut self, program: &Program) -> Result<(), ExecError> {
        let mut frames = vec![Frame {
            ops: &program.body,
            idx: 0,
            anchor: None,
        }];

        while let Some(frame) = frames.last_mut() {
            let ops = frame.ops;

            let Some(op) = ops.get(frame.idx) else {
                // End of a sequence: repeat the loop or pop the frame
                match frame.anchor {
                    Some(anchor) if self.tape.cell(anchor) != 0 => frame.idx = 0,
                    Some(anchor) => {
                        trace!(anchor, depth = frames.len() - 1, "loop finished");
                        frames.pop();
                    }
                    None => {
                        frames.pop();
                    }
                }
                continue;
            };
            frame.idx += 1;

            match op {
                Op::Command(cmd) => self.apply(*cmd)?,
                Op::Loop(body) => {
                    let anchor = self.tape.cursor();
                    if self.tape.cell(anchor) != 0 {
                        frames.push(Frame {
                            ops: body,
                            idx: 0,
                            anchor: Some(anchor),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}
