pub mod cli;
pub mod config;
pub mod interpreter;

// Re-export main types
pub use config::{Config, EngineKind};
pub use interpreter::{ExecError, Machine, ParseError, Program, Tape, TokenSource};
