//! Tests for the interpreter
//!
//! Organized by feature area

mod helpers;
mod io_tests;
mod tree_tests;
