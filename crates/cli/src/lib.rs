//! webotron CLI library
//!
//! Exposes the command definitions, exit codes and output helpers so the
//! binary's argument surface can be exercised from tests.

pub mod commands;
pub mod exit_code;
pub mod output;
