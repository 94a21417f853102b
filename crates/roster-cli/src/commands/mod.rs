//! CLI command implementations.

pub mod departments;
pub mod run;
pub mod shell;
