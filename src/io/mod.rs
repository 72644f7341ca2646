//! CLI input/output concerns: process exit codes.

pub mod exit_code;

pub use exit_code::ExitCode;
