//! Command line interface for the `veritas` binary.

pub mod args;
pub mod commands;
