//! Command-line interface
//!
//! Argument definitions, command handlers, and the shared terminal
//! renderer used by `run` and `simulate`.

pub mod args;
pub mod commands;
pub mod render;
