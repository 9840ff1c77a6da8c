//! CLI module for the proctor timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Parsing of interactive stdin commands
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, ConfigArgs, RunArgs};
pub use display::Display;
pub use input::{parse_line, Input};
