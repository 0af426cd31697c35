// src/commands/mod.rs
//! Command handlers for the sccs2rcs CLI

mod convert;
pub mod progress;

pub use convert::cmd_convert;
