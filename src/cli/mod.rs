//! CLI command handlers

pub mod commands;

pub use commands::{compare, dump, extract, export, validate};
