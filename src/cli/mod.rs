//! CLI module for tendergen
//!
//! Handles command-line argument parsing and export file writing.

pub mod args;
pub mod export;

pub use args::{Args, Commands, ExportFormat, GenerateArgs, Verbosity};
pub use export::write_exports;
