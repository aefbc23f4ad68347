//! Command-line argument parsing for tendergen
//!
//! The `generate` subcommand is the project details form.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::errors::Result;
use crate::types::{ProjectDetails, DEFAULT_DURATION_MONTHS};

/// tendergen - Draft tender documents from similar past tenders
#[derive(Parser, Debug)]
#[command(name = "tendergen")]
#[command(version)]
#[command(about = "Draft procurement tender documents with a language model", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (warnings), -v (info), -vv (debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no progress bar, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a complete tender document
    Generate(GenerateArgs),

    /// Show reference index statistics
    Stats,

    /// Display current configuration
    Config,
}

/// Project details form and export options
#[derive(ClapArgs, Debug, Clone)]
pub struct GenerateArgs {
    /// Project title
    #[arg(long)]
    pub title: String,

    /// Project location
    #[arg(long)]
    pub location: String,

    /// Project duration in months
    #[arg(long, default_value_t = DEFAULT_DURATION_MONTHS, value_parser = clap::value_parser!(u32).range(1..))]
    pub duration: u32,

    /// Project budget (optional)
    #[arg(long)]
    pub budget: Option<String>,

    /// Detailed description of the project
    #[arg(long)]
    pub description: String,

    /// Directory for exported files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = ExportFormat::Both)]
    pub format: ExportFormat,
}

/// Which export files to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Text,
    Json,
    Both,
}

impl ExportFormat {
    pub fn writes_text(&self) -> bool {
        matches!(self, ExportFormat::Text | ExportFormat::Both)
    }

    pub fn writes_json(&self) -> bool {
        matches!(self, ExportFormat::Json | ExportFormat::Both)
    }
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl GenerateArgs {
    /// Validate the form into project details
    pub fn project_details(&self) -> Result<ProjectDetails> {
        ProjectDetails::new(
            self.title.clone(),
            self.location.clone(),
            self.duration,
            self.budget.clone(),
            self.description.clone(),
        )
    }
}

impl Verbosity {
    /// Default tracing filter directive for this level
    pub fn log_directive(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
