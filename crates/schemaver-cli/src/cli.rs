//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use crate::config::Config;
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use schemaver_core::Bump;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Schemaver CLI - semantic versions from GraphQL schema changes
///
/// Compares two introspection snapshots of a schema and reports which
/// part of the version the change calls for.
#[derive(Parser, Debug)]
#[command(
    name = "schemaver",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMAVER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results [default: human, or the config file's]
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the next version of a schema
    Bump(BumpArgs),

    /// List every change between two schemas and the bump it implies
    Diff(DiffArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the bump command
#[derive(Parser, Debug)]
pub struct BumpArgs {
    /// Introspection result of the new schema (JSON or YAML)
    #[arg(value_name = "NEW_SCHEMA")]
    pub new_schema: PathBuf,

    /// Introspection result of the previously published schema
    #[arg(long, value_name = "OLD_SCHEMA")]
    pub old: Option<PathBuf>,

    /// Version the previous schema was published under
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,
}

/// Arguments for the diff command
#[derive(Parser, Debug)]
pub struct DiffArgs {
    /// Introspection result of the new schema (JSON or YAML)
    #[arg(value_name = "NEW_SCHEMA")]
    pub new_schema: PathBuf,

    /// Introspection result of the previously published schema
    #[arg(value_name = "OLD_SCHEMA")]
    pub old_schema: PathBuf,

    /// Version the previous schema was published under
    #[arg(long, value_name = "VERSION")]
    pub current: Option<String>,

    /// Exit with a dedicated status when the bump reaches this level
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub fail_on: Option<FailOn>,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Lowest bump that fails a `diff --fail-on` run
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    Patch,
    Minor,
    Major,
}

impl FailOn {
    /// Whether `bump` is at least this level
    pub fn is_reached_by(self, bump: Bump) -> bool {
        bump >= Bump::from(self)
    }
}

impl From<FailOn> for Bump {
    fn from(level: FailOn) -> Self {
        match level {
            FailOn::Patch => Bump::Patch,
            FailOn::Minor => Bump::Minor,
            FailOn::Major => Bump::Major,
        }
    }
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Output format from the flag, falling back to the configuration
    pub fn output_format(&self, config: &Config) -> Result<OutputFormat> {
        match self.output {
            Some(format) => Ok(format),
            None => config.output_format(),
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self, config: &Config) -> bool {
        !self.no_color && config.output.color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
