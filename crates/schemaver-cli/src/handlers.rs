//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod bump;
mod completions;
mod diff;
mod utils;

pub use bump::handle_bump;
pub use completions::handle_completions;
pub use diff::handle_diff;
