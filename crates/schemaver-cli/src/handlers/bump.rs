//! Bump command handler

use super::utils::{load_schema, resolve_current_version};
use crate::cli::BumpArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ReportEnvelope};
use schemaver_core::VersionReport;
use schemaver_schemas::SchemaLoader;
use tracing::{info, instrument};

/// Handle the bump command
#[instrument(skip(args, config, output), fields(new = %args.new_schema.display()))]
pub fn handle_bump(args: BumpArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("bump_command", &args.new_schema.display().to_string());

    let report = compute(&args, config)?;
    info!(from = %report.previous_version, to = %report.next_version, "bump computed");

    output.bump_report(&ReportEnvelope::new(&args.new_schema, args.old.as_deref(), &report))
}

fn compute(args: &BumpArgs, config: &Config) -> Result<VersionReport> {
    let current = resolve_current_version(args.current.as_deref(), config)?;

    let mut loader = SchemaLoader::new();
    let new_schema = load_schema(&mut loader, &args.new_schema)?;
    let old_schema = args
        .old
        .as_deref()
        .map(|path| load_schema(&mut loader, path))
        .transpose()?;

    Ok(schemaver_core::compute_report(&new_schema, old_schema.as_ref(), &current)?)
}
