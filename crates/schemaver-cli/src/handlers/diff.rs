//! Diff command handler

use super::utils::{load_schema, resolve_current_version};
use crate::cli::{DiffArgs, FailOn};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ReportEnvelope};
use schemaver_core::{Bump, VersionReport};
use schemaver_schemas::SchemaLoader;
use tracing::{info, instrument, warn};

/// Handle the diff command
#[instrument(
    skip(args, config, output),
    fields(new = %args.new_schema.display(), old = %args.old_schema.display())
)]
pub fn handle_diff(args: DiffArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("diff_command", &args.new_schema.display().to_string());

    output.info(&format!(
        "Comparing {} against {}",
        args.new_schema.display(),
        args.old_schema.display()
    ))?;

    let report = compute(&args, config)?;
    info!(
        bump = %report.bump,
        findings = report.findings.len(),
        "diff computed"
    );

    output.diff_report(&ReportEnvelope::new(
        &args.new_schema,
        Some(&args.old_schema),
        &report,
    ))?;

    check_threshold(args.fail_on, report.bump)
}

fn compute(args: &DiffArgs, config: &Config) -> Result<VersionReport> {
    let current = resolve_current_version(args.current.as_deref(), config)?;

    let mut loader = SchemaLoader::new();
    let new_schema = load_schema(&mut loader, &args.new_schema)?;
    let old_schema = load_schema(&mut loader, &args.old_schema)?;

    Ok(schemaver_core::compute_report(&new_schema, Some(&old_schema), &current)?)
}

fn check_threshold(fail_on: Option<FailOn>, bump: Bump) -> Result<()> {
    match fail_on {
        Some(level) if level.is_reached_by(bump) => {
            warn!(bump = %bump, threshold = ?level, "fail-on threshold reached");
            Err(Error::ThresholdReached {
                bump,
                threshold: level.into(),
            })
        }
        _ => Ok(()),
    }
}
