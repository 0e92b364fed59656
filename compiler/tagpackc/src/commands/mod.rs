//! `plan` and `check` commands.
//!
//! Both load a JSON batch, plan every union in parallel and report
//! per-union diagnostics. They return whether every union planned
//! cleanly; the binary turns that into the exit code.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use tagpack_ir::UnionDescriptor;
use tagpack_layout::{plan_all, PlanEmitter, PlanOutcome};

use crate::input::load_file;
use crate::listing::PlanListing;
use crate::DriverError;

/// Options of the `plan` command.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlanArgs {
    /// Force overlap off for every union in the batch.
    pub no_overlap: bool,
    /// Print each case's value tree.
    pub verbose: bool,
}

impl PlanArgs {
    /// Parse the flags following `plan <file>`.
    pub fn parse(args: &[String]) -> Result<Self, DriverError> {
        let mut parsed = PlanArgs::default();
        for arg in args {
            match arg.as_str() {
                "--no-overlap" => parsed.no_overlap = true,
                "-v" | "--verbose" => parsed.verbose = true,
                other => return Err(DriverError::Usage(format!("unknown option `{other}`"))),
            }
        }
        Ok(parsed)
    }

    fn apply(self, unions: Vec<UnionDescriptor>) -> Vec<UnionDescriptor> {
        if !self.no_overlap {
            return unions;
        }
        unions
            .into_iter()
            .map(|union| {
                let options = union.options.with_overlap_structs(false);
                union.with_options(options)
            })
            .collect()
    }
}

/// Plan every union in `path`, writing listings to stdout and
/// diagnostics to stderr.
pub fn plan_file(path: &Path, args: PlanArgs) -> Result<bool, DriverError> {
    let unions = load_file(path)?;
    debug!(path = %path.display(), unions = unions.len(), "loaded batch");
    plan_unions(unions, args, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())
}

/// Check every union in `path`, writing diagnostics to stderr.
pub fn check_file(path: &Path) -> Result<bool, DriverError> {
    let unions = load_file(path)?;
    debug!(path = %path.display(), unions = unions.len(), "loaded batch");
    check_unions(&unions, &mut std::io::stderr().lock())
}

pub fn plan_unions(
    unions: Vec<UnionDescriptor>,
    args: PlanArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<bool, DriverError> {
    let unions = args.apply(unions);
    let outcomes = plan_all(&unions);

    let mut listing = PlanListing::new(out, args.verbose);
    for outcome in &outcomes {
        report(outcome, err)?;
        if let Ok(plan) = &outcome.result {
            listing.emit(plan)?;
        }
    }
    summarize(&outcomes, err)
}

pub fn check_unions(unions: &[UnionDescriptor], err: &mut impl Write) -> Result<bool, DriverError> {
    let outcomes = plan_all(unions);
    for outcome in &outcomes {
        report(outcome, err)?;
    }
    summarize(&outcomes, err)
}

fn report(outcome: &PlanOutcome<'_>, err: &mut impl Write) -> Result<(), DriverError> {
    for diagnostic in outcome.diagnostics() {
        writeln!(err, "{diagnostic}")?;
    }
    Ok(())
}

fn summarize(outcomes: &[PlanOutcome<'_>], err: &mut impl Write) -> Result<bool, DriverError> {
    let failed = outcomes.iter().filter(|outcome| !outcome.is_ok()).count();
    if failed > 0 {
        writeln!(err, "error: {failed} of {} union(s) failed", outcomes.len())?;
    }
    Ok(failed == 0)
}
