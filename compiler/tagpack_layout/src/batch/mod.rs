//! Planning many unions at once.
//!
//! Unions share no allocation state, so each is planned on its own rayon
//! task. A failure is kept with its union and never affects the others.

use rayon::prelude::*;
use tracing::warn;

use tagpack_diagnostic::Diagnostic;
use tagpack_ir::UnionDescriptor;

use crate::plan::{plan_union, UnionPlan};
use crate::tags::validate;
use crate::LayoutError;

/// Result of planning one union in a batch.
#[derive(Debug)]
pub struct PlanOutcome<'u> {
    pub union: &'u UnionDescriptor,
    /// Non-fatal findings, reported even when planning succeeds.
    pub warnings: Vec<Diagnostic>,
    pub result: Result<UnionPlan<'u>, LayoutError>,
}

impl PlanOutcome<'_> {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Warnings followed by the failure's diagnostics, if any.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = self.warnings.clone();
        if let Err(err) = &self.result {
            out.extend(err.to_diagnostics(&self.union.name));
        }
        out
    }
}

/// Plan every union, in parallel, keeping input order.
pub fn plan_all(unions: &[UnionDescriptor]) -> Vec<PlanOutcome<'_>> {
    unions.par_iter().map(plan_one).collect()
}

fn plan_one(union: &UnionDescriptor) -> PlanOutcome<'_> {
    let warnings = validate(union)
        .into_iter()
        .filter(|diag| !diag.is_error())
        .collect();
    let result = plan_union(union);
    if let Err(err) = &result {
        warn!(union = %union.name, error = %err, "union planning failed");
    }
    PlanOutcome {
        union,
        warnings,
        result,
    }
}
