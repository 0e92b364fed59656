//! Single-union planning pipeline.
//!
//! validate → select layout → assign tags → map expressions → verify →
//! presentation and derivations.

use tagpack_diagnostic::Diagnostic;
use tagpack_ir::{CaseDescriptor, UnionDescriptor};

use crate::derive::{derive_plan, DerivePlan};
use crate::expr::{map_cases, CaseMapping};
use crate::layout::UnionLayout;
use crate::present::{case_names, union_names, CaseNames, UnionNames};
use crate::select::select;
use crate::tags::{assign_tags, validate};
use crate::verify::verify_round_trip;
use crate::LayoutError;

/// Everything decided for one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CasePlan<'u> {
    pub case: &'u CaseDescriptor,
    pub tag: u32,
    pub mapping: CaseMapping<'u>,
    pub names: CaseNames,
}

/// Complete plan for one union, ready for an emitter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionPlan<'u> {
    pub union: &'u UnionDescriptor,
    pub layout: UnionLayout<'u>,
    pub names: UnionNames,
    /// One entry per case, parallel to `layout.cases`.
    pub cases: Vec<CasePlan<'u>>,
    pub derive: DerivePlan,
}

impl<'u> UnionPlan<'u> {
    pub fn case(&self, name: &str) -> Option<&CasePlan<'u>> {
        self.cases.iter().find(|plan| plan.case.name == name)
    }

    pub fn tags(&self) -> Vec<u32> {
        self.cases.iter().map(|plan| plan.tag).collect()
    }
}

/// Plan one union.
///
/// Validation errors stop planning before any layout work; warnings are
/// left for the caller to collect through [`validate`].
pub fn plan_union(union: &UnionDescriptor) -> Result<UnionPlan<'_>, LayoutError> {
    let errors: Vec<Diagnostic> = validate(union)
        .into_iter()
        .filter(Diagnostic::is_error)
        .collect();
    if !errors.is_empty() {
        return Err(LayoutError::InvalidDescriptor {
            union: union.name.clone(),
            diagnostics: errors,
        });
    }

    let layout = select(union)?;
    let tags = assign_tags(&union.cases)?;
    let mappings = map_cases(union, &layout, &tags)?;
    verify_round_trip(union, &layout, &mappings)?;

    let derive = derive_plan(union, &tags, &mappings);
    let cases = union
        .cases
        .iter()
        .zip(tags)
        .zip(mappings)
        .map(|((case, tag), mapping)| CasePlan {
            names: case_names(union, case, mapping.combined.as_ref()),
            case,
            tag,
            mapping,
        })
        .collect();

    Ok(UnionPlan {
        union,
        layout,
        names: union_names(union),
        cases,
        derive,
    })
}
