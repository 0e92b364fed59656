//! Discriminant assignment and descriptor validation.
//!
//! Explicit tags are reserved up front; the remaining cases receive values
//! in declaration order. The assigner never hands out 0, which is kept for
//! an explicitly declared default case.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;
use tracing::debug;

use tagpack_diagnostic::{Diagnostic, ErrorCode};
use tagpack_ir::{CaseDescriptor, UnionDescriptor};

use crate::LayoutError;

/// Sorted set of discriminant values already in use.
#[derive(Clone, Debug, Default)]
pub struct TagAssigner {
    used: BTreeSet<u32>,
}

impl TagAssigner {
    /// Start with the given explicit values reserved.
    pub fn new(explicit: impl IntoIterator<Item = u32>) -> Self {
        Self {
            used: explicit.into_iter().collect(),
        }
    }

    /// The value the next unspecified case would get.
    ///
    /// Scans upward from the smallest used value and returns one past the
    /// end of the first contiguous run. An empty set yields 1. When that run
    /// ends at `u32::MAX`, the lowest free value above 0 is used instead;
    /// `None` means every value from 1 up is taken.
    pub fn next_value(&self) -> Option<u32> {
        let mut values = self.used.iter().copied();
        let Some(first) = values.next() else {
            return Some(1);
        };
        let mut last = first;
        for value in values {
            if last.checked_add(1).is_some_and(|next| value > next) {
                break;
            }
            last = value;
        }
        // A run reaching the top covers everything from `first` up.
        last.checked_add(1).or_else(|| (first > 1).then_some(1))
    }

    /// Resolve one case's tag, reserving it.
    pub fn assign(&mut self, explicit: Option<u32>) -> Option<u32> {
        let tag = match explicit {
            Some(tag) => tag,
            None => self.next_value()?,
        };
        self.used.insert(tag);
        Some(tag)
    }
}

/// Tag value of every case, in declaration order.
pub fn assign_tags(cases: &[CaseDescriptor]) -> Result<Vec<u32>, LayoutError> {
    let mut assigner = TagAssigner::new(cases.iter().filter_map(|case| case.tag));
    cases
        .iter()
        .map(|case| {
            let tag = assigner
                .assign(case.tag)
                .ok_or_else(|| LayoutError::TagsExhausted {
                    case: case.name.clone(),
                })?;
            if case.tag.is_none() {
                debug!(case = %case.name, tag, "assigned tag");
            }
            Ok(tag)
        })
        .collect()
}

/// Check a union for conflicts that make planning meaningless.
///
/// Duplicate case names and duplicate explicit tags are errors; a union
/// without cases is a warning.
pub fn validate(union: &UnionDescriptor) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if union.cases.is_empty() {
        diagnostics.push(
            Diagnostic::warning(ErrorCode::W1001)
                .with_message(format!("union `{}` declares no cases", union.name))
                .with_union(union.name.as_str()),
        );
    }

    let mut names: FxHashMap<&str, usize> = FxHashMap::default();
    let mut tags: FxHashMap<u32, &str> = FxHashMap::default();

    for (index, case) in union.cases.iter().enumerate() {
        if let Some(&first) = names.get(case.name.as_str()) {
            diagnostics.push(
                Diagnostic::error(ErrorCode::E1001)
                    .with_message(format!("case name `{}` is declared more than once", case.name))
                    .with_union(union.name.as_str())
                    .with_case(case.name.as_str())
                    .with_note(format!("first declared as case #{}", first + 1)),
            );
        } else {
            names.insert(case.name.as_str(), index);
        }

        if let Some(tag) = case.tag {
            if let Some(&owner) = tags.get(&tag) {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E1002)
                        .with_message(format!("tag value {tag} is used more than once"))
                        .with_union(union.name.as_str())
                        .with_case(case.name.as_str())
                        .with_note(format!("first used by case `{owner}`")),
                );
            } else {
                tags.insert(tag, case.name.as_str());
            }
        }
    }

    diagnostics
}
