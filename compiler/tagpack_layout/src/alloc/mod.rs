//! Field allocator.
//!
//! One pass over the cases in declaration order. Each case's values are
//! classified, decomposed where allowed, and given storage:
//!
//! - overlappable leaves go into the shared overlap region, through a
//!   private per-case sub-region when the case has more than one;
//! - shareable leaves claim a non-overlapped field declared by an earlier
//!   case when one fits, otherwise declare a new one;
//! - unique leaves always declare a new field.
//!
//! A case finishes all of its values before the next case starts, so the
//! fields a case can claim are exactly those of earlier cases.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, trace};

use tagpack_ir::{CaseDescriptor, CaseValue, UnionDescriptor};

use crate::classify::KindClassifier;
use crate::field::{combine, DataField, FieldHome, FieldId, FieldKind, FieldTable};
use crate::layout::{CaseLayout, UnionLayout};
use crate::value::{ArgPath, ValueArena, ValueId, ValueNode};
use crate::{DataKind, LayoutError};

pub const OVERLAP_FIELD_NAME: &str = "_overlapped";
pub const OVERLAP_TYPE_NAME: &str = "OverlappedData";
pub const OVERLAP_ARG_NAME: &str = "overlapped";

/// Allocate storage for every case of `union`.
///
/// With `allow_overlap` false no overlap region is created and every
/// overlappable value is demoted. With it true, a region is created only
/// if at least two cases would place data in it.
pub fn allocate(union: &UnionDescriptor, allow_overlap: bool) -> Result<UnionLayout<'_>, LayoutError> {
    let options = &union.options;

    let counter = KindClassifier::new(options, true);
    let overlap_counts: Vec<usize> = union
        .cases
        .iter()
        .map(|case| count_overlappable(&counter, &case.values))
        .collect();
    let overlap_cases = overlap_counts.iter().filter(|&&n| n > 0).count();

    let mut fields = FieldTable::new();
    let overlap = (allow_overlap && overlap_cases > 1).then(|| {
        fields.push(DataField {
            kind: FieldKind::Unique,
            name: OVERLAP_FIELD_NAME.to_owned(),
            type_name: OVERLAP_TYPE_NAME.to_owned(),
            ctor_arg: Some(OVERLAP_ARG_NAME.to_owned()),
            home: FieldHome::Union,
        })
    });

    let classifier = KindClassifier::new(options, overlap.is_some());
    let mut values = ValueArena::new();
    let mut union_fields = Vec::new();
    let mut cases = Vec::with_capacity(union.cases.len());

    for (case, &count) in union.cases.iter().zip(&overlap_counts) {
        let alloc = CaseAllocator {
            fields: &mut fields,
            values: &mut values,
            union_fields: &mut union_fields,
            classifier,
            case,
            needs_region: overlap.is_some() && count > 1,
            region: None,
            region_fields: Vec::new(),
            overlap_leaves: Vec::new(),
            claims: FxHashSet::default(),
        };
        cases.push(alloc.run()?);
    }

    let layout = UnionLayout {
        fields,
        values,
        union_fields,
        overlap,
        cases,
    };
    debug!(
        union = %union.name,
        allow_overlap,
        overlap_cases,
        fields = layout.field_count(),
        "allocated layout"
    );
    Ok(layout)
}

/// Count the leaves that would be overlappable if a region existed.
fn count_overlappable(classifier: &KindClassifier<'_>, values: &[CaseValue]) -> usize {
    values
        .iter()
        .map(|value| match classifier.classify(value.ty.shape) {
            DataKind::Overlappable => 1,
            DataKind::Decomposable => count_overlappable(classifier, &value.members),
            DataKind::SameTypeSharable | DataKind::ReferenceSharable | DataKind::Unique => 0,
        })
        .sum()
}

/// Allocation state for a single case.
struct CaseAllocator<'a, 'u> {
    fields: &'a mut FieldTable,
    values: &'a mut ValueArena<'u>,
    union_fields: &'a mut Vec<FieldId>,
    classifier: KindClassifier<'u>,
    case: &'u CaseDescriptor,
    /// The case has more than one overlappable leaf, so they live in a
    /// private sub-region.
    needs_region: bool,
    region: Option<FieldId>,
    region_fields: Vec<FieldId>,
    overlap_leaves: Vec<FieldId>,
    /// Non-overlapped fields this case already uses.
    claims: FxHashSet<FieldId>,
}

impl<'u> CaseAllocator<'_, 'u> {
    fn run(mut self) -> Result<CaseLayout, LayoutError> {
        let case = self.case;
        let roots = case
            .values
            .iter()
            .map(|value| self.alloc_value(value, "", &[]))
            .collect::<Result<SmallVec<[ValueId; 4]>, _>>()?;

        // A lone overlappable leaf is the case's whole contribution.
        let overlap_field = match (self.region, self.overlap_leaves.as_slice()) {
            (Some(region), _) => Some(region),
            (None, [single]) => Some(*single),
            (None, _) => None,
        };

        trace!(
            case = %case.name,
            claimed = self.claims.len(),
            overlap_leaves = self.overlap_leaves.len(),
            "allocated case"
        );

        Ok(CaseLayout {
            values: roots,
            overlap_field,
            region_fields: self.region_fields,
        })
    }

    fn alloc_value(
        &mut self,
        value: &'u CaseValue,
        prefix: &str,
        parent_path: &[&'u str],
    ) -> Result<ValueId, LayoutError> {
        let kind = self.classifier.classify(value.ty.shape);
        let mut arg_path: ArgPath<'u> = SmallVec::from_slice(parent_path);
        arg_path.push(value.name.as_str());

        let (field, members) = match kind {
            DataKind::Decomposable => {
                if value.members.is_empty() {
                    return Err(LayoutError::InvalidShape {
                        case: self.case.name.clone(),
                        path: arg_path.join("."),
                        shape: value.ty.shape,
                        reason: "it decomposes but declares no members",
                    });
                }
                // A lone parameter doesn't repeat its own name in its members'.
                let member_prefix = if parent_path.is_empty() && self.case.values.len() == 1 {
                    prefix.to_owned()
                } else {
                    combine([prefix, value.name.as_str()])
                };
                let members = value
                    .members
                    .iter()
                    .map(|member| self.alloc_value(member, &member_prefix, &arg_path))
                    .collect::<Result<SmallVec<[ValueId; 4]>, _>>()?;
                (None, members)
            }
            DataKind::Overlappable => (Some(self.alloc_overlappable(value, prefix)), SmallVec::new()),
            DataKind::SameTypeSharable => (
                Some(self.alloc_shared(FieldKind::SameTypeSharable, value, prefix)),
                SmallVec::new(),
            ),
            DataKind::ReferenceSharable => (
                Some(self.alloc_shared(FieldKind::ReferenceSharable, value, prefix)),
                SmallVec::new(),
            ),
            DataKind::Unique => (
                Some(self.alloc_shared(FieldKind::Unique, value, prefix)),
                SmallVec::new(),
            ),
        };

        Ok(self.values.push(ValueNode {
            value,
            kind,
            field,
            arg_path,
            members,
        }))
    }

    fn alloc_overlappable(&mut self, value: &CaseValue, prefix: &str) -> FieldId {
        let leaf_name = combine([prefix, value.name.as_str()]);
        let (name, home) = if self.needs_region {
            (leaf_name, FieldHome::CaseRegion(self.region()))
        } else {
            // Siblings in the shared region need the case name to stay apart.
            (combine([self.case.name.as_str(), &leaf_name]), FieldHome::Overlap)
        };

        let id = self.fields.push(DataField {
            kind: FieldKind::Overlappable,
            name,
            type_name: value.ty.name.clone(),
            ctor_arg: None,
            home,
        });
        if self.needs_region {
            self.region_fields.push(id);
        }
        self.overlap_leaves.push(id);
        id
    }

    fn alloc_shared(&mut self, kind: FieldKind, value: &CaseValue, prefix: &str) -> FieldId {
        let arg_name = combine([self.case.name.as_str(), prefix, value.name.as_str()]);
        self.fields.find_or_allocate(
            self.union_fields,
            &mut self.claims,
            kind,
            &arg_name,
            &value.ty.name,
        )
    }

    /// The case's private sub-region, declared on first use.
    fn region(&mut self) -> FieldId {
        if let Some(region) = self.region {
            return region;
        }
        let region = self.fields.push(DataField {
            kind: FieldKind::Unique,
            name: self.case.name.clone(),
            type_name: format!("{}Data", self.case.name),
            ctor_arg: None,
            home: FieldHome::Overlap,
        });
        self.region = Some(region);
        region
    }
}

#[cfg(test)]
mod tests;
