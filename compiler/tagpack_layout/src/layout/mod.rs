//! Allocated storage layout of one union.

use smallvec::SmallVec;

use crate::field::{DataField, FieldHome, FieldId, FieldTable};
use crate::value::{ValueArena, ValueId};
use crate::LayoutError;

/// Storage layout produced by one allocation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionLayout<'u> {
    pub fields: FieldTable,
    pub values: ValueArena<'u>,
    /// Non-overlapped fields declared directly on the union, in
    /// allocation order.
    pub union_fields: Vec<FieldId>,
    /// The union-wide overlap region, present only when at least two cases
    /// contribute overlappable data.
    pub overlap: Option<FieldId>,
    /// One entry per case, in declaration order.
    pub cases: Vec<CaseLayout>,
}

/// Storage owned by one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseLayout {
    /// Top-level values, one per factory parameter.
    pub values: SmallVec<[ValueId; 4]>,
    /// The case's contribution to the overlap region: either its single
    /// overlappable leaf or its private sub-region.
    pub overlap_field: Option<FieldId>,
    /// Fields inside the private sub-region. Empty when there is none.
    pub region_fields: Vec<FieldId>,
}

impl CaseLayout {
    /// The private sub-region, if this case has one.
    pub fn region(&self) -> Option<FieldId> {
        if self.region_fields.is_empty() {
            None
        } else {
            self.overlap_field
        }
    }
}

/// Field IDs from the union root down to a stored field.
pub type FieldPath = SmallVec<[FieldId; 3]>;

impl UnionLayout<'_> {
    /// Total storage fields: the non-overlapped fields plus one for the
    /// overlap region.
    pub fn field_count(&self) -> usize {
        self.union_fields.len() + usize::from(self.overlap.is_some())
    }

    #[inline]
    pub fn field(&self, id: FieldId) -> &DataField {
        &self.fields[id]
    }

    /// Resolve the path from the union root to `field`.
    ///
    /// Fails if the field is not reachable through the declared regions,
    /// which would mean the allocator recorded a field it never placed.
    pub fn path_to(&self, field: FieldId, case: &str) -> Result<FieldPath, LayoutError> {
        let missing = || LayoutError::MissingField {
            case: case.to_owned(),
            path: self.fields[field].name.clone(),
        };

        match self.fields[field].home {
            FieldHome::Union => {
                if self.union_fields.contains(&field) || self.overlap == Some(field) {
                    Ok(SmallVec::from_slice(&[field]))
                } else {
                    Err(missing())
                }
            }
            FieldHome::Overlap => {
                let overlap = self.overlap.ok_or_else(missing)?;
                if self.cases.iter().any(|c| c.overlap_field == Some(field)) {
                    Ok(SmallVec::from_slice(&[overlap, field]))
                } else {
                    Err(missing())
                }
            }
            FieldHome::CaseRegion(region) => {
                let overlap = self.overlap.ok_or_else(missing)?;
                let placed = self.cases.iter().any(|c| {
                    c.overlap_field == Some(region) && c.region_fields.contains(&field)
                });
                if placed {
                    Ok(SmallVec::from_slice(&[overlap, region, field]))
                } else {
                    Err(missing())
                }
            }
        }
    }

    /// Dotted field names along `path`.
    pub fn path_names(&self, path: &[FieldId]) -> String {
        let mut out = String::new();
        for (i, &id) in path.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&self.fields[id].name);
        }
        out
    }
}
