//! Construction and access expressions.
//!
//! For every case the mapper derives how a factory call fills the union's
//! storage ([`Construction`]) and how the case's logical value is read
//! back ([`CaseAccess`]). Reads are always guarded by a discriminant
//! check, and narrowing casts only ever appear on the read side.

use tagpack_ir::{CaseDescriptor, UnionDescriptor};

use crate::field::FieldId;
use crate::layout::{FieldPath, UnionLayout};
use crate::value::{ArgPath, ValueId};
use crate::{DataKind, LayoutError};

/// Expression reading (part of) a logical value out of storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessExpr {
    /// Read a stored field.
    Field(FieldPath),
    /// Cast a widened field back to the value's own type.
    Narrow { ty: String, inner: Box<AccessExpr> },
    /// Reassemble a record from its members.
    Record { ty: String, members: Vec<AccessExpr> },
    /// Reassemble a tuple from its elements.
    Tuple(Vec<AccessExpr>),
    /// Named grouping of a multi-valued case's values.
    Grouping { ty: String, members: Vec<AccessExpr> },
    /// The only instance of a singleton type.
    Singleton { ty: String, accessor: String },
}

/// Discriminant-guarded read of a case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseAccess {
    /// `value` when the discriminant equals `tag`, the default otherwise.
    Guarded { tag: u32, value: AccessExpr },
    /// Whether the discriminant equals `tag`.
    IsCase { tag: u32 },
}

impl CaseAccess {
    pub fn tag(&self) -> u32 {
        match self {
            CaseAccess::Guarded { tag, .. } | CaseAccess::IsCase { tag } => *tag,
        }
    }
}

/// Value written to one constructor argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitExpr<'u> {
    /// The factory argument at this path.
    Arg(ArgPath<'u>),
    /// The field type's default; the case doesn't use the field.
    Default,
    /// An overlap region holding one promoted leaf.
    Overlap { field: FieldId, arg: ArgPath<'u> },
    /// An overlap region holding a case's private sub-region.
    Region {
        region: FieldId,
        fields: Vec<(FieldId, ArgPath<'u>)>,
    },
}

/// One constructor argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInit<'u> {
    pub field: FieldId,
    pub value: InitExpr<'u>,
}

/// A call to the union's storage constructor.
///
/// `inits` covers every constructor argument: the overlap region first,
/// then the non-overlapped fields in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Construction<'u> {
    pub tag: u32,
    pub inits: Vec<FieldInit<'u>>,
}

/// How a multi-valued case groups its values into one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CombinedValue {
    /// Plain tuple of the values.
    Tuple,
    /// Named grouping type, needed when some value cannot be a generic
    /// argument.
    Grouping { ty: String },
}

/// Construction and access of one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseMapping<'u> {
    pub construction: Construction<'u>,
    pub access: CaseAccess,
    /// Set for cases with more than one value.
    pub combined: Option<CombinedValue>,
}

/// Grouping used by a case with several values.
pub fn combined_value(case: &CaseDescriptor) -> Option<CombinedValue> {
    if case.values.len() < 2 {
        return None;
    }
    if case
        .values
        .iter()
        .all(|value| value.ty.shape.can_be_generic_argument())
    {
        Some(CombinedValue::Tuple)
    } else {
        Some(CombinedValue::Grouping {
            ty: format!("{}Tuple", case.name),
        })
    }
}

/// Derive the mapping of every case.
pub fn map_cases<'u>(
    union: &'u UnionDescriptor,
    layout: &UnionLayout<'u>,
    tags: &[u32],
) -> Result<Vec<CaseMapping<'u>>, LayoutError> {
    let mapper = ExprMapper { layout };
    union
        .cases
        .iter()
        .zip(tags)
        .enumerate()
        .map(|(index, (case, &tag))| mapper.map_case(index, case, tag))
        .collect()
}

struct ExprMapper<'a, 'u> {
    layout: &'a UnionLayout<'u>,
}

impl<'u> ExprMapper<'_, 'u> {
    fn map_case(
        &self,
        index: usize,
        case: &'u CaseDescriptor,
        tag: u32,
    ) -> Result<CaseMapping<'u>, LayoutError> {
        let combined = combined_value(case);
        Ok(CaseMapping {
            construction: self.construction(index, case, tag)?,
            access: self.access(index, case, tag, combined.as_ref())?,
            combined,
        })
    }

    fn construction(
        &self,
        index: usize,
        case: &CaseDescriptor,
        tag: u32,
    ) -> Result<Construction<'u>, LayoutError> {
        let layout = self.layout;
        let case_layout = &layout.cases[index];
        let leaves = layout.values.leaves(&case_layout.values);
        let writer_of = |field: FieldId| {
            leaves
                .iter()
                .map(|&id| &layout.values[id])
                .find(|node| node.field == Some(field))
        };

        let mut inits = Vec::with_capacity(layout.field_count());

        if let Some(overlap) = layout.overlap {
            let value = match (case_layout.overlap_field, case_layout.region()) {
                (None, _) => InitExpr::Default,
                (Some(_), Some(region)) => {
                    let mut fields = Vec::with_capacity(case_layout.region_fields.len());
                    for &field in &case_layout.region_fields {
                        let node = writer_of(field).ok_or_else(|| LayoutError::MissingField {
                            case: case.name.clone(),
                            path: layout.field(field).name.clone(),
                        })?;
                        fields.push((field, node.arg_path.clone()));
                    }
                    InitExpr::Region { region, fields }
                }
                (Some(field), None) => {
                    let node = writer_of(field).ok_or_else(|| LayoutError::MissingField {
                        case: case.name.clone(),
                        path: layout.field(field).name.clone(),
                    })?;
                    InitExpr::Overlap {
                        field,
                        arg: node.arg_path.clone(),
                    }
                }
            };
            inits.push(FieldInit {
                field: overlap,
                value,
            });
        }

        for &field in &layout.union_fields {
            let value = match writer_of(field) {
                Some(node) => InitExpr::Arg(node.arg_path.clone()),
                None => InitExpr::Default,
            };
            inits.push(FieldInit { field, value });
        }

        Ok(Construction { tag, inits })
    }

    fn access(
        &self,
        index: usize,
        case: &CaseDescriptor,
        tag: u32,
        combined: Option<&CombinedValue>,
    ) -> Result<CaseAccess, LayoutError> {
        let roots = &self.layout.cases[index].values;

        let value = match (roots.as_slice(), combined) {
            ([], _) => {
                let singleton = case
                    .singleton_type()
                    .and_then(|ty| ty.singleton_accessor.as_ref().map(|accessor| (ty, accessor)));
                return Ok(match singleton {
                    Some((ty, accessor)) => CaseAccess::Guarded {
                        tag,
                        value: AccessExpr::Singleton {
                            ty: ty.name.clone(),
                            accessor: accessor.clone(),
                        },
                    },
                    None => CaseAccess::IsCase { tag },
                });
            }
            ([root], _) => self.value_access(&case.name, *root)?,
            (_, Some(CombinedValue::Grouping { ty })) => AccessExpr::Grouping {
                ty: ty.clone(),
                members: self.values_access(&case.name, roots)?,
            },
            (_, Some(CombinedValue::Tuple) | None) => {
                AccessExpr::Tuple(self.values_access(&case.name, roots)?)
            }
        };

        Ok(CaseAccess::Guarded { tag, value })
    }

    fn values_access(&self, case: &str, ids: &[ValueId]) -> Result<Vec<AccessExpr>, LayoutError> {
        ids.iter().map(|&id| self.value_access(case, id)).collect()
    }

    fn value_access(&self, case: &str, id: ValueId) -> Result<AccessExpr, LayoutError> {
        let node = &self.layout.values[id];
        let ty = node.ty();

        if node.kind == DataKind::Decomposable {
            let members = self.values_access(case, &node.members)?;
            return if ty.shape.is_record() {
                Ok(AccessExpr::Record {
                    ty: ty.name.clone(),
                    members,
                })
            } else if ty.shape.is_tuple() {
                Ok(AccessExpr::Tuple(members))
            } else {
                Err(LayoutError::InvalidShape {
                    case: case.to_owned(),
                    path: node.arg_path.join("."),
                    shape: ty.shape,
                    reason: "it is neither a record nor a tuple",
                })
            };
        }

        let field = node.field.ok_or_else(|| LayoutError::MissingField {
            case: case.to_owned(),
            path: node.arg_path.join("."),
        })?;
        let read = AccessExpr::Field(self.layout.path_to(field, case)?);

        if self.layout.field(field).type_name == ty.name {
            Ok(read)
        } else {
            Ok(AccessExpr::Narrow {
                ty: ty.name.clone(),
                inner: Box::new(read),
            })
        }
    }
}
