//! Symbolic round-trip check.
//!
//! Each case's construction is executed against a [`SimulatedStorage`]
//! with opaque argument values, then the case's access is evaluated on
//! the result. The read-back must equal the logical value, and every
//! other case's access must see only its default.
//!
//! The simulated overlap region keeps just the alternative written last,
//! so reading a different alternative yields [`Symbolic::Invalid`].

use std::fmt;

use rustc_hash::FxHashMap;

use tagpack_ir::UnionDescriptor;

use crate::expr::{AccessExpr, CaseAccess, CaseMapping, CombinedValue, Construction, InitExpr};
use crate::field::FieldId;
use crate::layout::UnionLayout;
use crate::value::{ArgPath, ValueId};
use crate::{DataKind, LayoutError};

/// A symbolic value flowing through storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Symbolic {
    /// An opaque factory argument, named by its path.
    Arg(String),
    Record { ty: String, members: Vec<Symbolic> },
    Tuple(Vec<Symbolic>),
    Grouping { ty: String, members: Vec<Symbolic> },
    Singleton { ty: String, accessor: String },
    Bool(bool),
    Default,
    /// Read of storage that holds something else.
    Invalid,
}

impl Symbolic {
    fn arg(path: &ArgPath<'_>) -> Self {
        Symbolic::Arg(path.join("."))
    }

    /// What a guarded read of an inactive case yields.
    pub fn is_inactive(&self) -> bool {
        matches!(self, Symbolic::Default | Symbolic::Bool(false))
    }
}

impl fmt::Display for Symbolic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, items: &[Symbolic]) -> fmt::Result {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{item}")?;
            }
            f.write_str(")")
        }

        match self {
            Symbolic::Arg(path) => f.write_str(path),
            Symbolic::Record { ty, members } | Symbolic::Grouping { ty, members } => {
                f.write_str(ty)?;
                list(f, members)
            }
            Symbolic::Tuple(items) => list(f, items),
            Symbolic::Singleton { ty, accessor } => write!(f, "{ty}.{accessor}"),
            Symbolic::Bool(value) => write!(f, "{value}"),
            Symbolic::Default => f.write_str("default"),
            Symbolic::Invalid => f.write_str("<invalid>"),
        }
    }
}

/// The alternative currently held by the overlap region.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Alternative {
    Leaf(FieldId, Symbolic),
    Region(FieldId, FxHashMap<FieldId, Symbolic>),
}

/// Union storage after one constructor call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedStorage {
    tag: u32,
    overlap_field: Option<FieldId>,
    slots: FxHashMap<FieldId, Symbolic>,
    overlap: Option<Alternative>,
}

impl SimulatedStorage {
    /// Execute a construction.
    pub fn construct(layout: &UnionLayout<'_>, construction: &Construction<'_>) -> Self {
        let mut storage = SimulatedStorage {
            tag: construction.tag,
            overlap_field: layout.overlap,
            slots: FxHashMap::default(),
            overlap: None,
        };

        for init in &construction.inits {
            let is_overlap = layout.overlap == Some(init.field);
            match &init.value {
                InitExpr::Arg(path) => {
                    storage.slots.insert(init.field, Symbolic::arg(path));
                }
                InitExpr::Default if is_overlap => storage.overlap = None,
                InitExpr::Default => {
                    storage.slots.insert(init.field, Symbolic::Default);
                }
                InitExpr::Overlap { field, arg } => {
                    storage.overlap = Some(Alternative::Leaf(*field, Symbolic::arg(arg)));
                }
                InitExpr::Region { region, fields } => {
                    let values = fields
                        .iter()
                        .map(|(field, arg)| (*field, Symbolic::arg(arg)))
                        .collect();
                    storage.overlap = Some(Alternative::Region(*region, values));
                }
            }
        }

        storage
    }

    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Evaluate a case's access against this storage.
    pub fn read(&self, access: &CaseAccess) -> Symbolic {
        match access {
            CaseAccess::Guarded { tag, value } if *tag == self.tag => self.eval(value),
            CaseAccess::Guarded { .. } => Symbolic::Default,
            CaseAccess::IsCase { tag } => Symbolic::Bool(*tag == self.tag),
        }
    }

    fn eval(&self, expr: &AccessExpr) -> Symbolic {
        match expr {
            AccessExpr::Field(path) => self.read_path(path),
            AccessExpr::Narrow { inner, .. } => self.eval(inner),
            AccessExpr::Record { ty, members } => Symbolic::Record {
                ty: ty.clone(),
                members: members.iter().map(|m| self.eval(m)).collect(),
            },
            AccessExpr::Tuple(items) => Symbolic::Tuple(items.iter().map(|m| self.eval(m)).collect()),
            AccessExpr::Grouping { ty, members } => Symbolic::Grouping {
                ty: ty.clone(),
                members: members.iter().map(|m| self.eval(m)).collect(),
            },
            AccessExpr::Singleton { ty, accessor } => Symbolic::Singleton {
                ty: ty.clone(),
                accessor: accessor.clone(),
            },
        }
    }

    fn read_path(&self, path: &[FieldId]) -> Symbolic {
        match path {
            [field] => self.slots.get(field).cloned().unwrap_or(Symbolic::Invalid),
            [overlap, rest @ ..] if Some(*overlap) == self.overlap_field => {
                match (rest, &self.overlap) {
                    ([field], Some(Alternative::Leaf(written, value))) if field == written => {
                        value.clone()
                    }
                    ([region, field], Some(Alternative::Region(written, values)))
                        if region == written =>
                    {
                        values.get(field).cloned().unwrap_or(Symbolic::Invalid)
                    }
                    _ => Symbolic::Invalid,
                }
            }
            _ => Symbolic::Invalid,
        }
    }
}

/// The logical value a case's access must reproduce.
pub fn expected_value(
    union: &UnionDescriptor,
    layout: &UnionLayout<'_>,
    index: usize,
    combined: Option<&CombinedValue>,
) -> Symbolic {
    let roots = &layout.cases[index].values;
    let case = &union.cases[index];

    match (roots.as_slice(), combined) {
        ([], _) => match case
            .singleton_type()
            .and_then(|ty| ty.singleton_accessor.as_ref().map(|accessor| (ty, accessor)))
        {
            Some((ty, accessor)) => Symbolic::Singleton {
                ty: ty.name.clone(),
                accessor: accessor.clone(),
            },
            None => Symbolic::Bool(true),
        },
        ([root], _) => expected_node(layout, *root),
        (_, Some(CombinedValue::Grouping { ty })) => Symbolic::Grouping {
            ty: ty.clone(),
            members: roots.iter().map(|&id| expected_node(layout, id)).collect(),
        },
        (_, Some(CombinedValue::Tuple) | None) => {
            Symbolic::Tuple(roots.iter().map(|&id| expected_node(layout, id)).collect())
        }
    }
}

fn expected_node(layout: &UnionLayout<'_>, id: ValueId) -> Symbolic {
    let node = &layout.values[id];
    if node.kind != DataKind::Decomposable {
        return Symbolic::arg(&node.arg_path);
    }

    let members = node
        .members
        .iter()
        .map(|&member| expected_node(layout, member))
        .collect();
    if node.ty().shape.is_tuple() {
        Symbolic::Tuple(members)
    } else {
        Symbolic::Record {
            ty: node.ty().name.clone(),
            members,
        }
    }
}

/// Check that every case reads back what it was constructed with, and
/// that no other case's access sees it.
pub fn verify_round_trip(
    union: &UnionDescriptor,
    layout: &UnionLayout<'_>,
    mappings: &[CaseMapping<'_>],
) -> Result<(), LayoutError> {
    for (index, (case, mapping)) in union.cases.iter().zip(mappings).enumerate() {
        let storage = SimulatedStorage::construct(layout, &mapping.construction);

        let expected = expected_value(union, layout, index, mapping.combined.as_ref());
        let actual = storage.read(&mapping.access);
        if actual != expected {
            return Err(LayoutError::RoundTrip {
                case: case.name.clone(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }

        for (other_index, (other, other_mapping)) in union.cases.iter().zip(mappings).enumerate() {
            if other_index == index {
                continue;
            }
            let active = other_mapping.access.tag() == storage.tag();
            let leaked = storage.read(&other_mapping.access);
            if active || !leaked.is_inactive() {
                return Err(LayoutError::RoundTrip {
                    case: case.name.clone(),
                    expected: format!("`{}` inactive", other.name),
                    actual: format!("`{}` reads {leaked}", other.name),
                });
            }
        }
    }
    Ok(())
}
