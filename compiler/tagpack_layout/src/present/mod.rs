//! Member names an emitter presents for a union.
//!
//! Explicit names from the descriptor always win; the defaults follow the
//! union kind and the shape of each case.

use tagpack_ir::{AccessorKind, CaseDescriptor, FactoryKind, TypeShape, UnionDescriptor, UnionKind};

use crate::expr::CombinedValue;
use crate::field::lower_first;

/// Factory name used by type unions when nothing more specific applies.
pub const DEFAULT_FACTORY_NAME: &str = "Create";

/// Discriminant names of a union.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionNames {
    /// Name of the discriminant enumeration.
    pub tag_type: String,
    /// Name of the discriminant property.
    pub tag_property: String,
    /// Constructor parameter receiving the discriminant.
    pub tag_argument: String,
}

/// Type a case exposes its value as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseValueType {
    /// A single value of this type.
    Single(String),
    /// A tuple of `(type, name)` elements.
    Tuple(Vec<(String, String)>),
    /// A named grouping type.
    Grouping(String),
    /// The singleton type of a zero-valued case.
    Singleton(String),
}

/// Presented names of one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseNames {
    /// Member of the discriminant enumeration.
    pub tag_member: String,
    /// `None` when no factory is generated.
    pub factory: Option<String>,
    /// `None` when no accessor is generated.
    pub accessor: Option<String>,
    pub value_type: Option<CaseValueType>,
}

pub fn union_names(union: &UnionDescriptor) -> UnionNames {
    let tag_property = union.options.tag_property_name().to_owned();
    UnionNames {
        tag_type: union.options.tag_type_name().to_owned(),
        tag_argument: lower_first(&tag_property),
        tag_property,
    }
}

pub fn case_names(
    union: &UnionDescriptor,
    case: &CaseDescriptor,
    combined: Option<&CombinedValue>,
) -> CaseNames {
    CaseNames {
        tag_member: case.name.clone(),
        factory: (case.factory_kind != FactoryKind::None).then(|| factory_name(union.kind, case)),
        accessor: case.accessor_kind.is_generated().then(|| accessor_name(case)),
        value_type: case_value_type(case, combined),
    }
}

/// Name of a case's factory.
pub fn factory_name(kind: UnionKind, case: &CaseDescriptor) -> String {
    if let Some(name) = &case.factory_name {
        return name.clone();
    }

    match kind {
        UnionKind::TagUnion => case.name.clone(),
        UnionKind::TypeUnion
            if case.factory_kind == FactoryKind::Property && case.singleton_type().is_some() =>
        {
            case.name.clone()
        }
        UnionKind::TypeUnion => DEFAULT_FACTORY_NAME.to_owned(),
    }
}

/// Name of a case's accessor.
pub fn accessor_name(case: &CaseDescriptor) -> String {
    if let Some(name) = &case.accessor_name {
        return name.clone();
    }

    match (case.accessor_kind, case.values.len()) {
        (AccessorKind::Property | AccessorKind::Method, 0) => {
            if case.singleton_type().is_some() {
                format!("{}Value", case.name)
            } else {
                format!("Is{}", case.name)
            }
        }
        (AccessorKind::Property | AccessorKind::Method, n) if n > 1 => {
            format!("{}Values", case.name)
        }
        _ => format!("{}Value", case.name),
    }
}

/// The type a case's accessor returns, if it returns a value.
pub fn case_value_type(
    case: &CaseDescriptor,
    combined: Option<&CombinedValue>,
) -> Option<CaseValueType> {
    match (case.values.as_slice(), combined) {
        ([], _) => case
            .singleton_type()
            .map(|ty| CaseValueType::Singleton(ty.name.clone())),
        ([value], _) => Some(CaseValueType::Single(value.ty.name.clone())),
        (_, Some(CombinedValue::Grouping { ty })) => Some(CaseValueType::Grouping(ty.clone())),
        (values, Some(CombinedValue::Tuple) | None) => Some(CaseValueType::Tuple(
            values
                .iter()
                .map(|value| (value.ty.name.clone(), value.name.clone()))
                .collect(),
        )),
    }
}

/// Whether an implicit conversion from the case's type is offered.
///
/// Only public type-union cases qualify, and never for interface or open
/// object types.
pub fn has_implicit_conversion(union: &UnionDescriptor, case: &CaseDescriptor) -> bool {
    union.kind == UnionKind::TypeUnion
        && case.accessibility() == "public"
        && case
            .ty
            .as_ref()
            .is_some_and(|ty| !matches!(ty.shape, TypeShape::Interface | TypeShape::Object))
}

#[cfg(test)]
mod tests;
