//! Derived members: equality, stringification, match helpers and the
//! type-union conveniences.
//!
//! Everything here is decided from tags, access mappings and the
//! descriptor alone. Storage is never consulted.

use tagpack_ir::{CaseDescriptor, UnionDescriptor, UnionKind};

use crate::expr::{CaseAccess, CaseMapping};
use crate::present::has_implicit_conversion;

/// How two values of one case compare.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaseEquality {
    /// Equal tags are enough.
    TagOnly,
    /// Compare the access values.
    Value,
    /// Compare the access values, either of which may be null.
    NullSafeValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EqualityPlan {
    /// Every case is zero-valued; compare and hash the tags.
    TagOnly,
    /// One entry per case, in declaration order.
    PerCase(Vec<CaseEquality>),
}

/// Text form of one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToStringForm {
    /// `Name`
    Name,
    /// `Name(value)`
    NameWithValue,
    /// `Name(a: .., b: ..)`
    NameWithFields(Vec<String>),
    /// The value's own text.
    Value,
    /// The value's own text, or empty when null.
    NullSafeValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToStringPlan {
    /// Every case is zero-valued; print the tag.
    TagName,
    PerCase(Vec<ToStringForm>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchPlan {
    /// `public` unless some case is less visible.
    pub accessibility: &'static str,
    /// A case holds tag 0, so `default` maps to a real case.
    pub has_default: bool,
    /// Per case: its value type can't be a generic argument, so match
    /// delegates need dedicated types.
    pub custom_delegates: Vec<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeUnionPlan {
    /// Generic `TryCreate`/`TryGet` are available.
    pub generic_helpers: bool,
    /// The union participates in the shared type-union toolkit.
    pub toolkit: bool,
    /// Indices of cases offering an implicit conversion.
    pub implicit_conversions: Vec<usize>,
}

/// Which derived members exist and how each case takes part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivePlan {
    pub equality: Option<EqualityPlan>,
    pub to_string: Option<ToStringPlan>,
    pub matching: Option<MatchPlan>,
    pub type_union: Option<TypeUnionPlan>,
}

pub fn derive_plan(
    union: &UnionDescriptor,
    tags: &[u32],
    mappings: &[CaseMapping<'_>],
) -> DerivePlan {
    let options = union.options.effective_for(union.ref_like);
    let tags_only = union.cases.iter().all(|case| case.values.is_empty());

    let equality = options.generate_equality().then(|| {
        if tags_only {
            EqualityPlan::TagOnly
        } else {
            EqualityPlan::PerCase(
                union
                    .cases
                    .iter()
                    .zip(mappings)
                    .map(|(case, mapping)| case_equality(case, &mapping.access))
                    .collect(),
            )
        }
    });

    let to_string = options.generate_to_string().then(|| {
        if tags_only {
            ToStringPlan::TagName
        } else {
            ToStringPlan::PerCase(
                union
                    .cases
                    .iter()
                    .map(|case| to_string_form(union.kind, case))
                    .collect(),
            )
        }
    });

    let matching = options.generate_match().then(|| MatchPlan {
        accessibility: if union.cases.iter().all(|case| case.accessibility() == "public") {
            "public"
        } else {
            "internal"
        },
        has_default: tags.contains(&0),
        custom_delegates: union.cases.iter().map(needs_custom_delegates).collect(),
    });

    let type_union = (union.kind == UnionKind::TypeUnion).then(|| {
        let generic_helpers = union.cases.iter().all(|case| {
            case.ty
                .as_ref()
                .is_some_and(|ty| ty.shape.can_be_generic_argument())
        });
        TypeUnionPlan {
            generic_helpers,
            toolkit: generic_helpers && options.use_toolkit(),
            implicit_conversions: union
                .cases
                .iter()
                .enumerate()
                .filter(|(_, case)| has_implicit_conversion(union, case))
                .map(|(index, _)| index)
                .collect(),
        }
    });

    DerivePlan {
        equality,
        to_string,
        matching,
        type_union,
    }
}

fn case_equality(case: &CaseDescriptor, access: &CaseAccess) -> CaseEquality {
    match (access, case.values.as_slice()) {
        (CaseAccess::IsCase { .. }, _) | (CaseAccess::Guarded { .. }, []) => CaseEquality::TagOnly,
        (CaseAccess::Guarded { .. }, [value]) if value.ty.shape.is_possible_reference() => {
            CaseEquality::NullSafeValue
        }
        (CaseAccess::Guarded { .. }, _) => CaseEquality::Value,
    }
}

fn to_string_form(kind: UnionKind, case: &CaseDescriptor) -> ToStringForm {
    match kind {
        UnionKind::TagUnion => match case.values.as_slice() {
            [] => ToStringForm::Name,
            [_] => ToStringForm::NameWithValue,
            values => {
                ToStringForm::NameWithFields(values.iter().map(|value| value.name.clone()).collect())
            }
        },
        UnionKind::TypeUnion => {
            if case
                .ty
                .as_ref()
                .is_some_and(|ty| ty.shape.is_possible_reference())
            {
                ToStringForm::NullSafeValue
            } else {
                ToStringForm::Value
            }
        }
    }
}

fn needs_custom_delegates(case: &CaseDescriptor) -> bool {
    match &case.ty {
        Some(ty) => !ty.shape.can_be_generic_argument(),
        None => case
            .values
            .iter()
            .any(|value| !value.ty.shape.can_be_generic_argument()),
    }
}
