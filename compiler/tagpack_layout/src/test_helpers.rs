//! Shared descriptor builders for planner tests.
//!
//! Only compiled in test builds.

use tagpack_ir::{CaseDescriptor, CaseValue, TypeShape, UnionDescriptor, UnionOptions, ValueType};

use crate::layout::UnionLayout;

pub(crate) fn int(name: &str) -> CaseValue {
    CaseValue::new(name, ValueType::int())
}

pub(crate) fn double(name: &str) -> CaseValue {
    CaseValue::new(name, ValueType::double())
}

pub(crate) fn string(name: &str) -> CaseValue {
    CaseValue::new(name, ValueType::string())
}

/// A record `Point { x: int, y: int }` that can only be decomposed.
pub(crate) fn point(name: &str) -> CaseValue {
    CaseValue::composite(
        name,
        ValueType::new("Point", TypeShape::DecomposableLocalRecord),
        vec![int("x"), int("y")],
    )
}

/// `Shape = Circle(radius) | Rectangle(width, height) | Empty`.
pub(crate) fn shape_union() -> UnionDescriptor {
    UnionDescriptor::tag_union("Shape")
        .with_case(CaseDescriptor::new("Circle").with_value(double("radius")))
        .with_case(
            CaseDescriptor::new("Rectangle")
                .with_value(double("width"))
                .with_value(double("height")),
        )
        .with_case(CaseDescriptor::new("Empty"))
}

/// Type union over `int`, `string` and a generic `T`.
pub(crate) fn value_union() -> UnionDescriptor {
    UnionDescriptor::type_union("Value")
        .with_type_name("Value<T>")
        .with_case(CaseDescriptor::of_type("Number", ValueType::int()))
        .with_case(CaseDescriptor::of_type("Text", ValueType::string()))
        .with_case(CaseDescriptor::of_type(
            "Other",
            ValueType::new("T", TypeShape::TypeParamUnconstrained),
        ))
}

pub(crate) fn without_overlap(union: UnionDescriptor) -> UnionDescriptor {
    let options = union.options.with_overlap_structs(false);
    union.with_options(options)
}

pub(crate) fn with_options(
    union: UnionDescriptor,
    f: impl FnOnce(&UnionOptions) -> UnionOptions,
) -> UnionDescriptor {
    let options = f(&union.options);
    union.with_options(options)
}

/// `(name, type)` of each non-overlapped union field, in order.
pub(crate) fn union_fields(layout: &UnionLayout<'_>) -> Vec<(String, String)> {
    layout
        .union_fields
        .iter()
        .map(|&id| {
            let field = layout.field(id);
            (field.name.clone(), field.type_name.clone())
        })
        .collect()
}
