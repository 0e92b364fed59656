use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use super::*;

#[test]
fn combine_skips_empty_segments() {
    assert_eq!(combine(["Point", "", "x"]), "Point_x");
    assert_eq!(combine(["", "value"]), "value");
    assert_eq!(combine(["", ""]), "");
}

#[test]
fn lower_first_only_touches_first_char() {
    assert_eq!(lower_first("Circle_Radius"), "circle_Radius");
    assert_eq!(lower_first("x"), "x");
    assert_eq!(lower_first(""), "");
}

#[test]
fn new_field_uses_lowered_arg_name() {
    let mut table = FieldTable::new();
    let mut union_fields = Vec::new();
    let mut claims = FxHashSet::default();

    let id = table.find_or_allocate(
        &mut union_fields,
        &mut claims,
        FieldKind::Unique,
        "Some_value",
        "int",
    );

    let field = &table[id];
    assert_eq!(field.name, "_data_some_value");
    assert_eq!(field.ctor_arg.as_deref(), Some("some_value"));
    assert_eq!(field.home, FieldHome::Union);
    assert_eq!(union_fields, vec![id]);
    assert!(claims.contains(&id));
}

#[test]
fn same_type_claim_renames_to_slot() {
    let mut table = FieldTable::new();
    let mut union_fields = Vec::new();

    let mut first_case = FxHashSet::default();
    let a = table.find_or_allocate(
        &mut union_fields,
        &mut first_case,
        FieldKind::SameTypeSharable,
        "A_value",
        "Handle",
    );

    let mut second_case = FxHashSet::default();
    let b = table.find_or_allocate(
        &mut union_fields,
        &mut second_case,
        FieldKind::SameTypeSharable,
        "B_value",
        "Handle",
    );

    assert_eq!(a, b);
    assert_eq!(table[a].name, "_data_shared1");
    assert_eq!(table[a].ctor_arg.as_deref(), Some("shared1"));
    assert_eq!(table.len(), 1);
}

#[test]
fn same_case_never_claims_twice() {
    let mut table = FieldTable::new();
    let mut union_fields = Vec::new();
    let mut claims = FxHashSet::default();

    let a = table.find_or_allocate(
        &mut union_fields,
        &mut claims,
        FieldKind::SameTypeSharable,
        "P_a",
        "Handle",
    );
    let b = table.find_or_allocate(
        &mut union_fields,
        &mut claims,
        FieldKind::SameTypeSharable,
        "P_b",
        "Handle",
    );

    assert_ne!(a, b);
    assert_eq!(table[a].name, "_data_p_a");
    assert_eq!(table[b].name, "_data_p_b");
}

#[test]
fn reference_claim_widens_type() {
    let mut table = FieldTable::new();
    let mut union_fields = Vec::new();

    let a = table.find_or_allocate(
        &mut union_fields,
        &mut FxHashSet::default(),
        FieldKind::ReferenceSharable,
        "Text_value",
        "string",
    );
    let b = table.find_or_allocate(
        &mut union_fields,
        &mut FxHashSet::default(),
        FieldKind::ReferenceSharable,
        "List_value",
        "List<int>",
    );

    assert_eq!(a, b);
    assert_eq!(table[a].type_name, WIDENED_REFERENCE_TYPE);
    assert_eq!(table[a].name, "_data_shared1");
}

#[test]
fn unique_fields_are_never_shared() {
    let mut table = FieldTable::new();
    let mut union_fields = Vec::new();

    let a = table.find_or_allocate(
        &mut union_fields,
        &mut FxHashSet::default(),
        FieldKind::Unique,
        "A_value",
        "int",
    );
    let b = table.find_or_allocate(
        &mut union_fields,
        &mut FxHashSet::default(),
        FieldKind::SameTypeSharable,
        "B_value",
        "int",
    );

    assert_ne!(a, b);
    assert_eq!(table[a].name, "_data_a_value");
}
