#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use tagpack_ir::{CaseDescriptor, CaseValue, TypeShape, UnionDescriptor, ValueType};

use super::*;
use crate::test_helpers::{double, int, point, shape_union, string, union_fields, with_options};

fn names(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(name, ty)| ((*name).to_owned(), (*ty).to_owned()))
        .collect()
}

// ── Without overlap ─────────────────────────────────────────────

#[test]
fn shape_without_overlap_shares_same_type_fields() {
    let union = shape_union();
    let layout = allocate(&union, false).unwrap();

    assert!(layout.overlap.is_none());
    assert_eq!(
        union_fields(&layout),
        names(&[
            ("_data_shared1", "double"),
            ("_data_rectangle_height", "double"),
        ])
    );
    assert_eq!(layout.field_count(), 2);

    // Circle.radius and Rectangle.width both live in the first slot.
    let circle = &layout.cases[0];
    let rectangle = &layout.cases[1];
    let radius = layout.values[circle.values[0]].field;
    let width = layout.values[rectangle.values[0]].field;
    assert_eq!(radius, width);
    assert!(layout.cases[2].values.is_empty());
}

#[test]
fn unique_values_never_share() {
    let union = with_options(shape_union(), |o| o.with_share_same_type_fields(false));
    let layout = allocate(&union, false).unwrap();

    assert_eq!(
        union_fields(&layout),
        names(&[
            ("_data_circle_radius", "double"),
            ("_data_rectangle_width", "double"),
            ("_data_rectangle_height", "double"),
        ])
    );
}

#[test]
fn reference_fields_widen_to_object() {
    let list = ValueType::new("List<int>", TypeShape::Reference);
    let union = UnionDescriptor::tag_union("Payload")
        .with_case(CaseDescriptor::new("Text").with_value(string("text")))
        .with_case(CaseDescriptor::new("Items").with_value(CaseValue::new("items", list)));
    let layout = allocate(&union, false).unwrap();

    assert_eq!(union_fields(&layout), names(&[("_data_shared1", "object")]));
    let items = &layout.values[layout.cases[1].values[0]];
    assert_eq!(items.kind, DataKind::ReferenceSharable);
    assert_eq!(items.ty().name, "List<int>");
}

// ── With overlap ────────────────────────────────────────────────

#[test]
fn shape_with_overlap_uses_regions() {
    let union = shape_union();
    let layout = allocate(&union, true).unwrap();

    let overlap = layout.overlap.unwrap();
    assert_eq!(layout.field(overlap).name, OVERLAP_FIELD_NAME);
    assert_eq!(layout.field(overlap).type_name, OVERLAP_TYPE_NAME);
    assert_eq!(layout.field(overlap).ctor_arg.as_deref(), Some(OVERLAP_ARG_NAME));
    assert!(layout.union_fields.is_empty());
    assert_eq!(layout.field_count(), 1);

    // A lone overlappable leaf is promoted, named after its case.
    let circle = &layout.cases[0];
    let radius = circle.overlap_field.unwrap();
    assert_eq!(layout.field(radius).name, "Circle_radius");
    assert_eq!(layout.field(radius).home, FieldHome::Overlap);
    assert_eq!(circle.region(), None);

    // Two leaves get a private sub-region; names drop the case prefix.
    let rectangle = &layout.cases[1];
    let region = rectangle.region().unwrap();
    assert_eq!(layout.field(region).name, "Rectangle");
    assert_eq!(layout.field(region).type_name, "RectangleData");
    let inner: Vec<&str> = rectangle
        .region_fields
        .iter()
        .map(|&id| layout.field(id).name.as_str())
        .collect();
    assert_eq!(inner, vec!["width", "height"]);

    let height = rectangle.region_fields[1];
    let path = layout.path_to(height, "Rectangle").unwrap();
    assert_eq!(layout.path_names(&path), "_overlapped.Rectangle.height");

    assert_eq!(layout.cases[2].overlap_field, None);
}

#[test]
fn single_overlapping_case_gets_no_region() {
    let union = UnionDescriptor::tag_union("Maybe")
        .with_case(CaseDescriptor::new("Some").with_value(int("value")))
        .with_case(CaseDescriptor::new("None"));
    let layout = allocate(&union, true).unwrap();

    assert!(layout.overlap.is_none());
    assert_eq!(union_fields(&layout), names(&[("_data_some_value", "int")]));
    assert_eq!(layout.values[layout.cases[0].values[0]].kind, DataKind::SameTypeSharable);
}

#[test]
fn overlap_safe_tuple_decomposes_without_region() {
    let pair = CaseValue::composite(
        "pair",
        ValueType::new("(int, int)", TypeShape::OverlapSafeTuple),
        vec![int("Item1"), int("Item2")],
    );
    let union = UnionDescriptor::tag_union("U")
        .with_case(CaseDescriptor::new("A").with_value(pair))
        .with_case(CaseDescriptor::new("B").with_value(string("s")));
    let layout = allocate(&union, true).unwrap();

    assert!(layout.overlap.is_none());
    let root = &layout.values[layout.cases[0].values[0]];
    assert_eq!(root.kind, DataKind::Decomposable);
    assert_eq!(root.field, None);
    assert_eq!(
        union_fields(&layout),
        names(&[
            ("_data_a_Item1", "int"),
            ("_data_a_Item2", "int"),
            ("_data_b_s", "string"),
        ])
    );
}

// ── Decomposition ───────────────────────────────────────────────

#[test]
fn decomposition_is_transparent() {
    let decomposed = with_options(
        UnionDescriptor::tag_union("U").with_case(CaseDescriptor::new("Move").with_value(point("p"))),
        |o| o.with_share_same_type_fields(false),
    );
    let direct = with_options(
        UnionDescriptor::tag_union("U").with_case(
            CaseDescriptor::new("Move")
                .with_value(int("x"))
                .with_value(int("y")),
        ),
        |o| o.with_share_same_type_fields(false),
    );

    let a = allocate(&decomposed, false).unwrap();
    let b = allocate(&direct, false).unwrap();

    assert_eq!(union_fields(&a), union_fields(&b));
    assert_eq!(
        union_fields(&a),
        names(&[("_data_move_x", "int"), ("_data_move_y", "int")])
    );
}

#[test]
fn sibling_composites_keep_their_prefix() {
    let union = UnionDescriptor::tag_union("Shape").with_case(
        CaseDescriptor::new("Line")
            .with_value(point("from"))
            .with_value(point("to")),
    );
    let layout = allocate(&union, false).unwrap();

    assert_eq!(
        union_fields(&layout),
        names(&[
            ("_data_line_from_x", "int"),
            ("_data_line_from_y", "int"),
            ("_data_line_to_x", "int"),
            ("_data_line_to_y", "int"),
        ])
    );

    let to = &layout.values[layout.cases[0].values[1]];
    let to_y = &layout.values[to.members[1]];
    assert_eq!(to_y.arg_path.as_slice(), &["to", "y"]);
}

#[test]
fn decomposable_without_members_is_invalid() {
    let broken = CaseValue::new("p", ValueType::new("Point", TypeShape::DecomposableLocalRecord));
    let union =
        UnionDescriptor::tag_union("U").with_case(CaseDescriptor::new("A").with_value(broken));

    let err = allocate(&union, false).unwrap_err();
    assert!(matches!(
        err,
        LayoutError::InvalidShape { ref case, ref path, .. } if case == "A" && path == "p"
    ));
}

#[test]
fn counts_see_through_decomposition() {
    let union = UnionDescriptor::tag_union("U")
        .with_case(CaseDescriptor::new("A").with_value(CaseValue::composite(
            "wrapped",
            ValueType::new("Wrapped", TypeShape::DecomposableLocalRecord),
            vec![double("a"), double("b")],
        )))
        .with_case(CaseDescriptor::new("B").with_value(double("c")));
    let layout = allocate(&union, true).unwrap();

    assert!(layout.overlap.is_some());
    let a = &layout.cases[0];
    assert!(a.region().is_some());
    let inner: Vec<&str> = a
        .region_fields
        .iter()
        .map(|&id| layout.field(id).name.as_str())
        .collect();
    assert_eq!(inner, vec!["a", "b"]);
}
