use pretty_assertions::assert_eq;

use tagpack_ir::{AccessorKind, CaseDescriptor, FactoryKind, TypeShape, UnionDescriptor, UnionKind, ValueType};

use super::*;
use crate::expr::combined_value;
use crate::test_helpers::{double, shape_union, value_union, with_options};

#[test]
fn tag_union_factories_are_named_after_cases() {
    let union = shape_union();
    for case in &union.cases {
        assert_eq!(factory_name(UnionKind::TagUnion, case), case.name);
    }
}

#[test]
fn type_union_factories_default_to_create() {
    let union = value_union();
    assert_eq!(factory_name(union.kind, &union.cases[0]), DEFAULT_FACTORY_NAME);

    let unit = ValueType::singleton("Unit", TypeShape::OverlapSafeLocalStruct, "Default");
    let property = CaseDescriptor::new("None")
        .with_type(unit)
        .with_factory(FactoryKind::Property, None);
    assert_eq!(factory_name(UnionKind::TypeUnion, &property), "None");
}

#[test]
fn explicit_names_win() {
    let case = CaseDescriptor::new("Circle")
        .with_value(double("radius"))
        .with_factory(FactoryKind::Method, Some("MakeCircle".to_owned()))
        .with_accessor(AccessorKind::Method, Some("GetCircle".to_owned()));

    assert_eq!(factory_name(UnionKind::TagUnion, &case), "MakeCircle");
    assert_eq!(accessor_name(&case), "GetCircle");
}

#[test]
fn accessor_defaults_follow_value_count() {
    let union = shape_union();
    let names: Vec<String> = union.cases.iter().map(accessor_name).collect();
    assert_eq!(names, vec!["CircleValue", "RectangleValues", "IsEmpty"]);

    let unit = ValueType::singleton("Unit", TypeShape::OverlapSafeLocalStruct, "Default");
    assert_eq!(accessor_name(&CaseDescriptor::new("Done").with_type(unit)), "DoneValue");
}

#[test]
fn suppressed_members_have_no_names() {
    let union = UnionDescriptor::tag_union("U");
    let case = CaseDescriptor::new("A")
        .with_factory(FactoryKind::None, None)
        .with_accessor(AccessorKind::None, None);
    let names = case_names(&union, &case, None);

    assert_eq!(names.factory, None);
    assert_eq!(names.accessor, None);
    assert_eq!(names.tag_member, "A");
}

#[test]
fn value_types() {
    let union = shape_union();
    let rectangle = &union.cases[1];
    let combined = combined_value(rectangle);

    assert_eq!(
        case_value_type(&union.cases[0], None),
        Some(CaseValueType::Single("double".to_owned()))
    );
    assert_eq!(
        case_value_type(rectangle, combined.as_ref()),
        Some(CaseValueType::Tuple(vec![
            ("double".to_owned(), "width".to_owned()),
            ("double".to_owned(), "height".to_owned()),
        ]))
    );
    assert_eq!(case_value_type(&union.cases[2], None), None);
}

#[test]
fn discriminant_names_follow_options() {
    let union = with_options(shape_union(), |o| {
        o.with_tag_type_name("ShapeKind").with_tag_property_name("Tag")
    });
    let names = union_names(&union);

    assert_eq!(names.tag_type, "ShapeKind");
    assert_eq!(names.tag_property, "Tag");
    assert_eq!(names.tag_argument, "tag");
}

#[test]
fn implicit_conversions_skip_open_types() {
    let union = value_union()
        .with_case(CaseDescriptor::of_type("Any", ValueType::object()))
        .with_case(CaseDescriptor::of_type(
            "Shape",
            ValueType::new("IShape", TypeShape::Interface),
        ))
        .with_case(CaseDescriptor::of_type("Hidden", ValueType::long()).with_accessibility("internal"));

    let offered: Vec<&str> = union
        .cases
        .iter()
        .filter(|case| has_implicit_conversion(&union, case))
        .map(|case| case.name.as_str())
        .collect();
    assert_eq!(offered, vec!["Number", "Text", "Other"]);
}
