//! Property-based tests for the layout planner.
//!
//! Random unions are built from a small pool of value shapes, with random
//! explicit tags and storage options, and every plan is checked for:
//! 1. Distinct tags, explicit tags kept, assigned tags never 0
//! 2. A verified round trip for every case
//! 3. A selected layout no larger than either allocation variant

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use tagpack_ir::{CaseDescriptor, CaseValue, TypeShape, UnionDescriptor, ValueType};
use tagpack_layout::{allocate, assign_tags, plan_union, select, TagAssigner};

// -- Descriptor Generation --

const SHAPES: usize = 14;

/// Build one value from a shape index.
fn value(shape: usize, name: String) -> CaseValue {
    let int = |n: &str| CaseValue::new(n, ValueType::int());
    let double = |n: &str| CaseValue::new(n, ValueType::double());
    match shape {
        0 => CaseValue::new(name, ValueType::int()),
        1 => CaseValue::new(name, ValueType::double()),
        2 => CaseValue::new(name, ValueType::string()),
        3 => CaseValue::new(name, ValueType::new("List<int>", TypeShape::Reference)),
        4 => CaseValue::new(name, ValueType::new("T", TypeShape::TypeParamUnconstrained)),
        5 => CaseValue::new(name, ValueType::new("Vec2", TypeShape::OverlapSafeLocalStruct)),
        6 => CaseValue::composite(
            name,
            ValueType::new("Point", TypeShape::DecomposableLocalRecord),
            vec![int("x"), int("y")],
        ),
        7 => CaseValue::composite(
            name,
            ValueType::new("(int, double)", TypeShape::OverlapSafeTuple),
            vec![int("Item1"), double("Item2")],
        ),
        8 => CaseValue::composite(
            name,
            ValueType::new("Size", TypeShape::OverlapDecomposableLocalRecord),
            vec![double("width"), double("height")],
        ),
        // Cannot be a generic argument, so multi-valued cases group by name.
        9 => CaseValue::new(name, ValueType::new("Span<byte>", TypeShape::RefLike)),
        10 => CaseValue::new(name, ValueType::new("Guid", TypeShape::OverlapSafeForeignStruct)),
        11 => CaseValue::composite(
            name,
            ValueType::new("Range", TypeShape::DecomposableForeignRecord),
            vec![int("start"), int("end")],
        ),
        12 => CaseValue::composite(
            name,
            ValueType::new("Extent", TypeShape::OverlapDecomposableForeignRecord),
            vec![double("low"), double("high")],
        ),
        _ => CaseValue::composite(
            name,
            ValueType::new("(int, string)", TypeShape::NonOverlapSafeTuple),
            vec![int("Item1"), CaseValue::new("Item2", ValueType::string())],
        ),
    }
}

/// Explicit tags, drawn low or right below the top of the range.
fn tag_strategy() -> impl Strategy<Value = Option<u32>> {
    prop::option::of(prop_oneof![0u32..10, (u32::MAX - 3)..=u32::MAX])
}

fn case_strategy() -> impl Strategy<Value = (Option<u32>, Vec<usize>, bool)> {
    (
        tag_strategy(),
        prop::collection::vec(0..SHAPES, 0..4),
        any::<bool>(),
    )
}

fn union_strategy() -> impl Strategy<Value = UnionDescriptor> {
    (
        prop::collection::vec(case_strategy(), 0..6),
        any::<[bool; 6]>(),
    )
        .prop_map(|(cases, flags)| {
            let options = UnionDescriptor::tag_union("U")
                .options
                .with_share_same_type_fields(flags[0])
                .with_share_reference_fields(flags[1])
                .with_overlap_structs(flags[2])
                .with_decompose_structs(flags[3])
                .with_overlap_foreign_structs(flags[4])
                .with_decompose_foreign_structs(flags[5]);
            let mut union = UnionDescriptor::tag_union("U").with_options(options);

            let mut explicit = BTreeSet::new();
            for (index, (tag, shapes, singleton)) in cases.into_iter().enumerate() {
                let mut case = CaseDescriptor::new(format!("C{index}"));
                // Duplicate explicit tags are rejected before planning.
                if let Some(tag) = tag.filter(|&t| explicit.insert(t)) {
                    case = case.with_tag(tag);
                }
                if shapes.is_empty() && singleton {
                    case = case.with_type(ValueType::singleton(
                        "Unit",
                        TypeShape::OverlapSafeLocalStruct,
                        "Default",
                    ));
                }
                for (i, shape) in shapes.into_iter().enumerate() {
                    case = case.with_value(value(shape, format!("v{i}")));
                }
                union = union.with_case(case);
            }
            union
        })
}

/// Used tag sets, mixing small values with values at the top of the range.
fn used_tags_strategy() -> impl Strategy<Value = BTreeSet<u32>> {
    prop::collection::btree_set(
        prop_oneof![0u32..64, (u32::MAX - 8)..=u32::MAX, any::<u32>()],
        0..16,
    )
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_tags_are_distinct(union in union_strategy()) {
        let tags = assign_tags(&union.cases).unwrap();
        let distinct: BTreeSet<u32> = tags.iter().copied().collect();
        prop_assert_eq!(distinct.len(), tags.len());

        for (case, &tag) in union.cases.iter().zip(&tags) {
            match case.tag {
                Some(explicit) => prop_assert_eq!(tag, explicit),
                None => prop_assert_ne!(tag, 0),
            }
        }
    }

    #[test]
    fn prop_next_value_is_free(used in used_tags_strategy()) {
        let next = TagAssigner::new(used.iter().copied()).next_value().unwrap();
        prop_assert!(!used.contains(&next));
        prop_assert_ne!(next, 0);
    }

    #[test]
    fn prop_plans_round_trip(union in union_strategy()) {
        let plan = plan_union(&union);
        prop_assert!(plan.is_ok(), "{:?}", plan.as_ref().err());

        let plan = plan.unwrap();
        prop_assert_eq!(plan.tags(), assign_tags(&union.cases).unwrap());
        for case in &plan.cases {
            prop_assert_eq!(case.mapping.access.tag(), case.tag);
            prop_assert_eq!(case.mapping.construction.tag, case.tag);
            prop_assert_eq!(case.mapping.construction.inits.len(), plan.layout.field_count());
        }
    }

    #[test]
    fn prop_selection_is_minimal(union in union_strategy()) {
        let selected = select(&union).unwrap().field_count();
        prop_assert!(selected <= allocate(&union, false).unwrap().field_count());
        if union.options.overlap_structs() {
            prop_assert!(selected <= allocate(&union, true).unwrap().field_count());
        }
    }
}
