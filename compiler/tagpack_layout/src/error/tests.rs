use pretty_assertions::assert_eq;

use tagpack_diagnostic::{Diagnostic, ErrorCode};
use tagpack_ir::TypeShape;

use super::*;

#[test]
fn invalid_shape_message() {
    let err = LayoutError::InvalidShape {
        case: "Move".to_owned(),
        path: "p".to_owned(),
        shape: TypeShape::DecomposableLocalRecord,
        reason: "it decomposes but declares no members",
    };
    assert_eq!(
        err.to_string(),
        "value `p` of case `Move` has shape `decomposable_local_record` and cannot be laid out: \
         it decomposes but declares no members"
    );
    assert_eq!(err.code(), ErrorCode::E2001);
}

#[test]
fn layout_errors_become_one_diagnostic() {
    let err = LayoutError::MissingField {
        case: "A".to_owned(),
        path: "value".to_owned(),
    };
    let diags = err.to_diagnostics("U");

    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E2002);
    assert_eq!(diags[0].union.as_deref(), Some("U"));
    assert_eq!(diags[0].case.as_deref(), Some("A"));
    assert_eq!(diags[0].message, err.to_string());
}

#[test]
fn invalid_descriptor_passes_diagnostics_through() {
    let carried = vec![
        Diagnostic::error(ErrorCode::E1002).with_message("tag value 1 is used more than once"),
        Diagnostic::error(ErrorCode::E1001).with_message("case name `A` is declared more than once"),
    ];
    let err = LayoutError::InvalidDescriptor {
        union: "U".to_owned(),
        diagnostics: carried.clone(),
    };

    assert_eq!(err.to_string(), "union `U` has 2 invalid declaration(s)");
    assert_eq!(err.to_diagnostics("U"), carried);
}

#[test]
fn invalid_descriptor_reports_first_carried_code() {
    let err = LayoutError::InvalidDescriptor {
        union: "U".to_owned(),
        diagnostics: vec![
            Diagnostic::error(ErrorCode::E1002).with_message("tag value 3 is used more than once")
        ],
    };
    assert_eq!(err.code(), ErrorCode::E1002);

    let empty = LayoutError::InvalidDescriptor {
        union: "U".to_owned(),
        diagnostics: Vec::new(),
    };
    assert_eq!(empty.code(), ErrorCode::E1001);
}

#[test]
fn exhausted_tags_name_the_case() {
    let err = LayoutError::TagsExhausted {
        case: "Last".to_owned(),
    };
    let diags = err.to_diagnostics("U");

    assert_eq!(err.code(), ErrorCode::E1003);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, ErrorCode::E1003);
    assert_eq!(diags[0].case.as_deref(), Some("Last"));
    assert_eq!(diags[0].message, "no tag value is left for case `Last`");
}
