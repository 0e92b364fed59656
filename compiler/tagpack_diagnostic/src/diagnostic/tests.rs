use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("tag value 2 is used more than once")
        .with_union("Shape")
        .with_case("Square")
        .with_note("first used by case `Circle`");

    assert_eq!(diag.code, ErrorCode::E1002);
    assert!(diag.is_error());
    assert_eq!(diag.union.as_deref(), Some("Shape"));
    assert_eq!(diag.case.as_deref(), Some("Square"));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::W1001).with_message("no cases");
    assert!(!diag.is_error());
    assert_eq!(diag.severity, Severity::Warning);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_message("value `x` has no field")
        .with_union("Point")
        .with_note("path: value.x");

    assert_eq!(
        diag.to_string(),
        "error [E2002]: value `x` has no field\n  --> Point\n  = note: path: value.x"
    );
}

#[test]
fn test_display_with_case() {
    let diag = Diagnostic::error(ErrorCode::E1001)
        .with_message("duplicate case")
        .with_union("U")
        .with_case("A");
    assert!(diag.to_string().contains("--> U.A"));
}
