use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let classes = [
            code.is_descriptor_error(),
            code.is_layout_error(),
            code.is_warning(),
        ];
        assert_eq!(
            classes.iter().filter(|c| **c).count(),
            1,
            "{code} must belong to exactly one range"
        );
    }
}

#[test]
fn test_parse_round_trip() {
    for code in ErrorCode::ALL {
        assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(*code));
    }
    assert_eq!("e1002".parse::<ErrorCode>(), Ok(ErrorCode::E1002));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_display_matches_as_str() {
    assert_eq!(ErrorCode::E2002.to_string(), "E2002");
    assert!(!ErrorCode::W1001.description().is_empty());
}

#[test]
fn test_exhausted_tags_are_descriptor_errors() {
    assert!(ErrorCode::E1003.is_descriptor_error());
    assert_eq!(ErrorCode::E1003.description(), "no tag value left");
}
