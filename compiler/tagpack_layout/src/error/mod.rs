//! Fatal planning errors.

use thiserror::Error;

use tagpack_diagnostic::{Diagnostic, ErrorCode};
use tagpack_ir::TypeShape;

/// An error that stops planning of one union.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The descriptor failed validation (duplicate names or tags).
    #[error("union `{union}` has {} invalid declaration(s)", diagnostics.len())]
    InvalidDescriptor {
        union: String,
        diagnostics: Vec<Diagnostic>,
    },

    /// No discriminant value is left for a case without an explicit tag.
    #[error("no tag value is left for case `{case}`")]
    TagsExhausted { case: String },

    /// A value's shape cannot be laid out.
    #[error("value `{path}` of case `{case}` has shape `{shape}` and cannot be laid out: {reason}")]
    InvalidShape {
        case: String,
        path: String,
        shape: TypeShape,
        reason: &'static str,
    },

    /// A value was never given storage.
    #[error("value `{path}` of case `{case}` has no allocated field")]
    MissingField { case: String, path: String },

    /// Reading a case back does not reproduce what was constructed.
    #[error("case `{case}` does not round-trip: expected {expected}, read {actual}")]
    RoundTrip {
        case: String,
        expected: String,
        actual: String,
    },
}

impl LayoutError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LayoutError::InvalidDescriptor { diagnostics, .. } => diagnostics
                .first()
                .map_or(ErrorCode::E1001, |diagnostic| diagnostic.code),
            LayoutError::TagsExhausted { .. } => ErrorCode::E1003,
            LayoutError::InvalidShape { .. } => ErrorCode::E2001,
            LayoutError::MissingField { .. } => ErrorCode::E2002,
            LayoutError::RoundTrip { .. } => ErrorCode::E2003,
        }
    }

    /// Convert to diagnostics for batch reporting.
    pub fn to_diagnostics(&self, union: &str) -> Vec<Diagnostic> {
        match self {
            LayoutError::InvalidDescriptor { diagnostics, .. } => diagnostics.clone(),
            LayoutError::TagsExhausted { case }
            | LayoutError::InvalidShape { case, .. }
            | LayoutError::MissingField { case, .. }
            | LayoutError::RoundTrip { case, .. } => vec![Diagnostic::error(self.code())
                .with_message(self.to_string())
                .with_union(union)
                .with_case(case.as_str())],
        }
    }
}

#[cfg(test)]
mod tests;
