//! Error codes for planner diagnostics.
//!
//! Each code is a unique identifier (e.g., `E1002`) with the first digit
//! indicating where the problem was found.

use std::fmt;

/// Error codes for all planner diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Descriptor validation
/// - E2xxx: Layout planning
/// - Wxxxx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Descriptor Errors (E1xxx)
    /// Two cases share a name
    E1001,
    /// Two cases declare the same explicit tag value
    E1002,
    /// Every tag value is taken before all cases have one
    E1003,

    // Layout Errors (E2xxx)
    /// Value shape cannot be laid out
    E2001,
    /// Value path does not resolve to an allocated field
    E2002,
    /// Construction followed by access does not reproduce the value
    E2003,

    // Descriptor Warnings (W1xxx)
    /// Union declares no cases
    W1001,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::W1001,
    ];

    /// Get the string representation of this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::W1001 => "W1001",
        }
    }

    /// One-line description of the problem.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "duplicate case name",
            ErrorCode::E1002 => "duplicate tag value",
            ErrorCode::E1003 => "no tag value left",
            ErrorCode::E2001 => "value shape cannot be laid out",
            ErrorCode::E2002 => "value path has no allocated field",
            ErrorCode::E2003 => "case does not round-trip through its storage",
            ErrorCode::W1001 => "union has no cases",
        }
    }

    /// Check if this is a descriptor validation error (E1xxx range).
    pub fn is_descriptor_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003
        )
    }

    /// Check if this is a layout planning error (E2xxx range).
    pub fn is_layout_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W1001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1002"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
