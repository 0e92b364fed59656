//! Diagnostics for union layout planning.
//!
//! Fatal planning failures abort one union; descriptor problems such as
//! conflicting tag values are reported without stopping the batch. Both
//! surface to callers as [`Diagnostic`]s:
//!
//! - Error codes for searchability
//! - Clear messages naming the union and case involved
//! - Notes carrying context (the conflicting case, the failing path)

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Severity};
pub use error_code::ErrorCode;
