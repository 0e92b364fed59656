//! Storage layout planning for tagged unions.
//!
//! Given a resolved [`UnionDescriptor`](tagpack_ir::UnionDescriptor), the
//! planner decides how the union's cases share storage and how each case
//! is written and read back:
//!
//! - **Classification** ([`DataKind`]): each case value is overlappable,
//!   shareable by type, shareable as a reference, decomposable into its
//!   members, or unique.
//! - **Allocation** ([`allocate`], [`select`]): fields are declared case by
//!   case, reusing fields of earlier cases where the discriminant makes it
//!   safe. Overlappable data goes into one region whose alternatives share
//!   an address; the cheaper of the overlapped and plain layouts wins.
//! - **Tags** ([`assign_tags`]): explicit discriminants are reserved, the
//!   rest filled in declaration order.
//! - **Expressions** ([`map_cases`]): per case, a construction writing the
//!   factory arguments into fields and a discriminant-guarded access that
//!   reassembles them. [`verify_round_trip`] checks one inverts the other.
//! - **Presentation and derivations** ([`present`], [`derive`]): member
//!   names and which equality/text/match members an emitter produces.
//!
//! [`plan_union`] runs the whole pipeline for one union and [`plan_all`]
//! runs it for many in parallel. Emitters implement [`PlanEmitter`].

mod alloc;
mod batch;
mod classify;
pub mod derive;
mod emit;
mod error;
mod expr;
mod field;
mod layout;
mod plan;
pub mod present;
mod select;
mod tags;
mod value;
mod verify;

#[cfg(test)]
mod test_helpers;

pub use alloc::{allocate, OVERLAP_ARG_NAME, OVERLAP_FIELD_NAME, OVERLAP_TYPE_NAME};
pub use batch::{plan_all, PlanOutcome};
pub use classify::{classify, KindClassifier};
pub use emit::{render_access, render_construction, render_path, PlanEmitter};
pub use error::LayoutError;
pub use expr::{
    combined_value, map_cases, AccessExpr, CaseAccess, CaseMapping, CombinedValue, Construction,
    FieldInit, InitExpr,
};
pub use field::{
    DataField, FieldHome, FieldId, FieldKind, FieldTable, DATA_FIELD_PREFIX,
    WIDENED_REFERENCE_TYPE,
};
pub use layout::{CaseLayout, FieldPath, UnionLayout};
pub use plan::{plan_union, CasePlan, UnionPlan};
pub use select::select;
pub use tags::{assign_tags, validate, TagAssigner};
pub use value::{ArgPath, ValueArena, ValueId, ValueNode};
pub use verify::{expected_value, verify_round_trip, SimulatedStorage, Symbolic};

/// How a case value is stored.
///
/// Every value is classified into exactly one kind. The kind decides
/// whether the value gets its own field, may reuse a field of another
/// case, lives in the overlap region, or is split into its members.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// May reuse another case's field of the identical type.
    SameTypeSharable,
    /// May reuse another case's reference field, widening its type.
    ReferenceSharable,
    /// Has no field of its own; its members are stored instead.
    Decomposable,
    /// Stored in the overlap region, sharing an address with other cases'
    /// data.
    Overlappable,
    /// Always gets a field dedicated to its case.
    Unique,
}
