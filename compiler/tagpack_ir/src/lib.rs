//! Descriptor model for the Tagpack union layout planner.
//!
//! A union declaration arrives here already resolved by whatever front end
//! extracted it: every value's type has a [`TypeShape`], singleton types
//! name their accessor, and options are attached per union. The planner in
//! `tagpack_layout` consumes these types read-only.
//!
//! - [`UnionDescriptor`] → [`CaseDescriptor`] → [`CaseValue`] tree
//! - [`ValueType`] / [`TypeShape`]: type name plus storage shape
//! - [`UnionOptions`] / [`LayoutFlags`]: copy-on-write option set

mod descriptor;
mod options;
mod value_type;

pub use descriptor::{
    AccessorKind, CaseDescriptor, CaseValue, FactoryKind, UnionDescriptor, UnionKind,
};
pub use options::{LayoutFlags, UnionOptions};
pub use value_type::{TypeShape, ValueType};
