//! Storage fields and the per-union field table.
//!
//! Every field a layout declares lives in one [`FieldTable`] and is
//! addressed by [`FieldId`]. Where a field lives is recorded at allocation
//! time as a [`FieldHome`], so a path from the union root can be rebuilt
//! without searching.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::trace;

/// Field identifier within one [`FieldTable`].
///
/// IDs are allocated sequentially starting from 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FieldId(u32);

impl FieldId {
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a field was allocated for.
///
/// Region fields (the union-wide overlap region and per-case sub-regions)
/// are [`FieldKind::Unique`]: they belong to exactly one owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    SameTypeSharable,
    ReferenceSharable,
    Overlappable,
    Unique,
}

/// Where a field is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldHome {
    /// Directly on the union.
    Union,
    /// Inside the union-wide overlap region.
    Overlap,
    /// Inside a case's private sub-region, itself inside the overlap region.
    CaseRegion(FieldId),
}

/// One declared storage field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataField {
    pub kind: FieldKind,
    pub name: String,
    pub type_name: String,
    /// Constructor argument that initializes the field. `None` for fields
    /// inside the overlap region, which are written through the region.
    pub ctor_arg: Option<String>,
    pub home: FieldHome,
}

/// Name and type of a reference field widened to hold several types.
pub const WIDENED_REFERENCE_TYPE: &str = "object";

/// Prefix every non-overlapped data field's name carries.
pub const DATA_FIELD_PREFIX: &str = "_data_";

/// Arena of all fields declared by one layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldTable {
    fields: Vec<DataField>,
}

impl FieldTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field and return its ID.
    pub fn push(&mut self, field: DataField) -> FieldId {
        let id = u32::try_from(self.fields.len())
            .unwrap_or_else(|_| panic!("field count exceeds u32::MAX"));
        self.fields.push(field);
        FieldId::new(id)
    }

    #[inline]
    pub fn get(&self, id: FieldId) -> &DataField {
        &self.fields[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find a shareable non-overlapped field for a leaf value, or allocate
    /// a new one.
    ///
    /// `union_fields` is the ordered list of non-overlapped fields declared
    /// so far; `claims` holds the fields the current case already uses and
    /// is updated with the result.
    ///
    /// - `SameTypeSharable` claims an unclaimed field of the identical
    ///   type.
    /// - `ReferenceSharable` claims any unclaimed reference-sharable field,
    ///   widening its type when the types differ.
    /// - `Unique` always allocates.
    ///
    /// A claimed field is renamed to its generic shared-slot name.
    pub fn find_or_allocate(
        &mut self,
        union_fields: &mut Vec<FieldId>,
        claims: &mut FxHashSet<FieldId>,
        kind: FieldKind,
        arg_name: &str,
        type_name: &str,
    ) -> FieldId {
        for (slot, &id) in union_fields.iter().enumerate() {
            if claims.contains(&id) {
                continue;
            }

            let field = &mut self.fields[id.index()];
            let shareable = match kind {
                FieldKind::SameTypeSharable => {
                    field.kind != FieldKind::Unique && field.type_name == type_name
                }
                FieldKind::ReferenceSharable => field.kind == FieldKind::ReferenceSharable,
                FieldKind::Overlappable | FieldKind::Unique => false,
            };
            if !shareable {
                continue;
            }

            if field.type_name != type_name {
                trace!(
                    field = %field.name,
                    from = %field.type_name,
                    to = %type_name,
                    "widening shared reference field"
                );
                field.type_name = WIDENED_REFERENCE_TYPE.to_owned();
            }

            let arg = format!("shared{}", slot + 1);
            field.name = format!("{DATA_FIELD_PREFIX}{arg}");
            field.ctor_arg = Some(arg);
            trace!(field = %field.name, arg_name, "claimed shared field");
            claims.insert(id);
            return id;
        }

        let arg = lower_first(arg_name);
        let id = self.push(DataField {
            kind,
            name: format!("{DATA_FIELD_PREFIX}{arg}"),
            type_name: type_name.to_owned(),
            ctor_arg: Some(arg),
            home: FieldHome::Union,
        });
        union_fields.push(id);
        claims.insert(id);
        id
    }
}

impl std::ops::Index<FieldId> for FieldTable {
    type Output = DataField;

    fn index(&self, id: FieldId) -> &DataField {
        self.get(id)
    }
}

impl fmt::Display for DataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

/// Join name segments with `_`, skipping empty ones.
pub fn combine<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|part| !part.is_empty()) {
        if !out.is_empty() {
            out.push('_');
        }
        out.push_str(part);
    }
    out
}

/// Lowercase the first character.
pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
