//! Per-union layout and generation options.
//!
//! Options are immutable once attached to a union. Every `with_*` method
//! returns a new value; when the requested setting is already in effect the
//! receiver is returned unchanged.

use bitflags::bitflags;

bitflags! {
    /// Boolean toggles controlling field sharing, overlap, decomposition
    /// and which helper members downstream emitters generate.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct LayoutFlags: u16 {
        // === Storage flags (bits 0-7) ===

        /// Fields of identical type may be shared across cases.
        const SHARE_SAME_TYPE_FIELDS = 1 << 0;
        /// Fields of any reference type may be shared across cases.
        const SHARE_REFERENCE_FIELDS = 1 << 1;
        /// Overlap-safe composites may occupy the overlap region.
        const OVERLAP_STRUCTS = 1 << 2;
        /// Overlap-safe composites declared outside the current unit may
        /// occupy the overlap region.
        const OVERLAP_FOREIGN_STRUCTS = 1 << 3;
        /// Decomposable composites are flattened into their members.
        const DECOMPOSE_STRUCTS = 1 << 4;
        /// Decomposable composites declared outside the current unit are
        /// flattened into their members.
        const DECOMPOSE_FOREIGN_STRUCTS = 1 << 5;

        // === Generation flags (bits 8-15) ===

        /// Emit pass-through equality.
        const GENERATE_EQUALITY = 1 << 8;
        /// Emit pass-through stringification.
        const GENERATE_TO_STRING = 1 << 9;
        /// Emit exhaustive match helpers.
        const GENERATE_MATCH = 1 << 10;
        /// Use the external runtime support toolkit.
        const USE_TOOLKIT = 1 << 11;
    }
}

impl LayoutFlags {
    /// Flags on by default: everything except foreign overlap.
    pub const DEFAULT: Self = Self::all().difference(Self::OVERLAP_FOREIGN_STRUCTS);

    /// Generation flags that cannot apply to ref-like unions.
    pub const UNSUPPORTED_BY_REF_LIKE: Self = Self::from_bits_truncate(
        Self::GENERATE_EQUALITY.bits()
            | Self::GENERATE_TO_STRING.bits()
            | Self::USE_TOOLKIT.bits(),
    );
}

/// Options attached to a single union declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionOptions {
    flags: LayoutFlags,
    tag_type_name: String,
    tag_property_name: String,
}

impl Default for UnionOptions {
    fn default() -> Self {
        Self {
            flags: LayoutFlags::DEFAULT,
            tag_type_name: "Case".to_owned(),
            tag_property_name: "Kind".to_owned(),
        }
    }
}

impl UnionOptions {
    /// Create options from an explicit flag set and discriminant names.
    pub fn new(
        flags: LayoutFlags,
        tag_type_name: impl Into<String>,
        tag_property_name: impl Into<String>,
    ) -> Self {
        Self {
            flags,
            tag_type_name: tag_type_name.into(),
            tag_property_name: tag_property_name.into(),
        }
    }

    #[inline]
    pub fn flags(&self) -> LayoutFlags {
        self.flags
    }

    #[inline]
    pub fn contains(&self, flag: LayoutFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn share_same_type_fields(&self) -> bool {
        self.contains(LayoutFlags::SHARE_SAME_TYPE_FIELDS)
    }

    pub fn share_reference_fields(&self) -> bool {
        self.contains(LayoutFlags::SHARE_REFERENCE_FIELDS)
    }

    pub fn overlap_structs(&self) -> bool {
        self.contains(LayoutFlags::OVERLAP_STRUCTS)
    }

    pub fn overlap_foreign_structs(&self) -> bool {
        self.contains(LayoutFlags::OVERLAP_FOREIGN_STRUCTS)
    }

    pub fn decompose_structs(&self) -> bool {
        self.contains(LayoutFlags::DECOMPOSE_STRUCTS)
    }

    pub fn decompose_foreign_structs(&self) -> bool {
        self.contains(LayoutFlags::DECOMPOSE_FOREIGN_STRUCTS)
    }

    pub fn generate_equality(&self) -> bool {
        self.contains(LayoutFlags::GENERATE_EQUALITY)
    }

    pub fn generate_to_string(&self) -> bool {
        self.contains(LayoutFlags::GENERATE_TO_STRING)
    }

    pub fn generate_match(&self) -> bool {
        self.contains(LayoutFlags::GENERATE_MATCH)
    }

    pub fn use_toolkit(&self) -> bool {
        self.contains(LayoutFlags::USE_TOOLKIT)
    }

    /// Display name of the generated discriminant type.
    pub fn tag_type_name(&self) -> &str {
        &self.tag_type_name
    }

    /// Display name of the discriminant property on the union.
    pub fn tag_property_name(&self) -> &str {
        &self.tag_property_name
    }

    /// Return options with `flag` set to `enabled`.
    #[must_use]
    pub fn with_flag(&self, flag: LayoutFlags, enabled: bool) -> Self {
        let mut flags = self.flags;
        flags.set(flag, enabled);
        Self {
            flags,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_share_same_type_fields(&self, share: bool) -> Self {
        self.with_flag(LayoutFlags::SHARE_SAME_TYPE_FIELDS, share)
    }

    #[must_use]
    pub fn with_share_reference_fields(&self, share: bool) -> Self {
        self.with_flag(LayoutFlags::SHARE_REFERENCE_FIELDS, share)
    }

    #[must_use]
    pub fn with_overlap_structs(&self, overlap: bool) -> Self {
        self.with_flag(LayoutFlags::OVERLAP_STRUCTS, overlap)
    }

    #[must_use]
    pub fn with_overlap_foreign_structs(&self, overlap: bool) -> Self {
        self.with_flag(LayoutFlags::OVERLAP_FOREIGN_STRUCTS, overlap)
    }

    #[must_use]
    pub fn with_decompose_structs(&self, decompose: bool) -> Self {
        self.with_flag(LayoutFlags::DECOMPOSE_STRUCTS, decompose)
    }

    #[must_use]
    pub fn with_decompose_foreign_structs(&self, decompose: bool) -> Self {
        self.with_flag(LayoutFlags::DECOMPOSE_FOREIGN_STRUCTS, decompose)
    }

    #[must_use]
    pub fn with_generate_equality(&self, generate: bool) -> Self {
        self.with_flag(LayoutFlags::GENERATE_EQUALITY, generate)
    }

    #[must_use]
    pub fn with_generate_to_string(&self, generate: bool) -> Self {
        self.with_flag(LayoutFlags::GENERATE_TO_STRING, generate)
    }

    #[must_use]
    pub fn with_generate_match(&self, generate: bool) -> Self {
        self.with_flag(LayoutFlags::GENERATE_MATCH, generate)
    }

    #[must_use]
    pub fn with_use_toolkit(&self, use_toolkit: bool) -> Self {
        self.with_flag(LayoutFlags::USE_TOOLKIT, use_toolkit)
    }

    #[must_use]
    pub fn with_tag_type_name(&self, name: impl Into<String>) -> Self {
        Self {
            tag_type_name: name.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_tag_property_name(&self, name: impl Into<String>) -> Self {
        Self {
            tag_property_name: name.into(),
            ..self.clone()
        }
    }

    /// Options actually in effect for a union.
    ///
    /// Ref-like unions cannot be boxed or used as generic arguments, so the
    /// equality, stringification and toolkit helpers are switched off.
    /// Match helpers stay available.
    #[must_use]
    pub fn effective_for(&self, ref_like: bool) -> Self {
        if ref_like {
            Self {
                flags: self.flags.difference(LayoutFlags::UNSUPPORTED_BY_REF_LIKE),
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}
