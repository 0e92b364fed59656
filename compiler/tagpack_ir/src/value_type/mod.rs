//! Value types and their pre-resolved storage shapes.
//!
//! The descriptor extractor resolves every type it sees into a
//! [`TypeShape`]. Layout planning never inspects a type beyond its shape,
//! its display name and its optional singleton accessor.

use std::fmt;

/// The storage-relevant shape of a value type.
///
/// "Local" composites are declared in the same unit as the union; "foreign"
/// composites come from elsewhere, so options decide whether their layout
/// may be relied upon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// Shape could not be determined.
    Unknown,
    /// A single primitive value type (`int`, `double`, `bool`, ...).
    PrimitiveScalar,

    // Composites whose fields are all overlap-safe.
    OverlapSafeLocalStruct,
    OverlapSafeLocalRecord,
    OverlapSafeForeignStruct,
    OverlapSafeForeignRecord,

    /// A composite mixing references and plain data.
    NonOverlapSafeStruct,

    // Composites that can be flattened into their members.
    DecomposableLocalRecord,
    DecomposableForeignRecord,

    // Composites that can either overlap or be flattened.
    OverlapDecomposableLocalRecord,
    OverlapDecomposableForeignRecord,

    /// Tuple whose elements are all overlap-safe.
    OverlapSafeTuple,
    /// Tuple holding at least one element that cannot overlap.
    NonOverlapSafeTuple,

    /// Stack-only type that cannot be boxed or used as a generic argument.
    RefLike,

    /// A reference (class) type.
    Reference,
    Interface,
    /// The open "any object" type.
    Object,

    // Generic type parameters.
    TypeParamUnconstrained,
    TypeParamRefConstrained,
    TypeParamValConstrained,
}

impl TypeShape {
    /// Shapes reassembled through a record constructor.
    pub fn is_record(self) -> bool {
        matches!(
            self,
            TypeShape::OverlapSafeLocalRecord
                | TypeShape::OverlapSafeForeignRecord
                | TypeShape::DecomposableLocalRecord
                | TypeShape::DecomposableForeignRecord
                | TypeShape::OverlapDecomposableLocalRecord
                | TypeShape::OverlapDecomposableForeignRecord
        )
    }

    /// Shapes reassembled through tuple syntax.
    pub fn is_tuple(self) -> bool {
        matches!(
            self,
            TypeShape::OverlapSafeTuple | TypeShape::NonOverlapSafeTuple
        )
    }

    /// Whether a value of this shape may be a null reference.
    pub fn is_possible_reference(self) -> bool {
        matches!(
            self,
            TypeShape::Reference
                | TypeShape::Interface
                | TypeShape::Object
                | TypeShape::TypeParamUnconstrained
                | TypeShape::TypeParamRefConstrained
        )
    }

    /// Whether the type may appear as a generic type argument.
    pub fn can_be_generic_argument(self) -> bool {
        self != TypeShape::RefLike
    }

    /// Stable lowercase identifier, used in listings and input files.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeShape::Unknown => "unknown",
            TypeShape::PrimitiveScalar => "primitive",
            TypeShape::OverlapSafeLocalStruct => "overlap_safe_local_struct",
            TypeShape::OverlapSafeLocalRecord => "overlap_safe_local_record",
            TypeShape::OverlapSafeForeignStruct => "overlap_safe_foreign_struct",
            TypeShape::OverlapSafeForeignRecord => "overlap_safe_foreign_record",
            TypeShape::NonOverlapSafeStruct => "non_overlap_safe_struct",
            TypeShape::DecomposableLocalRecord => "decomposable_local_record",
            TypeShape::DecomposableForeignRecord => "decomposable_foreign_record",
            TypeShape::OverlapDecomposableLocalRecord => "overlap_decomposable_local_record",
            TypeShape::OverlapDecomposableForeignRecord => "overlap_decomposable_foreign_record",
            TypeShape::OverlapSafeTuple => "overlap_safe_tuple",
            TypeShape::NonOverlapSafeTuple => "non_overlap_safe_tuple",
            TypeShape::RefLike => "ref_like",
            TypeShape::Reference => "reference",
            TypeShape::Interface => "interface",
            TypeShape::Object => "object",
            TypeShape::TypeParamUnconstrained => "type_param",
            TypeShape::TypeParamRefConstrained => "type_param_ref",
            TypeShape::TypeParamValConstrained => "type_param_val",
        }
    }

    /// Every shape, in declaration order.
    pub const ALL: [TypeShape; 20] = [
        TypeShape::Unknown,
        TypeShape::PrimitiveScalar,
        TypeShape::OverlapSafeLocalStruct,
        TypeShape::OverlapSafeLocalRecord,
        TypeShape::OverlapSafeForeignStruct,
        TypeShape::OverlapSafeForeignRecord,
        TypeShape::NonOverlapSafeStruct,
        TypeShape::DecomposableLocalRecord,
        TypeShape::DecomposableForeignRecord,
        TypeShape::OverlapDecomposableLocalRecord,
        TypeShape::OverlapDecomposableForeignRecord,
        TypeShape::OverlapSafeTuple,
        TypeShape::NonOverlapSafeTuple,
        TypeShape::RefLike,
        TypeShape::Reference,
        TypeShape::Interface,
        TypeShape::Object,
        TypeShape::TypeParamUnconstrained,
        TypeShape::TypeParamRefConstrained,
        TypeShape::TypeParamValConstrained,
    ];

    /// Parse the identifier produced by [`as_str`](Self::as_str).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.as_str() == name)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named type together with its shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValueType {
    pub name: String,
    pub shape: TypeShape,
    /// Static member producing the only instance of a singleton type.
    pub singleton_accessor: Option<String>,
}

impl ValueType {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            singleton_accessor: None,
        }
    }

    /// A type with exactly one instance, reachable as `name.accessor`.
    pub fn singleton(
        name: impl Into<String>,
        shape: TypeShape,
        accessor: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            singleton_accessor: Some(accessor.into()),
        }
    }

    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.singleton_accessor.is_some()
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(name, TypeShape::PrimitiveScalar)
    }

    pub fn int() -> Self {
        Self::primitive("int")
    }

    pub fn long() -> Self {
        Self::primitive("long")
    }

    pub fn double() -> Self {
        Self::primitive("double")
    }

    pub fn bool() -> Self {
        Self::primitive("bool")
    }

    pub fn string() -> Self {
        Self::new("string", TypeShape::Reference)
    }

    pub fn object() -> Self {
        Self::new("object", TypeShape::Object)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
