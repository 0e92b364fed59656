//! Union, case and case-value descriptors.
//!
//! These form an immutable tree handed to the planner: a [`UnionDescriptor`]
//! owns its [`CaseDescriptor`]s, each of which owns the [`CaseValue`]s its
//! factory takes. Decomposable values carry their members as nested
//! `CaseValue`s.

use crate::{UnionOptions, ValueType};

/// What a union's cases represent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnionKind {
    /// Each case wraps a value of a distinct type.
    TypeUnion,
    /// Each case is a named state with optional parameters.
    TagUnion,
}

/// How a case's factory is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum FactoryKind {
    /// Callable with the case values as parameters.
    #[default]
    Method,
    /// Property-like; only meaningful for zero-valued cases.
    Property,
    /// No factory is generated.
    None,
}

/// How a case's accessor is presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AccessorKind {
    #[default]
    Property,
    Method,
    None,
}

impl AccessorKind {
    /// Whether an accessor member exists at all.
    pub fn is_generated(self) -> bool {
        self != AccessorKind::None
    }
}

/// One value carried by a case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaseValue {
    pub name: String,
    pub ty: ValueType,
    /// Components the value decomposes into. Empty for leaves.
    pub members: Vec<CaseValue>,
}

impl CaseValue {
    pub fn new(name: impl Into<String>, ty: ValueType) -> Self {
        Self {
            name: name.into(),
            ty,
            members: Vec::new(),
        }
    }

    /// A value that decomposes into `members`.
    pub fn composite(name: impl Into<String>, ty: ValueType, members: Vec<CaseValue>) -> Self {
        Self {
            name: name.into(),
            ty,
            members,
        }
    }
}

/// One mutually exclusive alternative of a union.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CaseDescriptor {
    pub name: String,
    /// The wrapped type, for type unions.
    pub ty: Option<ValueType>,
    /// Explicit discriminant value, if declared.
    pub tag: Option<u32>,
    /// Factory parameters, in declaration order.
    pub values: Vec<CaseValue>,
    pub factory_kind: FactoryKind,
    pub factory_name: Option<String>,
    pub accessor_kind: AccessorKind,
    pub accessor_name: Option<String>,
    /// Accessibility of generated members; `None` means public.
    pub accessibility: Option<String>,
}

impl CaseDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            tag: None,
            values: Vec::new(),
            factory_kind: FactoryKind::default(),
            factory_name: None,
            accessor_kind: AccessorKind::default(),
            accessor_name: None,
            accessibility: None,
        }
    }

    /// A type-union case wrapping one `value` of type `ty`.
    pub fn of_type(name: impl Into<String>, ty: ValueType) -> Self {
        let mut case = Self::new(name);
        case.values.push(CaseValue::new("value", ty.clone()));
        case.ty = Some(ty);
        case
    }

    #[must_use]
    pub fn with_type(mut self, ty: ValueType) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: CaseValue) -> Self {
        self.values.push(value);
        self
    }

    #[must_use]
    pub fn with_factory(mut self, kind: FactoryKind, name: Option<String>) -> Self {
        self.factory_kind = kind;
        self.factory_name = name;
        self
    }

    #[must_use]
    pub fn with_accessor(mut self, kind: AccessorKind, name: Option<String>) -> Self {
        self.accessor_kind = kind;
        self.accessor_name = name;
        self
    }

    #[must_use]
    pub fn with_accessibility(mut self, accessibility: impl Into<String>) -> Self {
        self.accessibility = Some(accessibility.into());
        self
    }

    /// Accessibility of generated members.
    pub fn accessibility(&self) -> &str {
        self.accessibility.as_deref().unwrap_or("public")
    }

    /// The singleton type a zero-valued case exposes, if any.
    pub fn singleton_type(&self) -> Option<&ValueType> {
        self.ty.as_ref().filter(|ty| ty.is_singleton())
    }
}

/// A complete union declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnionDescriptor {
    pub kind: UnionKind,
    /// Name without type parameters.
    pub name: String,
    /// Name with type parameters, used when referring to the union.
    pub type_name: String,
    /// The union itself is a stack-only ref-like type.
    pub ref_like: bool,
    pub options: UnionOptions,
    pub cases: Vec<CaseDescriptor>,
}

impl UnionDescriptor {
    pub fn new(kind: UnionKind, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind,
            type_name: name.clone(),
            name,
            ref_like: false,
            options: UnionOptions::default(),
            cases: Vec::new(),
        }
    }

    pub fn tag_union(name: impl Into<String>) -> Self {
        Self::new(UnionKind::TagUnion, name)
    }

    pub fn type_union(name: impl Into<String>) -> Self {
        Self::new(UnionKind::TypeUnion, name)
    }

    #[must_use]
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    #[must_use]
    pub fn with_ref_like(mut self, ref_like: bool) -> Self {
        self.ref_like = ref_like;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: UnionOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_case(mut self, case: CaseDescriptor) -> Self {
        self.cases.push(case);
        self
    }

    pub fn case(&self, name: &str) -> Option<&CaseDescriptor> {
        self.cases.iter().find(|case| case.name == name)
    }
}
