//! JSON input files.
//!
//! A file holds a batch of union declarations in the descriptor model's
//! shape with snake_case keys. Shapes are given by their stable
//! identifiers (`"primitive"`, `"decomposable_local_record"`, ...).

use std::path::Path;

use serde::Deserialize;

use tagpack_ir::{
    AccessorKind, CaseDescriptor, CaseValue, FactoryKind, TypeShape, UnionDescriptor, UnionKind,
    UnionOptions, ValueType,
};

use crate::DriverError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchInput {
    pub unions: Vec<UnionInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindInput {
    TagUnion,
    TypeUnion,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnionInput {
    pub kind: KindInput,
    pub name: String,
    /// Name with type parameters; defaults to `name`.
    #[serde(default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub ref_like: bool,
    #[serde(default)]
    pub options: OptionsInput,
    #[serde(default)]
    pub cases: Vec<CaseInput>,
}

/// Option overrides. Anything left out keeps its default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsInput {
    pub share_same_type_fields: Option<bool>,
    pub share_reference_fields: Option<bool>,
    pub overlap_structs: Option<bool>,
    pub overlap_foreign_structs: Option<bool>,
    pub decompose_structs: Option<bool>,
    pub decompose_foreign_structs: Option<bool>,
    pub generate_equality: Option<bool>,
    pub generate_to_string: Option<bool>,
    pub generate_match: Option<bool>,
    pub use_toolkit: Option<bool>,
    pub tag_type_name: Option<String>,
    pub tag_property_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactoryInput {
    Method,
    Property,
    None,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorInput {
    Property,
    Method,
    None,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseInput {
    pub name: String,
    /// Wrapped type of a type-union case.
    #[serde(default, rename = "type")]
    pub ty: Option<TypeInput>,
    #[serde(default)]
    pub tag: Option<u32>,
    #[serde(default)]
    pub values: Vec<ValueInput>,
    #[serde(default)]
    pub factory: Option<FactoryInput>,
    #[serde(default)]
    pub factory_name: Option<String>,
    #[serde(default)]
    pub accessor: Option<AccessorInput>,
    #[serde(default)]
    pub accessor_name: Option<String>,
    #[serde(default)]
    pub accessibility: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeInput,
    #[serde(default)]
    pub members: Vec<ValueInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeInput {
    pub name: String,
    pub shape: String,
    #[serde(default)]
    pub singleton_accessor: Option<String>,
}

/// Read and convert every union in `path`.
pub fn load_file(path: &Path) -> Result<Vec<UnionDescriptor>, DriverError> {
    let text = std::fs::read_to_string(path).map_err(|source| DriverError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_batch(&text).map_err(|err| err.with_path(path))
}

/// Parse a JSON batch.
pub fn parse_batch(text: &str) -> Result<Vec<UnionDescriptor>, DriverError> {
    let batch: BatchInput = serde_json::from_str(text).map_err(|source| DriverError::Json {
        path: None,
        source,
    })?;
    batch
        .unions
        .into_iter()
        .map(UnionInput::into_descriptor)
        .collect()
}

impl UnionInput {
    pub fn into_descriptor(self) -> Result<UnionDescriptor, DriverError> {
        let kind = match self.kind {
            KindInput::TagUnion => UnionKind::TagUnion,
            KindInput::TypeUnion => UnionKind::TypeUnion,
        };
        let mut union = UnionDescriptor::new(kind, self.name)
            .with_ref_like(self.ref_like)
            .with_options(self.options.into_options());
        if let Some(type_name) = self.type_name {
            union = union.with_type_name(type_name);
        }

        for case in self.cases {
            let case = case.into_descriptor(&union.name)?;
            union = union.with_case(case);
        }
        Ok(union)
    }
}

impl OptionsInput {
    pub fn into_options(self) -> UnionOptions {
        let mut options = UnionOptions::default();
        let toggles: [(Option<bool>, fn(&UnionOptions, bool) -> UnionOptions); 10] = [
            (self.share_same_type_fields, UnionOptions::with_share_same_type_fields),
            (self.share_reference_fields, UnionOptions::with_share_reference_fields),
            (self.overlap_structs, UnionOptions::with_overlap_structs),
            (self.overlap_foreign_structs, UnionOptions::with_overlap_foreign_structs),
            (self.decompose_structs, UnionOptions::with_decompose_structs),
            (self.decompose_foreign_structs, UnionOptions::with_decompose_foreign_structs),
            (self.generate_equality, UnionOptions::with_generate_equality),
            (self.generate_to_string, UnionOptions::with_generate_to_string),
            (self.generate_match, UnionOptions::with_generate_match),
            (self.use_toolkit, UnionOptions::with_use_toolkit),
        ];
        for (value, set) in toggles {
            if let Some(value) = value {
                options = set(&options, value);
            }
        }
        if let Some(name) = self.tag_type_name {
            options = options.with_tag_type_name(name);
        }
        if let Some(name) = self.tag_property_name {
            options = options.with_tag_property_name(name);
        }
        options
    }
}

impl CaseInput {
    fn into_descriptor(self, union: &str) -> Result<CaseDescriptor, DriverError> {
        let mut case = CaseDescriptor::new(self.name);
        let context = |case: &CaseDescriptor| format!("{union}.{}", case.name);

        if let Some(ty) = self.ty {
            let ty = ty.into_value_type(&context(&case))?;
            case = case.with_type(ty);
        }
        if let Some(tag) = self.tag {
            case = case.with_tag(tag);
        }
        for value in self.values {
            let value = value.into_case_value(&context(&case))?;
            case = case.with_value(value);
        }

        let factory = match self.factory {
            None | Some(FactoryInput::Method) => FactoryKind::Method,
            Some(FactoryInput::Property) => FactoryKind::Property,
            Some(FactoryInput::None) => FactoryKind::None,
        };
        let accessor = match self.accessor {
            None | Some(AccessorInput::Property) => AccessorKind::Property,
            Some(AccessorInput::Method) => AccessorKind::Method,
            Some(AccessorInput::None) => AccessorKind::None,
        };
        case = case
            .with_factory(factory, self.factory_name)
            .with_accessor(accessor, self.accessor_name);
        if let Some(accessibility) = self.accessibility {
            case = case.with_accessibility(accessibility);
        }
        Ok(case)
    }
}

impl ValueInput {
    fn into_case_value(self, context: &str) -> Result<CaseValue, DriverError> {
        let context = format!("{context}.{}", self.name);
        let ty = self.ty.into_value_type(&context)?;
        let members = self
            .members
            .into_iter()
            .map(|member| member.into_case_value(&context))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CaseValue::composite(self.name, ty, members))
    }
}

impl TypeInput {
    fn into_value_type(self, context: &str) -> Result<ValueType, DriverError> {
        let shape = TypeShape::from_name(&self.shape).ok_or_else(|| DriverError::UnknownShape {
            shape: self.shape.clone(),
            context: context.to_owned(),
        })?;
        Ok(match self.singleton_accessor {
            Some(accessor) => ValueType::singleton(self.name, shape, accessor),
            None => ValueType::new(self.name, shape),
        })
    }
}
