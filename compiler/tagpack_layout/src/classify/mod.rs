//! Data-kind classifier.
//!
//! Maps a value's [`TypeShape`] to a [`DataKind`] in two steps: a fixed
//! base mapping, then option-driven downgrades. The downgrades run in a
//! fixed order because each may feed the next:
//!
//! 1. `Overlappable` → `SameTypeSharable` unless overlapping is on and permitted
//! 2. `Decomposable` → `SameTypeSharable` unless decomposition is on
//! 3. `ReferenceSharable` → `SameTypeSharable` unless reference sharing is on
//! 4. `SameTypeSharable` → `Unique` unless same-type sharing is on

use tagpack_ir::{TypeShape, UnionOptions};

use crate::DataKind;

/// Classifier for one allocation pass.
///
/// `overlap_permitted` is false whenever the pass decided not to create an
/// overlap region, which demotes every overlappable value even if the
/// options ask for overlapping.
#[derive(Clone, Copy, Debug)]
pub struct KindClassifier<'opts> {
    options: &'opts UnionOptions,
    overlap_permitted: bool,
}

impl<'opts> KindClassifier<'opts> {
    pub fn new(options: &'opts UnionOptions, overlap_permitted: bool) -> Self {
        Self {
            options,
            overlap_permitted,
        }
    }

    /// Whether this classifier may answer [`DataKind::Overlappable`].
    pub fn overlap_permitted(&self) -> bool {
        self.overlap_permitted
    }

    /// Classify a shape under the classifier's options.
    pub fn classify(&self, shape: TypeShape) -> DataKind {
        let mut kind = self.base_kind(shape);

        if kind == DataKind::Overlappable
            && (!self.overlap_permitted || !self.options.overlap_structs())
        {
            kind = DataKind::SameTypeSharable;
        }

        if kind == DataKind::Decomposable && !self.options.decompose_structs() {
            kind = DataKind::SameTypeSharable;
        }

        if kind == DataKind::ReferenceSharable && !self.options.share_reference_fields() {
            kind = DataKind::SameTypeSharable;
        }

        if kind == DataKind::SameTypeSharable && !self.options.share_same_type_fields() {
            kind = DataKind::Unique;
        }

        kind
    }

    /// Shape-to-candidate mapping.
    ///
    /// Shapes that can either overlap or decompose pick here, since the
    /// fallback for them is decomposition rather than a downgrade.
    fn base_kind(&self, shape: TypeShape) -> DataKind {
        match shape {
            TypeShape::TypeParamUnconstrained
            | TypeShape::TypeParamValConstrained
            | TypeShape::NonOverlapSafeStruct
            | TypeShape::Unknown
            | TypeShape::RefLike => DataKind::SameTypeSharable,

            TypeShape::NonOverlapSafeTuple | TypeShape::DecomposableLocalRecord => {
                DataKind::Decomposable
            }

            TypeShape::DecomposableForeignRecord => self.decomposable_foreign(),

            TypeShape::Reference
            | TypeShape::Interface
            | TypeShape::Object
            | TypeShape::TypeParamRefConstrained => DataKind::ReferenceSharable,

            TypeShape::PrimitiveScalar
            | TypeShape::OverlapSafeLocalStruct
            | TypeShape::OverlapSafeLocalRecord => DataKind::Overlappable,

            TypeShape::OverlapSafeForeignStruct | TypeShape::OverlapSafeForeignRecord => {
                if self.options.overlap_foreign_structs() {
                    DataKind::Overlappable
                } else {
                    DataKind::SameTypeSharable
                }
            }

            TypeShape::OverlapSafeTuple | TypeShape::OverlapDecomposableLocalRecord => {
                if self.options.overlap_structs() && self.overlap_permitted {
                    DataKind::Overlappable
                } else {
                    DataKind::Decomposable
                }
            }

            TypeShape::OverlapDecomposableForeignRecord => {
                if self.options.overlap_structs()
                    && self.options.overlap_foreign_structs()
                    && self.overlap_permitted
                {
                    DataKind::Overlappable
                } else {
                    self.decomposable_foreign()
                }
            }
        }
    }

    fn decomposable_foreign(&self) -> DataKind {
        if self.options.decompose_foreign_structs() {
            DataKind::Decomposable
        } else {
            DataKind::SameTypeSharable
        }
    }
}

/// Classify a single shape.
///
/// Convenience for callers that don't hold a [`KindClassifier`].
pub fn classify(options: &UnionOptions, shape: TypeShape, overlap_permitted: bool) -> DataKind {
    KindClassifier::new(options, overlap_permitted).classify(shape)
}
