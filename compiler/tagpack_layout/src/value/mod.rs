//! Classified value trees.
//!
//! The allocator turns each case's [`CaseValue`] tree into [`ValueNode`]s
//! stored in a [`ValueArena`]. A node remembers its data kind, the field
//! it was stored in (leaves only) and the argument path that reaches it
//! from the factory parameters.

use smallvec::SmallVec;

use tagpack_ir::{CaseValue, ValueType};

use crate::field::FieldId;
use crate::DataKind;

/// Value node identifier within one [`ValueArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ValueId(u32);

impl ValueId {
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Member names from a factory parameter down to a nested value.
///
/// `["point", "x"]` is the `x` member of the `point` parameter.
pub type ArgPath<'u> = SmallVec<[&'u str; 4]>;

/// A classified value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueNode<'u> {
    pub value: &'u CaseValue,
    pub kind: DataKind,
    /// Storage field. `None` exactly when `kind` is `Decomposable`.
    pub field: Option<FieldId>,
    pub arg_path: ArgPath<'u>,
    pub members: SmallVec<[ValueId; 4]>,
}

impl<'u> ValueNode<'u> {
    #[inline]
    pub fn name(&self) -> &'u str {
        &self.value.name
    }

    #[inline]
    pub fn ty(&self) -> &'u ValueType {
        &self.value.ty
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.kind != DataKind::Decomposable
    }
}

/// Arena of value nodes for one layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueArena<'u> {
    nodes: Vec<ValueNode<'u>>,
}

impl<'u> ValueArena<'u> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ValueNode<'u>) -> ValueId {
        let id = u32::try_from(self.nodes.len())
            .unwrap_or_else(|_| panic!("value count exceeds u32::MAX"));
        self.nodes.push(node);
        ValueId::new(id)
    }

    #[inline]
    pub fn get(&self, id: ValueId) -> &ValueNode<'u> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order walk over the trees rooted at `roots`, in declaration
    /// order.
    pub fn preorder(&self, roots: &[ValueId]) -> Vec<ValueId> {
        let mut out = Vec::new();
        let mut stack: Vec<ValueId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.get(id).members.iter().rev().copied());
        }
        out
    }

    /// Leaves of the trees rooted at `roots`, in declaration order.
    pub fn leaves(&self, roots: &[ValueId]) -> Vec<ValueId> {
        self.preorder(roots)
            .into_iter()
            .filter(|&id| self.get(id).is_leaf())
            .collect()
    }
}

impl<'u> std::ops::Index<ValueId> for ValueArena<'u> {
    type Output = ValueNode<'u>;

    fn index(&self, id: ValueId) -> &ValueNode<'u> {
        self.get(id)
    }
}
