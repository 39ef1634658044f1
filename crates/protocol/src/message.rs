use std::io::Write;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    errors::EncodeError,
    operation::{NamespacedId, Operation},
    shape::Shape,
    wire::{Encode, WriteExt},
};

/// An ordered batch of [`Operation`]s for the renderer to replay in sequence.
///
/// Order matters: a `set` followed by a `remove` of the same id leaves nothing
/// behind, the reverse leaves the shape in place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebugMessage {
    ops: Vec<Operation>,
}

impl DebugMessage {
    pub fn builder() -> DebugMessageBuilder {
        DebugMessageBuilder::default()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.ops.iter()
    }
}

/// `opCount:i32` followed by each operation, with no separators.
impl Encode for DebugMessage {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        out.put_count(self.ops.len())?;
        for op in &self.ops {
            op.encode(out)?;
        }
        debug!("encoded debug message with {} operations", self.ops.len());
        Ok(())
    }
}

impl From<Vec<Operation>> for DebugMessage {
    fn from(ops: Vec<Operation>) -> Self {
        Self { ops }
    }
}

impl FromIterator<Operation> for DebugMessage {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DebugMessage {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Accumulates operations for a [`DebugMessage`].
#[derive(Debug, Clone, Default)]
pub struct DebugMessageBuilder {
    ops: Vec<Operation>,
}

impl DebugMessageBuilder {
    /// Add or replace the shape registered under `id`.
    pub fn set(&mut self, id: impl Into<NamespacedId>, shape: impl Into<Shape>) -> &mut Self {
        self.push(Operation::Set {
            id: id.into(),
            shape: shape.into(),
        })
    }

    pub fn remove(&mut self, id: impl Into<NamespacedId>) -> &mut Self {
        self.push(Operation::Remove { id: id.into() })
    }

    /// Remove every shape in `namespace`.
    pub fn clear(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.push(Operation::ClearNamespace {
            namespace: namespace.into(),
        })
    }

    /// Remove every shape in every namespace.
    pub fn clear_all(&mut self) -> &mut Self {
        self.push(Operation::ClearAll)
    }

    pub fn push(&mut self, op: Operation) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Snapshot of the operations added so far. The builder stays usable.
    pub fn build(&self) -> DebugMessage {
        DebugMessage {
            ops: self.ops.clone(),
        }
    }
}

impl Extend<Operation> for DebugMessageBuilder {
    fn extend<T: IntoIterator<Item = Operation>>(&mut self, iter: T) {
        self.ops.extend(iter);
    }
}
