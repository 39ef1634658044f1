use std::{fmt, io::Write};

use serde::{Deserialize, Serialize};

use crate::{
    errors::EncodeError,
    shape::Shape,
    wire::{Encode, WriteExt},
};

/// A `namespace:key` identifier for a shape.
///
/// Kept as the raw string; parsing and validation belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespacedId(String);

impl NamespacedId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first `:`, if there is one.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(namespace, _)| namespace)
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NamespacedId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NamespacedId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NamespacedId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One edit to the renderer's shape registry.
///
/// Ids are part of the wire contract: a new operation takes the next unused
/// id, existing ids never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Create the shape, or replace whatever is registered under `id`.
    Set { id: NamespacedId, shape: Shape },
    /// Drop the shape registered under `id`. Unknown ids are ignored.
    Remove { id: NamespacedId },
    /// Drop every shape whose id lives in `namespace`.
    ClearNamespace { namespace: String },
    /// Drop everything.
    ClearAll,
}

impl Operation {
    pub const SET: i32 = 0;
    pub const REMOVE: i32 = 1;
    pub const CLEAR_NAMESPACE: i32 = 2;
    pub const CLEAR_ALL: i32 = 3;

    pub const fn id(&self) -> i32 {
        match self {
            Operation::Set { .. } => Self::SET,
            Operation::Remove { .. } => Self::REMOVE,
            Operation::ClearNamespace { .. } => Self::CLEAR_NAMESPACE,
            Operation::ClearAll => Self::CLEAR_ALL,
        }
    }
}

impl Encode for Operation {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        out.put_i32(self.id())?;
        match self {
            Operation::Set { id, shape } => {
                out.put_utf(id.as_str())?;
                out.put_i32(shape.id())?;
                shape.encode(out)
            }
            Operation::Remove { id } => out.put_utf(id.as_str()),
            Operation::ClearNamespace { namespace } => out.put_utf(namespace),
            Operation::ClearAll => Ok(()),
        }
    }
}

pub fn set(id: impl Into<NamespacedId>, shape: impl Into<Shape>) -> Operation {
    Operation::Set {
        id: id.into(),
        shape: shape.into(),
    }
}

pub fn remove(id: impl Into<NamespacedId>) -> Operation {
    Operation::Remove { id: id.into() }
}

pub fn clear_namespace(namespace: impl Into<String>) -> Operation {
    Operation::ClearNamespace {
        namespace: namespace.into(),
    }
}

pub fn clear_all() -> Operation {
    Operation::ClearAll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape;

    fn quad() -> Shape {
        shape::quad()
            .a([0.0, 0.0, 0.0])
            .b([1.0, 0.0, 0.0])
            .c([1.0, 1.0, 0.0])
            .d([0.0, 1.0, 0.0])
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn test_ids_are_fixed() {
        assert_eq!(set("a:b", quad()).id(), 0);
        assert_eq!(remove("a:b").id(), 1);
        assert_eq!(clear_namespace("a").id(), 2);
        assert_eq!(clear_all().id(), 3);
    }

    #[test]
    fn test_clear_all_is_tag_only() {
        assert_eq!(clear_all().to_bytes().unwrap(), vec![0, 0, 0, 3]);
    }

    #[test]
    fn test_remove_layout() {
        let bytes = remove("ns:key").to_bytes().unwrap();
        let mut expected = vec![0, 0, 0, 1, 0, 6];
        expected.extend_from_slice(b"ns:key");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_clear_namespace_layout() {
        let bytes = clear_namespace("ns").to_bytes().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 2, 0, 2, b'n', b's']);
    }

    #[test]
    fn test_set_writes_id_then_shape() {
        let shape = quad();
        let bytes = set("a:b", shape.clone()).to_bytes().unwrap();

        assert_eq!(&bytes[0..4], &0i32.to_be_bytes());
        assert_eq!(&bytes[4..9], &[0, 3, b'a', b':', b'b']);
        assert_eq!(&bytes[9..13], &2i32.to_be_bytes());
        assert_eq!(&bytes[13..], shape.to_bytes().unwrap().as_slice());
    }

    #[test]
    fn test_namespace_accessor() {
        assert_eq!(NamespacedId::from("debug:path").namespace(), Some("debug"));
        assert_eq!(NamespacedId::from("bare").namespace(), None);
    }

    #[test]
    fn test_operation_json() {
        let op: Operation = serde_json::from_str(r#"{"op":"clear_namespace","namespace":"ns"}"#).unwrap();
        assert_eq!(op, clear_namespace("ns"));
        let op: Operation = serde_json::from_str(r#"{"op":"clear_all"}"#).unwrap();
        assert_eq!(op, Operation::ClearAll);
    }
}
