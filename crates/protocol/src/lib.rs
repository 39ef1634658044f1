//! Binary encoding for batches of debug shape operations.
//!
//! A [`DebugMessage`] is built from [`Operation`]s, each of which may carry a
//! [`Shape`]. Encoding is big-endian and matches what the client side renderer
//! reads; ids of shapes and operations are a fixed contract with it.

mod errors;
mod message;
mod operation;
mod primitives;
pub mod shape;
mod wire;

pub use errors::{BuildError, EncodeError};
pub use message::{DebugMessage, DebugMessageBuilder};
pub use operation::{clear_all, clear_namespace, remove, set, NamespacedId, Operation};
pub use primitives::{Color, Layer, Position};
pub use shape::Shape;
pub use wire::Encode;

pub mod prelude {
    pub use super::{
        shape::{
            self, BoxShape, LineShape, LineType, QuadShape, Shape, SplineShape, SplineType,
        },
        BuildError, Color, DebugMessage, Encode, EncodeError, Layer, NamespacedId, Operation,
        Position,
    };
}
