//! Drawable shapes.
//!
//! Each variant has a fixed numeric id that the renderer uses to pick a
//! decoder. Ids are never reused or renumbered; new shapes take the next free
//! id and need a matching renderer on the client.

mod box_shape;
mod line;
mod quad;
mod spline;

use std::io::Write;

use serde::{Deserialize, Serialize};

pub use box_shape::{BoxShape, BoxShapeBuilder};
pub use line::{LineShape, LineShapeBuilder, LineType};
pub use quad::{QuadShape, QuadShapeBuilder};
pub use spline::{SplineShape, SplineShapeBuilder, SplineType};

use crate::{errors::EncodeError, wire::Encode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line(LineShape),
    Spline(SplineShape),
    Quad(QuadShape),
    Box(BoxShape),
}

impl Shape {
    /// Wire id of the variant.
    pub const fn id(&self) -> i32 {
        match self {
            Shape::Line(_) => LineShape::ID,
            Shape::Spline(_) => SplineShape::ID,
            Shape::Quad(_) => QuadShape::ID,
            Shape::Box(_) => BoxShape::ID,
        }
    }
}

/// The payload only; the id is written by the enclosing operation.
impl Encode for Shape {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        match self {
            Shape::Line(line) => line.encode_payload(out),
            Shape::Spline(spline) => spline.encode_payload(out),
            Shape::Quad(quad) => quad.encode_payload(out),
            Shape::Box(cube) => cube.encode_payload(out),
        }
    }
}

macro_rules! impl_into_shape {
    ($($from:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$from> for Shape {
                fn from(shape: $from) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_into_shape!(
    LineShape => Line,
    SplineShape => Spline,
    QuadShape => Quad,
    BoxShape => Box,
);

pub fn line() -> LineShapeBuilder {
    LineShapeBuilder::default()
}

pub fn spline() -> SplineShapeBuilder {
    SplineShapeBuilder::default()
}

pub fn quad() -> QuadShapeBuilder {
    QuadShapeBuilder::default()
}

/// `box` is reserved, hence the longer name.
pub fn box_shape() -> BoxShapeBuilder {
    BoxShapeBuilder::default()
}
