use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{BuildError, EncodeError},
    primitives::{Color, Layer, Position},
    wire::WriteExt,
};

/// A filled quadrilateral with corners given in winding order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuadShapeBuilder")]
pub struct QuadShape {
    a: Position,
    b: Position,
    c: Position,
    d: Position,
    color: Color,
    layer: Layer,
}

impl QuadShape {
    pub const ID: i32 = 2;

    pub fn corners(&self) -> [Position; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub(crate) fn encode_payload<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        for corner in [&self.a, &self.b, &self.c, &self.d] {
            out.put_position(corner)?;
        }
        out.put_u32(self.color.argb())?;
        out.put_i32(self.layer.ordinal())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadShapeBuilder {
    a: Option<Position>,
    b: Option<Position>,
    c: Option<Position>,
    d: Option<Position>,
    color: Color,
    layer: Layer,
}

impl Default for QuadShapeBuilder {
    fn default() -> Self {
        Self {
            a: None,
            b: None,
            c: None,
            d: None,
            color: Color::WHITE,
            layer: Layer::Inline,
        }
    }
}

impl QuadShapeBuilder {
    pub fn a(mut self, a: impl Into<Position>) -> Self {
        self.a = Some(a.into());
        self
    }

    pub fn b(mut self, b: impl Into<Position>) -> Self {
        self.b = Some(b.into());
        self
    }

    pub fn c(mut self, c: impl Into<Position>) -> Self {
        self.c = Some(c.into());
        self
    }

    pub fn d(mut self, d: impl Into<Position>) -> Self {
        self.d = Some(d.into());
        self
    }

    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Fails if any of the four corners was never set.
    pub fn build(self) -> Result<QuadShape, BuildError> {
        let missing = |field| BuildError::MissingField {
            shape: "quad",
            field,
        };
        Ok(QuadShape {
            a: self.a.ok_or_else(|| missing("a"))?,
            b: self.b.ok_or_else(|| missing("b"))?,
            c: self.c.ok_or_else(|| missing("c"))?,
            d: self.d.ok_or_else(|| missing("d"))?,
            color: self.color,
            layer: self.layer,
        })
    }
}

impl TryFrom<QuadShapeBuilder> for QuadShape {
    type Error = BuildError;

    fn try_from(builder: QuadShapeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
