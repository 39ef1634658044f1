use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{BuildError, EncodeError},
    primitives::{Color, Layer, Position},
    wire::WriteExt,
};

/// An axis aligned box spanned by two opposite corners, with separately
/// styled faces and edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoxShapeBuilder")]
pub struct BoxShape {
    start: Position,
    end: Position,
    face_color: Color,
    face_layer: Layer,
    edge_color: Color,
    edge_layer: Layer,
    edge_width: f32,
}

impl BoxShape {
    pub const ID: i32 = 3;

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn face_color(&self) -> Color {
        self.face_color
    }

    pub fn face_layer(&self) -> Layer {
        self.face_layer
    }

    pub fn edge_color(&self) -> Color {
        self.edge_color
    }

    pub fn edge_layer(&self) -> Layer {
        self.edge_layer
    }

    pub fn edge_width(&self) -> f32 {
        self.edge_width
    }

    pub(crate) fn encode_payload<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        out.put_position(&self.start)?;
        out.put_position(&self.end)?;
        out.put_u32(self.face_color.argb())?;
        out.put_i32(self.face_layer.ordinal())?;
        out.put_u32(self.edge_color.argb())?;
        out.put_i32(self.edge_layer.ordinal())?;
        out.put_f32(self.edge_width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxShapeBuilder {
    start: Option<Position>,
    end: Option<Position>,
    face_color: Color,
    face_layer: Layer,
    edge_color: Color,
    edge_layer: Layer,
    edge_width: f32,
}

impl Default for BoxShapeBuilder {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            face_color: Color::WHITE,
            face_layer: Layer::Inline,
            edge_color: Color::WHITE,
            edge_layer: Layer::Inline,
            edge_width: 4.0,
        }
    }
}

impl BoxShapeBuilder {
    /// First corner of the box. Required.
    pub fn start(mut self, start: impl Into<Position>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Corner opposite to `start`. Required.
    pub fn end(mut self, end: impl Into<Position>) -> Self {
        self.end = Some(end.into());
        self
    }

    pub fn face_color(mut self, color: impl Into<Color>) -> Self {
        self.face_color = color.into();
        self
    }

    /// Defaults to [`Layer::Inline`].
    pub fn face_layer(mut self, layer: Layer) -> Self {
        self.face_layer = layer;
        self
    }

    pub fn edge_color(mut self, color: impl Into<Color>) -> Self {
        self.edge_color = color.into();
        self
    }

    pub fn edge_layer(mut self, layer: Layer) -> Self {
        self.edge_layer = layer;
        self
    }

    pub fn edge_width(mut self, width: f32) -> Self {
        self.edge_width = width;
        self
    }

    pub fn build(self) -> Result<BoxShape, BuildError> {
        let start = self.start.ok_or(BuildError::MissingField {
            shape: "box",
            field: "start",
        })?;
        let end = self.end.ok_or(BuildError::MissingField {
            shape: "box",
            field: "end",
        })?;
        Ok(BoxShape {
            start,
            end,
            face_color: self.face_color,
            face_layer: self.face_layer,
            edge_color: self.edge_color,
            edge_layer: self.edge_layer,
            edge_width: self.edge_width,
        })
    }
}

impl TryFrom<BoxShapeBuilder> for BoxShape {
    type Error = BuildError;

    fn try_from(builder: BoxShapeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
