use std::io::Write;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    errors::{BuildError, EncodeError},
    primitives::{Color, Layer, Position},
    wire::WriteExt,
};

/// Curve family used to interpolate a [`SplineShape`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SplineType {
    #[default]
    CatmullRom = 0,
    Bezier = 1,
}

impl SplineType {
    pub const fn ordinal(self) -> i32 {
        self as i32
    }
}

/// A smooth curve through (or controlled by) its points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SplineShapeBuilder")]
pub struct SplineShape {
    spline_type: SplineType,
    points: Vec<Position>,
    looped: bool,
    color: Color,
    layer: Layer,
    line_width: f32,
}

impl SplineShape {
    pub const ID: i32 = 1;

    pub fn spline_type(&self) -> SplineType {
        self.spline_type
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub(crate) fn encode_payload<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), EncodeError> {
        out.put_i32(self.spline_type.ordinal())?;
        out.put_positions(&self.points)?;
        out.put_bool(self.looped)?;
        out.put_u32(self.color.argb())?;
        out.put_i32(self.layer.ordinal())?;
        out.put_f32(self.line_width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineShapeBuilder {
    spline_type: SplineType,
    points: Vec<Position>,
    looped: bool,
    color: Color,
    layer: Layer,
    line_width: f32,
}

impl Default for SplineShapeBuilder {
    fn default() -> Self {
        Self {
            spline_type: SplineType::CatmullRom,
            points: Vec::new(),
            looped: false,
            color: Color::WHITE,
            layer: Layer::Inline,
            line_width: 3.0,
        }
    }
}

impl SplineShapeBuilder {
    pub fn spline_type(mut self, spline_type: SplineType) -> Self {
        self.spline_type = spline_type;
        self
    }

    pub fn point(mut self, point: impl Into<Position>) -> Self {
        self.points.push(point.into());
        self
    }

    pub fn points<I, P>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        self.points.extend(points.into_iter().map(Into::into));
        self
    }

    /// Join the last point back to the first.
    pub fn looped(mut self, looped: bool) -> Self {
        self.looped = looped;
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

    pub fn line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Never fails: unlike [`LineShape`](super::LineShape) there is no
    /// minimum point count.
    pub fn build(self) -> Result<SplineShape, BuildError> {
        Ok(SplineShape {
            spline_type: self.spline_type,
            points: self.points,
            looped: self.looped,
            color: self.color,
            layer: self.layer,
            line_width: self.line_width,
        })
    }
}

impl TryFrom<SplineShapeBuilder> for SplineShape {
    type Error = BuildError;

    fn try_from(builder: SplineShapeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
