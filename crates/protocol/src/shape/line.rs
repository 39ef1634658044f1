use std::io::Write;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{
    errors::{BuildError, EncodeError},
    primitives::{Color, Layer, Position},
    wire::WriteExt,
};

/// How consecutive points of a [`LineShape`] are joined.
///
/// Encoded as the declaration index.
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
pub enum LineType {
    /// Independent segments, one per pair of points.
    #[default]
    Single = 0,
    /// One connected polyline.
    Strip = 1,
    /// A polyline closed back to the first point.
    Loop = 2,
}

impl LineType {
    pub const fn ordinal(self) -> i32 {
        self as i32
    }
}

/// A line through two or more points, drawn in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineShapeBuilder")]
pub struct LineShape {
    line_type: LineType,
    points: Vec<Position>,
    color: Color,
    layer: Layer,
    line_width: f32,
}

impl LineShape {
    pub const ID: i32 = 0;
    pub const MIN_POINTS: usize = 2;

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    pub fn points(&self) -> &[Position] {
        &self.points
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
        out.put_i32(self.line_type.ordinal())?;
        out.put_positions(&self.points)?;
        out.put_u32(self.color.argb())?;
        out.put_i32(self.layer.ordinal())?;
        out.put_f32(self.line_width)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineShapeBuilder {
    line_type: LineType,
    points: Vec<Position>,
    color: Color,
    layer: Layer,
    line_width: f32,
}

impl Default for LineShapeBuilder {
    fn default() -> Self {
        Self {
            line_type: LineType::Single,
            points: Vec::new(),
            color: Color::WHITE,
            layer: Layer::Inline,
            line_width: 4.0,
        }
    }
}

impl LineShapeBuilder {
    pub fn line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    /// Append a point. Lines are drawn from the first point to the last.
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

    /// ARGB colour, white if unset.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Defaults to [`Layer::Inline`].
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn build(self) -> Result<LineShape, BuildError> {
        if self.points.len() < LineShape::MIN_POINTS {
            return Err(BuildError::TooFewPoints {
                shape: "line",
                min: LineShape::MIN_POINTS,
                actual: self.points.len(),
            });
        }
        Ok(LineShape {
            line_type: self.line_type,
            points: self.points,
            color: self.color,
            layer: self.layer,
            line_width: self.line_width,
        })
    }
}

impl TryFrom<LineShapeBuilder> for LineShape {
    type Error = BuildError;

    fn try_from(builder: LineShapeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape;

    #[test]
    fn test_defaults() {
        let line = shape::line()
            .point([0.0, 0.0, 0.0])
            .point([1.0, 0.0, 0.0])
            .build()
            .unwrap();

        assert_eq!(line.line_type(), LineType::Single);
        assert_eq!(line.color(), Color::WHITE);
        assert_eq!(line.layer(), Layer::Inline);
        assert_eq!(line.line_width(), 4.0);
    }

    #[test]
    fn test_needs_two_points() {
        let err = shape::line().point([0.0, 0.0, 0.0]).build().unwrap_err();
        assert_eq!(
            err,
            BuildError::TooFewPoints {
                shape: "line",
                min: 2,
                actual: 1
            }
        );
        assert!(shape::line().build().is_err());
    }

    #[test]
    fn test_points_keep_order() {
        let line = shape::line()
            .line_type(LineType::Strip)
            .points([[3.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]])
            .build()
            .unwrap();
        let xs: Vec<f64> = line.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_payload_layout() {
        let line = shape::line()
            .line_type(LineType::Loop)
            .point([1.0, 2.0, 3.0])
            .point([4.0, 5.0, 6.0])
            .color(0x11223344u32)
            .layer(Layer::Top)
            .line_width(2.5)
            .build()
            .unwrap();

        let mut buf = Vec::new();
        line.encode_payload(&mut buf).unwrap();

        // type + count + 2 positions + color + layer + width
        assert_eq!(buf.len(), 4 + 4 + 2 * 24 + 4 + 4 + 4);
        assert_eq!(&buf[0..4], &2i32.to_be_bytes());
        assert_eq!(&buf[4..8], &2i32.to_be_bytes());
        assert_eq!(&buf[8..16], &1.0f64.to_be_bytes());
        assert_eq!(&buf[48..56], &6.0f64.to_be_bytes());
        assert_eq!(&buf[56..60], &[0x11, 0x22, 0x33, 0x44]);
        assert_eq!(&buf[60..64], &1i32.to_be_bytes());
        assert_eq!(&buf[64..68], &2.5f32.to_be_bytes());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: LineShape = serde_json::from_str(
            r#"{"points":[{"x":0,"y":0,"z":0},{"x":1,"y":1,"z":1}],"line_type":"strip"}"#,
        )
        .unwrap();
        assert_eq!(ok.line_type(), LineType::Strip);
        assert_eq!(ok.line_width(), 4.0);

        let bad = serde_json::from_str::<LineShape>(r#"{"points":[{"x":0,"y":0,"z":0}]}"#);
        assert!(bad.is_err());
    }
}
