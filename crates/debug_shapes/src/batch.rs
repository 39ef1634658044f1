use std::io::BufRead;

use debug_shapes_protocol::prelude::*;
use eyre::{Result, WrapErr};
use log::info;

/// Read a batch written as JSON lines, one [`Operation`] per line.
///
/// Blank lines and lines starting with `//` are skipped. Shapes go through
/// their builders, so an invalid shape fails the whole batch.
pub fn load_batch(reader: impl BufRead) -> Result<DebugMessage> {
    let mut builder = DebugMessage::builder();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.wrap_err_with(|| format!("failed to read line {}", line_no + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        let op: Operation = serde_json::from_str(trimmed)
            .wrap_err_with(|| format!("invalid operation at line {}", line_no + 1))?;
        builder.push(op);
    }
    info!("Loaded {} operations", builder.len());
    Ok(builder.build())
}

/// Styling knobs for [`sample_batch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleStyle {
    /// Put every shape on this layer instead of the per-shape defaults.
    pub layer: Option<Layer>,
    pub line_type: LineType,
    pub spline_type: SplineType,
}

/// A small batch touching every shape and operation.
pub fn sample_batch(style: SampleStyle) -> Result<DebugMessage> {
    let red = Color::from_rgb(0xFF, 0x20, 0x20);
    let layer = |fallback: Layer| style.layer.unwrap_or(fallback);
    Ok(DebugMessage::builder()
        .clear("sample")
        .set(
            "sample:path",
            shape::line()
                .line_type(style.line_type)
                .points([[0.0, 64.0, 0.0], [4.0, 66.0, 0.0], [8.0, 64.0, 2.0]])
                .color(red)
                .layer(layer(Layer::Inline))
                .build()?,
        )
        .set(
            "sample:curve",
            shape::spline()
                .spline_type(style.spline_type)
                .points([[0.0, 70.0, 0.0], [3.0, 72.0, 3.0], [6.0, 70.0, 0.0]])
                .looped(true)
                .layer(layer(Layer::Top))
                .build()?,
        )
        .set(
            "sample:floor",
            shape::quad()
                .a([0.0, 63.0, 0.0])
                .b([8.0, 63.0, 0.0])
                .c([8.0, 63.0, 8.0])
                .d([0.0, 63.0, 8.0])
                .color(Color::from_argb(0x60, 0x20, 0x80, 0xFF))
                .layer(layer(Layer::Inline))
                .build()?,
        )
        .set(
            "sample:region",
            shape::box_shape()
                .start([0.0, 63.0, 0.0])
                .end([8.0, 71.0, 8.0])
                .face_color(Color::TRANSPARENT)
                .face_layer(layer(Layer::Inline))
                .edge_color(red)
                .edge_layer(layer(Layer::Mixed))
                .build()?,
        )
        .remove("sample:stale")
        .build())
}

pub fn to_json_lines(message: &DebugMessage) -> Result<String> {
    let mut out = String::new();
    for op in message {
        out.push_str(&serde_json::to_string(op)?);
        out.push('\n');
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_style_overrides() {
        let sample = sample_batch(SampleStyle {
            layer: Some(Layer::Top),
            line_type: LineType::Loop,
            spline_type: SplineType::Bezier,
        })
        .unwrap();

        for op in &sample {
            let Operation::Set { shape, .. } = op else {
                continue;
            };
            match shape {
                Shape::Line(line) => {
                    assert_eq!(line.layer(), Layer::Top);
                    assert_eq!(line.line_type(), LineType::Loop);
                }
                Shape::Spline(spline) => {
                    assert_eq!(spline.layer(), Layer::Top);
                    assert_eq!(spline.spline_type(), SplineType::Bezier);
                }
                Shape::Quad(quad) => assert_eq!(quad.layer(), Layer::Top),
                Shape::Box(cube) => {
                    assert_eq!(cube.face_layer(), Layer::Top);
                    assert_eq!(cube.edge_layer(), Layer::Top);
                }
            }
        }
    }

    #[test]
    fn test_load_skips_blank_and_comment_lines() {
        let input = r#"
// reset
{"op":"clear_all"}

{"op":"remove","id":"ns:a"}
"#;
        let message = load_batch(input.as_bytes()).unwrap();
        assert_eq!(
            message.operations(),
            &[Operation::ClearAll, debug_shapes_protocol::remove("ns:a")]
        );
    }

    #[test]
    fn test_load_reports_line_number() {
        let input = "{\"op\":\"clear_all\"}\n{\"op\":\"set\",\"id\":\"a:b\",\"shape\":{\"type\":\"box\"}}\n";
        let err = load_batch(input.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_sample_round_trips_through_json_lines() {
        let sample = sample_batch(SampleStyle::default()).unwrap();
        let text = to_json_lines(&sample).unwrap();
        assert_eq!(text.lines().count(), sample.len());

        let loaded = load_batch(text.as_bytes()).unwrap();
        assert_eq!(loaded, sample);
        assert_eq!(loaded.to_bytes().unwrap(), sample.to_bytes().unwrap());
    }
}
