//! Static export: flatten the idle view to SVG, rasterize to PNG.
//!
//! Export renders exactly what the canvas shows minus the interaction
//! chrome: edges, node bodies, text. Handles and the connection preview
//! never appear because the frame is built from the idle [`ViewState`].
//! PNG goes through `usvg`/`resvg` into a `tiny-skia` pixmap at a
//! caller-supplied scale (device pixel ratio).

use crate::frame::{self, DrawOp, Frame, ViewState, build_frame};
use crate::text::{FONT_STACK, TextMeasurer};
use mm_core::{Graph, Shape};
use std::fmt::Write as _;

// Stroke weights matching the interactive canvas.
const EDGE_WIDTH: f64 = 2.0;
const NODE_STROKE_WIDTH: f64 = 1.2;
const EXPORT_CORNER_RADIUS: f64 = 8.0;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("generated SVG failed to parse: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} export surface")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

/// Export sizing and scaling.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Explicit canvas size; when absent the content bounds plus `margin`
    /// decide, with a 640×480 floor.
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Raster scale factor (device pixel ratio). SVG output ignores it.
    pub scale: f32,
    pub margin: f32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            scale: 1.0,
            margin: 40.0,
        }
    }
}

/// Flatten the graph to an SVG document: white background, white node
/// fills, dark strokes.
pub fn render_svg(graph: &Graph, measurer: &dyn TextMeasurer, opts: &ExportOptions) -> String {
    let frame = build_frame(graph, &ViewState::default(), measurer);
    let (w, h) = export_size(graph, opts);
    svg_document(&frame, w as f64, h as f64)
}

/// Rasterize the SVG flatten to PNG bytes.
pub fn export_png(
    graph: &Graph,
    measurer: &dyn TextMeasurer,
    opts: &ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let svg = render_svg(graph, measurer, opts);

    let mut usvg_opts = usvg::Options::default();
    usvg_opts.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &usvg_opts)?;

    let (w, h) = export_size(graph, opts);
    let scale = opts.scale.max(0.1);
    let width_px = (w * scale).ceil().max(1.0) as u32;
    let height_px = (h * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(
        ExportError::PixmapAlloc {
            width: width_px,
            height: height_px,
        },
    )?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))
}

/// Canvas geometry for an export: the caller's explicit size, or the
/// content bounds plus margin.
fn export_size(graph: &Graph, opts: &ExportOptions) -> (f32, f32) {
    if let (Some(w), Some(h)) = (opts.width, opts.height) {
        return (w.max(1.0), h.max(1.0));
    }
    let mut max_x = 0.0f32;
    let mut max_y = 0.0f32;
    for n in graph.nodes() {
        max_x = max_x.max(n.x + n.w);
        max_y = max_y.max(n.y + n.h);
    }
    let w = opts.width.unwrap_or((max_x + opts.margin).max(640.0));
    let h = opts.height.unwrap_or((max_y + opts.margin).max(480.0));
    (w, h)
}

fn svg_document(frame: &Frame, w: f64, h: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = writeln!(out, r#"  <rect width="{w}" height="{h}" fill="{}"/>"#, frame::NODE_FILL);

    for op in &frame.ops {
        match op {
            DrawOp::EdgeCurve {
                p0,
                ctrl,
                p1,
                selected,
            } => {
                let (stroke, width) = if *selected {
                    (frame::EDGE_SELECTED_STROKE, 3.2)
                } else {
                    (frame::EDGE_STROKE, EDGE_WIDTH)
                };
                let _ = writeln!(
                    out,
                    r#"  <path d="M {} {} Q {} {} {} {}" fill="none" stroke="{stroke}" stroke-width="{width}"/>"#,
                    p0.x, p0.y, ctrl.x, ctrl.y, p1.x, p1.y
                );
            }
            DrawOp::NodeShape {
                shape,
                bounds,
                selected,
            } => {
                let fill = if *selected {
                    frame::NODE_SELECTED_FILL
                } else {
                    frame::NODE_FILL
                };
                let stroke = frame::NODE_STROKE;
                let (x, y) = (bounds.x0, bounds.y0);
                let (bw, bh) = (bounds.width(), bounds.height());
                match shape {
                    Shape::Rect | Shape::Rounded => {
                        let rx = if *shape == Shape::Rounded {
                            EXPORT_CORNER_RADIUS
                        } else {
                            0.0
                        };
                        let _ = writeln!(
                            out,
                            r#"  <rect x="{x}" y="{y}" width="{bw}" height="{bh}" rx="{rx}" fill="{fill}" stroke="{stroke}" stroke-width="{NODE_STROKE_WIDTH}"/>"#
                        );
                    }
                    Shape::Ellipse => {
                        let _ = writeln!(
                            out,
                            r#"  <ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{fill}" stroke="{stroke}" stroke-width="{NODE_STROKE_WIDTH}"/>"#,
                            x + bw / 2.0,
                            y + bh / 2.0,
                            bw / 2.0,
                            bh / 2.0
                        );
                    }
                    Shape::Diamond => {
                        let (cx, cy) = (x + bw / 2.0, y + bh / 2.0);
                        let _ = writeln!(
                            out,
                            r#"  <polygon points="{cx},{y} {},{cy} {cx},{} {x},{cy}" fill="{fill}" stroke="{stroke}" stroke-width="{NODE_STROKE_WIDTH}"/>"#,
                            x + bw,
                            y + bh
                        );
                    }
                }
            }
            DrawOp::TextLine { text, origin, role } => {
                let font = role.font();
                let weight = if font.bold { " font-weight=\"bold\"" } else { "" };
                let _ = writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-family="{FONT_STACK}" font-size="{}"{weight} fill="{}">{}</text>"#,
                    origin.x,
                    origin.y,
                    font.px,
                    role.fill(),
                    escape_xml(text)
                );
            }
            // Never present in an idle-view frame; exports stay clean even
            // if a caller hands us a live frame by mistake.
            DrawOp::HandleDot { .. } | DrawOp::PreviewCurve { .. } => {}
        }
    }

    out.push_str("</svg>\n");
    out
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
