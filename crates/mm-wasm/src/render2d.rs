//! Canvas2D executor for flattened frames.
//!
//! Replays [`DrawOp`]s onto an HTML `<canvas>` 2D context. The frame
//! builder already decided paint order and emphasis; this file only knows
//! how to turn each op into context calls.

use mm_core::Shape;
use mm_core::geometry::HANDLE_RADIUS;
use mm_render::frame::{self, DrawOp, Frame, HandleEmphasis, TextRole};
use mm_render::text::{FontSpec, TextMeasurer};
use mm_render::{Point, Rect};
use web_sys::CanvasRenderingContext2d;

const NODE_CORNER_RADIUS: f64 = 10.0;

/// Text measurer backed by the live canvas metrics.
pub struct CanvasMeasurer<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasMeasurer<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasurer for CanvasMeasurer<'_> {
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        self.ctx.set_font(&font.css());
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}

/// Replay one frame. Clears the canvas first; the context is expected to
/// be DPR-scaled by the host.
pub fn render_frame(ctx: &CanvasRenderingContext2d, frame: &Frame, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);

    for op in &frame.ops {
        match op {
            DrawOp::EdgeCurve {
                p0,
                ctrl,
                p1,
                selected,
            } => draw_edge(ctx, *p0, *ctrl, *p1, *selected),
            DrawOp::NodeShape {
                shape,
                bounds,
                selected,
            } => draw_node(ctx, *shape, bounds, *selected),
            DrawOp::TextLine { text, origin, role } => draw_text_line(ctx, text, *origin, *role),
            DrawOp::HandleDot { center, emphasis } => draw_handle(ctx, *center, *emphasis),
            DrawOp::PreviewCurve { p0, ctrl, p1 } => draw_preview(ctx, *p0, *ctrl, *p1),
        }
    }
}

fn draw_edge(ctx: &CanvasRenderingContext2d, p0: Point, ctrl: Point, p1: Point, selected: bool) {
    ctx.begin_path();
    ctx.move_to(p0.x, p0.y);
    ctx.quadratic_curve_to(ctrl.x, ctrl.y, p1.x, p1.y);
    if selected {
        ctx.set_line_width(3.2);
        ctx.set_stroke_style_str(frame::EDGE_SELECTED_STROKE);
    } else {
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str(frame::EDGE_STROKE);
    }
    ctx.stroke();
}

fn draw_node(ctx: &CanvasRenderingContext2d, shape: Shape, bounds: &Rect, selected: bool) {
    let (x, y) = (bounds.x0, bounds.y0);
    let (w, h) = (bounds.width(), bounds.height());

    ctx.begin_path();
    match shape {
        Shape::Ellipse => {
            let _ = ctx.ellipse(
                x + w / 2.0,
                y + h / 2.0,
                w / 2.0,
                h / 2.0,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
        }
        Shape::Diamond => {
            let (cx, cy) = (x + w / 2.0, y + h / 2.0);
            ctx.move_to(cx, y);
            ctx.line_to(x + w, cy);
            ctx.line_to(cx, y + h);
            ctx.line_to(x, cy);
            ctx.close_path();
        }
        Shape::Rect => rounded_rect_path(ctx, x, y, w, h, 0.0),
        Shape::Rounded => rounded_rect_path(ctx, x, y, w, h, NODE_CORNER_RADIUS),
    }

    ctx.set_fill_style_str(if selected {
        frame::NODE_SELECTED_FILL
    } else {
        frame::NODE_FILL
    });
    ctx.fill();
    ctx.set_line_width(if selected { 2.5 } else { 1.2 });
    ctx.set_stroke_style_str(frame::NODE_STROKE);
    ctx.stroke();
}

fn draw_text_line(ctx: &CanvasRenderingContext2d, text: &str, origin: Point, role: TextRole) {
    ctx.set_font(&role.font().css());
    ctx.set_fill_style_str(role.fill());
    let _ = ctx.fill_text(text, origin.x, origin.y);
}

/// Handle rings: a white-filled outer circle plus an accent inner dot.
/// Emphasis picks the ring weight and radius.
fn draw_handle(ctx: &CanvasRenderingContext2d, center: Point, emphasis: HandleEmphasis) {
    let r = HANDLE_RADIUS as f64;
    let (ring_r, ring_width, ring_stroke, dot_r, dot_fill) = match emphasis {
        HandleEmphasis::Source => (r, 2.4, "rgba(37,99,235,0.98)", 4.0, frame::ACCENT_DARK),
        HandleEmphasis::Target => (r - 2.0, 1.8, "rgba(96,165,250,0.9)", 3.0, frame::ACCENT),
        HandleEmphasis::Normal => (r, 2.2, "rgba(37,99,235,0.95)", 4.0, frame::ACCENT),
        HandleEmphasis::Hovered => (r, 2.2, "rgba(37,99,235,0.95)", 5.0, frame::ACCENT),
    };

    ctx.begin_path();
    ctx.set_line_width(ring_width);
    ctx.set_stroke_style_str(ring_stroke);
    ctx.set_fill_style_str("rgba(255,255,255,0.98)");
    let _ = ctx.arc(center.x, center.y, ring_r, 0.0, std::f64::consts::TAU);
    ctx.fill();
    ctx.stroke();

    ctx.begin_path();
    ctx.set_fill_style_str(dot_fill);
    let _ = ctx.arc(center.x, center.y, dot_r, 0.0, std::f64::consts::TAU);
    ctx.fill();
}

fn draw_preview(ctx: &CanvasRenderingContext2d, p0: Point, ctrl: Point, p1: Point) {
    ctx.begin_path();
    ctx.set_stroke_style_str(frame::ACCENT);
    ctx.set_line_width(2.5);
    ctx.move_to(p0.x, p0.y);
    ctx.quadratic_curve_to(ctrl.x, ctrl.y, p1.x, p1.y);
    ctx.stroke();
}

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).unwrap_or(());
    ctx.arc_to(x + w, y + h, x, y + h, r).unwrap_or(());
    ctx.arc_to(x, y + h, x, y, r).unwrap_or(());
    ctx.arc_to(x, y, x + w, y, r).unwrap_or(());
    ctx.close_path();
}
