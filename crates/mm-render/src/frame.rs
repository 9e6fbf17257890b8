//! Immediate-mode frame building.
//!
//! [`build_frame`] flattens the graph plus view state into an ordered
//! display list, rebuilt from scratch on every state change (no dirty
//! regions). Executors (the wasm canvas bridge, the SVG exporter) replay
//! the ops strictly in order and never touch the graph themselves.
//!
//! Paint order: edges, then node bodies with their text, then connection
//! handles, then the live connection preview on top of everything.

use crate::text::{FontSpec, TextMeasurer, wrap_text_limited};
use kurbo::{Point, Rect};
use mm_core::geometry::{self, Handle};
use mm_core::{Graph, Hover, Node, NodeId, Selection, Shape};

// Shared palette. Executors map the flags/roles on each op to these.
pub const EDGE_STROKE: &str = "#4a5568";
pub const EDGE_SELECTED_STROKE: &str = "#ef4444";
pub const NODE_FILL: &str = "#ffffff";
pub const NODE_SELECTED_FILL: &str = "#e6f0ff";
pub const NODE_STROKE: &str = "#2d3748";
pub const TITLE_FILL: &str = "#0f1724";
pub const BODY_FILL: &str = "#334155";
pub const ACCENT: &str = "#2563eb";
pub const ACCENT_DARK: &str = "#1e40af";

// Text layout inside a node: title starts 20px below the top edge, the
// description 40px, both inset 10px with a 10px right margin to match.
const TEXT_INSET_X: f64 = 10.0;
const TEXT_INTERIOR_PAD: f32 = 20.0;
const TITLE_BASELINE: f64 = 20.0;
const TITLE_LINE_HEIGHT: f64 = 18.0;
const TITLE_MAX_LINES: usize = 2;
const BODY_BASELINE: f64 = 40.0;
const BODY_LINE_HEIGHT: f64 = 16.0;
const BODY_MAX_LINES: usize = 3;

/// An in-progress connection drag, as the renderer needs to see it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionDrag {
    pub from_id: NodeId,
    pub from_handle: Handle,
    pub pointer: geometry::Point,
}

/// Everything the renderer needs besides the graph itself. `Default` is
/// the idle view (no selection, no hover, no drag), which is also what
/// static export uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState {
    pub selection: Selection,
    pub hover: Hover,
    pub connection: Option<ConnectionDrag>,
}

/// Emphasis level for a drawn handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEmphasis {
    /// Regular ring on the hovered/selected node.
    Normal,
    /// The exact handle under the pointer.
    Hovered,
    /// Source-node handles while a connection drag is live.
    Source,
    /// Other nodes' handles while a connection drag is live (drop targets).
    Target,
}

/// Text role; each carries its own font and fill pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Body,
}

impl TextRole {
    pub fn font(self) -> FontSpec {
        match self {
            TextRole::Title => FontSpec::TITLE,
            TextRole::Body => FontSpec::BODY,
        }
    }

    pub fn fill(self) -> &'static str {
        match self {
            TextRole::Title => TITLE_FILL,
            TextRole::Body => BODY_FILL,
        }
    }
}

/// One paint operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Quadratic edge curve between two node centers; the control point is
    /// the chord midpoint.
    EdgeCurve {
        p0: Point,
        ctrl: Point,
        p1: Point,
        selected: bool,
    },
    /// A node body, fill plus stroke.
    NodeShape {
        shape: Shape,
        bounds: Rect,
        selected: bool,
    },
    /// One already-wrapped text line; `origin` is the left end of the
    /// baseline.
    TextLine {
        text: String,
        origin: Point,
        role: TextRole,
    },
    /// A connection handle dot.
    HandleDot {
        center: Point,
        emphasis: HandleEmphasis,
    },
    /// Live connection preview curve, always the last op of a frame.
    PreviewCurve { p0: Point, ctrl: Point, p1: Point },
}

/// A fully flattened frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub ops: Vec<DrawOp>,
}

/// Flatten one frame. Reads the graph, never mutates it.
pub fn build_frame(graph: &Graph, view: &ViewState, measurer: &dyn TextMeasurer) -> Frame {
    let mut ops = Vec::new();

    // Edges first, so nodes paint over them. Dangling edges are skipped.
    for e in graph.edges() {
        let (Some(a), Some(b)) = (graph.node(e.from_id), graph.node(e.to_id)) else {
            continue;
        };
        let p0 = kp(a.center());
        let p1 = kp(b.center());
        ops.push(DrawOp::EdgeCurve {
            p0,
            ctrl: p0.midpoint(p1),
            p1,
            selected: view.selection.edge() == Some(*e),
        });
    }

    // Node bodies and their text, in insertion (z) order.
    for n in graph.nodes() {
        ops.push(DrawOp::NodeShape {
            shape: n.shape,
            bounds: node_rect(n),
            selected: view.selection.node() == Some(n.id),
        });
        push_text(&mut ops, n, TextRole::Title, &n.title, measurer);
        push_text(&mut ops, n, TextRole::Body, &n.description, measurer);
    }

    // Handles. During a connection drag every node shows its handles so
    // any node can be targeted; otherwise only the hovered-handle's node,
    // the hovered node, or the selected node, in that order.
    if let Some(drag) = view.connection {
        for n in graph.nodes() {
            let emphasis = if n.id == drag.from_id {
                HandleEmphasis::Source
            } else {
                HandleEmphasis::Target
            };
            for h in Handle::ALL {
                ops.push(DrawOp::HandleDot {
                    center: kp(h.position(n)),
                    emphasis,
                });
            }
        }
    } else {
        let target = view
            .hover
            .handle
            .map(|(id, _)| id)
            .or(view.hover.node)
            .or(view.selection.node());
        if let Some(n) = target.and_then(|id| graph.node(id)) {
            for h in Handle::ALL {
                let emphasis = if view.hover.handle == Some((n.id, h)) {
                    HandleEmphasis::Hovered
                } else {
                    HandleEmphasis::Normal
                };
                ops.push(DrawOp::HandleDot {
                    center: kp(h.position(n)),
                    emphasis,
                });
            }
        }
    }

    // The preview overlays everything, handles included.
    if let Some(drag) = view.connection
        && let Some(src) = graph.node(drag.from_id)
    {
        let p0 = kp(drag.from_handle.position(src));
        let p1 = kp(drag.pointer);
        ops.push(DrawOp::PreviewCurve {
            p0,
            ctrl: p0.midpoint(p1),
            p1,
        });
    }

    log::trace!("frame: {} ops", ops.len());
    Frame { ops }
}

fn push_text(ops: &mut Vec<DrawOp>, n: &Node, role: TextRole, text: &str, measurer: &dyn TextMeasurer) {
    if text.is_empty() {
        return;
    }
    let (first_baseline, line_height, max_lines) = match role {
        TextRole::Title => (TITLE_BASELINE, TITLE_LINE_HEIGHT, TITLE_MAX_LINES),
        TextRole::Body => (BODY_BASELINE, BODY_LINE_HEIGHT, BODY_MAX_LINES),
    };
    let max_width = (n.w - TEXT_INTERIOR_PAD).max(0.0);
    let lines = wrap_text_limited(measurer, role.font(), text, max_width, max_lines);
    for (i, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        ops.push(DrawOp::TextLine {
            text: line.clone(),
            origin: Point::new(
                n.x as f64 + TEXT_INSET_X,
                n.y as f64 + first_baseline + i as f64 * line_height,
            ),
            role,
        });
    }
}

fn node_rect(n: &Node) -> Rect {
    Rect::new(
        n.x as f64,
        n.y as f64,
        (n.x + n.w) as f64,
        (n.y + n.h) as f64,
    )
}

fn kp(p: geometry::Point) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::HeuristicMeasurer;
    use mm_core::{Edge, geometry::Point as GPoint};

    fn op_kind(op: &DrawOp) -> &'static str {
        match op {
            DrawOp::EdgeCurve { .. } => "edge",
            DrawOp::NodeShape { .. } => "node",
            DrawOp::TextLine { .. } => "text",
            DrawOp::HandleDot { .. } => "handle",
            DrawOp::PreviewCurve { .. } => "preview",
        }
    }

    fn linked_pair() -> (Graph, NodeId, NodeId) {
        let mut g = Graph::new();
        let a = g.add_node_at(GPoint::new(200.0, 120.0), "Central Idea", "A short description", Shape::Rounded);
        let b = g.add_node_at(GPoint::new(420.0, 260.0), "First Branch", "", Shape::Ellipse);
        g.add_edge(a, b);
        (g, a, b)
    }

    #[test]
    fn idle_frame_paints_edges_then_nodes_and_no_overlays() {
        let (g, _, _) = linked_pair();
        let frame = build_frame(&g, &ViewState::default(), &HeuristicMeasurer::default());

        let kinds: Vec<_> = frame.ops.iter().map(op_kind).collect();
        assert_eq!(kinds[0], "edge");
        assert!(kinds.contains(&"node"));
        assert!(kinds.contains(&"text"));
        assert!(!kinds.contains(&"handle"), "idle view shows no handles");
        assert!(!kinds.contains(&"preview"));

        // Edges strictly precede node bodies.
        let last_edge = kinds.iter().rposition(|k| *k == "edge").unwrap();
        let first_node = kinds.iter().position(|k| *k == "node").unwrap();
        assert!(last_edge < first_node);
    }

    #[test]
    fn selection_flags_reach_the_ops() {
        let (g, a, b) = linked_pair();
        let view = ViewState {
            selection: Selection::Edge(Edge::new(a, b)),
            ..Default::default()
        };
        let frame = build_frame(&g, &view, &HeuristicMeasurer::default());
        assert!(frame.ops.iter().any(|op| matches!(
            op,
            DrawOp::EdgeCurve { selected: true, .. }
        )));

        let view = ViewState {
            selection: Selection::Node(a),
            ..Default::default()
        };
        let frame = build_frame(&g, &view, &HeuristicMeasurer::default());
        let selected_nodes = frame
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::NodeShape { selected: true, .. }))
            .count();
        assert_eq!(selected_nodes, 1);
    }

    #[test]
    fn connection_drag_shows_every_handle_and_a_preview_last() {
        let (g, a, _) = linked_pair();
        let view = ViewState {
            connection: Some(ConnectionDrag {
                from_id: a,
                from_handle: Handle::East,
                pointer: GPoint::new(300.0, 200.0),
            }),
            ..Default::default()
        };
        let frame = build_frame(&g, &view, &HeuristicMeasurer::default());

        let handles = frame
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::HandleDot { .. }))
            .count();
        assert_eq!(handles, 4 * g.nodes().len());

        let source_handles = frame
            .ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    DrawOp::HandleDot {
                        emphasis: HandleEmphasis::Source,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(source_handles, 4);

        assert!(matches!(
            frame.ops.last(),
            Some(DrawOp::PreviewCurve { .. })
        ));
    }

    #[test]
    fn hovered_handle_outranks_hovered_node_for_handle_display() {
        let (g, a, b) = linked_pair();
        let view = ViewState {
            hover: Hover {
                node: Some(b),
                handle: Some((a, Handle::South)),
            },
            ..Default::default()
        };
        let frame = build_frame(&g, &view, &HeuristicMeasurer::default());

        // Handles belong to the handle-hovered node, with one emphasized.
        let expected = Handle::South.position(g.node(a).unwrap());
        assert!(frame.ops.iter().any(|op| matches!(
            op,
            DrawOp::HandleDot {
                emphasis: HandleEmphasis::Hovered,
                center,
            } if center.x == expected.x as f64 && center.y == expected.y as f64
        )));
        let handles = frame
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::HandleDot { .. }))
            .count();
        assert_eq!(handles, 4);
    }

    #[test]
    fn selected_node_shows_handles_when_nothing_is_hovered() {
        let (g, a, _) = linked_pair();
        let view = ViewState {
            selection: Selection::Node(a),
            ..Default::default()
        };
        let frame = build_frame(&g, &view, &HeuristicMeasurer::default());
        let handles = frame
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::HandleDot { .. }))
            .count();
        assert_eq!(handles, 4);
    }

    #[test]
    fn title_is_limited_to_two_lines() {
        let mut g = Graph::new();
        g.add_node_at(
            GPoint::new(100.0, 100.0),
            "a very long title that cannot possibly fit on two short lines of text",
            "",
            Shape::Rounded,
        );
        let frame = build_frame(&g, &ViewState::default(), &HeuristicMeasurer::default());
        let title_lines = frame
            .ops
            .iter()
            .filter(|op| {
                matches!(
                    op,
                    DrawOp::TextLine {
                        role: TextRole::Title,
                        ..
                    }
                )
            })
            .count();
        assert_eq!(title_lines, 2);
    }

    #[test]
    fn dangling_edges_do_not_paint() {
        let (mut g, _, b) = linked_pair();
        g.remove_node(b);
        g.add_edge(NodeId::new(50), NodeId::new(51));
        let frame = build_frame(&g, &ViewState::default(), &HeuristicMeasurer::default());
        assert!(
            !frame
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::EdgeCurve { .. }))
        );
    }
}
