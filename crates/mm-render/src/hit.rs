//! Hit testing: point → node / handle / edge lookup.
//!
//! All lookups walk their collection in reverse so later-painted items win
//! ties (topmost first), matching the paint order of the frame builder.
//! Priority between the three kinds of target (handles over nodes over
//! edges) is the interaction layer's call, not ours.

use mm_core::geometry::{self, Handle, Point};
use mm_core::{Edge, Graph, Node, NodeId};

/// Topmost node whose bounding box contains `p`. Shape is ignored; the
/// box is the hit area even for ellipse and diamond nodes.
pub fn hit_node(graph: &Graph, p: Point) -> Option<&Node> {
    graph.nodes().iter().rev().find(|n| n.contains(p))
}

/// Topmost node with any handle within the pick radius of `p`.
pub fn hit_handle(graph: &Graph, p: Point) -> Option<(NodeId, Handle)> {
    let r2 = geometry::pick_radius_sq();
    for n in graph.nodes().iter().rev() {
        for h in Handle::ALL {
            if h.position(n).dist_sq(p) <= r2 {
                return Some((n.id, h));
            }
        }
    }
    None
}

/// Topmost edge within the pick radius of `p`, measured against the
/// straight chord between the endpoint centers, clamped to the segment.
///
/// The rendered curve's control point is the chord midpoint, so the curve
/// coincides with the chord and this test is exact for the current bow
/// heuristic; if the bow ever becomes real, sample the quadratic instead.
/// Edges whose endpoints no longer exist are skipped.
pub fn hit_edge(graph: &Graph, p: Point) -> Option<(Edge, usize)> {
    let r2 = geometry::pick_radius_sq();
    for (i, e) in graph.edges().iter().enumerate().rev() {
        let (Some(a), Some(b)) = (graph.node(e.from_id), graph.node(e.to_id)) else {
            continue;
        };
        if geometry::dist_sq_to_segment(p, a.center(), b.center()) <= r2 {
            return Some((*e, i));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_core::Shape;

    fn two_overlapping() -> (Graph, NodeId, NodeId) {
        let mut g = Graph::new();
        let a = g.add_node_at(Point::new(100.0, 100.0), "a", "", Shape::Rounded);
        let b = g.add_node_at(Point::new(140.0, 120.0), "b", "", Shape::Rounded);
        (g, a, b)
    }

    #[test]
    fn later_node_wins_overlap() {
        let (g, _a, b) = two_overlapping();
        // (120, 110) lies inside both boxes; the later-added node is on top.
        let hit = hit_node(&g, Point::new(120.0, 110.0)).unwrap();
        assert_eq!(hit.id, b);
    }

    #[test]
    fn node_hit_uses_bounding_box_for_all_shapes() {
        let mut g = Graph::new();
        let id = g.add_node_at(Point::new(100.0, 100.0), "d", "", Shape::Diamond);
        // A box corner is outside the diamond outline but inside the box.
        let n = g.node(id).unwrap();
        let corner = Point::new(n.x + 2.0, n.y + 2.0);
        assert_eq!(hit_node(&g, corner).unwrap().id, id);
    }

    #[test]
    fn handle_pick_includes_tolerance() {
        let mut g = Graph::new();
        let id = g.add_node_at(Point::new(100.0, 100.0), "a", "", Shape::Rounded);
        let east = Handle::East.position(g.node(id).unwrap());

        let near = Point::new(east.x + 13.0, east.y);
        assert_eq!(hit_handle(&g, near), Some((id, Handle::East)));

        let far = Point::new(east.x + 15.0, east.y);
        assert_eq!(hit_handle(&g, far), None);
    }

    #[test]
    fn edge_pick_measures_the_chord() {
        let mut g = Graph::new();
        let a = g.add_node_at(Point::new(0.0, 0.0), "a", "", Shape::Rounded);
        let b = g.add_node_at(Point::new(400.0, 0.0), "b", "", Shape::Rounded);
        let e = g.add_edge(a, b);

        let mid = g.node(a).unwrap().center().midpoint(g.node(b).unwrap().center());
        assert_eq!(hit_edge(&g, Point::new(mid.x, mid.y + 10.0)), Some((e, 0)));
        assert_eq!(hit_edge(&g, Point::new(mid.x, mid.y + 20.0)), None);
    }

    #[test]
    fn dangling_edges_are_skipped() {
        let mut g = Graph::new();
        let a = g.add_node_at(Point::new(0.0, 0.0), "a", "", Shape::Rounded);
        let b = g.add_node_at(Point::new(400.0, 0.0), "b", "", Shape::Rounded);
        g.add_edge(a, b);
        let mid = g.node(a).unwrap().center().midpoint(g.node(b).unwrap().center());

        g.remove_node(b);
        // Cascade removed the edge; even a synthetic dangling edge must not hit.
        g.add_edge(a, NodeId::new(99));
        assert_eq!(hit_edge(&g, mid), None);
    }

    #[test]
    fn later_edge_wins_overlap() {
        let mut g = Graph::new();
        let a = g.add_node_at(Point::new(0.0, 0.0), "a", "", Shape::Rounded);
        let b = g.add_node_at(Point::new(400.0, 0.0), "b", "", Shape::Rounded);
        g.add_edge(a, b);
        g.add_edge(a, b);
        let mid = g.node(a).unwrap().center().midpoint(g.node(b).unwrap().center());
        let (_, index) = hit_edge(&g, mid).unwrap();
        assert_eq!(index, 1);
    }
}
