//! Canvas-space geometry: points, connection handles, pick primitives.
//!
//! Handles always sit on the bounding box (the four edge midpoints)
//! regardless of the node's visual shape, and hit tests work against the
//! bounding box too. Pick math is shared by handle and edge lookup.

use crate::model::Node;
use serde::{Deserialize, Serialize};

/// Radius of a drawn connection handle, in canvas px.
pub const HANDLE_RADIUS: f32 = 8.0;

/// Extra slop added on top of [`HANDLE_RADIUS`] when picking handles and
/// edges, so near-misses still register.
pub const PICK_TOLERANCE: f32 = 6.0;

/// Squared pick radius shared by handle and edge hit tests.
pub fn pick_radius_sq() -> f32 {
    let r = HANDLE_RADIUS + PICK_TOLERANCE;
    r * r
}

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn dist_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// One of the four fixed pick points on a node's bounding box.
///
/// Indices are stable (0 = North .. 3 = West) and match the order of
/// [`Handle::ALL`] and [`handle_positions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    North,
    East,
    South,
    West,
}

impl Handle {
    pub const ALL: [Handle; 4] = [Handle::North, Handle::East, Handle::South, Handle::West];

    pub fn index(self) -> usize {
        match self {
            Handle::North => 0,
            Handle::East => 1,
            Handle::South => 2,
            Handle::West => 3,
        }
    }

    /// Handle position on the node: the bounding-box edge midpoint,
    /// independent of shape.
    pub fn position(self, node: &Node) -> Point {
        let cx = node.x + node.w / 2.0;
        let cy = node.y + node.h / 2.0;
        match self {
            Handle::North => Point::new(cx, node.y),
            Handle::East => Point::new(node.x + node.w, cy),
            Handle::South => Point::new(cx, node.y + node.h),
            Handle::West => Point::new(node.x, cy),
        }
    }
}

/// All four handle positions of a node, in [`Handle::ALL`] order.
pub fn handle_positions(node: &Node) -> [Point; 4] {
    Handle::ALL.map(|h| h.position(node))
}

/// Squared distance from `p` to the segment `a..b`, clamped to the segment
/// ends. Degenerate segments (a == b) fall back to point distance.
pub fn dist_sq_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let c2 = vx * vx + vy * vy;
    let t = if c2 == 0.0 {
        0.0
    } else {
        ((vx * wx + vy * wy) / c2).clamp(0.0, 1.0)
    };
    let proj = Point::new(a.x + vx * t, a.y + vy * t);
    p.dist_sq(proj)
}
