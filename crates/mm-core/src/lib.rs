pub mod geometry;
pub mod id;
pub mod model;
pub mod snapshot;

pub use geometry::{HANDLE_RADIUS, Handle, PICK_TOLERANCE, Point};
pub use id::NodeId;
pub use model::{Edge, Graph, Hover, Node, Selection, Shape};
pub use snapshot::{Snapshot, SnapshotError, load_json, save_json};
