//! JSON snapshots of the graph.
//!
//! The wire format is `{ "nodes": [...], "edges": [{"fromId", "toId"}],
//! "nextId": n }`. Saving is a direct dump of the model. Loading is
//! defensive: documents written by older versions stored the title under
//! `text` and predate the `shape` field, and hand-edited files may drop
//! fields entirely. Anything unparsable as JSON fails the whole load and
//! leaves the caller's graph untouched.

use crate::id::NodeId;
use crate::model::{Edge, Graph, Node, Shape};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized form of a full document.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    #[serde(rename = "nextId")]
    pub next_id: u64,
}

impl Snapshot {
    pub fn capture(graph: &Graph) -> Self {
        Snapshot {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
            next_id: graph.next_id(),
        }
    }
}

/// Serialize the graph as pretty-printed snapshot JSON.
pub fn save_json(graph: &Graph) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(&Snapshot::capture(graph))?)
}

/// Parse snapshot JSON into a fresh graph. The current graph is only
/// replaced by the caller once this succeeds, so malformed input never
/// destroys the working document.
pub fn load_json(json: &str) -> Result<Graph, SnapshotError> {
    let raw: RawSnapshot = serde_json::from_str(json)?;
    let nodes: Vec<Node> = raw
        .nodes
        .into_iter()
        .filter_map(|n| {
            let keep = n.into_node();
            if keep.is_none() {
                log::warn!("skipping snapshot node without an id");
            }
            keep
        })
        .collect();
    Ok(Graph::from_parts(nodes, raw.edges, raw.next_id))
}

// ─── Lenient input mirror ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(rename = "nextId")]
    next_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: Option<u64>,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    w: Option<f32>,
    h: Option<f32>,
    title: Option<String>,
    /// Legacy field; older documents stored the title here.
    text: Option<String>,
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_shape")]
    shape: Option<Shape>,
}

impl RawNode {
    fn into_node(self) -> Option<Node> {
        let id = NodeId::new(self.id?);
        let shape = self.shape.unwrap_or_default();
        let (dw, dh) = shape.default_size();
        Some(Node {
            id,
            x: self.x,
            y: self.y,
            w: self.w.filter(|w| *w > 0.0).unwrap_or(dw),
            h: self.h.filter(|h| *h > 0.0).unwrap_or(dh),
            title: self.title.or(self.text).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            shape,
        })
    }
}

/// Accept any JSON value in the `shape` slot; only known shape strings map
/// to a shape, everything else falls back to the default.
fn lenient_shape<'de, D>(deserializer: D) -> Result<Option<Shape>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    }))
}
