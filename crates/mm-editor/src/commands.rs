//! The single-direction action stack.
//!
//! The undo log covers edge creation and removal only. It is append-only
//! during forward operations and pop-only during undo; there is no redo
//! stack.

use mm_core::{Edge, Graph};

/// A recorded, undoable operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// An edge was created; undo removes every edge matching the pair.
    AddEdge(Edge),
    /// Edges were removed; undo restores each one not already present.
    RemoveEdges(Vec<Edge>),
}

#[derive(Debug, Default)]
pub struct ActionStack {
    stack: Vec<Action>,
}

impl ActionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.stack.push(action);
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Pop the most recent action and apply its inverse to the graph.
    /// Returns false (and does nothing) on an empty stack.
    pub fn undo(&mut self, graph: &mut Graph) -> bool {
        let Some(action) = self.stack.pop() else {
            return false;
        };
        match action {
            Action::AddEdge(edge) => {
                graph.remove_edges_matching(edge);
            }
            Action::RemoveEdges(edges) => {
                for e in edges {
                    graph.insert_edge_if_absent(e);
                }
            }
        }
        true
    }
}
