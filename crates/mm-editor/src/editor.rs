//! The interaction state machine.
//!
//! Pointer events come in; graph mutations, selection changes, and redraw
//! requests come out. Drag state is an explicit tagged union (`Idle`,
//! `DraggingNode`, `DraggingConnection`) passed through the handlers, so
//! illegal combinations are unrepresentable.
//!
//! Pointer-down precedence is deliberate policy: handles win over nodes,
//! nodes over edges, edges over empty space.

use crate::commands::{Action, ActionStack};
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use mm_core::geometry::{Handle, Point};
use mm_core::snapshot::SnapshotError;
use mm_core::{Edge, Graph, Hover, Node, NodeId, Selection, Shape};
use mm_render::frame::{ConnectionDrag, ViewState};
use mm_render::hit;

/// Exclusive pointer interaction states.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Moving a node. The grab offset keeps the cursor anchored to the
    /// spot where the node was grabbed.
    DraggingNode {
        id: NodeId,
        grab_dx: f32,
        grab_dy: f32,
    },
    /// Dragging a new connection out of a handle; `(x, y)` tracks the
    /// pointer for the live preview curve.
    DraggingConnection {
        from_id: NodeId,
        from_handle: Handle,
        x: f32,
        y: f32,
    },
}

/// The editing session: graph, interaction state, palette, undo log.
#[derive(Debug, Default)]
pub struct Editor {
    graph: Graph,
    drag: DragState,
    selection: Selection,
    hover: Hover,
    active_shape: Shape,
    actions: ActionStack,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session seeded with the two starter nodes.
    pub fn with_sample() -> Self {
        let mut ed = Self::new();
        ed.graph.add_node_at(
            Point::new(200.0, 120.0),
            "Central Idea",
            "A short description",
            Shape::Rounded,
        );
        let b = ed.graph.add_node_at(
            Point::new(420.0, 260.0),
            "First Branch",
            "Details about branch",
            Shape::Rounded,
        );
        ed.select_node(Some(b));
        ed
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn hover(&self) -> Hover {
        self.hover
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn active_shape(&self) -> Shape {
        self.active_shape
    }

    pub fn set_active_shape(&mut self, shape: Shape) {
        self.active_shape = shape;
    }

    pub fn can_undo(&self) -> bool {
        self.actions.can_undo()
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.node().and_then(|id| self.graph.node(id))
    }

    pub fn selected_edge(&self) -> Option<Edge> {
        self.selection.edge()
    }

    /// Whether the selected node has any connections. Drives sidebar
    /// affordances in embedding shells.
    pub fn selected_has_connections(&self) -> bool {
        self.selection
            .node()
            .is_some_and(|id| self.graph.has_edges_touching(id))
    }

    /// The view the renderer should draw right now.
    pub fn view_state(&self) -> ViewState {
        let connection = match self.drag {
            DragState::DraggingConnection {
                from_id,
                from_handle,
                x,
                y,
            } => Some(ConnectionDrag {
                from_id,
                from_handle,
                pointer: Point::new(x, y),
            }),
            _ => None,
        };
        ViewState {
            selection: self.selection,
            hover: self.hover,
            connection,
        }
    }

    // ─── Event dispatch ──────────────────────────────────────────────────

    /// Feed one input event through the state machine. Returns true when
    /// the canvas needs a repaint.
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(Point::new(*x, *y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            // Leaving the canvas mid-gesture counts as a release.
            InputEvent::PointerUp { x, y } | InputEvent::PointerLeave { x, y } => {
                self.pointer_up(Point::new(*x, *y))
            }
            InputEvent::DoubleClick { x, y } => self.add_node(Point::new(*x, *y), self.active_shape),
            InputEvent::PaletteDrop { x, y, shape } => {
                self.add_node(Point::new(*x, *y), shape.unwrap_or(self.active_shape))
            }
            InputEvent::Key { key, modifiers } => self.key(key, *modifiers),
        }
    }

    fn pointer_down(&mut self, p: Point) -> bool {
        // Handles always win: clicking one starts a connection.
        if let Some((id, handle)) = hit::hit_handle(&self.graph, p) {
            self.drag = DragState::DraggingConnection {
                from_id: id,
                from_handle: handle,
                x: p.x,
                y: p.y,
            };
            self.select_node(Some(id));
            return true;
        }

        // Nodes next: select and start moving.
        if let Some(n) = hit::hit_node(&self.graph, p) {
            let (id, nx, ny) = (n.id, n.x, n.y);
            self.drag = DragState::DraggingNode {
                id,
                grab_dx: p.x - nx,
                grab_dy: p.y - ny,
            };
            self.select_node(Some(id));
            return true;
        }

        // Then edges, only when the click is outside every node.
        if let Some((edge, _)) = hit::hit_edge(&self.graph, p) {
            self.selection = Selection::Edge(edge);
            return true;
        }

        // Empty space clears everything.
        self.select_node(None);
        true
    }

    fn pointer_move(&mut self, p: Point) -> bool {
        match &mut self.drag {
            DragState::DraggingConnection { x, y, .. } => {
                // Only the preview point moves; the graph stays untouched
                // until release.
                *x = p.x;
                *y = p.y;
                true
            }
            DragState::DraggingNode {
                id,
                grab_dx,
                grab_dy,
            } => {
                let (id, dx, dy) = (*id, *grab_dx, *grab_dy);
                self.graph.set_origin(id, p.x - dx, p.y - dy);
                true
            }
            DragState::Idle => self.update_hover(p),
        }
    }

    fn pointer_up(&mut self, p: Point) -> bool {
        match self.drag {
            DragState::DraggingConnection { from_id, .. } => {
                self.drag = DragState::Idle;
                if let Some((target, _)) = hit::hit_handle(&self.graph, p)
                    && target != from_id
                {
                    let edge = self.graph.add_edge(from_id, target);
                    self.actions.push(Action::AddEdge(edge));
                    log::debug!("connected {from_id} -> {target}");
                }
                // Any other release (empty space, the source node itself)
                // silently discards the attempt.
                true
            }
            DragState::DraggingNode { .. } => {
                // Position was updated live during the drag.
                self.drag = DragState::Idle;
                false
            }
            DragState::Idle => false,
        }
    }

    /// Hover resolution with change detection: handle hits outrank plain
    /// node hits, and an unchanged hover does not request a repaint.
    fn update_hover(&mut self, p: Point) -> bool {
        let new = if let Some((id, handle)) = hit::hit_handle(&self.graph, p) {
            Hover {
                node: Some(id),
                handle: Some((id, handle)),
            }
        } else {
            Hover {
                node: hit::hit_node(&self.graph, p).map(|n| n.id),
                handle: None,
            }
        };
        if self.hover != new {
            self.hover = new;
            true
        } else {
            false
        }
    }

    fn key(&mut self, key: &str, modifiers: Modifiers) -> bool {
        match ShortcutMap::resolve(key, modifiers) {
            Some(ShortcutAction::Undo) => self.undo(),
            None => false,
        }
    }

    // ─── Model operations ────────────────────────────────────────────────

    fn add_node(&mut self, center: Point, shape: Shape) -> bool {
        let id = self.graph.add_node_at(center, "New Node", "", shape);
        self.select_node(Some(id));
        true
    }

    fn select_node(&mut self, id: Option<NodeId>) {
        self.selection = match id {
            Some(id) => Selection::Node(id),
            None => Selection::None,
        };
    }

    /// Retitle the selected node. Mutating with no node selected is a
    /// no-op, not an error.
    pub fn set_title(&mut self, title: &str) -> bool {
        match self.selection.node() {
            Some(id) => self.graph.set_title(id, title),
            None => false,
        }
    }

    pub fn set_description(&mut self, description: &str) -> bool {
        match self.selection.node() {
            Some(id) => self.graph.set_description(id, description),
            None => false,
        }
    }

    /// Select a node from the sidebar list.
    pub fn select_node_by_id(&mut self, id: NodeId) -> bool {
        if self.graph.node(id).is_some() {
            self.select_node(Some(id));
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selection = Selection::None;
    }

    /// Delete the selected node (cascading its edges) or the selected
    /// edge (recording an undoable action). No selection → no-op.
    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Selection::Edge(edge) => {
                if self.graph.remove_edges_matching(edge) > 0 {
                    self.actions.push(Action::RemoveEdges(vec![edge]));
                }
                self.selection = Selection::None;
                true
            }
            Selection::Node(id) => {
                // Node deletion is outside the undo log's scope; the
                // cascade is immediate and final.
                self.graph.remove_node(id);
                self.selection = Selection::None;
                self.hover.clear();
                true
            }
            Selection::None => false,
        }
    }

    /// Pop and revert the most recent edge action. Empty stack → no-op.
    pub fn undo(&mut self) -> bool {
        self.actions.undo(&mut self.graph)
    }

    /// Reset the whole session. Not undoable; the embedding shell asks
    /// the user for confirmation before calling this.
    pub fn clear_all(&mut self) {
        self.graph.clear();
        self.selection = Selection::None;
        self.hover.clear();
        self.drag = DragState::Idle;
        self.actions.clear();
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save_json(&self) -> Result<String, SnapshotError> {
        mm_core::save_json(&self.graph)
    }

    /// Replace the document from snapshot JSON. On parse failure the
    /// current graph is left untouched; on success the selection is
    /// cleared and any in-flight gesture is dropped.
    pub fn load_json(&mut self, json: &str) -> Result<(), SnapshotError> {
        let graph = mm_core::load_json(json)?;
        self.graph = graph;
        self.selection = Selection::None;
        self.hover.clear();
        self.drag = DragState::Idle;
        Ok(())
    }
}
