//! Integration tests: the action stack across real editing gestures.

use mm_core::geometry::Handle;
use mm_core::{Edge, NodeId, Selection};
use mm_editor::{Editor, InputEvent, Modifiers};
use pretty_assertions::assert_eq;

const N1: NodeId = NodeId::new(1);
const N2: NodeId = NodeId::new(2);

fn connect(ed: &mut Editor, from: NodeId, from_handle: Handle, to: NodeId, to_handle: Handle) {
    let a = from_handle.position(ed.graph().node(from).unwrap());
    let b = to_handle.position(ed.graph().node(to).unwrap());
    ed.handle(&InputEvent::PointerDown {
        x: a.x,
        y: a.y,
        modifiers: Modifiers::NONE,
    });
    ed.handle(&InputEvent::PointerMove { x: b.x, y: b.y });
    ed.handle(&InputEvent::PointerUp { x: b.x, y: b.y });
}

#[test]
fn connect_then_undo_roundtrip() {
    // The starter document: "Central Idea" and "First Branch".
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);

    assert_eq!(ed.graph().edges(), &[Edge::new(N1, N2)]);
    assert!(ed.can_undo());

    assert!(ed.undo());
    assert_eq!(ed.graph().edges(), &[] as &[Edge]);
    assert!(!ed.can_undo());

    // A second undo has nothing to pop.
    assert!(!ed.undo());
}

#[test]
fn undo_removes_only_the_most_recent_edge() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    connect(&mut ed, N2, Handle::North, N1, Handle::South);
    assert_eq!(ed.graph().edges().len(), 2);

    ed.undo();
    assert_eq!(ed.graph().edges(), &[Edge::new(N1, N2)]);
}

#[test]
fn deleting_an_edge_is_undoable() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);

    // Select the edge via its chord midpoint and delete it.
    ed.handle(&InputEvent::PointerDown {
        x: 310.0,
        y: 190.0,
        modifiers: Modifiers::NONE,
    });
    assert_eq!(ed.selection(), Selection::Edge(Edge::new(N1, N2)));
    assert!(ed.delete_selected());
    assert!(ed.graph().edges().is_empty());
    assert!(ed.selection().is_none());

    // Undo restores the removed edge exactly once.
    assert!(ed.undo());
    assert_eq!(ed.graph().edges(), &[Edge::new(N1, N2)]);
}

#[test]
fn node_deletion_is_not_undoable() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    ed.undo();

    ed.select_node_by_id(N1);
    assert!(ed.delete_selected());
    assert_eq!(ed.graph().nodes().len(), 1);

    // Nothing was recorded for the node removal.
    assert!(!ed.can_undo());
    assert!(!ed.undo());
}

#[test]
fn node_deletion_cascades_edges_immediately() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    connect(&mut ed, N2, Handle::East, N1, Handle::West);

    ed.select_node_by_id(N2);
    ed.delete_selected();

    assert!(ed.graph().edges().is_empty());
    assert!(!ed.graph().has_edges_touching(N2));
}

#[test]
fn keyboard_undo_uses_the_platform_combo() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);

    let ctrl_z = InputEvent::Key {
        key: "z".to_string(),
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        },
    };
    assert!(ed.handle(&ctrl_z));
    assert!(ed.graph().edges().is_empty());

    // ⌘Z works the same way.
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    let cmd_z = InputEvent::Key {
        key: "z".to_string(),
        modifiers: Modifiers {
            meta: true,
            ..Modifiers::NONE
        },
    };
    assert!(ed.handle(&cmd_z));
    assert!(ed.graph().edges().is_empty());

    // Plain z is unbound and reports no repaint.
    let plain = InputEvent::Key {
        key: "z".to_string(),
        modifiers: Modifiers::NONE,
    };
    assert!(!ed.handle(&plain));
}

#[test]
fn duplicate_edges_fall_together_on_undo() {
    // Two identical gestures produce two identical edges; undoing the
    // second removes both, matching the pair-based removal semantics.
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    assert_eq!(ed.graph().edges().len(), 2);

    ed.undo();
    assert!(ed.graph().edges().is_empty());
    assert!(ed.can_undo(), "the first action is still on the stack");
}

#[test]
fn save_load_preserves_the_scenario_document() {
    let mut ed = Editor::with_sample();
    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    ed.select_node_by_id(N1);
    ed.set_title("Renamed Root");
    ed.set_description("still the root");

    let json = ed.save_json().unwrap();
    let mut other = Editor::new();
    other.load_json(&json).unwrap();

    assert_eq!(other.graph().nodes(), ed.graph().nodes());
    assert_eq!(other.graph().edges(), ed.graph().edges());
    assert_eq!(other.graph().next_id(), ed.graph().next_id());
    assert!(other.selection().is_none());
}

#[test]
fn scenario_two_nodes_connect_and_undo() {
    // The canonical walkthrough: two starter nodes, drag from the right
    // handle of the first to the left handle of the second, then undo.
    let mut ed = Editor::with_sample();
    assert_eq!(ed.graph().nodes().len(), 2);
    assert_eq!(ed.graph().nodes()[0].title, "Central Idea");
    assert_eq!(ed.graph().nodes()[1].title, "First Branch");

    connect(&mut ed, N1, Handle::East, N2, Handle::West);
    assert_eq!(
        ed.graph().edges(),
        &[Edge::new(NodeId::new(1), NodeId::new(2))]
    );
    assert!(ed.can_undo());

    ed.undo();
    assert!(ed.graph().edges().is_empty());
    assert!(!ed.can_undo());
}
