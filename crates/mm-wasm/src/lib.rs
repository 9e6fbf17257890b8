//! WASM bridge: exposes the MindMesh editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The host page owns the
//! `<canvas>`: it forwards pointer, keyboard, and drag-and-drop events
//! through the handlers below (each returns whether a repaint is due) and
//! calls [`MindmapCanvas::render`] with the DPR-scaled 2D context.

mod render2d;

use mm_editor::{Editor, InputEvent, Modifiers};
use mm_render::frame::{ViewState, build_frame};
use render2d::CanvasMeasurer;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller. All interaction from the host
/// page goes through this struct.
#[wasm_bindgen]
pub struct MindmapCanvas {
    editor: Editor,
    width: f64,
    height: f64,
    on_close: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl MindmapCanvas {
    /// Create a controller with the starter document.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            editor: Editor::with_sample(),
            width,
            height,
            on_close: None,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Repaint the live view.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let measurer = CanvasMeasurer::new(ctx);
        let frame = build_frame(self.editor.graph(), &self.editor.view_state(), &measurer);
        render2d::render_frame(ctx, &frame, self.width, self.height);
    }

    /// Flatten the document onto an offscreen context for image export:
    /// the idle view only (no selection, handles, or preview). The host
    /// rasterizes via `canvas.toDataURL`.
    pub fn render_export(&self, ctx: &CanvasRenderingContext2d) {
        let measurer = CanvasMeasurer::new(ctx);
        let frame = build_frame(self.editor.graph(), &ViewState::default(), &measurer);
        render2d::render_frame(ctx, &frame, self.width, self.height);
    }

    // ─── Pointer / keyboard ──────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f32, y: f32, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.editor.handle(&InputEvent::PointerDown {
            x,
            y,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.editor.handle(&InputEvent::PointerMove { x, y })
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> bool {
        self.editor.handle(&InputEvent::PointerUp { x, y })
    }

    /// Mouse-leave is a release: drags must never stick.
    pub fn pointer_leave(&mut self, x: f32, y: f32) -> bool {
        self.editor.handle(&InputEvent::PointerLeave { x, y })
    }

    pub fn double_click(&mut self, x: f32, y: f32) -> bool {
        self.editor.handle(&InputEvent::DoubleClick { x, y })
    }

    /// Drop from the shape palette; `shape` is the drag payload, if any.
    pub fn palette_drop(&mut self, x: f32, y: f32, shape: Option<String>) -> bool {
        self.editor.handle(&InputEvent::PaletteDrop {
            x,
            y,
            shape: shape.as_deref().and_then(|s| s.parse().ok()),
        })
    }

    pub fn key_down(&mut self, key: &str, shift: bool, ctrl: bool, alt: bool, meta: bool) -> bool {
        self.editor.handle(&InputEvent::Key {
            key: key.to_string(),
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    // ─── Palette ─────────────────────────────────────────────────────────

    pub fn set_active_shape(&mut self, shape: &str) {
        match shape.parse() {
            Ok(s) => self.editor.set_active_shape(s),
            Err(()) => log::warn!("unknown palette shape: {shape}"),
        }
    }

    pub fn active_shape(&self) -> String {
        self.editor.active_shape().as_str().to_string()
    }

    // ─── Sidebar ─────────────────────────────────────────────────────────

    pub fn selected_node_id(&self) -> Option<f64> {
        self.editor.selection().node().map(|id| id.get() as f64)
    }

    pub fn selected_title(&self) -> Option<String> {
        self.editor.selected_node().map(|n| n.title.clone())
    }

    pub fn selected_description(&self) -> Option<String> {
        self.editor.selected_node().map(|n| n.description.clone())
    }

    /// `"fromId -> toId"` for the connection panel, when an edge is
    /// selected.
    pub fn selected_edge_label(&self) -> Option<String> {
        self.editor
            .selected_edge()
            .map(|e| format!("{} -> {}", e.from_id.get(), e.to_id.get()))
    }

    pub fn selected_has_connections(&self) -> bool {
        self.editor.selected_has_connections()
    }

    pub fn set_title(&mut self, title: &str) -> bool {
        self.editor.set_title(title)
    }

    pub fn set_description(&mut self, description: &str) -> bool {
        self.editor.set_description(description)
    }

    pub fn select_node(&mut self, id: f64) -> bool {
        self.editor.select_node_by_id(mm_core::NodeId::new(id as u64))
    }

    pub fn deselect(&mut self) {
        self.editor.deselect();
    }

    /// `[{ "id", "title" }]` for the sidebar node list.
    pub fn nodes_json(&self) -> String {
        let list: Vec<serde_json::Value> = self
            .editor
            .graph()
            .nodes()
            .iter()
            .map(|n| serde_json::json!({ "id": n.id.get(), "title": n.title }))
            .collect();
        serde_json::Value::Array(list).to_string()
    }

    // ─── Document operations ─────────────────────────────────────────────

    pub fn delete_selected(&mut self) -> bool {
        self.editor.delete_selected()
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Irreversible full reset. The host asks the user for confirmation
    /// before calling this.
    pub fn clear_all(&mut self) {
        self.editor.clear_all();
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn save_json(&self) -> Option<String> {
        match self.editor.save_json() {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("snapshot save failed: {e}");
                None
            }
        }
    }

    /// Returns false on malformed input; the current document is left
    /// untouched and the host shows the alert.
    pub fn load_json(&mut self, json: &str) -> bool {
        match self.editor.load_json(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("snapshot load failed: {e}");
                false
            }
        }
    }

    /// Vector export of the idle view, for hosts that prefer SVG over a
    /// raster snapshot.
    pub fn export_svg(&self) -> String {
        mm_render::render_svg(
            self.editor.graph(),
            &mm_render::HeuristicMeasurer::default(),
            &mm_render::ExportOptions {
                width: Some(self.width as f32),
                height: Some(self.height as f32),
                ..Default::default()
            },
        )
    }

    // ─── Embedding ───────────────────────────────────────────────────────

    /// Optional close callback for embedded use.
    pub fn set_on_close(&mut self, callback: js_sys::Function) {
        self.on_close = Some(callback);
    }

    pub fn request_close(&self) {
        if let Some(f) = &self.on_close {
            let _ = f.call0(&JsValue::NULL);
        }
    }
}

impl Default for MindmapCanvas {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
