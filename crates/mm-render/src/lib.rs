pub mod export;
pub mod frame;
pub mod hit;
pub mod text;

pub use export::{ExportError, ExportOptions, export_png, render_svg};
pub use frame::{ConnectionDrag, DrawOp, Frame, HandleEmphasis, TextRole, ViewState, build_frame};
pub use text::{FontSpec, HeuristicMeasurer, TextMeasurer, wrap_text_limited};

// Re-export the kurbo geometry used in draw ops so executors don't need a
// direct dependency.
pub use kurbo::{Point, Rect};
