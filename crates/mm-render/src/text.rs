//! Text measurement and wrapping.
//!
//! Wrapping is greedy word wrap with a hard line budget: once the last
//! allowed line is reached, the remaining words are joined and truncated
//! character by character until they fit with an ellipsis suffix. Width
//! measurement goes through [`TextMeasurer`] so interactive frontends can
//! plug in a real canvas metric while headless callers use the
//! deterministic heuristic.

use smallvec::SmallVec;

/// The font stack node text is drawn with.
pub const FONT_STACK: &str = "system-ui,Segoe UI,Roboto";

/// Font parameters for node text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub px: f32,
    pub bold: bool,
}

impl FontSpec {
    pub const TITLE: FontSpec = FontSpec { px: 14.0, bold: true };
    pub const BODY: FontSpec = FontSpec { px: 13.0, bold: false };

    /// CSS shorthand, as fed to a Canvas2D context.
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px {FONT_STACK}", self.px)
        } else {
            format!("{}px {FONT_STACK}", self.px)
        }
    }
}

/// Advance-width oracle for a run of text.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, font: FontSpec) -> f32;
}

/// Deterministic measurer for headless callers: a flat per-character width
/// model. Close enough for wrapping decisions; interactive frontends
/// supply a canvas-backed measurer instead.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicMeasurer {
    pub char_width_factor: f32,
}

impl Default for HeuristicMeasurer {
    fn default() -> Self {
        Self {
            char_width_factor: 0.6,
        }
    }
}

impl TextMeasurer for HeuristicMeasurer {
    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        text.chars().count() as f32 * font.px * self.char_width_factor
    }
}

/// Greedy word wrap limited to `max_lines` lines.
///
/// Words never break mid-word while lines remain; the first word of a line
/// is kept even when it overflows. When the budget runs out, the remainder
/// is ellipsis-truncated to fit `max_width`.
pub fn wrap_text_limited(
    measurer: &dyn TextMeasurer,
    font: FontSpec,
    text: &str,
    max_width: f32,
    max_lines: usize,
) -> SmallVec<[String; 4]> {
    let mut out: SmallVec<[String; 4]> = SmallVec::new();
    if max_lines == 0 {
        return out;
    }

    let words: Vec<&str> = text.split(' ').collect();
    let mut line = String::new();
    for (n, word) in words.iter().enumerate() {
        let test = format!("{line}{word} ");
        if measurer.text_width(&test, font) > max_width && n > 0 {
            out.push(line.trim().to_string());
            line = format!("{word} ");
            if out.len() >= max_lines - 1 {
                let mut truncated = words[n..].join(" ");
                while !truncated.is_empty()
                    && measurer.text_width(&format!("{truncated}..."), font) > max_width
                {
                    truncated.pop();
                }
                out.push(format!("{truncated}..."));
                return out;
            }
        } else {
            line = test;
        }
    }
    if out.len() < max_lines {
        out.push(line.trim().to_string());
    }
    out
}
