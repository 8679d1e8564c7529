//! Rendering contracts
//!
//! The tunnel itself is an SDF raymarched in a fragment shader. Shader
//! compilation, uniform upload and text drawing belong to the platform layer;
//! this module defines what it is handed each frame.

pub mod uniforms;
pub mod viewport;

pub use uniforms::FrameUniforms;
pub use viewport::{render_dest_rect, render_source_rect, virtual_resolution};

use crate::sim::{Script, SubtitleCue};
use crate::ui::Widget;

/// Draws one tunnel frame from the shader inputs
pub trait TunnelRenderer {
    fn render_tunnel(&mut self, uniforms: &FrameUniforms);
}

/// Draws on-screen text and menu widgets
pub trait SubtitleSink {
    /// Show subtitle lines (already resolved to text)
    fn show_subtitle(&mut self, lines: &[&str]);
    /// Show or hide the "wrong way" warning
    fn show_backtracking_warning(&mut self, visible: bool);
    /// Show the photosensitivity warning screen
    fn show_warning(&mut self, remaining_seconds: f32);
    /// Draw the main menu
    fn show_menu(&mut self, widgets: &[Widget]);
}

/// Resolve a subtitle cue to its lines of text
pub fn subtitle_lines<'a>(script: &'a Script, cue: &SubtitleCue) -> Vec<&'a str> {
    cue.lines
        .iter()
        .filter_map(|&line| script.line(cue.stage as i32, line))
        .collect()
}
