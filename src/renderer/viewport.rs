//! Letterboxing the low-resolution game view into the window
//!
//! The tunnel is rendered into a fixed 2:1 virtual screen. Narrower windows
//! crop the sides of the virtual screen; wider windows get black bars.

use crate::ui::Rect;

/// Height of the virtual screen in pixels
pub const VIRTUAL_SCREEN_HEIGHT: f32 = 180.0;
/// Virtual screen width / height
pub const VIRTUAL_ASPECT: f32 = 2.0;

/// Size of the render target the tunnel is drawn into
pub fn virtual_resolution() -> [f32; 2] {
    [VIRTUAL_SCREEN_HEIGHT * VIRTUAL_ASPECT, VIRTUAL_SCREEN_HEIGHT]
}

/// Part of the virtual screen that is visible in a window of this size
pub fn render_source_rect(screen_width: f32, screen_height: f32) -> Rect {
    let ratio = screen_width / screen_height;
    if ratio < VIRTUAL_ASPECT {
        let margin = VIRTUAL_SCREEN_HEIGHT * (VIRTUAL_ASPECT - ratio) / 2.0;
        Rect::new(margin, 0.0, VIRTUAL_SCREEN_HEIGHT * ratio, VIRTUAL_SCREEN_HEIGHT)
    } else {
        let [w, h] = virtual_resolution();
        Rect::new(0.0, 0.0, w, h)
    }
}

/// Where in the window the visible part is drawn
pub fn render_dest_rect(screen_width: f32, screen_height: f32) -> Rect {
    let ratio = screen_width / screen_height;
    if ratio < VIRTUAL_ASPECT {
        Rect::new(0.0, 0.0, screen_width, screen_height)
    } else {
        let width = screen_height * VIRTUAL_ASPECT;
        Rect::new((screen_width - width) / 2.0, 0.0, width, screen_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrow_window_crops_sides() {
        // 16:9
        let src = render_source_rect(1600.0, 900.0);
        let ratio = 1600.0 / 900.0;
        assert!((src.size.x - 180.0 * ratio).abs() < 1e-3);
        assert!((src.pos.x * 2.0 + src.size.x - 360.0).abs() < 1e-3);
        assert_eq!(render_dest_rect(1600.0, 900.0), Rect::new(0.0, 0.0, 1600.0, 900.0));
    }

    #[test]
    fn test_wide_window_gets_bars() {
        let src = render_source_rect(3000.0, 1000.0);
        assert_eq!(src, Rect::new(0.0, 0.0, 360.0, 180.0));
        let dst = render_dest_rect(3000.0, 1000.0);
        assert_eq!(dst, Rect::new(500.0, 0.0, 2000.0, 1000.0));
    }
}
