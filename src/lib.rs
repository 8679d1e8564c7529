//! Metro Walk - a walk through a curving metro tunnel
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (path geometry, movement, progress, narration)
//! - `app`: Warning / menu / playing state machine around the simulation
//! - `renderer`: Collaborator contracts for drawing the tunnel and subtitles
//! - `audio`: Footstep selection for the audio collaborator
//! - `settings`: Persisted player options
//! - `ui`: Menu widget math

pub mod app;
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use app::{App, AppState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Length of the walkable tunnel (meters)
    pub const MAX_DISTANCE: f32 = 2140.0;
    /// Forward-distance soft bounds extend this far past either tunnel end
    pub const DISTANCE_MARGIN: f32 = 10.0;

    /// Largest frame delta fed into movement and head bob (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.03;

    /// Walls: lateral moves must stay inside the soft bound,
    /// forward moves inside the hard bound. The gap is the anti-jitter band.
    pub const WALL_SOFT_BOUND: f64 = 1.5;
    pub const WALL_HARD_BOUND: f64 = 1.8;

    /// Movement speeds (meters per second)
    pub const WALK_SPEED: f32 = 2.0;
    pub const RUN_SPEED: f32 = 4.0;
    /// Turn-key rotation speed (degrees per second)
    pub const TURN_SPEED: f32 = 120.0;
    /// Degrees of rotation per pixel of mouse movement at mouse speed 1.0
    pub const MOUSE_DEGREES_PER_PIXEL: f32 = 0.1;
    pub const MAX_PITCH: f32 = 89.0;

    /// Camera heights
    pub const STAND_HEIGHT: f32 = 1.75;
    pub const CROUCH_HEIGHT: f32 = 0.9;
    pub const CROUCH_LERP_RATE: f32 = 10.0;

    /// Head bob
    pub const BOB_AMPLITUDE: f32 = 0.05;
    /// Footsteps per second of walking time
    pub const STEP_CADENCE: f32 = 1.8;
    /// Walking time runs faster while running
    pub const RUN_CADENCE_SCALE: f32 = 1.6;

    /// Distance between lighting stages
    pub const LIGHTS_SPACING: f32 = 9.0;

    /// Distance covered by each narration stage
    pub const COMMENT_LENGTH: f32 = 160.0;
    /// Narration starts this far into the tunnel
    pub const COMMENT_OFFSET: f32 = 6.0;
    /// Subtitle lines shown together
    pub const LINES_PER_WINDOW: usize = 2;
    /// Meters walked per character of subtitle text
    pub const METERS_PER_CHARACTER: f32 = 0.12;

    /// Backtracking warning threshold (meters behind furthest point)
    pub const BACKTRACK_THRESHOLD: f32 = 10.0;
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Linear interpolation, `t` is not clamped
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-10.0) - 350.0).abs() < 1e-4);
        assert!(wrap_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
        assert_eq!(lerp(1.75, 0.9, 0.0), 1.75);
    }
}
