//! Per-frame simulation tick
//!
//! One call per display frame: input → movement → progress → narration and
//! backtracking. The result is what the render, subtitle and audio
//! collaborators consume for this frame.

use glam::Vec2;

use super::movement::{
    WallBounds, desired_displacement, foot_surface, integrate_bob, resolve_movement,
};
use super::narration::{NarrationTiming, SubtitleCue};
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::{lerp, wrap_degrees};

/// Input for a single tick, already resolved from physical keys and mouse
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// x = strafe right, y = walk forward, each in [-1, 1]
    pub move_axis: Vec2,
    /// Mouse movement since last frame (pixels)
    pub look_delta: Vec2,
    /// Turn keys, -1 (left) to 1 (right)
    pub turn: f32,
    pub run: bool,
    pub crouch: bool,
}

/// Player options that affect the simulation, passed in each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Mouse speed multipliers (negative inverts)
    pub mouse_speed: Vec2,
    /// 0 = no head bob, 1 = full
    pub bob_intensity: f32,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            mouse_speed: Vec2::ONE,
            bob_intensity: 1.0,
        }
    }
}

/// What the subtitle/UI collaborator shows after a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub subtitle: Option<SubtitleCue>,
    pub show_backtracking_warning: bool,
}

/// Advance the game by one frame. `dt` is the raw frame delta in seconds and
/// is clamped to `MAX_FRAME_DELTA` before use.
pub fn tick(state: &mut GameState, input: &TickInput, controls: &Controls, dt: f32) -> TickReport {
    let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
    state.events.clear();
    state.time_ticks += 1;

    let max_distance = state.max_distance;
    let player = &mut state.player;

    // Look
    player.yaw = wrap_degrees(
        player.yaw
            + input.look_delta.x * controls.mouse_speed.x * MOUSE_DEGREES_PER_PIXEL
            + input.turn * TURN_SPEED * dt,
    );
    let pitch_delta = input.look_delta.y * controls.mouse_speed.y * MOUSE_DEGREES_PER_PIXEL;
    player.pitch = (player.pitch - pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);

    // Move
    let was_walking = player.walking;
    player.walking = input.move_axis != Vec2::ZERO;
    player.running = player.walking && input.run;
    let displacement = desired_displacement(input.move_axis, player.yaw, player.running, dt);
    let (position, _) =
        resolve_movement(player.position, displacement, max_distance, WallBounds::default());
    player.position = position;

    let target_height = if input.crouch { CROUCH_HEIGHT } else { STAND_HEIGHT };
    player.position.y = lerp(player.position.y, target_height, (CROUCH_LERP_RATE * dt).min(1.0));

    // Head bob and footsteps
    let stepped = integrate_bob(
        &mut player.walk_time,
        &mut player.bob_offset,
        was_walking,
        player.walking,
        player.running,
        controls.bob_intensity,
        dt,
    );
    if stepped {
        state.events.push(GameEvent::Footstep {
            running: player.running,
            surface: foot_surface(player.position, max_distance),
        });
    }

    // Progress
    let distance = player.distance();
    let change = state.progress.update(distance, max_distance, COMMENT_LENGTH);
    if change.lights_advanced {
        state.events.push(GameEvent::LightsAdvanced(state.progress.lights_stage));
    }
    if change.narration_advanced {
        state.events.push(GameEvent::NarrationAdvanced(state.progress.narration_stage));
    }

    let show_backtracking_warning =
        state.player.backtracking.update(distance, dt, BACKTRACK_THRESHOLD);

    let subtitle = state.script.cue(
        state.progress.narration_progress(distance),
        state.progress.narration_stage,
        &NarrationTiming::default(),
    );

    TickReport {
        subtitle,
        show_backtracking_warning,
    }
}
