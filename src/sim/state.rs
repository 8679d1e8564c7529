//! Game state and core simulation types
//!
//! Everything the frame tick mutates lives here. It is owned by the main loop
//! and read by the render/audio/subtitle collaborators after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::backtrack::BacktrackDetector;
use super::movement::FootSurface;
use super::narration::Script;
use super::progress::ProgressState;
use crate::consts::*;

/// The walking player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// x = lateral, y = eye height, z = forward distance along the tunnel
    pub position: Vec3,
    /// Degrees, wrapped into [0, 360)
    pub yaw: f32,
    /// Degrees, clamped to ±MAX_PITCH
    pub pitch: f32,
    /// Movement was requested this tick (legal or not)
    pub walking: bool,
    pub running: bool,
    /// Accumulated walking time, drives the bob phase
    pub walk_time: f32,
    /// Vertical camera offset from head bob
    pub bob_offset: f32,
    /// Furthest distance reached and time spent walking back from it
    pub backtracking: BacktrackDetector,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, STAND_HEIGHT, 0.0),
            yaw: 0.0,
            pitch: 0.0,
            walking: false,
            running: false,
            walk_time: 0.0,
            bob_offset: 0.0,
            backtracking: BacktrackDetector::new(0.0),
        }
    }
}

impl PlayerState {
    /// Forward distance along the tunnel
    #[inline]
    pub fn distance(&self) -> f32 {
        self.position.z
    }

    /// Camera position including head bob
    pub fn camera_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.bob_offset, 0.0)
    }
}

/// Things that happened during a tick, for the audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A foot landed
    Footstep { running: bool, surface: FootSurface },
    /// Lighting advanced to this stage
    LightsAdvanced(u32),
    /// Narration advanced to this stage
    NarrationAdvanced(i32),
}

/// Complete simulation state for one playthrough
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: PlayerState,
    pub progress: ProgressState,
    /// Tunnel length, fixed for the playthrough (always > 0)
    pub max_distance: f32,
    pub script: Script,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(MAX_DISTANCE, Script::default())
    }
}

impl GameState {
    pub fn new(max_distance: f32, script: Script) -> Self {
        debug_assert!(max_distance > 0.0, "tunnel length must be positive");
        Self {
            player: PlayerState::default(),
            progress: ProgressState::new(),
            max_distance,
            script,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
