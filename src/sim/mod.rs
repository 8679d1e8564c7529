//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per frame, with a clamped frame delta
//! - No rendering, audio or platform dependencies
//! - State only changes inside `tick`

pub mod backtrack;
pub mod movement;
pub mod narration;
pub mod path;
pub mod progress;
pub mod state;
pub mod tick;

pub use backtrack::BacktrackDetector;
pub use movement::{FootSurface, MoveOutcome, WallBounds, foot_surface, resolve_movement};
pub use narration::{NarrationTiming, Script, SubtitleCue};
pub use path::{DoublePrecision, PathPrecision, SinglePrecision};
pub use progress::{ProgressState, noiseify_position};
pub use state::{GameEvent, GameState, PlayerState};
pub use tick::{Controls, TickInput, TickReport, tick};
