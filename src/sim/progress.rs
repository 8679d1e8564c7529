//! Discrete progress derived from forward distance
//!
//! Two counters advance as the player walks deeper: the lighting stage (which
//! tunnel lights are switched on) and the narration stage (which part of the
//! script is playing). Neither ever goes back down.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pseudo-jitter added to distance so lights switch on at uneven intervals.
///
/// The integer truncation and remainder follow C semantics (toward zero),
/// which Rust's `as i32` and `%` share. The exact formula is visually tuned.
#[inline]
pub fn noiseify_position(distance: f32) -> f32 {
    distance + ((distance * 4.1) as i32 % 14) as f32 - 7.0
}

/// What changed in a progress update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressChange {
    pub lights_advanced: bool,
    pub narration_advanced: bool,
}

/// Monotonic milestone state for one playthrough
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressState {
    pub lights_stage: u32,
    /// -1 until the first stage triggers
    pub narration_stage: i32,
    /// Forward distance where the current narration stage started
    pub narration_start_distance: f32,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            lights_stage: 0,
            narration_stage: -1,
            narration_start_distance: 0.0,
        }
    }

    /// Advance stages for the player's current distance.
    ///
    /// Each counter moves up by at most one per call, even if the distance
    /// jumped past several thresholds; the remaining stages follow on later
    /// ticks.
    pub fn update(
        &mut self,
        distance: f32,
        max_distance: f32,
        comment_length: f32,
    ) -> ProgressChange {
        let mut change = ProgressChange::default();

        let lights_limit = (max_distance - LIGHTS_SPACING).max(0.0);
        let lights_position = noiseify_position(distance).clamp(0.0, lights_limit);
        if lights_position > (self.lights_stage + 1) as f32 * LIGHTS_SPACING {
            self.lights_stage += 1;
            change.lights_advanced = true;
            log::debug!("lights stage {} at z={distance:.1}", self.lights_stage);
        }

        let narration_threshold =
            (self.narration_stage + 1) as f32 * comment_length + COMMENT_OFFSET;
        if distance > narration_threshold {
            self.narration_stage += 1;
            self.narration_start_distance = distance;
            change.narration_advanced = true;
            log::info!("narration stage {} at z={distance:.1}", self.narration_stage);
        }

        change
    }

    /// Distance walked since the current narration stage started
    #[inline]
    pub fn narration_progress(&self, distance: f32) -> f32 {
        distance - self.narration_start_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_noiseify_matches_truncating_formula() {
        // 101 * 4.1 = 414.1 -> 414, 414 % 14 = 8
        assert!((noiseify_position(101.0) - 102.0).abs() < 1e-4);
        // 3 * 4.1 = 12.3 -> 12
        assert!((noiseify_position(3.0) - 8.0).abs() < 1e-4);
        assert_eq!(noiseify_position(0.0), -7.0);
        // Truncation toward zero with a negative remainder
        // -5 * 4.1 = -20.5 -> -20, -20 % 14 = -6
        assert!((noiseify_position(-5.0) - -18.0).abs() < 1e-4);
    }

    #[test]
    fn test_initial_state() {
        let p = ProgressState::new();
        assert_eq!(p.lights_stage, 0);
        assert_eq!(p.narration_stage, -1);
    }

    #[test]
    fn test_narration_advances_once_at_threshold() {
        let mut p = ProgressState::new();
        p.update(10.0, MAX_DISTANCE, COMMENT_LENGTH);
        assert_eq!(p.narration_stage, 0);

        let threshold = COMMENT_LENGTH + COMMENT_OFFSET;
        let change = p.update(threshold + 0.1, MAX_DISTANCE, COMMENT_LENGTH);
        assert!(change.narration_advanced);
        assert_eq!(p.narration_stage, 1);
        assert!((p.narration_start_distance - (threshold + 0.1)).abs() < 1e-4);

        for d in [threshold - 0.5, threshold + 0.3, threshold - 2.0, threshold + 1.0] {
            let change = p.update(d, MAX_DISTANCE, COMMENT_LENGTH);
            assert!(!change.narration_advanced);
            assert_eq!(p.narration_stage, 1);
        }
    }

    #[test]
    fn test_large_jump_advances_one_stage_per_tick() {
        let mut p = ProgressState::new();
        p.update(1000.0, MAX_DISTANCE, COMMENT_LENGTH);
        assert_eq!(p.lights_stage, 1);
        assert_eq!(p.narration_stage, 0);
        p.update(1000.0, MAX_DISTANCE, COMMENT_LENGTH);
        assert_eq!(p.lights_stage, 2);
        assert_eq!(p.narration_stage, 1);
    }

    #[test]
    fn test_lights_stop_before_tunnel_end() {
        let mut p = ProgressState::new();
        for _ in 0..1000 {
            p.update(MAX_DISTANCE + 10.0, MAX_DISTANCE, COMMENT_LENGTH);
        }
        let last = ((MAX_DISTANCE - LIGHTS_SPACING) / LIGHTS_SPACING).ceil() as u32 - 1;
        assert_eq!(p.lights_stage, last);
    }

    proptest! {
        #[test]
        fn prop_stages_never_decrease(distances in prop::collection::vec(-10.0f32..2150.0, 1..200)) {
            let mut p = ProgressState::new();
            for d in distances {
                let before = p;
                p.update(d, MAX_DISTANCE, COMMENT_LENGTH);
                prop_assert!(p.lights_stage >= before.lights_stage);
                prop_assert!(p.lights_stage <= before.lights_stage + 1);
                prop_assert!(p.narration_stage >= before.narration_stage);
                prop_assert!(p.narration_stage <= before.narration_stage + 1);
            }
        }
    }
}
