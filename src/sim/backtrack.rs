//! Detects the player walking back the way they came

use serde::{Deserialize, Serialize};

/// Tracks the furthest distance reached and how long the player has been
/// well behind it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BacktrackDetector {
    pub furthest_distance: f32,
    /// Seconds spent beyond the threshold since forward progress last resumed
    pub backtracking_time: f32,
    /// Set for the current tick only
    #[serde(skip)]
    pub backtracking: bool,
}

impl BacktrackDetector {
    pub fn new(start_distance: f32) -> Self {
        Self {
            furthest_distance: start_distance,
            backtracking_time: 0.0,
            backtracking: false,
        }
    }

    /// Update for this tick and return whether the warning should show.
    ///
    /// Reaching new ground resets the timer. Falling more than `threshold`
    /// behind the furthest point accumulates it. Small wobbles near the
    /// furthest point do neither.
    pub fn update(&mut self, distance: f32, dt: f32, threshold: f32) -> bool {
        self.backtracking = false;
        if distance > self.furthest_distance {
            self.furthest_distance = distance;
            self.backtracking_time = 0.0;
        } else if self.furthest_distance - distance > threshold {
            self.backtracking_time += dt;
            self.backtracking = true;
        }
        self.backtracking
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BACKTRACK_THRESHOLD;
    use proptest::prelude::*;

    #[test]
    fn test_small_regression_does_not_warn() {
        let mut b = BacktrackDetector::new(0.0);
        b.update(50.0, 0.016, BACKTRACK_THRESHOLD);
        for step in 0..100 {
            let d = 50.0 - step as f32 * 0.09;
            assert!(!b.update(d, 0.016, BACKTRACK_THRESHOLD));
        }
        assert_eq!(b.backtracking_time, 0.0);
    }

    #[test]
    fn test_sustained_regression_accumulates_until_progress() {
        let mut b = BacktrackDetector::new(0.0);
        b.update(50.0, 0.016, BACKTRACK_THRESHOLD);
        for _ in 0..10 {
            assert!(b.update(35.0, 0.1, BACKTRACK_THRESHOLD));
        }
        assert!((b.backtracking_time - 1.0).abs() < 1e-4);

        // Back within the threshold: no flag, timer kept
        assert!(!b.update(45.0, 0.1, BACKTRACK_THRESHOLD));
        assert!((b.backtracking_time - 1.0).abs() < 1e-4);

        // New ground resets
        assert!(!b.update(50.5, 0.1, BACKTRACK_THRESHOLD));
        assert_eq!(b.backtracking_time, 0.0);
        assert_eq!(b.furthest_distance, 50.5);
    }

    proptest! {
        #[test]
        fn prop_within_threshold_never_flags(
            furthest in 0.0f32..2000.0,
            back in prop::collection::vec(0.0f32..9.99, 1..50),
        ) {
            let mut b = BacktrackDetector::new(0.0);
            b.update(furthest, 0.016, BACKTRACK_THRESHOLD);
            for offset in back {
                prop_assert!(!b.update(furthest - offset, 0.016, BACKTRACK_THRESHOLD));
            }
        }

        #[test]
        fn prop_time_is_monotonic_while_behind(
            ticks in prop::collection::vec((10.5f32..50.0, 0.001f32..0.03), 1..50),
        ) {
            let mut b = BacktrackDetector::new(100.0);
            let mut last = 0.0;
            for (behind, dt) in ticks {
                prop_assert!(b.update(100.0 - behind, dt, BACKTRACK_THRESHOLD));
                prop_assert!(b.backtracking_time > last);
                last = b.backtracking_time;
            }
        }
    }
}
