//! Narration script and subtitle timing
//!
//! Each narration stage is a short list of lines. Lines are revealed in
//! windows of a few lines at a time, paced by distance walked since the stage
//! started (so pausing in the menu does not eat into reading time). Every
//! window is preceded by a short blank gap.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stage count of the default script
pub const COMMENTS_COUNT: usize = 13;
/// Lines per stage in the default script
pub const COMMENT_LINES: usize = 3;

/// Blank lines hold the screen silent for this many characters' worth
pub const BLANK_LINE_CHARACTERS: f32 = 20.0;
/// Minimum gap before each window, in characters
pub const MIN_GAP_CHARACTERS: f32 = 2.0;
/// Gap before each window as a fraction of that window's duration
pub const GAP_FRACTION: f32 = 0.15;

const DEFAULT_SCRIPT: [[&str; COMMENT_LINES]; COMMENTS_COUNT] = [
    ["This is a metro tunnel under Helsinki.", "", ""],
    [
        "The Helsinki metro only has one fork and 25 stations,",
        "but the original plans were a bit more ambitious.",
        "There was a plan for 108 stations, built a lot closer to the surface.",
    ],
    [
        "That said, I prefer the cosy feeling the current one has.",
        "No maps needed; just go east or west.",
        "And it's a good bit below ground, feels like going into a bunker.",
    ],
    [
        "The Kamppi escalator is definitely a bit spooky at first.",
        "...",
        "To clarify, the station is very deep. So the escalator is very long.",
    ],
    ["", "(reading wikipedia)", ""],
    [
        "After some reading, turns out that one new station has longer stairs.",
        "Never seen that specific escalator myself though.",
        "",
    ],
    [
        "That one is under water as well. Neat, right?",
        "Must've been quite the engineering challenge.",
        "",
    ],
    ["", "", ""],
    [
        "Want to hear a surprising fact?",
        "A big part of the metro line is not underground.",
        "Shocking, I know.",
    ],
    ["Based on the Stockholm metro", "", ""],
    ["", "", ""],
    [
        "Just to clarify, what you're looking at isn't really the Helsinki metro.",
        "I couldn't actually find any blueprints, and only a few pictures.",
        "So this is just my artistic interpretation.",
    ],
    [
        "And that's that for our public infrastructure appreciation walk.",
        "The next station is right up ahead, but that's off-limits for you.",
        "Thanks for walking the whole way, I wish you a good day.",
    ],
];

/// Pacing for subtitle windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NarrationTiming {
    pub lines_per_window: usize,
    pub meters_per_character: f32,
}

impl Default for NarrationTiming {
    fn default() -> Self {
        Self {
            lines_per_window: LINES_PER_WINDOW,
            meters_per_character: METERS_PER_CHARACTER,
        }
    }
}

/// Subtitle lines to show this frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleCue {
    pub stage: usize,
    /// Indexes of the non-blank lines in the live window
    pub lines: Vec<usize>,
}

/// Ordered narration stages, each an ordered list of lines.
/// Blank lines are deliberate silence. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    stages: Vec<Vec<String>>,
}

impl Default for Script {
    fn default() -> Self {
        Self::new(
            DEFAULT_SCRIPT
                .iter()
                .map(|stage| stage.iter().map(|line| line.to_string()).collect())
                .collect(),
        )
    }
}

impl Script {
    pub fn new(stages: Vec<Vec<String>>) -> Self {
        Self { stages }
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Lines of a stage, or `None` for any out-of-range stage (including -1)
    pub fn stage(&self, stage: i32) -> Option<&[String]> {
        let index = usize::try_from(stage).ok()?;
        self.stages.get(index).map(Vec::as_slice)
    }

    /// A single line, bounds-checked on both indexes
    pub fn line(&self, stage: i32, line: usize) -> Option<&str> {
        self.stage(stage)?.get(line).map(String::as_str)
    }

    /// First line index of the window that is live `progress` meters into
    /// `stage`, or `None` if nothing should be on screen.
    ///
    /// Windows are laid out back to back, each as a blank gap followed by the
    /// window's reading time. Windows containing only blank lines still take
    /// up time but never show.
    pub fn get_line(&self, progress: f32, stage: i32, timing: &NarrationTiming) -> Option<usize> {
        let lines = self.stage(stage)?;
        let per_window = timing.lines_per_window.max(1);
        let rate = timing.meters_per_character;

        let mut cursor = 0.0;
        for (window, chunk) in lines.chunks(per_window).enumerate() {
            let duration: f32 = chunk.iter().map(|line| line_characters(line) * rate).sum();
            let gap = (duration * GAP_FRACTION).max(MIN_GAP_CHARACTERS * rate);

            cursor += gap;
            if progress < cursor {
                return None;
            }
            cursor += duration;
            if progress < cursor {
                let silent = chunk.iter().all(|line| line.trim().is_empty());
                return (!silent).then_some(window * per_window);
            }
        }
        None
    }

    /// The subtitle cue for the current frame, if any
    pub fn cue(&self, progress: f32, stage: i32, timing: &NarrationTiming) -> Option<SubtitleCue> {
        let start = self.get_line(progress, stage, timing)?;
        let lines = self.stage(stage)?;
        let end = (start + timing.lines_per_window.max(1)).min(lines.len());
        let visible = (start..end).filter(|&i| !lines[i].trim().is_empty()).collect();
        Some(SubtitleCue {
            stage: stage as usize,
            lines: visible,
        })
    }
}

fn line_characters(line: &str) -> f32 {
    if line.trim().is_empty() {
        BLANK_LINE_CHARACTERS
    } else {
        line.chars().count() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn timing() -> NarrationTiming {
        NarrationTiming {
            lines_per_window: 2,
            meters_per_character: 0.1,
        }
    }

    fn script() -> Script {
        Script::new(vec![vec![
            "0123456789".to_string(),
            "0123456789".to_string(),
            "01234".to_string(),
        ]])
    }

    #[test]
    fn test_default_script_shape() {
        let s = Script::default();
        assert_eq!(s.stage_count(), COMMENTS_COUNT);
        assert_eq!(s.line(0, 0), Some("This is a metro tunnel under Helsinki."));
        assert_eq!(s.line(12, 3), None);
    }

    #[test]
    fn test_gap_then_windows_then_silence() {
        let s = script();
        let t = timing();
        // Window 0: 20 chars -> 2.0m, gap max(0.3, 0.2) = 0.3
        assert_eq!(s.get_line(0.0, 0, &t), None);
        assert_eq!(s.get_line(0.29, 0, &t), None);
        assert_eq!(s.get_line(0.31, 0, &t), Some(0));
        assert_eq!(s.get_line(2.29, 0, &t), Some(0));
        // Window 1: 5 chars -> 0.5m, gap max(0.075, 0.2) = 0.2
        assert_eq!(s.get_line(2.4, 0, &t), None);
        assert_eq!(s.get_line(2.6, 0, &t), Some(2));
        assert_eq!(s.get_line(2.95, 0, &t), Some(2));
        assert_eq!(s.get_line(3.1, 0, &t), None);
        assert_eq!(s.get_line(100.0, 0, &t), None);
    }

    #[test]
    fn test_out_of_range_stage_shows_nothing() {
        let s = Script::default();
        let t = NarrationTiming::default();
        assert_eq!(s.get_line(1.0, -1, &t), None);
        assert_eq!(s.get_line(1.0, COMMENTS_COUNT as i32, &t), None);
        assert_eq!(s.cue(1.0, 99, &t), None);
    }

    #[test]
    fn test_silent_windows_never_show() {
        let s = Script::default();
        let t = NarrationTiming::default();
        let mut p = 0.0;
        while p < 200.0 {
            assert_eq!(s.get_line(p, 7, &t), None);
            p += 0.05;
        }
    }

    #[test]
    fn test_cue_skips_blank_lines() {
        let s = Script::default();
        let t = NarrationTiming::default();
        let mut found = None;
        let mut p = 0.0;
        while p < 50.0 && found.is_none() {
            found = s.cue(p, 4, &t);
            p += 0.05;
        }
        let cue = found.expect("stage 4 has a visible line");
        assert_eq!(cue.stage, 4);
        assert_eq!(cue.lines, vec![1]);
    }

    proptest! {
        #[test]
        fn prop_get_line_stays_in_bounds(
            progress in -10.0f32..300.0,
            stage in -5i32..20,
            per_window in 0usize..5,
        ) {
            let s = Script::default();
            let t = NarrationTiming { lines_per_window: per_window, meters_per_character: 0.12 };
            if let Some(line) = s.get_line(progress, stage, &t) {
                prop_assert!((0..COMMENTS_COUNT as i32).contains(&stage));
                prop_assert!(line < COMMENT_LINES);
            }
        }
    }
}
