//! Footstep audio selection
//!
//! The simulation only says "a foot landed". This module turns that into a
//! concrete footstep cue (which of the recorded variants, how loud, what
//! pitch) for the audio collaborator to play.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::{FootSurface, GameEvent};

/// Number of recorded footstep variants
pub const FOOTSTEP_VARIANTS: usize = 5;
/// Overall footstep gain
const MASTER_VOLUME: f32 = 0.8;

/// A footstep for the audio collaborator to play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootstepCue {
    /// Which recording, in `0..FOOTSTEP_VARIANTS`
    pub variant: usize,
    pub volume: f32,
    /// Playback rate multiplier
    pub pitch: f32,
    pub surface: FootSurface,
}

/// Plays sounds; implemented by the platform layer
pub trait FootstepPlayer {
    fn play_footstep(&mut self, cue: FootstepCue);
}

/// Audio state for one session
#[derive(Debug, Clone)]
pub struct AudioSession {
    rng: Pcg32,
    last_variant: Option<usize>,
    muted: bool,
}

impl AudioSession {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_variant: None,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Pick a footstep variant, never the same one twice in a row
    fn next_variant(&mut self) -> usize {
        let variant = match self.last_variant {
            Some(last) => {
                let pick = self.rng.random_range(0..FOOTSTEP_VARIANTS - 1);
                if pick >= last { pick + 1 } else { pick }
            }
            None => self.rng.random_range(0..FOOTSTEP_VARIANTS),
        };
        self.last_variant = Some(variant);
        variant
    }

    /// Build the cue for one footstep
    pub fn footstep(&mut self, running: bool, surface: FootSurface) -> FootstepCue {
        let variant = self.next_variant();
        let (base_volume, base_pitch) = if running { (1.0, 1.15) } else { (0.7, 1.0) };
        let surface_pitch = match surface {
            FootSurface::Gravel => 1.0,
            FootSurface::Sleeper => 0.9,
            FootSurface::Rail => 1.3,
        };
        let jitter = self.rng.random_range(-0.04..0.04);
        let volume = if self.muted { 0.0 } else { base_volume * MASTER_VOLUME };
        FootstepCue {
            variant,
            volume,
            pitch: base_pitch * surface_pitch + jitter,
            surface,
        }
    }

    /// Play every footstep among this tick's events
    pub fn handle_events(&mut self, events: &[GameEvent], player: &mut dyn FootstepPlayer) {
        for event in events {
            if let GameEvent::Footstep { running, surface } = *event {
                let cue = self.footstep(running, surface);
                if cue.volume > 0.0 {
                    player.play_footstep(cue);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<FootstepCue>);

    impl FootstepPlayer for Recorder {
        fn play_footstep(&mut self, cue: FootstepCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_variants_never_repeat() {
        let mut audio = AudioSession::new(7);
        let mut last = None;
        let mut seen = [false; FOOTSTEP_VARIANTS];
        for _ in 0..500 {
            let cue = audio.footstep(false, FootSurface::Gravel);
            assert!(cue.variant < FOOTSTEP_VARIANTS);
            assert_ne!(Some(cue.variant), last);
            seen[cue.variant] = true;
            last = Some(cue.variant);
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_running_is_louder_and_higher() {
        let mut audio = AudioSession::new(1);
        let walk = audio.footstep(false, FootSurface::Gravel);
        let run = audio.footstep(true, FootSurface::Gravel);
        assert!(run.volume > walk.volume);
        assert!(run.pitch > walk.pitch);
    }

    #[test]
    fn test_handle_events_plays_only_footsteps() {
        let mut audio = AudioSession::new(3);
        let mut recorder = Recorder::default();
        let events = [
            GameEvent::LightsAdvanced(2),
            GameEvent::Footstep { running: true, surface: FootSurface::Rail },
            GameEvent::NarrationAdvanced(0),
        ];
        audio.handle_events(&events, &mut recorder);
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].surface, FootSurface::Rail);

        audio.set_muted(true);
        audio.handle_events(&events, &mut recorder);
        assert_eq!(recorder.0.len(), 1);
    }
}
