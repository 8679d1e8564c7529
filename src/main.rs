//! Headless driver for Metro Walk
//!
//! Walks the whole tunnel with scripted input at 60 fps and logs what the
//! render, subtitle and audio collaborators would receive. Set `RUST_LOG` to
//! `debug` to see every footstep.

use std::path::PathBuf;

use glam::Vec2;
use metro_walk::app::{AppInput, Collaborators};
use metro_walk::audio::{FootstepCue, FootstepPlayer};
use metro_walk::consts::TURN_SPEED;
use metro_walk::renderer::{FrameUniforms, SubtitleSink, TunnelRenderer};
use metro_walk::sim::{PathPrecision, SinglePrecision};
use metro_walk::ui::{Pointer, Widget};
use metro_walk::{App, AppState};

const FRAME_DELTA: f32 = 1.0 / 60.0;
const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);
/// Give up after an hour of simulated time
const MAX_FRAMES: u64 = 60 * 60 * 60;

#[derive(Default)]
struct LogRenderer {
    lights_stage: u32,
}

impl TunnelRenderer for LogRenderer {
    fn render_tunnel(&mut self, uniforms: &FrameUniforms) {
        if uniforms.lights_stage() != self.lights_stage {
            self.lights_stage = uniforms.lights_stage();
            let [x, _, z] = uniforms.camera_position();
            log::debug!("Lights stage {} at ({x:.1}, {z:.1})", self.lights_stage);
        }
    }
}

#[derive(Default)]
struct LogText {
    last_subtitle: String,
    backtracking: bool,
}

impl SubtitleSink for LogText {
    fn show_subtitle(&mut self, lines: &[&str]) {
        let text = lines.iter().filter(|l| !l.is_empty()).copied().collect::<Vec<_>>().join(" / ");
        if text != self.last_subtitle {
            log::info!("Subtitle: {text}");
            self.last_subtitle = text;
        }
    }

    fn show_backtracking_warning(&mut self, visible: bool) {
        if visible != self.backtracking {
            self.backtracking = visible;
            if visible {
                log::warn!("You are going the wrong way");
            }
        }
    }

    fn show_warning(&mut self, _remaining_seconds: f32) {}

    fn show_menu(&mut self, _widgets: &[Widget]) {}
}

struct LogFootsteps;

impl FootstepPlayer for LogFootsteps {
    fn play_footstep(&mut self, cue: FootstepCue) {
        log::debug!(
            "Footstep {} on {:?} (volume {:.2}, pitch {:.2})",
            cue.variant,
            cue.surface,
            cue.volume,
            cue.pitch
        );
    }
}

/// Pointer releasing over the "Start walking" button
fn start_button_click() -> Pointer {
    let origin = (SCREEN - Vec2::new(640.0, 480.0)) / 2.0;
    Pointer {
        position: origin + Vec2::new(60.0, 150.0),
        released: true,
        ..Default::default()
    }
}

/// Turn-key input that keeps the walker facing down the tunnel
fn steer_along_tunnel(app: &App) -> f32 {
    let player = &app.game.player;
    let forward = SinglePrecision::path_forward(player.position, app.game.max_distance);
    let target = forward.x.atan2(forward.z).to_degrees();
    let error = (target - player.yaw + 540.0).rem_euclid(360.0) - 180.0;
    (error / (TURN_SPEED * FRAME_DELTA)).clamp(-1.0, 1.0)
}

fn main() {
    env_logger::init();
    log::info!("Metro Walk (headless) starting...");

    let settings_path = std::env::var_os("METRO_WALK_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("metro_walk_settings.json"));
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut app = App::new(settings_path, seed);

    let mut renderer = LogRenderer::default();
    let mut text = LogText::default();
    let mut footsteps = LogFootsteps;

    let mut frames = 0;
    while !app.is_closed() && frames < MAX_FRAMES {
        let mut input = AppInput {
            screen: SCREEN,
            dt: FRAME_DELTA,
            ..Default::default()
        };
        match app.state {
            AppState::Warning { .. } => input.confirm = true,
            AppState::Menu => input.pointer = start_button_click(),
            AppState::Playing => {
                if app.game.player.distance() >= app.game.max_distance {
                    break;
                }
                input.tick.move_axis = Vec2::new(0.0, 1.0);
                input.tick.run = true;
                input.tick.turn = steer_along_tunnel(&app);
            }
            AppState::Closed => {}
        }

        let mut out = Collaborators {
            renderer: &mut renderer,
            text: &mut text,
            audio: &mut footsteps,
        };
        app.update(&input, &mut out);
        frames += 1;
    }

    log::info!(
        "Walked {:.0} m in {:.0} s (lights stage {}, narration stage {})",
        app.game.player.distance(),
        frames as f32 * FRAME_DELTA,
        app.game.progress.lights_stage,
        app.game.progress.narration_stage
    );
}
