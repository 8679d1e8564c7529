//! Application state machine
//!
//! The warning screen, the menu and the walk itself are states of a single
//! outer loop. Each frame the platform layer calls [`App::update`] once with
//! the resolved input and its collaborators.

use std::path::PathBuf;

use glam::Vec2;

use crate::audio::{AudioSession, FootstepPlayer};
use crate::renderer::{
    FrameUniforms, SubtitleSink, TunnelRenderer, subtitle_lines, virtual_resolution,
};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};
use crate::ui::{MenuAction, Pointer, UiSession, main_menu};

/// Photosensitivity warning auto-dismisses after this many seconds
pub const WARNING_DURATION: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppState {
    /// Photosensitivity notice
    Warning { elapsed: f32 },
    Menu,
    Playing,
    /// The player asked to quit; the platform layer should exit
    Closed,
}

/// Everything the platform layer gathers for one frame
#[derive(Debug, Clone, Default)]
pub struct AppInput {
    /// Any key / click that dismisses the warning
    pub confirm: bool,
    /// Escape: leave the walk for the menu
    pub pause: bool,
    pub pointer: Pointer,
    /// Window size in pixels
    pub screen: Vec2,
    pub tick: TickInput,
    pub dt: f32,
}

/// Output side of the platform layer
pub struct Collaborators<'a> {
    pub renderer: &'a mut dyn TunnelRenderer,
    pub text: &'a mut dyn SubtitleSink,
    pub audio: &'a mut dyn FootstepPlayer,
}

pub struct App {
    pub state: AppState,
    pub settings: Settings,
    pub game: GameState,
    ui: UiSession,
    audio: AudioSession,
    settings_path: Option<PathBuf>,
    time: f32,
}

impl App {
    /// Load settings from `settings_path` and start at the warning screen,
    /// or the menu if the warning was already acknowledged
    pub fn new(settings_path: PathBuf, seed: u64) -> Self {
        let settings = Settings::load_or_default(&settings_path);
        let mut app = Self::with_settings(settings, seed);
        app.settings_path = Some(settings_path);
        app
    }

    /// App that never touches the filesystem
    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let state = if settings.warning_acknowledged {
            AppState::Menu
        } else {
            AppState::Warning { elapsed: 0.0 }
        };
        Self {
            state,
            settings: settings.sanitized(),
            game: GameState::default(),
            ui: UiSession::new(),
            audio: AudioSession::new(seed),
            settings_path: None,
            time: 0.0,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == AppState::Closed
    }

    fn transition(&mut self, next: AppState) {
        log::info!("App state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn persist_settings(&self) {
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save(path) {
                log::warn!("Failed to save settings: {e}");
            }
        }
    }

    /// Run one frame of whichever state is active
    pub fn update(&mut self, input: &AppInput, out: &mut Collaborators<'_>) {
        self.time += input.dt.max(0.0);
        match self.state {
            AppState::Warning { elapsed } => {
                let elapsed = elapsed + input.dt.max(0.0);
                if input.confirm || elapsed >= WARNING_DURATION {
                    self.settings.warning_acknowledged = true;
                    self.persist_settings();
                    self.transition(AppState::Menu);
                } else {
                    self.state = AppState::Warning { elapsed };
                    out.text.show_warning(WARNING_DURATION - elapsed);
                }
            }
            AppState::Menu => {
                let was_dragging = self.ui.dragging().is_some();
                let frame =
                    main_menu(&mut self.ui, &input.pointer, &mut self.settings, input.screen);
                out.text.show_menu(&frame.widgets);
                let dragging = self.ui.dragging().is_some();
                if (frame.settings_changed && !dragging) || (was_dragging && !dragging) {
                    self.persist_settings();
                }
                match frame.action {
                    Some(MenuAction::StartWalking) => {
                        self.persist_settings();
                        self.transition(AppState::Playing);
                    }
                    Some(MenuAction::CloseApplication) => {
                        self.persist_settings();
                        self.transition(AppState::Closed);
                    }
                    None => {}
                }
            }
            AppState::Playing => {
                if input.pause {
                    self.transition(AppState::Menu);
                    return;
                }
                let controls = self.settings.controls();
                let report = tick(&mut self.game, &input.tick, &controls, input.dt);
                let events = self.game.drain_events();
                self.audio.handle_events(&events, out.audio);

                let uniforms =
                    FrameUniforms::new(&self.game, &self.settings, virtual_resolution(), self.time);
                out.renderer.render_tunnel(&uniforms);

                if let Some(cue) = &report.subtitle {
                    out.text.show_subtitle(&subtitle_lines(&self.game.script, cue));
                }
                out.text.show_backtracking_warning(report.show_backtracking_warning);
            }
            AppState::Closed => {}
        }
    }
}
