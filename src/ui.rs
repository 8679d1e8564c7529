//! Main menu widgets
//!
//! Immediate-mode: each frame the menu is rebuilt from the pointer state and
//! the settings, producing a list of widgets for the UI collaborator to draw
//! and at most one action. Drag state lives in [`UiSession`], owned by the
//! app and passed in every frame.

use glam::Vec2;

use crate::settings::{BOB_RANGE, FOV_RANGE, MOUSE_SPEED_RANGE, Settings};

/// Layout is designed for this canvas, centered in the window
pub const MENU_WIDTH: f32 = 640.0;
pub const MENU_HEIGHT: f32 = 480.0;

const SLIDER_WIDTH: f32 = 220.0;
const SLIDER_OFFSET_X: f32 = 295.0;
const HANDLE_SIZE: Vec2 = Vec2::new(16.0, 24.0);
const ROW_HEIGHT: f32 = 50.0;

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x <= self.pos.x + self.size.x
            && point.y <= self.pos.y + self.size.y
    }
}

/// Mouse state for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub position: Vec2,
    pub down: bool,
    /// Went down this frame
    pub pressed: bool,
    /// Went up this frame
    pub released: bool,
}

/// Identifies a slider across frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderId {
    FieldOfView,
    BobIntensity,
    MouseSpeedX,
    MouseSpeedY,
}

/// Per-session widget state that survives between frames
#[derive(Debug, Clone, Default)]
pub struct UiSession {
    /// Slider whose handle is being dragged
    pressed_slider: Option<SliderId>,
    /// Pointer x minus handle center when the drag started
    grab_offset: f32,
}

impl UiSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> Option<SliderId> {
        self.pressed_slider
    }
}

/// A slider's value range and track geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderSpec {
    pub id: SliderId,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    /// Left end of the track
    pub start: Vec2,
    pub width: f32,
}

impl SliderSpec {
    /// Handle rectangle for a value
    pub fn handle(&self, value: f32) -> Rect {
        let t = (value - self.min) / (self.max - self.min);
        Rect::new(
            self.start.x - HANDLE_SIZE.x / 2.0 + self.width * t,
            self.start.y - HANDLE_SIZE.y / 2.0,
            HANDLE_SIZE.x,
            HANDLE_SIZE.y,
        )
    }

    /// Value for a handle center at screen x, snapped to the step
    pub fn value_at(&self, x: f32) -> f32 {
        let along = (x - self.start.x).clamp(0.0, self.width);
        let raw = along / self.width * (self.max - self.min) + self.min;
        ((raw / self.step).round() * self.step).clamp(self.min, self.max)
    }
}

/// Update a slider for this frame. Returns true if the handle is hovered
/// or being dragged.
pub fn slider(
    session: &mut UiSession,
    pointer: &Pointer,
    spec: &SliderSpec,
    value: &mut f32,
) -> bool {
    let handle = spec.handle(*value);
    let hovered = handle.contains(pointer.position);

    if session.pressed_slider == Some(spec.id) {
        if pointer.down {
            *value = spec.value_at(pointer.position.x - session.grab_offset);
        } else {
            session.pressed_slider = None;
        }
        return true;
    }

    if hovered && pointer.pressed && session.pressed_slider.is_none() {
        session.pressed_slider = Some(spec.id);
        session.grab_offset = pointer.position.x - (handle.pos.x + handle.size.x / 2.0);
    }
    hovered
}

/// Update a button. Returns (hovered, clicked); clicks fire on release.
pub fn button(pointer: &Pointer, rect: Rect) -> (bool, bool) {
    let hovered = rect.contains(pointer.position);
    (hovered, hovered && pointer.released)
}

/// Something for the UI collaborator to draw
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Title { text: &'static str, pos: Vec2 },
    Button { label: &'static str, rect: Rect, highlighted: bool, danger: bool },
    Checkbox { label: &'static str, rect: Rect, highlighted: bool, checked: bool },
    Slider { label: &'static str, value_text: String, track: Rect, handle: Rect, highlighted: bool },
}

/// What the menu asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartWalking,
    CloseApplication,
}

/// One frame of the main menu
#[derive(Debug, Clone, Default)]
pub struct MenuFrame {
    pub widgets: Vec<Widget>,
    pub action: Option<MenuAction>,
    /// Settings were edited this frame
    pub settings_changed: bool,
}

/// Slider geometry for a menu row whose label starts at `row`
fn row_spec(id: SliderId, range: (f32, f32, f32), row: Vec2) -> SliderSpec {
    SliderSpec {
        id,
        min: range.0,
        max: range.1,
        step: range.2,
        start: Vec2::new(row.x + SLIDER_OFFSET_X, row.y + 19.0),
        width: SLIDER_WIDTH,
    }
}

/// Update one labelled slider row and push its widget
fn slider_row(
    session: &mut UiSession,
    pointer: &Pointer,
    frame: &mut MenuFrame,
    spec: SliderSpec,
    label: &'static str,
    value: &mut f32,
    format: fn(f32) -> String,
) {
    let highlighted = slider(session, pointer, &spec, value);
    frame.widgets.push(Widget::Slider {
        label,
        value_text: format(*value),
        track: Rect::new(spec.start.x, spec.start.y, spec.width, 2.0),
        handle: spec.handle(*value),
        highlighted,
    });
}

/// Run the main menu for one frame, editing `settings` in place
pub fn main_menu(
    session: &mut UiSession,
    pointer: &Pointer,
    settings: &mut Settings,
    screen: Vec2,
) -> MenuFrame {
    let origin = ((screen - Vec2::new(MENU_WIDTH, MENU_HEIGHT)) / 2.0).max(Vec2::ZERO);
    let font_offset = if settings.clear_font { 30.0 } else { 0.0 };
    let before = settings.clone();
    let mut frame = MenuFrame::default();

    let mut x = origin.x + 50.0;
    let mut y = origin.y + 40.0;
    frame.widgets.push(Widget::Title {
        text: "A Walk In A Metro Tunnel",
        pos: Vec2::new(x, y),
    });

    x -= 10.0;
    y += 90.0;
    let start = Rect::new(x, y, 240.0 - font_offset, 50.0);
    let (hovered, clicked) = button(pointer, start);
    frame.widgets.push(Widget::Button {
        label: "Start walking",
        rect: start,
        highlighted: hovered,
        danger: false,
    });
    if clicked {
        frame.action = Some(MenuAction::StartWalking);
    }

    x += 270.0;
    let close = Rect::new(x - font_offset, y, 285.0 - font_offset, 50.0);
    let (hovered, clicked) = button(pointer, close);
    frame.widgets.push(Widget::Button {
        label: "Close Application",
        rect: close,
        highlighted: hovered,
        danger: true,
    });
    if clicked {
        frame.action = Some(MenuAction::CloseApplication);
    }

    x = origin.x + 53.0;
    y += 70.0;
    let toggle = Rect::new(x + 385.0, y, 40.0, 40.0);
    let (hovered, clicked) = button(pointer, toggle);
    if clicked {
        settings.toggle_font();
    }
    frame.widgets.push(Widget::Checkbox {
        label: "Use fancy font:",
        rect: toggle,
        highlighted: hovered,
        checked: !settings.clear_font,
    });

    y += ROW_HEIGHT;
    let fov_range = (*FOV_RANGE.start(), *FOV_RANGE.end(), 1.0);
    slider_row(
        session,
        pointer,
        &mut frame,
        row_spec(SliderId::FieldOfView, fov_range, Vec2::new(x, y)),
        "Field of view: ",
        &mut settings.fov,
        |v| format!("{v:3.0}"),
    );

    y += ROW_HEIGHT;
    let bob_before = settings.bob_intensity * 100.0;
    let mut bob = bob_before;
    let bob_range = (*BOB_RANGE.start() * 100.0, *BOB_RANGE.end() * 100.0, 1.0);
    slider_row(
        session,
        pointer,
        &mut frame,
        row_spec(SliderId::BobIntensity, bob_range, Vec2::new(x, y)),
        "Bob intensity: ",
        &mut bob,
        |v| format!("{v:3.0}%"),
    );
    if bob != bob_before {
        settings.bob_intensity = bob / 100.0;
    }

    let mouse_range = (
        *MOUSE_SPEED_RANGE.start() as f32 / 100.0,
        *MOUSE_SPEED_RANGE.end() as f32 / 100.0,
        0.1,
    );
    y += ROW_HEIGHT;
    let mut mouse_x = settings.mouse_speed_x as f32 / 100.0;
    slider_row(
        session,
        pointer,
        &mut frame,
        row_spec(SliderId::MouseSpeedX, mouse_range, Vec2::new(x, y)),
        "Mouse speed X: ",
        &mut mouse_x,
        |v| format!("{v:1.1}"),
    );
    if session.dragging() == Some(SliderId::MouseSpeedX) {
        settings.mouse_speed_x = (mouse_x * 100.0).round() as i32;
    }

    y += ROW_HEIGHT;
    let mut mouse_y = settings.mouse_speed_y as f32 / 100.0;
    slider_row(
        session,
        pointer,
        &mut frame,
        row_spec(SliderId::MouseSpeedY, mouse_range, Vec2::new(x, y)),
        "Mouse speed Y: ",
        &mut mouse_y,
        |v| format!("{v:1.1}"),
    );
    if session.dragging() == Some(SliderId::MouseSpeedY) {
        settings.mouse_speed_y = (mouse_y * 100.0).round() as i32;
    }

    frame.settings_changed = *settings != before;
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SliderSpec {
        SliderSpec {
            id: SliderId::FieldOfView,
            min: 60.0,
            max: 120.0,
            step: 1.0,
            start: Vec2::new(100.0, 100.0),
            width: 200.0,
        }
    }

    #[test]
    fn test_value_at_snaps_and_clamps() {
        let s = spec();
        assert_eq!(s.value_at(100.0), 60.0);
        assert_eq!(s.value_at(200.0), 90.0);
        assert_eq!(s.value_at(1000.0), 120.0);
        assert_eq!(s.value_at(-50.0), 60.0);
        assert_eq!(s.value_at(201.0), 90.0);
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let s = spec();
        let mut session = UiSession::new();
        let mut value = 90.0;
        let handle = s.handle(value);
        // Grab 3px right of the handle center
        let grab = handle.pos + handle.size / 2.0 + Vec2::new(3.0, 0.0);
        let press = Pointer {
            position: grab,
            down: true,
            pressed: true,
            released: false,
        };
        assert!(slider(&mut session, &press, &s, &mut value));
        assert_eq!(session.dragging(), Some(SliderId::FieldOfView));
        assert_eq!(value, 90.0);

        let drag = Pointer {
            position: grab + Vec2::new(50.0, 40.0),
            down: true,
            ..Default::default()
        };
        slider(&mut session, &drag, &s, &mut value);
        assert_eq!(value, 105.0);

        let release = Pointer {
            position: drag.position,
            released: true,
            ..Default::default()
        };
        slider(&mut session, &release, &s, &mut value);
        assert_eq!(session.dragging(), None);
        assert_eq!(value, 105.0);
    }

    #[test]
    fn test_start_button_click() {
        let mut session = UiSession::new();
        let mut settings = Settings::default();
        let screen = Vec2::new(MENU_WIDTH, MENU_HEIGHT);
        let pointer = Pointer {
            position: Vec2::new(60.0, 140.0),
            released: true,
            ..Default::default()
        };
        let frame = main_menu(&mut session, &pointer, &mut settings, screen);
        assert_eq!(frame.action, Some(MenuAction::StartWalking));
        assert!(!frame.settings_changed);
    }

    #[test]
    fn test_font_toggle_marks_settings_changed() {
        let mut session = UiSession::new();
        let mut settings = Settings::default();
        let screen = Vec2::new(MENU_WIDTH, MENU_HEIGHT);
        let pointer = Pointer {
            position: Vec2::new(53.0 + 385.0 + 20.0, 40.0 + 90.0 + 70.0 + 20.0),
            released: true,
            ..Default::default()
        };
        let frame = main_menu(&mut session, &pointer, &mut settings, screen);
        assert!(frame.settings_changed);
        assert!(settings.clear_font);
        assert_eq!(frame.action, None);
    }

    #[test]
    fn test_idle_menu_leaves_settings_alone() {
        let mut session = UiSession::new();
        let mut settings = Settings {
            mouse_speed_x: -130,
            bob_intensity: 0.37,
            ..Default::default()
        };
        let expected = settings.clone();
        let frame = main_menu(
            &mut session,
            &Pointer::default(),
            &mut settings,
            Vec2::new(1280.0, 720.0),
        );
        assert_eq!(settings.mouse_speed_x, expected.mouse_speed_x);
        assert!((settings.bob_intensity - expected.bob_intensity).abs() < 1e-6);
        assert_eq!(frame.widgets.len(), 8);
    }

    #[test]
    fn test_slider_rows_are_stacked_under_the_toggle() {
        let mut session = UiSession::new();
        let mut settings = Settings::default();
        let screen = Vec2::new(MENU_WIDTH, MENU_HEIGHT);
        let frame = main_menu(&mut session, &Pointer::default(), &mut settings, screen);
        let tracks: Vec<Rect> = frame
            .widgets
            .iter()
            .filter_map(|w| match w {
                Widget::Slider { track, .. } => Some(*track),
                _ => None,
            })
            .collect();
        assert_eq!(tracks.len(), 4);
        for (i, track) in tracks.iter().enumerate() {
            assert_eq!(track.pos.x, 53.0 + SLIDER_OFFSET_X);
            assert_eq!(track.pos.y, 250.0 + 19.0 + ROW_HEIGHT * i as f32);
            assert_eq!(track.size.x, SLIDER_WIDTH);
        }
    }
}
