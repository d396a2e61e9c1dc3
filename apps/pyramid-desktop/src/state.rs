use crate::keymap;
use pyramid_common::Transform;
use pyramid_input::{Action, MovementSet};
use pyramid_navigation::{NavigationConfig, NavigationState};
use pyramid_render::RenderView;
use std::time::Instant;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels of touchpad travel that count as one wheel notch.
const PIXELS_PER_LINE: f32 = 20.0;

/// Window-independent application state.
pub struct AppState {
    pub navigation: NavigationState,
    pub held: MovementSet,
    pub model: Transform,
    pub show_hud: bool,
    quit_requested: bool,
    started: Instant,
}

impl AppState {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            navigation: NavigationState::new(config),
            held: MovementSet::new(),
            model: Transform::pyramid(),
            show_hud: true,
            quit_requested: false,
            started: Instant::now(),
        }
    }

    /// Seconds since the application started.
    pub fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Route an input event to the camera, keys and HUD toggles.
    ///
    /// Pointer samples always update the cursor baseline. While the overlay
    /// owns the pointer they do not turn the camera, and the first sample
    /// after it lets go measures from the last overlay sample.
    pub fn handle_input(&mut self, event: &WindowEvent, overlay_consumed: bool) {
        match event {
            WindowEvent::CursorMoved { position, .. } if overlay_consumed => {
                self.navigation
                    .track_pointer(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor(position.x, position.y);
            }
            WindowEvent::Focused(false) => self.focus_lost(),
            _ if overlay_consumed => {}
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => {
                self.handle_key(*key, *state == ElementState::Pressed, *repeat);
            }
            WindowEvent::MouseWheel { delta, .. } => self.handle_scroll(*delta),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        let action = keymap::action_for(key);
        if let Some(movement) = action.movement() {
            self.held.set(movement, pressed);
            return;
        }
        if !pressed || repeat {
            return;
        }

        match action {
            Action::ResetCamera => {
                self.navigation.apply_action(action);
            }
            Action::Quit => {
                tracing::info!("quit requested");
                self.quit_requested = true;
            }
            Action::ToggleHud => {
                self.show_hud = !self.show_hud;
            }
            Action::Move(_) | Action::Noop => {}
        }
    }

    pub fn handle_cursor(&mut self, x: f64, y: f64) {
        self.navigation.on_pointer_move(x as f32, y as f32);
    }

    pub fn handle_scroll(&mut self, delta: MouseScrollDelta) {
        self.navigation.on_scroll(scroll_lines(delta));
    }

    /// Keys released while unfocused never arrive; drop them all.
    pub fn focus_lost(&mut self) {
        self.held.clear();
    }

    /// Advance time, translate by held keys and capture this frame's matrices.
    pub fn frame(&mut self, now: f64, aspect: f32) -> RenderView {
        let elapsed = self.navigation.advance_frame(now);
        self.navigation.apply_directional_input(&self.held, elapsed);
        RenderView::capture(&self.navigation, &self.model, aspect)
    }
}

fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use pyramid_input::Movement;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, TouchPhase};

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            // SAFETY: only compared against other ids, never passed to the platform.
            device_id: unsafe { DeviceId::dummy() },
            position: PhysicalPosition::new(x, y),
        }
    }

    fn wheel(lines: f32) -> WindowEvent {
        WindowEvent::MouseWheel {
            // SAFETY: as above.
            device_id: unsafe { DeviceId::dummy() },
            delta: MouseScrollDelta::LineDelta(0.0, lines),
            phase: TouchPhase::Moved,
        }
    }

    fn state() -> AppState {
        AppState::new(NavigationConfig::default())
    }

    #[test]
    fn movement_keys_track_held_state() {
        let mut app = state();
        app.handle_key(KeyCode::KeyW, true, false);
        app.handle_key(KeyCode::KeyD, true, false);
        assert!(app.held.contains(Movement::Forward));
        assert!(app.held.contains(Movement::StrafeRight));

        app.handle_key(KeyCode::KeyW, false, false);
        assert!(!app.held.contains(Movement::Forward));
        assert_eq!(app.held.len(), 1);
    }

    #[test]
    fn frame_moves_by_elapsed_time() {
        let mut app = state();
        app.handle_key(KeyCode::KeyW, true, false);

        let first = app.frame(1.0, 1.0);
        assert_eq!(first.eye, Vec3::new(0.0, 0.5, 3.0));

        let second = app.frame(1.5, 1.0);
        assert!((second.eye - Vec3::new(0.0, 0.5, -2.0)).length() < 1e-5);
    }

    #[test]
    fn escape_requests_quit() {
        let mut app = state();
        assert!(!app.quit_requested());
        app.handle_key(KeyCode::Escape, true, false);
        assert!(app.quit_requested());
    }

    #[test]
    fn reset_key_returns_home() {
        let mut app = state();
        app.handle_key(KeyCode::KeyS, true, false);
        app.frame(0.0, 1.0);
        app.frame(2.0, 1.0);
        assert_ne!(app.navigation.position(), Vec3::new(0.0, 0.5, 3.0));

        app.handle_key(KeyCode::KeyF, true, false);
        assert_eq!(app.navigation.position(), Vec3::new(0.0, 0.5, 3.0));
        assert!(app.navigation.awaiting_first_move());
    }

    #[test]
    fn hud_toggle_ignores_key_repeat() {
        let mut app = state();
        assert!(app.show_hud);
        app.handle_key(KeyCode::F1, true, false);
        app.handle_key(KeyCode::F1, true, true);
        app.handle_key(KeyCode::F1, false, false);
        assert!(!app.show_hud);
    }

    #[test]
    fn cursor_drives_look_direction() {
        let mut app = state();
        app.handle_cursor(400.0, 300.0);
        app.handle_cursor(450.0, 300.0);
        assert_eq!(app.navigation.yaw(), -65.0);
    }

    #[test]
    fn scroll_line_and_pixel_deltas() {
        let mut app = state();
        app.handle_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        assert_eq!(app.navigation.movement_rate(), 8.0);

        app.handle_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)));
        assert_eq!(app.navigation.movement_rate(), 10.0);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut app = state();
        app.handle_key(KeyCode::KeyE, true, false);
        app.focus_lost();
        assert!(app.held.is_empty());
    }

    #[test]
    fn overlay_drag_does_not_jump_the_view() {
        let mut app = state();
        app.handle_input(&cursor_moved(400.0, 300.0), false);

        // Dragging the HUD window: egui owns every sample.
        for x in (410..=600).step_by(10) {
            app.handle_input(&cursor_moved(f64::from(x), 300.0), true);
        }
        assert_eq!(app.navigation.yaw(), -90.0);

        app.handle_input(&cursor_moved(601.0, 300.0), false);
        assert_eq!(app.navigation.yaw(), -89.5);
    }

    #[test]
    fn unconsumed_cursor_turns_the_camera() {
        let mut app = state();
        app.handle_input(&cursor_moved(400.0, 300.0), false);
        app.handle_input(&cursor_moved(450.0, 300.0), false);
        assert_eq!(app.navigation.yaw(), -65.0);
    }

    #[test]
    fn overlay_consumed_wheel_keeps_speed() {
        let mut app = state();
        app.handle_input(&wheel(3.0), true);
        assert_eq!(app.navigation.movement_rate(), 10.0);
        app.handle_input(&wheel(3.0), false);
        assert_eq!(app.navigation.movement_rate(), 7.0);
    }

    #[test]
    fn focus_loss_applies_even_when_overlay_consumes_it() {
        let mut app = state();
        app.handle_key(KeyCode::KeyW, true, false);
        app.handle_input(&WindowEvent::Focused(false), true);
        assert!(app.held.is_empty());
    }
}
