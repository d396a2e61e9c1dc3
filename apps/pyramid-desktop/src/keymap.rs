use pyramid_input::{Action, Movement};
use winit::keyboard::KeyCode;

/// Desktop key bindings.
pub fn action_for(key: KeyCode) -> Action {
    match key {
        KeyCode::KeyW => Action::Move(Movement::Forward),
        KeyCode::KeyS => Action::Move(Movement::Backward),
        KeyCode::KeyA => Action::Move(Movement::StrafeLeft),
        KeyCode::KeyD => Action::Move(Movement::StrafeRight),
        KeyCode::KeyQ => Action::Move(Movement::Descend),
        KeyCode::KeyE => Action::Move(Movement::Ascend),
        KeyCode::KeyF => Action::ResetCamera,
        KeyCode::Escape => Action::Quit,
        KeyCode::F1 => Action::ToggleHud,
        _ => Action::Noop,
    }
}

pub const HELP: &str = "WASD: Move | Q/E: Down/Up | Mouse: Look | Scroll: Speed | F: Reset | F1: Overlay | Esc: Quit";
