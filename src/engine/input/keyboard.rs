// Raw key event filtering

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// The key of a fresh key press, ignoring releases and auto-repeat
pub fn pressed_key(state: ElementState, physical_key: PhysicalKey, repeat: bool) -> Option<KeyCode> {
    match (state, physical_key) {
        (ElementState::Pressed, PhysicalKey::Code(code)) if !repeat => Some(code),
        _ => None,
    }
}

/// `pressed_key` for a winit event
pub fn pressed_key_of(event: &KeyEvent) -> Option<KeyCode> {
    pressed_key(event.state, event.physical_key, event.repeat)
}
