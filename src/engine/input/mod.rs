// Keyboard input
//
// - `bindings`: key to command table, generic over the command type
// - `keyboard`: filters raw winit key events down to fresh key presses
//
// The game layer owns the command type and the default table; the engine
// only resolves keys.

pub mod bindings;
pub mod keyboard;

pub use bindings::KeyBindings;
pub use keyboard::pressed_key_of;
