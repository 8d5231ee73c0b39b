//! Mapping desktop input onto the system back action.

use winit::event::MouseButton;
use winit::keyboard::{Key, ModifiersState, NamedKey};

/// Keys that act as "back": the dedicated browser/back keys and Alt+Left.
pub fn is_back_key(key: &Key, modifiers: ModifiersState) -> bool {
    match key {
        Key::Named(NamedKey::BrowserBack) | Key::Named(NamedKey::GoBack) => true,
        Key::Named(NamedKey::ArrowLeft) => modifiers.alt_key(),
        _ => false,
    }
}

/// The thumb "back" button on five-button mice.
pub fn is_back_button(button: MouseButton) -> bool {
    matches!(button, MouseButton::Back)
}
