use crate::message::Message;
use gallery_types::Key;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Close,
    Prev,
    Next,
}

impl KeyAction {
    pub fn message(self) -> Message {
        match self {
            KeyAction::Close => Message::Close,
            KeyAction::Prev => Message::Prev,
            KeyAction::Next => Message::Next,
        }
    }
}

pub fn init_key_binds() -> HashMap<Key, KeyAction> {
    let mut binds = HashMap::new();

    binds.insert(Key::Escape, KeyAction::Close);

    // Navigation arrow keys
    binds.insert(Key::ArrowLeft, KeyAction::Prev);
    binds.insert(Key::ArrowRight, KeyAction::Next);

    binds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let binds = init_key_binds();
        assert_eq!(binds.get(&Key::Escape), Some(&KeyAction::Close));
        assert_eq!(binds.get(&Key::ArrowLeft), Some(&KeyAction::Prev));
        assert_eq!(binds.get(&Key::ArrowRight), Some(&KeyAction::Next));
        assert!(binds.get(&Key::Other).is_none());
    }

    #[test]
    fn test_actions_map_to_messages() {
        assert_eq!(KeyAction::Close.message(), Message::Close);
        assert_eq!(KeyAction::Prev.message(), Message::Prev);
        assert_eq!(KeyAction::Next.message(), Message::Next);
    }
}
