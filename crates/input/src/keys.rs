use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The fixed set of keys the view layer polls each frame.
///
/// Hosts translate their own key codes into these; nothing downstream sees
/// platform key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKey {
    W,
    A,
    S,
    D,
    Q,
    E,
    One,
    Two,
    Three,
    Four,
    O,
    P,
    Escape,
}

impl ViewKey {
    pub const ALL: [ViewKey; 13] = [
        ViewKey::W,
        ViewKey::A,
        ViewKey::S,
        ViewKey::D,
        ViewKey::Q,
        ViewKey::E,
        ViewKey::One,
        ViewKey::Two,
        ViewKey::Three,
        ViewKey::Four,
        ViewKey::O,
        ViewKey::P,
        ViewKey::Escape,
    ];

    /// Camera translation bound to this key, if any.
    pub fn movement(self) -> Option<Movement> {
        match self {
            ViewKey::W => Some(Movement::Forward),
            ViewKey::S => Some(Movement::Backward),
            ViewKey::A => Some(Movement::Left),
            ViewKey::D => Some(Movement::Right),
            ViewKey::Q => Some(Movement::Up),
            ViewKey::E => Some(Movement::Down),
            _ => None,
        }
    }
}

/// Camera translation directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Key-down polling, queried once per frame.
pub trait KeyState {
    fn is_pressed(&self, key: ViewKey) -> bool;
}

impl KeyState for HashSet<ViewKey> {
    fn is_pressed(&self, key: ViewKey) -> bool {
        self.contains(&key)
    }
}

impl KeyState for [ViewKey] {
    fn is_pressed(&self, key: ViewKey) -> bool {
        self.contains(&key)
    }
}

impl<const N: usize> KeyState for [ViewKey; N] {
    fn is_pressed(&self, key: ViewKey) -> bool {
        self.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_bindings() {
        assert_eq!(ViewKey::W.movement(), Some(Movement::Forward));
        assert_eq!(ViewKey::Q.movement(), Some(Movement::Up));
        assert_eq!(ViewKey::E.movement(), Some(Movement::Down));
        assert_eq!(ViewKey::O.movement(), None);
        assert_eq!(ViewKey::Escape.movement(), None);
    }

    #[test]
    fn exactly_six_movement_keys() {
        let bound = ViewKey::ALL.iter().filter(|k| k.movement().is_some()).count();
        assert_eq!(bound, 6);
    }

    #[test]
    fn hash_set_and_array_polling() {
        let mut held = HashSet::new();
        held.insert(ViewKey::A);
        assert!(held.is_pressed(ViewKey::A));
        assert!(!held.is_pressed(ViewKey::D));

        let pressed = [ViewKey::P, ViewKey::Escape];
        assert!(pressed.is_pressed(ViewKey::Escape));
        assert!(!pressed.is_pressed(ViewKey::O));
    }
}
