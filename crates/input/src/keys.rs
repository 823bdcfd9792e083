/// Keys that drive camera movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKey {
    Forward,
    Backward,
    Left,
    Right,
}

impl MovementKey {
    pub const ALL: [MovementKey; 4] = [
        MovementKey::Forward,
        MovementKey::Backward,
        MovementKey::Left,
        MovementKey::Right,
    ];

    /// Map a key identifier (`"w"`, `"A"`, …) to a movement key.
    /// Matching is case-insensitive; anything else is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" => Some(MovementKey::Forward),
            "s" => Some(MovementKey::Backward),
            "a" => Some(MovementKey::Left),
            "d" => Some(MovementKey::Right),
            _ => None,
        }
    }

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of currently held movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn set(&mut self, key: MovementKey, pressed: bool) {
        if pressed {
            self.0 |= key.bit();
        } else {
            self.0 &= !key.bit();
        }
    }

    pub fn contains(&self, key: MovementKey) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = MovementKey> + '_ {
        MovementKey::ALL.into_iter().filter(|k| self.contains(*k))
    }
}
