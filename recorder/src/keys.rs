use serde::{Deserialize, Serialize};

/// Hardware key identifiers the graph reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scancode {
    Select,
    Up,
    Down,
    Left,
    Right,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub scancode: Scancode,
}

impl KeyEvent {
    pub fn down(scancode: Scancode) -> Self {
        Self {
            kind: KeyEventKind::Down,
            scancode,
        }
    }

    pub fn up(scancode: Scancode) -> Self {
        Self {
            kind: KeyEventKind::Up,
            scancode,
        }
    }

    /// True for a key-down event of `scancode`
    pub fn is_down(&self, scancode: Scancode) -> bool {
        self.kind == KeyEventKind::Down && self.scancode == scancode
    }
}
