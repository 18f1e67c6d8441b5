use uuid::Uuid;

use super::Color;

/// Seat in a two-player match. Player One advances toward higher columns,
/// player Two toward lower columns.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub fn opponent(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Column step of this player's forward direction.
    pub fn advance_dx(self) -> i32 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => -1,
        }
    }

    /// Index into per-player `[_; 2]` tables.
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// Presentation cue replicated with every spawn: player One units are
    /// yellow and face right, player Two units are cyan and face left.
    pub fn color(self) -> Color {
        match self {
            PlayerSlot::One => Color { r: 255, g: 255, b: 0, a: 255 },
            PlayerSlot::Two => Color { r: 0, g: 255, b: 255, a: 255 },
        }
    }

    pub fn faces_left(self) -> bool {
        matches!(self, PlayerSlot::Two)
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlayerView {
    pub id: Uuid,
    pub name: String,
    pub slot: PlayerSlot,
    pub color: Color,
}
