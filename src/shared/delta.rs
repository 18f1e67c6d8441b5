use super::phase::Phase;
use super::player::PlayerSlot;
use super::terrain::Terrain;
use super::unit::{UnitId, UnitView};

/// One authoritative mutation, broadcast to every observer in issue order.
/// Observers apply these to a `Replica`; nothing here is a request.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum StateDelta {
    BoardGenerated(BoardSync),
    UnitSpawned(UnitView),
    /// Final position is authoritative; `duration` only sizes the
    /// interpolated transition observers may play.
    UnitMoved {
        id: UnitId,
        col: i32,
        row: i32,
        duration: f32,
    },
    UnitDamaged {
        id: UnitId,
        hp: i32,
        damage: i32,
    },
    UnitStatsChanged {
        id: UnitId,
        hp: i32,
        attack: i32,
        attack_stacks: u32,
        defense_stacks: u32,
    },
    UnitDestroyed {
        id: UnitId,
    },
    BalanceChanged {
        player: PlayerSlot,
        balance: u32,
    },
    TurnChanged {
        current: PlayerSlot,
        time_left: f32,
    },
    TimerSync {
        time_left: f32,
    },
    PhaseChanged {
        phase: Phase,
        winner: Option<PlayerSlot>,
    },
    RematchStatus {
        ready: [bool; 2],
        time_left: f32,
    },
    RosterChanged {
        connected: [bool; 2],
    },
    /// Both players accepted a rematch: occupancy cleared, balances back to
    /// the starting constant, player One to move.
    MatchReset {
        balance: u32,
        current: PlayerSlot,
        time_left: f32,
    },
}

/// The board as generated on the authority, replayed verbatim on observers
/// so both sides hold an identical grid. Terrain is a flat row-major
/// sequence (`index = row * columns + col`).
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct BoardSync {
    pub columns: i32,
    pub rows: i32,
    pub cell_size: f32,
    pub origin: (f32, f32),
    pub terrain: Vec<Terrain>,
}
