use super::delta::BoardSync;
use super::phase::Phase;
use super::player::PlayerSlot;
use super::unit::UnitView;

/// Full authoritative state, sent to a participant on login or on an
/// explicit resync request. Applying a snapshot replaces everything a
/// replica previously held.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MatchSnapshot {
    pub board: BoardSync,
    pub units: Vec<UnitView>,
    pub balances: [u32; 2],
    pub phase: Phase,
    pub winner: Option<PlayerSlot>,
    pub current: PlayerSlot,
    pub time_left: f32,
    pub rematch_ready: [bool; 2],
    pub rematch_time_left: f32,
    pub connected: [bool; 2],
}
