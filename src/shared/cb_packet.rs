use uuid::Uuid;

use crate::shared::Color;

use super::delta::StateDelta;
use super::player::{PlayerSlot, PlayerView};
use super::snapshot::MatchSnapshot;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub enum CBPacket {
    LoginAccepted(LoginAccepted),
    SyncPlayers(SyncPlayers),
    Snapshot(Snapshot),
    Delta(StateDelta),
    Rejected(Rejected),
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct LoginAccepted {
    pub player_id: Uuid,
    pub slot: PlayerSlot,
    pub color: Color,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct SyncPlayers {
    pub players: Vec<PlayerView>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct Snapshot {
    pub snapshot: MatchSnapshot,
}

/// Point-to-point answer to a rejected request. Never broadcast; the match
/// state is unchanged and the receiver shows it as a transient message.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct Rejected {
    pub reason: String,
}
