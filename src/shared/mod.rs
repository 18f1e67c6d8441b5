pub mod terrain;
pub mod cb_packet;
pub mod sb_packet;
pub mod player;
pub mod unit;
pub mod phase;
pub mod delta;
pub mod snapshot;

pub use terrain::Terrain;
pub use cb_packet::CBPacket;
pub use sb_packet::SBPacket;
pub use player::{PlayerSlot, PlayerView};
pub use unit::{UnitId, UnitKind, UnitView};
pub use phase::Phase;
pub use delta::{BoardSync, StateDelta};
pub use snapshot::MatchSnapshot;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}
