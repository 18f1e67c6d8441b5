use super::player::PlayerSlot;

#[derive(
    serde::Serialize,
    serde::Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Tank,
    Jeep,
    Soldier,
}

impl UnitKind {
    pub fn max_hp(self) -> i32 {
        match self {
            UnitKind::Tank => 12,
            UnitKind::Jeep => 6,
            UnitKind::Soldier => 3,
        }
    }

    pub fn base_attack(self) -> i32 {
        match self {
            UnitKind::Tank => 5,
            UnitKind::Jeep => 3,
            UnitKind::Soldier => 1,
        }
    }

    pub fn cost(self) -> u32 {
        match self {
            UnitKind::Tank => 4,
            UnitKind::Jeep => 2,
            UnitKind::Soldier => 1,
        }
    }
}

/// Replicated view of one unit: everything an observer needs to render it.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: PlayerSlot,
    pub col: i32,
    pub row: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub attack_stacks: u32,
    pub defense_stacks: u32,
}
