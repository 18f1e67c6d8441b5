use super::unit::UnitKind;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub enum SBPacket {
    Login(Login),
    Deploy(Deploy),
    EndTurn,
    RematchReady(bool),
    GiveMeState,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Login {
    pub username: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone)]
pub struct Deploy {
    pub kind: UnitKind,
    pub col: i32,
    pub row: i32,
}
