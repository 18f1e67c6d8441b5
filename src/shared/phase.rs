#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Phase {
    Lobby,
    Active,
    GameOver,
    RematchPending,
}
