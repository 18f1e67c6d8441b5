use thiserror::Error;

/// Why the authority refused a request. Every variant is "ignore and
/// report": logged, answered to the requester, no state change and no
/// broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Reject {
    #[error("no cell at ({col}, {row})")]
    OutOfBounds { col: i32, row: i32 },
    #[error("cell ({col}, {row}) is already occupied")]
    Occupied { col: i32, row: i32 },
    #[error("column {col} is outside your deployment zone")]
    OutsideZone { col: i32 },
    #[error("insufficient resources: need {need}, have {have}")]
    InsufficientResources { need: u32, have: u32 },
    #[error("not your turn")]
    NotYourTurn,
    #[error("waiting for opponent")]
    WaitingForOpponent,
    #[error("match is not active")]
    NotActive,
    #[error("match has already started")]
    AlreadyStarted,
    #[error("no game over to rematch from")]
    NoRematchPending,
    #[error("match is full")]
    MatchFull,
}
