//! Authoritative simulation core for a two-player, turn-based tactical
//! battle on a rectangular grid, plus the wire types and observer-side
//! replica that keep connected clients consistent with the authority.

pub mod game;
pub mod replica;
pub mod shared;
