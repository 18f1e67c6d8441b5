use serde::{Deserialize, Serialize};

use super::board::TerrainWeights;

/// Per-match rule constants. Cloned into a `Match` at construction; a config
/// reload applies to the next match, never a running one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rules {
    pub columns: i32,
    pub rows: i32,
    pub cell_size: f32,
    pub terrain_weights: TerrainWeights,
    pub starting_balance: u32, // resources each player begins with
    pub turn_income: u32,      // credited to the player whose turn begins
    pub turn_time_limit: f32,  // seconds per turn
    pub rematch_time_limit: f32,
    pub spawn_zone_width: i32, // columns on each player's own edge
    pub attack_per_stack: i32,
    pub defense_per_stack: i32,
    pub heal_per_landing: i32, // capped at max HP
    pub resource_per_landing: u32,
    pub move_duration: f32, // presentational interpolation only
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            columns: 8,
            rows: 5,
            cell_size: 1.0,
            terrain_weights: TerrainWeights::default(),
            starting_balance: 5,
            turn_income: 2,
            turn_time_limit: 15.0,
            rematch_time_limit: 30.0,
            spawn_zone_width: 3,
            attack_per_stack: 4,
            defense_per_stack: 3,
            heal_per_landing: 20,
            resource_per_landing: 2,
            move_duration: 0.5,
        }
    }
}
