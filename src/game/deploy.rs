use crate::shared::PlayerSlot;

use super::board::Board;
use super::economy::Economy;
use super::reject::Reject;
use super::rules::Rules;

/// Extra cost for deploying away from the player's own board edge: the edge
/// column is free, each column further forward adds one. Contested frontline
/// deployment is strictly more expensive.
pub fn surcharge(rules: &Rules, player: PlayerSlot, col: i32) -> u32 {
    let depth = match player {
        PlayerSlot::One => col,
        PlayerSlot::Two => rules.columns - 1 - col,
    };
    depth.max(0) as u32
}

/// Player One may deploy in the first `spawn_zone_width` columns, player Two
/// in the last.
pub fn in_spawn_zone(rules: &Rules, player: PlayerSlot, col: i32) -> bool {
    match player {
        PlayerSlot::One => col >= 0 && col < rules.spawn_zone_width,
        PlayerSlot::Two => col >= rules.columns - rules.spawn_zone_width && col < rules.columns,
    }
}

/// Pure admission check, no side effects. Rules in order: the cell must
/// exist and be empty, the column must lie in the player's zone, and the
/// balance must cover base cost plus surcharge. Returns the total cost to
/// debit on success.
pub fn can_deploy(
    board: &Board,
    economy: &Economy,
    rules: &Rules,
    player: PlayerSlot,
    base_cost: u32,
    col: i32,
    row: i32,
) -> Result<u32, Reject> {
    let cell = board
        .cell_at(col, row)
        .ok_or(Reject::OutOfBounds { col, row })?;
    if cell.is_occupied() {
        return Err(Reject::Occupied { col, row });
    }
    if !in_spawn_zone(rules, player, col) {
        return Err(Reject::OutsideZone { col });
    }
    let total = base_cost + surcharge(rules, player, col);
    let have = economy.balance(player);
    if have < total {
        return Err(Reject::InsufficientResources { need: total, have });
    }
    Ok(total)
}
