use log::{debug, warn};

use crate::shared::{StateDelta, Terrain, UnitId};

use super::Match;

impl Match {
    /// Single-step advance toward the enemy edge, invoked once per unit in
    /// the turn's resolution order. Off-board destinations and friendly
    /// blocks are no-ops; enemy contact is combat, not a move.
    pub(crate) fn move_forward(&mut self, id: UnitId) {
        let Some(unit) = self.units.get(id) else {
            return;
        };
        let (owner, col, row) = (unit.owner, unit.col, unit.row);
        let dest = col + owner.advance_dx();
        if !self.board.in_bounds(dest, row) {
            return;
        }
        match self.board.occupant_at(dest, row) {
            Some(other) => {
                if self.units.get(other).map(|u| u.owner) == Some(owner) {
                    debug!("unit {id} blocked by friendly {other} at ({dest}, {row})");
                } else {
                    self.attack(id, other);
                }
            }
            None => self.relocate(id, dest, row),
        }
    }

    /// Combat never moves the attacker unless the defender dies; a kill
    /// frees the cell and the attacker advances into it for free.
    fn attack(&mut self, attacker_id: UnitId, defender_id: UnitId) {
        let (Some(attacker), Some(defender)) =
            (self.units.get(attacker_id), self.units.get(defender_id))
        else {
            return;
        };
        // movement only ever produces adjacency, but combat enforces it anyway
        let distance = (attacker.col - defender.col).abs() + (attacker.row - defender.row).abs();
        if distance != 1 {
            warn!("attack from {attacker_id} on non-adjacent {defender_id} dropped");
            return;
        }
        let raw = attacker.attack;
        let mitigation = defender.defense_stacks as i32 * self.rules.defense_per_stack;
        // defense stacks reduce damage but never fully negate it
        let damage = (raw - mitigation).max(1);
        let (def_col, def_row) = (defender.col, defender.row);

        let hp = {
            let Some(defender) = self.units.get_mut(defender_id) else {
                return;
            };
            defender.hp -= damage;
            defender.hp
        };
        debug!("unit {attacker_id} hit {defender_id} for {damage} (raw {raw}), {hp} hp left");
        self.emit(StateDelta::UnitDamaged {
            id: defender_id,
            hp,
            damage,
        });

        if hp <= 0 {
            self.units.remove(defender_id);
            self.board.clear(def_col, def_row);
            self.emit(StateDelta::UnitDestroyed { id: defender_id });
            debug!("unit {defender_id} destroyed; {attacker_id} takes its cell");
            self.relocate(attacker_id, def_col, def_row);
        }
    }

    /// Updates occupancy, replicates the move and applies the landing
    /// cell's terrain. Callers have already validated the destination.
    pub(crate) fn relocate(&mut self, id: UnitId, col: i32, row: i32) {
        let Some(unit) = self.units.get_mut(id) else {
            return;
        };
        let (old_col, old_row) = (unit.col, unit.row);
        unit.col = col;
        unit.row = row;
        self.board.clear(old_col, old_row);
        self.board.occupy(col, row, id);
        let duration = self.rules.move_duration;
        self.emit(StateDelta::UnitMoved {
            id,
            col,
            row,
            duration,
        });
        self.apply_terrain_bonus(id);
    }

    /// Applied once per landing (spawn, move, kill-advance). Attack and
    /// defense stacks accumulate permanently; healing is capped at max HP;
    /// resource tiles pay the unit's owner.
    pub(crate) fn apply_terrain_bonus(&mut self, id: UnitId) {
        let Some(unit) = self.units.get(id) else {
            return;
        };
        let Some(cell) = self.board.cell_at(unit.col, unit.row) else {
            return;
        };
        match cell.terrain() {
            Terrain::Normal => {}
            Terrain::AttackBonus => {
                let per_stack = self.rules.attack_per_stack;
                if let Some(unit) = self.units.get_mut(id) {
                    unit.attack_stacks += 1;
                    unit.recalculate_attack(per_stack);
                }
                self.emit_stats(id);
            }
            Terrain::DefenseBonus => {
                if let Some(unit) = self.units.get_mut(id) {
                    unit.defense_stacks += 1;
                }
                self.emit_stats(id);
            }
            Terrain::Healing => {
                let heal = self.rules.heal_per_landing;
                if let Some(unit) = self.units.get_mut(id) {
                    unit.hp = (unit.hp + heal).min(unit.max_hp);
                }
                self.emit_stats(id);
            }
            Terrain::ResourceGen => {
                let owner = unit.owner;
                let amount = self.rules.resource_per_landing;
                let balance = self.economy.credit(owner, amount);
                self.emit(StateDelta::BalanceChanged {
                    player: owner,
                    balance,
                });
            }
        }
    }

    fn emit_stats(&mut self, id: UnitId) {
        if let Some(unit) = self.units.get(id) {
            let delta = StateDelta::UnitStatsChanged {
                id,
                hp: unit.hp,
                attack: unit.attack,
                attack_stacks: unit.attack_stacks,
                defense_stacks: unit.defense_stacks,
            };
            self.emit(delta);
        }
    }
}
