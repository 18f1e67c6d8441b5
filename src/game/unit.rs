use std::collections::HashMap;

use crate::shared::{PlayerSlot, UnitId, UnitKind, UnitView};

/// Authoritative combat entity. Position, hit points and bonus stacks are
/// owned here; cells only hold the unit's id.
#[derive(Debug, Clone)]
pub struct Unit {
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

impl Unit {
    pub fn new(id: UnitId, kind: UnitKind, owner: PlayerSlot, col: i32, row: i32) -> Self {
        Self {
            id,
            kind,
            owner,
            col,
            row,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            attack: kind.base_attack(),
            attack_stacks: 0,
            defense_stacks: 0,
        }
    }

    /// Attack power is derived: base plus the accumulated attack stacks.
    pub fn recalculate_attack(&mut self, attack_per_stack: i32) {
        self.attack = self.kind.base_attack() + self.attack_stacks as i32 * attack_per_stack;
    }

    pub fn to_view(&self) -> UnitView {
        UnitView {
            id: self.id,
            kind: self.kind,
            owner: self.owner,
            col: self.col,
            row: self.row,
            hp: self.hp,
            max_hp: self.max_hp,
            attack: self.attack,
            attack_stacks: self.attack_stacks,
            defense_stacks: self.defense_stacks,
        }
    }
}

/// Sole owner of unit lifetime for one match. Ids stay unique across
/// rematch resets so a stale reference can never alias a new unit.
#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: HashMap<UnitId, Unit>,
    next_id: u32,
}

impl UnitRegistry {
    pub fn spawn(&mut self, kind: UnitKind, owner: PlayerSlot, col: i32, row: i32) -> UnitId {
        self.next_id += 1;
        let id = UnitId(self.next_id);
        self.units.insert(id, Unit::new(id, kind, owner, col, row));
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }
}
