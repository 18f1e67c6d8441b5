//! Observer-side state. A replica never mutates on its own: it applies the
//! snapshot it receives on login and the `StateDelta` broadcasts after it,
//! in the order the authority issued them. Presentation reads from here;
//! interpolation of moves is a display concern and the replica records only
//! final positions.

use std::collections::HashMap;

use log::warn;

use crate::shared::{
    BoardSync, MatchSnapshot, Phase, PlayerSlot, StateDelta, Terrain, UnitId, UnitView,
};

#[derive(Debug)]
pub struct Replica {
    pub board: Option<BoardSync>,
    pub units: HashMap<UnitId, UnitView>,
    pub balances: [u32; 2],
    pub phase: Phase,
    pub winner: Option<PlayerSlot>,
    pub current: PlayerSlot,
    pub time_left: f32,
    pub rematch_ready: [bool; 2],
    pub rematch_time_left: f32,
    pub connected: [bool; 2],
}

impl Replica {
    pub fn new() -> Self {
        Self {
            board: None,
            units: HashMap::new(),
            balances: [0; 2],
            phase: Phase::Lobby,
            winner: None,
            current: PlayerSlot::One,
            time_left: 0.0,
            rematch_ready: [false; 2],
            rematch_time_left: 0.0,
            connected: [false; 2],
        }
    }

    /// Replaces everything previously held; used on login and resync.
    pub fn apply_snapshot(&mut self, snapshot: MatchSnapshot) {
        self.units = snapshot.units.into_iter().map(|u| (u.id, u)).collect();
        self.board = Some(snapshot.board);
        self.balances = snapshot.balances;
        self.phase = snapshot.phase;
        self.winner = snapshot.winner;
        self.current = snapshot.current;
        self.time_left = snapshot.time_left;
        self.rematch_ready = snapshot.rematch_ready;
        self.rematch_time_left = snapshot.rematch_time_left;
        self.connected = snapshot.connected;
    }

    pub fn apply(&mut self, delta: &StateDelta) {
        match delta {
            StateDelta::BoardGenerated(sync) => {
                self.board = Some(sync.clone());
            }
            StateDelta::UnitSpawned(view) => {
                self.units.insert(view.id, view.clone());
            }
            StateDelta::UnitMoved { id, col, row, .. } => {
                if let Some(unit) = self.units.get_mut(id) {
                    unit.col = *col;
                    unit.row = *row;
                } else {
                    warn!("move for unknown unit {id} ignored");
                }
            }
            StateDelta::UnitDamaged { id, hp, .. } => {
                if let Some(unit) = self.units.get_mut(id) {
                    unit.hp = *hp;
                }
            }
            StateDelta::UnitStatsChanged {
                id,
                hp,
                attack,
                attack_stacks,
                defense_stacks,
            } => {
                if let Some(unit) = self.units.get_mut(id) {
                    unit.hp = *hp;
                    unit.attack = *attack;
                    unit.attack_stacks = *attack_stacks;
                    unit.defense_stacks = *defense_stacks;
                }
            }
            StateDelta::UnitDestroyed { id } => {
                self.units.remove(id);
            }
            StateDelta::BalanceChanged { player, balance } => {
                self.balances[player.index()] = *balance;
            }
            StateDelta::TurnChanged { current, time_left } => {
                self.current = *current;
                self.time_left = *time_left;
            }
            StateDelta::TimerSync { time_left } => {
                self.time_left = *time_left;
            }
            StateDelta::PhaseChanged { phase, winner } => {
                self.phase = *phase;
                self.winner = *winner;
                if *phase == Phase::Lobby {
                    self.units.clear();
                }
            }
            StateDelta::RematchStatus { ready, time_left } => {
                self.rematch_ready = *ready;
                self.rematch_time_left = *time_left;
            }
            StateDelta::RosterChanged { connected } => {
                self.connected = *connected;
            }
            StateDelta::MatchReset {
                balance,
                current,
                time_left,
            } => {
                self.units.clear();
                self.balances = [*balance; 2];
                self.phase = Phase::Active;
                self.winner = None;
                self.current = *current;
                self.time_left = *time_left;
                self.rematch_ready = [false; 2];
                self.rematch_time_left = 0.0;
            }
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.get(&id)
    }

    pub fn unit_at(&self, col: i32, row: i32) -> Option<&UnitView> {
        self.units.values().find(|u| u.col == col && u.row == row)
    }

    pub fn terrain_at(&self, col: i32, row: i32) -> Option<Terrain> {
        let board = self.board.as_ref()?;
        if col < 0 || col >= board.columns || row < 0 || row >= board.rows {
            return None;
        }
        board
            .terrain
            .get((row * board.columns + col) as usize)
            .copied()
    }
}

impl Default for Replica {
    fn default() -> Self {
        Self::new()
    }
}
