pub mod board;
pub mod combat;
pub mod deploy;
pub mod economy;
pub mod reject;
pub mod rules;
pub mod turn;
pub mod unit;

pub use board::{Board, TerrainWeights};
pub use reject::Reject;
pub use rules::Rules;
pub use turn::TurnState;

use log::info;

use crate::shared::{MatchSnapshot, Phase, PlayerSlot, StateDelta, UnitId, UnitKind};

use economy::Economy;
use unit::{Unit, UnitRegistry};

/// One authoritative match: the single writer for board, units, economy and
/// turn state. Constructed per match and passed around explicitly, so
/// several matches can coexist in one process. Every mutation queues a
/// `StateDelta`; the transport drains and broadcasts them in issue order.
pub struct Match {
    rules: Rules,
    board: Board,
    units: UnitRegistry,
    economy: Economy,
    turn: TurnState,
    deltas: Vec<StateDelta>,
}

impl Match {
    pub fn new(rules: Rules) -> Self {
        let board = Board::generate(
            rules.columns,
            rules.rows,
            rules.cell_size,
            &rules.terrain_weights,
        );
        Self::with_board(rules, board)
    }

    /// Takes a pre-built board; tests and replays inject deterministic
    /// terrain this way.
    pub fn with_board(rules: Rules, board: Board) -> Self {
        let turn = TurnState::new(rules.turn_time_limit);
        Self {
            board,
            units: UnitRegistry::default(),
            economy: Economy::new(rules.starting_balance),
            turn,
            rules,
            deltas: Vec::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Transport-driven roster update. A participant dropping out pauses
    /// resolution (see `tick`) instead of faulting; leaving during rematch
    /// negotiation counts as a decline.
    pub fn set_connected(&mut self, player: PlayerSlot, connected: bool) {
        let flag = &mut self.turn.connected[player.index()];
        if *flag == connected {
            return;
        }
        *flag = connected;
        let roster = self.turn.connected;
        self.emit(StateDelta::RosterChanged { connected: roster });
        if !connected {
            info!("{player:?} disconnected");
            if self.turn.phase == Phase::RematchPending {
                self.return_to_lobby();
            }
        }
    }

    pub fn both_connected(&self) -> bool {
        self.turn.connected == [true, true]
    }

    /// Lobby -> Active, driven by the session bootstrap once both seats are
    /// filled. Replays the board and the opening state to observers.
    pub fn begin(&mut self) -> Result<(), Reject> {
        if self.turn.phase != Phase::Lobby {
            return Err(Reject::AlreadyStarted);
        }
        if !self.both_connected() {
            return Err(Reject::WaitingForOpponent);
        }
        self.turn.phase = Phase::Active;
        self.turn.current = PlayerSlot::One;
        self.turn.time_left = self.rules.turn_time_limit;
        self.turn.winner = None;
        let sync = self.board.to_sync();
        self.emit(StateDelta::BoardGenerated(sync));
        self.emit(StateDelta::PhaseChanged {
            phase: Phase::Active,
            winner: None,
        });
        for player in [PlayerSlot::One, PlayerSlot::Two] {
            let balance = self.economy.balance(player);
            self.emit(StateDelta::BalanceChanged { player, balance });
        }
        let time_left = self.turn.time_left;
        self.emit(StateDelta::TurnChanged {
            current: PlayerSlot::One,
            time_left,
        });
        info!("match started; {:?} to move", PlayerSlot::One);
        Ok(())
    }

    /// Admits or rejects a deployment request. On success the treasury is
    /// debited, the unit placed, its full initial state replicated and the
    /// landing cell's terrain applied.
    pub fn deploy(
        &mut self,
        player: PlayerSlot,
        kind: UnitKind,
        col: i32,
        row: i32,
    ) -> Result<UnitId, Reject> {
        if self.turn.phase != Phase::Active {
            return Err(Reject::NotActive);
        }
        if player != self.turn.current {
            return Err(Reject::NotYourTurn);
        }
        let total = deploy::can_deploy(
            &self.board,
            &self.economy,
            &self.rules,
            player,
            kind.cost(),
            col,
            row,
        )?;
        if !self.economy.try_debit(player, total) {
            // unreachable after can_deploy, kept as a guard
            return Err(Reject::InsufficientResources {
                need: total,
                have: self.economy.balance(player),
            });
        }
        let balance = self.economy.balance(player);
        self.emit(StateDelta::BalanceChanged { player, balance });
        let id = self.units.spawn(kind, player, col, row);
        self.board.occupy(col, row, id);
        if let Some(unit) = self.units.get(id) {
            let view = unit.to_view();
            self.emit(StateDelta::UnitSpawned(view));
        }
        self.apply_terrain_bonus(id);
        info!("{player:?} deployed {kind:?} {id} at ({col}, {row}) for {total}");
        Ok(id)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut units: Vec<_> = self.units.iter().map(Unit::to_view).collect();
        units.sort_by_key(|u| u.id);
        MatchSnapshot {
            board: self.board.to_sync(),
            units,
            balances: self.economy.balances(),
            phase: self.turn.phase,
            winner: self.turn.winner,
            current: self.turn.current,
            time_left: self.turn.time_left,
            rematch_ready: self.turn.rematch_ready,
            rematch_time_left: self.turn.rematch_time_left,
            connected: self.turn.connected,
        }
    }

    /// Hands the queued broadcast batch to the transport, in issue order.
    pub fn drain_deltas(&mut self) -> Vec<StateDelta> {
        std::mem::take(&mut self.deltas)
    }

    pub(crate) fn emit(&mut self, delta: StateDelta) {
        self.deltas.push(delta);
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::shared::Terrain;

    pub(crate) fn rules() -> Rules {
        Rules::default()
    }

    pub(crate) fn flat_board(rules: &Rules) -> Board {
        let cells = (rules.columns * rules.rows) as usize;
        Board::from_terrain(
            rules.columns,
            rules.rows,
            rules.cell_size,
            vec![Terrain::Normal; cells],
        )
        .expect("board")
    }

    pub(crate) fn board_with(rules: &Rules, special: &[((i32, i32), Terrain)]) -> Board {
        let mut terrain = vec![Terrain::Normal; (rules.columns * rules.rows) as usize];
        for ((col, row), t) in special {
            terrain[(row * rules.columns + col) as usize] = *t;
        }
        Board::from_terrain(rules.columns, rules.rows, rules.cell_size, terrain).expect("board")
    }

    pub(crate) fn active_match(board: Board) -> Match {
        let mut m = Match::with_board(rules(), board);
        m.set_connected(PlayerSlot::One, true);
        m.set_connected(PlayerSlot::Two, true);
        m.begin().expect("begin");
        m.drain_deltas();
        m
    }

    /// Places a unit directly, bypassing validation and economy, for
    /// scenario setup.
    pub(crate) fn place(
        m: &mut Match,
        kind: UnitKind,
        owner: PlayerSlot,
        col: i32,
        row: i32,
    ) -> UnitId {
        let id = m.units.spawn(kind, owner, col, row);
        m.board.occupy(col, row, id);
        id
    }
}
