use log::{debug, info};

use crate::shared::{Phase, PlayerSlot, StateDelta, UnitId};

use super::economy::Economy;
use super::{Match, Reject};

/// Turn, phase and rematch bookkeeping for one match.
#[derive(Debug, Clone)]
pub struct TurnState {
    pub phase: Phase,
    pub current: PlayerSlot,
    pub time_left: f32,
    pub winner: Option<PlayerSlot>,
    pub rematch_ready: [bool; 2],
    pub rematch_time_left: f32,
    pub connected: [bool; 2],
}

impl TurnState {
    pub(crate) fn new(turn_time_limit: f32) -> Self {
        Self {
            phase: Phase::Lobby,
            current: PlayerSlot::One,
            time_left: turn_time_limit,
            winner: None,
            rematch_ready: [false; 2],
            rematch_time_left: 0.0,
            connected: [false; 2],
        }
    }
}

impl Match {
    /// Explicit end-turn request. Only the player to move may end the turn;
    /// a duplicate of an already-processed request arrives after the switch
    /// and fails the current-player check, which is the at-most-once
    /// processing the transport does not provide.
    pub fn end_turn(&mut self, requester: PlayerSlot) -> Result<(), Reject> {
        if self.turn.phase != Phase::Active {
            return Err(Reject::NotActive);
        }
        if requester != self.turn.current {
            return Err(Reject::NotYourTurn);
        }
        if !self.both_connected() {
            return Err(Reject::WaitingForOpponent);
        }
        self.resolve_turn();
        Ok(())
    }

    /// Cooperative countdown driven by the authority's periodic tick. Turn
    /// resolution pauses rather than faults while a participant is missing;
    /// rematch negotiation times out back to the lobby.
    pub fn tick(&mut self, dt: f32) {
        match self.turn.phase {
            Phase::Active => {
                if !self.both_connected() {
                    return;
                }
                let before = self.turn.time_left.ceil();
                self.turn.time_left -= dt;
                if self.turn.time_left <= 0.0 {
                    info!("turn timer expired for {:?}", self.turn.current);
                    self.resolve_turn();
                } else if self.turn.time_left.ceil() < before {
                    let time_left = self.turn.time_left;
                    self.emit(StateDelta::TimerSync { time_left });
                }
            }
            Phase::RematchPending => {
                self.turn.rematch_time_left -= dt;
                if self.turn.rematch_time_left <= 0.0 {
                    info!("rematch negotiation timed out");
                    self.return_to_lobby();
                }
            }
            Phase::Lobby | Phase::GameOver => {}
        }
    }

    fn resolve_turn(&mut self) {
        let mover = self.turn.current;
        let mut order: Vec<(i32, i32, UnitId)> = self
            .units
            .iter()
            .filter(|u| u.owner == mover)
            .map(|u| (u.col, u.row, u.id))
            .collect();
        // Most-forward unit first, then top row: a lead unit's kill can free
        // the cell a trailing unit moves into within the same turn.
        match mover {
            PlayerSlot::One => order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1))),
            PlayerSlot::Two => order.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1))),
        }
        for (_, _, id) in order {
            self.move_forward(id);
        }

        // checked at the moment the movement phase completes, not before
        if self.victory_for(mover) {
            info!("{mover:?} reached the far column and wins");
            self.turn.phase = Phase::GameOver;
            self.turn.winner = Some(mover);
            self.emit(StateDelta::PhaseChanged {
                phase: Phase::GameOver,
                winner: Some(mover),
            });
            return;
        }

        let next = mover.opponent();
        self.turn.current = next;
        self.turn.time_left = self.rules.turn_time_limit;
        let balance = self.economy.credit(next, self.rules.turn_income);
        self.emit(StateDelta::BalanceChanged {
            player: next,
            balance,
        });
        let time_left = self.turn.time_left;
        self.emit(StateDelta::TurnChanged {
            current: next,
            time_left,
        });
        debug!("turn switched to {next:?}");
    }

    fn victory_for(&self, player: PlayerSlot) -> bool {
        let far = self.board.far_column(player);
        (0..self.board.rows()).any(|row| {
            self.board
                .occupant_at(far, row)
                .and_then(|id| self.units.get(id))
                .map(|u| u.owner)
                == Some(player)
        })
    }

    /// Rematch negotiation: the first ready toggle opens a countdown, both
    /// flags reset the match, a decline or the countdown's expiry aborts to
    /// the lobby.
    pub fn set_rematch_ready(&mut self, player: PlayerSlot, ready: bool) -> Result<(), Reject> {
        match self.turn.phase {
            Phase::GameOver => {
                if !ready {
                    return Ok(()); // nothing to withdraw
                }
                self.turn.phase = Phase::RematchPending;
                self.turn.rematch_ready = [false; 2];
                self.turn.rematch_ready[player.index()] = true;
                self.turn.rematch_time_left = self.rules.rematch_time_limit;
                let winner = self.turn.winner;
                self.emit(StateDelta::PhaseChanged {
                    phase: Phase::RematchPending,
                    winner,
                });
                self.emit_rematch_status();
                Ok(())
            }
            Phase::RematchPending => {
                if !ready {
                    info!("{player:?} declined the rematch");
                    self.return_to_lobby();
                    return Ok(());
                }
                self.turn.rematch_ready[player.index()] = true;
                if self.turn.rematch_ready == [true, true] {
                    self.reset_for_rematch();
                } else {
                    self.emit_rematch_status();
                }
                Ok(())
            }
            Phase::Lobby | Phase::Active => Err(Reject::NoRematchPending),
        }
    }

    fn emit_rematch_status(&mut self) {
        let ready = self.turn.rematch_ready;
        let time_left = self.turn.rematch_time_left;
        self.emit(StateDelta::RematchStatus { ready, time_left });
    }

    fn reset_for_rematch(&mut self) {
        info!("both players ready; resetting for rematch");
        self.board.clear_all_occupants();
        self.units.clear();
        self.economy = Economy::new(self.rules.starting_balance);
        self.turn.phase = Phase::Active;
        self.turn.current = PlayerSlot::One;
        self.turn.time_left = self.rules.turn_time_limit;
        self.turn.winner = None;
        self.turn.rematch_ready = [false; 2];
        self.turn.rematch_time_left = 0.0;
        self.emit(StateDelta::MatchReset {
            balance: self.rules.starting_balance,
            current: PlayerSlot::One,
            time_left: self.rules.turn_time_limit,
        });
    }

    pub(crate) fn return_to_lobby(&mut self) {
        self.board.clear_all_occupants();
        self.units.clear();
        self.economy = Economy::new(self.rules.starting_balance);
        self.turn.phase = Phase::Lobby;
        self.turn.winner = None;
        self.turn.rematch_ready = [false; 2];
        self.turn.rematch_time_left = 0.0;
        self.emit(StateDelta::PhaseChanged {
            phase: Phase::Lobby,
            winner: None,
        });
    }
}
