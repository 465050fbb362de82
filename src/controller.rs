//! Match controller: turn order, move application and the end-of-match state.
//!
//! A match starts in `AwaitingMove(A)` on an empty board and ends in
//! `Finished(outcome)` as soon as a move completes a line or fills the
//! board. A finished match rejects every move until `reset`.

use tracing::{debug, info, instrument};

use crate::board::{Board, Move, Outcome, Player};
use crate::error::{GameError, IllegalMove};
use crate::minimax::Engine;

/// Fixed settings of a match, carried across resets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Side played by the computer.
    pub engine_side: Player,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            engine_side: Player::B,
        }
    }
}

/// Where the match stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchState {
    AwaitingMove(Player),
    Finished(Outcome),
}

/// Owns the board and the engine and drives one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchController {
    config: MatchConfig,
    board: Board,
    engine: Engine,
    active: Player,
    outcome: Outcome,
}

impl Default for MatchController {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl MatchController {
    /// Start a fresh match with `config`.
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            board: Board::new(),
            engine: Engine::new(config.engine_side),
            active: Player::A,
            outcome: Outcome::InProgress,
        }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose mark goes down next. After the match ends this is the
    /// player who made the last move.
    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn engine_side(&self) -> Player {
        self.engine.side()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True until the match is won or drawn.
    pub fn is_running(&self) -> bool {
        !self.outcome.is_terminal()
    }

    pub fn state(&self) -> MatchState {
        if self.is_running() {
            MatchState::AwaitingMove(self.active)
        } else {
            MatchState::Finished(self.outcome)
        }
    }

    /// True when the engine should move now.
    pub fn is_engine_turn(&self) -> bool {
        self.is_running() && self.active == self.engine.side()
    }

    /// Place a mark for the active player.
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<Outcome, GameError> {
        let mv = self.validate(row, col)?;
        Ok(self.apply(mv))
    }

    /// Place a mark for `player`, rejecting it if `player` is not to move.
    pub fn submit_move_as(
        &mut self,
        player: Player,
        row: usize,
        col: usize,
    ) -> Result<Outcome, GameError> {
        let mv = self.validate(row, col)?;
        if player != self.active {
            return Err(IllegalMove::WrongTurn(player).into());
        }
        Ok(self.apply(mv))
    }

    /// Let the engine search and play its move.
    #[instrument(skip(self), fields(side = %self.engine.side()))]
    pub fn request_engine_move(&mut self) -> Result<Move, GameError> {
        if !self.is_running() {
            return Err(IllegalMove::Finished.into());
        }
        if self.active != self.engine.side() {
            return Err(IllegalMove::NotEngineTurn.into());
        }

        let mv = self.engine.best_move(&self.board, self.active)?;
        if !self.board.is_empty_cell(mv.row(), mv.col()) {
            return Err(GameError::InvalidState("engine chose an occupied cell"));
        }
        self.apply(mv);
        Ok(mv)
    }

    /// One frame-loop step: play the engine's move if it is due.
    pub fn poll_engine(&mut self) -> Result<Option<Move>, GameError> {
        if self.is_engine_turn() {
            self.request_engine_move().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Throw the match away and start over with the same configuration.
    pub fn reset(&mut self) {
        info!("match reset");
        *self = Self::new(self.config);
    }

    fn validate(&self, row: usize, col: usize) -> Result<Move, GameError> {
        if !self.is_running() {
            return Err(IllegalMove::Finished.into());
        }
        let mv = Move::new(row, col)?;
        if !self.board.is_empty_cell(row, col) {
            return Err(IllegalMove::Occupied(mv).into());
        }
        Ok(mv)
    }

    fn apply(&mut self, mv: Move) -> Outcome {
        let player = self.active;
        self.board.place_mark(mv.row(), mv.col(), player);
        self.outcome = self.board.evaluate_outcome();
        debug!(%player, %mv, outcome = ?self.outcome, "move applied");

        if self.outcome.is_terminal() {
            info!(outcome = ?self.outcome, "match finished");
        } else {
            self.active = player.opponent();
        }
        self.outcome
    }
}
