//! Whole-match simulations.
//!
//! Used by the demo and by tests to drive complete matches through the
//! controller: the engine against itself, or against an opponent that picks
//! uniformly among the legal moves.

use tracing::debug;

use crate::board::{Outcome, Player};
use crate::controller::{MatchConfig, MatchController};
use crate::error::GameError;
use crate::minimax::Engine;

/// Play a match where both sides use the minimax engine.
pub fn self_play(config: MatchConfig) -> Result<Outcome, GameError> {
    let mut game = MatchController::new(config);
    let human_engine = Engine::new(config.engine_side.opponent());

    while game.is_running() {
        if game.poll_engine()?.is_none() {
            let mv = human_engine.best_move(game.board(), game.active_player())?;
            game.submit_move(mv.row(), mv.col())?;
        }
    }
    Ok(game.outcome())
}

/// Play a match where the engine's opponent moves at random.
pub fn random_playout(config: MatchConfig, rng: &mut fastrand::Rng) -> Result<Outcome, GameError> {
    let mut game = MatchController::new(config);

    while game.is_running() {
        if game.poll_engine()?.is_some() {
            continue;
        }
        let moves = game.board().legal_moves();
        if moves.is_empty() {
            return Err(GameError::InvalidState("running match without legal moves"));
        }
        let mv = moves[rng.usize(..moves.len())];
        game.submit_move(mv.row(), mv.col())?;
    }

    debug!(outcome = ?game.outcome(), "playout finished");
    Ok(game.outcome())
}

/// Tally of finished matches, counted from the engine's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub engine_wins: usize,
    pub engine_losses: usize,
    pub draws: usize,
}

impl Tally {
    /// Count one finished match for an engine playing `engine_side`.
    pub fn record(&mut self, outcome: Outcome, engine_side: Player) {
        match outcome {
            Outcome::Win(p) if p == engine_side => self.engine_wins += 1,
            Outcome::Win(_) => self.engine_losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }

    pub fn total(&self) -> usize {
        self.engine_wins + self.engine_losses + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_from_engine_side() {
        let mut tally = Tally::default();
        tally.record(Outcome::Win(Player::B), Player::B);
        tally.record(Outcome::Win(Player::A), Player::B);
        tally.record(Outcome::Draw, Player::B);
        tally.record(Outcome::InProgress, Player::B);
        assert_eq!(
            tally,
            Tally {
                engine_wins: 1,
                engine_losses: 1,
                draws: 1,
            }
        );
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_random_playout_finishes() {
        let mut rng = fastrand::Rng::with_seed(7);
        let outcome = random_playout(MatchConfig::default(), &mut rng).unwrap();
        assert!(outcome.is_terminal());
        assert_ne!(outcome, Outcome::Win(Player::A));
    }
}
