//! Exhaustive minimax search over the full game tree.
//!
//! Scores are always taken from one fixed perspective:
//! - `+1`: player A wins
//! - `-1`: player B wins
//! - `0`: draw
//!
//! Player A is therefore the maximizing side and player B the minimizing
//! side, whichever of them the engine plays. Every branch works on its own
//! copy of the board. There is no pruning or caching; the 3x3 tree is small
//! enough to search completely on every call.

use tracing::{debug, instrument};

use crate::board::{Board, Move, Outcome, Player};
use crate::constants::{SCORE_A_WINS, SCORE_B_WINS, SCORE_DRAW};
use crate::error::GameError;

/// Result of searching one position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    /// Game-theoretic value under optimal play by both sides.
    pub score: i8,
    /// First move in scan order achieving `score`; `None` at terminal positions.
    pub best: Option<Move>,
}

/// Terminal score of `outcome`, or `None` while the game is still open.
fn terminal_score(outcome: Outcome) -> Option<i8> {
    match outcome {
        Outcome::Win(Player::A) => Some(SCORE_A_WINS),
        Outcome::Win(Player::B) => Some(SCORE_B_WINS),
        Outcome::Draw => Some(SCORE_DRAW),
        Outcome::InProgress => None,
    }
}

/// Search `board` with `to_move` to play.
///
/// Counts visited positions into `nodes`.
fn search(board: &Board, to_move: Player, nodes: &mut u64) -> Evaluation {
    *nodes += 1;

    if let Some(score) = terminal_score(board.evaluate_outcome()) {
        return Evaluation { score, best: None };
    }

    let maximizing = to_move == Player::A;
    let mut best_score = if maximizing { i8::MIN } else { i8::MAX };
    let mut best_move = None;

    for mv in board.legal_moves() {
        let mut child = *board;
        child.place_mark(mv.row(), mv.col(), to_move);
        let score = search(&child, to_move.opponent(), nodes).score;

        // Strict comparison keeps the first move that reaches the best score.
        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some(mv);
        }
    }

    Evaluation {
        score: best_score,
        best: best_move,
    }
}

/// Search from the root and report how many positions were visited.
fn evaluate(board: &Board, to_move: Player) -> (Evaluation, u64) {
    let mut nodes = 0;
    let eval = search(board, to_move, &mut nodes);
    (eval, nodes)
}

/// Full minimax evaluation of `board` with `to_move` to play.
pub fn minimax(board: &Board, to_move: Player) -> Evaluation {
    let (eval, nodes) = evaluate(board, to_move);
    debug!(score = eval.score, best = ?eval.best, nodes, "minimax finished");
    eval
}

/// The computer opponent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Engine {
    side: Player,
}

impl Engine {
    /// Create an engine playing `side`.
    pub fn new(side: Player) -> Self {
        Self { side }
    }

    /// The side this engine plays.
    pub fn side(&self) -> Player {
        self.side
    }

    /// Optimal move for `acting` on `board`.
    ///
    /// Fails with `InvalidState` if the position is already decided or has
    /// no legal move, which the match controller never allows.
    #[instrument(skip(self, board), fields(filled = board.filled_count()))]
    pub fn best_move(&self, board: &Board, acting: Player) -> Result<Move, GameError> {
        if board.evaluate_outcome().is_terminal() {
            return Err(GameError::InvalidState("search requested on a finished board"));
        }

        let (eval, nodes) = evaluate(board, acting);
        let mv = eval
            .best
            .ok_or(GameError::InvalidState("no legal move on an open board"))?;

        debug!(%mv, score = eval.score, nodes, "search finished");
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(moves: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        let mut player = Player::A;
        for &(r, c) in moves {
            board.place_mark(r, c, player);
            player = player.opponent();
        }
        board
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let eval = minimax(&Board::new(), Player::A);
        assert_eq!(eval.score, SCORE_DRAW);
        assert!(eval.best.is_some());
    }

    #[test]
    fn test_full_tree_node_count() {
        // Every node of the complete game tree, root and terminals included.
        let (_, nodes) = evaluate(&Board::new(), Player::A);
        assert_eq!(nodes, 549_946);
    }

    #[test]
    fn test_minimax_agrees_with_best_move() {
        let board = play(&[(0, 0), (1, 1), (0, 1)]);
        let eval = minimax(&board, Player::B);
        let mv = Engine::new(Player::B).best_move(&board, Player::B).unwrap();
        assert_eq!(eval.best, Some(mv));
    }

    #[test]
    fn test_terminal_positions_score_without_move() {
        let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let eval = minimax(&won, Player::B);
        assert_eq!(eval.score, SCORE_A_WINS);
        assert_eq!(eval.best, None);
    }

    #[test]
    fn test_takes_immediate_win() {
        // B holds (0,0) (0,1) and wins on (0,2) before A can use (2,1).
        let board = play(&[(1, 0), (0, 0), (2, 2), (0, 1), (2, 0)]);
        let mv = Engine::new(Player::B).best_move(&board, Player::B).unwrap();
        assert_eq!((mv.row(), mv.col()), (0, 2));
    }

    #[test]
    fn test_blocks_open_row() {
        // A threatens (0,2); B must block.
        let board = play(&[(0, 0), (1, 1), (0, 1)]);
        let mv = Engine::new(Player::B).best_move(&board, Player::B).unwrap();
        assert_eq!((mv.row(), mv.col()), (0, 2));
    }

    #[test]
    fn test_engine_as_player_a_maximizes() {
        // B threatens the anti-diagonal at (2,0). Taking it also forks
        // column 0 and row 2, the only move that wins for A.
        let board = play(&[(0, 0), (1, 1), (2, 2), (0, 2)]);
        let eval = minimax(&board, Player::A);
        assert_eq!(eval.score, SCORE_A_WINS);
        let mv = Engine::new(Player::A).best_move(&board, Player::A).unwrap();
        assert_eq!((mv.row(), mv.col()), (2, 0));
    }

    #[test]
    fn test_best_move_is_deterministic() {
        let board = play(&[(1, 1)]);
        let engine = Engine::new(Player::B);
        let first = engine.best_move(&board, Player::B).unwrap();
        let second = engine.best_move(&board, Player::B).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_best_move_in_scan_order() {
        // Every reply to a centre opening other than a corner loses for B,
        // and all four corners draw. The first corner in scan order is kept.
        let board = play(&[(1, 1)]);
        let mv = Engine::new(Player::B).best_move(&board, Player::B).unwrap();
        assert_eq!((mv.row(), mv.col()), (0, 0));
    }

    #[test]
    fn test_finished_board_is_invalid_state() {
        let won = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        let err = Engine::new(Player::B)
            .best_move(&won, Player::B)
            .unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }
}
