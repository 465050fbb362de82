//! Tictac-Minimax: noughts and crosses against a perfect opponent.
//!
//! The crate holds the game core (board, search, match state machine) and a
//! small text front-end. The core has no rendering or I/O dependencies.
//!
//! ## Modules
//!
//! - [`constants`] - Grid geometry, winning lines, scores, window geometry
//! - [`board`] - Board state, outcomes and legal moves
//! - [`minimax`] - Exhaustive game-tree search
//! - [`controller`] - Turn order and the end-of-match state machine
//! - [`error`] - Error taxonomy
//! - [`playout`] - Whole-match simulations
//! - [`protocol`] - Text command front-end
//!
//! ## Example
//!
//! ```
//! use tictac_minimax::board::{Outcome, Player};
//! use tictac_minimax::controller::MatchController;
//!
//! let mut game = MatchController::default();
//! game.submit_move(1, 1).unwrap();
//!
//! // The engine plays B and answers from the first corner.
//! let reply = game.request_engine_move().unwrap();
//! assert_eq!((reply.row(), reply.col()), (0, 0));
//! assert_eq!(game.active_player(), Player::A);
//! assert_eq!(game.outcome(), Outcome::InProgress);
//! ```

pub mod board;
pub mod constants;
pub mod controller;
pub mod error;
pub mod minimax;
pub mod playout;
pub mod protocol;
