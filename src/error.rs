//! Error types shared by the board, the search and the match controller.

use crate::board::{Move, Player};

/// Why a move was refused. Rejections never mutate the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// Coordinates fall outside the 3x3 grid.
    #[display("cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },

    /// Target cell already holds a mark.
    #[display("cell {_0} is already occupied")]
    Occupied(Move),

    /// The match has ended; only a reset is accepted.
    #[display("the match is finished")]
    Finished,

    /// The named player tried to move out of turn.
    #[display("it is not {_0}'s turn")]
    WrongTurn(Player),

    /// The engine was asked to move while the human is to play.
    #[display("it is not the engine's turn")]
    NotEngineTurn,
}

/// Errors raised by the game core.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// A move was rejected; the caller may ignore it and carry on.
    #[display("illegal move: {_0}")]
    IllegalMove(IllegalMove),

    /// A state-machine invariant was broken elsewhere. Not recoverable.
    #[display("invalid state: {_0}")]
    InvalidState(&'static str),
}

impl From<IllegalMove> for GameError {
    fn from(reason: IllegalMove) -> Self {
        GameError::IllegalMove(reason)
    }
}

impl std::error::Error for IllegalMove {}

// The reason is already part of the message, so no source is chained.
impl std::error::Error for GameError {}
