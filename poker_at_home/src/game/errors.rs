//! Entity validation error types.

use thiserror::Error;

/// Errors raised when an entity constructor rejects its inputs.
///
/// Each variant names the field or code that was rejected and the constraint
/// it violated, so a failed state sync can be diagnosed from the error alone.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StateError {
    /// A card code was not a rank character followed by a suit character.
    #[error("card code {0:?} is not a rank and a suit")]
    InvalidCard(String),

    /// The rank character was not one of `A23456789TJQK`.
    #[error("{0:?} is not a card rank")]
    InvalidRank(char),

    /// The suit character was not one of `h`, `d`, `s`, `c`.
    #[error("{0:?} is not a suit")]
    InvalidSuit(char),

    /// A player identifier was not a well-formed UUID.
    #[error("player id {0:?} is not a UUID")]
    InvalidPlayerId(String),

    /// A currency amount was negative or too large to be a chip count.
    #[error("{field} must be a nonnegative chip amount, got {value}")]
    InvalidAmount { field: &'static str, value: i64 },

    /// A player must hold exactly two hole cards, revealed or not.
    #[error("expected exactly 2 hole cards, got {0}")]
    HoleCardCount(usize),

    /// Board states before the flop are not representable.
    #[error("expected 3 to 5 board cards, got {0}")]
    BoardCardCount(usize),

    /// A hand always has a main pot, even when it is empty.
    #[error("a hand must have at least one pot")]
    NoPots,
}
