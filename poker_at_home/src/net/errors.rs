//! Protocol decode error types.

use thiserror::Error;

use crate::game::StateError;

/// Errors raised while turning a raw payload tree into a typed message.
///
/// Any one of these aborts the decode of the whole message; no partially
/// reconstructed state ever escapes the decoder.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum DecodeError {
    /// A key the decode path requires was absent.
    #[error("missing required key {0:?}")]
    MissingKey(&'static str),

    /// A key was present but held a value of the wrong shape.
    #[error("key {key:?} is not {expected}")]
    WrongType {
        key: &'static str,
        expected: &'static str,
    },

    /// The payload named an action tag the protocol does not define.
    #[error("unrecognized action tag {0:?}")]
    UnknownAction(String),

    /// A decoded value was rejected by an entity constructor.
    #[error(transparent)]
    State(#[from] StateError),
}
