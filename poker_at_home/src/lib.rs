//! # Poker@Home client core
//!
//! A streaming client core that maintains a consistent, validated snapshot
//! of a live poker table by consuming state-sync events pushed by a
//! Poker@Home server over a persistent connection.
//!
//! ## Architecture
//!
//! Data flows through three layers, leaf-first:
//!
//! - [`game`]: immutable table entities (cards, players, pots, snapshots)
//!   whose constructors validate every structural invariant.
//! - [`net`]: the event decoder, which drives those constructors over a raw
//!   payload tree, and the stream dispatcher, an explicit state machine that
//!   consumes payloads in strict arrival order.
//! - [`bot`]: the decision-consumer boundary the dispatcher calls when the
//!   server requests an action.
//!
//! The transport itself (sockets, retries, TLS) is a collaborator: anything
//! implementing [`net::stream::MessageSource`] can feed a table stream.
//!
//! ## Example
//!
//! ```
//! use poker_at_home::{NoopBot, TableStream};
//!
//! let mut stream = TableStream::new(NoopBot);
//! let payload = r#"{"event": "tournamentPing"}"#;
//! // Unknown events are skipped; state syncs rebuild the snapshot.
//! stream.dispatch(payload).unwrap();
//! ```

/// The decision-consumer boundary.
pub mod bot;
pub use bot::{Bot, NoopBot};

/// Validated table entities.
pub mod game;
pub use game::{
    StateError,
    entities::{Card, Chips, GameState, PlayerGameState, PlayerId, Pot, SharedGameState, Suit},
};

/// Protocol decoding and the dispatch loop.
pub mod net;
pub use net::{
    DecodeError, decode,
    messages::{ActionType, GameStateMessage},
    stream::{Dispatch, MessageSource, StreamState, TableStream},
};
