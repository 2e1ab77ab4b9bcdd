//! Typed messages decoded from server payloads.

use serde::Serialize;
use std::fmt;

use crate::game::entities::GameState;

/// Top-level event tag of a full state-sync payload.
pub const EVENT_GAME_STATE: &str = "gameState";

/// The kind of action a state sync refers to.
///
/// The observed protocol only ever sends an empty tag; concrete action names
/// are expected once the server starts transmitting them.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum ActionType {
    Unspecified,
}

impl ActionType {
    /// Map a wire tag to an action type. Unknown tags map to `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "" => Some(Self::Unspecified),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Unspecified => "unspecified",
        };
        write!(f, "{repr}")
    }
}

/// A decoded state-sync event: the rebuilt table snapshot plus whether the
/// server is asking us to act on it right now.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GameStateMessage {
    action_type: ActionType,
    game_state: GameState,
    action_requested: bool,
}

impl GameStateMessage {
    pub fn new(action_type: ActionType, game_state: GameState, action_requested: bool) -> Self {
        Self {
            action_type,
            game_state,
            action_requested,
        }
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn is_action_requested(&self) -> bool {
        self.action_requested
    }
}
