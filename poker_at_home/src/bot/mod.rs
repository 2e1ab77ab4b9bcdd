//! The decision-making boundary.
//!
//! The dispatcher hands decoded state syncs to a [`Bot`] when the server
//! requests an action. Choosing a poker action is out of scope for this
//! crate, and the observed protocol has no way to send a chosen action back
//! to the server yet, so the boundary is a one-way, synchronous call.

use log::{debug, info};

use crate::net::messages::GameStateMessage;

/// Consumer of decoded table updates.
pub trait Bot {
    /// Called with a state sync, in arrival order, whenever the server is
    /// waiting on this player to act.
    fn handle_game_state_message(&mut self, message: &GameStateMessage);
}

/// Stand-in strategy until real decision logic lands: logs what it is shown
/// and never acts.
#[derive(Debug, Default)]
pub struct NoopBot;

impl Bot for NoopBot {
    fn handle_game_state_message(&mut self, message: &GameStateMessage) {
        let state = message.game_state();
        info!(
            "table sync: {} players, {} board cards, pot {}",
            state.player_states().len(),
            state.shared().board_cards().len(),
            state.shared().pot_total(),
        );
        if let Ok(snapshot) = serde_json::to_string(message) {
            debug!("decoded snapshot: {snapshot}");
        }
    }
}
