//! Decodes raw state-sync payloads into typed messages.
//!
//! The decoder walks an untyped [`serde_json::Value`] tree and drives the
//! entity constructors with what it finds. The first missing key, mistyped
//! value, or constructor rejection aborts the whole decode; an inconsistent
//! table snapshot is unsafe to act on, so there is no best-effort mode.

use serde_json::Value;
use std::collections::HashMap;

use super::{
    errors::DecodeError,
    messages::{ActionType, GameStateMessage},
};
use crate::game::entities::{Card, GameState, PlayerGameState, PlayerId, Pot, SharedGameState};

fn get<'a>(payload: &'a Value, key: &'static str) -> Result<&'a Value, DecodeError> {
    payload.get(key).ok_or(DecodeError::MissingKey(key))
}

fn str_value<'a>(value: &'a Value, key: &'static str) -> Result<&'a str, DecodeError> {
    value.as_str().ok_or(DecodeError::WrongType {
        key,
        expected: "a string",
    })
}

fn i64_value(value: &Value, key: &'static str) -> Result<i64, DecodeError> {
    value.as_i64().ok_or(DecodeError::WrongType {
        key,
        expected: "an integer",
    })
}

fn bool_value(value: &Value, key: &'static str) -> Result<bool, DecodeError> {
    value.as_bool().ok_or(DecodeError::WrongType {
        key,
        expected: "a boolean",
    })
}

fn array_value<'a>(value: &'a Value, key: &'static str) -> Result<&'a [Value], DecodeError> {
    value.as_array().map(Vec::as_slice).ok_or(DecodeError::WrongType {
        key,
        expected: "an array",
    })
}

/// Look up a per-player field. The player's own record is authoritative;
/// older servers flatten these fields onto the enclosing game-state object,
/// so fall back there when the record does not carry the key.
fn scoped<'a>(
    player: &'a Value,
    state: &'a Value,
    key: &'static str,
) -> Result<&'a Value, DecodeError> {
    player
        .get(key)
        .or_else(|| state.get(key))
        .ok_or(DecodeError::MissingKey(key))
}

fn card(value: &Value, key: &'static str) -> Result<Card, DecodeError> {
    Ok(str_value(value, key)?.parse()?)
}

fn hole_cards(value: &Value) -> Result<Vec<Option<Card>>, DecodeError> {
    match value {
        // Null means the cards exist but have not been revealed to us.
        Value::Null => Ok(vec![None, None]),
        Value::Array(entries) => entries
            .iter()
            .map(|entry| Ok(Some(card(entry, "holeCards")?)))
            .collect(),
        _ => Err(DecodeError::WrongType {
            key: "holeCards",
            expected: "an array or null",
        }),
    }
}

fn player_state(
    player: &Value,
    state: &Value,
) -> Result<(PlayerId, PlayerGameState), DecodeError> {
    let id: PlayerId = str_value(get(player, "id")?, "id")?.parse()?;
    let cards = hole_cards(scoped(player, state, "holeCards")?)?;
    let player_state = PlayerGameState::new(
        cards,
        bool_value(scoped(player, state, "folded")?, "folded")?,
        i64_value(scoped(player, state, "stack")?, "stack")?,
        i64_value(scoped(player, state, "bet")?, "bet")?,
        i64_value(scoped(player, state, "pot_share")?, "pot_share")?,
    )?;
    Ok((id, player_state))
}

/// Rebuild a full table snapshot from the `game_state` payload subtree.
pub fn game_state(state: &Value) -> Result<GameState, DecodeError> {
    let mut player_states = HashMap::new();
    for player in array_value(get(state, "players")?, "players")? {
        let (id, player_state) = player_state(player, state)?;
        player_states.insert(id, player_state);
    }

    let pot_total = i64_value(get(state, "pot")?, "pot")?;
    // Per-player pot attribution is not computed upstream yet; the single
    // main pot carries no shares.
    let pots = vec![Pot::new(pot_total, HashMap::new())?];

    let board_cards = array_value(get(state, "communityCards")?, "communityCards")?
        .iter()
        .map(|entry| card(entry, "communityCards"))
        .collect::<Result<Vec<_>, _>>()?;

    let shared = SharedGameState::new(
        pot_total,
        pots,
        board_cards,
        i64_value(get(state, "smallBlindAmount")?, "smallBlindAmount")?,
        i64_value(get(state, "bigBlindAmount")?, "bigBlindAmount")?,
    )?;

    let active_player: PlayerId =
        str_value(get(state, "activeplayerId")?, "activeplayerId")?.parse()?;

    // Dealer and blind seats are not in the payload yet.
    Ok(GameState::new(
        shared,
        player_states,
        None,
        None,
        None,
        Some(active_player),
    ))
}

/// Decode a whole state-sync event (everything below the `event` tag).
pub fn game_state_message(payload: &Value) -> Result<GameStateMessage, DecodeError> {
    let tag = str_value(get(payload, "action")?, "action")?;
    let action_type =
        ActionType::from_tag(tag).ok_or_else(|| DecodeError::UnknownAction(tag.to_string()))?;
    let game_state = game_state(get(payload, "game_state")?)?;
    let action_requested = bool_value(get(payload, "actionRequested")?, "actionRequested")?;
    Ok(GameStateMessage::new(
        action_type,
        game_state,
        action_requested,
    ))
}
