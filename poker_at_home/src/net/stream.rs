//! The dispatch loop that keeps a table snapshot in sync with the server.
//!
//! One connection is one ordered stream of payloads. The dispatcher consumes
//! them strictly in arrival order, decodes recognized events, and consults
//! the bot when the server requests an action. It is an explicit state
//! machine over a blocking receive abstraction, so it runs the same under a
//! dedicated thread or an async task bridged into [`MessageSource`].

use anyhow::{Context, Result};
use log::{debug, warn};
use serde_json::Value;

use super::{
    decode,
    messages::{EVENT_GAME_STATE, GameStateMessage},
};
use crate::bot::Bot;

/// Where the stream currently is in its receive cycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamState {
    /// Constructed; nothing handled yet.
    Connected,
    /// Waiting for the next server payload.
    Idle,
    /// The server has requested an action and the bot is being consulted.
    AwaitingAction,
}

/// What one payload did to the stream.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Dispatch {
    /// A state sync was decoded; the bot was consulted iff an action was
    /// requested.
    Synced(GameStateMessage),
    /// The payload carried an event tag this client does not know.
    Ignored,
}

/// Blocking source of text payloads from the server.
///
/// `recv` yields one payload at a time, `Ok(None)` once the server closes
/// the connection cleanly. Errors are fatal to the connection; reconnect
/// policy belongs to the transport owner, not to this loop.
pub trait MessageSource {
    fn recv(&mut self) -> Result<Option<String>>;
}

/// Sequential dispatcher for one connection's event stream.
pub struct TableStream<B> {
    bot: B,
    state: StreamState,
}

impl<B: Bot> TableStream<B> {
    pub fn new(bot: B) -> Self {
        Self {
            bot,
            state: StreamState::Connected,
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// The bot this stream consults.
    pub fn bot(&self) -> &B {
        &self.bot
    }

    /// Consume payloads from `source` until the connection closes or fails.
    pub fn run<S: MessageSource>(&mut self, source: &mut S) -> Result<()> {
        loop {
            self.state = StreamState::Idle;
            let Some(text) = source.recv()? else {
                debug!("server closed the connection");
                return Ok(());
            };
            debug!("received: {text}");
            self.dispatch(&text)?;
        }
    }

    /// Route a single raw payload.
    ///
    /// Unknown event tags are skipped with a warning. Anything else that
    /// fails — non-JSON text, a missing `event` tag, a state sync that does
    /// not decode — is an error, and the payload is not applied.
    pub fn dispatch(&mut self, text: &str) -> Result<Dispatch> {
        let payload: Value = serde_json::from_str(text).context("payload is not valid JSON")?;
        let event = payload
            .get("event")
            .and_then(Value::as_str)
            .context("payload has no event tag")?;

        match event {
            EVENT_GAME_STATE => {
                let message = decode::game_state_message(&payload)?;
                if message.is_action_requested() {
                    self.state = StreamState::AwaitingAction;
                    self.bot.handle_game_state_message(&message);
                    // The bot has been consulted; nothing left to wait on.
                    self.state = StreamState::Idle;
                }
                Ok(Dispatch::Synced(message))
            }
            _ => {
                warn!("ignoring message with unknown event {event:?}");
                Ok(Dispatch::Ignored)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::VecDeque;

    const ALICE: &str = "12345678-1234-5678-1234-567812345678";

    fn sync_payload(action_requested: bool) -> String {
        json!({
            "event": "gameState",
            "action": "",
            "actionRequested": action_requested,
            "game_state": {
                "players": [{"id": ALICE}],
                "holeCards": null,
                "folded": false,
                "stack": 100,
                "bet": 0,
                "pot_share": 0,
                "pot": 0,
                "communityCards": ["Ah", "Kd", "2s"],
                "smallBlindAmount": 1,
                "bigBlindAmount": 2,
                "activeplayerId": ALICE
            }
        })
        .to_string()
    }

    /// Replays a fixed script of payloads, then closes or fails.
    struct ScriptedSource {
        payloads: VecDeque<String>,
        fail_at_end: bool,
    }

    impl ScriptedSource {
        fn close_after(payloads: Vec<String>) -> Self {
            Self {
                payloads: payloads.into(),
                fail_at_end: false,
            }
        }

        fn fail_after(payloads: Vec<String>) -> Self {
            Self {
                payloads: payloads.into(),
                fail_at_end: true,
            }
        }
    }

    impl MessageSource for ScriptedSource {
        fn recv(&mut self) -> Result<Option<String>> {
            match self.payloads.pop_front() {
                Some(text) => Ok(Some(text)),
                None if self.fail_at_end => Err(anyhow::anyhow!("connection reset")),
                None => Ok(None),
            }
        }
    }

    #[derive(Default)]
    struct RecordingBot {
        seen: Vec<GameStateMessage>,
    }

    impl Bot for RecordingBot {
        fn handle_game_state_message(&mut self, message: &GameStateMessage) {
            self.seen.push(message.clone());
        }
    }

    // === State Machine ===

    #[test]
    fn test_starts_connected() {
        let stream = TableStream::new(RecordingBot::default());
        assert_eq!(stream.state(), StreamState::Connected);
    }

    #[test]
    fn test_returns_to_idle_after_bot_call() {
        let mut stream = TableStream::new(RecordingBot::default());
        let mut source = ScriptedSource::close_after(vec![sync_payload(true)]);
        stream.run(&mut source).unwrap();
        assert_eq!(stream.state(), StreamState::Idle);
        assert_eq!(stream.bot.seen.len(), 1);
    }

    // === Routing ===

    #[test]
    fn test_action_request_reaches_the_bot() {
        let mut stream = TableStream::new(RecordingBot::default());
        let dispatch = stream.dispatch(&sync_payload(true)).unwrap();
        assert!(matches!(dispatch, Dispatch::Synced(_)));
        assert_eq!(stream.bot.seen.len(), 1);
        assert!(stream.bot.seen[0].is_action_requested());
    }

    #[test]
    fn test_sync_without_action_request_skips_the_bot() {
        let mut stream = TableStream::new(RecordingBot::default());
        let dispatch = stream.dispatch(&sync_payload(false)).unwrap();
        assert!(matches!(dispatch, Dispatch::Synced(_)));
        assert!(stream.bot.seen.is_empty());
    }

    #[test]
    fn test_unknown_event_is_ignored_without_state_change() {
        let mut stream = TableStream::new(RecordingBot::default());
        let dispatch = stream
            .dispatch(&json!({"event": "ping"}).to_string())
            .unwrap();
        assert_eq!(dispatch, Dispatch::Ignored);
        assert_eq!(stream.state(), StreamState::Connected);
        assert!(stream.bot.seen.is_empty());
    }

    #[test]
    fn test_processes_payloads_in_arrival_order() {
        let mut stream = TableStream::new(RecordingBot::default());
        let mut second = sync_payload(true);
        second = second.replace("\"pot\":0", "\"pot\":50");
        let mut source =
            ScriptedSource::close_after(vec![sync_payload(true), second]);
        stream.run(&mut source).unwrap();
        assert_eq!(stream.bot.seen.len(), 2);
        assert_eq!(stream.bot.seen[0].game_state().shared().pot_total(), 0);
        assert_eq!(stream.bot.seen[1].game_state().shared().pot_total(), 50);
    }

    // === Failure Paths ===

    #[test]
    fn test_non_json_payload_is_fatal() {
        let mut stream = TableStream::new(RecordingBot::default());
        assert!(stream.dispatch("not json").is_err());
        assert!(stream.bot.seen.is_empty());
    }

    #[test]
    fn test_missing_event_tag_is_fatal() {
        let mut stream = TableStream::new(RecordingBot::default());
        assert!(stream.dispatch(&json!({"action": ""}).to_string()).is_err());
    }

    #[test]
    fn test_undecodable_sync_is_fatal_and_not_applied() {
        let mut stream = TableStream::new(RecordingBot::default());
        let payload = json!({"event": "gameState", "action": "", "actionRequested": true});
        assert!(stream.dispatch(&payload.to_string()).is_err());
        assert!(stream.bot.seen.is_empty());
    }

    #[test]
    fn test_transport_error_ends_the_run() {
        let mut stream = TableStream::new(RecordingBot::default());
        let mut source = ScriptedSource::fail_after(vec![sync_payload(true)]);
        let result = stream.run(&mut source);
        assert!(result.is_err());
        // The payload before the failure was still processed in order.
        assert_eq!(stream.bot.seen.len(), 1);
    }

    #[test]
    fn test_clean_close_ends_the_run_ok() {
        let mut stream = TableStream::new(RecordingBot::default());
        let mut source = ScriptedSource::close_after(vec![]);
        assert!(stream.run(&mut source).is_ok());
        assert_eq!(stream.state(), StreamState::Idle);
    }
}
