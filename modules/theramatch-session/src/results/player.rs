//! Typed wrapper over the embedded player's postMessage protocol.

use serde_json::Value;
use tracing::trace;

/// Query string that hides the player's own chrome and enables the message API.
const EMBED_PARAMS: &str = "api=1&controls=0&title=0&byline=0&portrait=0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    Play,
    Pause,
}

impl PlayerEvent {
    fn as_str(self) -> &'static str {
        match self {
            PlayerEvent::Play => "play",
            PlayerEvent::Pause => "pause",
        }
    }

    /// Decode an inbound message. Messages from any origin other than
    /// `trusted_origin` are dropped without being parsed; unparseable or
    /// unknown events from the trusted origin are dropped too.
    pub fn parse(origin: &str, data: &str, trusted_origin: &str) -> Option<PlayerEvent> {
        if origin != trusted_origin {
            trace!(origin, "Ignoring player message from untrusted origin");
            return None;
        }

        let message: Value = match serde_json::from_str(data) {
            Ok(message) => message,
            Err(e) => {
                trace!(error = %e, "Ignoring malformed player message");
                return None;
            }
        };

        // Only objects carry events; arrays and scalars are noise.
        match message.get("event").and_then(Value::as_str) {
            Some("play") => Some(PlayerEvent::Play),
            Some("pause") => Some(PlayerEvent::Pause),
            _ => None,
        }
    }
}

/// Commands posted to the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerDirective {
    Play,
    Pause,
    /// Ask the player to report this event back to us.
    Subscribe(PlayerEvent),
}

impl PlayerDirective {
    pub fn to_message(self) -> String {
        let value = match self {
            PlayerDirective::Play => serde_json::json!({ "method": "play" }),
            PlayerDirective::Pause => serde_json::json!({ "method": "pause" }),
            PlayerDirective::Subscribe(event) => serde_json::json!({
                "method": "addEventListener",
                "value": event.as_str(),
            }),
        };
        value.to_string()
    }
}

/// The embedded player's message channel.
pub trait VideoPlayer {
    fn post(&mut self, directive: PlayerDirective);

    fn play(&mut self) {
        self.post(PlayerDirective::Play);
    }

    fn pause(&mut self) {
        self.post(PlayerDirective::Pause);
    }
}

/// Collects directives instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    sent: Vec<PlayerDirective>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[PlayerDirective] {
        &self.sent
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent.iter().map(|d| d.to_message()).collect()
    }
}

impl VideoPlayer for RecordingPlayer {
    fn post(&mut self, directive: PlayerDirective) {
        self.sent.push(directive);
    }
}

/// Player URL with the message API enabled and native controls hidden.
pub fn embed_url(source: &str) -> String {
    let separator = if source.contains('?') { '&' } else { '?' };
    format!("{source}{separator}{EMBED_PARAMS}")
}
