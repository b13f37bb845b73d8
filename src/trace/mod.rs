//! Interaction trace: the append-only record of an episode.
//!
//! A trace is an ordered sequence of turns, each an ordered sequence of
//! events. The driver appends events as the episode runs; the scorer
//! consumes the finished trace read-only.
//!
//! Serialized field names match the interaction-log format the scorer
//! was written against (`"invalid format"`, `"get message"`, ...).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Role;

/// Wire name of the driver in trace events.
pub const GM: &str = "GM";

/// Closed vocabulary of trace event types.
///
/// The first seven are interpreted by the scorer; `SendMessage` and
/// `GetMessage` record message routing and are used only for
/// violation attribution (the event adjacent to a violation names the
/// role that produced it).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "invalid format")]
    InvalidFormat,
    #[serde(rename = "invalid content")]
    InvalidContent,
    #[serde(rename = "correct guess")]
    CorrectGuess,
    #[serde(rename = "incorrect guess")]
    IncorrectGuess,
    #[serde(rename = "send reprompt")]
    SendReprompt,
    #[serde(rename = "valid response")]
    ValidResponse,
    #[serde(rename = "max turns reached")]
    MaxTurnsReached,
    #[serde(rename = "send message")]
    SendMessage,
    #[serde(rename = "get message")]
    GetMessage,
}

/// The typed payload of an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAction {
    /// What kind of event this is.
    #[serde(rename = "type")]
    pub kind: ActionType,

    /// Free-text content (utterance, error message, ...).
    pub content: String,
}

/// One immutable trace event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Sender identifier (`"GM"`, `"Player 1"`, `"Player 2"`).
    pub from: String,

    /// Addressee identifier.
    pub to: String,

    /// The typed payload.
    pub action: EventAction,
}

impl Event {
    /// Create an event between two named parties.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        kind: ActionType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            action: EventAction {
                kind,
                content: content.into(),
            },
        }
    }

    /// A driver-internal note (`GM` to `GM`).
    #[must_use]
    pub fn log_to_self(kind: ActionType, content: impl Into<String>) -> Self {
        Self::new(GM, GM, kind, content)
    }

    /// A message delivered from the driver to a role.
    #[must_use]
    pub fn send_message(to: Role, content: impl Into<String>) -> Self {
        Self::new(GM, to.wire_name(), ActionType::SendMessage, content)
    }

    /// An utterance received from a role by the driver.
    #[must_use]
    pub fn get_message(from: Role, content: impl Into<String>) -> Self {
        Self::new(from.wire_name(), GM, ActionType::GetMessage, content)
    }
}

/// One logical turn's events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Turn {
    pub events: SmallVec<[Event; 4]>,
}

/// A finished episode trace.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Ordered turns, each an ordered event sequence.
    pub turns: Vec<Turn>,
}

impl Trace {
    /// Total number of events across all turns.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.turns.iter().map(|t| t.events.len()).sum()
    }
}

/// Append-only trace accumulator owned by the driver.
#[derive(Clone, Debug, Default)]
pub struct TraceBuilder {
    turns: Vec<Turn>,
}

impl TraceBuilder {
    /// Start an empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new logical turn. Reprompt retries stay in the open turn.
    pub fn begin_turn(&mut self) {
        self.turns.push(Turn::default());
    }

    /// Append an event to the open turn, opening turn 0 if needed.
    pub fn append(&mut self, event: Event) {
        if self.turns.is_empty() {
            self.turns.push(Turn::default());
        }
        self.turns
            .last_mut()
            .expect("open turn exists")
            .events
            .push(event);
    }

    /// Number of turns opened so far.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// Seal the trace.
    #[must_use]
    pub fn finish(self) -> Trace {
        Trace { turns: self.turns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_groups_by_turn() {
        let mut builder = TraceBuilder::new();
        builder.begin_turn();
        builder.append(Event::get_message(Role::Guesser, "QUESTION: Is it alive?"));
        builder.append(Event::log_to_self(ActionType::ValidResponse, "continue"));
        builder.begin_turn();
        builder.append(Event::get_message(Role::Guesser, "GUESS: cat"));

        let trace = builder.finish();
        assert_eq!(trace.turns.len(), 2);
        assert_eq!(trace.turns[0].events.len(), 2);
        assert_eq!(trace.turns[1].events.len(), 1);
        assert_eq!(trace.event_count(), 3);
    }

    #[test]
    fn test_append_opens_first_turn() {
        let mut builder = TraceBuilder::new();
        builder.append(Event::log_to_self(ActionType::MaxTurnsReached, "10"));
        assert_eq!(builder.turn_count(), 1);
    }

    #[test]
    fn test_event_wire_names() {
        let e = Event::get_message(Role::Answerer, "ANSWER: yes");
        assert_eq!(e.from, "Player 2");
        assert_eq!(e.to, "GM");

        let e = Event::send_message(Role::Guesser, "hello");
        assert_eq!(e.from, "GM");
        assert_eq!(e.to, "Player 1");
    }

    #[test]
    fn test_action_type_serde_names() {
        let json = serde_json::to_string(&ActionType::InvalidFormat).unwrap();
        assert_eq!(json, "\"invalid format\"");

        let parsed: ActionType = serde_json::from_str("\"correct guess\"").unwrap();
        assert_eq!(parsed, ActionType::CorrectGuess);
    }

    #[test]
    fn test_trace_round_trip() {
        let mut builder = TraceBuilder::new();
        builder.begin_turn();
        builder.append(Event::send_message(Role::Guesser, "prompt"));
        builder.append(Event::get_message(Role::Guesser, "QUESTION: Is it alive?"));
        let trace = builder.finish();

        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }

    #[test]
    fn test_event_json_shape() {
        let e = Event::log_to_self(ActionType::InvalidContent, "bad question");
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["from"], "GM");
        assert_eq!(value["action"]["type"], "invalid content");
        assert_eq!(value["action"]["content"], "bad question");
    }
}
