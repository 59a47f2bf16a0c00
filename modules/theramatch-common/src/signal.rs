//! Derives the running match state from the chat transcript.

use tracing::debug;

use crate::types::{MatchSignal, Message, ToolState};

/// Tool name the assistant uses to report the running match count.
///
/// Older chat backends report under `get_therapist_match_amount`; point
/// `THERAMATCH_MATCH_TOOL` at that name when talking to one.
pub const DEFAULT_MATCH_TOOL: &str = "get_therapist_match_data";

/// Reads the latest match-lookup result off the transcript.
///
/// Only the last message is inspected. A signal attached to an earlier
/// message is stale once anything else has been appended, so it is never
/// surfaced even when the last message carries no signal of its own.
#[derive(Debug, Clone)]
pub struct SignalExtractor {
    tool_name: String,
}

impl Default for SignalExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_TOOL)
    }
}

impl SignalExtractor {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
        }
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// Recomputed from scratch on every call. Invocation states change in
    /// place while a response streams, so nothing here may be cached.
    pub fn extract(&self, transcript: &[Message]) -> Option<MatchSignal> {
        let last = transcript.last()?;

        let invocation = last
            .tool_invocations()
            .iter()
            .rev()
            .find(|inv| inv.tool_name == self.tool_name && inv.state == ToolState::Result)?;

        let signal = match invocation.result.clone() {
            Some(payload) => serde_json::from_value(payload).unwrap_or_else(|e| {
                debug!(
                    tool_call_id = %invocation.tool_call_id,
                    error = %e,
                    "Match payload did not decode, using empty signal"
                );
                MatchSignal::default()
            }),
            None => MatchSignal::default(),
        };

        Some(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolInvocation;
    use serde_json::json;

    fn lookup(id: &str, count: u64, filters: &[u32]) -> ToolInvocation {
        ToolInvocation::with_result(
            id,
            DEFAULT_MATCH_TOOL,
            json!({ "attributeIds": filters }),
            json!({ "match_count": count, "filters_applied": filters }),
        )
    }

    #[test]
    fn empty_transcript_has_no_signal() {
        assert_eq!(SignalExtractor::default().extract(&[]), None);
    }

    #[test]
    fn last_message_without_invocations_has_no_signal() {
        let transcript = vec![Message::user("I feel anxious a lot")];
        assert_eq!(SignalExtractor::default().extract(&transcript), None);
    }

    #[test]
    fn scenario_transcript_yields_signal() {
        let transcript = vec![
            Message::user("Anxiety and some trauma"),
            Message::assistant("Got it.").with_tool_invocation(lookup("c1", 620, &[3, 19])),
        ];

        let signal = SignalExtractor::default().extract(&transcript).unwrap();
        assert_eq!(signal.match_count, Some(620));
        assert_eq!(signal.filters_applied, vec![3, 19]);
    }

    #[test]
    fn latest_result_on_last_message_wins() {
        let transcript = vec![Message::assistant("")
            .with_tool_invocation(lookup("c1", 900, &[3]))
            .with_tool_invocation(lookup("c2", 310, &[3, 1002]))
            .with_tool_invocation(ToolInvocation::call("c3", DEFAULT_MATCH_TOOL, json!({})))];

        let signal = SignalExtractor::default().extract(&transcript).unwrap();
        assert_eq!(signal.match_count, Some(310));
        assert_eq!(signal.filters_applied, vec![3, 1002]);
    }

    #[test]
    fn earlier_messages_are_never_consulted() {
        let transcript = vec![
            Message::assistant("").with_tool_invocation(lookup("c1", 620, &[3])),
            Message::user("Also prefer a woman"),
        ];
        assert_eq!(SignalExtractor::default().extract(&transcript), None);
    }

    #[test]
    fn other_tools_and_pending_calls_are_ignored() {
        let transcript = vec![Message::assistant("")
            .with_tool_invocation(ToolInvocation::with_result(
                "w1",
                "get_weather",
                json!({}),
                json!({ "match_count": 1 }),
            ))
            .with_tool_invocation(ToolInvocation::call("c1", DEFAULT_MATCH_TOOL, json!({})))];

        assert_eq!(SignalExtractor::default().extract(&transcript), None);
    }

    #[test]
    fn in_place_resolution_is_reflected() {
        let extractor = SignalExtractor::default();
        let mut transcript = vec![Message::assistant("")
            .with_tool_invocation(ToolInvocation::call("c1", DEFAULT_MATCH_TOOL, json!({})))];
        assert_eq!(extractor.extract(&transcript), None);

        transcript[0].tool_invocations.as_mut().unwrap()[0]
            .resolve(json!({ "match_count": 48, "filters_applied": [6] }));

        let signal = extractor.extract(&transcript).unwrap();
        assert_eq!(signal.match_count, Some(48));
    }

    #[test]
    fn missing_fields_default_instead_of_failing() {
        let transcript = vec![Message::assistant("").with_tool_invocation(
            ToolInvocation::with_result("c1", DEFAULT_MATCH_TOOL, json!({}), json!({})),
        )];

        let signal = SignalExtractor::default().extract(&transcript).unwrap();
        assert_eq!(signal.match_count, None);
        assert!(signal.filters_applied.is_empty());
    }

    #[test]
    fn malformed_payload_decodes_as_empty_signal() {
        let transcript = vec![Message::assistant("").with_tool_invocation(
            ToolInvocation::with_result("c1", DEFAULT_MATCH_TOOL, json!({}), json!("oops")),
        )];

        let signal = SignalExtractor::default().extract(&transcript).unwrap();
        assert_eq!(signal, MatchSignal::default());
    }

    #[test]
    fn custom_tool_name_is_respected() {
        let transcript = vec![Message::assistant("").with_tool_invocation(
            ToolInvocation::with_result(
                "c1",
                "get_therapist_match_amount",
                json!({}),
                json!({ "match_count": 5, "filters_applied": [2] }),
            ),
        )];

        assert_eq!(SignalExtractor::default().extract(&transcript), None);
        let legacy = SignalExtractor::new("get_therapist_match_amount");
        assert_eq!(legacy.extract(&transcript).unwrap().match_count, Some(5));
    }
}
