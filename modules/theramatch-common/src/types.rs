use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// --- Transcript ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// Lifecycle of a tool invocation as streamed by the chat collaborator.
/// `PartialCall` and `Call` are both pending; only `Result` carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolState {
    PartialCall,
    Call,
    Result,
}

impl ToolState {
    pub fn is_pending(self) -> bool {
        !matches!(self, ToolState::Result)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    #[serde(default)]
    pub tool_call_id: String,
    pub tool_name: String,
    pub state: ToolState,
    #[serde(default)]
    pub args: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
}

impl ToolInvocation {
    /// A call that has been issued but has not produced a result yet.
    pub fn call(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: serde_json::Value,
    ) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            tool_name: tool_name.into(),
            state: ToolState::Call,
            args,
            result: None,
        }
    }

    pub fn with_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        args: serde_json::Value,
        result: serde_json::Value,
    ) -> Self {
        Self {
            state: ToolState::Result,
            result: Some(result),
            ..Self::call(tool_call_id, tool_name, args)
        }
    }

    /// Settle a pending call in place, the way the stream does when the
    /// tool result arrives for an invocation already on the transcript.
    pub fn resolve(&mut self, result: serde_json::Value) {
        self.state = ToolState::Result;
        self.result = Some(result);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_invocations: Option<Vec<ToolInvocation>>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: None,
            role,
            content: content.into(),
            tool_invocations: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_tool_invocation(mut self, invocation: ToolInvocation) -> Self {
        self.tool_invocations
            .get_or_insert_with(Vec::new)
            .push(invocation);
        self
    }

    pub fn tool_invocations(&self) -> &[ToolInvocation] {
        self.tool_invocations.as_deref().unwrap_or_default()
    }
}

// --- Match signal ---

/// Search location echoed back by the match-lookup tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLocation {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub region_code: String,
}

/// Running match state reported by the match-lookup tool.
///
/// Field names follow the tool's snake_case wire contract; the camelCase
/// spellings are accepted for payloads produced by older tool revisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSignal {
    #[serde(default, alias = "matchCount")]
    pub match_count: Option<u64>,
    #[serde(default, alias = "filtersApplied", deserialize_with = "nullable")]
    pub filters_applied: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SearchLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub error: bool,
}

impl MatchSignal {
    pub fn new(match_count: u64, filters_applied: Vec<u32>) -> Self {
        Self {
            match_count: Some(match_count),
            filters_applied,
            ..Default::default()
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.filters_applied.is_empty()
    }
}

// --- Ranking ---

/// Snapshot of the transcript sent to the ranking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRequest {
    pub messages: Vec<Message>,
}

impl RankingRequest {
    pub fn snapshot(transcript: &[Message]) -> Self {
        Self {
            messages: transcript.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedMatch {
    pub original_id: i64,
    pub rank: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    #[serde(default, deserialize_with = "nullable")]
    pub ranked_matches: Vec<RankedMatch>,
}

/// A validated ranking response, as persisted for the results view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    pub profiles: Vec<TherapistProfile>,
    #[serde(default, deserialize_with = "nullable")]
    pub ai_analysis: AiAnalysis,
}

// --- Therapist profiles ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialSuffix {
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_write_in: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntroVideo {
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnail: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default, rename = "type", deserialize_with = "nullable")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUrls {
    #[serde(default, deserialize_with = "nullable")]
    pub thumbnail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryLocation {
    #[serde(default, deserialize_with = "nullable")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub region_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub region_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub city_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub country_code: String,
    #[serde(default, deserialize_with = "nullable")]
    pub phone_number: String,
    #[serde(default, deserialize_with = "nullable")]
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentTypes {
    #[serde(default, deserialize_with = "nullable")]
    pub in_person: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub online: bool,
}

/// One ranked listing returned by the ranking endpoint. Unknown upstream
/// fields are dropped; missing display fields decode as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistProfile {
    pub uuid: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "nullable")]
    pub listing_name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub verification_status: String,
    #[serde(default, deserialize_with = "nullable")]
    pub canonical_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub suffixes: Vec<CredentialSuffix>,
    #[serde(default, deserialize_with = "nullable")]
    pub health_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_role_write_in: Option<String>,
    #[serde(default)]
    pub intro_video: Option<IntroVideo>,
    #[serde(default, deserialize_with = "nullable")]
    pub photo_urls: PhotoUrls,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_location: PrimaryLocation,
    #[serde(default, deserialize_with = "nullable")]
    pub appointment_types: AppointmentTypes,
    #[serde(default, deserialize_with = "nullable")]
    pub personal_statement: String,
    pub ai_rank: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub ai_description: String,
}

impl TherapistProfile {
    /// The intro video, if the listing has one with a playable source.
    pub fn playable_video(&self) -> Option<&IntroVideo> {
        self.intro_video
            .as_ref()
            .filter(|video| !video.source.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_decodes_chat_wire_shape() {
        let msg: Message = serde_json::from_value(json!({
            "id": "m-2",
            "role": "assistant",
            "content": "What brings you here?",
            "toolInvocations": [{
                "toolCallId": "call_1",
                "toolName": "get_therapist_match_data",
                "state": "result",
                "args": {"attributeIds": [3]},
                "result": {"match_count": 1200, "filters_applied": [3]}
            }]
        }))
        .unwrap();

        assert_eq!(msg.role, Role::Assistant);
        assert_eq!(msg.tool_invocations().len(), 1);
        assert_eq!(msg.tool_invocations()[0].state, ToolState::Result);
    }

    #[test]
    fn partial_call_state_is_pending() {
        let state: ToolState = serde_json::from_value(json!("partial-call")).unwrap();
        assert!(state.is_pending());
        assert!(ToolState::Call.is_pending());
        assert!(!ToolState::Result.is_pending());
    }

    #[test]
    fn match_signal_accepts_both_spellings() {
        let snake: MatchSignal =
            serde_json::from_value(json!({"match_count": 12, "filters_applied": [2, 6]})).unwrap();
        let camel: MatchSignal =
            serde_json::from_value(json!({"matchCount": 12, "filtersApplied": [2, 6]})).unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.match_count, Some(12));
    }

    #[test]
    fn match_signal_tolerates_null_filters_and_error_flag() {
        let signal: MatchSignal = serde_json::from_value(json!({
            "match_count": 0,
            "filters_applied": null,
            "location": {"id": 68684, "type": "City", "regionCode": "ON"},
            "message": "Error fetching therapist data",
            "error": true
        }))
        .unwrap();
        assert!(signal.filters_applied.is_empty());
        assert!(signal.error);
        assert_eq!(signal.location.unwrap().region_code, "ON");
    }

    #[test]
    fn profile_decodes_with_nulls_and_unknown_fields() {
        let profile: TherapistProfile = serde_json::from_value(json!({
            "uuid": "a1",
            "id": 42,
            "listingName": "Dana Reyes",
            "primaryLocation": {"cityName": "Toronto", "addressLine1": null, "phoneNumber": "4165551234"},
            "introVideo": null,
            "aiRank": 2,
            "aiDescription": "Works with anxiety.",
            "somethingNew": {"nested": true}
        }))
        .unwrap();
        assert_eq!(profile.primary_location.address_line1, "");
        assert!(profile.playable_video().is_none());
        assert_eq!(profile.ai_rank, 2);
    }

    #[test]
    fn video_without_source_is_not_playable() {
        let mut profile: TherapistProfile =
            serde_json::from_value(json!({"uuid": "a1", "aiRank": 1})).unwrap();
        profile.intro_video = Some(IntroVideo::default());
        assert!(profile.playable_video().is_none());
    }
}
