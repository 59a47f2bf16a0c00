use serde::Deserialize;
use theramatch_common::{AiAnalysis, RankedMatch, RankingResult, TherapistProfile};

use crate::error::{RankingError, Result};

/// Body returned by `/api/match`, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResponse {
    #[serde(default)]
    pub profiles: Option<Vec<TherapistProfile>>,
    #[serde(default)]
    pub ai_analysis: Option<AnalysisPayload>,
}

/// Either the ranked matches or an embedded error from the ranking model.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPayload {
    #[serde(default)]
    pub ranked_matches: Option<Vec<RankedMatch>>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl AnalysisPayload {
    fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.trim().is_empty() => {
                Some("ranking analysis reported an error".to_string())
            }
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl RankingResponse {
    /// An embedded analysis error wins over the empty-profiles check, since
    /// its message is the more useful one to show.
    pub fn into_result(self) -> Result<RankingResult> {
        let analysis = self.ai_analysis.unwrap_or_default();
        if let Some(message) = analysis.error_message() {
            return Err(RankingError::UpstreamAnalysisError(message));
        }

        let profiles = self.profiles.unwrap_or_default();
        if profiles.is_empty() {
            return Err(RankingError::InvalidResponse(
                "response contained no profiles".to_string(),
            ));
        }

        Ok(RankingResult {
            profiles,
            ai_analysis: AiAnalysis {
                ranked_matches: analysis.ranked_matches.unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(body: serde_json::Value) -> Result<RankingResult> {
        serde_json::from_value::<RankingResponse>(body)
            .map_err(RankingError::from)?
            .into_result()
    }

    #[test]
    fn empty_profiles_is_invalid() {
        let err = decode(json!({"profiles": [], "aiAnalysis": {"rankedMatches": []}})).unwrap_err();
        assert!(matches!(err, RankingError::InvalidResponse(_)));
    }

    #[test]
    fn missing_profiles_is_invalid() {
        let err = decode(json!({"aiAnalysis": {"rankedMatches": []}})).unwrap_err();
        assert!(matches!(err, RankingError::InvalidResponse(_)));
    }

    #[test]
    fn embedded_error_is_upstream_failure() {
        let err = decode(json!({
            "profiles": [{"uuid": "a", "aiRank": 1}],
            "aiAnalysis": {"error": "model timed out"}
        }))
        .unwrap_err();
        match err {
            RankingError::UpstreamAnalysisError(message) => assert_eq!(message, "model timed out"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn embedded_error_checked_before_empty_profiles() {
        let err = decode(json!({"profiles": [], "aiAnalysis": {"error": {"code": 429}}})).unwrap_err();
        match err {
            RankingError::UpstreamAnalysisError(message) => assert!(message.contains("429")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn null_error_is_not_a_failure() {
        let result = decode(json!({
            "profiles": [{"uuid": "a", "aiRank": 1}],
            "aiAnalysis": {"rankedMatches": [{"originalId": 7, "rank": 1, "description": "Great fit"}], "error": null}
        }))
        .unwrap();
        assert_eq!(result.profiles.len(), 1);
        assert_eq!(result.ai_analysis.ranked_matches[0].original_id, 7);
    }
}
