pub mod error;
pub mod types;

pub use error::{RankingError, Result};
pub use types::{AnalysisPayload, RankingResponse};

use std::sync::Arc;

use async_trait::async_trait;
use theramatch_common::{RankingRequest, RankingResult};

/// Path of the ranking endpoint relative to the app's base URL.
pub const MATCH_PATH: &str = "/api/match";

/// Turns a transcript snapshot into a ranked shortlist.
///
/// Implemented by [`RankingClient`] over HTTP; tests substitute scripted fakes.
#[async_trait]
pub trait RankingService: Send + Sync {
    async fn submit(&self, request: &RankingRequest) -> Result<RankingResult>;
}

pub struct RankingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RankingClient {
    /// No request timeout is set; a hung ranking call is bounded only by the
    /// transport.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), MATCH_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RankingService for RankingClient {
    async fn submit(&self, request: &RankingRequest) -> Result<RankingResult> {
        tracing::info!(
            endpoint = %self.endpoint,
            messages = request.messages.len(),
            "Submitting ranking request"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(RankingError::RequestFailed(format!(
                "status {}: {}",
                status.as_u16(),
                message
            )));
        }

        let body = resp.text().await?;
        let decoded: RankingResponse = serde_json::from_str(&body)?;
        let result = decoded.into_result()?;

        tracing::info!(
            profiles = result.profiles.len(),
            ranked = result.ai_analysis.ranked_matches.len(),
            "Ranking response accepted"
        );
        Ok(result)
    }
}

#[async_trait]
impl<S: RankingService + ?Sized> RankingService for Arc<S> {
    async fn submit(&self, request: &RankingRequest) -> Result<RankingResult> {
        (**self).submit(request).await
    }
}
