use ranking_client::{RankingError, RankingService};
use theramatch_common::{RankingRequest, RankingResult};
use tracing::{info, warn};

use crate::notify::{Notification, Notifier};
use crate::store::{SessionStore, RESULTS_KEY};

const GENERIC_FAILURE: &str = "Failed to process match request";

#[derive(Debug)]
pub enum DispatchOutcome {
    /// Results were persisted; the caller should move to the results view.
    ShowResults,
    Failed(RankingError),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::ShowResults)
    }
}

/// Sends a ranking request and hands the result to the results view.
///
/// On success the result replaces whatever was stored under
/// [`RESULTS_KEY`]. On failure nothing is written and one notification is
/// raised. Failures are never retried here.
pub struct RankingDispatcher<R, S, N> {
    ranking: R,
    store: S,
    notifier: N,
}

impl<R, S, N> RankingDispatcher<R, S, N>
where
    R: RankingService,
    S: SessionStore,
    N: Notifier,
{
    pub fn new(ranking: R, store: S, notifier: N) -> Self {
        Self {
            ranking,
            store,
            notifier,
        }
    }

    pub async fn dispatch(&self, request: RankingRequest) -> DispatchOutcome {
        let result = match self.ranking.submit(&request).await {
            Ok(result) => result,
            Err(e) => return self.fail(e),
        };

        if let Err(e) = self.persist(&result).await {
            return self.fail(e);
        }

        info!(profiles = result.profiles.len(), "Ranking results stored");
        DispatchOutcome::ShowResults
    }

    async fn persist(&self, result: &RankingResult) -> Result<(), RankingError> {
        let serialized = serde_json::to_string(result)
            .map_err(|e| RankingError::RequestFailed(format!("could not serialize results: {e}")))?;
        self.store
            .set(RESULTS_KEY, serialized)
            .await
            .map_err(|e| RankingError::RequestFailed(format!("could not store results: {e}")))
    }

    fn fail(&self, error: RankingError) -> DispatchOutcome {
        warn!(error = %error, "Ranking request failed");
        let message = match &error {
            RankingError::UpstreamAnalysisError(message) => message.clone(),
            RankingError::RequestFailed(_) | RankingError::InvalidResponse(_) => {
                GENERIC_FAILURE.to_string()
            }
        };
        self.notifier.notify(Notification::error(message));
        DispatchOutcome::Failed(error)
    }
}
