use thiserror::Error;

pub type Result<T> = std::result::Result<T, RankingError>;

#[derive(Debug, Error)]
pub enum RankingError {
    /// Transport failure or non-success HTTP status.
    #[error("Ranking request failed: {0}")]
    RequestFailed(String),

    /// The call succeeded but the body had no usable profiles.
    #[error("Invalid ranking response: {0}")]
    InvalidResponse(String),

    /// The ranking service reported an analysis error inside a 2xx body.
    #[error("Ranking analysis failed: {0}")]
    UpstreamAnalysisError(String),
}

impl From<reqwest::Error> for RankingError {
    fn from(err: reqwest::Error) -> Self {
        RankingError::RequestFailed(err.to_string())
    }
}

impl From<serde_json::Error> for RankingError {
    fn from(err: serde_json::Error) -> Self {
        RankingError::InvalidResponse(err.to_string())
    }
}
