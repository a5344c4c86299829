//! Driven port for the generative recommendation and summary endpoint.

use async_trait::async_trait;

use crate::domain::{RecommendationCandidate, RecommendationRequest, SummaryRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised while talking to a recommendation engine.
    pub enum RecommendationEngineError {
        /// The request did not reach the engine or timed out.
        Transport { message: String } => "recommendation engine transport failed: {message}",
        /// The engine answered with a non-success status.
        Status { status: u16 } => "recommendation engine returned status {status}",
        /// The engine's response body could not be decoded.
        Decode { message: String } => "recommendation engine response was malformed: {message}",
    }
}

/// One structured request, one structured response. No retries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    /// Candidates are returned unvalidated; callers must check them.
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationEngineError>;

    async fn summarise(&self, request: &SummaryRequest) -> Result<String, RecommendationEngineError>;
}
