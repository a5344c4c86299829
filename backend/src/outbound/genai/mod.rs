//! Recommendation engine adapters.
//!
//! - [`GenAiHttpEngine`] calls a hosted generative endpoint over JSON.
//! - [`LocalRecommendationEngine`] scores the live catalogue in process.
//! - [`ConfiguredEngine`] picks one of the two at startup.

mod dto;
mod http_engine;
mod local_engine;

use async_trait::async_trait;

pub use http_engine::GenAiHttpEngine;
pub use local_engine::{LocalRecommendationEngine, MAX_RECOMMENDATIONS, rank, template_summary};

use crate::domain::ports::{RecommendationEngine, RecommendationEngineError};
use crate::domain::{RecommendationCandidate, RecommendationRequest, SummaryRequest};

/// Engine selected from configuration.
pub enum ConfiguredEngine {
    Hosted(GenAiHttpEngine),
    Local(LocalRecommendationEngine),
}

#[async_trait]
impl RecommendationEngine for ConfiguredEngine {
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<RecommendationCandidate>, RecommendationEngineError> {
        match self {
            Self::Hosted(engine) => engine.recommend(request).await,
            Self::Local(engine) => engine.recommend(request).await,
        }
    }

    async fn summarise(&self, request: &SummaryRequest) -> Result<String, RecommendationEngineError> {
        match self {
            Self::Hosted(engine) => engine.summarise(request).await,
            Self::Local(engine) => engine.summarise(request).await,
        }
    }
}
