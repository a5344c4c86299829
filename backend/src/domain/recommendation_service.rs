//! Recommendation and summary use-cases over the engine port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::catalogue_service::ListingStores;
use crate::domain::ports::{PropertySummary, RecommendationEngine, RecommendationQuery};
use crate::domain::{
    DataSource, Error, ListingId, Recommendation, RecommendationRequest, SummaryRequest,
    port_errors, validate_recommendations,
};

/// Recommendation service implementing [`RecommendationQuery`].
#[derive(Clone)]
pub struct RecommendationService<E> {
    engine: Arc<E>,
    live: ListingStores,
    fixture: ListingStores,
}

impl<E> RecommendationService<E> {
    /// Service over `engine`, resolving summaries through `live` or `fixture`.
    pub fn new(engine: Arc<E>, live: ListingStores, fixture: ListingStores) -> Self {
        Self {
            engine,
            live,
            fixture,
        }
    }
}

#[async_trait]
impl<E> RecommendationQuery for RecommendationService<E>
where
    E: RecommendationEngine,
{
    async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, Error> {
        let candidates = self
            .engine
            .recommend(request)
            .await
            .map_err(port_errors::engine)?;
        let received = candidates.len();
        let recommendations = validate_recommendations(request, candidates).map_err(|error| {
            warn!(error = %error, "recommendation engine returned invalid output");
            Error::service_unavailable("recommendation service returned an invalid response")
        })?;
        info!(received, location = %request.location, "recommendations generated");
        Ok(recommendations)
    }

    async fn summarise(
        &self,
        id: &ListingId,
        source: DataSource,
    ) -> Result<PropertySummary, Error> {
        let stores = match source {
            DataSource::Live => &self.live,
            DataSource::Fixture => &self.fixture,
        };
        let property = stores
            .properties
            .find(id)
            .await
            .map_err(port_errors::listing)?
            .ok_or_else(|| Error::not_found(format!("property {id} not found")))?;
        let summary = self
            .engine
            .summarise(&SummaryRequest::from(&property))
            .await
            .map_err(port_errors::engine)?;
        let trimmed = summary.trim();
        if trimmed.is_empty() {
            warn!(property_id = %id, "recommendation engine returned an empty summary");
            return Err(Error::service_unavailable(
                "recommendation service returned an invalid response",
            ));
        }
        Ok(PropertySummary {
            property_id: id.clone(),
            summary: trimmed.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockMessRepository, MockPropertyRepository, MockRecommendationEngine,
        RecommendationEngineError,
    };
    use crate::domain::test_fixtures::property;
    use crate::domain::{ErrorCode, RecommendationCandidate};
    use rstest::{fixture, rstest};

    fn stores(properties: MockPropertyRepository) -> ListingStores {
        ListingStores {
            properties: Arc::new(properties),
            messes: Arc::new(MockMessRepository::new()),
        }
    }

    fn make_service(
        engine: MockRecommendationEngine,
        live: MockPropertyRepository,
    ) -> RecommendationService<MockRecommendationEngine> {
        RecommendationService::new(
            Arc::new(engine),
            stores(live),
            stores(MockPropertyRepository::new()),
        )
    }

    #[fixture]
    fn request() -> RecommendationRequest {
        RecommendationRequest {
            location: "Hauz Khas".into(),
            max_rent: 10_000.0,
            desired_amenities: vec!["Wi-Fi".into()],
        }
    }

    fn candidate(rent: f64, score: f64) -> RecommendationCandidate {
        RecommendationCandidate {
            property_id: "p1".into(),
            property_name: "Green Nest".into(),
            rent,
            address: "Hauz Khas".into(),
            amenities: vec!["Wi-Fi".into()],
            contact_information: "9876543210".into(),
            match_score: score,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn valid_candidates_pass_through(request: RecommendationRequest) {
        let mut engine = MockRecommendationEngine::new();
        engine
            .expect_recommend()
            .return_once(|_| Ok(vec![candidate(8_000.0, 0.9)]));
        let service = make_service(engine, MockPropertyRepository::new());

        let recommendations = service.recommend(&request).await.expect("recommend");
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].property_id.as_ref(), "p1");
    }

    #[rstest]
    #[case(candidate(12_000.0, 0.9))]
    #[case(candidate(8_000.0, 1.5))]
    #[tokio::test]
    async fn invalid_candidates_are_an_upstream_failure(
        request: RecommendationRequest,
        #[case] bad: RecommendationCandidate,
    ) {
        let mut engine = MockRecommendationEngine::new();
        engine.expect_recommend().return_once(move |_| Ok(vec![bad]));
        let service = make_service(engine, MockPropertyRepository::new());

        let error = service.recommend(&request).await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn engine_failure_is_transient(request: RecommendationRequest) {
        let mut engine = MockRecommendationEngine::new();
        engine
            .expect_recommend()
            .return_once(|_| Err(RecommendationEngineError::status(503_u16)));
        let service = make_service(engine, MockPropertyRepository::new());

        let error = service.recommend(&request).await.expect_err("unavailable");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn summary_is_built_from_the_property() {
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_find()
            .return_once(|_| Ok(Some(property("p1", 7_000.0, 1))));
        let mut engine = MockRecommendationEngine::new();
        engine
            .expect_summarise()
            .withf(|req| (req.max_rent - 7_000.0).abs() < f64::EPSILON)
            .return_once(|_| Ok("  A bright single room near campus.  ".into()));
        let service = make_service(engine, properties);

        let id = ListingId::new("p1").expect("listing id");
        let summary = service
            .summarise(&id, DataSource::Live)
            .await
            .expect("summary");
        assert_eq!(summary.summary, "A bright single room near campus.");
    }

    #[rstest]
    #[tokio::test]
    async fn summary_for_missing_property_is_not_found() {
        let mut properties = MockPropertyRepository::new();
        properties.expect_find().return_once(|_| Ok(None));
        let service = make_service(MockRecommendationEngine::new(), properties);

        let id = ListingId::new("ghost").expect("listing id");
        let error = service
            .summarise(&id, DataSource::Live)
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
