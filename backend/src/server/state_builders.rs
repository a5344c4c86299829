//! Builders for the document stores, domain services and HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use campus_connect::domain::{
    AccountCommandService, CatalogueService, DashboardService, FeedbackPorts, FeedbackService,
    ListingStores, RecommendationService,
};
use campus_connect::domain::ports::IdentityProvider;
use campus_connect::inbound::http::state::{HttpState, HttpStatePorts};
use campus_connect::outbound::fixtures::demo_store;
use campus_connect::outbound::genai::{
    ConfiguredEngine, GenAiHttpEngine, LocalRecommendationEngine,
};
use campus_connect::outbound::identity::LocalIdentityProvider;
use campus_connect::outbound::memory::{MemoryDocumentStore, SharedStore, spawn_snapshot_load};

use super::ServerConfig;

/// Live store: empty and writable, or loading from the configured snapshot.
fn build_live_store(config: &ServerConfig) -> SharedStore {
    match &config.snapshot_path {
        Some(path) => {
            let store = Arc::new(MemoryDocumentStore::loading());
            spawn_snapshot_load(Arc::clone(&store), path.clone());
            store
        }
        None => Arc::new(MemoryDocumentStore::default()),
    }
}

fn build_fixture_store() -> std::io::Result<SharedStore> {
    demo_store()
        .map(Arc::new)
        .map_err(|e| std::io::Error::other(format!("demo catalogue is malformed: {e}")))
}

fn listing_stores(store: &SharedStore) -> ListingStores {
    ListingStores {
        properties: store.clone(),
        messes: store.clone(),
    }
}

fn build_engine(config: &ServerConfig, live: &SharedStore) -> std::io::Result<ConfiguredEngine> {
    match &config.genai {
        Some(genai) => {
            let engine = GenAiHttpEngine::new(
                genai.endpoint.clone(),
                genai.api_key.clone(),
                genai.timeout,
            )
            .map_err(|e| std::io::Error::other(format!("recommendation client failed: {e}")))?;
            info!(endpoint = %genai.endpoint, "using hosted recommendation engine");
            Ok(ConfiguredEngine::Hosted(engine))
        }
        None => {
            info!("using local recommendation engine");
            Ok(ConfiguredEngine::Local(LocalRecommendationEngine::new(
                live.clone(),
            )))
        }
    }
}

/// Build the shared HTTP state over the in-memory adapters.
///
/// # Errors
///
/// Fails when the bundled demo catalogue cannot be decoded or the hosted
/// engine client cannot be built.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let live = build_live_store(config);
    let fixture = build_fixture_store()?;
    let identity = Arc::new(LocalIdentityProvider::default());
    let auth = identity.auth_context();
    let engine = Arc::new(build_engine(config, &live)?);

    let catalogue = Arc::new(CatalogueService::new(
        listing_stores(&live),
        listing_stores(&fixture),
        live.clone(),
        live.clone(),
    ));
    let feedback = FeedbackService::new(
        FeedbackPorts {
            properties: live.clone(),
            messes: live.clone(),
            reviews: live.clone(),
            suggestions: live.clone(),
            profiles: live.clone(),
        },
        Arc::new(mockable::DefaultClock),
    );
    let dashboard = DashboardService::new(
        listing_stores(&live),
        listing_stores(&fixture),
        live.clone(),
        live.clone(),
    );
    let recommendations =
        RecommendationService::new(engine, listing_stores(&live), listing_stores(&fixture));

    let state = HttpState::new(HttpStatePorts {
        catalogue: catalogue.clone(),
        listings: catalogue,
        accounts: Arc::new(AccountCommandService::new(identity, live)),
        feedback: Arc::new(feedback),
        dashboard: Arc::new(dashboard),
        recommendations: Arc::new(recommendations),
        auth,
    })
    .with_images(config.images.clone())
    .with_default_source(config.default_source);
    Ok(web::Data::new(state))
}
