//! Backend entry-point: loads settings, builds the server and runs it.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus_connect::config::AppSettings;
use campus_connect::inbound::http::health::HealthState;
use campus_connect::inbound::http::session_config::{BuildMode, session_settings_from_env};
use server::{GenAiConfig, ServerConfig, create_server};

fn invalid_config(error: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, error.to_string())
}

fn server_config(settings: &AppSettings) -> std::io::Result<ServerConfig> {
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(invalid_config)?;
    let bind_addr = settings.bind_addr().map_err(invalid_config)?;
    let genai = settings
        .genai_endpoint()
        .map_err(invalid_config)?
        .map(|endpoint| {
            GenAiConfig::new(endpoint, settings.genai_api_key(), settings.genai_timeout())
        });
    Ok(ServerConfig::new(session, bind_addr)
        .with_default_source(settings.default_source().map_err(invalid_config)?)
        .with_images(settings.image_hosts())
        .with_snapshot(settings.snapshot_path.clone())
        .with_genai(genai))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(invalid_config)?;
    let config = server_config(&settings)?;
    info!(bind_addr = %config.bind_addr, "starting campus connect");

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
