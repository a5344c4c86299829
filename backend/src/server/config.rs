//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use url::Url;
use zeroize::Zeroizing;

use campus_connect::domain::DataSource;
use campus_connect::domain::forms::ImageHostAllowList;
use campus_connect::inbound::http::session_config::SessionSettings;

/// Hosted recommendation engine settings.
pub struct GenAiConfig {
    pub(crate) endpoint: Url,
    pub(crate) api_key: Option<Zeroizing<String>>,
    pub(crate) timeout: Duration,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) default_source: DataSource,
    pub(crate) images: ImageHostAllowList,
    pub(crate) snapshot_path: Option<PathBuf>,
    pub(crate) genai: Option<GenAiConfig>,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            default_source: DataSource::default(),
            images: ImageHostAllowList::default(),
            snapshot_path: None,
            genai: None,
        }
    }

    /// Source used when a request does not name one.
    #[must_use]
    pub fn with_default_source(mut self, source: DataSource) -> Self {
        self.default_source = source;
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: ImageHostAllowList) -> Self {
        self.images = images;
        self
    }

    /// Load the live store from a JSON snapshot in the background.
    ///
    /// Reads answer `503` until the load finishes.
    #[must_use]
    pub fn with_snapshot(mut self, path: Option<PathBuf>) -> Self {
        self.snapshot_path = path;
        self
    }

    /// Use a hosted recommendation engine instead of local scoring.
    #[must_use]
    pub fn with_genai(mut self, genai: Option<GenAiConfig>) -> Self {
        self.genai = genai;
        self
    }
}

impl GenAiConfig {
    #[must_use]
    pub fn new(endpoint: Url, api_key: Option<Zeroizing<String>>, timeout: Duration) -> Self {
        Self {
            endpoint,
            api_key,
            timeout,
        }
    }
}
