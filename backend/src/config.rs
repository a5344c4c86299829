//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from `CAMPUS_*` environment variables, a config
//! file, or the command line. Raw values stay as strings here and are
//! checked by the accessors so startup can report which one is wrong.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::DataSource;
use crate::domain::forms::ImageHostAllowList;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_GENAI_TIMEOUT_SECS: u64 = 20;

/// Invalid setting values.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}'")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid default data source: {message}")]
    DataSource { message: String },
    #[error("invalid generative endpoint '{value}'")]
    Endpoint {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("generative endpoint must use http or https, got '{scheme}'")]
    EndpointScheme { scheme: String },
}

/// Server settings.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `live` or `fixture`; used when a request names no source.
    pub default_source: Option<String>,
    /// Comma-separated hosts listing images may be served from.
    pub image_hosts: Option<String>,
    /// JSON snapshot loaded into the live store at startup.
    pub snapshot_path: Option<PathBuf>,
    /// Base URL of the hosted recommendation engine. Without it the local
    /// engine scores the live catalogue.
    pub genai_endpoint: Option<String>,
    pub genai_api_key: Option<String>,
    pub genai_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Listen address, `0.0.0.0:8080` when unset.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Source for requests that name none; `live` when unset.
    pub fn default_source(&self) -> Result<DataSource, SettingsError> {
        match self.default_source.as_deref() {
            None => Ok(DataSource::default()),
            Some(raw) => raw
                .parse()
                .map_err(|message| SettingsError::DataSource { message }),
        }
    }

    /// Configured hosts, or the built-in list when unset or blank.
    pub fn image_hosts(&self) -> ImageHostAllowList {
        let hosts: Vec<&str> = self
            .image_hosts
            .as_deref()
            .map(|raw| raw.split(',').map(str::trim).filter(|h| !h.is_empty()).collect())
            .unwrap_or_default();
        if hosts.is_empty() {
            ImageHostAllowList::default()
        } else {
            ImageHostAllowList::new(hosts)
        }
    }

    /// Hosted engine URL, restricted to `http` and `https`.
    pub fn genai_endpoint(&self) -> Result<Option<Url>, SettingsError> {
        let Some(raw) = self
            .genai_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(|source| SettingsError::Endpoint {
            value: raw.to_owned(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SettingsError::EndpointScheme {
                scheme: url.scheme().to_owned(),
            });
        }
        Ok(Some(url))
    }

    /// Bearer key for the hosted engine; blank counts as unset.
    pub fn genai_api_key(&self) -> Option<Zeroizing<String>> {
        self.genai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| Zeroizing::new(key.to_owned()))
    }

    /// Request timeout for the hosted engine, 20 seconds by default.
    pub fn genai_timeout(&self) -> Duration {
        Duration::from_secs(
            self.genai_timeout_secs
                .unwrap_or(DEFAULT_GENAI_TIMEOUT_SECS),
        )
    }
}
