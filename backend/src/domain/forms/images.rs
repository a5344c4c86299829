//! Remote image host allow-list.

use url::Url;

/// Hosts listing images may be served from.
pub const DEFAULT_IMAGE_HOSTS: [&str; 3] = [
    "images.unsplash.com",
    "api.dicebear.com",
    "firebasestorage.googleapis.com",
];

/// HTTPS hosts accepted for listing image references.
///
/// # Examples
/// ```
/// use campus_connect::domain::forms::ImageHostAllowList;
///
/// let hosts = ImageHostAllowList::default();
/// assert!(hosts.check("https://images.unsplash.com/photo-1").is_ok());
/// assert!(hosts.check("http://images.unsplash.com/photo-1").is_err());
/// assert!(hosts.check("https://example.com/cat.png").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHostAllowList {
    hosts: Vec<String>,
}

impl ImageHostAllowList {
    /// Allow-list of `hosts`, trimmed and lower-cased; blanks are dropped.
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|host| host.as_ref().trim().to_ascii_lowercase())
            .filter(|host| !host.is_empty())
            .collect();
        Self { hosts }
    }

    /// Accepted hosts in configuration order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Validate one image URL, returning a user-facing message on failure.
    pub fn check(&self, raw: &str) -> Result<Url, String> {
        let url = Url::parse(raw.trim()).map_err(|_| "Image URL is not a valid URL".to_owned())?;
        if url.scheme() != "https" {
            return Err("Image URL must use https".to_owned());
        }
        let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
        if !self.hosts.iter().any(|allowed| allowed == &host) {
            return Err(format!("Images from {host} are not allowed"));
        }
        Ok(url)
    }
}

impl Default for ImageHostAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_HOSTS)
    }
}
