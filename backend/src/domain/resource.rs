//! Result of a data-access call: still loading, ready, or failed.

use super::Error;

/// Outcome of a document lookup or a live collection subscription.
///
/// Consumers match exhaustively; there is no separate "data may be null"
/// state to check.
///
/// # Examples
/// ```
/// use campus_connect::domain::Resource;
///
/// let ready: Resource<u8> = Resource::Ready(3);
/// assert_eq!(ready.map(|n| n * 2), Resource::Ready(6));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    Loading,
    Ready(T),
    Failed(Error),
}

impl<T> Resource<T> {
    /// Transform the ready value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Self::Loading => Resource::Loading,
            Self::Ready(value) => Resource::Ready(f(value)),
            Self::Failed(error) => Resource::Failed(error),
        }
    }

    /// Borrow the ready value.
    pub fn as_ref(&self) -> Resource<&T> {
        match self {
            Self::Loading => Resource::Loading,
            Self::Ready(value) => Resource::Ready(value),
            Self::Failed(error) => Resource::Failed(error.clone()),
        }
    }

    /// Whether the data is still arriving.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Collapse into a request outcome. A resource still loading is reported
    /// as a transient unavailability carrying `what` in the message.
    pub fn into_result(self, what: &str) -> Result<T, Error> {
        match self {
            Self::Loading => Err(Error::service_unavailable(format!("{what} are still loading"))),
            Self::Ready(value) => Ok(value),
            Self::Failed(error) => Err(error),
        }
    }
}

impl<T> From<Result<T, Error>> for Resource<T> {
    fn from(value: Result<T, Error>) -> Self {
        match value {
            Ok(value) => Self::Ready(value),
            Err(error) => Self::Failed(error),
        }
    }
}
