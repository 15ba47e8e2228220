use std::error::Error as StdError;
use std::fmt;

/// Fetch or render failure. The catalog does not distinguish network,
/// payload and template errors: they all end up in the same notification.
#[derive(Debug)]
pub struct CatalogError {
    pub message: String,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl CatalogError {
    pub fn new(message: &str) -> Self {
        CatalogError {
            message: message.to_string(),
            source: None,
        }
    }

    /// The wrapped error, if this one was converted from another.
    pub fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CatalogError: {}", self.message)
    }
}

// Any std error converts, so `?` works on reqwest, askama, toml and io results alike.
impl<E: StdError + Send + Sync + 'static> From<E> for CatalogError {
    fn from(err: E) -> Self {
        CatalogError {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
