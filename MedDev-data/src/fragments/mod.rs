//! Sources for the shared HTML partials of the static site
//!
//! A [`FragmentSource`] resolves a relative fragment path (`head.html`,
//! `header.html`, ...) to the raw HTML body. Only 2xx responses count as a
//! successful load; everything else surfaces as a [`FragmentError`].

use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::debug;

/// Errors raised while fetching a fragment
#[derive(Debug, Error)]
pub enum FragmentError {
    /// The fragment path could not be resolved against the base URL
    #[error("Invalid fragment url {path}: {reason}")]
    InvalidUrl { path: String, reason: String },

    /// The server answered with a non-success status
    #[error("Failed to load {url}: {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response
    #[error("Failed to load {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FragmentError {
    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FragmentError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that can hand out fragment bodies by relative path
#[async_trait]
pub trait FragmentSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, FragmentError>;
}

/// Fetches fragments over plain HTTP GET relative to a base URL
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    client: Client,
    base: Url,
}

impl HttpFragmentSource {
    /// Create a source rooted at `base`
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `http://host/site` and `http://host/site/` resolve the same paths.
    pub fn new(base: &str) -> Result<Self, FragmentError> {
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized).map_err(|e| FragmentError::InvalidUrl {
            path: base.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: Client::new(),
            base,
        })
    }

    /// Resolve a fragment path against the base URL
    pub fn resolve(&self, path: &str) -> Result<Url, FragmentError> {
        self.base.join(path).map_err(|e| FragmentError::InvalidUrl {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, path: &str) -> Result<String, FragmentError> {
        let url = self.resolve(path)?;
        debug!("Fetching fragment {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FragmentError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FragmentError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FragmentError::Transport {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_to_directory_base() {
        let source = HttpFragmentSource::new("http://localhost:3000/site").unwrap();
        let url = source.resolve("header.html").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/site/header.html");
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let err = HttpFragmentSource::new("not a url").unwrap_err();
        assert!(matches!(err, FragmentError::InvalidUrl { .. }));
    }

    #[test]
    fn test_status_error_message() {
        let err = FragmentError::Status {
            url: "http://localhost/footer.html".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Failed to load http://localhost/footer.html: 404");
        assert_eq!(err.status(), Some(404));
    }
}
