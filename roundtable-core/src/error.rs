//! Error types for gallery operations.

use thiserror::Error;

/// A call to the mock data server failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetrievalError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Server returned status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {message}")]
    Parse { url: String, message: String },
}

/// A summary lookup failed, tagged with the stage that failed.
///
/// A search with zero results is not an error; see [`crate::SummaryOutcome`].
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Encyclopedia search failed: {0}")]
    Search(#[source] wiki::Error),

    #[error("Fetching the extract for \"{title}\" failed: {source}")]
    Extract {
        title: String,
        #[source]
        source: wiki::Error,
    },
}

impl SummaryError {
    /// Short label of the failing stage for status lines.
    pub fn stage(&self) -> &'static str {
        match self {
            SummaryError::Search(_) => "search",
            SummaryError::Extract { .. } => "extract",
        }
    }
}

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid URL for {name}: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RetrievalError::Status {
            url: "http://localhost:3000/knights".to_string(),
            status: 500,
        };
        assert_eq!(
            err.to_string(),
            "Server returned status 500 for http://localhost:3000/knights"
        );
    }

    #[test]
    fn test_summary_error_stage() {
        let search = SummaryError::Search(wiki::Error::Network("refused".to_string()));
        assert_eq!(search.stage(), "search");

        let extract = SummaryError::Extract {
            title: "King Arthur".to_string(),
            source: wiki::Error::Parse("eof".to_string()),
        };
        assert_eq!(extract.stage(), "extract");
        assert!(extract.to_string().contains("King Arthur"));
    }
}
