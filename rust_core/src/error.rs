//! Error types for upstream fetches and feed aggregation

use thiserror::Error;

/// Failure of a single upstream fetch
///
/// The three variants map onto how the HTTP surface reports the failure:
/// an upstream status is passed through, everything else is internal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Upstream answered with a non-success status code
    #[error("{provider} upstream returned HTTP {status}")]
    UpstreamStatus { provider: &'static str, status: u16 },

    /// Connection, body, or decode failure before a usable response
    #[error("{provider} fetch failed: {detail}")]
    Transport {
        provider: &'static str,
        detail: String,
    },

    /// The whole fetch exceeded its deadline and was abandoned
    #[error("{provider} fetch timed out after {timeout_secs}s")]
    Timeout {
        provider: &'static str,
        timeout_secs: u64,
    },
}

impl SourceError {
    /// Build a transport error from anything displayable
    pub fn transport(provider: &'static str, detail: impl std::fmt::Display) -> Self {
        SourceError::Transport {
            provider,
            detail: detail.to_string(),
        }
    }

    /// Name of the source that failed
    pub fn provider(&self) -> &'static str {
        match self {
            SourceError::UpstreamStatus { provider, .. } => provider,
            SourceError::Transport { provider, .. } => provider,
            SourceError::Timeout { provider, .. } => provider,
        }
    }
}

/// Every registered source failed during a merged fetch
///
/// Partial failure is not an error: the merged feed reports it per
/// source instead. This only fires when nothing settled successfully.
#[derive(Error, Debug)]
#[error("all sources failed: {detail}")]
pub struct AggregateError {
    pub detail: String,
}
