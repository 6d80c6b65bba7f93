//! Error taxonomy for generation calls.

use std::time::Duration;

/// Result alias used across huoyuan crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a caller and a vendor API.
///
/// The first four variants are caller errors and are always raised before
/// any network call. `Upstream` preserves the vendor status and body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The provider identifier is not registered.
    #[error("unsupported provider '{name}', supported: {}", supported.join(", "))]
    UnsupportedProvider {
        /// Identifier as supplied by the caller.
        name: String,
        /// Registered identifiers at the time of the call.
        supported: Vec<String>,
    },

    /// The agent identifier is not in the catalog.
    #[error("unknown agent '{0}'")]
    UnknownAgent(String),

    /// No usable user turn to generate from.
    #[error("no user prompt to generate from")]
    EmptyPrompt,

    /// A generation parameter is out of its accepted range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value, rendered.
        value: String,
    },

    /// No credential was configured for the adapter.
    #[error("missing credential for {provider}, set {credential}")]
    Auth {
        /// Provider identifier.
        provider: String,
        /// Credential name(s) that were consulted.
        credential: String,
    },

    /// The vendor failed the call, or the deadline elapsed.
    #[error("{}", upstream_message(*status, body, *timeout))]
    Upstream {
        /// HTTP status, `None` for transport failures and timeouts.
        status: Option<u16>,
        /// Response body or transport error text.
        body: String,
        /// Whether the failure was a deadline.
        timeout: bool,
    },

    /// A 2xx body that could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid configuration.
    #[error("config: {0}")]
    Config(String),
}

impl Error {
    /// A non-2xx vendor response.
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status: Some(status),
            body: body.into(),
            timeout: false,
        }
    }

    /// An elapsed deadline.
    pub fn timeout(after: Duration) -> Self {
        Self::Upstream {
            status: None,
            body: format!("no response within {}s", after.as_secs_f32()),
            timeout: true,
        }
    }

    /// Whether this error was caused by the caller's input (4xx-equivalent).
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProvider { .. }
                | Self::UnknownAgent(_)
                | Self::EmptyPrompt
                | Self::InvalidParameter { .. }
        )
    }

    /// Whether this error is an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Upstream { timeout: true, .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream {
            status: e.status().map(|s| s.as_u16()),
            body: e.to_string(),
            timeout: e.is_timeout(),
        }
    }
}

fn upstream_message(status: Option<u16>, body: &str, timeout: bool) -> String {
    match (timeout, status) {
        (true, _) => format!("upstream timed out: {body}"),
        (false, Some(status)) => format!("upstream returned {status}: {body}"),
        (false, None) => format!("upstream transport failed: {body}"),
    }
}
