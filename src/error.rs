//! Error taxonomy for generation and analysis flows.
//!
//! Cancellation is a distinguished outcome, not a failure: callers render a
//! "terminated" notice for [`GenError::Aborted`] and a generic failure notice
//! for everything else.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    /// The in-flight operation was cancelled by the user.
    #[error("operation cancelled")]
    Aborted,

    /// Required API credentials are not configured.
    #[error("missing {0} API key. Run 'visforge --setup' to configure it.")]
    MissingCredentials(&'static str),

    /// The provider answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered 200 but the body did not match the contract.
    #[error("malformed provider response: {0}")]
    Malformed(String),

    /// The provider returned an empty result set.
    #[error("provider returned no image data")]
    EmptyResponse,

    /// Every task in a creation run failed.
    #[error("generation produced no valid results")]
    NoValidResults,
}

impl GenError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, GenError::Aborted)
    }
}
