//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum SentinelError {
    /// Input validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// TCP dial/read/write failure against a WHOIS server
    #[error("Connection error: {0}")]
    Connection(String),

    /// IANA response carried no `whois:` referral for the TLD
    #[error("No WHOIS referral found for TLD: {0}")]
    ReferralNotFound(String),

    /// WHOIS response carried no recognizable expiration date
    #[error("No expiration date found in WHOIS response")]
    ExpirationNotFound,

    /// The matched expiration substring is not a valid calendar date
    #[error("Invalid expiration date '{value}': {reason}")]
    DateFormat { value: String, reason: String },

    /// External notification program could not be launched or piped to
    #[error("Process error: {0}")]
    Process(String),
}

impl SentinelError {
    /// Whether the error is expected behavior (absent field, malformed
    /// registry data) rather than an environmental fault. Used for log
    /// level classification: `warn` when `true`, `error` when `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::ReferralNotFound(_)
                | Self::ExpirationNotFound
                | Self::DateFormat { .. }
        )
    }
}

/// Core layer Result type alias
pub type SentinelResult<T> = std::result::Result<T, SentinelError>;
