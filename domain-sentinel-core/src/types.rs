//! Public types consumed and produced by sentinel operations.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Immutable run configuration.
///
/// Loaded once at process start and passed by reference into every
/// component; nothing mutates it for the duration of the run.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    /// Domain names to check, in order.
    pub domains: Vec<String>,
    /// Day threshold: a notification fires when days left drop strictly
    /// below this value.
    pub days: i64,
    /// Path of the external notification program.
    pub external: String,
    /// How the message is delivered to the external program.
    #[serde(default)]
    pub method: DeliveryMethod,
    /// Argument template for [`DeliveryMethod::Args`]; every literal
    /// `{message}` occurrence is replaced with the rendered message.
    #[serde(default, rename = "args")]
    pub args_template: String,
}

/// External-program message delivery method.
///
/// Any unrecognized value deserializes to [`Stdin`](Self::Stdin), which is
/// also the default when the field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Templated argument vector.
    Args,
    /// Message piped to the program's standard input.
    #[default]
    #[serde(other)]
    Stdin,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Args => write!(f, "args"),
            Self::Stdin => write!(f, "stdin"),
        }
    }
}

/// Expiration status for a single domain, valid for one check iteration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainExpiry {
    /// The checked domain name.
    pub domain: String,
    /// Registration expiration date (date granularity, local midnight).
    pub expires_on: NaiveDate,
    /// Whole days remaining, truncated toward zero.
    pub days_left: i64,
}

impl DomainExpiry {
    /// Whether the remaining validity warrants a notification.
    ///
    /// Strictly less than: a domain sitting exactly on the threshold does
    /// not trigger.
    #[must_use]
    pub fn needs_notice(&self, threshold: i64) -> bool {
        self.days_left < threshold
    }

    /// Render the human-readable message sent to the operator.
    #[must_use]
    pub fn notice_message(&self) -> String {
        format!(
            "Domain {} expires on {}, {} days left",
            self.domain, self.expires_on, self.days_left
        )
    }
}

/// Result of one external notification program invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOutcome {
    /// Program that was invoked.
    pub program: String,
    /// Whether the program exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,
}
