//! Domain Sentinel core library
//!
//! Provides the building blocks for domain expiration monitoring:
//! - WHOIS referral resolution via IANA and expiration-date extraction
//! - Days-remaining computation against a configured threshold
//! - External notification program invocation (argv or stdin delivery)
//!
//! All service functions are stateless; configuration is a single immutable
//! value constructed once by the caller and passed in explicitly.

mod error;
mod services;
mod types;

pub use error::{SentinelError, SentinelResult};
pub use services::{check_domain, days_until, dispatch, query_expiration, resolve_whois_server};
pub use types::{CheckConfig, DeliveryMethod, DomainExpiry, NotificationOutcome};
