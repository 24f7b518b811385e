//! Per-domain expiration check and days-remaining arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::SentinelResult;
use crate::services::whois;
use crate::types::DomainExpiry;

/// Check a single domain: resolve its registry WHOIS server, query the
/// expiration date and compute the days remaining relative to `now`.
///
/// `now` is supplied by the caller so a whole run shares one reference
/// instant and the arithmetic stays testable.
pub async fn check_domain(domain: &str, now: NaiveDateTime) -> SentinelResult<DomainExpiry> {
    let expires_on = whois::query_expiration(domain).await?;
    Ok(DomainExpiry {
        domain: domain.to_string(),
        expires_on,
        days_left: days_until(expires_on, now),
    })
}

/// Whole days between `now` and the expiration date at local midnight.
///
/// Hours are divided by 24 with truncation toward zero, so a domain
/// 31 days and 10 hours out reports 31 and one already 10 hours past
/// midnight of its expiry day reports 0.
#[must_use]
pub fn days_until(expires_on: NaiveDate, now: NaiveDateTime) -> i64 {
    let expiry = expires_on.and_time(NaiveTime::MIN);
    (expiry - now).num_hours() / 24
}
