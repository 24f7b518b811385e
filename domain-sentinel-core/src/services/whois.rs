//! WHOIS referral resolution and expiration-date extraction.
//!
//! Both network operations are the same plaintext exchange: dial port 43,
//! write one query line, read until the peer closes. Response bodies are
//! free text with no standard schema; field extraction is regex-based by
//! design and deliberately permissive across registry formats.

use chrono::NaiveDate;
use regex::Regex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::error::{SentinelError, SentinelResult};

/// IANA root WHOIS server, authoritative for TLD referrals.
const IANA_WHOIS_HOST: &str = "whois.iana.org";

/// Standard WHOIS port.
const WHOIS_PORT: u16 = 43;

/// Matches the `whois:` referral line in an IANA TLD record.
/// The field name is lowercase in IANA output; matched case-sensitively.
const REFERRAL_PATTERN: &str = r"whois:\s*(\S+)";

/// Matches any `Expir...`-labelled field followed by an ISO date on the
/// same line. Case-insensitive and non-greedy to cover `Expiry Date:`,
/// `Expiration Date:`, `Registry Expiry Date:` and friends; may false
/// positive on unrelated dates, a known trade-off.
const EXPIRATION_PATTERN: &str = r"(?i)Expir.+?(\d{4}-\d{2}-\d{2})";

/// Perform one WHOIS exchange: send the query line, read to connection close.
async fn whois_exchange(host: &str, query: &str) -> SentinelResult<String> {
    let mut stream = TcpStream::connect((host, WHOIS_PORT))
        .await
        .map_err(|e| SentinelError::Connection(format!("dial {host}:{WHOIS_PORT}: {e}")))?;

    stream
        .write_all(format!("{query}\r\n").as_bytes())
        .await
        .map_err(|e| SentinelError::Connection(format!("write to {host}: {e}")))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .map_err(|e| SentinelError::Connection(format!("read from {host}: {e}")))?;

    // Some registries emit non-UTF-8 bytes in contact fields.
    Ok(String::from_utf8_lossy(&response).into_owned())
}

/// Resolve the authoritative WHOIS server for a domain via IANA referral.
///
/// Queries `whois.iana.org` with the domain's top-level label and returns
/// the referral host. No caching: repeated calls for the same TLD re-query
/// IANA every time.
pub async fn resolve_whois_server(domain: &str) -> SentinelResult<String> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(SentinelError::Validation(
            "Domain name is required".to_string(),
        ));
    }

    let tld = top_level_label(domain);
    log::debug!("Resolving WHOIS server for TLD {tld} via {IANA_WHOIS_HOST}");

    let response = whois_exchange(IANA_WHOIS_HOST, tld).await?;
    extract_referral(&response).ok_or_else(|| SentinelError::ReferralNotFound(tld.to_string()))
}

/// Query the expiration date of a domain's registration.
///
/// Resolves the registry WHOIS server first; resolver errors propagate
/// unchanged. The returned date has day granularity and carries no
/// timezone.
pub async fn query_expiration(domain: &str) -> SentinelResult<NaiveDate> {
    let server = resolve_whois_server(domain).await?;
    log::debug!("Querying {server} for {domain}");

    let response = whois_exchange(&server, domain).await?;
    extract_expiration(&response)
}

/// The substring after the last `.`; the whole input when it has no dot.
fn top_level_label(domain: &str) -> &str {
    domain.rsplit('.').next().unwrap_or(domain)
}

/// Extract the referral WHOIS host from an IANA TLD record.
fn extract_referral(response: &str) -> Option<String> {
    capture_first(response, REFERRAL_PATTERN)
}

/// Extract and parse the expiration date from a raw WHOIS response.
fn extract_expiration(response: &str) -> SentinelResult<NaiveDate> {
    let value =
        capture_first(response, EXPIRATION_PATTERN).ok_or(SentinelError::ExpirationNotFound)?;

    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|e| SentinelError::DateFormat {
        value,
        reason: e.to_string(),
    })
}

/// First capture group of the first match, whitespace-trimmed.
fn capture_first(text: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
