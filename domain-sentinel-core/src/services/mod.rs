//! Stateless service functions for domain expiration checks.
//!
//! Every function is free-standing and async where it touches the network
//! or spawns a process; nothing holds state between calls.

mod check;
mod notify;
mod whois;

pub use check::{check_domain, days_until};
pub use notify::dispatch;
pub use whois::{query_expiration, resolve_whois_server};
