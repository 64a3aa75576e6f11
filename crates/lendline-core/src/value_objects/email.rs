//! Email address extraction
//!
//! Inbound `From` headers arrive as anything from a bare address to
//! `"Display Name" <user@host>`; routing only ever needs the address itself.

use std::sync::OnceLock;

use regex::Regex;

fn address_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")
            .expect("valid address pattern")
    })
}

/// Pull the first email address out of a header value
///
/// Returns `None` when the value contains nothing address-shaped. The result
/// is lowercased so downstream comparisons and persistence see one casing.
pub fn extract_email_address(value: &str) -> Option<String> {
    address_pattern()
        .find(value)
        .map(|found| found.as_str().to_ascii_lowercase())
}
