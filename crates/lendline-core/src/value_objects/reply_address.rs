//! Reply address codec
//!
//! Every outbound notification carries a unique reply-to address of the form
//! `conv_<conversationId>_<random-hex>@<inbound-domain>`. The random suffix
//! exists only to keep addresses distinct across notifications; the embedded
//! conversation id is the sole routing key when a reply comes back in.

use rand::RngCore;
use regex::Regex;

/// Number of random bytes in the address suffix (hex-encoded to 16 chars)
const SUFFIX_BYTES: usize = 8;

/// Encodes and decodes conversation reply addresses for a fixed inbound domain
#[derive(Debug, Clone)]
pub struct ReplyAddressCodec {
    domain: String,
    pattern: Regex,
}

impl ReplyAddressCodec {
    /// Create a codec for the given inbound domain (e.g. `inbound.example.com`)
    pub fn new(inbound_domain: impl Into<String>) -> Self {
        let domain = inbound_domain.into();
        // The trailing group rejects addresses where the domain continues
        // (e.g. our domain as a prefix of a foreign one).
        let pattern = Regex::new(&format!(
            r"(?i)conv_(\d+)_[0-9a-f]+@{}([^.\w-]|$)",
            regex::escape(&domain)
        ))
        .expect("reply address pattern is valid");
        Self { domain, pattern }
    }

    /// The inbound domain this codec routes through
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Produce a fresh reply address for a conversation
    ///
    /// A new random suffix is generated on every call; addresses are never
    /// cached or reused.
    pub fn encode(&self, conversation_id: i64) -> String {
        let mut suffix = [0u8; SUFFIX_BYTES];
        rand::thread_rng().fill_bytes(&mut suffix);
        let hex: String = suffix.iter().map(|b| format!("{b:02x}")).collect();
        format!("conv_{conversation_id}_{hex}@{}", self.domain)
    }

    /// Extract the conversation id from a reply address
    ///
    /// Matching is case-insensitive and tolerates the address being embedded
    /// in a larger string (display names, forwarded header lists); the first
    /// match wins. Anything that does not carry the exact
    /// `conv_<digits>_<hex>@<domain>` shape yields `None`.
    pub fn decode(&self, address: &str) -> Option<i64> {
        let captures = self.pattern.captures(address)?;
        captures.get(1)?.as_str().parse().ok()
    }
}
