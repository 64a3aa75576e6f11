//! Email content sanitizers
//!
//! Inbound replies arrive wrapped in whatever quoting chrome the sender's
//! mail client added. These passes strip the quoted history from both the
//! plain-text and HTML parts and can degrade HTML to text when no text part
//! was supplied. Everything here is best-effort text surgery, not a real
//! HTML parse; malformed markup must never cause a panic.

pub mod html;
pub mod text;

pub use html::{extract_text_from_html, strip_quoted_html};
pub use text::strip_quoted_text;

/// Fallback body recorded when neither part yields any usable content
pub const REPLY_FALLBACK_BODY: &str = "Email reply received";

/// Result of cleaning both parts of an inbound email
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanedContent {
    pub text: String,
    pub html: String,
}

impl CleanedContent {
    /// The body used for persistence: cleaned text if present, else text
    /// extracted from the cleaned HTML, else a fixed fallback literal.
    pub fn body_text(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        let from_html = extract_text_from_html(&self.html);
        if !from_html.is_empty() {
            return from_html;
        }
        REPLY_FALLBACK_BODY.to_string()
    }
}

/// Strip quoted-reply content from the plain-text and HTML parts
pub fn clean_reply_content(text: Option<&str>, html: Option<&str>) -> CleanedContent {
    CleanedContent {
        text: text.map(strip_quoted_text).unwrap_or_default(),
        html: html.map(strip_quoted_html).unwrap_or_default(),
    }
}
