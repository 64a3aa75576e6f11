//! Plain-text quoted-reply stripping

use std::sync::OnceLock;

use regex::Regex;

fn attribution_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "On <date> <someone> wrote:" attribution inserted above quoted history
    RE.get_or_init(|| Regex::new(r"(?m)^On .+ wrote:").expect("valid attribution pattern"))
}

fn original_message_divider() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^-+\s*Original Message\s*-*").expect("valid divider pattern")
    })
}

fn forwarded_header_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^From:").expect("valid header pattern"))
}

/// Strip quoted-reply content from a plain-text email body
///
/// Applied in sequence: truncate at the first "On ... wrote:" attribution
/// line, at an "----- Original Message -----" divider, and at a "From:"
/// header line; then drop every `>`-prefixed quote line and trim.
pub fn strip_quoted_text(text: &str) -> String {
    let mut cleaned = text.replace("\r\n", "\n");

    for pattern in [
        attribution_line(),
        original_message_divider(),
        forwarded_header_line(),
    ] {
        if let Some(found) = pattern.find(&cleaned) {
            cleaned.truncate(found.start());
        }
    }

    let without_quote_lines: Vec<&str> = cleaned
        .lines()
        .filter(|line| !line.starts_with('>'))
        .collect();

    without_quote_lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribution_block_removed() {
        let input = "Hi there\nOn Jan 1 John wrote:\n> old text";
        assert_eq!(strip_quoted_text(input), "Hi there");
    }

    #[test]
    fn test_original_message_divider_removed() {
        let input = "Works for me.\n-----Original Message-----\nFrom: someone\nOld body";
        assert_eq!(strip_quoted_text(input), "Works for me.");
    }

    #[test]
    fn test_forwarded_header_removed() {
        let input = "See below.\nFrom: Jane Doe <jane@example.com>\nSubject: Re: Condo";
        assert_eq!(strip_quoted_text(input), "See below.");
    }

    #[test]
    fn test_quote_lines_removed() {
        let input = "Agreed.\n> earlier point\n>> even earlier\nThanks";
        assert_eq!(strip_quoted_text(input), "Agreed.\nThanks");
    }

    #[test]
    fn test_mid_line_from_is_kept() {
        let input = "Heard back From: the bank today";
        assert_eq!(strip_quoted_text(input), "Heard back From: the bank today");
    }

    #[test]
    fn test_crlf_normalized_and_trimmed() {
        let input = "  Sounds good.\r\nOn Tue, Feb 3, Alice wrote:\r\n> quoted\r\n";
        assert_eq!(strip_quoted_text(input), "Sounds good.");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_quoted_text(""), "");
    }
}
