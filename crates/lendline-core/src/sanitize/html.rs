//! HTML quoted-reply stripping and text extraction
//!
//! Regex-based removal, tolerant of unbalanced markup. Nested quote blocks
//! can leave residue; that is accepted rather than pulling in a full HTML
//! parser for a best-effort cleanup.

use std::sync::OnceLock;

use regex::Regex;

fn blockquote_region() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<blockquote[^>]*>.*?</blockquote>").expect("valid blockquote pattern")
    })
}

fn quote_container() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Client-specific quote wrappers (gmail_quote and friends)
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<div[^>]*class="[^"]*\bgmail_quote\b[^"]*"[^>]*>.*?</div>"#)
            .expect("valid quote container pattern")
    })
}

fn dangling_blockquote_open() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // An unterminated blockquote quotes everything that follows it
    RE.get_or_init(|| Regex::new(r"(?is)<blockquote[^>]*>.*\z").expect("valid dangling pattern"))
}

/// Remove quoted-reply regions from an HTML email body
pub fn strip_quoted_html(html: &str) -> String {
    let mut cleaned = html.to_string();

    // Repeat until stable so stacked quote blocks peel off one per pass
    loop {
        let next = blockquote_region().replace_all(&cleaned, "");
        let next = quote_container().replace_all(&next, "").into_owned();
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    dangling_blockquote_open()
        .replace(&cleaned, "")
        .trim()
        .to_string()
}

fn script_style_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>")
            .expect("valid script/style pattern")
    })
}

fn line_break_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br pattern"))
}

fn paragraph_close_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)</p>").expect("valid paragraph pattern"))
}

fn any_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag pattern"))
}

fn newline_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{2,}").expect("valid newline pattern"))
}

/// Degrade an HTML body to plain text
///
/// Used when an inbound email carries no text part: drops script/style
/// blocks with their content, converts `<br>` to a newline and `</p>` to a
/// paragraph break, strips the remaining tags, decodes the five common
/// named entities, and collapses newline runs to a single blank line.
pub fn extract_text_from_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let text = html.replace("\r\n", "\n");
    let text = script_style_block().replace_all(&text, "");
    let text = line_break_tag().replace_all(&text, "\n");
    let text = paragraph_close_tag().replace_all(&text, "\n\n");
    let text = any_tag().replace_all(&text, "");

    let text = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");

    newline_run().replace_all(&text, "\n\n").trim().to_string()
}
