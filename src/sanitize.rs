//! Conversion of remote HTML fragments into terminal-safe text
//!
//! Topic descriptions, post bodies and curator insights arrive as HTML
//! authored by third parties. None of it reaches the terminal verbatim:
//! markup is dropped, entities are decoded, and control characters (which
//! would let a fragment smuggle escape sequences into the terminal) are
//! removed.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").expect("static regex")
});

static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(br|p|div|li|h[1-6]|blockquote|tr)\b[^>]*>").expect("static regex")
});

// Comments, doctypes and tags that start with a name. A bare `<` in text
// ("5 < 6") is not markup.
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<![A-Za-z][^>]*>|</?[A-Za-z][^>]*>").expect("static regex")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("static regex")
});

/// Render an HTML fragment as plain text, one paragraph per line.
pub fn html_to_text(html: &str) -> String {
    let text = SCRIPT_OR_STYLE.replace_all(html, "");
    let text = BLOCK_TAG.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = ENTITY.replace_all(&text, |caps: &Captures| decode_entity(&caps[0], &caps[1]));

    let cleaned: String = text
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| *c == '\n' || !c.is_control())
        .collect();

    cleaned
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text squashed onto a single line (for list rows)
pub fn html_to_line(html: &str) -> String {
    html_to_text(html).replace('\n', " ")
}

fn decode_entity(whole: &str, body: &str) -> String {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => num.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default();
    }

    match body {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "hellip" => "\u{2026}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "rsquo" => "\u{2019}",
        "lsquo" => "\u{2018}",
        "rdquo" => "\u{201D}",
        "ldquo" => "\u{201C}",
        _ => return whole.to_string(),
    }
    .to_string()
}

/// Single-line text with every control character removed, for remote
/// values that are not HTML (identifiers, names)
pub fn strip_controls(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Return the link if it is a plain http(s) URL, `None` otherwise.
///
/// The result is the parser's serialization, so control characters in the
/// path, query or fragment come back percent-encoded.
pub fn safe_link(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url.trim()).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}

/// Host part of a URL, used for "View original on ..." lines
pub fn domain(url: &str) -> Option<String> {
    let link = safe_link(url)?;
    reqwest::Url::parse(&link)
        .ok()?
        .host_str()
        .map(|h| h.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_keeps_paragraphs() {
        let html = "<p>Daily <b>news</b> about</p><p>the <a href=\"x\">virus</a></p>";
        assert_eq!(html_to_text(html), "Daily news about\nthe virus");
    }

    #[test]
    fn drops_script_and_style_bodies() {
        let html = "before<script type=\"text/javascript\">alert('x')</script>\
                    <STYLE>p { color: red }</STYLE>after";
        assert_eq!(html_to_text(html), "beforeafter");
    }

    #[test]
    fn decodes_entities_after_stripping() {
        assert_eq!(html_to_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(html_to_text("&lt;script&gt;"), "<script>");
        assert_eq!(html_to_text("caf&#233; &#x2713;"), "café ✓");
        assert_eq!(html_to_text("a&nbsp;&nbsp;b"), "a b");
        assert_eq!(html_to_text("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn removes_terminal_escapes() {
        let html = "red\u{1b}[31m text\u{7}";
        let text = html_to_text(html);
        assert!(!text.contains('\u{1b}'));
        assert!(!text.contains('\u{7}'));
        // Escapes smuggled in through numeric entities are removed too
        assert!(!html_to_text("x&#27;[2Jy").contains('\u{1b}'));
    }

    #[test]
    fn text_comparisons_are_not_tags() {
        assert_eq!(
            html_to_text("prices 5 < 6 and 7 > 3 today"),
            "prices 5 < 6 and 7 > 3 today"
        );
        assert_eq!(html_to_text("a -> b <- c"), "a -> b <- c");
        assert_eq!(html_to_text("x<!-- hidden <b> -->y"), "xy");
        assert_eq!(html_to_text("<!DOCTYPE html><em>hi</em>"), "hi");
    }

    #[test]
    fn collapses_whitespace_and_blank_lines() {
        let html = "  one \t two <br/><br/>\n\n three  ";
        assert_eq!(html_to_text(html), "one two\nthree");
        assert_eq!(html_to_line(html), "one two three");
    }

    #[test]
    fn only_http_links_are_safe() {
        assert_eq!(
            safe_link(" https://example.com/a "),
            Some("https://example.com/a".to_string())
        );
        assert!(safe_link("javascript:alert(1)").is_none());
        assert!(safe_link("data:text/html,hi").is_none());
        assert!(safe_link("not a url").is_none());
    }

    #[test]
    fn links_never_carry_control_characters() {
        let hostile = "https://example.com/\u{1b}]0;title\u{7}\u{1b}[2J?q=\u{1b}#\u{9b}x";
        let link = safe_link(hostile).unwrap();
        assert!(!link.chars().any(|c| c.is_control()));
        assert!(link.starts_with("https://example.com/%1B]0;title%07%1B[2J"));
        assert_eq!(strip_controls("corona\u{1b}[2J-news\n"), "corona[2J-news");
    }

    #[test]
    fn domain_of_link() {
        assert_eq!(
            domain("https://www.lemonde.fr/article/1"),
            Some("www.lemonde.fr".to_string())
        );
        assert_eq!(domain("javascript:void(0)"), None);
    }
}
