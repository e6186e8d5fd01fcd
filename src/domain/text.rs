// src/domain/text.rs
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static SKIPPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("static regex")
});

static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:p|div|h[1-6]|li|blockquote|pre|ul|ol|table|tr)\s*>|<br\s*/?>")
        .expect("static regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[A-Za-z]{2,8});").expect("static regex")
});

/// Extracts the text content of an HTML fragment.
///
/// With `line_feed_on_block` every closing block element (and `<br>`) becomes a
/// line feed so paragraphs stay apart.
pub fn html_to_text(html: &str, line_feed_on_block: bool) -> String {
    let without_skipped = SKIPPED.replace_all(html, "");
    let with_breaks = if line_feed_on_block {
        BLOCK_END.replace_all(&without_skipped, "\n")
    } else {
        without_skipped
    };
    let stripped = TAG.replace_all(&with_breaks, "");
    decode_entities(&stripped).into_owned()
}

/// Plain text used for short summary fields: markup removed, outer whitespace trimmed.
/// Absent input yields an empty string.
pub fn plain_text(html: Option<&str>) -> String {
    html.map(|value| html_to_text(value, true).trim().to_owned())
        .unwrap_or_default()
}

pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let entity = &caps[1];
        decode_entity(entity).map_or_else(|| caps[0].to_owned(), String::from)
    })
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = entity.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        "hellip" => Some('\u{2026}'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_strips_markup_and_trims() {
        let html = "  <p>Hello <b>world</b></p><p>Second &amp; last</p>  ";
        assert_eq!(plain_text(Some(html)), "Hello world\nSecond & last");
    }

    #[test]
    fn plain_text_of_nothing_is_empty() {
        assert_eq!(plain_text(None), "");
        assert_eq!(plain_text(Some("")), "");
        assert_eq!(plain_text(Some("<p> </p>")), "");
    }

    #[test]
    fn html_to_text_without_line_feeds_concatenates() {
        assert_eq!(html_to_text("<p>a</p><p>b</p>", false), "ab");
    }

    #[test]
    fn comments_and_scripts_are_dropped() {
        let html = "<p>keep</p><!-- note --><script>var x = 1;</script>";
        assert_eq!(plain_text(Some(html)), "keep");
    }

    #[test]
    fn entities_decode_numeric_and_named() {
        assert_eq!(decode_entities("&#233;t&#xE9; &lt;x&gt; &bogus;"), "été <x> &bogus;");
    }
}
