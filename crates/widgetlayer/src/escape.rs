//! Escaping and sanitizing of user-controlled strings.
//!
//! Every setting value, widget id or label that ends up in generated CSS or
//! HTML goes through one of these helpers first.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script\s*>|<style[^>]*?>.*?</style\s*>")
        .expect("valid regex")
});
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*(?:>|\z)").expect("valid regex"));
static BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static URL_UNSAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\-~+_.?#=!&;,/:%@$|*'()\[\]]").expect("valid regex"));

const URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Escapes a string for HTML text content.
pub fn esc_html(s: &str) -> String {
    minijinja::HtmlEscape(s).to_string()
}

/// Escapes a string for an HTML attribute value.
pub fn esc_attr(s: &str) -> String {
    esc_html(s)
}

/// Removes markup from a string.
///
/// `script` and `style` elements are removed together with their content,
/// every other tag (including an unterminated trailing one) is dropped. With
/// `remove_breaks`, runs of whitespace collapse into a single space.
/// The result is trimmed.
pub fn strip_all_tags(s: &str, remove_breaks: bool) -> String {
    let without_blocks = SCRIPT_OR_STYLE.replace_all(s, "");
    let without_tags = TAG.replace_all(&without_blocks, "");
    let out = if remove_breaks {
        BREAKS.replace_all(&without_tags, " ").into_owned()
    } else {
        without_tags.into_owned()
    };
    out.trim().to_string()
}

/// Sanitizes single-line text input: no markup, no line breaks, trimmed.
pub fn sanitize_text_field(s: &str) -> String {
    strip_all_tags(s, true)
}

/// Sanitizes a URL for storage.
///
/// Returns the empty string for URLs with a scheme outside http, https,
/// mailto and tel. Relative URLs are kept. Characters not valid in a URL
/// are removed.
pub fn esc_url_raw(url: &str) -> String {
    let url = url.trim().replace(' ', "%20");
    let cleaned = URL_UNSAFE.replace_all(&url, "").into_owned();
    if cleaned.is_empty() {
        return cleaned;
    }

    if let Some((scheme, _)) = cleaned.split_once(':') {
        let looks_like_scheme = !scheme.is_empty()
            && !scheme.contains(['/', '?', '#'])
            && scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
        if looks_like_scheme && !URL_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str()) {
            return String::new();
        }
    }
    cleaned
}

/// Escapes a sanitized URL for use in an HTML attribute.
pub fn esc_url(url: &str) -> String {
    esc_url_raw(url).replace('&', "&#038;").replace('\'', "&#039;")
}

/// Escapes a string for use as a CSS class or id selector.
///
/// ASCII letters, digits, `-`, `_` and non-ASCII characters pass through.
/// Anything else, and a digit that would start the identifier, becomes a
/// six-digit hex escape (`"a/b"` reads as `a\00002fb`), so the result never
/// carries whitespace or punctuation that later minification could touch.
pub fn css_ident(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let first_is_dash = s.starts_with('-');
    for (i, c) in s.chars().enumerate() {
        let starts_with_digit =
            c.is_ascii_digit() && (i == 0 || (i == 1 && first_is_dash));
        let lone_dash = c == '-' && i == 0 && s.len() == 1;
        let plain = c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii();
        if c == '\0' {
            out.push('\u{FFFD}');
        } else if plain && !starts_with_digit && !lone_dash {
            out.push(c);
        } else {
            out.push_str(&format!("\\{:06x}", c as u32));
        }
    }
    out
}

/// Reads the leading integer of a string as a non-negative number.
///
/// `"12px"` reads as 12, `"-5"` as 5, anything without leading digits as 0.
pub fn absint(s: &str) -> u64 {
    let s = s.trim_start();
    let unsigned = s.strip_prefix(['-', '+']).unwrap_or(s);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_html() {
        assert_eq!(esc_html("<b>A & B"), "&lt;b&gt;A &amp; B");
        assert_eq!(esc_attr(r#"a"b"#), "a&quot;b");
        assert_eq!(esc_html("fw-tab-6"), "fw-tab-6");
    }

    #[test]
    fn test_strip_all_tags_removes_script_content() {
        let input = "a{b:c}<script>alert(1)</script><STYLE>x{}</STYLE>d{e:f}";
        assert_eq!(strip_all_tags(input, true), "a{b:c}d{e:f}");
    }

    #[test]
    fn test_strip_all_tags_drops_unterminated_tag() {
        assert_eq!(strip_all_tags("a{b:c}<img src=x", true), "a{b:c}");
    }

    #[test]
    fn test_strip_all_tags_breaks() {
        assert_eq!(strip_all_tags("  a\n\t b  ", true), "a b");
        assert_eq!(strip_all_tags("a\nb", false), "a\nb");
    }

    #[test]
    fn test_sanitize_text_field() {
        assert_eq!(sanitize_text_field(" <em>Hello</em>\nworld "), "Hello world");
    }

    #[test]
    fn test_esc_url_raw() {
        assert_eq!(esc_url_raw("https://example.com/a b"), "https://example.com/a%20b");
        assert_eq!(esc_url_raw("/relative/path?x=1"), "/relative/path?x=1");
        assert_eq!(esc_url_raw("javascript:alert(1)"), "");
        assert_eq!(esc_url_raw("https://ex.com/<x>"), "https://ex.com/x");
        assert_eq!(esc_url_raw("   "), "");
    }

    #[test]
    fn test_esc_url_encodes_ampersand() {
        assert_eq!(esc_url("https://ex.com/?a=1&b=2"), "https://ex.com/?a=1&#038;b=2");
    }

    #[test]
    fn test_css_ident() {
        assert_eq!(css_ident("text-2"), "text-2");
        assert_eq!(css_ident("brick_slider-2"), "brick_slider-2");
        assert_eq!(css_ident("a/b"), "a\\00002fb");
        assert_eq!(css_ident("x\"><b"), "x\\000022\\00003e\\00003cb");
        assert_eq!(css_ident("2col"), "\\000032col");
        assert_eq!(css_ident("-3"), "-\\000033");
        assert_eq!(css_ident("a b"), "a\\000020b");
        assert_eq!(css_ident("caf\u{e9}"), "caf\u{e9}");
    }

    #[test]
    fn test_absint() {
        assert_eq!(absint("42"), 42);
        assert_eq!(absint("12px"), 12);
        assert_eq!(absint("-5"), 5);
        assert_eq!(absint("abc"), 0);
        assert_eq!(absint(""), 0);
    }
}
