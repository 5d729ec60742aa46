//! Final sanitize and minify pass over generated CSS.

use crate::escape::strip_all_tags;

/// Textual substitutions applied in order on every minify pass.
pub const MINIFY_REPLACEMENTS: [(&str, &str); 6] = [
    (": ", ":"),
    ("; ", ";"),
    (" {", "{"),
    (", ", ","),
    (";}", "}"),
    (" + ", "+"),
];

/// Prepares a generated stylesheet for output.
///
/// Strips all markup (values typed by users end up in the CSS), collapses
/// whitespace and then minifies.
///
/// # Example
///
/// ```rust
/// use widgetlayer::prepare_css;
///
/// let css = "@media (min-width: 768px) {.brick .text-2{display: flex; }}";
/// assert_eq!(prepare_css(css), "@media (min-width:768px){.brick .text-2{display:flex}}");
/// ```
pub fn prepare_css(css: &str) -> String {
    minify(&strip_all_tags(css, true))
}

/// Applies [`MINIFY_REPLACEMENTS`] until the string stops changing.
///
/// A single pass can leave new matches behind (`";;}"` becomes `";}"`), so
/// passes repeat until stable. Every changing pass shortens the string.
pub fn minify(css: &str) -> String {
    let mut current = css.to_string();
    loop {
        let next = MINIFY_REPLACEMENTS
            .iter()
            .fold(current.clone(), |acc, (from, to)| acc.replace(from, to));
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_replacements() {
        assert_eq!(minify("a: b; c {d, e;}"), "a:b;c{d,e}");
        assert_eq!(minify("h1 + p {x: y}"), "h1+p{x:y}");
    }

    #[test]
    fn test_minify_repeats_until_stable() {
        assert_eq!(minify(".a{b:c;;}"), ".a{b:c}");
    }

    #[test]
    fn test_prepare_css_strips_markup() {
        let css = ".brick .text-2{order:0}</style><script>alert(1)</script>";
        assert_eq!(prepare_css(css), ".brick .text-2{order:0}");
    }

    #[test]
    fn test_prepare_css_collapses_whitespace() {
        assert_eq!(prepare_css(".a {color:\n  red;}"), ".a{color:red}");
    }

    #[test]
    fn test_prepare_css_is_idempotent() {
        let once = prepare_css(".a{margin-bottom: 0; padding-top: 0}@media (max-width: 767px) {.b{x:y}}");
        assert_eq!(prepare_css(&once), once);
    }

    #[test]
    fn test_prepare_css_empty() {
        assert_eq!(prepare_css(""), "");
        assert_eq!(prepare_css("<p></p>"), "");
    }
}
