use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automatons are built only once, thread-safe
static TEXT_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">"])
        .expect("Failed to build XML text escaper")
});

static ATTR_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "\t", "\n", "\r"])
        .expect("Failed to build XML attribute escaper")
});

/// Escape character data for use between tags.
///
/// # Examples
///
/// ```
/// use pptx_shapetree::common::xml::escape_text;
/// assert_eq!(escape_text("a & b"), "a &amp; b");
/// assert_eq!(escape_text("\"<q>\""), "\"&lt;q&gt;\"");
/// ```
#[inline]
pub fn escape_text(s: &str) -> String {
    TEXT_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;"])
}

/// Escape an attribute value for use inside double quotes.
///
/// Whitespace control characters are written as character references so
/// they survive attribute-value normalization on reparse.
///
/// # Examples
///
/// ```
/// use pptx_shapetree::common::xml::escape_attr;
/// assert_eq!(escape_attr("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_attr("a\nb"), "a&#10;b");
/// ```
#[inline]
pub fn escape_attr(s: &str) -> String {
    ATTR_ESCAPER.replace_all(
        s,
        &["&amp;", "&lt;", "&gt;", "&quot;", "&#9;", "&#10;", "&#13;"],
    )
}

/// Resolve the name of an entity or character reference (the part between
/// `&` and `;`).
///
/// Returns `None` for unknown entities and invalid code points.
///
/// # Examples
///
/// ```
/// use pptx_shapetree::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#65"), Some('A'));
/// assert_eq!(resolve_entity("#x263A"), Some('\u{263A}'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse::<u32>().ok()?,
            };
            char::from_u32(value)
        },
    }
}

/// Unescape XML entity and character references.
///
/// Unknown or malformed references are left unchanged.
///
/// # Examples
///
/// ```
/// use pptx_shapetree::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;");
/// assert_eq!(unescape_xml("a & b"), "a & b");
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;");
/// assert_eq!(unescape_xml("line&#10;break"), "line\nbreak");
/// ```
pub fn unescape_xml(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail[1..].find(';') {
            Some(semi) => match resolve_entity(&tail[1..=semi]) {
                Some(ch) => {
                    out.push(ch);
                    rest = &tail[semi + 2..];
                },
                None => {
                    out.push('&');
                    rest = &tail[1..];
                },
            },
            None => {
                out.push_str(tail);
                rest = "";
            },
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_then_unescape_attr() {
        let original = "Q1 & \"Q2\" <draft>\tend";
        assert_eq!(unescape_xml(&escape_attr(original)), original);
    }

    #[test]
    fn test_unescape_incomplete_reference() {
        assert_eq!(unescape_xml("&amp"), "&amp");
        assert_eq!(unescape_xml("x &#xZZ; y"), "x &#xZZ; y");
    }

    #[test]
    fn test_resolve_invalid_code_point() {
        assert_eq!(resolve_entity("#xD800"), None);
        assert_eq!(resolve_entity("#"), None);
    }
}
