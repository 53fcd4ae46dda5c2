//! Namespace prefixes used by PresentationML, DrawingML and chart parts.

use phf::phf_map;

/// PresentationML main namespace.
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// DrawingML main namespace.
pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML chart namespace, also the `graphicData` URI of chart frames.
pub const NS_C: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
/// Office relationships namespace.
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// `graphicData` URI of a table frame.
pub const URI_TABLE: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
/// `graphicData` URI of a chart frame.
pub const URI_CHART: &str = NS_C;

static NAMESPACES: phf::Map<&'static str, &'static str> = phf_map! {
    "a" => NS_A,
    "c" => NS_C,
    "p" => NS_P,
    "r" => NS_R,
};

static PREFIXES: phf::Map<&'static str, &'static str> = phf_map! {
    "http://schemas.openxmlformats.org/drawingml/2006/main" => "a",
    "http://schemas.openxmlformats.org/drawingml/2006/chart" => "c",
    "http://schemas.openxmlformats.org/presentationml/2006/main" => "p",
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships" => "r",
};

/// Prefix this crate names elements of namespace `uri` with.
#[inline]
pub fn canonical_prefix(uri: &str) -> Option<&'static str> {
    PREFIXES.get(uri).copied()
}

/// Namespace URI registered for `prefix`.
#[inline]
pub fn nsuri(prefix: &str) -> Option<&'static str> {
    NAMESPACES.get(prefix).copied()
}

/// Prefix part of a qualified name, `None` when unprefixed.
#[inline]
pub fn prefix_of(qname: &str) -> Option<&str> {
    qname.split_once(':').map(|(prefix, _)| prefix)
}

/// Local part of a qualified name.
#[inline]
pub fn local_name(qname: &str) -> &str {
    qname.split_once(':').map_or(qname, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(nsuri("p"), Some(NS_P));
        assert_eq!(nsuri("c"), Some(URI_CHART));
        assert_eq!(nsuri("x"), None);
        for prefix in ["a", "c", "p", "r"] {
            assert_eq!(nsuri(prefix).and_then(canonical_prefix), Some(prefix));
        }
        assert_eq!(canonical_prefix("urn:other"), None);
    }

    #[test]
    fn test_qname_parts() {
        assert_eq!(prefix_of("p:sp"), Some("p"));
        assert_eq!(prefix_of("sp"), None);
        assert_eq!(local_name("a:t"), "t");
        assert_eq!(local_name("t"), "t");
    }
}
