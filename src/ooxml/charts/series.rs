//! Chart series views.
//!
//! A series is a `c:ser` element inside a plot. Views read the element
//! directly; nothing is cached.

use super::types::PlotKind;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::XmlElement;

/// `val` attribute of child `tag` parsed as an unsigned integer.
fn child_u32(element: &XmlElement, tag: &str) -> Option<u32> {
    element.find(tag).and_then(|e| e.parse_attr("val"))
}

/// Point values of a `c:strCache`/`c:numCache`-like element, placed by
/// `c:pt/@idx` into a vector of length `c:ptCount`.
pub(crate) fn cache_points(cache: &XmlElement) -> Vec<Option<String>> {
    let count: usize = cache
        .find("c:ptCount")
        .and_then(|e| e.parse_attr("val"))
        .unwrap_or(0);
    let mut points = vec![None; count];
    for pt in cache.find_all("c:pt") {
        let Some(idx) = pt.parse_attr::<usize>("idx") else {
            continue;
        };
        if let Some(slot) = points.get_mut(idx) {
            *slot = pt.find("c:v").map(|v| v.text());
        }
    }
    points
}

/// A single chart series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    element: XmlElement,
}

impl Series {
    pub fn new(element: XmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// `c:idx/@val`, 0 when missing.
    pub fn index(&self) -> u32 {
        child_u32(&self.element, "c:idx").unwrap_or(0)
    }

    /// `c:order/@val`, 0 when missing.
    pub fn order(&self) -> u32 {
        child_u32(&self.element, "c:order").unwrap_or(0)
    }

    /// Series name from the `c:tx` string cache or literal, empty when
    /// the series has none.
    pub fn name(&self) -> String {
        let Some(tx) = self.element.find("c:tx") else {
            return String::new();
        };
        if let Some(v) = tx.find("c:v") {
            return v.text();
        }
        tx.find_path(&["c:strRef", "c:strCache", "c:pt", "c:v"])
            .map(|v| v.text())
            .unwrap_or_default()
    }

    /// Cached values of `c:val` (or `c:yVal` for XY series). Missing
    /// points and non-numeric text are `None`.
    pub fn values(&self) -> Vec<Option<f64>> {
        let Some(val) = self.element.find("c:val").or_else(|| self.element.find("c:yVal")) else {
            return Vec::new();
        };
        let cache = val
            .find_path(&["c:numRef", "c:numCache"])
            .or_else(|| val.find("c:numLit"));
        cache
            .map(|cache| {
                cache_points(&cache)
                    .into_iter()
                    .map(|p| p.and_then(|s| s.trim().parse().ok()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `c:smooth/@val`; a missing element reads as not smoothed.
    pub fn smooth(&self) -> bool {
        self.element
            .find("c:smooth")
            .is_some_and(|e| matches!(e.attr("val").as_deref(), None | Some("1") | Some("true")))
    }
}

/// `c:ser` children of a plot element, sorted by `c:order`.
pub(crate) fn plot_sers(plot: &XmlElement) -> Vec<XmlElement> {
    let mut sers = plot.find_all("c:ser");
    sers.sort_by_key(|ser| child_u32(ser, "c:order").unwrap_or(0));
    sers
}

/// Every series of a plot area: plots in document order, then series by
/// `c:order` within each plot.
pub(crate) fn plot_area_sers(plot_area: &XmlElement) -> Vec<XmlElement> {
    plot_area
        .children()
        .iter()
        .filter(|child| PlotKind::from_tag(&child.tag()).is_some())
        .flat_map(plot_sers)
        .collect()
}

/// Sequence of series of a plot or of a whole plot area.
#[derive(Debug, Clone)]
pub struct SeriesCollection {
    members: Vec<XmlElement>,
}

impl SeriesCollection {
    /// Series under `parent`, which is either a `c:plotArea` or a single
    /// plot element.
    pub fn new(parent: &XmlElement) -> Self {
        let members = if parent.has_tag("c:plotArea") {
            plot_area_sers(parent)
        } else {
            plot_sers(parent)
        };
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<Series> {
        self.members
            .get(index)
            .cloned()
            .map(Series::new)
            .ok_or(OoxmlError::IndexOutOfRange {
                index,
                len: self.members.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = Series> + '_ {
        self.members.iter().cloned().map(Series::new)
    }
}
