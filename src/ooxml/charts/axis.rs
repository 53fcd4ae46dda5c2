//! Chart axes.
//!
//! An [`Axis`] wraps a `c:catAx`, `c:dateAx`, `c:valAx` or `c:serAx`
//! element and reads or writes its gridlines, visibility and scale
//! limits in place.

use super::types::AxisType;
use super::{bool_val, successors};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// Leading children shared by every axis element, in schema order.
const AXIS_SEQ: &[&str] = &[
    "c:axId",
    "c:scaling",
    "c:delete",
    "c:axPos",
    "c:majorGridlines",
    "c:minorGridlines",
    "c:title",
    "c:numFmt",
    "c:majorTickMark",
    "c:minorTickMark",
    "c:tickLblPos",
    "c:spPr",
    "c:txPr",
    "c:crossAx",
    "c:crosses",
    "c:crossesAt",
    "c:extLst",
];

/// Children of `c:scaling`, in schema order.
const SCALING_SEQ: &[&str] = &["c:logBase", "c:orientation", "c:max", "c:min", "c:extLst"];

/// A chart axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    element: XmlElement,
    axis_type: AxisType,
}

impl Axis {
    pub(crate) fn new(element: XmlElement, axis_type: AxisType) -> Self {
        Self { element, axis_type }
    }

    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    pub fn axis_type(&self) -> AxisType {
        self.axis_type
    }

    /// `c:axId/@val`.
    pub fn axis_id(&self) -> Option<u32> {
        self.element.find("c:axId").and_then(|e| e.parse_attr("val"))
    }

    pub fn has_major_gridlines(&self) -> bool {
        self.element.find("c:majorGridlines").is_some()
    }

    pub fn set_has_major_gridlines(&self, value: bool) {
        self.set_gridlines("c:majorGridlines", value);
    }

    pub fn has_minor_gridlines(&self) -> bool {
        self.element.find("c:minorGridlines").is_some()
    }

    pub fn set_has_minor_gridlines(&self, value: bool) {
        self.set_gridlines("c:minorGridlines", value);
    }

    fn set_gridlines(&self, tag: &str, value: bool) {
        if value {
            self.element.get_or_insert(tag, successors(AXIS_SEQ, tag));
        } else {
            self.element.remove_all(tag);
        }
    }

    /// False when `c:delete` is missing or set.
    pub fn visible(&self) -> bool {
        self.element.find("c:delete").is_some_and(|delete| !bool_val(&delete))
    }

    pub fn set_visible(&self, value: bool) {
        let delete = self
            .element
            .get_or_insert("c:delete", successors(AXIS_SEQ, "c:delete"));
        delete.set_attr("val", u8::from(!value));
    }

    pub fn minimum_scale(&self) -> Option<f64> {
        self.scale_limit("c:min")
    }

    /// `None` removes the limit so the axis scales automatically.
    pub fn set_minimum_scale(&self, value: Option<f64>) {
        self.set_scale_limit("c:min", value);
    }

    pub fn maximum_scale(&self) -> Option<f64> {
        self.scale_limit("c:max")
    }

    pub fn set_maximum_scale(&self, value: Option<f64>) {
        self.set_scale_limit("c:max", value);
    }

    fn scale_limit(&self, tag: &str) -> Option<f64> {
        self.element
            .find_path(&["c:scaling", tag])
            .and_then(|e| e.parse_attr("val"))
    }

    fn set_scale_limit(&self, tag: &str, value: Option<f64>) {
        let scaling = self
            .element
            .get_or_insert("c:scaling", successors(AXIS_SEQ, "c:scaling"));
        scaling.remove_all(tag);
        if let Some(value) = value {
            scaling.insert_before_any(
                &ElementBuilder::new(tag).attr("val", value),
                successors(SCALING_SEQ, tag),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    fn axis(inner: &str) -> Axis {
        let xml = format!(
            r#"<c:valAx xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:axId val="7"/>{}<c:crossAx val="3"/></c:valAx>"#,
            inner
        );
        Axis::new(XmlDocument::parse(&xml).unwrap().root(), AxisType::Value)
    }

    fn tags(axis: &Axis) -> Vec<String> {
        axis.element().children().iter().map(|c| c.tag()).collect()
    }

    #[test]
    fn test_gridlines() {
        let axis = axis(r#"<c:scaling/><c:axPos val="l"/><c:numFmt formatCode="General" sourceLinked="1"/>"#);
        assert!(!axis.has_major_gridlines());
        axis.set_has_minor_gridlines(true);
        axis.set_has_major_gridlines(true);
        axis.set_has_major_gridlines(true);
        assert!(axis.has_major_gridlines());
        assert_eq!(
            tags(&axis),
            vec!["c:axId", "c:scaling", "c:axPos", "c:majorGridlines", "c:minorGridlines", "c:numFmt", "c:crossAx"]
        );
        axis.set_has_major_gridlines(false);
        assert!(!axis.has_major_gridlines());
        assert!(axis.has_minor_gridlines());
    }

    #[test]
    fn test_visible() {
        assert!(!axis("").visible());
        assert!(axis(r#"<c:delete val="0"/>"#).visible());
        assert!(!axis(r#"<c:delete val="1"/>"#).visible());

        let axis = axis(r#"<c:scaling/><c:axPos val="l"/>"#);
        axis.set_visible(true);
        assert!(axis.visible());
        assert_eq!(tags(&axis), vec!["c:axId", "c:scaling", "c:delete", "c:axPos", "c:crossAx"]);
        axis.set_visible(false);
        assert!(!axis.visible());
    }

    #[test]
    fn test_scale_limits() {
        let axis = axis(r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#);
        assert_eq!(axis.axis_id(), Some(7));
        assert_eq!(axis.minimum_scale(), None);
        axis.set_minimum_scale(Some(-10.5));
        axis.set_maximum_scale(Some(100.0));
        assert_eq!(axis.minimum_scale(), Some(-10.5));
        assert_eq!(axis.maximum_scale(), Some(100.0));
        let scaling: Vec<String> = axis
            .element()
            .find("c:scaling")
            .unwrap()
            .children()
            .iter()
            .map(|c| c.tag())
            .collect();
        assert_eq!(scaling, vec!["c:orientation", "c:max", "c:min"]);
        axis.set_maximum_scale(None);
        assert_eq!(axis.maximum_scale(), None);
    }
}
