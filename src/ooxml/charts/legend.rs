//! Chart legend.

use super::types::LegendPosition;
use super::{bool_val, successors};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// Children of `c:legend`, in schema order.
const LEGEND_SEQ: &[&str] = &[
    "c:legendPos",
    "c:legendEntry",
    "c:layout",
    "c:overlay",
    "c:spPr",
    "c:txPr",
    "c:extLst",
];

/// Children of `c:manualLayout`, in schema order.
const MANUAL_LAYOUT_SEQ: &[&str] = &[
    "c:layoutTarget",
    "c:xMode",
    "c:yMode",
    "c:wMode",
    "c:hMode",
    "c:x",
    "c:y",
    "c:w",
    "c:h",
    "c:extLst",
];

/// View of a `c:legend` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    element: XmlElement,
}

impl Legend {
    pub fn new(element: XmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    /// `c:legendPos`, right when missing or unrecognized.
    pub fn position(&self) -> LegendPosition {
        self.element
            .find("c:legendPos")
            .and_then(|e| e.attr("val"))
            .and_then(|v| LegendPosition::from_xml(&v))
            .unwrap_or_default()
    }

    /// Right is the default and is written by removing `c:legendPos`.
    pub fn set_position(&self, position: LegendPosition) {
        self.element.remove_all("c:legendPos");
        if position != LegendPosition::Right {
            self.element.insert_before_any(
                &ElementBuilder::new("c:legendPos").attr("val", position.xml_value()),
                successors(LEGEND_SEQ, "c:legendPos"),
            );
        }
    }

    /// True when the plot area shrinks to make room for the legend,
    /// i.e. `c:overlay` is missing or its value is true.
    pub fn include_in_layout(&self) -> bool {
        self.element.find("c:overlay").is_none_or(|e| bool_val(&e))
    }

    /// `None` removes `c:overlay`, restoring the default.
    pub fn set_include_in_layout(&self, value: Option<bool>) {
        self.element.remove_all("c:overlay");
        if let Some(value) = value {
            self.element.insert_before_any(
                &ElementBuilder::new("c:overlay").attr("val", u8::from(value)),
                successors(LEGEND_SEQ, "c:overlay"),
            );
        }
    }

    /// Horizontal offset as a fraction of the chart width, 0.0 when the
    /// legend has no manual layout.
    pub fn horz_offset(&self) -> f64 {
        self.element
            .find_path(&["c:layout", "c:manualLayout", "c:x"])
            .and_then(|e| e.parse_attr("val"))
            .unwrap_or(0.0)
    }

    /// Zero removes the manual layout.
    pub fn set_horz_offset(&self, value: f64) {
        if value == 0.0 {
            self.element.remove_all("c:layout");
            return;
        }
        let layout = self
            .element
            .get_or_insert("c:layout", successors(LEGEND_SEQ, "c:layout"));
        let manual = layout.get_or_insert("c:manualLayout", &[]);
        let x_mode = manual.get_or_insert("c:xMode", successors(MANUAL_LAYOUT_SEQ, "c:xMode"));
        x_mode.set_attr("val", "factor");
        let x = manual.get_or_insert("c:x", successors(MANUAL_LAYOUT_SEQ, "c:x"));
        x.set_attr("val", value);
    }
}
