/// Graphic frames (`p:graphicFrame`) hosting tables, charts and other
/// graphical objects.
use super::base::BaseShape;
use super::table::Table;
use crate::ooxml::oxml::ns::{URI_CHART, URI_TABLE};

/// A graphic frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicFrame {
    base: BaseShape,
}

impl GraphicFrame {
    pub fn new(base: BaseShape) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &BaseShape {
        &self.base
    }

    /// `a:graphic/a:graphicData/@uri`.
    pub fn graphic_data_uri(&self) -> Option<String> {
        self.base
            .element()
            .find_path(&["a:graphic", "a:graphicData"])?
            .attr("uri")
    }

    pub fn has_chart(&self) -> bool {
        self.graphic_data_uri().as_deref() == Some(URI_CHART)
    }

    pub fn has_table(&self) -> bool {
        self.graphic_data_uri().as_deref() == Some(URI_TABLE)
    }

    /// Relationship id of the chart part, `None` unless this frame holds a
    /// chart.
    pub fn chart_rid(&self) -> Option<String> {
        if !self.has_chart() {
            return None;
        }
        self.base
            .element()
            .find_path(&["a:graphic", "a:graphicData", "c:chart"])?
            .attr("r:id")
    }

    pub fn table(&self) -> Option<Table> {
        if !self.has_table() {
            return None;
        }
        self.base
            .element()
            .find_path(&["a:graphic", "a:graphicData", "a:tbl"])
            .map(Table::new)
    }
}
