//! Charts embedded in presentation graphic frames.
//!
//! This module reads and edits chart parts in place:
//!
//! - [`Chart`] wraps a `c:chartSpace` and exposes its axes, legend, title,
//!   style, plots and series as live views
//! - [`Plot::chart_type`] recognizes the chart type a plot was authored as
//! - [`Chart::replace_data`] rewrites the series to new [`ChartData`] and
//!   hands the matching xlsx package to the chart's [`ChartWorkbook`]
//! - [`writer`] builds the part for a new chart of any supported type
//!
//! # Example
//!
//! ```rust
//! use pptx_shapetree::ooxml::charts::{CategoryChartData, Chart, ChartData, ChartType, writer};
//!
//! let data: ChartData = CategoryChartData::new()
//!     .with_categories(["East", "West"])
//!     .add_series("Q1", [19.2, 21.4])
//!     .into();
//! let xml = writer::chart_xml(ChartType::ColumnClustered, &data)?;
//! let chart = Chart::from_xml(&xml)?;
//! assert_eq!(chart.chart_type()?, ChartType::ColumnClustered);
//! assert_eq!(chart.series().len(), 1);
//! # Ok::<(), pptx_shapetree::ooxml::error::OoxmlError>(())
//! ```

pub mod axis;
pub mod chart;
pub mod data;
pub mod legend;
pub mod plot;
pub mod rewriter;
pub mod series;
pub mod types;
pub mod workbook;
pub mod writer;

pub use axis::Axis;
pub use chart::Chart;
pub use data::{CategoryChartData, CategorySeriesData, ChartData, XyChartData, XySeriesData};
pub use legend::Legend;
pub use plot::{Plot, Plots};
pub use rewriter::SeriesXmlRewriter;
pub use series::{Series, SeriesCollection};
pub use types::{AxisType, BarDirection, ChartType, Grouping, LegendPosition, PlotKind};
pub use workbook::{ChartWorkbook, EmbeddedWorkbook};

use crate::ooxml::oxml::XmlElement;

/// The tags of `sequence` that follow `tag`, i.e. the elements a new
/// `tag` child must precede. Empty when `tag` is not in `sequence`.
pub(crate) fn successors<'a>(sequence: &'a [&'a str], tag: &str) -> &'a [&'a str] {
    match sequence.iter().position(|t| *t == tag) {
        Some(pos) => &sequence[pos + 1..],
        None => &[],
    }
}

/// Value of a boolean `val` attribute; a missing attribute reads as true.
pub(crate) fn bool_val(element: &XmlElement) -> bool {
    matches!(element.attr("val").as_deref(), None | Some("1") | Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    #[test]
    fn test_successors() {
        let seq = ["a", "b", "c"];
        assert_eq!(successors(&seq, "a"), &["b", "c"]);
        assert!(successors(&seq, "c").is_empty());
        assert!(successors(&seq, "x").is_empty());
    }

    #[test]
    fn test_bool_val() {
        let xml = r#"<r><a/><b val="0"/><c val="true"/><d val="false"/></r>"#;
        let root = XmlDocument::parse(xml).unwrap().root();
        let values: Vec<bool> = root.children().iter().map(bool_val).collect();
        assert_eq!(values, vec![true, false, true, false]);
    }
}
