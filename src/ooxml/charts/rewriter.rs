//! Series rewriting for chart data replacement.
//!
//! Replacing the data of an existing chart keeps every series' formatting
//! and only touches the series count and the data references: surplus
//! series are cloned from the last one, extra ones are removed from the
//! end, and the name, category and value references of each remaining
//! series are rewritten to point at the new worksheet layout.

use tracing::trace;

use super::data::{CategoryChartData, ChartData, XyChartData};
use super::series::plot_area_sers;
use super::successors;
use super::types::{ChartType, PlotKind};
use super::writer::{category_series_refs, xy_series_refs};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// Children of `c:ser` across all series kinds, in schema order.
const SER_SEQ: &[&str] = &[
    "c:idx",
    "c:order",
    "c:tx",
    "c:spPr",
    "c:invertIfNegative",
    "c:pictureOptions",
    "c:marker",
    "c:explosion",
    "c:dPt",
    "c:dLbls",
    "c:trendline",
    "c:errBars",
    "c:cat",
    "c:val",
    "c:xVal",
    "c:yVal",
    "c:shape",
    "c:smooth",
    "c:bubbleSize",
    "c:bubble3D",
    "c:extLst",
];

/// Rewrites the series of a chart to match replacement data.
#[derive(Debug, Clone, Copy)]
pub enum SeriesXmlRewriter<'a> {
    Category(&'a CategoryChartData),
    Xy(&'a XyChartData),
}

impl<'a> SeriesXmlRewriter<'a> {
    /// Rewriter for a chart of `chart_type`. Bubble charts are not
    /// supported, and the data kind must match the chart type.
    pub fn for_chart(chart_type: ChartType, data: &'a ChartData) -> Result<Self> {
        match (chart_type.is_xy(), data) {
            _ if chart_type.is_bubble() => Err(OoxmlError::Unsupported(format!(
                "replacing data of {} charts",
                chart_type
            ))),
            (true, ChartData::Xy(data)) => Ok(Self::Xy(data)),
            (false, ChartData::Category(data)) => Ok(Self::Category(data)),
            (true, ChartData::Category(_)) => Err(OoxmlError::InvalidArgument(format!(
                "{} chart needs XY chart data",
                chart_type
            ))),
            (false, ChartData::Xy(_)) => Err(OoxmlError::InvalidArgument(format!(
                "{} chart needs category chart data",
                chart_type
            ))),
        }
    }

    fn series_count(&self) -> usize {
        match self {
            Self::Category(data) => data.series.len(),
            Self::Xy(data) => data.series.len(),
        }
    }

    /// Make the series under `chart_space` match the data.
    pub fn replace_series_data(&self, chart_space: &XmlElement) -> Result<()> {
        let plot_area = chart_space
            .find_path(&["c:chart", "c:plotArea"])
            .ok_or_else(|| OoxmlError::InvalidFormat("chart has no c:plotArea".to_string()))?;
        adjust_ser_count(&plot_area, self.series_count())?;
        for (index, ser) in plot_area_sers(&plot_area).iter().enumerate() {
            self.rewrite_ser_data(ser, index);
            trace!(index, "rewrote series data");
        }
        Ok(())
    }

    fn rewrite_ser_data(&self, ser: &XmlElement, index: usize) {
        match self {
            Self::Category(data) => {
                let Some(series) = data.series.get(index) else {
                    return;
                };
                let (tx, cat, values) = category_series_refs(data, index, series);
                replace_ser_child(ser, &tx);
                match cat {
                    Some(cat) => replace_ser_child(ser, &cat),
                    None => ser.remove_all("c:cat"),
                }
                replace_ser_child(ser, &values);
            }
            Self::Xy(data) => {
                let Some(series) = data.series.get(index) else {
                    return;
                };
                let (tx, x_val, y_val) = xy_series_refs(data, index, series);
                replace_ser_child(ser, &tx);
                replace_ser_child(ser, &x_val);
                replace_ser_child(ser, &y_val);
            }
        }
    }
}

fn replace_ser_child(ser: &XmlElement, builder: &ElementBuilder) {
    let tag = builder.tag();
    ser.remove_all(tag);
    ser.insert_before_any(builder, successors(SER_SEQ, tag));
}

fn adjust_ser_count(plot_area: &XmlElement, count: usize) -> Result<()> {
    let sers = plot_area_sers(plot_area);
    if count > sers.len() {
        add_cloned_sers(plot_area, &sers, count - sers.len())
    } else {
        trim_sers(plot_area, &sers[count..]);
        Ok(())
    }
}

fn max_ser_val(plot_area: &XmlElement, tag: &str) -> Option<u32> {
    plot_area
        .descendants_with_tag("c:ser")
        .iter()
        .filter_map(|ser| ser.find(tag).and_then(|e| e.parse_attr("val")))
        .max()
}

/// Append `extra` copies of the last series, each with the next free
/// `c:idx` and `c:order`.
fn add_cloned_sers(plot_area: &XmlElement, sers: &[XmlElement], extra: usize) -> Result<()> {
    let Some(mut last) = sers.last().cloned() else {
        return Err(OoxmlError::InvalidFormat(
            "chart has no series to clone".to_string(),
        ));
    };
    let mut next_idx = max_ser_val(plot_area, "c:idx").map_or(0, |v| v + 1);
    let mut next_order = max_ser_val(plot_area, "c:order").map_or(0, |v| v + 1);
    for _ in 0..extra {
        let clone = last.add_next_sibling(&last.to_builder())?;
        clone
            .get_or_insert("c:idx", successors(SER_SEQ, "c:idx"))
            .set_attr("val", next_idx);
        clone
            .get_or_insert("c:order", successors(SER_SEQ, "c:order"))
            .set_attr("val", next_order);
        next_idx += 1;
        next_order += 1;
        last = clone;
    }
    Ok(())
}

/// Remove `surplus` and then every plot left without series.
fn trim_sers(plot_area: &XmlElement, surplus: &[XmlElement]) {
    for ser in surplus {
        ser.remove();
    }
    for plot in plot_area.children() {
        if PlotKind::from_tag(&plot.tag()).is_some() && plot.find("c:ser").is_none() {
            plot.remove();
        }
    }
}
