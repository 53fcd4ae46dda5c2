//! Plots: the chart-type elements of a plot area.
//!
//! A plot area holds one or more plot elements (`c:barChart`,
//! `c:lineChart`, ...), each with its own series. [`Plot::chart_type`]
//! recognizes the chart type a plot was authored as from the plot's
//! settings.

use super::series::{SeriesCollection, cache_points, plot_sers};
use super::types::{BarDirection, ChartType, Grouping, PlotKind};
use super::{bool_val, successors};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// Child sequence of `c:barChart` after the series.
const BAR_CHART_SEQ: &[&str] = &[
    "c:barDir",
    "c:grouping",
    "c:varyColors",
    "c:ser",
    "c:dLbls",
    "c:gapWidth",
    "c:overlap",
    "c:serLines",
    "c:axId",
    "c:extLst",
];

/// One plot element of a plot area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plot {
    element: XmlElement,
    kind: PlotKind,
}

impl Plot {
    /// Wrap a plot-area child; `None` when it is not a plot element.
    pub fn new(element: XmlElement) -> Option<Self> {
        let kind = PlotKind::from_tag(&element.tag())?;
        Some(Self { element, kind })
    }

    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    pub fn kind(&self) -> PlotKind {
        self.kind
    }

    pub fn series(&self) -> SeriesCollection {
        SeriesCollection::new(&self.element)
    }

    /// Category labels of the first series, empty strings for missing
    /// points. Multi-level categories report their leaf level.
    pub fn categories(&self) -> Vec<String> {
        let Some(cat) = plot_sers(&self.element)
            .first()
            .and_then(|ser| ser.find("c:cat"))
        else {
            return Vec::new();
        };
        let cache = cat
            .find_path(&["c:strRef", "c:strCache"])
            .or_else(|| cat.find_path(&["c:numRef", "c:numCache"]))
            .or_else(|| cat.find_path(&["c:multiLvlStrRef", "c:multiLvlStrCache", "c:lvl"]))
            .or_else(|| cat.find("c:strLit"))
            .or_else(|| cat.find("c:numLit"));
        let Some(cache) = cache else {
            return Vec::new();
        };
        let points = cache_points(&cache);
        points.into_iter().map(Option::unwrap_or_default).collect()
    }

    /// `c:varyColors`; a missing element reads as true.
    pub fn vary_by_categories(&self) -> bool {
        self.element.find("c:varyColors").is_none_or(|e| bool_val(&e))
    }

    pub fn set_vary_by_categories(&self, value: bool) {
        let vary = self.element.get_or_insert(
            "c:varyColors",
            &["c:ser", "c:dLbls", "c:gapWidth", "c:firstSliceAng", "c:holeSize", "c:axId"],
        );
        vary.set_attr("val", u8::from(value));
    }

    /// Bar plots only: gap between clusters, percent of bar width.
    pub fn gap_width(&self) -> u32 {
        self.element
            .find("c:gapWidth")
            .and_then(|e| e.parse_attr("val"))
            .unwrap_or(150)
    }

    pub fn set_gap_width(&self, value: u32) -> Result<()> {
        self.require_bar()?;
        let gap = self
            .element
            .get_or_insert("c:gapWidth", successors(BAR_CHART_SEQ, "c:gapWidth"));
        gap.set_attr("val", value);
        Ok(())
    }

    /// Bar plots only: overlap of bars in a cluster, -100 to 100.
    pub fn overlap(&self) -> i32 {
        self.element
            .find("c:overlap")
            .and_then(|e| e.parse_attr("val"))
            .unwrap_or(0)
    }

    /// Zero removes the element.
    pub fn set_overlap(&self, value: i32) -> Result<()> {
        self.require_bar()?;
        if !(-100..=100).contains(&value) {
            return Err(OoxmlError::InvalidArgument(format!(
                "overlap must be within -100..=100, got {}",
                value
            )));
        }
        self.element.remove_all("c:overlap");
        if value != 0 {
            self.element.insert_before_any(
                &ElementBuilder::new("c:overlap").attr("val", value),
                successors(BAR_CHART_SEQ, "c:overlap"),
            );
        }
        Ok(())
    }

    pub fn has_data_labels(&self) -> bool {
        self.element.find("c:dLbls").is_some()
    }

    fn require_bar(&self) -> Result<()> {
        if self.kind == PlotKind::Bar || self.kind == PlotKind::Bar3D {
            Ok(())
        } else {
            Err(OoxmlError::Unsupported(format!(
                "{} has no bar settings",
                self.kind.tag()
            )))
        }
    }

    /// Chart type this plot was authored as.
    pub fn chart_type(&self) -> Result<ChartType> {
        let plot = &self.element;
        let chart_type = match self.kind {
            PlotKind::Bar => bar_chart_type(plot),
            PlotKind::Line => {
                let markers = !any_ser_symbol_none(plot);
                match (grouping(plot, Grouping::Standard), markers) {
                    (Grouping::Stacked, true) => ChartType::LineMarkersStacked,
                    (Grouping::PercentStacked, true) => ChartType::LineMarkersStacked100,
                    (_, true) => ChartType::LineMarkers,
                    (Grouping::Stacked, false) => ChartType::LineStacked,
                    (Grouping::PercentStacked, false) => ChartType::LineStacked100,
                    (_, false) => ChartType::Line,
                }
            }
            PlotKind::Area => match grouping(plot, Grouping::Standard) {
                Grouping::Stacked => ChartType::AreaStacked,
                Grouping::PercentStacked => ChartType::AreaStacked100,
                _ => ChartType::Area,
            },
            PlotKind::Pie => {
                if has_explosion(plot) {
                    ChartType::PieExploded
                } else {
                    ChartType::Pie
                }
            }
            PlotKind::Doughnut => {
                if has_explosion(plot) {
                    ChartType::DoughnutExploded
                } else {
                    ChartType::Doughnut
                }
            }
            PlotKind::Radar => match plot.find("c:radarStyle").and_then(|e| e.attr("val")) {
                None => ChartType::Radar,
                Some(style) if style == "filled" => ChartType::RadarFilled,
                Some(_) if any_ser_symbol_none(plot) => ChartType::Radar,
                Some(_) => ChartType::RadarMarkers,
            },
            PlotKind::Scatter => scatter_chart_type(plot),
            PlotKind::Bubble => {
                let bubble_3d = plot
                    .find_all("c:ser")
                    .into_iter()
                    .find_map(|ser| ser.find("c:bubble3D"));
                match bubble_3d {
                    Some(e) if bool_val(&e) => ChartType::BubbleThreeDEffect,
                    _ => ChartType::Bubble,
                }
            }
            other => {
                return Err(OoxmlError::Unsupported(format!(
                    "chart type of {}",
                    other.tag()
                )));
            }
        };
        Ok(chart_type)
    }
}

fn grouping(plot: &XmlElement, default: Grouping) -> Grouping {
    plot.find("c:grouping")
        .and_then(|e| e.attr("val"))
        .and_then(|v| Grouping::from_xml(&v))
        .unwrap_or(default)
}

fn bar_chart_type(plot: &XmlElement) -> ChartType {
    let direction = plot
        .find("c:barDir")
        .and_then(|e| e.attr("val"))
        .and_then(|v| BarDirection::from_xml(&v))
        .unwrap_or_default();
    match (direction, grouping(plot, Grouping::Clustered)) {
        (BarDirection::Bar, Grouping::Stacked) => ChartType::BarStacked,
        (BarDirection::Bar, Grouping::PercentStacked) => ChartType::BarStacked100,
        (BarDirection::Bar, _) => ChartType::BarClustered,
        (BarDirection::Column, Grouping::Stacked) => ChartType::ColumnStacked,
        (BarDirection::Column, Grouping::PercentStacked) => ChartType::ColumnStacked100,
        (BarDirection::Column, _) => ChartType::ColumnClustered,
    }
}

fn ser_symbols(plot: &XmlElement) -> Vec<Option<String>> {
    plot.find_all("c:ser")
        .into_iter()
        .filter_map(|ser| ser.find_path(&["c:marker", "c:symbol"]))
        .map(|symbol| symbol.attr("val"))
        .collect()
}

fn any_ser_symbol_none(plot: &XmlElement) -> bool {
    ser_symbols(plot).iter().any(|v| v.as_deref() == Some("none"))
}

fn has_explosion(plot: &XmlElement) -> bool {
    plot.find_all("c:ser")
        .iter()
        .any(|ser| ser.find("c:explosion").is_some())
}

fn scatter_chart_type(plot: &XmlElement) -> ChartType {
    let no_line = plot
        .find_all("c:ser")
        .iter()
        .any(|ser| ser.find_path(&["c:spPr", "a:ln", "a:noFill"]).is_some());
    // only the first series decides
    let no_markers = ser_symbols(plot)
        .first()
        .is_some_and(|v| v.as_deref() == Some("none"));
    let style = plot.find("c:scatterStyle").and_then(|e| e.attr("val"));
    match style.as_deref() {
        Some("lineMarker") if no_line => ChartType::XyScatter,
        Some("lineMarker") if no_markers => ChartType::XyScatterLinesNoMarkers,
        Some("lineMarker") => ChartType::XyScatterLines,
        Some("smoothMarker") if no_markers => ChartType::XyScatterSmoothNoMarkers,
        Some("smoothMarker") => ChartType::XyScatterSmooth,
        _ => ChartType::XyScatter,
    }
}

/// The plots of a chart's plot area, in document order.
#[derive(Debug, Clone)]
pub struct Plots {
    plot_area: Option<XmlElement>,
}

impl Plots {
    pub fn new(plot_area: Option<XmlElement>) -> Self {
        Self { plot_area }
    }

    fn members(&self) -> Vec<Plot> {
        self.plot_area
            .as_ref()
            .map(|area| area.children().into_iter().filter_map(Plot::new).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<Plot> {
        let mut members = self.members();
        let len = members.len();
        if index >= len {
            return Err(OoxmlError::IndexOutOfRange { index, len });
        }
        Ok(members.swap_remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = Plot> {
        self.members().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    fn plot(xml: &str) -> Plot {
        let wrapped = format!(
            r#"<c:plotArea xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main">{}</c:plotArea>"#,
            xml
        );
        let area = XmlDocument::parse(&wrapped).unwrap().root();
        Plots::new(Some(area)).get(0).unwrap()
    }

    #[test]
    fn test_bar_chart_types() {
        let cases = [
            (r#"<c:barChart><c:barDir val="bar"/><c:grouping val="clustered"/></c:barChart>"#, ChartType::BarClustered),
            (r#"<c:barChart><c:barDir val="bar"/><c:grouping val="stacked"/></c:barChart>"#, ChartType::BarStacked),
            (r#"<c:barChart><c:barDir val="bar"/><c:grouping val="percentStacked"/></c:barChart>"#, ChartType::BarStacked100),
            (r#"<c:barChart><c:barDir val="col"/></c:barChart>"#, ChartType::ColumnClustered),
            (r#"<c:barChart><c:barDir val="col"/><c:grouping val="stacked"/></c:barChart>"#, ChartType::ColumnStacked),
            (r#"<c:barChart><c:barDir val="col"/><c:grouping val="percentStacked"/></c:barChart>"#, ChartType::ColumnStacked100),
        ];
        for (xml, expected) in cases {
            assert_eq!(plot(xml).chart_type().unwrap(), expected, "{}", xml);
        }
    }

    #[test]
    fn test_line_chart_types() {
        let no_markers = r#"<c:ser><c:marker><c:symbol val="none"/></c:marker></c:ser>"#;
        let cases = [
            (String::from("<c:lineChart/>"), ChartType::LineMarkers),
            (format!("<c:lineChart>{}</c:lineChart>", no_markers), ChartType::Line),
            (
                format!(r#"<c:lineChart><c:grouping val="stacked"/>{}</c:lineChart>"#, no_markers),
                ChartType::LineStacked,
            ),
            (
                r#"<c:lineChart><c:grouping val="percentStacked"/></c:lineChart>"#.to_string(),
                ChartType::LineMarkersStacked100,
            ),
        ];
        for (xml, expected) in cases {
            assert_eq!(plot(&xml).chart_type().unwrap(), expected, "{}", xml);
        }
    }

    #[test]
    fn test_pie_radar_bubble_types() {
        assert_eq!(plot("<c:pieChart><c:ser/></c:pieChart>").chart_type().unwrap(), ChartType::Pie);
        assert_eq!(
            plot(r#"<c:pieChart><c:ser><c:explosion val="25"/></c:ser></c:pieChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::PieExploded
        );
        assert_eq!(
            plot(r#"<c:doughnutChart><c:ser><c:explosion val="25"/></c:ser></c:doughnutChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::DoughnutExploded
        );
        assert_eq!(plot("<c:radarChart/>").chart_type().unwrap(), ChartType::Radar);
        assert_eq!(
            plot(r#"<c:radarChart><c:radarStyle val="filled"/></c:radarChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::RadarFilled
        );
        assert_eq!(
            plot(r#"<c:radarChart><c:radarStyle val="marker"/></c:radarChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::RadarMarkers
        );
        assert_eq!(
            plot(r#"<c:bubbleChart><c:ser><c:bubble3D val="1"/></c:ser></c:bubbleChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::BubbleThreeDEffect
        );
        assert_eq!(
            plot(r#"<c:bubbleChart><c:ser><c:bubble3D val="0"/></c:ser></c:bubbleChart>"#)
                .chart_type()
                .unwrap(),
            ChartType::Bubble
        );
    }

    #[test]
    fn test_scatter_chart_types() {
        let no_line = r#"<c:ser><c:spPr><a:ln><a:noFill/></a:ln></c:spPr></c:ser>"#;
        let no_markers = r#"<c:ser><c:marker><c:symbol val="none"/></c:marker></c:ser>"#;
        let cases = [
            (format!(r#"<c:scatterChart><c:scatterStyle val="lineMarker"/>{}</c:scatterChart>"#, no_line), ChartType::XyScatter),
            (format!(r#"<c:scatterChart><c:scatterStyle val="lineMarker"/>{}</c:scatterChart>"#, no_markers), ChartType::XyScatterLinesNoMarkers),
            (r#"<c:scatterChart><c:scatterStyle val="lineMarker"/></c:scatterChart>"#.to_string(), ChartType::XyScatterLines),
            (format!(r#"<c:scatterChart><c:scatterStyle val="smoothMarker"/>{}</c:scatterChart>"#, no_markers), ChartType::XyScatterSmoothNoMarkers),
            (r#"<c:scatterChart><c:scatterStyle val="smoothMarker"/></c:scatterChart>"#.to_string(), ChartType::XyScatterSmooth),
            (r#"<c:scatterChart><c:scatterStyle val="marker"/></c:scatterChart>"#.to_string(), ChartType::XyScatter),
        ];
        for (xml, expected) in cases {
            assert_eq!(plot(&xml).chart_type().unwrap(), expected, "{}", xml);
        }
    }

    #[test]
    fn test_unsupported_plot_kind() {
        assert!(matches!(
            plot("<c:stockChart/>").chart_type(),
            Err(OoxmlError::Unsupported(_))
        ));
    }

    #[test]
    fn test_plots_view() {
        let xml = r#"<c:plotArea xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"><c:layout/><c:barChart/><c:lineChart/><c:valAx/></c:plotArea>"#;
        let plots = Plots::new(Some(XmlDocument::parse(xml).unwrap().root()));
        assert_eq!(plots.len(), 2);
        assert_eq!(plots.get(1).unwrap().kind(), PlotKind::Line);
        assert!(matches!(
            plots.get(2),
            Err(OoxmlError::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(Plots::new(None).is_empty());
    }

    #[test]
    fn test_bar_settings() {
        let bar = plot(r#"<c:barChart><c:barDir val="col"/><c:ser/><c:axId val="1"/></c:barChart>"#);
        assert_eq!(bar.gap_width(), 150);
        bar.set_gap_width(80).unwrap();
        bar.set_overlap(-20).unwrap();
        assert_eq!(bar.gap_width(), 80);
        assert_eq!(bar.overlap(), -20);
        let tags: Vec<String> = bar.element().children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["c:barDir", "c:ser", "c:gapWidth", "c:overlap", "c:axId"]);
        bar.set_overlap(0).unwrap();
        assert!(bar.element().find("c:overlap").is_none());
        assert!(bar.set_overlap(101).is_err());

        let pie = plot("<c:pieChart/>");
        assert!(matches!(pie.set_gap_width(10), Err(OoxmlError::Unsupported(_))));
    }

    #[test]
    fn test_categories_and_vary_colors() {
        let bar = plot(
            r#"<c:barChart><c:varyColors val="0"/><c:ser><c:cat><c:strRef><c:f>Sheet1!$A$2:$A$4</c:f><c:strCache><c:ptCount val="3"/><c:pt idx="0"><c:v>East</c:v></c:pt><c:pt idx="2"><c:v>North</c:v></c:pt></c:strCache></c:strRef></c:cat></c:ser></c:barChart>"#,
        );
        assert_eq!(bar.categories(), vec!["East", "", "North"]);
        assert!(!bar.vary_by_categories());
        bar.set_vary_by_categories(true);
        assert!(bar.vary_by_categories());
        assert!(plot("<c:pieChart/>").vary_by_categories());
        assert!(plot("<c:pieChart/>").categories().is_empty());
    }
}
