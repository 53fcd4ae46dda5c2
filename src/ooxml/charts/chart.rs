//! Chart part root.
//!
//! A [`Chart`] wraps the `c:chartSpace` element of a chart part. Axes,
//! legend, plots and series are live views over that element; changes made
//! through them are visible to every other view of the same chart.

use std::fmt;

use once_cell::unsync::OnceCell;

use super::axis::Axis;
use super::data::ChartData;
use super::legend::Legend;
use super::plot::Plots;
use super::rewriter::SeriesXmlRewriter;
use super::series::SeriesCollection;
use super::successors;
use super::types::{AxisType, ChartType};
use super::workbook::ChartWorkbook;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlDocument, XmlElement};

/// Children of `c:chart`, in schema order.
const CHART_SEQ: &[&str] = &[
    "c:title",
    "c:autoTitleDeleted",
    "c:pivotFmts",
    "c:view3D",
    "c:floor",
    "c:sideWall",
    "c:backWall",
    "c:plotArea",
    "c:legend",
    "c:plotVisOnly",
    "c:dispBlanksAs",
    "c:showDLblsOverMax",
    "c:extLst",
];

/// Children of `c:chartSpace` following `c:style`.
const STYLE_SUCCESSORS: &[&str] = &[
    "c:clrMapOvr",
    "c:pivotSource",
    "c:protection",
    "c:chart",
    "c:spPr",
    "c:txPr",
    "c:externalData",
    "c:printSettings",
    "c:userShapes",
    "c:extLst",
];

/// A chart: the `c:chartSpace` element plus the workbook holding its data.
pub struct Chart {
    chart_space: XmlElement,
    workbook: Option<Box<dyn ChartWorkbook>>,
    plots: OnceCell<Plots>,
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("chart_space", &self.chart_space)
            .field("has_workbook", &self.workbook.is_some())
            .finish()
    }
}

impl Chart {
    pub fn new(chart_space: XmlElement) -> Self {
        Self {
            chart_space,
            workbook: None,
            plots: OnceCell::new(),
        }
    }

    /// Parse a chart part.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = XmlDocument::parse(xml)?.root();
        if !root.has_tag("c:chartSpace") {
            return Err(OoxmlError::InvalidFormat(format!(
                "expected c:chartSpace, found {}",
                root.tag()
            )));
        }
        Ok(Self::new(root))
    }

    /// Attach the workbook that receives the data on
    /// [`Chart::replace_data`].
    pub fn with_workbook(mut self, workbook: Box<dyn ChartWorkbook>) -> Self {
        self.workbook = Some(workbook);
        self
    }

    pub fn chart_space(&self) -> &XmlElement {
        &self.chart_space
    }

    pub fn workbook(&self) -> Option<&dyn ChartWorkbook> {
        self.workbook.as_deref()
    }

    fn chart(&self) -> Option<XmlElement> {
        self.chart_space.find("c:chart")
    }

    fn plot_area(&self) -> Option<XmlElement> {
        self.chart_space.find_path(&["c:chart", "c:plotArea"])
    }

    /// The category axis: first `c:catAx`, else first `c:dateAx`, else a
    /// lone `c:valAx`.
    pub fn category_axis(&self) -> Result<Axis> {
        let plot_area = self.plot_area().ok_or(OoxmlError::AxisNotFound("category"))?;
        if let Some(cat_ax) = plot_area.find("c:catAx") {
            return Ok(Axis::new(cat_ax, AxisType::Category));
        }
        if let Some(date_ax) = plot_area.find("c:dateAx") {
            return Ok(Axis::new(date_ax, AxisType::Date));
        }
        let mut val_axes = plot_area.find_all("c:valAx");
        if val_axes.len() == 1
            && let Some(val_ax) = val_axes.pop()
        {
            return Ok(Axis::new(val_ax, AxisType::Value));
        }
        Err(OoxmlError::AxisNotFound("category"))
    }

    /// First `c:valAx` of the plot area.
    pub fn value_axis(&self) -> Result<Axis> {
        self.plot_area()
            .and_then(|area| area.find("c:valAx"))
            .map(|val_ax| Axis::new(val_ax, AxisType::Value))
            .ok_or(OoxmlError::AxisNotFound("value"))
    }

    pub fn has_legend(&self) -> bool {
        self.legend().is_some()
    }

    /// Add or remove `c:legend`. Adding keeps an existing legend.
    pub fn set_has_legend(&self, value: bool) -> Result<()> {
        let chart = self.require_chart()?;
        if value {
            chart.get_or_insert("c:legend", successors(CHART_SEQ, "c:legend"));
        } else {
            chart.remove_all("c:legend");
        }
        Ok(())
    }

    pub fn legend(&self) -> Option<Legend> {
        self.chart()?.find("c:legend").map(Legend::new)
    }

    pub fn has_title(&self) -> bool {
        self.chart().is_some_and(|chart| chart.find("c:title").is_some())
    }

    /// Adding a title clears `c:autoTitleDeleted`; removing one sets it so
    /// the application does not generate a title of its own.
    pub fn set_has_title(&self, value: bool) -> Result<()> {
        let chart = self.require_chart()?;
        if value {
            chart.get_or_insert("c:title", successors(CHART_SEQ, "c:title"));
        } else {
            chart.remove_all("c:title");
        }
        chart
            .get_or_insert("c:autoTitleDeleted", successors(CHART_SEQ, "c:autoTitleDeleted"))
            .set_attr("val", u8::from(!value));
        Ok(())
    }

    /// `c:style/@val`, the built-in chart style number (1 to 48).
    pub fn chart_style(&self) -> Option<u32> {
        self.chart_space
            .find("c:style")
            .and_then(|e| e.parse_attr("val"))
    }

    /// `None` removes the style element.
    pub fn set_chart_style(&self, style: Option<u32>) {
        self.chart_space.remove_all("c:style");
        if let Some(style) = style {
            self.chart_space.insert_before_any(
                &ElementBuilder::new("c:style").attr("val", style),
                STYLE_SUCCESSORS,
            );
        }
    }

    /// Chart type of the first plot.
    pub fn chart_type(&self) -> Result<ChartType> {
        self.plots().get(0)?.chart_type()
    }

    /// All series of the chart, plot by plot.
    pub fn series(&self) -> SeriesCollection {
        match self.plot_area() {
            Some(area) => SeriesCollection::new(&area),
            None => SeriesCollection::new(&self.chart_space),
        }
    }

    pub fn plots(&self) -> &Plots {
        self.plots.get_or_init(|| Plots::new(self.plot_area()))
    }

    /// Replace the chart's data: rewrite the series to match `data`, then
    /// hand the new workbook to the attached workbook.
    ///
    /// The workbook bytes are built before any XML is touched, so a
    /// failure leaves the chart unchanged.
    pub fn replace_data(&mut self, data: &ChartData) -> Result<()> {
        if self.workbook.is_none() {
            return Err(OoxmlError::MissingWorkbook);
        }
        let rewriter = SeriesXmlRewriter::for_chart(self.chart_type()?, data)?;
        let blob = data.xlsx_blob()?;
        rewriter.replace_series_data(&self.chart_space)?;
        self.plots = OnceCell::new();
        match self.workbook.as_mut() {
            Some(workbook) => workbook.update_from_xlsx_blob(blob),
            None => Err(OoxmlError::MissingWorkbook),
        }
    }

    /// Serialize the chart part.
    pub fn to_xml(&self) -> String {
        self.chart_space.document().to_xml()
    }

    fn require_chart(&self) -> Result<XmlElement> {
        self.chart()
            .ok_or_else(|| OoxmlError::InvalidFormat("chartSpace has no c:chart".to_string()))
    }
}
