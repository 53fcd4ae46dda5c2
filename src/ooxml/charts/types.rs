//! Chart type and chart token enumerations.
//!
//! This module defines the chart types a chart can be created as or
//! recognized as, the plot kinds found in a plot area, and the small
//! enumerations used by the chart views.

use std::fmt;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Chart type, as recognized from a plot or requested for a new chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    /// Area chart
    Area,
    /// Stacked area chart
    AreaStacked,
    /// 100% stacked area chart
    AreaStacked100,
    /// Clustered horizontal bars
    BarClustered,
    /// Stacked horizontal bars
    BarStacked,
    /// 100% stacked horizontal bars
    BarStacked100,
    /// Bubble chart
    Bubble,
    /// Bubble chart with 3D effect
    BubbleThreeDEffect,
    /// Clustered vertical columns
    ColumnClustered,
    /// Stacked vertical columns
    ColumnStacked,
    /// 100% stacked vertical columns
    ColumnStacked100,
    /// Doughnut chart
    Doughnut,
    /// Exploded doughnut chart
    DoughnutExploded,
    /// Line chart without markers
    Line,
    /// Line chart with markers
    LineMarkers,
    /// Stacked line chart with markers
    LineMarkersStacked,
    /// 100% stacked line chart with markers
    LineMarkersStacked100,
    /// Stacked line chart
    LineStacked,
    /// 100% stacked line chart
    LineStacked100,
    /// Pie chart
    Pie,
    /// Exploded pie chart
    PieExploded,
    /// Radar chart
    Radar,
    /// Filled radar chart
    RadarFilled,
    /// Radar chart with markers
    RadarMarkers,
    /// Scatter chart, markers only
    XyScatter,
    /// Scatter chart with straight lines and markers
    XyScatterLines,
    /// Scatter chart with straight lines
    XyScatterLinesNoMarkers,
    /// Scatter chart with smoothed lines and markers
    XyScatterSmooth,
    /// Scatter chart with smoothed lines
    XyScatterSmoothNoMarkers,
}

impl ChartType {
    /// True for types whose series are (x, y) pairs instead of values per
    /// category.
    #[inline]
    pub const fn is_xy(self) -> bool {
        matches!(
            self,
            Self::XyScatter
                | Self::XyScatterLines
                | Self::XyScatterLinesNoMarkers
                | Self::XyScatterSmooth
                | Self::XyScatterSmoothNoMarkers
        )
    }

    #[inline]
    pub const fn is_bubble(self) -> bool {
        matches!(self, Self::Bubble | Self::BubbleThreeDEffect)
    }

    /// Plot element a new chart of this type is written with.
    pub const fn plot_kind(self) -> PlotKind {
        match self {
            Self::Area | Self::AreaStacked | Self::AreaStacked100 => PlotKind::Area,
            Self::BarClustered
            | Self::BarStacked
            | Self::BarStacked100
            | Self::ColumnClustered
            | Self::ColumnStacked
            | Self::ColumnStacked100 => PlotKind::Bar,
            Self::Bubble | Self::BubbleThreeDEffect => PlotKind::Bubble,
            Self::Doughnut | Self::DoughnutExploded => PlotKind::Doughnut,
            Self::Line
            | Self::LineMarkers
            | Self::LineMarkersStacked
            | Self::LineMarkersStacked100
            | Self::LineStacked
            | Self::LineStacked100 => PlotKind::Line,
            Self::Pie | Self::PieExploded => PlotKind::Pie,
            Self::Radar | Self::RadarFilled | Self::RadarMarkers => PlotKind::Radar,
            Self::XyScatter
            | Self::XyScatterLines
            | Self::XyScatterLinesNoMarkers
            | Self::XyScatterSmooth
            | Self::XyScatterSmoothNoMarkers => PlotKind::Scatter,
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Kind of a plot element (`c:barChart`, `c:lineChart`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotKind {
    Area,
    Area3D,
    Bar,
    Bar3D,
    Bubble,
    Doughnut,
    Line,
    Line3D,
    OfPie,
    Pie,
    Pie3D,
    Radar,
    Scatter,
    Stock,
    Surface,
    Surface3D,
}

static PLOT_KINDS: phf::Map<&'static str, PlotKind> = phf_map! {
    "c:areaChart" => PlotKind::Area,
    "c:area3DChart" => PlotKind::Area3D,
    "c:barChart" => PlotKind::Bar,
    "c:bar3DChart" => PlotKind::Bar3D,
    "c:bubbleChart" => PlotKind::Bubble,
    "c:doughnutChart" => PlotKind::Doughnut,
    "c:lineChart" => PlotKind::Line,
    "c:line3DChart" => PlotKind::Line3D,
    "c:ofPieChart" => PlotKind::OfPie,
    "c:pieChart" => PlotKind::Pie,
    "c:pie3DChart" => PlotKind::Pie3D,
    "c:radarChart" => PlotKind::Radar,
    "c:scatterChart" => PlotKind::Scatter,
    "c:stockChart" => PlotKind::Stock,
    "c:surfaceChart" => PlotKind::Surface,
    "c:surface3DChart" => PlotKind::Surface3D,
};

impl PlotKind {
    /// Plot kind of a plot-area child tag, `None` for axes and other
    /// non-plot children.
    #[inline]
    pub fn from_tag(tag: &str) -> Option<Self> {
        PLOT_KINDS.get(tag).copied()
    }

    /// Qualified element name for this plot kind.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Area => "c:areaChart",
            Self::Area3D => "c:area3DChart",
            Self::Bar => "c:barChart",
            Self::Bar3D => "c:bar3DChart",
            Self::Bubble => "c:bubbleChart",
            Self::Doughnut => "c:doughnutChart",
            Self::Line => "c:lineChart",
            Self::Line3D => "c:line3DChart",
            Self::OfPie => "c:ofPieChart",
            Self::Pie => "c:pieChart",
            Self::Pie3D => "c:pie3DChart",
            Self::Radar => "c:radarChart",
            Self::Scatter => "c:scatterChart",
            Self::Stock => "c:stockChart",
            Self::Surface => "c:surfaceChart",
            Self::Surface3D => "c:surface3DChart",
        }
    }
}

/// Axis element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    /// Category axis
    Category,
    /// Value axis
    Value,
    /// Date axis
    Date,
    /// Series axis (for 3D charts)
    Series,
}

impl AxisType {
    /// Returns the qualified element name for this axis type.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Category => "c:catAx",
            Self::Value => "c:valAx",
            Self::Date => "c:dateAx",
            Self::Series => "c:serAx",
        }
    }
}

/// Bar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BarDirection {
    /// Horizontal bars
    #[serde(rename = "bar")]
    Bar,
    /// Vertical columns
    #[default]
    #[serde(rename = "col")]
    Column,
}

impl BarDirection {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Column => "col",
        }
    }

    pub fn from_xml(value: &str) -> Option<Self> {
        match value {
            "bar" => Some(Self::Bar),
            "col" => Some(Self::Column),
            _ => None,
        }
    }
}

/// Grouping of series in bar, line and area plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Grouping {
    /// Side by side (bar charts only)
    #[serde(rename = "clustered")]
    Clustered,
    /// Independent series (line and area charts)
    #[default]
    #[serde(rename = "standard")]
    Standard,
    /// Stacked
    #[serde(rename = "stacked")]
    Stacked,
    /// Stacked to 100%
    #[serde(rename = "percentStacked")]
    PercentStacked,
}

impl Grouping {
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Clustered => "clustered",
            Self::Standard => "standard",
            Self::Stacked => "stacked",
            Self::PercentStacked => "percentStacked",
        }
    }

    pub fn from_xml(value: &str) -> Option<Self> {
        match value {
            "clustered" => Some(Self::Clustered),
            "standard" => Some(Self::Standard),
            "stacked" => Some(Self::Stacked),
            "percentStacked" => Some(Self::PercentStacked),
            _ => None,
        }
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    /// Bottom
    #[serde(rename = "b")]
    Bottom,
    /// Top right corner
    #[serde(rename = "tr")]
    Corner,
    /// Left
    #[serde(rename = "l")]
    Left,
    /// Right
    #[default]
    #[serde(rename = "r")]
    Right,
    /// Top
    #[serde(rename = "t")]
    Top,
}

impl LegendPosition {
    /// Returns the XML value for this position.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Corner => "tr",
            Self::Left => "l",
            Self::Right => "r",
            Self::Top => "t",
        }
    }

    pub fn from_xml(value: &str) -> Option<Self> {
        match value {
            "b" => Some(Self::Bottom),
            "tr" => Some(Self::Corner),
            "l" => Some(Self::Left),
            "r" => Some(Self::Right),
            "t" => Some(Self::Top),
            _ => None,
        }
    }
}
