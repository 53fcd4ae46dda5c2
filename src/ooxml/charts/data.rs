//! Tabular chart data.
//!
//! Category charts hold one value per category for every series; XY charts
//! hold (x, y) points. Both lay themselves out on a single worksheet named
//! `Sheet1` and can produce the worksheet references the chart XML uses.

use serde::{Deserialize, Serialize};

use super::workbook;
use crate::ooxml::error::Result;

/// Worksheet every chart reference points into.
pub const SHEET_NAME: &str = "Sheet1";

/// Excel column name of 0-based column `col` (`0` is `A`, `26` is `AA`).
pub fn column_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;

    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }

    result
}

/// Absolute single-cell reference, e.g. `Sheet1!$B$1`.
fn cell_ref(col: usize, row: usize) -> String {
    format!("{}!${}${}", SHEET_NAME, column_letter(col), row)
}

/// Absolute column range of `count` cells starting at row 2.
fn column_range_ref(col: usize, count: usize) -> String {
    let letter = column_letter(col);
    format!(
        "{}!${}$2:${}${}",
        SHEET_NAME,
        letter,
        letter,
        count.max(1) + 1
    )
}

/// One series of a category chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeriesData {
    pub name: String,
    /// One value per category; `None` leaves the cell blank.
    pub values: Vec<Option<f64>>,
}

/// Data for bar, column, line, area, pie, doughnut and radar charts.
///
/// Layout: categories in column A from row 2, series names in row 1 from
/// column B, series values below their names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategoryChartData {
    pub categories: Vec<String>,
    pub series: Vec<CategorySeriesData>,
    /// Number format written to value caches.
    pub number_format: String,
}

impl CategoryChartData {
    pub fn new() -> Self {
        Self {
            number_format: "General".to_string(),
            ..Default::default()
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Add a series with a value for every category.
    pub fn add_series<I>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        self.series.push(CategorySeriesData {
            name: name.into(),
            values: values.into_iter().map(Some).collect(),
        });
        self
    }

    /// Add a series that may have blank values.
    pub fn add_sparse_series(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        self.series.push(CategorySeriesData {
            name: name.into(),
            values,
        });
        self
    }

    pub fn categories_ref(&self) -> String {
        column_range_ref(0, self.categories.len())
    }

    pub fn series_name_ref(&self, series: usize) -> String {
        cell_ref(series + 1, 1)
    }

    pub fn values_ref(&self, series: usize) -> String {
        let count = self.series.get(series).map_or(0, |s| s.values.len());
        column_range_ref(series + 1, count.max(self.categories.len()))
    }
}

/// One series of an XY chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XySeriesData {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Data for scatter charts.
///
/// Layout: each series takes two adjacent columns, x values on the left
/// and y values on the right with the series name above the y values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct XyChartData {
    pub series: Vec<XySeriesData>,
    /// Number format written to value caches.
    pub number_format: String,
}

impl XyChartData {
    pub fn new() -> Self {
        Self {
            number_format: "General".to_string(),
            ..Default::default()
        }
    }

    pub fn add_series<I>(mut self, name: impl Into<String>, points: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        self.series.push(XySeriesData {
            name: name.into(),
            points: points.into_iter().collect(),
        });
        self
    }

    fn point_count(&self, series: usize) -> usize {
        self.series.get(series).map_or(0, |s| s.points.len())
    }

    pub fn series_name_ref(&self, series: usize) -> String {
        cell_ref(series * 2 + 1, 1)
    }

    pub fn x_values_ref(&self, series: usize) -> String {
        column_range_ref(series * 2, self.point_count(series))
    }

    pub fn y_values_ref(&self, series: usize) -> String {
        column_range_ref(series * 2 + 1, self.point_count(series))
    }
}

/// Data for a new chart or for replacing the data of an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Category(CategoryChartData),
    Xy(XyChartData),
}

impl ChartData {
    /// Number of series.
    pub fn len(&self) -> usize {
        match self {
            ChartData::Category(data) => data.series.len(),
            ChartData::Xy(data) => data.series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn number_format(&self) -> &str {
        match self {
            ChartData::Category(data) => &data.number_format,
            ChartData::Xy(data) => &data.number_format,
        }
    }

    /// The xlsx package holding this data, for the chart's embedded
    /// workbook.
    pub fn xlsx_blob(&self) -> Result<Vec<u8>> {
        workbook::write_xlsx(self)
    }
}

impl From<CategoryChartData> for ChartData {
    fn from(data: CategoryChartData) -> Self {
        ChartData::Category(data)
    }
}

impl From<XyChartData> for ChartData {
    fn from(data: XyChartData) -> Self {
        ChartData::Xy(data)
    }
}
