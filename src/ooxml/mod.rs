//! Office Open XML presentation parts.
//!
//! The module is organized in layers:
//!
//! 1. **XML layer** (`oxml`): an arena-backed element tree with parsing,
//!    serialization and fragment builders
//! 2. **Presentation layer** (`pptx`): shape trees, placeholders and the
//!    slide-side part interface used when pictures and charts are added
//! 3. **Chart layer** (`charts`): chart inspection, chart XML generation
//!    and data replacement with embedded workbooks
//!
//! # Example
//!
//! ```rust
//! use pptx_shapetree::ooxml::charts::{CategoryChartData, ChartData, ChartType};
//! use pptx_shapetree::ooxml::pptx::shapes::{ShapeAdder, ShapeContainer};
//! use pptx_shapetree::ooxml::pptx::{MemorySlidePart, Slide};
//!
//! let slide = Slide::new();
//! let mut part = MemorySlidePart::new();
//! let data: ChartData = CategoryChartData::new()
//!     .with_categories(["2024", "2025"])
//!     .add_series("Revenue", [1.5, 2.25])
//!     .into();
//! let frame = slide
//!     .shapes()
//!     .add_chart(&mut part, ChartType::BarClustered, 0, 0, 4572000, 2743200, &data)?;
//! let chart = part.chart(&frame.chart_rid().unwrap_or_default()).expect("chart part");
//! assert_eq!(chart.series().get(0)?.name(), "Revenue");
//! assert_eq!(slide.shapes().len(), 1);
//! # Ok::<(), pptx_shapetree::ooxml::OoxmlError>(())
//! ```
pub mod charts;
pub mod error;
pub mod oxml;
pub mod pptx;

pub use error::{OoxmlError, Result};
