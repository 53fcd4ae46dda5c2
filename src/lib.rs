//! pptx-shapetree - shape trees, placeholders and charts of PresentationML parts
//!
//! This library edits the XML of PowerPoint slides, slide layouts, slide
//! masters and notes pages in memory.
//!
//! # Features
//!
//! - **Shape trees**: Typed views over `p:spTree` with shape-id allocation
//!   and auto shape, text box, picture, table, connector and chart insertion
//! - **Placeholders**: Position and size inheritance from slide to layout to
//!   master, and filling of picture, chart and table placeholders
//! - **Charts**: Chart type recognition, axis, legend and title editing,
//!   chart XML generation and data replacement with an embedded workbook
//! - **Arena XML**: A shared element tree that shape wrappers view without
//!   owning
//!
//! # Example - Building a slide
//!
//! ```rust
//! use pptx_shapetree::ooxml::pptx::{AutoShapeType, Slide};
//! use pptx_shapetree::ooxml::pptx::shapes::{ShapeAdder, ShapeContainer};
//! use pptx_shapetree::common::inches;
//!
//! let slide = Slide::new();
//! let shapes = slide.shapes();
//! let shape = shapes.add_shape(AutoShapeType::RoundedRectangle, inches(1.0), inches(1.0), inches(2.0), inches(1.0));
//! assert_eq!(shape.base().name(), "Rounded Rectangle 1");
//! assert_eq!(shapes.len(), 1);
//! assert!(slide.to_xml().contains(r#"prst="roundRect""#));
//! ```
//!
//! # Example - Inspecting a chart
//!
//! ```rust
//! use pptx_shapetree::ooxml::charts::{Chart, ChartType, XyChartData, writer};
//!
//! let data = XyChartData::new().add_series("Trend", [(1.0, 2.5), (2.0, 3.5)]).into();
//! let chart = Chart::from_xml(&writer::chart_xml(ChartType::XyScatterLines, &data)?)?;
//! assert_eq!(chart.chart_type()?, ChartType::XyScatterLines);
//! assert_eq!(chart.series().get(0)?.values(), vec![Some(2.5), Some(3.5)]);
//! # Ok::<(), pptx_shapetree::ooxml::OoxmlError>(())
//! ```

/// Units and XML text helpers shared across the crate
pub mod common;

/// OOXML (Office Open XML) presentation parts
///
/// This module provides the XML tree, the PresentationML shape tree and
/// the DrawingML chart support.
pub mod ooxml;
