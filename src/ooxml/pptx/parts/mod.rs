//! Parts a slide relates to.
//!
//! Adding a picture or a chart to a slide creates or reuses a related part
//! and references it from the new shape by relationship id. The
//! [`SlidePart`] trait is that seam: shape collections ask it for parts and
//! receive the `rId` to write into the shape XML.

mod dpi;
pub mod image;
pub mod memory;

pub use image::{ImageFormat, ImagePart, ImageSource};
pub use memory::{MemorySlidePart, Relationship};

use crate::ooxml::charts::{ChartData, ChartType};
use crate::ooxml::error::Result;

/// Relationship type of a slide-to-image relationship.
pub const RT_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
/// Relationship type of a slide-to-chart relationship.
pub const RT_CHART: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/chart";
/// Relationship type of a chart-to-workbook relationship.
pub const RT_PACKAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/package";

/// The part owning a slide's shape tree.
pub trait SlidePart {
    /// Image part for `image` and the slide's relationship id to it. An
    /// image already related to the slide is reused.
    fn get_or_add_image_part(&mut self, image: ImageSource) -> Result<(ImagePart, String)>;

    /// Create a chart part of `chart_type` holding `data`, with its
    /// embedded workbook, and return the slide's relationship id to it.
    fn add_chart_part(&mut self, chart_type: ChartType, data: &ChartData) -> Result<String>;
}
