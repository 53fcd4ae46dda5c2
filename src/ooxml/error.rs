/// Error types for OOXML operations.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// A required part or element is missing
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Invalid format
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Positional access outside the bounds of a shape collection
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The shape does not belong to the collection it was looked up in
    #[error("shape not in collection")]
    ShapeNotFound,

    /// No slide placeholder carries the requested idx
    #[error("no placeholder with idx value {0}")]
    PlaceholderNotFound(u32),

    /// The chart has no axis of the requested kind
    #[error("chart has no {0} axis")]
    AxisNotFound(&'static str),

    /// Caller supplied an argument the operation cannot honor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `Chart::replace_data` was called on a chart without a workbook
    #[error("chart has no embedded workbook")]
    MissingWorkbook,

    /// Unsupported feature
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Feature disabled at compile time
    #[error("Feature '{0}' is disabled. Enable it in Cargo.toml to use this functionality.")]
    FeatureDisabled(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error while writing an embedded workbook
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Image decoding error
    #[cfg(feature = "imgconv")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}
