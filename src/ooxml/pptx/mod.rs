//! PresentationML shape trees.
//!
//! Slides, slide layouts, slide masters and notes pages each own a shape
//! tree (`p:spTree`). This module wraps those trees in typed collections,
//! resolves placeholder inheritance from slide to layout to master, and
//! adds new shapes (auto shapes, pictures, tables, connectors and charts)
//! with fresh shape ids.
//!
//! # Example
//!
//! ```rust
//! use pptx_shapetree::ooxml::pptx::{AutoShapeType, Slide};
//! use pptx_shapetree::ooxml::pptx::shapes::{ShapeAdder, ShapeContainer};
//!
//! let slide = Slide::new();
//! let shapes = slide.shapes();
//! shapes.add_textbox(0, 0, 914400, 457200);
//! shapes.add_shape(AutoShapeType::Oval, 914400, 0, 914400, 914400);
//! let names: Vec<String> = shapes.iter().map(|s| s.name()).collect();
//! assert_eq!(names, vec!["TextBox 1", "Oval 2"]);
//! ```
pub mod autoshape_type;
pub mod enums;
pub mod parts;
pub mod shapes;
pub mod slide;

pub use autoshape_type::AutoShapeType;
pub use enums::{
    ConnectorType, PlaceholderFormat, PlaceholderOrientation, PlaceholderSize, PlaceholderType,
};
pub use parts::{ImagePart, ImageSource, MemorySlidePart, SlidePart};
pub use slide::{NotesMaster, NotesSlide, Slide, SlideLayout, SlideMaster};
