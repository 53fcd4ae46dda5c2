/// Shapes on slides, layouts, masters and notes slides.
///
/// A shape tree (`p:spTree`) is wrapped by one of the collection types in
/// [`shapetree`]; each member element is wrapped by a [`Shape`] chosen by
/// the factory for that container kind. Wrappers are views over the XML:
/// identity is the element, so two wrappers of the same element compare
/// equal.
pub mod autoshape;
pub mod base;
pub mod connector;
pub mod factory;
pub mod graphfrm;
pub mod picture;
pub mod placeholder;
pub mod placeholders;
pub mod shapetree;
pub mod table;
pub mod templates;

pub use autoshape::Autoshape;
pub use base::{BaseShape, ShapeParent};
pub use connector::{Connector, ConnectorGeometry};
pub use factory::{ShapeKind, classify};
pub use graphfrm::GraphicFrame;
pub use picture::Picture;
pub use placeholder::{
    ChartPlaceholder, LayoutPlaceholder, MasterPlaceholder, NotesSlidePlaceholder, Placeholder,
    PicturePlaceholder, PlaceholderGraphicFrame, PlaceholderPicture, PlaceholderShape,
    SlidePlaceholder, TablePlaceholder,
};
pub use placeholders::{
    BasePlaceholders, LayoutPlaceholders, MasterPlaceholders, NotesSlidePlaceholders,
    SlidePlaceholders,
};
pub use shapetree::{
    BaseShapes, LayoutShapes, MasterShapes, NotesSlideShapes, ShapeAdder, ShapeContainer,
    ShapeIter, SlideShapes,
};
pub use table::{Table, TableCell};

use crate::ooxml::oxml::XmlElement;

/// A shape of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Autoshape(Autoshape),
    Picture(Picture),
    GraphicFrame(GraphicFrame),
    Connector(Connector),
    /// Group shapes, content parts and unrecognized elements
    Base(BaseShape),
    Placeholder(Placeholder),
}

impl Shape {
    pub fn base(&self) -> &BaseShape {
        match self {
            Shape::Autoshape(s) => s.base(),
            Shape::Picture(s) => s.base(),
            Shape::GraphicFrame(s) => s.base(),
            Shape::Connector(s) => s.base(),
            Shape::Base(s) => s,
            Shape::Placeholder(s) => PlaceholderShape::base(s),
        }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        self.base().element()
    }

    pub fn name(&self) -> String {
        self.base().name()
    }

    pub fn shape_id(&self) -> Option<u32> {
        self.base().shape_id()
    }

    pub fn is_placeholder(&self) -> bool {
        self.base().is_placeholder()
    }

    pub fn as_placeholder(&self) -> Option<&Placeholder> {
        match self {
            Shape::Placeholder(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_placeholder(self) -> Option<Placeholder> {
        match self {
            Shape::Placeholder(p) => Some(p),
            _ => None,
        }
    }

    /// Horizontal position; placeholders fall back to the inherited value.
    pub fn left(&self) -> Option<i64> {
        match self {
            Shape::Placeholder(p) => p.left(),
            _ => self.base().left(),
        }
    }

    pub fn top(&self) -> Option<i64> {
        match self {
            Shape::Placeholder(p) => p.top(),
            _ => self.base().top(),
        }
    }

    pub fn width(&self) -> Option<i64> {
        match self {
            Shape::Placeholder(p) => p.width(),
            _ => self.base().width(),
        }
    }

    pub fn height(&self) -> Option<i64> {
        match self {
            Shape::Placeholder(p) => p.height(),
            _ => self.base().height(),
        }
    }

    /// Name of the wrapper variant, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Shape::Autoshape(_) => "Autoshape",
            Shape::Picture(_) => "Picture",
            Shape::GraphicFrame(_) => "GraphicFrame",
            Shape::Connector(_) => "Connector",
            Shape::Base(_) => "Base",
            Shape::Placeholder(p) => match p {
                Placeholder::Slide(_) => "SlidePlaceholder",
                Placeholder::Chart(_) => "ChartPlaceholder",
                Placeholder::Picture(_) => "PicturePlaceholder",
                Placeholder::Table(_) => "TablePlaceholder",
                Placeholder::GraphicFrame(_) => "PlaceholderGraphicFrame",
                Placeholder::PlaceholderPicture(_) => "PlaceholderPicture",
                Placeholder::Layout(_) => "LayoutPlaceholder",
                Placeholder::Master(_) => "MasterPlaceholder",
                Placeholder::NotesSlide(_) => "NotesSlidePlaceholder",
            },
        }
    }
}
