//! Element classification and per-context shape factories.
//!
//! Factories are pure: they look at the element, never mutate it, and
//! always produce a wrapper.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::autoshape::Autoshape;
use super::base::{BaseShape, ShapeParent, has_ph_elm};
use super::connector::Connector;
use super::graphfrm::GraphicFrame;
use super::picture::Picture;
use super::placeholder::{
    ChartPlaceholder, LayoutPlaceholder, MasterPlaceholder, NotesSlidePlaceholder, Placeholder,
    PicturePlaceholder, PlaceholderGraphicFrame, PlaceholderPicture, SlidePlaceholder,
    TablePlaceholder,
};
use super::Shape;
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::enums::PlaceholderType;

/// Kind of a shape-tree member, decided by its tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// `p:sp`
    Autoshape,
    /// `p:pic`
    Picture,
    /// `p:graphicFrame`
    GraphicFrame,
    /// `p:grpSp`
    Group,
    /// `p:cxnSp`
    Connector,
    /// Any other element
    Other,
}

static SHAPE_KINDS: phf::Map<&'static str, ShapeKind> = phf_map! {
    "p:sp" => ShapeKind::Autoshape,
    "p:pic" => ShapeKind::Picture,
    "p:graphicFrame" => ShapeKind::GraphicFrame,
    "p:grpSp" => ShapeKind::Group,
    "p:cxnSp" => ShapeKind::Connector,
};

/// Tags that count as members of a shape collection.
pub const SHAPE_TAGS: &[&str] = &[
    "p:sp",
    "p:pic",
    "p:graphicFrame",
    "p:grpSp",
    "p:cxnSp",
    "p:contentPart",
];

/// Classify `element` by its tag. Total: unknown tags map to
/// [`ShapeKind::Other`].
pub fn classify(element: &XmlElement) -> ShapeKind {
    let tag = element.tag();
    match SHAPE_KINDS.get(tag.as_str()) {
        Some(kind) => *kind,
        None => {
            trace!(tag = %tag, "unrecognized shape element, using base shape");
            ShapeKind::Other
        },
    }
}

/// True when `element` belongs in a shape collection.
#[inline]
pub fn is_shape_element(element: &XmlElement) -> bool {
    let tag = element.tag();
    SHAPE_TAGS.contains(&tag.as_str())
}

/// Wrap `element` by tag, ignoring any placeholder marker.
pub fn base_shape_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    let base = BaseShape::new(element, parent);
    match classify(base.element()) {
        ShapeKind::Autoshape => Shape::Autoshape(Autoshape::new(base)),
        ShapeKind::Picture => Shape::Picture(Picture::new(base)),
        ShapeKind::GraphicFrame => Shape::GraphicFrame(GraphicFrame::new(base)),
        ShapeKind::Connector => Shape::Connector(Connector::new(base)),
        ShapeKind::Group | ShapeKind::Other => Shape::Base(base),
    }
}

/// Factory for shapes on a slide.
pub fn slide_shape_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    if has_ph_elm(&element) {
        slide_placeholder_factory(element, parent)
    } else {
        base_shape_factory(element, parent)
    }
}

/// Factory for placeholder-marked elements on a slide, dispatching on the
/// host tag and then on the placeholder type.
pub fn slide_placeholder_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    let tag = element.tag();
    if !matches!(tag.as_str(), "p:sp" | "p:graphicFrame" | "p:pic") {
        return base_shape_factory(element, parent);
    }
    let base = BaseShape::new(element, parent);
    let placeholder = match tag.as_str() {
        "p:sp" => {
            let ph_type = base
                .placeholder_format()
                .map(|f| f.ph_type)
                .unwrap_or_default();
            match ph_type {
                PlaceholderType::Picture | PlaceholderType::ClipArt => {
                    Placeholder::Picture(PicturePlaceholder::new(base))
                },
                PlaceholderType::Chart => Placeholder::Chart(ChartPlaceholder::new(base)),
                PlaceholderType::Table => Placeholder::Table(TablePlaceholder::new(base)),
                _ => Placeholder::Slide(SlidePlaceholder::new(base)),
            }
        },
        "p:graphicFrame" => Placeholder::GraphicFrame(PlaceholderGraphicFrame::new(base)),
        _ => Placeholder::PlaceholderPicture(PlaceholderPicture::new(base)),
    };
    Shape::Placeholder(placeholder)
}

/// Factory for shapes on a slide layout.
pub fn layout_shape_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    if has_ph_elm(&element) {
        Shape::Placeholder(Placeholder::Layout(LayoutPlaceholder::new(BaseShape::new(
            element, parent,
        ))))
    } else {
        base_shape_factory(element, parent)
    }
}

/// Factory for shapes on a slide master or notes master.
pub fn master_shape_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    if has_ph_elm(&element) {
        Shape::Placeholder(Placeholder::Master(MasterPlaceholder::new(BaseShape::new(
            element, parent,
        ))))
    } else {
        base_shape_factory(element, parent)
    }
}

/// Factory for shapes on a notes slide.
pub fn notes_slide_shape_factory(element: XmlElement, parent: ShapeParent) -> Shape {
    if has_ph_elm(&element) {
        Shape::Placeholder(Placeholder::NotesSlide(NotesSlidePlaceholder::new(
            BaseShape::new(element, parent),
        )))
    } else {
        base_shape_factory(element, parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::{ElementBuilder, XmlDocument};
    use proptest::prelude::*;

    fn element(xml: &str) -> XmlElement {
        XmlDocument::parse(xml).unwrap().root()
    }

    fn ph_host(tag: &str, ph_type: Option<&str>) -> XmlElement {
        let ph = ElementBuilder::new("p:ph").opt_attr("type", ph_type);
        let nv = ElementBuilder::new("p:nvXxPr")
            .child(ElementBuilder::new("p:cNvPr").attr("id", 2).attr("name", "x"))
            .child(ElementBuilder::new("p:nvPr").child(ph));
        XmlDocument::from_builder(&ElementBuilder::new(tag).child(nv)).root()
    }

    #[test]
    fn test_base_factory_by_tag() {
        let cases = [
            ("<p:sp/>", "Autoshape"),
            ("<p:pic/>", "Picture"),
            ("<p:graphicFrame/>", "GraphicFrame"),
            ("<p:grpSp/>", "Base"),
            ("<p:cxnSp/>", "Connector"),
            ("<p:contentPart/>", "Base"),
        ];
        for (xml, expected) in cases {
            let shape = base_shape_factory(element(xml), ShapeParent::Detached);
            assert_eq!(shape.variant_name(), expected, "{}", xml);
        }
    }

    #[test]
    fn test_slide_placeholder_factory() {
        let cases = [
            ("p:sp", Some("pic"), "PicturePlaceholder"),
            ("p:sp", Some("clipArt"), "PicturePlaceholder"),
            ("p:sp", Some("chart"), "ChartPlaceholder"),
            ("p:sp", Some("tbl"), "TablePlaceholder"),
            ("p:sp", Some("title"), "SlidePlaceholder"),
            ("p:sp", None, "SlidePlaceholder"),
            ("p:graphicFrame", Some("tbl"), "PlaceholderGraphicFrame"),
            ("p:pic", Some("pic"), "PlaceholderPicture"),
        ];
        for (tag, ph_type, expected) in cases {
            let shape = slide_shape_factory(ph_host(tag, ph_type), ShapeParent::Detached);
            assert_eq!(shape.variant_name(), expected, "{} {:?}", tag, ph_type);
        }

        let cxn = slide_placeholder_factory(ph_host("p:cxnSp", None), ShapeParent::Detached);
        assert_eq!(cxn.variant_name(), "Connector");
    }

    #[test]
    fn test_context_factories() {
        let ph = ph_host("p:sp", Some("body"));
        assert_eq!(layout_shape_factory(ph.clone(), ShapeParent::Detached).variant_name(), "LayoutPlaceholder");
        assert_eq!(master_shape_factory(ph.clone(), ShapeParent::Master).variant_name(), "MasterPlaceholder");
        assert_eq!(notes_slide_shape_factory(ph, ShapeParent::NotesSlide).variant_name(), "NotesSlidePlaceholder");

        let plain = element("<p:pic/>");
        assert_eq!(layout_shape_factory(plain.clone(), ShapeParent::Detached).variant_name(), "Picture");
        assert_eq!(notes_slide_shape_factory(plain, ShapeParent::Detached).variant_name(), "Picture");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_classify_is_total(prefix in "[a-z]{1,3}", local in "[a-zA-Z]{1,12}") {
            let tag = format!("{}:{}", prefix, local);
            let elm = XmlDocument::from_builder(&ElementBuilder::new(tag.clone())).root();
            let kind = classify(&elm);
            prop_assert_eq!(kind == ShapeKind::Other, !SHAPE_KINDS.contains_key(tag.as_str()));
        }
    }
}
