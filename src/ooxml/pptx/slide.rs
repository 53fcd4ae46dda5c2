/// Slides, slide layouts, slide masters and their notes counterparts.
///
/// Each container owns the XML document of one part and, where
/// placeholders inherit, a link to the container they inherit from:
/// a slide links to its layout, a layout to its master.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlDocument, XmlElement};
use crate::ooxml::pptx::enums::PlaceholderType;
use crate::ooxml::pptx::shapes::shapetree::LayoutPlaceholderSource;
use crate::ooxml::pptx::shapes::{
    LayoutPlaceholder, LayoutPlaceholders, LayoutShapes, MasterPlaceholder, MasterPlaceholders,
    MasterShapes, NotesSlidePlaceholder, NotesSlidePlaceholders, NotesSlideShapes, Placeholder,
    PlaceholderShape, Shape, ShapeContainer, SlidePlaceholders, SlideShapes,
};

/// Locate `p:cSld/p:spTree` under the part root.
fn sp_tree_of(doc: &XmlDocument) -> Result<XmlElement> {
    doc.root()
        .find_path(&["p:cSld", "p:spTree"])
        .ok_or_else(|| OoxmlError::PartNotFound("p:cSld/p:spTree".to_string()))
}

/// `cSld/@name`, empty when absent.
fn c_sld_name(doc: &XmlDocument) -> String {
    doc.root()
        .find("p:cSld")
        .and_then(|c| c.attr("name"))
        .unwrap_or_default()
}

/// Empty part with a shape tree holding only its group properties.
fn new_part(root_tag: &str) -> XmlDocument {
    let sp_tree = ElementBuilder::new("p:spTree")
        .child(
            ElementBuilder::new("p:nvGrpSpPr")
                .child(ElementBuilder::new("p:cNvPr").attr("id", 1).attr("name", ""))
                .child(ElementBuilder::new("p:cNvGrpSpPr"))
                .child(ElementBuilder::new("p:nvPr")),
        )
        .child(ElementBuilder::new("p:grpSpPr"));
    let root = ElementBuilder::new(root_tag)
        .nsdecls(&["a", "p", "r"])
        .child(ElementBuilder::new("p:cSld").child(sp_tree))
        .child(
            ElementBuilder::new("p:clrMapOvr").child(ElementBuilder::new("a:masterClrMapping")),
        );
    XmlDocument::from_builder(&root)
}

/// A slide (`p:sld`).
///
/// # Examples
///
/// ```rust
/// use pptx_shapetree::ooxml::pptx::Slide;
/// use pptx_shapetree::ooxml::pptx::AutoShapeType;
/// use pptx_shapetree::ooxml::pptx::shapes::{ShapeAdder, ShapeContainer};
///
/// let slide = Slide::new();
/// let shapes = slide.shapes();
/// let shape = shapes.add_shape(AutoShapeType::Rectangle, 0, 0, 914400, 914400);
/// assert_eq!(shape.base().name(), "Rectangle 1");
/// assert_eq!(shapes.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Slide {
    doc: XmlDocument,
    sp_tree: XmlElement,
    layout: Option<SlideLayout>,
}

impl Slide {
    /// An empty slide not yet linked to a layout.
    pub fn new() -> Self {
        let doc = new_part("p:sld");
        let sp_tree = doc.root().find_path(&["p:cSld", "p:spTree"]);
        Self {
            sp_tree: sp_tree.unwrap_or_else(|| doc.root()),
            doc,
            layout: None,
        }
    }

    /// Wrap an existing slide document.
    pub fn from_document(doc: XmlDocument) -> Result<Self> {
        let sp_tree = sp_tree_of(&doc)?;
        Ok(Self {
            doc,
            sp_tree,
            layout: None,
        })
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_document(XmlDocument::parse(xml)?)
    }

    /// New slide based on `layout`, with the layout's cloneable
    /// placeholders already copied.
    pub fn from_layout(layout: &SlideLayout) -> Self {
        let slide = Self::new().with_layout(layout.clone());
        slide.shapes().clone_layout_placeholders(layout);
        slide
    }

    /// Link this slide to the layout its placeholders inherit from.
    pub fn with_layout(mut self, layout: SlideLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    #[inline]
    pub fn layout(&self) -> Option<&SlideLayout> {
        self.layout.as_ref()
    }

    pub fn name(&self) -> String {
        c_sld_name(&self.doc)
    }

    pub fn shapes(&self) -> SlideShapes {
        SlideShapes::new(self.sp_tree.clone(), self.layout.clone())
    }

    pub fn placeholders(&self) -> SlidePlaceholders {
        SlidePlaceholders::new(self.sp_tree.clone(), self.layout.clone())
    }

    pub fn to_xml(&self) -> String {
        self.doc.to_xml()
    }
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

/// A slide layout (`p:sldLayout`).
#[derive(Debug, Clone)]
pub struct SlideLayout {
    doc: XmlDocument,
    sp_tree: XmlElement,
    master: Option<SlideMaster>,
}

impl SlideLayout {
    pub fn from_document(doc: XmlDocument) -> Result<Self> {
        let sp_tree = sp_tree_of(&doc)?;
        Ok(Self {
            doc,
            sp_tree,
            master: None,
        })
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_document(XmlDocument::parse(xml)?)
    }

    /// Link this layout to the master its placeholders inherit from.
    pub fn with_master(mut self, master: SlideMaster) -> Self {
        self.master = Some(master);
        self
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    #[inline]
    pub fn master(&self) -> Option<&SlideMaster> {
        self.master.as_ref()
    }

    pub fn name(&self) -> String {
        c_sld_name(&self.doc)
    }

    pub fn shapes(&self) -> LayoutShapes {
        LayoutShapes::new(self.sp_tree.clone(), self.master.clone())
    }

    pub fn placeholders(&self) -> LayoutPlaceholders {
        LayoutPlaceholders::new(self.sp_tree.clone(), self.master.clone())
    }
}

impl LayoutPlaceholderSource for SlideLayout {
    /// Layout placeholders a new slide receives. Date, footer and slide
    /// number placeholders stay latent.
    fn iter_cloneable_placeholders(&self) -> Vec<LayoutPlaceholder> {
        self.placeholders()
            .iter()
            .filter_map(|shape| match shape {
                Shape::Placeholder(Placeholder::Layout(p)) => Some(p),
                _ => None,
            })
            .filter(|p| {
                !matches!(
                    p.ph_type(),
                    PlaceholderType::Date | PlaceholderType::Footer | PlaceholderType::SlideNumber
                )
            })
            .collect()
    }
}

macro_rules! master_container {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            doc: XmlDocument,
            sp_tree: XmlElement,
        }

        impl $name {
            pub fn from_document(doc: XmlDocument) -> Result<Self> {
                let sp_tree = sp_tree_of(&doc)?;
                Ok(Self { doc, sp_tree })
            }

            pub fn from_xml(xml: &str) -> Result<Self> {
                Self::from_document(XmlDocument::parse(xml)?)
            }

            #[inline]
            pub fn document(&self) -> &XmlDocument {
                &self.doc
            }

            pub fn shapes(&self) -> MasterShapes {
                MasterShapes::new(self.sp_tree.clone())
            }

            pub fn placeholders(&self) -> MasterPlaceholders {
                MasterPlaceholders::new(self.sp_tree.clone())
            }
        }
    };
}

master_container! {
    /// A slide master (`p:sldMaster`).
    SlideMaster
}

master_container! {
    /// A notes master (`p:notesMaster`).
    NotesMaster
}

/// A notes slide (`p:notes`).
#[derive(Debug, Clone)]
pub struct NotesSlide {
    doc: XmlDocument,
    sp_tree: XmlElement,
}

impl NotesSlide {
    /// An empty notes slide.
    pub fn new() -> Self {
        let doc = new_part("p:notes");
        let sp_tree = doc.root().find_path(&["p:cSld", "p:spTree"]);
        Self {
            sp_tree: sp_tree.unwrap_or_else(|| doc.root()),
            doc,
        }
    }

    pub fn from_document(doc: XmlDocument) -> Result<Self> {
        let sp_tree = sp_tree_of(&doc)?;
        Ok(Self { doc, sp_tree })
    }

    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_document(XmlDocument::parse(xml)?)
    }

    /// New notes slide with the slide image, body and slide number
    /// placeholders of `master` already copied.
    pub fn from_master(master: &NotesMaster) -> Self {
        let notes = Self::new();
        notes.clone_master_placeholders(master);
        notes
    }

    /// Copy the slide image, body and slide number placeholders of
    /// `master` onto this notes slide.
    pub fn clone_master_placeholders(&self, master: &NotesMaster) {
        let shapes = self.shapes();
        let cloneable: Vec<MasterPlaceholder> = master
            .placeholders()
            .iter()
            .filter_map(|shape| match shape {
                Shape::Placeholder(Placeholder::Master(p)) => Some(p),
                _ => None,
            })
            .filter(|p| {
                matches!(
                    p.ph_type(),
                    PlaceholderType::SlideImage | PlaceholderType::Body | PlaceholderType::SlideNumber
                )
            })
            .collect();
        for placeholder in &cloneable {
            shapes.clone_placeholder(placeholder);
        }
    }

    #[inline]
    pub fn document(&self) -> &XmlDocument {
        &self.doc
    }

    pub fn shapes(&self) -> NotesSlideShapes {
        NotesSlideShapes::new(self.sp_tree.clone())
    }

    pub fn placeholders(&self) -> NotesSlidePlaceholders {
        NotesSlidePlaceholders::new(self.sp_tree.clone())
    }

    /// The body placeholder holding the notes text.
    pub fn notes_placeholder(&self) -> Option<NotesSlidePlaceholder> {
        self.placeholders().iter().find_map(|shape| match shape {
            Shape::Placeholder(Placeholder::NotesSlide(p)) if p.ph_type() == PlaceholderType::Body => {
                Some(p)
            },
            _ => None,
        })
    }

    /// Text of the notes placeholder.
    pub fn notes_text(&self) -> Option<String> {
        self.notes_placeholder()?.base().text()
    }
}

impl Default for NotesSlide {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#;

    fn ph_sp(id: u32, ph: &str, xfrm: Option<(i64, i64, i64, i64)>) -> String {
        let sp_pr = match xfrm {
            Some((x, y, cx, cy)) => format!(
                r#"<p:spPr><a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm></p:spPr>"#,
                x, y, cx, cy
            ),
            None => "<p:spPr/>".to_string(),
        };
        format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="ph{}"/><p:cNvSpPr/><p:nvPr>{}</p:nvPr></p:nvSpPr>{}</p:sp>"#,
            id, id, ph, sp_pr
        )
    }

    fn part(root: &str, children: &str) -> String {
        format!(
            r#"<{root} {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{children}</p:spTree></p:cSld></{root}>"#
        )
    }

    fn master() -> SlideMaster {
        let children = format!(
            "{}{}{}",
            ph_sp(2, r#"<p:ph type="title"/>"#, Some((10, 20, 300, 40))),
            ph_sp(3, r#"<p:ph type="body" idx="1"/>"#, Some((10, 80, 300, 200))),
            ph_sp(4, r#"<p:ph type="dt" sz="quarter" idx="2"/>"#, Some((10, 290, 50, 10))),
        );
        SlideMaster::from_xml(&part("p:sldMaster", &children)).unwrap()
    }

    fn layout() -> SlideLayout {
        let children = format!(
            "{}{}{}",
            ph_sp(2, r#"<p:ph type="ctrTitle"/>"#, None),
            ph_sp(3, r#"<p:ph idx="1"/>"#, Some((15, 85, 290, 190))),
            ph_sp(4, r#"<p:ph type="dt" sz="half" idx="10"/>"#, None),
        );
        SlideLayout::from_xml(&part("p:sldLayout", &children))
            .unwrap()
            .with_master(master())
    }

    #[test]
    fn test_missing_sp_tree() {
        let err = Slide::from_xml(&format!("<p:sld {}><p:cSld/></p:sld>", NS)).unwrap_err();
        assert!(matches!(err, OoxmlError::PartNotFound(_)));
    }

    #[test]
    fn test_new_slide_is_empty() {
        let slide = Slide::new();
        assert!(slide.shapes().is_empty());
        assert_eq!(slide.shapes().next_shape_id(), 2);
        let reparsed = Slide::from_xml(&slide.to_xml()).unwrap();
        assert!(reparsed.shapes().is_empty());
    }

    #[test]
    fn test_layout_inherits_from_master() {
        let layout = layout();
        let title = layout.placeholders().get(0).unwrap();
        assert_eq!(title.left(), Some(10));
        assert_eq!(title.width(), Some(300));

        let body = layout.placeholders().get(1).unwrap();
        assert_eq!(body.left(), Some(15));
        assert_eq!(body.base().left(), Some(15));
    }

    #[test]
    fn test_slide_inherits_through_layout() {
        let slide = Slide::from_layout(&layout());
        let placeholders = slide.placeholders();
        // title and body are cloned, the date placeholder is not
        assert_eq!(placeholders.len(), 2);

        let title = placeholders.get(0).unwrap();
        assert_eq!(title.name(), "Title 1");
        assert_eq!(title.base().left(), None);
        assert_eq!(title.left(), Some(10));
        assert_eq!(title.height(), Some(40));

        let body = placeholders.get(1).unwrap();
        assert_eq!(body.name(), "Content Placeholder 2");
        assert_eq!(body.top(), Some(85));
        assert_eq!(body.shape_id(), Some(3));
    }

    #[test]
    fn test_detached_placeholder_has_no_inherited_position() {
        let slide = Slide::from_xml(&part("p:sld", &ph_sp(2, r#"<p:ph type="title"/>"#, None)))
            .unwrap();
        let title = slide.shapes().title().unwrap();
        assert_eq!(title.left(), None);
    }

    #[test]
    fn test_notes_slide_from_master() {
        let children = format!(
            "{}{}{}{}",
            ph_sp(2, r#"<p:ph type="hdr" sz="quarter"/>"#, None),
            ph_sp(3, r#"<p:ph type="sldImg" idx="2"/>"#, None),
            ph_sp(4, r#"<p:ph type="body" sz="quarter" idx="3"/>"#, None),
            ph_sp(5, r#"<p:ph type="sldNum" sz="quarter" idx="5"/>"#, None),
        );
        let master = NotesMaster::from_xml(&part("p:notesMaster", &children)).unwrap();
        let notes = NotesSlide::from_master(&master);
        let names: Vec<String> = notes.shapes().iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "Slide Image Placeholder 1",
                "Notes Placeholder 2",
                "Slide Number Placeholder 3"
            ]
        );
        assert_eq!(notes.notes_text().as_deref(), Some(""));
        let body = notes.notes_placeholder().unwrap();
        assert!(body.base().set_text("remember"));
        assert_eq!(notes.notes_text().as_deref(), Some("remember"));
    }
}
