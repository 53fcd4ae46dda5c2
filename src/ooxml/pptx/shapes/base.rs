/// Base shape wrapper shared by every shape kind.
use crate::ooxml::oxml::{ElementBuilder, XmlElement};
use crate::ooxml::pptx::enums::{
    PlaceholderFormat, PlaceholderOrientation, PlaceholderSize, PlaceholderType,
};
use crate::ooxml::pptx::slide::{SlideLayout, SlideMaster};

/// The container a shape was obtained from.
///
/// Carries the link to the container placeholders inherit from, so a
/// placeholder can resolve its base placeholder without a back-reference
/// into the part graph.
#[derive(Debug, Clone, Default)]
pub enum ShapeParent {
    /// Shape reached through a bare shape tree
    #[default]
    Detached,
    /// Shape on a slide
    Slide { layout: Option<SlideLayout> },
    /// Shape on a slide layout
    Layout { master: Option<SlideMaster> },
    /// Shape on a slide master or notes master
    Master,
    /// Shape on a notes slide
    NotesSlide,
}

/// Successors of `a:xfrm` inside `p:spPr` / `p:grpSpPr`.
const SP_PR_AFTER_XFRM: &[&str] = &[
    "a:custGeom",
    "a:prstGeom",
    "a:noFill",
    "a:solidFill",
    "a:gradFill",
    "a:blipFill",
    "a:pattFill",
    "a:grpFill",
    "a:ln",
    "a:effectLst",
    "a:effectDag",
    "a:scene3d",
    "a:sp3d",
    "a:extLst",
];

/// Base shape containing common properties.
///
/// Provides access to id, name, position, size and placeholder
/// properties common to all shapes. The wrapper is a view over the
/// element; it holds no state of its own.
///
/// # Examples
///
/// ```rust,ignore
/// let shape = slide.shapes().shape_at(0)?;
/// println!("Shape: {}", shape.base().name());
/// println!("Position: {:?}, {:?}", shape.base().left(), shape.base().top());
/// ```
#[derive(Debug, Clone)]
pub struct BaseShape {
    element: XmlElement,
    parent: ShapeParent,
}

impl PartialEq for BaseShape {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl BaseShape {
    pub fn new(element: XmlElement, parent: ShapeParent) -> Self {
        Self { element, parent }
    }

    /// The shape element (`p:sp`, `p:pic`, ...).
    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.element
    }

    #[inline]
    pub fn parent(&self) -> &ShapeParent {
        &self.parent
    }

    /// The `p:cNvPr` element of this shape.
    fn c_nv_pr(&self) -> Option<XmlElement> {
        self.element.find_path(&["*", "p:cNvPr"])
    }

    /// Shape id from `cNvPr/@id`.
    pub fn shape_id(&self) -> Option<u32> {
        self.c_nv_pr()?.parse_attr("id")
    }

    /// Shape name from `cNvPr/@name`, empty when absent.
    pub fn name(&self) -> String {
        self.c_nv_pr()
            .and_then(|c| c.attr("name"))
            .unwrap_or_default()
    }

    pub fn set_name(&self, name: &str) {
        if let Some(c) = self.c_nv_pr() {
            c.set_attr("name", name);
        }
    }

    /// True when the shape carries a `p:ph` marker.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        has_ph_elm(&self.element)
    }

    /// Placeholder key with schema defaults applied, `None` for ordinary
    /// shapes.
    pub fn placeholder_format(&self) -> Option<PlaceholderFormat> {
        ph_element(&self.element).map(|ph| placeholder_format_of(&ph))
    }

    /// The transform element holding this shape's own position and size.
    fn xfrm(&self) -> Option<XmlElement> {
        match self.element.tag().as_str() {
            "p:graphicFrame" => self.element.find("p:xfrm"),
            "p:grpSp" => self.element.find_path(&["p:grpSpPr", "a:xfrm"]),
            _ => self.element.find_path(&["p:spPr", "a:xfrm"]),
        }
    }

    fn xfrm_value(&self, child: &str, attr: &str) -> Option<i64> {
        self.xfrm()?.find(child)?.parse_attr(attr)
    }

    /// Horizontal position in EMU, `None` when the shape defines no
    /// transform of its own.
    pub fn left(&self) -> Option<i64> {
        self.xfrm_value("a:off", "x")
    }

    pub fn top(&self) -> Option<i64> {
        self.xfrm_value("a:off", "y")
    }

    pub fn width(&self) -> Option<i64> {
        self.xfrm_value("a:ext", "cx")
    }

    pub fn height(&self) -> Option<i64> {
        self.xfrm_value("a:ext", "cy")
    }

    fn get_or_add_xfrm(&self) -> XmlElement {
        match self.element.tag().as_str() {
            "p:graphicFrame" => self
                .element
                .get_or_insert("p:xfrm", &["a:graphic", "p:extLst"]),
            "p:grpSp" => self
                .element
                .get_or_insert("p:grpSpPr", &["p:sp", "p:grpSp", "p:graphicFrame", "p:cxnSp", "p:pic", "p:contentPart", "p:extLst"])
                .get_or_insert("a:xfrm", SP_PR_AFTER_XFRM),
            _ => self
                .element
                .get_or_insert("p:spPr", &["p:style", "p:txBody", "p:extLst"])
                .get_or_insert("a:xfrm", SP_PR_AFTER_XFRM),
        }
    }

    fn set_xfrm_value(&self, child: &str, attrs: [&str; 2], attr: &str, value: i64) {
        let xfrm = self.get_or_add_xfrm();
        let successors: &[&str] = if child == "a:off" {
            &["a:ext", "a:chOff", "a:chExt"]
        } else {
            &["a:chOff", "a:chExt"]
        };
        let elm = match xfrm.find(child) {
            Some(existing) => existing,
            None => xfrm.insert_before_any(
                &ElementBuilder::new(child).attr(attrs[0], 0).attr(attrs[1], 0),
                successors,
            ),
        };
        elm.set_attr(attr, value);
    }

    pub fn set_left(&self, value: i64) {
        self.set_xfrm_value("a:off", ["x", "y"], "x", value);
    }

    pub fn set_top(&self, value: i64) {
        self.set_xfrm_value("a:off", ["x", "y"], "y", value);
    }

    pub fn set_width(&self, value: i64) {
        self.set_xfrm_value("a:ext", ["cx", "cy"], "cx", value);
    }

    pub fn set_height(&self, value: i64) {
        self.set_xfrm_value("a:ext", ["cx", "cy"], "cy", value);
    }

    /// True when the shape has a `p:txBody`.
    pub fn has_text_frame(&self) -> bool {
        self.element.find("p:txBody").is_some()
    }

    /// Text of the shape's text frame: paragraphs joined by `\n`.
    pub fn text(&self) -> Option<String> {
        let tx_body = self.element.find("p:txBody")?;
        let paragraphs: Vec<String> = tx_body
            .find_all("a:p")
            .iter()
            .map(|p| {
                p.descendants()
                    .iter()
                    .filter_map(|e| match e.tag().as_str() {
                        "a:t" => Some(e.text()),
                        "a:br" => Some("\x0b".to_string()),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        Some(paragraphs.join("\n"))
    }

    /// Replace all paragraphs of the text frame with one paragraph per
    /// line of `text`. Returns `false` when the shape has no text frame.
    pub fn set_text(&self, text: &str) -> bool {
        let Some(tx_body) = self.element.find("p:txBody") else {
            return false;
        };
        tx_body.remove_all("a:p");
        for line in text.split('\n') {
            let mut p = ElementBuilder::new("a:p");
            if !line.is_empty() {
                p = p.child(ElementBuilder::new("a:r").child(ElementBuilder::new("a:t").text(line)));
            }
            tx_body.append(&p);
        }
        true
    }
}

/// The `p:ph` element of a shape: `./*[1]/p:nvPr/p:ph`.
pub(crate) fn ph_element(element: &XmlElement) -> Option<XmlElement> {
    element.find_path(&["*", "p:nvPr", "p:ph"])
}

/// True when `element` is marked as a placeholder.
#[inline]
pub(crate) fn has_ph_elm(element: &XmlElement) -> bool {
    ph_element(element).is_some()
}

/// Read the placeholder key of a `p:ph` element, applying schema defaults
/// for absent or unrecognized attribute values.
pub(crate) fn placeholder_format_of(ph: &XmlElement) -> PlaceholderFormat {
    PlaceholderFormat {
        ph_type: ph
            .attr("type")
            .and_then(|v| PlaceholderType::from_xml(&v))
            .unwrap_or_default(),
        idx: ph.parse_attr("idx").unwrap_or(0),
        orient: ph
            .attr("orient")
            .and_then(|v| PlaceholderOrientation::from_xml(&v))
            .unwrap_or_default(),
        sz: ph
            .attr("sz")
            .and_then(|v| PlaceholderSize::from_xml(&v))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    fn shape(xml: &str) -> BaseShape {
        let doc = XmlDocument::parse(xml).unwrap();
        BaseShape::new(doc.root(), ShapeParent::Detached)
    }

    #[test]
    fn test_id_name_geometry() {
        let sp = shape(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="42" name="Oval 41"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm></p:spPr></p:sp>"#,
        );
        assert_eq!(sp.shape_id(), Some(42));
        assert_eq!(sp.name(), "Oval 41");
        assert_eq!((sp.left(), sp.top(), sp.width(), sp.height()), (Some(1), Some(2), Some(3), Some(4)));
        assert!(!sp.is_placeholder());
        assert_eq!(sp.placeholder_format(), None);
    }

    #[test]
    fn test_graphic_frame_geometry() {
        let frame = shape(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="5" name="Chart 4"/></p:nvGraphicFramePr><p:xfrm><a:off x="10" y="20"/><a:ext cx="30" cy="40"/></p:xfrm></p:graphicFrame>"#,
        );
        assert_eq!(frame.left(), Some(10));
        assert_eq!(frame.height(), Some(40));
    }

    #[test]
    fn test_set_geometry_creates_xfrm() {
        let sp = shape(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="x"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:prstGeom prst="rect"/></p:spPr></p:sp>"#,
        );
        assert_eq!(sp.left(), None);
        sp.set_top(7);
        sp.set_width(9);
        assert_eq!((sp.left(), sp.top(), sp.width(), sp.height()), (Some(0), Some(7), Some(9), Some(0)));
        let sp_pr = sp.element().find("p:spPr").unwrap();
        let tags: Vec<String> = sp_pr.children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["a:xfrm", "a:prstGeom"]);
    }

    #[test]
    fn test_placeholder_format_defaults() {
        let sp = shape(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="x"/><p:cNvSpPr/><p:nvPr><p:ph idx="3" orient="vert"/></p:nvPr></p:nvSpPr></p:sp>"#,
        );
        let fmt = sp.placeholder_format().unwrap();
        assert_eq!(fmt.ph_type, PlaceholderType::Object);
        assert_eq!(fmt.idx, 3);
        assert_eq!(fmt.orient, PlaceholderOrientation::Vertical);
        assert_eq!(fmt.sz, PlaceholderSize::Full);
    }

    #[test]
    fn test_text_roundtrip() {
        let sp = shape(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="x"/></p:nvSpPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#,
        );
        assert_eq!(sp.text().as_deref(), Some(""));
        assert!(sp.set_text("first\nsecond"));
        assert_eq!(sp.text().as_deref(), Some("first\nsecond"));
    }
}
