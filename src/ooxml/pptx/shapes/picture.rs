/// Picture shapes (`p:pic`).
use super::base::BaseShape;

/// A picture shape.
///
/// The image bytes live in an image part referenced by `a:blip/@r:embed`.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    base: BaseShape,
}

impl Picture {
    pub fn new(base: BaseShape) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &BaseShape {
        &self.base
    }

    /// Relationship id of the image part.
    pub fn image_rid(&self) -> Option<String> {
        self.base
            .element()
            .find_path(&["p:blipFill", "a:blip"])?
            .attr("r:embed")
    }

    /// Alternative text from `cNvPr/@descr`.
    pub fn description(&self) -> Option<String> {
        self.base
            .element()
            .find_path(&["p:nvPicPr", "p:cNvPr"])?
            .attr("descr")
    }

    /// Crop fractions `(left, top, right, bottom)` from `a:srcRect`.
    pub fn crop(&self) -> (f64, f64, f64, f64) {
        let Some(src_rect) = self.base.element().find_path(&["p:blipFill", "a:srcRect"]) else {
            return (0.0, 0.0, 0.0, 0.0);
        };
        let side = |attr: &str| src_rect.parse_attr::<i64>(attr).unwrap_or(0) as f64 / 100_000.0;
        (side("l"), side("t"), side("r"), side("b"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;
    use crate::ooxml::pptx::shapes::ShapeParent;

    #[test]
    fn test_picture_properties() {
        let doc = XmlDocument::parse(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="3" name="Picture 2" descr="logo.png"/></p:nvPicPr><p:blipFill><a:blip r:embed="rId4"/><a:srcRect l="25000" r="25000"/></p:blipFill></p:pic>"#,
        )
        .unwrap();
        let pic = Picture::new(BaseShape::new(doc.root(), ShapeParent::Detached));
        assert_eq!(pic.image_rid().as_deref(), Some("rId4"));
        assert_eq!(pic.description().as_deref(), Some("logo.png"));
        assert_eq!(pic.crop(), (0.25, 0.0, 0.25, 0.0));
    }
}
