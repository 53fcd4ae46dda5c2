/// Auto shapes and text boxes (`p:sp`).
use super::base::BaseShape;
use crate::ooxml::pptx::autoshape_type::AutoShapeType;

/// A shape defined by preset or custom geometry, including text boxes.
#[derive(Debug, Clone, PartialEq)]
pub struct Autoshape {
    base: BaseShape,
}

impl Autoshape {
    pub fn new(base: BaseShape) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &BaseShape {
        &self.base
    }

    /// Preset geometry token from `p:spPr/a:prstGeom/@prst`.
    pub fn prst(&self) -> Option<String> {
        self.base
            .element()
            .find_path(&["p:spPr", "a:prstGeom"])?
            .attr("prst")
    }

    /// The preset as an [`AutoShapeType`], `None` for custom geometry or
    /// presets outside the supported table.
    pub fn auto_shape_type(&self) -> Option<AutoShapeType> {
        AutoShapeType::from_prst(&self.prst()?)
    }

    /// True for text boxes (`p:cNvSpPr/@txBox="1"`).
    pub fn is_textbox(&self) -> bool {
        self.base
            .element()
            .find_path(&["p:nvSpPr", "p:cNvSpPr"])
            .and_then(|e| e.attr("txBox"))
            .is_some_and(|v| v == "1" || v == "true")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;
    use crate::ooxml::pptx::shapes::ShapeParent;

    #[test]
    fn test_preset_and_textbox_flag() {
        let doc = XmlDocument::parse(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="TextBox 1"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:prstGeom prst="roundRect"/></p:spPr></p:sp>"#,
        )
        .unwrap();
        let shape = Autoshape::new(BaseShape::new(doc.root(), ShapeParent::Detached));
        assert_eq!(shape.auto_shape_type(), Some(AutoShapeType::RoundedRectangle));
        assert!(shape.is_textbox());
    }
}
