//! Placeholder collections: the placeholder-marked members of a shape tree.

use super::base::{ShapeParent, has_ph_elm, ph_element, placeholder_format_of};
use super::factory::{
    base_shape_factory, layout_shape_factory, master_shape_factory, notes_slide_shape_factory,
    slide_placeholder_factory,
};
use super::placeholder::{LayoutPlaceholder, MasterPlaceholder, Placeholder};
use super::shapetree::{ShapeContainer, ShapeIter};
use super::Shape;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::XmlElement;
use crate::ooxml::pptx::enums::PlaceholderType;
use crate::ooxml::pptx::slide::{SlideLayout, SlideMaster};

/// Key of the `p:ph` marker of a member element.
fn member_idx(element: &XmlElement) -> u32 {
    ph_element(element).map_or(0, |ph| placeholder_format_of(&ph).idx)
}

macro_rules! placeholder_container {
    ($name:ident, $factory:path) => {
        impl ShapeContainer for $name {
            fn sp_tree(&self) -> &XmlElement {
                &self.sp_tree
            }

            fn parent(&self) -> ShapeParent {
                self.parent.clone()
            }

            fn shape_factory(&self, element: XmlElement) -> Shape {
                $factory(element, self.parent())
            }

            fn is_member_elm(&self, element: &XmlElement) -> bool {
                has_ph_elm(element)
            }
        }
    };
}

/// Placeholders of a bare shape tree.
#[derive(Debug, Clone)]
pub struct BasePlaceholders {
    sp_tree: XmlElement,
    parent: ShapeParent,
}

impl BasePlaceholders {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self {
            sp_tree,
            parent: ShapeParent::Detached,
        }
    }
}

placeholder_container!(BasePlaceholders, base_shape_factory);

/// Placeholders on a slide, ordered by `idx`.
#[derive(Debug, Clone)]
pub struct SlidePlaceholders {
    sp_tree: XmlElement,
    parent: ShapeParent,
}

impl SlidePlaceholders {
    pub fn new(sp_tree: XmlElement, layout: Option<SlideLayout>) -> Self {
        Self {
            sp_tree,
            parent: ShapeParent::Slide { layout },
        }
    }

    /// The placeholder whose `idx` is `idx`.
    pub fn get(&self, idx: u32) -> Result<Shape> {
        self.member_elements()
            .into_iter()
            .find(|e| member_idx(e) == idx)
            .map(|e| self.shape_factory(e))
            .ok_or(OoxmlError::PlaceholderNotFound(idx))
    }
}

impl ShapeContainer for SlidePlaceholders {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        self.parent.clone()
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        slide_placeholder_factory(element, self.parent())
    }

    fn is_member_elm(&self, element: &XmlElement) -> bool {
        has_ph_elm(element)
    }

    /// Members sorted by ascending `idx`; ties keep document order.
    fn member_elements(&self) -> Vec<XmlElement> {
        let mut members: Vec<XmlElement> = self
            .sp_tree
            .children()
            .into_iter()
            .filter(has_ph_elm)
            .collect();
        members.sort_by_key(member_idx);
        members
    }

    fn iter(&self) -> ShapeIter<'_, Self> {
        ShapeIter::snapshot(self, self.member_elements())
    }
}

/// Placeholders on a slide layout.
#[derive(Debug, Clone)]
pub struct LayoutPlaceholders {
    sp_tree: XmlElement,
    parent: ShapeParent,
}

impl LayoutPlaceholders {
    pub fn new(sp_tree: XmlElement, master: Option<SlideMaster>) -> Self {
        Self {
            sp_tree,
            parent: ShapeParent::Layout { master },
        }
    }

    /// First placeholder with `idx`, in document order.
    pub fn get(&self, idx: u32) -> Option<LayoutPlaceholder> {
        self.member_elements()
            .into_iter()
            .find(|e| member_idx(e) == idx)
            .and_then(|e| match self.shape_factory(e) {
                Shape::Placeholder(Placeholder::Layout(p)) => Some(p),
                _ => None,
            })
    }
}

placeholder_container!(LayoutPlaceholders, layout_shape_factory);

/// Placeholders on a slide master or notes master.
#[derive(Debug, Clone)]
pub struct MasterPlaceholders {
    sp_tree: XmlElement,
    parent: ShapeParent,
}

impl MasterPlaceholders {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self {
            sp_tree,
            parent: ShapeParent::Master,
        }
    }

    /// First placeholder of `ph_type`, in document order.
    pub fn get(&self, ph_type: PlaceholderType) -> Option<MasterPlaceholder> {
        self.member_elements()
            .into_iter()
            .find(|e| ph_element(e).is_some_and(|ph| placeholder_format_of(&ph).ph_type == ph_type))
            .and_then(|e| match self.shape_factory(e) {
                Shape::Placeholder(Placeholder::Master(p)) => Some(p),
                _ => None,
            })
    }
}

placeholder_container!(MasterPlaceholders, master_shape_factory);

/// Placeholders on a notes slide.
#[derive(Debug, Clone)]
pub struct NotesSlidePlaceholders {
    sp_tree: XmlElement,
    parent: ShapeParent,
}

impl NotesSlidePlaceholders {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self {
            sp_tree,
            parent: ShapeParent::NotesSlide,
        }
    }
}

placeholder_container!(NotesSlidePlaceholders, notes_slide_shape_factory);
