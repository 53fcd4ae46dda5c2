//! Shape collections over a `p:spTree`.
//!
//! A collection is a live view: nothing is cached, every access re-reads
//! the tree, and adding a shape is visible to the next read (including an
//! iteration already in progress).

use std::collections::HashSet;

use tracing::{debug, warn};

use super::autoshape::Autoshape;
use super::base::{BaseShape, ShapeParent, has_ph_elm};
use super::connector::{Connector, ConnectorGeometry};
use super::factory::{
    base_shape_factory, is_shape_element, layout_shape_factory, master_shape_factory,
    notes_slide_shape_factory, slide_shape_factory,
};
use super::graphfrm::GraphicFrame;
use super::picture::Picture;
use super::placeholder::{LayoutPlaceholder, PlaceholderShape};
use super::templates;
use super::Shape;
use crate::ooxml::charts::{ChartData, ChartType};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};
use crate::ooxml::pptx::autoshape_type::AutoShapeType;
use crate::ooxml::pptx::enums::{ConnectorType, PlaceholderOrientation, PlaceholderType};
use crate::ooxml::pptx::parts::{ImageSource, SlidePart};
use crate::ooxml::pptx::slide::{SlideLayout, SlideMaster};

/// New shapes go before any trailing `p:extLst`.
fn insert_shape_element(sp_tree: &XmlElement, builder: &ElementBuilder) -> XmlElement {
    sp_tree.insert_before_any(builder, &["p:extLst"])
}

/// Read access and bookkeeping shared by every shape collection.
pub trait ShapeContainer {
    /// The `p:spTree` (or `p:grpSp`) element this collection views.
    fn sp_tree(&self) -> &XmlElement;

    /// Context handed to every wrapped shape.
    fn parent(&self) -> ShapeParent;

    /// Wrap a member element for this container kind.
    fn shape_factory(&self, element: XmlElement) -> Shape;

    fn is_member_elm(&self, element: &XmlElement) -> bool {
        is_shape_element(element)
    }

    /// Base of generated placeholder names.
    fn ph_basename(&self, ph_type: PlaceholderType) -> &'static str {
        ph_type.basename()
    }

    /// Member elements in collection order.
    fn member_elements(&self) -> Vec<XmlElement> {
        self.sp_tree()
            .children()
            .into_iter()
            .filter(|e| self.is_member_elm(e))
            .collect()
    }

    fn len(&self) -> usize {
        self.member_elements().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape at position `index`.
    fn shape_at(&self, index: usize) -> Result<Shape> {
        let mut members = self.member_elements();
        let len = members.len();
        if index >= len {
            return Err(OoxmlError::IndexOutOfRange { index, len });
        }
        Ok(self.shape_factory(members.swap_remove(index)))
    }

    /// Iterate the members, observing shapes appended while iterating.
    fn iter(&self) -> ShapeIter<'_, Self> {
        ShapeIter::live(self)
    }

    /// Position of `shape` in this collection, by element identity.
    fn index_of(&self, shape: &Shape) -> Result<usize> {
        self.member_elements()
            .iter()
            .position(|e| e == shape.element())
            .ok_or(OoxmlError::ShapeNotFound)
    }

    /// One more than the largest numeric `p:cNvPr/@id` in the document.
    ///
    /// Ids that are not plain decimal digits are ignored. Returns 1 for a
    /// document without ids. When the next id would not fit in a `u32`,
    /// the lowest unused positive id is used instead.
    fn next_shape_id(&self) -> u32 {
        let ids: Vec<u64> = self
            .sp_tree()
            .root()
            .descendant_attr_values("p:cNvPr", "id")
            .iter()
            .filter(|v| !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|v| v.parse::<u64>().ok())
            .collect();
        let next = ids.iter().max().map_or(1, |max| max.saturating_add(1));
        if let Ok(id) = u32::try_from(next) {
            return id;
        }
        let used: HashSet<u64> = ids.into_iter().collect();
        let fallback = (1..=u32::MAX).find(|id| !used.contains(&u64::from(*id))).unwrap_or(1);
        warn!(fallback, "shape id space exhausted, reusing lowest free id");
        fallback
    }

    /// Name for a new placeholder: base name, `"Vertical "` prefix when
    /// vertical, and a number starting at `id - 1` that is not already
    /// used by any shape in the document.
    fn next_placeholder_name(
        &self,
        ph_type: PlaceholderType,
        id: u32,
        orient: PlaceholderOrientation,
    ) -> String {
        let basename = match orient {
            PlaceholderOrientation::Vertical => format!("Vertical {}", self.ph_basename(ph_type)),
            PlaceholderOrientation::Horizontal => self.ph_basename(ph_type).to_string(),
        };
        let names: HashSet<String> = self
            .sp_tree()
            .root()
            .descendant_attr_values("p:cNvPr", "name")
            .into_iter()
            .collect();
        let mut numpart = u64::from(id.saturating_sub(1));
        loop {
            let name = format!("{} {}", basename, numpart);
            if !names.contains(&name) {
                return name;
            }
            numpart += 1;
        }
    }

    /// Append a new placeholder with the same type, idx, orientation and
    /// size as `placeholder`.
    fn clone_placeholder(&self, placeholder: &dyn PlaceholderShape) -> Shape {
        let format = placeholder.placeholder_format();
        let id = self.next_shape_id();
        let name = self.next_placeholder_name(format.ph_type, id, format.orient);
        let sp = templates::new_placeholder_sp(id, &name, format);
        let elm = insert_shape_element(self.sp_tree(), &sp);
        debug!(id, name = %name, ph_type = ?format.ph_type, idx = format.idx, "cloned placeholder");
        self.shape_factory(elm)
    }
}

enum IterState {
    Live { pos: usize },
    Snapshot(std::vec::IntoIter<XmlElement>),
}

/// Iterator over the shapes of a collection.
///
/// Live iterators re-read the child list at each step; snapshot iterators
/// walk a member list taken when iteration started.
pub struct ShapeIter<'a, C: ShapeContainer + ?Sized> {
    container: &'a C,
    state: IterState,
}

impl<'a, C: ShapeContainer + ?Sized> ShapeIter<'a, C> {
    pub fn live(container: &'a C) -> Self {
        Self {
            container,
            state: IterState::Live { pos: 0 },
        }
    }

    pub fn snapshot(container: &'a C, members: Vec<XmlElement>) -> Self {
        Self {
            container,
            state: IterState::Snapshot(members.into_iter()),
        }
    }
}

impl<C: ShapeContainer + ?Sized> Iterator for ShapeIter<'_, C> {
    type Item = Shape;

    fn next(&mut self) -> Option<Shape> {
        match &mut self.state {
            IterState::Live { pos } => loop {
                let (index, elm) = self.container.sp_tree().element_child_from(*pos)?;
                *pos = index + 1;
                if self.container.is_member_elm(&elm) {
                    return Some(self.container.shape_factory(elm));
                }
            },
            IterState::Snapshot(members) => members
                .next()
                .map(|elm| self.container.shape_factory(elm)),
        }
    }
}

/// Operations that add new shapes to a collection.
pub trait ShapeAdder: ShapeContainer {
    /// Add an auto shape of preset `autoshape_type`.
    fn add_shape(&self, autoshape_type: AutoShapeType, x: i64, y: i64, cx: i64, cy: i64) -> Autoshape {
        let id = self.next_shape_id();
        let name = format!("{} {}", autoshape_type.basename(), id - 1);
        let sp = templates::new_autoshape_sp(id, &name, autoshape_type.prst(), x, y, cx, cy);
        let elm = insert_shape_element(self.sp_tree(), &sp);
        debug!(id, name = %name, prst = autoshape_type.prst(), "added auto shape");
        Autoshape::new(BaseShape::new(elm, self.parent()))
    }

    fn add_textbox(&self, x: i64, y: i64, cx: i64, cy: i64) -> Autoshape {
        let id = self.next_shape_id();
        let name = format!("TextBox {}", id - 1);
        let sp = templates::new_textbox_sp(id, &name, x, y, cx, cy);
        let elm = insert_shape_element(self.sp_tree(), &sp);
        debug!(id, name = %name, "added text box");
        Autoshape::new(BaseShape::new(elm, self.parent()))
    }

    /// Add a picture of `image`. Missing extents are derived from the
    /// image's native size, keeping its aspect ratio when one is given.
    #[allow(clippy::too_many_arguments)]
    fn add_picture(
        &self,
        part: &mut dyn SlidePart,
        image: ImageSource,
        x: i64,
        y: i64,
        cx: Option<i64>,
        cy: Option<i64>,
    ) -> Result<Picture> {
        let (image_part, rid) = part.get_or_add_image_part(image)?;
        let (cx, cy) = image_part.scale(cx, cy);
        let id = self.next_shape_id();
        let name = format!("Picture {}", id - 1);
        let pic = templates::new_pic(id, &name, image_part.desc(), &rid, x, y, cx, cy);
        let elm = insert_shape_element(self.sp_tree(), &pic);
        debug!(id, name = %name, rid = %rid, cx, cy, "added picture");
        Ok(Picture::new(BaseShape::new(elm, self.parent())))
    }

    /// Add an empty `rows` x `cols` table. The tree is left unchanged when
    /// either count is zero.
    fn add_table(&self, rows: u32, cols: u32, x: i64, y: i64, cx: i64, cy: i64) -> Result<GraphicFrame> {
        if rows == 0 || cols == 0 {
            return Err(OoxmlError::InvalidArgument(format!(
                "table needs at least one row and one column, got {}x{}",
                rows, cols
            )));
        }
        let id = self.next_shape_id();
        let name = format!("Table {}", id - 1);
        let frame = templates::new_table_graphic_frame(id, &name, rows, cols, x, y, cx, cy);
        let elm = insert_shape_element(self.sp_tree(), &frame);
        debug!(id, name = %name, rows, cols, "added table");
        Ok(GraphicFrame::new(BaseShape::new(elm, self.parent())))
    }

    /// Add a connector running from `(begin_x, begin_y)` to
    /// `(end_x, end_y)`.
    fn add_connector(
        &self,
        connector_type: ConnectorType,
        begin_x: i64,
        begin_y: i64,
        end_x: i64,
        end_y: i64,
    ) -> Connector {
        let elm = self.add_cxn_sp(connector_type, begin_x, begin_y, end_x, end_y);
        Connector::new(BaseShape::new(elm, self.parent()))
    }

    /// Append the `p:cxnSp` element for a connector and return it.
    fn add_cxn_sp(
        &self,
        connector_type: ConnectorType,
        begin_x: i64,
        begin_y: i64,
        end_x: i64,
        end_y: i64,
    ) -> XmlElement {
        let id = self.next_shape_id();
        let name = format!("Connector {}", id - 1);
        let geometry = ConnectorGeometry::from_endpoints(begin_x, begin_y, end_x, end_y);
        let cxn = templates::new_cxn_sp(id, &name, connector_type.prst(), geometry);
        let elm = insert_shape_element(self.sp_tree(), &cxn);
        debug!(id, name = %name, prst = connector_type.prst(), "added connector");
        elm
    }

    /// Add a chart of `chart_type` holding `data`. The chart part is
    /// created through `part`.
    #[allow(clippy::too_many_arguments)]
    fn add_chart(
        &self,
        part: &mut dyn SlidePart,
        chart_type: ChartType,
        x: i64,
        y: i64,
        cx: i64,
        cy: i64,
        data: &ChartData,
    ) -> Result<GraphicFrame> {
        let rid = part.add_chart_part(chart_type, data)?;
        Ok(self.add_chart_graphic_frame(&rid, x, y, cx, cy))
    }

    /// Add a graphic frame referencing the chart part related as `rid`.
    fn add_chart_graphic_frame(&self, rid: &str, x: i64, y: i64, cx: i64, cy: i64) -> GraphicFrame {
        let id = self.next_shape_id();
        let name = format!("Chart {}", id - 1);
        let frame = templates::new_chart_graphic_frame(id, &name, rid, x, y, cx, cy);
        let elm = insert_shape_element(self.sp_tree(), &frame);
        debug!(id, name = %name, rid = %rid, "added chart frame");
        GraphicFrame::new(BaseShape::new(elm, self.parent()))
    }
}

/// Shapes of a bare shape tree, wrapped without placeholder awareness.
#[derive(Debug, Clone)]
pub struct BaseShapes {
    sp_tree: XmlElement,
}

impl BaseShapes {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self { sp_tree }
    }
}

impl ShapeContainer for BaseShapes {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        ShapeParent::Detached
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        base_shape_factory(element, self.parent())
    }
}

impl ShapeAdder for BaseShapes {}

/// Source of the placeholders a new slide copies from its layout.
pub trait LayoutPlaceholderSource {
    fn iter_cloneable_placeholders(&self) -> Vec<LayoutPlaceholder>;
}

/// Shapes on a slide.
#[derive(Debug, Clone)]
pub struct SlideShapes {
    sp_tree: XmlElement,
    layout: Option<SlideLayout>,
}

impl SlideShapes {
    /// Shapes of `sp_tree`; placeholders inherit from `layout` when given.
    pub fn new(sp_tree: XmlElement, layout: Option<SlideLayout>) -> Self {
        Self { sp_tree, layout }
    }

    /// The title placeholder (idx 0), if the slide has one.
    pub fn title(&self) -> Option<Shape> {
        self.member_elements()
            .into_iter()
            .filter(has_ph_elm)
            .find(|e| {
                super::base::ph_element(e).is_some_and(|ph| ph.parse_attr::<u32>("idx").unwrap_or(0) == 0)
            })
            .map(|e| self.shape_factory(e))
    }

    /// Clone every placeholder `layout` marks as cloneable onto this slide.
    pub fn clone_layout_placeholders(&self, layout: &impl LayoutPlaceholderSource) {
        for placeholder in layout.iter_cloneable_placeholders() {
            self.clone_placeholder(&placeholder);
        }
    }
}

impl ShapeContainer for SlideShapes {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        ShapeParent::Slide {
            layout: self.layout.clone(),
        }
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        slide_shape_factory(element, self.parent())
    }
}

impl ShapeAdder for SlideShapes {}

/// Shapes on a slide layout.
#[derive(Debug, Clone)]
pub struct LayoutShapes {
    sp_tree: XmlElement,
    master: Option<SlideMaster>,
}

impl LayoutShapes {
    pub fn new(sp_tree: XmlElement, master: Option<SlideMaster>) -> Self {
        Self { sp_tree, master }
    }
}

impl ShapeContainer for LayoutShapes {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        ShapeParent::Layout {
            master: self.master.clone(),
        }
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        layout_shape_factory(element, self.parent())
    }
}

/// Shapes on a slide master or notes master.
#[derive(Debug, Clone)]
pub struct MasterShapes {
    sp_tree: XmlElement,
}

impl MasterShapes {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self { sp_tree }
    }
}

impl ShapeContainer for MasterShapes {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        ShapeParent::Master
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        master_shape_factory(element, self.parent())
    }
}

/// Shapes on a notes slide.
#[derive(Debug, Clone)]
pub struct NotesSlideShapes {
    sp_tree: XmlElement,
}

impl NotesSlideShapes {
    pub fn new(sp_tree: XmlElement) -> Self {
        Self { sp_tree }
    }
}

impl ShapeContainer for NotesSlideShapes {
    fn sp_tree(&self) -> &XmlElement {
        &self.sp_tree
    }

    fn parent(&self) -> ShapeParent {
        ShapeParent::NotesSlide
    }

    fn shape_factory(&self, element: XmlElement) -> Shape {
        notes_slide_shape_factory(element, self.parent())
    }

    fn ph_basename(&self, ph_type: PlaceholderType) -> &'static str {
        match ph_type {
            PlaceholderType::Body => "Notes Placeholder",
            PlaceholderType::Date => "Date Placeholder",
            PlaceholderType::Footer => "Footer Placeholder",
            PlaceholderType::Header => "Header Placeholder",
            PlaceholderType::SlideImage => "Slide Image Placeholder",
            PlaceholderType::SlideNumber => "Slide Number Placeholder",
            other => other.basename(),
        }
    }
}
