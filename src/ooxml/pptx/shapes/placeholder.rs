/// Placeholder shapes and placeholder inheritance.
///
/// A placeholder on a slide inherits position and size from the layout
/// placeholder with the same `idx`; a layout placeholder inherits from the
/// master placeholder of the corresponding type.
use tracing::debug;

use super::base::{BaseShape, ShapeParent, ph_element};
use super::graphfrm::GraphicFrame;
use super::picture::Picture;
use super::templates;
use super::Shape;
use crate::ooxml::charts::{ChartData, ChartType};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlElement};
use crate::ooxml::pptx::enums::{
    PlaceholderFormat, PlaceholderOrientation, PlaceholderSize, PlaceholderType,
};
use crate::ooxml::pptx::parts::{ImageSource, SlidePart};

/// Behavior shared by every placeholder kind.
pub trait PlaceholderShape {
    fn base(&self) -> &BaseShape;

    /// The placeholder this one inherits from, if the container link is
    /// known and a match exists.
    fn base_placeholder(&self) -> Option<Placeholder>;

    fn placeholder_format(&self) -> PlaceholderFormat {
        self.base().placeholder_format().unwrap_or_default()
    }

    fn ph_type(&self) -> PlaceholderType {
        self.placeholder_format().ph_type
    }

    fn idx(&self) -> u32 {
        self.placeholder_format().idx
    }

    fn orient(&self) -> PlaceholderOrientation {
        self.placeholder_format().orient
    }

    fn sz(&self) -> PlaceholderSize {
        self.placeholder_format().sz
    }

    /// Own horizontal position, else the inherited one.
    fn left(&self) -> Option<i64> {
        self.base()
            .left()
            .or_else(|| self.base_placeholder()?.left())
    }

    fn top(&self) -> Option<i64> {
        self.base().top().or_else(|| self.base_placeholder()?.top())
    }

    fn width(&self) -> Option<i64> {
        self.base()
            .width()
            .or_else(|| self.base_placeholder()?.width())
    }

    fn height(&self) -> Option<i64> {
        self.base()
            .height()
            .or_else(|| self.base_placeholder()?.height())
    }
}

fn inherit_from_layout(base: &BaseShape) -> Option<Placeholder> {
    let ShapeParent::Slide {
        layout: Some(layout),
    } = base.parent()
    else {
        return None;
    };
    let idx = base.placeholder_format()?.idx;
    layout.placeholders().get(idx).map(Placeholder::Layout)
}

fn inherit_from_master(base: &BaseShape) -> Option<Placeholder> {
    let ShapeParent::Layout {
        master: Some(master),
    } = base.parent()
    else {
        return None;
    };
    let ph_type = base.placeholder_format()?.ph_type.master_type();
    master.placeholders().get(ph_type).map(Placeholder::Master)
}

fn no_inheritance(_: &BaseShape) -> Option<Placeholder> {
    None
}

macro_rules! placeholder_shapes {
    ($($(#[$doc:meta])* $name:ident => $inherit:path,)*) => {
        $(
            $(#[$doc])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                base: BaseShape,
            }

            impl $name {
                pub fn new(base: BaseShape) -> Self {
                    Self { base }
                }
            }

            impl PlaceholderShape for $name {
                #[inline]
                fn base(&self) -> &BaseShape {
                    &self.base
                }

                fn base_placeholder(&self) -> Option<Placeholder> {
                    $inherit(&self.base)
                }
            }
        )*
    };
}

placeholder_shapes! {
    /// Text-bearing or generic placeholder (`p:sp`) on a slide.
    SlidePlaceholder => inherit_from_layout,
    /// Chart placeholder (`p:sp`, type `chart`) on a slide.
    ChartPlaceholder => inherit_from_layout,
    /// Picture or clip-art placeholder (`p:sp`) on a slide.
    PicturePlaceholder => inherit_from_layout,
    /// Table placeholder (`p:sp`, type `tbl`) on a slide.
    TablePlaceholder => inherit_from_layout,
    /// Graphic frame that has filled a placeholder on a slide.
    PlaceholderGraphicFrame => inherit_from_layout,
    /// Picture that has filled a placeholder on a slide.
    PlaceholderPicture => inherit_from_layout,
    /// Placeholder on a slide layout.
    LayoutPlaceholder => inherit_from_master,
    /// Placeholder on a slide master or notes master.
    MasterPlaceholder => no_inheritance,
    /// Placeholder on a notes slide.
    NotesSlidePlaceholder => no_inheritance,
}

/// Any placeholder, tagged by its context-specific kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Slide(SlidePlaceholder),
    Chart(ChartPlaceholder),
    Picture(PicturePlaceholder),
    Table(TablePlaceholder),
    GraphicFrame(PlaceholderGraphicFrame),
    PlaceholderPicture(PlaceholderPicture),
    Layout(LayoutPlaceholder),
    Master(MasterPlaceholder),
    NotesSlide(NotesSlidePlaceholder),
}

impl Placeholder {
    fn inner(&self) -> &dyn PlaceholderShape {
        match self {
            Placeholder::Slide(p) => p,
            Placeholder::Chart(p) => p,
            Placeholder::Picture(p) => p,
            Placeholder::Table(p) => p,
            Placeholder::GraphicFrame(p) => p,
            Placeholder::PlaceholderPicture(p) => p,
            Placeholder::Layout(p) => p,
            Placeholder::Master(p) => p,
            Placeholder::NotesSlide(p) => p,
        }
    }
}

impl PlaceholderShape for Placeholder {
    fn base(&self) -> &BaseShape {
        self.inner().base()
    }

    fn base_placeholder(&self) -> Option<Placeholder> {
        self.inner().base_placeholder()
    }
}

/// Crop fractions `(l, t, r, b)` that make an image of `image_size` fill a
/// frame of `view_size` without distortion.
pub(crate) fn fill_cropping(image_size: (f64, f64), view_size: (f64, f64)) -> (f64, f64, f64, f64) {
    let (iw, ih) = image_size;
    let (vw, vh) = view_size;
    if iw <= 0.0 || ih <= 0.0 || vw <= 0.0 || vh <= 0.0 {
        return (0.0, 0.0, 0.0, 0.0);
    }
    let ar_image = iw / ih;
    let ar_view = vw / vh;
    if ar_view < ar_image {
        // image too wide, trim the sides
        let crop = (1.0 - ar_view / ar_image) / 2.0;
        (crop, 0.0, crop, 0.0)
    } else if ar_view > ar_image {
        let crop = (1.0 - ar_image / ar_view) / 2.0;
        (0.0, crop, 0.0, crop)
    } else {
        (0.0, 0.0, 0.0, 0.0)
    }
}

/// Copy of the `p:ph` marker of `base`, carried onto the replacing shape.
fn ph_builder(base: &BaseShape) -> Result<ElementBuilder> {
    ph_element(base.element())
        .map(|ph| ph.to_builder())
        .ok_or_else(|| OoxmlError::InvalidFormat("placeholder has no p:ph element".to_string()))
}

/// Put `replacement` where `base` is and drop `base` from the tree.
fn replace_with(base: &BaseShape, replacement: &ElementBuilder) -> Result<XmlElement> {
    let new_elm = base.element().add_next_sibling(replacement)?;
    base.element().remove();
    Ok(new_elm)
}

impl PicturePlaceholder {
    /// Replace this placeholder with a picture of `image`, cropped to fill
    /// the placeholder's inherited extents.
    pub fn insert_picture(
        &self,
        part: &mut dyn SlidePart,
        image: impl Into<ImageSource>,
    ) -> Result<PlaceholderPicture> {
        let (image_part, rid) = part.get_or_add_image_part(image.into())?;
        let crop = match (self.width(), self.height()) {
            (Some(w), Some(h)) => {
                let (px_w, px_h) = image_part.px_size();
                fill_cropping((px_w as f64, px_h as f64), (w as f64, h as f64))
            },
            _ => (0.0, 0.0, 0.0, 0.0),
        };
        let pic = templates::new_ph_pic(
            self.base.shape_id().unwrap_or_default(),
            &self.base.name(),
            image_part.desc(),
            &rid,
            ph_builder(&self.base)?,
            crop,
        );
        let elm = replace_with(&self.base, &pic)?;
        debug!(rid = %rid, name = %self.base.name(), "filled picture placeholder");
        Ok(PlaceholderPicture::new(BaseShape::new(elm, self.base.parent().clone())))
    }
}

impl ChartPlaceholder {
    /// Replace this placeholder with a new chart of `chart_type` holding
    /// `data`, at the placeholder's inherited position and size.
    pub fn insert_chart(
        &self,
        part: &mut dyn SlidePart,
        chart_type: ChartType,
        data: &ChartData,
    ) -> Result<PlaceholderGraphicFrame> {
        let rid = part.add_chart_part(chart_type, data)?;
        let frame = templates::new_ph_chart_graphic_frame(
            self.base.shape_id().unwrap_or_default(),
            &self.base.name(),
            ph_builder(&self.base)?,
            &rid,
            self.left().unwrap_or(0),
            self.top().unwrap_or(0),
            self.width().unwrap_or(0),
            self.height().unwrap_or(0),
        );
        let elm = replace_with(&self.base, &frame)?;
        debug!(rid = %rid, ?chart_type, "filled chart placeholder");
        Ok(PlaceholderGraphicFrame::new(BaseShape::new(elm, self.base.parent().clone())))
    }
}

impl TablePlaceholder {
    /// Replace this placeholder with an empty `rows` x `cols` table sized
    /// to the placeholder.
    pub fn insert_table(&self, rows: u32, cols: u32) -> Result<PlaceholderGraphicFrame> {
        if rows == 0 || cols == 0 {
            return Err(OoxmlError::InvalidArgument(format!(
                "table needs at least one row and one column, got {}x{}",
                rows, cols
            )));
        }
        let frame = templates::new_ph_table_graphic_frame(
            self.base.shape_id().unwrap_or_default(),
            &self.base.name(),
            ph_builder(&self.base)?,
            rows,
            cols,
            self.left().unwrap_or(0),
            self.top().unwrap_or(0),
            self.width().unwrap_or(0),
            self.height().unwrap_or(0),
        );
        let elm = replace_with(&self.base, &frame)?;
        Ok(PlaceholderGraphicFrame::new(BaseShape::new(elm, self.base.parent().clone())))
    }
}

impl PlaceholderGraphicFrame {
    /// Graphic-frame view of this placeholder.
    pub fn graphic_frame(&self) -> GraphicFrame {
        GraphicFrame::new(self.base.clone())
    }
}

impl PlaceholderPicture {
    /// Picture view of this placeholder.
    pub fn picture(&self) -> Picture {
        Picture::new(self.base.clone())
    }
}

impl From<Placeholder> for Shape {
    fn from(placeholder: Placeholder) -> Self {
        Shape::Placeholder(placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_cropping() {
        assert_eq!(fill_cropping((200.0, 100.0), (100.0, 100.0)), (0.25, 0.0, 0.25, 0.0));
        assert_eq!(fill_cropping((100.0, 200.0), (100.0, 100.0)), (0.0, 0.25, 0.0, 0.25));
        assert_eq!(fill_cropping((50.0, 50.0), (100.0, 100.0)), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(fill_cropping((0.0, 50.0), (100.0, 100.0)), (0.0, 0.0, 0.0, 0.0));
    }
}
