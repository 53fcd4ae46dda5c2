/// Connector shapes (`p:cxnSp`).
use super::base::BaseShape;
use crate::ooxml::pptx::enums::ConnectorType;

/// Position and extents of a connector computed from its endpoints.
///
/// The transform stores the bounding box; flips record which corner the
/// line starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorGeometry {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl ConnectorGeometry {
    /// Bounding box and flips of a connector running from
    /// `(begin_x, begin_y)` to `(end_x, end_y)`.
    pub fn from_endpoints(begin_x: i64, begin_y: i64, end_x: i64, end_y: i64) -> Self {
        Self {
            x: begin_x.min(end_x),
            y: begin_y.min(end_y),
            cx: (end_x - begin_x).abs(),
            cy: (end_y - begin_y).abs(),
            flip_h: end_x < begin_x,
            flip_v: end_y < begin_y,
        }
    }
}

/// A connector line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    base: BaseShape,
}

impl Connector {
    pub fn new(base: BaseShape) -> Self {
        Self { base }
    }

    #[inline]
    pub fn base(&self) -> &BaseShape {
        &self.base
    }

    pub fn connector_type(&self) -> Option<ConnectorType> {
        let prst = self
            .base
            .element()
            .find_path(&["p:spPr", "a:prstGeom"])?
            .attr("prst")?;
        ConnectorType::from_prst(&prst)
    }

    fn flip(&self, attr: &str) -> bool {
        self.base
            .element()
            .find_path(&["p:spPr", "a:xfrm"])
            .and_then(|x| x.attr(attr))
            .is_some_and(|v| v == "1" || v == "true")
    }

    fn geometry(&self) -> Option<ConnectorGeometry> {
        Some(ConnectorGeometry {
            x: self.base.left()?,
            y: self.base.top()?,
            cx: self.base.width()?,
            cy: self.base.height()?,
            flip_h: self.flip("flipH"),
            flip_v: self.flip("flipV"),
        })
    }

    pub fn begin_x(&self) -> Option<i64> {
        let g = self.geometry()?;
        Some(if g.flip_h { g.x + g.cx } else { g.x })
    }

    pub fn begin_y(&self) -> Option<i64> {
        let g = self.geometry()?;
        Some(if g.flip_v { g.y + g.cy } else { g.y })
    }

    pub fn end_x(&self) -> Option<i64> {
        let g = self.geometry()?;
        Some(if g.flip_h { g.x } else { g.x + g.cx })
    }

    pub fn end_y(&self) -> Option<i64> {
        let g = self.geometry()?;
        Some(if g.flip_v { g.y } else { g.y + g.cy })
    }
}
