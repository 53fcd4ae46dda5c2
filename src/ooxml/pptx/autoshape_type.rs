/// Preset geometries available to [`add_shape`](crate::ooxml::pptx::shapes::ShapeAdder::add_shape).
use serde::{Deserialize, Serialize};

macro_rules! auto_shape_types {
    ($($(#[$doc:meta])* $variant:ident => ($prst:literal, $basename:literal),)*) => {
        /// Auto shape preset (`ST_ShapeType`) together with the base name
        /// PowerPoint gives new shapes of that kind.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum AutoShapeType {
            $($(#[$doc])* $variant,)*
        }

        impl AutoShapeType {
            /// Every supported preset.
            pub const ALL: &'static [AutoShapeType] = &[$(AutoShapeType::$variant,)*];

            /// Preset geometry name used in `a:prstGeom/@prst`.
            pub const fn prst(self) -> &'static str {
                match self {
                    $(AutoShapeType::$variant => $prst,)*
                }
            }

            /// Base of the generated shape name, e.g. `"Rounded Rectangle"`.
            pub const fn basename(self) -> &'static str {
                match self {
                    $(AutoShapeType::$variant => $basename,)*
                }
            }
        }
    };
}

auto_shape_types! {
    Rectangle => ("rect", "Rectangle"),
    RoundedRectangle => ("roundRect", "Rounded Rectangle"),
    Snip1Rectangle => ("snip1Rect", "Snip Single Corner Rectangle"),
    Round2SameRectangle => ("round2SameRect", "Round Same Side Corner Rectangle"),
    Oval => ("ellipse", "Oval"),
    IsoscelesTriangle => ("triangle", "Isosceles Triangle"),
    RightTriangle => ("rtTriangle", "Right Triangle"),
    Parallelogram => ("parallelogram", "Parallelogram"),
    Trapezoid => ("trapezoid", "Trapezoid"),
    Diamond => ("diamond", "Diamond"),
    RegularPentagon => ("pentagon", "Regular Pentagon"),
    Hexagon => ("hexagon", "Hexagon"),
    Heptagon => ("heptagon", "Heptagon"),
    Octagon => ("octagon", "Octagon"),
    Decagon => ("decagon", "Decagon"),
    Dodecagon => ("dodecagon", "Dodecagon"),
    Star4Point => ("star4", "4-Point Star"),
    Star5Point => ("star5", "5-Point Star"),
    Star6Point => ("star6", "6-Point Star"),
    Star8Point => ("star8", "8-Point Star"),
    Donut => ("donut", "Donut"),
    Can => ("can", "Can"),
    Cube => ("cube", "Cube"),
    Heart => ("heart", "Heart"),
    LightningBolt => ("lightningBolt", "Lightning Bolt"),
    Sun => ("sun", "Sun"),
    Moon => ("moon", "Moon"),
    SmileyFace => ("smileyFace", "Smiley Face"),
    Cloud => ("cloud", "Cloud"),
    Arc => ("arc", "Arc"),
    FoldedCorner => ("foldedCorner", "Folded Corner"),
    Frame => ("frame", "Frame"),
    /// Block arrow shaped like a home plate
    Pentagon => ("homePlate", "Pentagon"),
    Chevron => ("chevron", "Chevron"),
    RightArrow => ("rightArrow", "Right Arrow"),
    LeftArrow => ("leftArrow", "Left Arrow"),
    UpArrow => ("upArrow", "Up Arrow"),
    DownArrow => ("downArrow", "Down Arrow"),
    LeftRightArrow => ("leftRightArrow", "Left-Right Arrow"),
    UpDownArrow => ("upDownArrow", "Up-Down Arrow"),
    NotchedRightArrow => ("notchedRightArrow", "Notched Right Arrow"),
    /// Mathematical plus sign
    MathPlus => ("mathPlus", "Plus"),
    Cross => ("plus", "Cross"),
    FlowchartProcess => ("flowChartProcess", "Flowchart: Process"),
    FlowchartDecision => ("flowChartDecision", "Flowchart: Decision"),
    FlowchartTerminator => ("flowChartTerminator", "Flowchart: Terminator"),
    FlowchartDocument => ("flowChartDocument", "Flowchart: Document"),
    RectangularCallout => ("wedgeRectCallout", "Rectangular Callout"),
    OvalCallout => ("wedgeEllipseCallout", "Oval Callout"),
}

impl AutoShapeType {
    /// Look up a preset by its `prst` token.
    pub fn from_prst(prst: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.prst() == prst)
    }
}
