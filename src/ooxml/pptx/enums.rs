/// Enumerations for placeholders and connectors.
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// Placeholder type (`ST_PlaceholderType`).
///
/// The XML default when `p:ph/@type` is absent is [`PlaceholderType::Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaceholderType {
    /// Title placeholder
    #[serde(rename = "title")]
    Title,
    /// Body text placeholder
    #[serde(rename = "body")]
    Body,
    /// Centered title placeholder
    #[serde(rename = "ctrTitle")]
    CenterTitle,
    /// Subtitle placeholder
    #[serde(rename = "subTitle")]
    Subtitle,
    /// Date and time placeholder
    #[serde(rename = "dt")]
    Date,
    /// Slide number placeholder
    #[serde(rename = "sldNum")]
    SlideNumber,
    /// Footer placeholder
    #[serde(rename = "ftr")]
    Footer,
    /// Header placeholder
    #[serde(rename = "hdr")]
    Header,
    /// Content (object) placeholder
    #[default]
    #[serde(rename = "obj")]
    Object,
    /// Chart placeholder
    #[serde(rename = "chart")]
    Chart,
    /// Table placeholder
    #[serde(rename = "tbl")]
    Table,
    /// Clip art placeholder
    #[serde(rename = "clipArt")]
    ClipArt,
    /// SmartArt diagram placeholder
    #[serde(rename = "dgm")]
    Diagram,
    /// Media clip placeholder
    #[serde(rename = "media")]
    Media,
    /// Slide image placeholder (notes pages)
    #[serde(rename = "sldImg")]
    SlideImage,
    /// Picture placeholder
    #[serde(rename = "pic")]
    Picture,
}

static PLACEHOLDER_TYPES: phf::Map<&'static str, PlaceholderType> = phf_map! {
    "title" => PlaceholderType::Title,
    "body" => PlaceholderType::Body,
    "ctrTitle" => PlaceholderType::CenterTitle,
    "subTitle" => PlaceholderType::Subtitle,
    "dt" => PlaceholderType::Date,
    "sldNum" => PlaceholderType::SlideNumber,
    "ftr" => PlaceholderType::Footer,
    "hdr" => PlaceholderType::Header,
    "obj" => PlaceholderType::Object,
    "chart" => PlaceholderType::Chart,
    "tbl" => PlaceholderType::Table,
    "clipArt" => PlaceholderType::ClipArt,
    "dgm" => PlaceholderType::Diagram,
    "media" => PlaceholderType::Media,
    "sldImg" => PlaceholderType::SlideImage,
    "pic" => PlaceholderType::Picture,
};

impl PlaceholderType {
    /// Token used in `p:ph/@type`.
    pub const fn xml_value(self) -> &'static str {
        match self {
            PlaceholderType::Title => "title",
            PlaceholderType::Body => "body",
            PlaceholderType::CenterTitle => "ctrTitle",
            PlaceholderType::Subtitle => "subTitle",
            PlaceholderType::Date => "dt",
            PlaceholderType::SlideNumber => "sldNum",
            PlaceholderType::Footer => "ftr",
            PlaceholderType::Header => "hdr",
            PlaceholderType::Object => "obj",
            PlaceholderType::Chart => "chart",
            PlaceholderType::Table => "tbl",
            PlaceholderType::ClipArt => "clipArt",
            PlaceholderType::Diagram => "dgm",
            PlaceholderType::Media => "media",
            PlaceholderType::SlideImage => "sldImg",
            PlaceholderType::Picture => "pic",
        }
    }

    /// Parse a `p:ph/@type` token.
    #[inline]
    pub fn from_xml(value: &str) -> Option<Self> {
        PLACEHOLDER_TYPES.get(value).copied()
    }

    /// Base of the generated `cNvPr/@name` of a placeholder of this type.
    pub const fn basename(self) -> &'static str {
        match self {
            PlaceholderType::Body => "Text Placeholder",
            PlaceholderType::Chart => "Chart Placeholder",
            PlaceholderType::ClipArt => "ClipArt Placeholder",
            PlaceholderType::CenterTitle => "Title",
            PlaceholderType::Diagram => "SmartArt Placeholder",
            PlaceholderType::Date => "Date Placeholder",
            PlaceholderType::Footer => "Footer Placeholder",
            PlaceholderType::Header => "Header Placeholder",
            PlaceholderType::Media => "Media Placeholder",
            PlaceholderType::Object => "Content Placeholder",
            PlaceholderType::Picture => "Picture Placeholder",
            PlaceholderType::SlideImage => "Slide Image Placeholder",
            PlaceholderType::SlideNumber => "Slide Number Placeholder",
            PlaceholderType::Subtitle => "Subtitle",
            PlaceholderType::Table => "Table Placeholder",
            PlaceholderType::Title => "Title",
        }
    }

    /// Placeholders of these types get an empty text body when cloned.
    pub const fn has_text_frame(self) -> bool {
        matches!(
            self,
            PlaceholderType::Title
                | PlaceholderType::CenterTitle
                | PlaceholderType::Subtitle
                | PlaceholderType::Body
                | PlaceholderType::Object
        )
    }

    /// Type of the master placeholder a layout placeholder of this type
    /// inherits from.
    pub const fn master_type(self) -> PlaceholderType {
        match self {
            PlaceholderType::Title | PlaceholderType::CenterTitle => PlaceholderType::Title,
            PlaceholderType::Date => PlaceholderType::Date,
            PlaceholderType::Footer => PlaceholderType::Footer,
            PlaceholderType::SlideNumber => PlaceholderType::SlideNumber,
            _ => PlaceholderType::Body,
        }
    }
}

/// Placeholder orientation (`ST_Direction`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaceholderOrientation {
    #[default]
    #[serde(rename = "horz")]
    Horizontal,
    #[serde(rename = "vert")]
    Vertical,
}

impl PlaceholderOrientation {
    pub const fn xml_value(self) -> &'static str {
        match self {
            PlaceholderOrientation::Horizontal => "horz",
            PlaceholderOrientation::Vertical => "vert",
        }
    }

    pub fn from_xml(value: &str) -> Option<Self> {
        match value {
            "horz" => Some(PlaceholderOrientation::Horizontal),
            "vert" => Some(PlaceholderOrientation::Vertical),
            _ => None,
        }
    }
}

/// Placeholder size (`ST_PlaceholderSize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlaceholderSize {
    #[default]
    #[serde(rename = "full")]
    Full,
    #[serde(rename = "half")]
    Half,
    #[serde(rename = "quarter")]
    Quarter,
}

impl PlaceholderSize {
    pub const fn xml_value(self) -> &'static str {
        match self {
            PlaceholderSize::Full => "full",
            PlaceholderSize::Half => "half",
            PlaceholderSize::Quarter => "quarter",
        }
    }

    pub fn from_xml(value: &str) -> Option<Self> {
        match value {
            "full" => Some(PlaceholderSize::Full),
            "half" => Some(PlaceholderSize::Half),
            "quarter" => Some(PlaceholderSize::Quarter),
            _ => None,
        }
    }
}

/// Connector geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorType {
    /// Straight line
    #[serde(rename = "line")]
    Straight,
    /// Elbow connector with one bend pair
    #[serde(rename = "bentConnector3")]
    Elbow,
    /// Curved connector
    #[serde(rename = "curvedConnector3")]
    Curve,
}

impl ConnectorType {
    /// Preset geometry name used in `a:prstGeom/@prst`.
    pub const fn prst(self) -> &'static str {
        match self {
            ConnectorType::Straight => "line",
            ConnectorType::Elbow => "bentConnector3",
            ConnectorType::Curve => "curvedConnector3",
        }
    }

    pub fn from_prst(prst: &str) -> Option<Self> {
        match prst {
            "line" | "straightConnector1" => Some(ConnectorType::Straight),
            "bentConnector3" => Some(ConnectorType::Elbow),
            "curvedConnector3" => Some(ConnectorType::Curve),
            _ => None,
        }
    }
}

/// Key attributes of a `p:ph` element with schema defaults applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlaceholderFormat {
    pub ph_type: PlaceholderType,
    pub idx: u32,
    pub orient: PlaceholderOrientation,
    pub sz: PlaceholderSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_type_tokens() {
        for token in ["title", "ctrTitle", "sldNum", "clipArt", "sldImg", "pic", "obj"] {
            let ph_type = PlaceholderType::from_xml(token).unwrap();
            assert_eq!(ph_type.xml_value(), token);
        }
        assert_eq!(PlaceholderType::from_xml("vertTitle"), None);
        assert_eq!(PlaceholderType::default(), PlaceholderType::Object);
    }

    #[test]
    fn test_master_type_mapping() {
        assert_eq!(PlaceholderType::CenterTitle.master_type(), PlaceholderType::Title);
        assert_eq!(PlaceholderType::Footer.master_type(), PlaceholderType::Footer);
        assert_eq!(PlaceholderType::Object.master_type(), PlaceholderType::Body);
        assert_eq!(PlaceholderType::Picture.master_type(), PlaceholderType::Body);
    }

    #[test]
    fn test_text_bearing_types() {
        assert!(PlaceholderType::Subtitle.has_text_frame());
        assert!(!PlaceholderType::Table.has_text_frame());
        assert!(!PlaceholderType::Date.has_text_frame());
    }

    #[test]
    fn test_connector_prst() {
        assert_eq!(ConnectorType::Elbow.prst(), "bentConnector3");
        assert_eq!(ConnectorType::from_prst("curvedConnector3"), Some(ConnectorType::Curve));
        assert_eq!(ConnectorType::from_prst("rect"), None);
    }
}
