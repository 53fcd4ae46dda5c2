//! In-memory slide part.
//!
//! [`MemorySlidePart`] keeps the parts related to one slide in memory:
//! image parts, de-duplicated by SHA-256, and chart parts with their
//! embedded workbooks. It allocates relationship ids and records each
//! relationship so a package writer can emit them.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::image::{ImagePart, ImageSource};
use super::{RT_CHART, RT_IMAGE, SlidePart};
use crate::ooxml::charts::workbook::ChartWorkbook;
use crate::ooxml::charts::{Chart, ChartData, ChartType, EmbeddedWorkbook, writer};
use crate::ooxml::error::Result;
use crate::ooxml::oxml::{XmlDocument, XmlElement};

/// Chart parts relate to their embedded workbook with this id.
const WORKBOOK_RID: &str = "rId1";

/// One relationship from the slide to a related part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub rid: String,
    pub reltype: &'static str,
    /// Target part name, relative to the slide part.
    pub target: String,
}

#[derive(Debug)]
struct ChartPartEntry {
    rid: String,
    chart_space: XmlElement,
    workbook: Arc<RwLock<EmbeddedWorkbook>>,
}

/// Related parts of a single slide, held in memory.
#[derive(Debug)]
pub struct MemorySlidePart {
    first_rel_id: u32,
    relationships: Vec<Relationship>,
    images: Vec<(ImagePart, String)>,
    charts: Vec<ChartPartEntry>,
}

impl Default for MemorySlidePart {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySlidePart {
    /// Relationship ids start at `rId2`; `rId1` is the slide layout.
    pub fn new() -> Self {
        Self::with_first_rel_id(2)
    }

    /// Start allocating relationship ids at `rId{first}`.
    pub fn with_first_rel_id(first: u32) -> Self {
        Self {
            first_rel_id: first.max(1),
            relationships: Vec::new(),
            images: Vec::new(),
            charts: Vec::new(),
        }
    }

    fn add_relationship(&mut self, reltype: &'static str, target: String) -> String {
        let rid = format!("rId{}", self.first_rel_id as usize + self.relationships.len());
        self.relationships.push(Relationship {
            rid: rid.clone(),
            reltype,
            target,
        });
        rid
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Image parts with their relationship ids, in the order added.
    pub fn image_parts(&self) -> impl Iterator<Item = (&ImagePart, &str)> {
        self.images.iter().map(|(part, rid)| (part, rid.as_str()))
    }

    pub fn image_part(&self, rid: &str) -> Option<&ImagePart> {
        self.images
            .iter()
            .find(|(_, r)| r == rid)
            .map(|(part, _)| part)
    }

    /// The chart related as `rid`, wired to its embedded workbook.
    pub fn chart(&self, rid: &str) -> Option<Chart> {
        self.charts.iter().find(|c| c.rid == rid).map(|entry| {
            Chart::new(entry.chart_space.clone()).with_workbook(Box::new(entry.workbook.clone()))
        })
    }

    /// Bytes of the workbook embedded in the chart related as `rid`.
    pub fn chart_workbook_blob(&self, rid: &str) -> Option<Vec<u8>> {
        self.charts
            .iter()
            .find(|c| c.rid == rid)
            .and_then(|entry| entry.workbook.xlsx_blob())
    }
}

impl SlidePart for MemorySlidePart {
    fn get_or_add_image_part(&mut self, image: ImageSource) -> Result<(ImagePart, String)> {
        let part = ImagePart::from_source(image)?;
        if let Some((existing, rid)) = self.images.iter().find(|(p, _)| p.sha256() == part.sha256()) {
            debug!(rid = %rid, "reused image part");
            return Ok((existing.clone(), rid.clone()));
        }
        let target = format!("../media/image{}.{}", self.images.len() + 1, part.extension());
        let rid = self.add_relationship(RT_IMAGE, target);
        debug!(rid = %rid, desc = part.desc(), bytes = part.blob().len(), "added image part");
        self.images.push((part.clone(), rid.clone()));
        Ok((part, rid))
    }

    fn add_chart_part(&mut self, chart_type: ChartType, data: &ChartData) -> Result<String> {
        let xml = writer::chart_xml(chart_type, data)?;
        let chart_space = XmlDocument::parse(&xml)?.root();
        let mut workbook = EmbeddedWorkbook::new(chart_space.clone(), WORKBOOK_RID);
        workbook.update_from_xlsx_blob(data.xlsx_blob()?)?;

        let target = format!("../charts/chart{}.xml", self.charts.len() + 1);
        let rid = self.add_relationship(RT_CHART, target);
        debug!(rid = %rid, %chart_type, series = data.len(), "added chart part");
        self.charts.push(ChartPartEntry {
            rid: rid.clone(),
            chart_space,
            workbook: Arc::new(RwLock::new(workbook)),
        });
        Ok(rid)
    }
}
