//! Embedded chart workbook.
//!
//! This module writes the minimal xlsx package behind a chart's data and
//! defines the workbook collaborator a chart hands new data to.

use std::io::{Cursor, Write};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use super::data::{CategoryChartData, ChartData, XyChartData, column_letter};
use crate::common::xml::escape_text;
use crate::ooxml::error::Result;
use crate::ooxml::oxml::ns::NS_R;
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// Receiver of replacement workbook bytes for a chart.
pub trait ChartWorkbook {
    /// Replace the workbook with `blob`, creating it when the chart has
    /// none yet.
    fn update_from_xlsx_blob(&mut self, blob: Vec<u8>) -> Result<()>;

    /// Current workbook bytes, if any.
    fn xlsx_blob(&self) -> Option<Vec<u8>>;
}

impl<W: ChartWorkbook> ChartWorkbook for Arc<RwLock<W>> {
    fn update_from_xlsx_blob(&mut self, blob: Vec<u8>) -> Result<()> {
        self.write().update_from_xlsx_blob(blob)
    }

    fn xlsx_blob(&self) -> Option<Vec<u8>> {
        self.read().xlsx_blob()
    }
}

/// Successors of `c:externalData` inside `c:chartSpace`.
const EXTERNAL_DATA_SUCCESSORS: &[&str] = &["c:printSettings", "c:userShapes", "c:extLst"];

/// Workbook embedded in a chart part, referenced from `c:externalData`.
#[derive(Debug)]
pub struct EmbeddedWorkbook {
    chart_space: XmlElement,
    rid: String,
    blob: Option<Vec<u8>>,
}

impl EmbeddedWorkbook {
    /// Workbook of the chart rooted at `chart_space`; `rid` is the chart
    /// part's relationship id for the package, used when the reference is
    /// first added.
    pub fn new(chart_space: XmlElement, rid: impl Into<String>) -> Self {
        Self {
            chart_space,
            rid: rid.into(),
            blob: None,
        }
    }

    pub fn rid(&self) -> &str {
        &self.rid
    }
}

impl ChartWorkbook for EmbeddedWorkbook {
    fn update_from_xlsx_blob(&mut self, blob: Vec<u8>) -> Result<()> {
        if self.chart_space.find("c:externalData").is_none() {
            let external_data = ElementBuilder::new("c:externalData")
                .nsdecl("r", NS_R)
                .attr("r:id", &self.rid)
                .child(ElementBuilder::new("c:autoUpdate").attr("val", 0));
            self.chart_space
                .insert_before_any(&external_data, EXTERNAL_DATA_SUCCESSORS);
        }
        debug!(rid = %self.rid, bytes = blob.len(), "updated chart workbook");
        self.blob = Some(blob);
        Ok(())
    }

    fn xlsx_blob(&self) -> Option<Vec<u8>> {
        self.blob.clone()
    }
}

/// Write the xlsx package for `data`.
///
/// # Example Layout
/// ```text
///     |    A     |    B     |    C     |
/// ----+----------+----------+----------+
///   1 |          | Series 1 | Series 2 |
///   2 | Cat 1    |   10.0   |   15.0   |
///   3 | Cat 2    |   20.0   |   25.0   |
/// ```
pub fn write_xlsx(data: &ChartData) -> Result<Vec<u8>> {
    let sheet = match data {
        ChartData::Category(data) => category_worksheet_xml(data),
        ChartData::Xy(data) => xy_worksheet_xml(data),
    };
    let parts: [(&str, &str); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ];

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in parts {
        writer.start_file(name, options)?;
        writer.write_all(content.as_bytes())?;
    }
    Ok(writer.finish()?.into_inner())
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="Sheet1" sheetId="1" r:id="rId1"/>
</sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border/></borders>
<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
<cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
</styleSheet>"#;

/// Accumulates worksheet rows, one `<row>` per row number.
struct SheetBuilder {
    rows: Vec<Vec<String>>,
}

impl SheetBuilder {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn row_mut(&mut self, row: usize) -> &mut Vec<String> {
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        &mut self.rows[row - 1]
    }

    fn text(&mut self, col: usize, row: usize, text: &str) {
        let cell = format!(
            r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
            column_letter(col),
            row,
            escape_text(text)
        );
        self.row_mut(row).push(cell);
    }

    fn number(&mut self, col: usize, row: usize, value: f64) {
        let cell = format!(r#"<c r="{}{}"><v>{}</v></c>"#, column_letter(col), row, value);
        self.row_mut(row).push(cell);
    }

    fn finish(self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );
        xml.push_str("<sheetData>");
        for (idx, cells) in self.rows.iter().enumerate() {
            if cells.is_empty() {
                continue;
            }
            xml.push_str(&format!(r#"<row r="{}">"#, idx + 1));
            for cell in cells {
                xml.push_str(cell);
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");
        xml.push_str("</worksheet>");
        xml
    }
}

/// Worksheet for category data: categories in column A, series from
/// column B.
fn category_worksheet_xml(data: &CategoryChartData) -> String {
    let mut sheet = SheetBuilder::new();
    for (col_idx, series) in data.series.iter().enumerate() {
        sheet.text(col_idx + 1, 1, &series.name);
    }
    let row_count = data
        .series
        .iter()
        .map(|s| s.values.len())
        .max()
        .unwrap_or(0)
        .max(data.categories.len());
    for row_idx in 0..row_count {
        let row = row_idx + 2;
        if let Some(category) = data.categories.get(row_idx) {
            sheet.text(0, row, category);
        }
        for (col_idx, series) in data.series.iter().enumerate() {
            if let Some(Some(value)) = series.values.get(row_idx) {
                sheet.number(col_idx + 1, row, *value);
            }
        }
    }
    sheet.finish()
}

/// Worksheet for XY data: one column pair per series.
fn xy_worksheet_xml(data: &XyChartData) -> String {
    let mut sheet = SheetBuilder::new();
    for (idx, series) in data.series.iter().enumerate() {
        sheet.text(idx * 2 + 1, 1, &series.name);
    }
    let row_count = data.series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    for row_idx in 0..row_count {
        let row = row_idx + 2;
        for (idx, series) in data.series.iter().enumerate() {
            if let Some((x, y)) = series.points.get(row_idx) {
                sheet.number(idx * 2, row, *x);
                sheet.number(idx * 2 + 1, row, *y);
            }
        }
    }
    sheet.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    fn category_data() -> CategoryChartData {
        CategoryChartData::new()
            .with_categories(["Q1", "Q2"])
            .add_series("Sales", [100.0, 200.0])
            .add_sparse_series("Profit & Loss", vec![Some(50.0), None])
    }

    #[test]
    fn test_category_worksheet() {
        let xml = category_worksheet_xml(&category_data());
        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t>Sales</t></is></c>"#));
        assert!(xml.contains("Profit &amp; Loss"));
        assert!(xml.contains(r#"<c r="A3" t="inlineStr"><is><t>Q2</t></is></c>"#));
        assert!(xml.contains(r#"<c r="B2"><v>100</v></c>"#));
        assert!(xml.contains(r#"<c r="C2"><v>50</v></c>"#));
        assert!(!xml.contains(r#"<c r="C3">"#));
    }

    #[test]
    fn test_xy_worksheet() {
        let data = XyChartData::new().add_series("s", [(1.5, 2.0), (3.0, 4.0)]);
        let xml = xy_worksheet_xml(&data);
        assert!(xml.contains(r#"<c r="B1" t="inlineStr"><is><t>s</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A2"><v>1.5</v></c>"#));
        assert!(xml.contains(r#"<c r="B3"><v>4</v></c>"#));
    }

    #[test]
    fn test_xlsx_is_zip() {
        let bytes = write_xlsx(&ChartData::Category(category_data())).unwrap();
        assert_eq!(&bytes[0..4], &[0x50, 0x4B, 0x03, 0x04]);
        assert!(bytes.len() >= 100);
    }

    #[test]
    fn test_embedded_workbook_adds_external_data_once() {
        let doc = XmlDocument::parse(
            r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><c:chart/><c:extLst/></c:chartSpace>"#,
        )
        .unwrap();
        let mut workbook = EmbeddedWorkbook::new(doc.root(), "rId1");
        assert!(workbook.xlsx_blob().is_none());
        workbook.update_from_xlsx_blob(vec![1, 2, 3]).unwrap();
        workbook.update_from_xlsx_blob(vec![4]).unwrap();

        let tags: Vec<String> = doc.root().children().iter().map(|c| c.tag()).collect();
        assert_eq!(tags, vec!["c:chart", "c:externalData", "c:extLst"]);
        let external = doc.root().find("c:externalData").unwrap();
        assert_eq!(external.attr("r:id").as_deref(), Some("rId1"));
        assert_eq!(workbook.xlsx_blob(), Some(vec![4]));
    }

    #[test]
    fn test_shared_workbook() {
        let doc = XmlDocument::parse(
            r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart"/>"#,
        )
        .unwrap();
        let shared = Arc::new(RwLock::new(EmbeddedWorkbook::new(doc.root(), "rId2")));
        let mut handle = Arc::clone(&shared);
        handle.update_from_xlsx_blob(vec![9]).unwrap();
        assert_eq!(shared.read().xlsx_blob(), Some(vec![9]));
    }
}
