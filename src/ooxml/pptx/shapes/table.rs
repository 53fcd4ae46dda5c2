/// Table shape implementation for PowerPoint presentations.
use crate::ooxml::oxml::{ElementBuilder, XmlElement};

/// A table (`a:tbl`) hosted by a graphic frame.
///
/// # Examples
///
/// ```rust,ignore
/// if let Some(table) = frame.table() {
///     table.cell(0, 0).unwrap().set_text("Region");
///     println!("{} x {}", table.row_count(), table.column_count());
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    tbl: XmlElement,
}

impl Table {
    pub fn new(tbl: XmlElement) -> Self {
        Self { tbl }
    }

    #[inline]
    pub fn element(&self) -> &XmlElement {
        &self.tbl
    }

    pub fn row_count(&self) -> usize {
        self.tbl.find_all("a:tr").len()
    }

    pub fn column_count(&self) -> usize {
        self.tbl
            .find("a:tblGrid")
            .map_or(0, |grid| grid.find_all("a:gridCol").len())
    }

    /// Column widths from `a:gridCol/@w`.
    pub fn column_widths(&self) -> Vec<i64> {
        self.tbl
            .find("a:tblGrid")
            .map(|grid| {
                grid.find_all("a:gridCol")
                    .iter()
                    .map(|col| col.parse_attr("w").unwrap_or(0))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Row heights from `a:tr/@h`.
    pub fn row_heights(&self) -> Vec<i64> {
        self.tbl
            .find_all("a:tr")
            .iter()
            .map(|tr| tr.parse_attr("h").unwrap_or(0))
            .collect()
    }

    fn tbl_pr_flag(&self, name: &str) -> bool {
        self.tbl
            .find("a:tblPr")
            .and_then(|pr| pr.attr(name))
            .is_some_and(|v| v == "1" || v == "true")
    }

    /// Header row formatting flag (`tblPr/@firstRow`).
    pub fn first_row(&self) -> bool {
        self.tbl_pr_flag("firstRow")
    }

    /// Banded rows formatting flag (`tblPr/@bandRow`).
    pub fn horz_banding(&self) -> bool {
        self.tbl_pr_flag("bandRow")
    }

    /// Style id from `tblPr/a:tableStyleId`.
    pub fn style_id(&self) -> Option<String> {
        Some(self.tbl.find_path(&["a:tblPr", "a:tableStyleId"])?.text())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<TableCell> {
        let tr = self.tbl.find_all("a:tr").into_iter().nth(row)?;
        let tc = tr.find_all("a:tc").into_iter().nth(col)?;
        Some(TableCell { tc })
    }
}

/// One `a:tc` cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    tc: XmlElement,
}

impl TableCell {
    pub fn text(&self) -> String {
        let Some(tx_body) = self.tc.find("a:txBody") else {
            return String::new();
        };
        tx_body
            .find_all("a:p")
            .iter()
            .map(|p| {
                p.descendants_with_tag("a:t")
                    .iter()
                    .map(|t| t.text())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace the cell text with a single run.
    pub fn set_text(&self, text: &str) {
        let tx_body = self.tc.get_or_insert("a:txBody", &["a:tcPr", "a:extLst"]);
        tx_body.remove_all("a:p");
        tx_body.append(
            &ElementBuilder::new("a:p")
                .child(ElementBuilder::new("a:r").child(ElementBuilder::new("a:t").text(text))),
        );
    }
}
