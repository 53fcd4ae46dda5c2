//! Element templates for newly added shapes.
//!
//! Every function returns a complete fragment; callers graft it into the
//! shape tree in one step.

use crate::ooxml::oxml::ns::{NS_C, NS_R, URI_CHART, URI_TABLE};
use crate::ooxml::oxml::ElementBuilder;
use crate::ooxml::pptx::enums::{
    PlaceholderFormat, PlaceholderOrientation, PlaceholderSize, PlaceholderType,
};

use super::connector::ConnectorGeometry;

/// Style applied to new tables (Medium Style 2 - Accent 1).
pub const DEFAULT_TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

fn el(tag: &str) -> ElementBuilder {
    ElementBuilder::new(tag)
}

fn c_nv_pr(id: u32, name: &str) -> ElementBuilder {
    el("p:cNvPr").attr("id", id).attr("name", name)
}

fn xfrm(tag: &str, x: i64, y: i64, cx: i64, cy: i64) -> ElementBuilder {
    el(tag)
        .child(el("a:off").attr("x", x).attr("y", y))
        .child(el("a:ext").attr("cx", cx).attr("cy", cy))
}

fn prst_geom(prst: &str) -> ElementBuilder {
    el("a:prstGeom").attr("prst", prst).child(el("a:avLst"))
}

fn scheme_ref(tag: &str, idx: &str, color: &str) -> ElementBuilder {
    el(tag)
        .attr("idx", idx)
        .child(el("a:schemeClr").attr("val", color))
}

fn empty_tx_body() -> ElementBuilder {
    el("p:txBody")
        .child(el("a:bodyPr"))
        .child(el("a:lstStyle"))
        .child(el("a:p"))
}

/// `p:sp` for an auto shape with the default theme style.
pub fn new_autoshape_sp(
    id: u32,
    name: &str,
    prst: &str,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    el("p:sp")
        .nsdecls(&["p", "a"])
        .child(
            el("p:nvSpPr")
                .child(c_nv_pr(id, name))
                .child(el("p:cNvSpPr"))
                .child(el("p:nvPr")),
        )
        .child(
            el("p:spPr")
                .child(xfrm("a:xfrm", x, y, cx, cy))
                .child(prst_geom(prst)),
        )
        .child(
            el("p:style")
                .child(scheme_ref("a:lnRef", "1", "accent1"))
                .child(scheme_ref("a:fillRef", "3", "accent1"))
                .child(scheme_ref("a:effectRef", "2", "accent1"))
                .child(scheme_ref("a:fontRef", "minor", "lt1")),
        )
        .child(
            el("p:txBody")
                .child(el("a:bodyPr").attr("rtlCol", 0).attr("anchor", "ctr"))
                .child(el("a:lstStyle"))
                .child(el("a:p").child(el("a:pPr").attr("algn", "ctr"))),
        )
}

/// `p:sp` for a text box: no fill, no wrap, shape resized to fit text.
pub fn new_textbox_sp(id: u32, name: &str, x: i64, y: i64, cx: i64, cy: i64) -> ElementBuilder {
    el("p:sp")
        .nsdecls(&["p", "a"])
        .child(
            el("p:nvSpPr")
                .child(c_nv_pr(id, name))
                .child(el("p:cNvSpPr").attr("txBox", 1))
                .child(el("p:nvPr")),
        )
        .child(
            el("p:spPr")
                .child(xfrm("a:xfrm", x, y, cx, cy))
                .child(prst_geom("rect"))
                .child(el("a:noFill")),
        )
        .child(
            el("p:txBody")
                .child(
                    el("a:bodyPr")
                        .attr("wrap", "none")
                        .child(el("a:spAutoFit")),
                )
                .child(el("a:lstStyle"))
                .child(el("a:p")),
        )
}

/// `p:pic` referencing image relationship `rid`.
#[allow(clippy::too_many_arguments)]
pub fn new_pic(
    id: u32,
    name: &str,
    desc: &str,
    rid: &str,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    el("p:pic")
        .nsdecls(&["p", "a", "r"])
        .child(
            el("p:nvPicPr")
                .child(c_nv_pr(id, name).attr("descr", desc))
                .child(el("p:cNvPicPr").child(el("a:picLocks").attr("noChangeAspect", 1)))
                .child(el("p:nvPr")),
        )
        .child(
            el("p:blipFill")
                .child(el("a:blip").attr("r:embed", rid))
                .child(el("a:stretch").child(el("a:fillRect"))),
        )
        .child(
            el("p:spPr")
                .child(xfrm("a:xfrm", x, y, cx, cy))
                .child(prst_geom("rect")),
        )
}

/// `p:pic` filling a picture placeholder. `ph` is the placeholder marker
/// carried over from the replaced shape; `crop` is `(l, t, r, b)` in
/// fractions of the image.
pub fn new_ph_pic(
    id: u32,
    name: &str,
    desc: &str,
    rid: &str,
    ph: ElementBuilder,
    crop: (f64, f64, f64, f64),
) -> ElementBuilder {
    let pct = |v: f64| (v != 0.0).then(|| (v * 100_000.0).round() as i64);
    el("p:pic")
        .nsdecls(&["p", "a", "r"])
        .child(
            el("p:nvPicPr")
                .child(c_nv_pr(id, name).attr("descr", desc))
                .child(
                    el("p:cNvPicPr").child(
                        el("a:picLocks")
                            .attr("noGrp", 1)
                            .attr("noChangeAspect", 1),
                    ),
                )
                .child(el("p:nvPr").child(ph)),
        )
        .child(
            el("p:blipFill")
                .child(el("a:blip").attr("r:embed", rid))
                .child(
                    el("a:srcRect")
                        .opt_attr("l", pct(crop.0))
                        .opt_attr("t", pct(crop.1))
                        .opt_attr("r", pct(crop.2))
                        .opt_attr("b", pct(crop.3)),
                )
                .child(el("a:stretch").child(el("a:fillRect"))),
        )
        .child(el("p:spPr"))
}

/// `a:tbl` with `rows` x `cols` empty cells spread evenly over
/// `cx` x `cy`.
pub fn new_tbl(rows: u32, cols: u32, cx: i64, cy: i64) -> ElementBuilder {
    let col_width = cx / i64::from(cols.max(1));
    let row_height = cy / i64::from(rows.max(1));

    let grid = el("a:tblGrid").children((0..cols).map(|_| el("a:gridCol").attr("w", col_width)));
    let tr = |_: u32| {
        el("a:tr").attr("h", row_height).children((0..cols).map(|_| {
            el("a:tc")
                .child(
                    el("a:txBody")
                        .child(el("a:bodyPr"))
                        .child(el("a:lstStyle"))
                        .child(el("a:p")),
                )
                .child(el("a:tcPr"))
        }))
    };

    el("a:tbl")
        .child(
            el("a:tblPr")
                .attr("firstRow", 1)
                .attr("bandRow", 1)
                .child(el("a:tableStyleId").text(DEFAULT_TABLE_STYLE_ID)),
        )
        .child(grid)
        .children((0..rows).map(tr))
}

#[allow(clippy::too_many_arguments)]
fn graphic_frame(
    id: u32,
    name: &str,
    ph: Option<ElementBuilder>,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
    uri: &str,
    payload: ElementBuilder,
) -> ElementBuilder {
    let mut nv_pr = el("p:nvPr");
    if let Some(ph) = ph {
        nv_pr = nv_pr.child(ph);
    }
    el("p:graphicFrame")
        .nsdecls(&["p", "a"])
        .child(
            el("p:nvGraphicFramePr")
                .child(c_nv_pr(id, name))
                .child(
                    el("p:cNvGraphicFramePr")
                        .child(el("a:graphicFrameLocks").attr("noGrp", 1)),
                )
                .child(nv_pr),
        )
        .child(xfrm("p:xfrm", x, y, cx, cy))
        .child(
            el("a:graphic").child(
                el("a:graphicData")
                    .attr("uri", uri)
                    .child(payload),
            ),
        )
}

/// `p:graphicFrame` hosting a new table.
#[allow(clippy::too_many_arguments)]
pub fn new_table_graphic_frame(
    id: u32,
    name: &str,
    rows: u32,
    cols: u32,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    graphic_frame(id, name, None, x, y, cx, cy, URI_TABLE, new_tbl(rows, cols, cx, cy))
}

fn chart_ref(rid: &str) -> ElementBuilder {
    el("c:chart")
        .nsdecl("c", NS_C)
        .nsdecl("r", NS_R)
        .attr("r:id", rid)
}

/// `p:graphicFrame` referencing chart relationship `rid`.
pub fn new_chart_graphic_frame(
    id: u32,
    name: &str,
    rid: &str,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    graphic_frame(id, name, None, x, y, cx, cy, URI_CHART, chart_ref(rid))
}

/// Chart frame replacing a chart placeholder; `ph` is carried over.
#[allow(clippy::too_many_arguments)]
pub fn new_ph_chart_graphic_frame(
    id: u32,
    name: &str,
    ph: ElementBuilder,
    rid: &str,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    graphic_frame(id, name, Some(ph), x, y, cx, cy, URI_CHART, chart_ref(rid))
}

/// Table frame replacing a table placeholder; `ph` is carried over.
#[allow(clippy::too_many_arguments)]
pub fn new_ph_table_graphic_frame(
    id: u32,
    name: &str,
    ph: ElementBuilder,
    rows: u32,
    cols: u32,
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
) -> ElementBuilder {
    graphic_frame(id, name, Some(ph), x, y, cx, cy, URI_TABLE, new_tbl(rows, cols, cx, cy))
}

/// `p:cxnSp` with its bounding box and flips already computed.
pub fn new_cxn_sp(id: u32, name: &str, prst: &str, geometry: ConnectorGeometry) -> ElementBuilder {
    let flip = |on: bool| on.then_some(1);
    el("p:cxnSp")
        .nsdecls(&["p", "a"])
        .child(
            el("p:nvCxnSpPr")
                .child(c_nv_pr(id, name))
                .child(el("p:cNvCxnSpPr"))
                .child(el("p:nvPr")),
        )
        .child(
            el("p:spPr")
                .child(
                    xfrm("a:xfrm", geometry.x, geometry.y, geometry.cx, geometry.cy)
                        .opt_attr("flipH", flip(geometry.flip_h))
                        .opt_attr("flipV", flip(geometry.flip_v)),
                )
                .child(prst_geom(prst)),
        )
        .child(
            el("p:style")
                .child(scheme_ref("a:lnRef", "2", "accent1"))
                .child(scheme_ref("a:fillRef", "0", "accent1"))
                .child(scheme_ref("a:effectRef", "1", "accent1"))
                .child(scheme_ref("a:fontRef", "minor", "tx1")),
        )
}

/// `p:ph` marker; attributes equal to their schema default are omitted.
pub fn new_ph(format: PlaceholderFormat) -> ElementBuilder {
    el("p:ph")
        .opt_attr(
            "type",
            (format.ph_type != PlaceholderType::Object).then(|| format.ph_type.xml_value()),
        )
        .opt_attr(
            "orient",
            (format.orient != PlaceholderOrientation::Horizontal)
                .then(|| format.orient.xml_value()),
        )
        .opt_attr(
            "sz",
            (format.sz != PlaceholderSize::Full).then(|| format.sz.xml_value()),
        )
        .opt_attr("idx", (format.idx != 0).then_some(format.idx))
}

/// `p:sp` placeholder cloned from a layout or master placeholder.
pub fn new_placeholder_sp(id: u32, name: &str, format: PlaceholderFormat) -> ElementBuilder {
    let sp = el("p:sp")
        .nsdecls(&["p", "a"])
        .child(
            el("p:nvSpPr")
                .child(c_nv_pr(id, name))
                .child(el("p:cNvSpPr").child(el("a:spLocks").attr("noGrp", 1)))
                .child(el("p:nvPr").child(new_ph(format))),
        )
        .child(el("p:spPr"));
    if format.ph_type.has_text_frame() {
        sp.child(empty_tx_body())
    } else {
        sp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::oxml::XmlDocument;

    const NSDECLS: &str = r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#;

    fn assert_matches(builder: &ElementBuilder, expected: &str) {
        let actual = XmlDocument::from_builder(builder);
        let expected = XmlDocument::parse(expected).unwrap();
        assert!(
            actual.root().structurally_eq(&expected.root()),
            "\nactual:   {}\nexpected: {}",
            actual.root().xml(),
            expected.root().xml()
        );
    }

    #[test]
    fn test_new_autoshape_sp() {
        assert_matches(
            &new_autoshape_sp(2, "Rounded Rectangle 1", "roundRect", 1, 2, 3, 4),
            &format!(
                r#"<p:sp {NSDECLS}><p:nvSpPr><p:cNvPr id="2" name="Rounded Rectangle 1"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm><a:prstGeom prst="roundRect"><a:avLst/></a:prstGeom></p:spPr><p:style><a:lnRef idx="1"><a:schemeClr val="accent1"/></a:lnRef><a:fillRef idx="3"><a:schemeClr val="accent1"/></a:fillRef><a:effectRef idx="2"><a:schemeClr val="accent1"/></a:effectRef><a:fontRef idx="minor"><a:schemeClr val="lt1"/></a:fontRef></p:style><p:txBody><a:bodyPr rtlCol="0" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/></a:p></p:txBody></p:sp>"#
            ),
        );
    }

    #[test]
    fn test_new_textbox_sp() {
        assert_matches(
            &new_textbox_sp(9, "TextBox 8", 1, 2, 3, 4),
            &format!(
                r#"<p:sp {NSDECLS}><p:nvSpPr><p:cNvPr id="9" name="TextBox 8"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="1" y="2"/><a:ext cx="3" cy="4"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="none"><a:spAutoFit/></a:bodyPr><a:lstStyle/><a:p/></p:txBody></p:sp>"#
            ),
        );
    }

    #[test]
    fn test_new_table_graphic_frame() {
        assert_matches(
            &new_table_graphic_frame(3, "Table 2", 1, 2, 10, 20, 300, 40),
            &format!(
                r#"<p:graphicFrame {NSDECLS}><p:nvGraphicFramePr><p:cNvPr id="3" name="Table 2"/><p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/></p:nvGraphicFramePr><p:xfrm><a:off x="10" y="20"/><a:ext cx="300" cy="40"/></p:xfrm><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}</a:tableStyleId></a:tblPr><a:tblGrid><a:gridCol w="150"/><a:gridCol w="150"/></a:tblGrid><a:tr h="40"><a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p/></a:txBody><a:tcPr/></a:tc><a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p/></a:txBody><a:tcPr/></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#
            ),
        );
    }

    #[test]
    fn test_new_cxn_sp_flips() {
        let g = ConnectorGeometry::from_endpoints(9, 8, 2, 3);
        assert_matches(
            &new_cxn_sp(4, "Connector 3", "bentConnector3", g),
            &format!(
                r#"<p:cxnSp {NSDECLS}><p:nvCxnSpPr><p:cNvPr id="4" name="Connector 3"/><p:cNvCxnSpPr/><p:nvPr/></p:nvCxnSpPr><p:spPr><a:xfrm flipH="1" flipV="1"><a:off x="2" y="3"/><a:ext cx="7" cy="5"/></a:xfrm><a:prstGeom prst="bentConnector3"><a:avLst/></a:prstGeom></p:spPr><p:style><a:lnRef idx="2"><a:schemeClr val="accent1"/></a:lnRef><a:fillRef idx="0"><a:schemeClr val="accent1"/></a:fillRef><a:effectRef idx="1"><a:schemeClr val="accent1"/></a:effectRef><a:fontRef idx="minor"><a:schemeClr val="tx1"/></a:fontRef></p:style></p:cxnSp>"#
            ),
        );
    }

    #[test]
    fn test_new_placeholder_sp_variants() {
        let vert_chart = PlaceholderFormat {
            ph_type: PlaceholderType::Chart,
            idx: 1,
            orient: PlaceholderOrientation::Vertical,
            sz: PlaceholderSize::Half,
        };
        assert_matches(
            &new_placeholder_sp(2, "Vertical Chart Placeholder 1", vert_chart),
            &format!(
                r#"<p:sp {NSDECLS}><p:nvSpPr><p:cNvPr id="2" name="Vertical Chart Placeholder 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="chart" orient="vert" sz="half" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#
            ),
        );

        let title = PlaceholderFormat {
            ph_type: PlaceholderType::Title,
            ..Default::default()
        };
        assert_matches(
            &new_placeholder_sp(2, "Title 1", title),
            &format!(
                r#"<p:sp {NSDECLS}><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#
            ),
        );

        let obj = PlaceholderFormat::default();
        let sp = new_placeholder_sp(3, "Content Placeholder 2", obj);
        let ph = XmlDocument::from_builder(&sp)
            .root()
            .find_path(&["p:nvSpPr", "p:nvPr", "p:ph"])
            .unwrap();
        assert!(!ph.xml().contains("type="));
    }

    #[test]
    fn test_new_ph_pic_crop() {
        let pic = new_ph_pic(5, "Picture 4", "a.png", "rId2", el("p:ph").attr("type", "pic"), (0.25, 0.0, 0.25, 0.0));
        let doc = XmlDocument::from_builder(&pic);
        let src = doc.root().find_path(&["p:blipFill", "a:srcRect"]).unwrap();
        assert_eq!(src.attr("l").as_deref(), Some("25000"));
        assert_eq!(src.attr("t"), None);
        assert_eq!(src.attr("r").as_deref(), Some("25000"));
    }
}
