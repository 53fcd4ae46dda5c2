//! Chart XML writer.
//!
//! Builds the `c:chartSpace` part of a new chart from a chart type and its
//! data, and the series reference fragments that are reused when the data
//! of an existing chart is replaced.

use super::data::{CategoryChartData, CategorySeriesData, ChartData, XyChartData, XySeriesData};
use super::types::{BarDirection, ChartType, Grouping, PlotKind};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::oxml::{ElementBuilder, XmlDocument};

#[inline]
fn val(tag: &str, value: impl ToString) -> ElementBuilder {
    ElementBuilder::new(tag).attr("val", value)
}

fn point(idx: usize, value: impl Into<String>) -> ElementBuilder {
    ElementBuilder::new("c:pt")
        .attr("idx", idx)
        .child(ElementBuilder::new("c:v").text(value))
}

/// `tag` holding a `c:strRef` to `formula` with its string cache.
pub(crate) fn str_ref(tag: &str, formula: &str, values: &[&str]) -> ElementBuilder {
    let cache = ElementBuilder::new("c:strCache")
        .child(val("c:ptCount", values.len()))
        .children(values.iter().enumerate().map(|(i, v)| point(i, *v)));
    ElementBuilder::new(tag).child(
        ElementBuilder::new("c:strRef")
            .child(ElementBuilder::new("c:f").text(formula))
            .child(cache),
    )
}

/// `tag` holding a `c:numRef` to `formula` with its number cache. Blank
/// values are counted but get no `c:pt`.
pub(crate) fn num_ref(
    tag: &str,
    formula: &str,
    format_code: &str,
    values: &[Option<f64>],
) -> ElementBuilder {
    let cache = ElementBuilder::new("c:numCache")
        .child(ElementBuilder::new("c:formatCode").text(format_code))
        .child(val("c:ptCount", values.len()))
        .children(
            values
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.map(|v| point(i, v.to_string()))),
        );
    ElementBuilder::new(tag).child(
        ElementBuilder::new("c:numRef")
            .child(ElementBuilder::new("c:f").text(formula))
            .child(cache),
    )
}

/// `c:tx`, `c:cat` and `c:val` of series `index`. `c:cat` is omitted when
/// the data has no categories.
pub(crate) fn category_series_refs(
    data: &CategoryChartData,
    index: usize,
    series: &CategorySeriesData,
) -> (ElementBuilder, Option<ElementBuilder>, ElementBuilder) {
    let tx = str_ref("c:tx", &data.series_name_ref(index), &[series.name.as_str()]);
    let cat = (!data.categories.is_empty()).then(|| {
        let labels: Vec<&str> = data.categories.iter().map(String::as_str).collect();
        str_ref("c:cat", &data.categories_ref(), &labels)
    });
    let values = num_ref(
        "c:val",
        &data.values_ref(index),
        &data.number_format,
        &series.values,
    );
    (tx, cat, values)
}

/// `c:tx`, `c:xVal` and `c:yVal` of series `index`.
pub(crate) fn xy_series_refs(
    data: &XyChartData,
    index: usize,
    series: &XySeriesData,
) -> (ElementBuilder, ElementBuilder, ElementBuilder) {
    let tx = str_ref("c:tx", &data.series_name_ref(index), &[series.name.as_str()]);
    let xs: Vec<Option<f64>> = series.points.iter().map(|(x, _)| Some(*x)).collect();
    let ys: Vec<Option<f64>> = series.points.iter().map(|(_, y)| Some(*y)).collect();
    let x_val = num_ref("c:xVal", &data.x_values_ref(index), &data.number_format, &xs);
    let y_val = num_ref("c:yVal", &data.y_values_ref(index), &data.number_format, &ys);
    (tx, x_val, y_val)
}

fn ser(index: usize) -> ElementBuilder {
    ElementBuilder::new("c:ser")
        .child(val("c:idx", index))
        .child(val("c:order", index))
}

fn no_marker() -> ElementBuilder {
    ElementBuilder::new("c:marker").child(val("c:symbol", "none"))
}

/// Category series with `before` placed between `c:tx` and `c:cat` and
/// `after` following `c:val`.
fn category_sers(
    data: &CategoryChartData,
    before: impl Fn() -> Vec<ElementBuilder>,
    after: impl Fn() -> Vec<ElementBuilder>,
) -> Vec<ElementBuilder> {
    data.series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let (tx, cat, values) = category_series_refs(data, i, series);
            ser(i)
                .child(tx)
                .children(before())
                .children(cat)
                .child(values)
                .children(after())
        })
        .collect()
}

fn ax_ids() -> [ElementBuilder; 2] {
    [val("c:axId", 1), val("c:axId", 2)]
}

fn bar_chart(chart_type: ChartType, data: &CategoryChartData) -> ElementBuilder {
    use ChartType::*;
    let direction = match chart_type {
        BarClustered | BarStacked | BarStacked100 => BarDirection::Bar,
        _ => BarDirection::Column,
    };
    let grouping = match chart_type {
        BarStacked | ColumnStacked => Grouping::Stacked,
        BarStacked100 | ColumnStacked100 => Grouping::PercentStacked,
        _ => Grouping::Clustered,
    };
    let overlap = (grouping != Grouping::Clustered).then(|| val("c:overlap", 100));
    ElementBuilder::new("c:barChart")
        .child(val("c:barDir", direction.xml_value()))
        .child(val("c:grouping", grouping.xml_value()))
        .child(val("c:varyColors", 0))
        .children(category_sers(
            data,
            || vec![val("c:invertIfNegative", 0)],
            Vec::new,
        ))
        .child(val("c:gapWidth", 150))
        .children(overlap)
        .children(ax_ids())
}

fn line_chart(chart_type: ChartType, data: &CategoryChartData) -> ElementBuilder {
    use ChartType::*;
    let grouping = match chart_type {
        LineStacked | LineMarkersStacked => Grouping::Stacked,
        LineStacked100 | LineMarkersStacked100 => Grouping::PercentStacked,
        _ => Grouping::Standard,
    };
    let markers = matches!(
        chart_type,
        LineMarkers | LineMarkersStacked | LineMarkersStacked100
    );
    ElementBuilder::new("c:lineChart")
        .child(val("c:grouping", grouping.xml_value()))
        .child(val("c:varyColors", 0))
        .children(category_sers(
            data,
            || if markers { Vec::new() } else { vec![no_marker()] },
            || vec![val("c:smooth", 0)],
        ))
        .child(val("c:marker", 1))
        .children(ax_ids())
}

fn area_chart(chart_type: ChartType, data: &CategoryChartData) -> ElementBuilder {
    let grouping = match chart_type {
        ChartType::AreaStacked => Grouping::Stacked,
        ChartType::AreaStacked100 => Grouping::PercentStacked,
        _ => Grouping::Standard,
    };
    ElementBuilder::new("c:areaChart")
        .child(val("c:grouping", grouping.xml_value()))
        .child(val("c:varyColors", 0))
        .children(category_sers(data, Vec::new, Vec::new))
        .children(ax_ids())
}

fn pie_chart(chart_type: ChartType, data: &CategoryChartData) -> ElementBuilder {
    let exploded = matches!(chart_type, ChartType::PieExploded | ChartType::DoughnutExploded);
    let doughnut = chart_type.plot_kind() == PlotKind::Doughnut;
    let tag = if doughnut { "c:doughnutChart" } else { "c:pieChart" };
    ElementBuilder::new(tag)
        .child(val("c:varyColors", 1))
        .children(category_sers(
            data,
            || if exploded { vec![val("c:explosion", 25)] } else { Vec::new() },
            Vec::new,
        ))
        .child(val("c:firstSliceAng", 0))
        .children(doughnut.then(|| val("c:holeSize", 50)))
}

fn radar_chart(chart_type: ChartType, data: &CategoryChartData) -> ElementBuilder {
    let style = if chart_type == ChartType::RadarFilled { "filled" } else { "marker" };
    let markers = chart_type != ChartType::Radar;
    ElementBuilder::new("c:radarChart")
        .child(val("c:radarStyle", style))
        .child(val("c:varyColors", 0))
        .children(category_sers(
            data,
            || if markers { Vec::new() } else { vec![no_marker()] },
            Vec::new,
        ))
        .children(ax_ids())
}

fn scatter_chart(chart_type: ChartType, data: &XyChartData) -> ElementBuilder {
    use ChartType::*;
    let style = match chart_type {
        XyScatterSmooth | XyScatterSmoothNoMarkers => "smoothMarker",
        _ => "lineMarker",
    };
    let no_line = chart_type == XyScatter;
    let no_markers = matches!(chart_type, XyScatterLinesNoMarkers | XyScatterSmoothNoMarkers);
    let smooth = u8::from(style == "smoothMarker");
    let sers = data.series.iter().enumerate().map(|(i, series)| {
        let (tx, x_val, y_val) = xy_series_refs(data, i, series);
        let sp_pr = no_line.then(|| {
            ElementBuilder::new("c:spPr").child(
                ElementBuilder::new("a:ln")
                    .attr("w", 47625)
                    .child(ElementBuilder::new("a:noFill")),
            )
        });
        ser(i)
            .child(tx)
            .children(sp_pr)
            .children(no_markers.then(no_marker))
            .child(x_val)
            .child(y_val)
            .child(val("c:smooth", smooth))
    });
    ElementBuilder::new("c:scatterChart")
        .child(val("c:scatterStyle", style))
        .child(val("c:varyColors", 0))
        .children(sers)
        .children(ax_ids())
}

fn cat_ax(position: &str) -> ElementBuilder {
    ElementBuilder::new("c:catAx")
        .child(val("c:axId", 1))
        .child(ElementBuilder::new("c:scaling").child(val("c:orientation", "minMax")))
        .child(val("c:delete", 0))
        .child(val("c:axPos", position))
        .child(val("c:majorTickMark", "out"))
        .child(val("c:minorTickMark", "none"))
        .child(val("c:tickLblPos", "nextTo"))
        .child(val("c:crossAx", 2))
        .child(val("c:crosses", "autoZero"))
        .child(val("c:auto", 1))
        .child(val("c:lblAlgn", "ctr"))
        .child(val("c:lblOffset", 100))
        .child(val("c:noMultiLvlLbl", 0))
}

fn val_ax(id: u32, cross: u32, position: &str, gridlines: bool) -> ElementBuilder {
    ElementBuilder::new("c:valAx")
        .child(val("c:axId", id))
        .child(ElementBuilder::new("c:scaling").child(val("c:orientation", "minMax")))
        .child(val("c:delete", 0))
        .child(val("c:axPos", position))
        .children(gridlines.then(|| ElementBuilder::new("c:majorGridlines")))
        .child(
            ElementBuilder::new("c:numFmt")
                .attr("formatCode", "General")
                .attr("sourceLinked", 1),
        )
        .child(val("c:majorTickMark", "out"))
        .child(val("c:minorTickMark", "none"))
        .child(val("c:tickLblPos", "nextTo"))
        .child(val("c:crossAx", cross))
        .child(val("c:crosses", "autoZero"))
        .child(val("c:crossBetween", "between"))
}

fn axes(chart_type: ChartType) -> Vec<ElementBuilder> {
    match chart_type.plot_kind() {
        PlotKind::Pie | PlotKind::Doughnut => Vec::new(),
        PlotKind::Scatter => vec![val_ax(1, 2, "b", false), val_ax(2, 1, "l", true)],
        _ => {
            let horizontal = matches!(
                chart_type,
                ChartType::BarClustered | ChartType::BarStacked | ChartType::BarStacked100
            );
            let (cat_pos, val_pos) = if horizontal { ("l", "b") } else { ("b", "l") };
            vec![cat_ax(cat_pos), val_ax(2, 1, val_pos, true)]
        }
    }
}

fn plot_element(chart_type: ChartType, data: &ChartData) -> Result<ElementBuilder> {
    let kind = chart_type.plot_kind();
    match (kind, data) {
        (PlotKind::Bubble, _) => Err(OoxmlError::Unsupported(format!(
            "writing {} charts",
            chart_type
        ))),
        (PlotKind::Scatter, ChartData::Xy(data)) => Ok(scatter_chart(chart_type, data)),
        (PlotKind::Scatter, ChartData::Category(_)) => Err(OoxmlError::InvalidArgument(format!(
            "{} chart needs XY chart data",
            chart_type
        ))),
        (_, ChartData::Xy(_)) => Err(OoxmlError::InvalidArgument(format!(
            "{} chart needs category chart data",
            chart_type
        ))),
        (PlotKind::Bar, ChartData::Category(data)) => Ok(bar_chart(chart_type, data)),
        (PlotKind::Line, ChartData::Category(data)) => Ok(line_chart(chart_type, data)),
        (PlotKind::Area, ChartData::Category(data)) => Ok(area_chart(chart_type, data)),
        (PlotKind::Pie | PlotKind::Doughnut, ChartData::Category(data)) => {
            Ok(pie_chart(chart_type, data))
        }
        (PlotKind::Radar, ChartData::Category(data)) => Ok(radar_chart(chart_type, data)),
        (other, _) => Err(OoxmlError::Unsupported(format!("writing {}", other.tag()))),
    }
}

/// `c:chartSpace` element of a new chart of `chart_type` showing `data`.
pub fn chart_space_builder(chart_type: ChartType, data: &ChartData) -> Result<ElementBuilder> {
    let plot = plot_element(chart_type, data)?;
    let legend = matches!(chart_type.plot_kind(), PlotKind::Pie | PlotKind::Doughnut).then(|| {
        ElementBuilder::new("c:legend")
            .child(val("c:legendPos", "r"))
            .child(ElementBuilder::new("c:layout"))
            .child(val("c:overlay", 0))
    });
    let chart = ElementBuilder::new("c:chart")
        .child(val("c:autoTitleDeleted", 0))
        .child(
            ElementBuilder::new("c:plotArea")
                .child(ElementBuilder::new("c:layout"))
                .child(plot)
                .children(axes(chart_type)),
        )
        .children(legend)
        .child(val("c:plotVisOnly", 1))
        .child(val("c:dispBlanksAs", "gap"));
    Ok(ElementBuilder::new("c:chartSpace")
        .nsdecls(&["c", "a", "r"])
        .child(val("c:date1904", 0))
        .child(val("c:roundedCorners", 0))
        .child(chart))
}

/// Serialized chart part, XML declaration included.
pub fn chart_xml(chart_type: ChartType, data: &ChartData) -> Result<String> {
    let chart_space = chart_space_builder(chart_type, data)?;
    Ok(XmlDocument::from_builder(&chart_space).to_xml())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::plot::Plots;
    use crate::ooxml::oxml::XmlElement;

    const CATEGORY_TYPES: [ChartType; 22] = [
        ChartType::Area,
        ChartType::AreaStacked,
        ChartType::AreaStacked100,
        ChartType::BarClustered,
        ChartType::BarStacked,
        ChartType::BarStacked100,
        ChartType::ColumnClustered,
        ChartType::ColumnStacked,
        ChartType::ColumnStacked100,
        ChartType::Doughnut,
        ChartType::DoughnutExploded,
        ChartType::Line,
        ChartType::LineMarkers,
        ChartType::LineMarkersStacked,
        ChartType::LineMarkersStacked100,
        ChartType::LineStacked,
        ChartType::LineStacked100,
        ChartType::Pie,
        ChartType::PieExploded,
        ChartType::Radar,
        ChartType::RadarFilled,
        ChartType::RadarMarkers,
    ];

    const XY_TYPES: [ChartType; 5] = [
        ChartType::XyScatter,
        ChartType::XyScatterLines,
        ChartType::XyScatterLinesNoMarkers,
        ChartType::XyScatterSmooth,
        ChartType::XyScatterSmoothNoMarkers,
    ];

    fn category_data() -> ChartData {
        CategoryChartData::new()
            .with_categories(["East", "West"])
            .add_series("Q1", [1.0, 2.5])
            .add_series("Q2", [3.0, 4.0])
            .into()
    }

    fn xy_data() -> ChartData {
        XyChartData::new()
            .add_series("s", [(0.5, 1.0), (2.0, 3.0)])
            .into()
    }

    fn written(chart_type: ChartType, data: &ChartData) -> XmlElement {
        let xml = chart_xml(chart_type, data).unwrap();
        XmlDocument::parse(&xml).unwrap().root()
    }

    fn plot_area(chart_space: &XmlElement) -> XmlElement {
        chart_space.find_path(&["c:chart", "c:plotArea"]).unwrap()
    }

    #[test]
    fn test_written_charts_report_their_type() {
        for chart_type in CATEGORY_TYPES {
            let chart_space = written(chart_type, &category_data());
            let plots = Plots::new(Some(plot_area(&chart_space)));
            assert_eq!(plots.get(0).unwrap().chart_type().unwrap(), chart_type);
        }
        for chart_type in XY_TYPES {
            let chart_space = written(chart_type, &xy_data());
            let plots = Plots::new(Some(plot_area(&chart_space)));
            assert_eq!(plots.get(0).unwrap().chart_type().unwrap(), chart_type);
        }
    }

    #[test]
    fn test_axes_and_legend() {
        let column = written(ChartType::ColumnClustered, &category_data());
        let area = plot_area(&column);
        assert!(area.find("c:catAx").is_some());
        assert_eq!(area.find_all("c:valAx").len(), 1);
        assert!(column.find_path(&["c:chart", "c:legend"]).is_none());

        let scatter = written(ChartType::XyScatter, &xy_data());
        assert_eq!(plot_area(&scatter).find_all("c:valAx").len(), 2);
        assert!(plot_area(&scatter).find("c:catAx").is_none());

        let pie = written(ChartType::Pie, &category_data());
        assert!(plot_area(&pie).find("c:valAx").is_none());
        assert!(pie.find_path(&["c:chart", "c:legend"]).is_some());
    }

    #[test]
    fn test_series_references() {
        let chart_space = written(ChartType::ColumnClustered, &category_data());
        let sers = plot_area(&chart_space).find("c:barChart").unwrap().find_all("c:ser");
        assert_eq!(sers.len(), 2);
        let second = &sers[1];
        assert_eq!(second.find("c:idx").unwrap().attr("val").as_deref(), Some("1"));
        assert_eq!(
            second.find_path(&["c:tx", "c:strRef", "c:f"]).unwrap().text(),
            "Sheet1!$C$1"
        );
        assert_eq!(
            second.find_path(&["c:cat", "c:strRef", "c:f"]).unwrap().text(),
            "Sheet1!$A$2:$A$3"
        );
        let tags: Vec<String> = second.children().iter().map(|c| c.tag()).collect();
        assert_eq!(
            tags,
            vec!["c:idx", "c:order", "c:tx", "c:invertIfNegative", "c:cat", "c:val"]
        );

        let scatter = written(ChartType::XyScatterLines, &xy_data());
        let ser = plot_area(&scatter).find_path(&["c:scatterChart", "c:ser"]).unwrap();
        assert_eq!(
            ser.find_path(&["c:xVal", "c:numRef", "c:f"]).unwrap().text(),
            "Sheet1!$A$2:$A$3"
        );
        assert_eq!(
            ser.find_path(&["c:yVal", "c:numRef", "c:numCache", "c:pt", "c:v"])
                .unwrap()
                .text(),
            "1"
        );
    }

    #[test]
    fn test_blank_values_are_counted() {
        let data: ChartData = CategoryChartData::new()
            .with_categories(["a", "b", "c"])
            .add_sparse_series("s", vec![Some(1.0), None, Some(3.0)])
            .into();
        let chart_space = written(ChartType::Line, &data);
        let cache = plot_area(&chart_space)
            .find_path(&["c:lineChart", "c:ser", "c:val", "c:numRef", "c:numCache"])
            .unwrap();
        assert_eq!(cache.find("c:ptCount").unwrap().attr("val").as_deref(), Some("3"));
        assert_eq!(cache.find_all("c:pt").len(), 2);
    }

    #[test]
    fn test_data_kind_mismatch() {
        assert!(matches!(
            chart_xml(ChartType::XyScatter, &category_data()),
            Err(OoxmlError::InvalidArgument(_))
        ));
        assert!(matches!(
            chart_xml(ChartType::Pie, &xy_data()),
            Err(OoxmlError::InvalidArgument(_))
        ));
        assert!(matches!(
            chart_xml(ChartType::Bubble, &xy_data()),
            Err(OoxmlError::Unsupported(_))
        ));
    }
}
