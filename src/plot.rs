//! Scatter plots of the rock data and of classification results
//!
//! All figures are rendered with `plotters` into JPEG files inside the configured output
//! directory. Sizes come from [`PlotValidParams`], which converts inches and points into pixels.

use std::fs;
use std::ops::Range;
use std::path::PathBuf;

use log::info;
use ndarray::{Array2, ArrayView1, ArrayView2};
use plotters::coord::Shift;
use plotters::prelude::*;
use rockclass_datasets::{DENS, SPZ, UCS};

use crate::error::{Error, Result};
use crate::hyperparams::PlotValidParams;

/// Default blue of the classic matplotlib cycle
pub const C0: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
/// Default orange of the classic matplotlib cycle
pub const C1: RGBColor = RGBColor(0xff, 0x7f, 0x0e);
pub const LIMEGREEN: RGBColor = RGBColor(0x32, 0xcd, 0x32);

/// Font size of the overview grid in points
const GRID_FONT: f64 = 10.;
/// Marker area of the overview grid in square points
const GRID_POINT_SIZE: f64 = 36.;
/// Legend font size in points
const LEGEND_FONT: f64 = 15.;
/// Stroke of the ring around misclassified points in points
const WRONG_STROKE: f64 = 3.;

/// Axis description of a feature column
pub fn axis_label(feature: usize, normalized: bool) -> String {
    let (name, unit) = match feature {
        UCS => ("UCS", "MPa"),
        SPZ => ("tensile strength", "MPa"),
        DENS => ("density", "g/cm³"),
        _ => ("feature", "-"),
    };
    if normalized {
        format!("{} [normalized]", name)
    } else {
        format!("{} [{}]", name, unit)
    }
}

/// Range spanning `values` with a 5% margin on both sides.
///
/// A single distinct value is padded by `0.5` and no values at all give `0..1`.
pub fn padded_range<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
            (min.min(*v), max.max(*v))
        });

    if min > max {
        0.0..1.0
    } else if min == max {
        min - 0.5..max + 0.5
    } else {
        let margin = (max - min) * 0.05;
        min - margin..max + margin
    }
}

fn points<I: IntoIterator<Item = usize>>(records: ArrayView2<f64>, rows: I) -> Vec<(f64, f64)> {
    rows.into_iter()
        .map(|i| (records[(i, 0)], records[(i, 1)]))
        .collect()
}

fn all_points(records: ArrayView2<f64>) -> Vec<(f64, f64)> {
    points(records, 0..records.nrows())
}

struct Series {
    points: Vec<(f64, f64)>,
    radius: i32,
    style: ShapeStyle,
    edge: Option<ShapeStyle>,
    label: Option<String>,
}

impl Series {
    fn new(points: Vec<(f64, f64)>, radius: i32, style: ShapeStyle) -> Self {
        Self {
            points,
            radius,
            style,
            edge: None,
            label: None,
        }
    }

    fn edge(mut self, edge: ShapeStyle) -> Self {
        self.edge = Some(edge);
        self
    }

    fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }
}

struct ScatterChart {
    title: Option<String>,
    x_desc: String,
    y_desc: String,
    font: u32,
    legend_font: u32,
    series: Vec<Series>,
}

impl ScatterChart {
    fn new(x_desc: String, y_desc: String, font: u32) -> Self {
        Self {
            title: None,
            x_desc,
            y_desc,
            font,
            legend_font: font,
            series: Vec::new(),
        }
    }

    fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    fn legend_font(mut self, legend_font: u32) -> Self {
        self.legend_font = legend_font;
        self
    }

    fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<()> {
        let x_range = padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| &p.0)));
        let y_range = padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| &p.1)));

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(self.font / 2)
            .x_label_area_size(self.font * 3)
            .y_label_area_size(self.font * 4);
        if let Some(title) = &self.title {
            builder.caption(title, ("sans-serif", self.font));
        }
        let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(self.x_desc.as_str())
            .y_desc(self.y_desc.as_str())
            .axis_desc_style(("sans-serif", self.font))
            .label_style(("sans-serif", self.font * 3 / 4))
            .bold_line_style(BLACK.mix(0.25).stroke_width(1))
            .light_line_style(TRANSPARENT.stroke_width(0))
            .draw()?;

        for series in &self.series {
            let (radius, style) = (series.radius, series.style);
            let anno = chart.draw_series(
                series
                    .points
                    .iter()
                    .map(move |p| Circle::new(*p, radius, style)),
            )?;
            if let Some(label) = &series.label {
                anno.label(label.as_str())
                    .legend(move |(x, y)| Circle::new((x, y), radius, style));
            }

            if let Some(edge) = series.edge {
                chart.draw_series(
                    series
                        .points
                        .iter()
                        .map(move |p| Circle::new(*p, radius, edge)),
                )?;
            }
        }

        if self.series.iter().any(|s| s.label.is_some()) {
            chart
                .configure_series_labels()
                .label_font(("sans-serif", self.legend_font))
                .background_style(WHITE.mix(0.8).filled())
                .border_style(BLACK.mix(0.3).stroke_width(1))
                .position(SeriesLabelPosition::UpperRight)
                .draw()?;
        }

        Ok(())
    }
}

fn render(
    params: &PlotValidParams,
    file_name: &str,
    size: (u32, u32),
    charts: &[ScatterChart],
    grid: (usize, usize),
) -> Result<PathBuf> {
    let dir = params.output_dir();
    fs::create_dir_all(dir).map_err(|source| Error::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = params.output_path(file_name);
    {
        let root = BitMapBackend::new(&path, size).into_drawing_area();
        root.fill(&WHITE)?;

        for (area, chart) in root.split_evenly(grid).iter().zip(charts) {
            chart.draw(area)?;
        }
        root.present()?;
    }
    info!("wrote {}", path.display());

    Ok(path)
}

/// Overview of the raw tables, `data.jpg`
///
/// A 2×3 grid showing the feature pairs `UCS/SPZ`, `DENS/UCS` and `SPZ/DENS`. The top row shows
/// all samples in one colour, the bottom row colours them by rock type.
pub fn plot_data(params: &PlotValidParams, gneiss: &Array2<f64>, marl: &Array2<f64>) -> Result<PathBuf> {
    let font = params.points_to_pixels(GRID_FONT).round() as u32;
    let radius = params.marker_radius(GRID_POINT_SIZE);
    let pairs = [(UCS, SPZ), (DENS, UCS), (SPZ, DENS)];
    let pair_points = |table: &Array2<f64>, (x, y): (usize, usize)| -> Vec<(f64, f64)> {
        table
            .rows()
            .into_iter()
            .map(|row| (row[x], row[y]))
            .collect()
    };

    let mut charts = Vec::with_capacity(6);
    for pair in &pairs {
        let mut chart = ScatterChart::new(axis_label(pair.0, false), axis_label(pair.1, false), font);
        for table in &[gneiss, marl] {
            chart = chart.series(Series::new(
                pair_points(table, *pair),
                radius,
                BLACK.mix(0.5).filled(),
            ));
        }
        charts.push(chart);
    }
    for pair in &pairs {
        let chart = ScatterChart::new(axis_label(pair.0, false), axis_label(pair.1, false), font)
            .series(
                Series::new(pair_points(gneiss, *pair), radius, C0.mix(0.5).filled())
                    .label("gneiss"),
            )
            .series(
                Series::new(pair_points(marl, *pair), radius, C1.mix(0.5).filled()).label("marl"),
            );
        charts.push(chart);
    }

    render(params, "data.jpg", params.grid_figure_pixels(), &charts, (2, 3))
}

/// All samples of a two-column normalized matrix in one colour
pub fn plot_normalized(
    params: &PlotValidParams,
    records: ArrayView2<f64>,
    features: [usize; 2],
    file_name: &str,
) -> Result<PathBuf> {
    let chart = ScatterChart::new(
        axis_label(features[0], true),
        axis_label(features[1], true),
        params.label_font(),
    )
    .series(Series::new(
        all_points(records),
        params.point_radius(),
        BLACK.mix(0.5).filled(),
    ));

    render(params, file_name, params.figure_pixels(), &[chart], (1, 1))
}

/// Training samples in black, test samples in red
pub fn plot_train_test(
    params: &PlotValidParams,
    train: ArrayView2<f64>,
    test: ArrayView2<f64>,
    features: [usize; 2],
    file_name: &str,
) -> Result<PathBuf> {
    let radius = params.point_radius();
    let chart = ScatterChart::new(
        axis_label(features[0], true),
        axis_label(features[1], true),
        params.label_font(),
    )
    .legend_font(params.points_to_pixels(LEGEND_FONT).round() as u32)
    .series(Series::new(all_points(train), radius, BLACK.mix(0.5).filled()).label("train data"))
    .series(
        Series::new(all_points(test), radius, RED.mix(0.8).filled())
            .edge(BLACK.stroke_width(1))
            .label("test data"),
    );

    render(params, file_name, params.figure_pixels(), &[chart], (1, 1))
}

/// Everything needed to draw the outcome of one classifier
pub struct ClassificationFigure<'a> {
    pub file_name: String,
    pub title: String,
    pub features: [usize; 2],
    /// Classified samples, two columns
    pub records: ArrayView2<'a, f64>,
    pub predicted: ArrayView1<'a, usize>,
    pub truth: ArrayView1<'a, usize>,
    /// Samples drawn faintly behind the classified ones, e.g. the training split
    pub background: Option<ArrayView2<'a, f64>>,
    /// Fill of the samples classified as gneiss and as marl
    pub class_colors: [RGBColor; 2],
    /// Area of the ring around misclassified samples in square points
    pub wrong_marker_area: f64,
}

/// Samples coloured by their predicted class, misclassified ones ringed in red
pub fn plot_classification(params: &PlotValidParams, figure: &ClassificationFigure) -> Result<PathBuf> {
    let radius = params.point_radius();
    let edge = BLACK.stroke_width(1);
    let rows_where = |keep: &dyn Fn(usize, usize) -> bool| {
        figure
            .predicted
            .iter()
            .zip(figure.truth.iter())
            .enumerate()
            .filter(|(_, (p, t))| keep(**p, **t))
            .map(|(i, _)| i)
            .collect::<Vec<_>>()
    };

    let mut chart = ScatterChart::new(
        axis_label(figure.features[0], true),
        axis_label(figure.features[1], true),
        params.label_font(),
    )
    .title(figure.title.clone())
    .legend_font(params.points_to_pixels(LEGEND_FONT).round() as u32);

    if let Some(background) = figure.background {
        chart = chart.series(
            Series::new(all_points(background), radius, BLACK.mix(0.3).filled())
                .label("train data"),
        );
    }

    let gneiss = rows_where(&|p, _| p == 0);
    let marl = rows_where(&|p, _| p == 1);
    let wrong = rows_where(&|p, t| p != t);
    let wrong_stroke = params.points_to_pixels(WRONG_STROKE).round().max(1.) as u32;

    chart = chart
        .series(
            Series::new(
                points(figure.records, gneiss),
                radius,
                figure.class_colors[0].filled(),
            )
            .edge(edge)
            .label("classified as gneiss"),
        )
        .series(
            Series::new(
                points(figure.records, marl),
                radius,
                figure.class_colors[1].filled(),
            )
            .edge(edge)
            .label("classified as marl"),
        )
        .series(
            Series::new(
                points(figure.records, wrong),
                params.marker_radius(figure.wrong_marker_area),
                RED.stroke_width(wrong_stroke),
            )
            .label("wrong classifications"),
        );

    render(params, &figure.file_name, params.figure_pixels(), &[chart], (1, 1))
}
