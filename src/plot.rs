// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::Path;

use plotters::prelude::*;

use crate::error::Error;

macro_rules! hexcolour {
    ($colour:literal) => {
        RGBColor(
            (($colour & 0xFF0000) >> 16) as u8,
            (($colour & 0x00FF00) >> 8) as u8,
            ($colour & 0x0000FF) as u8,
        )
    };
}

const COLOURS: &[RGBColor] = &[
    hexcolour!(0xAA0000),
    hexcolour!(0x0000FF),
    hexcolour!(0x888888),
    hexcolour!(0xDDCC77),
    hexcolour!(0x999933),
    hexcolour!(0x332288),
    hexcolour!(0x117733),
    hexcolour!(0x88CCEE),
    hexcolour!(0x882255),
    hexcolour!(0x44AA99),
    hexcolour!(0xAA4499),
    hexcolour!(0xCC6677),
];

const FONT: &str = "sans-serif";

pub const X_DESC: &str = "Iteration";
pub const Y_DESC: &str = "Normalised Correlation";
pub const Z_DESC: &str = "Slice Number";

/// Explicit render configuration, passed into every plotting call.
#[derive(Clone, Copy, Debug)]
pub struct PlotStyle {
    pub font_size: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotStyle {
    fn default() -> PlotStyle {
        PlotStyle {
            font_size: 10,
            width: 1080,
            height: 720,
        }
    }
}

/// Renders one series as a 2D line of value vs. iteration index, with
/// horizontal grid lines only. A series with fewer than two values produces
/// a valid, mostly-empty chart.
pub fn plot_2d_line(
    path: &Path,
    caption: &str,
    values: &[f64],
    style: &PlotStyle,
) -> Result<(), Error> {
    draw_2d(path, caption, values, style).map_err(|e| Error::render(path, e))
}

/// Renders a group of series as one 3D chart: one line per series over
/// (iteration, value, slice index), with a legend entry per series.
pub fn plot_3d_lines<S: AsRef<[f64]>>(
    path: &Path,
    caption: &str,
    series: &[S],
    labels: &[String],
    style: &PlotStyle,
) -> Result<(), Error> {
    draw_3d(path, caption, series, labels, style).map_err(|e| Error::render(path, e))
}

fn draw_2d(
    path: &Path,
    caption: &str,
    values: &[f64],
    style: &PlotStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = axis_length(values.len());
    let (y_min, y_max) = value_bounds(std::iter::once(values));

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, style.font_size * 2))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(X_DESC)
        .y_desc(Y_DESC)
        .label_style((FONT, style.font_size))
        .draw()?;

    chart.draw_series(LineSeries::new(
        values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
        COLOURS[0].stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

fn draw_3d<S: AsRef<[f64]>>(
    path: &Path,
    caption: &str,
    series: &[S],
    labels: &[String],
    style: &PlotStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let longest = series.iter().map(|s| s.as_ref().len()).max().unwrap_or(0);
    let x_max = axis_length(longest);
    let (y_min, y_max) = value_bounds(series.iter().map(AsRef::as_ref));
    let z_max = axis_length(series.len());

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, style.font_size * 2))
        .margin(20)
        .build_cartesian_3d(0.0..x_max, y_min..y_max, 0.0..z_max)?;

    chart.with_projection(|mut pb| {
        pb.pitch = 0.25;
        pb.yaw = 0.5;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    chart
        .configure_axes()
        .label_style((FONT, style.font_size))
        .max_light_lines(3)
        .draw()?;

    for (i, s) in series.iter().enumerate() {
        let colour = COLOURS[i % COLOURS.len()];
        let z = i as f64;
        chart
            .draw_series(LineSeries::new(
                s.as_ref()
                    .iter()
                    .enumerate()
                    .map(move |(x, &v)| (x as f64, v, z)),
                colour.stroke_width(2),
            ))?
            .label(labels[i].as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, style.font_size))
        .draw()?;

    // the 3D axes have no desc slot, so the names go straight on the bitmap
    let axis_font = (FONT, style.font_size * 2);
    let (w, h) = (style.width as i32, style.height as i32);
    root.draw(&Text::new(X_DESC, (40, h - 30), axis_font))?;
    root.draw(&Text::new(Z_DESC, (w - 160, h - 30), axis_font))?;
    root.draw(&Text::new(Y_DESC, (40, h / 2), axis_font))?;

    root.present()?;
    Ok(())
}

// Keeps a degenerate axis from collapsing to zero width when a series has
// fewer than two points.
fn axis_length(points: usize) -> f64 {
    points.saturating_sub(1).max(1) as f64
}

fn value_bounds<'a, I>(series: I) -> (f64, f64)
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for &v in s {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}
