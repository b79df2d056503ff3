//! Quick-look drawing of bar-family and pie widgets to **SVG** or **PNG**.
//!
//! - Shapes only (bars, wedges, zero baseline); no text, so no font registration
//! - Colors come from the widget's resolved series/slice colors; non-hex tokens
//!   fall back to a neutral gray
//! - Grouped and stacked bars are vertical, diverging bars horizontal

use crate::palette::parse_hex;
use crate::widget::{BarStyle, NormalizedRow, SeriesColor, Slice, Widget};
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;

const MARGIN: i32 = 16;
const MIN_SIDE: u32 = 64;
const FALLBACK: RGBColor = RGBColor(165, 165, 165);

fn plot_err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

fn to_rgb(token: &str) -> RGBColor {
    parse_hex(token)
        .map(|(r, g, b)| RGBColor(r, g, b))
        .unwrap_or(FALLBACK)
}

/// Draw `widget` to `out_path`; the extension picks the backend (`.svg`, else PNG).
pub fn draw_preview<P: AsRef<Path>>(
    widget: &Widget,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    if !matches!(widget, Widget::Bar { .. } | Widget::Pie { .. }) {
        bail!("preview supports bar and pie widgets, got {}", widget.kind());
    }
    if width < MIN_SIDE || height < MIN_SIDE {
        bail!("preview needs at least {MIN_SIDE}x{MIN_SIDE} pixels");
    }
    let out_path = out_path.as_ref();
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, (width, height)).into_drawing_area();
        draw_widget(root, widget)
    } else {
        let root = BitMapBackend::new(out_path, (width, height)).into_drawing_area();
        draw_widget(root, widget)
    }
}

fn draw_widget<DB>(root: DrawingArea<DB, Shift>, widget: &Widget) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(plot_err)?;
    match widget {
        Widget::Bar {
            style,
            rows,
            series,
        } => draw_bars(&root, *style, rows, series)?,
        Widget::Pie { slices } => draw_pie(&root, slices)?,
        Widget::Table { .. } | Widget::Card(_) => {}
    }
    root.present().map_err(plot_err)?;
    Ok(())
}

/// Value extent including zero; stacked bars use per-row positive/negative sums.
fn value_range(style: BarStyle, rows: &[NormalizedRow]) -> (f64, f64) {
    let (mut lo, mut hi) = (0.0f64, 0.0f64);
    for row in rows {
        if style == BarStyle::Stacked {
            let pos: f64 = row.values().iter().map(|(_, v)| v.max(0.0)).sum();
            let neg: f64 = row.values().iter().map(|(_, v)| v.min(0.0)).sum();
            hi = hi.max(pos);
            lo = lo.min(neg);
        } else {
            for (_, v) in row.values() {
                hi = hi.max(*v);
                lo = lo.min(*v);
            }
        }
    }
    if (hi - lo).abs() < f64::EPSILON {
        hi += 1.0;
    }
    (lo, hi)
}

fn series_color(series: &[SeriesColor], name: &str) -> RGBColor {
    series
        .iter()
        .find(|s| s.series == name)
        .map_or(FALLBACK, |s| to_rgb(&s.color))
}

fn draw_bars<DB>(
    root: &DrawingArea<DB, Shift>,
    style: BarStyle,
    rows: &[NormalizedRow],
    series: &[SeriesColor],
) -> Result<()>
where
    DB: DrawingBackend,
{
    if rows.is_empty() {
        return Ok(());
    }
    let (w, h) = root.dim_in_pixel();
    let (x0, x1) = (MARGIN, w as i32 - MARGIN);
    let (y0, y1) = (MARGIN, h as i32 - MARGIN);
    let (lo, hi) = value_range(style, rows);
    let n_rows = rows.len() as f64;
    let n_series = series.len().max(1) as f64;

    // Value axis runs along y for vertical bars, along x for horizontal ones.
    let (axis_start, axis_len) = if style.is_horizontal() {
        (x0 as f64, (x1 - x0) as f64)
    } else {
        (y1 as f64, -((y1 - y0) as f64))
    };
    let to_px = |v: f64| (axis_start + (v - lo) / (hi - lo) * axis_len).round() as i32;
    let (band_start, band_len) = if style.is_horizontal() {
        (y0 as f64, (y1 - y0) as f64 / n_rows)
    } else {
        (x0 as f64, (x1 - x0) as f64 / n_rows)
    };

    let mut rects: Vec<Rectangle<(i32, i32)>> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let band0 = band_start + i as f64 * band_len;
        match style {
            BarStyle::Stacked => {
                let c0 = (band0 + band_len * 0.2).round() as i32;
                let c1 = (band0 + band_len * 0.8).round() as i32;
                let (mut pos, mut neg) = (0.0f64, 0.0f64);
                for (name, v) in row.values() {
                    let (from, to) = if *v >= 0.0 {
                        pos += v;
                        (pos - v, pos)
                    } else {
                        neg += v;
                        (neg - v, neg)
                    };
                    let (a, b) = (to_px(from.min(to)), to_px(from.max(to)));
                    rects.push(Rectangle::new(
                        [(c0, a.min(b)), (c1, a.max(b))],
                        series_color(series, name).filled(),
                    ));
                }
            }
            BarStyle::Grouped | BarStyle::Diverging => {
                let bar = band_len * 0.8 / n_series;
                for (s, (name, v)) in row.values().iter().enumerate() {
                    let c0 = (band0 + band_len * 0.1 + s as f64 * bar).round() as i32;
                    let c1 = (band0 + band_len * 0.1 + (s + 1) as f64 * bar).round() as i32;
                    let (a, b) = (to_px(v.min(0.0)), to_px(v.max(0.0)));
                    let (v0, v1) = (a.min(b), a.max(b));
                    let corners = if style.is_horizontal() {
                        [(v0, c0), (v1, c1)]
                    } else {
                        [(c0, v0), (c1, v1)]
                    };
                    rects.push(Rectangle::new(corners, series_color(series, name).filled()));
                }
            }
        }
    }
    for rect in &rects {
        root.draw(rect).map_err(plot_err)?;
    }

    let zero = to_px(0.0);
    let baseline = if style.is_horizontal() {
        vec![(zero, y0), (zero, y1)]
    } else {
        vec![(x0, zero), (x1, zero)]
    };
    root.draw(&PathElement::new(baseline, BLACK.stroke_width(1)))
        .map_err(plot_err)?;
    Ok(())
}

fn draw_pie<DB>(root: &DrawingArea<DB, Shift>, slices: &[Slice]) -> Result<()>
where
    DB: DrawingBackend,
{
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    if total <= 0.0 {
        return Ok(());
    }
    let (w, h) = root.dim_in_pixel();
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = (w.min(h) as f64 / 2.0 - MARGIN as f64).max(1.0);

    // Start at twelve o'clock, clockwise in screen coordinates.
    let mut start = -FRAC_PI_2;
    for slice in slices {
        let sweep = slice.value.max(0.0) / total * TAU;
        if sweep <= 0.0 {
            continue;
        }
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        let mut points = Vec::with_capacity(steps + 2);
        points.push((cx.round() as i32, cy.round() as i32));
        for k in 0..=steps {
            let a = start + sweep * k as f64 / steps as f64;
            points.push((
                (cx + radius * a.cos()).round() as i32,
                (cy + radius * a.sin()).round() as i32,
            ));
        }
        root.draw(&Polygon::new(points, to_rgb(&slice.color).filled()))
            .map_err(plot_err)?;
        start += sweep;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_range_sums_per_row() {
        let mut a = NormalizedRow::new("a");
        a.set("x", 3.0);
        a.set("y", 4.0);
        a.set("z", -2.0);
        assert_eq!(value_range(BarStyle::Stacked, &[a.clone()]), (-2.0, 7.0));
        assert_eq!(value_range(BarStyle::Grouped, &[a]), (-2.0, 4.0));
    }

    #[test]
    fn all_zero_range_is_widened() {
        let mut a = NormalizedRow::new("a");
        a.set("x", 0.0);
        assert_eq!(value_range(BarStyle::Grouped, &[a]), (0.0, 1.0));
    }
}
