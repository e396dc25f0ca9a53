// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a chart's current frame using Skia CPU raster surfaces.
// Notes:
// - Marks are drawn at their target geometry; transitions are an SVG/HTML concern.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chart_core::{Axis, Chart, Mark, Orient, Shape};
use log::debug;
use skia_safe as skia;

const TICK_SIZE: f32 = 6.0;

pub struct PngOptions {
    /// Text (tick and axis labels) varies across platforms' fonts; snapshot tests turn it off.
    pub draw_labels: bool,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self { draw_labels: true }
    }
}

/// Render the chart to PNG bytes.
pub fn render_to_png_bytes(chart: &Chart, opts: &PngOptions) -> Result<Vec<u8>> {
    let cfg = chart.config();
    let (width, height) = (cfg.width as i32, cfg.height as i32);
    let mut surface = skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| anyhow!("failed to create {width}x{height} raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(color(cfg.theme.background));

    canvas.save();
    canvas.translate((cfg.insets.left as f32, cfg.insets.top as f32));
    let (w, h) = chart.plot_size();
    let (w, h) = (w as f32, h as f32);
    draw_axis(canvas, chart, chart.x_axis(), h, opts);
    draw_axis(canvas, chart, chart.y_axis(), h, opts);
    if opts.draw_labels {
        draw_axis_labels(canvas, chart, w, h);
    }
    for mark in chart.marks() {
        draw_mark(canvas, mark);
    }
    canvas.restore();

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow!("encode PNG failed"))?;
    debug!("{} rendered to {} PNG bytes", cfg.container, data.len());
    Ok(data.as_bytes().to_vec())
}

/// Render the chart to a PNG file at `path`, creating parent directories.
pub fn render_to_png(chart: &Chart, opts: &PngOptions, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = render_to_png_bytes(chart, opts)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// ---- helpers ----------------------------------------------------------------

fn color(c: chart_core::Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn stroke_paint(c: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(c);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn draw_axis(canvas: &skia::Canvas, chart: &Chart, axis: &Axis, h: f32, opts: &PngOptions) {
    let theme = &chart.config().theme;
    let grid = stroke_paint(color(theme.grid), 1.0);
    let tick = stroke_paint(color(theme.tick), 1.0);
    let mut text = skia::Paint::default();
    text.set_color(color(theme.tick));
    text.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(10.0);

    for t in &axis.ticks {
        let o = t.offset as f32;
        let len = axis.grid_len as f32;
        match axis.orient {
            Orient::Bottom => {
                if len > 0.0 {
                    canvas.draw_line((o, h), (o, h - len), &grid);
                }
                canvas.draw_line((o, h), (o, h + TICK_SIZE), &tick);
                if opts.draw_labels {
                    let (tw, _) = font.measure_str(&t.label, Some(&text));
                    canvas.draw_str(&t.label, (o - tw * 0.5, h + TICK_SIZE + 12.0), &font, &text);
                }
            }
            Orient::Left => {
                if len > 0.0 {
                    canvas.draw_line((0.0, o), (len, o), &grid);
                }
                canvas.draw_line((0.0, o), (-TICK_SIZE, o), &tick);
                if opts.draw_labels {
                    let (tw, _) = font.measure_str(&t.label, Some(&text));
                    canvas.draw_str(&t.label, (-TICK_SIZE - 3.0 - tw, o + 3.5), &font, &text);
                }
            }
        }
    }
}

fn draw_axis_labels(canvas: &skia::Canvas, chart: &Chart, w: f32, h: f32) {
    let cfg = chart.config();
    let mut paint = skia::Paint::default();
    paint.set_color(color(cfg.theme.axis_label));
    paint.set_anti_alias(true);
    let mut font = skia::Font::default();
    font.set_size(12.0);

    if let Some(label) = &chart.x_axis().label {
        let (tw, _) = font.measure_str(label, Some(&paint));
        canvas.draw_str(label, (w - tw, h + cfg.insets.top as f32 + 20.0), &font, &paint);
    }
    if let Some(label) = &chart.y_axis().label {
        let (tw, _) = font.measure_str(label, Some(&paint));
        canvas.save();
        canvas.rotate(-90.0, None);
        canvas.draw_str(label, (-(cfg.insets.top as f32) - tw, 20.0 - cfg.insets.left as f32), &font, &paint);
        canvas.restore();
    }
}

fn draw_mark(canvas: &skia::Canvas, mark: &Mark) {
    let c = color(mark.color);
    match &mark.shape {
        Shape::Circle { cx, cy, r } => {
            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_color(c);
            canvas.draw_circle((*cx as f32, *cy as f32), *r as f32, &fill);
        }
        Shape::Rect { x, y, width, height } => {
            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_color(c);
            let rect = skia::Rect::from_xywh(*x as f32, *y as f32, *width as f32, *height as f32);
            canvas.draw_rect(rect, &fill);
        }
        Shape::Path { points } => {
            let Some(&(x0, y0)) = points.first() else { return };
            let mut path = skia::Path::new();
            path.move_to((x0 as f32, y0 as f32));
            for &(x, y) in points.iter().skip(1) {
                path.line_to((x as f32, y as f32));
            }
            let width = if mark.selected {
                4.0
            } else if mark.hovered {
                3.0
            } else {
                2.0
            };
            canvas.draw_path(&path, &stroke_paint(c, width));
        }
    }
}
