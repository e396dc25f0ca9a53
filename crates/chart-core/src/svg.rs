// File: crates/chart-core/src/svg.rs
// Summary: SVG/HTML serialization of a chart: axes, gridlines, marks with SMIL transitions, toggles, tooltip.
// Notes:
// - Output is deterministic for a given chart state; numbers are printed with at most two decimals.
// - Tooltip content is caller-supplied HTML and is emitted as is; everything else is escaped.

use std::fmt::Write;

use crate::axis::{Axis, Orient};
use crate::chart::Chart;
use crate::error::Result;
use crate::mark::{Mark, Shape};
use crate::theme::Color;

const TICK_SIZE: f64 = 6.0;

pub(crate) fn render_svg(chart: &Chart) -> Result<String> {
    let mut out = String::with_capacity(4096);
    write_svg(&mut out, chart)?;
    Ok(out)
}

pub(crate) fn render_html(chart: &Chart) -> Result<String> {
    let cfg = chart.config();
    let mut out = String::with_capacity(8192);
    writeln!(
        out,
        r#"<div id="{}" class="{}">"#,
        escape(cfg.container_id()),
        cfg.kind.css_class()
    )?;
    if let Some(controls) = chart.controls() {
        writeln!(out, r#"<div class="controls">"#)?;
        for t in controls.controls() {
            let class = if t.selected { "toggle selected" } else { "toggle" };
            writeln!(
                out,
                r#"<button type="button" class="{class}" data-series="{s}">{s}</button>"#,
                s = escape(&t.series)
            )?;
        }
        writeln!(out, "</div>")?;
    }
    write_svg(&mut out, chart)?;
    if let Some(tip) = chart.tooltip() {
        writeln!(
            out,
            r#"<div class="d3-tooltip" style="position: absolute; left: {}px; top: {}px; opacity: {}; transition: opacity {}ms;">{}</div>"#,
            num(tip.left),
            num(tip.top),
            num(tip.opacity),
            tip.fade.as_millis(),
            tip.html
        )?;
    }
    writeln!(out, "</div>")?;
    Ok(out)
}

fn write_svg(out: &mut String, chart: &Chart) -> Result<()> {
    let cfg = chart.config();
    let theme = &cfg.theme;
    let (w, h) = chart.plot_size();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="{}" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        cfg.kind.css_class(),
        cfg.width,
        cfg.height,
        cfg.width,
        cfg.height
    )?;
    writeln!(out, r#"<rect class="background" width="100%" height="100%" fill="{}"/>"#, paint(theme.background))?;
    writeln!(out, r#"<g transform="translate({},{})">"#, cfg.insets.left, cfg.insets.top)?;

    write_axis(out, chart.x_axis(), h, theme.grid, theme.tick)?;
    write_axis(out, chart.y_axis(), h, theme.grid, theme.tick)?;

    if let Some(label) = &chart.x_axis().label {
        writeln!(
            out,
            r#"<text class="axis-label" text-anchor="end" x="{}" y="{}" fill="{}">{}</text>"#,
            num(w),
            num(h + cfg.insets.top as f64 + 20.0),
            paint(theme.axis_label),
            escape(label)
        )?;
    }
    if let Some(label) = &chart.y_axis().label {
        writeln!(
            out,
            r#"<text class="axis-label" text-anchor="end" transform="rotate(-90)" x="{}" y="{}" fill="{}">{}</text>"#,
            -(cfg.insets.top as f64),
            20.0 - cfg.insets.left as f64,
            paint(theme.axis_label),
            escape(label)
        )?;
    }

    writeln!(out, r#"<g class="marks">"#)?;
    for mark in chart.marks() {
        write_mark(out, mark)?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")?;
    Ok(())
}

/// Ticks with full-length gridlines; the domain line is not drawn.
fn write_axis(out: &mut String, axis: &Axis, h: f64, grid: Color, tick: Color) -> Result<()> {
    if axis.ticks.is_empty() {
        return Ok(());
    }
    match axis.orient {
        Orient::Bottom => {
            writeln!(out, r#"<g class="x axis" transform="translate(0,{})">"#, num(h))?;
            for t in &axis.ticks {
                writeln!(out, r#"<g class="tick" transform="translate({},0)">"#, num(t.offset))?;
                if axis.grid_len > 0.0 {
                    writeln!(out, r#"<line class="grid" y2="{}" stroke="{}"/>"#, num(-axis.grid_len), paint(grid))?;
                }
                writeln!(out, r#"<line y2="{TICK_SIZE}" stroke="{}"/>"#, paint(tick))?;
                writeln!(
                    out,
                    r#"<text y="9" dy="0.71em" text-anchor="middle" fill="{}">{}</text>"#,
                    paint(tick),
                    escape(&t.label)
                )?;
                writeln!(out, "</g>")?;
            }
        }
        Orient::Left => {
            writeln!(out, r#"<g class="y axis">"#)?;
            for t in &axis.ticks {
                writeln!(out, r#"<g class="tick" transform="translate(0,{})">"#, num(t.offset))?;
                if axis.grid_len > 0.0 {
                    writeln!(out, r#"<line class="grid" x2="{}" stroke="{}"/>"#, num(axis.grid_len), paint(grid))?;
                }
                writeln!(out, r#"<line x2="{}" stroke="{}"/>"#, -TICK_SIZE, paint(tick))?;
                writeln!(
                    out,
                    r#"<text x="-9" dy="0.32em" text-anchor="end" fill="{}">{}</text>"#,
                    paint(tick),
                    escape(&t.label)
                )?;
                writeln!(out, "</g>")?;
            }
        }
    }
    writeln!(out, "</g>")?;
    Ok(())
}

fn write_mark(out: &mut String, mark: &Mark) -> Result<()> {
    let class = mark.class_list();
    let key = escape(&mark.key);
    let color = paint(mark.color);
    let fill_opacity = opacity_attr("fill-opacity", mark.color);
    let dur = mark.duration.as_millis();
    match &mark.shape {
        Shape::Circle { cx, cy, r } => {
            write!(
                out,
                r#"<circle class="{class}" data-key="{key}" cx="{}" cy="{}" r="{}" fill="{color}"{fill_opacity}"#,
                num(*cx),
                num(*cy),
                num(*r)
            )?;
            match mark.from.as_ref().filter(|_| mark.is_transitioning()) {
                Some(Shape::Circle { cx: fx, cy: fy, r: fr }) => {
                    writeln!(out, ">")?;
                    animate(out, "cx", num(*fx), num(*cx), dur)?;
                    animate(out, "cy", num(*fy), num(*cy), dur)?;
                    animate(out, "r", num(*fr), num(*r), dur)?;
                    writeln!(out, "</circle>")?;
                }
                _ => writeln!(out, "/>")?,
            }
        }
        Shape::Rect { x, y, width, height } => {
            write!(
                out,
                r#"<rect class="{class}" data-key="{key}" x="{}" y="{}" width="{}" height="{}" fill="{color}"{fill_opacity}"#,
                num(*x),
                num(*y),
                num(*width),
                num(*height)
            )?;
            match mark.from.as_ref().filter(|_| mark.is_transitioning()) {
                Some(Shape::Rect { x: fx, y: fy, width: fw, height: fh }) => {
                    writeln!(out, ">")?;
                    animate(out, "x", num(*fx), num(*x), dur)?;
                    animate(out, "y", num(*fy), num(*y), dur)?;
                    animate(out, "width", num(*fw), num(*width), dur)?;
                    animate(out, "height", num(*fh), num(*height), dur)?;
                    writeln!(out, "</rect>")?;
                }
                _ => writeln!(out, "/>")?,
            }
        }
        Shape::Path { points } => {
            let stroke_width = if mark.selected {
                4
            } else if mark.hovered {
                3
            } else {
                2
            };
            write!(
                out,
                r#"<path class="{class}" data-key="{key}" d="{}" fill="none" stroke="{color}"{} stroke-width="{stroke_width}""#,
                path_data(points),
                opacity_attr("stroke-opacity", mark.color)
            )?;
            match mark.from.as_ref().filter(|_| mark.is_transitioning()) {
                Some(Shape::Path { points: from }) if from.len() == points.len() => {
                    writeln!(out, ">")?;
                    animate(out, "d", path_data(from), path_data(points), dur)?;
                    writeln!(out, "</path>")?;
                }
                _ => writeln!(out, "/>")?,
            }
        }
    }
    Ok(())
}

fn animate(out: &mut String, attr: &str, from: String, to: String, dur_ms: u128) -> Result<()> {
    if from == to {
        return Ok(());
    }
    writeln!(
        out,
        r#"<animate attributeName="{attr}" from="{from}" to="{to}" dur="{dur_ms}ms" fill="freeze"/>"#
    )?;
    Ok(())
}

fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, (x, y)) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{cmd}{},{}", num(*x), num(*y));
    }
    d
}

fn paint(c: Color) -> String {
    c.to_hex()
}

/// ` name="0.8"` for translucent colours, nothing for opaque ones.
fn opacity_attr(name: &str, c: Color) -> String {
    if c.is_opaque() {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(c.opacity()))
    }
}

/// At most two decimals, trailing zeros trimmed, no negative zero.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape text for use in HTML/SVG content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
