//! Cairo/Pango implementation of [`MapCanvas`].
//!
//! Draw calls are kept as a display list and replayed onto any cairo
//! context, so one map can be written both as PNG and as SVG.

use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use cairo::{Context as CairoContext, Format, ImageSurface, LineCap, SvgSurface};
use pango::{Alignment, FontDescription};
use pangocairo::functions as pangocairo;

use crate::canvas::{Extent, LineStyle, MapCanvas, MarkerStyle, Point};
use crate::color::Color;
use crate::legend::{Legend, LegendLocation, MarkerUnits};
use crate::shape::{Shape, ShapeStyle};
use crate::MapError;

pub const DEFAULT_MAP_WIDTH_PX: f64 = 1000.0;
const MAX_MAP_ASPECT: f64 = 2.0;
const MARGIN_LEFT_PX: f64 = 56.0;
const MARGIN_RIGHT_PX: f64 = 24.0;
const MARGIN_TOP_PX: f64 = 48.0;
const MARGIN_BOTTOM_PX: f64 = 36.0;
const FONT_TITLE_PX: f64 = 16.0;
const FONT_MAIN_PX: f64 = 12.0;
const FONT_SMALL_PX: f64 = 10.0;
const FONT_FAMILY: &str = "Liberation Sans";
const TEXT_OUTLINE_WIDTH: f64 = 0.75;
const TEXT_COLOR: Color = Color::from_u8(0x22, 0x22, 0x22);
const LAND_COLOR: Color = Color::from_u8(0xF7, 0xF7, 0xF7);
const FRAME_COLOR: Color = Color::from_u8(0x55, 0x55, 0x55);
const FRAME_WIDTH: f64 = 0.8;
const GRID_COLOR: Color = Color::GRAY;
const GRID_ALPHA: f64 = 0.5;
const GRID_WIDTH: f64 = 0.2;
const MAX_GRID_LINES: f64 = 8.0;
const GRID_STEPS: [f64; 13] = [
    0.1, 0.2, 0.25, 0.5, 1.0, 2.0, 2.5, 5.0, 10.0, 15.0, 20.0, 30.0, 45.0,
];
/// Matplotlib's default resolution; scatter sizes are given in points.
const PX_PER_PT: f64 = 100.0 / 72.0;
const LEGEND_PAD_PX: f64 = 8.0;
const LEGEND_ROW_GAP_PX: f64 = 4.0;
const LEGEND_LABEL_GAP_PX: f64 = 8.0;
const LEGEND_ALPHA: f64 = 0.85;

#[derive(Clone, Debug)]
enum Command {
    Background,
    Line(Point, Point, LineStyle),
    Scatter(Vec<Point>, MarkerStyle),
    Shape(Shape, ShapeStyle),
    Legend(Legend),
    Title(String),
}

#[derive(Clone, Copy, Debug)]
struct PixelRect {
    x0: f64,
    y0: f64,
    width: f64,
    height: f64,
}

/// Plate carrée projection of map coordinates onto device pixels.
#[derive(Clone, Copy, Debug)]
struct Transform {
    min_x: f64,
    max_y: f64,
    scale: f64,
    origin: Point,
}

impl Transform {
    fn map_point(&self, pt: Point) -> Point {
        Point {
            x: self.origin.x + (pt.x - self.min_x) * self.scale,
            y: self.origin.y + (self.max_y - pt.y) * self.scale,
        }
    }

    fn scale_scalar(&self, value: f64) -> f64 {
        value * self.scale
    }
}

/// Page geometry derived from the extent.
#[derive(Clone, Copy, Debug)]
struct PageLayout {
    extent: Extent,
    transform: Transform,
    map: PixelRect,
    width: f64,
    height: f64,
}

impl PageLayout {
    fn new(extent: Extent, map_width: f64) -> Self {
        let span_x = extent.width().max(f64::EPSILON);
        let span_y = extent.height().max(f64::EPSILON);
        let scale = (map_width / span_x).min(map_width * MAX_MAP_ASPECT / span_y);
        let map = PixelRect {
            x0: MARGIN_LEFT_PX,
            y0: MARGIN_TOP_PX,
            width: span_x * scale,
            height: span_y * scale,
        };
        Self {
            extent,
            transform: Transform {
                min_x: extent.min_x,
                max_y: extent.max_y,
                scale,
                origin: Point::new(map.x0, map.y0),
            },
            map,
            width: MARGIN_LEFT_PX + map.width + MARGIN_RIGHT_PX,
            height: MARGIN_TOP_PX + map.height + MARGIN_BOTTOM_PX,
        }
    }
}

/// A map canvas rendered with cairo.
#[derive(Clone, Debug)]
pub struct CairoCanvas {
    map_width: f64,
    extent: Option<Extent>,
    commands: Vec<Command>,
}

impl Default for CairoCanvas {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_WIDTH_PX)
    }
}

impl CairoCanvas {
    /// A blank canvas whose map frame will be `map_width` pixels wide.
    pub fn new(map_width: f64) -> Self {
        Self {
            map_width: map_width.max(1.0),
            extent: None,
            commands: Vec::new(),
        }
    }

    fn layout(&self) -> Result<PageLayout> {
        let extent = self
            .extent
            .ok_or_else(|| anyhow!("Canvas has no extent; nothing was drawn"))?;
        Ok(PageLayout::new(extent, self.map_width))
    }

    /// Page size in pixels.
    pub fn page_size(&self) -> Result<(f64, f64)> {
        let layout = self.layout()?;
        Ok((layout.width, layout.height))
    }

    /// Replay every draw call onto `ctx`.
    pub fn render(&self, ctx: &CairoContext) -> Result<()> {
        let layout = self.layout()?;
        setup_context(ctx)?;
        for command in &self.commands {
            match command {
                Command::Background => draw_background(ctx, &layout)?,
                Command::Line(from, to, style) => {
                    clipped(ctx, layout.map, |ctx| draw_line(ctx, &layout, *from, *to, style))?
                }
                Command::Scatter(points, style) => {
                    clipped(ctx, layout.map, |ctx| draw_scatter(ctx, &layout, points, style))?
                }
                Command::Shape(shape, style) => clipped(ctx, layout.map, |ctx| {
                    draw_shape_px(ctx, &shape_to_pixels(&layout.transform, shape), style)
                })?,
                Command::Legend(legend) => draw_legend(ctx, &layout, legend)?,
                Command::Title(title) => draw_title(ctx, &layout, title)?,
            }
        }
        Ok(())
    }

    pub fn to_image_surface(&self) -> Result<ImageSurface> {
        let (width, height) = self.page_size()?;
        let (surface, ctx) = create_png_surface(width.ceil() as i32, height.ceil() as i32)?;
        self.render(&ctx)?;
        drop(ctx);
        Ok(surface)
    }

    pub fn write_png(&self, path: &Path) -> Result<()> {
        let surface = self.to_image_surface()?;
        let mut file = fs::File::create(path)
            .with_context(|| format!("Failed to create PNG file {:?}", path))?;
        surface
            .write_to_png(&mut file)
            .context("Failed to write PNG")?;
        Ok(())
    }

    pub fn write_svg(&self, path: &Path) -> Result<()> {
        let (width, height) = self.page_size()?;
        let surface = SvgSurface::new(width, height, Some(path))
            .context("Failed to create SVG surface")?;
        let ctx = CairoContext::new(&surface).context("Failed to create Cairo context")?;
        self.render(&ctx)?;
        drop(ctx);
        surface.finish();
        Ok(())
    }
}

impl MapCanvas for CairoCanvas {
    fn set_extent(&mut self, extent: Extent) -> Result<(), MapError> {
        self.extent = Some(extent);
        Ok(())
    }

    fn draw_background(&mut self) -> Result<(), MapError> {
        self.commands.push(Command::Background);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) -> Result<(), MapError> {
        self.commands.push(Command::Line(from, to, style.clone()));
        Ok(())
    }

    fn scatter(&mut self, points: &[Point], style: &MarkerStyle) -> Result<(), MapError> {
        self.commands
            .push(Command::Scatter(points.to_vec(), style.clone()));
        Ok(())
    }

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle) -> Result<(), MapError> {
        self.commands.push(Command::Shape(*shape, style.clone()));
        Ok(())
    }

    fn add_legend(&mut self, legend: &Legend) -> Result<(), MapError> {
        self.commands.push(Command::Legend(legend.clone()));
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), MapError> {
        self.commands.push(Command::Title(title.to_string()));
        Ok(())
    }
}

fn setup_context(ctx: &CairoContext) -> Result<()> {
    ctx.set_source_rgb(1.0, 1.0, 1.0);
    ctx.paint()?;
    set_color(ctx, FRAME_COLOR, 1.0);
    ctx.set_line_width(FRAME_WIDTH);
    ctx.set_line_cap(LineCap::Round);
    Ok(())
}

fn create_png_surface(width: i32, height: i32) -> Result<(ImageSurface, CairoContext)> {
    let surface = ImageSurface::create(Format::ARgb32, width, height)
        .context("Failed to create image surface")?;
    let ctx = CairoContext::new(&surface).context("Failed to create Cairo context")?;
    Ok((surface, ctx))
}

fn set_color(ctx: &CairoContext, color: Color, alpha: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, alpha);
}

/// Run `draw` with drawing restricted to the map frame.
fn clipped<F>(ctx: &CairoContext, rect: PixelRect, draw: F) -> Result<()>
where
    F: FnOnce(&CairoContext) -> Result<()>,
{
    ctx.save()?;
    ctx.new_path();
    ctx.rectangle(rect.x0, rect.y0, rect.width, rect.height);
    ctx.clip();
    let result = draw(ctx);
    ctx.restore()?;
    result
}

fn draw_background(ctx: &CairoContext, layout: &PageLayout) -> Result<()> {
    let map = layout.map;
    ctx.new_path();
    ctx.rectangle(map.x0, map.y0, map.width, map.height);
    set_color(ctx, LAND_COLOR, 1.0);
    ctx.fill()?;
    draw_graticule(ctx, layout)?;
    ctx.rectangle(map.x0, map.y0, map.width, map.height);
    set_color(ctx, FRAME_COLOR, 1.0);
    ctx.set_line_width(FRAME_WIDTH);
    ctx.stroke()?;
    Ok(())
}

/// Parallels and meridians at a round step, labelled outside the frame.
fn draw_graticule(ctx: &CairoContext, layout: &PageLayout) -> Result<()> {
    let extent = layout.extent;
    let step = graticule_step(extent.width().max(extent.height()));
    let map = layout.map;

    ctx.set_line_width(GRID_WIDTH);
    for lon in grid_values(extent.min_x, extent.max_x, step) {
        let top = layout.transform.map_point(Point::new(lon, extent.max_y));
        ctx.move_to(top.x, map.y0);
        ctx.line_to(top.x, map.y0 + map.height);
        set_color(ctx, GRID_COLOR, GRID_ALPHA);
        ctx.stroke()?;
        let label = format_degrees(lon, step, 'E', 'W');
        draw_text_centered(
            ctx,
            Point::new(top.x, map.y0 + map.height + FONT_SMALL_PX),
            &label,
            FONT_SMALL_PX,
        )?;
    }
    ctx.set_line_width(GRID_WIDTH);
    for lat in grid_values(extent.min_y, extent.max_y, step) {
        let left = layout.transform.map_point(Point::new(extent.min_x, lat));
        ctx.move_to(map.x0, left.y);
        ctx.line_to(map.x0 + map.width, left.y);
        set_color(ctx, GRID_COLOR, GRID_ALPHA);
        ctx.stroke()?;
        let label = format_degrees(lat, step, 'N', 'S');
        let width = measure_text_width(ctx, &label, FONT_SMALL_PX);
        draw_text_centered(
            ctx,
            Point::new(map.x0 - width / 2.0 - 4.0, left.y),
            &label,
            FONT_SMALL_PX,
        )?;
    }
    Ok(())
}

/// Smallest round step that keeps the grid at or below `MAX_GRID_LINES`.
fn graticule_step(span: f64) -> f64 {
    GRID_STEPS
        .iter()
        .copied()
        .find(|step| span / step <= MAX_GRID_LINES)
        .unwrap_or(90.0)
}

fn grid_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

fn format_degrees(value: f64, step: f64, positive: char, negative: char) -> String {
    let hemisphere = if value > 0.0 {
        Some(positive)
    } else if value < 0.0 {
        Some(negative)
    } else {
        None
    };
    let magnitude = value.abs();
    let digits = if step >= 1.0 { 0 } else if step >= 0.5 { 1 } else { 2 };
    match hemisphere {
        Some(h) => format!("{magnitude:.digits$}°{h}"),
        None => format!("{magnitude:.digits$}°"),
    }
}

fn draw_line(
    ctx: &CairoContext,
    layout: &PageLayout,
    from: Point,
    to: Point,
    style: &LineStyle,
) -> Result<()> {
    let a = layout.transform.map_point(from);
    let b = layout.transform.map_point(to);
    ctx.new_path();
    ctx.move_to(a.x, a.y);
    ctx.line_to(b.x, b.y);
    set_color(ctx, style.color, style.alpha);
    ctx.set_line_width(style.width);
    ctx.stroke()?;
    Ok(())
}

fn draw_scatter(
    ctx: &CairoContext,
    layout: &PageLayout,
    points: &[Point],
    style: &MarkerStyle,
) -> Result<()> {
    // `size` is the marker area in pt^2, as in matplotlib.
    let radius = style.size.sqrt() / 2.0 * PX_PER_PT;
    for &pt in points {
        let center = layout.transform.map_point(pt);
        ctx.new_path();
        ctx.arc(center.x, center.y, radius, 0.0, TAU);
        set_color(ctx, style.color, style.alpha);
        ctx.fill_preserve()?;
        set_color(ctx, style.edge_color, style.alpha);
        ctx.set_line_width(style.edge_width);
        ctx.stroke()?;
    }
    Ok(())
}

fn shape_to_pixels(transform: &Transform, shape: &Shape) -> Shape {
    shape.placed(
        transform.map_point(shape.center()),
        transform.scale_scalar(shape.radius()),
    )
}

/// Trace `shape`, given in pixel space, as the current path.
///
/// Device y grows downwards, so counter-clockwise wedges are traced with
/// negated angles.
fn path_shape(ctx: &CairoContext, shape: &Shape) {
    ctx.new_path();
    match *shape {
        Shape::Circle { center, radius } => {
            ctx.arc(center.x, center.y, radius, 0.0, TAU);
        }
        Shape::Wedge {
            center,
            radius,
            theta1,
            theta2,
        } => {
            ctx.move_to(center.x, center.y);
            ctx.arc_negative(
                center.x,
                center.y,
                radius,
                -theta1.to_radians(),
                -theta2.to_radians(),
            );
            ctx.close_path();
        }
    }
}

fn draw_shape_px(ctx: &CairoContext, shape: &Shape, style: &ShapeStyle) -> Result<()> {
    if shape.radius().is_nan() || shape.radius() <= 0.0 {
        return Ok(());
    }
    path_shape(ctx, shape);
    if let Some(fill) = style.fill {
        set_color(ctx, fill, 1.0);
        ctx.fill_preserve()?;
    }
    if style.edge_width > 0.0 {
        set_color(ctx, style.edge_color, 1.0);
        ctx.set_line_width(style.edge_width);
        ctx.stroke()?;
    } else {
        ctx.new_path();
    }
    Ok(())
}

fn draw_legend(ctx: &CairoContext, layout: &PageLayout, legend: &Legend) -> Result<()> {
    let radii: Vec<f64> = legend
        .entries
        .iter()
        .map(|entry| match entry.units {
            MarkerUnits::Pixels => entry.shape.radius(),
            MarkerUnits::Map => layout.transform.scale_scalar(entry.shape.radius()),
        })
        .collect();
    let marker_width = radii.iter().copied().fold(0.0, f64::max) * 2.0;
    let title_height = if legend.title.is_empty() {
        0.0
    } else {
        FONT_MAIN_PX + LEGEND_ROW_GAP_PX
    };
    let row_heights: Vec<f64> = radii
        .iter()
        .map(|r| (2.0 * r).max(FONT_MAIN_PX) + LEGEND_ROW_GAP_PX)
        .collect();
    let label_width = legend
        .entries
        .iter()
        .map(|entry| measure_text_width(ctx, &entry.label, FONT_MAIN_PX))
        .fold(0.0, f64::max);
    let title_width = measure_text_width(ctx, &legend.title, FONT_MAIN_PX);
    let width = (marker_width + LEGEND_LABEL_GAP_PX + label_width).max(title_width)
        + 2.0 * LEGEND_PAD_PX;
    let height = title_height + row_heights.iter().sum::<f64>() + 2.0 * LEGEND_PAD_PX;

    let map = layout.map;
    let x0 = map.x0 + LEGEND_PAD_PX;
    let y0 = match legend.location {
        LegendLocation::UpperLeft => map.y0 + LEGEND_PAD_PX,
        LegendLocation::LowerLeft => map.y0 + map.height - LEGEND_PAD_PX - height,
    };

    ctx.new_path();
    ctx.rectangle(x0, y0, width, height);
    set_color(ctx, Color::WHITE, LEGEND_ALPHA);
    ctx.fill_preserve()?;
    set_color(ctx, FRAME_COLOR, 1.0);
    ctx.set_line_width(FRAME_WIDTH);
    ctx.stroke()?;

    let mut y = y0 + LEGEND_PAD_PX;
    if !legend.title.is_empty() {
        draw_text_centered(
            ctx,
            Point::new(x0 + width / 2.0, y + FONT_MAIN_PX / 2.0),
            &legend.title,
            FONT_MAIN_PX,
        )?;
        y += title_height;
    }
    for ((entry, radius), row_height) in legend.entries.iter().zip(&radii).zip(&row_heights) {
        let center_y = y + (row_height - LEGEND_ROW_GAP_PX) / 2.0;
        let center = Point::new(x0 + LEGEND_PAD_PX + marker_width / 2.0, center_y);
        let marker = entry.shape.placed(center, *radius);
        draw_shape_px(ctx, &marker, &entry.style)?;
        let label_width = measure_text_width(ctx, &entry.label, FONT_MAIN_PX);
        draw_text_centered(
            ctx,
            Point::new(
                x0 + LEGEND_PAD_PX + marker_width + LEGEND_LABEL_GAP_PX + label_width / 2.0,
                center_y,
            ),
            &entry.label,
            FONT_MAIN_PX,
        )?;
        y += row_height;
    }
    Ok(())
}

fn draw_title(ctx: &CairoContext, layout: &PageLayout, title: &str) -> Result<()> {
    let center = Point::new(
        layout.map.x0 + layout.map.width / 2.0,
        MARGIN_TOP_PX / 2.0,
    );
    draw_text_centered(ctx, center, title, FONT_TITLE_PX)
}

/// Measure label width using the current Cairo/Pango context.
fn measure_text_width(ctx: &CairoContext, text: &str, font_px: f64) -> f64 {
    let layout = pangocairo::create_layout(ctx);
    let mut font_desc = FontDescription::from_string(FONT_FAMILY);
    font_desc.set_absolute_size(font_px * pango::SCALE as f64);
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);
    let (width, _) = layout.pixel_size();
    width as f64
}

fn draw_text_centered(ctx: &CairoContext, center: Point, text: &str, font_px: f64) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let layout = pangocairo::create_layout(ctx);
    let mut font_desc = FontDescription::from_string(FONT_FAMILY);
    font_desc.set_absolute_size(font_px * pango::SCALE as f64);
    layout.set_font_description(Some(&font_desc));
    layout.set_alignment(Alignment::Center);
    layout.set_text(text);

    let (width, height) = layout.pixel_size();
    let x = center.x - width as f64 / 2.0;
    let y = center.y - height as f64 / 2.0;
    draw_text_at(ctx, x, y, &layout)
}

/// Draw text with an outline at the given top-left position.
fn draw_text_at(ctx: &CairoContext, x: f64, y: f64, layout: &pango::Layout) -> Result<()> {
    ctx.new_path();
    ctx.move_to(x, y);
    pangocairo::layout_path(ctx, layout);
    if TEXT_OUTLINE_WIDTH > 0.0 {
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.set_line_width(TEXT_OUTLINE_WIDTH);
        ctx.stroke_preserve()?;
    }
    set_color(ctx, TEXT_COLOR, 1.0);
    ctx.fill()?;
    Ok(())
}
