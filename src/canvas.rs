//! The drawing surface the map composer talks to.
//!
//! Coordinates handed to a [`MapCanvas`] are always map coordinates
//! (longitude/latitude degrees); projecting them to device space is the
//! backend's business.

use crate::color::Color;
use crate::legend::Legend;
use crate::shape::{Shape, ShapeStyle};
use crate::MapError;

/// Fraction of the data span added on every side of the map extent.
pub const EXTENT_PADDING: f64 = 0.03;
/// Half-width used when all buses share a longitude or latitude.
const DEGENERATE_HALF_SPAN: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible map window in map coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extent {
    /// Bounding box of `points` padded by [`EXTENT_PADDING`] of the span on
    /// each side. Returns `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let bounds = iter.fold(
            Extent {
                min_x: first.x,
                max_x: first.x,
                min_y: first.y,
                max_y: first.y,
            },
            |acc, pt| Extent {
                min_x: acc.min_x.min(pt.x),
                max_x: acc.max_x.max(pt.x),
                min_y: acc.min_y.min(pt.y),
                max_y: acc.max_y.max(pt.y),
            },
        );
        Some(bounds.padded())
    }

    fn padded(self) -> Self {
        let (min_x, max_x) = pad_axis(self.min_x, self.max_x);
        let (min_y, max_y) = pad_axis(self.min_y, self.max_y);
        Extent {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

fn pad_axis(min: f64, max: f64) -> (f64, f64) {
    let span = max - min;
    if span > 0.0 {
        (min - EXTENT_PADDING * span, max + EXTENT_PADDING * span)
    } else {
        (min - DEGENERATE_HALF_SPAN, max + DEGENERATE_HALF_SPAN)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub alpha: f64,
}

/// Style of scatter markers. `size` is a marker area in square points.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerStyle {
    pub color: Color,
    pub size: f64,
    pub alpha: f64,
    pub edge_color: Color,
    pub edge_width: f64,
}

/// A map canvas backend.
///
/// Calls arrive in painter's order: whatever is drawn later sits on top.
pub trait MapCanvas {
    /// Fix the visible window. Called once, before anything is drawn.
    fn set_extent(&mut self, extent: Extent) -> Result<(), MapError>;

    /// Paint background layers (land fill, graticule) for the current extent.
    fn draw_background(&mut self) -> Result<(), MapError>;

    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) -> Result<(), MapError>;

    fn scatter(&mut self, points: &[Point], style: &MarkerStyle) -> Result<(), MapError>;

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle) -> Result<(), MapError>;

    /// Add a legend as an independent overlay; earlier legends stay visible.
    fn add_legend(&mut self, legend: &Legend) -> Result<(), MapError>;

    fn set_title(&mut self, title: &str) -> Result<(), MapError>;
}
