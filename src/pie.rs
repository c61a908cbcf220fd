//! Pie glyphs: wedge sectors proportional to category fractions, topped by
//! a thin outline circle.

use crate::canvas::{MapCanvas, Point};
use crate::color::Color;
use crate::shape::{Shape, ShapeStyle};
use crate::MapError;

const WEDGE_EDGE_WIDTH: f64 = 0.3;
const OUTLINE_WIDTH: f64 = 0.4;

/// Shares of `row` in its total. Empty when the total is not positive.
pub fn fractions(row: &[f64]) -> Vec<f64> {
    let total: f64 = row.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return Vec::new();
    }
    row.iter().map(|value| value / total).collect()
}

/// Shapes making up one pie, in draw order.
///
/// Sectors start at 0° and advance by `fraction * 360°`; non-positive
/// fractions are skipped. The outline circle comes last. Returns nothing
/// for a non-positive or NaN radius or an empty slice list.
pub fn pie_shapes(center: Point, radius: f64, slices: &[(f64, Color)]) -> Vec<(Shape, ShapeStyle)> {
    if radius.is_nan() || radius <= 0.0 || slices.is_empty() {
        return Vec::new();
    }
    let mut shapes = Vec::with_capacity(slices.len() + 1);
    let mut start = 0.0;
    for &(frac, color) in slices {
        if frac.is_nan() || frac <= 0.0 {
            continue;
        }
        shapes.push((
            Shape::Wedge {
                center,
                radius,
                theta1: start * 360.0,
                theta2: (start + frac) * 360.0,
            },
            ShapeStyle::filled(color, Color::WHITE, WEDGE_EDGE_WIDTH),
        ));
        start += frac;
    }
    shapes.push((
        Shape::Circle { center, radius },
        ShapeStyle::outline(Color::BLACK, OUTLINE_WIDTH),
    ));
    shapes
}

/// Draw one pie glyph onto `canvas`. Returns whether anything was drawn.
pub fn draw_pie<C: MapCanvas + ?Sized>(
    canvas: &mut C,
    center: Point,
    radius: f64,
    slices: &[(f64, Color)],
) -> Result<bool, MapError> {
    let shapes = pie_shapes(center, radius, slices);
    for (shape, style) in &shapes {
        canvas.draw_shape(shape, style)?;
    }
    Ok(!shapes.is_empty())
}
