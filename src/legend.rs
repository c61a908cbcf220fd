//! Legend contents: category identity and glyph size reference.
//!
//! Legends are plain data. The canvas lays them out and draws each marker
//! through the same shape path used for glyphs.

use crate::canvas::Point;
use crate::color::Color;
use crate::radius::RadiusScale;
use crate::selector::Unit;
use crate::shape::{Shape, ShapeStyle};

/// Radius of category markers, in device pixels.
pub const CATEGORY_MARKER_RADIUS_PX: f64 = 5.0;
const SIZE_MARKER_EDGE_WIDTH: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendLocation {
    UpperLeft,
    LowerLeft,
}

/// Units a legend marker's radius is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerUnits {
    /// Device pixels, independent of zoom.
    Pixels,
    /// Map units, so the marker matches glyphs drawn on the map.
    Map,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    /// Marker shape centred on the origin; the canvas moves it into place.
    pub shape: Shape,
    pub style: ShapeStyle,
    pub units: MarkerUnits,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub title: String,
    pub location: LegendLocation,
    pub entries: Vec<LegendEntry>,
}

/// One filled marker per `(category, color)` pair, in the given order.
pub fn category_legend<'a, I>(
    title: &str,
    location: LegendLocation,
    categories: I,
    edge: (Color, f64),
) -> Legend
where
    I: IntoIterator<Item = (&'a str, Color)>,
{
    let entries = categories
        .into_iter()
        .map(|(category, color)| LegendEntry {
            label: category.to_string(),
            shape: Shape::Circle {
                center: Point::new(0.0, 0.0),
                radius: CATEGORY_MARKER_RADIUS_PX,
            },
            style: ShapeStyle::filled(color, edge.0, edge.1),
            units: MarkerUnits::Pixels,
        })
        .collect();
    Legend {
        title: title.to_string(),
        location,
        entries,
    }
}

/// Outline circles for `magnitudes`, sized through `scale`.
///
/// Returns `None` when there is nothing to annotate.
pub fn size_legend(
    title: &str,
    location: LegendLocation,
    magnitudes: &[f64],
    scale: &RadiusScale,
    unit: Unit,
) -> Option<Legend> {
    if magnitudes.is_empty() {
        return None;
    }
    let entries = magnitudes
        .iter()
        .map(|&magnitude| LegendEntry {
            label: size_label(magnitude, unit),
            shape: Shape::Circle {
                center: Point::new(0.0, 0.0),
                radius: scale.radius(magnitude),
            },
            style: ShapeStyle::outline(Color::BLACK, SIZE_MARKER_EDGE_WIDTH),
            units: MarkerUnits::Map,
        })
        .collect();
    Some(Legend {
        title: title.to_string(),
        location,
        entries,
    })
}

/// `magnitude` in thousands of `unit`, truncated to one decimal.
pub fn size_label(magnitude: f64, unit: Unit) -> String {
    let thousands = (magnitude / 1e3 * 10.0).trunc() / 10.0;
    format!("{thousands:.1} {}", unit.kilo_suffix())
}
