//! Shape descriptions shared by glyphs and legend markers.

use crate::canvas::Point;
use crate::color::Color;

/// A closed shape in map coordinates.
///
/// Angles are in degrees, counter-clockwise from the positive x axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle {
        center: Point,
        radius: f64,
    },
    Wedge {
        center: Point,
        radius: f64,
        theta1: f64,
        theta2: f64,
    },
}

impl Shape {
    pub fn center(&self) -> Point {
        match *self {
            Shape::Circle { center, .. } | Shape::Wedge { center, .. } => center,
        }
    }

    pub fn radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius, .. } | Shape::Wedge { radius, .. } => radius,
        }
    }

    /// The same shape moved to `center` with a new radius.
    pub fn placed(self, center: Point, radius: f64) -> Self {
        match self {
            Shape::Circle { .. } => Shape::Circle { center, radius },
            Shape::Wedge { theta1, theta2, .. } => Shape::Wedge {
                center,
                radius,
                theta1,
                theta2,
            },
        }
    }
}

/// Fill and outline of a [`Shape`]. `None` fill draws the outline only.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Color>,
    pub edge_color: Color,
    pub edge_width: f64,
}

impl ShapeStyle {
    pub fn filled(fill: Color, edge_color: Color, edge_width: f64) -> Self {
        Self {
            fill: Some(fill),
            edge_color,
            edge_width,
        }
    }

    pub fn outline(edge_color: Color, edge_width: f64) -> Self {
        Self {
            fill: None,
            edge_color,
            edge_width,
        }
    }
}
