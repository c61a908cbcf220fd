//! Shared fixtures for unit tests: an in-memory canvas and small networks.

use crate::canvas::{Extent, LineStyle, MapCanvas, MarkerStyle, Point};
use crate::legend::Legend;
use crate::network::{Bus, Generator, Line, Network, StorageUnit};
use crate::shape::{Shape, ShapeStyle};
use crate::MapError;

/// One call received by a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Drawn {
    Extent(Extent),
    Background,
    Line(Point, Point, LineStyle),
    Scatter(Vec<Point>, MarkerStyle),
    Shape(Shape, ShapeStyle),
    Legend(Legend),
    Title(String),
}

/// A [`MapCanvas`] that only remembers what it was asked to draw.
#[derive(Debug, Default)]
pub(crate) struct RecordingCanvas {
    pub(crate) ops: Vec<Drawn>,
}

impl RecordingCanvas {
    pub(crate) fn shapes(&self) -> Vec<Shape> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Drawn::Shape(shape, _) => Some(*shape),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn legends(&self) -> Vec<&Legend> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Drawn::Legend(legend) => Some(legend),
                _ => None,
            })
            .collect()
    }
}

impl MapCanvas for RecordingCanvas {
    fn set_extent(&mut self, extent: Extent) -> Result<(), MapError> {
        self.ops.push(Drawn::Extent(extent));
        Ok(())
    }

    fn draw_background(&mut self) -> Result<(), MapError> {
        self.ops.push(Drawn::Background);
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) -> Result<(), MapError> {
        self.ops.push(Drawn::Line(from, to, style.clone()));
        Ok(())
    }

    fn scatter(&mut self, points: &[Point], style: &MarkerStyle) -> Result<(), MapError> {
        self.ops.push(Drawn::Scatter(points.to_vec(), style.clone()));
        Ok(())
    }

    fn draw_shape(&mut self, shape: &Shape, style: &ShapeStyle) -> Result<(), MapError> {
        self.ops.push(Drawn::Shape(*shape, style.clone()));
        Ok(())
    }

    fn add_legend(&mut self, legend: &Legend) -> Result<(), MapError> {
        self.ops.push(Drawn::Legend(legend.clone()));
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<(), MapError> {
        self.ops.push(Drawn::Title(title.to_string()));
        Ok(())
    }
}

pub(crate) fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(crate) fn generator(id: &str, bus: &str, carrier: &str, p_nom_opt: f64) -> Generator {
    Generator {
        id: id.to_string(),
        bus: bus.to_string(),
        carrier: carrier.to_string(),
        p_nom_opt: Some(p_nom_opt),
        p: None,
    }
}

pub(crate) fn storage_unit(
    id: &str,
    bus: &str,
    carrier: &str,
    p_nom_opt: f64,
    max_hours: Option<f64>,
) -> StorageUnit {
    StorageUnit {
        id: id.to_string(),
        bus: bus.to_string(),
        carrier: carrier.to_string(),
        p_nom_opt: Some(p_nom_opt),
        max_hours,
        p: None,
    }
}

/// Buses `A(0, 0)` and `B(1, 1)` joined by one line, with generators
/// `(A, wind, 10)`, `(A, gas, 5)` and `(B, gas, 20)`.
pub(crate) fn two_bus_network() -> Network {
    Network {
        buses: vec![
            Bus {
                id: "A".to_string(),
                x: Some(0.0),
                y: Some(0.0),
            },
            Bus {
                id: "B".to_string(),
                x: Some(1.0),
                y: Some(1.0),
            },
        ],
        lines: vec![Line {
            bus0: "A".to_string(),
            bus1: "B".to_string(),
        }],
        generators: vec![
            generator("g1", "A", "wind", 10.0),
            generator("g2", "A", "gas", 5.0),
            generator("g3", "B", "gas", 20.0),
        ],
        storage_units: Vec::new(),
        snapshot_weightings: None,
    }
}
