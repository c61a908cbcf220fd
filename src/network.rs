//! In-memory tables of an energy-system network: buses with coordinates,
//! transmission lines, generators and storage units, plus the snapshot
//! weightings used for temporal aggregation.

use std::collections::HashMap;

use tracing::debug;

use crate::canvas::Point;
use crate::MapError;

/// A network bus. Coordinates are longitude/latitude in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Bus {
    pub id: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

/// A transmission line between two buses; only the topology is used.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub bus0: String,
    pub bus1: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Generator {
    pub id: String,
    pub bus: String,
    pub carrier: String,
    /// Optimised nominal power in MW.
    pub p_nom_opt: Option<f64>,
    /// Dispatch per snapshot in MW.
    pub p: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StorageUnit {
    pub id: String,
    pub bus: String,
    pub carrier: String,
    /// Optimised nominal power in MW.
    pub p_nom_opt: Option<f64>,
    /// Energy-to-power ratio in hours.
    pub max_hours: Option<f64>,
    /// Dispatch per snapshot in MW, positive when discharging.
    pub p: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
    pub buses: Vec<Bus>,
    pub lines: Vec<Line>,
    pub generators: Vec<Generator>,
    pub storage_units: Vec<StorageUnit>,
    /// Per-snapshot generator weightings, when the network defines them.
    pub snapshot_weightings: Option<Vec<f64>>,
}

impl Network {
    /// Map points of the buses that have finite `x` and `y`.
    ///
    /// Buses without usable coordinates are left out, so assets on them can
    /// be skipped downstream. Fails only when no bus has coordinates at all,
    /// since no extent can be derived then.
    pub(crate) fn bus_coordinates(&self) -> Result<HashMap<&str, Point>, MapError> {
        let coords: HashMap<&str, Point> = self
            .buses
            .iter()
            .filter(|bus| is_coordinate(bus.x) && is_coordinate(bus.y))
            .filter_map(|bus| Some((bus.id.as_str(), Point::new(bus.x?, bus.y?))))
            .collect();
        if coords.is_empty() {
            return Err(MapError::MissingCoordinates(format!(
                "buses must have 'x' and 'y' (lon/lat degrees), none of {} do",
                self.buses.len()
            )));
        }
        let skipped = self.buses.len() - coords.len();
        if skipped > 0 {
            debug!(skipped, "buses without coordinates left off the map");
        }
        Ok(coords)
    }
}

fn is_coordinate(value: Option<f64>) -> bool {
    value.is_some_and(f64::is_finite)
}
