//! The configuration record accepted by both map entry points.

use std::fmt;
use std::str::FromStr;

use crate::color::Color;
use crate::radius::RadiusFractions;
use crate::selector::{GeneratorValue, StorageValue, ValueSelector};
use crate::MapError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapMode {
    /// One point per asset, colored by carrier.
    Scatter,
    /// One pie per bus, sized by the bus total.
    Pies,
}

impl MapMode {
    pub const VALID: &'static [&'static str] = &["scatter", "pies"];
}

impl fmt::Display for MapMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapMode::Scatter => f.write_str("scatter"),
            MapMode::Pies => f.write_str("pies"),
        }
    }
}

impl FromStr for MapMode {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scatter" => Ok(MapMode::Scatter),
            "pies" => Ok(MapMode::Pies),
            _ => Err(MapError::InvalidMode {
                given: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

/// Every option of a proportional-symbol map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig<S> {
    pub mode: MapMode,
    /// Carriers to show, in legend and pie order. `None` shows all carriers
    /// present in the data, in order of first appearance.
    pub carriers: Option<Vec<String>>,
    pub value: S,
    /// Total drawn at the maximum radius. Defaults to the largest bus total.
    pub size_reference: Option<f64>,
    /// Example totals shown in the size legend.
    pub annotate_sizes: Vec<f64>,
    /// Carrier colors; carriers not listed take palette colors.
    pub carrier_colors: Option<Vec<(String, Color)>>,
    /// Draw transmission lines under the glyphs.
    pub plot_lines: bool,
    pub line_width: f64,
    /// Scatter marker area in square points.
    pub scatter_size: f64,
    pub title: Option<String>,
    pub radius_fractions: RadiusFractions,
}

impl Default for MapConfig<GeneratorValue> {
    fn default() -> Self {
        Self {
            mode: MapMode::Scatter,
            carriers: None,
            value: GeneratorValue::Capacity,
            size_reference: None,
            annotate_sizes: vec![2e3, 10e3, 25e3],
            carrier_colors: None,
            plot_lines: true,
            line_width: 0.4,
            scatter_size: 10.0,
            title: None,
            radius_fractions: RadiusFractions::GENERATORS,
        }
    }
}

impl Default for MapConfig<StorageValue> {
    fn default() -> Self {
        Self {
            mode: MapMode::Pies,
            carriers: None,
            value: StorageValue::EnergyCapacity,
            size_reference: None,
            annotate_sizes: vec![5e3, 20e3, 50e3],
            carrier_colors: None,
            plot_lines: true,
            line_width: 0.4,
            scatter_size: 12.0,
            title: None,
            radius_fractions: RadiusFractions::STORAGE,
        }
    }
}

impl<S: ValueSelector> MapConfig<S> {
    /// Reject numeric options that cannot produce a sensible map.
    pub fn validate(&self) -> Result<(), MapError> {
        if let Some(reference) = self.size_reference {
            if !(reference.is_finite() && reference > 0.0) {
                return Err(MapError::InvalidOption(format!(
                    "size_reference must be a positive number, got {reference}"
                )));
            }
        }
        if let Some(bad) = self.annotate_sizes.iter().find(|s| !s.is_finite()) {
            return Err(MapError::InvalidOption(format!(
                "annotate_sizes must be finite, got {bad}"
            )));
        }
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(MapError::InvalidOption(format!(
                "line_width must be non-negative, got {}",
                self.line_width
            )));
        }
        if !(self.scatter_size.is_finite() && self.scatter_size > 0.0) {
            return Err(MapError::InvalidOption(format!(
                "scatter_size must be positive, got {}",
                self.scatter_size
            )));
        }
        let RadiusFractions { min, max } = self.radius_fractions;
        if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max && max > 0.0) {
            return Err(MapError::InvalidOption(format!(
                "radius fractions must satisfy 0 <= min <= max, max > 0, got min={min} max={max}"
            )));
        }
        Ok(())
    }
}
