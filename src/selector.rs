//! Value selectors: which attribute of an asset drives the glyph size.

use std::fmt;
use std::str::FromStr;

use crate::MapError;

/// Physical unit of an aggregated value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Mw,
    Mwh,
}

impl Unit {
    /// Suffix for the same quantity expressed in thousands (GW / GWh).
    pub fn kilo_suffix(self) -> &'static str {
        match self {
            Unit::Mw => "GW",
            Unit::Mwh => "GWh",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Mw => write!(f, "MW"),
            Unit::Mwh => write!(f, "MWh"),
        }
    }
}

/// Common behaviour of the per-kind selector enums.
pub trait ValueSelector: Copy + fmt::Debug + fmt::Display + FromStr<Err = MapError> {
    fn unit(self) -> Unit;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GeneratorValue {
    /// Optimised nominal power.
    #[default]
    Capacity,
    /// Dispatched energy summed over snapshots.
    Energy,
}

impl GeneratorValue {
    pub const VALID: &'static [&'static str] = &["capacity", "energy"];
}

impl ValueSelector for GeneratorValue {
    fn unit(self) -> Unit {
        match self {
            GeneratorValue::Capacity => Unit::Mw,
            GeneratorValue::Energy => Unit::Mwh,
        }
    }
}

impl fmt::Display for GeneratorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeneratorValue::Capacity => "capacity",
            GeneratorValue::Energy => "energy",
        };
        f.write_str(name)
    }
}

impl FromStr for GeneratorValue {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capacity" => Ok(GeneratorValue::Capacity),
            "energy" => Ok(GeneratorValue::Energy),
            _ => Err(MapError::InvalidSelector {
                given: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageValue {
    /// `p_nom_opt * max_hours`.
    #[default]
    EnergyCapacity,
    /// `p_nom_opt`.
    PowerCapacity,
    /// Dispatched energy summed over snapshots.
    EnergyDispatch,
}

impl StorageValue {
    pub const VALID: &'static [&'static str] =
        &["energy_capacity", "power_capacity", "energy_dispatch"];
}

impl ValueSelector for StorageValue {
    fn unit(self) -> Unit {
        match self {
            StorageValue::PowerCapacity => Unit::Mw,
            StorageValue::EnergyCapacity | StorageValue::EnergyDispatch => Unit::Mwh,
        }
    }
}

impl fmt::Display for StorageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageValue::EnergyCapacity => "energy_capacity",
            StorageValue::PowerCapacity => "power_capacity",
            StorageValue::EnergyDispatch => "energy_dispatch",
        };
        f.write_str(name)
    }
}

impl FromStr for StorageValue {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energy_capacity" => Ok(StorageValue::EnergyCapacity),
            "power_capacity" => Ok(StorageValue::PowerCapacity),
            "energy_dispatch" => Ok(StorageValue::EnergyDispatch),
            _ => Err(MapError::InvalidSelector {
                given: s.to_string(),
                valid: Self::VALID,
            }),
        }
    }
}
