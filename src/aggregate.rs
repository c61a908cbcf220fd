//! Per-(bus, carrier) aggregation of asset attributes.
//!
//! The result is a dense node × category matrix. Rows are the buses that
//! carry at least one selected asset, sorted by bus id; columns follow the
//! resolved category order exactly. Cells without any asset hold `0.0`.

use std::collections::BTreeMap;

use crate::network::{Generator, StorageUnit};
use crate::selector::{GeneratorValue, StorageValue, ValueSelector};

/// An asset that can be placed on the map and aggregated per bus.
pub trait Asset {
    type Value: ValueSelector;

    fn id(&self) -> &str;
    fn bus(&self) -> &str;
    fn carrier(&self) -> &str;

    /// Value of this asset under `selector`. Never negative; missing
    /// attributes count as zero.
    fn value(&self, selector: Self::Value, weights: Option<&[f64]>) -> f64;
}

impl Asset for Generator {
    type Value = GeneratorValue;

    fn id(&self) -> &str {
        &self.id
    }

    fn bus(&self) -> &str {
        &self.bus
    }

    fn carrier(&self) -> &str {
        &self.carrier
    }

    fn value(&self, selector: GeneratorValue, weights: Option<&[f64]>) -> f64 {
        let raw = match selector {
            GeneratorValue::Capacity => self.p_nom_opt.unwrap_or(0.0),
            GeneratorValue::Energy => time_sum(self.p.as_deref(), weights),
        };
        non_negative(raw)
    }
}

impl Asset for StorageUnit {
    type Value = StorageValue;

    fn id(&self) -> &str {
        &self.id
    }

    fn bus(&self) -> &str {
        &self.bus
    }

    fn carrier(&self) -> &str {
        &self.carrier
    }

    fn value(&self, selector: StorageValue, weights: Option<&[f64]>) -> f64 {
        let p_nom = non_negative(self.p_nom_opt.unwrap_or(0.0));
        let raw = match selector {
            StorageValue::EnergyCapacity => p_nom * non_negative(self.max_hours.unwrap_or(0.0)),
            StorageValue::PowerCapacity => p_nom,
            StorageValue::EnergyDispatch => time_sum(self.p.as_deref(), weights),
        };
        non_negative(raw)
    }
}

/// Sum a time series, weighting each step when `weights` lines up with it.
///
/// A weighting vector of a different length is ignored and the plain sum is
/// returned. NaN steps count as zero; a missing series sums to zero.
pub fn time_sum(series: Option<&[f64]>, weights: Option<&[f64]>) -> f64 {
    let Some(series) = series else {
        return 0.0;
    };
    match weights {
        Some(weights) if weights.len() == series.len() => series
            .iter()
            .zip(weights)
            .map(|(p, w)| p * w)
            .filter(|v| !v.is_nan())
            .sum(),
        _ => series.iter().filter(|p| !p.is_nan()).sum(),
    }
}

fn non_negative(value: f64) -> f64 {
    // `max` returns the non-NaN operand, so NaN maps to zero as well.
    value.max(0.0)
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeCategoryMatrix {
    nodes: Vec<String>,
    categories: Vec<String>,
    values: Vec<f64>,
}

impl NodeCategoryMatrix {
    /// Group `(bus, carrier, value)` rows by bus and carrier and sum them.
    ///
    /// Rows whose carrier is not in `categories` are ignored. Categories with
    /// no rows still get a column of zeros.
    pub fn aggregate<'a, I>(rows: I, categories: &[String]) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let width = categories.len();
        let mut grouped: BTreeMap<&'a str, Vec<f64>> = BTreeMap::new();
        for (bus, carrier, value) in rows {
            let Some(col) = categories.iter().position(|c| c == carrier) else {
                continue;
            };
            grouped.entry(bus).or_insert_with(|| vec![0.0; width])[col] += value;
        }

        let mut nodes = Vec::with_capacity(grouped.len());
        let mut values = Vec::with_capacity(grouped.len() * width);
        for (bus, row) in grouped {
            nodes.push(bus.to_string());
            values.extend(row);
        }
        Self {
            nodes,
            categories: categories.to_vec(),
            values,
        }
    }

    /// Aggregate `assets` under `selector`, optionally time-weighted.
    pub fn from_assets<A: Asset>(
        assets: &[A],
        selector: A::Value,
        weights: Option<&[f64]>,
        categories: &[String],
    ) -> Self {
        Self::aggregate(
            assets
                .iter()
                .map(|asset| (asset.bus(), asset.carrier(), asset.value(selector, weights))),
            categories,
        )
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn row(&self, index: usize) -> &[f64] {
        let width = self.categories.len();
        &self.values[index * width..(index + 1) * width]
    }

    /// Iterate `(node, row)` pairs in node order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (node.as_str(), self.row(idx)))
    }

    /// Cell value; `0.0` for unknown nodes or categories.
    pub fn value(&self, node: &str, category: &str) -> f64 {
        let row = self.nodes.iter().position(|n| n == node);
        let col = self.categories.iter().position(|c| c == category);
        match (row, col) {
            (Some(row), Some(col)) => self.row(row)[col],
            _ => 0.0,
        }
    }

    pub fn total(&self, node: &str) -> f64 {
        self.nodes
            .iter()
            .position(|n| n == node)
            .map(|idx| self.row(idx).iter().sum())
            .unwrap_or(0.0)
    }

    /// Drop every node whose total is not strictly positive.
    pub fn retain_positive(self) -> Self {
        let width = self.categories.len();
        let mut nodes = Vec::new();
        let mut values = Vec::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            let row = &self.values[idx * width..(idx + 1) * width];
            if row.iter().sum::<f64>() > 0.0 {
                nodes.push(node.clone());
                values.extend_from_slice(row);
            }
        }
        Self {
            nodes,
            categories: self.categories,
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
