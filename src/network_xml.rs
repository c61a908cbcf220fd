//! Load a [`Network`] from a small XML document:
//!
//! ```xml
//! <network>
//!   <snapshots>
//!     <snapshot name="t0" weight="3"/>
//!   </snapshots>
//!   <buses><bus id="DK1" x="9.5" y="56.2"/></buses>
//!   <lines><line bus0="DK1" bus1="DK2"/></lines>
//!   <generators>
//!     <generator id="w1" bus="DK1" carrier="wind" p_nom_opt="1200">
//!       <p>400 650 120</p>
//!     </generator>
//!   </generators>
//!   <storage_units>
//!     <storage_unit id="b1" bus="DK1" carrier="battery" p_nom_opt="50" max_hours="4"/>
//!   </storage_units>
//! </network>
//! ```

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use roxmltree::{Document, Node};
use tracing::debug;

use crate::network::{Bus, Generator, Line, Network, StorageUnit};

pub fn load_network(path: &Path) -> Result<Network> {
    let xml = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    parse_network(&xml)
}

pub fn parse_network(xml: &str) -> Result<Network> {
    let doc = Document::parse(xml).context("Failed to parse network XML")?;
    let root = doc
        .descendants()
        .find(|node| node.has_tag_name("network"))
        .ok_or_else(|| anyhow!("Network file missing network element"))?;

    let buses = section(root, "buses", "bus")
        .map(|node| {
            Ok(Bus {
                id: required_attr(node, "id")?,
                x: parse_f64(node.attribute("x")),
                y: parse_f64(node.attribute("y")),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let lines = section(root, "lines", "line")
        .map(|node| {
            Ok(Line {
                bus0: required_attr(node, "bus0")?,
                bus1: required_attr(node, "bus1")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let generators = section(root, "generators", "generator")
        .map(|node| {
            Ok(Generator {
                id: required_attr(node, "id")?,
                bus: required_attr(node, "bus")?,
                carrier: required_attr(node, "carrier")?,
                p_nom_opt: parse_f64(node.attribute("p_nom_opt")),
                p: parse_series(node)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let storage_units = section(root, "storage_units", "storage_unit")
        .map(|node| {
            Ok(StorageUnit {
                id: required_attr(node, "id")?,
                bus: required_attr(node, "bus")?,
                carrier: required_attr(node, "carrier")?,
                p_nom_opt: parse_f64(node.attribute("p_nom_opt")),
                max_hours: parse_f64(node.attribute("max_hours")),
                p: parse_series(node)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Weightings only count when every snapshot carries one.
    let weights: Vec<Option<f64>> = section(root, "snapshots", "snapshot")
        .map(|node| parse_f64(node.attribute("weight")))
        .collect();
    let snapshot_weightings = if weights.is_empty() {
        None
    } else {
        weights.into_iter().collect::<Option<Vec<f64>>>()
    };

    debug!(
        buses = buses.len(),
        lines = lines.len(),
        generators = generators.len(),
        storage_units = storage_units.len(),
        weighted = snapshot_weightings.is_some(),
        "parsed network"
    );
    Ok(Network {
        buses,
        lines,
        generators,
        storage_units,
        snapshot_weightings,
    })
}

/// Children named `item` of the first child named `table`.
fn section<'a, 'input>(
    root: Node<'a, 'input>,
    table: &'static str,
    item: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    root.children()
        .filter(move |node| node.has_tag_name(table))
        .take(1)
        .flat_map(move |node| node.children().filter(move |child| child.has_tag_name(item)))
}

fn required_attr(node: Node, name: &str) -> Result<String> {
    node.attribute(name)
        .map(|value| value.to_string())
        .ok_or_else(|| {
            anyhow!(
                "<{}> missing '{}' attribute",
                node.tag_name().name(),
                name
            )
        })
}

fn parse_series(node: Node) -> Result<Option<Vec<f64>>> {
    let Some(series) = node.children().find(|child| child.has_tag_name("p")) else {
        return Ok(None);
    };
    let text = series.text().unwrap_or_default();
    let values = text
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .with_context(|| format!("Bad dispatch value {:?}", token))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(values))
}

fn parse_f64(value: Option<&str>) -> Option<f64> {
    value.and_then(|v| v.trim().parse::<f64>().ok())
}
