//! Map composition: extent, background, context lines, glyphs and legends
//! for generators and storage units.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::aggregate::{Asset, NodeCategoryMatrix};
use crate::canvas::{Extent, LineStyle, MapCanvas, MarkerStyle, Point};
use crate::color::{CategoryColors, Color};
use crate::config::{MapConfig, MapMode};
use crate::legend::{category_legend, size_legend, LegendLocation};
use crate::network::{Bus, Network};
use crate::pie::{draw_pie, fractions};
use crate::radius::{resolve_reference, RadiusScale};
use crate::selector::{GeneratorValue, StorageValue, Unit, ValueSelector};
use crate::MapError;

const LINE_ALPHA: f64 = 0.8;
const SCATTER_ALPHA: f64 = 0.9;
const SCATTER_EDGE_WIDTH: f64 = 0.2;

/// What a finished map shows.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSummary {
    /// Resolved carriers, in legend order.
    pub categories: Vec<String>,
    /// Points (scatter) or pies drawn.
    pub glyphs: usize,
    /// Total mapped to the maximum radius, for pies with something to draw.
    pub reference: Option<f64>,
    pub title: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AssetKind {
    Generators,
    StorageUnits,
}

impl AssetKind {
    fn table_name(self) -> &'static str {
        match self {
            AssetKind::Generators => "generators",
            AssetKind::StorageUnits => "storage_units",
        }
    }

    fn scatter_legend_title(self) -> &'static str {
        match self {
            AssetKind::Generators => "Generator carrier",
            AssetKind::StorageUnits => "Storage carrier",
        }
    }

    fn size_legend_title(self, unit: Unit) -> String {
        match self {
            AssetKind::Generators => "Circle = total".to_string(),
            AssetKind::StorageUnits => format!("Circle = total {unit}"),
        }
    }

    fn default_title(self, mode: MapMode, value: &str, unit: Unit) -> String {
        match (self, mode) {
            (AssetKind::Generators, MapMode::Scatter) => {
                "Generators by carrier (points) with map background".to_string()
            }
            (AssetKind::Generators, MapMode::Pies) => {
                format!("Per-bus generator mix ({value}, pies; size \u{221d} total {unit})")
            }
            (AssetKind::StorageUnits, MapMode::Scatter) => {
                "Storage units by carrier (points)".to_string()
            }
            (AssetKind::StorageUnits, MapMode::Pies) => {
                format!("Per-bus storage mix ({value}, pies; size \u{221d} total)")
            }
        }
    }
}

/// Draw the generators of `network` onto `canvas`.
///
/// In scatter mode every generator of a selected carrier becomes one point.
/// In pies mode generators are aggregated per bus and carrier and each bus
/// with a positive total gets a pie sized by that total.
pub fn plot_generators_on_map<C: MapCanvas + ?Sized>(
    canvas: &mut C,
    network: &Network,
    config: &MapConfig<GeneratorValue>,
) -> Result<MapSummary, MapError> {
    compose(
        canvas,
        network,
        &network.generators,
        config,
        AssetKind::Generators,
    )
}

/// Draw the storage units of `network` onto `canvas`.
///
/// Same layout as [`plot_generators_on_map`]; fails with
/// [`MapError::NoData`] when the network has no storage units at all.
pub fn plot_storage_units_on_map<C: MapCanvas + ?Sized>(
    canvas: &mut C,
    network: &Network,
    config: &MapConfig<StorageValue>,
) -> Result<MapSummary, MapError> {
    compose(
        canvas,
        network,
        &network.storage_units,
        config,
        AssetKind::StorageUnits,
    )
}

fn compose<C, A>(
    canvas: &mut C,
    network: &Network,
    assets: &[A],
    config: &MapConfig<A::Value>,
    kind: AssetKind,
) -> Result<MapSummary, MapError>
where
    C: MapCanvas + ?Sized,
    A: Asset,
{
    config.validate()?;
    let coords = network.bus_coordinates()?;
    if assets.is_empty() {
        return Err(MapError::NoData(format!(
            "network has no {}",
            kind.table_name()
        )));
    }

    let categories = resolve_categories(assets, config.carriers.as_deref(), kind)?;
    let colors = CategoryColors::resolve(&categories, config.carrier_colors.as_deref());
    debug!(kind = kind.table_name(), ?categories, "resolved carriers");

    let (extent, span) = map_extent(&network.buses, &coords)?;
    debug!(?extent, span, "map extent");
    canvas.set_extent(extent)?;
    canvas.draw_background()?;

    if config.plot_lines {
        draw_context_lines(canvas, network, &coords, config.line_width)?;
    }

    let (glyphs, reference) = match config.mode {
        MapMode::Scatter => (
            draw_scatter(canvas, assets, &coords, &colors, config, kind)?,
            None,
        ),
        MapMode::Pies => draw_pies(canvas, network, assets, &coords, &colors, config, span, kind)?,
    };

    let unit = config.value.unit();
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| kind.default_title(config.mode, &config.value.to_string(), unit));
    canvas.set_title(&title)?;

    Ok(MapSummary {
        categories,
        glyphs,
        reference,
        title,
    })
}

/// Carriers present in `assets` (first-appearance order), narrowed to the
/// requested ones (request order) when a filter is given.
fn resolve_categories<A: Asset>(
    assets: &[A],
    requested: Option<&[String]>,
    kind: AssetKind,
) -> Result<Vec<String>, MapError> {
    let mut present: Vec<&str> = Vec::new();
    for asset in assets {
        if !present.contains(&asset.carrier()) {
            present.push(asset.carrier());
        }
    }

    let mut resolved: Vec<String> = Vec::new();
    match requested {
        None => resolved.extend(present.iter().map(|c| c.to_string())),
        Some(requested) => {
            for carrier in requested {
                if present.contains(&carrier.as_str()) && !resolved.contains(carrier) {
                    resolved.push(carrier.clone());
                }
            }
        }
    }

    if resolved.is_empty() {
        return Err(MapError::NoMatchingCategories(format!(
            "no {} for the requested carriers {:?}",
            kind.table_name(),
            requested.unwrap_or_default()
        )));
    }
    Ok(resolved)
}

/// Padded extent plus the larger unpadded span used for radius bounds.
fn map_extent(
    buses: &[Bus],
    coords: &HashMap<&str, Point>,
) -> Result<(Extent, f64), MapError> {
    // Walk buses in table order so the fold is deterministic.
    let points: Vec<Point> = buses
        .iter()
        .filter_map(|bus| coords.get(bus.id.as_str()).copied())
        .collect();
    let extent = Extent::from_points(points.iter().copied())
        .ok_or_else(|| MapError::MissingCoordinates("no bus coordinates".to_string()))?;

    let (min_x, max_x, min_y, max_y) = points.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x0, x1, y0, y1), pt| (x0.min(pt.x), x1.max(pt.x), y0.min(pt.y), y1.max(pt.y)),
    );
    let mut span = (max_x - min_x).max(max_y - min_y);
    if span <= 0.0 {
        span = extent.width().max(extent.height());
    }
    Ok((extent, span))
}

/// Lines whose two ends both have coordinates; others are skipped.
fn draw_context_lines<C: MapCanvas + ?Sized>(
    canvas: &mut C,
    network: &Network,
    coords: &HashMap<&str, Point>,
    line_width: f64,
) -> Result<(), MapError> {
    let style = LineStyle {
        color: Color::LIGHT_GRAY,
        width: line_width,
        alpha: LINE_ALPHA,
    };
    let mut drawn = 0usize;
    for line in &network.lines {
        if let (Some(&from), Some(&to)) = (
            coords.get(line.bus0.as_str()),
            coords.get(line.bus1.as_str()),
        ) {
            canvas.draw_line(from, to, &style)?;
            drawn += 1;
        }
    }
    debug!(drawn, total = network.lines.len(), "context lines");
    Ok(())
}

fn draw_scatter<C, A>(
    canvas: &mut C,
    assets: &[A],
    coords: &HashMap<&str, Point>,
    colors: &CategoryColors,
    config: &MapConfig<A::Value>,
    kind: AssetKind,
) -> Result<usize, MapError>
where
    C: MapCanvas + ?Sized,
    A: Asset,
{
    let mut plotted: Vec<(&str, Color)> = Vec::new();
    let mut count = 0;
    for (category, color) in colors.iter() {
        let points: Vec<Point> = assets
            .iter()
            .filter(|asset| asset.carrier() == category)
            .filter_map(|asset| {
                let point = coords.get(asset.bus()).copied();
                if point.is_none() {
                    warn!(asset = asset.id(), bus = asset.bus(), "asset references unknown bus");
                }
                point
            })
            .collect();
        if points.is_empty() {
            continue;
        }
        let style = MarkerStyle {
            color,
            size: config.scatter_size,
            alpha: SCATTER_ALPHA,
            edge_color: Color::BLACK,
            edge_width: SCATTER_EDGE_WIDTH,
        };
        canvas.scatter(&points, &style)?;
        count += points.len();
        plotted.push((category, color));
    }

    if !plotted.is_empty() {
        let legend = category_legend(
            kind.scatter_legend_title(),
            LegendLocation::LowerLeft,
            plotted,
            (Color::BLACK, SCATTER_EDGE_WIDTH),
        );
        canvas.add_legend(&legend)?;
    }
    debug!(points = count, "scatter drawn");
    Ok(count)
}

#[allow(clippy::too_many_arguments)]
fn draw_pies<C, A>(
    canvas: &mut C,
    network: &Network,
    assets: &[A],
    coords: &HashMap<&str, Point>,
    colors: &CategoryColors,
    config: &MapConfig<A::Value>,
    span: f64,
    kind: AssetKind,
) -> Result<(usize, Option<f64>), MapError>
where
    C: MapCanvas + ?Sized,
    A: Asset,
{
    let categories: Vec<String> = colors.iter().map(|(c, _)| c.to_string()).collect();
    let matrix = NodeCategoryMatrix::from_assets(
        assets,
        config.value,
        network.snapshot_weightings.as_deref(),
        &categories,
    )
    .retain_positive();

    let totals: Vec<f64> = matrix.rows().map(|(_, row)| row.iter().sum()).collect();
    let reference = resolve_reference(config.size_reference, totals.iter().copied());
    let scale =
        reference.and_then(|r| RadiusScale::for_span(r, span, config.radius_fractions));

    let mut drawn = 0;
    match &scale {
        Some(scale) => {
            let palette: Vec<Color> = colors.iter().map(|(_, color)| color).collect();
            for ((node, row), total) in matrix.rows().zip(&totals) {
                let Some(&center) = coords.get(node) else {
                    warn!(bus = node, "aggregated bus has no coordinates");
                    continue;
                };
                let slices: Vec<(f64, Color)> = fractions(row)
                    .into_iter()
                    .zip(palette.iter().copied())
                    .collect();
                if draw_pie(canvas, center, scale.radius(*total), &slices)? {
                    drawn += 1;
                }
            }
        }
        None => debug!("no bus with a positive total, nothing to render"),
    }
    debug!(pies = drawn, reference = ?scale.map(|s| s.reference()), "pies drawn");

    let legend = category_legend(
        "Carrier",
        LegendLocation::UpperLeft,
        colors.iter(),
        (Color::WHITE, 0.0),
    );
    canvas.add_legend(&legend)?;

    // With nothing on the map the size legend is still shown, anchored on
    // its own largest example.
    let legend_scale = scale.or_else(|| {
        let largest = resolve_reference(None, config.annotate_sizes.iter().copied())?;
        RadiusScale::for_span(largest, span, config.radius_fractions)
    });
    if let Some(legend_scale) = legend_scale {
        let unit = config.value.unit();
        if let Some(legend) = size_legend(
            &kind.size_legend_title(unit),
            LegendLocation::LowerLeft,
            &config.annotate_sizes,
            &legend_scale,
            unit,
        ) {
            canvas.add_legend(&legend)?;
        }
    }

    Ok((drawn, scale.map(|s| s.reference())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legend::{Legend, MarkerUnits};
    use crate::network::{Line, StorageUnit};
    use crate::radius::RadiusFractions;
    use crate::shape::{Shape, ShapeStyle};
    use crate::test_utils::{
        generator, names, storage_unit, two_bus_network, Drawn, RecordingCanvas,
    };

    fn pies_config() -> MapConfig<GeneratorValue> {
        MapConfig {
            mode: MapMode::Pies,
            ..Default::default()
        }
    }

    #[test]
    fn test_pies_scenario() {
        let network = two_bus_network();
        let mut canvas = RecordingCanvas::default();
        let summary = plot_generators_on_map(&mut canvas, &network, &pies_config()).unwrap();

        assert_eq!(summary.categories, names(&["wind", "gas"]));
        assert_eq!(summary.reference, Some(20.0));
        assert_eq!(summary.glyphs, 2);

        // A: two wedges + outline, B: one full wedge + outline
        let shapes = canvas.shapes();
        assert_eq!(shapes.len(), 5);
        match shapes[0] {
            Shape::Wedge {
                center,
                theta1,
                theta2,
                ..
            } => {
                assert_eq!(center, Point::new(0.0, 0.0));
                assert_eq!(theta1, 0.0);
                assert!((theta2 - 240.0).abs() < 1e-9);
            }
            other => panic!("expected wedge, got {other:?}"),
        }
        match shapes[3] {
            Shape::Wedge {
                center,
                radius,
                theta1,
                theta2,
            } => {
                assert_eq!(center, Point::new(1.0, 1.0));
                assert_eq!((theta1, theta2), (0.0, 360.0));
                // span is 1 degree, so B at the reference gets the max radius
                assert!((radius - 0.05).abs() < 1e-12);
            }
            other => panic!("expected wedge, got {other:?}"),
        }
        // A: 15 / 20 * 0.05
        assert!((shapes[0].radius() - 0.0375).abs() < 1e-12);
    }

    #[test]
    fn test_pies_draw_order_follows_carrier_filter() {
        let network = two_bus_network();
        let config = MapConfig {
            carriers: Some(names(&["gas", "wind"])),
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &config).unwrap();

        // At A the gas wedge (1/3) comes first.
        match canvas.shapes()[0] {
            Shape::Wedge { theta2, .. } => assert!((theta2 - 120.0).abs() < 1e-9),
            other => panic!("expected wedge, got {other:?}"),
        }
        let legend = &canvas.legends()[0];
        assert_eq!(legend.title, "Carrier");
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["gas", "wind"]);
    }

    #[test]
    fn test_zero_totals_draw_no_glyphs_but_keep_legends() {
        let mut network = two_bus_network();
        for gen in &mut network.generators {
            gen.p_nom_opt = Some(0.0);
        }
        let mut canvas = RecordingCanvas::default();
        let summary = plot_generators_on_map(&mut canvas, &network, &pies_config()).unwrap();

        assert_eq!(summary.glyphs, 0);
        assert_eq!(summary.reference, None);
        assert!(canvas.shapes().is_empty());

        let legends = canvas.legends();
        assert_eq!(legends.len(), 2);
        assert_eq!(legends[0].entries.len(), 2);
        assert_eq!(legends[1].title, "Circle = total");
        assert_eq!(legends[1].entries.len(), 3);
        assert!(legends[1].entries.iter().all(|e| e.units == MarkerUnits::Map));
        assert_eq!(legends[1].entries[0].label, "2.0 GW");
    }

    #[test]
    fn test_size_reference_override() {
        let network = two_bus_network();
        let config = MapConfig {
            size_reference: Some(40.0),
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        let summary = plot_generators_on_map(&mut canvas, &network, &config).unwrap();
        assert_eq!(summary.reference, Some(40.0));
        // B: 20 / 40 * 0.05
        assert!((canvas.shapes()[3].radius() - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_empty_annotate_sizes_skip_size_legend() {
        let network = two_bus_network();
        let config = MapConfig {
            annotate_sizes: Vec::new(),
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &config).unwrap();
        assert_eq!(canvas.legends().len(), 1);
    }

    #[test]
    fn test_scatter_draws_every_asset() {
        let mut network = two_bus_network();
        for gen in &mut network.generators {
            gen.p_nom_opt = None;
        }
        let mut canvas = RecordingCanvas::default();
        let summary =
            plot_generators_on_map(&mut canvas, &network, &MapConfig::default()).unwrap();

        assert_eq!(summary.glyphs, 3);
        assert!(canvas.shapes().is_empty());
        let scatters: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Drawn::Scatter(points, style) => Some((points.len(), style.size)),
                _ => None,
            })
            .collect();
        assert_eq!(scatters, vec![(1, 10.0), (2, 10.0)]);

        let legends = canvas.legends();
        assert_eq!(legends.len(), 1);
        assert_eq!(legends[0].title, "Generator carrier");
        assert_eq!(legends[0].location, LegendLocation::LowerLeft);
        assert_eq!(
            summary.title,
            "Generators by carrier (points) with map background"
        );
    }

    #[test]
    fn test_scatter_legend_skips_carriers_without_points() {
        let mut network = two_bus_network();
        network.generators[0].bus = "nowhere".to_string();
        let config = MapConfig {
            carriers: Some(names(&["wind", "gas"])),
            plot_lines: false,
            ..Default::default()
        };
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &config).unwrap();
        let labels: Vec<&str> = canvas.legends()[0]
            .entries
            .iter()
            .map(|e| e.label.as_str())
            .collect();
        assert_eq!(labels, vec!["gas"]);
    }

    #[test]
    fn test_unknown_carrier_filter() {
        let network = two_bus_network();
        let config = MapConfig {
            carriers: Some(names(&["solar"])),
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        let err = plot_generators_on_map(&mut canvas, &network, &config).unwrap_err();
        assert!(matches!(err, MapError::NoMatchingCategories(_)));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_missing_coordinates_draws_nothing() {
        let mut network = two_bus_network();
        for bus in &mut network.buses {
            bus.x = None;
        }
        let mut canvas = RecordingCanvas::default();
        let err =
            plot_generators_on_map(&mut canvas, &network, &MapConfig::default()).unwrap_err();
        assert!(matches!(err, MapError::MissingCoordinates(_)));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn test_no_storage_units() {
        let network = two_bus_network();
        let mut canvas = RecordingCanvas::default();
        let err =
            plot_storage_units_on_map(&mut canvas, &network, &MapConfig::default()).unwrap_err();
        assert!(matches!(err, MapError::NoData(_)));
    }

    #[test]
    fn test_storage_pies() {
        let mut network = two_bus_network();
        network.storage_units = vec![
            storage_unit("s1", "A", "battery", 100.0, Some(2.0)),
            storage_unit("s2", "B", "hydro", 50.0, Some(8.0)),
            StorageUnit {
                id: "s3".to_string(),
                bus: "B".to_string(),
                carrier: "battery".to_string(),
                ..Default::default()
            },
        ];
        let mut canvas = RecordingCanvas::default();
        let summary =
            plot_storage_units_on_map(&mut canvas, &network, &MapConfig::default()).unwrap();

        assert_eq!(summary.categories, names(&["battery", "hydro"]));
        assert_eq!(summary.reference, Some(400.0));
        assert_eq!(summary.glyphs, 2);
        assert_eq!(
            summary.title,
            "Per-bus storage mix (energy_capacity, pies; size \u{221d} total)"
        );
        assert_eq!(canvas.legends()[1].title, "Circle = total MWh");
        assert_eq!(canvas.legends()[1].entries[0].label, "5.0 GWh");
    }

    #[test]
    fn test_context_lines_need_both_ends() {
        let mut network = two_bus_network();
        network.lines.push(Line {
            bus0: "A".to_string(),
            bus1: "ghost".to_string(),
        });
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &MapConfig::default()).unwrap();
        let lines = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Drawn::Line(..)))
            .count();
        assert_eq!(lines, 1);

        let config = MapConfig {
            plot_lines: false,
            ..Default::default()
        };
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &config).unwrap();
        assert!(!canvas.ops.iter().any(|op| matches!(op, Drawn::Line(..))));
    }

    #[test]
    fn test_extent_and_title_are_set() {
        let network = two_bus_network();
        let config = MapConfig {
            title: Some("Capacity".to_string()),
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        plot_generators_on_map(&mut canvas, &network, &config).unwrap();
        assert!(matches!(canvas.ops[0], Drawn::Extent(e) if (e.min_x + 0.03).abs() < 1e-12));
        assert!(matches!(canvas.ops[1], Drawn::Background));
        assert!(matches!(canvas.ops.last(), Some(Drawn::Title(t)) if t == "Capacity"));
    }

    fn with_uncharted_bus(mut network: Network) -> Network {
        network.buses.push(Bus {
            id: "DC".to_string(),
            x: None,
            y: None,
        });
        network
    }

    #[test]
    fn test_bus_without_coordinates_and_assets_is_ignored() {
        let network = with_uncharted_bus(two_bus_network());
        let mut canvas = RecordingCanvas::default();
        let summary = plot_generators_on_map(&mut canvas, &network, &pies_config()).unwrap();
        assert_eq!(summary.glyphs, 2);
        assert_eq!(summary.reference, Some(20.0));
    }

    #[test]
    fn test_assets_on_uncharted_bus_are_skipped() {
        let mut network = with_uncharted_bus(two_bus_network());
        network.generators.push(generator("g4", "DC", "wind", 100.0));

        let mut canvas = RecordingCanvas::default();
        let summary = plot_generators_on_map(&mut canvas, &network, &pies_config()).unwrap();
        // DC aggregates the largest total but has nowhere to go.
        assert_eq!(summary.glyphs, 2);
        assert_eq!(canvas.shapes().len(), 5);

        let mut canvas = RecordingCanvas::default();
        let summary =
            plot_generators_on_map(&mut canvas, &network, &MapConfig::default()).unwrap();
        assert_eq!(summary.glyphs, 3);
    }

    #[test]
    fn test_zero_max_radius_is_rejected() {
        let network = two_bus_network();
        let config = MapConfig {
            radius_fractions: RadiusFractions { min: 0.0, max: 0.0 },
            ..pies_config()
        };
        let mut canvas = RecordingCanvas::default();
        let err = plot_generators_on_map(&mut canvas, &network, &config).unwrap_err();
        assert!(matches!(err, MapError::InvalidOption(_)));
        assert!(canvas.ops.is_empty());
    }

    /// Accepts everything except glyph shapes.
    #[derive(Default)]
    struct BrokenShapeCanvas {
        inner: RecordingCanvas,
    }

    impl MapCanvas for BrokenShapeCanvas {
        fn set_extent(&mut self, extent: Extent) -> Result<(), MapError> {
            self.inner.set_extent(extent)
        }

        fn draw_background(&mut self) -> Result<(), MapError> {
            self.inner.draw_background()
        }

        fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) -> Result<(), MapError> {
            self.inner.draw_line(from, to, style)
        }

        fn scatter(&mut self, points: &[Point], style: &MarkerStyle) -> Result<(), MapError> {
            self.inner.scatter(points, style)
        }

        fn draw_shape(&mut self, _shape: &Shape, _style: &ShapeStyle) -> Result<(), MapError> {
            Err(MapError::Canvas("shape backend offline".into()))
        }

        fn add_legend(&mut self, legend: &Legend) -> Result<(), MapError> {
            self.inner.add_legend(legend)
        }

        fn set_title(&mut self, title: &str) -> Result<(), MapError> {
            self.inner.set_title(title)
        }
    }

    #[test]
    fn test_canvas_failure_is_propagated() {
        let network = two_bus_network();
        let mut canvas = BrokenShapeCanvas::default();
        let err = plot_generators_on_map(&mut canvas, &network, &pies_config()).unwrap_err();
        assert!(matches!(err, MapError::Canvas(_)));
        assert!(err.to_string().contains("shape backend offline"));
        assert!(canvas.inner.legends().is_empty());

        // Scatter never touches shapes.
        let mut canvas = BrokenShapeCanvas::default();
        assert!(plot_generators_on_map(&mut canvas, &network, &MapConfig::default()).is_ok());
    }
}
