use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use render_esm_map::{
    load_network, plot_generators_on_map, plot_storage_units_on_map, CairoCanvas, Color,
    GeneratorValue, MapConfig, MapError, MapMode, MapSummary, Network, RadiusFractions,
    StorageValue, ValueSelector, DEFAULT_MAP_WIDTH_PX,
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Render proportional-symbol maps of energy-system networks",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbosity: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Generators as points or per-bus pies (value: capacity | energy)
    #[command(name = "draw_generators")]
    DrawGenerators {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, default_value = "generators.png")]
        output: PathBuf,
    },
    /// Storage units as points or per-bus pies
    /// (value: energy_capacity | power_capacity | energy_dispatch)
    #[command(name = "draw_storage_units")]
    DrawStorageUnits {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, default_value = "storage_units.png")]
        output: PathBuf,
    },
}

/// Options shared by both map kinds. Unset options keep the per-kind default.
#[derive(Args)]
struct MapArgs {
    /// Network XML file
    #[arg(long)]
    input: PathBuf,
    /// scatter | pies
    #[arg(long)]
    mode: Option<String>,
    /// Attribute that sizes the pies
    #[arg(long)]
    value: Option<String>,
    /// Comma-separated carriers to show, in legend order
    #[arg(long, value_delimiter = ',')]
    carriers: Option<Vec<String>>,
    /// Total drawn at the maximum radius
    #[arg(long)]
    size_reference: Option<f64>,
    /// Comma-separated example totals for the size legend
    #[arg(long, value_delimiter = ',')]
    annotate_sizes: Option<Vec<f64>>,
    /// Omit the size legend
    #[arg(long)]
    no_size_legend: bool,
    /// Carrier color, repeatable
    #[arg(long = "color", value_name = "CARRIER=#RRGGBB")]
    colors: Vec<String>,
    /// Do not draw transmission lines
    #[arg(long)]
    no_lines: bool,
    #[arg(long)]
    line_width: Option<f64>,
    /// Scatter marker area in pt^2
    #[arg(long)]
    scatter_size: Option<f64>,
    /// Smallest pie radius as a fraction of the map span
    #[arg(long)]
    min_radius_fraction: Option<f64>,
    /// Largest pie radius as a fraction of the map span
    #[arg(long)]
    max_radius_fraction: Option<f64>,
    #[arg(long)]
    title: Option<String>,
    /// Width of the map frame in pixels
    #[arg(long, default_value_t = DEFAULT_MAP_WIDTH_PX)]
    width: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity)?;
    match cli.command {
        Command::DrawGenerators { map, output } => {
            let config = apply_args(&map, MapConfig::<GeneratorValue>::default())?;
            draw_map(&map, &output, |canvas, network| {
                plot_generators_on_map(canvas, network, &config)
            })
        }
        Command::DrawStorageUnits { map, output } => {
            let config = apply_args(&map, MapConfig::<StorageValue>::default())?;
            draw_map(&map, &output, |canvas, network| {
                plot_storage_units_on_map(canvas, network, &config)
            })
        }
    }
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")
}

/// Overlay command-line options on a per-kind default configuration.
fn apply_args<S: ValueSelector>(args: &MapArgs, mut config: MapConfig<S>) -> Result<MapConfig<S>> {
    if let Some(mode) = &args.mode {
        config.mode = mode.parse::<MapMode>()?;
    }
    if let Some(value) = &args.value {
        config.value = value.parse::<S>()?;
    }
    if let Some(carriers) = &args.carriers {
        config.carriers = Some(carriers.clone());
    }
    config.size_reference = args.size_reference;
    if let Some(sizes) = &args.annotate_sizes {
        config.annotate_sizes = sizes.clone();
    }
    if args.no_size_legend {
        config.annotate_sizes.clear();
    }
    if !args.colors.is_empty() {
        let colors = args
            .colors
            .iter()
            .map(String::as_str)
            .map(parse_carrier_color)
            .collect::<Result<Vec<_>>>()?;
        config.carrier_colors = Some(colors);
    }
    config.plot_lines = !args.no_lines;
    if let Some(width) = args.line_width {
        config.line_width = width;
    }
    if let Some(size) = args.scatter_size {
        config.scatter_size = size;
    }
    config.radius_fractions = RadiusFractions {
        min: args.min_radius_fraction.unwrap_or(config.radius_fractions.min),
        max: args.max_radius_fraction.unwrap_or(config.radius_fractions.max),
    };
    if args.title.is_some() {
        config.title = args.title.clone();
    }
    config.validate()?;
    Ok(config)
}

fn parse_carrier_color(arg: &str) -> Result<(String, Color)> {
    let (carrier, color) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Color {:?} must look like CARRIER=#RRGGBB", arg))?;
    Ok((carrier.trim().to_string(), color.parse::<Color>()?))
}

fn draw_map<F>(args: &MapArgs, output: &Path, plot: F) -> Result<()>
where
    F: FnOnce(&mut CairoCanvas, &Network) -> Result<MapSummary, MapError>,
{
    let network = load_network(&args.input)?;
    let mut canvas = CairoCanvas::new(args.width);
    let summary = plot(&mut canvas, &network)?;
    info!(
        glyphs = summary.glyphs,
        carriers = summary.categories.len(),
        title = %summary.title,
        "map composed"
    );

    canvas.write_png(output)?;
    let svg_path = default_svg_output_path(output);
    canvas.write_svg(&svg_path)?;
    info!(png = ?output, svg = ?svg_path, "map written");
    Ok(())
}

fn default_svg_output_path(output: &Path) -> PathBuf {
    let mut svg_path = output.to_path_buf();
    svg_path.set_extension("svg");
    svg_path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> MapArgs {
        let mut argv = vec!["render_esm_map", "draw_generators", "--input", "net.xml"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::DrawGenerators { map, .. } => map,
            Command::DrawStorageUnits { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_defaults_survive_empty_args() {
        let config = apply_args(&args(&[]), MapConfig::<GeneratorValue>::default()).unwrap();
        assert_eq!(config, MapConfig::<GeneratorValue>::default());
    }

    #[test]
    fn test_args_override_config() {
        let config = apply_args(
            &args(&[
                "--mode",
                "pies",
                "--value",
                "energy",
                "--carriers",
                "wind,gas",
                "--annotate-sizes",
                "1000,5000",
                "--color",
                "wind=#00ff00",
                "--no-lines",
            ]),
            MapConfig::<GeneratorValue>::default(),
        )
        .unwrap();
        assert_eq!(config.mode, MapMode::Pies);
        assert_eq!(config.value, GeneratorValue::Energy);
        assert_eq!(config.carriers, Some(vec!["wind".to_string(), "gas".to_string()]));
        assert_eq!(config.annotate_sizes, vec![1000.0, 5000.0]);
        assert_eq!(
            config.carrier_colors,
            Some(vec![("wind".to_string(), Color::rgb(0.0, 1.0, 0.0))])
        );
        assert!(!config.plot_lines);
    }

    #[test]
    fn test_bad_enumerations_are_rejected() {
        let base = MapConfig::<GeneratorValue>::default();
        assert!(apply_args(&args(&["--mode", "bars"]), base.clone()).is_err());
        assert!(apply_args(&args(&["--value", "energy_capacity"]), base.clone()).is_err());
        assert!(apply_args(&args(&["--color", "wind"]), base).is_err());
    }

    #[test]
    fn test_svg_path() {
        assert_eq!(
            default_svg_output_path(Path::new("out/map.png")),
            PathBuf::from("out/map.svg")
        );
    }
}
