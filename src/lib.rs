/*!
# Proportional-symbol maps for energy-system networks

Draws the generators or storage units of a network on a map of its buses,
either as one colored point per asset or as one pie per bus. A pie's wedges
show how the bus total splits across carriers; its radius grows with the
total up to a bound derived from the map span.

```no_run
use render_esm_map::{
    load_network, plot_generators_on_map, CairoCanvas, GeneratorValue, MapConfig, MapMode,
};

# fn main() -> anyhow::Result<()> {
let network = load_network("network.xml".as_ref())?;
let config = MapConfig {
    mode: MapMode::Pies,
    value: GeneratorValue::Energy,
    ..Default::default()
};
let mut canvas = CairoCanvas::default();
plot_generators_on_map(&mut canvas, &network, &config)?;
canvas.write_png("generators.png".as_ref())?;
# Ok(())
# }
```

Drawing goes through the [`MapCanvas`] trait; [`CairoCanvas`] is the
bundled backend.
*/

mod aggregate;
pub use aggregate::{time_sum, Asset, NodeCategoryMatrix};

mod cairo_canvas;
pub use cairo_canvas::{CairoCanvas, DEFAULT_MAP_WIDTH_PX};

mod canvas;
pub use canvas::{Extent, LineStyle, MapCanvas, MarkerStyle, Point, EXTENT_PADDING};

mod color;
pub use color::{palette_color, CategoryColors, Color};

mod compose;
pub use compose::{plot_generators_on_map, plot_storage_units_on_map, MapSummary};

mod config;
pub use config::{MapConfig, MapMode};

mod error;
pub use error::MapError;

mod legend;
pub use legend::{
    category_legend, size_label, size_legend, Legend, LegendEntry, LegendLocation, MarkerUnits,
};

mod network;
pub use network::{Bus, Generator, Line, Network, StorageUnit};

mod network_xml;
pub use network_xml::{load_network, parse_network};

mod pie;
pub use pie::{draw_pie, fractions, pie_shapes};

mod radius;
pub use radius::{radius, resolve_reference, RadiusFractions, RadiusScale};

mod selector;
pub use selector::{GeneratorValue, StorageValue, Unit, ValueSelector};

mod shape;
pub use shape::{Shape, ShapeStyle};

#[cfg(test)]
mod test_utils;
