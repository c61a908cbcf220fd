//! Colors and the category → color mapping shared by every glyph and legend
//! of one map.

use std::str::FromStr;

use crate::MapError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Color = Color::from_u8(0xD3, 0xD3, 0xD3);
    pub const GRAY: Color = Color::from_u8(0x80, 0x80, 0x80);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

impl FromStr for Color {
    type Err = MapError;

    /// Parse `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
        };
        match (hex.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Ok(Color::from_u8(r, g, b)),
            _ => Err(MapError::InvalidOption(format!(
                "color '{s}' is not of the form #rrggbb"
            ))),
        }
    }
}

/// Matplotlib's `tab20` qualitative palette.
const TAB20: [(u8, u8, u8); 20] = [
    (0x1f, 0x77, 0xb4),
    (0xae, 0xc7, 0xe8),
    (0xff, 0x7f, 0x0e),
    (0xff, 0xbb, 0x78),
    (0x2c, 0xa0, 0x2c),
    (0x98, 0xdf, 0x8a),
    (0xd6, 0x27, 0x28),
    (0xff, 0x98, 0x96),
    (0x94, 0x67, 0xbd),
    (0xc5, 0xb0, 0xd5),
    (0x8c, 0x56, 0x4b),
    (0xc4, 0x9c, 0x94),
    (0xe3, 0x77, 0xc2),
    (0xf7, 0xb6, 0xd2),
    (0x7f, 0x7f, 0x7f),
    (0xc7, 0xc7, 0xc7),
    (0xbc, 0xbd, 0x22),
    (0xdb, 0xdb, 0x8d),
    (0x17, 0xbe, 0xcf),
    (0x9e, 0xda, 0xe5),
];

/// Palette color for the category at position `index`, wrapping after 20.
pub fn palette_color(index: usize) -> Color {
    let (r, g, b) = TAB20[index % TAB20.len()];
    Color::from_u8(r, g, b)
}

/// Ordered category → color mapping, built once per map.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryColors {
    entries: Vec<(String, Color)>,
}

impl CategoryColors {
    /// Assign a color to every category in `categories`, in order.
    ///
    /// Categories found in `overrides` take that color; the rest take the
    /// palette color at their position in `categories`.
    pub fn resolve(categories: &[String], overrides: Option<&[(String, Color)]>) -> Self {
        let entries = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let color = overrides
                    .and_then(|given| {
                        given
                            .iter()
                            .find(|(name, _)| name == category)
                            .map(|(_, color)| *color)
                    })
                    .unwrap_or_else(|| palette_color(idx));
                (category.clone(), color)
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| *color)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        self.entries.iter().map(|(name, color)| (name.as_str(), *color))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
