use tracing::debug;

use crate::region_pipeline::common::error::{ExtractionError, Result};
use crate::region_pipeline::palette::provider::PaletteProvider;
use crate::region_pipeline::palette::quantizer::PALETTE_SIZE;

/// Control point: position and RGB, all in percent.
type ControlPoint = (f64, f64, f64, f64);

const RAMP: &[ControlPoint] = &[
    (0.0, 0.0, 0.0, 15.0),
    (10.0, 0.0, 0.0, 50.0),
    (31.0, 0.0, 65.0, 75.0),
    (50.0, 0.0, 80.0, 0.0),
    (70.0, 75.0, 80.0, 0.0),
    (83.0, 100.0, 60.0, 0.0),
    (100.0, 100.0, 0.0, 0.0),
];

const GREYSCALE: &[ControlPoint] = &[
    (0.0, 0.0, 0.0, 0.0),
    (60.0, 50.0, 50.0, 50.0),
    (100.0, 100.0, 100.0, 100.0),
];

const COLOR_WHEEL: &[ControlPoint] = &[
    (0.0, 100.0, 100.0, 0.0),
    (20.0, 0.0, 80.0, 40.0),
    (30.0, 0.0, 100.0, 100.0),
    (50.0, 10.0, 10.0, 0.0),
    (65.0, 100.0, 0.0, 0.0),
    (88.0, 100.0, 40.0, 0.0),
    (100.0, 100.0, 100.0, 0.0),
];

const SPECTRUM: &[ControlPoint] = &[
    (0.0, 0.0, 75.0, 0.0),
    (22.0, 0.0, 90.0, 90.0),
    (37.0, 0.0, 0.0, 85.0),
    (49.0, 90.0, 0.0, 85.0),
    (68.0, 90.0, 0.0, 0.0),
    (80.0, 90.0, 90.0, 0.0),
    (100.0, 95.0, 95.0, 95.0),
];

const CALE_WHITE: &[ControlPoint] = &[
    (0.0, 100.0, 100.0, 100.0),
    (16.666, 0.0, 0.0, 100.0),
    (33.333, 0.0, 100.0, 100.0),
    (50.0, 0.0, 100.0, 0.0),
    (66.666, 100.0, 100.0, 0.0),
    (83.333, 100.0, 0.0, 0.0),
    (100.0, 100.0, 0.0, 100.0),
];

const HOT_DESAT: &[ControlPoint] = &[
    (0.0, 27.84, 27.84, 85.88),
    (14.2857, 0.0, 0.0, 35.69),
    (28.571, 0.0, 100.0, 100.0),
    (42.857, 0.0, 49.8, 0.0),
    (57.14286, 100.0, 100.0, 0.0),
    (71.42857, 100.0, 37.65, 0.0),
    (85.7143, 41.96, 0.0, 0.0),
    (100.0, 87.84, 29.8, 29.8),
];

const SUNSET: &[ControlPoint] = &[
    (0.0, 10.0, 0.0, 23.0),
    (18.0, 34.0, 0.0, 60.0),
    (36.0, 58.0, 20.0, 47.0),
    (55.0, 74.0, 20.0, 28.0),
    (72.0, 90.0, 43.0, 0.0),
    (87.0, 100.0, 72.0, 0.0),
    (100.0, 100.0, 100.0, 76.0),
];

const PALETTES: &[(&str, &[ControlPoint])] = &[
    ("rainbow", RAMP),
    ("ramp", RAMP),
    ("greyscale", GREYSCALE),
    ("colorwheel", COLOR_WHEEL),
    ("spectrum", SPECTRUM),
    ("calewhite", CALE_WHITE),
    ("hotdesat", HOT_DESAT),
    ("sunset", SUNSET),
];

/// Names accepted by [`BuiltinPalettes`].
pub const PALETTE_NAMES: [&str; 8] = [
    "rainbow",
    "ramp",
    "greyscale",
    "colorwheel",
    "spectrum",
    "calewhite",
    "hotdesat",
    "sunset",
];

type Table = [[u8; 3]; PALETTE_SIZE];

fn percent_to_byte(percent: f64) -> u8 {
    (percent * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8
}

/// Linearly interpolates control points into a 256-entry table.
fn build_table(points: &[ControlPoint]) -> Table {
    let mut table = [[0u8; 3]; PALETTE_SIZE];
    for (index, entry) in table.iter_mut().enumerate() {
        let position = index as f64 * 100.0 / (PALETTE_SIZE - 1) as f64;
        let upper = points
            .iter()
            .position(|p| p.0 >= position)
            .unwrap_or(points.len() - 1)
            .max(1);
        let (p0, r0, g0, b0) = points[upper - 1];
        let (p1, r1, g1, b1) = points[upper];
        let t = ((position - p0) / (p1 - p0)).clamp(0.0, 1.0);
        *entry = [
            percent_to_byte(r0 + t * (r1 - r0)),
            percent_to_byte(g0 + t * (g1 - g0)),
            percent_to_byte(b0 + t * (b1 - b0)),
        ];
    }
    table
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The built-in palette set, interpolated once at construction.
///
/// Names match case-insensitively and ignore spaces, so `Color Wheel`
/// resolves to `colorwheel`.
pub struct BuiltinPalettes {
    tables: Vec<(&'static str, Table)>,
}

impl BuiltinPalettes {
    pub fn new() -> Self {
        let tables = PALETTES
            .iter()
            .map(|(name, points)| (*name, build_table(points)))
            .collect();
        Self { tables }
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        let key = normalize(name);
        self.tables
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, table)| table)
            .ok_or_else(|| {
                debug!(name, "Unknown palette");
                ExtractionError::InvalidPalette(name.to_string())
            })
    }
}

impl Default for BuiltinPalettes {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteProvider for BuiltinPalettes {
    fn color(&self, name: &str, index: u8) -> Result<[u8; 3]> {
        Ok(self.table(name)?[index as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_name_resolves() {
        let palettes = BuiltinPalettes::new();
        for name in PALETTE_NAMES {
            assert!(palettes.color(name, 0).is_ok(), "{name}");
        }
        assert_eq!(PALETTES.len(), PALETTE_NAMES.len());
    }

    #[test]
    fn test_rainbow_endpoints() {
        let palettes = BuiltinPalettes::new();
        assert_eq!(palettes.color("rainbow", 0).unwrap(), [0, 0, 38]);
        assert_eq!(palettes.color("rainbow", 255).unwrap(), [255, 0, 0]);
        assert_eq!(palettes.color("Rainbow", 17).unwrap(), palettes.color("ramp", 17).unwrap());
    }

    #[test]
    fn test_greyscale_is_monotonic_grey() {
        let palettes = BuiltinPalettes::new();
        let table = palettes.table("Grey Scale").unwrap();
        assert_eq!(table[0], [0, 0, 0]);
        assert_eq!(table[255], [255, 255, 255]);
        for pair in table.windows(2) {
            assert_eq!(pair[1][0], pair[1][1]);
            assert!(pair[1][0] >= pair[0][0]);
        }
    }

    #[test]
    fn test_interpolation_hits_control_points() {
        // 60% of 255 lands exactly on index 153
        let palettes = BuiltinPalettes::new();
        assert_eq!(palettes.color("greyscale", 153).unwrap(), [128, 128, 128]);
    }

    #[test]
    fn test_unknown_palette() {
        let palettes = BuiltinPalettes::new();
        assert!(matches!(
            palettes.color("plasma", 3),
            Err(ExtractionError::InvalidPalette(name)) if name == "plasma"
        ));
    }
}
