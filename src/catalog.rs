//! Static configuration catalog for presentation parameters.
//!
//! The catalog maps symbolic names to concrete presentation bundles
//! (color palettes, typography scales, density scales, motion profiles).
//! It is built once from embedded JSON data and is immutable afterwards.
//! Lookups by id are total: an unrecognized key falls back to a defined
//! default bundle instead of propagating a missing value, so stale or
//! forged ids from a persisted record can never poison the render surface.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::LazyLock;

use crate::color::RgbColor;

/// Palette id applied when a requested palette is unknown.
pub const DEFAULT_PALETTE: &str = "professional";
/// Typography id applied when a requested scale is unknown.
pub const DEFAULT_TYPOGRAPHY: &str = "medium";
/// Density id applied when a requested scale is unknown.
pub const DEFAULT_DENSITY: &str = "comfortable";
/// Motion profile id applied when a requested profile is unknown.
pub const DEFAULT_MOTION: &str = "smooth";

/// A named bundle of colors.
///
/// `text` and `background` exist on every variant so that the dark/light
/// toggle and the quick switch write the same, complete set of color
/// variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaletteVariant {
    /// Symbolic name, e.g. "professional".
    pub id: String,
    /// Primary chrome color (borders, titles).
    pub primary: RgbColor,
    /// Secondary chrome color (panels, inactive elements).
    pub secondary: RgbColor,
    /// Accent color (highlights, selections).
    pub accent: RgbColor,
    /// Body text color.
    pub text: RgbColor,
    /// Page background color.
    pub background: RgbColor,
}

/// A named typography scale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TypographyScale {
    /// Symbolic name, e.g. "large".
    pub id: String,
    /// Body text size, e.g. "18px".
    pub base_size: String,
    /// Page title size, e.g. "2.8rem".
    pub title_size: String,
    /// Subtitle size, e.g. "1.2rem".
    pub subtitle_size: String,
}

/// A named content density scale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DensityScale {
    /// Symbolic name, e.g. "compact".
    pub id: String,
    /// Vertical spacing between blocks, e.g. "1rem".
    pub spacing_unit: String,
    /// Padding inside a section, e.g. "1.5rem".
    pub padding_unit: String,
}

/// A named motion profile for transitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MotionProfile {
    /// Symbolic name, e.g. "smooth".
    pub id: String,
    /// Transition duration in milliseconds.
    pub duration_ms: u32,
    /// CSS-style easing curve description.
    pub easing_curve: String,
}

/// The full read-only catalog of presentation parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Catalog {
    palettes: Vec<PaletteVariant>,
    typography: Vec<TypographyScale>,
    densities: Vec<DensityScale>,
    motion: Vec<MotionProfile>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    // The embedded data ships with the binary; a parse failure here would
    // be a packaging defect, and the minimal catalog keeps the viewer
    // usable rather than crashing it.
    Catalog::load().unwrap_or_else(|_| Catalog::minimal())
});

/// Returns the process-wide catalog, built on first access.
#[must_use]
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    /// Loads the catalog from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON cannot be parsed or if any of the
    /// default entries is missing, since total lookups rely on them.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("data/catalog.json");
        let catalog: Self =
            serde_json::from_str(json_data).context("Failed to parse embedded catalog data")?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Checks that every table contains its default entry.
    fn validate(&self) -> Result<()> {
        if self.find_palette(DEFAULT_PALETTE).is_none() {
            anyhow::bail!("Catalog is missing the default palette '{DEFAULT_PALETTE}'");
        }
        if self.find_typography(DEFAULT_TYPOGRAPHY).is_none() {
            anyhow::bail!("Catalog is missing the default typography scale '{DEFAULT_TYPOGRAPHY}'");
        }
        if self.find_density(DEFAULT_DENSITY).is_none() {
            anyhow::bail!("Catalog is missing the default density scale '{DEFAULT_DENSITY}'");
        }
        if self.find_motion(DEFAULT_MOTION).is_none() {
            anyhow::bail!("Catalog is missing the default motion profile '{DEFAULT_MOTION}'");
        }
        Ok(())
    }

    /// Smallest catalog that still satisfies the total-lookup contract:
    /// one default entry per table.
    fn minimal() -> Self {
        Self {
            palettes: vec![PaletteVariant {
                id: DEFAULT_PALETTE.to_string(),
                primary: RgbColor::new(0x1a, 0x1a, 0x2e),
                secondary: RgbColor::new(0x16, 0x21, 0x3e),
                accent: RgbColor::new(0x0f, 0x34, 0x60),
                text: RgbColor::new(0xea, 0xea, 0xea),
                background: RgbColor::new(0x0f, 0x0f, 0x1a),
            }],
            typography: vec![TypographyScale {
                id: DEFAULT_TYPOGRAPHY.to_string(),
                base_size: "16px".to_string(),
                title_size: "2.5rem".to_string(),
                subtitle_size: "1.1rem".to_string(),
            }],
            densities: vec![DensityScale {
                id: DEFAULT_DENSITY.to_string(),
                spacing_unit: "2rem".to_string(),
                padding_unit: "2.5rem".to_string(),
            }],
            motion: vec![MotionProfile {
                id: DEFAULT_MOTION.to_string(),
                duration_ms: 300,
                easing_curve: "ease".to_string(),
            }],
        }
    }

    /// Looks up a palette by exact id.
    #[must_use]
    pub fn find_palette(&self, id: &str) -> Option<&PaletteVariant> {
        self.palettes.iter().find(|p| p.id == id)
    }

    /// Looks up a typography scale by exact id.
    #[must_use]
    pub fn find_typography(&self, id: &str) -> Option<&TypographyScale> {
        self.typography.iter().find(|t| t.id == id)
    }

    /// Looks up a density scale by exact id.
    #[must_use]
    pub fn find_density(&self, id: &str) -> Option<&DensityScale> {
        self.densities.iter().find(|d| d.id == id)
    }

    /// Looks up a motion profile by exact id.
    #[must_use]
    pub fn find_motion(&self, id: &str) -> Option<&MotionProfile> {
        self.motion.iter().find(|m| m.id == id)
    }

    /// Total palette lookup: returns the default variant for unknown ids.
    #[must_use]
    pub fn palette(&self, id: &str) -> &PaletteVariant {
        self.find_palette(id)
            .or_else(|| self.find_palette(DEFAULT_PALETTE))
            .unwrap_or(&self.palettes[0])
    }

    /// Total typography lookup: returns the default scale for unknown ids.
    #[must_use]
    pub fn typography(&self, id: &str) -> &TypographyScale {
        self.find_typography(id)
            .or_else(|| self.find_typography(DEFAULT_TYPOGRAPHY))
            .unwrap_or(&self.typography[0])
    }

    /// Total density lookup: returns the default scale for unknown ids.
    #[must_use]
    pub fn density(&self, id: &str) -> &DensityScale {
        self.find_density(id)
            .or_else(|| self.find_density(DEFAULT_DENSITY))
            .unwrap_or(&self.densities[0])
    }

    /// Total motion lookup: returns the default profile for unknown ids.
    #[must_use]
    pub fn motion(&self, id: &str) -> &MotionProfile {
        self.find_motion(id)
            .or_else(|| self.find_motion(DEFAULT_MOTION))
            .unwrap_or(&self.motion[0])
    }

    /// All palette variants, in catalog order (quick-switch button order).
    #[must_use]
    pub fn palettes(&self) -> &[PaletteVariant] {
        &self.palettes
    }

    /// All typography scale ids, in catalog order.
    #[must_use]
    pub fn typography_ids(&self) -> Vec<&str> {
        self.typography.iter().map(|t| t.id.as_str()).collect()
    }

    /// All density scale ids, in catalog order.
    #[must_use]
    pub fn density_ids(&self) -> Vec<&str> {
        self.densities.iter().map(|d| d.id.as_str()).collect()
    }

    /// All motion profile ids, in catalog order.
    #[must_use]
    pub fn motion_ids(&self) -> Vec<&str> {
        self.motion.iter().map(|m| m.id.as_str()).collect()
    }
}
