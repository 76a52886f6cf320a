//! Named render-surface variables.
//!
//! The render surface is the seam between presentation logic and the
//! display layer: controllers write named style variables and one boolean
//! flag, the display layer only reads them. Each preference aspect owns a
//! disjoint subset of variables, which is what makes startup replay
//! order-independent.

use std::collections::HashMap;
use std::fmt;

use crate::catalog::{
    catalog, DEFAULT_DENSITY, DEFAULT_MOTION, DEFAULT_PALETTE, DEFAULT_TYPOGRAPHY,
};

/// A named style variable on the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceVar {
    /// Primary chrome color (palette aspect).
    PrimaryColor,
    /// Secondary chrome color (palette aspect).
    SecondaryColor,
    /// Accent color (palette aspect).
    AccentColor,
    /// Body text color (palette aspect).
    TextColor,
    /// Page background color (palette aspect).
    BackgroundColor,
    /// Body text size (typography aspect).
    BaseFontSize,
    /// Title size (typography aspect).
    TitleFontSize,
    /// Subtitle size (typography aspect).
    SubtitleFontSize,
    /// Vertical spacing between blocks (density aspect).
    SectionSpacing,
    /// Padding inside a section (density aspect).
    SectionPadding,
    /// Transition duration (motion aspect).
    TransitionDuration,
    /// Transition easing curve (motion aspect).
    TransitionTiming,
}

impl fmt::Display for SurfaceVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrimaryColor => "primary-color",
            Self::SecondaryColor => "secondary-color",
            Self::AccentColor => "accent-color",
            Self::TextColor => "text-color",
            Self::BackgroundColor => "background-color",
            Self::BaseFontSize => "base-font-size",
            Self::TitleFontSize => "title-font-size",
            Self::SubtitleFontSize => "subtitle-font-size",
            Self::SectionSpacing => "section-spacing",
            Self::SectionPadding => "section-padding",
            Self::TransitionDuration => "transition-duration",
            Self::TransitionTiming => "transition-timing",
        };
        write!(f, "{name}")
    }
}

/// The mutable set of style variables and flags the display layer reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    vars: HashMap<SurfaceVar, String>,
    reduce_motion: bool,
}

impl RenderSurface {
    /// Creates a surface pre-seeded with the catalog default bundles, so
    /// the page renders sensibly before any preference is applied.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut surface = Self {
            vars: HashMap::new(),
            reduce_motion: false,
        };

        let cat = catalog();
        let palette = cat.palette(DEFAULT_PALETTE);
        surface.set(SurfaceVar::PrimaryColor, palette.primary.to_hex());
        surface.set(SurfaceVar::SecondaryColor, palette.secondary.to_hex());
        surface.set(SurfaceVar::AccentColor, palette.accent.to_hex());
        surface.set(SurfaceVar::TextColor, palette.text.to_hex());
        surface.set(SurfaceVar::BackgroundColor, palette.background.to_hex());

        let typography = cat.typography(DEFAULT_TYPOGRAPHY);
        surface.set(SurfaceVar::BaseFontSize, typography.base_size.clone());
        surface.set(SurfaceVar::TitleFontSize, typography.title_size.clone());
        surface.set(
            SurfaceVar::SubtitleFontSize,
            typography.subtitle_size.clone(),
        );

        let density = cat.density(DEFAULT_DENSITY);
        surface.set(SurfaceVar::SectionSpacing, density.spacing_unit.clone());
        surface.set(SurfaceVar::SectionPadding, density.padding_unit.clone());

        let motion = cat.motion(DEFAULT_MOTION);
        surface.set(
            SurfaceVar::TransitionDuration,
            format!("{}ms", motion.duration_ms),
        );
        surface.set(SurfaceVar::TransitionTiming, motion.easing_curve.clone());

        surface
    }

    /// Sets a variable to a new value.
    pub fn set(&mut self, var: SurfaceVar, value: impl Into<String>) {
        self.vars.insert(var, value.into());
    }

    /// Reads a variable. Every variable is seeded at construction, so the
    /// empty string can only be observed on a hand-built surface.
    #[must_use]
    pub fn get(&self, var: SurfaceVar) -> &str {
        self.vars.get(&var).map_or("", String::as_str)
    }

    /// The document-root reduced-motion flag.
    #[must_use]
    pub const fn reduce_motion(&self) -> bool {
        self.reduce_motion
    }

    /// Sets the document-root reduced-motion flag.
    pub fn set_reduce_motion(&mut self, on: bool) {
        self.reduce_motion = on;
    }
}

impl Default for RenderSurface {
    fn default() -> Self {
        Self::with_defaults()
    }
}
