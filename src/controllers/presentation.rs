//! Per-aspect preference handlers: validate, apply, persist.
//!
//! Each aspect (palette, typography, density, motion, dark mode, reduced
//! motion) owns a disjoint set of render-surface variables. A handler
//! validates the selected id against the catalog (invalid ids are a
//! no-op: nothing applied, nothing persisted), writes all of its
//! variables, then persists only its own key. Startup `replay` pushes
//! every persisted aspect back through the same application logic, so the
//! surface matches the stored record without user action; disjoint
//! variable ownership makes the replay order irrelevant.
//!
//! `set_palette` is the single entry point for color changes. The
//! dark/light toggle, the quick switch, and replay all route through it,
//! so there is exactly one source of truth for the palette.

use std::collections::HashSet;

use crate::catalog::{catalog, PaletteVariant};
use crate::events::{AppEvent, EventContext, EventKind, Subscriber};
use crate::preferences::{PreferenceSet, ThemeChoice};
use crate::surface::{RenderSurface, SurfaceVar};

/// A preference aspect with its own control element and surface variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    /// Color palette (quick switch and replay).
    Palette,
    /// Typography scale selector.
    Typography,
    /// Content density selector.
    Density,
    /// Motion profile selector.
    Motion,
    /// Dark/light toggle.
    DarkMode,
    /// Reduced-motion toggle.
    ReduceMotion,
}

/// Writes a palette's five color variables to the surface.
fn apply_palette(surface: &mut RenderSurface, variant: &PaletteVariant) {
    surface.set(SurfaceVar::PrimaryColor, variant.primary.to_hex());
    surface.set(SurfaceVar::SecondaryColor, variant.secondary.to_hex());
    surface.set(SurfaceVar::AccentColor, variant.accent.to_hex());
    surface.set(SurfaceVar::TextColor, variant.text.to_hex());
    surface.set(SurfaceVar::BackgroundColor, variant.background.to_hex());
}

/// Applies and persists a palette selection.
///
/// The one entry point for color changes: used by the dark/light toggle,
/// the quick switch, and startup replay. Returns `false` (and changes
/// nothing) for an id the catalog does not know.
pub fn set_palette(ctx: &mut EventContext<'_>, id: &str) -> bool {
    let Some(variant) = catalog().find_palette(id) else {
        return false;
    };
    apply_palette(ctx.surface, variant);
    ctx.persist(PreferenceSet {
        palette: Some(id.to_string()),
        ..PreferenceSet::default()
    });
    true
}

/// Applies a palette to the surface without persisting.
///
/// Used for the OS-theme default before any preference exists.
pub fn apply_palette_ephemeral(surface: &mut RenderSurface, id: &str) {
    apply_palette(surface, catalog().palette(id));
}

/// Per-aspect preference handlers over the wired control elements.
///
/// An aspect whose control element is absent from the page is never
/// wired: its handler is never invoked and never replayed, and the other
/// aspects proceed unaffected.
#[derive(Debug, Clone)]
pub struct PresentationController {
    wired: HashSet<Aspect>,
}

impl PresentationController {
    /// Creates a controller over the given wired aspects.
    #[must_use]
    pub fn new(wired: impl IntoIterator<Item = Aspect>) -> Self {
        Self {
            wired: wired.into_iter().collect(),
        }
    }

    /// Creates a controller with every aspect wired (the full control
    /// surface is present).
    #[must_use]
    pub fn fully_wired() -> Self {
        Self::new([
            Aspect::Palette,
            Aspect::Typography,
            Aspect::Density,
            Aspect::Motion,
            Aspect::DarkMode,
            Aspect::ReduceMotion,
        ])
    }

    /// Whether an aspect's control element was found and wired.
    #[must_use]
    pub fn is_wired(&self, aspect: Aspect) -> bool {
        self.wired.contains(&aspect)
    }

    /// Handles a typography selection.
    pub fn handle_font_size(&self, ctx: &mut EventContext<'_>, id: &str) {
        if !self.is_wired(Aspect::Typography) {
            return;
        }
        let Some(scale) = catalog().find_typography(id) else {
            return;
        };
        ctx.surface.set(SurfaceVar::BaseFontSize, scale.base_size.clone());
        ctx.surface
            .set(SurfaceVar::TitleFontSize, scale.title_size.clone());
        ctx.surface
            .set(SurfaceVar::SubtitleFontSize, scale.subtitle_size.clone());
        ctx.persist(PreferenceSet {
            font_size: Some(id.to_string()),
            ..PreferenceSet::default()
        });
    }

    /// Handles a density selection.
    pub fn handle_density(&self, ctx: &mut EventContext<'_>, id: &str) {
        if !self.is_wired(Aspect::Density) {
            return;
        }
        let Some(scale) = catalog().find_density(id) else {
            return;
        };
        ctx.surface
            .set(SurfaceVar::SectionSpacing, scale.spacing_unit.clone());
        ctx.surface
            .set(SurfaceVar::SectionPadding, scale.padding_unit.clone());
        ctx.persist(PreferenceSet {
            density: Some(id.to_string()),
            ..PreferenceSet::default()
        });
    }

    /// Handles a motion profile selection.
    pub fn handle_animation(&self, ctx: &mut EventContext<'_>, id: &str) {
        if !self.is_wired(Aspect::Motion) {
            return;
        }
        let Some(profile) = catalog().find_motion(id) else {
            return;
        };
        ctx.surface.set(
            SurfaceVar::TransitionDuration,
            format!("{}ms", profile.duration_ms),
        );
        ctx.surface
            .set(SurfaceVar::TransitionTiming, profile.easing_curve.clone());
        ctx.persist(PreferenceSet {
            animation: Some(id.to_string()),
            ..PreferenceSet::default()
        });
    }

    /// Handles the dark/light toggle.
    ///
    /// Routes through `set_palette` and additionally persists the toggle's
    /// own state under the `theme` key.
    pub fn handle_dark_mode(&self, ctx: &mut EventContext<'_>, dark: bool) {
        if !self.is_wired(Aspect::DarkMode) {
            return;
        }
        let choice = if dark {
            ThemeChoice::Dark
        } else {
            ThemeChoice::Light
        };
        if set_palette(ctx, choice.palette_id()) {
            ctx.persist(PreferenceSet {
                theme: Some(choice),
                ..PreferenceSet::default()
            });
        }
    }

    /// Handles the reduced-motion toggle.
    pub fn handle_reduce_motion(&self, ctx: &mut EventContext<'_>, on: bool) {
        if !self.is_wired(Aspect::ReduceMotion) {
            return;
        }
        ctx.surface.set_reduce_motion(on);
        ctx.persist(PreferenceSet {
            reduce_motion: Some(on),
            ..PreferenceSet::default()
        });
    }

    /// Replays every persisted, wired aspect onto the surface.
    ///
    /// Color resolution prefers the unified `palette` key and falls back
    /// to the legacy `theme` key, so records written before palette
    /// unification still restore their colors. Replay order does not
    /// affect the final surface: each aspect writes only its own
    /// variables, and colors have the single `set_palette` owner.
    pub fn replay(&self, ctx: &mut EventContext<'_>) {
        let prefs = ctx.store.get();

        if self.is_wired(Aspect::Palette) || self.is_wired(Aspect::DarkMode) {
            if let Some(id) = prefs.palette.as_deref() {
                set_palette(ctx, id);
            } else if let Some(choice) = prefs.theme {
                set_palette(ctx, choice.palette_id());
            }
        }
        if let Some(id) = prefs.font_size.as_deref() {
            self.handle_font_size(ctx, id);
        }
        if let Some(id) = prefs.density.as_deref() {
            self.handle_density(ctx, id);
        }
        if let Some(id) = prefs.animation.as_deref() {
            self.handle_animation(ctx, id);
        }
        if let Some(on) = prefs.reduce_motion {
            self.handle_reduce_motion(ctx, on);
        }
    }
}

impl Subscriber for PresentationController {
    fn reacts_to(&self, kind: EventKind) -> bool {
        kind == EventKind::Preference
    }

    fn notify(&mut self, event: &AppEvent, ctx: &mut EventContext<'_>) {
        match event {
            AppEvent::FontSizeSelected(id) => self.handle_font_size(ctx, id),
            AppEvent::DensitySelected(id) => self.handle_density(ctx, id),
            AppEvent::AnimationSelected(id) => self.handle_animation(ctx, id),
            AppEvent::DarkModeToggled(dark) => self.handle_dark_mode(ctx, *dark),
            AppEvent::ReduceMotionToggled(on) => self.handle_reduce_motion(ctx, *on),
            _ => {}
        }
    }
}
