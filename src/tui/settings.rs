//! Settings panel: the preference control surface.
//!
//! One row per preference aspect. The panel holds only cursor state; the
//! displayed values come from the persisted record, and every change is
//! emitted as an event for the presentation controller to validate,
//! apply, and persist.

use crate::catalog::{catalog, DEFAULT_DENSITY, DEFAULT_MOTION, DEFAULT_TYPOGRAPHY};
use crate::controllers::Aspect;
use crate::events::AppEvent;
use crate::preferences::{PreferenceSet, ThemeChoice};

/// One row of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    /// Typography scale selector.
    FontSize,
    /// Content density selector.
    Density,
    /// Motion profile selector.
    Animation,
    /// Dark/light toggle.
    DarkMode,
    /// Reduced-motion toggle.
    ReduceMotion,
}

/// Rows in display order.
pub const SETTINGS_ROWS: [SettingsRow; 5] = [
    SettingsRow::FontSize,
    SettingsRow::Density,
    SettingsRow::Animation,
    SettingsRow::DarkMode,
    SettingsRow::ReduceMotion,
];

impl SettingsRow {
    /// Display label for the row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FontSize => "Font size",
            Self::Density => "Content density",
            Self::Animation => "Animation style",
            Self::DarkMode => "Dark mode",
            Self::ReduceMotion => "Reduce motion",
        }
    }

    /// The preference aspect this control element wires.
    #[must_use]
    pub const fn aspect(self) -> Aspect {
        match self {
            Self::FontSize => Aspect::Typography,
            Self::Density => Aspect::Density,
            Self::Animation => Aspect::Motion,
            Self::DarkMode => Aspect::DarkMode,
            Self::ReduceMotion => Aspect::ReduceMotion,
        }
    }
}

/// Cursor state of the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    selected: usize,
}

impl SettingsPanel {
    /// Creates a panel with the first row selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The aspects this control surface wires; aspects without a row here
    /// are never wired and never replayed.
    #[must_use]
    pub fn wired_aspects() -> Vec<Aspect> {
        let mut aspects: Vec<Aspect> = SETTINGS_ROWS.iter().map(|r| r.aspect()).collect();
        // The quick-switch buttons are the palette's control element.
        aspects.push(Aspect::Palette);
        aspects
    }

    /// The currently selected row.
    #[must_use]
    pub const fn selected_row(&self) -> SettingsRow {
        SETTINGS_ROWS[self.selected]
    }

    /// Index of the currently selected row.
    #[must_use]
    pub const fn selected_index(&self) -> usize {
        self.selected
    }

    /// Moves the cursor down, wrapping.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SETTINGS_ROWS.len();
    }

    /// Moves the cursor up, wrapping.
    pub fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(SETTINGS_ROWS.len() - 1);
    }

    /// The value a row currently shows, given the persisted record.
    #[must_use]
    pub fn displayed_value(row: SettingsRow, prefs: &PreferenceSet) -> String {
        match row {
            SettingsRow::FontSize => prefs
                .font_size
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPOGRAPHY.to_string()),
            SettingsRow::Density => prefs
                .density
                .clone()
                .unwrap_or_else(|| DEFAULT_DENSITY.to_string()),
            SettingsRow::Animation => prefs
                .animation
                .clone()
                .unwrap_or_else(|| DEFAULT_MOTION.to_string()),
            SettingsRow::DarkMode => match prefs.theme {
                Some(ThemeChoice::Dark) => "on".to_string(),
                Some(ThemeChoice::Light) => "off".to_string(),
                None => "unset".to_string(),
            },
            SettingsRow::ReduceMotion => match prefs.reduce_motion {
                Some(true) => "on".to_string(),
                Some(false) => "off".to_string(),
                None => "unset".to_string(),
            },
        }
    }

    /// Cycles the selected row forward (`delta = 1`) or backward
    /// (`delta = -1`) and returns the event describing the new choice.
    #[must_use]
    pub fn cycle(&self, prefs: &PreferenceSet, delta: i32) -> AppEvent {
        match self.selected_row() {
            SettingsRow::FontSize => AppEvent::FontSizeSelected(cycle_id(
                &catalog().typography_ids(),
                prefs.font_size.as_deref().unwrap_or(DEFAULT_TYPOGRAPHY),
                delta,
            )),
            SettingsRow::Density => AppEvent::DensitySelected(cycle_id(
                &catalog().density_ids(),
                prefs.density.as_deref().unwrap_or(DEFAULT_DENSITY),
                delta,
            )),
            SettingsRow::Animation => AppEvent::AnimationSelected(cycle_id(
                &catalog().motion_ids(),
                prefs.animation.as_deref().unwrap_or(DEFAULT_MOTION),
                delta,
            )),
            SettingsRow::DarkMode => {
                AppEvent::DarkModeToggled(prefs.theme != Some(ThemeChoice::Dark))
            }
            SettingsRow::ReduceMotion => {
                AppEvent::ReduceMotionToggled(prefs.reduce_motion != Some(true))
            }
        }
    }
}

/// Steps through an id list by `delta`, wrapping; unknown current ids start
/// from the beginning.
fn cycle_id(ids: &[&str], current: &str, delta: i32) -> String {
    let len = ids.len() as i32;
    let position = ids.iter().position(|id| *id == current).map_or(0, |p| {
        (p as i32 + delta).rem_euclid(len) as usize
    });
    ids[position].to_string()
}
