//! End-to-end tests over the application state: replaying the persisted
//! record across sessions, section navigation, and content reveals.

use folio::catalog::catalog;
use folio::events::AppEvent;
use folio::preferences::{PreferenceSet, PreferenceStore};
use folio::surface::SurfaceVar;
use folio::tui::AppState;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PreferenceStore {
    PreferenceStore::at_path(dir.path().join("preferences.json"))
}

/// Pins the colors so the OS dark/light probe never runs.
fn seeded_store(dir: &TempDir) -> PreferenceStore {
    let store = store_in(dir);
    store
        .set(PreferenceSet {
            palette: Some("professional".to_string()),
            ..Default::default()
        })
        .unwrap();
    store
}

#[test]
fn test_typography_choice_survives_a_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut state = AppState::new(seeded_store(&dir), None);
        state.dispatch(&AppEvent::FontSizeSelected("large".to_string()));
    }

    // A fresh session replays the record without any user action.
    let state = AppState::new(seeded_store(&dir), None);
    assert_eq!(state.surface.get(SurfaceVar::BaseFontSize), "18px");
    assert_eq!(state.surface.get(SurfaceVar::TitleFontSize), "2.8rem");
    assert_eq!(state.surface.get(SurfaceVar::SubtitleFontSize), "1.2rem");
    assert_eq!(state.store.get().font_size.as_deref(), Some("large"));
}

#[test]
fn test_quick_switch_palette_survives_a_restart() {
    let dir = TempDir::new().unwrap();

    {
        let mut state = AppState::new(seeded_store(&dir), None);
        // Button order follows the catalog; index 4 is "night".
        state.dispatch(&AppEvent::PaletteActivated(4));
        assert_eq!(state.surface.get(SurfaceVar::AccentColor), "#9D4EDD");
    }

    let state = AppState::new(store_in(&dir), None);
    assert_eq!(state.store.get().palette.as_deref(), Some("night"));
    assert_eq!(state.surface.get(SurfaceVar::PrimaryColor), "#10002B");
    assert_eq!(state.surface.get(SurfaceVar::AccentColor), "#9D4EDD");
}

#[test]
fn test_dark_toggle_records_both_palette_and_theme() {
    let dir = TempDir::new().unwrap();

    {
        let mut state = AppState::new(seeded_store(&dir), None);
        state.dispatch(&AppEvent::DarkModeToggled(true));
    }

    let state = AppState::new(store_in(&dir), None);
    let record = state.store.get();
    assert_eq!(record.palette.as_deref(), Some("dark"));
    assert!(record.theme.is_some());
    assert_eq!(state.surface.get(SurfaceVar::AccentColor), "#BB86FC");
}

#[test]
fn test_exactly_one_section_is_active() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(seeded_store(&dir), None);

    // Startup lands on the home section.
    assert_eq!(state.navigation.active_id(), Some("home"));

    state.dispatch(&AppEvent::TabSelected(2));
    assert_eq!(state.navigation.active_id(), Some("skills"));

    state.dispatch(&AppEvent::FragmentChanged("#contact".to_string()));
    assert_eq!(state.navigation.active_id(), Some("contact"));

    // An unmatched fragment causes no transition at all.
    state.dispatch(&AppEvent::FragmentChanged("#attic".to_string()));
    assert_eq!(state.navigation.active_id(), Some("contact"));
}

#[test]
fn test_startup_fragment_selects_section_or_falls_back_home() {
    let dir = TempDir::new().unwrap();

    let state = AppState::new(seeded_store(&dir), Some("projects"));
    assert_eq!(state.navigation.active_id(), Some("projects"));

    // Leading '#' is accepted, matching the address-bar form.
    let state = AppState::new(seeded_store(&dir), Some("#skills"));
    assert_eq!(state.navigation.active_id(), Some("skills"));

    let state = AppState::new(seeded_store(&dir), Some("no-such-section"));
    assert_eq!(state.navigation.active_id(), Some("home"));
}

#[test]
fn test_reveals_survive_layout_changes() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(seeded_store(&dir), Some("experience"));
    state.viewport_rows = 40;

    state.on_tick();
    assert!(state.reveal.is_revealed("exp-northwind"));
    let revealed_before = state.reveal.revealed_count();

    // A density change reshapes every row extent, but a revealed block
    // never goes back to hidden.
    state.dispatch(&AppEvent::DensitySelected("compact".to_string()));
    state.on_tick();
    assert!(state.reveal.is_revealed("exp-northwind"));
    assert!(state.reveal.revealed_count() >= revealed_before);
}

#[test]
fn test_unknown_catalog_ids_fall_back_to_defaults() {
    let typography = catalog().typography("enormous");
    assert_eq!(typography.id, "medium");

    let density = catalog().density("micro");
    assert_eq!(density.id, "comfortable");

    let motion = catalog().motion("teleport");
    assert_eq!(motion.id, "smooth");

    let palette = catalog().palette("sepia");
    assert_eq!(palette.id, "professional");
}

#[test]
fn test_unknown_preference_ids_leave_the_surface_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut state = AppState::new(seeded_store(&dir), None);
    let before = state.surface.get(SurfaceVar::BaseFontSize).to_string();

    state.dispatch(&AppEvent::FontSizeSelected("enormous".to_string()));

    assert_eq!(state.surface.get(SurfaceVar::BaseFontSize), before);
    assert!(state.store.get().font_size.is_none());
}
