//! Terminal front end: event loop, input mapping, and state.
//!
//! The front end owns no presentation logic. It translates key presses
//! into events, feeds them to the registered controllers, computes
//! visibility observations from the scroll position, and renders whatever
//! the render surface and controllers currently say.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod settings;
pub mod view;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::content::{site, Section, Site};
use crate::controllers::presentation::apply_palette_ephemeral;
use crate::controllers::reveal::REVEAL_MARGIN_ROWS;
use crate::controllers::{
    NavigationController, PresentationController, RevealController, ThemeQuickSwitch,
};
use crate::events::{self, AppEvent, EventContext, Subscriber};
use crate::preferences::PreferenceStore;
use crate::surface::{RenderSurface, SurfaceVar};

pub use settings::{SettingsPanel, SettingsRow, SETTINGS_ROWS};

/// Rows taken by fixed chrome (header, tabs, quick switch, status bar).
pub const CHROME_ROWS: u16 = 6;

/// What keyboard input currently means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Browsing the active section.
    Browse,
    /// The settings panel is open.
    Settings,
    /// The goto prompt is open (external fragment source).
    Goto,
}

/// Row extent of one block inside a laid-out section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRows {
    /// Block identifier.
    pub id: String,
    /// Whether the block participates in scroll-reveal.
    pub watched: bool,
    /// First row of the block, relative to the section top.
    pub start: u16,
    /// Number of rows the block occupies.
    pub height: u16,
}

/// Converts a rem-valued style string ("2.5rem") to terminal rows.
///
/// Unparseable values fall back to one row so a corrupt variable can only
/// squeeze the layout, never break it.
#[must_use]
pub fn rem_rows(value: &str) -> u16 {
    let numeric: String = value
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f32>().map_or(1, |v| v.round() as u16)
}

/// Lays out a section's blocks as row extents, using the surface's
/// density variables. Shared by rendering and visibility computation so
/// the two can never disagree.
#[must_use]
pub fn section_rows(section: &Section, surface: &RenderSurface) -> Vec<BlockRows> {
    let spacing = rem_rows(surface.get(SurfaceVar::SectionSpacing));
    let top_pad = rem_rows(surface.get(SurfaceVar::SectionPadding)) / 2;

    let mut rows = Vec::with_capacity(section.blocks.len());
    let mut cursor = top_pad;
    for block in &section.blocks {
        let height = block.lines.len() as u16;
        rows.push(BlockRows {
            id: block.id.clone(),
            watched: block.reveal_watched(),
            start: cursor,
            height,
        });
        cursor += height + spacing;
    }
    rows
}

/// Total rows a laid-out section occupies.
#[must_use]
pub fn section_height(rows: &[BlockRows]) -> u16 {
    rows.last().map_or(0, |r| r.start + r.height)
}

/// Fraction of a block inside the viewport, with the viewport extended by
/// the reveal margin on both sides.
#[must_use]
pub fn visible_ratio(block: &BlockRows, scroll: u16, viewport: u16) -> f32 {
    if block.height == 0 {
        return 0.0;
    }
    let view_top = scroll.saturating_sub(REVEAL_MARGIN_ROWS);
    let view_bottom = scroll + viewport + REVEAL_MARGIN_ROWS;
    let top = block.start.max(view_top);
    let bottom = (block.start + block.height).min(view_bottom);
    if bottom <= top {
        return 0.0;
    }
    f32::from(bottom - top) / f32::from(block.height)
}

/// All mutable application state the front end works with.
pub struct AppState {
    /// Named style variables the display layer reads.
    pub surface: RenderSurface,
    /// Durable preference persistence.
    pub store: PreferenceStore,
    /// The static render tree.
    pub site: &'static Site,
    /// Per-aspect preference handlers.
    pub presentation: PresentationController,
    /// Single-active-section state machine.
    pub navigation: NavigationController,
    /// One-shot reveal tracking.
    pub reveal: RevealController,
    /// Quick-switch palette buttons.
    pub quick_switch: ThemeQuickSwitch,
    /// Settings panel cursor.
    pub settings: SettingsPanel,
    /// Current input mode.
    pub mode: InputMode,
    /// Goto prompt buffer.
    pub goto_buffer: String,
    /// Scroll offset within the active section.
    pub scroll: u16,
    /// Body height from the last layout pass.
    pub viewport_rows: u16,
    /// Transient status-bar message.
    pub status: Option<String>,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl AppState {
    /// Builds the application state: enumerates sections, replays the
    /// persisted record onto the surface, and performs the startup
    /// navigation transition.
    #[must_use]
    pub fn new(store: PreferenceStore, fragment: Option<&str>) -> Self {
        let site = site();
        let mut surface = RenderSurface::with_defaults();
        let presentation = PresentationController::new(SettingsPanel::wired_aspects());

        // When nothing color-related is persisted yet, follow the OS
        // dark/light mode for the first impression. Not persisted: the
        // visitor hasn't chosen anything.
        let prefs = store.get();
        if prefs.palette.is_none() && prefs.theme.is_none() {
            if let Ok(dark_light::Mode::Light) = dark_light::detect() {
                apply_palette_ephemeral(&mut surface, "light");
            }
        }

        // Replay the persisted record so the surface matches it without
        // user action.
        {
            let mut ctx = EventContext::new(&mut surface, &store);
            presentation.replay(&mut ctx);
        }

        let mut navigation = NavigationController::new(
            site.section_ids().iter().map(ToString::to_string).collect(),
            site.home_section.clone(),
        );
        navigation.startup(fragment);
        navigation.take_scroll_request();

        Self {
            surface,
            store,
            site,
            presentation,
            navigation,
            reveal: RevealController::new(),
            quick_switch: ThemeQuickSwitch::from_catalog(),
            settings: SettingsPanel::new(),
            mode: InputMode::Browse,
            goto_buffer: String::new(),
            scroll: 0,
            viewport_rows: 0,
            status: None,
            should_quit: false,
        }
    }

    /// The active section, or the home section before any transition.
    #[must_use]
    pub fn active_section(&self) -> &'static Section {
        self.navigation
            .active_id()
            .and_then(|id| self.site.find_section(id))
            .or_else(|| self.site.find_section(&self.site.home_section))
            .unwrap_or(&self.site.sections[0])
    }

    /// Delivers one event to every controller that declares interest.
    pub fn dispatch(&mut self, event: &AppEvent) {
        let persist_error;
        {
            let Self {
                surface,
                store,
                presentation,
                navigation,
                reveal,
                quick_switch,
                ..
            } = self;
            let mut ctx = EventContext::new(surface, store);
            let mut subscribers: [&mut dyn Subscriber; 4] =
                [presentation, navigation, reveal, quick_switch];
            events::dispatch(event, &mut subscribers, &mut ctx);
            persist_error = ctx.take_persist_error();
        }
        if let Some(error) = persist_error {
            self.status = Some(format!("Preferences not saved: {error}"));
        }
        if self.navigation.take_scroll_request() {
            // Scroll the newly active section into view from the top.
            self.scroll = 0;
        }
    }

    /// One event-loop tick: advance countdowns, then feed the reveal
    /// controller the current visibility observations.
    pub fn on_tick(&mut self) {
        self.dispatch(&AppEvent::Tick);
        for observation in self.visibility_observations() {
            self.dispatch(&observation);
        }
    }

    /// Visibility observations for the active section's watched blocks,
    /// derived from the current scroll position and viewport.
    #[must_use]
    pub fn visibility_observations(&self) -> Vec<AppEvent> {
        if self.viewport_rows == 0 {
            return Vec::new();
        }
        section_rows(self.active_section(), &self.surface)
            .into_iter()
            .filter(|b| b.watched)
            .map(|b| AppEvent::BlockVisibility {
                ratio: visible_ratio(&b, self.scroll, self.viewport_rows),
                block: b.id,
            })
            .collect()
    }

    /// Largest useful scroll offset for the active section.
    #[must_use]
    pub fn max_scroll(&self) -> u16 {
        let rows = section_rows(self.active_section(), &self.surface);
        section_height(&rows).saturating_sub(self.viewport_rows)
    }

    fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Handles one key press in the current input mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.status = None;
        match self.mode {
            InputMode::Browse => self.handle_browse_key(key.code),
            InputMode::Settings => self.handle_settings_key(key.code),
            InputMode::Goto => self.handle_goto_key(key.code),
        }
    }

    fn handle_browse_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('s') => self.mode = InputMode::Settings,
            KeyCode::Char('g') => {
                self.goto_buffer.clear();
                self.mode = InputMode::Goto;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.select_adjacent_tab(1),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.select_adjacent_tab(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.dispatch(&AppEvent::PaletteActivated(index));
            }
            _ => {}
        }
    }

    fn select_adjacent_tab(&mut self, delta: i32) {
        let count = self.navigation.sections().len() as i32;
        if count == 0 {
            return;
        }
        let current = self.navigation.active_index().unwrap_or(0) as i32;
        let next = (current + delta).rem_euclid(count) as usize;
        self.dispatch(&AppEvent::TabSelected(next));
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('s' | 'q') => {
                self.mode = InputMode::Browse;
            }
            KeyCode::Down | KeyCode::Char('j') => self.settings.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.settings.select_previous(),
            KeyCode::Right | KeyCode::Char('l' | ' ') | KeyCode::Enter => {
                let event = self.settings.cycle(&self.store.get(), 1);
                self.dispatch(&event);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let event = self.settings.cycle(&self.store.get(), -1);
                self.dispatch(&event);
            }
            _ => {}
        }
    }

    fn handle_goto_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.mode = InputMode::Browse,
            KeyCode::Enter => {
                let fragment = self.goto_buffer.clone();
                self.mode = InputMode::Browse;
                let matched = self.navigation.resolve(&fragment).is_some();
                self.dispatch(&AppEvent::FragmentChanged(fragment.clone()));
                if !matched && !fragment.is_empty() {
                    self.status = Some(format!("No section named '{fragment}'"));
                }
            }
            KeyCode::Backspace => {
                self.goto_buffer.pop();
            }
            KeyCode::Char(c) => self.goto_buffer.push(c),
            _ => {}
        }
    }
}

/// Put the terminal into raw mode on the alternate screen.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state.
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop.
pub fn run_app(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        let size = terminal.size()?;
        state.viewport_rows = size.height.saturating_sub(CHROME_ROWS);

        terminal.draw(|f| view::render(f, state))?;

        // Poll for events with 100ms timeout; the timeout is the tick.
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => state.handle_key(key),
                Event::Resize(_, _) => {
                    // Terminal resized, will re-render on next loop
                }
                _ => {}
            }
        }

        state.on_tick();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_state() -> (TempDir, AppState) {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::at_path(dir.path().join("preferences.json"));
        let mut state = AppState::new(store, None);
        state.viewport_rows = 10;
        (dir, state)
    }

    #[test]
    fn test_rem_rows_parsing() {
        assert_eq!(rem_rows("2rem"), 2);
        assert_eq!(rem_rows("2.5rem"), 3);
        assert_eq!(rem_rows("1rem"), 1);
        assert_eq!(rem_rows("garbage"), 1);
    }

    #[test]
    fn test_section_rows_respects_density() {
        let (_dir, mut state) = test_state();
        let section = state.site.find_section("experience").unwrap();

        let comfortable = section_rows(section, &state.surface);
        state.surface.set(SurfaceVar::SectionSpacing, "1rem");
        let compact = section_rows(section, &state.surface);

        assert!(section_height(&comfortable) > section_height(&compact));
        // Same blocks either way.
        assert_eq!(comfortable.len(), compact.len());
        assert_eq!(comfortable[0].id, compact[0].id);
    }

    #[test]
    fn test_visible_ratio_extremes() {
        let block = BlockRows {
            id: "b".to_string(),
            watched: true,
            start: 0,
            height: 4,
        };
        assert!((visible_ratio(&block, 0, 10) - 1.0).abs() < f32::EPSILON);

        let far = BlockRows {
            id: "b".to_string(),
            watched: true,
            start: 100,
            height: 4,
        };
        assert!(visible_ratio(&far, 0, 10).abs() < f32::EPSILON);
    }

    #[test]
    fn test_startup_activates_home() {
        let (_dir, state) = test_state();
        assert_eq!(state.navigation.active_id(), Some("home"));
    }

    #[test]
    fn test_tab_keys_cycle_sections() {
        let (_dir, mut state) = test_state();
        let count = state.navigation.sections().len();
        state.handle_key(KeyEvent::from(KeyCode::Tab));
        assert_eq!(state.navigation.active_index(), Some(1));
        state.handle_key(KeyEvent::from(KeyCode::BackTab));
        state.handle_key(KeyEvent::from(KeyCode::BackTab));
        assert_eq!(state.navigation.active_index(), Some(count - 1));
    }

    #[test]
    fn test_goto_prompt_navigates_on_match() {
        let (_dir, mut state) = test_state();
        state.handle_key(KeyEvent::from(KeyCode::Char('g')));
        assert_eq!(state.mode, InputMode::Goto);
        for c in "#skills".chars() {
            state.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        state.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(state.mode, InputMode::Browse);
        assert_eq!(state.navigation.active_id(), Some("skills"));
    }

    #[test]
    fn test_goto_prompt_unmatched_keeps_state() {
        let (_dir, mut state) = test_state();
        state.dispatch(&AppEvent::TabSelected(1));
        state.handle_key(KeyEvent::from(KeyCode::Char('g')));
        for c in "nowhere".chars() {
            state.handle_key(KeyEvent::from(KeyCode::Char(c)));
        }
        state.handle_key(KeyEvent::from(KeyCode::Enter));
        assert_eq!(state.navigation.active_index(), Some(1));
        assert!(state.status.as_deref().unwrap_or("").contains("nowhere"));
    }

    #[test]
    fn test_quick_switch_key_applies_palette() {
        let (_dir, mut state) = test_state();
        state.handle_key(KeyEvent::from(KeyCode::Char('4')));
        // Button 4 is the "dark" palette in catalog order.
        assert_eq!(state.surface.get(SurfaceVar::AccentColor), "#BB86FC");
        assert!(state.quick_switch.is_pulsing(3));
    }

    #[test]
    fn test_settings_panel_cycle_persists() {
        let (_dir, mut state) = test_state();
        state.handle_key(KeyEvent::from(KeyCode::Char('s')));
        assert_eq!(state.mode, InputMode::Settings);
        state.handle_key(KeyEvent::from(KeyCode::Right));
        // FontSize row started at the default "medium"; one step forward is "large".
        assert_eq!(state.store.get().font_size.as_deref(), Some("large"));
        assert_eq!(state.surface.get(SurfaceVar::BaseFontSize), "18px");
    }

    #[test]
    fn test_tick_reveals_visible_blocks() {
        let (_dir, mut state) = test_state();
        state.dispatch(&AppEvent::TabSelected(1)); // experience
        state.on_tick();
        // The first timeline item sits near the top and is in view.
        assert!(state.reveal.is_revealed("exp-northwind"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let (_dir, mut state) = test_state();
        state.dispatch(&AppEvent::TabSelected(1));
        for _ in 0..500 {
            state.handle_key(KeyEvent::from(KeyCode::Char('j')));
        }
        assert_eq!(state.scroll, state.max_scroll());
        for _ in 0..500 {
            state.handle_key(KeyEvent::from(KeyCode::Char('k')));
        }
        assert_eq!(state.scroll, 0);
    }
}
