//! Quick-switch palette buttons with a transient pulse.
//!
//! One button per catalog palette. Activation routes through the unified
//! `set_palette` entry point, so a quick-switch choice is the same source
//! of truth the dark/light toggle uses, and it starts a short pulse on
//! the activated button. The pulse is a scoped countdown ticked by the
//! event loop: re-activating a button resets the countdown instead of
//! racing a second timer.

use crate::catalog::catalog;
use crate::controllers::presentation::set_palette;
use crate::events::{AppEvent, EventContext, EventKind, Subscriber};

/// Pulse length in event-loop ticks (~200 ms at the 100 ms tick rate).
pub const PULSE_TICKS: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse {
    button: usize,
    ticks_left: u8,
}

/// The quick-switch control surface.
#[derive(Debug, Clone)]
pub struct ThemeQuickSwitch {
    buttons: Vec<String>,
    pulse: Option<Pulse>,
}

impl ThemeQuickSwitch {
    /// Creates one button per catalog palette, in catalog order.
    #[must_use]
    pub fn from_catalog() -> Self {
        Self::new(
            catalog()
                .palettes()
                .iter()
                .map(|p| p.id.clone())
                .collect(),
        )
    }

    /// Creates the control surface over an explicit button list.
    #[must_use]
    pub const fn new(buttons: Vec<String>) -> Self {
        Self {
            buttons,
            pulse: None,
        }
    }

    /// Palette ids carried by the buttons, in display order.
    #[must_use]
    pub fn buttons(&self) -> &[String] {
        &self.buttons
    }

    /// Activates the button at `index`: applies its palette and starts
    /// (or restarts) the pulse. Unknown indices are ignored.
    pub fn activate(&mut self, ctx: &mut EventContext<'_>, index: usize) {
        let Some(id) = self.buttons.get(index).cloned() else {
            return;
        };
        if set_palette(ctx, &id) {
            // A fresh activation supersedes any pulse still running.
            self.pulse = Some(Pulse {
                button: index,
                ticks_left: PULSE_TICKS,
            });
        }
    }

    /// Advances the pulse countdown by one event-loop tick.
    pub fn tick(&mut self) {
        if let Some(pulse) = &mut self.pulse {
            if pulse.ticks_left > 1 {
                pulse.ticks_left -= 1;
            } else {
                self.pulse = None;
            }
        }
    }

    /// Whether the button at `index` is currently pulsing.
    #[must_use]
    pub fn is_pulsing(&self, index: usize) -> bool {
        self.pulse.is_some_and(|p| p.button == index)
    }
}

impl Subscriber for ThemeQuickSwitch {
    fn reacts_to(&self, kind: EventKind) -> bool {
        matches!(kind, EventKind::QuickPalette | EventKind::Tick)
    }

    fn notify(&mut self, event: &AppEvent, ctx: &mut EventContext<'_>) {
        match event {
            AppEvent::PaletteActivated(index) => self.activate(ctx, *index),
            AppEvent::Tick => self.tick(),
            _ => {}
        }
    }
}
