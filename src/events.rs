//! Event kinds, the subscriber seam, and dispatch.
//!
//! Components declare which event kinds they react to and receive events
//! through a single `notify` entry point; nothing attaches listeners to
//! individual elements. The dispatch context carries the two shared
//! mutable collaborators: the render surface and the preference store.

use crate::preferences::{PreferenceSet, PreferenceStore};
use crate::surface::RenderSurface;

/// Discriminant for event routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Direct tab selection.
    Navigation,
    /// External fragment change (startup `--section` or the goto prompt).
    Fragment,
    /// A preference control changed.
    Preference,
    /// A quick-switch palette button was activated.
    QuickPalette,
    /// A watched block's visibility ratio changed.
    Visibility,
    /// Event-loop tick (drives countdowns).
    Tick,
}

/// An event flowing through the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// User selected a tab by index.
    TabSelected(usize),
    /// The fragment changed externally, e.g. "#skills" from the goto prompt.
    FragmentChanged(String),
    /// User picked a typography scale.
    FontSizeSelected(String),
    /// User picked a density scale.
    DensitySelected(String),
    /// User picked a motion profile.
    AnimationSelected(String),
    /// User flipped the dark/light toggle; `true` means dark.
    DarkModeToggled(bool),
    /// User flipped the reduced-motion toggle.
    ReduceMotionToggled(bool),
    /// User activated a quick-switch palette button by index.
    PaletteActivated(usize),
    /// A watched block's visible fraction was observed.
    BlockVisibility {
        /// Block identifier.
        block: String,
        /// Fraction of the block inside the (margin-extended) viewport, 0.0-1.0.
        ratio: f32,
    },
    /// Event-loop tick.
    Tick,
}

impl AppEvent {
    /// The routing kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::TabSelected(_) => EventKind::Navigation,
            Self::FragmentChanged(_) => EventKind::Fragment,
            Self::FontSizeSelected(_)
            | Self::DensitySelected(_)
            | Self::AnimationSelected(_)
            | Self::DarkModeToggled(_)
            | Self::ReduceMotionToggled(_) => EventKind::Preference,
            Self::PaletteActivated(_) => EventKind::QuickPalette,
            Self::BlockVisibility { .. } => EventKind::Visibility,
            Self::Tick => EventKind::Tick,
        }
    }
}

/// Shared collaborators handed to subscribers during dispatch.
pub struct EventContext<'a> {
    /// The render surface controllers write to.
    pub surface: &'a mut RenderSurface,
    /// The preference store controllers persist through.
    pub store: &'a PreferenceStore,
    persist_error: Option<String>,
}

impl<'a> EventContext<'a> {
    /// Creates a context over the shared surface and store.
    pub fn new(surface: &'a mut RenderSurface, store: &'a PreferenceStore) -> Self {
        Self {
            surface,
            store,
            persist_error: None,
        }
    }

    /// Persists a partial preference record.
    ///
    /// A write failure never interrupts the handler; it is recorded so the
    /// front end can mention it in the status bar.
    pub fn persist(&mut self, partial: PreferenceSet) {
        if let Err(e) = self.store.set(partial) {
            self.persist_error = Some(e.to_string());
        }
    }

    /// Takes the most recent persistence error, if any.
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.persist_error.take()
    }
}

/// A component that reacts to declared event kinds.
pub trait Subscriber {
    /// Whether this component wants events of `kind`.
    fn reacts_to(&self, kind: EventKind) -> bool;

    /// Handles one event. Runs to completion; never fails outward.
    fn notify(&mut self, event: &AppEvent, ctx: &mut EventContext<'_>);
}

/// Delivers `event` to every subscriber that declares interest in its kind.
pub fn dispatch(
    event: &AppEvent,
    subscribers: &mut [&mut dyn Subscriber],
    ctx: &mut EventContext<'_>,
) {
    let kind = event.kind();
    for subscriber in subscribers.iter_mut() {
        if subscriber.reacts_to(kind) {
            subscriber.notify(event, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kinds() {
        assert_eq!(AppEvent::TabSelected(1).kind(), EventKind::Navigation);
        assert_eq!(
            AppEvent::FragmentChanged("#skills".to_string()).kind(),
            EventKind::Fragment
        );
        assert_eq!(
            AppEvent::FontSizeSelected("large".to_string()).kind(),
            EventKind::Preference
        );
        assert_eq!(AppEvent::DarkModeToggled(true).kind(), EventKind::Preference);
        assert_eq!(AppEvent::PaletteActivated(0).kind(), EventKind::QuickPalette);
        assert_eq!(AppEvent::Tick.kind(), EventKind::Tick);
    }

    struct Counter {
        kind: EventKind,
        seen: usize,
    }

    impl Subscriber for Counter {
        fn reacts_to(&self, kind: EventKind) -> bool {
            kind == self.kind
        }

        fn notify(&mut self, _event: &AppEvent, _ctx: &mut EventContext<'_>) {
            self.seen += 1;
        }
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let mut surface = RenderSurface::with_defaults();
        let dir = tempfile::TempDir::new().unwrap();
        let store = crate::preferences::PreferenceStore::at_path(dir.path().join("p.json"));
        let mut ctx = EventContext::new(&mut surface, &store);

        let mut nav = Counter {
            kind: EventKind::Navigation,
            seen: 0,
        };
        let mut tick = Counter {
            kind: EventKind::Tick,
            seen: 0,
        };

        dispatch(
            &AppEvent::TabSelected(2),
            &mut [&mut nav, &mut tick],
            &mut ctx,
        );
        dispatch(&AppEvent::Tick, &mut [&mut nav, &mut tick], &mut ctx);
        dispatch(&AppEvent::Tick, &mut [&mut nav, &mut tick], &mut ctx);

        assert_eq!(nav.seen, 1);
        assert_eq!(tick.seen, 2);
    }
}
