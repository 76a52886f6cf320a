//! Section navigation state machine.
//!
//! Exactly one content section is active once any transition has
//! occurred. Two independent event sources converge here: direct tab
//! selection, and external fragment changes (the startup `--section`
//! argument and the goto prompt). The machine starts with no section
//! active; `startup` always performs a first transition.

use crate::events::{AppEvent, EventContext, EventKind, Subscriber};

/// The single-active-section state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationController {
    /// Section ids, enumerated once at startup from the render tree.
    sections: Vec<String>,
    /// Fallback target for empty or unmatched startup fragments.
    home: String,
    active: Option<usize>,
    scroll_requested: bool,
}

impl NavigationController {
    /// Creates the machine over a fixed section list.
    #[must_use]
    pub fn new(sections: Vec<String>, home: impl Into<String>) -> Self {
        Self {
            sections,
            home: home.into(),
            active: None,
            scroll_requested: false,
        }
    }

    /// The known section ids, in tab order.
    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Index of the active section, if any transition has occurred.
    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Id of the active section, if any transition has occurred.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.sections[i].as_str())
    }

    /// Whether the section named `id` is the active one.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id() == Some(id)
    }

    /// Activates the section at `index`: every other section is
    /// deactivated and the viewer is asked to scroll the new section into
    /// view. Out-of-range indices leave the machine unchanged.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.sections.len() {
            return false;
        }
        self.active = Some(index);
        self.scroll_requested = true;
        true
    }

    /// Resolves a fragment (`"skills"` or `"#skills"`) to a section index
    /// by exact id match.
    #[must_use]
    pub fn resolve(&self, fragment: &str) -> Option<usize> {
        let id = fragment.strip_prefix('#').unwrap_or(fragment);
        self.sections.iter().position(|s| s == id)
    }

    /// Handles an external fragment change.
    ///
    /// Unmatched fragments cause no transition; the machine keeps its
    /// current state.
    pub fn fragment_changed(&mut self, fragment: &str) -> bool {
        match self.resolve(fragment) {
            Some(index) => self.activate(index),
            None => false,
        }
    }

    /// Performs the startup transition.
    ///
    /// An empty or missing fragment resolves to the home section, and so
    /// does an unmatched one: after startup exactly one section is always
    /// active.
    pub fn startup(&mut self, fragment: Option<&str>) {
        let target = fragment
            .filter(|f| !f.is_empty())
            .and_then(|f| self.resolve(f))
            .or_else(|| self.resolve(&self.home.clone()))
            .unwrap_or(0);
        self.activate(target);
    }

    /// Takes the pending scroll-into-view request, if one was raised by a
    /// transition since the last call.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }
}

impl Subscriber for NavigationController {
    fn reacts_to(&self, kind: EventKind) -> bool {
        matches!(kind, EventKind::Navigation | EventKind::Fragment)
    }

    fn notify(&mut self, event: &AppEvent, _ctx: &mut EventContext<'_>) {
        match event {
            AppEvent::TabSelected(index) => {
                self.activate(*index);
            }
            AppEvent::FragmentChanged(fragment) => {
                self.fragment_changed(fragment);
            }
            _ => {}
        }
    }
}
