//! One-shot scroll-reveal for watched content blocks.
//!
//! Watched blocks start hidden/offset. The first visibility observation
//! whose ratio crosses the threshold reveals the block, and nothing ever
//! un-reveals it: leaving the viewport and re-entering later changes
//! nothing. Blocks are independent; observations may arrive in any order.

use std::collections::HashSet;

use crate::events::{AppEvent, EventContext, EventKind, Subscriber};

/// Fraction of a block that must be inside the viewport to reveal it.
pub const REVEAL_THRESHOLD: f32 = 0.1;

/// Rows of slack added around the viewport when computing visibility, so
/// blocks start revealing just before they fully enter view.
pub const REVEAL_MARGIN_ROWS: u16 = 2;

/// Tracks which watched blocks have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealController {
    revealed: HashSet<String>,
}

impl RevealController {
    /// Creates a controller with every watched block still hidden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visibility observation for `block`.
    ///
    /// Returns `true` when this observation reveals the block for the
    /// first time. Ratios below the threshold never change state, and a
    /// revealed block stays revealed regardless of later observations.
    pub fn observe(&mut self, block: &str, ratio: f32) -> bool {
        if ratio < REVEAL_THRESHOLD || self.revealed.contains(block) {
            return false;
        }
        self.revealed.insert(block.to_string());
        true
    }

    /// Whether `block` has been revealed.
    #[must_use]
    pub fn is_revealed(&self, block: &str) -> bool {
        self.revealed.contains(block)
    }

    /// Number of blocks revealed so far.
    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}

impl Subscriber for RevealController {
    fn reacts_to(&self, kind: EventKind) -> bool {
        kind == EventKind::Visibility
    }

    fn notify(&mut self, event: &AppEvent, _ctx: &mut EventContext<'_>) {
        if let AppEvent::BlockVisibility { block, ratio } = event {
            self.observe(block, *ratio);
        }
    }
}
