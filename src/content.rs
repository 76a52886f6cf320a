//! The static render tree: site content queried by identifier.
//!
//! Content is opaque to the presentation core. Sections are enumerated
//! once at startup and never change; the controllers only ever refer to
//! them by id.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::sync::LazyLock;

/// Kind of content block, used for styling and reveal-watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Plain prose paragraph.
    Prose,
    /// An entry on the experience/projects timeline.
    TimelineItem,
    /// A skill grouping.
    SkillCategory,
}

/// One identified block of content within a section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Block {
    /// Stable identifier, e.g. "exp-northwind".
    pub id: String,
    /// Block kind.
    pub kind: BlockKind,
    /// Pre-wrapped display lines.
    pub lines: Vec<String>,
}

impl Block {
    /// Whether this block participates in scroll-reveal.
    ///
    /// Timeline items and skill categories start hidden and are revealed
    /// once when they scroll into view; prose is always visible.
    #[must_use]
    pub const fn reveal_watched(&self) -> bool {
        matches!(self.kind, BlockKind::TimelineItem | BlockKind::SkillCategory)
    }
}

/// One navigable content section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Section {
    /// Stable identifier; also the fragment target ("#experience").
    pub id: String,
    /// Tab label.
    pub title: String,
    /// Ordered content blocks.
    pub blocks: Vec<Block>,
}

/// The whole site: title, subtitle, and ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Site {
    /// Page title.
    pub title: String,
    /// Page subtitle.
    pub subtitle: String,
    /// Id of the section shown when no fragment is given.
    pub home_section: String,
    /// Ordered sections.
    pub sections: Vec<Section>,
}

static SITE: LazyLock<Site> = LazyLock::new(|| {
    Site::load().unwrap_or_else(|_| Site {
        title: "Untitled".to_string(),
        subtitle: String::new(),
        home_section: "home".to_string(),
        sections: vec![Section {
            id: "home".to_string(),
            title: "Home".to_string(),
            blocks: Vec::new(),
        }],
    })
});

/// Returns the process-wide site content, built on first access.
#[must_use]
pub fn site() -> &'static Site {
    &SITE
}

impl Site {
    /// Loads the site content from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON cannot be parsed or the home section
    /// is missing.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("data/site.json");
        let site: Self =
            serde_json::from_str(json_data).context("Failed to parse embedded site data")?;
        if site.find_section(&site.home_section).is_none() {
            anyhow::bail!("Site data names unknown home section '{}'", site.home_section);
        }
        Ok(site)
    }

    /// Looks up a section by exact id.
    #[must_use]
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// All section ids, in display order.
    #[must_use]
    pub fn section_ids(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.id.as_str()).collect()
    }

    /// All blocks that participate in scroll-reveal, across all sections.
    #[must_use]
    pub fn watched_block_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.blocks.iter())
            .filter(|b| b.reveal_watched())
            .map(|b| b.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_site() {
        let site = Site::load().expect("embedded site data should parse");
        assert_eq!(site.home_section, "home");
        assert!(site.sections.len() >= 3);
    }

    #[test]
    fn test_section_lookup_is_exact() {
        let site = site();
        assert!(site.find_section("experience").is_some());
        assert!(site.find_section("Experience").is_none());
        assert!(site.find_section("exp").is_none());
    }

    #[test]
    fn test_watched_blocks_are_timeline_and_skills() {
        let site = site();
        let watched = site.watched_block_ids();
        assert!(watched.contains(&"exp-northwind"));
        assert!(watched.contains(&"skills-systems"));
        // Prose blocks are never watched.
        assert!(!watched.contains(&"home-intro"));
    }

    #[test]
    fn test_section_ids_unique() {
        let site = site();
        let mut ids = site.section_ids();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
