//! Folio is a terminal viewer for a personal portfolio site. Section
//! navigation, scroll-driven content reveals, and a persisted set of
//! presentation preferences (palette, typography, density, motion) all
//! flow through a shared render surface that the widgets draw from.

pub mod catalog;
pub mod color;
pub mod constants;
pub mod content;
pub mod controllers;
pub mod events;
pub mod preferences;
pub mod surface;
pub mod tui;
