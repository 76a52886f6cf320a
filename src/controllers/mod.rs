//! Controllers with real state and invariants.
//!
//! Each controller is a `Subscriber` over the event kinds it declares;
//! the terminal front end only translates input into events and reads the
//! resulting state back out.

pub mod navigation;
pub mod presentation;
pub mod quick_switch;
pub mod reveal;

pub use navigation::NavigationController;
pub use presentation::{Aspect, PresentationController};
pub use quick_switch::ThemeQuickSwitch;
pub use reveal::RevealController;
