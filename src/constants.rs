//! Application-wide constants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Folio";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "folio";

/// Environment variable that overrides the preference directory.
///
/// Used by the test suite to isolate persisted preferences from the
/// user's real configuration.
pub const CONFIG_DIR_ENV: &str = "FOLIO_CONFIG_DIR";
