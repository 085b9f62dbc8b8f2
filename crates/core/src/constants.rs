//! Constants used throughout the EventEase core crate.

/// Catalogue file used when no explicit file is configured.
pub const DEFAULT_EVENTS_FILE: &str = "data/events.json";

/// Number of suggestions returned when the caller does not ask for a specific limit.
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

/// File extensions that select the YAML catalogue format.
pub const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];
