//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables.
//!
//! Each `*_from_env_value` helper takes the raw optional value so binaries can feed it from
//! `std::env::var(..).ok()` and tests can feed it directly.

use crate::constants::{DEFAULT_EVENTS_FILE, DEFAULT_SUGGEST_LIMIT};
use crate::event::{SearchField, SearchFields};
use crate::suggest::Suggester;
use crate::{EventError, EventResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    events_file: PathBuf,
    suggest_limit: usize,
    search_fields: SearchFields,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidArgument` if `suggest_limit` is zero and
    /// `EventError::InvalidInput` if `search_fields` is empty.
    pub fn new(
        events_file: PathBuf,
        suggest_limit: usize,
        search_fields: SearchFields,
    ) -> EventResult<Self> {
        if suggest_limit == 0 {
            return Err(EventError::InvalidArgument(
                "suggest limit must be a positive integer".into(),
            ));
        }
        if search_fields.is_empty() {
            return Err(EventError::InvalidInput(
                "at least one search field must be enabled".into(),
            ));
        }

        Ok(Self {
            events_file,
            suggest_limit,
            search_fields,
        })
    }

    /// Resolve the full configuration from raw environment values.
    pub fn from_env_values(
        events_file: Option<String>,
        suggest_limit: Option<String>,
        search_fields: Option<String>,
    ) -> EventResult<Self> {
        Self::new(
            events_file_from_env_value(events_file),
            suggest_limit_from_env_value(suggest_limit)?,
            search_fields_from_env_value(search_fields)?,
        )
    }

    pub fn events_file(&self) -> &Path {
        &self.events_file
    }

    pub fn suggest_limit(&self) -> usize {
        self.suggest_limit
    }

    pub fn search_fields(&self) -> SearchFields {
        self.search_fields
    }

    pub fn suggester(&self) -> Suggester {
        Suggester::new(self.search_fields)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            events_file: PathBuf::from(DEFAULT_EVENTS_FILE),
            suggest_limit: DEFAULT_SUGGEST_LIMIT,
            search_fields: SearchFields::ALL,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Catalogue path, falling back to [`DEFAULT_EVENTS_FILE`].
pub fn events_file_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_EVENTS_FILE))
}

/// Default suggestion limit, falling back to [`DEFAULT_SUGGEST_LIMIT`].
pub fn suggest_limit_from_env_value(value: Option<String>) -> EventResult<usize> {
    let Some(value) = non_blank(value) else {
        return Ok(DEFAULT_SUGGEST_LIMIT);
    };

    let limit: i64 = value.parse().map_err(|_| {
        EventError::InvalidInput(format!("suggest limit is not an integer: {value}"))
    })?;
    crate::suggest::limit_from_signed(limit)
}

/// Comma-separated field names, e.g. `title,category,location`. Blank means every field.
pub fn search_fields_from_env_value(value: Option<String>) -> EventResult<SearchFields> {
    let Some(value) = non_blank(value) else {
        return Ok(SearchFields::ALL);
    };

    let fields = value
        .split(',')
        .filter(|name| !name.trim().is_empty())
        .map(str::parse::<SearchField>)
        .collect::<EventResult<SearchFields>>()?;

    if fields.is_empty() {
        return Err(EventError::InvalidInput(format!(
            "no search fields in: {value}"
        )));
    }
    Ok(fields)
}
