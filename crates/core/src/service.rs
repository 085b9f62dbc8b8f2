//! Event operations used by the REST API and the CLI.
//!
//! `EventService` pairs the startup configuration with the catalogue and routes every search
//! through the configured [`Suggester`](crate::suggest::Suggester).

use crate::catalogue::EventCatalogue;
use crate::config::CoreConfig;
use crate::event::{EventRecord, NewEvent};
use crate::EventResult;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct EventService {
    cfg: Arc<CoreConfig>,
    catalogue: Arc<EventCatalogue>,
}

impl EventService {
    pub fn new(cfg: Arc<CoreConfig>, catalogue: Arc<EventCatalogue>) -> Self {
        Self { cfg, catalogue }
    }

    /// Loads the catalogue named by `cfg` and wraps it in a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue file exists but cannot be read or parsed.
    pub fn load(cfg: Arc<CoreConfig>) -> EventResult<Self> {
        let catalogue = EventCatalogue::load(cfg.events_file())?;
        Ok(Self::new(cfg, Arc::new(catalogue)))
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn catalogue(&self) -> &EventCatalogue {
        &self.catalogue
    }

    /// Every event, in catalogue order.
    pub fn list(&self) -> EventResult<Vec<EventRecord>> {
        self.catalogue.with_events(<[EventRecord]>::to_vec)
    }

    /// Every event matching `query`. A blank query matches nothing.
    pub fn search(&self, query: &str) -> EventResult<Vec<EventRecord>> {
        let suggester = self.cfg.suggester();
        self.catalogue.with_events(|events| {
            suggester
                .search(events, query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Up to `limit` events matching `query`, defaulting to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidArgument` if `limit` is `Some(0)`.
    pub fn suggest(&self, query: &str, limit: Option<usize>) -> EventResult<Vec<EventRecord>> {
        let suggester = self.cfg.suggester();
        let limit = limit.unwrap_or(self.cfg.suggest_limit());
        self.catalogue.with_events(|events| {
            suggester
                .suggest(events, query, limit)
                .map(|matches| matches.into_iter().cloned().collect::<Vec<_>>())
        })?
    }

    pub fn get(&self, id: &str) -> EventResult<Option<EventRecord>> {
        self.catalogue.get(id)
    }

    pub fn create(&self, new_event: NewEvent) -> EventResult<EventRecord> {
        self.catalogue.insert(new_event)
    }
}
