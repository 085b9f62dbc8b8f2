//! # EventEase Core
//!
//! Core logic for the EventEase event listing service.
//!
//! This crate contains pure data operations:
//! - Event records and the searchable field set
//! - The suggestion/search filter over an event collection
//! - A file-backed event catalogue
//! - Startup configuration
//!
//! **No API concerns**: HTTP servers and wire types belong in `api-rest` and `api-shared`.

pub mod catalogue;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod service;
pub mod suggest;

pub use catalogue::EventCatalogue;
pub use config::CoreConfig;
pub use constants::{DEFAULT_EVENTS_FILE, DEFAULT_SUGGEST_LIMIT};
pub use error::{EventError, EventResult};
pub use event::{EventRecord, NewEvent, SearchField, SearchFields};
pub use event_types::{EventId, NonEmptyText, TextError};
pub use service::EventService;
pub use suggest::{limit_from_signed, search, suggest, NormalisedQuery, Suggester};
