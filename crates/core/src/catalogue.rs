//! File-backed event catalogue.
//!
//! The catalogue keeps every event in memory behind a `RwLock` and mirrors the full list to a
//! single file. The format follows the file extension: `.yaml`/`.yml` are YAML sequences,
//! anything else is a JSON array.
//!
//! Writes go to a uniquely named temporary file in the same directory which is then renamed over
//! the catalogue, so readers of the file never observe a partially written list. Inserts re-read
//! the file first, so several processes (the server and the CLI) can add events to one catalogue.

use crate::constants::YAML_EXTENSIONS;
use crate::event::{EventRecord, NewEvent};
use crate::{EventError, EventResult};
use chrono::Utc;
use event_types::EventId;
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CatalogueFormat {
    Json,
    Yaml,
}

impl CatalogueFormat {
    fn for_path(path: &Path) -> Self {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                YAML_EXTENSIONS
                    .iter()
                    .any(|yaml| ext.eq_ignore_ascii_case(yaml))
            });
        if is_yaml {
            CatalogueFormat::Yaml
        } else {
            CatalogueFormat::Json
        }
    }

    fn parse(self, contents: &str) -> EventResult<Vec<EventRecord>> {
        match self {
            CatalogueFormat::Json => {
                serde_json::from_str(contents).map_err(EventError::Deserialization)
            }
            CatalogueFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(EventError::YamlDeserialization)
            }
        }
    }

    fn render(self, events: &[EventRecord]) -> EventResult<String> {
        match self {
            CatalogueFormat::Json => {
                serde_json::to_string_pretty(events).map_err(EventError::Serialization)
            }
            CatalogueFormat::Yaml => {
                serde_yaml::to_string(events).map_err(EventError::YamlSerialization)
            }
        }
    }
}

/// In-memory event collection, optionally persisted to a file.
#[derive(Debug)]
pub struct EventCatalogue {
    path: Option<PathBuf>,
    format: CatalogueFormat,
    events: RwLock<Vec<EventRecord>>,
}

impl EventCatalogue {
    /// Loads the catalogue stored at `path`.
    ///
    /// A missing or blank file yields an empty catalogue; the file is created on the first
    /// insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: impl Into<PathBuf>) -> EventResult<Self> {
        let path = path.into();
        let format = CatalogueFormat::for_path(&path);

        let events = read_events(&path, format)?.unwrap_or_else(|| {
            tracing::warn!(
                "event catalogue not found, starting empty: {}",
                path.display()
            );
            Vec::new()
        });

        warn_on_duplicate_ids(&events);
        tracing::info!("loaded {} events from {}", events.len(), path.display());

        Ok(Self {
            path: Some(path),
            format,
            events: RwLock::new(events),
        })
    }

    /// Creates a catalogue that lives only in memory.
    pub fn in_memory(events: Vec<EventRecord>) -> Self {
        Self {
            path: None,
            format: CatalogueFormat::Json,
            events: RwLock::new(events),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f` over a stable snapshot of the events.
    ///
    /// The read lock is held until `f` returns, so inserts cannot interleave with the call.
    ///
    /// # Errors
    ///
    /// Returns `EventError::LockPoisoned` if a writer panicked while holding the lock.
    pub fn with_events<R>(&self, f: impl FnOnce(&[EventRecord]) -> R) -> EventResult<R> {
        let events = self.events.read().map_err(|_| EventError::LockPoisoned)?;
        Ok(f(&events))
    }

    /// First event whose id equals `id`.
    pub fn get(&self, id: &str) -> EventResult<Option<EventRecord>> {
        self.with_events(|events| events.iter().find(|e| e.id.as_str() == id).cloned())
    }

    pub fn len(&self) -> EventResult<usize> {
        self.with_events(<[EventRecord]>::len)
    }

    pub fn is_empty(&self) -> EventResult<bool> {
        self.with_events(<[EventRecord]>::is_empty)
    }

    /// Stores a new event, assigning a fresh id and creation time.
    ///
    /// When the catalogue is file-backed the file is re-read under the write lock and merged
    /// with the in-memory list before the new event is appended, so events written by another
    /// process sharing the file are kept. The merged list is persisted before returning. If
    /// persisting fails the new event is not kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned or the catalogue file cannot be read, parsed or
    /// written.
    pub fn insert(&self, new_event: NewEvent) -> EventResult<EventRecord> {
        let id = EventId::new(Uuid::new_v4().simple().to_string())?;
        let record = new_event.into_record(id, Utc::now());

        let mut events = self.events.write().map_err(|_| EventError::LockPoisoned)?;

        if let Some(path) = &self.path {
            if let Some(on_disk) = read_events(path, self.format)? {
                *events = merge(on_disk, std::mem::take(&mut *events));
            }
            events.push(record.clone());
            if let Err(e) = self.persist(path, &events) {
                events.pop();
                return Err(e);
            }
        } else {
            events.push(record.clone());
        }

        tracing::info!("created event {}", record.id);
        Ok(record)
    }

    fn persist(&self, path: &Path, events: &[EventRecord]) -> EventResult<()> {
        let rendered = self.format.render(events)?;

        let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(EventError::CatalogueWrite)?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(parent).map_err(EventError::CatalogueWrite)?;
        tmp.write_all(rendered.as_bytes())
            .map_err(EventError::CatalogueWrite)?;
        tmp.persist(path)
            .map_err(|e| EventError::CatalogueWrite(e.error))?;

        tracing::debug!("persisted {} events to {}", events.len(), path.display());
        Ok(())
    }
}

/// Reads the catalogue file. `None` means the file does not exist.
fn read_events(path: &Path, format: CatalogueFormat) -> EventResult<Option<Vec<EventRecord>>> {
    match fs::read_to_string(path) {
        Ok(contents) if contents.trim().is_empty() => Ok(Some(Vec::new())),
        Ok(contents) => format.parse(&contents).map(Some),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EventError::CatalogueRead(e)),
    }
}

/// File order first, then in-memory events whose id the file does not contain.
fn merge(on_disk: Vec<EventRecord>, in_memory: Vec<EventRecord>) -> Vec<EventRecord> {
    let known: HashSet<EventId> = on_disk.iter().map(|e| e.id.clone()).collect();
    let mut merged = on_disk;
    merged.extend(in_memory.into_iter().filter(|e| !known.contains(&e.id)));
    merged
}

fn warn_on_duplicate_ids(events: &[EventRecord]) {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if !seen.insert(event.id.as_str()) {
            tracing::warn!("duplicate event id in catalogue: {}", event.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::NonEmptyText;
    use tempfile::TempDir;

    const SAMPLE_JSON: &str = r#"[
        {"id": "1", "title": "Stress Management Workshop", "category": "Education", "location": "Goa"},
        {"id": "2", "title": "Leadership Training", "category": "Business", "location": "Delhi"}
    ]"#;

    #[test]
    fn loads_json_catalogue() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        fs::write(&path, SAMPLE_JSON).expect("should write catalogue");

        let catalogue = EventCatalogue::load(&path).expect("load should succeed");
        assert_eq!(catalogue.len().unwrap(), 2);
        let event = catalogue.get("2").unwrap().expect("event 2 exists");
        assert_eq!(event.location.as_deref(), Some("Delhi"));
        assert!(catalogue.get("3").unwrap().is_none());
    }

    #[test]
    fn loads_yaml_catalogue() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.yaml");
        fs::write(
            &path,
            "- id: a1\n  title: Jazz Night\n  tags:\n    - music\n    - evening\n",
        )
        .expect("should write catalogue");

        let catalogue = EventCatalogue::load(&path).expect("load should succeed");
        let event = catalogue.get("a1").unwrap().expect("event a1 exists");
        assert_eq!(event.tags, vec!["music".to_string(), "evening".to_string()]);
    }

    #[test]
    fn ids_with_surrounding_whitespace_are_kept_verbatim() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        fs::write(&path, r#"[{"id": " a1 ", "title": "X"}]"#).expect("should write catalogue");

        let catalogue = EventCatalogue::load(&path).expect("load should succeed");
        let event = catalogue.get(" a1 ").unwrap().expect("event ' a1 ' exists");
        assert_eq!(event.id.as_str(), " a1 ");
        assert!(catalogue.get("a1").unwrap().is_none());
    }

    #[test]
    fn missing_file_yields_empty_catalogue() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let catalogue = EventCatalogue::load(temp_dir.path().join("absent.json"))
            .expect("missing file is not an error");
        assert!(catalogue.is_empty().unwrap());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        fs::write(&path, "{ not json").expect("should write catalogue");

        let err = EventCatalogue::load(&path).expect_err("malformed file must fail");
        assert!(matches!(err, EventError::Deserialization(_)));
    }

    #[test]
    fn insert_persists_and_reloads() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("events.json");
        let catalogue = EventCatalogue::load(&path).expect("load should succeed");

        let new_event = NewEvent {
            category: Some("Music".into()),
            tags: vec!["live".into()],
            ..NewEvent::new(NonEmptyText::new("Open Air Concert").unwrap())
        };
        let record = catalogue.insert(new_event).expect("insert should succeed");

        assert_eq!(record.id.as_str().len(), 32);
        assert!(record
            .id
            .as_str()
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        let leftover: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .flatten()
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(leftover, vec![std::ffi::OsString::from("events.json")]);

        let reloaded = EventCatalogue::load(&path).expect("reload should succeed");
        assert_eq!(reloaded.get(record.id.as_str()).unwrap(), Some(record));
    }

    #[test]
    fn insert_keeps_yaml_format() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.yml");
        let catalogue = EventCatalogue::load(&path).expect("load should succeed");

        catalogue
            .insert(NewEvent::new(NonEmptyText::new("Book Swap").unwrap()))
            .expect("insert should succeed");

        let contents = fs::read_to_string(&path).expect("should read catalogue");
        assert!(contents.contains("title: Book Swap"));
    }

    #[test]
    fn in_memory_insert_does_not_touch_disk() {
        let catalogue = EventCatalogue::in_memory(Vec::new());
        catalogue
            .insert(NewEvent::new(NonEmptyText::new("Hack Night").unwrap()))
            .expect("insert should succeed");

        assert!(catalogue.path().is_none());
        assert_eq!(catalogue.len().unwrap(), 1);
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let events: Vec<EventRecord> = serde_json::from_str(
            r#"[{"id": "x", "title": "First"}, {"id": "x", "title": "Second"}]"#,
        )
        .unwrap();
        let catalogue = EventCatalogue::in_memory(events);

        assert_eq!(catalogue.len().unwrap(), 2);
        let first = catalogue.get("x").unwrap().unwrap();
        assert_eq!(first.title.as_deref(), Some("First"));
    }

    #[test]
    fn inserts_from_two_handles_on_one_file_are_both_kept() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("events.json");
        let cli = EventCatalogue::load(&path).expect("load should succeed");
        let server = EventCatalogue::load(&path).expect("load should succeed");

        let from_cli = cli
            .insert(NewEvent::new(NonEmptyText::new("From CLI").unwrap()))
            .expect("cli insert should succeed");
        let from_server = server
            .insert(NewEvent::new(NonEmptyText::new("From server").unwrap()))
            .expect("server insert should succeed");

        let reloaded = EventCatalogue::load(&path).expect("reload should succeed");
        assert_eq!(reloaded.len().unwrap(), 2);
        assert_eq!(reloaded.get(from_cli.id.as_str()).unwrap(), Some(from_cli.clone()));
        assert!(reloaded.get(from_server.id.as_str()).unwrap().is_some());

        // The server handle now also serves the event added through the other handle.
        assert_eq!(server.get(from_cli.id.as_str()).unwrap(), Some(from_cli));
    }

    #[test]
    fn merge_keeps_file_order_and_appends_unknown_memory_events() {
        let parse = |json: &str| serde_json::from_str::<Vec<EventRecord>>(json).unwrap();
        let on_disk = parse(r#"[{"id": "b"}, {"id": "a"}]"#);
        let in_memory = parse(r#"[{"id": "a", "title": "stale"}, {"id": "c"}]"#);

        let merged = merge(on_disk, in_memory);
        let ids: Vec<&str> = merged.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert!(merged[1].title.is_none());
    }
}
