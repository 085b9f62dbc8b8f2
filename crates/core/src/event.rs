//! Event records and the searchable field set.
//!
//! `EventRecord` is the wire and storage shape of a listed event. Only the text attributes named
//! by [`SearchField`] take part in matching; everything else is carried through untouched.

use chrono::{DateTime, NaiveDate, Utc};
use event_types::{EventId, NonEmptyText};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::{EventError, EventResult};

/// One schedulable activity.
///
/// Absent text fields are valid and never match a query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(alias = "_id")]
    pub id: EventId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl EventRecord {
    /// Creates a record with only an id; every other attribute is absent.
    pub fn new(id: EventId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            category: None,
            location: None,
            tags: Vec::new(),
            date: None,
            organizer: None,
            image_url: None,
            created_at: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Text of a single-valued searchable field.
    ///
    /// Returns `None` for [`SearchField::Tags`]; tags are matched element by element.
    pub fn text_field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Title => self.title.as_deref(),
            SearchField::Description => self.description.as_deref(),
            SearchField::Category => self.category.as_deref(),
            SearchField::Location => self.location.as_deref(),
            SearchField::Tags => None,
        }
    }
}

/// Input for creating a new event. The catalogue assigns `id` and `createdAt`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub title: NonEmptyText,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub tags: Vec<String>,
    pub date: Option<NaiveDate>,
    pub organizer: Option<String>,
    pub image_url: Option<String>,
}

impl NewEvent {
    pub fn new(title: NonEmptyText) -> Self {
        Self {
            title,
            description: None,
            category: None,
            location: None,
            tags: Vec::new(),
            date: None,
            organizer: None,
            image_url: None,
        }
    }

    /// Builds the stored record. Blank optional text becomes absent and blank tags are dropped.
    pub(crate) fn into_record(self, id: EventId, created_at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id,
            title: Some(self.title.into_inner()),
            description: clean_optional(self.description),
            category: clean_optional(self.category),
            location: clean_optional(self.location),
            tags: self
                .tags
                .into_iter()
                .filter_map(|tag| clean_optional(Some(tag)))
                .collect(),
            date: self.date,
            organizer: clean_optional(self.organizer),
            image_url: clean_optional(self.image_url),
            created_at: Some(created_at),
        }
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A searchable attribute of an [`EventRecord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Description,
    Category,
    Location,
    Tags,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Title,
        SearchField::Description,
        SearchField::Category,
        SearchField::Location,
        SearchField::Tags,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Description => "description",
            SearchField::Category => "category",
            SearchField::Location => "location",
            SearchField::Tags => "tags",
        }
    }

    fn bit(self) -> u8 {
        match self {
            SearchField::Title => 1,
            SearchField::Description => 1 << 1,
            SearchField::Category => 1 << 2,
            SearchField::Location => 1 << 3,
            SearchField::Tags => 1 << 4,
        }
    }
}

impl FromStr for SearchField {
    type Err = EventError;

    fn from_str(s: &str) -> EventResult<Self> {
        let wanted = s.trim();
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EventError::InvalidInput(format!("unknown search field: {wanted}")))
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of fields a query is matched against. Defaults to every field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchFields(u8);

impl SearchFields {
    pub const NONE: SearchFields = SearchFields(0);
    pub const ALL: SearchFields = SearchFields(0b1_1111);

    pub fn with(self, field: SearchField) -> Self {
        Self(self.0 | field.bit())
    }

    pub fn without(self, field: SearchField) -> Self {
        Self(self.0 & !field.bit())
    }

    pub fn contains(self, field: SearchField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Fields in the set, in [`SearchField::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = SearchField> {
        SearchField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self::ALL
    }
}

impl FromIterator<SearchField> for SearchFields {
    fn from_iter<I: IntoIterator<Item = SearchField>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl std::fmt::Display for SearchFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(SearchField::as_str).collect();
        f.write_str(&names.join(","))
    }
}
