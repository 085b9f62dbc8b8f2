//! Suggestion and search filtering over event records.
//!
//! A query is normalised once (trimmed, Unicode lower-cased) and then tested as a literal
//! substring against each configured field of every record. Matches keep the order of the input
//! slice; there is no relevance scoring. A query that normalises to the empty string matches
//! nothing.
//!
//! The functions here are pure: no I/O, no logging, no shared state. Callers that read from a
//! shared collection must hand in a stable snapshot for the duration of the call (see
//! [`crate::catalogue::EventCatalogue::with_events`]).

use crate::event::{EventRecord, SearchField, SearchFields};
use crate::{EventError, EventResult};

/// A trimmed, lower-cased, non-empty query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalisedQuery(String);

impl NormalisedQuery {
    /// Returns `None` when the query is empty or whitespace only.
    pub fn parse(query: &str) -> Option<Self> {
        let folded = query.trim().to_lowercase();
        if folded.is_empty() {
            None
        } else {
            Some(Self(folded))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn found_in(&self, text: &str) -> bool {
        text.to_lowercase().contains(self.0.as_str())
    }
}

/// Matches queries against a fixed set of searchable fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Suggester {
    fields: SearchFields,
}

impl Suggester {
    pub fn new(fields: SearchFields) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> SearchFields {
        self.fields
    }

    /// Whether `record` contains `query` in any configured field.
    pub fn matches(&self, record: &EventRecord, query: &NormalisedQuery) -> bool {
        self.fields.iter().any(|field| match field {
            SearchField::Tags => record.tags.iter().any(|tag| query.found_in(tag)),
            other => record
                .text_field(other)
                .is_some_and(|text| query.found_in(text)),
        })
    }

    /// Every matching record, in input order.
    pub fn search<'a>(&self, events: &'a [EventRecord], query: &str) -> Vec<&'a EventRecord> {
        match NormalisedQuery::parse(query) {
            Some(query) => events
                .iter()
                .filter(|record| self.matches(record, &query))
                .collect(),
            None => Vec::new(),
        }
    }

    /// The first `limit` matching records, in input order.
    ///
    /// # Errors
    ///
    /// Returns `EventError::InvalidArgument` if `limit` is zero.
    pub fn suggest<'a>(
        &self,
        events: &'a [EventRecord],
        query: &str,
        limit: usize,
    ) -> EventResult<Vec<&'a EventRecord>> {
        if limit == 0 {
            return Err(EventError::InvalidArgument(
                "limit must be a positive integer".into(),
            ));
        }

        let Some(query) = NormalisedQuery::parse(query) else {
            return Ok(Vec::new());
        };

        Ok(events
            .iter()
            .filter(|record| self.matches(record, &query))
            .take(limit)
            .collect())
    }
}

/// Suggests up to `limit` events matching `query` across all searchable fields.
///
/// # Errors
///
/// Returns `EventError::InvalidArgument` if `limit` is zero.
pub fn suggest<'a>(
    events: &'a [EventRecord],
    query: &str,
    limit: usize,
) -> EventResult<Vec<&'a EventRecord>> {
    Suggester::default().suggest(events, query, limit)
}

/// Every event matching `query` across all searchable fields.
pub fn search<'a>(events: &'a [EventRecord], query: &str) -> Vec<&'a EventRecord> {
    Suggester::default().search(events, query)
}

/// Converts a signed limit from an outer interface (query string, CLI flag).
///
/// # Errors
///
/// Returns `EventError::InvalidArgument` if `limit <= 0`.
pub fn limit_from_signed(limit: i64) -> EventResult<usize> {
    if limit <= 0 {
        return Err(EventError::InvalidArgument(format!(
            "limit must be a positive integer, got {limit}"
        )));
    }
    usize::try_from(limit)
        .map_err(|_| EventError::InvalidArgument(format!("limit {limit} is too large")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_types::EventId;

    fn event(id: &str) -> EventRecord {
        EventRecord::new(EventId::new(id).unwrap())
    }

    fn sample_events() -> Vec<EventRecord> {
        vec![
            event("1")
                .with_title("Stress Management Workshop")
                .with_category("Education")
                .with_location("Goa"),
            event("2")
                .with_title("Leadership Training")
                .with_category("Business")
                .with_location("Delhi"),
            event("3")
                .with_title("Time Management Seminar")
                .with_category("Education")
                .with_location("Mumbai"),
        ]
    }

    fn ids(result: &[&EventRecord]) -> Vec<String> {
        result.iter().map(|r| r.id.to_string()).collect()
    }

    #[test]
    fn workshop_matches_single_title() {
        let events = sample_events();
        let result = suggest(&events, "workshop", 5).unwrap();
        assert_eq!(ids(&result), vec!["1"]);
    }

    #[test]
    fn management_matches_in_original_order() {
        let events = sample_events();
        let result = suggest(&events, "management", 5).unwrap();
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn unknown_query_matches_nothing() {
        let events = sample_events();
        assert!(suggest(&events, "nonexistent", 5).unwrap().is_empty());
    }

    #[test]
    fn truncates_to_first_matches() {
        let events: Vec<EventRecord> = (1..=7)
            .map(|n| event(&n.to_string()).with_title(format!("Yoga session {n}")))
            .collect();

        let result = suggest(&events, "yoga", 5).unwrap();
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn empty_and_blank_queries_match_nothing() {
        let events = sample_events();
        assert!(suggest(&events, "", 5).unwrap().is_empty());
        assert!(suggest(&events, " \t ", 5).unwrap().is_empty());
        assert!(search(&events, "   ").is_empty());
    }

    #[test]
    fn zero_limit_is_invalid_even_for_empty_input() {
        let err = suggest(&[], "", 0).expect_err("zero limit must fail");
        assert!(matches!(err, EventError::InvalidArgument(_)));
    }

    #[test]
    fn signed_limits_below_one_are_invalid() {
        assert!(matches!(
            limit_from_signed(0),
            Err(EventError::InvalidArgument(_))
        ));
        assert!(matches!(
            limit_from_signed(-3),
            Err(EventError::InvalidArgument(_))
        ));
        assert_eq!(limit_from_signed(5).unwrap(), 5);
    }

    #[test]
    fn query_is_trimmed_and_case_folded() {
        let events = sample_events();
        let result = suggest(&events, "  EDUCATION ", 5).unwrap();
        assert_eq!(ids(&result), vec!["1", "3"]);
    }

    #[test]
    fn case_folding_is_unicode_aware() {
        let events = vec![
            event("m").with_location("MÜNCHEN"),
            event("z").with_location("Zürich"),
        ];
        assert_eq!(ids(&suggest(&events, "münchen", 5).unwrap()), vec!["m"]);
        assert_eq!(ids(&suggest(&events, "ZÜR", 5).unwrap()), vec!["z"]);
    }

    #[test]
    fn special_characters_match_literally() {
        let events = vec![
            event("a").with_title("C++ Meetup (Advanced)"),
            event("b").with_title("Cxx Meetup"),
        ];
        assert_eq!(ids(&suggest(&events, "c++", 5).unwrap()), vec!["a"]);
        assert_eq!(ids(&suggest(&events, "(adv", 5).unwrap()), vec!["a"]);
        assert!(suggest(&events, ".*", 5).unwrap().is_empty());
    }

    #[test]
    fn matches_description_and_individual_tags() {
        let events = vec![
            event("d").with_description("An evening of jazz standards"),
            event("t").with_tags(["outdoor", "family"]),
            event("x").with_tags(["out", "door"]),
        ];
        assert_eq!(ids(&suggest(&events, "jazz", 5).unwrap()), vec!["d"]);
        // A tag must contain the whole query on its own.
        assert_eq!(ids(&suggest(&events, "outdoor", 5).unwrap()), vec!["t"]);
    }

    #[test]
    fn records_without_searchable_fields_never_match() {
        let events = vec![event("bare"), event("titled").with_title("Bare Necessities")];
        assert_eq!(ids(&suggest(&events, "bare", 5).unwrap()), vec!["titled"]);
    }

    #[test]
    fn suggester_without_tags_ignores_tags() {
        let events = vec![event("t").with_tags(["hackathon"])];
        let suggester = Suggester::new(SearchFields::ALL.without(SearchField::Tags));

        assert!(suggester.suggest(&events, "hackathon", 5).unwrap().is_empty());
        assert_eq!(ids(&suggest(&events, "hackathon", 5).unwrap()), vec!["t"]);
    }

    #[test]
    fn duplicate_ids_are_distinct_records() {
        let events = vec![
            event("dup").with_title("Art Fair"),
            event("dup").with_title("Art Walk"),
        ];
        assert_eq!(suggest(&events, "art", 5).unwrap().len(), 2);
    }

    #[test]
    fn results_borrow_from_input_and_are_repeatable() {
        let events = sample_events();
        let first = suggest(&events, "e", 2).unwrap();
        let second = suggest(&events, "e", 2).unwrap();

        assert_eq!(first, second);
        assert!(std::ptr::eq(first[0], &events[0]));
        assert_eq!(events, sample_events());
    }

    #[test]
    fn every_result_matches_and_no_match_is_missed() {
        let events = sample_events();
        for query in ["a", "man", "goa", "training", "edu", "zzz"] {
            let normalised = NormalisedQuery::parse(query).unwrap();
            let suggester = Suggester::default();
            let expected: Vec<&EventRecord> = events
                .iter()
                .filter(|r| suggester.matches(r, &normalised))
                .collect();

            for limit in 1..=4 {
                let result = suggest(&events, query, limit).unwrap();
                assert!(result.len() <= limit);
                assert_eq!(result, expected[..expected.len().min(limit)].to_vec());
            }
            assert_eq!(search(&events, query), expected);
        }
    }
}
