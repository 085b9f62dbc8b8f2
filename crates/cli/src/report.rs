//! Query report for manual inspection of the catalogue.
//!
//! Runs each query through the same search used by the REST API and prints the match count, the
//! number of suggestions the autocomplete would show, and a few example titles.

use eventease_core::{EventResult, EventService};
use std::io::Write;

pub const DEFAULT_QUERIES: [&str; 6] = [
    "workshop",
    "management",
    "education",
    "goa",
    "nonexistent",
    "",
];

pub fn write_report(
    out: &mut impl Write,
    service: &EventService,
    queries: &[String],
    examples: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let total = service.catalogue().len()?;
    writeln!(out, "Catalogue: {} event(s)", total)?;
    writeln!(out, "Search fields: {}", service.config().search_fields())?;

    for query in queries {
        let section = query_section(service, query, examples)?;
        writeln!(out)?;
        for line in section {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(())
}

fn query_section(
    service: &EventService,
    query: &str,
    examples: usize,
) -> EventResult<Vec<String>> {
    let matches = service.search(query)?;
    let suggestions = service.suggest(query, None)?;

    let mut lines = vec![format!(
        "Query {:?}: {} match(es), {} suggestion(s)",
        query,
        matches.len(),
        suggestions.len()
    )];

    if query.trim().is_empty() {
        lines.push("  (blank queries match nothing)".to_string());
    }

    lines.extend(matches.iter().take(examples).map(|event| {
        format!(
            "  - [{}] {} ({}, {})",
            event.id,
            event.title.as_deref().unwrap_or("untitled"),
            event.category.as_deref().unwrap_or("-"),
            event.location.as_deref().unwrap_or("-"),
        )
    }));

    if matches.len() > examples {
        lines.push(format!("  ... and {} more", matches.len() - examples));
    }

    Ok(lines)
}
