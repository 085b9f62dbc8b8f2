use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eventease_core::{
    limit_from_signed, CoreConfig, EventRecord, EventService, NewEvent, NonEmptyText,
};
use std::sync::Arc;

mod report;

#[derive(Parser)]
#[command(name = "eventease")]
#[command(about = "EventEase event catalogue CLI")]
struct Cli {
    /// Event catalogue file (JSON, or YAML for .yaml/.yml)
    #[arg(long, global = true, env = "EVENTEASE_EVENTS_FILE")]
    events: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events
    List,
    /// Show a single event
    Show {
        /// Event identifier
        id: String,
    },
    /// Print every event matching a query
    Search {
        /// Text to look for in title, description, category, location and tags
        query: String,
    },
    /// Print autocomplete suggestions for a partial query
    Suggest {
        /// Partial search text
        query: String,
        /// Maximum number of suggestions (defaults to EVENTEASE_SUGGEST_LIMIT or 5)
        #[arg(long, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Add an event to the catalogue
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        organizer: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Run queries against the catalogue and print match counts with examples
    Report {
        /// Queries to run (defaults to a built-in set)
        queries: Vec<String>,
        /// Number of example events printed per query
        #[arg(long, default_value_t = 3)]
        examples: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'eventease --help' for commands");
        return Ok(());
    };

    let cfg = Arc::new(CoreConfig::from_env_values(
        cli.events,
        std::env::var("EVENTEASE_SUGGEST_LIMIT").ok(),
        std::env::var("EVENTEASE_SEARCH_FIELDS").ok(),
    )?);
    let service = EventService::load(cfg)?;

    match command {
        Commands::List => {
            let events = service.list()?;
            if events.is_empty() {
                println!("No events found.");
            } else {
                for event in &events {
                    println!("{}", summary_line(event));
                }
            }
        }
        Commands::Show { id } => match service.get(&id)? {
            Some(event) => print_details(&event),
            None => eprintln!("No event with ID: {}", id),
        },
        Commands::Search { query } => {
            let events = service.search(&query)?;
            println!("{} event(s) match {:?}", events.len(), query);
            for event in &events {
                println!("{}", summary_line(event));
            }
        }
        Commands::Suggest { query, limit } => {
            let limit = limit.map(limit_from_signed).transpose()?;
            let suggestions = service.suggest(&query, limit)?;
            if suggestions.is_empty() {
                println!("No suggestions for {:?}", query);
            }
            for event in &suggestions {
                println!("{}", summary_line(event));
            }
        }
        Commands::Add {
            title,
            description,
            category,
            location,
            tags,
            date,
            organizer,
            image_url,
        } => {
            let new_event = NewEvent {
                description,
                category,
                location,
                tags,
                date,
                organizer,
                image_url,
                ..NewEvent::new(NonEmptyText::new(&title)?)
            };
            let event = service.create(new_event)?;
            println!("Added event with ID: {}", event.id);
        }
        Commands::Report { queries, examples } => {
            let queries: Vec<String> = if queries.is_empty() {
                report::DEFAULT_QUERIES
                    .iter()
                    .map(|q| q.to_string())
                    .collect()
            } else {
                queries
            };
            let mut stdout = std::io::stdout().lock();
            report::write_report(&mut stdout, &service, &queries, examples)?;
        }
    }

    Ok(())
}

fn summary_line(event: &EventRecord) -> String {
    format!(
        "ID: {}, Title: {}, Category: {}, Location: {}",
        event.id,
        event.title.as_deref().unwrap_or("-"),
        event.category.as_deref().unwrap_or("-"),
        event.location.as_deref().unwrap_or("-"),
    )
}

fn print_details(event: &EventRecord) {
    println!("ID:          {}", event.id);
    println!("Title:       {}", event.title.as_deref().unwrap_or("-"));
    println!("Category:    {}", event.category.as_deref().unwrap_or("-"));
    println!("Location:    {}", event.location.as_deref().unwrap_or("-"));
    if let Some(date) = event.date {
        println!("Date:        {}", date);
    }
    if let Some(organizer) = &event.organizer {
        println!("Organizer:   {}", organizer);
    }
    if !event.tags.is_empty() {
        println!("Tags:        {}", event.tags.join(", "));
    }
    if let Some(description) = &event.description {
        println!("Description: {}", description);
    }
}
