//! # API REST
//!
//! REST API implementation for EventEase.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `eventease-core` for every event operation.

#![warn(rust_2018_idioms)]

use api_shared::wire;
use api_shared::HealthService;
use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveDate, SecondsFormat};
use eventease_core::{
    limit_from_signed, EventError, EventRecord, EventService, NewEvent, NonEmptyText,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type ApiError = (StatusCode, &'static str);

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    event_service: EventService,
}

impl AppState {
    pub fn new(event_service: EventService) -> Self {
        Self { event_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, list_events, get_event, create_event, suggestions),
    components(schemas(
        wire::HealthRes,
        wire::Event,
        wire::ListEventsRes,
        wire::CreateEventReq,
        wire::CreateEventRes,
        wire::Suggestion,
        wire::SuggestionsRes
    ))
)]
pub struct ApiDoc;

/// Builds the REST router, including Swagger UI at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/events", get(list_events).post(create_event))
        .route("/events/:id", get(get_event))
        .route("/suggestions", get(suggestions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = wire::HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<wire::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/events",
    params(wire::EventsQuery),
    responses(
        (status = 200, description = "Events in catalogue order", body = wire::ListEventsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// List events.
///
/// Without `q` (or with a blank `q`) every event is returned. Otherwise the events whose
/// searchable fields contain `q` are returned, unbounded and in catalogue order.
#[axum::debug_handler]
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<wire::EventsQuery>,
) -> Result<Json<wire::ListEventsRes>, ApiError> {
    let result = match params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(q) => state.event_service.search(q),
        None => state.event_service.list(),
    };

    match result {
        Ok(events) => Ok(Json(wire::ListEventsRes {
            events: events.iter().map(event_to_wire).collect(),
        })),
        Err(e) => Err(error_response("List events", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event found", body = wire::Event),
        (status = 404, description = "Event not found"),
        (status = 500, description = "Internal server error")
    )
)]
#[axum::debug_handler]
async fn get_event(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<wire::Event>, ApiError> {
    match state.event_service.get(&id) {
        Ok(Some(record)) => Ok(Json(event_to_wire(&record))),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Event not found")),
        Err(e) => Err(error_response("Get event", &e)),
    }
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = wire::CreateEventReq,
    responses(
        (status = 201, description = "Event created", body = wire::CreateEventRes),
        (status = 400, description = "Bad request"),
        (status = 500, description = "Internal server error")
    )
)]
/// Create an event.
///
/// The server assigns the identifier and creation time and persists the catalogue before
/// responding.
#[axum::debug_handler]
async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<wire::CreateEventReq>,
) -> Result<(StatusCode, Json<wire::CreateEventRes>), ApiError> {
    let new_event = new_event_from_wire(req)?;

    match state.event_service.create(new_event) {
        Ok(record) => Ok((
            StatusCode::CREATED,
            Json(wire::CreateEventRes {
                event: event_to_wire(&record),
            }),
        )),
        Err(e) => Err(error_response("Create event", &e)),
    }
}

#[utoipa::path(
    get,
    path = "/suggestions",
    params(wire::SuggestionsQuery),
    responses(
        (status = 200, description = "Bounded suggestions in catalogue order", body = wire::SuggestionsRes),
        (status = 400, description = "Limit is not a positive integer"),
        (status = 500, description = "Internal server error")
    )
)]
/// Autocomplete suggestions for a partial query.
///
/// A blank query yields an empty list. `limit` defaults to the configured suggestion limit.
#[axum::debug_handler]
async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<wire::SuggestionsQuery>,
) -> Result<Json<wire::SuggestionsRes>, ApiError> {
    let limit = match params.limit.map(limit_from_signed).transpose() {
        Ok(limit) => limit,
        Err(e) => return Err(error_response("Suggestions", &e)),
    };
    let query = params.q.unwrap_or_default();

    match state.event_service.suggest(&query, limit) {
        Ok(matches) => {
            tracing::debug!("{} suggestions for {:?}", matches.len(), query);
            Ok(Json(wire::SuggestionsRes {
                query,
                suggestions: matches.iter().map(suggestion_to_wire).collect(),
            }))
        }
        Err(e) => Err(error_response("Suggestions", &e)),
    }
}

fn error_response(context: &str, e: &EventError) -> ApiError {
    match e {
        EventError::InvalidArgument(_) => {
            tracing::warn!("{} rejected: {}", context, e);
            (StatusCode::BAD_REQUEST, "Invalid argument")
        }
        EventError::InvalidInput(_) | EventError::Text(_) => {
            tracing::warn!("{} rejected: {}", context, e);
            (StatusCode::BAD_REQUEST, "Invalid input")
        }
        _ => {
            tracing::error!("{} error: {:?}", context, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn event_to_wire(record: &EventRecord) -> wire::Event {
    wire::Event {
        id: record.id.to_string(),
        title: record.title.clone(),
        description: record.description.clone(),
        category: record.category.clone(),
        location: record.location.clone(),
        tags: record.tags.clone(),
        date: record.date.map(|d| d.format("%Y-%m-%d").to_string()),
        organizer: record.organizer.clone(),
        image_url: record.image_url.clone(),
        created_at: record
            .created_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
    }
}

fn suggestion_to_wire(record: &EventRecord) -> wire::Suggestion {
    wire::Suggestion {
        id: record.id.to_string(),
        title: record.title.clone(),
        category: record.category.clone(),
        location: record.location.clone(),
    }
}

fn new_event_from_wire(req: wire::CreateEventReq) -> Result<NewEvent, ApiError> {
    let title = NonEmptyText::new(&req.title)
        .map_err(|_| (StatusCode::BAD_REQUEST, "title is required"))?;

    let date = match req.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => Some(
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| (StatusCode::BAD_REQUEST, "date must be YYYY-MM-DD"))?,
        ),
        None => None,
    };

    Ok(NewEvent {
        description: req.description,
        category: req.category,
        location: req.location,
        tags: req.tags,
        date,
        organizer: req.organizer,
        image_url: req.image_url,
        ..NewEvent::new(title)
    })
}
