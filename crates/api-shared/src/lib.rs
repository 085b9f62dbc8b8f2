//! # API Shared
//!
//! Shared definitions for the EventEase APIs.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`wire` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the runner binary.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
