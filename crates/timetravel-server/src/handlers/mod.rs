//! HTTP handler functions for all API endpoints.
//!
//! Each handler follows the pattern:
//! 1. Extract state and request data via axum extractors
//! 2. Lock the service and call the relevant method
//! 3. Return the JSON response or an `ApiError`

pub mod diff;
pub mod history;
pub mod playground;
