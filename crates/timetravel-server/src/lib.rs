//! HTTP/JSON API server for the time-travel code playground.
//!
//! Serves one editing session: a live draft, its saved snapshot history,
//! navigation through that history, and a side-by-side diff viewer. This
//! crate contains the session service, API schema types, error handling,
//! configuration and route definitions.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod service;
pub mod state;
