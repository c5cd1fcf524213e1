//! # farmwatch-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **device control endpoint** the dashboard script calls
//!   (`GET /device/{id}/control/{command}`)
//! - Serve a **JSON API** for devices, sensor readings, and command history,
//!   including sensor data ingestion (`POST /api/sensor_data`)
//! - Serve **server-side rendered pages** whose markup carries the data
//!   attributes, ids, and classes the dashboard script binds to
//! - Serve the static assets (stylesheets, the wasm dashboard bundle)
//!
//! ## Dependency rule
//! Depends on `farmwatch-app` (for port traits and services) and
//! `farmwatch-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod control;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
mod testing;
