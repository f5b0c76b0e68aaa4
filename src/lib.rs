//! Robot pose history API.
//!
//! Serves `GET /positions/?st=&et=` from a Mongo collection (row or column
//! layout) or from a paginated historical context-broker API.

pub mod api;
pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod routes;
