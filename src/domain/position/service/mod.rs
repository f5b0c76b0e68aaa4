//! Position use cases: window parsing, normalization, merge and the backends

pub mod column_normalizer;
pub mod position_merge;
pub mod position_source;
pub mod remote_position_source;
pub mod row_normalizer;
pub mod store_position_source;
pub mod time_window_service;
