//! Outbound HTTP clients

pub mod historical_client;
pub mod historical_dto;
