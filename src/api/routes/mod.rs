//! API route declarations (e.g., /positions/)

pub mod position_routes;
