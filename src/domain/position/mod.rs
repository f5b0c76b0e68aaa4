pub mod model;
pub mod position_error;
pub mod service;
