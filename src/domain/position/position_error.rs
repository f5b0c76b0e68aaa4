use thiserror::Error;

/// Failures while turning stored samples into position records.
///
/// These are fatal for the request: the caller gets a 500 and no partial body.
#[derive(Debug, Error, PartialEq)]
pub enum PositionError {
    #[error("value {value} of attribute \"{attr}\" is not a decimal number")]
    NumericCoercion { attr: String, value: String },

    #[error("invalid sample timestamp {0:?}")]
    InvalidTimestamp(String),
}
