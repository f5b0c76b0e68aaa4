//! Wire shapes of the historical context-broker API.
//!
//! A page looks like
//! `{"contextResponses":[{"contextElement":{"attributes":[{"name":"x","values":[...]}]}}]}`;
//! only the innermost `values` entries matter here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One historical sample of a single attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalValue {
    #[serde(rename = "recvTime")]
    pub recv_time: String,
    #[serde(rename = "attrValue", default)]
    pub attr_value: Value,
}

impl HistoricalValue {
    pub fn new(recv_time: impl Into<String>, attr_value: Value) -> Self {
        Self {
            recv_time: recv_time.into(),
            attr_value,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoricalResponseDto {
    #[serde(rename = "contextResponses", default)]
    pub context_responses: Vec<ContextResponseDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContextResponseDto {
    #[serde(rename = "contextElement", default)]
    pub context_element: ContextElementDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContextElementDto {
    #[serde(default)]
    pub attributes: Vec<HistoricalAttributeDto>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoricalAttributeDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<HistoricalValue>,
}

impl HistoricalResponseDto {
    /// All value entries of the page, in body order.
    pub fn into_values(self) -> Vec<HistoricalValue> {
        self.context_responses
            .into_iter()
            .flat_map(|r| r.context_element.attributes)
            .flat_map(|a| a.values)
            .collect()
    }
}
