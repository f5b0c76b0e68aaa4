use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};
use serde_json::Value;

/// One stored attribute sample in the row-oriented layout
/// (`{recvTime, attrName, attrType, attrValue}` per document).
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeRowEntity {
    pub time: DateTime<Utc>,
    pub attr_name: String,
    pub attr_value: Value,
}

impl AttributeRowEntity {
    pub fn new(time: DateTime<Utc>, attr_name: impl Into<String>, attr_value: Value) -> Self {
        Self {
            time,
            attr_name: attr_name.into(),
            attr_value,
        }
    }

    pub fn from_document(doc: &Document) -> Result<Self> {
        let time = recv_time(doc)?;
        let attr_name = doc
            .get_str("attrName")
            .map_err(|e| anyhow!("row document without attrName: {}", e))?
            .to_string();
        let attr_value = doc.get("attrValue").map(bson_to_json).unwrap_or(Value::Null);

        Ok(Self {
            time,
            attr_name,
            attr_value,
        })
    }
}

/// Reads `recvTime`. Only BSON dates match the range filter, so nothing else
/// is accepted here.
pub(crate) fn recv_time(doc: &Document) -> Result<DateTime<Utc>> {
    match doc.get("recvTime") {
        Some(Bson::DateTime(dt)) => DateTime::<Utc>::from_timestamp_millis(dt.timestamp_millis())
            .ok_or_else(|| anyhow!("recvTime out of range: {}", dt)),
        Some(other) => Err(anyhow!("unexpected recvTime type: {:?}", other.element_type())),
        None => Err(anyhow!("document without recvTime")),
    }
}

/// Converts a BSON attribute value into JSON, keeping decimals as strings.
pub(crate) fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::Double(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(f.to_string())),
        Bson::Int32(i) => Value::from(*i),
        Bson::Int64(i) => Value::from(*i),
        Bson::String(s) => Value::String(s.clone()),
        Bson::Decimal128(d) => Value::String(d.to_string()),
        Bson::Null => Value::Null,
        other => other.clone().into_relaxed_extjson(),
    }
}
