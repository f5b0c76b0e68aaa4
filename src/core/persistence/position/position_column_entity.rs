use anyhow::Result;
use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde_json::{Map, Value};

use crate::core::persistence::position::attribute_row_entity::{bson_to_json, recv_time};

/// One stored document in the column-oriented layout: a `recvTime` plus
/// one field per attribute (`{recvTime, x, y, z, theta, ...}`).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionColumnEntity {
    pub time: DateTime<Utc>,
    /// Every attribute field of the document, recognized or not.
    pub fields: Map<String, Value>,
}

impl PositionColumnEntity {
    pub fn new(time: DateTime<Utc>, fields: Map<String, Value>) -> Self {
        Self { time, fields }
    }

    pub fn from_document(doc: &Document) -> Result<Self> {
        let time = recv_time(doc)?;
        let fields = doc
            .iter()
            .filter(|(key, _)| !matches!(key.as_str(), "_id" | "recvTime"))
            .map(|(key, value)| (key.clone(), bson_to_json(value)))
            .collect();

        Ok(Self { time, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime as BsonDateTime};
    use serde_json::json;

    #[test]
    fn keeps_every_attribute_field_except_bookkeeping() {
        let doc = doc! {
            "_id": "abc",
            "recvTime": BsonDateTime::from_millis(1_514_916_245_000),
            "x": 0.0,
            "dummy": "dummy",
            "x_md": { "unit": "m" },
        };

        let row = PositionColumnEntity::from_document(&doc).unwrap();
        assert_eq!(row.fields.len(), 3);
        assert_eq!(row.fields["x"], json!(0.0));
        assert_eq!(row.fields["dummy"], json!("dummy"));
        assert!(!row.fields.contains_key("recvTime"));
    }
}
