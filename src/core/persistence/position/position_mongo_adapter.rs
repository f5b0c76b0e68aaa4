use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use tracing::debug;

use crate::config::MongoConfig;

/// Adapter for the MongoDB collection the context persister writes robot attributes to.
/// Only issues range reads; the collection is owned by the writer.
#[derive(Debug, Clone)]
pub struct PositionMongoAdapter {
    collection: Collection<Document>,
}

impl PositionMongoAdapter {
    /// Builds the driver handle. No connection is opened until the first query.
    pub async fn connect(config: &MongoConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.endpoint).await?;
        if let Some(replica_set) = &config.replica_set {
            options.repl_set_name = Some(replica_set.clone());
        }
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        let collection = client
            .database(&config.database)
            .collection::<Document>(&config.collection);

        Ok(Self { collection })
    }

    pub fn range_filter(start: DateTime<Utc>, end: DateTime<Utc>) -> Document {
        doc! {
            "recvTime": {
                "$gte": BsonDateTime::from_millis(start.timestamp_millis()),
                "$lt": BsonDateTime::from_millis(end.timestamp_millis()),
            }
        }
    }

    /// Documents in `[start, end)`, ascending by `recvTime`.
    pub async fn find_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Document>> {
        let cursor = self
            .collection
            .find(Self::range_filter(start, end))
            .sort(doc! { "recvTime": 1 })
            .await?;

        let docs: Vec<Document> = cursor.try_collect().await?;
        debug!(
            collection = %self.collection.name(),
            count = docs.len(),
            "Fetched position documents"
        );
        Ok(docs)
    }
}
