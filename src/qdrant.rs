//! Qdrant client wrapper for the benchmark driver.
//!
//! Thin layer over the gRPC client: one method per server call the benchmark
//! needs (collection reset, bulk upsert, filtered search, point counts).
//! Connection or server errors are fatal for the run; there is no retry.

use anyhow::{Context, Result};
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    Condition, CountPointsBuilder, CreateCollectionBuilder, CreateFieldIndexCollectionBuilder,
    Distance, FieldType, Filter, PointStruct, Range, ScoredPoint, SearchPointsBuilder,
    UpsertPointsBuilder, VectorParamsBuilder,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

// Type alias for return types
pub type CollectionInfo = qdrant_client::qdrant::CollectionInfo;

/// Qdrant connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantConfig {
    /// gRPC endpoint of the Qdrant server
    pub url: String,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:6334".to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Distance metric type
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum DistanceMetric {
    Cosine,
    Euclid,
    Dot,
    Manhattan,
}

impl From<DistanceMetric> for Distance {
    fn from(metric: DistanceMetric) -> Self {
        match metric {
            DistanceMetric::Cosine => Distance::Cosine,
            DistanceMetric::Euclid => Distance::Euclid,
            DistanceMetric::Dot => Distance::Dot,
            DistanceMetric::Manhattan => Distance::Manhattan,
        }
    }
}

/// Shape of the collection the benchmark writes into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Collection name
    pub name: String,
    /// Vector size
    pub vector_size: u64,
    /// Distance metric
    pub distance: DistanceMetric,
}

/// Build a `field >= threshold` payload filter for search requests.
pub fn payload_range_filter(field: &str, gte: f64) -> Filter {
    Filter::must([Condition::range(
        field,
        Range {
            gte: Some(gte),
            ..Default::default()
        },
    )])
}

/// Qdrant client handle shared across upload tasks
#[derive(Clone)]
pub struct BenchClient {
    client: Arc<Qdrant>,
}

impl BenchClient {
    /// Connect to Qdrant and verify the server is reachable
    pub async fn connect(config: QdrantConfig) -> Result<Self> {
        info!("Connecting to Qdrant at {}", config.url);

        let mut client_config = qdrant_client::config::QdrantConfig::from_url(&config.url);
        client_config.set_timeout(config.timeout);

        if let Some(api_key) = &config.api_key {
            client_config.set_api_key(api_key);
        }

        let client = Qdrant::new(client_config).context("Failed to create Qdrant client")?;

        let health = client
            .health_check()
            .await
            .context("Qdrant health check failed")?;
        debug!("Qdrant is up: {} {}", health.title, health.version);

        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// List all collections
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.client.list_collections().await?;
        Ok(collections
            .collections
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// Get collection info
    pub async fn collection_info(&self, collection_name: &str) -> Result<CollectionInfo> {
        let response = self
            .client
            .collection_info(collection_name)
            .await
            .context("Failed to get collection info")?;

        response
            .result
            .ok_or_else(|| anyhow::anyhow!("No collection info in response"))
    }

    /// Drop the collection if it exists, then create it fresh
    pub async fn recreate_collection(&self, spec: &CollectionSpec) -> Result<()> {
        let existing = self.list_collections().await?;
        if existing.iter().any(|name| name == &spec.name) {
            info!("Dropping existing collection: {}", spec.name);
            self.delete_collection(&spec.name).await?;
        }

        info!(
            "Creating collection: {} (size={}, distance={:?})",
            spec.name, spec.vector_size, spec.distance
        );

        let distance: Distance = spec.distance.into();

        self.client
            .create_collection(
                CreateCollectionBuilder::new(&spec.name)
                    .vectors_config(VectorParamsBuilder::new(spec.vector_size, distance)),
            )
            .await
            .context("Failed to create collection")?;

        Ok(())
    }

    /// Create a numeric payload index for a filterable field
    pub async fn create_payload_index(
        &self,
        collection_name: &str,
        field_name: &str,
    ) -> Result<()> {
        debug!(
            "Creating payload index on {}.{}",
            collection_name, field_name
        );

        self.client
            .create_field_index(CreateFieldIndexCollectionBuilder::new(
                collection_name,
                field_name,
                FieldType::Integer,
            ))
            .await
            .context("Failed to create payload index")?;

        Ok(())
    }

    /// Delete a collection
    pub async fn delete_collection(&self, collection_name: &str) -> Result<()> {
        info!("Deleting collection: {}", collection_name);

        self.client
            .delete_collection(collection_name)
            .await
            .context("Failed to delete collection")?;

        Ok(())
    }

    /// Upsert one batch of points, waiting until the server has applied it
    pub async fn upsert_points(
        &self,
        collection_name: &str,
        points: Vec<PointStruct>,
    ) -> Result<()> {
        debug!(
            "Upserting {} points to collection: {}",
            points.len(),
            collection_name
        );

        self.client
            .upsert_points(UpsertPointsBuilder::new(collection_name, points).wait(true))
            .await
            .context("Failed to upsert points")?;

        Ok(())
    }

    /// Search for similar vectors
    pub async fn search(
        &self,
        collection_name: &str,
        vector: Vec<f32>,
        limit: u64,
        filter: Option<Filter>,
    ) -> Result<Vec<ScoredPoint>> {
        let mut search_builder =
            SearchPointsBuilder::new(collection_name, vector, limit).with_payload(true);

        if let Some(f) = filter {
            search_builder = search_builder.filter(f);
        }

        let search_result = self
            .client
            .search_points(search_builder)
            .await
            .context("Search failed")?;

        Ok(search_result.result)
    }

    /// Exact point count for a collection
    pub async fn count_points(&self, collection_name: &str) -> Result<u64> {
        let count = self
            .client
            .count(CountPointsBuilder::new(collection_name).exact(true))
            .await
            .context("Failed to count points")?;

        Ok(count.result.map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::condition::ConditionOneOf;

    #[test]
    fn test_range_filter_shape() {
        let filter = payload_range_filter("bar", 12.0);

        assert_eq!(filter.must.len(), 1);
        assert!(filter.should.is_empty());
        assert!(filter.must_not.is_empty());

        match &filter.must[0].condition_one_of {
            Some(ConditionOneOf::Field(field)) => {
                assert_eq!(field.key, "bar");
                let range = field.range.as_ref().expect("range condition");
                assert_eq!(range.gte, Some(12.0));
                assert!(range.gt.is_none());
                assert!(range.lt.is_none());
                assert!(range.lte.is_none());
            }
            other => panic!("expected field condition, got {:?}", other),
        }
    }

    #[test]
    fn test_distance_metric_mapping() {
        assert_eq!(Distance::from(DistanceMetric::Cosine), Distance::Cosine);
        assert_eq!(Distance::from(DistanceMetric::Euclid), Distance::Euclid);
        assert_eq!(Distance::from(DistanceMetric::Dot), Distance::Dot);
        assert_eq!(
            Distance::from(DistanceMetric::Manhattan),
            Distance::Manhattan
        );
    }

    #[tokio::test]
    #[ignore] // Requires running Qdrant instance
    async fn test_qdrant_connection() {
        let config = QdrantConfig::default();
        let client = BenchClient::connect(config).await.unwrap();
        let collections = client.list_collections().await.unwrap();
        // A fresh server has no collections; just make sure the call succeeds.
        let _ = collections;
    }
}
