//! Benchmark configuration.
//!
//! Every parameter of the run is a fixed constant carried by
//! [`BenchConfig::default`]; there is no file, flag, or environment surface.

use crate::qdrant::{DistanceMetric, QdrantConfig};
use serde::{Deserialize, Serialize};

/// Parameters of one benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Qdrant connection settings
    pub qdrant: QdrantConfig,
    /// Collection the run writes into (recreated at startup)
    pub collection_name: String,
    /// Vector dimensionality
    pub vector_size: u64,
    /// Distance metric for the collection
    pub distance: DistanceMetric,
    /// Number of synthetic records
    pub num_points: usize,
    /// Records per upsert call
    pub batch_size: usize,
    /// Upper bound on concurrently in-flight upsert calls
    pub max_in_flight: usize,
    /// Result limit for the final search
    pub search_limit: u64,
    /// Payload field the search filters on
    pub filter_field: String,
    /// Lower bound the filter applies to the payload field
    pub filter_threshold: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            qdrant: QdrantConfig::default(),
            collection_name: "upsert_bench".to_string(),
            vector_size: 100,
            distance: DistanceMetric::Cosine,
            num_points: 10_000,
            batch_size: 100,
            max_in_flight: 100,
            search_limit: 10,
            filter_field: "bar".to_string(),
            filter_threshold: 12.0,
        }
    }
}
