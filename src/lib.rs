//! Bulk-upsert throughput benchmark for Qdrant.
//!
//! Uploads a fixed set of synthetic points twice, first with all batches in
//! flight concurrently and then strictly one batch at a time, measures both
//! passes, and finishes with one payload-filtered similarity search. The
//! whole run is driven by the constants in [`BenchConfig::default`].

pub mod config;
pub mod points;
pub mod qdrant;
pub mod runner;

pub use config::BenchConfig;
pub use qdrant::{BenchClient, CollectionSpec, DistanceMetric, QdrantConfig};
pub use runner::{BenchReport, run};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::qdrant::{BenchClient, CollectionSpec, DistanceMetric, QdrantConfig};
    pub use crate::runner::{BenchReport, run, upload_concurrent, upload_sequential};
}
