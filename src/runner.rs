//! Benchmark driver.
//!
//! Runs the linear pipeline: connect, recreate the collection, generate the
//! synthetic records, upload every batch concurrently, upload the same
//! batches again sequentially, then issue one payload-filtered search.
//! Upsert is idempotent by identifier, so the second pass overwrites the
//! first and the final collection state equals the record set.

use anyhow::{Context, Result};
use futures::future::join_all;
use qdrant_client::qdrant::{PointStruct, ScoredPoint};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::config::BenchConfig;
use crate::points::{generate_points, random_vector};
use crate::qdrant::{BenchClient, CollectionSpec, payload_range_filter};

/// Outcome of one benchmark run
#[derive(Debug)]
pub struct BenchReport {
    /// Raw result set of the final filtered search
    pub search_results: Vec<ScoredPoint>,
    /// Wall-clock time of the concurrent upload pass
    pub concurrent: Duration,
    /// Wall-clock time of the sequential upload pass
    pub sequential: Duration,
    /// Exact point count after both passes
    pub points_in_collection: u64,
}

impl BenchReport {
    /// The two timing lines, elapsed seconds at two-decimal precision.
    pub fn timing_lines(&self) -> String {
        format!(
            "Concurrent upload took: {:.2} seconds\nSequential upload took: {:.2} seconds",
            self.concurrent.as_secs_f64(),
            self.sequential.as_secs_f64()
        )
    }

    /// Print the raw search results followed by the timings.
    pub fn print(&self) {
        println!("{:#?}", self.search_results);
        println!("{}", self.timing_lines());
    }
}

/// Execute the full benchmark pipeline against the configured server.
pub async fn run(config: &BenchConfig) -> Result<BenchReport> {
    let client = BenchClient::connect(config.qdrant.clone()).await?;

    let collections = client.list_collections().await?;
    debug!("Collections on server: {:?}", collections);

    let spec = CollectionSpec {
        name: config.collection_name.clone(),
        vector_size: config.vector_size,
        distance: config.distance,
    };
    client.recreate_collection(&spec).await?;
    client
        .create_payload_index(&config.collection_name, &config.filter_field)
        .await?;

    let collection_info = client.collection_info(&config.collection_name).await?;
    debug!("Collection ready: status={:?}", collection_info.status);

    info!(
        "Generating {} points of dimension {}",
        config.num_points, config.vector_size
    );
    let points = generate_points(config.num_points, config.vector_size)?;

    let concurrent = upload_concurrent(&client, config, &points).await?;
    info!(
        "Concurrent upload finished in {:.2}s",
        concurrent.as_secs_f64()
    );

    let sequential = upload_sequential(&client, config, &points).await?;
    info!(
        "Sequential upload finished in {:.2}s",
        sequential.as_secs_f64()
    );

    let points_in_collection = client.count_points(&config.collection_name).await?;
    info!("Collection holds {} points", points_in_collection);

    let query = random_vector(config.vector_size);
    let filter = payload_range_filter(&config.filter_field, config.filter_threshold);
    let search_results = client
        .search(
            &config.collection_name,
            query,
            config.search_limit,
            Some(filter),
        )
        .await?;

    Ok(BenchReport {
        search_results,
        concurrent,
        sequential,
        points_in_collection,
    })
}

/// Upload all batches at once and gather the results.
///
/// Each batch is spawned as its own task; a semaphore caps the number of
/// in-flight upserts at `max_in_flight`. The gather propagates the first
/// failure after all tasks have settled.
pub async fn upload_concurrent(
    client: &BenchClient,
    config: &BenchConfig,
    points: &[PointStruct],
) -> Result<Duration> {
    let semaphore = Arc::new(Semaphore::new(config.max_in_flight));
    let start = Instant::now();

    let mut tasks = Vec::new();
    for batch in points.chunks(config.batch_size) {
        let client = client.clone();
        let collection_name = config.collection_name.clone();
        let batch = batch.to_vec();
        let semaphore = Arc::clone(&semaphore);

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .context("Upload semaphore closed")?;
            client.upsert_points(&collection_name, batch).await
        }));
    }

    for task in join_all(tasks).await {
        task.context("Upload task panicked")??;
    }

    Ok(start.elapsed())
}

/// Upload the same batches one at a time.
pub async fn upload_sequential(
    client: &BenchClient,
    config: &BenchConfig,
    points: &[PointStruct],
) -> Result<Duration> {
    let start = Instant::now();

    for batch in points.chunks(config.batch_size) {
        client
            .upsert_points(&config.collection_name, batch.to_vec())
            .await?;
    }

    Ok(start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(concurrent_ms: u64, sequential_ms: u64) -> BenchReport {
        BenchReport {
            search_results: Vec::new(),
            concurrent: Duration::from_millis(concurrent_ms),
            sequential: Duration::from_millis(sequential_ms),
            points_in_collection: 0,
        }
    }

    #[test]
    fn test_timing_lines_use_two_decimals() {
        let lines = report(1_234, 5_678).timing_lines();
        assert_eq!(
            lines,
            "Concurrent upload took: 1.23 seconds\nSequential upload took: 5.68 seconds"
        );
    }

    #[test]
    fn test_timing_lines_for_subsecond_runs() {
        let lines = report(0, 9).timing_lines();
        assert_eq!(
            lines,
            "Concurrent upload took: 0.00 seconds\nSequential upload took: 0.01 seconds"
        );
    }
}
