//! Synthetic record generation.
//!
//! Every record gets a vector of uniform random components in `[0, 1)` and a
//! clone of the same fixed nested payload. Identifiers are the zero-based
//! position in the generated sequence, so batching the slice with `chunks`
//! keeps the index-to-identifier mapping intact.

use anyhow::{Context, Result};
use qdrant_client::Payload;
use qdrant_client::qdrant::PointStruct;
use rand::Rng;

/// Payload fixture attached to every generated point.
pub fn fixture_value() -> serde_json::Value {
    serde_json::json!({
        "foo": "Bar",
        "bar": 12,
        "baz": {
            "qux": "quux",
            "nested": {
                "level1": {
                    "level2": "data",
                    "array": [1, 2, 3, 4, 5]
                }
            }
        }
    })
}

/// Payload fixture converted to the wire representation.
pub fn fixture_payload() -> Result<Payload> {
    fixture_value()
        .try_into()
        .context("Payload fixture is not a JSON object")
}

/// One vector of uniform random components in `[0, 1)`.
pub fn random_vector(size: u64) -> Vec<f32> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen_range(0.0..1.0)).collect()
}

/// Generate `num_points` points with sequential ids and the shared payload.
pub fn generate_points(num_points: usize, vector_size: u64) -> Result<Vec<PointStruct>> {
    let payload = fixture_payload()?;

    Ok((0..num_points)
        .map(|idx| PointStruct::new(idx as u64, random_vector(vector_size), payload.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::point_id::PointIdOptions;
    use std::collections::BTreeSet;

    fn point_id(point: &PointStruct) -> u64 {
        match point.id.as_ref().and_then(|id| id.point_id_options.as_ref()) {
            Some(PointIdOptions::Num(n)) => *n,
            other => panic!("unexpected point id: {:?}", other),
        }
    }

    #[test]
    fn test_fixture_has_filterable_field() {
        let value = fixture_value();
        assert_eq!(value["foo"], "Bar");
        assert_eq!(value["bar"], 12);
        assert_eq!(value["baz"]["qux"], "quux");
        assert_eq!(
            value["baz"]["nested"]["level1"]["array"]
                .as_array()
                .unwrap()
                .len(),
            5
        );
    }

    #[test]
    fn test_fixture_converts_to_payload() {
        fixture_payload().unwrap();
    }

    #[test]
    fn test_random_vector_dimension_and_range() {
        let vector = random_vector(100);
        assert_eq!(vector.len(), 100);
        assert!(vector.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_ids_are_sequential_from_zero() {
        let points = generate_points(25, 4).unwrap();
        assert_eq!(points.len(), 25);
        for (idx, point) in points.iter().enumerate() {
            assert_eq!(point_id(point), idx as u64);
        }
    }

    #[test]
    fn test_batches_cover_every_id_exactly_once() {
        // Non-divisible case: the last batch is shorter.
        let points = generate_points(10, 3).unwrap();
        let batches: Vec<&[PointStruct]> = points.chunks(3).collect();

        assert_eq!(batches.len(), 4);
        assert_eq!(
            batches.iter().map(|b| b.len()).collect::<Vec<_>>(),
            vec![3, 3, 3, 1]
        );

        let mut seen = BTreeSet::new();
        for batch in &batches {
            for point in *batch {
                assert!(seen.insert(point_id(point)), "id uploaded twice");
            }
        }
        assert_eq!(seen, (0..10).collect::<BTreeSet<u64>>());
    }

    #[test]
    fn test_batch_count_for_default_scenario() {
        let points = generate_points(10_000, 1).unwrap();
        assert_eq!(points.chunks(100).count(), 100);
        assert!(points.chunks(100).all(|batch| batch.len() == 100));
    }
}
