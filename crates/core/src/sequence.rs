//! Integer sequence generation and storage encoding.
//!
//! Stored sequences round-trip through a JSON text column, so encoding must
//! preserve every value exactly, including negatives and duplicates.

use crate::error::{Error, Result};
use crate::RANDOM_VALUE_BOUND;
use rand::Rng;

/// Generate `len` uniform pseudo-random values in `[0, RANDOM_VALUE_BOUND)`.
pub fn random_sequence(len: usize) -> Vec<i64> {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| rng.random_range(0..RANDOM_VALUE_BOUND))
        .collect()
}

/// Encode a sequence for the store's text column.
pub fn encode_elements(values: &[i64]) -> Result<String> {
    serde_json::to_string(values).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decode a sequence previously produced by [`encode_elements`].
pub fn decode_elements(raw: &str) -> Result<Vec<i64>> {
    serde_json::from_str(raw).map_err(|e| Error::Serialization(e.to_string()))
}
