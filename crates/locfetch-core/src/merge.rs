//! Deterministic multi-source bundle merge.
//!
//! Folds an ordered list of parsed wording documents into one bundle using a
//! shallow, last-write-wins merge, then stamps the versioned metadata block.
//! The stamp is recomputed from the supplied metadata after *every* folded
//! source rather than accumulated; the final block therefore depends only on
//! the metadata, never on how many sources were merged. Downstream consumers
//! rely on this exact behavior.

use serde_json::{Map, Value};

/// Reserved key of the generated metadata sub-object.
pub const METADATA_KEY: &str = "AUTOMATED_GENERATED_FILE";
/// Top-level key carrying the wording version.
pub const WORDING_VERSION_KEY: &str = "Wording_Version";
/// Top-level key carrying the wording reference version.
pub const WORDING_REFERENCE_VERSION_KEY: &str = "Wording_Reference_Version";
/// Reference version used when none is configured.
pub const DEFAULT_REFERENCE_VERSION: &str = "VX";

/// A merged per-language bundle. Key order is insertion order, so
/// serialization is byte-stable for a given source ordering.
pub type MergedBundle = Map<String, Value>;

/// Metadata stamped into every merged bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeMetadata {
    pub delivery: String,
    pub country: String,
    pub reference_version: String,
}

impl MergeMetadata {
    pub fn new(delivery: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            delivery: delivery.into(),
            country: country.into(),
            reference_version: DEFAULT_REFERENCE_VERSION.to_string(),
        }
    }

    /// The stamped wording version, e.g. `XX_VX_DRAFT`.
    pub fn wording_version(&self) -> String {
        format!("{}_{}_DRAFT", self.country, self.reference_version)
    }
}

/// Merge `sources` in order into a single bundle.
///
/// Pure: same sources and metadata always yield the same bundle.
pub fn merge(sources: &[MergedBundle], meta: &MergeMetadata) -> MergedBundle {
    let mut merged = MergedBundle::new();

    for source in sources {
        // The stamp spreads the block accumulated *before* this source is
        // folded in; a metadata object shipped by a source is overwritten
        // wholesale, never merged into the stamped block.
        let prior_block = match merged.get(METADATA_KEY) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };

        for (key, value) in source {
            merged.insert(key.clone(), value.clone());
        }
        stamp_metadata(&mut merged, prior_block, meta);
    }

    merged
}

/// Overwrite the metadata block and version keys from `meta`, rebuilding the
/// block on top of the previously accumulated one.
fn stamp_metadata(merged: &mut MergedBundle, mut block: Map<String, Value>, meta: &MergeMetadata) {
    block.insert("Name".to_string(), Value::String(meta.delivery.clone()));
    block.insert("Version".to_string(), Value::String(meta.wording_version()));
    block.insert(
        "ReferenceVersion".to_string(),
        Value::String(meta.reference_version.clone()),
    );

    merged.insert(METADATA_KEY.to_string(), Value::Object(block));
    merged.insert(
        WORDING_VERSION_KEY.to_string(),
        Value::String(meta.wording_version()),
    );
    merged.insert(
        WORDING_REFERENCE_VERSION_KEY.to_string(),
        Value::String(meta.reference_version.clone()),
    );
}

/// Serialize a bundle the way it is persisted (2-space indentation).
pub fn to_pretty_bytes(bundle: &MergedBundle) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec_pretty(bundle)
}
