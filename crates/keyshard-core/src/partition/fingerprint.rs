//! Deterministic partition fingerprinting.

use crate::{
    key::{Element, ElementId},
    partition::{DimensionPartition, Partition},
};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// PartitionFingerprint
///
/// Stable identity for one partition: ordinal, chunks, and resolved
/// dependent chunks. Suitable as a task identifier.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PartitionFingerprint([u8; 32]);

impl PartitionFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex digest; same text as `Display`.
    #[must_use]
    pub fn as_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PartitionFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))
    }
}

impl Partition {
    #[must_use]
    pub fn fingerprint(&self) -> PartitionFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"partfp:v1");
        write_u64(&mut hasher, self.ordinal as u64);

        write_tag(&mut hasher, 0x01);
        hash_chunks(&mut hasher, self.chunks());

        write_tag(&mut hasher, 0x02);
        hash_chunks(&mut hasher, self.dependents());

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        PartitionFingerprint(out)
    }
}

fn hash_chunks(hasher: &mut Sha256, chunks: &[DimensionPartition]) {
    write_u64(hasher, chunks.len() as u64);
    for chunk in chunks {
        write_str(hasher, chunk.dimension().name());
        write_u64(hasher, chunk.len() as u64);
        for element in chunk.elements() {
            write_element(hasher, element);
        }
    }
}

fn write_element(hasher: &mut Sha256, element: &Element) {
    match element.id() {
        ElementId::Int(v) => {
            write_tag(hasher, 0x10);
            hasher.update(v.to_be_bytes());
        }
        ElementId::Text(v) => {
            write_tag(hasher, 0x11);
            write_str(hasher, v);
        }
    }
}

fn write_tag(hasher: &mut Sha256, tag: u8) {
    hasher.update([tag]);
}

fn write_u64(hasher: &mut Sha256, value: u64) {
    hasher.update(value.to_be_bytes());
}

// Length-prefixed so adjacent strings cannot collide.
fn write_str(hasher: &mut Sha256, value: &str) {
    write_u64(hasher, value.len() as u64);
    hasher.update(value.as_bytes());
}
