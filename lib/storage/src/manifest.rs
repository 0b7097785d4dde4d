// Manifest written next to the artifact blobs
use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactEntry {
    pub size: u64,
    pub checksum: String,
}

impl ArtifactEntry {
    pub fn describe(bytes: &[u8]) -> Self {
        Self {
            size: bytes.len() as u64,
            checksum: checksum(bytes),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub created_at: DateTime<Utc>,
    pub titles: usize,
    pub raters: usize,
    pub metric: String,
    /// Keyed by file name
    pub files: BTreeMap<String, ArtifactEntry>,
}

impl Manifest {
    /// Fails if `file` is not listed or is listed with a different checksum than `bytes`.
    pub fn verify(&self, file: &str, bytes: &[u8]) -> Result<()> {
        let entry = self
            .files
            .get(file)
            .ok_or_else(|| anyhow!("manifest has no entry for {}", file))?;
        let actual = checksum(bytes);
        if entry.checksum != actual {
            return Err(anyhow!(
                "checksum mismatch for {}: expected {}, got {}",
                file,
                entry.checksum,
                actual
            ));
        }
        Ok(())
    }
}

pub fn checksum(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}
