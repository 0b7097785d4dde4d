// Artifact store: the four precomputed tables as bincode blobs in one directory
use anyhow::{anyhow, Context};
use bookrec_core::{Artifacts, Error, NeighborIndex, PivotMatrix, RatingsTable, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::manifest::{ArtifactEntry, Manifest};

pub const MODEL_FILE: &str = "model.bin";
pub const BOOK_NAMES_FILE: &str = "book_names.bin";
pub const RATINGS_FILE: &str = "final_rating.bin";
pub const PIVOT_FILE: &str = "book_pivot.bin";
pub const MANIFEST_FILE: &str = "manifest.json";

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    /// True when all four blobs are present
    pub fn exists(&self) -> bool {
        [MODEL_FILE, BOOK_NAMES_FILE, RATINGS_FILE, PIVOT_FILE]
            .iter()
            .all(|f| self.path(f).is_file())
    }

    pub fn manifest(&self) -> Result<Option<Manifest>> {
        self.read_manifest()
            .map_err(|e| Error::InvalidArtifact(format!("{:#}", e)))
    }

    fn read_manifest(&self) -> anyhow::Result<Option<Manifest>> {
        let path = self.path(MANIFEST_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let manifest = serde_json::from_slice(&data)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(manifest))
    }

    /// Load and cross-check all four artifacts. Any missing, corrupt or
    /// inconsistent blob fails the whole load.
    pub fn load(&self) -> Result<Artifacts> {
        let artifacts = self
            .load_blobs()
            .map_err(|e| Error::InvalidArtifact(format!("{:#}", e)))?;
        artifacts.validate()?;

        info!(
            titles = artifacts.pivot.len(),
            raters = artifacts.pivot.num_raters(),
            ratings = artifacts.ratings.len(),
            metric = %artifacts.index.metric(),
            "artifacts loaded from {:?}",
            self.dir
        );
        Ok(artifacts)
    }

    fn load_blobs(&self) -> anyhow::Result<Artifacts> {
        let manifest = self.read_manifest()?;
        if manifest.is_none() {
            debug!("no manifest in {:?}, skipping checksum verification", self.dir);
        }

        let index: NeighborIndex = self.read_blob(MODEL_FILE, manifest.as_ref())?;
        let book_names: Vec<String> = self.read_blob(BOOK_NAMES_FILE, manifest.as_ref())?;
        let ratings: RatingsTable = self.read_blob(RATINGS_FILE, manifest.as_ref())?;
        let pivot: PivotMatrix = self.read_blob(PIVOT_FILE, manifest.as_ref())?;

        Ok(Artifacts::new(index, book_names, ratings, pivot))
    }

    fn read_blob<T: DeserializeOwned>(&self, file: &str, manifest: Option<&Manifest>) -> anyhow::Result<T> {
        let path = self.path(file);
        if !path.is_file() {
            return Err(anyhow!("missing artifact {}", path.display()));
        }
        let data = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        if let Some(manifest) = manifest {
            manifest.verify(file, &data)?;
        }
        bincode::deserialize(&data)
            .map_err(|e| anyhow!("Deserialization error in {}: {}", file, e))
    }

    /// Write all four artifacts and a manifest. Each file is written to a
    /// temporary path first and renamed into place.
    pub fn save(&self, artifacts: &Artifacts) -> Result<Manifest> {
        fs::create_dir_all(&self.dir)?;
        self.save_blobs(artifacts)
            .map_err(|e| Error::Serialization(format!("{:#}", e)))
    }

    fn save_blobs(&self, artifacts: &Artifacts) -> anyhow::Result<Manifest> {
        let mut files = BTreeMap::new();
        files.insert(MODEL_FILE.to_string(), self.write_blob(MODEL_FILE, &artifacts.index)?);
        files.insert(BOOK_NAMES_FILE.to_string(), self.write_blob(BOOK_NAMES_FILE, &artifacts.book_names)?);
        files.insert(RATINGS_FILE.to_string(), self.write_blob(RATINGS_FILE, &artifacts.ratings)?);
        files.insert(PIVOT_FILE.to_string(), self.write_blob(PIVOT_FILE, &artifacts.pivot)?);

        let manifest = Manifest {
            created_at: Utc::now(),
            titles: artifacts.pivot.len(),
            raters: artifacts.pivot.num_raters(),
            metric: artifacts.index.metric().to_string(),
            files,
        };
        self.write_atomic(MANIFEST_FILE, &serde_json::to_vec_pretty(&manifest)?)?;

        info!("artifacts saved to {:?}", self.dir);
        Ok(manifest)
    }

    fn write_blob<T: Serialize>(&self, file: &str, value: &T) -> anyhow::Result<ArtifactEntry> {
        let data = bincode::serialize(value)
            .map_err(|e| anyhow!("Serialization error in {}: {}", file, e))?;
        self.write_atomic(file, &data)?;
        Ok(ArtifactEntry::describe(&data))
    }

    fn write_atomic(&self, file: &str, data: &[u8]) -> anyhow::Result<()> {
        let target = self.path(file);
        let temp_file = target.with_extension("tmp");
        fs::write(&temp_file, data).with_context(|| format!("writing {}", temp_file.display()))?;
        fs::rename(&temp_file, &target)?;
        Ok(())
    }
}
