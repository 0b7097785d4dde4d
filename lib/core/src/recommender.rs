use crate::link::{search_link, DEFAULT_SEARCH_BASE};
use crate::{Artifacts, Error, Neighbor, Recommendation, RecommendationResult, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// What to do when a recommended title has no ratings entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissPolicy {
    /// Drop the whole entry
    #[default]
    Skip,
    /// Keep the title with a placeholder poster and a zero rating
    Placeholder,
    /// Return [`Error::EnrichmentMiss`]
    Fail,
}

impl FromStr for MissPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "skip" => Ok(MissPolicy::Skip),
            "placeholder" => Ok(MissPolicy::Placeholder),
            "fail" => Ok(MissPolicy::Fail),
            other => Err(Error::InvalidConfig(format!("unknown miss policy: {}", other))),
        }
    }
}

impl fmt::Display for MissPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MissPolicy::Skip => "skip",
            MissPolicy::Placeholder => "placeholder",
            MissPolicy::Fail => "fail",
        })
    }
}

/// Configuration for a recommender
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Neighbors fetched per lookup, the queried title included
    pub neighbors: usize,
    /// Cards shown per request
    pub display_count: usize,
    pub search_base: String,
    pub on_missing: MissPolicy,
    pub placeholder_poster: String,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            neighbors: 6,
            display_count: 5,
            search_base: DEFAULT_SEARCH_BASE.to_string(),
            on_missing: MissPolicy::Skip,
            placeholder_poster: String::new(),
        }
    }
}

impl RecommenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.neighbors == 0 {
            return Err(Error::InvalidConfig("neighbors must be at least 1".into()));
        }
        if self.display_count == 0 {
            return Err(Error::InvalidConfig("display_count must be at least 1".into()));
        }
        if self.display_count > self.neighbors {
            return Err(Error::InvalidConfig(format!(
                "display_count ({}) cannot exceed neighbors ({})",
                self.display_count, self.neighbors
            )));
        }
        Ok(())
    }
}

/// Immutable recommendation context built from loaded artifacts.
///
/// Holds no mutable state; share it behind an `Arc` across request handlers.
pub struct Recommender {
    artifacts: Artifacts,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(artifacts: Artifacts, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        artifacts.validate()?;
        Ok(Self { artifacts, config })
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Titles offered for selection
    pub fn titles(&self) -> &[String] {
        &self.artifacts.book_names
    }

    fn neighbors(&self, title: &str) -> Result<Vec<Neighbor>> {
        let pivot = &self.artifacts.pivot;
        let row = pivot
            .row_of(title)
            .ok_or_else(|| Error::UnknownTitle(title.to_string()))?;
        let query = pivot
            .row(row)
            .ok_or_else(|| Error::InvalidArtifact(format!("missing pivot row {}", row)))?;
        let neighbors = self.artifacts.index.kneighbors(query, self.config.neighbors)?;
        debug!(title, row, found = neighbors.len(), "neighbor lookup");
        Ok(neighbors)
    }

    fn title_of(&self, neighbor: &Neighbor) -> Result<&str> {
        self.artifacts.pivot.title(neighbor.row).ok_or_else(|| {
            Error::InvalidArtifact(format!("neighbor row {} outside pivot matrix", neighbor.row))
        })
    }

    /// Titles of the nearest rows to `title`, nearest first. The queried
    /// title is kept when it is among them.
    pub fn recommend(&self, title: &str) -> Result<Vec<String>> {
        self.neighbors(title)?
            .iter()
            .map(|n| self.title_of(n).map(str::to_string))
            .collect()
    }

    /// Posters, ratings and search links for `titles`, in the same order.
    /// Fails on the first title with no ratings entry.
    pub fn enrich(&self, titles: &[String]) -> Result<(Vec<String>, Vec<f32>, Vec<String>)> {
        let mut posters = Vec::with_capacity(titles.len());
        let mut ratings = Vec::with_capacity(titles.len());
        let mut links = Vec::with_capacity(titles.len());

        for title in titles {
            let row = self
                .artifacts
                .ratings
                .first_match(title)
                .ok_or_else(|| Error::EnrichmentMiss(title.clone()))?;
            posters.push(row.image_url.clone());
            ratings.push(row.rating);
            links.push(search_link(&self.config.search_base, title));
        }

        Ok((posters, ratings, links))
    }

    fn enrich_one(&self, title: &str, distance: f32) -> Result<Option<Recommendation>> {
        let link = search_link(&self.config.search_base, title);
        match self.artifacts.ratings.first_match(title) {
            Some(row) => Ok(Some(Recommendation {
                title: title.to_string(),
                poster_url: row.image_url.clone(),
                rating: row.rating,
                link,
                author: row.author.clone(),
                distance,
            })),
            None => {
                warn!(title, policy = %self.config.on_missing, "no ratings entry for recommended title");
                match self.config.on_missing {
                    MissPolicy::Skip => Ok(None),
                    MissPolicy::Placeholder => Ok(Some(Recommendation {
                        title: title.to_string(),
                        poster_url: self.config.placeholder_poster.clone(),
                        rating: 0.0,
                        link,
                        author: None,
                        distance,
                    })),
                    MissPolicy::Fail => Err(Error::EnrichmentMiss(title.to_string())),
                }
            }
        }
    }

    /// Lookup and enrichment in one pass, nearest first, not shuffled.
    pub fn lookup(&self, title: &str) -> Result<RecommendationResult> {
        let mut result = RecommendationResult::with_capacity(self.config.neighbors);
        for neighbor in self.neighbors(title)? {
            let name = self.title_of(&neighbor)?;
            if let Some(rec) = self.enrich_one(name, neighbor.distance)? {
                result.push(rec);
            }
        }
        Ok(result)
    }

    /// Lookup, enrichment and shuffle with the given random source
    pub fn present_with<R: Rng + ?Sized>(&self, title: &str, rng: &mut R) -> Result<RecommendationResult> {
        let mut result = self.lookup(title)?;
        result.shuffle_with(rng);
        Ok(result)
    }

    /// Lookup, enrichment and shuffle with the thread-local generator
    pub fn present(&self, title: &str) -> Result<RecommendationResult> {
        self.present_with(title, &mut rand::rng())
    }

    /// The cards to display for `title`
    pub fn cards_with<R: Rng + ?Sized>(&self, title: &str, rng: &mut R) -> Result<Vec<Recommendation>> {
        Ok(self.present_with(title, rng)?.cards(self.config.display_count))
    }
}
