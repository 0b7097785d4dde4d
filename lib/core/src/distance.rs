use crate::{Error, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distance metric a neighbor index is fitted with.
/// Smaller is closer for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// `1 - cosine_similarity`
    Cosine,
    /// Minkowski with p = 2
    #[default]
    Euclidean,
    /// Minkowski with p = 1
    Manhattan,
}

impl Distance {
    #[inline]
    pub fn between(self, a: &Vector, b: &Vector) -> f32 {
        match self {
            Distance::Cosine => 1.0 - a.cosine_similarity(b),
            Distance::Euclidean => a.l2_distance(b),
            Distance::Manhattan => a.l1_distance(b),
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Distance::Cosine => "cosine",
            Distance::Euclidean => "euclidean",
            Distance::Manhattan => "manhattan",
        };
        f.write_str(name)
    }
}

impl FromStr for Distance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cosine" | "cosine" => Ok(Distance::Cosine),
            "Euclidean" | "euclidean" | "minkowski" | "l2" => Ok(Distance::Euclidean),
            "Manhattan" | "manhattan" | "cityblock" | "l1" => Ok(Distance::Manhattan),
            other => Err(Error::InvalidConfig(format!("unknown distance metric: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_distance_of_parallel_rows_is_zero() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![2.0, 4.0]);
        assert!(Distance::Cosine.between(&a, &b).abs() < 1e-6);
    }

    #[test]
    fn test_parse_metric_names() {
        assert_eq!("cosine".parse::<Distance>().unwrap(), Distance::Cosine);
        assert_eq!("minkowski".parse::<Distance>().unwrap(), Distance::Euclidean);
        assert_eq!("Manhattan".parse::<Distance>().unwrap(), Distance::Manhattan);
        assert!("hamming".parse::<Distance>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for d in [Distance::Cosine, Distance::Euclidean, Distance::Manhattan] {
            assert_eq!(d.to_string().parse::<Distance>().unwrap(), d);
        }
    }
}
