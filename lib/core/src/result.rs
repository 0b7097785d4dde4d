//! Index-aligned recommendation results and the order randomizer.

use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// One display card: a title with its enrichment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub poster_url: String,
    pub rating: f32,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Distance from the queried title under the index metric
    pub distance: f32,
}

/// Four parallel sequences, co-indexed.
///
/// Fields are private so every transformation goes through methods that keep
/// the sequences the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecommendationResult {
    titles: Vec<String>,
    posters: Vec<String>,
    ratings: Vec<f32>,
    links: Vec<String>,
    #[serde(skip)]
    authors: Vec<Option<String>>,
    #[serde(skip)]
    distances: Vec<f32>,
}

impl RecommendationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            titles: Vec::with_capacity(n),
            posters: Vec::with_capacity(n),
            ratings: Vec::with_capacity(n),
            links: Vec::with_capacity(n),
            authors: Vec::with_capacity(n),
            distances: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, rec: Recommendation) {
        self.titles.push(rec.title);
        self.posters.push(rec.poster_url);
        self.ratings.push(rec.rating);
        self.links.push(rec.link);
        self.authors.push(rec.author);
        self.distances.push(rec.distance);
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn posters(&self) -> &[String] {
        &self.posters
    }

    pub fn ratings(&self) -> &[f32] {
        &self.ratings
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn get(&self, i: usize) -> Option<Recommendation> {
        if i >= self.len() {
            return None;
        }
        Some(Recommendation {
            title: self.titles[i].clone(),
            poster_url: self.posters[i].clone(),
            rating: self.ratings[i],
            link: self.links[i].clone(),
            author: self.authors[i].clone(),
            distance: self.distances[i],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = Recommendation> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    /// The first `n` entries as cards
    pub fn cards(&self, n: usize) -> Vec<Recommendation> {
        self.iter().take(n).collect()
    }

    /// Split into `(titles, posters, ratings, links)`
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, Vec<f32>, Vec<String>) {
        (self.titles, self.posters, self.ratings, self.links)
    }

    /// Reorder every sequence by `order`, where `order[i]` is the old index of
    /// the entry that moves to position `i`.
    pub fn permute(&mut self, order: &[usize]) {
        debug_assert_eq!(order.len(), self.len());
        self.titles = order.iter().map(|&i| self.titles[i].clone()).collect();
        self.posters = order.iter().map(|&i| self.posters[i].clone()).collect();
        self.ratings = order.iter().map(|&i| self.ratings[i]).collect();
        self.links = order.iter().map(|&i| self.links[i].clone()).collect();
        self.authors = order.iter().map(|&i| self.authors[i].clone()).collect();
        self.distances = order.iter().map(|&i| self.distances[i]).collect();
    }

    /// Shuffle with one Fisher-Yates permutation applied to every sequence.
    /// Returns the permutation used.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<usize> {
        let order = random_permutation(self.len(), rng);
        self.permute(&order);
        order
    }

    /// Shuffle using the thread-local generator
    pub fn shuffle(&mut self) -> Vec<usize> {
        self.shuffle_with(&mut rand::rng())
    }
}

impl FromIterator<Recommendation> for RecommendationResult {
    fn from_iter<I: IntoIterator<Item = Recommendation>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut result = Self::with_capacity(iter.size_hint().0);
        for rec in iter {
            result.push(rec);
        }
        result
    }
}

/// Uniform permutation of `0..n`
pub fn random_permutation<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    order
}

/// Shuffle four parallel sequences with one shared permutation.
///
/// Fails with [`Error::InvalidDimension`] if the sequences differ in length.
pub fn shuffle_parallel<R: Rng + ?Sized>(
    titles: Vec<String>,
    posters: Vec<String>,
    ratings: Vec<f32>,
    links: Vec<String>,
    rng: &mut R,
) -> Result<(Vec<String>, Vec<String>, Vec<f32>, Vec<String>)> {
    let n = titles.len();
    if let Some(actual) = [posters.len(), ratings.len(), links.len()]
        .into_iter()
        .find(|&len| len != n)
    {
        return Err(Error::InvalidDimension { expected: n, actual });
    }
    let order = random_permutation(n, rng);
    Ok((
        order.iter().map(|&i| titles[i].clone()).collect(),
        order.iter().map(|&i| posters[i].clone()).collect(),
        order.iter().map(|&i| ratings[i]).collect(),
        order.iter().map(|&i| links[i].clone()).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(n: usize) -> RecommendationResult {
        (0..n)
            .map(|i| Recommendation {
                title: format!("title-{}", i),
                poster_url: format!("poster-{}", i),
                rating: i as f32,
                link: format!("link-{}", i),
                author: (i % 2 == 0).then(|| format!("author-{}", i)),
                distance: i as f32 / 10.0,
            })
            .collect()
    }

    #[test]
    fn test_shuffle_keeps_rows_aligned() {
        let original = sample(6);
        let mut shuffled = original.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let order = shuffled.shuffle_with(&mut rng);

        assert_eq!(shuffled.len(), 6);
        for (pos, &old) in order.iter().enumerate() {
            assert_eq!(shuffled.get(pos), original.get(old));
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let original = sample(6);
        let mut shuffled = original.clone();
        shuffled.shuffle();

        let mut before = original.titles().to_vec();
        let mut after = shuffled.titles().to_vec();
        before.sort();
        after.sort();
        assert_eq!(before, after);

        let mut r1 = original.ratings().to_vec();
        let mut r2 = shuffled.ratings().to_vec();
        r1.sort_by(|a, b| a.partial_cmp(b).unwrap());
        r2.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = sample(6);
        let mut b = sample(6);
        a.shuffle_with(&mut StdRng::seed_from_u64(42));
        b.shuffle_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_permutation_covers_all_indices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut order = random_permutation(6, &mut rng);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_shuffle_parallel_preserves_correspondence() {
        let titles: Vec<String> = (0..5).map(|i| format!("t{}", i)).collect();
        let posters: Vec<String> = (0..5).map(|i| format!("p{}", i)).collect();
        let ratings: Vec<f32> = (0..5).map(|i| i as f32).collect();
        let links: Vec<String> = (0..5).map(|i| format!("l{}", i)).collect();

        let (t, p, r, l) = shuffle_parallel(titles, posters, ratings, links, &mut StdRng::seed_from_u64(3)).unwrap();
        for i in 0..5 {
            let k = &t[i][1..];
            assert_eq!(p[i], format!("p{}", k));
            assert_eq!(l[i], format!("l{}", k));
            assert_eq!(r[i], k.parse::<f32>().unwrap());
        }
    }

    #[test]
    fn test_empty_and_single_shuffle() {
        let mut empty = RecommendationResult::new();
        assert!(empty.shuffle().is_empty());

        let mut one = sample(1);
        assert_eq!(one.shuffle(), vec![0]);
    }

    #[test]
    fn test_cards_takes_prefix() {
        let result = sample(6);
        let cards = result.cards(5);
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4].title, "title-4");
        assert_eq!(result.cards(10).len(), 6);
    }

    #[test]
    fn test_shuffle_parallel_rejects_unequal_lengths() {
        let titles = vec!["a".to_string(), "b".to_string()];
        let posters = vec!["pa".to_string()];
        let ratings = vec![1.0, 2.0];
        let links = vec!["la".to_string(), "lb".to_string()];

        let err = shuffle_parallel(titles, posters, ratings, links, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { expected: 2, actual: 1 }));
    }
}
