//! Score-ordered member collection backing the `zset` type.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;

/// An `f64` with a total order so it can live in a `BTreeSet`.
///
/// NaN never gets in (scores are validated when parsed) and `-0.0` is folded
/// into `0.0` so that equal scores compare equal.
#[derive(Debug, Clone, Copy)]
struct Score(f64);

impl Score {
    fn new(value: f64) -> Self {
        Score(if value == 0.0 { 0.0 } else { value })
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Debug, Default, Clone)]
pub struct SortedSet {
    scores: HashMap<Bytes, f64>,
    ordered: BTreeSet<(Score, Bytes)>,
}

impl SortedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score of `member`. Returns `true` when the member is new.
    pub fn insert(&mut self, member: Bytes, score: f64) -> bool {
        let score = Score::new(score);

        match self.scores.insert(member.clone(), score.0) {
            Some(previous) => {
                self.ordered.remove(&(Score::new(previous), member.clone()));
                self.ordered.insert((score, member));
                false
            }
            None => {
                self.ordered.insert((score, member));
                true
            }
        }
    }

    pub fn remove(&mut self, member: &[u8]) -> bool {
        match self.scores.remove_entry(member) {
            Some((member, score)) => {
                self.ordered.remove(&(Score::new(score), member));
                true
            }
            None => false,
        }
    }

    pub fn score(&self, member: &[u8]) -> Option<f64> {
        self.scores.get(member).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Members at ranks `start..=stop` in (score, member) order.
    pub fn range(&self, start: usize, stop: usize) -> impl Iterator<Item = (&Bytes, f64)> + '_ {
        self.ordered
            .iter()
            .skip(start)
            .take(stop.saturating_sub(start) + 1)
            .map(|(score, member)| (member, score.0))
    }
}
