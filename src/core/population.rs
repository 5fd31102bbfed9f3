//! Weighted target population
//!
//! The population is built once, ordered by descending frequency, and never
//! mutated afterwards. Live (spendable) mass lives in [`FrequencyTable`](super::FrequencyTable).

use rustc_hash::FxHashMap;
use std::fmt;

/// Dense identifier of a target, equal to its rank in frequency order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u32);

impl TargetId {
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A password someone actually uses, with how often it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub text: String,
    pub frequency: u64,
}

impl Target {
    /// Whether this target may ever be submitted as a guess
    #[inline]
    #[must_use]
    pub fn is_eligible(&self, min_length: usize) -> bool {
        self.text.chars().count() >= min_length
    }
}

/// The weighted set of target passwords
///
/// Targets are stored in descending frequency order (ties broken by text),
/// so a [`TargetId`] doubles as the frequency rank.
#[derive(Debug, Clone, Default)]
pub struct Population {
    targets: Vec<Target>,
    index: FxHashMap<String, TargetId>,
    total: u64,
}

impl Population {
    /// Build a population from `(password, frequency)` pairs
    ///
    /// Duplicate passwords have their frequencies summed.
    ///
    /// # Examples
    /// ```
    /// use typo_cover::core::Population;
    ///
    /// let population = Population::new([("monkey", 5), ("dragon", 9), ("monkey", 1)]);
    /// assert_eq!(population.len(), 2);
    /// assert_eq!(population.total_frequency(), 15);
    ///
    /// let top = population.iter().next().unwrap();
    /// assert_eq!(top.1.text, "dragon");
    /// ```
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut merged: FxHashMap<String, u64> = FxHashMap::default();
        for (text, frequency) in entries {
            *merged.entry(text.into()).or_insert(0) += frequency;
        }

        let mut targets: Vec<Target> = merged
            .into_iter()
            .map(|(text, frequency)| Target { text, frequency })
            .collect();
        targets.sort_unstable_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then_with(|| a.text.cmp(&b.text))
        });

        let index = targets
            .iter()
            .enumerate()
            .map(|(i, target)| (target.text.clone(), TargetId(i as u32)))
            .collect();
        let total = targets.iter().map(|t| t.frequency).sum();

        Self {
            targets,
            index,
            total,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Total mass, fixed at construction; the denominator of every success rate
    #[inline]
    #[must_use]
    pub const fn total_frequency(&self) -> u64 {
        self.total
    }

    /// Look up the id of a password, if it is a target
    #[inline]
    pub fn lookup(&self, text: &str) -> Option<TargetId> {
        self.index.get(text).copied()
    }

    /// Get a target by id
    ///
    /// # Panics
    /// Panics if `id` does not belong to this population
    #[inline]
    #[must_use]
    pub fn target(&self, id: TargetId) -> &Target {
        &self.targets[id.index()]
    }

    /// Target at a frequency rank, if the population is that large
    #[inline]
    #[must_use]
    pub fn get(&self, rank: usize) -> Option<(TargetId, &Target)> {
        self.targets
            .get(rank)
            .map(|target| (TargetId(rank as u32), target))
    }

    #[inline]
    #[must_use]
    pub fn id_to_text(&self, id: TargetId) -> &str {
        &self.target(id).text
    }

    #[inline]
    #[must_use]
    pub fn frequency(&self, id: TargetId) -> u64 {
        self.target(id).frequency
    }

    /// Probability that a random account uses `text`
    ///
    /// Returns 0.0 for passwords outside the population.
    #[must_use]
    pub fn prob(&self, text: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.lookup(text)
            .map_or(0.0, |id| self.frequency(id) as f64 / self.total as f64)
    }

    /// Iterate targets in descending frequency order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (TargetId, &Target)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .map(|(i, target)| (TargetId(i as u32), target))
    }

    /// Frequencies in id order
    pub(crate) fn frequencies(&self) -> impl Iterator<Item = u64> + '_ {
        self.targets.iter().map(|t| t.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Population {
        Population::new([("aaaaab", 50), ("zzzzzz", 10), ("aaaaaa", 100)])
    }

    #[test]
    fn ordered_by_descending_frequency() {
        let population = sample();
        let order: Vec<&str> = population.iter().map(|(_, t)| t.text.as_str()).collect();
        assert_eq!(order, vec!["aaaaaa", "aaaaab", "zzzzzz"]);
    }

    #[test]
    fn ids_are_ranks() {
        let population = sample();
        for (rank, (id, _)) in population.iter().enumerate() {
            assert_eq!(id.index(), rank);
        }
        assert_eq!(population.lookup("zzzzzz").map(TargetId::index), Some(2));
    }

    #[test]
    fn ties_broken_by_text() {
        let population = Population::new([("bbbbbb", 7), ("aaaaaa", 7)]);
        let first = population.iter().next().unwrap().1;
        assert_eq!(first.text, "aaaaaa");
    }

    #[test]
    fn duplicates_are_merged() {
        let population = Population::new([("secret", 3), ("secret", 4)]);
        assert_eq!(population.len(), 1);
        assert_eq!(population.frequency(TargetId(0)), 7);
    }

    #[test]
    fn total_and_prob() {
        let population = sample();
        assert_eq!(population.total_frequency(), 160);
        assert!((population.prob("aaaaaa") - 100.0 / 160.0).abs() < f64::EPSILON);
        assert!(population.prob("missing").abs() < f64::EPSILON);
    }

    #[test]
    fn lookup_round_trips() {
        let population = sample();
        let id = population.lookup("aaaaab").unwrap();
        assert_eq!(population.id_to_text(id), "aaaaab");
        assert_eq!(population.frequency(id), 50);
        assert!(population.lookup("nope").is_none());
    }

    #[test]
    fn empty_population() {
        let population = Population::new(Vec::<(String, u64)>::new());
        assert!(population.is_empty());
        assert_eq!(population.total_frequency(), 0);
        assert!(population.prob("anything").abs() < f64::EPSILON);
    }

    #[test]
    fn eligibility_counts_characters() {
        let target = Target {
            text: "short".to_string(),
            frequency: 1,
        };
        assert!(!target.is_eligible(6));
        assert!(target.is_eligible(5));
    }
}
