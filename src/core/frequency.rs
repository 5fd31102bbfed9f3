//! Live frequency ledger
//!
//! Starts as a copy of the population's frequencies. Entries are only ever
//! zeroed (when a guess covers them), so the live mass never increases.

use super::population::{Population, TargetId};

/// Spendable frequency per target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    live: Vec<u64>,
}

impl FrequencyTable {
    /// Snapshot the population's frequencies
    #[must_use]
    pub fn from_population(population: &Population) -> Self {
        Self {
            live: population.frequencies().collect(),
        }
    }

    /// Live frequency of a single target
    #[inline]
    #[must_use]
    pub fn get(&self, id: TargetId) -> u64 {
        self.live[id.index()]
    }

    /// Sum of live frequencies over a ball
    ///
    /// # Examples
    /// ```
    /// use typo_cover::core::{FrequencyTable, Population};
    ///
    /// let population = Population::new([("abcdef", 4), ("abcdeg", 6)]);
    /// let mut table = FrequencyTable::from_population(&population);
    /// let ball: Vec<_> = population.iter().map(|(id, _)| id).collect();
    /// let abcdef = population.lookup("abcdef").unwrap();
    ///
    /// assert_eq!(table.sum(&ball), 10);
    /// table.zero(&[abcdef]);
    /// assert_eq!(table.sum(&ball), 6);
    /// ```
    #[must_use]
    pub fn sum(&self, ball: &[TargetId]) -> u64 {
        ball.iter().map(|&id| self.get(id)).sum()
    }

    /// Mark every target in the ball as covered
    ///
    /// Returns the mass that was still live before zeroing.
    pub fn zero(&mut self, ball: &[TargetId]) -> u64 {
        ball.iter()
            .map(|&id| std::mem::take(&mut self.live[id.index()]))
            .sum()
    }

    /// Total mass not yet covered by any accepted guess
    #[must_use]
    pub fn live_mass(&self) -> u64 {
        self.live.iter().sum()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Population, FrequencyTable) {
        let population = Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)]);
        let table = FrequencyTable::from_population(&population);
        (population, table)
    }

    #[test]
    fn starts_with_full_mass() {
        let (population, table) = setup();
        assert_eq!(table.len(), population.len());
        assert_eq!(table.live_mass(), population.total_frequency());
    }

    #[test]
    fn zero_returns_spent_mass() {
        let (population, mut table) = setup();
        let a = population.lookup("aaaaaa").unwrap();
        let b = population.lookup("aaaaab").unwrap();

        assert_eq!(table.zero(&[a, b]), 150);
        assert_eq!(table.get(a), 0);
        assert_eq!(table.live_mass(), 10);
    }

    #[test]
    fn zeroing_twice_spends_nothing() {
        let (population, mut table) = setup();
        let a = population.lookup("aaaaaa").unwrap();

        assert_eq!(table.zero(&[a]), 100);
        assert_eq!(table.zero(&[a]), 0);
        assert_eq!(table.sum(&[a]), 0);
    }

    #[test]
    fn live_mass_is_monotone() {
        let (population, mut table) = setup();
        let mut previous = table.live_mass();
        for (id, _) in population.iter() {
            table.zero(&[id]);
            let current = table.live_mass();
            assert!(current <= previous);
            previous = current;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn sum_skips_zeroed_targets_by_id() {
        let population = Population::new([("abcdef", 4), ("abcdeg", 6)]);
        let mut table = FrequencyTable::from_population(&population);
        let ball: Vec<TargetId> = population.iter().map(|(id, _)| id).collect();

        // Ids follow descending frequency, so the lighter target is second
        let abcdef = population.lookup("abcdef").unwrap();
        assert_eq!(ball[1], abcdef);

        assert_eq!(table.zero(&[abcdef]), 4);
        assert_eq!(table.sum(&ball), 6);
        assert_eq!(table.zero(&ball[..1]), 6);
        assert_eq!(table.sum(&ball), 0);
    }

    #[test]
    fn empty_ball_sums_to_zero() {
        let (_, table) = setup();
        assert_eq!(table.sum(&[]), 0);
    }
}
