//! Lazy-greedy guess selection
//!
//! Picks up to `rate_limit` guesses maximizing the total frequency of the
//! targets they cover. Coverage is a monotone submodular set function, so the
//! greedy choice is within (1 - 1/e) of optimal, and the lazy variant only ever
//! re-scores the candidate currently on top of the heap.
//!
//! # Loop
//! Targets are visited in descending frequency order:
//! 1. **Scanning** - skip targets shorter than the minimum length
//! 2. **Draining** - pop the best candidate and re-score it. If its cached
//!    mass is still exact and beats `frequency * ball_size_estimate` (what any
//!    candidate not generated yet could reach) it is accepted; if it is exact
//!    but too small it goes back and draining stops; if it went stale it goes
//!    back with its fresh value and draining continues
//! 3. **Expanding** - score the target's unseen neighbors in parallel and queue them
//!
//! Once the targets run out no new candidates can appear, so the heap is
//! flushed with a zero bound until the budget or the positive candidates run out.

use super::ball::{BallEvaluator, ScoredBall};
use super::config::SelectConfig;
use super::error::CoverError;
use super::estimator::BallSizeEstimator;
use super::heap::{Candidate, CandidateHeap};
use super::metrics::Success;
use super::neighborhood::distinct_neighbors;
use crate::core::{FrequencyTable, Password, Population, Target, TargetId};
use rustc_hash::FxHashSet;
use std::time::{Duration, Instant};

/// Report a scanned target every this many eligible targets
const SCAN_REPORT_INTERVAL: usize = 10;

/// Where the selector is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Looking for the next eligible target, starting at `next`
    Scanning { next: usize },
    Draining { target: TargetId },
    Expanding { target: TargetId },
    /// Targets exhausted; accepting what is left in the heap
    Flushing,
    Done(Termination),
}

/// Why a selection run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// `rate_limit` guesses were accepted
    Budget,
    /// No target and no candidate with positive gain was left
    Exhausted,
}

/// One accepted guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    pub guess: String,
    /// Live mass newly covered by this guess
    pub gain: u64,
    /// Cached value the candidate was popped with
    pub cached: u64,
    pub ball_size: usize,
}

/// Snapshot of the selector handed to progress reporters
#[derive(Debug, Clone, Copy)]
pub struct Status {
    pub elapsed: Duration,
    pub accepted: usize,
    pub rate_limit: usize,
    pub targets_scanned: usize,
    pub heap_size: usize,
    pub ball_size_estimate: f64,
    pub total_frequency: u64,
}

/// Observer for a running selection
///
/// All methods default to doing nothing.
pub trait Progress {
    /// A guess was appended to the guess list
    fn guess_accepted(&self, _acceptance: &Acceptance, _status: &Status) {}

    /// Every tenth eligible target, after its neighbors were queued
    fn target_scanned(&self, _target: &Target, _status: &Status) {}

    /// The heap outgrew the last reported size (which then doubles)
    fn heap_grew(&self, _status: &Status) {}
}

/// Progress reporter that ignores everything
pub struct Silent;

impl Progress for Silent {}

/// Outcome of a selection run
#[derive(Debug, Clone)]
pub struct SelectionResult {
    /// Accepted guesses in acceptance order
    pub guesses: Vec<String>,
    pub accepted: Vec<Acceptance>,
    pub success: Success,
    pub termination: Termination,
    pub targets_scanned: usize,
    pub elapsed: Duration,
}

enum Drain {
    BudgetReached,
    /// The top candidate is exact but below the bound
    Stalled,
    Empty,
}

/// The lazy-greedy maximum coverage state machine
///
/// Owns the live frequency table, the candidate heap and the guess list.
/// Ball evaluations run on the evaluator's pool against a read-only view of
/// the table; every mutation happens here between batches.
pub struct LazyGreedySelector<'p> {
    population: &'p Population,
    evaluator: BallEvaluator<'p>,
    rate_limit: usize,
    min_length: usize,
    live: FrequencyTable,
    heap: CandidateHeap,
    estimator: BallSizeEstimator,
    done: FxHashSet<String>,
    accepted: Vec<Acceptance>,
    phase: Phase,
    targets_scanned: usize,
    next_heap_report: usize,
    start: Instant,
}

impl<'p> LazyGreedySelector<'p> {
    /// Prepare a run over `population`
    ///
    /// # Errors
    /// Returns `CoverError` if the configuration is invalid or the worker pool
    /// cannot be built.
    pub fn new(population: &'p Population, config: &SelectConfig) -> Result<Self, CoverError> {
        config.validate()?;
        let evaluator = BallEvaluator::from_config(population, config)?;

        Ok(Self {
            population,
            evaluator,
            rate_limit: config.rate_limit,
            min_length: config.min_length,
            live: FrequencyTable::from_population(population),
            heap: CandidateHeap::new(),
            estimator: BallSizeEstimator::new(config.initial_ball_size, config.ball_decay),
            done: FxHashSet::default(),
            accepted: Vec::new(),
            phase: Phase::Scanning { next: 0 },
            targets_scanned: 0,
            next_heap_report: 1,
            start: Instant::now(),
        })
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Live (not yet covered) frequencies
    #[must_use]
    pub const fn live(&self) -> &FrequencyTable {
        &self.live
    }

    #[must_use]
    pub fn guesses(&self) -> impl ExactSizeIterator<Item = &str> {
        self.accepted.iter().map(|a| a.guess.as_str())
    }

    #[must_use]
    pub fn status(&self) -> Status {
        Status {
            elapsed: self.start.elapsed(),
            accepted: self.accepted.len(),
            rate_limit: self.rate_limit,
            targets_scanned: self.targets_scanned,
            heap_size: self.heap.len(),
            ball_size_estimate: self.estimator.estimate(),
            total_frequency: self.population.total_frequency(),
        }
    }

    /// Advance the state machine by one phase
    ///
    /// Returns the new phase; stepping a finished selector is a no-op.
    pub fn step<P: Progress + ?Sized>(&mut self, progress: &P) -> Phase {
        self.phase = match self.phase {
            Phase::Scanning { next } => self.scan(next),
            Phase::Draining { target } => {
                let bound = self.estimator.bound(self.population.frequency(target));
                match self.drain(bound, progress) {
                    Drain::BudgetReached => Phase::Done(Termination::Budget),
                    Drain::Stalled | Drain::Empty => Phase::Expanding { target },
                }
            }
            Phase::Expanding { target } => {
                self.expand(target, progress);
                Phase::Scanning {
                    next: target.index() + 1,
                }
            }
            Phase::Flushing => match self.drain(0.0, progress) {
                Drain::BudgetReached => Phase::Done(Termination::Budget),
                Drain::Stalled | Drain::Empty => Phase::Done(Termination::Exhausted),
            },
            done @ Phase::Done(_) => done,
        };
        self.phase
    }

    /// Run to completion and compute the success metrics
    ///
    /// # Examples
    /// ```
    /// use typo_cover::core::Population;
    /// use typo_cover::cover::{Alphabet, LazyGreedySelector, SelectConfig, Silent};
    ///
    /// let population = Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)]);
    /// let config = SelectConfig::new(1).with_alphabet(Alphabet::new("abz"));
    ///
    /// let result = LazyGreedySelector::new(&population, &config)
    ///     .unwrap()
    ///     .run(&Silent);
    ///
    /// assert_eq!(result.guesses, vec!["aaaaaa"]);
    /// assert!((result.success.fuzzy - 150.0 / 160.0).abs() < 1e-12);
    /// ```
    pub fn run<P: Progress + ?Sized>(mut self, progress: &P) -> SelectionResult {
        let termination = loop {
            if let Phase::Done(termination) = self.step(progress) {
                break termination;
            }
        };

        let guesses: Vec<String> = self.accepted.iter().map(|a| a.guess.clone()).collect();
        let success = Success::measure(&self.evaluator, &guesses);

        SelectionResult {
            guesses,
            accepted: self.accepted,
            success,
            termination,
            targets_scanned: self.targets_scanned,
            elapsed: self.start.elapsed(),
        }
    }

    fn budget_reached(&self) -> bool {
        self.accepted.len() >= self.rate_limit
    }

    fn scan(&mut self, mut next: usize) -> Phase {
        if self.budget_reached() {
            return Phase::Done(Termination::Budget);
        }
        while let Some((id, target)) = self.population.get(next) {
            if target.is_eligible(self.min_length) {
                self.targets_scanned += 1;
                return Phase::Draining { target: id };
            }
            next += 1;
        }
        Phase::Flushing
    }

    fn drain<P: Progress + ?Sized>(&mut self, bound: f64, progress: &P) -> Drain {
        while let Some(candidate) = self.heap.pop() {
            let scored = self.evaluator.score(&candidate.text, &self.live);

            // Gains never grow back, so a dead candidate stays dead
            if scored.mass == 0 {
                continue;
            }

            if scored.mass != candidate.cached {
                self.heap.requeue(candidate, scored.mass);
                continue;
            }

            if (scored.mass as f64) < bound {
                self.heap.requeue(candidate, scored.mass);
                return Drain::Stalled;
            }

            self.accept(candidate, &scored, progress);
            if self.budget_reached() {
                return Drain::BudgetReached;
            }
        }
        Drain::Empty
    }

    fn accept<P: Progress + ?Sized>(&mut self, candidate: Candidate, scored: &ScoredBall, progress: &P) {
        let gain = self.live.zero(&scored.ball);
        debug_assert_eq!(gain, scored.mass);

        self.done.insert(candidate.text.clone());
        let acceptance = Acceptance {
            guess: candidate.text,
            gain,
            cached: candidate.cached,
            ball_size: scored.size(),
        };
        self.accepted.push(acceptance);

        if let Some(acceptance) = self.accepted.last() {
            progress.guess_accepted(acceptance, &self.status());
        }
    }

    fn expand<P: Progress + ?Sized>(&mut self, target: TargetId, progress: &P) {
        let password = Password::new(self.population.id_to_text(target));
        let candidates = distinct_neighbors(
            &password,
            self.evaluator.alphabet(),
            self.min_length,
            &self.done,
        );

        let scored = self.evaluator.score_batch(&candidates, &self.live);

        let mut largest_ball = 0;
        for (text, scored) in candidates.iter().zip(&scored) {
            largest_ball = largest_ball.max(scored.size());
            if scored.mass == 0 {
                self.heap.remove(text);
            } else {
                self.heap.insert(text, scored.mass);
            }
        }
        self.estimator.observe(largest_ball);

        if self.heap.len() > self.next_heap_report {
            progress.heap_grew(&self.status());
            self.next_heap_report = self.heap.len() * 2;
        }
        if self.targets_scanned % SCAN_REPORT_INTERVAL == 1 {
            progress.target_scanned(self.population.target(target), &self.status());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::Alphabet;
    use std::cell::RefCell;

    fn scenario() -> Population {
        Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)])
    }

    /// Letters and digits only, enough for the synthetic variants
    fn compact_alphabet() -> Alphabet {
        Alphabet::new("abcdefghijklmnopqrstuvwxyz0123456789")
    }

    fn small_config(rate_limit: usize) -> SelectConfig {
        SelectConfig::new(rate_limit)
            .with_workers(2)
            .with_alphabet(Alphabet::new("abz"))
    }

    fn run(population: &Population, config: &SelectConfig) -> SelectionResult {
        LazyGreedySelector::new(population, config)
            .unwrap()
            .run(&Silent)
    }

    #[derive(Default)]
    struct Recorder {
        accepted: RefCell<Vec<Acceptance>>,
        scans: RefCell<usize>,
        heap_reports: RefCell<Vec<usize>>,
    }

    impl Progress for Recorder {
        fn guess_accepted(&self, acceptance: &Acceptance, status: &Status) {
            self.accepted.borrow_mut().push(acceptance.clone());
            assert_eq!(status.accepted, self.accepted.borrow().len());
        }

        fn target_scanned(&self, _target: &Target, _status: &Status) {
            *self.scans.borrow_mut() += 1;
        }

        fn heap_grew(&self, status: &Status) {
            self.heap_reports.borrow_mut().push(status.heap_size);
        }
    }

    #[test]
    fn single_guess_covers_both_a_targets() {
        let population = scenario();
        let result = run(&population, &small_config(1));

        assert_eq!(result.guesses, vec!["aaaaaa"]);
        assert_eq!(result.termination, Termination::Budget);
        assert!((result.success.fuzzy - 150.0 / 160.0).abs() < 1e-12);
        assert!((result.success.exact - 100.0 / 160.0).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_limit_selects_nothing() {
        let population = scenario();
        let result = run(&population, &small_config(0));

        assert!(result.guesses.is_empty());
        assert_eq!(result.termination, Termination::Budget);
        assert_eq!(result.targets_scanned, 0);
    }

    #[test]
    fn large_budget_ends_by_exhaustion() {
        let population = scenario();
        let result = run(&population, &small_config(100));

        assert_eq!(result.termination, Termination::Exhausted);
        let eligible = population.iter().filter(|(_, t)| t.is_eligible(6)).count();
        assert!(result.guesses.len() <= eligible);
        // "aaaaaa" then something covering "zzzzzz"
        assert_eq!(result.guesses.len(), 2);
        assert!((result.success.fuzzy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_targets_each_get_a_guess() {
        let population = Population::new([("qwerty", 30), ("zxcvbn", 20), ("asdfgh", 10)]);
        let config = SelectConfig::new(10).with_alphabet(Alphabet::new("0"));
        let result = run(&population, &config);

        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.guesses.len(), 3);
        let gains: Vec<u64> = result.accepted.iter().map(|a| a.gain).collect();
        assert_eq!(gains, vec![30, 20, 10]);
    }

    #[test]
    fn short_targets_are_skipped() {
        let population = Population::new([("abc", 1000), ("abcd", 900), ("dragon", 5)]);
        let config = SelectConfig::new(5).with_alphabet(Alphabet::new("x"));
        let result = run(&population, &config);

        assert_eq!(result.targets_scanned, 1);
        assert!(result.guesses.iter().all(|g| g.len() >= 6));
        assert!((result.success.fuzzy - 5.0 / 1905.0).abs() < 1e-12);
    }

    #[test]
    fn acceptance_is_sound_and_gains_do_not_overlap() {
        let population = crate::dataset::synthetic(120, 7);
        let config = SelectConfig::new(25)
            .with_workers(3)
            .with_alphabet(compact_alphabet());
        let result = run(&population, &config);

        for acceptance in &result.accepted {
            assert_eq!(acceptance.gain, acceptance.cached);
            assert!(acceptance.gain > 0);
        }

        // Gains are disjoint, so they add up to exactly the union's mass
        let total_gain: u64 = result.accepted.iter().map(|a| a.gain).sum();
        let fuzzy_mass = result.success.fuzzy * population.total_frequency() as f64;
        assert!((total_gain as f64 - fuzzy_mass).abs() < 1e-6);

        let unique: FxHashSet<&String> = result.guesses.iter().collect();
        assert_eq!(unique.len(), result.guesses.len());
    }

    #[test]
    fn live_mass_never_increases() {
        let population = crate::dataset::synthetic(100, 3);
        let config = SelectConfig::new(15)
            .with_workers(2)
            .with_alphabet(compact_alphabet());
        let mut selector = LazyGreedySelector::new(&population, &config).unwrap();

        let recorder = Recorder::default();
        let mut previous = selector.live().live_mass();
        loop {
            let phase = selector.step(&recorder);
            let current = selector.live().live_mass();
            assert!(current <= previous);
            previous = current;
            if matches!(phase, Phase::Done(_)) {
                break;
            }
        }

        assert_eq!(selector.guesses().len(), recorder.accepted.borrow().len());
        assert!(*recorder.scans.borrow() > 0);
        assert!(!recorder.heap_reports.borrow().is_empty());
    }

    #[test]
    fn phases_follow_the_loop() {
        let population = scenario();
        let config = small_config(1);
        let mut selector = LazyGreedySelector::new(&population, &config).unwrap();
        let first = population.lookup("aaaaaa").unwrap();

        assert_eq!(selector.phase(), Phase::Scanning { next: 0 });
        assert_eq!(selector.step(&Silent), Phase::Draining { target: first });
        assert_eq!(selector.step(&Silent), Phase::Expanding { target: first });
        assert_eq!(selector.step(&Silent), Phase::Scanning { next: 1 });
        assert!(selector.status().heap_size > 0);

        while !matches!(selector.step(&Silent), Phase::Done(_)) {}
        assert_eq!(selector.phase(), Phase::Done(Termination::Budget));
        // Stepping a finished selector changes nothing
        assert_eq!(selector.step(&Silent), Phase::Done(Termination::Budget));
    }

    #[test]
    fn partly_spent_candidate_is_requeued_with_fresh_mass() {
        // With alphabet "b": ball("aaaaaa") = {aaaaaa, aaaaab}, ball("aaaaab") =
        // {aaaaab, aaaabb}, so accepting aaaaaa spends half of aaaaab's ball
        let population = Population::new([("aaaaaa", 100), ("aaaaab", 50), ("aaaabb", 30)]);
        let config = SelectConfig::new(2)
            .with_workers(2)
            .with_alphabet(Alphabet::new("b"))
            .with_initial_ball_size(1.0)
            .with_ball_decay(1.0);
        let mut selector = LazyGreedySelector::new(&population, &config).unwrap();
        let first = population.lookup("aaaaaa").unwrap();
        let second = population.lookup("aaaaab").unwrap();

        assert_eq!(selector.step(&Silent), Phase::Draining { target: first });
        assert_eq!(selector.step(&Silent), Phase::Expanding { target: first });
        assert_eq!(selector.heap.get("aaaaaa"), Some(150));
        assert_eq!(selector.heap.get("aaaaab"), Some(80));
        assert_eq!(selector.step(&Silent), Phase::Scanning { next: 1 });
        assert_eq!(selector.step(&Silent), Phase::Draining { target: second });

        // Bound is 50: aaaaaa is accepted, aaaaab drops from 80 to 30 and is
        // queued again, then the 30-mass candidates stall below the bound
        assert_eq!(selector.step(&Silent), Phase::Expanding { target: second });
        assert_eq!(selector.accepted.len(), 1);
        assert_eq!(selector.accepted[0].guess, "aaaaaa");
        assert_eq!(selector.accepted[0].cached, 150);
        assert_eq!(selector.heap.get("aaaaab"), Some(30));
        assert_eq!(selector.heap.get("aaaaba"), Some(30));

        while !matches!(selector.step(&Silent), Phase::Done(_)) {}
        assert_eq!(selector.phase(), Phase::Done(Termination::Budget));

        let last = &selector.accepted[1];
        assert_eq!(last.cached, 30);
        assert_eq!(last.gain, 30);
        assert!(selector.accepted.iter().all(|a| a.cached != 80));
        assert_eq!(selector.live().live_mass(), 0);
    }

    #[test]
    fn guess_count_is_bounded_by_budget() {
        let population = crate::dataset::synthetic(80, 11);
        for rate_limit in [1, 5, 20] {
            let config = SelectConfig::new(rate_limit)
                .with_workers(2)
                .with_alphabet(compact_alphabet());
            let result = run(&population, &config);
            assert!(result.guesses.len() <= rate_limit);
            if result.termination == Termination::Budget {
                assert_eq!(result.guesses.len(), rate_limit);
            }
        }
    }

    #[test]
    fn empty_population_is_exhausted_immediately() {
        let population = Population::new(Vec::<(String, u64)>::new());
        let result = run(&population, &small_config(3));

        assert!(result.guesses.is_empty());
        assert_eq!(result.termination, Termination::Exhausted);
        assert!(result.success.fuzzy.abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_config_rejected() {
        let population = scenario();
        let config = small_config(1).with_workers(0);
        assert!(matches!(
            LazyGreedySelector::new(&population, &config),
            Err(CoverError::NoWorkers)
        ));
    }
}
