//! Typo Cover
//!
//! Chooses the guess list that compromises the most accounts when the
//! password checker also accepts common typos of the stored password.
//!
//! Each guess covers the "ball" of leaked passwords one typo away from it;
//! guesses are picked by lazy-greedy maximum coverage over those balls.
//!
//! # Quick Start
//!
//! ```rust
//! use typo_cover::core::Population;
//! use typo_cover::cover::{Alphabet, LazyGreedySelector, SelectConfig, Silent};
//!
//! let population = Population::new([("password1", 300), ("Password1", 200), ("letmein99", 100)]);
//! let config = SelectConfig::new(1).with_alphabet(Alphabet::printable());
//!
//! let result = LazyGreedySelector::new(&population, &config).unwrap().run(&Silent);
//! assert_eq!(result.guesses.len(), 1);
//! assert!(result.success.fuzzy > result.success.exact);
//! ```

// Core domain types
pub mod core;

// Ball coverage and guess selection
pub mod cover;

// Password frequency datasets
pub mod dataset;

// Command implementations
pub mod commands;

// Terminal output and reports
pub mod output;
