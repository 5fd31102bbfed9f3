//! Core domain types for typo-tolerant guess selection
//!
//! This module contains the password population and its live frequency ledger.
//! Types here carry no parallelism or I/O; they are shared read-only by the workers.

mod frequency;
mod password;
mod population;

pub use frequency::FrequencyTable;
pub use password::Password;
pub use population::{Population, Target, TargetId};
