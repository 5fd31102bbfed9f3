//! Evaluate command
//!
//! Scores an existing guess list against a population.

use crate::core::{FrequencyTable, Population};
use crate::cover::{BallEvaluator, SelectConfig, Success};

/// Contribution of one guess, in list order
pub struct GuessContribution {
    pub guess: String,
    /// Frequency of the guess itself, 0 if it is not a target
    pub exact: u64,
    /// Mass newly covered by this guess's ball
    pub gain: u64,
    pub ball_size: usize,
}

/// Result of evaluating a guess list
pub struct EvaluationResult {
    pub guesses: usize,
    pub total_frequency: u64,
    pub success: Success,
    pub contributions: Vec<GuessContribution>,
}

/// Evaluate `guesses`, truncated to `config.rate_limit`
///
/// Marginal gains are computed in list order: each guess only gets credit
/// for targets no earlier guess covered.
///
/// # Errors
///
/// Returns an error if the worker pool cannot be started.
pub fn evaluate_guesses(
    population: &Population,
    guesses: &[String],
    config: &SelectConfig,
) -> Result<EvaluationResult, String> {
    let evaluator = BallEvaluator::from_config(population, config).map_err(|e| e.to_string())?;
    let guesses = &guesses[..guesses.len().min(config.rate_limit)];

    let mut live = FrequencyTable::from_population(population);
    let contributions = guesses
        .iter()
        .zip(evaluator.balls(guesses))
        .map(|(guess, ball)| GuessContribution {
            guess: guess.clone(),
            exact: population
                .lookup(guess)
                .map_or(0, |id| population.frequency(id)),
            gain: live.zero(&ball),
            ball_size: ball.len(),
        })
        .collect();

    Ok(EvaluationResult {
        guesses: guesses.len(),
        total_frequency: population.total_frequency(),
        success: Success::measure(&evaluator, guesses),
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::Alphabet;

    fn population() -> Population {
        Population::new([("aaaaaa", 100), ("aaaaab", 50), ("zzzzzz", 10)])
    }

    fn config(rate_limit: usize) -> SelectConfig {
        SelectConfig::new(rate_limit)
            .with_workers(2)
            .with_alphabet(Alphabet::new("abz"))
    }

    fn guesses(texts: &[&str]) -> Vec<String> {
        texts.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn gains_are_marginal_in_list_order() {
        let result =
            evaluate_guesses(&population(), &guesses(&["aaaaab", "aaaaaa", "zzzzzz"]), &config(3))
                .unwrap();

        let gains: Vec<u64> = result.contributions.iter().map(|c| c.gain).collect();
        assert_eq!(gains, vec![150, 0, 10]);

        let exact: Vec<u64> = result.contributions.iter().map(|c| c.exact).collect();
        assert_eq!(exact, vec![50, 100, 10]);

        assert!((result.success.fuzzy - 1.0).abs() < 1e-12);
        assert!((result.success.exact - 1.0).abs() < 1e-12);
    }

    #[test]
    fn list_is_truncated_to_rate_limit() {
        let result =
            evaluate_guesses(&population(), &guesses(&["zzzzzz", "aaaaaa"]), &config(1)).unwrap();

        assert_eq!(result.guesses, 1);
        assert_eq!(result.contributions.len(), 1);
        assert!((result.success.fuzzy - 10.0 / 160.0).abs() < 1e-12);
        // Naive baseline with one guess is the top target
        assert!((result.success.naive - 100.0 / 160.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_guesses_contribute_nothing() {
        let result = evaluate_guesses(&population(), &guesses(&["qqqqqqqq"]), &config(5)).unwrap();

        let contribution = &result.contributions[0];
        assert_eq!(contribution.exact, 0);
        assert_eq!(contribution.gain, 0);
        assert_eq!(contribution.ball_size, 0);
    }
}
