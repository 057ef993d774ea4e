//! Round state: the secret answer, guess history, and win detection.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{CityCatalog, CityRecord};
use crate::guess::{self, Comparison, EvaluationOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Active,
    Won,
}

/// One accepted guess, in submission order.
#[derive(Debug, Clone, Serialize)]
pub struct Guess {
    pub city_name: String,
    pub record: CityRecord,
    pub comparison: Comparison,
}

/// Guessing after a win is a caller bug; the round must be reset first.
#[derive(Debug, Error)]
#[error("round already won; start a new round before guessing")]
pub struct SessionClosed;

/// What a submission did to the round.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Duplicate { name: String },
    UnknownCity { input: String },
    Continue { comparison: Comparison },
    Win { guess_count: u32, comparison: Comparison },
}

/// Read-only view of the round for presentation layers.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub guess_count: u32,
    pub history: Vec<Guess>,
    pub round_started: DateTime<Utc>,
}

/// Owns the mutable round state and orchestrates catalog + evaluator.
/// All mutation goes through `submit_guess` and `start_new_round`; callers
/// that dispatch concurrently must serialize access (the web adapter wraps
/// the session in a mutex).
pub struct GameSession {
    catalog: CityCatalog,
    rng: ChaCha8Rng,
    answer: CityRecord,
    guess_count: u32,
    history: Vec<Guess>,
    phase: Phase,
    round_started: DateTime<Utc>,
}

impl GameSession {
    /// Draws the first answer from the catalog. The same seed over the same
    /// dataset replays the same sequence of answers.
    pub fn new(catalog: CityCatalog, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let answer = catalog.random_city(&mut rng).clone();
        Self {
            catalog,
            rng,
            answer,
            guess_count: 0,
            history: Vec::new(),
            phase: Phase::Active,
            round_started: Utc::now(),
        }
    }

    /// Runs one submission through the evaluator and applies the resulting
    /// state transition. Rejected submissions leave the round untouched.
    pub fn submit_guess(&mut self, raw_input: &str) -> Result<SubmitOutcome, SessionClosed> {
        if self.phase == Phase::Won {
            return Err(SessionClosed);
        }

        match guess::evaluate(raw_input, &self.catalog, &self.answer, &self.history) {
            EvaluationOutcome::Duplicate { name } => Ok(SubmitOutcome::Duplicate { name }),
            EvaluationOutcome::UnknownCity { input } => Ok(SubmitOutcome::UnknownCity { input }),
            EvaluationOutcome::Accepted { record, comparison } => {
                self.guess_count += 1;
                self.history.push(Guess {
                    city_name: record.name.clone(),
                    record,
                    comparison: comparison.clone(),
                });
                if comparison.is_correct {
                    self.phase = Phase::Won;
                    Ok(SubmitOutcome::Win {
                        guess_count: self.guess_count,
                        comparison,
                    })
                } else {
                    Ok(SubmitOutcome::Continue { comparison })
                }
            }
        }
    }

    /// Draws a fresh answer and clears the round. Repeats across rounds are
    /// allowed; the draw is independent of the previous answer.
    pub fn start_new_round(&mut self) {
        self.answer = self.catalog.random_city(&mut self.rng).clone();
        self.guess_count = 0;
        self.history.clear();
        self.phase = Phase::Active;
        self.round_started = Utc::now();
    }

    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        self.catalog.names_with_prefix(prefix)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            guess_count: self.guess_count,
            history: self.history.clone(),
            round_started: self.round_started,
        }
    }

    pub fn catalog(&self) -> &CityCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn guess_count(&self) -> u32 {
        self.guess_count
    }

    pub fn history(&self) -> &[Guess] {
        &self.history
    }

    /// The current secret, for tests and the terminal 'reveal' command.
    pub fn answer(&self) -> &CityRecord {
        &self.answer
    }

    pub fn round_started(&self) -> DateTime<Utc> {
        self.round_started
    }
}
