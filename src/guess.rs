//! Scores a submitted name against the current answer.

use serde::{Deserialize, Serialize};

use crate::catalog::{normalize_name, CityCatalog, CityRecord};
use crate::geo::{self, CompassPoint};
use crate::session::Guess;

/// Which way the answer lies relative to the guessed value. `Unknown` means
/// one side of the comparison was missing from the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hint {
    Higher,
    Lower,
    Equal,
    Unknown,
}

impl Hint {
    fn toward_answer<T: PartialOrd>(guessed: Option<T>, answer: Option<T>) -> Self {
        match (guessed, answer) {
            (Some(g), Some(a)) if g < a => Hint::Higher,
            (Some(g), Some(a)) if g > a => Hint::Lower,
            (Some(_), Some(_)) => Hint::Equal,
            _ => Hint::Unknown,
        }
    }
}

/// Structured feedback for one accepted guess. Distance and direction run
/// from the guessed city toward the answer and are present whenever both
/// cities carry usable coordinates, winning guesses included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub population: Hint,
    pub area: Hint,
    pub distance_miles: Option<f64>,
    pub direction: Option<CompassPoint>,
    pub is_correct: bool,
}

#[derive(Debug, Clone)]
pub enum EvaluationOutcome {
    /// The name was already guessed this round.
    Duplicate { name: String },
    /// The name is not in the closed vocabulary.
    UnknownCity { input: String },
    Accepted {
        record: CityRecord,
        comparison: Comparison,
    },
}

/// Evaluates a raw submission against the answer. The duplicate check runs
/// first; history only ever holds accepted guesses, so a repeated invalid
/// name keeps reporting `UnknownCity`.
pub fn evaluate(
    raw_input: &str,
    catalog: &CityCatalog,
    answer: &CityRecord,
    history: &[Guess],
) -> EvaluationOutcome {
    let normalized = normalize_name(raw_input);

    if let Some(prior) = history
        .iter()
        .find(|guess| normalize_name(&guess.city_name) == normalized)
    {
        return EvaluationOutcome::Duplicate {
            name: prior.city_name.clone(),
        };
    }

    let Some(record) = catalog.lookup(raw_input) else {
        return EvaluationOutcome::UnknownCity {
            input: raw_input.trim().to_string(),
        };
    };

    EvaluationOutcome::Accepted {
        record: record.clone(),
        comparison: compare(record, answer),
    }
}

/// Compares a guessed record to the answer. Hints point toward where the
/// answer lies, not at the guessed value itself.
pub fn compare(guessed: &CityRecord, answer: &CityRecord) -> Comparison {
    let (distance_miles, direction) = match (guessed.coordinates(), answer.coordinates()) {
        (Some((glat, glon)), Some((alat, alon))) => {
            let distance = geo::distance_miles(glat, glon, alat, alon);
            let bearing = geo::bearing_degrees(glat, glon, alat, alon);
            (Some(distance), Some(CompassPoint::from_bearing(bearing)))
        }
        _ => (None, None),
    };

    Comparison {
        population: Hint::toward_answer(guessed.population_total, answer.population_total),
        area: Hint::toward_answer(guessed.area_total_sq_mi, answer.area_total_sq_mi),
        distance_miles,
        direction,
        is_correct: normalize_name(&guessed.name) == normalize_name(&answer.name),
    }
}
