pub mod catalog;
pub mod dataset;
pub mod geo;
pub mod guess;
pub mod session;
pub mod web;

pub use catalog::{CityCatalog, CityRecord};
pub use guess::{Comparison, EvaluationOutcome, Hint};
pub use session::{GameSession, Phase, SessionClosed, SubmitOutcome};
