//! oralcheck-instruments
//!
//! Oral hypofunction scoring engine. Pure data and rules with no I/O and no AWS
//! dependency. Defines the measurement types, the clinical threshold table,
//! item evaluation, assessment aggregation and lifecycle, management plan
//! defaults, and the questionnaire instruments used to capture scored items.

pub mod assessment;
pub mod error;
pub mod evaluator;
pub mod instruments;
pub mod measurement;
pub mod plan;
pub mod rules;
pub mod scoring;

use error::ScoringError;
use measurement::{MeasurementReading, Method};
use scoring::{ScoreEntry, Section, ValidationError};

/// Trait implemented by each scored questionnaire or grid.
///
/// An instrument turns per-question scores into one [`MeasurementReading`].
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "eat10", "tci").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "EAT-10").
    fn name(&self) -> &str;

    /// The measurement method this instrument produces readings for.
    fn method(&self) -> Method;

    /// The sections and questions this instrument scores.
    fn sections(&self) -> &[Section];

    /// Validate a set of score entries against this instrument's rules.
    fn validate_scores(&self, scores: &[ScoreEntry]) -> Vec<ValidationError> {
        let all_questions: Vec<_> = self
            .sections()
            .iter()
            .flat_map(|s| &s.questions)
            .collect();

        let mut errors = Vec::new();
        for entry in scores {
            if let Some(question) = all_questions.iter().find(|q| q.id == entry.question_id)
                && !question.range.contains(entry.value)
            {
                errors.push(ValidationError {
                    question_id: entry.question_id.clone(),
                    value: entry.value,
                    expected_range: question.range,
                    score_type: question.score_type,
                    message: format!(
                        "{}: {} score {} is outside range [{}, {}]",
                        self.name(),
                        question.id,
                        entry.value,
                        question.range.min,
                        question.range.max,
                    ),
                });
            }
        }
        errors
    }

    /// Assemble a reading from one score per question.
    fn build_reading(&self, scores: &[ScoreEntry]) -> Result<MeasurementReading, ScoringError>;
}

/// Scores in question order, after range validation.
///
/// Every question must be answered exactly once and no unknown question ids
/// may appear.
pub(crate) fn ordered_scores<I: Instrument + ?Sized>(
    instrument: &I,
    scores: &[ScoreEntry],
) -> Result<Vec<u8>, ScoringError> {
    if let Some(error) = instrument.validate_scores(scores).into_iter().next() {
        return Err(ScoringError::Validation(error));
    }

    let questions: Vec<_> = instrument
        .sections()
        .iter()
        .flat_map(|s| &s.questions)
        .collect();

    if let Some(unknown) = scores
        .iter()
        .find(|e| !questions.iter().any(|q| q.id == e.question_id))
    {
        return Err(ScoringError::InvalidReading {
            method: instrument.method(),
            reason: format!("unknown question '{}'", unknown.question_id),
        });
    }

    let mut ordered = Vec::with_capacity(questions.len());
    for question in questions {
        let mut answers = scores.iter().filter(|e| e.question_id == question.id);
        let (Some(entry), None) = (answers.next(), answers.next()) else {
            return Err(ScoringError::InvalidReading {
                method: instrument.method(),
                reason: format!("question '{}' needs exactly one score", question.id),
            });
        };
        ordered.push(entry.value.round() as u8);
    }
    Ok(ordered)
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::tongue_coating::TongueCoatingIndex),
        Box::new(instruments::eat10::Eat10),
        Box::new(instruments::masticatory_score::MasticatoryScoreScale),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
