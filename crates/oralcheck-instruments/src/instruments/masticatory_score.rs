use crate::error::ScoringError;
use crate::measurement::{MASTICATORY_SCORE_RANGE, MeasurementReading, Method};
use crate::scoring::{Question, ScoreEntry, ScoreType, Section};
use crate::{Instrument, ordered_scores};

/// Masticatory efficiency score method: a test gummy is chewed 30 times and
/// the fragments are matched against a 0–5 visual scale.
pub struct MasticatoryScoreScale;

impl Instrument for MasticatoryScoreScale {
    fn id(&self) -> &str {
        "masticatory_score"
    }

    fn name(&self) -> &str {
        "Masticatory Efficiency Score"
    }

    fn method(&self) -> Method {
        Method::MasticatoryScore
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            vec![Section {
                id: "masticatory_score".to_string(),
                name: "Visual scale".to_string(),
                questions: vec![Question {
                    id: "gummy_score".to_string(),
                    text: "Fragmentation of the test gummy".to_string(),
                    score_type: ScoreType::Ordinal,
                    range: MASTICATORY_SCORE_RANGE,
                    description: Some(
                        "0: not crushed, 1: barely crushed, 2: crushed, 3: about half crushed, \
                         4: mostly crushed, 5: fully crushed"
                            .to_string(),
                    ),
                }],
                total_range: None,
                description: None,
            }]
        });
        &SECTIONS
    }

    fn build_reading(&self, scores: &[ScoreEntry]) -> Result<MeasurementReading, ScoringError> {
        let ordered = ordered_scores(self, scores)?;
        match ordered.as_slice() {
            [score] => Ok(MeasurementReading::MasticatoryScore { score: *score }),
            _ => Err(ScoringError::InvalidReading {
                method: self.method(),
                reason: "expected a single score".to_string(),
            }),
        }
    }
}
