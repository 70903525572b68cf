use crate::error::ScoringError;
use crate::measurement::{MeasurementReading, Method, TONGUE_REGION_RANGE, TONGUE_REGIONS};
use crate::scoring::{Question, ScoreEntry, ScoreRange, ScoreType, Section};
use crate::{Instrument, ordered_scores};

/// Tongue Coating Index (TCI).
/// The tongue dorsum is divided into a 3x3 grid; each region is scored 0–2.
/// Index = total / 18 x 100.
pub struct TongueCoatingIndex;

impl Instrument for TongueCoatingIndex {
    fn id(&self) -> &str {
        "tci"
    }

    fn name(&self) -> &str {
        "Tongue Coating Index"
    }

    fn method(&self) -> Method {
        Method::TongueCoating
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            let regions = [
                ("posterior_left", "Posterior left"),
                ("posterior_center", "Posterior center"),
                ("posterior_right", "Posterior right"),
                ("middle_left", "Middle left"),
                ("middle_center", "Middle center"),
                ("middle_right", "Middle right"),
                ("anterior_left", "Anterior left"),
                ("anterior_center", "Anterior center"),
                ("anterior_right", "Anterior right"),
            ];

            let questions: Vec<Question> = regions
                .iter()
                .map(|(id, text)| Question {
                    id: id.to_string(),
                    text: text.to_string(),
                    score_type: ScoreType::Rating,
                    range: TONGUE_REGION_RANGE,
                    description: None,
                })
                .collect();

            vec![Section {
                id: "tci_regions".to_string(),
                name: "Tongue regions".to_string(),
                questions,
                total_range: Some(ScoreRange::integer(0.0, 18.0)),
                description: Some(
                    "0: no coating, 1: thin coating (papillae visible), 2: thick coating"
                        .to_string(),
                ),
            }]
        });
        &SECTIONS
    }

    fn build_reading(&self, scores: &[ScoreEntry]) -> Result<MeasurementReading, ScoringError> {
        let ordered = ordered_scores(self, scores)?;
        let scores: [u8; TONGUE_REGIONS] =
            ordered.try_into().map_err(|_| ScoringError::InvalidReading {
                method: self.method(),
                reason: format!("expected {TONGUE_REGIONS} region scores"),
            })?;
        Ok(MeasurementReading::TongueCoating { scores })
    }
}
