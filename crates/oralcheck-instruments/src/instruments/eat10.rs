use crate::error::ScoringError;
use crate::measurement::{EAT10_QUESTIONS, EAT10_RESPONSE_RANGE, MeasurementReading, Method};
use crate::scoring::{Question, ScoreEntry, ScoreRange, ScoreType, Section};
use crate::{Instrument, ordered_scores};

/// EAT-10: Eating Assessment Tool.
/// 10 items, each rated 0–4. Total 0–40; 3 or more suggests dysphagia.
pub struct Eat10;

impl Instrument for Eat10 {
    fn id(&self) -> &str {
        "eat10"
    }

    fn name(&self) -> &str {
        "EAT-10"
    }

    fn method(&self) -> Method {
        Method::Eat10
    }

    fn sections(&self) -> &[Section] {
        static SECTIONS: std::sync::LazyLock<Vec<Section>> = std::sync::LazyLock::new(|| {
            let items = [
                ("choking", "I choke when I swallow."),
                ("food_stuck", "Food feels stuck in my throat."),
                ("drooling", "I drool during meals."),
                ("food_spills", "Food spills out of my mouth."),
                ("saliva", "Swallowing saliva is difficult."),
                ("solids", "Swallowing solid food is difficult."),
                ("pills", "Swallowing pills is difficult."),
                ("painful", "Swallowing is painful."),
                ("coughing", "I cough when I eat or drink."),
                ("hoarse_voice", "My voice is hoarse after swallowing."),
            ];

            let questions: Vec<Question> = items
                .iter()
                .map(|(id, text)| Question {
                    id: id.to_string(),
                    text: text.to_string(),
                    score_type: ScoreType::Rating,
                    range: EAT10_RESPONSE_RANGE,
                    description: None,
                })
                .collect();

            vec![Section {
                id: "eat10_items".to_string(),
                name: "EAT-10 Items".to_string(),
                questions,
                total_range: Some(ScoreRange::integer(0.0, 40.0)),
                description: Some("0: no problem ... 4: severe problem".to_string()),
            }]
        });
        &SECTIONS
    }

    fn build_reading(&self, scores: &[ScoreEntry]) -> Result<MeasurementReading, ScoringError> {
        let ordered = ordered_scores(self, scores)?;
        let responses: [u8; EAT10_QUESTIONS] =
            ordered.try_into().map_err(|_| ScoringError::InvalidReading {
                method: self.method(),
                reason: format!("expected {EAT10_QUESTIONS} responses"),
            })?;
        Ok(MeasurementReading::Eat10 { responses })
    }
}
