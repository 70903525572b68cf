//! Measurement value types for the seven screening items.
//!
//! A [`MeasurementReading`] is the raw result of one measurement method. It is
//! built once from clinician input and never mutated; a correction is a new
//! reading recorded over the old one.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use oralcheck_core::models::item::ItemId;

use crate::error::ScoringError;
use crate::scoring::ScoreRange;

pub const TONGUE_REGIONS: usize = 9;
pub const EAT10_QUESTIONS: usize = 10;

/// Each tongue region is scored 0 (none), 1 (thin coating), or 2 (thick coating).
pub const TONGUE_REGION_RANGE: ScoreRange = ScoreRange::integer(0.0, 2.0);
/// Each EAT-10 answer runs from 0 (no problem) to 4 (severe problem).
pub const EAT10_RESPONSE_RANGE: ScoreRange = ScoreRange::integer(0.0, 4.0);
pub const MASTICATORY_SCORE_RANGE: ScoreRange = ScoreRange::integer(0.0, 5.0);
pub const REMAINING_TEETH_RANGE: ScoreRange = ScoreRange::integer(0.0, 32.0);

/// Highest possible tongue-coating sum (9 regions x 2).
const TONGUE_COATING_MAX: u32 = 18;

/// Measurement technique. Each method belongs to exactly one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Method {
    TongueCoating,
    MucosalMoisture,
    SalivaVolume,
    BiteForceSensor,
    RemainingTeeth,
    Diadochokinesis,
    TonguePressure,
    GlucoseElution,
    MasticatoryScore,
    Eat10,
}

impl Method {
    pub const ALL: [Method; 10] = [
        Method::TongueCoating,
        Method::MucosalMoisture,
        Method::SalivaVolume,
        Method::BiteForceSensor,
        Method::RemainingTeeth,
        Method::Diadochokinesis,
        Method::TonguePressure,
        Method::GlucoseElution,
        Method::MasticatoryScore,
        Method::Eat10,
    ];

    pub fn item(self) -> ItemId {
        match self {
            Method::TongueCoating => ItemId::OralHygiene,
            Method::MucosalMoisture | Method::SalivaVolume => ItemId::OralDryness,
            Method::BiteForceSensor | Method::RemainingTeeth => ItemId::BiteForce,
            Method::Diadochokinesis => ItemId::OralMotor,
            Method::TonguePressure => ItemId::TonguePressure,
            Method::GlucoseElution | Method::MasticatoryScore => ItemId::Mastication,
            Method::Eat10 => ItemId::Swallowing,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Method::TongueCoating => "tongue_coating",
            Method::MucosalMoisture => "mucosal_moisture",
            Method::SalivaVolume => "saliva_volume",
            Method::BiteForceSensor => "bite_force_sensor",
            Method::RemainingTeeth => "remaining_teeth",
            Method::Diadochokinesis => "diadochokinesis",
            Method::TonguePressure => "tongue_pressure",
            Method::GlucoseElution => "glucose_elution",
            Method::MasticatoryScore => "masticatory_score",
            Method::Eat10 => "eat10",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw result of one measurement, tagged by method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "method", rename_all = "snake_case")]
#[ts(export)]
pub enum MeasurementReading {
    /// Tongue coating scores for the 9 regions of the tongue dorsum.
    TongueCoating { scores: [u8; TONGUE_REGIONS] },
    /// Oral moisture checker reading.
    MucosalMoisture { value: f64 },
    /// Saxon test: gauze weight gain over a 2-minute chew.
    SalivaVolume { grams: f64 },
    BiteForceSensor { newtons: f64 },
    RemainingTeeth { count: u8 },
    /// Syllable repetition rates, per second.
    Diadochokinesis { pa: f64, ta: f64, ka: f64 },
    TonguePressure { kpa: f64 },
    GlucoseElution { mg_per_dl: f64 },
    MasticatoryScore { score: u8 },
    /// EAT-10 answers in questionnaire order.
    Eat10 { responses: [u8; EAT10_QUESTIONS] },
}

/// Tongue Coating Index: percentage of the 18-point maximum, rounded half-up.
pub fn tongue_coating_index(scores: &[u8; TONGUE_REGIONS]) -> u32 {
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    // floor(sum * 100 / 18 + 1/2) without leaving integer arithmetic
    (sum * 200 + TONGUE_COATING_MAX) / (2 * TONGUE_COATING_MAX)
}

pub fn eat10_total(responses: &[u8; EAT10_QUESTIONS]) -> u32 {
    responses.iter().map(|r| u32::from(*r)).sum()
}

impl MeasurementReading {
    pub fn method(&self) -> Method {
        match self {
            MeasurementReading::TongueCoating { .. } => Method::TongueCoating,
            MeasurementReading::MucosalMoisture { .. } => Method::MucosalMoisture,
            MeasurementReading::SalivaVolume { .. } => Method::SalivaVolume,
            MeasurementReading::BiteForceSensor { .. } => Method::BiteForceSensor,
            MeasurementReading::RemainingTeeth { .. } => Method::RemainingTeeth,
            MeasurementReading::Diadochokinesis { .. } => Method::Diadochokinesis,
            MeasurementReading::TonguePressure { .. } => Method::TonguePressure,
            MeasurementReading::GlucoseElution { .. } => Method::GlucoseElution,
            MeasurementReading::MasticatoryScore { .. } => Method::MasticatoryScore,
            MeasurementReading::Eat10 { .. } => Method::Eat10,
        }
    }

    /// The value(s) compared against the method's threshold.
    ///
    /// Derived readings (tongue coating, EAT-10) yield their computed score;
    /// diadochokinesis yields all three syllable rates.
    pub fn compared_values(&self) -> Vec<f64> {
        match self {
            MeasurementReading::TongueCoating { scores } => {
                vec![f64::from(tongue_coating_index(scores))]
            }
            MeasurementReading::MucosalMoisture { value } => vec![*value],
            MeasurementReading::SalivaVolume { grams } => vec![*grams],
            MeasurementReading::BiteForceSensor { newtons } => vec![*newtons],
            MeasurementReading::RemainingTeeth { count } => vec![f64::from(*count)],
            MeasurementReading::Diadochokinesis { pa, ta, ka } => vec![*pa, *ta, *ka],
            MeasurementReading::TonguePressure { kpa } => vec![*kpa],
            MeasurementReading::GlucoseElution { mg_per_dl } => vec![*mg_per_dl],
            MeasurementReading::MasticatoryScore { score } => vec![f64::from(*score)],
            MeasurementReading::Eat10 { responses } => vec![f64::from(eat10_total(responses))],
        }
    }

    /// Check the reading is structurally possible for its method.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let method = self.method();
        match self {
            MeasurementReading::TongueCoating { scores } => {
                check_scores(method, scores, TONGUE_REGION_RANGE, "region")
            }
            MeasurementReading::Eat10 { responses } => {
                check_scores(method, responses, EAT10_RESPONSE_RANGE, "question")
            }
            MeasurementReading::MasticatoryScore { score } => {
                check_scores(method, &[*score], MASTICATORY_SCORE_RANGE, "score")
            }
            MeasurementReading::RemainingTeeth { count } => {
                check_scores(method, &[*count], REMAINING_TEETH_RANGE, "count")
            }
            _ => {
                for value in self.compared_values() {
                    if !value.is_finite() || value < 0.0 {
                        return Err(ScoringError::InvalidReading {
                            method,
                            reason: format!("{value} is not a finite non-negative number"),
                        });
                    }
                }
                Ok(())
            }
        }
    }

    /// Human-readable value with unit, as shown on result sheets.
    pub fn display(&self) -> String {
        match self {
            MeasurementReading::TongueCoating { scores } => {
                format!("TCI {}%", tongue_coating_index(scores))
            }
            MeasurementReading::MucosalMoisture { value } => format!("{value:.1}"),
            MeasurementReading::SalivaVolume { grams } => format!("{grams} g/2 min"),
            MeasurementReading::BiteForceSensor { newtons } => format!("{newtons} N"),
            MeasurementReading::RemainingTeeth { count } => format!("{count} teeth"),
            MeasurementReading::Diadochokinesis { pa, ta, ka } => {
                format!("pa {pa:.1} / ta {ta:.1} / ka {ka:.1} /s")
            }
            MeasurementReading::TonguePressure { kpa } => format!("{kpa} kPa"),
            MeasurementReading::GlucoseElution { mg_per_dl } => format!("{mg_per_dl} mg/dL"),
            MeasurementReading::MasticatoryScore { score } => format!("score {score}"),
            MeasurementReading::Eat10 { responses } => format!("EAT-10 {}", eat10_total(responses)),
        }
    }
}

fn check_scores(
    method: Method,
    scores: &[u8],
    range: ScoreRange,
    label: &str,
) -> Result<(), ScoringError> {
    for (index, score) in scores.iter().enumerate() {
        if !range.contains(f64::from(*score)) {
            return Err(ScoringError::InvalidReading {
                method,
                reason: format!(
                    "{label} {} value {score} is outside range [{}, {}]",
                    index + 1,
                    range.min,
                    range.max
                ),
            });
        }
    }
    Ok(())
}
