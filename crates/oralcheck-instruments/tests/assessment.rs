use jiff::civil::date;

use oralcheck_core::models::directive::Directive;
use oralcheck_core::models::item::ItemId;
use oralcheck_instruments::assessment::{Assessment, LifecycleState, diagnosis_for};
use oralcheck_instruments::error::ScoringError;
use oralcheck_instruments::measurement::MeasurementReading;
use oralcheck_instruments::plan::derive_defaults;

fn affected_reading(item: ItemId) -> MeasurementReading {
    match item {
        ItemId::OralHygiene => MeasurementReading::TongueCoating { scores: [2; 9] },
        ItemId::OralDryness => MeasurementReading::MucosalMoisture { value: 20.0 },
        ItemId::BiteForce => MeasurementReading::BiteForceSensor { newtons: 300.0 },
        ItemId::OralMotor => MeasurementReading::Diadochokinesis {
            pa: 5.0,
            ta: 5.0,
            ka: 5.0,
        },
        ItemId::TonguePressure => MeasurementReading::TonguePressure { kpa: 20.0 },
        ItemId::Mastication => MeasurementReading::GlucoseElution { mg_per_dl: 80.0 },
        ItemId::Swallowing => MeasurementReading::Eat10 { responses: [1; 10] },
    }
}

fn healthy_reading(item: ItemId) -> MeasurementReading {
    match item {
        ItemId::OralHygiene => MeasurementReading::TongueCoating { scores: [0; 9] },
        ItemId::OralDryness => MeasurementReading::SalivaVolume { grams: 3.5 },
        ItemId::BiteForce => MeasurementReading::RemainingTeeth { count: 28 },
        ItemId::OralMotor => MeasurementReading::Diadochokinesis {
            pa: 7.0,
            ta: 7.0,
            ka: 7.0,
        },
        ItemId::TonguePressure => MeasurementReading::TonguePressure { kpa: 35.0 },
        ItemId::Mastication => MeasurementReading::MasticatoryScore { score: 4 },
        ItemId::Swallowing => MeasurementReading::Eat10 { responses: [0; 10] },
    }
}

fn started() -> Assessment {
    Assessment::start("P001", date(2026, 10, 19)).unwrap()
}

#[test]
fn start_requires_a_patient() {
    assert!(matches!(
        Assessment::start("", date(2026, 10, 19)),
        Err(ScoringError::NoPatientSelected)
    ));
    assert!(matches!(
        Assessment::start("   ", date(2026, 10, 19)),
        Err(ScoringError::NoPatientSelected)
    ));
}

#[test]
fn new_assessment_is_in_progress_and_empty() {
    let assessment = started();
    assert_eq!(assessment.state(), LifecycleState::InProgress);
    assert_eq!(assessment.patient_id(), "P001");
    assert_eq!(assessment.progress().recorded, 0);
    assert_eq!(assessment.progress().total, 7);
    assert_eq!(assessment.affected_count(), 0);
    assert!(!assessment.diagnosis());
}

#[test]
fn diagnosis_cutoff_at_three_affected_items() {
    for affected in 0..=7usize {
        let mut assessment = started();
        for (index, item) in ItemId::ALL.iter().enumerate() {
            let reading = if index < affected {
                affected_reading(*item)
            } else {
                healthy_reading(*item)
            };
            assessment.record_item(*item, &reading).unwrap();
        }
        assert_eq!(usize::from(assessment.affected_count()), affected);
        assert_eq!(assessment.diagnosis(), affected >= 3, "{affected} affected");
        assert_eq!(assessment.diagnosis(), diagnosis_for(affected as u8));
    }
}

#[test]
fn rerecording_an_item_keeps_only_latest_verdict() {
    let mut assessment = started();
    assessment
        .record_item(ItemId::BiteForce, &affected_reading(ItemId::BiteForce))
        .unwrap();
    assert_eq!(assessment.affected_count(), 1);

    assessment
        .record_item(ItemId::BiteForce, &healthy_reading(ItemId::BiteForce))
        .unwrap();
    assert_eq!(assessment.progress().recorded, 1);
    assert_eq!(assessment.affected_count(), 0);
    assert_eq!(assessment.state(), LifecycleState::InProgress);

    let verdict = assessment.verdict(ItemId::BiteForce).unwrap();
    assert_eq!(verdict.reading, MeasurementReading::RemainingTeeth { count: 28 });
}

#[test]
fn invalid_reading_leaves_assessment_unchanged() {
    let mut assessment = started();
    let err = assessment
        .record_item(
            ItemId::Swallowing,
            &MeasurementReading::BiteForceSensor { newtons: 100.0 },
        )
        .unwrap_err();
    assert!(matches!(err, ScoringError::UnknownMeasurementMethod { .. }));
    assert_eq!(assessment.progress().recorded, 0);
}

#[test]
fn finalized_assessment_rejects_new_items() {
    let mut assessment = started();
    for item in [ItemId::OralHygiene, ItemId::OralDryness, ItemId::BiteForce] {
        assessment.record_item(item, &affected_reading(item)).unwrap();
    }
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);
    assert!(assessment.is_finalized());
    assert_eq!(assessment.finalized_at(), Some(jiff::Timestamp::UNIX_EPOCH));

    let err = assessment
        .record_item(ItemId::Swallowing, &affected_reading(ItemId::Swallowing))
        .unwrap_err();
    assert!(matches!(err, ScoringError::AssessmentAlreadyFinalized));

    let err = assessment
        .record_item(ItemId::BiteForce, &healthy_reading(ItemId::BiteForce))
        .unwrap_err();
    assert!(matches!(err, ScoringError::AssessmentAlreadyFinalized));

    assert_eq!(assessment.affected_count(), 3);
    assert!(assessment.diagnosis());
    assert_eq!(assessment.progress().recorded, 3);
}

#[test]
fn finalize_is_idempotent() {
    let mut assessment = started();
    assessment
        .record_item(ItemId::TonguePressure, &healthy_reading(ItemId::TonguePressure))
        .unwrap();
    let first = assessment.finalize(jiff::Timestamp::UNIX_EPOCH).clone();
    let later = jiff::Timestamp::from_second(86_400).unwrap();
    let second = assessment.finalize(later).clone();
    assert_eq!(first, second);
    assert_eq!(second.finalized_at(), Some(jiff::Timestamp::UNIX_EPOCH));
}

#[test]
fn partial_assessment_can_be_finalized() {
    let mut assessment = started();
    for item in [ItemId::OralHygiene, ItemId::OralDryness, ItemId::BiteForce, ItemId::OralMotor] {
        assessment.record_item(item, &affected_reading(item)).unwrap();
    }
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);
    assert_eq!(assessment.progress().recorded, 4);
    assert!(!assessment.progress().is_complete());
    assert_eq!(assessment.affected_count(), 4);
    assert!(assessment.diagnosis());
}

#[test]
fn finalized_assessment_round_trips_through_json() {
    let mut assessment = started();
    assessment
        .record_item(ItemId::OralMotor, &affected_reading(ItemId::OralMotor))
        .unwrap();
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);

    let json = serde_json::to_string(&assessment).unwrap();
    let restored: Assessment = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, assessment);
    assert!(restored.is_finalized());
}

#[test]
fn end_to_end_screening() {
    let mut assessment = Assessment::start("P001", date(2026, 10, 19)).unwrap();

    let bite = assessment
        .record_item(
            ItemId::BiteForce,
            &MeasurementReading::BiteForceSensor { newtons: 300.0 },
        )
        .unwrap();
    assert!(bite.affected);

    let pressure = assessment
        .record_item(
            ItemId::TonguePressure,
            &MeasurementReading::TonguePressure { kpa: 35.0 },
        )
        .unwrap();
    assert!(!pressure.affected);

    let swallowing = assessment
        .record_item(
            ItemId::Swallowing,
            &MeasurementReading::Eat10 {
                responses: [2, 1, 0, 0, 1, 0, 0, 0, 1, 0],
            },
        )
        .unwrap();
    assert!(swallowing.affected);

    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);
    assert_eq!(assessment.affected_count(), 2);
    assert!(!assessment.diagnosis());
    assert_eq!(
        assessment.affected_items(),
        vec![ItemId::BiteForce, ItemId::Swallowing]
    );

    let plan = derive_defaults(&assessment).unwrap();
    assert_eq!(plan[&ItemId::BiteForce], Directive::Improve);
    assert_eq!(plan[&ItemId::TonguePressure], Directive::Maintain);
    assert_eq!(plan[&ItemId::Swallowing], Directive::Improve);
    for item in [
        ItemId::OralHygiene,
        ItemId::OralDryness,
        ItemId::OralMotor,
        ItemId::Mastication,
    ] {
        assert_eq!(plan[&item], Directive::Unset);
    }
}
