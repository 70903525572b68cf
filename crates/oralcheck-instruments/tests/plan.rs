use jiff::civil::date;

use oralcheck_core::models::directive::Directive;
use oralcheck_core::models::item::ItemId;
use oralcheck_instruments::assessment::Assessment;
use oralcheck_instruments::error::ScoringError;
use oralcheck_instruments::measurement::MeasurementReading;
use oralcheck_instruments::plan::derive_defaults;

#[test]
fn derivation_requires_finalized_assessment() {
    let assessment = Assessment::start("P002", date(2026, 10, 19)).unwrap();
    assert!(matches!(
        derive_defaults(&assessment),
        Err(ScoringError::AssessmentNotFinalized)
    ));
}

#[test]
fn derivation_covers_all_seven_items() {
    let mut assessment = Assessment::start("P002", date(2026, 10, 19)).unwrap();
    assessment
        .record_item(
            ItemId::OralHygiene,
            &MeasurementReading::TongueCoating { scores: [2; 9] },
        )
        .unwrap();
    assessment
        .record_item(
            ItemId::OralDryness,
            &MeasurementReading::MucosalMoisture { value: 29.5 },
        )
        .unwrap();
    assessment
        .record_item(
            ItemId::BiteForce,
            &MeasurementReading::RemainingTeeth { count: 24 },
        )
        .unwrap();
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);

    let defaults = derive_defaults(&assessment).unwrap();
    let directives: Vec<Directive> = ItemId::ALL.iter().map(|item| defaults[item]).collect();
    assert_eq!(
        directives,
        vec![
            Directive::Improve,
            Directive::Maintain,
            Directive::Maintain,
            Directive::Unset,
            Directive::Unset,
            Directive::Unset,
            Directive::Unset,
        ]
    );
}

#[test]
fn derivation_is_reproducible() {
    let mut assessment = Assessment::start("P003", date(2026, 10, 19)).unwrap();
    assessment
        .record_item(
            ItemId::Mastication,
            &MeasurementReading::MasticatoryScore { score: 1 },
        )
        .unwrap();
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);
    assert_eq!(
        derive_defaults(&assessment).unwrap(),
        derive_defaults(&assessment).unwrap()
    );
}
