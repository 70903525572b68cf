use jiff::civil::date;

use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::patient::{Gender, NewPatient, Patient, PatientStatus};
use oralcheck_export::stats::{compute, latest_finalized, patient_status};
use oralcheck_instruments::assessment::Assessment;
use oralcheck_instruments::measurement::MeasurementReading;

fn patient(chart_number: &str) -> Patient {
    NewPatient {
        chart_number: chart_number.to_string(),
        name: format!("Patient {chart_number}"),
        name_kana: None,
        birthdate: None,
        gender: Gender::Unspecified,
        phone: None,
        address: None,
    }
    .into_patient(jiff::Timestamp::UNIX_EPOCH)
    .unwrap()
}

/// Finalized assessment with `affected` items crossing their thresholds.
fn finalized(patient: &Patient, on: jiff::civil::Date, affected: usize) -> Assessment {
    let mut assessment = Assessment::start(&patient.id.to_string(), on).unwrap();
    let readings = [
        (ItemId::OralDryness, MeasurementReading::MucosalMoisture { value: 20.0 }),
        (ItemId::BiteForce, MeasurementReading::BiteForceSensor { newtons: 200.0 }),
        (ItemId::TonguePressure, MeasurementReading::TonguePressure { kpa: 25.0 }),
    ];
    for (item, reading) in readings.iter().take(affected) {
        assessment.record_item(*item, reading).unwrap();
    }
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);
    assessment
}

#[test]
fn counts_patients_with_any_diagnosed_assessment() {
    let a = patient("P001");
    let b = patient("P002");
    let c = patient("P003");

    let assessments = vec![
        finalized(&a, date(2026, 1, 10), 3),
        finalized(&a, date(2026, 6, 10), 0),
        finalized(&b, date(2026, 2, 1), 2),
        Assessment::start(&c.id.to_string(), date(2026, 3, 1)).unwrap(),
    ];

    let stats = compute(&[a, b, c], &assessments);
    assert_eq!(stats.total_patients, 3);
    assert_eq!(stats.total_assessments, 4);
    assert_eq!(stats.diagnosed_patients, 1);
    assert_eq!(stats.normal_patients, 2);
}

#[test]
fn status_uses_latest_finalized_assessment() {
    let p = patient("P001");
    assert_eq!(patient_status(&[]), PatientStatus::Pending);

    let in_progress = Assessment::start(&p.id.to_string(), date(2026, 9, 1)).unwrap();
    assert_eq!(patient_status(&[in_progress.clone()]), PatientStatus::Pending);

    let older = finalized(&p, date(2026, 1, 10), 3);
    let newer = finalized(&p, date(2026, 6, 10), 1);
    let history = vec![newer.clone(), older, in_progress];

    assert_eq!(latest_finalized(&history).map(Assessment::id), Some(newer.id()));
    assert_eq!(patient_status(&history), PatientStatus::Normal);
}
