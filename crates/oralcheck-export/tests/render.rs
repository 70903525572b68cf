use std::collections::BTreeMap;

use jiff::civil::date;

use oralcheck_core::models::directive::Directive;
use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::management_plan::ManagementPlan;
use oralcheck_core::models::patient::{Gender, NewPatient, Patient};
use oralcheck_export::render::render_report;
use oralcheck_instruments::assessment::Assessment;
use oralcheck_instruments::measurement::MeasurementReading;
use oralcheck_instruments::plan::derive_defaults;

fn patient() -> Patient {
    NewPatient {
        chart_number: "P001".to_string(),
        name: "Hanako Sato".to_string(),
        name_kana: None,
        birthdate: Some(date(1950, 11, 1)),
        gender: Gender::Female,
        phone: None,
        address: None,
    }
    .into_patient(jiff::Timestamp::UNIX_EPOCH)
    .unwrap()
}

fn screened(patient: &Patient) -> Assessment {
    let mut assessment = Assessment::start(&patient.id.to_string(), date(2026, 10, 19)).unwrap();
    assessment
        .record_item(
            ItemId::BiteForce,
            &MeasurementReading::BiteForceSensor { newtons: 300.0 },
        )
        .unwrap();
    assessment
        .record_item(
            ItemId::TonguePressure,
            &MeasurementReading::TonguePressure { kpa: 35.0 },
        )
        .unwrap();
    assessment
}

#[test]
fn report_lists_items_and_result() {
    let patient = patient();
    let mut assessment = screened(&patient);
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);

    let report = render_report(&patient, &assessment, None).unwrap();
    assert!(report.contains("Hanako Sato (P001)"));
    // birthday in November not yet reached on the assessment date
    assert!(report.contains("Age:            75"));
    assert!(report.contains("3. Reduced bite force: 300 N  [affected: bite force below 350 N]"));
    assert!(report.contains("5. Reduced tongue pressure: 35 kPa\n"));
    assert!(report.contains("1. Poor oral hygiene: not measured"));
    assert!(report.contains("Affected items: 1 of 7"));
    assert!(report.contains("No oral hypofunction"));
    assert!(!report.contains("(in progress)"));
    assert!(!report.contains("Management plan"));
}

#[test]
fn report_marks_in_progress_assessment() {
    let patient = patient();
    let assessment = screened(&patient);
    let report = render_report(&patient, &assessment, None).unwrap();
    assert!(report.contains("2026-10-19 (in progress)"));
}

#[test]
fn report_includes_plan_directives() {
    let patient = patient();
    let mut assessment = screened(&patient);
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);

    let mut plan = ManagementPlan::from_defaults(
        patient.id,
        assessment.id(),
        date(2026, 10, 20),
        derive_defaults(&assessment).unwrap(),
        jiff::Timestamp::UNIX_EPOCH,
    );
    plan.apply_overrides(&BTreeMap::from([(ItemId::Swallowing, Directive::NoIssue)]));
    plan.notes = Some("Tongue exercises twice daily".to_string());

    let report = render_report(&patient, &assessment, Some(&plan)).unwrap();
    assert!(report.contains("Management plan (2026-10-20)"));
    assert!(report.contains("3. Reduced bite force: improve"));
    assert!(report.contains("5. Reduced tongue pressure: maintain"));
    assert!(report.contains("7. Deterioration of swallowing function: no issue"));
    assert!(report.contains("Notes: Tongue exercises twice daily"));
}
