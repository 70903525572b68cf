use jiff::civil::date;

use oralcheck_core::models::item::ItemId;
use oralcheck_core::models::patient::{Gender, NewPatient, Patient};
use oralcheck_export::csv::assessments_to_csv;
use oralcheck_instruments::assessment::Assessment;
use oralcheck_instruments::measurement::MeasurementReading;

fn patient(chart_number: &str, name: &str) -> Patient {
    NewPatient {
        chart_number: chart_number.to_string(),
        name: name.to_string(),
        name_kana: None,
        birthdate: Some(date(1950, 4, 1)),
        gender: Gender::Female,
        phone: None,
        address: None,
    }
    .into_patient(jiff::Timestamp::UNIX_EPOCH)
    .unwrap()
}

#[test]
fn header_lists_every_item_in_order() {
    let csv = assessments_to_csv(&[]).unwrap();
    let header = csv.lines().next().unwrap();
    let columns: Vec<&str> = header.split(',').collect();
    assert_eq!(columns.len(), 4 + 7 * 3 + 2);
    assert_eq!(columns[0], "chart_number");
    assert_eq!(columns[4], "oral_hygiene_method");
    assert_eq!(columns[24], "swallowing_affected");
    assert_eq!(columns[26], "diagnosis");
}

#[test]
fn row_carries_verdicts_and_leaves_unrecorded_items_empty() {
    let patient = patient("P001", "Hanako Sato");
    let mut assessment = Assessment::start(&patient.id.to_string(), date(2026, 10, 19)).unwrap();
    assessment
        .record_item(
            ItemId::BiteForce,
            &MeasurementReading::BiteForceSensor { newtons: 300.0 },
        )
        .unwrap();
    assessment.finalize(jiff::Timestamp::UNIX_EPOCH);

    let csv = assessments_to_csv(&[(patient, assessment)]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);

    let fields: Vec<&str> = lines[1].split(',').collect();
    assert_eq!(fields[0], "P001");
    assert_eq!(fields[1], "Hanako Sato");
    assert_eq!(fields[2], "2026-10-19");
    assert_eq!(fields[3], "finalized");
    // oral hygiene was not measured
    assert_eq!(&fields[4..7], ["", "", ""]);
    // bite force is the third item
    assert_eq!(&fields[10..13], ["bite_force_sensor", "300 N", "true"]);
    assert_eq!(fields[25], "1");
    assert_eq!(fields[26], "false");
}

#[test]
fn fields_with_commas_are_quoted() {
    let patient = patient("P002", "Sato, Hanako");
    let assessment = Assessment::start(&patient.id.to_string(), date(2026, 10, 19)).unwrap();
    let csv = assessments_to_csv(&[(patient, assessment)]).unwrap();
    assert!(csv.contains("\"Sato, Hanako\""));
    assert!(csv.contains("in_progress"));
}
