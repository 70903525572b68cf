use oralcheck_core::models::item::ItemId;
use oralcheck_instruments::error::ScoringError;
use oralcheck_instruments::evaluator::evaluate;
use oralcheck_instruments::measurement::{MeasurementReading, Method};
use oralcheck_instruments::scoring::ScoreEntry;
use oralcheck_instruments::{Instrument, all_instruments, get_instrument};

fn entries(instrument: &dyn Instrument, values: &[f64]) -> Vec<ScoreEntry> {
    instrument
        .sections()
        .iter()
        .flat_map(|s| &s.questions)
        .zip(values)
        .map(|(q, v)| ScoreEntry {
            question_id: q.id.clone(),
            value: *v,
        })
        .collect()
}

#[test]
fn instruments_are_registered_by_id() {
    let ids: Vec<String> = all_instruments().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec!["tci", "eat10", "masticatory_score"]);
    assert!(get_instrument("eat10").is_some());
    assert!(get_instrument("vineland3").is_none());
}

#[test]
fn instrument_methods_match_rules() {
    for instrument in all_instruments() {
        let questions: usize = instrument.sections().iter().map(|s| s.questions.len()).sum();
        match instrument.method() {
            Method::TongueCoating => assert_eq!(questions, 9),
            Method::Eat10 => assert_eq!(questions, 10),
            Method::MasticatoryScore => assert_eq!(questions, 1),
            other => panic!("unexpected method {other}"),
        }
    }
}

#[test]
fn tongue_grid_builds_reading_in_region_order() {
    let tci = get_instrument("tci").unwrap();
    let scores = entries(tci.as_ref(), &[2.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    let reading = tci.build_reading(&scores).unwrap();
    assert_eq!(
        reading,
        MeasurementReading::TongueCoating {
            scores: [2, 1, 0, 0, 1, 0, 0, 0, 1]
        }
    );
}

#[test]
fn eat10_rejects_out_of_range_answer() {
    let eat10 = get_instrument("eat10").unwrap();
    let scores = entries(eat10.as_ref(), &[0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let errors = eat10.validate_scores(&scores);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].question_id, "drooling");
    assert!(matches!(
        eat10.build_reading(&scores),
        Err(ScoringError::Validation(_))
    ));
}

#[test]
fn eat10_rejects_fractional_answer() {
    let eat10 = get_instrument("eat10").unwrap();
    let scores = entries(eat10.as_ref(), &[0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert!(!eat10.validate_scores(&scores).is_empty());
}

#[test]
fn missing_question_is_rejected() {
    let eat10 = get_instrument("eat10").unwrap();
    let scores = entries(eat10.as_ref(), &[1.0; 9]);
    assert!(matches!(
        eat10.build_reading(&scores),
        Err(ScoringError::InvalidReading { method: Method::Eat10, .. })
    ));
}

#[test]
fn unknown_question_is_rejected() {
    let scale = get_instrument("masticatory_score").unwrap();
    let scores = vec![
        ScoreEntry {
            question_id: "gummy_score".to_string(),
            value: 3.0,
        },
        ScoreEntry {
            question_id: "extra".to_string(),
            value: 1.0,
        },
    ];
    assert!(matches!(
        scale.build_reading(&scores),
        Err(ScoringError::InvalidReading { .. })
    ));
}

#[test]
fn masticatory_scale_builds_single_score() {
    let scale = get_instrument("masticatory_score").unwrap();
    let scores = entries(scale.as_ref(), &[2.0]);
    assert_eq!(
        scale.build_reading(&scores).unwrap(),
        MeasurementReading::MasticatoryScore { score: 2 }
    );
}

#[test]
fn masticatory_score_near_a_step_rounds_to_it() {
    let scale = get_instrument("masticatory_score").unwrap();
    let scores = entries(scale.as_ref(), &[2.9999999999]);
    let reading = scale.build_reading(&scores).unwrap();
    assert_eq!(reading, MeasurementReading::MasticatoryScore { score: 3 });

    let verdict = evaluate(ItemId::Mastication, &reading).unwrap();
    assert!(!verdict.affected);
}
