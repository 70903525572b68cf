pub mod assessments;
pub mod conditions;
pub mod export;
pub mod health;
pub mod instruments;
pub mod patients;
pub mod plans;
pub mod progress;
pub mod rules;
