use std::ops::RangeInclusive;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: Uuid,
    /// Clinic-assigned patient number, e.g. `P001`. Unique per clinic.
    pub chart_number: String,
    pub name: String,
    pub name_kana: Option<String>,
    pub birthdate: Option<Date>,
    #[serde(default)]
    pub gender: Gender,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

/// Registration or edit form for a patient.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPatient {
    pub chart_number: String,
    pub name: String,
    #[serde(default)]
    pub name_kana: Option<String>,
    #[serde(default)]
    pub birthdate: Option<Date>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Why a registration collides with an existing patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DuplicateReason {
    ChartNumber,
    NameAndBirthdate,
}

impl DuplicateReason {
    pub fn message(self) -> &'static str {
        match self {
            DuplicateReason::ChartNumber => "a patient with the same chart number already exists",
            DuplicateReason::NameAndBirthdate => {
                "a patient with the same name and birthdate already exists"
            }
        }
    }
}

/// Patient list badge derived from the latest finalized assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PatientStatus {
    /// No finalized assessment yet.
    Pending,
    Diagnosed,
    Normal,
}

impl PatientStatus {
    pub fn from_latest_diagnosis(diagnosis: Option<bool>) -> Self {
        match diagnosis {
            None => PatientStatus::Pending,
            Some(true) => PatientStatus::Diagnosed,
            Some(false) => PatientStatus::Normal,
        }
    }
}

/// Longest accepted name or kana reading, in characters.
pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_CHART_NUMBER_CHARS: usize = 20;
pub const MAX_ADDRESS_CHARS: usize = 200;
/// Accepted phone number length, counting separators.
pub const PHONE_CHARS: RangeInclusive<usize> = 10..=15;
/// Birthdates in or before this year are rejected.
pub const BIRTH_YEAR_FLOOR: i16 = 1900;

fn invalid(field: &str, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn filled(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn local_date(now: jiff::Timestamp) -> Date {
    now.to_zoned(TimeZone::system()).date()
}

impl NewPatient {
    /// Check the form against the registration rules, with `today` bounding
    /// the birthdate.
    pub fn validate(&self, today: Date) -> Result<(), CoreError> {
        let chart_number = self.chart_number.trim();
        if chart_number.is_empty() {
            return Err(CoreError::MissingField("chart_number".to_string()));
        }
        if chart_number.chars().count() > MAX_CHART_NUMBER_CHARS
            || !chart_number
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid(
                "chart_number",
                format!("use 1-{MAX_CHART_NUMBER_CHARS} uppercase letters, digits or hyphens"),
            ));
        }

        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::MissingField("name".to_string()));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(invalid("name", format!("longer than {MAX_NAME_CHARS} characters")));
        }
        if filled(self.name_kana.as_deref())
            .is_some_and(|kana| kana.chars().count() > MAX_NAME_CHARS)
        {
            return Err(invalid("name_kana", format!("longer than {MAX_NAME_CHARS} characters")));
        }

        if let Some(birthdate) = self.birthdate {
            if birthdate > today {
                return Err(invalid("birthdate", format!("{birthdate} is in the future")));
            }
            if birthdate.year() <= BIRTH_YEAR_FLOOR {
                return Err(invalid("birthdate", format!("must be after {BIRTH_YEAR_FLOOR}")));
            }
        }

        if let Some(phone) = filled(self.phone.as_deref()) {
            let allowed = |c: char| c.is_ascii_digit() || c.is_whitespace() || "-+()".contains(c);
            if !PHONE_CHARS.contains(&phone.chars().count()) || !phone.chars().all(allowed) {
                return Err(invalid(
                    "phone",
                    format!(
                        "use {}-{} digits, spaces or - + ( )",
                        PHONE_CHARS.start(),
                        PHONE_CHARS.end()
                    ),
                ));
            }
        }

        if filled(self.address.as_deref())
            .is_some_and(|address| address.chars().count() > MAX_ADDRESS_CHARS)
        {
            return Err(invalid("address", format!("longer than {MAX_ADDRESS_CHARS} characters")));
        }
        Ok(())
    }

    pub fn into_patient(self, now: jiff::Timestamp) -> Result<Patient, CoreError> {
        self.validate(local_date(now))?;
        Ok(Patient {
            id: Uuid::new_v4(),
            chart_number: self.chart_number.trim().to_string(),
            name: self.name.trim().to_string(),
            name_kana: self.name_kana,
            birthdate: self.birthdate,
            gender: self.gender,
            phone: self.phone,
            address: self.address,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Patient {
    /// Replace the editable fields, keeping id and creation time.
    pub fn apply_update(&mut self, update: NewPatient, now: jiff::Timestamp) -> Result<(), CoreError> {
        update.validate(local_date(now))?;
        self.chart_number = update.chart_number.trim().to_string();
        self.name = update.name.trim().to_string();
        self.name_kana = update.name_kana;
        self.birthdate = update.birthdate;
        self.gender = update.gender;
        self.phone = update.phone;
        self.address = update.address;
        self.updated_at = now;
        Ok(())
    }

    /// Age in whole years on `on`, or `None` without a birthdate.
    pub fn age_on(&self, on: Date) -> Option<i16> {
        let birth = self.birthdate?;
        let mut age = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        Some(age)
    }

    pub fn duplicate_of(&self, candidate: &NewPatient) -> Option<DuplicateReason> {
        if self.chart_number == candidate.chart_number.trim() {
            return Some(DuplicateReason::ChartNumber);
        }
        if candidate.birthdate.is_some()
            && self.birthdate == candidate.birthdate
            && self.name == candidate.name.trim()
        {
            return Some(DuplicateReason::NameAndBirthdate);
        }
        None
    }

    /// Case-insensitive match against name, kana reading, and chart number.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.chart_number.to_lowercase().contains(&term)
            || self
                .name_kana
                .as_deref()
                .is_some_and(|kana| kana.to_lowercase().contains(&term))
    }
}
