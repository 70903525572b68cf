use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Number of items in the oral hypofunction screening.
pub const ITEM_COUNT: usize = 7;

/// One of the seven standardized oral-function screening items.
///
/// Declaration order is the clinical numbering (1 to 7) and drives ordering
/// in maps, exports, and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ItemId {
    /// Poor oral hygiene, measured by tongue coating.
    OralHygiene,
    OralDryness,
    /// Reduced occlusal (bite) force.
    BiteForce,
    /// Reduced tongue and lip motor function (oral diadochokinesis).
    OralMotor,
    TonguePressure,
    Mastication,
    Swallowing,
}

impl ItemId {
    pub const ALL: [ItemId; ITEM_COUNT] = [
        ItemId::OralHygiene,
        ItemId::OralDryness,
        ItemId::BiteForce,
        ItemId::OralMotor,
        ItemId::TonguePressure,
        ItemId::Mastication,
        ItemId::Swallowing,
    ];

    /// Clinical item number, 1-based.
    pub fn number(self) -> u8 {
        match self {
            ItemId::OralHygiene => 1,
            ItemId::OralDryness => 2,
            ItemId::BiteForce => 3,
            ItemId::OralMotor => 4,
            ItemId::TonguePressure => 5,
            ItemId::Mastication => 6,
            ItemId::Swallowing => 7,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ItemId::OralHygiene => "oral_hygiene",
            ItemId::OralDryness => "oral_dryness",
            ItemId::BiteForce => "bite_force",
            ItemId::OralMotor => "oral_motor",
            ItemId::TonguePressure => "tongue_pressure",
            ItemId::Mastication => "mastication",
            ItemId::Swallowing => "swallowing",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemId::OralHygiene => "Poor oral hygiene",
            ItemId::OralDryness => "Oral dryness",
            ItemId::BiteForce => "Reduced bite force",
            ItemId::OralMotor => "Reduced tongue-lip motor function",
            ItemId::TonguePressure => "Reduced tongue pressure",
            ItemId::Mastication => "Reduced masticatory function",
            ItemId::Swallowing => "Deterioration of swallowing function",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
