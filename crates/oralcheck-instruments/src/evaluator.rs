use serde::{Deserialize, Serialize};
use ts_rs::TS;

use oralcheck_core::models::item::ItemId;

use crate::error::ScoringError;
use crate::measurement::{MeasurementReading, Method};
use crate::rules;

/// Pass/fail result for one screening item. Derived, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemVerdict {
    pub item: ItemId,
    pub method: Method,
    pub reading: MeasurementReading,
    /// The measured value crosses the clinical threshold.
    pub affected: bool,
    pub display: String,
}

/// Apply the threshold rule for `item` to `reading`.
pub fn evaluate(item: ItemId, reading: &MeasurementReading) -> Result<ItemVerdict, ScoringError> {
    let method = reading.method();
    let rule = rules::rule_for(item, method)
        .ok_or(ScoringError::UnknownMeasurementMethod { item, method })?;

    reading.validate()?;

    Ok(ItemVerdict {
        item,
        method,
        reading: reading.clone(),
        affected: rule.is_affected(&reading.compared_values()),
        display: reading.display(),
    })
}
