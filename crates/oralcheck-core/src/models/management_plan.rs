use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::directive::Directive;
use super::item::ItemId;

/// A care plan seeded from a finalized assessment.
///
/// `directives` always holds all seven items. Defaults come from the
/// assessment's verdicts; clinician overrides replace individual entries.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagementPlan {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub assessment_id: Uuid,
    pub plan_date: Date,
    pub directives: BTreeMap<ItemId, Directive>,
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewManagementPlan {
    pub assessment_id: Uuid,
    pub plan_date: Date,
    #[serde(default)]
    pub overrides: BTreeMap<ItemId, Directive>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ManagementPlan {
    pub fn from_defaults(
        patient_id: Uuid,
        assessment_id: Uuid,
        plan_date: Date,
        defaults: BTreeMap<ItemId, Directive>,
        now: jiff::Timestamp,
    ) -> Self {
        let mut directives: BTreeMap<ItemId, Directive> =
            ItemId::ALL.iter().map(|item| (*item, Directive::Unset)).collect();
        directives.extend(defaults);

        Self {
            id: Uuid::new_v4(),
            patient_id,
            assessment_id,
            plan_date,
            directives,
            notes: None,
            created_at: now,
        }
    }

    pub fn apply_overrides(&mut self, overrides: &BTreeMap<ItemId, Directive>) {
        for (item, directive) in overrides {
            self.directives.insert(*item, *directive);
        }
    }

    pub fn directive(&self, item: ItemId) -> Directive {
        self.directives.get(&item).copied().unwrap_or_default()
    }

    /// Items the plan asks to actively improve.
    pub fn improvement_targets(&self) -> Vec<ItemId> {
        self.directives
            .iter()
            .filter(|(_, d)| **d == Directive::Improve)
            .map(|(item, _)| *item)
            .collect()
    }
}
