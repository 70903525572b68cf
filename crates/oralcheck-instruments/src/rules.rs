//! Published clinical cutoffs for oral hypofunction screening.
//!
//! Fixed domain knowledge, not configuration: one rule per measurement method.

use serde::Serialize;

use oralcheck_core::models::item::ItemId;

use crate::measurement::Method;

/// How a measured value is compared against its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Affected when `value < threshold`.
    Below,
    /// Affected when `value <= threshold`.
    AtOrBelow,
    /// Affected when `value >= threshold`.
    AtOrAbove,
}

impl Comparison {
    pub fn is_affected(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Below => value < threshold,
            Comparison::AtOrBelow => value <= threshold,
            Comparison::AtOrAbove => value >= threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rule {
    pub item: ItemId,
    pub method: Method,
    pub comparison: Comparison,
    pub threshold: f64,
    pub unit: &'static str,
    pub criterion: &'static str,
}

impl Rule {
    /// Affected if any compared value crosses the threshold.
    ///
    /// Single-value methods pass one value; diadochokinesis passes the three
    /// syllable rates, any one of which below the cutoff counts.
    pub fn is_affected(&self, values: &[f64]) -> bool {
        values
            .iter()
            .any(|v| self.comparison.is_affected(*v, self.threshold))
    }
}

pub static RULES: [Rule; 10] = [
    Rule {
        item: ItemId::OralHygiene,
        method: Method::TongueCoating,
        comparison: Comparison::AtOrAbove,
        threshold: 50.0,
        unit: "%",
        criterion: "Tongue Coating Index 50% or more",
    },
    Rule {
        item: ItemId::OralDryness,
        method: Method::MucosalMoisture,
        comparison: Comparison::Below,
        threshold: 27.0,
        unit: "",
        criterion: "mucosal moisture below 27.0",
    },
    Rule {
        item: ItemId::OralDryness,
        method: Method::SalivaVolume,
        comparison: Comparison::AtOrBelow,
        threshold: 2.0,
        unit: "g/2 min",
        criterion: "saliva 2 g or less in 2 minutes",
    },
    Rule {
        item: ItemId::BiteForce,
        method: Method::BiteForceSensor,
        comparison: Comparison::Below,
        threshold: 350.0,
        unit: "N",
        criterion: "bite force below 350 N",
    },
    Rule {
        item: ItemId::BiteForce,
        method: Method::RemainingTeeth,
        comparison: Comparison::Below,
        threshold: 20.0,
        unit: "teeth",
        criterion: "fewer than 20 remaining teeth",
    },
    Rule {
        item: ItemId::OralMotor,
        method: Method::Diadochokinesis,
        comparison: Comparison::Below,
        threshold: 6.0,
        unit: "/s",
        criterion: "any of /pa/, /ta/, /ka/ below 6 per second",
    },
    Rule {
        item: ItemId::TonguePressure,
        method: Method::TonguePressure,
        comparison: Comparison::Below,
        threshold: 30.0,
        unit: "kPa",
        criterion: "maximum tongue pressure below 30 kPa",
    },
    Rule {
        item: ItemId::Mastication,
        method: Method::GlucoseElution,
        comparison: Comparison::Below,
        threshold: 100.0,
        unit: "mg/dL",
        criterion: "glucose elution below 100 mg/dL",
    },
    Rule {
        item: ItemId::Mastication,
        method: Method::MasticatoryScore,
        comparison: Comparison::AtOrBelow,
        threshold: 2.0,
        unit: "",
        criterion: "masticatory efficiency score 2 or less",
    },
    Rule {
        item: ItemId::Swallowing,
        method: Method::Eat10,
        comparison: Comparison::AtOrAbove,
        threshold: 3.0,
        unit: "points",
        criterion: "EAT-10 total 3 or more",
    },
];

/// Look up the rule for an item/method pair.
pub fn rule_for(item: ItemId, method: Method) -> Option<&'static Rule> {
    RULES
        .iter()
        .find(|rule| rule.item == item && rule.method == method)
}

/// Rules applicable to one item, in table order.
pub fn rules_for_item(item: ItemId) -> impl Iterator<Item = &'static Rule> {
    RULES.iter().filter(move |rule| rule.item == item)
}
