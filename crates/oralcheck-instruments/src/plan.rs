use std::collections::BTreeMap;

use oralcheck_core::models::directive::Directive;
use oralcheck_core::models::item::ItemId;

use crate::assessment::Assessment;
use crate::error::ScoringError;

/// Default care-plan directive for every item of a finalized assessment.
///
/// Affected items default to `Improve`, unaffected ones to `Maintain`, and
/// items never recorded stay `Unset`. The result always has seven entries.
pub fn derive_defaults(
    assessment: &Assessment,
) -> Result<BTreeMap<ItemId, Directive>, ScoringError> {
    if !assessment.is_finalized() {
        return Err(ScoringError::AssessmentNotFinalized);
    }

    Ok(ItemId::ALL
        .iter()
        .map(|item| {
            let directive = match assessment.verdict(*item) {
                Some(verdict) if verdict.affected => Directive::Improve,
                Some(_) => Directive::Maintain,
                None => Directive::Unset,
            };
            (*item, directive)
        })
        .collect())
}
