use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Care-plan stance for one screening item.
///
/// `Unset` marks an item that was never evaluated in the source assessment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Directive {
    #[default]
    Unset,
    NoIssue,
    Maintain,
    Improve,
}

impl Directive {
    pub fn label(self) -> &'static str {
        match self {
            Directive::Unset => "unset",
            Directive::NoIssue => "no issue",
            Directive::Maintain => "maintain",
            Directive::Improve => "improve",
        }
    }
}
