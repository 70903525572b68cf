use axum::Json;

use oralcheck_instruments::rules::{RULES, Rule};

/// The clinical threshold table, one rule per measurement method.
pub async fn list_rules() -> Json<&'static [Rule]> {
    Json(RULES.as_slice())
}
