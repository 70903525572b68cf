use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use oralcheck_core::models::item::ItemId;
use oralcheck_instruments::measurement::Method;
use oralcheck_instruments::scoring::Section;
use oralcheck_instruments::{Instrument, all_instruments, get_instrument};

use crate::error::ApiError;

/// An instrument as offered to the scoring form. `sections` is omitted from
/// the list view.
#[derive(Serialize)]
pub struct InstrumentView {
    id: String,
    name: String,
    method: Method,
    item: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    sections: Option<Vec<Section>>,
}

fn view(instrument: &dyn Instrument, with_sections: bool) -> InstrumentView {
    InstrumentView {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        method: instrument.method(),
        item: instrument.method().item(),
        sections: with_sections.then(|| instrument.sections().to_vec()),
    }
}

pub async fn list_instruments() -> Json<Vec<InstrumentView>> {
    Json(
        all_instruments()
            .iter()
            .map(|i| view(i.as_ref(), false))
            .collect(),
    )
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentView>, ApiError> {
    let instrument = get_instrument(&id)
        .ok_or_else(|| ApiError::NotFound(format!("instrument not found: {id}")))?;
    Ok(Json(view(instrument.as_ref(), true)))
}
