use crate::{
    error::PageError,
    routes::records::get_biodata_json,
    state::MahasiswaState,
    views::{detail_page, list_page},
};
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use maud::Markup;

pub async fn get_biodata_page(State(state): State<MahasiswaState>) -> Result<Markup, PageError> {
    let records = state.list().await?;
    Ok(list_page(&records)?)
}

/// `GET /biodata/{id}` serves both shapes: the `.json` suffix is resolved first so that
/// `"7.json"` is never taken as the id itself.
pub async fn get_biodata_detail(
    State(state): State<MahasiswaState>,
    Path(id): Path<String>,
) -> Response {
    match id.strip_suffix(".json") {
        Some(json_id) => get_biodata_json(&state, json_id).await.into_response(),
        None => get_biodata_detail_page(&state, &id).await.into_response(),
    }
}

async fn get_biodata_detail_page(state: &MahasiswaState, id: &str) -> Result<Markup, PageError> {
    let record = state.get(id).await?;
    Ok(detail_page(&record)?)
}
