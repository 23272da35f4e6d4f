use crate::{
    data::Biodata,
    envelope::Envelope,
    error::ApiError,
    routes::payload::BiodataPayload,
    state::MahasiswaState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn get_biodata_list_json(
    State(state): State<MahasiswaState>,
) -> Result<Json<Envelope<Vec<Biodata>>>, ApiError> {
    let records = state.list().await?;
    let total = records.len();
    Ok(Json(Envelope::success(records).with_total(total)))
}

/// Body of `GET /biodata/{id}.json`, with the suffix already removed from `id`.
pub async fn get_biodata_json(
    state: &MahasiswaState,
    id: &str,
) -> Result<Json<Envelope<Biodata>>, ApiError> {
    Ok(Json(Envelope::success(state.get(id).await?)))
}

pub async fn post_biodata(
    State(state): State<MahasiswaState>,
    BiodataPayload(form): BiodataPayload,
) -> Result<(StatusCode, Json<Envelope<Biodata>>), ApiError> {
    let record = state.create(form).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(record).with_message("✅ Data berhasil ditambahkan")),
    ))
}

pub async fn put_biodata(
    State(state): State<MahasiswaState>,
    Path(id): Path<String>,
    BiodataPayload(form): BiodataPayload,
) -> Result<Json<Envelope<Biodata>>, ApiError> {
    let record = state.replace(&id, form).await?;
    Ok(Json(
        Envelope::success(record).with_message("✅ Data diperbarui"),
    ))
}

pub async fn delete_biodata(
    State(state): State<MahasiswaState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.remove(&id).await?;
    Ok(Json(Envelope::done("✅ Data dihapus")))
}
