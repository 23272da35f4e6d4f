use crate::{
    routes::{
        fallback::not_found,
        index::get_index_route,
        pages::{get_biodata_detail, get_biodata_page},
        records::{delete_biodata, get_biodata_list_json, post_biodata, put_biodata},
    },
    state::MahasiswaState,
};
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod fallback;
pub mod index;
pub mod pages;
pub mod payload;
pub mod records;

pub fn router(state: MahasiswaState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/biodata.json", get(get_biodata_list_json))
        .route("/biodata", get(get_biodata_page).post(post_biodata))
        .route(
            "/biodata/{id}",
            get(get_biodata_detail)
                .put(put_biodata)
                .delete(delete_biodata),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
