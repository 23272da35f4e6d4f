use axum::Json;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ServiceDescriptor {
    status: &'static str,
    message: &'static str,
    endpoints: Endpoints,
}

#[derive(Serialize, Debug)]
struct Endpoints {
    list_html: &'static str,
    list_json: &'static str,
    detail_html: &'static str,
    detail_json: &'static str,
    create: &'static str,
    update: &'static str,
    delete: &'static str,
}

const DESCRIPTOR: ServiceDescriptor = ServiceDescriptor {
    status: "ok",
    message: "🚀 API Mahasiswa berjalan!",
    endpoints: Endpoints {
        list_html: "/biodata",
        list_json: "/biodata.json",
        detail_html: "/biodata/:id",
        detail_json: "/biodata/:id.json",
        create: "POST /biodata",
        update: "PUT /biodata/:id",
        delete: "DELETE /biodata/:id",
    },
};

pub async fn get_index_route() -> Json<ServiceDescriptor> {
    Json(DESCRIPTOR)
}
