use crate::{envelope::Envelope, views::message_page};
use axum::{
    Json,
    http::{HeaderMap, Method, StatusCode, Uri, header::ACCEPT},
    response::{IntoResponse, Response},
};

const NOT_FOUND_MESSAGE: &str = "Endpoint tidak ditemukan";

/// Unmatched routes: an HTML page for clients that take HTML, a JSON envelope otherwise.
pub async fn not_found(method: Method, uri: Uri, headers: HeaderMap) -> Response {
    let html = accepts_html(&headers);
    debug!(%method, %uri, html, "No route matched");

    if html {
        (StatusCode::NOT_FOUND, message_page("404", NOT_FOUND_MESSAGE)).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(Envelope::error(NOT_FOUND_MESSAGE))).into_response()
    }
}

/// Whether `text/html` is acceptable. A missing or empty `Accept` header accepts anything.
pub fn accepts_html(headers: &HeaderMap) -> bool {
    let Some(accept) = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
    else {
        return true;
    };

    accept.split(',').any(|range| {
        let mut params = range.split(';');
        let media_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        let refused = params.any(|param| {
            param
                .trim()
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q <= 0.0)
        });

        !refused && matches!(media_type.as_str(), "text/html" | "text/*" | "*/*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn no_accept_header_means_html() {
        assert!(accepts_html(&HeaderMap::new()));
    }

    #[test]
    fn browsers_and_wildcards_get_html() {
        assert!(accepts_html(&accept(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
        )));
        assert!(accepts_html(&accept("*/*")));
        assert!(accepts_html(&accept("text/*")));
    }

    #[test]
    fn json_clients_get_json() {
        assert!(!accepts_html(&accept("application/json")));
        assert!(!accepts_html(&accept("application/json, text/html;q=0")));
    }
}
