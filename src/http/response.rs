//! Responses the proxy synthesizes itself.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::routing::RouteTable;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus<'a> {
    pub ok: bool,
    pub routes: Vec<&'a str>,
}

/// 200 with the declared route prefixes. Never touches an upstream.
pub fn health(routes: &RouteTable) -> Response {
    Json(HealthStatus {
        ok: true,
        routes: routes.prefixes(),
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};

    #[tokio::test]
    async fn health_lists_prefixes() {
        let response = health(&RouteTable::default());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(
            json["routes"],
            serde_json::json!(["/runway/", "/marble/", "/decart/", "/kiri/"])
        );
    }
}
