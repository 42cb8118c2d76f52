use axum::{
    extract::{rejection::JsonRejection, Query},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::options::{Category, NbcOption, UpgradeCost, UPGRADE_COSTS};
use super::pending::{pending_items, PendingItems};
use super::selections::Selections;
use super::Scorecard;
use crate::error::AppError;
use crate::workflows::files::UploadedFile;

/// Stateless scoring endpoints used while a form is being filled in.
pub fn calculator_router() -> Router {
    Router::new()
        .route("/api/v1/nbc/score", post(score_handler))
        .route("/api/v1/nbc/pending", post(pending_handler))
        .route("/api/v1/nbc/options", get(options_handler))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PendingRequest {
    #[serde(default)]
    pub(crate) selections: Selections,
    #[serde(default)]
    pub(crate) uploaded_files: Vec<UploadedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OptionsQuery {
    pub(crate) category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CategoryOptions {
    pub(crate) category: Category,
    pub(crate) label: &'static str,
    pub(crate) standard: &'static [NbcOption],
    pub(crate) zone_7b: &'static [NbcOption],
}

impl CategoryOptions {
    fn for_category(category: Category) -> Self {
        let table = category.table();
        Self {
            category,
            label: category.label(),
            standard: table.standard,
            zone_7b: table.zone_7b,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OptionsResponse {
    pub(crate) categories: Vec<CategoryOptions>,
    pub(crate) upgrade_costs: &'static [UpgradeCost],
}

pub(crate) async fn score_handler(
    payload: Result<Json<Selections>, JsonRejection>,
) -> Result<Json<Scorecard>, AppError> {
    let Json(selections) = payload?;
    Ok(Json(Scorecard::evaluate(&selections)))
}

pub(crate) async fn pending_handler(
    payload: Result<Json<PendingRequest>, JsonRejection>,
) -> Result<Json<PendingItems>, AppError> {
    let Json(request) = payload?;
    Ok(Json(pending_items(&request.selections, &request.uploaded_files)))
}

pub(crate) async fn options_handler(
    Query(query): Query<OptionsQuery>,
) -> Result<Json<OptionsResponse>, AppError> {
    let categories = match query.category.as_deref() {
        None => Category::ordered()
            .into_iter()
            .map(CategoryOptions::for_category)
            .collect(),
        Some(key) => {
            let category =
                Category::from_key(key).ok_or_else(|| AppError::UnknownCategory(key.to_string()))?;
            vec![CategoryOptions::for_category(category)]
        }
    };

    Ok(Json(OptionsResponse {
        categories,
        upgrade_costs: UPGRADE_COSTS,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::{IntoResponse, Response};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn score_route_returns_breakdown_and_tier() {
        let response = calculator_router()
            .oneshot(post_json(
                "/api/v1/nbc/score",
                json!({
                    "wallRSI": "3.85",
                    "belowGradeRSI": "3.09",
                    "airtightness": "AL-3A",
                    "hasHrv": "with_hrv",
                    "province": "saskatchewan",
                    "buildingType": "multi-unit"
                }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["total_points"], json!(16.9));
        assert_eq!(payload["compliance"]["tier"], "Tier 2");
        assert_eq!(payload["breakdown"].as_array().map(Vec::len), Some(3));
        assert_eq!(payload["costs"]["savings"], json!(5_400));
    }

    #[tokio::test]
    async fn pending_route_lists_missing_documents() {
        let response = calculator_router()
            .oneshot(post_json(
                "/api/v1/nbc/pending",
                json!({ "selections": { "compliancePath": "9362" }, "uploadedFiles": [] }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let required = payload["required"].as_array().expect("required list");
        assert!(required
            .iter()
            .any(|item| item["label"] == "At least 1 project document"
                && item["fieldId"] == "uploadedFiles"));
    }

    #[tokio::test]
    async fn options_route_filters_by_category() {
        let response = calculator_router()
            .oneshot(
                Request::get("/api/v1/nbc/options?category=wallRSI")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        let categories = payload["categories"].as_array().expect("categories");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0]["category"], "wallRSI");
        assert_eq!(categories[0]["zone_7b"][2]["points"], json!(5.4));
        assert!(!payload["upgrade_costs"]
            .as_array()
            .expect("upgrade list")
            .is_empty());
    }

    #[tokio::test]
    async fn malformed_bodies_share_the_json_error_shape() {
        let response = calculator_router()
            .oneshot(
                Request::post("/api/v1/nbc/score")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"wallRSI\": "))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = read_json_body(response).await;
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .starts_with("invalid request body"));

        let response = calculator_router()
            .oneshot(
                Request::post("/api/v1/nbc/pending")
                    .body(Body::from("{}"))
                    .expect("request builds"),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let payload = read_json_body(response).await;
        assert!(payload["error"].is_string());
    }

    #[tokio::test]
    async fn options_route_rejects_unknown_category() {
        let response = options_handler(Query(OptionsQuery {
            category: Some("roofColour".to_string()),
        }))
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
