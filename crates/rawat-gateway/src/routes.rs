//! API route handlers for the gateway.
//!
//! Responses follow the `{status, message, data}` envelope: `status` is
//! "success", "fail" (caller error) or "error" (server fault).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use rawat_core::error::RawatError;
use rawat_core::traits::GroupConfigStore;
use rawat_core::types::WaGroupConfig;
use rawat_dispatch::{CancelFlag, PlanOptions};

use super::server::AppState;

type ApiResponse = (StatusCode, Json<serde_json::Value>);

fn success(code: StatusCode, message: &str, data: serde_json::Value) -> ApiResponse {
    (
        code,
        Json(serde_json::json!({
            "status": "success",
            "message": message,
            "data": data,
        })),
    )
}

fn fail(code: StatusCode, message: &str) -> ApiResponse {
    (
        code,
        Json(serde_json::json!({
            "status": "fail",
            "message": message,
        })),
    )
}

fn server_error(message: &str) -> ApiResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({
            "status": "error",
            "message": message,
        })),
    )
}

fn map_error(e: RawatError) -> ApiResponse {
    match e {
        RawatError::Validation(msg) => fail(StatusCode::BAD_REQUEST, &msg),
        RawatError::NoAssignment(msg) => fail(StatusCode::NOT_FOUND, &msg),
        RawatError::Busy(msg) => fail(StatusCode::CONFLICT, &msg),
        other => {
            tracing::error!("Request failed: {other}");
            server_error(&other.to_string())
        }
    }
}

/// Health check endpoint.
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "rawat-gateway",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Assignment queries (read-only) ──────────────────────────────

pub async fn get_today_assignments(State(state): State<Arc<AppState>>) -> ApiResponse {
    let today = Utc::now().with_timezone(&state.tz).date_naive();
    match state.dispatcher.resolve(today) {
        Ok(day) => match serde_json::to_value(&day) {
            Ok(data) => success(StatusCode::OK, "PM assignments retrieved successfully", data),
            Err(e) => server_error(&e.to_string()),
        },
        Err(e) => map_error(e),
    }
}

pub async fn get_assignments_by_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> ApiResponse {
    match state.dispatcher.resolve_str(&date) {
        Ok(day) => match serde_json::to_value(&day) {
            Ok(data) => success(StatusCode::OK, "PM assignments retrieved successfully", data),
            Err(e) => server_error(&e.to_string()),
        },
        Err(e) => map_error(e),
    }
}

// ── Manual dispatch ──────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTodayBody {
    #[serde(default)]
    pub group_only: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendByDateBody {
    pub date: String,
    #[serde(default)]
    pub group_only: bool,
}

pub async fn send_today_schedule(
    State(state): State<Arc<AppState>>,
    body: Option<Json<SendTodayBody>>,
) -> ApiResponse {
    let Json(body) = body.unwrap_or_default();
    let today = Utc::now().with_timezone(&state.tz).date_naive();
    dispatch(&state, today, body.group_only).await
}

pub async fn send_schedule_by_date(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendByDateBody>,
) -> ApiResponse {
    let date = match rawat_roster::parse_date(&body.date) {
        Ok(d) => d,
        Err(e) => return map_error(e),
    };
    dispatch(&state, date, body.group_only).await
}

async fn dispatch(state: &AppState, date: chrono::NaiveDate, group_only: bool) -> ApiResponse {
    let options = PlanOptions { group_only };
    match state
        .dispatcher
        .dispatch_for_date(date, options, &CancelFlag::new())
        .await
    {
        Ok(outcome) => {
            let mode = if group_only {
                "group message only"
            } else {
                "individual and group messages"
            };
            let message = format!("PM schedule sent successfully for {} ({mode})", outcome.date);
            match serde_json::to_value(&outcome) {
                Ok(data) => success(StatusCode::OK, &message, data),
                Err(e) => server_error(&e.to_string()),
            }
        }
        Err(e) => map_error(e),
    }
}

// ── WhatsApp group configuration ──────────────────────────────

pub async fn get_whatsapp_config(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.group_config() {
        Ok(Some(config)) => success(
            StatusCode::OK,
            "WhatsApp configuration retrieved successfully",
            serde_json::json!(config),
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "WhatsApp configuration not found"),
        Err(e) => map_error(e),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaConfigBody {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub group_name: String,
}

pub async fn upsert_whatsapp_config(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WaConfigBody>,
) -> ApiResponse {
    if body.group_id.is_empty() || body.group_name.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Group ID and name are required");
    }

    let config = WaGroupConfig {
        group_id: body.group_id,
        group_name: body.group_name,
    };
    match state.store.upsert_group_config(&config) {
        Ok(saved) => success(
            StatusCode::CREATED,
            "WhatsApp configuration created/updated successfully",
            serde_json::json!(saved),
        ),
        Err(e) => map_error(e),
    }
}

/// List the groups visible to the WhatsApp gateway account, for picking
/// the summary destination.
pub async fn list_whatsapp_groups(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.gateway.list_groups().await {
        Ok(groups) => success(
            StatusCode::OK,
            "WhatsApp groups retrieved successfully",
            groups,
        ),
        Err(e) => map_error(e),
    }
}

pub async fn delete_whatsapp_config(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.delete_group_config() {
        Ok(Some(_)) => success(
            StatusCode::OK,
            "WhatsApp configuration deleted successfully",
            serde_json::Value::Null,
        ),
        Ok(None) => fail(StatusCode::NOT_FOUND, "WhatsApp configuration not found"),
        Err(e) => map_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping_status_codes() {
        let (code, _) = map_error(RawatError::Validation("bad date".into()));
        assert_eq!(code, StatusCode::BAD_REQUEST);

        let (code, _) = map_error(RawatError::NoAssignment("weekend".into()));
        assert_eq!(code, StatusCode::NOT_FOUND);

        let (code, _) = map_error(RawatError::Busy("in flight".into()));
        assert_eq!(code, StatusCode::CONFLICT);

        let (code, body) = map_error(RawatError::Storage("disk full".into()));
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.0["status"], "error");
    }

    #[test]
    fn test_send_body_defaults() {
        let body: SendTodayBody = serde_json::from_str("{}").unwrap();
        assert!(!body.group_only);

        let body: SendByDateBody =
            serde_json::from_str(r#"{"date": "2024-12-30", "groupOnly": true}"#).unwrap();
        assert_eq!(body.date, "2024-12-30");
        assert!(body.group_only);
    }

    #[test]
    fn test_envelope_shapes() {
        let (_, body) = success(StatusCode::OK, "ok", serde_json::json!({"x": 1}));
        assert_eq!(body.0["status"], "success");
        assert_eq!(body.0["data"]["x"], 1);

        let (_, body) = fail(StatusCode::BAD_REQUEST, "nope");
        assert_eq!(body.0["status"], "fail");
        assert!(body.0.get("data").is_none());
    }
}
