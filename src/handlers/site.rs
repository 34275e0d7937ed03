use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::config::AppState;
use crate::utils::error::ApiError;

pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let path = state.site_root.join("index.html");
    if !path.exists() {
        return Err(ApiError::NotFound("index.html not found".into()));
    }

    let page = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("could not read index.html: {}", e)))?;

    Ok(Html(page))
}

/// Echoes posted data back as JSON: JSON bodies verbatim, url-encoded forms as
/// an object of their fields, anything else as `{}`.
pub async fn echo_info(req: Request) -> Result<impl IntoResponse, ApiError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/json") {
        let Json(body) = Json::<Value>::from_request(req, &())
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        debug!("echoing JSON body");
        return Ok(Json(body));
    }

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, &())
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        debug!("echoing {} form fields", fields.len());
        let object: Map<String, Value> = fields.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        return Ok(Json(Value::Object(object)));
    }

    Ok(Json(Value::Object(Map::new())))
}
