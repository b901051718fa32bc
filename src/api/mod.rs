use std::sync::Arc;

use axum::{
    Router,
    extract::{Query as QueryParams, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Query, WindResult};
use crate::resolver::WindResolver;

#[derive(Debug, Deserialize)]
pub struct WindParams {
    pub lat: f64,
    pub lon: f64,
    /// Defaults to today
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub fn router(resolver: Arc<WindResolver>) -> Router {
    Router::new()
        .route("/wind", get(get_wind))
        .route("/health", get(health))
        .with_state(resolver)
}

async fn get_wind(
    State(resolver): State<Arc<WindResolver>>,
    QueryParams(params): QueryParams<WindParams>,
) -> Result<Json<WindResult>, (StatusCode, Json<ApiError>)> {
    let date = params.date.unwrap_or_else(|| Local::now().date_naive());
    let query = Query::new(params.lat, params.lon, date);

    query.validate().map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: e.user_message(),
            }),
        )
    })?;

    Ok(Json(resolver.resolve_wind(&query).await))
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        version: crate::VERSION,
    })
}
