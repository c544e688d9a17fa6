use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::database::models::MedicineHistory;
use crate::error::ApiError;
use crate::medicine::{render_png, render_svg, render_text, PillGrid};
use crate::services::medicine::MedicineStore;
use crate::utils::datetime::today_utc;

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const MAX_HISTORY_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Svg,
    Png,
    Text,
}

impl FromStr for SheetFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "svg" => Ok(SheetFormat::Svg),
            "png" => Ok(SheetFormat::Png),
            "text" | "txt" => Ok(SheetFormat::Text),
            other => Err(ApiError::BadRequest(format!("Unknown format '{other}'"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PillsQuery {
    pub format: Option<String>,
    pub remaining: Option<i64>,
    pub taken: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub remaining: i64,
    pub taken_today: bool,
    pub max: i64,
}

pub struct PillsService {
    pub router: Router,
}

impl PillsService {
    pub fn new(store: MedicineStore) -> Self {
        let router = Router::new()
            .route("/pills", get(pill_sheet))
            .route("/api/status", get(status))
            .route("/api/history", get(history))
            .with_state(store);

        Self { router }
    }
}

/// Renders the sheet for the stored status, or for explicit
/// `remaining`/`taken` query values.
async fn pill_sheet(
    State(store): State<MedicineStore>,
    Query(query): Query<PillsQuery>,
) -> Result<Response, ApiError> {
    let format = match query.format.as_deref() {
        Some(raw) => raw.parse()?,
        None => SheetFormat::Svg,
    };
    let max = store.max();

    let (remaining, taken_today) = match (query.remaining, query.taken) {
        (Some(remaining), Some(taken)) => (remaining, taken),
        (remaining, taken) => {
            let report = store.status(today_utc()).await?;
            (
                remaining.unwrap_or(report.remaining),
                taken.unwrap_or(report.taken_today),
            )
        }
    };

    if !(0..=max).contains(&remaining) {
        return Err(ApiError::BadRequest(format!(
            "remaining must be between 0 and {max}"
        )));
    }

    let grid = PillGrid::new(remaining, taken_today, max);
    let response = match format {
        SheetFormat::Svg => (
            [(header::CONTENT_TYPE, "image/svg+xml")],
            render_svg(&grid),
        )
            .into_response(),
        SheetFormat::Png => (
            [(header::CONTENT_TYPE, "image/png")],
            render_png(&grid).map_err(anyhow::Error::from)?,
        )
            .into_response(),
        SheetFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            render_text(&grid),
        )
            .into_response(),
    };

    Ok(response)
}

async fn status(State(store): State<MedicineStore>) -> Result<Json<StatusResponse>, ApiError> {
    let report = store.status(today_utc()).await?;
    Ok(Json(StatusResponse {
        remaining: report.remaining,
        taken_today: report.taken_today,
        max: store.max(),
    }))
}

async fn history(
    State(store): State<MedicineStore>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MedicineHistory>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(Json(store.history(limit).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_format_parse() {
        assert_eq!("svg".parse::<SheetFormat>().unwrap(), SheetFormat::Svg);
        assert_eq!("text".parse::<SheetFormat>().unwrap(), SheetFormat::Text);
        assert_eq!("txt".parse::<SheetFormat>().unwrap(), SheetFormat::Text);
        assert_eq!("png".parse::<SheetFormat>().unwrap(), SheetFormat::Png);
        assert!(matches!(
            "gif".parse::<SheetFormat>(),
            Err(ApiError::BadRequest(_))
        ));
    }
}
