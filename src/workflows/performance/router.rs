use std::io::Cursor;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::period::{Period, PeriodError};
use super::rank::PageRequest;
use super::service::{build_team_scoreboard, build_weekly_report, build_worker_scoreboard};
use crate::workflows::intake::{
    normalize_batch, AssignmentImportError, AssignmentImporter, NormalizedBatch, RawAssignment,
};

/// Router computing scoreboards from posted raw records. The endpoints hold
/// no state: every response is recomputed from the request body.
pub fn performance_router() -> Router {
    Router::new()
        .route(
            "/api/v1/performance/workers",
            post(worker_scoreboard_handler),
        )
        .route("/api/v1/performance/teams", post(team_scoreboard_handler))
        .route("/api/v1/performance/weekly", post(weekly_report_handler))
}

/// Shared request shape: a period selector plus the raw records, either as
/// JSON objects or as the legacy CSV export pasted through.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreboardRequest {
    #[serde(default)]
    pub(crate) month: Option<String>,
    #[serde(default)]
    pub(crate) start: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) end: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
    #[serde(default)]
    pub(crate) page_size: Option<usize>,
    #[serde(default)]
    pub(crate) assignments: Vec<RawAssignment>,
    #[serde(default)]
    pub(crate) assignments_csv: Option<String>,
}

impl ScoreboardRequest {
    fn period(&self) -> Result<Period, PeriodError> {
        Period::resolve(self.month.as_deref(), self.start, self.end)
    }

    fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.page_size.unwrap_or(10))
    }

    fn batch(&self) -> Result<NormalizedBatch, AssignmentImportError> {
        match &self.assignments_csv {
            Some(csv) => AssignmentImporter::from_csv_reader(Cursor::new(csv.as_bytes())),
            None => Ok(normalize_batch(self.assignments.clone())),
        }
    }
}

pub(crate) async fn worker_scoreboard_handler(
    Json(request): Json<ScoreboardRequest>,
) -> Response {
    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return period_error_response(error),
    };
    let batch = match request.batch() {
        Ok(batch) => batch,
        Err(error) => return import_error_response(error),
    };

    let scoreboard = build_worker_scoreboard(&batch, &period, &request.page_request());
    (StatusCode::OK, Json(scoreboard)).into_response()
}

pub(crate) async fn team_scoreboard_handler(Json(request): Json<ScoreboardRequest>) -> Response {
    let period = match request.period() {
        Ok(period) => period,
        Err(error) => return period_error_response(error),
    };
    let batch = match request.batch() {
        Ok(batch) => batch,
        Err(error) => return import_error_response(error),
    };

    let scoreboard = build_team_scoreboard(&batch, &period);
    (StatusCode::OK, Json(scoreboard)).into_response()
}

pub(crate) async fn weekly_report_handler(Json(request): Json<ScoreboardRequest>) -> Response {
    let month = match request.period() {
        Ok(period) => match period.as_month() {
            Some(month) => month,
            None => return period_error_response(PeriodError::MonthRequired),
        },
        Err(error) => return period_error_response(error),
    };
    let batch = match request.batch() {
        Ok(batch) => batch,
        Err(error) => return import_error_response(error),
    };

    let report = build_weekly_report(&batch, month);
    (StatusCode::OK, Json(report)).into_response()
}

fn period_error_response(error: PeriodError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}

fn import_error_response(error: AssignmentImportError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
