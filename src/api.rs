// Ward Reports - API Layer
// HTTP surface over the record store, query service, and export formatters.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::{all_reports, insert_report, Database, NewReport, Report};
use crate::export;
use crate::query::{find_reports, ReportFilter};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Failures surfaced to callers as a 500. Malformed input never reaches
/// this type; the extractors reject it with a 4xx first.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Internal(err) = self;
        tracing::error!(error = ?err, "Request failed.");

        let body = Json(json!({ "error": "an internal error occurred" }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Filter parameters as they appear in the query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    customer_name: Option<String>,
    hospital_name: Option<String>,
    ward_name: Option<String>,
    search: Option<String>,
}

impl From<ReportQuery> for ReportFilter {
    fn from(query: ReportQuery) -> Self {
        ReportFilter {
            customer_name: query.customer_name,
            hospital_name: query.hospital_name,
            ward_name: query.ward_name,
            search: query.search,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/reports/", post(create_report).get(list_reports))
        .route("/reports/download/csv", get(download_csv))
        .route("/reports/download/excel", get(download_excel))
        .route("/reports/download/pdf", get(download_pdf))
        .route("/reports/reset/", post(reset_filters))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// GET /health - Liveness probe
async fn health_check() -> impl IntoResponse {
    "OK"
}

/// POST /reports/ - Store a new report and return it with its id
async fn create_report(
    State(state): State<AppState>,
    Json(report): Json<NewReport>,
) -> Result<Json<Report>, AppError> {
    let conn = state.db.conn()?;
    let stored = insert_report(&conn, &report)?;

    Ok(Json(stored))
}

/// GET /reports/ - List the reports matching the optional filters
async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<Report>>, AppError> {
    let filter = ReportFilter::from(query);
    let conn = state.db.conn()?;
    let reports = find_reports(&conn, &filter)?;

    Ok(Json(reports))
}

/// POST /reports/reset/ - Return the full record set. Clears client-side
/// filters only; no stored data is touched.
async fn reset_filters(
    State(state): State<AppState>,
) -> Result<Json<Vec<Report>>, AppError> {
    let conn = state.db.conn()?;
    let reports = all_reports(&conn)?;

    Ok(Json(reports))
}

/// GET /reports/download/csv - Export every report as delimited text
async fn download_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let reports = {
        let conn = state.db.conn()?;
        all_reports(&conn)?
    };
    let bytes = export::csv::write_reports(&reports)?;

    Ok(attachment(export::csv::CONTENT_TYPE, export::csv::FILENAME, bytes))
}

/// GET /reports/download/excel - Export every report as a workbook
async fn download_excel(State(state): State<AppState>) -> Result<Response, AppError> {
    let reports = {
        let conn = state.db.conn()?;
        all_reports(&conn)?
    };
    let bytes = export::excel::write_reports(&reports)?;

    Ok(attachment(export::excel::CONTENT_TYPE, export::excel::FILENAME, bytes))
}

/// GET /reports/download/pdf - Export every report as a PDF table
async fn download_pdf(State(state): State<AppState>) -> Result<Response, AppError> {
    let reports = {
        let conn = state.db.conn()?;
        all_reports(&conn)?
    };
    let bytes = export::pdf::write_reports(&reports)?;

    Ok(attachment(export::pdf::CONTENT_TYPE, export::pdf::FILENAME, bytes))
}

fn attachment(content_type: &'static str, filename: &'static str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response()
}
