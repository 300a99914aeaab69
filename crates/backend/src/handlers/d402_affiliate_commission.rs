use axum::{
    body::Bytes,
    extract::{Multipart, Path},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d402_affiliate_commission::{
    CompareRequest, Comparison, DimensionValuesResponse, ReportOutcome, ReportRequest, TopItem,
    TopItemsRequest, UploadSummary,
};
use contracts::usecases::common::UseCaseError;

use crate::dashboards::d402_affiliate_commission::service;
use crate::dashboards::d402_affiliate_commission::upload_store::{UploadStore, UPLOADS};
use crate::domain::a025_affiliate_order::ReportError;
use crate::shared::config::{self, Config};

type ApiError = (StatusCode, Json<UseCaseError>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn api_error(err: ReportError) -> ApiError {
    let (status, body) = match &err {
        ReportError::MissingColumn(column) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            UseCaseError::missing_column(column),
        ),
        ReportError::MalformedCommission { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            UseCaseError::malformed_commission(err.to_string()),
        ),
        ReportError::InvalidCsv(_) => (
            StatusCode::BAD_REQUEST,
            UseCaseError::invalid_csv(err.to_string()),
        ),
        ReportError::InvalidUpload(_) => (
            StatusCode::BAD_REQUEST,
            UseCaseError::invalid_upload(err.to_string()),
        ),
        ReportError::UploadNotFound(_) => {
            (StatusCode::NOT_FOUND, UseCaseError::not_found(err.to_string()))
        }
    };
    tracing::warn!("d402 request failed: {}", err);
    (status, Json(body))
}

/// Parses and stores the file on the blocking pool; large exports would
/// otherwise stall the async workers
async fn ingest_upload(
    store: &'static UploadStore,
    config: &'static Config,
    file_name: Option<String>,
    bytes: Bytes,
) -> Result<UploadSummary, ApiError> {
    tokio::task::spawn_blocking(move || service::upload_csv(store, config, file_name, &bytes))
        .await
        .map_err(|e| {
            tracing::error!("d402 upload task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UseCaseError::internal(format!("upload task failed: {}", e))),
            )
        })?
        .map_err(api_error)
}

/// POST /api/d402/uploads
///
/// Multipart form with the export in the `file` field
pub async fn upload(mut multipart: Multipart) -> ApiResult<UploadSummary> {
    let invalid = |e: axum::extract::multipart::MultipartError| {
        api_error(ReportError::InvalidUpload(e.to_string()))
    };

    let mut file = None;
    while let Some(field) = multipart.next_field().await.map_err(invalid)? {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(invalid)?;
            file = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| {
        api_error(ReportError::InvalidUpload(
            "multipart field 'file' is missing".to_string(),
        ))
    })?;

    ingest_upload(&UPLOADS, config::current(), file_name, bytes)
        .await
        .map(Json)
}

/// DELETE /api/d402/uploads/:id
pub async fn discard(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    service::discard(&UPLOADS, &id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(api_error)
}

/// GET /api/d402/uploads/:id/values/:dimension
pub async fn values(
    Path((id, dimension)): Path<(String, String)>,
) -> ApiResult<DimensionValuesResponse> {
    service::values(&UPLOADS, &id, &dimension)
        .map(Json)
        .map_err(api_error)
}

/// POST /api/d402/uploads/:id/report
pub async fn report(
    Path(id): Path<String>,
    Json(request): Json<ReportRequest>,
) -> ApiResult<ReportOutcome> {
    service::report(&UPLOADS, &id, &request)
        .map(Json)
        .map_err(api_error)
}

/// POST /api/d402/uploads/:id/compare
pub async fn compare(
    Path(id): Path<String>,
    Json(request): Json<CompareRequest>,
) -> ApiResult<Comparison> {
    service::compare(&UPLOADS, &id, &request)
        .map(Json)
        .map_err(api_error)
}

/// POST /api/d402/uploads/:id/top-items
pub async fn top_items(
    Path(id): Path<String>,
    Json(request): Json<TopItemsRequest>,
) -> ApiResult<Vec<TopItem>> {
    service::top_items(&UPLOADS, config::current(), &id, &request)
        .map(Json)
        .map_err(api_error)
}
