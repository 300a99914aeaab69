use contracts::dashboards::d402_affiliate_commission::{
    CompareRequest, Comparison, DimensionValues, DimensionValuesResponse, ReportOutcome,
    ReportRequest, TopItem, TopItemsRequest, UploadSummary,
};
use contracts::enums::ReportDimension;
use std::sync::Arc;
use uuid::Uuid;

use super::engine;
use super::upload_store::UploadStore;
use crate::domain::a025_affiliate_order::{Dataset, ReportError, StatusClassifier};
use crate::shared::config::Config;
use crate::usecases::u508_import_affiliate_csv::{ingest, RawTable};

/// An unknown dimension is reported as a missing column
pub fn parse_dimension(code: &str) -> Result<ReportDimension, ReportError> {
    code.parse()
        .map_err(|_| ReportError::MissingColumn(code.trim().to_string()))
}

fn dataset(store: &UploadStore, upload_id: &str) -> Result<Arc<Dataset>, ReportError> {
    Uuid::parse_str(upload_id)
        .ok()
        .and_then(|id| store.get(&id))
        .ok_or_else(|| ReportError::UploadNotFound(upload_id.to_string()))
}

/// Normalizes an uploaded CSV file and keeps it for later queries
pub fn upload_csv(
    store: &UploadStore,
    config: &Config,
    file_name: Option<String>,
    bytes: &[u8],
) -> Result<UploadSummary, ReportError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ReportError::InvalidUpload(format!("file is not UTF-8: {}", e)))?;
    let table = RawTable::from_csv(text)?;

    let classifier = StatusClassifier::new(&config.statuses.completed_markers);
    let ingested = ingest(
        &table,
        &config.columns,
        &classifier,
        &config.commission.currency_marker,
    )?;

    let records = &ingested.dataset.records;
    let distinct =
        |dimension| engine::available_values(records, dimension).into_iter().collect::<Vec<_>>();
    let values = DimensionValues {
        statuses: distinct(ReportDimension::Status),
        channels: distinct(ReportDimension::Channel),
        categories: distinct(ReportDimension::Category),
    };
    let date_bounds = engine::date_bounds(records);
    let has_items = ingested.dataset.has_items;
    let has_completion_time = ingested.dataset.has_completion_time;

    let upload_id = store.insert(ingested.dataset);
    tracing::info!(
        "Upload {} stored ({:?}, {} rows), {} uploads held",
        upload_id,
        file_name,
        ingested.report.rows,
        store.len()
    );

    Ok(UploadSummary {
        upload_id,
        file_name,
        report: ingested.report,
        values,
        date_bounds,
        has_items,
        has_completion_time,
    })
}

pub fn discard(store: &UploadStore, upload_id: &str) -> Result<(), ReportError> {
    let removed = Uuid::parse_str(upload_id)
        .map(|id| store.remove(&id))
        .unwrap_or(false);
    if removed {
        Ok(())
    } else {
        Err(ReportError::UploadNotFound(upload_id.to_string()))
    }
}

pub fn values(
    store: &UploadStore,
    upload_id: &str,
    dimension: &str,
) -> Result<DimensionValuesResponse, ReportError> {
    let dimension = parse_dimension(dimension)?;
    let dataset = dataset(store, upload_id)?;
    Ok(DimensionValuesResponse {
        dimension,
        values: engine::available_values(&dataset.records, dimension)
            .into_iter()
            .collect(),
    })
}

pub fn report(
    store: &UploadStore,
    upload_id: &str,
    request: &ReportRequest,
) -> Result<ReportOutcome, ReportError> {
    let group_by = parse_dimension(&request.group_by)?;
    let dataset = dataset(store, upload_id)?;
    Ok(engine::filter_and_aggregate(
        &dataset.records,
        &request.filter,
        group_by,
    ))
}

pub fn compare(
    store: &UploadStore,
    upload_id: &str,
    request: &CompareRequest,
) -> Result<Comparison, ReportError> {
    let group_by = parse_dimension(&request.group_by)?;
    let dataset = dataset(store, upload_id)?;
    Ok(engine::compare(
        &dataset.records,
        &request.first,
        &request.second,
        group_by,
    ))
}

pub fn top_items(
    store: &UploadStore,
    config: &Config,
    upload_id: &str,
    request: &TopItemsRequest,
) -> Result<Vec<TopItem>, ReportError> {
    let dataset = dataset(store, upload_id)?;
    if !dataset.has_items {
        return Err(ReportError::MissingColumn(config.columns.item_id.clone()));
    }

    let rows = match &request.filter {
        Some(spec) => engine::filter_records(&dataset.records, spec),
        None => dataset.records.iter().collect(),
    };
    Ok(engine::top_items(&rows, request.limit))
}
