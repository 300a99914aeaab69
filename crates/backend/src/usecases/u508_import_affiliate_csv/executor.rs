use contracts::dashboards::d402_affiliate_commission::IngestReport;

use super::parsers::{parse_commission, parse_quantity, parse_timestamp};
use super::raw_table::RawTable;
use crate::domain::a025_affiliate_order::{
    reporting_date, Dataset, ItemInfo, OrderRecord, ReportError, StatusClassifier,
};
use crate::shared::config::ColumnMapping;

/// Outcome of a successful ingestion
#[derive(Debug, Clone)]
pub struct Ingested {
    pub dataset: Dataset,
    pub report: IngestReport,
}

struct ColumnPositions {
    status: usize,
    channel: usize,
    category: usize,
    order_time: usize,
    commission: usize,
    completion_time: Option<usize>,
    item_id: Option<usize>,
    item_name: Option<usize>,
    quantity: Option<usize>,
}

impl ColumnPositions {
    fn locate(table: &RawTable, columns: &ColumnMapping) -> Result<Self, ReportError> {
        Ok(Self {
            status: table.require_column(&columns.order_status)?,
            channel: table.require_column(&columns.channel)?,
            category: table.require_column(&columns.category)?,
            order_time: table.require_column(&columns.order_time)?,
            commission: table.require_column(&columns.commission)?,
            completion_time: table.column_index(&columns.completion_time),
            item_id: table.column_index(&columns.item_id),
            item_name: table.column_index(&columns.item_name),
            quantity: table.column_index(&columns.quantity),
        })
    }
}

/// Normalizes every row of an uploaded table.
///
/// Fails on the first missing required column or malformed commission;
/// nothing is returned in that case. Unparseable dates become `None` and
/// are only counted.
pub fn ingest(
    table: &RawTable,
    columns: &ColumnMapping,
    classifier: &StatusClassifier,
    currency_marker: &str,
) -> Result<Ingested, ReportError> {
    let positions = ColumnPositions::locate(table, columns)?;

    if positions.completion_time.is_none() {
        tracing::warn!(
            "Column '{}' not found, completed orders will have no reporting date",
            columns.completion_time
        );
    }

    let mut report = IngestReport::default();
    let mut records = Vec::with_capacity(table.rows.len());

    for (index, row) in table.rows.iter().enumerate() {
        let cell = |i: usize| row.get(i).map(|v| v.trim()).unwrap_or("");
        let mut read_time = |i: usize| {
            let raw = cell(i);
            let parsed = parse_timestamp(raw);
            if parsed.is_none() && !raw.is_empty() {
                report.unparseable_date_cells += 1;
            }
            parsed
        };

        let order_time = read_time(positions.order_time);
        let completion_time = positions.completion_time.and_then(&mut read_time);

        let raw_commission = cell(positions.commission);
        let net_commission = parse_commission(raw_commission, currency_marker).ok_or_else(|| {
            ReportError::MalformedCommission {
                row: index + 1,
                value: raw_commission.to_string(),
            }
        })?;

        let item = positions.item_id.map(|id_index| {
            let quantity = match positions.quantity {
                Some(q) => parse_quantity(cell(q)).unwrap_or_else(|| {
                    report.unparseable_quantity_cells += 1;
                    0
                }),
                None => 1,
            };
            ItemInfo {
                id: cell(id_index).to_string(),
                name: positions.item_name.map(cell).unwrap_or("").to_string(),
                quantity,
            }
        });

        let order_status = cell(positions.status).to_string();
        let record = OrderRecord {
            status_class: classifier.classify(&order_status),
            order_status,
            channel: cell(positions.channel).to_string(),
            category: cell(positions.category).to_string(),
            order_time,
            completion_time,
            net_commission,
            item,
        };

        if reporting_date(&record).is_none() {
            report.dropped_date_rows += 1;
        }
        records.push(record);
    }

    report.rows = records.len();

    if report.has_warnings() {
        tracing::warn!(
            "Affiliate upload: {} of {} rows without reporting date, {} unparseable date cells, {} unparseable quantities",
            report.dropped_date_rows,
            report.rows,
            report.unparseable_date_cells,
            report.unparseable_quantity_cells
        );
    }
    tracing::info!("Affiliate upload normalized: {} rows", report.rows);

    Ok(Ingested {
        dataset: Dataset {
            records,
            has_items: positions.item_id.is_some(),
            has_completion_time: positions.completion_time.is_some(),
        },
        report,
    })
}
