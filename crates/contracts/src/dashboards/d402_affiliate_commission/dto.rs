use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filter::{DateRange, FilterSpec};
use crate::enums::ReportDimension;

fn default_group_by() -> String {
    ReportDimension::Status.code().to_string()
}

fn default_top_limit() -> usize {
    10
}

/// POST /api/d402/uploads/:id/report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub filter: FilterSpec,
    /// Dimension code: "status", "channel" or "category"
    #[serde(default = "default_group_by")]
    pub group_by: String,
}

/// POST /api/d402/uploads/:id/compare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareRequest {
    pub first: FilterSpec,
    pub second: FilterSpec,
    #[serde(default = "default_group_by")]
    pub group_by: String,
}

/// POST /api/d402/uploads/:id/top-items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopItemsRequest {
    /// Rank only the rows passing this filter; all rows when absent
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    #[serde(default = "default_top_limit")]
    pub limit: usize,
}

/// Sum of net commission for one value of the grouping dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: Decimal,
    /// Number of orders in the group
    pub orders: usize,
}

/// Scalar statistics, only defined for a non-empty result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionStats {
    pub mean: Decimal,
    pub min: Decimal,
    pub max: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub row_count: usize,
    pub total_commission: Decimal,
    /// Total in the export's display convention, e.g. "R$ 1.234,56"
    pub total_display: String,
    /// `None` when no row passed the filter
    pub stats: Option<CommissionStats>,
    pub group_by: ReportDimension,
    /// Sorted by total, descending
    pub grouped_totals: Vec<GroupTotal>,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// Result of a single dashboard query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReportOutcome {
    /// No row passed the filter; nothing to chart
    Empty,
    Populated(AggregateResult),
}

impl ReportOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn into_result(self) -> Option<AggregateResult> {
        match self {
            Self::Empty => None,
            Self::Populated(result) => Some(result),
        }
    }
}

/// Two periods side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: AggregateResult,
    pub second: AggregateResult,
    /// `second.total_commission - first.total_commission`
    pub delta: Decimal,
    /// `delta / first.total_commission`, absent when the first total is zero
    pub delta_ratio: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub item_id: String,
    pub item_name: String,
    pub quantity: i64,
}

/// Per-upload tallies of cells that could not be used
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub rows: usize,
    /// Rows without a usable reporting date; excluded from every dated view
    pub dropped_date_rows: usize,
    pub unparseable_date_cells: usize,
    pub unparseable_quantity_cells: usize,
}

impl IngestReport {
    pub fn has_warnings(&self) -> bool {
        self.dropped_date_rows > 0
            || self.unparseable_date_cells > 0
            || self.unparseable_quantity_cells > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValues {
    pub statuses: Vec<String>,
    pub channels: Vec<String>,
    pub categories: Vec<String>,
}

/// Response to a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadSummary {
    pub upload_id: Uuid,
    pub file_name: Option<String>,
    pub report: IngestReport,
    pub values: DimensionValues,
    /// Earliest and latest reporting date, for the default date pickers
    pub date_bounds: Option<DateRange>,
    pub has_items: bool,
    /// Without it completed orders cannot be placed in any date range
    pub has_completion_time: bool,
}

/// GET /api/d402/uploads/:id/values/:dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionValuesResponse {
    pub dimension: ReportDimension,
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_outcome_is_tagged() {
        let json = serde_json::to_value(ReportOutcome::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "empty" }));
    }

    #[test]
    fn test_populated_outcome_flattens_result() {
        let outcome = ReportOutcome::Populated(AggregateResult {
            row_count: 1,
            total_commission: Decimal::new(10000, 2),
            total_display: "R$ 100,00".to_string(),
            stats: None,
            group_by: ReportDimension::Channel,
            grouped_totals: vec![],
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "populated");
        assert_eq!(json["row_count"], 1);
        assert_eq!(json["total_commission"], "100.00");
        assert_eq!(json["group_by"], "channel");
    }

    #[test]
    fn test_request_defaults() {
        let json = r#"{ "filter": { "date_range": { "start": "2024-01-01", "end": "2024-01-31" } } }"#;
        let request: ReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.group_by, "status");

        let top: TopItemsRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(top.limit, 10);
        assert!(top.filter.is_none());
    }
}
