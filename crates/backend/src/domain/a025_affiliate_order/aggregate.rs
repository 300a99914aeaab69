use chrono::{NaiveDate, NaiveDateTime};
use contracts::enums::ReportDimension;
use rust_decimal::Decimal;

/// Which timestamp an order is reported under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// Reported under `completion_time`
    Completed,
    /// Reported under `order_time`
    Open,
}

/// Classifies free-text order statuses by case-insensitive substring
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    markers: Vec<String>,
}

impl StatusClassifier {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, status: &str) -> StatusClass {
        let status = status.to_lowercase();
        if self.markers.iter().any(|m| status.contains(m.as_str())) {
            StatusClass::Completed
        } else {
            StatusClass::Open
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub id: String,
    pub name: String,
    pub quantity: i64,
}

/// One normalized row of an affiliate export
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order_status: String,
    pub status_class: StatusClass,
    pub channel: String,
    pub category: String,
    pub order_time: Option<NaiveDateTime>,
    pub completion_time: Option<NaiveDateTime>,
    pub net_commission: Decimal,
    pub item: Option<ItemInfo>,
}

impl OrderRecord {
    pub fn dimension_value(&self, dimension: ReportDimension) -> &str {
        match dimension {
            ReportDimension::Status => &self.order_status,
            ReportDimension::Channel => &self.channel,
            ReportDimension::Category => &self.category,
        }
    }
}

/// Date a record is filtered by: completion date for completed orders,
/// order date otherwise. Time of day is discarded.
pub fn reporting_date(record: &OrderRecord) -> Option<NaiveDate> {
    let timestamp = match record.status_class {
        StatusClass::Completed => record.completion_time,
        StatusClass::Open => record.order_time,
    };
    timestamp.map(|t| t.date())
}

/// Normalized content of one upload. Never mutated after ingestion.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<OrderRecord>,
    /// The upload carried the item id column
    pub has_items: bool,
    /// The upload carried the completion time column
    pub has_completion_time: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2024, 1, day).and_then(|d| d.and_hms_opt(15, 30, 0))
    }

    fn record(status_class: StatusClass) -> OrderRecord {
        OrderRecord {
            order_status: "x".to_string(),
            status_class,
            channel: "App".to_string(),
            category: "Casa".to_string(),
            order_time: at(3),
            completion_time: at(9),
            net_commission: Decimal::ONE,
            item: None,
        }
    }

    #[test]
    fn test_classifier_markers() {
        let classifier = StatusClassifier::new(["Concluído", "completed", "  "]);
        assert_eq!(classifier.classify("Concluído"), StatusClass::Completed);
        assert_eq!(classifier.classify("PEDIDO CONCLUÍDO"), StatusClass::Completed);
        assert_eq!(classifier.classify("Completed"), StatusClass::Completed);
        assert_eq!(classifier.classify("Pendente"), StatusClass::Open);
        assert_eq!(classifier.classify(""), StatusClass::Open);
    }

    #[test]
    fn test_reporting_date_follows_status_class() {
        assert_eq!(
            reporting_date(&record(StatusClass::Completed)),
            NaiveDate::from_ymd_opt(2024, 1, 9)
        );
        assert_eq!(
            reporting_date(&record(StatusClass::Open)),
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
    }

    #[test]
    fn test_completed_without_completion_time_has_no_date() {
        let mut completed = record(StatusClass::Completed);
        completed.completion_time = None;
        assert_eq!(reporting_date(&completed), None);
    }
}
