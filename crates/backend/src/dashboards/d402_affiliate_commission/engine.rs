use chrono::NaiveDate;
use contracts::dashboards::d402_affiliate_commission::{
    AggregateResult, CommissionStats, Comparison, DateRange, FilterSpec, GroupTotal,
    ReportOutcome, TopItem,
};
use contracts::enums::ReportDimension;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

use crate::domain::a025_affiliate_order::{reporting_date, OrderRecord, StatusClass};
use crate::shared::format::format_brl;

fn passes_categories(record: &OrderRecord, spec: &FilterSpec) -> bool {
    ReportDimension::all()
        .into_iter()
        .all(|dimension| spec.selection(dimension).allows(record.dimension_value(dimension)))
}

fn passes_dates(record: &OrderRecord, range: &DateRange) -> bool {
    reporting_date(record).is_some_and(|date| range.contains(date))
}

/// Rows matching the filter: completed orders first, then the rest,
/// each in upload order
pub fn filter_records<'a>(records: &'a [OrderRecord], spec: &FilterSpec) -> Vec<&'a OrderRecord> {
    let (completed, open): (Vec<&OrderRecord>, Vec<&OrderRecord>) = records
        .iter()
        .partition(|r| r.status_class == StatusClass::Completed);

    let completed_range = spec.completed_date_range();
    let open_range = &spec.date_range;

    completed
        .into_iter()
        .filter(|r| passes_categories(r, spec) && passes_dates(r, completed_range))
        .chain(
            open.into_iter()
                .filter(|r| passes_categories(r, spec) && passes_dates(r, open_range)),
        )
        .collect()
}

/// Count, sum, statistics and per-group sums over already filtered rows
pub fn aggregate(filtered: &[&OrderRecord], group_by: ReportDimension) -> AggregateResult {
    let total: Decimal = filtered.iter().map(|r| r.net_commission).sum();

    let stats = match (
        filtered.iter().map(|r| r.net_commission).min(),
        filtered.iter().map(|r| r.net_commission).max(),
    ) {
        (Some(min), Some(max)) => Some(CommissionStats {
            mean: total / Decimal::from(filtered.len()),
            min,
            max,
        }),
        _ => None,
    };

    AggregateResult {
        row_count: filtered.len(),
        total_commission: total,
        total_display: format_brl(total),
        stats,
        group_by,
        grouped_totals: grouped_totals(filtered, group_by),
    }
}

/// Sums per group, highest first. Equal totals keep first-seen order.
pub fn grouped_totals(filtered: &[&OrderRecord], group_by: ReportDimension) -> Vec<GroupTotal> {
    let mut groups: Vec<GroupTotal> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for record in filtered {
        let key = record.dimension_value(group_by);
        let index = *positions.entry(key).or_insert_with(|| {
            groups.push(GroupTotal {
                key: key.to_string(),
                total: Decimal::ZERO,
                orders: 0,
            });
            groups.len() - 1
        });
        groups[index].total += record.net_commission;
        groups[index].orders += 1;
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

/// Runs one query. `Empty` when no row passes the filter.
pub fn filter_and_aggregate(
    records: &[OrderRecord],
    spec: &FilterSpec,
    group_by: ReportDimension,
) -> ReportOutcome {
    let filtered = filter_records(records, spec);
    if filtered.is_empty() {
        return ReportOutcome::Empty;
    }
    ReportOutcome::Populated(aggregate(&filtered, group_by))
}

/// Two independent queries and the change of total between them.
/// The periods may overlap.
pub fn compare(
    records: &[OrderRecord],
    first: &FilterSpec,
    second: &FilterSpec,
    group_by: ReportDimension,
) -> Comparison {
    let first = aggregate(&filter_records(records, first), group_by);
    let second = aggregate(&filter_records(records, second), group_by);

    let delta = second.total_commission - first.total_commission;
    // `None` for a zero base or a ratio beyond `Decimal`'s range
    let delta_ratio = delta.checked_div(first.total_commission);

    Comparison {
        first,
        second,
        delta,
        delta_ratio,
    }
}

/// Distinct non-empty values of a dimension, sorted
pub fn available_values(records: &[OrderRecord], dimension: ReportDimension) -> BTreeSet<String> {
    records
        .iter()
        .map(|r| r.dimension_value(dimension))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Earliest and latest reporting date, `None` if no row has one
pub fn date_bounds(records: &[OrderRecord]) -> Option<DateRange> {
    let dates: Vec<NaiveDate> = records.iter().filter_map(reporting_date).collect();
    let start = dates.iter().min()?;
    let end = dates.iter().max()?;
    Some(DateRange::new(*start, *end))
}

/// Best-selling items by summed quantity, at most `limit` of them.
/// Rows without item data are skipped; the first name seen for an id wins.
pub fn top_items(records: &[&OrderRecord], limit: usize) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for item in records.iter().filter_map(|r| r.item.as_ref()) {
        let index = *positions.entry(item.id.as_str()).or_insert_with(|| {
            items.push(TopItem {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                quantity: 0,
            });
            items.len() - 1
        });
        items[index].quantity = items[index].quantity.saturating_add(item.quantity);
    }

    items.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    items.truncate(limit);
    items
}
