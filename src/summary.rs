use crate::filters::{HourSelection, RecordSet};
use crate::models::Summary;

pub fn count_total(date_filtered: &RecordSet<'_>) -> u64 {
    date_filtered.len() as u64
}

pub fn count_selected(date_filtered: &RecordSet<'_>, selection: &HourSelection) -> u64 {
    if selection.is_empty() {
        return count_total(date_filtered);
    }
    date_filtered
        .iter()
        .filter(|record| selection.contains(record.hour()))
        .count() as u64
}

pub fn build_summary(date_filtered: &RecordSet<'_>, selection: &HourSelection) -> Summary {
    let total = count_total(date_filtered);
    let selected = count_selected(date_filtered, selection);
    Summary {
        total,
        selected,
        total_label: format!("Total accidents in range: {total}"),
        selected_label: format!("Total accidents in selected hours: {selected}"),
    }
}
