//! Composes the filter, histogram, summary and map builders into one view.
//!
//! Every function here is pure: the same store, filter and region always
//! produce the same view.

use crate::dataset::DatasetStore;
use crate::errors::FilterError;
use crate::filters::{FilterState, filter_by_date, filter_by_hours};
use crate::histogram::build_histogram;
use crate::map::build_map;
use crate::models::{DashboardView, Histogram, MapProjection, Summary};
use crate::summary::build_summary;

pub fn build_view(
    store: &DatasetStore,
    filter: &FilterState,
    region: Option<&str>,
) -> Result<DashboardView, FilterError> {
    let date_filtered = filter_by_date(store, &filter.range);
    let histogram = build_histogram(&date_filtered, &filter.hours);
    let summary = build_summary(&date_filtered, &filter.hours);
    let map = build_map(&filter_by_hours(date_filtered, &filter.hours), region)?;

    Ok(DashboardView {
        start_date: filter.range.start(),
        end_date: filter.range.end(),
        hours: filter.hours.to_vec(),
        summary,
        histogram,
        map,
    })
}

pub fn summary_view(store: &DatasetStore, filter: &FilterState) -> Summary {
    build_summary(&filter_by_date(store, &filter.range), &filter.hours)
}

pub fn histogram_view(store: &DatasetStore, filter: &FilterState) -> Histogram {
    build_histogram(&filter_by_date(store, &filter.range), &filter.hours)
}

pub fn map_view(
    store: &DatasetStore,
    filter: &FilterState,
    region: Option<&str>,
) -> Result<MapProjection, FilterError> {
    let filtered = filter_by_hours(filter_by_date(store, &filter.range), &filter.hours);
    build_map(&filtered, region)
}
