use crate::dashboard::{build_view, histogram_view, map_view, summary_view};
use crate::errors::{AppError, FilterError};
use crate::filters::{DatePickers, FilterState, HourSelection, parse_date};
use crate::map::region_markers;
use crate::models::{
    DashboardQuery, DashboardView, Histogram, MapProjection, PickerBounds, RegionMarker,
    SelectionRequest, SelectionResponse, Summary,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use tracing::{debug, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, AppError> {
    let filter = filter_from(&state, &query)?;
    let view = build_view(&state.dataset, &filter, query.region.as_deref())
        .map_err(rejected)?;
    debug!(
        total = view.summary.total,
        selected = view.summary.selected,
        "dashboard view built"
    );
    Ok(Json(view))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Summary>, AppError> {
    let filter = filter_from(&state, &query)?;
    Ok(Json(summary_view(&state.dataset, &filter)))
}

pub async fn get_histogram(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Histogram>, AppError> {
    let filter = filter_from(&state, &query)?;
    Ok(Json(histogram_view(&state.dataset, &filter)))
}

pub async fn get_map(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<MapProjection>, AppError> {
    let filter = filter_from(&state, &query)?;
    let map = map_view(&state.dataset, &filter, query.region.as_deref())
        .map_err(rejected)?;
    Ok(Json(map))
}

/// Clamps the requested dates against each other and the configured window.
pub async fn get_date_bounds(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<PickerBounds>, AppError> {
    let mut pickers = DatePickers::new(state.config.min_date, state.config.max_date);
    if let Some(start) = query.start_date.as_deref() {
        pickers.set_start(parse_date(start).map_err(rejected)?);
    }
    if let Some(end) = query.end_date.as_deref() {
        pickers.set_end(parse_date(end).map_err(rejected)?);
    }
    Ok(Json(pickers.bounds()))
}

pub async fn get_regions() -> Json<Vec<RegionMarker>> {
    Json(region_markers())
}

pub async fn post_selection(
    Json(payload): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let hours =
        HourSelection::from_chart(payload.click, &payload.selected).map_err(rejected)?;
    Ok(Json(SelectionResponse {
        hours: hours.to_vec(),
    }))
}

fn filter_from(state: &AppState, query: &DashboardQuery) -> Result<FilterState, AppError> {
    FilterState::from_query(query, &state.config).map_err(|err| AppError::from(rejected(err)))
}

fn rejected(err: FilterError) -> FilterError {
    warn!("rejected filter: {err}");
    err
}
