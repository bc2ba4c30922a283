use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Number of hour buckets in a day.
pub const HOURS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u64);

/// One accident row. Never modified after the dataset is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct AccidentRecord {
    pub id: RecordId,
    pub timestamp: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
    pub cause: String,
    pub kind: String,
    pub classification: String,
    pub weather_condition: String,
    pub people: u32,
    pub deaths: u32,
    pub minor_injuries: u32,
    pub severe_injuries: u32,
    pub uninjured: u32,
    pub unknown: u32,
    pub vehicles: u32,
}

impl AccidentRecord {
    pub fn hour(&self) -> u8 {
        // `hour()` is always in 0..24
        self.timestamp.hour() as u8
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub hours: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub click: Option<u8>,
    #[serde(default)]
    pub selected: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SelectionResponse {
    pub hours: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Histogram {
    pub hours: [u8; HOURS],
    pub counts: [u64; HOURS],
    pub colors: [&'static str; HOURS],
    pub y_max: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Summary {
    pub total: u64,
    pub selected: u64,
    pub total_label: String,
    pub selected_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tooltip {
    pub cause: String,
    pub kind: String,
    pub classification: String,
    pub date: String,
    pub time: String,
    pub weather_condition: String,
    pub people: u32,
    pub deaths: u32,
    pub minor_injuries: u32,
    pub severe_injuries: u32,
    pub uninjured: u32,
    pub unknown: u32,
    pub vehicles: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapPoint {
    pub id: RecordId,
    pub lat: f64,
    pub lon: f64,
    pub color_value: u8,
    pub color: String,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegendTick {
    pub hour: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegionMarker {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Viewport {
    pub lat: f64,
    pub lon: f64,
    pub zoom: f64,
    pub bearing: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PointStyle {
    pub size: u32,
    pub opacity: f64,
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapProjection {
    pub points: Vec<MapPoint>,
    pub point_style: PointStyle,
    pub color_domain: [u8; 2],
    pub color_scale: Vec<ColorStop>,
    pub legend: Vec<LegendTick>,
    pub regions: Vec<RegionMarker>,
    pub region_style: PointStyle,
    pub viewport: Viewport,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours: Vec<u8>,
    pub summary: Summary,
    pub histogram: Histogram,
    pub map: MapProjection,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PickerBounds {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start: DateBounds,
    pub end: DateBounds,
}

#[cfg(test)]
pub(crate) fn sample_record(id: u64, timestamp: &str) -> AccidentRecord {
    AccidentRecord {
        id: RecordId(id),
        timestamp: NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S")
            .expect("valid test timestamp"),
        latitude: -5.8,
        longitude: -36.6,
        cause: "Falta de atenção".to_string(),
        kind: "Colisão traseira".to_string(),
        classification: "Com vítimas feridas".to_string(),
        weather_condition: "Céu claro".to_string(),
        people: 2,
        deaths: 0,
        minor_injuries: 1,
        severe_injuries: 0,
        uninjured: 1,
        unknown: 0,
        vehicles: 2,
    }
}
