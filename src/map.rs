use crate::errors::FilterError;
use crate::filters::RecordSet;
use crate::models::{
    AccidentRecord, ColorStop, HOURS, LegendTick, MapPoint, MapProjection, PointStyle,
    RegionMarker, Tooltip, Viewport,
};
use crate::regions::{self, DEFAULT_REGION, REGIONS};

pub const DEFAULT_ZOOM: f64 = 7.0;

/// Legend always spans the whole day.
pub const COLOR_DOMAIN: [u8; 2] = [0, 23];

/// Gradient stops over the normalized hour. The spacing is not uniform.
pub const COLOR_SCALE: [(f64, &str); 16] = [
    (0.0, "#F4EC15"),
    (0.04167, "#DAF017"),
    (0.0833, "#BBEC19"),
    (0.125, "#9DE81B"),
    (0.1667, "#80E41D"),
    (0.2083, "#66E01F"),
    (0.25, "#4CDC20"),
    (0.292, "#34D822"),
    (0.333, "#24D249"),
    (0.375, "#25D042"),
    (0.4167, "#26CC58"),
    (0.4583, "#28C86D"),
    (0.50, "#29C481"),
    (0.54167, "#2AC093"),
    (0.5833, "#2BBCA4"),
    (1.0, "#613099"),
];

const ACCIDENT_STYLE: PointStyle = PointStyle {
    size: 5,
    opacity: 0.5,
    color: None,
};

const REGION_STYLE: PointStyle = PointStyle {
    size: 8,
    opacity: 1.0,
    color: Some("#ffa0a0"),
};

pub fn build_map_points(filtered: &RecordSet<'_>) -> Vec<MapPoint> {
    filtered.iter().map(to_point).collect()
}

fn to_point(record: &AccidentRecord) -> MapPoint {
    MapPoint {
        id: record.id,
        lat: record.latitude,
        lon: record.longitude,
        color_value: record.hour(),
        color: color_for_hour(record.hour()),
        tooltip: Tooltip {
            cause: record.cause.clone(),
            kind: record.kind.clone(),
            classification: record.classification.clone(),
            date: record.timestamp.format("%d/%m/%Y").to_string(),
            time: record.timestamp.format("%H:%M").to_string(),
            weather_condition: record.weather_condition.clone(),
            people: record.people,
            deaths: record.deaths,
            minor_injuries: record.minor_injuries,
            severe_injuries: record.severe_injuries,
            uninjured: record.uninjured,
            unknown: record.unknown,
            vehicles: record.vehicles,
        },
    }
}

/// Orientation markers; never filtered.
pub fn region_markers() -> Vec<RegionMarker> {
    REGIONS
        .iter()
        .map(|region| RegionMarker {
            code: region.code,
            lat: region.lat,
            lon: region.lon,
        })
        .collect()
}

pub fn color_scale() -> Vec<ColorStop> {
    COLOR_SCALE
        .iter()
        .map(|&(position, color)| ColorStop { position, color })
        .collect()
}

/// Linear interpolation between the two `COLOR_SCALE` stops around the
/// hour's position in the day.
pub fn color_for_hour(hour: u8) -> String {
    let [low, high] = COLOR_DOMAIN;
    let position = f64::from(hour.clamp(low, high) - low) / f64::from(high - low);

    let upper = COLOR_SCALE
        .iter()
        .position(|&(stop, _)| stop >= position)
        .unwrap_or(COLOR_SCALE.len() - 1);
    let lower = upper.saturating_sub(1);
    let (from, from_color) = COLOR_SCALE[lower];
    let (to, to_color) = COLOR_SCALE[upper];

    let t = if to > from {
        (position - from) / (to - from)
    } else {
        0.0
    };
    let [r0, g0, b0] = hex_rgb(from_color);
    let [r1, g1, b1] = hex_rgb(to_color);
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;

    format!("#{:02X}{:02X}{:02X}", mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

fn hex_rgb(color: &str) -> [u8; 3] {
    let channel = |range: std::ops::Range<usize>| {
        color
            .get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .unwrap_or(0)
    };
    [channel(1..3), channel(3..5), channel(5..7)]
}

/// One colorbar tick per hour of the day.
pub fn legend() -> Vec<LegendTick> {
    (0..HOURS as u8)
        .map(|hour| LegendTick {
            hour,
            color: color_for_hour(hour),
        })
        .collect()
}

pub fn viewport_for(region: Option<&str>) -> Result<Viewport, FilterError> {
    let code = match region.map(str::trim) {
        Some(code) if !code.is_empty() => code,
        _ => DEFAULT_REGION,
    };
    let region = regions::find(code)
        .ok_or_else(|| FilterError::UnknownRegion(code.to_string()))?;
    Ok(Viewport {
        lat: region.lat,
        lon: region.lon,
        zoom: DEFAULT_ZOOM,
        bearing: 0.0,
    })
}

pub fn build_map(
    filtered: &RecordSet<'_>,
    region: Option<&str>,
) -> Result<MapProjection, FilterError> {
    Ok(MapProjection {
        points: build_map_points(filtered),
        point_style: ACCIDENT_STYLE,
        color_domain: COLOR_DOMAIN,
        color_scale: color_scale(),
        legend: legend(),
        regions: region_markers(),
        region_style: REGION_STYLE,
        viewport: viewport_for(region)?,
    })
}
