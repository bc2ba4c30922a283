use crate::errors::FilterError;
use crate::filters::parse_date;
use chrono::NaiveDate;
use std::{env, path::PathBuf};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/acidentes.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub port: u16,
    pub data_path: PathBuf,
    /// Earliest date the pickers allow; also the default range start.
    pub min_date: NaiveDate,
    /// Latest date the pickers allow; also the default range end.
    pub max_date: NaiveDate,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            min_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            max_date: NaiveDate::from_ymd_opt(2020, 9, 30).unwrap_or_default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, FilterError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FilterError> {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let data_path = lookup("ACCIDENTS_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let min_date = match lookup("DASHBOARD_MIN_DATE") {
            Some(value) => parse_date(&value)?,
            None => defaults.min_date,
        };
        let max_date = match lookup("DASHBOARD_MAX_DATE") {
            Some(value) => parse_date(&value)?,
            None => defaults.max_date,
        };
        if min_date > max_date {
            return Err(FilterError::InvertedRange {
                start: min_date.to_string(),
                end: max_date.to_string(),
            });
        }

        Ok(Self {
            port,
            data_path,
            min_date,
            max_date,
        })
    }
}
