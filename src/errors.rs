use axum::http::StatusCode;

/// Rejections raised while turning user input into a filter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: String, end: String },

    #[error("invalid hour '{0}', expected an integer between 0 and 23")]
    InvalidHour(String),

    #[error("unknown region '{0}'")]
    UnknownRegion(String),
}

/// Failures while loading the accident dataset. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("record {id}: invalid timestamp '{value}'")]
    InvalidTimestamp { id: u64, value: String },

    #[error("record {id}: invalid {field} '{value}'")]
    InvalidCoordinate {
        id: u64,
        field: &'static str,
        value: String,
    },

    #[error("duplicate record id {0}")]
    DuplicateId(u64),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
