pub mod app;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod errors;
pub mod filters;
pub mod handlers;
pub mod histogram;
pub mod map;
pub mod models;
pub mod regions;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::DashboardConfig;
pub use dataset::{DatasetStore, load_dataset};
pub use state::AppState;
