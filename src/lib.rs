// Ward Reports - Core Library
// Exposes the record store, query service, export formatters, and API
// router for use by the server binary and tests.

pub mod api;
pub mod config;
pub mod db;
pub mod export;
pub mod query;

// Re-export commonly used types
pub use api::{router, AppState};
pub use config::Config;
pub use db::{
    all_reports, count_reports, insert_report, setup_database, Database, NewReport, Report,
};
pub use query::{find_reports, ReportFilter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
