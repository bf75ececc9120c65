// Ideology Trends - Core Library
// Exposes all modules for use in CLI, web server, and tests

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod ideology;
pub mod logging;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use aggregate::{aggregate, selection_from_json, total, YearlyCount};
pub use chart::{Series, SeriesKind, TrendChart};
pub use config::Config;
pub use dashboard::{Dashboard, Layout, SelectionChanged, SelectorOption};
pub use dataset::{load_csv, Dataset, LeaderRecord};
pub use error::TrendError;
pub use ideology::Ideology;
pub use logging::init_logging;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
