pub mod categories;
pub mod config;
pub mod indicator;
pub mod signal;
pub mod types;

pub use categories::{CategoryGroup, FilterCategory, FilterCategoryTable};
pub use config::Config;
pub use indicator::{IndicatorView, MatchIndicator};
pub use signal::{SignalExtractor, DEFAULT_MATCH_TOOL};
pub use types::*;
