#[cfg(feature = "cli")]
pub mod cli;
pub mod local_storage;
pub mod scenario_config;

use crate::domain::model::Money;

/// 每小時標準單價 (日圓)
pub const DEFAULT_STANDARD_UNIT_PRICE: Money = 2500;
pub const DEFAULT_PROGRESS_STEPS: u32 = 100;
pub const DEFAULT_TICK_MS: u64 = 20;
pub const SUPPORTED_REPORT_FORMATS: [&str; 2] = ["csv", "json"];

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use local_storage::LocalStorage;
pub use scenario_config::ScenarioConfig;
