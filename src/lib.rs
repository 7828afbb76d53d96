pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, ScenarioConfig};

pub use crate::app::{InstantProgress, ReportWriter, SessionRunner, TickingProgress};
pub use crate::core::{
    board::QuestBoard, profile::AdventurerProfile, roster::RosterCatalog, wallet::Wallet,
};
pub use utils::error::{QuestError, Result};
