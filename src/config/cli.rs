use crate::config::scenario_config::{
    default_formats, BoardConfig, PartyConfig, ProgressConfig, QuestConfig, ReportConfig,
    ScenarioConfig,
};
use crate::config::SUPPORTED_REPORT_FORMATS;
use crate::domain::model::{MemberId, Money};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_formats, validate_path, validate_positive_number, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "quest-board")]
#[command(about = "Quest board simulator: audit a reward, hire a party, clear the quest")]
pub struct CliConfig {
    /// Path to a TOML scenario file; replaces the quest flags below
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Standard price per hour in yen [default: 2500]
    #[arg(long)]
    pub standard_unit_price: Option<Money>,

    #[arg(long, default_value = "Dark Lord's annual report", conflicts_with = "scenario")]
    pub title: String,

    #[arg(long, default_value = "10", conflicts_with = "scenario")]
    pub hours: f64,

    /// Reward in yen; defaults to hours * standard unit price
    #[arg(long, conflicts_with = "scenario")]
    pub budget: Option<Money>,

    #[arg(long, default_value = "5", conflicts_with = "scenario")]
    pub req_int: u8,

    #[arg(long, default_value = "2", conflicts_with = "scenario")]
    pub req_str: u8,

    /// Member ids to recruit, in order
    #[arg(long, value_delimiter = ',', default_value = "1,2", conflicts_with = "scenario")]
    pub recruit: Vec<MemberId>,

    /// Progress ticks before the quest completes [default: 100]
    #[arg(long)]
    pub steps: Option<u32>,

    /// Milliseconds per progress tick [default: 20]
    #[arg(long)]
    pub tick_ms: Option<u64>,

    /// Directory for the settlement report
    #[arg(long)]
    pub report_dir: Option<String>,

    /// Report formats [default: csv,json]
    #[arg(long, value_delimiter = ',')]
    pub report_formats: Option<Vec<String>>,

    #[arg(long, help = "Only run the budget audit")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入劇本檔 (或以命令列參數組出劇本)，再套用明確指定的設定參數
    pub fn to_scenario(&self) -> Result<ScenarioConfig> {
        let mut scenario = match &self.scenario {
            Some(path) => ScenarioConfig::from_file(path)?,
            None => ScenarioConfig {
                board: None,
                profile: None,
                quest: QuestConfig {
                    title: self.title.clone(),
                    hours: self.hours,
                    budget: self.budget,
                    req_int: self.req_int,
                    req_str: self.req_str,
                },
                party: Some(PartyConfig {
                    recruit: self.recruit.clone(),
                }),
                progress: None,
                report: None,
            },
        };

        self.apply_overrides(&mut scenario);
        Ok(scenario)
    }

    fn apply_overrides(&self, scenario: &mut ScenarioConfig) {
        if let Some(price) = self.standard_unit_price {
            scenario
                .board
                .get_or_insert(BoardConfig {
                    standard_unit_price: None,
                })
                .standard_unit_price = Some(price);
        }

        if self.steps.is_some() || self.tick_ms.is_some() {
            let progress = scenario.progress.get_or_insert(ProgressConfig {
                steps: None,
                tick_ms: None,
            });
            if let Some(steps) = self.steps {
                progress.steps = Some(steps);
            }
            if let Some(tick_ms) = self.tick_ms {
                progress.tick_ms = Some(tick_ms);
            }
        }

        if let Some(dir) = &self.report_dir {
            let formats = scenario
                .report
                .take()
                .map(|r| r.formats)
                .unwrap_or_else(default_formats);
            scenario.report = Some(ReportConfig {
                output_path: dir.clone(),
                formats,
            });
        }

        if let Some(formats) = &self.report_formats {
            match scenario.report.as_mut() {
                Some(report) => report.formats = formats.clone(),
                None => tracing::warn!("⚠️ --report-formats ignored: no report directory set"),
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.scenario {
            validate_path("scenario", path)?;
        }
        if let Some(price) = self.standard_unit_price {
            validate_positive_number("standard_unit_price", price)?;
        }
        if let Some(steps) = self.steps {
            validate_positive_number("steps", steps)?;
        }
        if let Some(dir) = &self.report_dir {
            validate_path("report_dir", dir)?;
        }
        if let Some(formats) = &self.report_formats {
            validate_formats("report_formats", formats, &SUPPORTED_REPORT_FORMATS)?;
        }
        Ok(())
    }
}
