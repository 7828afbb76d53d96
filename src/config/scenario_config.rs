use crate::config::{
    DEFAULT_PROGRESS_STEPS, DEFAULT_STANDARD_UNIT_PRICE, DEFAULT_TICK_MS, SUPPORTED_REPORT_FORMATS,
};
use crate::core::audit::suggested_budget;
use crate::core::profile::AdventurerProfile;
use crate::domain::model::{MemberId, Money, QuestDraft};
use crate::domain::ports::BoardSettings;
use crate::utils::error::{QuestError, Result};
use crate::utils::validation::{
    validate_formats, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 一次完整遊玩流程的劇本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub board: Option<BoardConfig>,
    pub profile: Option<AdventurerProfile>,
    pub quest: QuestConfig,
    pub party: Option<PartyConfig>,
    pub progress: Option<ProgressConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub standard_unit_price: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestConfig {
    pub title: String,
    pub hours: f64,
    pub budget: Option<Money>, // 省略時使用建議報酬
    pub req_int: u8,
    pub req_str: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyConfig {
    #[serde(default)]
    pub recruit: Vec<MemberId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    pub steps: Option<u32>,
    pub tick_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
}

pub(crate) fn default_formats() -> Vec<String> {
    SUPPORTED_REPORT_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入劇本
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析劇本
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QuestError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${QUEST_BUDGET})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuestError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// 未填報酬時以給定單價的建議報酬補上
    pub fn quest_draft(&self, standard_unit_price: Money) -> QuestDraft {
        let budget = self
            .quest
            .budget
            .unwrap_or_else(|| suggested_budget(self.quest.hours, standard_unit_price));

        QuestDraft {
            title: self.quest.title.clone(),
            hours: self.quest.hours,
            budget,
            req_int: self.quest.req_int,
            req_str: self.quest.req_str,
        }
    }

    pub fn recruits(&self) -> &[MemberId] {
        self.party.as_ref().map(|p| p.recruit.as_slice()).unwrap_or(&[])
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_positive_number("board.standard_unit_price", self.standard_unit_price())?;

        if let Some(profile) = &self.profile {
            validate_non_empty_string("profile.name", &profile.name)?;
            validate_range("profile.STR", profile.strength, 1, 10)?;
            validate_range("profile.INT", profile.intelligence, 1, 10)?;
            validate_range("profile.CHA", profile.charisma, 1, 10)?;
        }

        validate_non_empty_string("quest.title", &self.quest.title)?;
        validate_positive_number("quest.hours", self.quest.hours)?;
        validate_range("quest.req_int", self.quest.req_int, 0, 10)?;
        validate_range("quest.req_str", self.quest.req_str, 0, 10)?;

        validate_positive_number("progress.steps", self.progress_steps())?;

        if let Some(report) = &self.report {
            validate_path("report.output_path", &report.output_path)?;
            validate_formats("report.formats", &report.formats, &SUPPORTED_REPORT_FORMATS)?;
        }

        Ok(())
    }
}

impl BoardSettings for ScenarioConfig {
    fn standard_unit_price(&self) -> Money {
        self.board
            .as_ref()
            .and_then(|b| b.standard_unit_price)
            .unwrap_or(DEFAULT_STANDARD_UNIT_PRICE)
    }

    fn progress_steps(&self) -> u32 {
        self.progress
            .as_ref()
            .and_then(|p| p.steps)
            .unwrap_or(DEFAULT_PROGRESS_STEPS)
    }

    fn tick_ms(&self) -> u64 {
        self.progress
            .as_ref()
            .and_then(|p| p.tick_ms)
            .unwrap_or(DEFAULT_TICK_MS)
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.output_path.as_str())
    }

    fn report_formats(&self) -> &[String] {
        self.report
            .as_ref()
            .map(|r| r.formats.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
