use crate::app::report::ReportWriter;
use crate::config::ScenarioConfig;
use crate::core::audit::audit;
use crate::core::board::QuestBoard;
use crate::domain::model::{AuditReport, Money, Settlement};
use crate::domain::ports::{ProgressDriver, Storage};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub audit: AuditReport,
    pub settlement: Settlement,
    pub report_paths: Vec<String>,
    pub balance: Money,
}

/// 依劇本跑完一個任務：審核、發布、招募、出發、完成、結算
pub struct SessionRunner<P: ProgressDriver, S: Storage> {
    driver: P,
    reports: Option<ReportWriter<S>>,
}

impl<P: ProgressDriver, S: Storage> SessionRunner<P, S> {
    pub fn new(driver: P) -> Self {
        Self {
            driver,
            reports: None,
        }
    }

    pub fn with_reports(driver: P, reports: ReportWriter<S>) -> Self {
        Self {
            driver,
            reports: Some(reports),
        }
    }

    /// 以任務板的單價做審核，不動任何狀態
    pub fn preview(&self, board: &QuestBoard, scenario: &ScenarioConfig) -> AuditReport {
        let price = board.standard_unit_price();
        let draft = scenario.quest_draft(price);
        audit(draft.budget, draft.hours, price)
    }

    pub async fn run(
        &self,
        board: &mut QuestBoard,
        scenario: &ScenarioConfig,
    ) -> Result<SessionOutcome> {
        if let Some(profile) = &scenario.profile {
            board.update_profile(
                profile.name(),
                profile.strength(),
                profile.intelligence(),
                profile.charisma(),
            )?;
        }
        tracing::info!("🛡️ Adventurer: {}", board.profile().name());

        let draft = scenario.quest_draft(board.standard_unit_price());
        let audit = board.create_quest(&draft)?.audit();

        for &member_id in scenario.recruits() {
            match board.recruit(member_id) {
                Ok(_) => {}
                // 買不起或重複的人選直接跳過，其餘錯誤上拋
                Err(e) if e.is_recoverable() => {
                    tracing::warn!("⏭️ Skipping member #{}: {}", member_id, e);
                }
                Err(e) => return Err(e),
            }
        }

        let overview = board.overview()?;
        tracing::info!(
            "⚔️ Party power {} vs boss {} (win rate {}%)",
            overview.aggregate_power,
            overview.boss_threshold,
            overview.win_percent
        );

        let quest = board.depart()?.clone();
        self.driver.drive(&quest).await?;
        board.complete_quest()?;

        let settlement = board.settle()?;
        let report_paths = match &self.reports {
            Some(writer) => writer.write(&settlement).await?,
            None => Vec::new(),
        };

        Ok(SessionOutcome {
            audit,
            settlement,
            report_paths,
            balance: board.wallet().balance(),
        })
    }
}
