use anyhow::Result;
use quest_board::app::report::{CSV_FILENAME, JSON_FILENAME};
use quest_board::domain::model::QuestPhase;
use quest_board::domain::ports::BoardSettings;
use quest_board::{
    InstantProgress, LocalStorage, QuestBoard, QuestError, ReportWriter, ScenarioConfig,
    SessionRunner, TickingProgress,
};
use tempfile::TempDir;

fn scenario_toml(output_path: &str, budget: i64, recruits: &str) -> String {
    format!(
        r#"
[board]
standard_unit_price = 2500

[profile]
name = "Aki"
STR = 4
INT = 8
CHA = 6

[quest]
title = "Dark Lord's annual report"
hours = 10.0
budget = {}
req_int = 5
req_str = 2

[party]
recruit = [{}]

[progress]
steps = 5
tick_ms = 1

[report]
output_path = "{}"
formats = ["csv", "json"]
"#,
        budget, recruits, output_path
    )
}

#[tokio::test]
async fn test_scenario_file_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");

    let config_path = format!("{}/scenario.toml", temp_path);
    tokio::fs::write(&config_path, scenario_toml(&temp_path, 25000, "1, 2")).await?;
    let scenario = ScenarioConfig::from_file(&config_path)?;

    let storage = LocalStorage::new(scenario.report_path().unwrap());
    let writer = ReportWriter::new(storage, scenario.report_formats().to_vec());
    let driver = TickingProgress::new(scenario.progress_steps(), scenario.tick_ms());
    let runner = SessionRunner::with_reports(driver, writer);

    let mut board = QuestBoard::new(scenario.standard_unit_price());
    let outcome = runner.run(&mut board, &scenario).await?;

    assert_eq!(board.profile().name(), "Aki");
    assert_eq!(outcome.settlement.remainder, 21200);
    assert_eq!(outcome.balance, 21200);
    assert_eq!(outcome.report_paths.len(), 2);
    assert_eq!(board.phase(), QuestPhase::Absent);

    let csv = std::fs::read_to_string(temp_dir.path().join(CSV_FILENAME))?;
    assert!(csv.starts_with("recipient,member_id,amount"));
    assert!(csv.contains("Mage (Accounting),1,2000"));
    assert!(csv.contains("quest giver (remainder),,21200"));

    let json: serde_json::Value =
        serde_json::from_slice(&std::fs::read(temp_dir.path().join(JSON_FILENAME))?)?;
    assert_eq!(json["quest_title"], "Dark Lord's annual report");
    assert_eq!(json["payouts"][1]["amount"], 1800);

    Ok(())
}

#[tokio::test]
async fn test_overpriced_scenario_is_blocked() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");
    let scenario = ScenarioConfig::from_toml_str(&scenario_toml(&temp_path, 80000, "1, 2"))?;

    let runner: SessionRunner<_, LocalStorage> = SessionRunner::new(InstantProgress);
    let mut board = QuestBoard::new(scenario.standard_unit_price());
    let preview = runner.preview(&board, &scenario);
    assert!((preview.distortion_index - 3.2).abs() < 1e-9);

    let err = runner.run(&mut board, &scenario).await.unwrap_err();
    assert!(matches!(err, QuestError::AuditRejected { .. }));
    assert!(err.is_recoverable());
    assert_eq!(board.phase(), QuestPhase::Absent);
    assert!(!temp_dir.path().join(CSV_FILENAME).exists());
    Ok(())
}

#[tokio::test]
async fn test_unaffordable_members_are_skipped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let temp_path = temp_dir.path().to_str().unwrap().replace('\\', "/");
    // 4h -> 標準 10000；報酬 5000 (index 0.5)
    let content =
        scenario_toml(&temp_path, 5000, "3, 1, 2, 1").replace("hours = 10.0", "hours = 4.0");
    let scenario = ScenarioConfig::from_toml_str(&content)?;

    let runner: SessionRunner<_, LocalStorage> = SessionRunner::new(InstantProgress);
    let mut board = QuestBoard::new(2500);
    let outcome = runner.run(&mut board, &scenario).await?;

    // Jester 3000 hired first, Mage 2000 fills the rest, Warrior and the repeat are skipped
    let ids: Vec<u32> = outcome.settlement.payouts.iter().map(|p| p.member_id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(outcome.settlement.remainder, 0);
    assert_eq!(board.wallet().ledger().len(), 1);
    Ok(())
}
