use clap::Parser;
use quest_board::domain::ports::BoardSettings;
use quest_board::utils::error::ErrorSeverity;
use quest_board::utils::{logger, validation::Validate};
use quest_board::{
    CliConfig, LocalStorage, QuestBoard, QuestError, ReportWriter, SessionRunner, TickingProgress,
};

fn report_failure(e: &QuestError) {
    tracing::error!(
        "❌ Quest session failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn exit_code(e: &QuestError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2, // 使用者可修正
        ErrorSeverity::High => 1, // 設定或 IO
        ErrorSeverity::Critical => 3, // 協議違反
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting quest-board");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let scenario = match config.to_scenario().and_then(|s| s.validate().map(|_| s)) {
        Ok(scenario) => scenario,
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(&e).max(1));
        }
    };

    let driver = TickingProgress::new(scenario.progress_steps(), scenario.tick_ms());
    let runner = match scenario.report_path() {
        Some(dir) => SessionRunner::with_reports(
            driver,
            ReportWriter::new(
                LocalStorage::new(dir),
                scenario.report_formats().to_vec(),
            ),
        ),
        None => SessionRunner::new(driver),
    };

    let mut board = QuestBoard::new(scenario.standard_unit_price());

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - audit only");
        let report = runner.preview(&board, &scenario);
        println!(
            "🧮 Standard budget ¥{:.0}, distortion index {:.2}: {}",
            report.standard_budget, report.distortion_index, report.verdict
        );
        return Ok(());
    }

    for member in board.list_roster() {
        tracing::debug!("🕵️ #{} {} (¥{})", member.id, member.class_name, member.fee);
    }

    match runner.run(&mut board, &scenario).await {
        Ok(outcome) => {
            for payout in &outcome.settlement.payouts {
                println!("💸 Sent ¥{} to {}", payout.amount, payout.class_name);
            }
            println!(
                "💎 Your share: ¥{} (wallet ¥{})",
                outcome.settlement.remainder, outcome.balance
            );
            for path in &outcome.report_paths {
                println!("📁 Report saved to: {}", path);
            }
        }
        Err(e) => {
            report_failure(&e);
            let code = exit_code(&e);
            if code > 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}
