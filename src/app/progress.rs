use crate::domain::model::Quest;
use crate::domain::ports::ProgressDriver;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 自動駕駛：依固定間隔推進百分比，跑到 100% 才返回
#[derive(Debug, Clone)]
pub struct TickingProgress {
    steps: u32,
    tick: Duration,
}

impl TickingProgress {
    pub fn new(steps: u32, tick_ms: u64) -> Self {
        Self {
            steps: steps.max(1),
            tick: Duration::from_millis(tick_ms),
        }
    }
}

#[async_trait]
impl ProgressDriver for TickingProgress {
    async fn drive(&self, quest: &Quest) -> Result<()> {
        tracing::info!("🤖 Autopilot ON for '{}'", quest.title);

        for step in 1..=self.steps {
            if !self.tick.is_zero() {
                tokio::time::sleep(self.tick).await;
            }
            let percent = step * 100 / self.steps;
            if percent < 100 {
                tracing::debug!("Progress... {}%", percent);
            }
        }

        tracing::info!("🏁 Progress 100% for '{}'", quest.title);
        Ok(())
    }
}

/// 立即完成，用於測試與快速模式
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantProgress;

#[async_trait]
impl ProgressDriver for InstantProgress {
    async fn drive(&self, quest: &Quest) -> Result<()> {
        tracing::debug!("⏩ Skipping progress for '{}'", quest.title);
        Ok(())
    }
}
