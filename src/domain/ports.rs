use crate::domain::model::{Money, Quest};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait BoardSettings: Send + Sync {
    fn standard_unit_price(&self) -> Money;
    fn progress_steps(&self) -> u32;
    fn tick_ms(&self) -> u64;
    fn report_path(&self) -> Option<&str>;
    fn report_formats(&self) -> &[String];
}

/// 外部進度驅動器：跑完後由呼叫端觸發一次完成事件
#[async_trait]
pub trait ProgressDriver: Send + Sync {
    async fn drive(&self, quest: &Quest) -> Result<()>;
}
