use crate::domain::model::{MemberId, Money, Settlement};
use crate::domain::ports::Storage;
use crate::utils::error::{QuestError, Result};
use serde::Serialize;

pub const CSV_FILENAME: &str = "settlement.csv";
pub const JSON_FILENAME: &str = "settlement.json";

#[derive(Debug, Serialize)]
struct PayoutRow<'a> {
    recipient: &'a str,
    member_id: Option<MemberId>,
    amount: Money,
}

/// 結算明細：每位成員一列，最後一列是委託人的剩餘
pub fn to_csv(settlement: &Settlement) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    for payout in &settlement.payouts {
        writer.serialize(PayoutRow {
            recipient: &payout.class_name,
            member_id: Some(payout.member_id),
            amount: payout.amount,
        })?;
    }
    writer.serialize(PayoutRow {
        recipient: "quest giver (remainder)",
        member_id: None,
        amount: settlement.remainder,
    })?;

    writer.into_inner().map_err(|e| QuestError::IoError(e.into_error()))
}

pub fn to_json(settlement: &Settlement) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(settlement)?)
}

pub struct ReportWriter<S: Storage> {
    storage: S,
    formats: Vec<String>,
}

impl<S: Storage> ReportWriter<S> {
    pub fn new(storage: S, formats: Vec<String>) -> Self {
        Self { storage, formats }
    }

    /// 依設定的格式寫出報表，回傳寫入的路徑
    pub async fn write(&self, settlement: &Settlement) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in &self.formats {
            let (filename, data) = match format.as_str() {
                "csv" => (CSV_FILENAME, to_csv(settlement)?),
                "json" => (JSON_FILENAME, to_json(settlement)?),
                other => {
                    return Err(QuestError::InvalidConfigValueError {
                        field: "report.formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported report format".to_string(),
                    })
                }
            };
            let path = self.storage.write_file(filename, &data).await?;
            tracing::info!("📁 Settlement report saved to: {}", path);
            written.push(path);
        }

        Ok(written)
    }
}
