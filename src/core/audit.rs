use crate::domain::model::{AuditReport, Money, Verdict};

/// 低於此值視為壓價
pub const UNDERPRICED_BELOW: f64 = 0.5;
/// 高於此值視為灌水
pub const OVERPRICED_ABOVE: f64 = 3.0;

/// 計算扭曲指數 (distortion index) 並分類報酬
///
/// `hours` 必須由呼叫端先確認為正數；單價不為正時指數為 0，判定為壓價。
pub fn audit(budget: Money, hours: f64, standard_unit_price: Money) -> AuditReport {
    let standard_budget = hours * standard_unit_price as f64;

    let distortion_index = if standard_budget > 0.0 {
        budget as f64 / standard_budget
    } else {
        0.0
    };

    let verdict = if distortion_index < UNDERPRICED_BELOW {
        Verdict::Underpriced
    } else if distortion_index > OVERPRICED_ABOVE {
        Verdict::Overpriced
    } else {
        Verdict::Acceptable
    };

    tracing::debug!(
        "🧮 Audit: budget ¥{} vs standard ¥{:.0} -> index {:.3} ({})",
        budget,
        standard_budget,
        distortion_index,
        verdict
    );

    AuditReport {
        standard_budget,
        distortion_index,
        verdict,
    }
}

/// 建議報酬：工時乘以標準單價
pub fn suggested_budget(hours: f64, standard_unit_price: Money) -> Money {
    (hours * standard_unit_price as f64).round() as Money
}
