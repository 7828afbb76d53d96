use crate::core::audit::audit;
use crate::core::party::{can_depart, win_rate};
use crate::core::wallet::Wallet;
use crate::domain::model::{
    Money, Party, Payout, Quest, QuestDraft, QuestPhase, QuestStatus, Settlement, Verdict,
};
use crate::utils::error::{QuestError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range};
use chrono::Utc;

fn phase_of(slot: &Option<Quest>) -> QuestPhase {
    slot.as_ref()
        .map(|q| QuestPhase::from(q.status()))
        .unwrap_or(QuestPhase::Absent)
}

/// 通過審核才會建立任務 (狀態為 recruiting)
pub fn create_quest(draft: &QuestDraft, standard_unit_price: Money) -> Result<Quest> {
    validate_non_empty_string("quest.title", &draft.title)?;
    if !(draft.hours.is_finite() && draft.hours > 0.0) {
        return Err(QuestError::ValidationError {
            message: format!("quest.hours must be positive, got {}", draft.hours),
        });
    }
    validate_range("quest.req_int", draft.req_int, 0, 10)?;
    validate_range("quest.req_str", draft.req_str, 0, 10)?;

    let report = audit(draft.budget, draft.hours, standard_unit_price);
    if report.verdict != Verdict::Acceptable {
        tracing::warn!(
            "🚫 Quest '{}' rejected: {} (index {:.2})",
            draft.title,
            report.verdict,
            report.distortion_index
        );
        return Err(QuestError::AuditRejected {
            verdict: report.verdict,
            distortion_index: report.distortion_index,
            standard_budget: report.standard_budget,
        });
    }

    tracing::info!(
        "📜 Quest '{}' posted with budget ¥{} (index {:.2})",
        draft.title,
        draft.budget,
        report.distortion_index
    );

    Ok(Quest {
        title: draft.title.trim().to_string(),
        hours: draft.hours,
        budget: draft.budget,
        req_int: draft.req_int,
        req_str: draft.req_str,
        audit: report,
        status: QuestStatus::Recruiting,
    })
}

/// recruiting -> active，需要勝率達 100%
pub fn depart(quest: &mut Quest, party: &Party) -> Result<()> {
    if quest.status != QuestStatus::Recruiting {
        return Err(QuestError::InvalidTransition {
            operation: "depart",
            from: quest.status.into(),
        });
    }

    if !can_depart(party, quest) {
        let rate = win_rate(party, quest);
        tracing::warn!("⚔️ Departure blocked, win rate {:.0}%", rate * 100.0);
        return Err(QuestError::InsufficientPower { win_rate: rate });
    }

    quest.status = QuestStatus::Active;
    tracing::info!("🚀 Party of {} departed for '{}'", party.len(), quest.title);
    Ok(())
}

/// active -> cleared，由外部進度驅動器觸發一次
pub fn complete(quest: &mut Quest) -> Result<()> {
    if quest.status != QuestStatus::Active {
        return Err(QuestError::InvalidTransition {
            operation: "complete",
            from: quest.status.into(),
        });
    }

    quest.status = QuestStatus::Cleared;
    tracing::info!("🎉 Quest '{}' cleared", quest.title);
    Ok(())
}

/// cleared -> absent：支付成員報酬、餘額入帳並清空隊伍
pub fn settle(
    slot: &mut Option<Quest>,
    party: &mut Party,
    wallet: &mut Wallet,
) -> Result<Settlement> {
    let quest = match slot.as_ref() {
        Some(q) if q.status == QuestStatus::Cleared => q,
        _ => {
            return Err(QuestError::InvalidTransition {
                operation: "settle",
                from: phase_of(slot),
            })
        }
    };

    let payouts: Vec<Payout> = party
        .members()
        .iter()
        .map(|m| Payout {
            member_id: m.id,
            class_name: m.class_name.clone(),
            amount: m.fee,
        })
        .collect();
    let paid: Money = payouts.iter().map(|p| p.amount).sum();
    let remainder = quest.budget - paid;

    // 入帳失敗時任務與隊伍都不動
    wallet.credit(remainder, quest.title.as_str())?;

    for payout in &payouts {
        tracing::debug!("💸 Paid ¥{} to {}", payout.amount, payout.class_name);
    }

    let settlement = Settlement {
        quest_title: quest.title.clone(),
        budget: quest.budget,
        payouts,
        remainder,
        settled_at: Utc::now(),
    };

    *slot = None;
    party.clear();
    tracing::info!(
        "💎 Settled '{}': ¥{} to members, ¥{} kept",
        settlement.quest_title,
        paid,
        remainder
    );
    Ok(settlement)
}
