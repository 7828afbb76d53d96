use crate::domain::model::{
    Attribute, Candidate, GuildMember, Money, Party, Quest, QuestPhase, QuestStatus,
};
use crate::utils::error::{QuestError, Result};

pub fn remaining_budget(quest: &Quest, party: &Party) -> Money {
    quest.budget - party.total_fees()
}

pub fn is_affordable(member: &GuildMember, quest: &Quest, party: &Party) -> bool {
    member.fee <= remaining_budget(quest, party)
}

/// INT 或 STR 任一項達標即算適合 (OR，不是 AND)
pub fn skill_match(member: &GuildMember, quest: &Quest) -> bool {
    member.skill(Attribute::Int) >= u32::from(quest.req_int)
        || member.skill(Attribute::Str) >= u32::from(quest.req_str)
}

/// 招募成員；失敗時隊伍保持不變
pub fn recruit(member: &GuildMember, quest: &Quest, party: &mut Party) -> Result<()> {
    if quest.status() != QuestStatus::Recruiting {
        return Err(QuestError::InvalidTransition {
            operation: "recruit",
            from: QuestPhase::from(quest.status()),
        });
    }

    if party.contains(member.id) {
        tracing::warn!("⚠️ {} is already in the party", member.class_name);
        return Err(QuestError::AlreadyRecruited {
            member_id: member.id,
        });
    }

    let remaining = remaining_budget(quest, party);
    if member.fee > remaining {
        tracing::warn!(
            "💸 Cannot afford {} (fee ¥{}, remaining ¥{})",
            member.class_name,
            member.fee,
            remaining
        );
        return Err(QuestError::BudgetExceeded {
            member_id: member.id,
            fee: member.fee,
            remaining,
        });
    }

    party.push(member.clone());
    tracing::info!(
        "🍻 Recruited {} (¥{}), remaining budget ¥{}",
        member.class_name,
        member.fee,
        remaining - member.fee
    );
    Ok(())
}

pub fn aggregate_power(party: &Party) -> u32 {
    party.members().iter().map(|m| m.skill_total() * 10).sum()
}

pub fn boss_threshold(quest: &Quest) -> u32 {
    (u32::from(quest.req_int) + u32::from(quest.req_str)) * 20
}

pub fn win_rate(party: &Party, quest: &Quest) -> f64 {
    let threshold = boss_threshold(quest);
    if threshold == 0 {
        return 1.0;
    }
    (f64::from(aggregate_power(party)) / f64::from(threshold)).min(1.0)
}

pub fn can_depart(party: &Party, quest: &Quest) -> bool {
    win_rate(party, quest) >= 1.0
}

/// 尚未入隊的候選人，附帶適性與預算判定
pub fn candidates(roster: &[GuildMember], quest: &Quest, party: &Party) -> Vec<Candidate> {
    roster
        .iter()
        .filter(|m| !party.contains(m.id))
        .map(|m| Candidate {
            member: m.clone(),
            skill_match: skill_match(m, quest),
            affordable: is_affordable(m, quest, party),
        })
        .collect()
}
