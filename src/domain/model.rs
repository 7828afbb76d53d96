use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// 金額，以日圓整數計
pub type Money = i64;

pub type MemberId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    Str,
    Int,
    Cha,
    Luck,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildMember {
    pub id: MemberId,
    pub class_name: String,
    pub skills: BTreeMap<Attribute, u32>,
    pub fee: Money,
}

impl GuildMember {
    pub fn skill(&self, attribute: Attribute) -> u32 {
        self.skills.get(&attribute).copied().unwrap_or(0)
    }

    pub fn skill_total(&self) -> u32 {
        self.skills.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underpriced,
    Acceptable,
    Overpriced,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::Underpriced => "underpriced",
            Verdict::Acceptable => "acceptable",
            Verdict::Overpriced => "overpriced",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub standard_budget: f64,
    pub distortion_index: f64,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    Recruiting,
    Active,
    Cleared,
}

/// 單一任務欄位的狀態，包含「沒有任務」
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestPhase {
    Absent,
    Recruiting,
    Active,
    Cleared,
}

impl From<QuestStatus> for QuestPhase {
    fn from(status: QuestStatus) -> Self {
        match status {
            QuestStatus::Recruiting => QuestPhase::Recruiting,
            QuestStatus::Active => QuestPhase::Active,
            QuestStatus::Cleared => QuestPhase::Cleared,
        }
    }
}

impl fmt::Display for QuestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuestPhase::Absent => "absent",
            QuestPhase::Recruiting => "recruiting",
            QuestPhase::Active => "active",
            QuestPhase::Cleared => "cleared",
        };
        f.write_str(label)
    }
}

/// 建立任務所需的輸入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestDraft {
    pub title: String,
    pub hours: f64,
    pub budget: Money,
    pub req_int: u8,
    pub req_str: u8,
}

/// 已通過審核的任務；欄位只能經由生命週期操作改變
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quest {
    pub(crate) title: String,
    pub(crate) hours: f64,
    pub(crate) budget: Money,
    pub(crate) req_int: u8,
    pub(crate) req_str: u8,
    pub(crate) audit: AuditReport,
    pub(crate) status: QuestStatus,
}

impl Quest {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn budget(&self) -> Money {
        self.budget
    }

    pub fn req_int(&self) -> u8 {
        self.req_int
    }

    pub fn req_str(&self) -> u8 {
        self.req_str
    }

    pub fn audit(&self) -> AuditReport {
        self.audit
    }

    pub fn status(&self) -> QuestStatus {
        self.status
    }
}

/// 依加入順序排列、以成員 id 判斷重複的隊伍
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Party {
    members: Vec<GuildMember>,
}

impl Party {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> &[GuildMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    pub fn member_ids(&self) -> BTreeSet<MemberId> {
        self.members.iter().map(|m| m.id).collect()
    }

    pub fn total_fees(&self) -> Money {
        self.members.iter().map(|m| m.fee).sum()
    }

    pub(crate) fn push(&mut self, member: GuildMember) {
        self.members.push(member);
    }

    pub(crate) fn clear(&mut self) {
        self.members.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payout {
    pub member_id: MemberId,
    pub class_name: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    pub quest_title: String,
    pub budget: Money,
    pub payouts: Vec<Payout>,
    pub remainder: Money,
    pub settled_at: DateTime<Utc>,
}

/// 酒館候選名單上的一列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub member: GuildMember,
    pub skill_match: bool,
    pub affordable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestOverview {
    pub title: String,
    pub status: QuestStatus,
    pub budget: Money,
    pub remaining_budget: Money,
    pub aggregate_power: u32,
    pub boss_threshold: u32,
    pub win_rate: f64,
    pub win_percent: u32,
}
