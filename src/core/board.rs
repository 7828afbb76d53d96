use crate::core::lifecycle;
use crate::core::party;
use crate::core::profile::AdventurerProfile;
use crate::core::roster::RosterCatalog;
use crate::core::wallet::Wallet;
use crate::domain::model::{
    Candidate, GuildMember, MemberId, Money, Party, Quest, QuestDraft, QuestOverview, QuestPhase,
    Settlement,
};
use crate::utils::error::{QuestError, Result};

/// 一次遊玩期間的應用狀態，由外部驅動器持有
#[derive(Debug, Clone)]
pub struct QuestBoard {
    standard_unit_price: Money,
    roster: RosterCatalog,
    profile: AdventurerProfile,
    quest: Option<Quest>,
    party: Party,
    wallet: Wallet,
}

impl QuestBoard {
    pub fn new(standard_unit_price: Money) -> Self {
        Self {
            standard_unit_price,
            roster: RosterCatalog::standard(),
            profile: AdventurerProfile::default(),
            quest: None,
            party: Party::new(),
            wallet: Wallet::new(),
        }
    }

    pub fn standard_unit_price(&self) -> Money {
        self.standard_unit_price
    }

    pub fn profile(&self) -> &AdventurerProfile {
        &self.profile
    }

    pub fn update_profile(
        &mut self,
        name: &str,
        strength: u8,
        intelligence: u8,
        charisma: u8,
    ) -> Result<&AdventurerProfile> {
        self.profile.update(name, strength, intelligence, charisma)?;
        Ok(&self.profile)
    }

    pub fn quest(&self) -> Option<&Quest> {
        self.quest.as_ref()
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn phase(&self) -> QuestPhase {
        self.quest
            .as_ref()
            .map(|q| q.status().into())
            .unwrap_or(QuestPhase::Absent)
    }

    fn quest_for(&self, operation: &'static str) -> Result<&Quest> {
        self.quest.as_ref().ok_or(QuestError::InvalidTransition {
            operation,
            from: QuestPhase::Absent,
        })
    }

    /// 張貼新任務；任務欄位已被佔用時拒絕
    pub fn create_quest(&mut self, draft: &QuestDraft) -> Result<&Quest> {
        if let Some(existing) = &self.quest {
            return Err(QuestError::InvalidTransition {
                operation: "create",
                from: existing.status().into(),
            });
        }

        let quest = lifecycle::create_quest(draft, self.standard_unit_price)?;
        Ok(&*self.quest.insert(quest))
    }

    pub fn list_roster(&self) -> Vec<GuildMember> {
        self.roster.available(&self.party.member_ids())
    }

    pub fn candidates(&self) -> Result<Vec<Candidate>> {
        let quest = self.quest_for("list candidates")?;
        Ok(party::candidates(self.roster.all(), quest, &self.party))
    }

    pub fn recruit(&mut self, member_id: MemberId) -> Result<&Party> {
        let member = self
            .roster
            .get(member_id)
            .ok_or(QuestError::UnknownMember { member_id })?;
        let quest = self.quest.as_ref().ok_or(QuestError::InvalidTransition {
            operation: "recruit",
            from: QuestPhase::Absent,
        })?;

        party::recruit(member, quest, &mut self.party)?;
        Ok(&self.party)
    }

    pub fn win_rate(&self) -> Result<f64> {
        let quest = self.quest_for("compute win rate")?;
        Ok(party::win_rate(&self.party, quest))
    }

    pub fn overview(&self) -> Result<QuestOverview> {
        let quest = self.quest_for("view")?;
        let win_rate = party::win_rate(&self.party, quest);
        Ok(QuestOverview {
            title: quest.title().to_string(),
            status: quest.status(),
            budget: quest.budget(),
            remaining_budget: party::remaining_budget(quest, &self.party),
            aggregate_power: party::aggregate_power(&self.party),
            boss_threshold: party::boss_threshold(quest),
            win_rate,
            win_percent: (win_rate * 100.0).floor() as u32,
        })
    }

    pub fn depart(&mut self) -> Result<&Quest> {
        let quest = self.quest.as_mut().ok_or(QuestError::InvalidTransition {
            operation: "depart",
            from: QuestPhase::Absent,
        })?;
        lifecycle::depart(quest, &self.party)?;
        Ok(&*quest)
    }

    /// 外部驅動器回報完成時呼叫，每個任務只能一次
    pub fn complete_quest(&mut self) -> Result<&Quest> {
        let quest = self.quest.as_mut().ok_or(QuestError::InvalidTransition {
            operation: "complete",
            from: QuestPhase::Absent,
        })?;
        lifecycle::complete(quest)?;
        Ok(&*quest)
    }

    pub fn settle(&mut self) -> Result<Settlement> {
        lifecycle::settle(&mut self.quest, &mut self.party, &mut self.wallet)
    }

    /// 回到全新的遊玩狀態
    pub fn reset(&mut self) {
        tracing::info!("🔄 Session reset");
        *self = Self::new(self.standard_unit_price);
    }
}

impl Default for QuestBoard {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_STANDARD_UNIT_PRICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::QuestStatus;

    fn draft(budget: Money) -> QuestDraft {
        QuestDraft {
            title: "Dark Lord's annual report".to_string(),
            hours: 10.0,
            budget,
            req_int: 5,
            req_str: 2,
        }
    }

    #[test]
    fn test_single_quest_slot() {
        let mut board = QuestBoard::new(2500);
        board.create_quest(&draft(25000)).unwrap();
        let err = board.create_quest(&draft(25000)).unwrap_err();
        assert!(matches!(
            err,
            QuestError::InvalidTransition {
                operation: "create",
                from: QuestPhase::Recruiting
            }
        ));
    }

    #[test]
    fn test_rejected_audit_keeps_slot_empty() {
        let mut board = QuestBoard::new(2500);
        assert!(board.create_quest(&draft(80000)).is_err());
        assert_eq!(board.phase(), QuestPhase::Absent);
    }

    #[test]
    fn test_operations_without_quest() {
        let mut board = QuestBoard::new(2500);
        assert!(board.recruit(1).is_err());
        assert!(board.win_rate().is_err());
        assert!(board.depart().is_err());
        assert!(board.complete_quest().is_err());
        assert!(board.settle().is_err());
        assert_eq!(board.list_roster().len(), 4);
    }

    #[test]
    fn test_unknown_member() {
        let mut board = QuestBoard::new(2500);
        board.create_quest(&draft(25000)).unwrap();
        assert!(matches!(
            board.recruit(42),
            Err(QuestError::UnknownMember { member_id: 42 })
        ));
    }

    #[test]
    fn test_overview_and_roster_view() {
        let mut board = QuestBoard::new(2500);
        board.create_quest(&draft(25000)).unwrap();
        board.recruit(1).unwrap();

        let overview = board.overview().unwrap();
        assert_eq!(overview.remaining_budget, 23000);
        assert_eq!(overview.aggregate_power, 90);
        assert_eq!(overview.boss_threshold, 140);
        assert_eq!(overview.win_percent, 64);

        let ids: Vec<_> = board.list_roster().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_full_session_and_reset() {
        let mut board = QuestBoard::new(2500);
        board.create_quest(&draft(25000)).unwrap();
        board.recruit(1).unwrap();
        board.recruit(2).unwrap();
        assert_eq!(board.depart().unwrap().status(), QuestStatus::Active);
        assert!(board.recruit(3).is_err());
        assert_eq!(board.complete_quest().unwrap().status(), QuestStatus::Cleared);

        let settlement = board.settle().unwrap();
        assert_eq!(settlement.remainder, 21200);
        assert_eq!(board.wallet().balance(), 21200);
        assert_eq!(board.phase(), QuestPhase::Absent);
        assert!(board.party().is_empty());

        board.update_profile("Aki", 3, 9, 7).unwrap();
        board.reset();
        assert_eq!(board.wallet().balance(), 0);
        assert_eq!(board.profile(), &AdventurerProfile::default());
        assert_eq!(board.standard_unit_price(), 2500);
    }

    #[test]
    fn test_invalid_profile_update_keeps_profile() {
        let mut board = QuestBoard::new(2500);
        assert_eq!(board.update_profile("Aki", 3, 9, 7).unwrap().intelligence(), 9);

        assert!(board.update_profile("Aki", 11, 9, 7).is_err());
        assert!(board.update_profile("  ", 3, 9, 7).is_err());
        assert_eq!(board.profile().name(), "Aki");
        assert_eq!(board.profile().strength(), 3);
    }

    #[test]
    fn test_overflowing_settlement_keeps_quest_and_party() {
        let max_draft = QuestDraft {
            title: "Treasury raid".to_string(),
            hours: (Money::MAX / 2500) as f64,
            budget: Money::MAX,
            req_int: 0,
            req_str: 0,
        };
        let mut board = QuestBoard::new(2500);

        board.create_quest(&max_draft).unwrap();
        board.depart().unwrap();
        board.complete_quest().unwrap();
        assert_eq!(board.settle().unwrap().remainder, Money::MAX);

        board.create_quest(&max_draft).unwrap();
        board.depart().unwrap();
        board.complete_quest().unwrap();
        let err = board.settle().unwrap_err();
        assert!(matches!(err, QuestError::BalanceOverflow { .. }));
        assert!(!err.is_recoverable());

        assert_eq!(board.phase(), QuestPhase::Cleared);
        assert_eq!(board.wallet().balance(), Money::MAX);
        assert_eq!(board.wallet().ledger().len(), 1);
    }
}
