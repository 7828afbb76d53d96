use crate::domain::model::{Attribute, GuildMember, MemberId, Money};
use std::collections::{BTreeMap, BTreeSet};

/// 固定的公會成員名冊，只讀
#[derive(Debug, Clone)]
pub struct RosterCatalog {
    members: Vec<GuildMember>,
}

fn member(id: MemberId, class_name: &str, skills: &[(Attribute, u32)], fee: Money) -> GuildMember {
    GuildMember {
        id,
        class_name: class_name.to_string(),
        skills: skills.iter().copied().collect::<BTreeMap<_, _>>(),
        fee,
    }
}

impl RosterCatalog {
    pub fn standard() -> Self {
        let members = vec![
            member(
                1,
                "Mage (Accounting)",
                &[(Attribute::Int, 8), (Attribute::Str, 1)],
                2000,
            ),
            member(
                2,
                "Warrior (Muscle)",
                &[(Attribute::Int, 2), (Attribute::Str, 9)],
                1800,
            ),
            member(
                3,
                "Jester (Creative)",
                &[(Attribute::Int, 6), (Attribute::Luck, 8)],
                3000,
            ),
            member(
                4,
                "Priest (Mentor)",
                &[(Attribute::Cha, 9), (Attribute::Int, 4)],
                2500,
            ),
        ];
        Self { members }
    }

    pub fn all(&self) -> &[GuildMember] {
        &self.members
    }

    pub fn get(&self, id: MemberId) -> Option<&GuildMember> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn available(&self, excluding: &BTreeSet<MemberId>) -> Vec<GuildMember> {
        self.members
            .iter()
            .filter(|m| !excluding.contains(&m.id))
            .cloned()
            .collect()
    }
}

impl Default for RosterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_is_ordered_by_id() {
        let roster = RosterCatalog::standard();
        let ids: Vec<MemberId> = roster.all().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_available_excludes_recruited() {
        let roster = RosterCatalog::standard();
        let excluding: BTreeSet<MemberId> = [2, 4].into_iter().collect();
        let ids: Vec<MemberId> = roster.available(&excluding).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_lookup() {
        let roster = RosterCatalog::standard();
        let jester = roster.get(3).unwrap();
        assert_eq!(jester.fee, 3000);
        assert_eq!(jester.skill(Attribute::Luck), 8);
        assert_eq!(jester.skill(Attribute::Str), 0);
        assert!(roster.get(9).is_none());
    }
}
