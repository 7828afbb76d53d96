use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Nameless Adventurer";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventurerProfile {
    pub(crate) name: String,
    #[serde(rename = "STR")]
    pub(crate) strength: u8,
    #[serde(rename = "INT")]
    pub(crate) intelligence: u8,
    #[serde(rename = "CHA")]
    pub(crate) charisma: u8,
}

impl Default for AdventurerProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            strength: 5,
            intelligence: 5,
            charisma: 5,
        }
    }
}

impl AdventurerProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }

    pub fn intelligence(&self) -> u8 {
        self.intelligence
    }

    pub fn charisma(&self) -> u8 {
        self.charisma
    }

    /// 更新名稱與能力值，每項能力值限 1..=10
    pub fn update(
        &mut self,
        name: &str,
        strength: u8,
        intelligence: u8,
        charisma: u8,
    ) -> Result<()> {
        validate_non_empty_string("profile.name", name)?;
        validate_range("profile.STR", strength, 1, 10)?;
        validate_range("profile.INT", intelligence, 1, 10)?;
        validate_range("profile.CHA", charisma, 1, 10)?;

        self.name = name.trim().to_string();
        self.strength = strength;
        self.intelligence = intelligence;
        self.charisma = charisma;
        tracing::debug!("🛡️ Profile updated: {:?}", self);
        Ok(())
    }
}
