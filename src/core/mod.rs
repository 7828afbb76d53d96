pub mod audit;
pub mod board;
pub mod lifecycle;
pub mod party;
pub mod profile;
pub mod roster;
pub mod wallet;

pub use crate::domain::model::{
    AuditReport, Candidate, GuildMember, Party, Quest, QuestDraft, QuestStatus, Settlement, Verdict,
};
pub use crate::domain::ports::{BoardSettings, ProgressDriver, Storage};
pub use crate::utils::error::Result;
