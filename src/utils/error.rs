use crate::domain::model::{MemberId, Money, QuestPhase, Verdict};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuestError {
    #[error(
        "Budget audit rejected: {verdict} (distortion index {distortion_index:.2}, \
         standard budget ¥{standard_budget})"
    )]
    AuditRejected {
        verdict: Verdict,
        distortion_index: f64,
        standard_budget: f64,
    },

    #[error("Budget exceeded: member #{member_id} costs ¥{fee} but only ¥{remaining} remains")]
    BudgetExceeded {
        member_id: MemberId,
        fee: Money,
        remaining: Money,
    },

    #[error("Member #{member_id} is already in the party")]
    AlreadyRecruited { member_id: MemberId },

    #[error("No guild member with id #{member_id}")]
    UnknownMember { member_id: MemberId },

    #[error("Insufficient party power: win rate {:.0}% is below 100%", .win_rate * 100.0)]
    InsufficientPower { win_rate: f64 },

    #[error("Invalid transition: cannot {operation} while quest is {from}")]
    InvalidTransition {
        operation: &'static str,
        from: QuestPhase,
    },

    #[error("Negative credit of ¥{amount} refused")]
    NegativeCredit { amount: Money },

    #[error("Crediting ¥{amount} would overflow the wallet balance ¥{balance}")]
    BalanceOverflow { balance: Money, amount: Money },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Audit,
    Party,
    Lifecycle,
    Ledger,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuestError::AuditRejected { .. } => ErrorCategory::Audit,
            QuestError::BudgetExceeded { .. }
            | QuestError::AlreadyRecruited { .. }
            | QuestError::UnknownMember { .. }
            | QuestError::InsufficientPower { .. } => ErrorCategory::Party,
            QuestError::InvalidTransition { .. } => ErrorCategory::Lifecycle,
            QuestError::NegativeCredit { .. } | QuestError::BalanceOverflow { .. } => {
                ErrorCategory::Ledger
            }
            QuestError::ConfigValidationError { .. }
            | QuestError::InvalidConfigValueError { .. }
            | QuestError::ValidationError { .. } => ErrorCategory::Configuration,
            QuestError::IoError(_)
            | QuestError::SerializationError(_)
            | QuestError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuestError::AlreadyRecruited { .. } => ErrorSeverity::Low,
            QuestError::AuditRejected { .. }
            | QuestError::BudgetExceeded { .. }
            | QuestError::UnknownMember { .. }
            | QuestError::InsufficientPower { .. } => ErrorSeverity::Medium,
            QuestError::ConfigValidationError { .. }
            | QuestError::InvalidConfigValueError { .. }
            | QuestError::ValidationError { .. }
            | QuestError::IoError(_)
            | QuestError::SerializationError(_)
            | QuestError::CsvError(_) => ErrorSeverity::High,
            // 呼叫端違反協議，必須上拋到最外層
            QuestError::InvalidTransition { .. }
            | QuestError::NegativeCredit { .. }
            | QuestError::BalanceOverflow { .. } => ErrorSeverity::Critical,
        }
    }

    /// 使用者可以自行修正並重試的錯誤
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::High
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            QuestError::AuditRejected {
                verdict,
                standard_budget,
                ..
            } => format!(
                "Budget is {}; choose a reward between ¥{:.0} and ¥{:.0}",
                verdict,
                standard_budget * 0.5,
                standard_budget * 3.0
            ),
            QuestError::BudgetExceeded { remaining, .. } => {
                format!("Recruit a member whose fee fits the remaining ¥{}", remaining)
            }
            QuestError::AlreadyRecruited { .. } => {
                "Pick a member who is not in the party yet".to_string()
            }
            QuestError::UnknownMember { .. } => {
                "Use a member id listed in the roster".to_string()
            }
            QuestError::InsufficientPower { .. } => {
                "Recruit more members until the win rate reaches 100%".to_string()
            }
            QuestError::InvalidTransition { .. } => {
                "Follow the quest order: create, recruit, depart, complete, settle".to_string()
            }
            QuestError::NegativeCredit { .. } => {
                "Settlement arithmetic is broken; report this as a bug".to_string()
            }
            QuestError::BalanceOverflow { .. } => {
                "The wallet is full; reset the session before settling again".to_string()
            }
            QuestError::ConfigValidationError { field, .. }
            | QuestError::InvalidConfigValueError { field, .. } => {
                format!("Check the '{}' setting in your scenario file", field)
            }
            QuestError::ValidationError { .. } => "Correct the input and try again".to_string(),
            QuestError::IoError(_) => "Check file paths and permissions".to_string(),
            QuestError::SerializationError(_) | QuestError::CsvError(_) => {
                "Check the report output settings".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Audit => format!("The quest reward did not pass the audit. {}", self),
            ErrorCategory::Party => format!("The party could not be changed. {}", self),
            ErrorCategory::Lifecycle => format!("The quest cannot do that right now. {}", self),
            ErrorCategory::Ledger => format!("The wallet refused the payout. {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid. {}", self),
            ErrorCategory::System => format!("A system error occurred. {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuestError>;
