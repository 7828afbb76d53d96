use crate::domain::model::Money;
use crate::utils::error::{QuestError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub amount: Money,
    pub source: String,
    pub credited_at: DateTime<Utc>,
}

/// 只進不出的錢包
#[derive(Debug, Clone, Default, Serialize)]
pub struct Wallet {
    balance: Money,
    ledger: Vec<LedgerEntry>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }

    pub fn credit(&mut self, amount: Money, source: impl Into<String>) -> Result<()> {
        if amount < 0 {
            tracing::error!("❌ Refusing negative credit of ¥{}", amount);
            return Err(QuestError::NegativeCredit { amount });
        }

        let Some(balance) = self.balance.checked_add(amount) else {
            tracing::error!("❌ Credit of ¥{} would overflow balance ¥{}", amount, self.balance);
            return Err(QuestError::BalanceOverflow {
                balance: self.balance,
                amount,
            });
        };

        let source = source.into();
        self.balance = balance;
        tracing::info!("💰 Credited ¥{} from '{}', balance ¥{}", amount, source, self.balance);
        self.ledger.push(LedgerEntry {
            amount,
            source,
            credited_at: Utc::now(),
        });
        Ok(())
    }
}
