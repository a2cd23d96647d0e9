//! Transfer transaction records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use moneta_core::{AccountId, Entity, LedgerError, LedgerResult, TransactionId};
use moneta_money::Money;

/// Whether a transfer stayed within one currency or crossed currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Local,
    Forex,
}

/// Transaction lifecycle status.
///
/// `Pending` is the only non-terminal state: it may move to `Completed`,
/// `Failed` or `Cancelled`, and those three permit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn is_cancellable(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }

    pub fn is_finalized(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

/// Record of one transfer between two accounts.
///
/// Identity is immutable once created; the status transition methods are the
/// only mutation. After finalization the record is history, persisted for
/// read-only access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    source_account_id: AccountId,
    target_account_id: AccountId,
    source_amount: Money,
    target_amount: Money,
    transfer_type: TransferType,
    status: TransactionStatus,
    exchange_rate: Option<Decimal>,
    description: String,
    created_at: DateTime<Utc>,
    processed_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// A same-currency transfer: source and target amounts are identical.
    pub fn local(
        source_account_id: AccountId,
        target_account_id: AccountId,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            source_account_id,
            target_account_id,
            source_amount: amount,
            target_amount: amount,
            transfer_type: TransferType::Local,
            status: TransactionStatus::Pending,
            exchange_rate: None,
            description: description.into(),
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    /// A cross-currency transfer carrying both amounts and the rate applied.
    pub fn forex(
        source_account_id: AccountId,
        target_account_id: AccountId,
        source_amount: Money,
        target_amount: Money,
        exchange_rate: Decimal,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            source_account_id,
            target_account_id,
            source_amount,
            target_amount,
            transfer_type: TransferType::Forex,
            status: TransactionStatus::Pending,
            exchange_rate: Some(exchange_rate),
            description: description.into(),
            created_at: Utc::now(),
            processed_at: None,
        }
    }

    pub fn id_typed(&self) -> TransactionId {
        self.id
    }

    pub fn source_account_id(&self) -> AccountId {
        self.source_account_id
    }

    pub fn target_account_id(&self) -> AccountId {
        self.target_account_id
    }

    pub fn source_amount(&self) -> Money {
        self.source_amount
    }

    pub fn target_amount(&self) -> Money {
        self.target_amount
    }

    pub fn transfer_type(&self) -> TransferType {
        self.transfer_type
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn exchange_rate(&self) -> Option<Decimal> {
        self.exchange_rate
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn processed_at(&self) -> Option<DateTime<Utc>> {
        self.processed_at
    }

    pub fn is_forex(&self) -> bool {
        self.transfer_type == TransferType::Forex
    }

    pub fn is_finalized(&self) -> bool {
        self.status.is_finalized()
    }

    /// Mark the transfer as applied. Valid from `Pending` only.
    pub fn complete(&mut self) -> LedgerResult<()> {
        self.finalize(TransactionStatus::Completed)
    }

    /// Mark the transfer as failed. Valid from `Pending` only.
    pub fn fail(&mut self) -> LedgerResult<()> {
        self.finalize(TransactionStatus::Failed)
    }

    /// Cancel a transfer that has not been processed yet.
    pub fn cancel(&mut self) -> LedgerResult<()> {
        if !self.status.is_cancellable() {
            return Err(LedgerError::invalid_state(format!(
                "cannot cancel transaction {} in status {:?}",
                self.id, self.status
            )));
        }
        self.finalize(TransactionStatus::Cancelled)
    }

    fn finalize(&mut self, status: TransactionStatus) -> LedgerResult<()> {
        if self.status != TransactionStatus::Pending {
            return Err(LedgerError::invalid_state(format!(
                "transaction {} already finalized as {:?}",
                self.id, self.status
            )));
        }
        self.status = status;
        self.processed_at = Some(Utc::now());
        Ok(())
    }
}

impl Entity for Transaction {
    type Id = TransactionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
