//! Persistence boundary contracts.
//!
//! The ledger core never assumes a storage technology (the original deployment
//! kept accounts relational and transactions in a document store); these trait
//! shapes are the whole contract. Implementations are expected to provide read
//! consistency on their own; write serialization for transfers is the engine's
//! job.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use moneta_accounts::Account;
use moneta_core::{AccountId, LedgerResult, OwnerId, TransactionId};
use moneta_transactions::Transaction;

/// Account persistence collaborator.
pub trait AccountStore: Send + Sync {
    /// Upsert an account, returning the persisted value.
    fn save(&self, account: Account) -> LedgerResult<Account>;
    fn find_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>>;
    fn find_by_account_number(&self, number: &str) -> LedgerResult<Option<Account>>;
    fn find_by_owner(&self, owner_id: OwnerId) -> LedgerResult<Vec<Account>>;
}

/// Transaction-record persistence collaborator.
pub trait TransactionStore: Send + Sync {
    /// Upsert a transaction record, returning the persisted value.
    fn save(&self, transaction: Transaction) -> LedgerResult<Transaction>;
    fn find_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>>;
    /// All transactions touching an account, as source or target.
    fn find_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>>;
    fn find_by_account_and_period(
        &self,
        account_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>>;
    /// Up to `limit` transactions for an account, newest first.
    fn find_recent_by_account(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> LedgerResult<Vec<Transaction>>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn save(&self, account: Account) -> LedgerResult<Account> {
        (**self).save(account)
    }

    fn find_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>> {
        (**self).find_by_id(id)
    }

    fn find_by_account_number(&self, number: &str) -> LedgerResult<Option<Account>> {
        (**self).find_by_account_number(number)
    }

    fn find_by_owner(&self, owner_id: OwnerId) -> LedgerResult<Vec<Account>> {
        (**self).find_by_owner(owner_id)
    }
}

impl<S> TransactionStore for Arc<S>
where
    S: TransactionStore + ?Sized,
{
    fn save(&self, transaction: Transaction) -> LedgerResult<Transaction> {
        (**self).save(transaction)
    }

    fn find_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        (**self).find_by_id(id)
    }

    fn find_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        (**self).find_by_account(account_id)
    }

    fn find_by_account_and_period(
        &self,
        account_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        (**self).find_by_account_and_period(account_id, start, end)
    }

    fn find_recent_by_account(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        (**self).find_recent_by_account(account_id, limit)
    }
}
