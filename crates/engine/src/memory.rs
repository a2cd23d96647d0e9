//! In-memory stores for tests and development.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use moneta_accounts::Account;
use moneta_core::{AccountId, LedgerError, LedgerResult, OwnerId, TransactionId};
use moneta_transactions::Transaction;

use crate::store::{AccountStore, TransactionStore};

fn poisoned() -> LedgerError {
    LedgerError::persistence("in-memory store lock poisoned")
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn save(&self, account: Account) -> LedgerResult<Account> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        // The account number is a unique key; updating the same account under
        // its own number is fine.
        let taken = map
            .values()
            .any(|a| a.account_number() == account.account_number() && a.id_typed() != account.id_typed());
        if taken {
            return Err(LedgerError::persistence(format!(
                "account number {} already exists",
                account.account_number()
            )));
        }
        map.insert(account.id_typed(), account.clone());
        Ok(account)
    }

    fn find_by_id(&self, id: AccountId) -> LedgerResult<Option<Account>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn find_by_account_number(&self, number: &str) -> LedgerResult<Option<Account>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|a| a.account_number() == number).cloned())
    }

    fn find_by_owner(&self, owner_id: OwnerId) -> LedgerResult<Vec<Account>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map
            .values()
            .filter(|a| a.owner_id() == owner_id)
            .cloned()
            .collect())
    }
}

/// In-memory transaction store.
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    inner: RwLock<HashMap<TransactionId, Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching<F>(&self, predicate: F) -> LedgerResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut found: Vec<Transaction> = map.values().filter(|t| predicate(t)).cloned().collect();
        // Newest first, matching the read contract.
        found.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(found)
    }
}

fn touches(transaction: &Transaction, account_id: AccountId) -> bool {
    transaction.source_account_id() == account_id || transaction.target_account_id() == account_id
}

impl TransactionStore for InMemoryTransactionStore {
    fn save(&self, transaction: Transaction) -> LedgerResult<Transaction> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(transaction.id_typed(), transaction.clone());
        Ok(transaction)
    }

    fn find_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    fn find_by_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        self.matching(|t| touches(t, account_id))
    }

    fn find_by_account_and_period(
        &self,
        account_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.matching(|t| touches(t, account_id) && t.created_at() >= start && t.created_at() <= end)
    }

    fn find_recent_by_account(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        let mut found = self.matching(|t| touches(t, account_id))?;
        found.truncate(limit);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moneta_core::OwnerId;
    use moneta_money::{Currency, Money};

    #[test]
    fn resaving_the_same_account_is_an_update() {
        let store = InMemoryAccountStore::new();
        let mut account =
            Account::open_with_balance(OwnerId::new(), Money::of("10.00", Currency::Eur).unwrap());
        store.save(account.clone()).unwrap();

        account.credit(&Money::of("5.00", Currency::Eur).unwrap()).unwrap();
        store.save(account.clone()).unwrap();

        let stored = store.find_by_id(account.id_typed()).unwrap().unwrap();
        assert_eq!(stored.balance(), account.balance());
    }

    #[test]
    fn duplicate_account_number_under_a_new_id_is_rejected() {
        let store = InMemoryAccountStore::new();
        let account = Account::open(OwnerId::new(), Currency::Eur);
        store.save(account.clone()).unwrap();

        // Same number under a fresh id, as a buggy caller might produce.
        let mut raw = serde_json::to_value(&account).unwrap();
        raw["id"] = serde_json::to_value(AccountId::new()).unwrap();
        let impostor: Account = serde_json::from_value(raw).unwrap();

        let err = store.save(impostor).unwrap_err();
        assert_eq!(err.code(), "persistence_failure");
        assert!(err.to_string().contains(account.account_number()));
    }
}
