//! Account lifecycle and balance operations exposed to callers.
//!
//! Pre-conditions outside the ledger's concern (e.g. rejecting a blocked
//! owner) are the caller's responsibility before invoking these operations.

use std::sync::Arc;

use moneta_accounts::Account;
use moneta_core::{AccountId, LedgerError, LedgerResult, OwnerId};
use moneta_money::{Currency, Money};

use crate::locks::{lock, AccountLocks};
use crate::store::AccountStore;

/// Application service over the account store.
///
/// Balance mutations serialize on the per-account lock registry. Share the
/// registry with the transfer engine (`TransferEngine::locks`) when both
/// write to the same store, so a deposit cannot interleave with a transfer's
/// load-modify-save on the same account.
#[derive(Debug)]
pub struct AccountService<A> {
    accounts: A,
    locks: Arc<AccountLocks>,
}

impl<A: AccountStore> AccountService<A> {
    pub fn new(accounts: A) -> Self {
        Self::with_locks(accounts, Arc::new(AccountLocks::new()))
    }

    pub fn with_locks(accounts: A, locks: Arc<AccountLocks>) -> Self {
        Self { accounts, locks }
    }

    /// Open an account for an owner in the given currency, optionally with an
    /// initial deposit (which must be positive and in that currency).
    pub fn create_account(
        &self,
        owner_id: OwnerId,
        currency_code: &str,
        initial_deposit: Option<Money>,
    ) -> LedgerResult<Account> {
        let currency = Currency::from_code(currency_code)?;
        let mut account = Account::open(owner_id, currency);
        if let Some(deposit) = initial_deposit {
            account.credit(&deposit)?;
        }
        self.accounts.save(account)
    }

    pub fn deposit(&self, account_id: AccountId, amount: Money) -> LedgerResult<Account> {
        self.update(account_id, |account| account.credit(&amount))
    }

    pub fn withdraw(&self, account_id: AccountId, amount: Money) -> LedgerResult<Account> {
        self.update(account_id, |account| account.debit(&amount))
    }

    pub fn get_balance(&self, account_id: AccountId) -> LedgerResult<Money> {
        Ok(self.load(account_id)?.balance())
    }

    pub fn account_by_id(&self, account_id: AccountId) -> LedgerResult<Option<Account>> {
        self.accounts.find_by_id(account_id)
    }

    pub fn account_by_number(&self, number: &str) -> LedgerResult<Option<Account>> {
        self.accounts.find_by_account_number(number)
    }

    pub fn accounts_for_owner(&self, owner_id: OwnerId) -> LedgerResult<Vec<Account>> {
        self.accounts.find_by_owner(owner_id)
    }

    pub fn activate_account(&self, account_id: AccountId) -> LedgerResult<Account> {
        self.update(account_id, |account| {
            account.activate();
            Ok(())
        })
    }

    pub fn deactivate_account(&self, account_id: AccountId) -> LedgerResult<Account> {
        self.update(account_id, |account| {
            account.deactivate();
            Ok(())
        })
    }

    /// Load-modify-save under the account's lock.
    fn update<F>(&self, account_id: AccountId, mutate: F) -> LedgerResult<Account>
    where
        F: FnOnce(&mut Account) -> LedgerResult<()>,
    {
        let handle = self.locks.handle(account_id)?;
        let _guard = lock(&handle)?;

        let mut account = self.load(account_id)?;
        mutate(&mut account)?;
        self.accounts.save(account)
    }

    fn load(&self, account_id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .find_by_id(account_id)?
            .ok_or_else(|| LedgerError::account_not_found(account_id.to_string()))
    }
}
