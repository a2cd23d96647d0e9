//! Transfer orchestration.
//!
//! The engine composes the account store, the transaction store and the
//! currency converter behind trait seams, so it is testable with in-memory
//! implementations and swappable with real backends. Each transfer runs as one
//! unit of work: the two balance writes and the transaction-record write either
//! all land or none of them remain.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use moneta_accounts::Account;
use moneta_core::{AccountId, LedgerError, LedgerResult, OwnerId, TransactionId};
use moneta_fx::{CurrencyConverter, RateSource};
use moneta_money::Money;
use moneta_transactions::Transaction;

use crate::locks::{lock, AccountLocks};
use crate::store::{AccountStore, TransactionStore};

/// The transfer operations exposed to callers.
///
/// Kept as a trait so decorators (see `logging`) can wrap an engine without
/// the call sites caring which one they hold.
pub trait TransferOps {
    /// Move `amount` between two accounts of the same currency.
    fn transfer_local(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction>;

    /// Move `source_amount` into an account of another currency, converting at
    /// the current rate.
    fn transfer_forex(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        source_amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction>;
}

/// Orchestrates transfers between two accounts.
///
/// Transfers sharing an account serialize on the lock registry; disjoint
/// pairs run concurrently. Pair locks are acquired in canonical id order so
/// two transfers over the same pair can never deadlock.
#[derive(Debug)]
pub struct TransferEngine<A, T, R> {
    accounts: A,
    transactions: T,
    converter: CurrencyConverter<R>,
    locks: Arc<AccountLocks>,
}

impl<A, T, R> TransferEngine<A, T, R>
where
    A: AccountStore,
    T: TransactionStore,
    R: RateSource,
{
    pub fn new(accounts: A, transactions: T, converter: CurrencyConverter<R>) -> Self {
        Self::with_locks(accounts, transactions, converter, Arc::new(AccountLocks::new()))
    }

    /// Build an engine over an existing lock registry, so other writers to
    /// the same store (see `AccountService`) serialize with transfers.
    pub fn with_locks(
        accounts: A,
        transactions: T,
        converter: CurrencyConverter<R>,
        locks: Arc<AccountLocks>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            converter,
            locks,
        }
    }

    /// The lock registry this engine serializes on.
    pub fn locks(&self) -> Arc<AccountLocks> {
        self.locks.clone()
    }

    // Read-only queries; no engine-level locking needed.

    pub fn transaction_by_id(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.transactions.find_by_id(id)
    }

    pub fn transactions_for_account(&self, account_id: AccountId) -> LedgerResult<Vec<Transaction>> {
        self.transactions.find_by_account(account_id)
    }

    pub fn transactions_for_period(
        &self,
        account_id: AccountId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> LedgerResult<Vec<Transaction>> {
        self.transactions.find_by_account_and_period(account_id, start, end)
    }

    pub fn recent_transactions(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> LedgerResult<Vec<Transaction>> {
        self.transactions.find_recent_by_account(account_id, limit)
    }

    /// All transactions across every account of an owner, newest first.
    pub fn transactions_for_owner(&self, owner_id: OwnerId) -> LedgerResult<Vec<Transaction>> {
        let mut seen = std::collections::HashSet::new();
        let mut all = Vec::new();
        for account in self.accounts.find_by_owner(owner_id)? {
            for transaction in self.transactions.find_by_account(account.id_typed())? {
                // A transfer between two accounts of the same owner shows up
                // under both accounts; report it once.
                if seen.insert(transaction.id_typed()) {
                    all.push(transaction);
                }
            }
        }
        all.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(all)
    }

    fn load_account(&self, id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .find_by_id(id)?
            .ok_or_else(|| LedgerError::account_not_found(id.to_string()))
    }

    /// Persist the mutated accounts and the completed transaction as one unit.
    ///
    /// On any persistence failure the previously-loaded snapshots are
    /// restored, the transaction is recorded as `Failed` (never left
    /// `Pending`), and the error is surfaced to the caller.
    fn commit(
        &self,
        transaction: Transaction,
        updated: Vec<Account>,
        snapshots: Vec<Account>,
    ) -> LedgerResult<Transaction> {
        for account in &updated {
            if let Err(err) = self.accounts.save(account.clone()) {
                self.roll_back(&snapshots);
                self.record_failed(transaction);
                return Err(err);
            }
        }

        let mut completed = transaction.clone();
        completed.complete()?;
        match self.transactions.save(completed) {
            Ok(saved) => Ok(saved),
            Err(err) => {
                self.roll_back(&snapshots);
                self.record_failed(transaction);
                Err(err)
            }
        }
    }

    fn roll_back(&self, snapshots: &[Account]) {
        for snapshot in snapshots {
            if let Err(err) = self.accounts.save(snapshot.clone()) {
                tracing::error!(
                    account_id = %snapshot.id_typed(),
                    error = %err,
                    "could not restore account snapshot after persistence failure"
                );
            }
        }
    }

    fn record_failed(&self, mut transaction: Transaction) {
        if transaction.fail().is_ok() {
            if let Err(err) = self.transactions.save(transaction) {
                tracing::warn!(error = %err, "could not persist failed-transfer record");
            }
        }
    }
}

impl<A, T, R> TransferOps for TransferEngine<A, T, R>
where
    A: AccountStore,
    T: TransactionStore,
    R: RateSource,
{
    fn transfer_local(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction> {
        ensure_positive(&amount)?;

        let (lo, hi) = ordered(source_id, target_id);
        let first = self.locks.handle(lo)?;
        let _first_guard = lock(&first)?;
        let second = (lo != hi).then(|| self.locks.handle(hi)).transpose()?;
        let _second_guard = second.as_ref().map(|l| lock(l)).transpose()?;

        let mut source = self.load_account(source_id)?;

        if source_id == target_id {
            // Aliased transfer: operate on the single instance so neither
            // mutation is lost. Net balance effect is zero.
            let snapshot = source.clone();
            source.debit(&amount)?;
            source.credit(&amount)?;
            let transaction = Transaction::local(source_id, target_id, amount, description);
            return self.commit(transaction, vec![source], vec![snapshot]);
        }

        let mut target = self.load_account(target_id)?;
        if source.currency() != target.currency() {
            return Err(LedgerError::currency_mismatch(format!(
                "local transfer needs matching currencies, got {} -> {}; use a forex transfer",
                source.currency(),
                target.currency()
            )));
        }

        let snapshots = vec![source.clone(), target.clone()];
        // Debit first: a failed debit must never leave the target credited.
        source.debit(&amount)?;
        target.credit(&amount)?;

        let transaction = Transaction::local(source_id, target_id, amount, description);
        self.commit(transaction, vec![source, target], snapshots)
    }

    fn transfer_forex(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        source_amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction> {
        ensure_positive(&source_amount)?;

        let (lo, hi) = ordered(source_id, target_id);
        let first = self.locks.handle(lo)?;
        let _first_guard = lock(&first)?;
        let second = (lo != hi).then(|| self.locks.handle(hi)).transpose()?;
        let _second_guard = second.as_ref().map(|l| lock(l)).transpose()?;

        let mut source = self.load_account(source_id)?;

        if source_id == target_id {
            let snapshot = source.clone();
            source.debit(&source_amount)?;
            source.credit(&source_amount)?;
            let transaction = Transaction::forex(
                source_id,
                target_id,
                source_amount,
                source_amount,
                Decimal::ONE,
                description,
            );
            return self.commit(transaction, vec![source], vec![snapshot]);
        }

        let mut target = self.load_account(target_id)?;
        let (source_currency, target_currency) = (source.currency(), target.currency());
        if !self
            .converter
            .is_conversion_supported(source_currency, target_currency)
        {
            return Err(LedgerError::unsupported_conversion(format!(
                "{source_currency} -> {target_currency}"
            )));
        }

        let exchange_rate = self.converter.exchange_rate(source_currency, target_currency)?;
        let target_amount = self.converter.convert(source_amount, target_currency)?;
        if target_amount.is_zero() {
            // A positive source amount can still round to 0.00 in the target
            // currency (e.g. a JPY dust amount into GBP). Reject before any
            // mutation rather than attempting a zero credit.
            return Err(LedgerError::invalid_amount(format!(
                "{source_amount} converts to less than 0.01 {target_currency}"
            )));
        }

        let snapshots = vec![source.clone(), target.clone()];
        source.debit(&source_amount)?;
        target.credit(&target_amount)?;

        let transaction = Transaction::forex(
            source_id,
            target_id,
            source_amount,
            target_amount,
            exchange_rate,
            description,
        );
        self.commit(transaction, vec![source, target], snapshots)
    }
}

fn ordered(a: AccountId, b: AccountId) -> (AccountId, AccountId) {
    if a <= b { (a, b) } else { (b, a) }
}

fn ensure_positive(amount: &Money) -> LedgerResult<()> {
    if !amount.is_positive() {
        return Err(LedgerError::invalid_amount(format!(
            "transfer amount must be positive, got {amount}"
        )));
    }
    Ok(())
}
