//! Transfer logging decorator.
//!
//! The original system logged every transfer through runtime interception;
//! here the wrapping is an explicit decorator, visible at the call site:
//!
//! ```ignore
//! let engine = LoggedTransfers::new(TransferEngine::new(accounts, transactions, converter));
//! engine.transfer_local(source, target, amount, "rent")?;
//! ```

use std::time::Instant;

use moneta_core::{AccountId, LedgerResult};
use moneta_money::Money;
use moneta_transactions::Transaction;

use crate::transfer::TransferOps;

/// Wraps any `TransferOps`, measuring duration and recording outcome.
#[derive(Debug)]
pub struct LoggedTransfers<E> {
    inner: E,
}

impl<E: TransferOps> LoggedTransfers<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn record(operation: &str, started: Instant, result: &LedgerResult<Transaction>) {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(transaction) => tracing::info!(
                operation,
                transaction_id = %transaction.id_typed(),
                status = ?transaction.status(),
                elapsed_ms,
                "transfer completed"
            ),
            Err(err) => tracing::warn!(
                operation,
                code = err.code(),
                elapsed_ms,
                "transfer failed: {err}"
            ),
        }
    }
}

impl<E: TransferOps> TransferOps for LoggedTransfers<E> {
    fn transfer_local(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction> {
        let started = Instant::now();
        let result = self
            .inner
            .transfer_local(source_id, target_id, amount, description);
        Self::record("transfer_local", started, &result);
        result
    }

    fn transfer_forex(
        &self,
        source_id: AccountId,
        target_id: AccountId,
        source_amount: Money,
        description: &str,
    ) -> LedgerResult<Transaction> {
        let started = Instant::now();
        let result = self
            .inner
            .transfer_forex(source_id, target_id, source_amount, description);
        Self::record("transfer_forex", started, &result);
        result
    }
}
