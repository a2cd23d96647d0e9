//! Per-account lock registry.
//!
//! Every mutating operation on an account acquires its lock before the
//! load-modify-save, so writers sharing an account serialize while disjoint
//! accounts proceed concurrently. The registry is shared between the transfer
//! engine and the account service so a deposit cannot interleave with a
//! transfer on the same account.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use moneta_core::{AccountId, LedgerError, LedgerResult};

/// One lock handle per account, created on demand.
#[derive(Debug, Default)]
pub struct AccountLocks {
    inner: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for one account.
    ///
    /// Handles nobody holds anymore are pruned on the way, so the registry
    /// tracks only accounts with an operation in flight instead of every
    /// account ever touched.
    pub fn handle(&self, id: AccountId) -> LedgerResult<Arc<Mutex<()>>> {
        let mut map = self
            .inner
            .lock()
            .map_err(|_| LedgerError::persistence("account lock registry poisoned"))?;
        map.retain(|_, handle| Arc::strong_count(handle) > 1);
        Ok(map.entry(id).or_default().clone())
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

pub(crate) fn lock(mutex: &Mutex<()>) -> LedgerResult<MutexGuard<'_, ()>> {
    mutex
        .lock()
        .map_err(|_| LedgerError::persistence("account lock poisoned"))
}
