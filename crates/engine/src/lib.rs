//! `moneta-engine` — transfer orchestration over persistence trait seams.

pub mod account_service;
pub mod locks;
pub mod logging;
pub mod memory;
pub mod store;
pub mod transfer;


pub use account_service::AccountService;
pub use locks::AccountLocks;
pub use logging::LoggedTransfers;
pub use memory::{InMemoryAccountStore, InMemoryTransactionStore};
pub use store::{AccountStore, TransactionStore};
pub use transfer::{TransferEngine, TransferOps};
