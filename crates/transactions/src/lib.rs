//! `moneta-transactions` — immutable transfer records and their status machine.

pub mod transaction;

pub use transaction::{Transaction, TransactionStatus, TransferType};
