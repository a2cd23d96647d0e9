//! `moneta-accounts` — the account aggregate.

pub mod account;

pub use account::Account;
