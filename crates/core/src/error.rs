//! Ledger error model.

use thiserror::Error;

/// Result type used across the ledger core.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant is a deterministic domain failure except `PersistenceFailure`,
/// which is propagated from the storage collaborators. None of these are ever
/// swallowed or downgraded on the way to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No account exists for the given identifier or number.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Two money values (or an amount and an account) disagree on currency.
    #[error("currency mismatch: {0}")]
    CurrencyMismatch(String),

    /// A debit would take the balance below zero.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// A currency code outside the supported set.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// No exchange rate is known for the requested currency pair.
    #[error("unsupported conversion: {0}")]
    UnsupportedConversion(String),

    /// A non-positive or malformed amount where a positive one is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An illegal transaction status transition.
    #[error("invalid transaction state: {0}")]
    InvalidTransactionState(String),

    /// Division of a money value by zero.
    #[error("division by zero")]
    DivideByZero,

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A storage collaborator failed to read or write.
    #[error("persistence failure: {0}")]
    PersistenceFailure(String),
}

impl LedgerError {
    pub fn account_not_found(msg: impl Into<String>) -> Self {
        Self::AccountNotFound(msg.into())
    }

    pub fn currency_mismatch(msg: impl Into<String>) -> Self {
        Self::CurrencyMismatch(msg.into())
    }

    pub fn insufficient_funds(msg: impl Into<String>) -> Self {
        Self::InsufficientFunds(msg.into())
    }

    pub fn unsupported_currency(msg: impl Into<String>) -> Self {
        Self::UnsupportedCurrency(msg.into())
    }

    pub fn unsupported_conversion(msg: impl Into<String>) -> Self {
        Self::UnsupportedConversion(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidTransactionState(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::PersistenceFailure(msg.into())
    }

    /// Stable machine-readable code for this error kind.
    ///
    /// Outer layers (HTTP, audit) key on this string; the human-readable
    /// message may change, the code must not.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "account_not_found",
            Self::CurrencyMismatch(_) => "currency_mismatch",
            Self::InsufficientFunds(_) => "insufficient_funds",
            Self::UnsupportedCurrency(_) => "unsupported_currency",
            Self::UnsupportedConversion(_) => "unsupported_conversion",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidTransactionState(_) => "invalid_transaction_state",
            Self::DivideByZero => "divide_by_zero",
            Self::InvalidId(_) => "invalid_id",
            Self::PersistenceFailure(_) => "persistence_failure",
        }
    }
}
