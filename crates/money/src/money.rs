//! Fixed-point monetary amounts.

use core::str::FromStr;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use moneta_core::{LedgerError, LedgerResult, ValueObject};

use crate::currency::Currency;

/// Number of fractional digits every amount is rounded to.
const SCALE: u32 = 2;

/// An immutable amount of money in a specific currency.
///
/// Every constructor and arithmetic operation rounds the amount to two
/// fractional digits using half-up (midpoint away from zero) rounding, so two
/// `Money` values are equal exactly when their rounded amounts and currencies
/// are equal. Arithmetic between different currencies fails with
/// `CurrencyMismatch`; conversion is the FX component's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create an amount, rounding to 2 fractional digits half-up.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: round(amount),
            currency,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parse an amount from its decimal string representation.
    pub fn of(amount: &str, currency: Currency) -> LedgerResult<Self> {
        let amount = Decimal::from_str(amount)
            .map_err(|e| LedgerError::invalid_amount(format!("{amount}: {e}")))?;
        Ok(Self::new(amount, currency))
    }

    /// Create an amount from a binary float.
    ///
    /// The float is converted through its decimal representation before
    /// rounding, so `0.1f64` becomes exactly `0.10` rather than the nearest
    /// binary fraction.
    pub fn from_f64(amount: f64, currency: Currency) -> LedgerResult<Self> {
        let amount = Decimal::from_f64(amount)
            .ok_or_else(|| LedgerError::invalid_amount(format!("not a finite number: {amount}")))?;
        Ok(Self::new(amount, currency))
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another amount of the same currency.
    pub fn add(&self, other: &Money) -> LedgerResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount + other.amount, self.currency))
    }

    /// Subtract another amount of the same currency.
    pub fn subtract(&self, other: &Money) -> LedgerResult<Money> {
        self.ensure_same_currency(other)?;
        Ok(Money::new(self.amount - other.amount, self.currency))
    }

    /// Multiply by a factor (e.g. an exchange rate).
    pub fn multiply(&self, factor: Decimal) -> Money {
        Money::new(self.amount * factor, self.currency)
    }

    /// Divide by a divisor.
    pub fn divide(&self, divisor: Decimal) -> LedgerResult<Money> {
        if divisor.is_zero() {
            return Err(LedgerError::DivideByZero);
        }
        Ok(Money::new(self.amount / divisor, self.currency))
    }

    pub fn is_greater_or_equal(&self, other: &Money) -> LedgerResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    pub fn is_greater_than(&self, other: &Money) -> LedgerResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount > other.amount)
    }

    pub fn is_less_or_equal(&self, other: &Money) -> LedgerResult<bool> {
        self.ensure_same_currency(other)?;
        Ok(self.amount <= other.amount)
    }

    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn ensure_same_currency(&self, other: &Money) -> LedgerResult<()> {
        if self.currency != other.currency {
            return Err(LedgerError::currency_mismatch(format!(
                "{} and {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }
}

impl ValueObject for Money {}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency.symbol())
    }
}

fn round(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero)
}
