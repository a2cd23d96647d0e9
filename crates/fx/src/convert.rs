//! Currency conversion over an injected rate source.

use rust_decimal::Decimal;

use moneta_core::{LedgerError, LedgerResult};
use moneta_money::{Currency, Money};

use crate::rates::RateSource;

/// Computes cross-rates through the pivot currency and converts amounts.
#[derive(Debug, Clone)]
pub struct CurrencyConverter<R> {
    rates: R,
}

impl<R: RateSource> CurrencyConverter<R> {
    pub fn new(rates: R) -> Self {
        Self { rates }
    }

    /// Convert an amount into the target currency, rounding to 2 digits.
    ///
    /// Same-currency conversion returns the amount unchanged.
    pub fn convert(&self, amount: Money, target: Currency) -> LedgerResult<Money> {
        if amount.currency() == target {
            return Ok(amount);
        }
        let rate = self.exchange_rate(amount.currency(), target)?;
        Ok(Money::new(amount.amount() * rate, target))
    }

    /// Cross-rate from `source` to `target`.
    ///
    /// `rate(source -> target) = (1 / rate(source -> pivot)) * rate(target -> pivot)`;
    /// 1.0 when source and target coincide. The returned rate is unrounded -
    /// rounding happens when an amount is materialized as `Money`.
    pub fn exchange_rate(&self, source: Currency, target: Currency) -> LedgerResult<Decimal> {
        if source == target {
            return Ok(Decimal::ONE);
        }
        let source_to_pivot = self.rate_to_pivot(source)?;
        let target_to_pivot = self.rate_to_pivot(target)?;
        Ok((Decimal::ONE / source_to_pivot) * target_to_pivot)
    }

    /// True iff both currencies have a known rate to the pivot.
    pub fn is_conversion_supported(&self, source: Currency, target: Currency) -> bool {
        self.rates.rate_to_pivot(source).is_some() && self.rates.rate_to_pivot(target).is_some()
    }

    fn rate_to_pivot(&self, currency: Currency) -> LedgerResult<Decimal> {
        let rate = self
            .rates
            .rate_to_pivot(currency)
            .ok_or_else(|| LedgerError::unsupported_conversion(format!("no pivot rate for {currency}")))?;
        if rate <= Decimal::ZERO {
            return Err(LedgerError::unsupported_conversion(format!(
                "non-positive pivot rate for {currency}"
            )));
        }
        Ok(rate)
    }
}
