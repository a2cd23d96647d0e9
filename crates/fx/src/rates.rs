//! Exchange-rate lookup seam.

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use moneta_money::Currency;

/// Source of rates against the pivot currency.
///
/// `rate_to_pivot(c)` is how many units of `c` one unit of the pivot buys.
/// A live rate-feed adapter implements this at the boundary; the converter
/// only ever needs this one lookup.
pub trait RateSource: Send + Sync {
    fn rate_to_pivot(&self, currency: Currency) -> Option<Decimal>;
}

impl<R> RateSource for Arc<R>
where
    R: RateSource + ?Sized,
{
    fn rate_to_pivot(&self, currency: Currency) -> Option<Decimal> {
        (**self).rate_to_pivot(currency)
    }
}

/// Static rate table with EUR as the pivot.
///
/// 1 EUR buys the listed amount of each currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRates;

impl RateSource for StaticRates {
    fn rate_to_pivot(&self, currency: Currency) -> Option<Decimal> {
        let rate = match currency {
            Currency::Eur => dec!(1.0),
            Currency::Usd => dec!(1.08),
            Currency::Gbp => dec!(0.86),
            Currency::Mad => dec!(10.85),
            Currency::Jpy => dec!(162.50),
            Currency::Chf => dec!(0.94),
        };
        Some(rate)
    }
}
