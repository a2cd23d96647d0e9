//! `moneta-fx` — exchange rates and currency conversion.

pub mod convert;
pub mod rates;

pub use convert::CurrencyConverter;
pub use rates::{RateSource, StaticRates};
