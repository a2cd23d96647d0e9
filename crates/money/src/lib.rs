//! `moneta-money` — currency catalog and the `Money` value object.

pub mod currency;
pub mod money;

pub use currency::Currency;
pub use money::Money;
