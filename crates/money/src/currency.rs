//! Supported currency catalog.

use serde::{Deserialize, Serialize};

use moneta_core::{LedgerError, LedgerResult};

/// Closed set of supported currencies.
///
/// Adding a currency is a deliberate, versioned change, not dynamic data:
/// the exchange-rate table, the conversion tests, and any persisted balances
/// all depend on this set being fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Mad,
    Jpy,
    Chf,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Mad,
        Currency::Jpy,
        Currency::Chf,
    ];

    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Mad => "MAD",
            Currency::Jpy => "JPY",
            Currency::Chf => "CHF",
        }
    }

    /// Display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Usd => "$",
            Currency::Gbp => "£",
            Currency::Mad => "DH",
            Currency::Jpy => "¥",
            Currency::Chf => "CHF",
        }
    }

    /// Full display name.
    pub fn name(&self) -> &'static str {
        match self {
            Currency::Eur => "Euro",
            Currency::Usd => "US Dollar",
            Currency::Gbp => "Pound Sterling",
            Currency::Mad => "Moroccan Dirham",
            Currency::Jpy => "Japanese Yen",
            Currency::Chf => "Swiss Franc",
        }
    }

    /// Look up a currency by ISO code, case-insensitively.
    pub fn from_code(code: &str) -> LedgerResult<Currency> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LedgerError::unsupported_currency(code.to_string()))
    }

    /// Whether a code names a supported currency.
    pub fn is_supported(code: &str) -> bool {
        Currency::from_code(code).is_ok()
    }

    /// Codes of all supported currencies.
    pub fn supported_codes() -> Vec<&'static str> {
        Currency::ALL.iter().map(Currency::code).collect()
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(Currency::from_code("eur").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_code("Usd").unwrap(), Currency::Usd);
        assert_eq!(Currency::from_code("MAD").unwrap(), Currency::Mad);
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Currency::from_code("BTC").unwrap_err();
        assert_eq!(err, LedgerError::unsupported_currency("BTC"));
        assert!(!Currency::is_supported("BTC"));
    }

    #[test]
    fn supported_codes_cover_the_catalog() {
        let codes = Currency::supported_codes();
        assert_eq!(codes, vec!["EUR", "USD", "GBP", "MAD", "JPY", "CHF"]);
        for code in codes {
            assert!(Currency::is_supported(code));
        }
    }
}
