//! Crypto asset symbols and the crypto/fiat amounts carried by quote requests.

use std::fmt;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Crypto assets recognised on the `exchange_rate` channel.
///
/// The variant name is the ticker symbol used on the wire. Parsing is
/// case-insensitive so `"eth"` and `"ETH"` resolve to the same asset.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    AsRefStr,
    Hash,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[strum(ascii_case_insensitive)]
pub enum CryptoCurrency {
    BTC,
    ETH,
    BCH,
    XLM,
    PAX,
}

impl CryptoCurrency {
    /// Ticker symbol as written on the wire.
    pub fn symbol(&self) -> &str {
        self.as_ref()
    }

    /// Resolve a wire symbol; `None` when it is not a crypto asset (e.g. a fiat code).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        symbol.parse().ok()
    }
}

/// An amount of a crypto asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoValue {
    /// Asset the amount is denominated in.
    pub currency: CryptoCurrency,
    /// Amount in whole units of the asset.
    pub amount: Decimal,
}

impl CryptoValue {
    /// Creates a new crypto amount.
    pub fn new(currency: CryptoCurrency, amount: Decimal) -> Self {
        Self { currency, amount }
    }

    /// `amount` of bitcoin.
    pub fn bitcoin(amount: impl Into<Decimal>) -> Self {
        Self::new(CryptoCurrency::BTC, amount.into())
    }

    /// `amount` of ether.
    pub fn ether(amount: impl Into<Decimal>) -> Self {
        Self::new(CryptoCurrency::ETH, amount.into())
    }
}

impl fmt::Display for CryptoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

/// An amount of a fiat currency, identified by its ISO code (e.g. `USD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatValue {
    /// Fiat currency code.
    pub currency_code: String,
    /// Amount in the fiat currency.
    pub amount: Decimal,
}

impl FiatValue {
    /// Creates a new fiat amount; the code is upper-cased.
    pub fn new(currency_code: &str, amount: Decimal) -> Self {
        Self {
            currency_code: currency_code.trim().to_ascii_uppercase(),
            amount,
        }
    }
}

impl fmt::Display for FiatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn resolves_symbols_case_insensitively() {
        assert_eq!(CryptoCurrency::from_symbol("ETH"), Some(CryptoCurrency::ETH));
        assert_eq!(CryptoCurrency::from_symbol("bch"), Some(CryptoCurrency::BCH));
    }

    #[test]
    fn fiat_codes_are_not_crypto() {
        assert_eq!(CryptoCurrency::from_symbol("GBP"), None);
        assert_eq!(CryptoCurrency::from_symbol(""), None);
    }

    #[test]
    fn symbol_matches_display() {
        assert_eq!(CryptoCurrency::XLM.symbol(), "XLM");
        assert_eq!(CryptoCurrency::XLM.to_string(), "XLM");
    }

    #[test]
    fn fiat_code_is_normalised() {
        let value = FiatValue::new(" usd", dec!(10.5));
        assert_eq!(value.currency_code, "USD");
        assert_eq!(value.to_string(), "10.5 USD");
    }

    #[test]
    fn crypto_helpers_pick_the_asset() {
        assert_eq!(CryptoValue::bitcoin(100).to_string(), "100 BTC");
        assert_eq!(CryptoValue::ether(300).currency, CryptoCurrency::ETH);
    }
}
