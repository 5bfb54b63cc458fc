//! Typed exchange-rate updates published by the channel.
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::currency::CryptoCurrency;
use crate::pair::CurrencyPair;
use crate::result::Result;

/// Price of one unit of a crypto asset in another currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRate {
    /// Crypto asset priced in a fiat currency.
    CryptoToFiat {
        /// Asset being priced.
        from: CryptoCurrency,
        /// Fiat currency code.
        to: String,
        /// Units of `to` per unit of `from`.
        rate: Decimal,
    },
    /// Crypto asset priced in another crypto asset.
    CryptoToCrypto {
        /// Asset being priced.
        from: CryptoCurrency,
        /// Asset the price is expressed in.
        to: CryptoCurrency,
        /// Units of `to` per unit of `from`.
        rate: Decimal,
    },
}

impl ExchangeRate {
    /// Builds a rate from a wire pair (`"ETH-GBP"`) and price string (`"2018.41"`).
    ///
    /// The quote leg becomes a crypto asset when it names one and is kept as a
    /// fiat code otherwise.
    pub fn from_wire(pair: &str, price: &str) -> Result<Self> {
        let pair: CurrencyPair = pair.parse()?;
        let rate = Decimal::from_str(price.trim())?;
        Ok(match pair.quote_crypto() {
            Some(to) => ExchangeRate::CryptoToCrypto {
                from: pair.base,
                to,
                rate,
            },
            None => ExchangeRate::CryptoToFiat {
                from: pair.base,
                to: pair.quote,
                rate,
            },
        })
    }

    /// Asset being priced.
    pub fn from(&self) -> CryptoCurrency {
        match self {
            ExchangeRate::CryptoToFiat { from, .. } | ExchangeRate::CryptoToCrypto { from, .. } => {
                *from
            }
        }
    }

    /// Symbol the price is expressed in.
    pub fn to_symbol(&self) -> &str {
        match self {
            ExchangeRate::CryptoToFiat { to, .. } => to,
            ExchangeRate::CryptoToCrypto { to, .. } => to.symbol(),
        }
    }

    /// The price itself.
    pub fn rate(&self) -> Decimal {
        match self {
            ExchangeRate::CryptoToFiat { rate, .. } | ExchangeRate::CryptoToCrypto { rate, .. } => {
                *rate
            }
        }
    }

    /// Converts `amount` of `from` into the quote currency.
    pub fn apply(&self, amount: Decimal) -> Decimal {
        amount * self.rate()
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1 {} = {} {}", self.from(), self.rate(), self.to_symbol())
    }
}
