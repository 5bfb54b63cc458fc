//! Directional quote requests and the pair each one subscribes to.
//!
//! A request says what the user is giving up and what they want in return.
//! Rates on the `exchange_rate` channel are always quoted for the offered
//! crypto asset against a fiat currency, so every variant derives the same
//! shape of pair: `OFFERED-FIAT`.
use crate::currency::{CryptoCurrency, CryptoValue, FiatValue};
use crate::pair::CurrencyPair;

/// What a user wants quoted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteRequest {
    /// Selling a fixed amount of `offering` for some amount of `wanted`.
    Selling {
        /// Amount being sold.
        offering: CryptoValue,
        /// Asset received in exchange.
        wanted: CryptoCurrency,
        /// Fiat currency used to quote the trade.
        indicative_fiat_symbol: String,
    },
    /// Buying a fixed amount of `wanted` with some amount of `offering`.
    Buying {
        /// Asset given up.
        offering: CryptoCurrency,
        /// Amount being bought.
        wanted: CryptoValue,
        /// Fiat currency used to quote the trade.
        indicative_fiat_symbol: String,
    },
    /// Selling `offering` worth a fixed fiat amount.
    SellingFiatLinked {
        /// Asset given up.
        offering: CryptoCurrency,
        /// Asset received in exchange.
        wanted: CryptoCurrency,
        /// Fiat value of the offered side.
        offering_fiat_value: FiatValue,
    },
    /// Buying `wanted` worth a fixed fiat amount.
    BuyingFiatLinked {
        /// Asset given up.
        offering: CryptoCurrency,
        /// Asset received in exchange.
        wanted: CryptoCurrency,
        /// Fiat value of the wanted side.
        wanted_fiat_value: FiatValue,
    },
}

impl QuoteRequest {
    /// Asset the user gives up.
    pub fn offering(&self) -> CryptoCurrency {
        match self {
            QuoteRequest::Selling { offering, .. } => offering.currency,
            QuoteRequest::Buying { offering, .. }
            | QuoteRequest::SellingFiatLinked { offering, .. }
            | QuoteRequest::BuyingFiatLinked { offering, .. } => *offering,
        }
    }

    /// Asset the user receives.
    pub fn wanted(&self) -> CryptoCurrency {
        match self {
            QuoteRequest::Buying { wanted, .. } => wanted.currency,
            QuoteRequest::Selling { wanted, .. }
            | QuoteRequest::SellingFiatLinked { wanted, .. }
            | QuoteRequest::BuyingFiatLinked { wanted, .. } => *wanted,
        }
    }

    /// Fiat currency the trade is quoted in.
    pub fn fiat_symbol(&self) -> &str {
        match self {
            QuoteRequest::Selling {
                indicative_fiat_symbol,
                ..
            }
            | QuoteRequest::Buying {
                indicative_fiat_symbol,
                ..
            } => indicative_fiat_symbol,
            QuoteRequest::SellingFiatLinked {
                offering_fiat_value,
                ..
            } => &offering_fiat_value.currency_code,
            QuoteRequest::BuyingFiatLinked {
                wanted_fiat_value, ..
            } => &wanted_fiat_value.currency_code,
        }
    }

    /// Pair to subscribe to for this request.
    ///
    /// Direction does not matter: the offered crypto asset is the base and the
    /// fiat symbol is the quote. The wanted asset never appears in the pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.offering(), self.fiat_symbol())
    }
}
