//! Currency pairs and their `"BASE-QUOTE"` wire form.
//!
//! The base side of a pair on the `exchange_rate` channel is always a crypto
//! asset; the quote side is either another crypto asset or a fiat code, so it
//! is kept as the raw upper-case symbol.
use std::fmt;
use std::str::FromStr;

use crate::currency::CryptoCurrency;
use crate::error::RateError;

/// Separator between the two legs of a wire pair.
pub const PAIR_SEPARATOR: char = '-';

/// Ordered (base, quote) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    /// Crypto asset being priced.
    pub base: CryptoCurrency,
    /// Symbol the base is priced in: a crypto ticker or a fiat code.
    pub quote: String,
}

impl CurrencyPair {
    /// Creates a pair; the quote symbol is upper-cased.
    pub fn new(base: CryptoCurrency, quote: &str) -> Self {
        Self {
            base,
            quote: quote.trim().to_ascii_uppercase(),
        }
    }

    /// Wire representation, e.g. `BTC-USD`.
    pub fn to_wire_string(&self) -> String {
        self.to_string()
    }

    /// The quote side resolved as a crypto asset, if it is one.
    pub fn quote_crypto(&self) -> Option<CryptoCurrency> {
        CryptoCurrency::from_symbol(&self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.base, PAIR_SEPARATOR, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = RateError;

    /// Parses `BASE-QUOTE`, splitting on the first separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once(PAIR_SEPARATOR)
            .ok_or_else(|| RateError::MalformedPair(s.to_string()))?;
        if base.is_empty() || quote.is_empty() {
            return Err(RateError::MalformedPair(s.to_string()));
        }
        let base = CryptoCurrency::from_symbol(base)
            .ok_or_else(|| RateError::UnrecognizedAsset(base.to_string()))?;
        Ok(CurrencyPair::new(base, quote))
    }
}
