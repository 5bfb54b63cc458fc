//! Synthetic exchange-rate prices.
//!
//! Each pair starts from a reference price derived from a fixed USD table and
//! a fiat conversion table, then moves by a small random walk every tick.
//! Prices are kept as `f64` and only rendered to decimal strings on the wire.

use std::collections::HashMap;

use rand::Rng;
use rate_common::currency::CryptoCurrency;
use rate_common::pair::CurrencyPair;
use rate_common::wire::WireRate;

/// Reference USD price of one unit of each crypto asset.
fn usd_price(currency: CryptoCurrency) -> f64 {
    match currency {
        CryptoCurrency::BTC => 9000.0,
        CryptoCurrency::ETH => 200.0,
        CryptoCurrency::BCH => 250.0,
        CryptoCurrency::XLM => 0.07,
        CryptoCurrency::PAX => 1.0,
    }
}

/// Units of a fiat currency per USD. Unknown codes are treated as USD.
fn fiat_per_usd(code: &str) -> f64 {
    match code {
        "EUR" => 0.9,
        "GBP" => 0.78,
        "CAD" => 1.33,
        "JPY" => 108.0,
        "CHF" => 0.97,
        _ => 1.0,
    }
}

/// Current prices of every pair any client has asked for.
#[derive(Default)]
pub struct PriceBook {
    prices: HashMap<CurrencyPair, f64>,
}

impl PriceBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starting price of a pair before any tick.
    pub fn reference_price(pair: &CurrencyPair) -> f64 {
        let base = usd_price(pair.base);
        match pair.quote_crypto() {
            Some(quote) => base / usd_price(quote),
            None => base * fiat_per_usd(&pair.quote),
        }
    }

    /// Calculate the next price using a random walk of at most ±1% around `current_price`.
    ///
    /// The result is clamped to a minimum positive value.
    pub fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let change: f64 = rng.random_range(-0.01..0.01);
        let new_price = current_price * (1.0 + change);
        new_price.max(0.000001)
    }

    /// Move `pair` one step and return its new price.
    pub fn tick(&mut self, pair: &CurrencyPair) -> f64 {
        let current = self
            .prices
            .get(pair)
            .copied()
            .unwrap_or_else(|| Self::reference_price(pair));
        let next = Self::next_price(current);
        self.prices.insert(pair.clone(), next);
        next
    }

    /// Move every pair in `pairs` and return the wire entries, in the same order.
    pub fn tick_all(&mut self, pairs: &[CurrencyPair]) -> Vec<WireRate> {
        pairs
            .iter()
            .map(|pair| WireRate {
                pair: pair.to_wire_string(),
                price: format_price(self.tick(pair)),
            })
            .collect()
    }
}

/// Decimal string for the wire; sub-unit prices keep more digits.
pub fn format_price(price: f64) -> String {
    if price < 1.0 {
        format!("{:.6}", price)
    } else {
        format!("{:.2}", price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rate_common::rate::ExchangeRate;

    #[test]
    fn crypto_quotes_use_the_usd_ratio() {
        let pair = CurrencyPair::new(CryptoCurrency::BTC, "ETH");
        assert_eq!(PriceBook::reference_price(&pair), 45.0);
    }

    #[test]
    fn fiat_quotes_apply_the_conversion() {
        let pair = CurrencyPair::new(CryptoCurrency::ETH, "GBP");
        assert!((PriceBook::reference_price(&pair) - 156.0).abs() < 1e-9);
    }

    #[test]
    fn tick_stays_within_one_percent() {
        let mut book = PriceBook::new();
        let pair = CurrencyPair::new(CryptoCurrency::BTC, "USD");
        let price = book.tick(&pair);
        assert!((8910.0..=9090.0).contains(&price));
    }

    #[test]
    fn tick_all_produces_decodable_entries() {
        let mut book = PriceBook::new();
        let pairs = vec![
            CurrencyPair::new(CryptoCurrency::XLM, "USD"),
            CurrencyPair::new(CryptoCurrency::BTC, "BCH"),
        ];
        let entries = book.tick_all(&pairs);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].pair, "XLM-USD");
        for entry in entries {
            assert!(ExchangeRate::from_wire(&entry.pair, &entry.price).is_ok());
        }
    }

    #[test]
    fn formats_small_prices_with_more_digits() {
        assert_eq!(format_price(0.0712346), "0.071235");
        assert_eq!(format_price(2018.414), "2018.41");
    }
}
