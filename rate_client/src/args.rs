//! Command-line arguments for the rate client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use rate_common::currency::{CryptoCurrency, CryptoValue};
use rate_common::net::{FEED_PORT, addr};
use rate_common::request::QuoteRequest;
use rust_decimal::Decimal;

/// Direction of the quoted trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    /// Sell a fixed amount of the offered asset.
    Sell,
    /// Buy a fixed amount of the wanted asset.
    Buy,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Rate feed address as `host:port`.
    #[clap(long, default_value_t = addr("127.0.0.1", FEED_PORT))]
    pub server: String,

    /// Whether the amount is sold or bought.
    #[clap(long, value_enum, default_value_t = Side::Sell)]
    pub side: Side,

    /// Amount of the fixed side of the trade.
    #[clap(long, default_value = "1")]
    pub amount: Decimal,

    /// Crypto asset given up.
    #[clap(long, value_enum, ignore_case = true)]
    pub offering: CryptoCurrency,

    /// Crypto asset received.
    #[clap(long, value_enum, ignore_case = true)]
    pub wanted: CryptoCurrency,

    /// Fiat currency the trade is quoted in.
    #[clap(long, default_value = "USD")]
    pub fiat: String,
}

impl Args {
    /// The quote request described by these arguments.
    pub fn quote_request(&self) -> QuoteRequest {
        let fiat = self.fiat.trim().to_ascii_uppercase();
        match self.side {
            Side::Sell => QuoteRequest::Selling {
                offering: CryptoValue::new(self.offering, self.amount),
                wanted: self.wanted,
                indicative_fiat_symbol: fiat,
            },
            Side::Buy => QuoteRequest::Buying {
                offering: self.offering,
                wanted: CryptoValue::new(self.wanted, self.amount),
                indicative_fiat_symbol: fiat,
            },
        }
    }
}
