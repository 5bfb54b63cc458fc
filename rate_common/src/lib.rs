//!
//! Common types and the quote subscription channel shared by the rate feed and client.
//!
//! This crate aggregates:
//! - `error`: unified error type `RateError` used across the workspace.
//! - `result`: handy `Result<T, RateError>` alias.
//! - `currency`: crypto asset symbols and crypto/fiat amounts.
//! - `pair`: `CurrencyPair` and its `"BASE-QUOTE"` wire form.
//! - `request`: directional `QuoteRequest` values and pair derivation.
//! - `rate`: typed `ExchangeRate` updates.
//! - `wire`: JSON envelopes of the `exchange_rate` channel.
//! - `transport`: the duplex text transport the channel runs over.
//! - `broadcast`: hot multicast of published rates.
//! - `channel`: `QuoteSubscriptionChannel` itself.
//! - `net`: networking constants and small helpers.
#![warn(missing_docs)]
pub mod broadcast;
pub mod channel;
pub mod currency;
pub mod error;
pub mod net;
pub mod pair;
pub mod rate;
pub mod request;
pub mod result;
pub mod transport;
pub mod wire;

pub use channel::QuoteSubscriptionChannel;
pub use error::RateError;
pub use result::Result;
