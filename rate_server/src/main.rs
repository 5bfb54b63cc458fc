//! Local exchange-rate feed.
//!
//! This binary speaks the `exchange_rate` channel protocol over plain TCP with
//! one JSON document per line, so a quote channel can be exercised without the
//! real exchange backend. It wires together:
//!
//! - `RateListener`: accepts TCP clients and spawns a session thread for each.
//! - `session`: reads subscribe requests, acknowledges them with a `subscribed`
//!   frame and streams `exchangeRate` frames for the subscribed pairs on a timer.
//! - `PriceBook`: per-session synthetic prices following a small random walk.
//!
//! A new subscribe request replaces the previous pairs of that session; there is
//! no unsubscribe.
#![warn(missing_docs)]
use crate::receiver::RateListener;
use rate_common::RateError;
use rate_common::net::{FEED_PORT, TICK_MS, addr};
use std::time::Duration;

pub mod model;
mod receiver;

fn main() -> Result<(), RateError> {
    init_logger();
    let listener = RateListener::new(&addr("0.0.0.0", FEED_PORT), Duration::from_millis(TICK_MS))?;
    listener.accept_loop()
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
