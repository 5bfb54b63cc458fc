//! Rate Client: connects to an exchange-rate feed, subscribes to the pair
//! derived from a quote request and logs every rate it receives.
//!
//! Usage example (CLI):
//! ```bash
//! rate_client --server 127.0.0.1:8090 --side sell --amount 100 --offering btc --wanted eth --fiat usd
//! ```
//!
//! The request is reduced to a `BASE-QUOTE` pair (here `BTC-USD`) by the quote
//! channel, which sends a single subscribe frame and publishes decoded rates.
#![warn(missing_docs)]
mod args;
mod transport;

use crate::args::Args;
use crate::transport::TcpLineTransport;
use chrono::Utc;
use clap::Parser;
use log::{debug, error, info};
use rate_common::{QuoteSubscriptionChannel, RateError, Result};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

/// How long to wait for a rate before re-checking the shutdown flag.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> Result<(), RateError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| RateError::Format(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let transport = Arc::new(TcpLineTransport::connect(&args.server)?);
    let mut channel = QuoteSubscriptionChannel::new(Arc::clone(&transport))?;
    let rates = channel.rates()?;

    let request = args.quote_request();
    info!("Quote request: {:?}", request);
    if let Err(e) = channel.update_quote_request(&request) {
        error!("Sending subscription failed: {}", e);
        return Err(e);
    }

    info!("Client is running. Press Ctrl+C to exit.");
    while !shutdown.load(Ordering::Relaxed) {
        match rates.next_timeout(POLL_INTERVAL) {
            Some(rate) => info!(
                "RATE: {} Time={}",
                rate,
                Utc::now().timestamp_millis()
            ),
            None if !transport.is_open() && !channel.is_pumping() => {
                // The pump has processed every queued frame; log what is left.
                for rate in rates.drain() {
                    info!("RATE: {} Time={}", rate, Utc::now().timestamp_millis());
                }
                info!("Rate feed closed the connection");
                break;
            }
            None => {}
        }
    }

    info!("Receiver loop stopping...");
    if let Err(e) = transport.close() {
        debug!("Socket already closed: {}", e);
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
