//! Quote subscription channel.
//!
//! `QuoteSubscriptionChannel` sits between "I want a quote for this request"
//! and a text transport:
//!
//! - Outbound, each request is reduced to a `CurrencyPair`. A subscribe frame is
//!   sent only when that pair differs from the last one sent. Changing pair
//!   never sends an unsubscribe; the server replaces the previous subscription.
//! - Inbound, a dedicated pump thread drains `Transport::responses`, drops
//!   subscription acknowledgements, decodes each `rates` entry into an
//!   `ExchangeRate` and publishes it to every current subscriber.
//!
//! Error policy:
//! - A frame that is not valid JSON is logged and dropped; the pump keeps going.
//! - A single bad entry (malformed pair, unknown base asset, bad price) is
//!   logged and skipped; its siblings are still published.
//! - A failed send is returned to the caller of `update_quote_request` and the
//!   remembered pair is left untouched, so the same request can be retried.
//!   The pair is therefore recorded after `send` succeeds, not before.
//!
//! Lifetime: the pump waits on the transport's responses and on a stop signal
//! with `select!`. It ends when the transport closes or when the channel is
//! dropped; dropping the channel joins the pump, so a channel created later on
//! the same transport is the only reader of what arrives afterwards.
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, select, unbounded};
use log::{debug, info, warn};

use crate::broadcast::{RateBroadcaster, Subscription};
use crate::pair::CurrencyPair;
use crate::rate::ExchangeRate;
use crate::request::QuoteRequest;
use crate::result::Result;
use crate::transport::Transport;
use crate::wire::{Frame, InboundEnvelope, SubscribeRequest, WireRate};

/// Name of the inbound pump thread.
const PUMP_THREAD: &str = "quote-channel-pump";

/// Translates quote requests into subscribe frames and inbound frames into rates.
pub struct QuoteSubscriptionChannel<T: Transport> {
    transport: T,
    last_pair: Option<CurrencyPair>,
    rates: Arc<RateBroadcaster>,
    stop_tx: Sender<()>,
    pump: Option<JoinHandle<()>>,
}

impl<T: Transport> QuoteSubscriptionChannel<T> {
    /// Opens a channel over `transport` and starts draining its responses.
    pub fn new(transport: T) -> Result<Self> {
        let responses = transport.responses();
        let rates = Arc::new(RateBroadcaster::new());
        let pump_rates = Arc::clone(&rates);
        let (stop_tx, stop_rx) = unbounded::<()>();
        let pump = thread::Builder::new()
            .name(PUMP_THREAD.to_string())
            .spawn(move || run_pump(responses, stop_rx, pump_rates))?;

        Ok(Self {
            transport,
            last_pair: None,
            rates,
            stop_tx,
            pump: Some(pump),
        })
    }

    /// Subscribes to the pair derived from `request` unless it is already the
    /// current one.
    pub fn update_quote_request(&mut self, request: &QuoteRequest) -> Result<()> {
        let pair = request.pair();
        if self.last_pair.as_ref() == Some(&pair) {
            debug!("Already subscribed to {}", pair);
            return Ok(());
        }

        let message = SubscribeRequest::for_pair(&pair).to_json()?;
        self.transport.send(&message)?;
        info!("Subscribed to exchange rates for {}", pair);
        self.last_pair = Some(pair);
        Ok(())
    }

    /// Live stream of rates published from now on.
    pub fn rates(&self) -> Result<Subscription> {
        self.rates.subscribe()
    }

    /// Pair of the last subscribe frame sent, if any.
    pub fn last_pair(&self) -> Option<&CurrencyPair> {
        self.last_pair.as_ref()
    }

    /// Processes one inbound frame synchronously. Returns the number of rates
    /// published.
    pub fn process_message(&self, message: &str) -> Result<usize> {
        publish_message(&self.rates, message)
    }

    /// The transport this channel sends through.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Whether inbound frames are still being published. Turns false once the
    /// transport closed and every queued frame was processed.
    pub fn is_pumping(&self) -> bool {
        self.pump.as_ref().is_some_and(|pump| !pump.is_finished())
    }
}

impl<T: Transport> Drop for QuoteSubscriptionChannel<T> {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
        if let Some(pump) = self.pump.take() {
            if pump.join().is_err() {
                warn!("Quote channel pump panicked");
            }
        }
    }
}

fn run_pump(responses: Receiver<String>, stop_rx: Receiver<()>, rates: Arc<RateBroadcaster>) {
    info!("Quote channel pump started");
    loop {
        select! {
            recv(stop_rx) -> _ => {
                info!("Quote channel pump stopped: channel closed");
                return;
            },
            recv(responses) -> msg => match msg {
                Ok(message) => {
                    if let Err(e) = publish_message(&rates, &message) {
                        warn!("Dropping inbound frame: {}", e);
                    }
                }
                Err(_) => {
                    info!("Quote channel pump stopped: transport closed");
                    return;
                }
            },
        }
    }
}

fn publish_message(rates: &RateBroadcaster, message: &str) -> Result<usize> {
    let entries = match InboundEnvelope::parse(message)?.into_frame() {
        Frame::Ack => {
            debug!("Subscription acknowledged");
            return Ok(0);
        }
        Frame::Rates(entries) => entries,
    };

    let mut published = 0;
    for entry in entries {
        let rate = match WireRate::from_value(entry)
            .and_then(|wire| ExchangeRate::from_wire(&wire.pair, &wire.price))
        {
            Ok(rate) => rate,
            Err(e) => {
                warn!("Skipping rate entry: {}", e);
                continue;
            }
        };
        rates.publish(&rate)?;
        published += 1;
    }
    Ok(published)
}
