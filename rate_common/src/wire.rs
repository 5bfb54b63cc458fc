//! JSON envelopes of the `exchange_rate` channel.
//!
//! Outbound, the client only ever sends subscribe requests. Inbound, the server
//! sends either subscription acknowledgements or rate events carrying a
//! `rates` array. Entries of that array are kept as raw JSON values here so a
//! malformed entry only fails itself, not the whole envelope.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pair::CurrencyPair;
use crate::result::Result;

/// Channel name carried by every envelope.
pub const CHANNEL: &str = "exchange_rate";
/// `action` of a subscribe request.
pub const ACTION_SUBSCRIBE: &str = "subscribe";
/// `params.type` of a subscribe request.
pub const TYPE_EXCHANGE_RATES: &str = "exchangeRates";
/// `event` of a subscription acknowledgement.
pub const EVENT_SUBSCRIBED: &str = "subscribed";
/// `event` of a rate update.
pub const EVENT_EXCHANGE_RATE: &str = "exchangeRate";

/// Outbound subscribe request. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Always `subscribe`.
    pub action: String,
    /// Always `exchange_rate`.
    pub channel: String,
    /// Pairs and subscription type.
    pub params: SubscriptionParams,
}

/// `params` of a subscribe request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionParams {
    /// Wire pairs, e.g. `["BTC-USD"]`.
    pub pairs: Vec<String>,
    /// Always `exchangeRates`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl SubscribeRequest {
    /// Subscribe request for a single pair.
    pub fn for_pair(pair: &CurrencyPair) -> Self {
        SubscribeRequest {
            action: String::from(ACTION_SUBSCRIBE),
            channel: String::from(CHANNEL),
            params: SubscriptionParams {
                pairs: vec![pair.to_wire_string()],
                kind: String::from(TYPE_EXCHANGE_RATES),
            },
        }
    }

    /// Encode as compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Whether this is a well-formed subscribe on the rate channel.
    pub fn is_rate_subscription(&self) -> bool {
        self.action == ACTION_SUBSCRIBE
            && self.channel == CHANNEL
            && self.params.kind == TYPE_EXCHANGE_RATES
    }
}

/// Inbound envelope. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InboundEnvelope {
    /// Event kind, e.g. `exchangeRate` or `subscribed`.
    #[serde(default)]
    pub event: Option<String>,
    /// Channel name.
    #[serde(default)]
    pub channel: Option<String>,
    /// Server sequence number.
    #[serde(default)]
    pub seqnum: Option<u64>,
    /// Raw rate entries; absent on acknowledgements.
    #[serde(default)]
    pub rates: Vec<Value>,
}

/// One `rates` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRate {
    /// `BASE-QUOTE` pair.
    pub pair: String,
    /// Decimal price as a string.
    pub price: String,
}

impl WireRate {
    /// Decode one raw `rates` entry.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Outbound rate event, as pushed by a feed. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEvent {
    /// Server sequence number.
    pub seqnum: u64,
    /// Always `exchange_rate`.
    pub channel: String,
    /// Always `exchangeRate`.
    pub event: String,
    /// One entry per subscribed pair.
    pub rates: Vec<WireRate>,
}

impl RateEvent {
    /// Rate event with the given sequence number and entries.
    pub fn new(seqnum: u64, rates: Vec<WireRate>) -> Self {
        RateEvent {
            seqnum,
            channel: String::from(CHANNEL),
            event: String::from(EVENT_EXCHANGE_RATE),
            rates,
        }
    }

    /// Encode as compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What an inbound frame means to the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Subscription acknowledgement; carries no rates.
    Ack,
    /// Anything else; the raw entries to decode, possibly none.
    Rates(Vec<Value>),
}

impl InboundEnvelope {
    /// Decode inbound JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether the envelope is a subscription acknowledgement.
    pub fn is_ack(&self) -> bool {
        self.event.as_deref() == Some(EVENT_SUBSCRIBED)
    }

    /// Classify the envelope, consuming it.
    pub fn into_frame(self) -> Frame {
        if self.is_ack() {
            Frame::Ack
        } else {
            Frame::Rates(self.rates)
        }
    }
}

/// Acknowledgement sent back for a subscribe request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribedAck {
    /// Always `subscribed`.
    pub event: String,
    /// Always `exchange_rate`.
    pub channel: String,
    /// Pairs now being streamed.
    pub pairs: Vec<String>,
}

impl SubscribedAck {
    /// Acknowledgement for `pairs`.
    pub fn new(pairs: Vec<String>) -> Self {
        SubscribedAck {
            event: String::from(EVENT_SUBSCRIBED),
            channel: String::from(CHANNEL),
            pairs,
        }
    }
}
