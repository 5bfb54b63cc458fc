use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};
use rate_common::currency::{CryptoCurrency, CryptoValue};
use rate_common::rate::ExchangeRate;
use rate_common::request::QuoteRequest;
use rate_common::transport::Transport;
use rate_common::{QuoteSubscriptionChannel, Result};
use rust_decimal_macros::dec;

const WAIT: Duration = Duration::from_secs(2);

/// Test double: records every sent frame and fans pushed frames out to every
/// receiver handed out by `responses`.
#[derive(Clone)]
struct FakeSocket {
    sent: Arc<Mutex<Vec<String>>>,
    listeners: Arc<Mutex<Option<Vec<Sender<String>>>>>,
}

impl FakeSocket {
    fn new() -> Self {
        FakeSocket {
            sent: Arc::new(Mutex::new(Vec::new())),
            listeners: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }

    fn push(&self, message: &str) {
        if let Some(listeners) = self.listeners.lock().unwrap().as_mut() {
            listeners.retain(|tx| tx.send(message.to_string()).is_ok());
        }
    }

    /// Drops every inbound sender, as a closed socket would.
    fn close(&self) {
        self.listeners.lock().unwrap().take();
    }
}

impl Transport for FakeSocket {
    fn send(&self, message: &str) -> Result<()> {
        self.sent.lock()?.push(message.to_string());
        Ok(())
    }

    fn responses(&self) -> Receiver<String> {
        let (tx, rx) = unbounded();
        if let Some(listeners) = self.listeners.lock().unwrap().as_mut() {
            listeners.push(tx);
        }
        rx
    }
}

fn selling(offering: CryptoValue, wanted: CryptoCurrency, fiat: &str) -> QuoteRequest {
    QuoteRequest::Selling {
        offering,
        wanted,
        indicative_fiat_symbol: fiat.to_string(),
    }
}

fn subscribe_text(pair: &str) -> String {
    format!(
        "{{\"action\":\"subscribe\",\"channel\":\"exchange_rate\",\
         \"params\":{{\"pairs\":[\"{}\"],\"type\":\"exchangeRates\"}}}}",
        pair
    )
}

#[test]
fn sends_a_request_down_the_socket() {
    let socket = FakeSocket::new();
    let mut channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();

    channel
        .update_quote_request(&selling(CryptoValue::bitcoin(100), CryptoCurrency::ETH, "USD"))
        .unwrap();

    assert_eq!(socket.sent(), vec![subscribe_text("BTC-USD")]);
}

#[test]
fn same_parameters_send_just_one_request() {
    let socket = FakeSocket::new();
    let mut channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let request = selling(CryptoValue::bitcoin(100), CryptoCurrency::ETH, "USD");

    channel.update_quote_request(&request).unwrap();
    channel.update_quote_request(&request).unwrap();
    channel.update_quote_request(&request).unwrap();

    assert_eq!(socket.sent().len(), 1);
}

#[test]
fn changing_the_subscription_never_unsubscribes() {
    let socket = FakeSocket::new();
    let mut channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();

    channel
        .update_quote_request(&selling(CryptoValue::bitcoin(200), CryptoCurrency::ETH, "USD"))
        .unwrap();
    channel
        .update_quote_request(&selling(CryptoValue::ether(300), CryptoCurrency::BCH, "CAD"))
        .unwrap();

    let sent = socket.sent();
    assert_eq!(sent, vec![subscribe_text("BTC-USD"), subscribe_text("ETH-CAD")]);
    assert!(sent.iter().all(|m| !m.contains("unsubscribe")));
}

#[test]
fn switching_back_resubscribes() {
    let socket = FakeSocket::new();
    let mut channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let btc = selling(CryptoValue::bitcoin(1), CryptoCurrency::ETH, "USD");
    let eth = selling(CryptoValue::ether(1), CryptoCurrency::BTC, "USD");

    channel.update_quote_request(&btc).unwrap();
    channel.update_quote_request(&eth).unwrap();
    channel.update_quote_request(&btc).unwrap();

    assert_eq!(
        socket.sent(),
        vec![
            subscribe_text("BTC-USD"),
            subscribe_text("ETH-USD"),
            subscribe_text("BTC-USD"),
        ]
    );
}

#[test]
fn socket_message_is_converted_to_a_rate() {
    let socket = FakeSocket::new();
    let channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let rates = channel.rates().unwrap();

    socket.push(
        r#"
        {
          "seqnum":2,"channel":"exchange_rate",
          "event":"exchangeRate",
          "rates":[{"pair":"ETH-GBP","price":"2018.41"}]
        }"#,
    );

    let rate = rates.next_timeout(WAIT).expect("a published rate");
    assert_eq!(
        rate,
        ExchangeRate::CryptoToFiat {
            from: CryptoCurrency::ETH,
            to: "GBP".to_string(),
            rate: dec!(2018.41),
        }
    );
    assert_eq!(rates.next_timeout(Duration::from_millis(100)), None);
}

#[test]
fn subscribed_message_is_not_passed_on() {
    let socket = FakeSocket::new();
    let channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let rates = channel.rates().unwrap();

    socket.push(r#"{"event":"subscribed","channel":"exchange_rate","pairs":["BTC-USD"]}"#);
    socket.push("garbage");
    socket.push(r#"{"event":"exchangeRate","rates":[{"pair":"BTC-USD","price":"9000.5"}]}"#);

    // Frames are processed in order, so the first value out is the rate event.
    let rate = rates.next_timeout(WAIT).expect("a published rate");
    assert_eq!(rate.from(), CryptoCurrency::BTC);
    assert_eq!(rate.rate(), dec!(9000.5));
    assert_eq!(rates.next_timeout(Duration::from_millis(100)), None);
}

#[test]
fn late_subscriber_only_sees_later_rates() {
    let socket = FakeSocket::new();
    let channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let early = channel.rates().unwrap();

    socket.push(r#"{"rates":[{"pair":"BTC-USD","price":"1"}]}"#);
    assert!(early.next_timeout(WAIT).is_some());

    let late = channel.rates().unwrap();
    socket.push(r#"{"rates":[{"pair":"BTC-USD","price":"2"}]}"#);

    assert_eq!(late.next_timeout(WAIT).map(|r| r.rate()), Some(dec!(2)));
    assert_eq!(early.next_timeout(WAIT).map(|r| r.rate()), Some(dec!(2)));
}

fn rate_frame(price: u32) -> String {
    format!(r#"{{"event":"exchangeRate","rates":[{{"pair":"BTC-USD","price":"{}"}}]}}"#, price)
}

fn wait_until_stopped<T: Transport>(channel: &QuoteSubscriptionChannel<T>) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if !channel.is_pumping() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

#[test]
fn reopened_channel_receives_every_frame() {
    let socket = FakeSocket::new();
    drop(QuoteSubscriptionChannel::new(socket.clone()).unwrap());

    let channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let rates = channel.rates().unwrap();
    for price in 1..=40 {
        socket.push(&rate_frame(price));
    }

    let received: Vec<_> = (0..40).filter_map(|_| rates.next_timeout(WAIT)).collect();
    assert_eq!(received.len(), 40);
    assert_eq!(received.last().map(|r| r.rate()), Some(dec!(40)));
}

#[test]
fn two_channels_on_one_socket_each_see_all_frames() {
    let socket = FakeSocket::new();
    let first = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let second = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let first_rates = first.rates().unwrap();
    let second_rates = second.rates().unwrap();

    for price in 1..=10 {
        socket.push(&rate_frame(price));
    }

    for rates in [&first_rates, &second_rates] {
        let received: Vec<_> = (0..10).filter_map(|_| rates.next_timeout(WAIT)).collect();
        assert_eq!(received.len(), 10);
    }
}

#[test]
fn closing_the_socket_ends_publication() {
    let socket = FakeSocket::new();
    let channel = QuoteSubscriptionChannel::new(socket.clone()).unwrap();
    let rates = channel.rates().unwrap();

    socket.push(&rate_frame(1));
    socket.close();

    assert!(wait_until_stopped(&channel), "pump still running after close");
    // Frames queued before the close are still published.
    assert_eq!(rates.drain().len(), 1);

    socket.push(&rate_frame(2));
    assert_eq!(rates.next_timeout(Duration::from_millis(200)), None);
}
