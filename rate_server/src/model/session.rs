//! One client connection of the rate feed.
//!
//! A session owns a TCP stream carrying newline-delimited JSON. A reader thread
//! turns inbound lines into subscription updates; the session loop multiplexes
//! those updates with a tick timer using `crossbeam_channel::select!`:
//!
//! - a valid subscribe request replaces the session's pairs and is acknowledged;
//! - every tick, if any pairs are subscribed, a rate event is written;
//! - the session ends on client EOF or any write error.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select, tick, unbounded};
use log::{debug, info, warn};
use rate_common::Result;
use rate_common::pair::CurrencyPair;
use rate_common::wire::{RateEvent, SubscribeRequest, SubscribedAck};

use crate::model::price_book::PriceBook;

/// Parse one inbound line into the pairs it subscribes to.
///
/// Pairs that do not parse are dropped; a request with no usable pairs yields
/// `None`.
pub fn parse_subscription(line: &str) -> Option<Vec<CurrencyPair>> {
    let request: SubscribeRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            warn!("Ignoring non-subscribe line: {}", e);
            return None;
        }
    };
    if !request.is_rate_subscription() {
        warn!("Ignoring request for {}/{}", request.action, request.channel);
        return None;
    }
    let pairs: Vec<CurrencyPair> = request
        .params
        .pairs
        .iter()
        .filter_map(|pair| match pair.parse() {
            Ok(pair) => Some(pair),
            Err(e) => {
                warn!("Ignoring pair {}: {}", pair, e);
                None
            }
        })
        .collect();
    if pairs.is_empty() { None } else { Some(pairs) }
}

fn read_subscriptions(stream: TcpStream, tx: Sender<Vec<CurrencyPair>>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!("Session read ended: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        if let Some(pairs) = parse_subscription(&line) {
            if tx.send(pairs).is_err() {
                break;
            }
        }
    }
}

fn write_line(stream: &mut TcpStream, text: &str) -> Result<()> {
    stream.write_all(text.as_bytes())?;
    stream.write_all(b"\n")?;
    stream.flush()?;
    Ok(())
}

/// Serve one client until it disconnects or a write fails.
pub fn handle_session(mut stream: TcpStream, peer: SocketAddr, interval: Duration) -> Result<()> {
    let (sub_tx, sub_rx): (Sender<Vec<CurrencyPair>>, Receiver<Vec<CurrencyPair>>) = unbounded();
    let read_half = stream.try_clone()?;
    thread::spawn(move || read_subscriptions(read_half, sub_tx));

    let ticker = tick(interval);
    let mut book = PriceBook::new();
    let mut pairs: Vec<CurrencyPair> = Vec::new();
    let mut seqnum: u64 = 0;

    loop {
        select! {
            recv(sub_rx) -> msg => match msg {
                Ok(new_pairs) => {
                    let wire: Vec<String> = new_pairs.iter().map(CurrencyPair::to_wire_string).collect();
                    info!("{} subscribed to {}", peer, wire.join(","));
                    pairs = new_pairs;
                    write_line(&mut stream, &serde_json::to_string(&SubscribedAck::new(wire))?)?;
                }
                Err(_) => {
                    info!("{} disconnected", peer);
                    break;
                }
            },
            recv(ticker) -> _ => {
                if pairs.is_empty() {
                    continue;
                }
                seqnum += 1;
                let event = RateEvent::new(seqnum, book.tick_all(&pairs));
                write_line(&mut stream, &event.to_json()?)?;
            }
        }
    }
    Ok(())
}
