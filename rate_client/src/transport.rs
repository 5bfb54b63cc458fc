//! Line-delimited TCP transport for the quote channel.
//!
//! Every frame is one line of text. `send` writes the frame and a newline under
//! a mutex; a background reader splits inbound bytes on newlines and forwards
//! each non-empty line to every receiver handed out by `responses`. When the
//! server closes the socket the reader drops all senders, which ends the
//! channel's pump. There is no reconnection.
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, error, info};
use rate_common::transport::Transport;
use rate_common::{RateError, Result};
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// TCP socket carrying newline-delimited text frames.
pub struct TcpLineTransport {
    writer: Mutex<TcpStream>,
    listeners: Arc<Mutex<Vec<Sender<String>>>>,
    open: Arc<AtomicBool>,
}

impl TcpLineTransport {
    /// Connect to `server` (`host:port`) and start the reader thread.
    pub fn connect(server: &str) -> Result<Self> {
        let stream = TcpStream::connect(server)
            .map_err(|e| RateError::Transport(format!("Failed to connect to {}: {}", server, e)))?;
        stream.set_nodelay(true)?;
        info!("Connected to rate feed at {}", stream.peer_addr()?);

        let read_half = stream.try_clone()?;
        let listeners: Arc<Mutex<Vec<Sender<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let open = Arc::new(AtomicBool::new(true));
        let reader_listeners = Arc::clone(&listeners);
        let reader_open = Arc::clone(&open);
        thread::Builder::new()
            .name("rate-transport-reader".to_string())
            .spawn(move || {
                read_lines(read_half, &reader_listeners);
                // Flag and senders change under the lock so `responses` never
                // registers a sender nobody will drop.
                match reader_listeners.lock() {
                    Ok(mut listeners) => {
                        reader_open.store(false, Ordering::SeqCst);
                        listeners.clear();
                    }
                    Err(e) => error!("Listener list poisoned: {}", e),
                }
            })?;

        Ok(Self {
            writer: Mutex::new(stream),
            listeners,
            open,
        })
    }

    /// Whether the server side is still connected.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Close both directions of the socket.
    pub fn close(&self) -> Result<()> {
        self.writer.lock()?.shutdown(Shutdown::Both)?;
        Ok(())
    }
}

fn read_lines(stream: TcpStream, listeners: &Mutex<Vec<Sender<String>>>) {
    for line in BufReader::new(stream).lines() {
        match line {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => {
                debug!("<- {}", line);
                match listeners.lock() {
                    Ok(mut listeners) => listeners.retain(|tx| tx.send(line.clone()).is_ok()),
                    Err(e) => {
                        error!("Listener list poisoned: {}", e);
                        break;
                    }
                }
            }
            Err(e) => {
                error!("Rate feed read error: {}", e);
                break;
            }
        }
    }
    info!("Rate feed connection closed");
}

impl Transport for TcpLineTransport {
    fn send(&self, message: &str) -> Result<()> {
        if !self.is_open() {
            return Err(RateError::Transport("connection closed".to_string()));
        }
        let mut writer = self.writer.lock()?;
        writer.write_all(message.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        debug!("-> {}", message);
        Ok(())
    }

    fn responses(&self) -> Receiver<String> {
        let (tx, rx) = unbounded();
        match self.listeners.lock() {
            Ok(mut listeners) if self.is_open() => listeners.push(tx),
            Ok(_) => debug!("Responses requested after the connection closed"),
            Err(e) => error!("Listener list poisoned: {}", e),
        }
        rx
    }
}
