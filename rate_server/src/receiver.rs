use crate::model::session::handle_session;
use log::{error, info};
use rate_common::RateError;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

/// TCP listener that accepts rate-feed clients.
///
/// Each accepted connection is served by its own session thread, so a client
/// sending garbage or disconnecting never affects the others.
pub struct RateListener {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
    /// Interval between two rate frames.
    interval: Duration,
}

impl RateListener {
    /// Bind a new listener to `bind_addr` (e.g., `0.0.0.0:8090`).
    pub fn new(bind_addr: &str, interval: Duration) -> Result<Self, RateError> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self { socket, interval })
    }

    /// Blocking accept loop; spawns a session per connection.
    pub fn accept_loop(self) -> Result<(), RateError> {
        info!(
            "Exchange rate feed is started on {}",
            self.socket.local_addr()?
        );

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = match stream.peer_addr() {
                        Ok(peer) => peer,
                        Err(e) => {
                            error!("Peer address unavailable: {}", e);
                            continue;
                        }
                    };
                    info!("Client connected: {}", peer);
                    let interval = self.interval;
                    thread::spawn(move || {
                        if let Err(e) = handle_session(stream, peer, interval) {
                            error!("Session {} ended with error: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}
