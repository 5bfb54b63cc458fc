//! The duplex text transport a quote channel runs over.
//!
//! Implementations own the actual socket. The channel only needs to push
//! text frames out and to drain inbound text frames in arrival order.
use crossbeam_channel::Receiver;

use crate::result::Result;

/// Duplex string-message transport.
pub trait Transport: Send + Sync {
    /// Send one text frame. Must not block on the remote side.
    fn send(&self, message: &str) -> Result<()>;

    /// Inbound text frames in arrival order, starting from the moment this is
    /// called. Each call returns its own receiver that sees every later frame;
    /// receivers never share frames. The receiver disconnects when the
    /// transport closes.
    fn responses(&self) -> Receiver<String>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, message: &str) -> Result<()> {
        (**self).send(message)
    }

    fn responses(&self) -> Receiver<String> {
        (**self).responses()
    }
}
