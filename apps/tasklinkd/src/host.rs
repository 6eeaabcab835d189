//! Host side of the simulated channel: a transport backed by tokio channels.

use tasklink_protocol::{Dictionary, Transport, TransportError};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

/// Everything the host delivers to the client's event loop.
#[derive(Debug)]
pub enum HostEvent {
    Inbound(Dictionary),
    /// The companion acknowledged the last transmitted message.
    Sent,
    SendFailed(TransportError),
}

/// Outbox plus the wire to the companion.
#[derive(Debug)]
pub struct ChannelTransport {
    wire: mpsc::Sender<Dictionary>,
    outbox: Option<Dictionary>,
    buffers: Option<(usize, usize)>,
    transmitted: usize,
}

impl ChannelTransport {
    pub fn new(wire: mpsc::Sender<Dictionary>) -> Self {
        Self {
            wire,
            outbox: None,
            buffers: None,
            transmitted: 0,
        }
    }

    pub fn transmitted(&self) -> usize {
        self.transmitted
    }
}

impl Transport for ChannelTransport {
    fn open(&mut self, inbox_size: usize, outbox_size: usize) -> Result<(), TransportError> {
        self.buffers = Some((inbox_size, outbox_size));
        Ok(())
    }

    fn close(&mut self) {
        self.buffers = None;
        self.outbox = None;
    }

    fn stage(&mut self, message: Dictionary) -> Result<(), TransportError> {
        if self.buffers.is_none() {
            return Err(TransportError::Closed);
        }
        self.outbox = Some(message);
        Ok(())
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        let message = self.outbox.take().ok_or(TransportError::Other(0))?;
        match self.wire.try_send(message) {
            Ok(()) => {
                self.transmitted += 1;
                debug!(transmitted = self.transmitted, "message on the wire");
                Ok(())
            }
            Err(TrySendError::Full(message)) => {
                self.outbox = Some(message);
                Err(TransportError::Busy)
            }
            Err(TrySendError::Closed(_)) => Err(TransportError::NotConnected),
        }
    }
}

/// Transport for transcript replay: nothing is ever sent anywhere.
#[derive(Debug, Default)]
pub struct DetachedTransport;

impl Transport for DetachedTransport {
    fn open(&mut self, _inbox_size: usize, _outbox_size: usize) -> Result<(), TransportError> {
        Ok(())
    }

    fn close(&mut self) {}

    fn stage(&mut self, message: Dictionary) -> Result<(), TransportError> {
        debug!(entries = message.len(), "discarding outbound message");
        Ok(())
    }

    fn transmit(&mut self) -> Result<(), TransportError> {
        Err(TransportError::NotConnected)
    }
}
