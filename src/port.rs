//! Port abstraction: bounded, rate-decoupling channels between elements.
//!
//! A port is a single-producer/single-consumer bounded queue with a blocking
//! policy attached. [`port`] returns the two endpoints: the [`OutputPort`]
//! (write side, held by the upstream element) and the [`InputPort`] (read
//! side, held by the downstream element).

use crate::buffer::Buffer;
use crate::error::{Error, Result};
use std::time::Duration;

/// Blocking policy for port operations ("maximum delay").
///
/// Resolves how long a `read` or `write` may wait before failing with
/// [`Error::Timeout`]. The policy is fixed at port construction and cannot
/// change once the element is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaxDelay {
    /// Never block: fail immediately if the operation is not ready.
    None,
    /// Block up to the given duration.
    Bounded(Duration),
    /// Block indefinitely (default for inputs).
    #[default]
    Forever,
}

impl MaxDelay {
    /// Convenience constructor for a bounded delay in milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self::Bounded(Duration::from_millis(millis))
    }
}

/// Configuration for a port: queue depth plus blocking policy.
#[derive(Debug, Clone, Copy)]
pub struct PortConfig {
    /// Queue depth (may be 1).
    pub capacity: usize,
    /// Blocking policy for operations on this port.
    pub max_delay: MaxDelay,
}

impl PortConfig {
    /// Create a config with the given capacity and the default policy
    /// (block indefinitely).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            max_delay: MaxDelay::Forever,
        }
    }

    /// Set the blocking policy.
    pub fn with_max_delay(mut self, max_delay: MaxDelay) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Create a non-blocking config (fail immediately when not ready).
    pub fn non_blocking(capacity: usize) -> Self {
        Self {
            capacity,
            max_delay: MaxDelay::None,
        }
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Create a connected port pair.
///
/// Both endpoints carry the port's configured blocking policy; the copier
/// drives each of its outputs with that output's own policy.
pub fn port(config: PortConfig) -> (OutputPort, InputPort) {
    let (tx, rx) = kanal::bounded(config.capacity);
    (
        OutputPort {
            inner: tx,
            capacity: config.capacity,
            max_delay: config.max_delay,
        },
        InputPort {
            inner: rx,
            max_delay: config.max_delay,
        },
    )
}

/// Write endpoint of a port.
#[derive(Clone)]
pub struct OutputPort {
    inner: kanal::Sender<Buffer>,
    capacity: usize,
    max_delay: MaxDelay,
}

impl OutputPort {
    /// Write a buffer, honouring this port's blocking policy.
    ///
    /// Fails with [`Error::Timeout`] if the consumer is not draining fast
    /// enough, or [`Error::Closed`] if the read side has been torn down.
    pub fn write(&self, buffer: Buffer) -> Result<()> {
        self.write_with(buffer, self.max_delay)
    }

    /// Write a buffer with an explicit policy override.
    pub fn write_with(&self, buffer: Buffer, max_delay: MaxDelay) -> Result<()> {
        match max_delay {
            MaxDelay::None => match self.inner.try_send(buffer) {
                Ok(true) => Ok(()),
                Ok(false) => Err(Error::Timeout),
                Err(_) => Err(Error::Closed),
            },
            MaxDelay::Bounded(d) => self.inner.send_timeout(buffer, d).map_err(|e| match e {
                kanal::SendErrorTimeout::Timeout => Error::Timeout,
                _ => Error::Closed,
            }),
            MaxDelay::Forever => self.inner.send(buffer).map_err(|_| Error::Closed),
        }
    }

    /// Check whether a write would succeed right now.
    pub fn is_writable(&self) -> bool {
        !self.inner.is_disconnected() && self.inner.len() < self.capacity
    }

    /// Get the number of buffers queued on this port.
    pub fn pending(&self) -> usize {
        self.inner.len()
    }

    /// Get this port's blocking policy.
    pub fn max_delay(&self) -> MaxDelay {
        self.max_delay
    }

    /// Check if the port is closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_disconnected()
    }

    /// Close the port. Idempotent.
    ///
    /// Pending buffers are discarded and the reader observes
    /// [`Error::Closed`].
    pub fn close(&self) {
        let _ = self.inner.close();
    }
}

/// Read endpoint of a port.
pub struct InputPort {
    inner: kanal::Receiver<Buffer>,
    max_delay: MaxDelay,
}

impl InputPort {
    /// Read one buffer, honouring this port's blocking policy.
    ///
    /// Fails with [`Error::Timeout`] if no buffer arrives in time, or
    /// [`Error::Closed`] if the upstream terminated the stream.
    pub fn read(&self) -> Result<Buffer> {
        self.read_with(self.max_delay)
    }

    /// Read one buffer with an explicit policy override.
    pub fn read_with(&self, max_delay: MaxDelay) -> Result<Buffer> {
        match max_delay {
            MaxDelay::None => match self.inner.try_recv() {
                Ok(Some(buffer)) => Ok(buffer),
                Ok(None) => Err(Error::Timeout),
                Err(_) => Err(Error::Closed),
            },
            MaxDelay::Bounded(d) => self.inner.recv_timeout(d).map_err(|e| match e {
                kanal::ReceiveErrorTimeout::Timeout => Error::Timeout,
                _ => Error::Closed,
            }),
            MaxDelay::Forever => self.inner.recv().map_err(|_| Error::Closed),
        }
    }

    /// Check whether a read would succeed right now.
    pub fn is_readable(&self) -> bool {
        !self.inner.is_empty()
    }

    /// Get the number of buffers queued on this port.
    pub fn pending(&self) -> usize {
        self.inner.len()
    }

    /// Get this port's blocking policy.
    pub fn max_delay(&self) -> MaxDelay {
        self.max_delay
    }

    /// Check if the port is closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_disconnected()
    }

    /// Close the port. Idempotent.
    ///
    /// The writer observes [`Error::Closed`] on the next write.
    pub fn close(&self) {
        let _ = self.inner.close();
    }
}
