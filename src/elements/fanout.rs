//! FanOut element - replicates buffers to multiple outputs.
//!
//! 1-to-N pipe fitting with per-output backpressure policy. This is the
//! complement to a funnel, which merges N inputs into one output.

use crate::element::{Element, ElementState, Flow};
use crate::error::{Error, Result};
use crate::port::{InputPort, OutputPort};
use smallvec::SmallVec;

/// Configuration for a [`FanOut`] element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutConfig {
    /// Number of output ports. Must be at least 1; fixed at initialization.
    pub copy_num: usize,
}

impl FanOutConfig {
    /// Create a config with the given number of outputs.
    pub fn new(copy_num: usize) -> Self {
        Self { copy_num }
    }
}

impl Default for FanOutConfig {
    fn default() -> Self {
        Self { copy_num: 1 }
    }
}

/// One bound output branch.
struct OutputSlot {
    /// Write endpoint; `None` once the branch is released. The endpoint is
    /// dropped rather than closed so the consumer can drain buffers already
    /// queued before it observes `Closed`.
    port: Option<OutputPort>,
    /// False once the downstream end is torn down; the branch is then
    /// skipped on every later iteration.
    active: bool,
    delivered: u64,
    dropped: u64,
}

impl OutputSlot {
    fn new(port: OutputPort) -> Self {
        Self {
            port: Some(port),
            active: true,
            delivered: 0,
            dropped: 0,
        }
    }
}

/// Counters for one output branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    /// Buffers delivered to this output.
    pub delivered: u64,
    /// Buffers dropped for this output because its queue stayed full past
    /// the port's blocking policy.
    pub dropped: u64,
    /// Whether this branch is still live.
    pub active: bool,
}

/// Snapshot of a [`FanOut`]'s counters.
#[derive(Debug, Clone)]
pub struct FanOutStats {
    /// Buffers read from the input.
    pub processed: u64,
    /// Payload bytes read from the input.
    pub bytes: u64,
    /// Per-output counters, in bind order.
    pub outputs: Vec<OutputStats>,
}

/// An element that replicates each input buffer to N independent outputs.
///
/// Each output branch applies its own port's blocking policy, so a slow
/// consumer either throttles the pipeline (blocking policy) or loses frames
/// (non-blocking or bounded policy) without stalling the other branches.
/// A branch whose downstream end is torn down is disabled permanently;
/// the element goes terminal when the input closes
/// ([`Flow::UpstreamClosed`]) or when every branch is disabled
/// ([`Flow::AllOutputsClosed`]).
///
/// Outputs receive O(1) clones sharing the same immutable payload; buffers
/// are delivered to every live output in input order.
///
/// # Example
///
/// ```rust
/// use manifold::prelude::*;
///
/// let (producer, input) = port(PortConfig::new(4));
/// let (out, consumer) = port(PortConfig::new(4));
///
/// let mut fanout = FanOut::new(FanOutConfig::new(1)).unwrap();
/// fanout.open(input, vec![out]).unwrap();
///
/// producer.write(Buffer::from_bytes(vec![7u8], Metadata::with_sequence(0))).unwrap();
/// assert_eq!(fanout.process().unwrap(), Flow::Ok);
/// assert_eq!(consumer.read().unwrap().as_bytes(), &[7u8]);
/// ```
pub struct FanOut {
    name: String,
    copy_num: usize,
    state: ElementState,
    input: Option<InputPort>,
    outputs: SmallVec<[OutputSlot; 4]>,
    /// Set when the element goes terminal through the stream (input closed
    /// or all outputs closed); replayed by later process calls.
    terminal: Option<Flow>,
    processed: u64,
    bytes: u64,
}

impl FanOut {
    /// Create a new FanOut element.
    ///
    /// Validates the configuration and allocates the output slot table.
    /// Fails with [`Error::InvalidArgument`] if `copy_num` is zero. No
    /// externally observable effect until [`FanOut::open`].
    pub fn new(config: FanOutConfig) -> Result<Self> {
        if config.copy_num == 0 {
            return Err(Error::InvalidArgument(
                "copy_num must be at least 1".into(),
            ));
        }
        Ok(Self {
            name: format!("fanout-{}", config.copy_num),
            copy_num: config.copy_num,
            state: ElementState::Initialized,
            input: None,
            outputs: SmallVec::with_capacity(config.copy_num),
            terminal: None,
            processed: 0,
            bytes: 0,
        })
    }

    /// Set a custom name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Get the configured number of outputs.
    pub fn copy_num(&self) -> usize {
        self.copy_num
    }

    /// Bind the input port and exactly `copy_num` output ports.
    ///
    /// Outputs are serviced in the order given here on every iteration.
    /// Each output keeps the blocking policy of its own port configuration.
    /// Fails with [`Error::InvalidArgument`] (and transitions to the
    /// `Error` state) if the output count does not match `copy_num`.
    pub fn open(
        &mut self,
        input: InputPort,
        outputs: impl IntoIterator<Item = OutputPort>,
    ) -> Result<()> {
        if self.state != ElementState::Initialized {
            return Err(Error::InvalidState {
                expected: ElementState::Initialized,
                actual: self.state,
            });
        }

        let slots: SmallVec<[OutputSlot; 4]> =
            outputs.into_iter().map(OutputSlot::new).collect();
        if slots.len() != self.copy_num {
            self.state = ElementState::Error;
            return Err(Error::InvalidArgument(format!(
                "{}: expected {} output ports, got {}",
                self.name,
                self.copy_num,
                slots.len()
            )));
        }

        self.input = Some(input);
        self.outputs = slots;
        self.state = ElementState::Running;
        Ok(())
    }

    /// Run one copy iteration: read one buffer from the input, write a
    /// clone to every live output in bind order.
    ///
    /// Per-branch outcomes:
    /// - `Timeout`: the buffer is dropped for that output only; its drop
    ///   counter increments and processing continues.
    /// - `Closed`: the branch is disabled permanently. When the last branch
    ///   goes, the element closes and reports [`Flow::AllOutputsClosed`].
    ///
    /// A closed input shuts the element down and reports
    /// [`Flow::UpstreamClosed`]; remaining outputs are released so each
    /// consumer drains its queued buffers and then observes closed. A finite
    /// input policy that times out surfaces [`Error::Timeout`] and leaves
    /// the element running so the driver may retry.
    pub fn process_step(&mut self) -> Result<Flow> {
        match self.state {
            ElementState::Running => {}
            ElementState::Closed => {
                // Sticky terminal replay for stream-driven shutdown;
                // a driver-initiated close has no status to replay.
                return match self.terminal {
                    Some(flow) => Ok(flow),
                    None => Err(Error::InvalidState {
                        expected: ElementState::Running,
                        actual: ElementState::Closed,
                    }),
                };
            }
            state => {
                return Err(Error::InvalidState {
                    expected: ElementState::Running,
                    actual: state,
                });
            }
        }

        let Some(input) = &self.input else {
            // Running implies a bound input; anything else is a lifecycle fault.
            self.state = ElementState::Error;
            return Err(Error::InvalidState {
                expected: ElementState::Running,
                actual: ElementState::Error,
            });
        };

        let buffer = match input.read() {
            Ok(buffer) => buffer,
            Err(Error::Closed) => {
                tracing::debug!(element = %self.name, "input closed, shutting down");
                return Ok(self.go_terminal(Flow::UpstreamClosed));
            }
            Err(e) => return Err(e),
        };
        self.processed += 1;
        self.bytes += buffer.len() as u64;

        for (index, slot) in self.outputs.iter_mut().enumerate() {
            if !slot.active {
                continue;
            }
            let Some(port) = &slot.port else {
                continue;
            };
            match port.write(buffer.clone()) {
                Ok(()) => slot.delivered += 1,
                Err(Error::Timeout) => {
                    slot.dropped += 1;
                    tracing::debug!(
                        element = %self.name,
                        output = index,
                        sequence = buffer.metadata().sequence,
                        dropped = slot.dropped,
                        "output not draining, buffer dropped"
                    );
                }
                Err(_) => {
                    slot.active = false;
                    slot.port = None;
                    tracing::debug!(
                        element = %self.name,
                        output = index,
                        "output closed, branch disabled"
                    );
                }
            }
        }

        if self.outputs.iter().any(|slot| slot.active) {
            Ok(Flow::Ok)
        } else {
            tracing::debug!(element = %self.name, "all outputs closed, shutting down");
            Ok(self.go_terminal(Flow::AllOutputsClosed))
        }
    }

    /// Get a snapshot of the element's counters.
    pub fn stats(&self) -> FanOutStats {
        FanOutStats {
            processed: self.processed,
            bytes: self.bytes,
            outputs: self
                .outputs
                .iter()
                .map(|slot| OutputStats {
                    delivered: slot.delivered,
                    dropped: slot.dropped,
                    active: slot.active,
                })
                .collect(),
        }
    }

    /// Get the number of buffers read from the input.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    fn go_terminal(&mut self, flow: Flow) -> Flow {
        self.release_ports();
        self.state = ElementState::Closed;
        self.terminal = Some(flow);
        flow
    }

    fn release_ports(&mut self) {
        if let Some(input) = self.input.take() {
            input.close();
        }
        for slot in &mut self.outputs {
            // Drop the write endpoint instead of closing the channel:
            // buffers already queued stay drainable by the consumer,
            // which then observes Closed.
            slot.port = None;
            slot.active = false;
        }
    }
}

impl std::fmt::Debug for FanOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanOut")
            .field("name", &self.name)
            .field("copy_num", &self.copy_num)
            .field("state", &self.state)
            .field("processed", &self.processed)
            .finish()
    }
}

impl Element for FanOut {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ElementState {
        self.state
    }

    fn process(&mut self) -> Result<Flow> {
        self.process_step()
    }

    fn close(&mut self) -> Result<()> {
        if self.state == ElementState::Closed {
            return Ok(());
        }
        self.release_ports();
        self.state = ElementState::Closed;
        Ok(())
    }
}
