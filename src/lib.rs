//! # Manifold
//!
//! A bounded fan-out core for real-time buffer pipelines.
//!
//! Manifold provides the 1-to-N replication stage of an in-process pipeline:
//! one input stream of buffers copied to N independently-paced consumers,
//! with per-output backpressure policy instead of unbounded buffering.
//!
//! ## Features
//!
//! - **Cheap buffer sharing**: outputs receive refcounted clones, not copies
//! - **Per-output blocking policy**: a slow consumer drops frames or throttles
//!   the pipeline, per its own port configuration
//! - **Partial-failure isolation**: a stalled or closed output never starves
//!   the remaining outputs
//! - **Driver-friendly lifecycle**: open/process/close with explicit flow
//!   statuses, no panics across the element boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use manifold::prelude::*;
//!
//! let (producer, input) = port(PortConfig::new(8));
//! let (out_a, consumer_a) = port(PortConfig::new(8));
//! let (out_b, consumer_b) = port(PortConfig::new(8));
//!
//! let mut fanout = FanOut::new(FanOutConfig::new(2)).unwrap();
//! fanout.open(input, vec![out_a, out_b]).unwrap();
//!
//! producer.write(Buffer::from_bytes(vec![1u8, 2, 3], Metadata::with_sequence(0))).unwrap();
//! assert!(matches!(fanout.process().unwrap(), Flow::Ok));
//!
//! assert_eq!(consumer_a.read().unwrap().metadata().sequence, 0);
//! assert_eq!(consumer_b.read().unwrap().metadata().sequence, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod buffer;
pub mod element;
pub mod elements;
pub mod error;
pub mod metadata;
pub mod port;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::Buffer;
    pub use crate::element::{Element, ElementState, Flow};
    pub use crate::elements::{FanOut, FanOutConfig, FanOutStats};
    pub use crate::error::{Error, Result};
    pub use crate::metadata::Metadata;
    pub use crate::port::{InputPort, MaxDelay, OutputPort, PortConfig, port};
}

pub use error::{Error, Result};
