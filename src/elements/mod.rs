//! Built-in pipeline elements.
//!
//! ## Routing
//! - [`FanOut`]: replicates one input stream to N independent outputs
//!   (1-to-N fanout with per-output backpressure policy)

mod fanout;

pub use fanout::{FanOut, FanOutConfig, FanOutStats, OutputStats};
