//! Element system for Manifold pipelines.
//!
//! This module defines the generic lifecycle shared by every pipeline
//! element:
//!
//! - [`ElementState`]: the lifecycle state machine
//! - [`Flow`]: the status a process step reports to the driver
//! - [`Element`]: the capability interface every element type implements
//!
//! # Design
//!
//! Elements follow the "sync processing, external orchestration" principle:
//! the `process` method is **synchronous** and is invoked repeatedly by an
//! external pipeline driver. The element never spawns tasks of its own; the
//! only suspension points are port reads and writes, bounded by each port's
//! blocking policy.
//!
//! Port binding (`open`) is element-specific because pad topology differs
//! per element type (a fan-out binds one input and N outputs, a funnel the
//! reverse), so it lives on the concrete type rather than the trait.

use crate::error::Result;

/// Lifecycle state of a pipeline element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Constructed but not yet configured.
    Uninitialized,
    /// Configuration validated, internal state allocated, ports not bound.
    Initialized,
    /// Ports bound; process steps may be invoked.
    Running,
    /// Terminal: stream ended or the element was closed. Only `close` is legal.
    Closed,
    /// Terminal: unrecoverable configuration or allocation failure.
    /// Only `close` is legal.
    Error,
}

impl ElementState {
    /// Check if this state is terminal (no further processing possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Error)
    }

    /// Check if process steps may be invoked in this state.
    pub fn can_process(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Running => "running",
            Self::Closed => "closed",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Status of one process step, reported to the pipeline driver.
///
/// Terminal variants are sticky: once returned, every later process step
/// reports the same status without touching the ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The step completed; the element can continue.
    Ok,
    /// The input port reported closed; the element shut itself down and
    /// propagated the close to its remaining outputs.
    UpstreamClosed,
    /// Every output branch is permanently disabled; the driver should tear
    /// down or restart this pipeline segment.
    AllOutputsClosed,
}

impl Flow {
    /// Check if this status is terminal for the element.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Ok)
    }
}

/// The capability interface implemented by every pipeline element.
///
/// The driver invokes `process` on a schedule and reacts to the returned
/// [`Flow`] status; every operation reports a status, nothing unwinds
/// across the element boundary.
pub trait Element: Send {
    /// Get the name of this element (for debugging/logging).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Get the current lifecycle state.
    fn state(&self) -> ElementState;

    /// Run one processing step.
    fn process(&mut self) -> Result<Flow>;

    /// Release internal state and close all bound ports. Idempotent.
    fn close(&mut self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(ElementState::Closed.is_terminal());
        assert!(ElementState::Error.is_terminal());
        assert!(!ElementState::Running.is_terminal());
        assert!(ElementState::Running.can_process());
        assert!(!ElementState::Initialized.can_process());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ElementState::Running.to_string(), "running");
        assert_eq!(ElementState::Error.to_string(), "error");
    }

    #[test]
    fn test_flow_terminal() {
        assert!(!Flow::Ok.is_terminal());
        assert!(Flow::UpstreamClosed.is_terminal());
        assert!(Flow::AllOutputsClosed.is_terminal());
    }
}
