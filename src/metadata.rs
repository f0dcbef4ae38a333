//! Buffer metadata types.

use std::time::Duration;

/// Flags indicating buffer properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferFlags {
    /// Buffer marks end of stream.
    pub eos: bool,
    /// Buffer is corrupted or incomplete.
    pub corrupted: bool,
    /// Buffer is a gap/discontinuity marker.
    pub gap: bool,
}

impl BufferFlags {
    /// Set the eos flag.
    pub fn set_eos(&mut self, value: bool) {
        self.eos = value;
    }

    /// Check if eos flag is set.
    pub fn is_eos(&self) -> bool {
        self.eos
    }

    /// Set the gap flag.
    pub fn set_gap(&mut self, value: bool) {
        self.gap = value;
    }

    /// Check if gap flag is set.
    pub fn is_gap(&self) -> bool {
        self.gap
    }
}

/// Metadata associated with a buffer.
///
/// Contains the sequence tag, timing information and flags that travel with
/// a buffer through the pipeline. Payload content is opaque to Manifold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    /// Presentation timestamp (when this buffer should be processed/displayed).
    pub pts: Option<Duration>,

    /// Duration of this buffer's content.
    pub duration: Option<Duration>,

    /// Monotonic sequence number within a stream.
    pub sequence: u64,

    /// Buffer flags.
    pub flags: BufferFlags,
}

impl Metadata {
    /// Create new metadata with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create metadata with a sequence number.
    pub fn with_sequence(sequence: u64) -> Self {
        Self {
            sequence,
            ..Default::default()
        }
    }

    /// Set the presentation timestamp.
    pub fn with_pts(mut self, pts: Duration) -> Self {
        self.pts = Some(pts);
        self
    }

    /// Set the content duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Mark this buffer as end-of-stream.
    pub fn with_eos(mut self) -> Self {
        self.flags.eos = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = Metadata::with_sequence(7)
            .with_pts(Duration::from_millis(40))
            .with_duration(Duration::from_millis(20));

        assert_eq!(meta.sequence, 7);
        assert_eq!(meta.pts, Some(Duration::from_millis(40)));
        assert_eq!(meta.duration, Some(Duration::from_millis(20)));
        assert!(!meta.flags.is_eos());
    }

    #[test]
    fn test_metadata_eos_flag() {
        let meta = Metadata::with_sequence(0).with_eos();
        assert!(meta.flags.is_eos());

        let mut flags = BufferFlags::default();
        flags.set_eos(true);
        assert!(flags.is_eos());
        flags.set_eos(false);
        assert!(!flags.is_eos());
    }
}
