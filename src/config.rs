//! Analysis configuration
//!
//! This module provides the knobs that change how a snapshot is loaded and how sizes are
//! attributed. Everything else about the analysis is fixed by the dump contents.

/// How the memory of shared strings is attributed in retained sizes.
///
/// A string flagged `shared` does not own its character buffer; it points into the buffer
/// of another string, which it references. Whether the shared string's own `memsize`
/// should be charged anywhere is a policy decision, so it is made explicit here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SharedStringPolicy {
    /// Treat shared strings like every other object: their memsize is charged to
    /// whichever object the dominator tree places them under.
    #[default]
    Dominator,
    /// Shared strings contribute nothing to any retained size. The buffer is accounted
    /// for once, on the string that owns it.
    Exclude,
}

/// Configuration for loading and analysing a heap snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Attribution of shared string memory (default: [`SharedStringPolicy::Dominator`])
    pub shared_strings: SharedStringPolicy,

    /// Fixed number of bytes added to every heap object's memsize at ingestion.
    /// Dumps usually report only out-of-slot allocations, the slot itself is not included
    /// (default: 0)
    pub slot_size: u64,

    /// Forward phase progress to the `log` facade when no observer is supplied
    /// (default: true)
    pub report_progress: bool,
}

/// Slot size of a heap object in the dumped runtime on 64-bit platforms.
pub const DEFAULT_SLOT_SIZE: u64 = 40;

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            shared_strings: SharedStringPolicy::Dominator,
            slot_size: 0,
            report_progress: true,
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration that charges [`DEFAULT_SLOT_SIZE`] bytes per heap object on
    /// top of the reported memsize.
    #[must_use]
    pub fn with_slot_overhead() -> Self {
        Self {
            slot_size: DEFAULT_SLOT_SIZE,
            ..Self::default()
        }
    }

    /// Creates a configuration without progress reporting.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            report_progress: false,
            ..Self::default()
        }
    }

    /// Returns this configuration with a different shared string policy.
    #[must_use]
    pub fn shared_strings(mut self, policy: SharedStringPolicy) -> Self {
        self.shared_strings = policy;
        self
    }

    /// Returns this configuration with a different slot size.
    #[must_use]
    pub fn slot_size(mut self, slot_size: u64) -> Self {
        self.slot_size = slot_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_presets() {
        let default = AnalysisConfig::default();
        assert_eq!(default.shared_strings, SharedStringPolicy::Dominator);
        assert_eq!(default.slot_size, 0);
        assert!(default.report_progress);

        let slots = AnalysisConfig::with_slot_overhead();
        assert_eq!(slots.slot_size, DEFAULT_SLOT_SIZE);
        assert_eq!(slots.shared_strings, SharedStringPolicy::Dominator);

        let quiet = AnalysisConfig::quiet();
        assert!(!quiet.report_progress);
    }

    #[test]
    fn test_config_setters() {
        let config = AnalysisConfig::default()
            .shared_strings(SharedStringPolicy::Exclude)
            .slot_size(16);
        assert_eq!(config.shared_strings, SharedStringPolicy::Exclude);
        assert_eq!(config.slot_size, 16);
    }
}
