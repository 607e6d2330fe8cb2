//! Tree configuration

/// What classification does with gates the top event cannot reach
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Accept silently
    Ignore,
    /// Accept and record a warning
    #[default]
    Warn,
    /// Fail classification
    Reject,
}

/// Fault tree configuration
#[derive(Clone, Debug, Default)]
pub struct TreeConfig {
    /// Handling of registered gates unreachable from the top event
    pub orphan_gates: OrphanPolicy,
}

impl TreeConfig {
    /// Reject any structural oddity
    pub fn strict() -> Self {
        TreeConfig {
            orphan_gates: OrphanPolicy::Reject,
        }
    }

    /// Accept everything the core invariants allow
    pub fn permissive() -> Self {
        TreeConfig {
            orphan_gates: OrphanPolicy::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(TreeConfig::default().orphan_gates, OrphanPolicy::Warn);
        assert_eq!(TreeConfig::strict().orphan_gates, OrphanPolicy::Reject);
        assert_eq!(TreeConfig::permissive().orphan_gates, OrphanPolicy::Ignore);
    }
}
