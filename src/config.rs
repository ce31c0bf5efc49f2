//! Render configuration
//!
//! Knobs that change how loosely a primitive interprets its props:
//! - shape policy for `of` sources (strict vs permissive array-like detection)
//! - verbose render summaries

/// How `<For of>` decides whether a value is a collection
///
/// Older behavior only accepted real collections; later behavior also
/// detected array-likes among plain objects. Both are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapePolicy {
    /// Only lists, explicit array-likes, and iterables
    Strict,

    /// Also plain objects carrying a non-negative integer `length`
    #[default]
    Permissive,
}

impl ShapePolicy {
    /// Whether plain objects with a `length` count as array-likes
    #[inline]
    pub fn detects_length_objects(self) -> bool {
        matches!(self, ShapePolicy::Permissive)
    }
}

/// Configuration shared by render primitives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Shape acceptance for `of` (and the matching rejection for `in`)
    pub shape_policy: ShapePolicy,

    /// Emit per-render summaries at `info` instead of `debug`
    pub verbose: bool,
}

impl RenderConfig {
    /// Strict shape acceptance
    pub fn strict() -> Self {
        Self {
            shape_policy: ShapePolicy::Strict,
            ..Self::default()
        }
    }

    /// Permissive shape acceptance (the default)
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Set shape policy.
    pub fn with_shape_policy(mut self, policy: ShapePolicy) -> Self {
        self.shape_policy = policy;
        self
    }

    /// Enable verbose mode.
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_permissive() {
        let config = RenderConfig::default();
        assert_eq!(config.shape_policy, ShapePolicy::Permissive);
        assert!(!config.verbose);
        assert_eq!(config, RenderConfig::permissive());
    }

    #[test]
    fn test_builders_chain() {
        let config = RenderConfig::permissive()
            .with_shape_policy(ShapePolicy::Strict)
            .with_verbose(true);
        assert!(!config.shape_policy.detects_length_objects());
        assert!(config.verbose);
        assert_eq!(config.shape_policy, RenderConfig::strict().shape_policy);
    }
}
