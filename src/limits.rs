//! Parser limits.
//!
//! Recursion in the parser follows the nesting of arrays and objects, so an
//! adversarial document like `[[[[...]]]]` would otherwise grow the call
//! stack without bound. The depth limit turns that into a
//! [`ParseError::NestingTooDeep`](crate::ParseError::NestingTooDeep).

/// Default maximum nesting depth for arrays/objects.
pub const DEFAULT_MAX_DEPTH: u32 = 200;

/// Hard ceiling on the nesting depth. Larger requested limits are clamped to
/// this, so the recursion stays well inside a default 8 MiB main-thread stack.
pub const MAX_NESTING_DEPTH: u32 = 1024;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects. A top-level `[]` has depth 1.
    pub max_nesting_depth: u32,
}

impl Limits {
    /// Limits with the given maximum nesting depth, clamped to
    /// [`MAX_NESTING_DEPTH`].
    pub const fn new(max_nesting_depth: u32) -> Self {
        let max_nesting_depth = if max_nesting_depth > MAX_NESTING_DEPTH {
            MAX_NESTING_DEPTH
        } else {
            max_nesting_depth
        };
        Self { max_nesting_depth }
    }

    /// Tight limits for untrusted input.
    pub const fn strict() -> Self {
        Self::new(64)
    }

    /// Loose limits for trusted, deeply nested documents.
    ///
    /// Deep documents need a correspondingly large stack on the parsing thread.
    pub const fn lenient() -> Self {
        Self::new(MAX_NESTING_DEPTH)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
