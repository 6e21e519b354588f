//! Parser configuration
//!
//! Two knobs: which identifiers count as class type names in return types,
//! parameter lists and `var` declarations, and how deeply terms and
//! statement blocks may nest. Field and static declarations never accept
//! class types regardless of the type name setting.

use rustc_hash::FxHashSet;

/// Which identifiers are accepted where a type is expected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeNamePolicy {
    /// Any identifier names a class type
    #[default]
    AnyIdentifier,
    /// Only the listed identifiers name class types
    Only(FxHashSet<String>),
}

impl TypeNamePolicy {
    /// Restrict class type names to `names`
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeNamePolicy::Only(names.into_iter().map(Into::into).collect())
    }

    pub fn accepts(&self, name: &str) -> bool {
        match self {
            TypeNamePolicy::AnyIdentifier => true,
            TypeNamePolicy::Only(names) => names.contains(name),
        }
    }
}

/// Nesting allowed by default; keeps recursion well inside a 2 MiB thread stack
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub type_names: TypeNamePolicy,
    /// Most terms and statement blocks that may be open at once
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            type_names: TypeNamePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_type_names(mut self, policy: TypeNamePolicy) -> Self {
        self.type_names = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_any_identifier() {
        let config = ParserConfig::default();
        assert!(config.type_names.accepts("Array"));
        assert!(config.type_names.accepts("Test"));
    }

    #[test]
    fn test_default_depth_and_override() {
        assert_eq!(ParserConfig::default().max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(ParserConfig::default().with_max_depth(8).max_depth, 8);
    }

    #[test]
    fn test_restricted_policy() {
        let policy = TypeNamePolicy::only(["Test"]);
        assert!(policy.accepts("Test"));
        assert!(!policy.accepts("Array"));
        assert!(!policy.accepts("test"));
    }
}
