//! Problem definitions and the problem registry
//!
//! A problem is a named check run against a materialized schema. The
//! [`ProblemRegistry`] is the single source of truth for which problem names
//! are valid in the `warnings` and `errors` options.

use schemalint_catalog::Schema;
use schemalint_core::{Annotation, LogicalSchema, Options};
use std::collections::BTreeMap;

use crate::problems::{BadCharSetProblem, BadEngineProblem, NoPrimaryKeyProblem};

/// A named check run against a materialized schema
///
/// Checks must be deterministic: the same inputs always produce the same
/// annotations in the same order. Annotations point at statements of
/// `logical`, the filesystem source of `schema`.
pub trait Problem: Send + Sync {
    /// Unique, lower-case problem name as used in configuration
    fn name(&self) -> &'static str;

    /// Description of what this problem checks
    fn description(&self) -> &str;

    /// Check the schema and return any findings
    fn check<'a>(&self, schema: &Schema, logical: &'a LogicalSchema, opts: &Options) -> Vec<Annotation<'a>>;
}

/// Registry of available problems, keyed by name
///
/// Built once and shared read-only; lint calls borrow it.
pub struct ProblemRegistry {
    problems: BTreeMap<&'static str, Box<dyn Problem>>,
}

impl ProblemRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            problems: BTreeMap::new(),
        }
    }

    /// Create a registry with all built-in problems
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(NoPrimaryKeyProblem));
        registry.register(Box::new(BadCharSetProblem));
        registry.register(Box::new(BadEngineProblem));
        registry
    }

    /// Register a problem, replacing any previous one with the same name
    pub fn register(&mut self, problem: Box<dyn Problem>) {
        self.problems.insert(problem.name(), problem);
    }

    /// Get a problem by name
    pub fn get(&self, name: &str) -> Option<&dyn Problem> {
        self.problems.get(name).map(|p| p.as_ref())
    }

    /// Whether `name` is a registered problem
    pub fn contains(&self, name: &str) -> bool {
        self.problems.contains_key(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        self.problems.keys().copied().collect()
    }

    /// Get the number of registered problems
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
