//! Fallback policies
//!
//! When a scanned key has no exact registry entry, these rules decide what,
//! if anything, gets mounted. Rules are kept as an explicit sequence since
//! evaluation order is observable: rules run in insertion order and the
//! first handler to return a constructor wins. A handler returning `None`
//! passes the key on to the next matching rule.
//!
//! Patterns are key globs. `*` matches one or more word characters followed
//! by anything; every other character matches itself literally. Each pattern
//! compiles to an anchored regex once, at insertion, so malformed patterns
//! surface as configuration errors rather than at scan time.

use crate::component::Constructor;
use crate::error::{AssemblerError, Result};
use dom::DomNode;
use regex::Regex;

/// Rule handler: inspects the key and element, optionally produces a
/// constructor for it.
pub type PolicyHandler = Box<dyn Fn(&str, &DomNode) -> Option<Constructor> + Send + Sync>;

struct PolicyRule {
    pattern: String,
    matcher: Regex,
    handler: PolicyHandler,
}

/// Ordered set of fallback rules.
#[derive(Default)]
pub struct FallbackPolicies {
    rules: Vec<PolicyRule>,
}

impl FallbackPolicies {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule, builder style.
    ///
    /// ```ignore
    /// let policies = FallbackPolicies::new()
    ///     .rule("Legacy/*", |key, _el| Some(legacy_constructor(key)))?
    ///     .rule("*", |key, _el| log_unknown(key))?;
    /// ```
    pub fn rule<F>(mut self, pattern: impl Into<String>, handler: F) -> Result<Self>
    where
        F: Fn(&str, &DomNode) -> Option<Constructor> + Send + Sync + 'static,
    {
        self.push(pattern, handler)?;
        Ok(self)
    }

    /// Append a rule in place.
    pub fn push<F>(&mut self, pattern: impl Into<String>, handler: F) -> Result<&mut Self>
    where
        F: Fn(&str, &DomNode) -> Option<Constructor> + Send + Sync + 'static,
    {
        let pattern = pattern.into();
        let matcher = compile_pattern(&pattern)?;

        tracing::debug!(pattern = %pattern, "added fallback rule");
        self.rules.push(PolicyRule {
            pattern,
            matcher,
            handler: Box::new(handler),
        });
        Ok(self)
    }

    /// Resolve a key against the rules, in order.
    ///
    /// Handlers of matching rules run at most once each; the chain stops at
    /// the first one that returns a constructor.
    pub fn resolve(&self, key: &str, element: &DomNode) -> Option<Constructor> {
        for rule in &self.rules {
            if !rule.matcher.is_match(key) {
                continue;
            }
            if let Some(found) = (rule.handler)(key, element) {
                tracing::debug!(key, pattern = %rule.pattern, "fallback rule resolved component");
                return Some(found);
            }
        }
        None
    }

    /// Patterns in evaluation order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for FallbackPolicies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackPolicies")
            .field("patterns", &self.patterns().collect::<Vec<_>>())
            .finish()
    }
}

/// Compile a key glob into an anchored regex.
///
/// Literal segments are regex-escaped; `*` expands to `\w+.*`.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut anchored = String::with_capacity(pattern.len() + 8);
    anchored.push('^');
    for (i, literal) in pattern.split('*').enumerate() {
        if i > 0 {
            anchored.push_str(r"\w+.*");
        }
        anchored.push_str(&regex::escape(literal));
    }
    anchored.push('$');

    Regex::new(&anchored).map_err(|source| AssemblerError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
