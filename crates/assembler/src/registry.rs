//! Component registry
//!
//! Maps component names to constructors. The index keeps insertion order so
//! diagnostics and iteration reflect the order components were registered
//! in; registering a name twice replaces the constructor in place.

use crate::component::Constructor;
use crate::error::{AssemblerError, Result};
use indexmap::IndexMap;

#[derive(Default)]
pub struct ComponentRegistry {
    index: IndexMap<String, Constructor>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            index: IndexMap::new(),
        }
    }

    /// Register a constructor under an explicit name.
    ///
    /// Empty and whitespace-only names are rejected. Returns the registry
    /// again so registrations can be chained.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: Constructor,
    ) -> Result<&mut Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AssemblerError::EmptyComponentName);
        }

        tracing::debug!(component = %name, "registered component");
        self.index.insert(name, constructor);
        Ok(self)
    }

    /// Register several constructors at once, in iteration order.
    pub fn register_all<N, I>(&mut self, entries: I) -> Result<&mut Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Constructor)>,
    {
        for (name, constructor) in entries {
            self.register(name, constructor)?;
        }
        Ok(self)
    }

    /// Look up a constructor by exact name.
    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.index.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentRegistry")
            .field("names", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}
