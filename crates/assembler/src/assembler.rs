//! Assembler - attribute-driven component mounting
//!
//! An assembler owns the pieces a page-scoped application needs: a scanner
//! that finds marked elements, a registry of named constructors, fallback
//! rules for keys the registry does not know, and the set of elements that
//! already received an instance. Running it walks the current document,
//! resolves each marked element's key and mounts at most one component per
//! element, however many times it is re-run.

use crate::component::{
    constructor, short_type_name, Component, ComponentInstance, Constructor, MountCallback,
};
use crate::error::Result;
use crate::policy::FallbackPolicies;
use crate::registry::ComponentRegistry;
use crate::scanner::{Scanner, DEFAULT_MARKER};
use ahash::AHashSet;
use dom::{Document, DomNode, NodeId, Uuid};
use indexmap::IndexMap;
use std::fmt;

/// Configuration for [`Assembler::with_config`].
///
/// The default configuration scans for `data-component` over the whole
/// document body with an empty registry and no fallback rules.
pub struct AssemblerConfig {
    /// Marker suffix: elements are matched on the `data-<marker>` attribute.
    pub marker: String,
    /// Pre-populated component registry.
    pub registry: ComponentRegistry,
    /// Fallback rules for keys missing from the registry.
    pub policies: FallbackPolicies,
    /// Hook invoked synchronously after each successful mount.
    pub on_mount: Option<MountCallback>,
    /// Fixed scan context; `None` scans from the document body.
    pub context: Option<NodeId>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            registry: ComponentRegistry::new(),
            policies: FallbackPolicies::new(),
            on_mount: None,
            context: None,
        }
    }
}

/// Outcome of one assembly run.
///
/// `matched` counts every marked element the scan saw, including ones that
/// already held an instance from an earlier run. `mounted` counts new
/// instances created by this run; `skipped` counts elements whose key
/// resolved to nothing. Skipped elements stay unmounted and are retried on
/// the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MountReport {
    pub matched: usize,
    pub mounted: usize,
    pub skipped: usize,
}

/// Mounts components onto marked document elements.
///
/// Key resolution is two-stage: an exact registry lookup first, then the
/// fallback rules in order. Each element is mounted at most once; the cache
/// keys on node identity, so re-runs and attribute edits never produce a
/// second instance for the same element.
pub struct Assembler {
    scanner: Scanner,
    registry: ComponentRegistry,
    policies: FallbackPolicies,
    /// Instances per key, most recent mount first.
    components: IndexMap<String, Vec<ComponentInstance>>,
    /// Identities of elements that already received an instance.
    mounted: AHashSet<Uuid>,
    on_mount: Option<MountCallback>,
    context: Option<NodeId>,
}

impl Assembler {
    /// Assembler with the default `data-component` marker and nothing
    /// registered.
    pub fn new() -> Self {
        Self {
            scanner: Scanner::default(),
            registry: ComponentRegistry::new(),
            policies: FallbackPolicies::new(),
            components: IndexMap::new(),
            mounted: AHashSet::new(),
            on_mount: None,
            context: None,
        }
    }

    /// Build from configuration.
    ///
    /// Validation is fail-fast: a marker that cannot form an attribute name
    /// is rejected here, before any document is touched.
    pub fn with_config(config: AssemblerConfig) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(&config.marker)?,
            registry: config.registry,
            policies: config.policies,
            components: IndexMap::new(),
            mounted: AHashSet::new(),
            on_mount: config.on_mount,
            context: config.context,
        })
    }

    /// The attribute elements are matched on (`data-component` by default).
    pub fn attribute(&self) -> &str {
        self.scanner.attribute()
    }

    /// Register a constructor under an explicit name. Chainable.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: Constructor,
    ) -> Result<&mut Self> {
        self.registry.register(name, constructor)?;
        Ok(self)
    }

    /// Register several constructors at once, in iteration order.
    pub fn register_all<N, I>(&mut self, entries: I) -> Result<&mut Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Constructor)>,
    {
        self.registry.register_all(entries)?;
        Ok(self)
    }

    /// Register a [`Component`] implementation under its type name.
    ///
    /// `app.register_type::<Navigation>()` is shorthand for registering
    /// `Navigation::mount` under `"Navigation"`.
    pub fn register_type<C: Component>(&mut self) -> Result<&mut Self> {
        self.registry
            .register(short_type_name::<C>(), constructor(C::mount))?;
        Ok(self)
    }

    /// Append a fallback rule for keys the registry does not know.
    pub fn add_policy<F>(&mut self, pattern: impl Into<String>, handler: F) -> Result<&mut Self>
    where
        F: Fn(&str, &DomNode) -> Option<Constructor> + Send + Sync + 'static,
    {
        self.policies.push(pattern, handler)?;
        Ok(self)
    }

    /// Install the post-mount hook, replacing any previous one.
    pub fn set_on_mount<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(&ComponentInstance) + Send + Sync + 'static,
    {
        self.on_mount = Some(Box::new(callback));
        self
    }

    /// Run over the document, mounting components onto marked elements.
    ///
    /// Scans from the configured context if one was set, otherwise from the
    /// document body. Safe to call repeatedly: elements mounted by earlier
    /// runs are left alone.
    pub fn run(&mut self, doc: &Document) -> Result<MountReport> {
        let context = self.context;
        self.run_scan(doc, context)
    }

    /// Run over one subtree only.
    ///
    /// The context element itself is not a candidate, matching descendant
    /// query semantics.
    pub fn run_within(&mut self, doc: &Document, context: NodeId) -> Result<MountReport> {
        self.run_scan(doc, Some(context))
    }

    fn run_scan(&mut self, doc: &Document, context: Option<NodeId>) -> Result<MountReport> {
        let candidates = self.scanner.scan(doc, context)?;
        let mut report = MountReport {
            matched: candidates.len(),
            ..MountReport::default()
        };

        for node_id in candidates {
            let node = doc.get(node_id)?;
            if self.mounted.contains(&node.uuid) {
                continue;
            }

            let Some(key) = node.attr(self.scanner.attribute()) else {
                continue;
            };

            let resolved = match self.registry.get(key) {
                Some(found) => Some(found),
                None => self.policies.resolve(key, node),
            };

            match resolved {
                Some(constructor) => {
                    self.mount_component(node, key, constructor);
                    report.mounted += 1;
                }
                None => {
                    let registered: Vec<&str> = self.registry.names().collect();
                    tracing::info!(
                        key,
                        registered = ?registered,
                        "no registered component or fallback rule for key, skipping element"
                    );
                    report.skipped += 1;
                }
            }
        }

        tracing::debug!(
            matched = report.matched,
            mounted = report.mounted,
            skipped = report.skipped,
            "assembly run finished"
        );
        Ok(report)
    }

    fn mount_component(&mut self, element: &DomNode, key: &str, constructor: Constructor) {
        let instance = constructor(element);
        self.mounted.insert(element.uuid);

        let instances = self.components.entry(key.to_string()).or_default();
        // Most recent mount first
        instances.insert(0, instance);

        if let Some(callback) = &self.on_mount {
            callback(&instances[0]);
        }

        tracing::trace!(key, element = %element.uuid, "mounted component");
    }

    /// Instances mounted under a key, most recent first.
    pub fn components(&self, name: &str) -> &[ComponentInstance] {
        self.components
            .get(name)
            .map(|instances| instances.as_slice())
            .unwrap_or(&[])
    }

    /// Keys that have at least one mounted instance, in first-mount order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(|name| name.as_str())
    }

    /// Number of elements holding a mounted instance.
    pub fn mounted_len(&self) -> usize {
        self.mounted.len()
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn policies(&self) -> &FallbackPolicies {
        &self.policies
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Assembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembler")
            .field("attribute", &self.scanner.attribute())
            .field("registry", &self.registry)
            .field("policies", &self.policies)
            .field("mounted", &self.mounted.len())
            .field("has_callback", &self.on_mount.is_some())
            .finish()
    }
}
