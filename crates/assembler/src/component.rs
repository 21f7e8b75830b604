//! Component contracts
//!
//! The assembler treats components as opaque values: a constructor turns an
//! element into an instance, and the instance is stored and handed to the
//! mount callback without further interpretation. Concrete component types
//! are recovered by the caller through `Any` downcasting.

use dom::DomNode;
use std::any::Any;
use std::sync::Arc;

/// An instantiated component, type-erased for storage.
pub type ComponentInstance = Box<dyn Any + Send>;

/// A component constructor: element in, instance out.
///
/// Shared so a registry lookup and a fallback rule can hand out the same
/// constructor without copying it.
pub type Constructor = Arc<dyn Fn(&DomNode) -> ComponentInstance + Send + Sync>;

/// Hook invoked synchronously after each successful mount.
pub type MountCallback = Box<dyn Fn(&ComponentInstance) + Send + Sync>;

/// Wrap a plain closure into a [`Constructor`].
///
/// The closure returns its concrete component type; the boxing into
/// [`ComponentInstance`] happens here so call sites stay free of casts.
///
/// ```ignore
/// let ctor = constructor(|el| Navigation::from_element(el));
/// registry.register("Navigation", ctor)?;
/// ```
pub fn constructor<T, F>(f: F) -> Constructor
where
    T: Any + Send,
    F: Fn(&DomNode) -> T + Send + Sync + 'static,
{
    Arc::new(move |element| Box::new(f(element)) as ComponentInstance)
}

/// Components that construct themselves straight from an element.
///
/// Implementing this enables registration by Rust type name via
/// `Assembler::register_type`. The derived name is the last path segment of
/// the type name, so renamed or generic types should be registered under an
/// explicit name instead.
pub trait Component: Send + Sized + 'static {
    fn mount(element: &DomNode) -> Self;
}

/// Last path segment of a type name: `app::widgets::Badge` becomes `Badge`.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
