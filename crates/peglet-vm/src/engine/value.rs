//! Opaque values produced by semantic actions.

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// Result of a rule: unit, or a shared value of any `Send + Sync` type.
///
/// Cloning is a reference-count bump, so memoized results can be handed out
/// repeatedly without copying the payload.
#[derive(Clone, Default)]
pub struct Value {
    inner: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
}

impl Value {
    pub fn unit() -> Self {
        Self {
            inner: None,
            type_name: "()",
        }
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
            type_name: type_name::<T>(),
        }
    }

    pub fn is_unit(&self) -> bool {
        self.inner.is_none()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.as_ref().is_some_and(|v| v.is::<T>())
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_ref()?.downcast_ref()
    }

    /// Cloned payload, if it has type `T`.
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.downcast_ref::<T>().cloned()
    }

    /// Name of the stored type, for error messages.
    pub fn type_name(&self) -> &'static str {
        if self.inner.is_none() {
            return "()";
        }
        self.type_name
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unit() {
            f.write_str("Value(())")
        } else {
            write!(f, "Value(<{}>)", self.type_name)
        }
    }
}
