//! Conversation memory handle.
//!
//! The agent never reads or writes memory itself; it carries this handle so
//! the runtime can reach the session's store.

use std::sync::Arc;

/// Where a session's conversation memory lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTarget {
    pub endpoint: String,
    pub database: String,
    pub container: String,
    pub session_id: String,
    pub user_id: String,
}

/// Cheaply cloneable, opaque handle to a session's memory store.
#[derive(Debug, Clone)]
pub struct MemoryContext {
    inner: Arc<MemoryTarget>,
}

impl MemoryContext {
    pub fn new(target: MemoryTarget) -> Self {
        Self {
            inner: Arc::new(target),
        }
    }

    pub fn target(&self) -> &MemoryTarget {
        &self.inner
    }

    pub fn session_id(&self) -> &str {
        &self.inner.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.inner.user_id
    }

    /// Whether two handles refer to the same store instance.
    pub fn same_store(&self, other: &MemoryContext) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
