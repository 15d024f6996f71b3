//! The per-run access store.

use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use tracing::debug;

use super::record::{Access, ClassAccess};

#[derive(Debug, Default)]
struct ResolverState {
    active: HashMap<String, ClassAccess>,
    /// Classes whose record has been consumed; registrations for them are ignored.
    retired: HashSet<String>,
}

/// Registry of pending access overrides, keyed by internal class name.
///
/// A record is registered any number of times (requests merge), read once
/// when its class is visited, then retired. Retirement is permanent for the
/// lifetime of the resolver: a late registration for a retired class is
/// silently dropped.
///
/// All operations take one exclusive lock, so a resolver can be shared
/// between threads transforming different classes.
///
/// # Panics
///
/// Every operation panics when given an empty class name.
#[derive(Debug, Default)]
pub struct AccessResolver {
    state: Mutex<ResolverState>,
}

fn check_name(class_name: &str) {
    assert!(!class_name.is_empty(), "class name must not be empty");
}

impl AccessResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request for `class_name`, merging with any pending one.
    ///
    /// Returns `false` when the class is already retired and the request
    /// was dropped.
    pub fn register(&self, class_name: &str, access: ClassAccess) -> bool {
        check_name(class_name);
        let mut state = self.state.lock();
        if state.retired.contains(class_name) {
            debug!(class = class_name, "ignoring access request for retired class");
            return false;
        }
        match state.active.get_mut(class_name) {
            Some(existing) => existing.merge(access),
            None => {
                state.active.insert(class_name.to_string(), access);
            }
        }
        true
    }

    /// Request class-level access only.
    pub fn register_class(&self, class_name: &str, access: Access) -> bool {
        self.register(class_name, ClassAccess::new().with_access(access))
    }

    pub fn register_field(
        &self,
        class_name: &str,
        name: &str,
        descriptor: &str,
        access: Access,
    ) -> bool {
        assert!(!name.is_empty(), "field name must not be empty");
        self.register(
            class_name,
            ClassAccess::new().with_field(name, descriptor, access),
        )
    }

    pub fn register_method(
        &self,
        class_name: &str,
        name: &str,
        descriptor: &str,
        access: Access,
    ) -> bool {
        assert!(!name.is_empty(), "method name must not be empty");
        self.register(
            class_name,
            ClassAccess::new().with_method(name, descriptor, access),
        )
    }

    /// Snapshot of the pending record for `class_name`.
    pub fn lookup(&self, class_name: &str) -> Option<ClassAccess> {
        check_name(class_name);
        self.state.lock().active.get(class_name).cloned()
    }

    /// Consume the record for `class_name`. Returns whether one was pending.
    pub fn retire(&self, class_name: &str) -> bool {
        check_name(class_name);
        let mut state = self.state.lock();
        let removed = state.active.remove(class_name).is_some();
        state.retired.insert(class_name.to_string());
        removed
    }

    /// Remove the pending record for `class_name` and retire the class, in
    /// one step. Returns `None`, and retires nothing, when no record is
    /// pending.
    ///
    /// A registration racing with this call is either merged before the
    /// record is taken or rejected afterwards.
    pub fn take(&self, class_name: &str) -> Option<ClassAccess> {
        check_name(class_name);
        let mut state = self.state.lock();
        let record = state.active.remove(class_name)?;
        state.retired.insert(class_name.to_string());
        Some(record)
    }

    pub fn is_retired(&self, class_name: &str) -> bool {
        self.state.lock().retired.contains(class_name)
    }

    /// Number of pending (not yet consumed) records.
    pub fn pending(&self) -> usize {
        self.state.lock().active.len()
    }
}
