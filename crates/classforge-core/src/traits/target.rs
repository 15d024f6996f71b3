use std::cmp::Ordering;

/// Which objects a trait applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TargetScope {
    /// Only the object whose identifying name equals the bound name.
    Direct(String),
    /// Every object.
    #[default]
    All,
}

/// Priority and scope of a trait. Higher priorities run first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Target {
    pub priority: i32,
    pub scope: TargetScope,
}

impl Target {
    pub const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(priority: i32, scope: TargetScope) -> Self {
        Self { priority, scope }
    }

    /// Applies to everything, at `priority`.
    pub fn all(priority: i32) -> Self {
        Self::new(priority, TargetScope::All)
    }

    /// Applies only to the object named `name`, at `priority`.
    pub fn direct(name: impl Into<String>, priority: i32) -> Self {
        Self::new(priority, TargetScope::Direct(name.into()))
    }

    pub fn applies_to(&self, object_name: &str) -> bool {
        match &self.scope {
            TargetScope::All => true,
            TargetScope::Direct(name) => name == object_name,
        }
    }

    /// Sequence order: descending priority. Scope is ignored.
    pub fn ordering(&self, other: &Target) -> Ordering {
        other.priority.cmp(&self.priority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        let target = Target::default();
        assert_eq!(target.priority, Target::DEFAULT_PRIORITY);
        assert_eq!(target.scope, TargetScope::All);
        assert!(target.applies_to("anything"));
    }

    #[test]
    fn test_direct_scope() {
        let target = Target::direct("Foo", 5);
        assert!(target.applies_to("Foo"));
        assert!(!target.applies_to("Bar"));
        assert!(!target.applies_to("foo"));
    }

    #[test]
    fn test_ordering_is_descending_priority() {
        assert_eq!(Target::all(10).ordering(&Target::all(1)), Ordering::Less);
        assert_eq!(Target::all(1).ordering(&Target::all(10)), Ordering::Greater);
        assert_eq!(
            Target::all(3).ordering(&Target::direct("X", 3)),
            Ordering::Equal
        );
    }
}
