//! Process-wide mutable state of a [`crate::Validator`]: the rule list and the
//! set of recognised schema names.
//!
//! Both registries are append-only and copy-on-write. Readers clone the inner
//! `Arc` under a short read lock and then work on that snapshot without any
//! lock held, so an append never changes what an in-flight validation sees.
//! `parking_lot::RwLock` is non-poisonable; a panicking rule cannot wedge the
//! registry.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::rule::RegisteredRule;

/// Ordered, append-only list of rules.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: RwLock<Arc<Vec<RegisteredRule>>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<RegisteredRule>) -> Self {
        Self {
            rules: RwLock::new(Arc::new(rules)),
        }
    }

    /// Append a rule. Names need not be unique; every rule sharing a name
    /// fires, in registration order.
    pub fn register(&self, rule: RegisteredRule) {
        let mut guard = self.rules.write();
        // Clones the list only while a snapshot of it is still alive.
        Arc::make_mut(&mut guard).push(rule);
    }

    pub fn snapshot(&self) -> RuleSnapshot {
        RuleSnapshot(Arc::clone(&self.rules.read()))
    }

    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Point-in-time view of a [`RuleRegistry`].
#[derive(Debug, Clone)]
pub struct RuleSnapshot(Arc<Vec<RegisteredRule>>);

impl RuleSnapshot {
    /// Rules registered under `name`, in registration order.
    pub fn matching<'s>(
        &'s self,
        name: &'s str,
    ) -> impl Iterator<Item = &'s RegisteredRule> + 's {
        self.0.iter().filter(move |r| r.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matching(name).next().is_some()
    }

    /// Registered names in registration order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(RegisteredRule::name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Set of recognised schema names. Validation under any other name is a no-op.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: RwLock<Arc<HashSet<String>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a schema name. Registering the same name twice is harmless.
    /// Returns `true` if the name was not known before.
    pub fn register(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        let mut guard = self.schemas.write();
        if guard.contains(&name) {
            return false;
        }
        Arc::make_mut(&mut guard).insert(name)
    }

    pub fn is_recognized(&self, name: &str) -> bool {
        self.schemas.read().contains(name)
    }

    pub fn snapshot(&self) -> Arc<HashSet<String>> {
        Arc::clone(&self.schemas.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn named(name: &str) -> RegisteredRule {
        RegisteredRule::from_fn(name.to_string(), |_| Ok(()))
    }

    fn failing(name: &str, message: &'static str) -> RegisteredRule {
        RegisteredRule::from_fn(name.to_string(), move |_| {
            Err(ValidationError::custom(message))
        })
    }

    #[test]
    fn register_appends_in_order() {
        let registry = RuleRegistry::new();
        registry.register(named("a"));
        registry.register(named("b"));
        registry.register(named("a"));
        let snap = registry.snapshot();
        assert_eq!(snap.names().collect::<Vec<_>>(), vec!["a", "b", "a"]);
        assert_eq!(snap.matching("a").count(), 2);
        assert!(snap.contains("b"));
        assert!(!snap.contains("c"));
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let registry = RuleRegistry::with_rules(vec![named("a")]);
        let before = registry.snapshot();
        registry.register(failing("late", "late"));
        assert_eq!(before.len(), 1);
        assert!(!before.contains("late"));
        assert_eq!(registry.snapshot().len(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn schema_registration_is_idempotent() {
        let schemas = SchemaRegistry::new();
        assert!(!schemas.is_recognized("signup"));
        assert!(schemas.register("signup"));
        assert!(!schemas.register("signup"));
        assert!(schemas.is_recognized("signup"));
        assert_eq!(schemas.snapshot().len(), 1);
    }

    #[test]
    fn schema_snapshot_is_stable() {
        let schemas = SchemaRegistry::new();
        schemas.register("a");
        let snap = schemas.snapshot();
        schemas.register("b");
        assert!(!snap.contains("b"));
        assert!(schemas.is_recognized("b"));
    }

    #[test]
    fn concurrent_registration() {
        let registry = Arc::new(RuleRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        registry.register(named(&format!("r{}_{}", i, j)));
                        let _ = registry.snapshot().len();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.len(), 400);
    }
}
