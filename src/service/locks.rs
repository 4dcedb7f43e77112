//! Per-account lock registry

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::types::AccountId;

/// Registry of one exclusive lock per account id.
///
/// Locks are created lazily on first use and live for the registry's
/// lifetime; the guard mutex protects only the get-or-insert step and is
/// never held across an await. Unrelated account ids share nothing beyond
/// that registration step.
#[derive(Debug, Default)]
pub(crate) struct LockRegistry {
    locks: Mutex<HashMap<AccountId, Arc<tokio::sync::Mutex<()>>>>,
}

impl LockRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get the lock for an account id, creating it on first use.
    pub(crate) fn lock_for(&self, account_id: AccountId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        Arc::clone(locks.entry(account_id).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_same_account_id_yields_same_lock() {
        let registry = LockRegistry::new();
        let account_id = Uuid::new_v4();

        let first = registry.lock_for(account_id);
        let second = registry.lock_for(account_id);

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_distinct_account_ids_yield_independent_locks() {
        let registry = LockRegistry::new();

        let first = registry.lock_for(Uuid::new_v4());
        let second = registry.lock_for(Uuid::new_v4());

        assert!(!Arc::ptr_eq(&first, &second));
    }
}
