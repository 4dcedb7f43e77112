//! In-memory repository implementation for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory repository implementation for testing and development
///
/// Clones share the same backing map, so a clone handed to an
/// [`crate::AccountService`] observes the same accounts as the original.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl MemoryRepository {
    /// Create a new memory repository instance
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for MemoryRepository {
    async fn account_with_transactions(
        &self,
        account_id: AccountId,
    ) -> BankingResult<Option<Account>> {
        Ok(self.accounts.read().unwrap().get(&account_id).cloned())
    }

    async fn save_account(&self, account: &Account) -> BankingResult<()> {
        self.accounts
            .write()
            .unwrap()
            .insert(account.account_id(), account.clone());
        Ok(())
    }
}
