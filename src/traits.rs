//! Traits for storage abstraction

use async_trait::async_trait;

use crate::types::*;

/// Persistence boundary for the account aggregate
///
/// This trait allows the banking core to work with any storage backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these methods.
/// Implementations map their backend errors into [`BankingError::Storage`].
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Load an account together with its full transaction history, in
    /// chronological application order. `None` means the account id is
    /// unknown.
    async fn account_with_transactions(
        &self,
        account_id: AccountId,
    ) -> BankingResult<Option<Account>>;

    /// Persist the aggregate's current state.
    async fn save_account(&self, account: &Account) -> BankingResult<()>;
}
