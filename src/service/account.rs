//! Account service coordinating mutations and balance queries

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::service::locks::LockRegistry;
use crate::traits::AccountRepository;
use crate::types::*;

/// Service for depositing into, withdrawing from, and querying accounts.
///
/// Every mutation for a given account id runs under an exclusive lock keyed
/// by that id, so concurrent mutations on one account are applied in
/// lock-acquisition order while unrelated accounts proceed in parallel.
/// Clones share the lock registry and the repository handle, so any number
/// of handles uphold the same per-account exclusion.
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
    locks: Arc<LockRegistry>,
}

impl<R: AccountRepository> Clone for AccountService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            locks: Arc::clone(&self.locks),
        }
    }
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new account service over a repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            locks: Arc::new(LockRegistry::new()),
        }
    }

    /// Deposit an amount into an account
    pub async fn deposit(&self, account_id: AccountId, amount: BigDecimal) -> BankingResult<()> {
        self.record_transaction(account_id, TransactionKind::Credit, amount)
            .await
    }

    /// Withdraw an amount from an account
    pub async fn withdraw(&self, account_id: AccountId, amount: BigDecimal) -> BankingResult<()> {
        self.record_transaction(account_id, TransactionKind::Debit, amount)
            .await
    }

    /// Get the balance of an account as it was at `at_date`, reconstructed
    /// by subtracting the contribution of every transaction created at or
    /// after that instant from the current balance. A transaction stamped
    /// exactly `at_date` counts as not yet applied.
    ///
    /// Fails with [`BankingError::DateOutOfRange`] if `at_date` is in the
    /// future or precedes the account's creation.
    ///
    /// Takes no per-account lock, so a concurrently in-flight mutation may
    /// or may not be visible; the answer is consistent with some recent
    /// persisted state.
    pub async fn balance_at_date(
        &self,
        account_id: AccountId,
        at_date: NaiveDateTime,
    ) -> BankingResult<BigDecimal> {
        if at_date > chrono::Utc::now().naive_utc() {
            return Err(BankingError::DateOutOfRange {
                account_id,
                at_date,
            });
        }

        let account = self.account_required(account_id).await?;

        if at_date < account.created_at() {
            return Err(BankingError::DateOutOfRange {
                account_id,
                at_date,
            });
        }

        let mut balance = account.balance().clone();
        for transaction in account
            .transactions()
            .iter()
            .filter(|t| t.created_at() >= at_date)
        {
            balance -= transaction.signed_amount();
        }

        debug!(
            "balance of account {} at {}: {}",
            account_id, at_date, balance
        );
        Ok(balance)
    }

    /// Record a transaction against an account under its exclusive lock.
    ///
    /// The transaction is constructed after the lock is acquired, so
    /// timestamps within one account stay monotone with application order.
    /// The lock guard is released on every exit path.
    async fn record_transaction(
        &self,
        account_id: AccountId,
        kind: TransactionKind,
        amount: BigDecimal,
    ) -> BankingResult<()> {
        let lock = self.locks.lock_for(account_id);
        let _guard = lock.lock().await;

        debug!("recording {:?} of {} on account {}", kind, amount, account_id);

        let transaction = Transaction::new(account_id, kind, amount)?;
        let mut account = self.account_required(account_id).await?;

        if let Err(err) = account.apply_transaction(transaction) {
            if matches!(err, BankingError::InsufficientFunds { .. }) {
                warn!("rejected {:?} on account {}: {}", kind, account_id, err);
            }
            return Err(err);
        }

        self.repository.save_account(&account).await?;

        info!(
            "applied {:?} on account {}, new balance {}",
            kind,
            account_id,
            account.balance()
        );
        Ok(())
    }

    async fn account_required(&self, account_id: AccountId) -> BankingResult<Account> {
        self.repository
            .account_with_transactions(account_id)
            .await?
            .ok_or_else(|| BankingError::AccountNotFound(account_id))
    }
}
