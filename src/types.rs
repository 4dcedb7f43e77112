//! Core types and data structures for the banking domain

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of an account
pub type AccountId = Uuid;

/// Unique identifier of a transaction
pub type TransactionId = Uuid;

/// Unique identifier of an account holder
pub type AccountHolderId = Uuid;

/// Kind of a transaction, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Credit - money flowing into the account
    Credit,
    /// Debit - money flowing out of the account
    Debit,
}

/// An immutable signed monetary event tied to one account.
///
/// Instances only exist through [`Transaction::new`] (which validates the
/// amount) or through deserialization when a repository rehydrates stored
/// state. Fields never change after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    transaction_id: TransactionId,
    account_id: AccountId,
    kind: TransactionKind,
    amount: BigDecimal,
    created_at: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction with a fresh id and the current timestamp.
    ///
    /// Fails with [`BankingError::NonPositiveAmount`] if `amount <= 0`.
    pub fn new(
        account_id: AccountId,
        kind: TransactionKind,
        amount: BigDecimal,
    ) -> BankingResult<Self> {
        if amount <= BigDecimal::from(0) {
            return Err(BankingError::NonPositiveAmount { amount });
        }

        Ok(Self {
            transaction_id: Uuid::new_v4(),
            account_id,
            kind,
            amount,
            created_at: chrono::Utc::now().naive_utc(),
        })
    }

    /// Unique identifier of this transaction
    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    /// Identifier of the account this transaction belongs to
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Kind of this transaction
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Absolute amount of this transaction (always positive)
    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    /// When this transaction was created
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// The amount this transaction contributes to the balance, with its
    /// sign: `+amount` for a credit, `-amount` for a debit.
    pub fn signed_amount(&self) -> BigDecimal {
        match self.kind {
            TransactionKind::Credit => self.amount.clone(),
            TransactionKind::Debit => -&self.amount,
        }
    }
}

/// The account aggregate: current balance plus its owned transaction
/// history, in application order.
///
/// [`Account::apply_transaction`] is the only path that changes balance or
/// history, so every invariant is enforced there: the balance equals the
/// running sum of signed contributions starting from zero, never goes
/// negative, and every owned transaction belongs to this account and does
/// not predate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    account_id: AccountId,
    holder_id: AccountHolderId,
    balance: BigDecimal,
    created_at: NaiveDateTime,
    transactions: Vec<Transaction>,
}

impl Account {
    /// Open a new account for a holder: zero balance, fresh id, current
    /// timestamp, empty history.
    pub fn new(holder_id: AccountHolderId) -> Self {
        Self {
            account_id: Uuid::new_v4(),
            holder_id,
            balance: BigDecimal::from(0),
            created_at: chrono::Utc::now().naive_utc(),
            transactions: Vec::new(),
        }
    }

    /// Unique identifier of this account
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Identifier of the account holder
    pub fn holder_id(&self) -> AccountHolderId {
        self.holder_id
    }

    /// Current balance
    pub fn balance(&self) -> &BigDecimal {
        &self.balance
    }

    /// When this account was opened
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Transaction history in application order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Apply a transaction to this account, taking ownership of it.
    ///
    /// On success the balance and the history are updated together; on any
    /// error the aggregate is left untouched. Not safe for concurrent
    /// invocation on one instance; the service layer serializes callers
    /// per account id.
    pub fn apply_transaction(&mut self, transaction: Transaction) -> BankingResult<()> {
        if transaction.account_id() != self.account_id {
            return Err(BankingError::ForeignTransaction {
                account_id: self.account_id,
                transaction_account_id: transaction.account_id(),
            });
        }

        if transaction.created_at() < self.created_at {
            return Err(BankingError::TransactionPredatesAccount {
                account_id: self.account_id,
                transaction_created_at: transaction.created_at(),
                account_created_at: self.created_at,
            });
        }

        // Unreachable through the factory, but deserialized data can carry
        // a zero amount.
        let contribution = transaction.signed_amount();
        if contribution == BigDecimal::from(0) {
            return Err(BankingError::EmptyTransaction {
                account_id: self.account_id,
            });
        }

        let new_balance = &self.balance + &contribution;
        if new_balance < BigDecimal::from(0) {
            return Err(BankingError::InsufficientFunds {
                account_id: self.account_id,
                balance: self.balance.clone(),
                amount: transaction.amount().clone(),
            });
        }

        self.balance = new_balance;
        self.transactions.push(transaction);
        Ok(())
    }
}

/// Errors that can occur in the banking domain
#[derive(Debug, thiserror::Error)]
pub enum BankingError {
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount { amount: BigDecimal },
    #[error("Date {at_date} is out of range for account {account_id}")]
    DateOutOfRange {
        account_id: AccountId,
        at_date: NaiveDateTime,
    },
    #[error("Transaction belongs to account {transaction_account_id}, not {account_id}")]
    ForeignTransaction {
        account_id: AccountId,
        transaction_account_id: AccountId,
    },
    #[error(
        "Transaction created at {transaction_created_at} predates account {account_id} created at {account_created_at}"
    )]
    TransactionPredatesAccount {
        account_id: AccountId,
        transaction_created_at: NaiveDateTime,
        account_created_at: NaiveDateTime,
    },
    #[error("Transaction contributes nothing to the balance of account {account_id}")]
    EmptyTransaction { account_id: AccountId },
    #[error("Insufficient funds on account {account_id}: balance {balance}, requested {amount}")]
    InsufficientFunds {
        account_id: AccountId,
        balance: BigDecimal,
        amount: BigDecimal,
    },
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type for banking operations
pub type BankingResult<T> = Result<T, BankingError>;
