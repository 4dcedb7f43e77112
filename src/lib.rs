//! # Banking Core
//!
//! A banking domain library maintaining per-account monetary balances
//! derived from an append-only sequence of signed transactions, with
//! mutations on the same account serialized and unrelated accounts
//! proceeding independently.
//!
//! ## Features
//!
//! - **Invariant-preserving aggregate**: balance always equals the sum of
//!   applied transactions and never goes negative; the aggregate is the
//!   only mutator
//! - **Per-account mutual exclusion**: deposits and withdrawals on one
//!   account are applied in lock-acquisition order, with no lost updates
//! - **Point-in-time balances**: reconstruct the balance an account had at
//!   any past instant from its transaction history
//! - **Storage abstraction**: database-agnostic design with a trait-based
//!   repository
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_core::utils::MemoryRepository;
//! use banking_core::{Account, AccountRepository, AccountService};
//! use bigdecimal::BigDecimal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> banking_core::BankingResult<()> {
//! let repository = MemoryRepository::new();
//!
//! let account = Account::new(uuid::Uuid::new_v4());
//! let account_id = account.account_id();
//! repository.save_account(&account).await?;
//!
//! let service = AccountService::new(repository);
//! service.deposit(account_id, BigDecimal::from(100)).await?;
//! service.withdraw(account_id, BigDecimal::from(40)).await?;
//! # Ok(())
//! # }
//! ```

pub mod service;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use service::*;
pub use traits::*;
pub use types::*;
