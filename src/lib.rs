//! # Banking Core
//!
//! An in-memory banking ledger: accounts, deposits, withdrawals, transfers
//! and an append-only transaction log.
//!
//! ## Features
//!
//! - **Accounts**: Checking and Savings accounts with unique 10-digit account numbers
//! - **Money movement**: deposits, withdrawals and atomic two-leg transfers
//! - **History**: per-account and ledger-wide transaction history, newest first
//! - **Storage abstraction**: trait-based storage with an in-memory backend
//! - **Shared access**: a lock-guarded handle for multi-threaded callers
//!
//! ## Quick Start
//!
//! ```rust
//! use banking_core::{utils::MemoryStorage, AccountType, Ledger};
//! use bigdecimal::BigDecimal;
//!
//! let mut ledger = Ledger::new(MemoryStorage::new());
//! let alice = ledger
//!     .create_account("Alice", AccountType::Checking, BigDecimal::from(500))
//!     .unwrap();
//! let bob = ledger
//!     .create_account("Bob", AccountType::Savings, BigDecimal::from(0))
//!     .unwrap();
//!
//! ledger
//!     .transfer(&alice.account_number, &bob.account_number, BigDecimal::from(200), "lunch")
//!     .unwrap();
//!
//! assert_eq!(ledger.get_account(&bob.account_number).unwrap().balance, BigDecimal::from(200));
//! ```

pub mod config;
pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::*;
pub use ledger::*;
pub use traits::*;
pub use types::*;
