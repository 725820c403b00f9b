//! Core types and data structures for the banking ledger

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of bank account offered by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Everyday transactional account
    Checking,
    /// Savings account
    Savings,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Checking => write!(f, "Checking"),
            AccountType::Savings => write!(f, "Savings"),
        }
    }
}

impl FromStr for AccountType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Checking" => Ok(AccountType::Checking),
            "Savings" => Ok(AccountType::Savings),
            other => Err(LedgerError::Validation(format!(
                "Unknown account type '{}'",
                other
            ))),
        }
    }
}

/// Kinds of transaction recorded in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money added to an account (including the initial deposit)
    Deposit,
    /// Money taken out of an account
    Withdrawal,
    /// One leg of a transfer between two accounts
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => write!(f, "Deposit"),
            TransactionType::Withdrawal => write!(f, "Withdrawal"),
            TransactionType::Transfer => write!(f, "Transfer"),
        }
    }
}

/// Which side of a transfer a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    /// Debit leg, recorded against the source account
    Outgoing,
    /// Credit leg, recorded against the destination account
    Incoming,
}

/// A bank account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Internal identifier, distinct from the account number
    pub id: String,
    /// Unique, externally visible account number
    pub account_number: String,
    /// Name of the account holder
    pub holder_name: String,
    /// Checking or Savings
    pub account_type: AccountType,
    /// Current balance, never negative
    pub balance: BigDecimal,
    /// When the account was opened
    pub created_at: NaiveDateTime,
}

impl Account {
    /// Create a new account with a fresh internal id
    pub fn new(
        account_number: String,
        holder_name: String,
        account_type: AccountType,
        balance: BigDecimal,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_number,
            holder_name,
            account_type,
            balance,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Whether the account can cover a debit of `amount`
    pub fn can_cover(&self, amount: &BigDecimal) -> bool {
        self.balance >= *amount
    }
}

/// An immutable entry in the transaction log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Internal id of the account this transaction belongs to
    pub account_id: String,
    /// Deposit, Withdrawal or Transfer
    pub transaction_type: TransactionType,
    /// Amount moved, always positive
    pub amount: BigDecimal,
    /// Exact balance of the account after this transaction
    pub balance_after: BigDecimal,
    /// Free-text description
    pub description: String,
    /// Set on transfer legs only
    pub transfer_direction: Option<TransferDirection>,
    /// Account number on the other side of a transfer
    pub counterparty_account_number: Option<String>,
    /// When the transaction was recorded
    pub created_at: NaiveDateTime,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        account_id: String,
        transaction_type: TransactionType,
        amount: BigDecimal,
        balance_after: BigDecimal,
        description: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id,
            transaction_type,
            amount,
            balance_after,
            description,
            transfer_direction: None,
            counterparty_account_number: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Mark this transaction as one leg of a transfer
    pub fn with_transfer_leg(
        mut self,
        direction: TransferDirection,
        counterparty_account_number: String,
    ) -> Self {
        self.transfer_direction = Some(direction);
        self.counterparty_account_number = Some(counterparty_account_number);
        self
    }

    /// Override the creation timestamp
    pub fn recorded_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether this transaction added money to its account
    pub fn is_credit(&self) -> bool {
        match self.transaction_type {
            TransactionType::Deposit => true,
            TransactionType::Withdrawal => false,
            TransactionType::Transfer => {
                self.transfer_direction == Some(TransferDirection::Incoming)
            }
        }
    }

    /// Amount signed from the account's point of view (negative for debits)
    pub fn signed_amount(&self) -> BigDecimal {
        if self.is_credit() {
            self.amount.clone()
        } else {
            -self.amount.clone()
        }
    }
}

/// The two transactions produced by a transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Debit leg on the source account
    pub from_transaction: Transaction,
    /// Credit leg on the destination account
    pub to_transaction: Transaction,
}

/// Fieldless discriminant of [`LedgerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidAmount,
    AccountNotFound,
    InsufficientFunds,
    SameAccount,
    Validation,
    AccountNumberExhausted,
    Storage,
    Config,
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Insufficient funds in account {account_number}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        account_number: String,
        balance: BigDecimal,
        requested: BigDecimal,
    },
    #[error("Cannot transfer to the same account: {0}")]
    SameAccount(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Could not generate a unique account number after {attempts} attempts")]
    AccountNumberExhausted { attempts: u32 },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Which condition this error reports
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            LedgerError::AccountNotFound(_) => ErrorKind::AccountNotFound,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::SameAccount(_) => ErrorKind::SameAccount,
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::AccountNumberExhausted { .. } => ErrorKind::AccountNumberExhausted,
            LedgerError::Storage(_) => ErrorKind::Storage,
            LedgerError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
