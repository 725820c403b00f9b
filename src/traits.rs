//! Traits for storage abstraction and extensibility

use std::collections::VecDeque;

use crate::types::*;
use crate::utils::validation::{validate_account_number, validate_holder_name};

/// A set of changes applied to storage as one unit
///
/// Accounts are upserted by account number and transactions are appended in
/// order. Storage implementations must apply all of it or none of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changeset {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

impl Changeset {
    /// Create an empty changeset
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an account insert or balance update
    pub fn put_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    /// Stage a transaction to append to the log
    pub fn append_transaction(mut self, transaction: Transaction) -> Self {
        self.transactions.push(transaction);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.transactions.is_empty()
    }
}

/// Storage abstraction for the ledger system
///
/// Reads never fail: an unknown account is `None` and an empty log is an
/// empty `Vec`. All writes go through [`LedgerStorage::commit`].
pub trait LedgerStorage: Send {
    /// Get an account by its account number
    fn get_account(&self, account_number: &str) -> Option<Account>;

    /// Get an account by its internal id
    fn get_account_by_id(&self, account_id: &str) -> Option<Account>;

    /// Whether an account number is already taken
    fn contains_account_number(&self, account_number: &str) -> bool {
        self.get_account(account_number).is_some()
    }

    /// List all accounts in insertion order
    fn list_accounts(&self) -> Vec<Account>;

    /// List transactions in append order, optionally only those of one account
    fn list_transactions(&self, account_id: Option<&str>) -> Vec<Transaction>;

    /// Number of transactions in the log
    fn transaction_count(&self) -> usize;

    /// Apply a changeset atomically
    fn commit(&mut self, changes: Changeset) -> LedgerResult<()>;
}

/// Trait for implementing custom account validation rules
pub trait AccountValidator: Send + Sync {
    /// Validate the holder name before an account number is drawn
    fn validate_holder_name(&self, _holder_name: &str) -> LedgerResult<()> {
        Ok(())
    }

    /// Validate an account before it is opened
    fn validate_account(&self, account: &Account) -> LedgerResult<()>;
}

/// Default account validator: the holder name must not be blank
pub struct DefaultAccountValidator;

impl AccountValidator for DefaultAccountValidator {
    fn validate_holder_name(&self, holder_name: &str) -> LedgerResult<()> {
        if holder_name.trim().is_empty() {
            return Err(LedgerError::Validation(
                "Account holder name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        self.validate_holder_name(&account.holder_name)
    }
}

/// Stricter validator that also checks name length and account number format
pub struct StrictAccountValidator;

impl AccountValidator for StrictAccountValidator {
    fn validate_holder_name(&self, holder_name: &str) -> LedgerResult<()> {
        validate_holder_name(holder_name)
    }

    fn validate_account(&self, account: &Account) -> LedgerResult<()> {
        validate_holder_name(&account.holder_name)?;
        validate_account_number(&account.account_number)?;
        Ok(())
    }
}

/// Source of candidate account numbers
///
/// Candidates may collide with existing accounts; the ledger retries until it
/// finds a free one.
pub trait AccountNumberSource: Send {
    fn next_candidate(&mut self) -> String;
}

/// Random 10-digit account numbers drawn from UUID v4 randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAccountNumbers;

impl RandomAccountNumbers {
    const LOWEST: u128 = 1_000_000_000;
    const SPAN: u128 = 9_000_000_000;
}

impl AccountNumberSource for RandomAccountNumbers {
    fn next_candidate(&mut self) -> String {
        let bits = uuid::Uuid::new_v4().as_u128();
        (Self::LOWEST + bits % Self::SPAN).to_string()
    }
}

/// Replays a fixed list of account numbers, cycling when it runs out
#[derive(Debug, Clone)]
pub struct ScriptedAccountNumbers {
    numbers: VecDeque<String>,
}

impl ScriptedAccountNumbers {
    pub fn new<I, T>(numbers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            numbers: numbers.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccountNumberSource for ScriptedAccountNumbers {
    fn next_candidate(&mut self) -> String {
        match self.numbers.pop_front() {
            Some(number) => {
                self.numbers.push_back(number.clone());
                number
            }
            // An empty script behaves like an always-colliding source.
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn account(number: &str, name: &str) -> Account {
        Account::new(
            number.to_string(),
            name.to_string(),
            AccountType::Checking,
            BigDecimal::from(0),
        )
    }

    #[test]
    fn test_random_numbers_have_ten_digits() {
        let mut source = RandomAccountNumbers;
        for _ in 0..200 {
            let candidate = source.next_candidate();
            assert_eq!(candidate.len(), 10);
            assert!(candidate.chars().all(|c| c.is_ascii_digit()));
            assert!(!candidate.starts_with('0'));
        }
    }

    #[test]
    fn test_scripted_numbers_cycle() {
        let mut source = ScriptedAccountNumbers::new(["1111111111", "2222222222"]);
        assert_eq!(source.next_candidate(), "1111111111");
        assert_eq!(source.next_candidate(), "2222222222");
        assert_eq!(source.next_candidate(), "1111111111");
    }

    #[test]
    fn test_default_validator_rejects_blank_name() {
        let validator = DefaultAccountValidator;
        assert!(validator.validate_account(&account("1234567890", "Ada")).is_ok());
        let err = validator
            .validate_account(&account("1234567890", "   "))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_strict_validator_checks_number_format() {
        let validator = StrictAccountValidator;
        assert!(validator.validate_account(&account("1234567890", "Ada")).is_ok());
        assert!(validator.validate_account(&account("12345", "Ada")).is_err());
        assert!(validator.validate_account(&account("12345abcde", "Ada")).is_err());
    }
}
