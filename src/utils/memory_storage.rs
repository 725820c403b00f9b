//! In-memory storage implementation

use std::collections::HashMap;

use crate::traits::*;
use crate::types::*;

/// In-memory storage: accounts keyed by account number plus an append-only log
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    accounts: Vec<Account>,
    by_number: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
    transactions: Vec<Transaction>,
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.accounts.clear();
        self.by_number.clear();
        self.by_id.clear();
        self.transactions.clear();
    }

    /// Reject a changeset that would give one account number to two accounts
    fn check_changeset(&self, changes: &Changeset) -> LedgerResult<()> {
        let mut staged: HashMap<&str, &str> = HashMap::new();

        for account in &changes.accounts {
            let taken_by = self
                .by_number
                .get(&account.account_number)
                .map(|&idx| self.accounts[idx].id.as_str())
                .or_else(|| staged.get(account.account_number.as_str()).copied());

            if let Some(owner) = taken_by {
                if owner != account.id {
                    return Err(LedgerError::Storage(format!(
                        "Account number '{}' already belongs to another account",
                        account.account_number
                    )));
                }
            }

            if let Some(&idx) = self.by_id.get(&account.id) {
                if self.accounts[idx].account_number != account.account_number {
                    return Err(LedgerError::Storage(format!(
                        "Account '{}' cannot change its account number",
                        account.id
                    )));
                }
            }

            staged.insert(&account.account_number, &account.id);
        }

        Ok(())
    }
}

impl LedgerStorage for MemoryStorage {
    fn get_account(&self, account_number: &str) -> Option<Account> {
        self.by_number
            .get(account_number)
            .map(|&idx| self.accounts[idx].clone())
    }

    fn get_account_by_id(&self, account_id: &str) -> Option<Account> {
        self.by_id
            .get(account_id)
            .map(|&idx| self.accounts[idx].clone())
    }

    fn contains_account_number(&self, account_number: &str) -> bool {
        self.by_number.contains_key(account_number)
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts.clone()
    }

    fn list_transactions(&self, account_id: Option<&str>) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|txn| account_id.is_none_or(|id| txn.account_id == id))
            .cloned()
            .collect()
    }

    fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    fn commit(&mut self, changes: Changeset) -> LedgerResult<()> {
        // Nothing below can fail once the changeset has been checked.
        self.check_changeset(&changes)?;

        for account in changes.accounts {
            match self.by_id.get(&account.id) {
                Some(&idx) => self.accounts[idx] = account,
                None => {
                    let idx = self.accounts.len();
                    self.by_number.insert(account.account_number.clone(), idx);
                    self.by_id.insert(account.id.clone(), idx);
                    self.accounts.push(account);
                }
            }
        }

        self.transactions.extend(changes.transactions);
        Ok(())
    }
}
