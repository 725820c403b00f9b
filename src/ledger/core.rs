//! Main ledger orchestrator that owns accounts and the transaction log

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::LedgerConfig;
use crate::traits::*;
use crate::types::*;

/// Main ledger system that orchestrates all banking operations
///
/// Account operations live in [`crate::ledger::account`], money movement and
/// history in [`crate::ledger::transaction`].
pub struct Ledger<S: LedgerStorage> {
    pub(crate) storage: S,
    pub(crate) config: LedgerConfig,
    pub(crate) validator: Box<dyn AccountValidator>,
    pub(crate) number_source: Box<dyn AccountNumberSource>,
}

impl<S: LedgerStorage> Ledger<S> {
    /// Create a new ledger with the default configuration
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: LedgerConfig::default(),
            validator: Box::new(DefaultAccountValidator),
            number_source: Box::new(RandomAccountNumbers),
        }
    }

    /// Create a new ledger with a custom configuration
    pub fn with_config(storage: S, config: LedgerConfig) -> LedgerResult<Self> {
        Self::with_parts(
            storage,
            config,
            Box::new(DefaultAccountValidator),
            Box::new(RandomAccountNumbers),
        )
    }

    /// Create a new ledger with every collaborator supplied by the caller
    pub fn with_parts(
        storage: S,
        config: LedgerConfig,
        validator: Box<dyn AccountValidator>,
        number_source: Box<dyn AccountNumberSource>,
    ) -> LedgerResult<Self> {
        config.validate()?;

        let mut ledger = Self {
            storage,
            config,
            validator,
            number_source,
        };

        if ledger.config.seed_sample_accounts {
            ledger.seed_sample_accounts()?;
        }

        Ok(ledger)
    }

    /// The configuration this ledger runs with
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Sum of the balances of every account
    pub fn total_balance(&self) -> BigDecimal {
        self.storage
            .list_accounts()
            .iter()
            .map(|account| &account.balance)
            .sum()
    }

    /// Number of open accounts
    pub fn account_count(&self) -> usize {
        self.storage.list_accounts().len()
    }

    /// Number of entries in the transaction log
    pub fn transaction_count(&self) -> usize {
        self.storage.transaction_count()
    }

    /// Open the two demo accounts, without any transactions
    fn seed_sample_accounts(&mut self) -> LedgerResult<()> {
        let samples = [
            (
                "1234567890",
                "John Doe",
                AccountType::Checking,
                5000,
                sample_date(2024, 1, 15)?,
            ),
            (
                "0987654321",
                "Jane Smith",
                AccountType::Savings,
                10000,
                sample_date(2024, 2, 20)?,
            ),
        ];

        let mut changes = Changeset::new();
        for (number, holder, account_type, balance, created_at) in samples {
            let mut account = Account::new(
                number.to_string(),
                holder.to_string(),
                account_type,
                BigDecimal::from(balance),
            );
            account.created_at = created_at;
            changes = changes.put_account(account);
        }

        self.storage.commit(changes)?;
        tracing::info!(accounts = 2, "seeded sample accounts");
        Ok(())
    }
}

fn sample_date(year: i32, month: u32, day: u32) -> LedgerResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LedgerError::Config(format!("invalid sample date {year}-{month}-{day}")))
}

/// Cloneable handle that serializes access to one [`Ledger`]
///
/// Each call holds the lock for the whole operation, so a transfer's two
/// balance updates and two log entries are never observed half-applied.
pub struct SharedLedger<S: LedgerStorage> {
    inner: Arc<Mutex<Ledger<S>>>,
}

impl<S: LedgerStorage> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LedgerStorage> SharedLedger<S> {
    /// Wrap a ledger for shared use
    pub fn new(ledger: Ledger<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // Each single-operation method validates before it commits, so a panic
    // inside one of them leaves no partial write and the poison flag can be
    // ignored. Closures passed to `with` carry no such guarantee.
    fn lock(&self) -> MutexGuard<'_, Ledger<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the ledger
    ///
    /// Everything `f` commits before it returns or panics stays committed;
    /// a panic between two operations leaves the first one applied.
    pub fn with<R>(&self, f: impl FnOnce(&mut Ledger<S>) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Open a new account, see [`Ledger::create_account`]
    pub fn create_account(
        &self,
        holder_name: &str,
        account_type: AccountType,
        initial_deposit: BigDecimal,
    ) -> LedgerResult<Account> {
        self.lock()
            .create_account(holder_name, account_type, initial_deposit)
    }

    /// Look up an account by account number
    pub fn get_account(&self, account_number: &str) -> Option<Account> {
        self.lock().get_account(account_number)
    }

    /// All accounts, in the order they were opened
    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.lock().get_all_accounts()
    }

    /// Add money to an account, see [`Ledger::deposit`]
    pub fn deposit(
        &self,
        account_number: &str,
        amount: BigDecimal,
        description: Option<&str>,
    ) -> LedgerResult<Transaction> {
        self.lock().deposit(account_number, amount, description)
    }

    /// Take money out of an account, see [`Ledger::withdraw`]
    pub fn withdraw(
        &self,
        account_number: &str,
        amount: BigDecimal,
        description: Option<&str>,
    ) -> LedgerResult<Transaction> {
        self.lock().withdraw(account_number, amount, description)
    }

    /// Move money between two accounts under one lock
    pub fn transfer(
        &self,
        from_account_number: &str,
        to_account_number: &str,
        amount: BigDecimal,
        description: &str,
    ) -> LedgerResult<TransferReceipt> {
        self.lock()
            .transfer(from_account_number, to_account_number, amount, description)
    }

    /// Transactions of one account, most recent first
    pub fn get_transaction_history(&self, account_number: &str) -> Vec<Transaction> {
        self.lock().get_transaction_history(account_number)
    }

    /// Every transaction, most recent first
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        self.lock().get_all_transactions()
    }

    /// Sum of all account balances
    pub fn total_balance(&self) -> BigDecimal {
        self.lock().total_balance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::memory_storage::MemoryStorage;
    use std::thread;

    #[test]
    fn test_seeded_ledger() {
        let config = LedgerConfig {
            seed_sample_accounts: true,
            ..LedgerConfig::default()
        };
        let ledger = Ledger::with_config(MemoryStorage::new(), config).unwrap();

        let john = ledger.get_account("1234567890").unwrap();
        assert_eq!(john.holder_name, "John Doe");
        assert_eq!(john.account_type, AccountType::Checking);
        assert_eq!(john.balance, BigDecimal::from(5000));
        assert_eq!(john.created_at, sample_date(2024, 1, 15).unwrap());

        let jane = ledger.get_account("0987654321").unwrap();
        assert_eq!(jane.account_type, AccountType::Savings);
        assert_eq!(jane.balance, BigDecimal::from(10000));

        assert_eq!(ledger.total_balance(), BigDecimal::from(15000));
        assert_eq!(ledger.transaction_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LedgerConfig {
            max_account_number_attempts: 0,
            ..LedgerConfig::default()
        };
        let result = Ledger::with_config(MemoryStorage::new(), config);
        assert!(matches!(result, Err(LedgerError::Config(_))));
    }

    #[test]
    fn test_empty_ledger_totals() {
        let ledger = Ledger::new(MemoryStorage::new());
        assert_eq!(ledger.total_balance(), BigDecimal::from(0));
        assert_eq!(ledger.account_count(), 0);
        assert!(ledger.get_all_transactions().is_empty());
    }

    #[test]
    fn test_shared_ledger_recovers_from_panicking_holder() {
        let shared = SharedLedger::new(Ledger::new(MemoryStorage::new()));
        let a = shared
            .create_account("Alice", AccountType::Checking, BigDecimal::from(100))
            .unwrap();
        let b = shared
            .create_account("Bob", AccountType::Savings, BigDecimal::from(0))
            .unwrap();

        let worker = shared.clone();
        let number = a.account_number.clone();
        let outcome = thread::spawn(move || {
            worker.with(|ledger| {
                ledger
                    .deposit(&number, BigDecimal::from(50), None)
                    .unwrap();
                panic!("holder gave up mid-session");
            })
        })
        .join();
        assert!(outcome.is_err());

        let alice = shared.get_account(&a.account_number).unwrap();
        assert_eq!(alice.balance, BigDecimal::from(150));

        let receipt = shared
            .transfer(&a.account_number, &b.account_number, BigDecimal::from(150), "all")
            .unwrap();
        assert_eq!(receipt.from_transaction.balance_after, BigDecimal::from(0));
        assert_eq!(shared.total_balance(), BigDecimal::from(150));
    }

    #[test]
    fn test_shared_ledger_concurrent_transfers_conserve_money() {
        let shared = SharedLedger::new(Ledger::new(MemoryStorage::new()));
        let a = shared
            .create_account("Alice", AccountType::Checking, BigDecimal::from(1000))
            .unwrap();
        let b = shared
            .create_account("Bob", AccountType::Savings, BigDecimal::from(1000))
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                let (from, to) = if i % 2 == 0 {
                    (a.account_number.clone(), b.account_number.clone())
                } else {
                    (b.account_number.clone(), a.account_number.clone())
                };
                thread::spawn(move || {
                    for _ in 0..25 {
                        // Either leg may run dry; that must fail cleanly.
                        let _ = shared.transfer(&from, &to, BigDecimal::from(30), "ping");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.total_balance(), BigDecimal::from(2000));
        for account in shared.get_all_accounts() {
            assert!(account.balance >= BigDecimal::from(0));
            let history = shared.get_transaction_history(&account.account_number);
            assert_eq!(history[0].balance_after, account.balance);
        }
        assert_eq!(shared.get_all_transactions().len() % 2, 0);
    }
}
