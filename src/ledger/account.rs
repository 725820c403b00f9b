//! Account management functionality

use bigdecimal::{BigDecimal, Zero};

use crate::ledger::Ledger;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_non_negative_amount;

impl<S: LedgerStorage> Ledger<S> {
    /// Open a new account
    ///
    /// A positive opening balance is also recorded as a Deposit transaction.
    pub fn create_account(
        &mut self,
        holder_name: &str,
        account_type: AccountType,
        initial_deposit: BigDecimal,
    ) -> LedgerResult<Account> {
        validate_non_negative_amount(&initial_deposit, "Initial deposit")?;

        let holder_name = holder_name.trim();
        self.validator.validate_holder_name(holder_name)?;

        let account_number = self.generate_account_number()?;
        let account = Account::new(
            account_number,
            holder_name.to_string(),
            account_type,
            initial_deposit.clone(),
        );

        self.validator.validate_account(&account)?;

        let mut changes = Changeset::new().put_account(account.clone());
        if initial_deposit > BigDecimal::zero() {
            let opening = Transaction::new(
                account.id.clone(),
                TransactionType::Deposit,
                initial_deposit.clone(),
                initial_deposit,
                self.config.initial_deposit_description.clone(),
            )
            .recorded_at(account.created_at);
            changes = changes.append_transaction(opening);
        }

        self.storage.commit(changes)?;

        tracing::info!(
            account_number = %account.account_number,
            account_type = %account.account_type,
            balance = %account.balance,
            "account opened"
        );

        Ok(account)
    }

    /// Get an account by account number
    pub fn get_account(&self, account_number: &str) -> Option<Account> {
        self.storage.get_account(account_number)
    }

    /// Get an account by internal id
    pub fn get_account_by_id(&self, account_id: &str) -> Option<Account> {
        self.storage.get_account_by_id(account_id)
    }

    /// All accounts, in the order they were opened
    pub fn get_all_accounts(&self) -> Vec<Account> {
        self.storage.list_accounts()
    }

    /// Get an account, or fail with `AccountNotFound`
    pub(crate) fn get_account_required(&self, account_number: &str) -> LedgerResult<Account> {
        self.storage
            .get_account(account_number)
            .ok_or_else(|| LedgerError::AccountNotFound(account_number.to_string()))
    }

    /// Draw candidates until one is not taken, up to the configured bound
    fn generate_account_number(&mut self) -> LedgerResult<String> {
        let attempts = self.config.max_account_number_attempts;

        for attempt in 1..=attempts {
            let candidate = self.number_source.next_candidate();
            if !candidate.is_empty() && !self.storage.contains_account_number(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(attempt, candidate = %candidate, "account number collision");
        }

        tracing::warn!(attempts, "account number space exhausted");
        Err(LedgerError::AccountNumberExhausted { attempts })
    }
}
