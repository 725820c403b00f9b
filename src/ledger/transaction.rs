//! Deposits, withdrawals, transfers and transaction history

use bigdecimal::BigDecimal;

use crate::ledger::Ledger;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_positive_amount;

impl<S: LedgerStorage> Ledger<S> {
    /// Add money to an account
    ///
    /// An empty or missing description becomes the configured default
    /// ("Deposit").
    pub fn deposit(
        &mut self,
        account_number: &str,
        amount: BigDecimal,
        description: Option<&str>,
    ) -> LedgerResult<Transaction> {
        validate_positive_amount(&amount, "Deposit")?;
        let mut account = self.get_account_required(account_number)?;

        account.balance += &amount;

        let transaction = Transaction::new(
            account.id.clone(),
            TransactionType::Deposit,
            amount,
            account.balance.clone(),
            describe(description, &self.config.default_deposit_description),
        );

        self.storage.commit(
            Changeset::new()
                .put_account(account)
                .append_transaction(transaction.clone()),
        )?;

        tracing::info!(
            account_number,
            amount = %transaction.amount,
            balance = %transaction.balance_after,
            "deposit recorded"
        );

        Ok(transaction)
    }

    /// Take money out of an account
    pub fn withdraw(
        &mut self,
        account_number: &str,
        amount: BigDecimal,
        description: Option<&str>,
    ) -> LedgerResult<Transaction> {
        validate_positive_amount(&amount, "Withdrawal")?;
        let mut account = self.get_account_required(account_number)?;
        ensure_funds(&account, &amount)?;

        account.balance -= &amount;

        let transaction = Transaction::new(
            account.id.clone(),
            TransactionType::Withdrawal,
            amount,
            account.balance.clone(),
            describe(description, &self.config.default_withdrawal_description),
        );

        self.storage.commit(
            Changeset::new()
                .put_account(account)
                .append_transaction(transaction.clone()),
        )?;

        tracing::info!(
            account_number,
            amount = %transaction.amount,
            balance = %transaction.balance_after,
            "withdrawal recorded"
        );

        Ok(transaction)
    }

    /// Move money between two accounts
    ///
    /// Both balance updates and both transaction legs are committed together.
    /// The leg descriptions read `Transfer to {to} - {description}` and
    /// `Transfer from {from} - {description}`; the same information is also
    /// carried by [`Transaction::transfer_direction`].
    pub fn transfer(
        &mut self,
        from_account_number: &str,
        to_account_number: &str,
        amount: BigDecimal,
        description: &str,
    ) -> LedgerResult<TransferReceipt> {
        validate_positive_amount(&amount, "Transfer")?;

        if from_account_number == to_account_number {
            tracing::warn!(account_number = from_account_number, "transfer to same account");
            return Err(LedgerError::SameAccount(from_account_number.to_string()));
        }

        let mut from = self.get_account_required(from_account_number)?;
        let mut to = self.get_account_required(to_account_number)?;
        ensure_funds(&from, &amount)?;

        from.balance -= &amount;
        to.balance += &amount;

        let now = chrono::Utc::now().naive_utc();
        let from_transaction = Transaction::new(
            from.id.clone(),
            TransactionType::Transfer,
            amount.clone(),
            from.balance.clone(),
            format!("Transfer to {} - {}", to_account_number, description),
        )
        .with_transfer_leg(TransferDirection::Outgoing, to_account_number.to_string())
        .recorded_at(now);

        let to_transaction = Transaction::new(
            to.id.clone(),
            TransactionType::Transfer,
            amount,
            to.balance.clone(),
            format!("Transfer from {} - {}", from_account_number, description),
        )
        .with_transfer_leg(TransferDirection::Incoming, from_account_number.to_string())
        .recorded_at(now);

        self.storage.commit(
            Changeset::new()
                .put_account(from)
                .put_account(to)
                .append_transaction(from_transaction.clone())
                .append_transaction(to_transaction.clone()),
        )?;

        tracing::info!(
            from = from_account_number,
            to = to_account_number,
            amount = %from_transaction.amount,
            "transfer recorded"
        );

        Ok(TransferReceipt {
            from_transaction,
            to_transaction,
        })
    }

    /// Transactions of one account, most recent first
    ///
    /// An unknown account number yields an empty history.
    pub fn get_transaction_history(&self, account_number: &str) -> Vec<Transaction> {
        match self.storage.get_account(account_number) {
            Some(account) => newest_first(self.storage.list_transactions(Some(&account.id))),
            None => Vec::new(),
        }
    }

    /// Every transaction in the ledger, most recent first
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        newest_first(self.storage.list_transactions(None))
    }
}

fn describe(description: Option<&str>, default: &str) -> String {
    match description {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => default.to_string(),
    }
}

fn ensure_funds(account: &Account, amount: &BigDecimal) -> LedgerResult<()> {
    if account.can_cover(amount) {
        return Ok(());
    }

    tracing::warn!(
        account_number = %account.account_number,
        balance = %account.balance,
        requested = %amount,
        "insufficient funds"
    );
    Err(LedgerError::InsufficientFunds {
        account_number: account.account_number.clone(),
        balance: account.balance.clone(),
        requested: amount.clone(),
    })
}

/// Sort by creation time descending; ties go to the later-appended entry
fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.reverse();
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    transactions
}
