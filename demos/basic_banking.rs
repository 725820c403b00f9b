//! Basic banking ledger example

use banking_core::utils::MemoryStorage;
use banking_core::{AccountType, Ledger, LedgerConfig};
use bigdecimal::BigDecimal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    println!("Banking Core - Basic Ledger Example\n");

    // 1. Start from the two sample accounts
    let config = LedgerConfig {
        seed_sample_accounts: true,
        ..LedgerConfig::default()
    };
    let mut ledger = Ledger::with_config(MemoryStorage::new(), config)?;

    // 2. Open a new account
    let account = ledger.create_account(
        "Ada Lovelace",
        AccountType::Savings,
        BigDecimal::from_str("1250.00")?,
    )?;
    println!(
        "  Opened {} for {} ({})",
        account.account_number, account.holder_name, account.account_type
    );

    // 3. Move some money around
    ledger.deposit("1234567890", BigDecimal::from(250), None)?;
    ledger.withdraw("0987654321", BigDecimal::from(100), Some("ATM"))?;
    ledger.transfer(
        "1234567890",
        &account.account_number,
        BigDecimal::from(1000),
        "rent",
    )?;

    if let Err(err) = ledger.withdraw(&account.account_number, BigDecimal::from(1_000_000), None) {
        println!("  Rejected: {}", err);
    }

    // 4. Show balances and history
    println!("\nAccounts:");
    for account in ledger.get_all_accounts() {
        println!(
            "  {} {:<14} {:<9} {:>10.2}",
            account.account_number, account.holder_name, account.account_type, account.balance
        );
    }
    println!("  Total: {:.2}", ledger.total_balance());

    println!("\nHistory (newest first):");
    for txn in ledger.get_all_transactions() {
        let sign = if txn.is_credit() { "+" } else { "-" };
        println!(
            "  {} {:<10} {}{:.2} -> {:.2}  {}",
            txn.created_at.format("%Y-%m-%d %H:%M:%S"),
            txn.transaction_type,
            sign,
            txn.amount,
            txn.balance_after,
            txn.description
        );
    }

    Ok(())
}
