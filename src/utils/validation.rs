//! Validation utilities

use bigdecimal::{BigDecimal, Zero};

use crate::types::*;

/// Number of digits in an account number
pub const ACCOUNT_NUMBER_DIGITS: usize = 10;

/// Longest holder name the strict validator accepts
pub const MAX_HOLDER_NAME_LEN: usize = 100;

/// Validate that an amount is strictly positive
///
/// `what` names the operation in the error message, e.g. "Deposit".
pub fn validate_positive_amount(amount: &BigDecimal, what: &str) -> LedgerResult<()> {
    if *amount <= BigDecimal::zero() {
        Err(LedgerError::InvalidAmount(format!(
            "{} amount must be positive, got {}",
            what, amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that an amount is zero or positive
pub fn validate_non_negative_amount(amount: &BigDecimal, what: &str) -> LedgerResult<()> {
    if *amount < BigDecimal::zero() {
        Err(LedgerError::InvalidAmount(format!(
            "{} cannot be negative, got {}",
            what, amount
        )))
    } else {
        Ok(())
    }
}

/// Validate that a holder name is present and not too long
pub fn validate_holder_name(name: &str) -> LedgerResult<()> {
    if name.trim().is_empty() {
        return Err(LedgerError::Validation(
            "Account holder name cannot be empty".to_string(),
        ));
    }

    if name.chars().count() > MAX_HOLDER_NAME_LEN {
        return Err(LedgerError::Validation(format!(
            "Account holder name cannot exceed {} characters",
            MAX_HOLDER_NAME_LEN
        )));
    }

    Ok(())
}

/// Validate that an account number is exactly ten ASCII digits
pub fn validate_account_number(account_number: &str) -> LedgerResult<()> {
    if account_number.len() != ACCOUNT_NUMBER_DIGITS
        || !account_number.chars().all(|c| c.is_ascii_digit())
    {
        return Err(LedgerError::Validation(format!(
            "Account number '{}' must be exactly {} digits",
            account_number, ACCOUNT_NUMBER_DIGITS
        )));
    }

    Ok(())
}
