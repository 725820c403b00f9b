//! Ledger configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::*;

/// Tunables for a [`crate::Ledger`]
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```rust
/// use banking_core::LedgerConfig;
///
/// let config = LedgerConfig::from_json_str(r#"{ "seed_sample_accounts": true }"#).unwrap();
/// assert!(config.seed_sample_accounts);
/// assert_eq!(config.max_account_number_attempts, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Open the two demo accounts when the ledger is created
    pub seed_sample_accounts: bool,
    /// How many candidate account numbers to try before giving up
    pub max_account_number_attempts: u32,
    /// Description used when a deposit is given none
    pub default_deposit_description: String,
    /// Description used when a withdrawal is given none
    pub default_withdrawal_description: String,
    /// Description of the transaction recorded for an opening balance
    pub initial_deposit_description: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed_sample_accounts: false,
            max_account_number_attempts: 1000,
            default_deposit_description: "Deposit".to_string(),
            default_withdrawal_description: "Withdrawal".to_string(),
            initial_deposit_description: "Initial deposit".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> LedgerResult<Self> {
        let config: LedgerConfig = serde_json::from_str(json)
            .map_err(|e| LedgerError::Config(format!("invalid ledger config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> LedgerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LedgerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.max_account_number_attempts == 0 {
            return Err(LedgerError::Config(
                "max_account_number_attempts must be at least 1".to_string(),
            ));
        }

        for (field, value) in [
            ("default_deposit_description", &self.default_deposit_description),
            ("default_withdrawal_description", &self.default_withdrawal_description),
            ("initial_deposit_description", &self.initial_deposit_description),
        ] {
            if value.trim().is_empty() {
                return Err(LedgerError::Config(format!("{} cannot be empty", field)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert!(!config.seed_sample_accounts);
        assert_eq!(config.default_deposit_description, "Deposit");
        assert_eq!(config.default_withdrawal_description, "Withdrawal");
        assert_eq!(config.initial_deposit_description, "Initial deposit");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LedgerConfig::from_json_str(r#"{"max_account_number_attempts": 5}"#).unwrap();
        assert_eq!(config.max_account_number_attempts, 5);
        assert_eq!(config.default_deposit_description, "Deposit");
    }

    #[test]
    fn test_rejects_bad_config() {
        let err = LedgerConfig::from_json_str(r#"{"max_account_number_attempts": 0}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = LedgerConfig::from_json_str("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err =
            LedgerConfig::from_json_str(r#"{"default_deposit_description": " "}"#).unwrap_err();
        assert!(err.to_string().contains("default_deposit_description"));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed_sample_accounts": true}}"#).unwrap();

        let config = LedgerConfig::from_json_file(file.path()).unwrap();
        assert!(config.seed_sample_accounts);

        let missing = LedgerConfig::from_json_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(LedgerError::Config(_))));
    }
}
