// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tenant Account Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Account number validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account number is empty")]
    Empty,

    #[error("Account number exceeds maximum length of 10 characters: {0}")]
    TooLong(usize),
}

/// Tenant account number
///
/// Every host belongs to exactly one account, and every query or mutation is
/// scoped to the caller's account.
///
/// # Examples
///
/// ```rust
/// use cim_host_inventory::domain::AccountNumber;
///
/// let account = AccountNumber::new("000501").unwrap();
/// assert_eq!(account.as_str(), "000501");
/// assert!(AccountNumber::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountNumber(String);

impl AccountNumber {
    /// Maximum account number length (matches the inventory schema column)
    pub const MAX_LENGTH: usize = 10;

    /// Create a new account number with validation
    pub fn new(account: impl Into<String>) -> Result<Self, AccountError> {
        let account = account.into();

        if account.is_empty() {
            return Err(AccountError::Empty);
        }

        if account.len() > Self::MAX_LENGTH {
            return Err(AccountError::TooLong(account.len()));
        }

        Ok(Self(account))
    }

    /// Get the account number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AccountNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccountNumber {
    type Error = AccountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AccountNumber {
    type Error = AccountError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountNumber> for String {
    fn from(value: AccountNumber) -> Self {
        value.0
    }
}

/// Authenticated caller identity, supplied per request by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub account_number: AccountNumber,
}

impl Identity {
    pub fn new(account_number: AccountNumber) -> Self {
        Self { account_number }
    }

    /// Whether this identity may act on records owned by `account`
    pub fn owns(&self, account: &AccountNumber) -> bool {
        &self.account_number == account
    }
}
