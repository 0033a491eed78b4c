//! Calling-account resolution.
//!
//! Accounts are given either as a `0x` address or as the index of a
//! development account. Development accounts are deterministic, so the
//! same index names the same address on every machine.

use ballot_types::Address;

/// Seed prefix for development accounts.
pub const DEV_ACCOUNT_SEED_PREFIX: &str = "ballot-dev-account-";

/// Address of development account `index`.
pub fn dev_account(index: u32) -> Address {
    Address::from_seed(format!("{}{}", DEV_ACCOUNT_SEED_PREFIX, index).as_bytes())
}

/// Parse an account given as `0x...` or as a dev account index.
pub fn resolve_account(account: &str) -> anyhow::Result<Address> {
    let account = account.trim();
    if account.starts_with("0x") || account.starts_with("0X") {
        return Ok(account.parse::<Address>()?);
    }
    match account.parse::<u32>() {
        Ok(index) => Ok(dev_account(index)),
        Err(_) => anyhow::bail!(
            "Invalid account '{}': expected a 0x address or a dev account index",
            account
        ),
    }
}
