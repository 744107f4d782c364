use anyhow::{Context, Result};
use keyring::Entry;

/// Keychain service the board's admin password is filed under
const SERVICE_NAME: &str = "scorecast";

/// Admin credentials in the OS keychain, so silent re-login works
/// across restarts without the password ever touching a config file.
pub struct CredentialStore;

impl CredentialStore {
    fn entry(username: &str) -> Result<Entry> {
        Entry::new(SERVICE_NAME, username).context("Failed to open keyring entry")
    }

    pub fn store(username: &str, password: &str) -> Result<()> {
        Self::entry(username)?
            .set_password(password)
            .context("Failed to store password in keychain")
    }

    pub fn get_password(username: &str) -> Result<String> {
        Self::entry(username)?
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    pub fn delete(username: &str) -> Result<()> {
        Self::entry(username)?
            .delete_credential()
            .context("Failed to delete credential from keychain")
    }

    pub fn has_credentials(username: &str) -> bool {
        Self::entry(username)
            .map(|e| e.get_password().is_ok())
            .unwrap_or(false)
    }
}
