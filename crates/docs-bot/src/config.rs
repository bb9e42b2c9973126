//! Bot configuration and credential loading.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::command::DEFAULT_TRIGGER;
use crate::error::{BotError, Result};
use crate::supervisor::RetryPolicy;

/// Environment variable holding the Reddit API client id.
pub const ENV_CLIENT_ID: &str = "REDDIT_DOC_BOT_ID";
/// Environment variable holding the Reddit API client secret.
pub const ENV_CLIENT_SECRET: &str = "REDDIT_DOC_BOT_SECRET";
/// Environment variable holding the bot account name.
pub const ENV_USERNAME: &str = "REDDIT_DOC_BOT_USER";
/// Environment variable holding the bot account password.
pub const ENV_PASSWORD: &str = "REDDIT_DOC_BOT_PASSWORD";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!(
    "(docs-bot/",
    env!("CARGO_PKG_VERSION"),
    ") py_docs_bot - scanning comments in r/learnpython and replying with python documentation links"
);

/// Reddit script-app credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Layout of the credentials file.
///
/// ```toml
/// [reddit]
/// client_id = "..."
/// client_secret = "..."
/// username = "..."
/// password = "..."
/// ```
#[derive(Deserialize)]
struct CredentialsFile {
    reddit: Credentials,
}

impl Credentials {
    /// Load credentials from `path`, falling back to the environment.
    ///
    /// The file is used only if it parses and has all four values; otherwise
    /// all four environment variables must be set.
    pub fn load(path: &Path) -> Result<Self> {
        match Self::from_file(path) {
            Ok(credentials) => {
                debug!(path = %path.display(), "Loaded credentials from file");
                return Ok(credentials);
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "No usable credentials file");
            }
        }

        debug!("Checking environment variables for credentials");
        let credentials = Self::from_env().ok_or_else(|| BotError::MissingCredentials {
            file: path.to_path_buf(),
        })?;
        debug!("Credentials loaded from environment variables");
        Ok(credentials)
    }

    /// Read credentials from the `[reddit]` table of a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: CredentialsFile = toml::from_str(&content)?;
        Ok(file.reddit)
    }

    /// Read credentials from the four environment variables.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        Some(Self {
            client_id: lookup(ENV_CLIENT_ID)?,
            client_secret: lookup(ENV_CLIENT_SECRET)?,
            username: lookup(ENV_USERNAME)?,
            password: lookup(ENV_PASSWORD)?,
        })
    }
}

/// Runtime settings for the monitoring loop.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Subreddit whose comments are monitored.
    pub subreddit: String,
    /// Command token that starts a request line.
    pub trigger: String,
    /// Reference table location.
    pub datastore_path: PathBuf,
    /// Documentation host override; python.org when unset.
    pub docs_host: Option<String>,
    /// Credentials file location.
    pub credentials_path: PathBuf,
    /// Ignore comments that existed before the bot started.
    pub skip_existing: bool,
    /// Restart policy for the monitoring task.
    pub retry: RetryPolicy,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            subreddit: "learnpython".to_string(),
            trigger: DEFAULT_TRIGGER.to_string(),
            datastore_path: PathBuf::from("datastore/datastore.json"),
            docs_host: None,
            credentials_path: PathBuf::from("credentials.toml"),
            skip_existing: true,
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    const FILE: &str = r#"
[reddit]
client_id = "file-id"
client_secret = "file-secret"
username = "py_reference_bot"
password = "hunter2"
"#;

    fn clear_env() {
        for key in [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_USERNAME, ENV_PASSWORD] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, FILE).unwrap();

        let credentials = Credentials::from_file(&path).unwrap();
        assert_eq!(credentials.client_id, "file-id");
        assert_eq!(credentials.username, "py_reference_bot");
    }

    #[test]
    fn test_from_lookup_requires_all_values() {
        let mut vars = HashMap::from([
            (ENV_CLIENT_ID, "id"),
            (ENV_CLIENT_SECRET, "secret"),
            (ENV_USERNAME, "user"),
        ]);
        assert!(Credentials::from_lookup(|key| vars.get(key).map(ToString::to_string)).is_none());

        vars.insert(ENV_PASSWORD, "pw");
        let credentials =
            Credentials::from_lookup(|key| vars.get(key).map(ToString::to_string)).unwrap();
        assert_eq!(credentials.password, "pw");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            username: "user".to_string(),
            password: "pw".to_string(),
        };
        let debug = format!("{credentials:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret\""));
        assert!(!debug.contains("pw"));
    }

    #[test]
    #[serial]
    fn test_load_prefers_file() {
        clear_env();
        std::env::set_var(ENV_CLIENT_ID, "env-id");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, FILE).unwrap();

        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.client_id, "file-id");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_falls_back_to_env() {
        clear_env();
        std::env::set_var(ENV_CLIENT_ID, "env-id");
        std::env::set_var(ENV_CLIENT_SECRET, "env-secret");
        std::env::set_var(ENV_USERNAME, "env-user");
        std::env::set_var(ENV_PASSWORD, "env-pw");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        // Missing password: the whole file is ignored
        std::fs::write(&path, "[reddit]\nclient_id = \"file-id\"\n").unwrap();

        let credentials = Credentials::load(&path).unwrap();
        assert_eq!(credentials.client_id, "env-id");
        assert_eq!(credentials.password, "env-pw");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_without_any_source_fails() {
        clear_env();
        let err = Credentials::load(Path::new("/nonexistent/credentials.toml")).unwrap_err();
        assert!(matches!(err, BotError::MissingCredentials { .. }));
    }

    #[test]
    fn test_default_config() {
        let config = BotConfig::default();
        assert_eq!(config.subreddit, "learnpython");
        assert_eq!(config.trigger, "!docs");
        assert!(config.skip_existing);
        assert!(config.docs_host.is_none());
    }
}
