//! Opens a logged-in store for commands that talk to the server.

use std::io::{self, Write};
use std::time::Duration;

use nideriji_core::{ApiClient, ApiError, DiaryStore, RequestConfig};

use crate::config::Config;

/// Errors that can occur while opening a session
#[derive(Debug)]
pub enum SessionError {
    /// I/O error while prompting
    IoError(io::Error),
    /// HTTP client could not be built
    ClientError(ApiError),
    /// Email or password was empty
    MissingCredentials,
    /// Server rejected the login or was unreachable
    LoginFailed,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::IoError(e) => write!(f, "I/O error: {}", e),
            SessionError::ClientError(e) => write!(f, "Client error: {}", e),
            SessionError::MissingCredentials => write!(f, "Email and password are required"),
            SessionError::LoginFailed => write!(
                f,
                "Login failed. Check your credentials and server_url (run with -v for details)."
            ),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<io::Error> for SessionError {
    fn from(e: io::Error) -> Self {
        SessionError::IoError(e)
    }
}

/// Builds an unauthenticated store from configuration.
pub fn build_store(config: &Config) -> Result<DiaryStore, SessionError> {
    let server_url = config.server_url.value.clone();
    tracing::debug!(
        "Using server {} ({})",
        server_url,
        config.server_url.source
    );
    let api = match config.timeout_secs {
        Some(secs) => ApiClient::with_connect_timeout(server_url, Duration::from_secs(secs))
            .map_err(SessionError::ClientError)?,
        None => ApiClient::new(server_url),
    };

    let mut request = RequestConfig::new(config.user_agent.value.clone());
    if let Some(origin) = &config.origin {
        request = request.with_origin(origin.clone());
    }

    Ok(DiaryStore::new(api, request))
}

/// Builds a store and logs in, prompting for any credential not configured.
pub async fn open(config: &Config) -> Result<DiaryStore, SessionError> {
    let email = match &config.account.email {
        Some(email) => email.clone(),
        None => prompt("Email: ")?,
    };
    let password = match &config.account.password {
        Some(password) => password.clone(),
        None => prompt("Password: ")?,
    };

    if email.is_empty() || password.is_empty() {
        return Err(SessionError::MissingCredentials);
    }

    let mut store = build_store(config)?;
    if !store.login(&email, &password).await {
        return Err(SessionError::LoginFailed);
    }

    Ok(store)
}

fn prompt(label: &str) -> Result<String, SessionError> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AccountConfig, ConfigSource, ConfigValue};
    use nideriji_core::SessionPhase;

    fn config(server_url: &str) -> Config {
        Config {
            server_url: ConfigValue::new(server_url.to_string(), ConfigSource::Default),
            user_agent: ConfigValue::new("test-agent".to_string(), ConfigSource::Default),
            origin: Some("https://nideriji.cn".to_string()),
            timeout_secs: Some(2),
            config_file: None,
            account: AccountConfig {
                email: Some("a@example.com".to_string()),
                password: Some(String::new()),
            },
        }
    }

    #[test]
    fn test_build_store_applies_request_config() {
        let store = build_store(&config("http://127.0.0.1:1")).unwrap();
        let request = store.request_config();
        assert_eq!(request.user_agent(), "test-agent");
        assert_eq!(request.origin(), Some("https://nideriji.cn"));
        assert_eq!(store.phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_open_rejects_empty_password() {
        let result = open(&config("http://127.0.0.1:1")).await;
        assert!(matches!(result, Err(SessionError::MissingCredentials)));
    }

    #[tokio::test]
    async fn test_open_reports_login_failure() {
        let mut config = config("http://127.0.0.1:1");
        config.account.password = Some("pw".to_string());

        let result = open(&config).await;
        assert!(matches!(result, Err(SessionError::LoginFailed)));
    }
}
