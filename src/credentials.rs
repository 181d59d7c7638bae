//! Credential resolution for the packagecloud API.
//!
//! The token is looked up in a fixed order: explicit argument, the
//! `PACKAGECLOUD_TOKEN` environment variable, then the `~/.packagecloud`
//! JSON file. The first source that yields a token wins and later sources
//! are never consulted. The credentials file may also override the base URL.

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Base URL for packagecloud itself. Package action URLs returned by the
/// server are relative to it, and the REST API lives under `api/v1`.
pub const SERVICE_BASE_URL: &str = "https://packagecloud.io/";

/// Environment variable holding the API token override.
pub const TOKEN_ENV_VAR: &str = "PACKAGECLOUD_TOKEN";

/// Name of the per-user credentials file, located in the home directory.
pub const CREDENTIALS_FILE_NAME: &str = ".packagecloud";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("PACKAGECLOUD_TOKEN unset and no credentials file found")]
    MissingToken,
    #[error("failed to resolve the user home directory")]
    FailedToFindHomeDirectory,
    #[error("failed to read credentials file, because of: {cause:?}")]
    FailedToReadFile { cause: std::io::Error },
    #[error("failed to parse credentials file, because of: {cause:?}")]
    FailedToParseFile { cause: serde_json::Error },
}

/// A resolved (base URL, token) pair. Built once per invocation; the token
/// is never logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}

impl Credentials {
    /// Resolves credentials from the standard sources, trying the explicit
    /// `token` argument first.
    pub fn resolve(token: Option<&str>) -> Result<Credentials, CredentialError> {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        let file_path = Credentials::default_credentials_file_path()?;
        Credentials::resolve_from(token, env_token.as_deref(), &file_path)
    }

    /// Path of the per-user credentials file: `~/.packagecloud`.
    pub fn default_credentials_file_path() -> Result<PathBuf, CredentialError> {
        match home_dir() {
            Some(mut path) => {
                path.push(CREDENTIALS_FILE_NAME);
                Ok(path)
            }
            None => Err(CredentialError::FailedToFindHomeDirectory),
        }
    }

    fn resolve_from(
        token: Option<&str>,
        env_token: Option<&str>,
        file_path: &Path,
    ) -> Result<Credentials, CredentialError> {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            return Ok(Credentials::with_default_url(token));
        }

        if let Some(token) = env_token.filter(|t| !t.is_empty()) {
            debug!("using token from the {} environment variable", TOKEN_ENV_VAR);
            return Ok(Credentials::with_default_url(token));
        }

        if file_path.exists() {
            debug!("reading credentials from {}", file_path.display());
            let contents = fs::read_to_string(file_path)
                .map_err(|cause| CredentialError::FailedToReadFile { cause })?;
            return serde_json::from_str(&contents)
                .map_err(|cause| CredentialError::FailedToParseFile { cause });
        }

        Err(CredentialError::MissingToken)
    }

    fn with_default_url(token: &str) -> Credentials {
        Credentials {
            url: SERVICE_BASE_URL.to_string(),
            token: token.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_credentials_file(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join(CREDENTIALS_FILE_NAME);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn explicit_token_wins_over_all_other_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials_file(&dir, r#"{"url":"https://example.com/","token":"from-file"}"#);

        let credentials =
            Credentials::resolve_from(Some("explicit"), Some("from-env"), &path).unwrap();
        assert_eq!(credentials.token, "explicit");
        assert_eq!(credentials.url, SERVICE_BASE_URL);
    }

    #[test]
    fn environment_token_wins_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials_file(&dir, r#"{"url":"https://example.com/","token":"from-file"}"#);

        let credentials = Credentials::resolve_from(None, Some("from-env"), &path).unwrap();
        assert_eq!(credentials.token, "from-env");
        assert_eq!(credentials.url, SERVICE_BASE_URL);
    }

    #[test]
    fn empty_tokens_fall_through_to_the_next_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials_file(&dir, r#"{"url":"https://example.com/","token":"from-file"}"#);

        let credentials = Credentials::resolve_from(Some(""), Some(""), &path).unwrap();
        assert_eq!(credentials.token, "from-file");
        assert_eq!(credentials.url, "https://example.com/");
    }

    #[test]
    fn file_overrides_the_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials_file(
            &dir,
            r#"{"url":"https://packages.internal.example.com/","token":"s3cret"}"#,
        );

        let credentials = Credentials::resolve_from(None, None, &path).unwrap();
        assert_eq!(credentials.url, "https://packages.internal.example.com/");
        assert_eq!(credentials.token, "s3cret");
    }

    #[test]
    fn missing_all_sources_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CREDENTIALS_FILE_NAME);

        let error = Credentials::resolve_from(None, None, &path).unwrap_err();
        assert!(matches!(error, CredentialError::MissingToken));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials_file(&dir, "not json");

        let error = Credentials::resolve_from(None, None, &path).unwrap_err();
        assert!(matches!(error, CredentialError::FailedToParseFile { .. }));
    }
}
