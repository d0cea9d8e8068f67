#![allow(clippy::multiple_crate_versions)]

use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

pub const APP_NAME: &str = "pixela";

/// Where the user token comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Token {
    Literal(String),
    Env { env: String },
    Cmd { cmd: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelaConfig {
    #[serde(default)]
    pub username: String,
    pub token: Token,
    /// Overrides `https://pixe.la`
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Graph used by commands that are given no graph id
    #[serde(default)]
    pub default_graph: Option<String>,
}

impl Default for PixelaConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            token: Token::Literal(String::new()),
            base_url: None,
            timeout_secs: None,
            default_graph: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PixelaConfigError {
    #[error("config error: {0}")]
    Confy(#[from] confy::ConfyError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("missing username in config; set `username` in the pixela config file")]
    MissingUsername,
    #[error("missing token in config; set `token` in the pixela config file")]
    MissingToken,
    #[error("environment variable '{env}' not found")]
    MissingEnv { env: String },
    #[error("token command failed: {cmd}: {message}")]
    CommandFailed { cmd: String, message: String },
    #[error("failed to execute token command '{cmd}': {source}")]
    CommandExec { cmd: String, source: io::Error },
    #[error("token command returned empty output: {cmd}")]
    CommandEmpty { cmd: String },
    #[error(
        "username and token required but stdin is not interactive; set them in {path} (example: username = \"alice\", token = {{ env = \"PIXELA_TOKEN\" }})",
        path = .path.display()
    )]
    NonInteractive { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, PixelaConfigError>;

impl PixelaConfig {
    /// Loads the config file from the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config file cannot be read or deserialized.
    pub fn load() -> Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Loads config or walks the user through entering username and token.
    ///
    /// # Errors
    /// Returns an error if the config cannot be loaded, the token cannot be
    /// resolved, or onboarding fails (including non-interactive stdin).
    pub fn load_or_onboard() -> Result<Self> {
        let config = Self::load()?;
        if config.is_complete()? {
            return Ok(config);
        }
        config.onboard()
    }

    /// Stores the config to the standard OS location.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn store(&self) -> Result<()> {
        confy::store(APP_NAME, None, self)?;
        Ok(())
    }

    /// Resolves the token from the configured source.
    ///
    /// # Errors
    /// Returns an error if the token cannot be resolved or is empty.
    pub fn token(&self) -> Result<String> {
        self.token.resolve()
    }

    /// # Errors
    /// Returns an error if no username is configured.
    pub fn username(&self) -> Result<String> {
        non_empty(&self.username).ok_or(PixelaConfigError::MissingUsername)
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// A literal empty token counts as missing; env and cmd sources must resolve.
    fn is_complete(&self) -> Result<bool> {
        if self.username.trim().is_empty() {
            return Ok(false);
        }
        if let Token::Literal(value) = &self.token {
            return Ok(!value.trim().is_empty());
        }
        self.token.resolve()?;
        Ok(true)
    }

    fn onboard(mut self) -> Result<Self> {
        let config_path = confy::get_configuration_file_path(APP_NAME, None)?;
        if !io::stdin().is_terminal() {
            return Err(PixelaConfigError::NonInteractive { path: config_path });
        }

        if !config_path.as_os_str().is_empty() {
            eprintln!(
                "Pixela config not found or incomplete. It will be stored at: {}",
                config_path.display()
            );
        }

        if self.username.trim().is_empty() {
            self.username = prompt("Enter your Pixela username: ")?
                .ok_or(PixelaConfigError::MissingUsername)?;
        }

        if matches!(&self.token, Token::Literal(value) if value.trim().is_empty()) {
            let token = prompt("Enter your Pixela token: ")?.ok_or(PixelaConfigError::MissingToken)?;
            self.token = Token::Literal(token);
        }

        self.store()?;
        Ok(self)
    }
}

fn prompt(message: &str) -> Result<Option<String>> {
    eprint!("{message}");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(non_empty(&input))
}

impl Token {
    fn resolve(&self) -> Result<String> {
        match self {
            Self::Literal(value) => non_empty(value).ok_or(PixelaConfigError::MissingToken),
            Self::Env { env } => {
                let value = std::env::var(env)
                    .map_err(|_| PixelaConfigError::MissingEnv { env: env.clone() })?;
                non_empty(&value).ok_or(PixelaConfigError::MissingToken)
            }
            Self::Cmd { cmd } => run_token_command(cmd),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn run_token_command(cmd: &str) -> Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(cmd)
        .output()
        .map_err(|source| PixelaConfigError::CommandExec {
            cmd: cmd.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(PixelaConfigError::CommandFailed {
            cmd: cmd.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    non_empty(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        PixelaConfigError::CommandEmpty {
            cmd: cmd.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{PixelaConfig, PixelaConfigError, Token};

    #[test]
    fn resolves_literal_token() {
        let token = Token::Literal(" literal ".to_string());
        assert_eq!(token.resolve().unwrap(), "literal");
    }

    #[test]
    fn resolves_env_token() {
        let var = format!("PIXELACONFIG_TEST_TOKEN_{}", std::process::id());
        std::env::set_var(&var, "envvalue");
        let token = Token::Env { env: var.clone() };
        assert_eq!(token.resolve().unwrap(), "envvalue");
        std::env::remove_var(&var);
    }

    #[test]
    fn missing_env_is_error() {
        let token = Token::Env {
            env: "PIXELACONFIG_SURELY_UNSET_VARIABLE".to_string(),
        };
        let err = token.resolve().unwrap_err();
        assert!(matches!(err, PixelaConfigError::MissingEnv { .. }));
    }

    #[test]
    fn resolves_cmd_token() {
        let token = Token::Cmd {
            cmd: "printf 'cmdvalue'".to_string(),
        };
        assert_eq!(token.resolve().unwrap(), "cmdvalue");
    }

    #[test]
    fn cmd_empty_output_is_error() {
        let token = Token::Cmd {
            cmd: "printf ''".to_string(),
        };
        let err = token.resolve().unwrap_err();
        assert!(matches!(err, PixelaConfigError::CommandEmpty { .. }));
    }

    #[test]
    fn literal_token_config_is_complete() {
        let config = PixelaConfig {
            username: "alice".to_string(),
            token: Token::Literal("secret".to_string()),
            timeout_secs: Some(10),
            ..PixelaConfig::default()
        };
        assert!(config.is_complete().unwrap());
        assert_eq!(config.username().unwrap(), "alice");
        assert_eq!(config.timeout(), Some(std::time::Duration::from_secs(10)));
    }

    #[test]
    fn default_config_is_incomplete() {
        let config = PixelaConfig::default();
        assert!(!config.is_complete().unwrap());
        assert!(matches!(
            config.username(),
            Err(PixelaConfigError::MissingUsername)
        ));
    }
}
