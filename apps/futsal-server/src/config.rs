//! Layered server configuration.
//!
//! Sources, lowest to highest precedence: built-in defaults, the YAML file
//! given with `--config`, `FUTSAL__*` environment variables (`__` separates
//! nesting levels, e.g. `FUTSAL__DATABASE__DSN`), then CLI overrides.

use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use team_membership::config::TeamMembershipConfig;

pub const ENV_PREFIX: &str = "FUTSAL__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub team_membership: TeamMembershipConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub dsn: String,
    pub max_connections: u32,
    /// Apply pending migrations on startup.
    pub migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: "sqlite://futsal.db?mode=rwc".to_owned(),
            max_connections: 10,
            migrate: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret shared with the account service.
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then the environment.
    ///
    /// # Errors
    /// Fails when the file is missing or any source does not deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(port) = cli.port {
            let host = self
                .server
                .bind_addr
                .rsplit_once(':')
                .map_or("127.0.0.1", |(host, _)| host);
            self.server.bind_addr = format!("{host}:{port}");
        }
        match cli.verbose {
            0 => {}
            1 => self.logging.level = "info".to_owned(),
            2 => self.logging.level = "debug".to_owned(),
            _ => self.logging.level = "trace".to_owned(),
        }
        if cli.mock {
            self.database.dsn = "sqlite::memory:".to_owned();
            self.database.max_connections = 1;
        }
    }

    /// Reject configurations the server cannot run with.
    ///
    /// # Errors
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("auth.jwt_secret must be set");
        }
        if self.database.dsn.trim().is_empty() {
            bail!("database.dsn must be set");
        }
        let tm = &self.team_membership;
        if tm.min_review_comment_len > tm.max_review_comment_len {
            bail!(
                "team_membership.min_review_comment_len ({}) exceeds max_review_comment_len ({})",
                tm.min_review_comment_len,
                tm.max_review_comment_len
            );
        }
        Ok(())
    }

    /// Pretty JSON with the JWT secret masked.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_redacted_json(&self) -> Result<String> {
        let mut shown = self.clone();
        if !shown.auth.jwt_secret.is_empty() {
            shown.auth.jwt_secret = "***".to_owned();
        }
        serde_json::to_string_pretty(&shown).context("serialize configuration")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io::Write;

    use super::*;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::load(None).unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
        assert_eq!(cfg.team_membership.min_review_comment_len, 5);
        assert_eq!(cfg.team_membership.max_review_comment_len, 500);
    }

    #[test]
    fn yaml_overrides_defaults_and_keeps_the_rest() {
        let file = yaml_file(
            "server:\n  bind_addr: 0.0.0.0:9000\nteam_membership:\n  max_review_comment_len: 200\n",
        );
        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.team_membership.max_review_comment_len, 200);
        assert_eq!(cfg.team_membership.min_review_comment_len, 5);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/futsal.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn cli_overrides_port_verbosity_and_mock() {
        let mut cfg = AppConfig::default();
        cfg.apply_cli_overrides(&CliOverrides {
            port: Some(9999),
            verbose: 2,
            mock: true,
        });
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9999");
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.database.dsn, "sqlite::memory:");
    }

    #[test]
    fn validation_requires_secret_and_sane_bounds() {
        let mut cfg = AppConfig::default();
        assert!(cfg.validate().is_err());

        cfg.auth.jwt_secret = "s3cret".to_owned();
        assert!(cfg.validate().is_ok());

        cfg.team_membership.min_review_comment_len = 600;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn printed_config_hides_secret() {
        let mut cfg = AppConfig::default();
        cfg.auth.jwt_secret = "s3cret".to_owned();
        let json = cfg.to_redacted_json().unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("\"jwt_secret\": \"***\""));
    }
}
