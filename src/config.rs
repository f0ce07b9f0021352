//! Runtime configuration, read from flags, the environment and `.env`.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use chrono::Duration;
use clap::Args;

use crate::auth::TokenSettings;

pub const DEFAULT_BN_BASE_URL: &str = "https://data.bn.org.pl";

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    #[arg(long, env = "LIBRARIUM_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "LIBRARIUM_PORT", default_value_t = 5000)]
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct StoreConfig {
    /// Snapshot file. The store is memory-only when unset.
    #[arg(long, env = "LIBRARIUM_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

impl StoreConfig {
    /// The snapshot file for commands whose writes must outlive the process.
    pub fn require_data_file(&self, command: &str) -> anyhow::Result<&Path> {
        self.data_file.as_deref().ok_or_else(|| {
            anyhow::anyhow!("`{command}` needs a data file: set --data-file or LIBRARIUM_DATA_FILE")
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct AuthConfig {
    #[arg(long, env = "LIBRARIUM_ACCESS_TOKEN_TTL_SECS", default_value_t = 900)]
    pub access_token_ttl_secs: i64,

    #[arg(long, env = "LIBRARIUM_REFRESH_TOKEN_TTL_SECS", default_value_t = 604_800)]
    pub refresh_token_ttl_secs: i64,

    /// Admin account created on startup if no user has this email.
    #[arg(long, env = "LIBRARIUM_ADMIN_EMAIL")]
    pub admin_email: Option<String>,

    #[arg(long, env = "LIBRARIUM_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,
}

impl AuthConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            access_ttl: Duration::seconds(self.access_token_ttl_secs),
            refresh_ttl: Duration::seconds(self.refresh_token_ttl_secs),
        }
    }

    /// Both admin credentials, when configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        match (&self.admin_email, &self.admin_password) {
            (Some(email), Some(password)) => Some((email, password)),
            _ => None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScraperConfig {
    #[arg(long, env = "LIBRARIUM_BN_BASE_URL", default_value = DEFAULT_BN_BASE_URL)]
    pub bn_base_url: String,

    /// Records requested per page.
    #[arg(long, env = "LIBRARIUM_BN_PAGE_LIMIT", default_value_t = 100)]
    pub page_limit: u32,

    /// Stop after this many pages. Follows the cursor to the end when unset.
    #[arg(long, env = "LIBRARIUM_BN_MAX_PAGES")]
    pub max_pages: Option<usize>,
}

impl ScraperConfig {
    /// First page of the book catalogue.
    pub fn start_url(&self) -> String {
        format!(
            "{}/api/institutions/bibs.json?kind=ksi%C4%85%C5%BCka&limit={}",
            self.bn_base_url.trim_end_matches('/'),
            self.page_limit
        )
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            bn_base_url: DEFAULT_BN_BASE_URL.to_string(),
            page_limit: 100,
            max_pages: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        server: ServerConfig,
        #[command(flatten)]
        auth: AuthConfig,
        #[command(flatten)]
        scraper: ScraperConfig,
    }

    #[test]
    fn data_file_can_be_required() {
        let memory_only = StoreConfig::default();
        let err = memory_only.require_data_file("scrape").unwrap_err();
        assert!(err.to_string().contains("LIBRARIUM_DATA_FILE"));

        let on_disk = StoreConfig {
            data_file: Some(PathBuf::from("/var/lib/librarium/store.bin")),
        };
        assert_eq!(
            on_disk.require_data_file("scrape").unwrap(),
            Path::new("/var/lib/librarium/store.bin")
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cli = TestCli::parse_from([
            "librarium",
            "--port",
            "8080",
            "--access-token-ttl-secs",
            "60",
            "--admin-email",
            "root@example.com",
            "--admin-password",
            "password1",
            "--max-pages",
            "3",
        ]);
        assert_eq!(cli.server.addr().port(), 8080);
        assert_eq!(cli.auth.token_settings().access_ttl, Duration::seconds(60));
        assert_eq!(
            cli.auth.admin_credentials(),
            Some(("root@example.com", "password1"))
        );
        assert_eq!(cli.scraper.max_pages, Some(3));
    }

    #[test]
    fn admin_needs_both_credentials() {
        let auth = AuthConfig {
            access_token_ttl_secs: 900,
            refresh_token_ttl_secs: 604_800,
            admin_email: Some("root@example.com".into()),
            admin_password: None,
        };
        assert_eq!(auth.admin_credentials(), None);
    }

    #[test]
    fn start_url_uses_page_limit() {
        let scraper = ScraperConfig {
            bn_base_url: "http://localhost:9000/".into(),
            page_limit: 5,
            max_pages: None,
        };
        assert_eq!(
            scraper.start_url(),
            "http://localhost:9000/api/institutions/bibs.json?kind=ksi%C4%85%C5%BCka&limit=5"
        );
    }
}
