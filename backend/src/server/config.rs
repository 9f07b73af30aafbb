//! Application configuration, environment-first with CLI overrides.

use std::net::SocketAddr;

use actix_web::cookie::Key;
use clap::Parser;
use tracing::warn;

/// Runtime configuration for the server binary.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Restaurant review service")]
pub struct AppConfig {
    /// Socket address to bind.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection URL. When unset the server runs on fixture
    /// ports and serves empty data, which is useful for smoke tests.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path to the session key file (at least 32 bytes of key material).
    #[arg(
        long,
        env = "SESSION_KEY_FILE",
        default_value = "/var/run/secrets/session_key"
    )]
    pub session_key_file: String,

    /// Allow minting an ephemeral session key when the key file is missing.
    /// Always allowed in debug builds.
    #[arg(long, env = "SESSION_ALLOW_EPHEMERAL")]
    pub session_allow_ephemeral: bool,

    /// Whether the session cookie requires HTTPS.
    #[arg(
        long,
        env = "SESSION_COOKIE_SECURE",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub cookie_secure: bool,

    /// Google OAuth client id; when set, federated tokens minted for other
    /// applications are rejected.
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,
}

impl AppConfig {
    /// Load the session signing key, falling back to an ephemeral key in
    /// development.
    pub fn load_session_key(&self) -> std::io::Result<Key> {
        match std::fs::read(&self.session_key_file) {
            Ok(bytes) => Ok(Key::derive_from(&bytes)),
            Err(e) => {
                if cfg!(debug_assertions) || self.session_allow_ephemeral {
                    warn!(
                        path = %self.session_key_file,
                        error = %e,
                        "using temporary session key (dev only)"
                    );
                    Ok(Key::generate())
                } else {
                    Err(std::io::Error::other(format!(
                        "failed to read session key at {}: {e}",
                        self.session_key_file
                    )))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_to_the_standard_port() {
        // DATABASE_URL and friends may leak in from the environment, so only
        // assert on flags this test pins explicitly.
        let config = AppConfig::parse_from(["backend", "--bind-addr", "0.0.0.0:8080"]);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::parse_from([
            "backend",
            "--bind-addr",
            "127.0.0.1:9000",
            "--database-url",
            "postgres://localhost/test",
            "--cookie-secure",
            "false",
        ]);
        assert_eq!(config.bind_addr.port(), 9000);
        assert!(config.database_url.is_some());
        assert!(!config.cookie_secure);
    }
}
