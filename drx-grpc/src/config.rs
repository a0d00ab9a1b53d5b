// drx_grpc/src/config.rs
use std::env;

pub const HOST_ENV: &str = "DECRYPTER_GRPC_HOST";
pub const PORT_ENV: &str = "DECRYPTER_GRPC_PORT";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 50051;

/// Where the decrypter service listens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecrypterConfig {
    pub host: String,
    pub port: u16,
}

impl DecrypterConfig {
    /// Reads the endpoint from the environment, falling back to
    /// `127.0.0.1:50051` for anything unset or unparseable.
    pub fn from_env() -> Self {
        let host = match env::var(HOST_ENV) {
            Ok(host) if !host.is_empty() => host,
            _ => {
                tracing::debug!("{HOST_ENV} not set, using {DEFAULT_HOST}");
                DEFAULT_HOST.to_string()
            }
        };
        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("{PORT_ENV}={raw} is not a valid port, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            Err(_) => {
                tracing::debug!("{PORT_ENV} not set, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };
        Self { host, port }
    }

    pub fn endpoint_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl Default for DecrypterConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_is_http() {
        let cfg = DecrypterConfig {
            host: "decrypter.internal".into(),
            port: 9000,
        };
        assert_eq!(cfg.endpoint_url(), "http://decrypter.internal:9000");
    }

    #[test]
    fn default_targets_localhost() {
        let cfg = DecrypterConfig::default();
        assert_eq!(cfg.endpoint_url(), "http://127.0.0.1:50051");
    }
}
