// Shared transport configuration for building reqwest::Client instances.

use std::path::PathBuf;
use std::time::Duration;

const USER_AGENT: &str = concat!("addressbook/", env!("CARGO_PKG_VERSION"));

/// TLS verification mode.
#[derive(Debug, Clone, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Config with the given request timeout and system TLS roots.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        if let TlsMode::CustomCa(path) = &self.tls {
            let cert_pem = std::fs::read(path).map_err(|e| {
                crate::error::Error::Tls(format!("failed to read CA cert {}: {e}", path.display()))
            })?;
            let cert = reqwest::Certificate::from_pem(&cert_pem)
                .map_err(|e| crate::error::Error::Tls(format!("invalid CA cert: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_thirty_second_timeout() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(matches!(config.tls, TlsMode::System));
    }

    #[test]
    fn builds_client_with_custom_timeout() {
        let config = TransportConfig::with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert!(config.build_client().is_ok());
    }

    #[test]
    fn missing_ca_file_is_reported() {
        let config = TransportConfig {
            tls: TlsMode::CustomCa(PathBuf::from("/nonexistent/ca.pem")),
            timeout: Duration::from_secs(1),
        };
        assert!(matches!(
            config.build_client(),
            Err(crate::error::Error::Tls(_))
        ));
    }
}
