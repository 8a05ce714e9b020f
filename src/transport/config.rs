//! Configuration consumed by [`Transport`](super::Transport).

use std::time::Duration;

/// Default collector host.
pub const DEFAULT_TARGET: &str = "localhost";
/// Default transport protocol.
pub const DEFAULT_PROTOCOL: &str = "udp";
/// Default syslog collector port.
pub const DEFAULT_PORT: u16 = 514;
/// Default deadline for TCP and TLS exchanges. UDP sends have no
/// deadline at all.
pub const DEFAULT_TCP_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Certificate or key material supplied by the caller.
///
/// TLS material is accepted as PEM text or raw DER bytes and is parsed
/// at send time; material that fails to parse fails the whole send with
/// a `Type` error naming the offending field.
#[derive(Clone, Debug)]
pub enum CertSource {
    /// PEM-armoured text.
    Pem(String),
    /// Raw DER bytes.
    Der(Vec<u8>),
}

impl From<&str> for CertSource {
    fn from(pem: &str) -> Self {
        CertSource::Pem(pem.to_owned())
    }
}

impl From<String> for CertSource {
    fn from(pem: String) -> Self {
        CertSource::Pem(pem)
    }
}

impl From<Vec<u8>> for CertSource {
    fn from(der: Vec<u8>) -> Self {
        CertSource::Der(der)
    }
}

/// Configuration object describing how to construct a
/// [`Transport`](super::Transport).
///
/// The protocol is carried as a free-form string and only validated when
/// a message is sent, so a config can be built first and adjusted later;
/// an unrecognised value turns into a `Format` error at send time,
/// before any resolver or socket work.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Hostname or IP address of the collector.
    pub target: String,
    /// Transport protocol: `udp`, `tcp`, or `tls` (case-insensitive).
    pub protocol: String,
    /// Collector port.
    pub port: u16,
    /// Deadline applied to TCP and TLS exchanges.
    pub tcp_timeout: Duration,
    /// Trust anchors for TLS server verification. Empty means the
    /// platform's default roots.
    pub tls_server_certs: Vec<CertSource>,
    /// Client certificate for mutual TLS; requires `tls_client_key`.
    pub tls_client_cert: Option<CertSource>,
    /// Client private key for mutual TLS; requires `tls_client_cert`.
    pub tls_client_key: Option<CertSource>,
    /// Verify the server certificate and hostname. On by default; turn
    /// off only against servers you control.
    pub reject_unauthorized: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_owned(),
            protocol: DEFAULT_PROTOCOL.to_owned(),
            port: DEFAULT_PORT,
            tcp_timeout: DEFAULT_TCP_TIMEOUT,
            tls_server_certs: Vec::new(),
            tls_client_cert: None,
            tls_client_key: None,
            reject_unauthorized: true,
        }
    }
}

impl TransportConfig {
    /// Override the collector host.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Override the protocol string.
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    /// Override the collector port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the TCP/TLS deadline.
    pub fn with_tcp_timeout(mut self, timeout: Duration) -> Self {
        self.tcp_timeout = timeout;
        self
    }

    /// Add one trusted server certificate.
    pub fn with_server_cert(mut self, cert: impl Into<CertSource>) -> Self {
        self.tls_server_certs.push(cert.into());
        self
    }

    /// Supply a mutual-TLS identity.
    pub fn with_client_identity(
        mut self,
        cert: impl Into<CertSource>,
        key: impl Into<CertSource>,
    ) -> Self {
        self.tls_client_cert = Some(cert.into());
        self.tls_client_key = Some(key.into());
        self
    }

    /// Toggle server certificate verification.
    pub fn with_reject_unauthorized(mut self, reject: bool) -> Self {
        self.reject_unauthorized = reject;
        self
    }
}
