//! Error taxonomy shared across the formatters and the transport.
//!
//! Errors split into four families: inputs of the wrong shape (`Type`),
//! values outside an accepted domain (`Format`), a TCP or TLS exchange
//! that outlived its deadline (`Timeout`), and anything the OS socket
//! layer or resolver reported (`Network`/`Tls`, passed through so the
//! caller sees the original diagnostic). Nothing in this crate retries
//! or swallows a failure; every error surfaces to the immediate caller.

use std::io;

use thiserror::Error;

use crate::transport::Protocol;

/// Errors produced while formatting or transmitting a message.
#[derive(Debug, Error)]
pub enum SyslogError {
    /// An input had the wrong shape, such as a colour override that is
    /// neither RGB hex nor an ANSI code, or TLS material that does not
    /// parse as a certificate or key. Raised before any I/O happens.
    #[error("type error: {0}")]
    Type(String),

    /// A value fell outside an accepted domain, such as a severity above
    /// 7, an unrecognised protocol string, or a CEF extension value that
    /// exceeds its schema length. Raised before any I/O happens.
    #[error("format error: {0}")]
    Format(String),

    /// A TCP or TLS send did not complete within the configured
    /// `tcp_timeout`. The socket is force-closed before this is returned.
    /// UDP sends never time out.
    #[error("syslog server {protocol} timeout")]
    Timeout { protocol: Protocol },

    /// A resolver or socket failure, passed through unwrapped.
    #[error(transparent)]
    Network(#[from] io::Error),

    /// A TLS configuration or handshake failure, passed through unwrapped.
    #[error(transparent)]
    Tls(#[from] native_tls::Error),
}

impl SyslogError {
    /// True when the error was raised before any network I/O was
    /// attempted.
    pub fn is_local(&self) -> bool {
        matches!(self, SyslogError::Type(_) | SyslogError::Format(_))
    }
}
