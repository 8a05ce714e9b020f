//! Message delivery over UDP, TCP, or TLS.
//!
//! A [`Transport`] carries a target, a protocol string, and the TLS
//! material needed for secured sends. Every [`Transport::send`] call is
//! one complete socket lifecycle: resolve the target, open a socket of
//! the matching address family, write the payload, and close. Nothing is
//! pooled, reused, or retried; concurrent sends through one shared
//! transport each open their own socket.

mod config;
mod tls;


pub use config::{
    CertSource, TransportConfig, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TARGET,
    DEFAULT_TCP_TIMEOUT,
};

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Ipv4Addr, Ipv6Addr, Shutdown, SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::str::FromStr;
use std::time::Duration;

use native_tls::HandshakeError;

use crate::error::SyslogError;

use tls::TlsSettings;

/// Wire protocols the transport can speak, parsed from the config's
/// protocol string once per send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Udp,
    Tcp,
    Tls,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::Udp => "udp",
            Protocol::Tcp => "tcp",
            Protocol::Tls => "tls",
        };
        f.write_str(name)
    }
}

impl FromStr for Protocol {
    type Err = SyslogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "udp" => Ok(Protocol::Udp),
            "tcp" => Ok(Protocol::Tcp),
            "tls" => Ok(Protocol::Tls),
            _ => Err(SyslogError::Format(
                "protocol not recognized, should be udp|tcp|tls".into(),
            )),
        }
    }
}

/// A fire-and-forget message sender.
///
/// A transport is cheap to share behind an `Arc`: it holds only
/// configuration, so concurrent sends never contend on anything.
#[derive(Debug)]
pub struct Transport {
    target: String,
    protocol: String,
    port: u16,
    tcp_timeout: Duration,
    tls: TlsSettings,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport {
    /// Build a transport from its configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            target: config.target,
            protocol: config.protocol,
            port: config.port,
            tcp_timeout: config.tcp_timeout,
            tls: TlsSettings {
                server_certs: config.tls_server_certs,
                client_cert: config.tls_client_cert,
                client_key: config.tls_client_key,
                reject_unauthorized: config.reject_unauthorized,
            },
        }
    }

    /// The collector host this transport targets.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The collector port this transport targets.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Deliver one formatted message, returning the exact text that was
    /// transmitted.
    ///
    /// The protocol string is validated first; an unrecognised value
    /// fails with a `Format` error before any resolver or socket work.
    /// Resolution takes the first address the system resolver returns
    /// and the socket family follows that address; there is no v4/v6
    /// fallback. TCP and TLS sends write the payload, half-close, and
    /// wait for the collector to close; UDP sends complete as soon as
    /// the datagram is queued.
    pub fn send(&self, msg: &str) -> Result<String, SyslogError> {
        let protocol: Protocol = self.protocol.parse()?;
        let addr = self.resolve()?;
        log::debug!(
            "sending {} bytes to {addr} over {protocol}",
            msg.len()
        );
        match protocol {
            Protocol::Udp => self.send_udp(msg, addr),
            Protocol::Tcp => self.send_tcp(msg, addr),
            Protocol::Tls => self.send_tls(msg, addr),
        }
    }

    fn resolve(&self) -> Result<SocketAddr, SyslogError> {
        let mut addrs = (self.target.as_str(), self.port).to_socket_addrs()?;
        addrs.next().ok_or_else(|| {
            SyslogError::Network(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no addresses found for {}", self.target),
            ))
        })
    }

    fn send_udp(&self, msg: &str, addr: SocketAddr) -> Result<String, SyslogError> {
        let bind_addr: SocketAddr = if addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(bind_addr)?;
        socket.send_to(msg.as_bytes(), addr)?;
        Ok(msg.to_owned())
    }

    fn send_tcp(&self, msg: &str, addr: SocketAddr) -> Result<String, SyslogError> {
        let mut stream = TcpStream::connect_timeout(&addr, self.tcp_timeout)
            .map_err(|err| timeout_or_network(err, Protocol::Tcp))?;
        stream.set_write_timeout(Some(self.tcp_timeout))?;
        stream.set_read_timeout(Some(self.tcp_timeout))?;
        stream
            .write_all(msg.as_bytes())
            .map_err(|err| timeout_or_network(err, Protocol::Tcp))?;
        stream.shutdown(Shutdown::Write)?;
        if let Err(err) = wait_for_close(&mut stream, Protocol::Tcp) {
            let _ = stream.shutdown(Shutdown::Both);
            return Err(err);
        }
        Ok(msg.to_owned())
    }

    fn send_tls(&self, msg: &str, addr: SocketAddr) -> Result<String, SyslogError> {
        let connector = self.tls.connector()?;
        let stream = TcpStream::connect_timeout(&addr, self.tcp_timeout)
            .map_err(|err| timeout_or_network(err, Protocol::Tls))?;
        stream.set_write_timeout(Some(self.tcp_timeout))?;
        stream.set_read_timeout(Some(self.tcp_timeout))?;
        let mut stream = match connector.connect(&self.target, stream) {
            Ok(stream) => stream,
            Err(HandshakeError::Failure(err)) => return Err(SyslogError::Tls(err)),
            // A blocking handshake only yields WouldBlock when a socket
            // timeout fired mid-handshake.
            Err(HandshakeError::WouldBlock(_)) => {
                return Err(SyslogError::Timeout {
                    protocol: Protocol::Tls,
                });
            }
        };
        stream
            .write_all(msg.as_bytes())
            .map_err(|err| timeout_or_network(err, Protocol::Tls))?;
        stream
            .shutdown()
            .map_err(|err| timeout_or_network(err, Protocol::Tls))?;
        if let Err(err) = wait_for_close(&mut stream, Protocol::Tls) {
            let _ = stream.get_ref().shutdown(Shutdown::Both);
            return Err(err);
        }
        Ok(msg.to_owned())
    }
}

/// Drain the stream until the peer closes it, mapping a socket timeout
/// onto the transport's `Timeout` error.
fn wait_for_close<S: Read>(stream: &mut S, protocol: Protocol) -> Result<(), SyslogError> {
    let mut scratch = [0u8; 256];
    loop {
        match stream.read(&mut scratch) {
            Ok(0) => return Ok(()),
            Ok(_) => continue,
            Err(err) => return Err(timeout_or_network(err, protocol)),
        }
    }
}

fn timeout_or_network(err: io::Error, protocol: Protocol) -> SyslogError {
    // Read/write deadlines surface as WouldBlock on Unix and TimedOut on
    // Windows; both mean the peer outlived `tcp_timeout`.
    if matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    ) {
        SyslogError::Timeout { protocol }
    } else {
        SyslogError::Network(err)
    }
}
