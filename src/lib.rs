//! Format log records as BSD syslog (RFC 3164), IETF syslog (RFC 5424),
//! IBM LEEF 2.0, or HP CEF 0 and deliver them to a remote collector over
//! UDP, TCP, or TLS.
//!
//! Formatting and delivery are deliberately separable: each formatter
//! exposes a pure `build_message` that returns the exact wire text, and
//! a `send` that pushes that text through a [`Transport`]. A transport
//! may be shared across formatters (explicit `Arc` aliasing) or created
//! lazily per formatter on first send. Every send is fire-and-forget:
//! one socket lifecycle, no pooling, no retries.
//!
//! ```no_run
//! use wirelog::{Rfc5424, Rfc5424Options};
//!
//! let syslog = Rfc5424::new();
//! let sent = syslog.send("service started", &Rfc5424Options::default())?;
//! assert!(sent.starts_with("<190>1 "));
//! # Ok::<(), wirelog::SyslogError>(())
//! ```

mod attributes;
pub mod cef;
pub mod color;
pub mod error;
pub mod leef;
pub mod rfc3164;
pub mod rfc5424;
pub mod severity;
pub mod syslog;
pub mod transport;

pub use cef::{Cef, CefKind, CefSeverity, CefValue};
pub use color::{encode_color, ColorOverrides, ColorPalette, ColorSpec, MessageColor};
pub use error::SyslogError;
pub use leef::Leef;
pub use rfc3164::{Rfc3164, Rfc3164Config, Rfc3164Options};
pub use rfc5424::{Rfc5424, Rfc5424Config, Rfc5424Options};
pub use severity::{priority, Severity, DEFAULT_FACILITY, DEFAULT_SEVERITY};
pub use syslog::{MessageFormat, Syslog};
pub use transport::{CertSource, Protocol, Transport, TransportConfig};

/// The local host name, falling back to `localhost` when the platform
/// will not say.
pub(crate) fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "localhost".to_owned())
}

/// Remove the first CR or LF character from a message body. Only the
/// first occurrence goes; embedded newlines after it are the caller's
/// business.
pub(crate) fn strip_first_newline(msg: &str) -> String {
    match msg.find(['\r', '\n']) {
        Some(index) => {
            let mut stripped = String::with_capacity(msg.len());
            stripped.push_str(&msg[..index]);
            stripped.push_str(&msg[index + 1..]);
            stripped
        }
        None => msg.to_owned(),
    }
}
