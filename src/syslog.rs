//! The `Syslog` facade: one transport, one selected message format.
//!
//! The facade owns a shared transport and, per configured format, a
//! formatter wired to it. `send` routes a message through the selected
//! formatter and out over the transport; with no format selected the
//! text is transmitted verbatim. The same transport can simultaneously
//! back formatters owned elsewhere; sharing is explicit aliasing via
//! `Arc`, and concurrent sends each open their own socket.

use std::sync::Arc;

use crate::cef::Cef;
use crate::error::SyslogError;
use crate::leef::Leef;
use crate::rfc3164::{Rfc3164, Rfc3164Options};
use crate::rfc5424::{Rfc5424, Rfc5424Options};
use crate::transport::{Transport, TransportConfig};

/// Message format the facade applies before transmitting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MessageFormat {
    /// Transmit the text verbatim.
    #[default]
    None,
    /// Legacy BSD syslog.
    Rfc3164,
    /// IETF syslog.
    Rfc5424,
    /// IBM LEEF 2.0.
    Leef,
    /// HP CEF 0.
    Cef,
}

/// A transport paired with at most one formatter of each kind.
#[derive(Debug, Default)]
pub struct Syslog {
    transport: Arc<Transport>,
    format: MessageFormat,
    rfc3164: Option<Rfc3164>,
    rfc5424: Option<Rfc5424>,
    leef: Option<Leef>,
    cef: Option<Cef>,
}

impl Syslog {
    /// A facade over a transport built from the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self {
            transport: Arc::new(Transport::new(config)),
            format: MessageFormat::default(),
            rfc3164: None,
            rfc5424: None,
            leef: None,
            cef: None,
        }
    }

    /// Select the message format, seeding a default formatter of that
    /// kind (wired to the shared transport) if none is present yet.
    pub fn with_format(mut self, format: MessageFormat) -> Self {
        self.format = format;
        match format {
            MessageFormat::None => {}
            MessageFormat::Rfc3164 => {
                if self.rfc3164.is_none() {
                    let mut formatter = Rfc3164::new();
                    formatter.share_transport(Arc::clone(&self.transport));
                    self.rfc3164 = Some(formatter);
                }
            }
            MessageFormat::Rfc5424 => {
                if self.rfc5424.is_none() {
                    let mut formatter = Rfc5424::new();
                    formatter.share_transport(Arc::clone(&self.transport));
                    self.rfc5424 = Some(formatter);
                }
            }
            MessageFormat::Leef => {
                if self.leef.is_none() {
                    let mut event = Leef::new();
                    event.share_transport(Arc::clone(&self.transport));
                    self.leef = Some(event);
                }
            }
            MessageFormat::Cef => {
                if self.cef.is_none() {
                    let mut event = Cef::new();
                    event.share_transport(Arc::clone(&self.transport));
                    self.cef = Some(event);
                }
            }
        }
        self
    }

    /// Install a caller-configured RFC 3164 formatter, sharing the
    /// facade's transport with it, and select that format.
    pub fn with_rfc3164(mut self, mut formatter: Rfc3164) -> Self {
        formatter.share_transport(Arc::clone(&self.transport));
        self.rfc3164 = Some(formatter);
        self.format = MessageFormat::Rfc3164;
        self
    }

    /// Install a caller-configured RFC 5424 formatter, sharing the
    /// facade's transport with it, and select that format.
    pub fn with_rfc5424(mut self, mut formatter: Rfc5424) -> Self {
        formatter.share_transport(Arc::clone(&self.transport));
        self.rfc5424 = Some(formatter);
        self.format = MessageFormat::Rfc5424;
        self
    }

    /// Install a caller-configured LEEF event, sharing the facade's
    /// transport with it, and select that format.
    pub fn with_leef(mut self, mut event: Leef) -> Self {
        event.share_transport(Arc::clone(&self.transport));
        self.leef = Some(event);
        self.format = MessageFormat::Leef;
        self
    }

    /// Install a caller-configured CEF event, sharing the facade's
    /// transport with it, and select that format.
    pub fn with_cef(mut self, mut event: Cef) -> Self {
        event.share_transport(Arc::clone(&self.transport));
        self.cef = Some(event);
        self.format = MessageFormat::Cef;
        self
    }

    /// The shared transport, for aliasing into formatters owned
    /// elsewhere.
    pub fn transport(&self) -> &Arc<Transport> {
        &self.transport
    }

    /// The selected message format.
    pub fn format(&self) -> MessageFormat {
        self.format
    }

    /// The installed RFC 3164 formatter, if any.
    pub fn rfc3164(&self) -> Option<&Rfc3164> {
        self.rfc3164.as_ref()
    }

    /// The installed RFC 5424 formatter, if any.
    pub fn rfc5424(&self) -> Option<&Rfc5424> {
        self.rfc5424.as_ref()
    }

    /// The installed LEEF event, if any.
    pub fn leef(&self) -> Option<&Leef> {
        self.leef.as_ref()
    }

    /// The installed CEF event, if any.
    pub fn cef(&self) -> Option<&Cef> {
        self.cef.as_ref()
    }

    /// Format `msg` with the selected formatter and transmit it,
    /// returning the exact text sent. `msg` is ignored by the LEEF and
    /// CEF formats, which build their text from their own fields.
    pub fn send(&self, msg: &str) -> Result<String, SyslogError> {
        match self.format {
            MessageFormat::None => self.transport.send(msg),
            MessageFormat::Rfc3164 => self
                .formatter(self.rfc3164.as_ref(), "rfc3164")?
                .send(msg, &Rfc3164Options::default()),
            MessageFormat::Rfc5424 => self
                .formatter(self.rfc5424.as_ref(), "rfc5424")?
                .send(msg, &Rfc5424Options::default()),
            MessageFormat::Leef => self.formatter(self.leef.as_ref(), "leef")?.send(None),
            MessageFormat::Cef => self.formatter(self.cef.as_ref(), "cef")?.send(None),
        }
    }

    fn formatter<'a, F>(&self, slot: Option<&'a F>, kind: &str) -> Result<&'a F, SyslogError> {
        slot.ok_or_else(|| SyslogError::Format(format!("no {kind} formatter configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_default_facade_transmits_verbatim() {
        let facade = Syslog::default();
        assert_eq!(facade.format(), MessageFormat::None);
        assert!(facade.rfc3164().is_none());
    }

    #[test]
    fn selecting_a_format_seeds_its_formatter() {
        let facade = Syslog::default().with_format(MessageFormat::Rfc5424);
        assert!(facade.rfc5424().is_some());
        assert!(facade.rfc3164().is_none());
    }

    #[test]
    fn installed_formatters_survive_format_selection() {
        let event = Leef::new().with_vendor("IBM");
        let facade = Syslog::default().with_leef(event);
        assert_eq!(facade.format(), MessageFormat::Leef);
        assert_eq!(facade.leef().unwrap().vendor, "IBM");
    }

    #[test]
    fn the_transport_is_shared_not_copied() {
        let facade = Syslog::default().with_format(MessageFormat::Rfc3164);
        // Facade plus the seeded formatter hold the same transport.
        assert!(Arc::strong_count(facade.transport()) >= 2);
    }
}
