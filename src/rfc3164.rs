//! Legacy BSD syslog (RFC 3164) message formatting.
//!
//! Builds one newline-terminated line per message:
//!
//! ```text
//! <PRI>MMM dd HH:mm:ss HOSTNAME APPNAME MESSAGE
//! ```
//!
//! The BSD timestamp wants the day of month space-padded rather than
//! zero-padded, which chrono's `%e` produces directly. This format is a
//! logging stream: the severity convenience methods write repeated
//! messages through one formatter instance.

use std::sync::Arc;

use chrono::{DateTime, Local};
use once_cell::sync::OnceCell;

use crate::color::{
    apply_color, ColorOverrides, ColorPalette, MessageColor, DEFAULT_MESSAGE_COLOR,
};
use crate::error::SyslogError;
use crate::severity::{priority, validate_severity, Severity, DEFAULT_FACILITY, DEFAULT_SEVERITY};
use crate::transport::Transport;
use crate::{local_hostname, strip_first_newline};

/// Configuration object describing how to construct an [`Rfc3164`]
/// formatter.
#[derive(Clone, Debug)]
pub struct Rfc3164Config {
    /// Hostname written into each message; defaults to the local host
    /// name.
    pub hostname: String,
    /// Application name written into each message.
    pub application_name: String,
    /// Facility used for every message from this formatter.
    pub facility: u8,
    /// Wrap message bodies in ANSI colour escapes.
    pub color: bool,
    /// Use the extended 256-colour palette instead of the 8-colour one.
    pub extended_color: bool,
    /// Per-severity colour overrides applied at construction.
    pub colors: ColorOverrides,
    /// A transport shared with other formatters. When absent, a default
    /// UDP transport to localhost:514 is created on first send.
    pub transport: Option<Arc<Transport>>,
}

impl Default for Rfc3164Config {
    fn default() -> Self {
        Self {
            hostname: local_hostname(),
            application_name: String::new(),
            facility: DEFAULT_FACILITY,
            color: false,
            extended_color: false,
            colors: ColorOverrides::default(),
            transport: None,
        }
    }
}

/// Per-message overrides accepted by [`Rfc3164::build_message`].
#[derive(Clone, Debug, Default)]
pub struct Rfc3164Options {
    /// Severity 0-7; defaults to 6 (informational). Values above 7 are a
    /// `Format` error.
    pub severity: Option<u8>,
    /// Colour for this message when colouring is enabled.
    pub color: Option<MessageColor>,
    /// Timestamp to render instead of the current wall clock.
    pub timestamp: Option<DateTime<Local>>,
    /// Hostname override for this message.
    pub hostname: Option<String>,
    /// Application name override for this message.
    pub application_name: Option<String>,
}

/// RFC 3164 formatter with an owned-or-borrowed transport.
#[derive(Debug)]
pub struct Rfc3164 {
    hostname: String,
    application_name: String,
    facility: u8,
    color: bool,
    palette: ColorPalette,
    transport: OnceCell<Arc<Transport>>,
}

impl Default for Rfc3164 {
    fn default() -> Self {
        Self::new()
    }
}

impl Rfc3164 {
    /// A formatter with default configuration.
    pub fn new() -> Self {
        Self {
            hostname: local_hostname(),
            application_name: String::new(),
            facility: DEFAULT_FACILITY,
            color: false,
            palette: ColorPalette::new(false),
            transport: OnceCell::new(),
        }
    }

    /// Build a formatter from its configuration. Fails when a colour
    /// override does not encode.
    pub fn with_config(config: Rfc3164Config) -> Result<Self, SyslogError> {
        let mut palette = ColorPalette::new(config.extended_color);
        palette.set_colors(&config.colors)?;
        let transport = OnceCell::new();
        if let Some(shared) = config.transport {
            let _ = transport.set(shared);
        }
        Ok(Self {
            hostname: config.hostname,
            application_name: config.application_name,
            facility: config.facility,
            color: config.color,
            palette,
            transport,
        })
    }

    /// The per-severity palette in use.
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Re-colour severities after construction. The same partial-apply
    /// contract as [`ColorPalette::set_colors`] applies.
    pub fn set_colors(&mut self, overrides: &ColorOverrides) -> Result<(), SyslogError> {
        self.palette.set_colors(overrides)
    }

    /// Borrow a transport shared with other formatters. No-op when this
    /// formatter already has one.
    pub fn share_transport(&mut self, transport: Arc<Transport>) {
        let _ = self.transport.set(transport);
    }

    fn transport(&self) -> &Arc<Transport> {
        self.transport.get_or_init(|| Arc::new(Transport::default()))
    }

    /// Build one formatted message. Pure: with an explicit timestamp the
    /// output is a function of its inputs alone.
    pub fn build_message(
        &self,
        msg: &str,
        options: &Rfc3164Options,
    ) -> Result<String, SyslogError> {
        let severity = validate_severity(options.severity.unwrap_or(DEFAULT_SEVERITY))?;
        let pri = priority(self.facility, severity);

        let mut body = strip_first_newline(msg);
        if self.color {
            let color = options
                .color
                .clone()
                .unwrap_or(MessageColor::Code(DEFAULT_MESSAGE_COLOR));
            body = apply_color(&body, &color, self.palette.is_extended());
        }

        let when = options.timestamp.unwrap_or_else(Local::now);
        let timestamp = when.format("%b %e %H:%M:%S").to_string();
        let hostname = options.hostname.as_deref().unwrap_or(&self.hostname);
        let application_name = options
            .application_name
            .as_deref()
            .unwrap_or(&self.application_name);

        Ok(format!(
            "<{pri}>{timestamp} {hostname} {application_name} {body}\n"
        ))
    }

    /// Build and transmit one message, returning the exact text sent.
    pub fn send(&self, msg: &str, options: &Rfc3164Options) -> Result<String, SyslogError> {
        let message = self.build_message(msg, options)?;
        self.transport().send(&message)
    }

    fn send_level(&self, severity: Severity, msg: &str) -> Result<String, SyslogError> {
        let options = Rfc3164Options {
            severity: Some(severity.code()),
            color: Some(MessageColor::Code(self.palette.color_for(severity))),
            ..Rfc3164Options::default()
        };
        self.send(msg, &options)
    }

    /// Send at severity 0 (emergency).
    pub fn emergency(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Emergency, msg)
    }

    /// Send at severity 1 (alert).
    pub fn alert(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Alert, msg)
    }

    /// Send at severity 2 (critical).
    pub fn critical(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Critical, msg)
    }

    /// Send at severity 3 (error).
    pub fn error(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Error, msg)
    }

    /// Send at severity 4 (warning).
    pub fn warning(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Warning, msg)
    }

    /// Send at severity 5 (notice).
    pub fn notice(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Notice, msg)
    }

    /// Send at severity 6 (informational).
    pub fn informational(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Informational, msg)
    }

    /// Send at severity 6 (informational).
    pub fn info(&self, msg: &str) -> Result<String, SyslogError> {
        self.informational(msg)
    }

    /// Send at severity 7 (debug).
    pub fn debug(&self, msg: &str) -> Result<String, SyslogError> {
        self.send_level(Severity::Debug, msg)
    }
}
