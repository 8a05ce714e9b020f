//! IETF syslog (RFC 5424) message formatting.
//!
//! Builds one newline-terminated line per message:
//!
//! ```text
//! <PRI>1 TIMESTAMP HOSTNAME APPNAME PID MSGID STRUCTURED-DATA MESSAGE
//! ```
//!
//! The timestamp has four independently toggleable axes (present at all,
//! UTC or local, millisecond precision, trailing offset), structured
//! data elements are de-duplicated by SD-ID, and the message body can
//! carry the textual `BOM` marker advertising UTF-8 content.

use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use once_cell::sync::OnceCell;

use crate::color::{
    apply_color, ColorOverrides, ColorPalette, MessageColor, DEFAULT_MESSAGE_COLOR,
};
use crate::error::SyslogError;
use crate::severity::{priority, validate_severity, Severity, DEFAULT_FACILITY, DEFAULT_SEVERITY};
use crate::transport::Transport;
use crate::{local_hostname, strip_first_newline};

/// Configuration object describing how to construct an [`Rfc5424`]
/// formatter.
#[derive(Clone, Debug)]
pub struct Rfc5424Config {
    /// Hostname written into each message; defaults to the local host
    /// name.
    pub hostname: String,
    /// Application name written into each message.
    pub application_name: String,
    /// Render a timestamp at all; `false` writes the `-` nil value
    /// unless a message supplies its own timestamp.
    pub timestamp: bool,
    /// Render in UTC rather than local time.
    pub timestamp_utc: bool,
    /// Render milliseconds.
    pub timestamp_ms: bool,
    /// Render a trailing timezone offset.
    pub timestamp_tz: bool,
    /// Prefix message bodies with the textual `BOM` marker.
    pub utf8_bom: bool,
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

impl Default for Rfc5424Config {
    fn default() -> Self {
        Self {
            hostname: local_hostname(),
            application_name: String::new(),
            timestamp: true,
            timestamp_utc: true,
            timestamp_ms: true,
            timestamp_tz: true,
            utf8_bom: true,
            color: false,
            extended_color: false,
            colors: ColorOverrides::default(),
            transport: None,
        }
    }
}

/// Per-message overrides accepted by [`Rfc5424::build_message`].
#[derive(Clone, Debug, Default)]
pub struct Rfc5424Options {
    /// Severity 0-7; defaults to 6 (informational). Values above 7 are a
    /// `Format` error.
    pub severity: Option<u8>,
    /// Facility for this message; defaults to 23 (local7).
    pub facility: Option<u8>,
    /// PROCID field; defaults to the `-` nil value.
    pub pid: Option<String>,
    /// MSGID field; defaults to the `-` nil value.
    pub msg_id: Option<String>,
    /// Pre-formatted `[sd-id key=value ...]` elements. Elements sharing
    /// an SD-ID collapse to the first occurrence.
    pub structured_data: Vec<String>,
    /// Colour for this message when colouring is enabled.
    pub color: Option<MessageColor>,
    /// Timestamp to render instead of the current wall clock. Supplying
    /// one forces a timestamp even when the formatter has them disabled.
    pub timestamp: Option<DateTime<Local>>,
    /// Hostname override for this message.
    pub hostname: Option<String>,
    /// Application name override for this message.
    pub application_name: Option<String>,
}

/// RFC 5424 formatter with an owned-or-borrowed transport.
#[derive(Debug)]
pub struct Rfc5424 {
    hostname: String,
    application_name: String,
    timestamp: bool,
    timestamp_utc: bool,
    timestamp_ms: bool,
    timestamp_tz: bool,
    utf8_bom: bool,
    color: bool,
    palette: ColorPalette,
    transport: OnceCell<Arc<Transport>>,
}

impl Default for Rfc5424 {
    fn default() -> Self {
        Self::new()
    }
}

impl Rfc5424 {
    /// A formatter with default configuration: UTC millisecond
    /// timestamps with offsets, and the `BOM` marker on.
    pub fn new() -> Self {
        Self {
            hostname: local_hostname(),
            application_name: String::new(),
            timestamp: true,
            timestamp_utc: true,
            timestamp_ms: true,
            timestamp_tz: true,
            utf8_bom: true,
            color: false,
            palette: ColorPalette::new(false),
            transport: OnceCell::new(),
        }
    }

    /// Build a formatter from its configuration. Fails when a colour
    /// override does not encode.
    pub fn with_config(config: Rfc5424Config) -> Result<Self, SyslogError> {
        let mut palette = ColorPalette::new(config.extended_color);
        palette.set_colors(&config.colors)?;
        let transport = OnceCell::new();
        if let Some(shared) = config.transport {
            let _ = transport.set(shared);
        }
        Ok(Self {
            hostname: config.hostname,
            application_name: config.application_name,
            timestamp: config.timestamp,
            timestamp_utc: config.timestamp_utc,
            timestamp_ms: config.timestamp_ms,
            timestamp_tz: config.timestamp_tz,
            utf8_bom: config.utf8_bom,
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

    fn format_timestamp(&self, when: DateTime<Local>) -> String {
        let spec = match (self.timestamp_ms, self.timestamp_tz) {
            (true, true) => "%Y-%m-%dT%H:%M:%S%.3f%:z",
            (true, false) => "%Y-%m-%dT%H:%M:%S%.3f",
            (false, true) => "%Y-%m-%dT%H:%M:%S%:z",
            (false, false) => "%Y-%m-%dT%H:%M:%S",
        };
        if self.timestamp_utc {
            when.with_timezone(&Utc).format(spec).to_string()
        } else {
            when.format(spec).to_string()
        }
    }

    /// Build one formatted message. Pure: with an explicit timestamp the
    /// output is a function of its inputs alone.
    pub fn build_message(
        &self,
        msg: &str,
        options: &Rfc5424Options,
    ) -> Result<String, SyslogError> {
        let severity = validate_severity(options.severity.unwrap_or(DEFAULT_SEVERITY))?;
        let facility = options.facility.unwrap_or(DEFAULT_FACILITY);
        let pri = priority(facility, severity);

        let mut body = strip_first_newline(msg);
        if self.color {
            let color = options
                .color
                .clone()
                .unwrap_or(MessageColor::Code(DEFAULT_MESSAGE_COLOR));
            body = apply_color(&body, &color, self.palette.is_extended());
        }

        // A per-message timestamp wins over the formatter-level toggle.
        let timestamp = if self.timestamp || options.timestamp.is_some() {
            self.format_timestamp(options.timestamp.unwrap_or_else(Local::now))
        } else {
            "-".to_owned()
        };

        let hostname = options.hostname.as_deref().unwrap_or(&self.hostname);
        let application_name = options
            .application_name
            .as_deref()
            .unwrap_or(&self.application_name);
        let pid = options.pid.as_deref().unwrap_or("-");
        let msg_id = options.msg_id.as_deref().unwrap_or("-");
        let structured_data = collapse_structured_data(&options.structured_data);
        let bom = if self.utf8_bom { "BOM" } else { "" };

        Ok(format!(
            "<{pri}>1 {timestamp} {hostname} {application_name} {pid} {msg_id} {structured_data} {bom}{body}\n"
        ))
    }

    /// Build and transmit one message, returning the exact text sent.
    pub fn send(&self, msg: &str, options: &Rfc5424Options) -> Result<String, SyslogError> {
        let message = self.build_message(msg, options)?;
        self.transport().send(&message)
    }

    fn send_level(&self, severity: Severity, msg: &str) -> Result<String, SyslogError> {
        let options = Rfc5424Options {
            severity: Some(severity.code()),
            color: Some(MessageColor::Code(self.palette.color_for(severity))),
            ..Rfc5424Options::default()
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

/// Join structured-data elements, keeping only the first element for
/// each SD-ID, in original order. No elements, or none surviving, is the
/// `-` nil value.
fn collapse_structured_data(elements: &[String]) -> String {
    if elements.is_empty() {
        return "-".to_owned();
    }
    let mut seen: Vec<&str> = Vec::with_capacity(elements.len());
    let mut joined = String::new();
    for element in elements {
        let name = sd_element_name(element);
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);
        joined.push_str(element);
    }
    if joined.is_empty() {
        "-".to_owned()
    } else {
        joined
    }
}

/// The SD-ID of an element: the token following `[`, ended by a space or
/// the closing bracket.
fn sd_element_name(element: &str) -> &str {
    let inner = element.strip_prefix('[').unwrap_or(element);
    inner
        .split([' ', ']'])
        .next()
        .unwrap_or(inner)
}
