//! HP CEF (Common Event Format) event formatting and validation.
//!
//! A CEF event is a pipe-delimited header followed by space-separated
//! `key=value` extensions:
//!
//! ```text
//! CEF:0|vendor|product|version|classId|name|severity|key=value key=value
//! ```
//!
//! Unlike LEEF, CEF publishes an extension dictionary; [`Cef::validate`]
//! checks every dictionary-known extension against its declared kind and
//! length and stops at the first violation. Keys outside the dictionary
//! pass untouched, as vendor-specific extensions are allowed. This is a
//! single-shot event format, not a logging stream.

mod schema;

pub use schema::{lookup as schema_lookup, CefKind, ExtensionSpec};

use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::attributes::AttributeMap;
use crate::error::SyslogError;
use crate::transport::{Transport, TransportConfig};

/// Header value used when the caller supplies nothing.
const DEFAULT_HEADER_FIELD: &str = "Unknown";

/// Severity labels the CEF header accepts.
const SEVERITY_NAMES: [&str; 5] = ["Unknown", "Low", "Medium", "High", "Very-High"];

/// Event severity: one of the five canonical labels, or a number from
/// 0 to 10.
#[derive(Clone, Debug, PartialEq)]
pub enum CefSeverity {
    Name(String),
    Level(f64),
}

impl Default for CefSeverity {
    fn default() -> Self {
        CefSeverity::Name(DEFAULT_HEADER_FIELD.to_owned())
    }
}

impl fmt::Display for CefSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefSeverity::Name(name) => f.write_str(name),
            CefSeverity::Level(level) => write!(f, "{level}"),
        }
    }
}

impl From<&str> for CefSeverity {
    fn from(name: &str) -> Self {
        CefSeverity::Name(name.to_owned())
    }
}

impl From<f64> for CefSeverity {
    fn from(level: f64) -> Self {
        CefSeverity::Level(level)
    }
}

impl From<u8> for CefSeverity {
    fn from(level: u8) -> Self {
        CefSeverity::Level(f64::from(level))
    }
}

/// A CEF extension value: the dictionary distinguishes strings from
/// numbers, nothing finer.
#[derive(Clone, Debug, PartialEq)]
pub enum CefValue {
    Str(String),
    Num(f64),
}

impl fmt::Display for CefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CefValue::Str(text) => f.write_str(text),
            CefValue::Num(number) => write!(f, "{number}"),
        }
    }
}

impl From<&str> for CefValue {
    fn from(text: &str) -> Self {
        CefValue::Str(text.to_owned())
    }
}

impl From<String> for CefValue {
    fn from(text: String) -> Self {
        CefValue::Str(text)
    }
}

impl From<f64> for CefValue {
    fn from(number: f64) -> Self {
        CefValue::Num(number)
    }
}

impl From<i64> for CefValue {
    fn from(number: i64) -> Self {
        CefValue::Num(number as f64)
    }
}

impl From<u16> for CefValue {
    fn from(number: u16) -> Self {
        CefValue::Num(f64::from(number))
    }
}

/// CEF 0 event builder with an owned-or-borrowed transport.
#[derive(Debug)]
pub struct Cef {
    /// Vendor of the device reporting the event.
    pub device_vendor: String,
    /// Product of the device reporting the event.
    pub device_product: String,
    /// Version of the device reporting the event.
    pub device_version: String,
    /// Event class identifier.
    pub device_event_class_id: String,
    /// Human-readable event name.
    pub name: String,
    /// Event severity.
    pub severity: CefSeverity,
    extensions: AttributeMap<CefValue>,
    transport: OnceCell<Arc<Transport>>,
}

impl Default for Cef {
    fn default() -> Self {
        Self::new()
    }
}

impl Cef {
    /// An event with header fields of `Unknown` and the dictionary
    /// extensions seeded but unset.
    pub fn new() -> Self {
        let template: Vec<&str> = schema::template_names().collect();
        Self {
            device_vendor: DEFAULT_HEADER_FIELD.to_owned(),
            device_product: DEFAULT_HEADER_FIELD.to_owned(),
            device_version: DEFAULT_HEADER_FIELD.to_owned(),
            device_event_class_id: DEFAULT_HEADER_FIELD.to_owned(),
            name: DEFAULT_HEADER_FIELD.to_owned(),
            severity: CefSeverity::default(),
            extensions: AttributeMap::from_template(&template),
            transport: OnceCell::new(),
        }
    }

    /// Override the device vendor header field.
    pub fn with_device_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.device_vendor = vendor.into();
        self
    }

    /// Override the device product header field.
    pub fn with_device_product(mut self, product: impl Into<String>) -> Self {
        self.device_product = product.into();
        self
    }

    /// Override the device version header field.
    pub fn with_device_version(mut self, version: impl Into<String>) -> Self {
        self.device_version = version.into();
        self
    }

    /// Override the event class identifier header field.
    pub fn with_device_event_class_id(mut self, class_id: impl Into<String>) -> Self {
        self.device_event_class_id = class_id.into();
        self
    }

    /// Override the event name header field.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Override the severity header field.
    pub fn with_severity(mut self, severity: impl Into<CefSeverity>) -> Self {
        self.severity = severity.into();
        self
    }

    /// Borrow a transport shared with other formatters. No-op when this
    /// event already has one.
    pub fn share_transport(&mut self, transport: Arc<Transport>) {
        let _ = self.transport.set(transport);
    }

    /// Set one extension. Dictionary keys keep their slot; new keys
    /// append after the dictionary.
    pub fn set_extension(&mut self, key: impl Into<String>, value: impl Into<CefValue>) {
        self.extensions.set(key, value);
    }

    /// Unset one extension.
    pub fn clear_extension(&mut self, key: &str) {
        self.extensions.clear(key);
    }

    /// Read one extension.
    pub fn extension(&self, key: &str) -> Option<&CefValue> {
        self.extensions.get(key)
    }

    /// Check the header severity and every set extension against the
    /// dictionary.
    ///
    /// Validation stops at the first violation: a wrong-kind value is a
    /// `Type` error naming the key, an over-long string is a `Format`
    /// error naming the key and the limit. Extensions the dictionary
    /// does not know pass through unchecked.
    pub fn validate(&self) -> Result<(), SyslogError> {
        match &self.severity {
            CefSeverity::Name(name) => {
                if !SEVERITY_NAMES.contains(&name.as_str()) {
                    return Err(SyslogError::Type("CEF severity not set correctly".into()));
                }
            }
            CefSeverity::Level(level) => {
                if !(0.0..=10.0).contains(level) {
                    return Err(SyslogError::Type("CEF severity not set correctly".into()));
                }
            }
        }
        for (key, value) in self.extensions.set_entries() {
            let Some(spec) = schema::lookup(key) else {
                continue;
            };
            match (spec.kind, value) {
                (CefKind::String, CefValue::Str(text)) => {
                    if let Some(max_len) = spec.max_len {
                        if text.chars().count() > max_len {
                            return Err(SyslogError::Format(format!(
                                "CEF extension key {key} value length is too long; max length is {max_len}"
                            )));
                        }
                    }
                }
                (CefKind::Number, CefValue::Num(_)) => {}
                _ => {
                    return Err(SyslogError::Type(format!(
                        "CEF key {key} value type was expected to be {}",
                        spec.kind
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the CEF event text. Extensions without a value are skipped;
    /// each emitted pair carries a trailing space.
    pub fn build_message(&self) -> String {
        let mut message = format!(
            "CEF:0|{}|{}|{}|{}|{}|{}|",
            self.device_vendor,
            self.device_product,
            self.device_version,
            self.device_event_class_id,
            self.name,
            self.severity
        );
        for (key, value) in self.extensions.set_entries() {
            let _ = write!(message, "{key}={value} ");
        }
        message
    }

    /// Build and transmit the event, returning the exact text sent.
    ///
    /// The transport config is consulted only when this event has no
    /// transport yet; the default is UDP to localhost:514.
    pub fn send(&self, config: Option<TransportConfig>) -> Result<String, SyslogError> {
        let message = self.build_message();
        let transport = self
            .transport
            .get_or_init(|| Arc::new(Transport::new(config.unwrap_or_default())));
        transport.send(&message)
    }
}
