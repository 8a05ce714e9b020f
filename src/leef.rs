//! IBM LEEF 2.0 event formatting.
//!
//! A LEEF event is a pipe-delimited header followed by tab-separated
//! `key=value` attributes:
//!
//! ```text
//! LEEF:2.0|vendor|product|version|eventId|key=value<TAB>key=value<TAB>
//! ```
//!
//! LEEF deliberately accepts arbitrary attributes, so nothing here is
//! validated; the base dictionary is only seeded to fix the emission
//! order. This is a single-shot event format, not a logging stream.

use std::fmt::Write as _;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::attributes::AttributeMap;
use crate::error::SyslogError;
use crate::transport::{Transport, TransportConfig};

/// Header value used when the caller supplies nothing.
const DEFAULT_HEADER_FIELD: &str = "unknown";

/// The LEEF base attribute dictionary, in emission order.
const ATTRIBUTE_TEMPLATE: &[&str] = &[
    "cat",
    "devTime",
    "devTimeFormat",
    "proto",
    "sev",
    "src",
    "dst",
    "srcPort",
    "dstPort",
    "srcPreNAT",
    "dstPreNAT",
    "srcPostNAT",
    "dstPostNAT",
    "usrName",
    "srcMAC",
    "dstMAC",
    "srcPreNATPort",
    "dstPreNATPort",
    "srcPostNATPort",
    "dstPostNATPort",
    "identSrc",
    "identHostName",
    "identNetBios",
    "identGrpName",
    "identMAC",
    "vSrc",
    "vSrcName",
    "accountName",
    "srcBytes",
    "dstBytes",
    "srcPackets",
    "dstPackets",
    "totalPackets",
    "role",
    "realm",
    "policy",
    "resource",
    "url",
    "groupID",
    "domain",
    "isLoginEvent",
    "isLogoutEvent",
    "identSecondlp",
    "calLanguage",
    "AttributeLimits",
    "calCountryOrRegion",
];

/// LEEF 2.0 event builder with an owned-or-borrowed transport.
#[derive(Debug)]
pub struct Leef {
    /// Vendor of the system reporting the event.
    pub vendor: String,
    /// Product name of the system reporting the event.
    pub product: String,
    /// Product version of the system reporting the event.
    pub version: String,
    /// Event identifier.
    pub event_id: String,
    /// Advisory flag for callers who wrap LEEF output in a syslog
    /// header; it does not change the built message.
    pub syslog_header: bool,
    attributes: AttributeMap<String>,
    transport: OnceCell<Arc<Transport>>,
}

impl Default for Leef {
    fn default() -> Self {
        Self::new()
    }
}

impl Leef {
    /// An event with header fields of `unknown` and the base attribute
    /// dictionary seeded but unset.
    pub fn new() -> Self {
        Self {
            vendor: DEFAULT_HEADER_FIELD.to_owned(),
            product: DEFAULT_HEADER_FIELD.to_owned(),
            version: DEFAULT_HEADER_FIELD.to_owned(),
            event_id: DEFAULT_HEADER_FIELD.to_owned(),
            syslog_header: true,
            attributes: AttributeMap::from_template(ATTRIBUTE_TEMPLATE),
            transport: OnceCell::new(),
        }
    }

    /// Override the vendor header field.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    /// Override the product header field.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Override the version header field.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Override the event identifier header field.
    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = event_id.into();
        self
    }

    /// Borrow a transport shared with other formatters. No-op when this
    /// event already has one.
    pub fn share_transport(&mut self, transport: Arc<Transport>) {
        let _ = self.transport.set(transport);
    }

    /// Set one attribute. Dictionary keys keep their slot; new keys
    /// append after the dictionary.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.set(key, value);
    }

    /// Unset one attribute.
    pub fn clear_attribute(&mut self, key: &str) {
        self.attributes.clear(key);
    }

    /// Read one attribute.
    pub fn attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Build the LEEF event text. Attributes without a value are
    /// skipped; each emitted pair carries a trailing tab.
    pub fn build_message(&self) -> String {
        let mut message = format!(
            "LEEF:2.0|{}|{}|{}|{}|",
            self.vendor, self.product, self.version, self.event_id
        );
        for (key, value) in self.attributes.set_entries() {
            let _ = write!(message, "{key}={value}\t");
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
