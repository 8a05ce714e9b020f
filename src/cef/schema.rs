//! The CEF extension dictionary.
//!
//! Long-form extension names map to their abbreviated wire key, the
//! value kind the dictionary declares, and an optional maximum string
//! length. The table is built once and never mutated; it exists purely
//! for [`Cef::validate`](super::Cef::validate). The irregular spellings
//! of some long-form names are part of the published dictionary and are
//! kept verbatim.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

/// Value kind a dictionary entry accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CefKind {
    String,
    Number,
}

impl fmt::Display for CefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CefKind::String => "string",
            CefKind::Number => "number",
        })
    }
}

/// One dictionary entry.
#[derive(Clone, Copy, Debug)]
pub struct ExtensionSpec {
    /// Abbreviated wire key.
    pub key: &'static str,
    /// Declared value kind.
    pub kind: CefKind,
    /// Maximum length for string values, when the dictionary bounds one.
    pub max_len: Option<usize>,
}

/// `(long name, wire key, kind, max string length)` rows, in the
/// dictionary's published order. This order also seeds the default
/// extension template of a new [`Cef`](super::Cef) event.
const ENTRIES: &[(&str, &str, CefKind, Option<usize>)] = &[
    ("deviceAction", "act", CefKind::String, Some(63)),
    ("applicationProtocol", "app", CefKind::String, Some(31)),
    ("deviceCustomIPv6Address1", "c6a1", CefKind::String, None),
    ("deviceCustomIPv6 Address1Label", "c6a1Label", CefKind::String, Some(1023)),
    ("deviceCustomIPv6Address3", "c6a3", CefKind::String, None),
    ("deviceCustomIPv6Address3 Label", "c6a3Label", CefKind::String, Some(1023)),
    ("deviceCustomIPv6 Address4", "c6a4", CefKind::String, None),
    ("deviceCustomIPv6 Address4Label", "C6a4Label", CefKind::String, Some(1023)),
    ("deviceEventCategory", "cat", CefKind::String, Some(1023)),
    ("deviceCustomFloatingPoint1", "cfp1", CefKind::Number, None),
    ("deviceCustom FloatingPoint1Label", "cfp1Label", CefKind::String, Some(1023)),
    ("deviceCustomFloatingPoint2", "cfp2", CefKind::Number, None),
    ("deviceCustomFloatingPoint2 Label", "cfp2Label", CefKind::String, Some(1023)),
    ("deviceCustomFloatingPoint3", "cfp3", CefKind::Number, None),
    ("deviceCustom FloatingPoint3Label", "cfp3Label", CefKind::String, Some(1023)),
    ("deviceCustomFloatingPoint4", "cfp4", CefKind::Number, None),
    ("deviceCustom FloatingPoint4Label", "cfp4Label", CefKind::String, Some(1023)),
    ("deviceCustomNumber1", "cn1", CefKind::Number, None),
    ("deviceCustomNumber1Label", "cn1Label", CefKind::String, Some(1023)),
    ("DeviceCustomNumber2", "cn2", CefKind::Number, None),
    ("deviceCustomNumber2Label", "cn2Label", CefKind::String, Some(1023)),
    ("deviceCustomNumber3", "cn3", CefKind::Number, None),
    ("deviceCustomNumber3Label", "cn3Label", CefKind::String, Some(1023)),
    ("baseEventCount", "cnt", CefKind::Number, None),
    ("deviceCustomString1", "cs1", CefKind::String, Some(4000)),
    ("deviceCustomString1Label", "cs1Label", CefKind::String, Some(1023)),
    ("deviceCustomString2", "cs2", CefKind::String, Some(4000)),
    ("deviceCustomString2Label", "cs2Label", CefKind::String, Some(1023)),
    ("deviceCustomString3", "cs3", CefKind::String, Some(4000)),
    ("deviceCustomString3Label", "cs3Label", CefKind::String, Some(1023)),
    ("deviceCustomString4", "cs4", CefKind::String, Some(4000)),
    ("deviceCustomString4Label", "cs4Label", CefKind::String, Some(1023)),
    ("deviceCustomString5", "cs5", CefKind::String, Some(4000)),
    ("deviceCustomString5Label", "cs5Label", CefKind::String, Some(1023)),
    ("deviceCustomString6", "cs6", CefKind::String, Some(4000)),
    ("deviceCustomString6Label", "cs6Label", CefKind::String, Some(1023)),
    ("destinationDnsDomain", "destination DnsDomain", CefKind::String, Some(255)),
    ("destinationServiceName", "destination ServiceName", CefKind::String, Some(1023)),
    ("destinationTranslated Address", "Destination Translated Address", CefKind::String, None),
    ("destinationTranslatedPort", "Destination TranslatedPort", CefKind::Number, None),
    ("deviceCustomDate1", "deviceCustom Date1", CefKind::String, None),
    ("deviceCustomDate1Label", "deviceCustom Date1Label", CefKind::String, Some(1023)),
    ("deviceCustomDate2", "deviceCustom Date2", CefKind::String, None),
    ("deviceCustomDate2Label", "deviceCustom Date2Label", CefKind::String, Some(1023)),
    ("deviceDirection", "deviceDirection", CefKind::Number, None),
    ("deviceDnsDomain", "deviceDns Domain", CefKind::String, Some(255)),
    ("deviceExternalId", "device ExternalId", CefKind::String, Some(255)),
    ("deviceFacility", "deviceFacility", CefKind::String, Some(1023)),
    ("deviceInboundInterface", "deviceInbound Interface", CefKind::String, Some(128)),
    ("deviceNtDomain", "deviceNt Domain", CefKind::String, Some(255)),
    ("deviceOutboundInterface", "Device Outbound Interface", CefKind::String, Some(128)),
    ("devicePayloadId", "Device PayloadId", CefKind::String, Some(128)),
    ("deviceProcessName", "deviceProcess Name", CefKind::String, Some(1023)),
    ("deviceTranslatedAddress", "device Translated Address", CefKind::String, None),
    ("destinationHostName", "dhost", CefKind::String, Some(1023)),
    ("destinationMacAddress", "dmac", CefKind::String, None),
    ("destinationNtDomain", "dntdom", CefKind::String, Some(255)),
    ("destinationProcessId", "dpid", CefKind::Number, None),
    ("destinationUserPrivileges", "dpriv", CefKind::String, Some(1023)),
    ("destinationProcessName", "dproc", CefKind::String, Some(1023)),
    ("destinationPort", "dpt", CefKind::Number, None),
    ("destinationAddress", "dst", CefKind::String, None),
    ("deviceTimeZone", "dtz", CefKind::String, Some(255)),
    ("destinationUserId", "duid", CefKind::String, Some(1023)),
    ("destinationUserName", "duser", CefKind::String, Some(1023)),
    ("deviceAddress", "dvc", CefKind::String, None),
    ("deviceHostName", "dvchost", CefKind::String, Some(100)),
    ("deviceMacAddress", "dvcmac", CefKind::String, None),
    ("deviceProcessId", "dvcpid", CefKind::Number, None),
    ("endTime", "end", CefKind::String, None),
    ("externalId", "externalId", CefKind::String, Some(40)),
    ("fileCreateTime", "fileCreateTime", CefKind::String, None),
    ("fileHash", "fileHash", CefKind::String, Some(255)),
    ("fileId", "fileId", CefKind::String, Some(1023)),
    ("fileModificationTime", "fileModification Time", CefKind::String, None),
    ("filePath", "filePath", CefKind::String, Some(1023)),
    ("filePermission", "filePermission", CefKind::String, Some(1023)),
    ("fileType", "fileType", CefKind::String, Some(1023)),
    ("flexDate1", "flexDate1", CefKind::String, None),
    ("flexDate1Label", "flexDate1Label", CefKind::String, Some(128)),
    ("flexString1", "flexString1", CefKind::String, Some(1023)),
    ("flexString1Label", "flexString1 Label", CefKind::String, Some(128)),
    ("flexString2", "flexString2", CefKind::String, Some(1023)),
    ("flexString2Label", "flex String2Label", CefKind::String, Some(128)),
    ("filename", "fname", CefKind::String, Some(1023)),
    ("fileSize", "fsize", CefKind::Number, None),
    ("bytesIn", "in", CefKind::Number, None),
    ("message", "msg", CefKind::String, Some(1023)),
    ("oldFileCreateTime", "oldFileCreate Time", CefKind::String, None),
    ("oldFileHash", "oldFileHash", CefKind::String, Some(255)),
    ("oldFileId", "oldFileId", CefKind::String, Some(1023)),
    ("oldFileModificationTime", "oldFile Modification Time", CefKind::String, None),
    ("oldFileName", "oldFileName", CefKind::String, Some(1023)),
    ("oldFilePath", "oldFilePath", CefKind::String, Some(1023)),
    ("oldFileSize", "oldFileSize", CefKind::Number, None),
    ("oldFileType", "oldFileType", CefKind::String, Some(1023)),
    ("bytesOut", "out", CefKind::Number, None),
    ("eventOutcome", "outcome", CefKind::String, Some(63)),
    ("transportProtocol", "proto", CefKind::String, Some(31)),
    ("Reason", "reason", CefKind::String, Some(1023)),
    ("requestUrl", "request", CefKind::String, Some(1023)),
    ("requestClientApplication", "requestClient Application", CefKind::String, Some(1023)),
    ("requestContext", "requestContext", CefKind::String, Some(2048)),
    ("requestCookies", "requestCookies", CefKind::String, Some(1023)),
    ("requestMethod", "requestMethod", CefKind::String, Some(1023)),
    ("deviceReceiptTime", "rt", CefKind::String, None),
    ("sourceHostName", "shost", CefKind::String, Some(1023)),
    ("sourceMacAddress", "smac", CefKind::String, None),
    ("sourceNtDomain", "sntdom", CefKind::String, Some(255)),
    ("sourceDnsDomain", "sourceDns Domain", CefKind::String, Some(255)),
    ("sourceServiceName", "source ServiceName", CefKind::String, Some(1023)),
    ("sourceTranslatedAddress", "source Translated Address", CefKind::String, None),
    ("sourceTranslatedPort", "source TranslatedPort", CefKind::Number, None),
    ("sourceProcessId", "spid", CefKind::Number, None),
    ("sourceUserPrivileges", "spriv", CefKind::String, Some(1023)),
    ("sourceProcessName", "sproc", CefKind::String, Some(1023)),
    ("sourcePort", "spt", CefKind::Number, None),
    ("sourceAddress", "src", CefKind::String, None),
    ("startTime", "start", CefKind::String, None),
    ("sourceUserId", "suid", CefKind::String, Some(1023)),
    ("sourceUserName", "suser", CefKind::String, Some(1023)),
    ("type", "type", CefKind::Number, None),
    ("agentDnsDomain", "agentDns Domain", CefKind::String, Some(255)),
    ("agentNtDomain", "agentNtDomain", CefKind::String, Some(255)),
    ("agentTranslatedAddress", "agentTranslated Address", CefKind::String, None),
    ("agentTranslatedZone ExternalID", "agentTranslated ZoneExternalID", CefKind::String, Some(200)),
    ("agentTranslatedZoneURI", "agentTranslated Zone URI", CefKind::String, Some(2048)),
    ("agentZoneExternalID", "agentZone ExternalID", CefKind::String, Some(200)),
    ("agentZoneURI", "agentZoneURI", CefKind::String, Some(2048)),
    ("agentAddress", "agt", CefKind::String, None),
    ("agentHostName", "ahost", CefKind::String, Some(1023)),
    ("agentId", "aid", CefKind::String, Some(40)),
    ("agentMacAddress", "amac", CefKind::String, None),
    ("agentReceiptTime", "art", CefKind::String, None),
    ("agentType", "at", CefKind::String, Some(63)),
    ("agentTimeZone", "atz", CefKind::String, Some(255)),
    ("agentVersion", "av", CefKind::String, Some(31)),
    ("customerExternalID", "customer ExternalID", CefKind::String, Some(200)),
    ("customerURI", "customerURI", CefKind::String, Some(2048)),
    ("destinationTranslated ZoneExternalID", "destination TranslatedZone ExternalID", CefKind::String, Some(200)),
    ("destinationTranslated ZoneURI", "destination Translated ZoneURI", CefKind::String, Some(2048)),
    ("destinationZoneExternalID", "destinationZone ExternalID", CefKind::String, Some(200)),
    ("destinationZoneURI", "destinationZone URI", CefKind::String, Some(2048)),
    ("deviceTranslatedZone ExternalID", "device TranslatedZone ExternalID", CefKind::String, Some(200)),
    ("deviceTranslatedZoneURI", "device TranslatedZone URI", CefKind::String, Some(2048)),
    ("deviceZoneExternalID", "deviceZone ExternalID", CefKind::String, Some(200)),
    ("deviceZoneURI", "deviceZoneURI", CefKind::String, Some(2048)),
    ("destinationGeoLatitude", "dlat", CefKind::Number, None),
    ("destinationGeoLongitude", "dlong", CefKind::Number, None),
    ("eventId", "eventId", CefKind::Number, None),
    ("rawEvent", "rawEvent", CefKind::String, Some(4000)),
    ("sourceGeoLatitude", "slat", CefKind::Number, None),
    ("sourceGeoLongitude", "slong", CefKind::Number, None),
    ("sourceTranslatedZone ExternalID", "source TranslatedZone ExternalID", CefKind::String, Some(200)),
    ("sourceTranslatedZoneURI", "source TranslatedZone URI", CefKind::String, Some(2048)),
    ("sourceZoneExternalID", "sourceZone ExternalID", CefKind::String, Some(200)),
    ("sourceZoneURI", "sourceZoneURI", CefKind::String, Some(2048)),
];

static SCHEMA: Lazy<HashMap<&'static str, ExtensionSpec>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .map(|&(name, key, kind, max_len)| (name, ExtensionSpec { key, kind, max_len }))
        .collect()
});

/// Look up a dictionary entry by long-form name.
pub fn lookup(name: &str) -> Option<&'static ExtensionSpec> {
    SCHEMA.get(name)
}

/// The dictionary's long-form names in published order, used to seed the
/// default extension template.
pub(crate) fn template_names() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(name, _, _, _)| *name)
}
