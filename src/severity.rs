//! Syslog severity and facility codes.

use std::fmt;

use crate::error::SyslogError;

/// Default facility (23, local7).
pub const DEFAULT_FACILITY: u8 = 23;
/// Severity applied when a message carries no explicit level (6,
/// informational).
pub const DEFAULT_SEVERITY: u8 = 6;

/// The eight syslog severity levels, ordered most to least urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Informational,
    Debug,
}

impl Severity {
    /// All severities in wire order; also the colour-table index order.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Informational,
        Severity::Debug,
    ];

    /// Map a wire code (0-7) back to a severity.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// The wire code for this severity (0 emergency through 7 debug).
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Informational => "informational",
            Severity::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// The syslog PRI value, `facility * 8 + severity`.
pub fn priority(facility: u8, severity: u8) -> u16 {
    u16::from(facility) * 8 + u16::from(severity)
}

/// Reject severities outside the 0-7 wire range.
pub(crate) fn validate_severity(severity: u8) -> Result<u8, SyslogError> {
    if severity > 7 {
        return Err(SyslogError::Format(format!(
            "severity must be a number between 0 and 7, got {severity}"
        )));
    }
    Ok(severity)
}
