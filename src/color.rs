//! ANSI foreground colour encoding for syslog message bodies.
//!
//! Colours arrive either as `#RRGGBB` hex strings or as raw ANSI codes
//! and are normalised to a single code in one of two modes: the standard
//! 8-colour set (30-37, with 90-97 for the bright variants) or the
//! extended 256-colour set. The encoder is exposed publicly so callers
//! can pre-compute codes for per-message overrides.

use crate::error::SyslogError;
use crate::severity::Severity;

/// Default per-severity codes for the extended 256-colour palette,
/// emergency through debug.
const EXTENDED_PALETTE: [u16; 8] = [1, 202, 208, 178, 226, 117, 45, 27];
/// Default per-severity codes for the standard 8-colour palette;
/// emergency through critical share red, error and warning share yellow,
/// notice and informational share cyan, debug sits alone in dark blue.
const STANDARD_PALETTE: [u16; 8] = [31, 31, 31, 33, 33, 36, 36, 34];

/// Colour code applied to a message when colouring is on and the caller
/// supplied nothing more specific.
pub(crate) const DEFAULT_MESSAGE_COLOR: u16 = 36;

/// A user-supplied colour, before encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorSpec {
    /// An RGB hex string of the form `#RRGGBB` (case-insensitive, the
    /// leading `#` is optional).
    Rgb(String),
    /// A raw ANSI code: 30-37 or 90-97 in standard mode, 0-255 in
    /// extended mode.
    Ansi(u16),
}

impl From<u16> for ColorSpec {
    fn from(code: u16) -> Self {
        ColorSpec::Ansi(code)
    }
}

impl From<&str> for ColorSpec {
    fn from(hex: &str) -> Self {
        ColorSpec::Rgb(hex.to_owned())
    }
}

impl From<String> for ColorSpec {
    fn from(hex: String) -> Self {
        ColorSpec::Rgb(hex)
    }
}

/// The colour applied to one message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageColor {
    /// A concrete ANSI code.
    Code(u16),
    /// The terminal's default foreground (`ESC[39m`).
    Default,
}

/// Encode a colour into its ANSI foreground code.
///
/// Raw codes pass through when they sit inside the accepted range for
/// the requested mode; anything else is a `Format` error. Hex strings
/// map onto the 256-colour cube (with a grayscale ramp for `R=G=B`) in
/// extended mode, or onto a coarse brightness bucket of the 8-colour set
/// otherwise. A string that is not RGB hex at all is a `Type` error.
pub fn encode_color(spec: &ColorSpec, extended: bool) -> Result<u16, SyslogError> {
    match spec {
        ColorSpec::Ansi(code) => {
            let code = *code;
            if extended && code < 256 {
                Ok(code)
            } else if (30..=37).contains(&code) || (90..=97).contains(&code) {
                Ok(code)
            } else {
                Err(SyslogError::Format("color code not in range".into()))
            }
        }
        ColorSpec::Rgb(hex) => {
            let (r, g, b) = parse_rgb_hex(hex).ok_or_else(|| {
                SyslogError::Type("not an RGB color hex or color code".into())
            })?;
            if extended {
                Ok(extended_code(r, g, b))
            } else {
                Ok(standard_code(r, g, b))
            }
        }
    }
}

fn parse_rgb_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

fn extended_code(r: u8, g: u8, b: u8) -> u16 {
    if r == g && g == b {
        // 24-step grayscale ramp, clamped to the cube corners.
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            ((f64::from(r) - 8.0) / 247.0 * 24.0).round() as u16 + 232
        }
    } else {
        let scale = |channel: u8| (f64::from(channel) / 255.0 * 5.0).round() as u16;
        16 + 36 * scale(r) + 6 * scale(g) + scale(b)
    }
}

fn standard_code(r: u8, g: u8, b: u8) -> u16 {
    let brightness = f64::from(r.max(g).max(b)) / 255.0 * 100.0;
    let level = (brightness / 50.0).round() as u16;
    let rounded = |channel: u8| (f64::from(channel) / 255.0).round() as u16;
    match level {
        0 => 30,
        1 => 30 + ((rounded(b) << 2) | (rounded(g) << 1) | rounded(r)),
        _ => 90,
    }
}

/// Per-severity colour overrides accepted by [`ColorPalette::set_colors`].
#[derive(Clone, Debug, Default)]
pub struct ColorOverrides {
    pub emergency: Option<ColorSpec>,
    pub alert: Option<ColorSpec>,
    pub critical: Option<ColorSpec>,
    pub error: Option<ColorSpec>,
    pub warning: Option<ColorSpec>,
    pub notice: Option<ColorSpec>,
    pub informational: Option<ColorSpec>,
    pub debug: Option<ColorSpec>,
}

impl ColorOverrides {
    fn entries(&self) -> [(Severity, &Option<ColorSpec>); 8] {
        [
            (Severity::Emergency, &self.emergency),
            (Severity::Alert, &self.alert),
            (Severity::Critical, &self.critical),
            (Severity::Error, &self.error),
            (Severity::Warning, &self.warning),
            (Severity::Notice, &self.notice),
            (Severity::Informational, &self.informational),
            (Severity::Debug, &self.debug),
        ]
    }
}

/// The per-severity colour table shared by the RFC 3164 and RFC 5424
/// formatters.
#[derive(Clone, Debug)]
pub struct ColorPalette {
    extended: bool,
    codes: [u16; 8],
}

impl ColorPalette {
    /// Build the default palette for the requested mode.
    pub fn new(extended: bool) -> Self {
        Self {
            extended,
            codes: if extended {
                EXTENDED_PALETTE
            } else {
                STANDARD_PALETTE
            },
        }
    }

    /// Whether this palette uses the extended 256-colour set.
    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// The code assigned to a severity.
    pub fn color_for(&self, severity: Severity) -> u16 {
        self.codes[usize::from(severity.code())]
    }

    /// Apply user overrides, encoding each through [`encode_color`].
    ///
    /// Fields are applied in severity order and the first invalid one
    /// aborts the call with a `Type` error naming it. Fields applied
    /// before the failure keep their new values; this setter is not
    /// transactional.
    pub fn set_colors(&mut self, overrides: &ColorOverrides) -> Result<(), SyslogError> {
        for (severity, spec) in overrides.entries() {
            if let Some(spec) = spec {
                let code = encode_color(spec, self.extended).map_err(|_| {
                    SyslogError::Type(format!(
                        "{severity} color is not an RGB color hex or color code"
                    ))
                })?;
                self.codes[usize::from(severity.code())] = code;
            }
        }
        Ok(())
    }
}

/// Wrap a message body in an ANSI colour escape, always closed with a
/// reset sequence. Extended palettes mark the code with the 256-colour
/// `38;5;` introducer.
pub(crate) fn apply_color(body: &str, color: &MessageColor, extended: bool) -> String {
    const ESC: char = '\u{1b}';
    match color {
        MessageColor::Code(code) if extended => format!("{ESC}[38;5;{code}m{body}{ESC}[0m"),
        MessageColor::Code(code) => format!("{ESC}[{code}m{body}{ESC}[0m"),
        MessageColor::Default => format!("{ESC}[39m{body}{ESC}[0m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_maps_to_standard_dark_foreground() {
        let code = encode_color(&ColorSpec::Rgb("#000000".into()), false).unwrap();
        assert_eq!(code, 30);
    }

    #[test]
    fn white_maps_to_the_top_of_the_extended_ramp() {
        let code = encode_color(&ColorSpec::Rgb("#ffffff".into()), true).unwrap();
        assert_eq!(code, 231);
    }

    #[test]
    fn white_maps_to_bright_in_standard_mode() {
        let code = encode_color(&ColorSpec::Rgb("#ffffff".into()), false).unwrap();
        assert_eq!(code, 90);
    }

    #[test]
    fn near_black_gray_clamps_to_the_cube_floor() {
        let code = encode_color(&ColorSpec::Rgb("#010101".into()), true).unwrap();
        assert_eq!(code, 16);
    }

    #[test]
    fn mid_gray_lands_on_the_ramp() {
        // (128 - 8) / 247 * 24 rounds to 12, offset from 232.
        let code = encode_color(&ColorSpec::Rgb("#808080".into()), true).unwrap();
        assert_eq!(code, 244);
    }

    #[test]
    fn orange_lands_in_the_color_cube() {
        // r=255 -> 5, g=128 -> 3, b=0 -> 0: 16 + 180 + 18.
        let code = encode_color(&ColorSpec::Rgb("#ff8000".into()), true).unwrap();
        assert_eq!(code, 214);
    }

    #[test]
    fn half_red_picks_the_standard_red() {
        let code = encode_color(&ColorSpec::Rgb("#800000".into()), false).unwrap();
        assert_eq!(code, 31);
    }

    #[test]
    fn leading_hash_is_optional_and_case_folds() {
        let with_hash = encode_color(&ColorSpec::Rgb("#A0B0C0".into()), true).unwrap();
        let without = encode_color(&ColorSpec::Rgb("a0b0c0".into()), true).unwrap();
        assert_eq!(with_hash, without);
    }

    #[test]
    fn extended_codes_below_256_pass_through() {
        let code = encode_color(&ColorSpec::Ansi(255), true).unwrap();
        assert_eq!(code, 255);
    }

    #[test]
    fn bright_range_passes_through_in_standard_mode() {
        let code = encode_color(&ColorSpec::Ansi(95), false).unwrap();
        assert_eq!(code, 95);
    }

    #[test]
    fn out_of_range_code_is_a_format_error() {
        let err = encode_color(&ColorSpec::Ansi(300), true).expect_err("300 is out of range");
        assert!(matches!(err, SyslogError::Format(_)));
        let err = encode_color(&ColorSpec::Ansi(128), false).expect_err("128 needs extended mode");
        assert!(matches!(err, SyslogError::Format(_)));
    }

    #[test]
    fn non_hex_string_is_a_type_error() {
        let err =
            encode_color(&ColorSpec::Rgb("#befang".into()), true).expect_err("not hex digits");
        assert!(matches!(err, SyslogError::Type(_)));
    }

    #[test]
    fn default_palettes_match_the_documented_tables() {
        let extended = ColorPalette::new(true);
        assert_eq!(extended.color_for(Severity::Emergency), 1);
        assert_eq!(extended.color_for(Severity::Debug), 27);

        let standard = ColorPalette::new(false);
        assert_eq!(standard.color_for(Severity::Critical), 31);
        assert_eq!(standard.color_for(Severity::Warning), 33);
        assert_eq!(standard.color_for(Severity::Informational), 36);
        assert_eq!(standard.color_for(Severity::Debug), 34);
    }

    #[test]
    fn set_colors_applies_fields_before_the_failing_one() {
        let mut palette = ColorPalette::new(false);
        let overrides = ColorOverrides {
            emergency: Some(ColorSpec::Ansi(32)),
            alert: Some(ColorSpec::Ansi(300)),
            ..ColorOverrides::default()
        };
        let err = palette
            .set_colors(&overrides)
            .expect_err("alert override is out of range");
        assert!(err.to_string().contains("alert"));
        // Partial application is the documented contract.
        assert_eq!(palette.color_for(Severity::Emergency), 32);
        assert_eq!(palette.color_for(Severity::Alert), 31);
    }

    #[test]
    fn colorized_bodies_always_reset() {
        let plain = apply_color("boot", &MessageColor::Code(36), false);
        assert_eq!(plain, "\u{1b}[36mboot\u{1b}[0m");
        let extended = apply_color("boot", &MessageColor::Code(117), true);
        assert_eq!(extended, "\u{1b}[38;5;117mboot\u{1b}[0m");
        let fallback = apply_color("boot", &MessageColor::Default, true);
        assert_eq!(fallback, "\u{1b}[39mboot\u{1b}[0m");
    }
}
