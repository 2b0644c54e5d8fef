//! Colour-model value types and the pure conversion math.
//!
//! [`Rgb`] is the canonical pivot: every other model ([`Hsv`], [`Hsl`],
//! [`Cmyk`], hex codes) converts to and from it. All conversions round to
//! the nearest integer in the target range and clamp, never truncate.
//!
//! # Examples
//!
//! ```
//! use colourful::colour::{Rgb, Hsv};
//!
//! let red = Rgb::parse_hex("#F00").unwrap();
//! assert_eq!(red, Rgb { red: 255, green: 0, blue: 0 });
//! assert_eq!(red.hex(), "#FF0000");
//! assert_eq!(red.to_hsv(), Hsv { hue: 0, saturation: 100, value: 100 });
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Error for an out-of-range or malformed colour field.
///
/// Carries the offending field name, the value as given, and the documented
/// range or format, so the presentation layer can build its own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidColourInput {
    /// Which field was rejected (`"red"`, `"hue"`, `"hex code"`, ...).
    pub field: &'static str,
    /// The raw value as the caller supplied it.
    pub value: String,
    /// The valid range or format for the field.
    pub expected: &'static str,
}

impl fmt::Display for InvalidColourInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: got `{}`, expected {}",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for InvalidColourInput {}

fn check_range(
    field: &'static str,
    value: i64,
    max: i64,
    expected: &'static str,
) -> Result<(), InvalidColourInput> {
    if (0..=max).contains(&value) {
        Ok(())
    } else {
        Err(InvalidColourInput {
            field,
            value: value.to_string(),
            expected,
        })
    }
}

const RGB_RANGE: &str = "an integer from 0 to 255";
const HUE_RANGE: &str = "an integer from 0 to 360";
const PERCENT_RANGE: &str = "an integer from 0 to 100";
const HEX_FORMAT: &str = "3, 4, 6 or 8 hexadecimal digits, optionally prefixed with `#`";

/// RGB colour with channels 0-255. The canonical internal representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// HSV colour: hue 0-360, saturation and value 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsv {
    pub hue: u16,
    pub saturation: u8,
    pub value: u8,
}

/// HSL colour: hue 0-360, saturation and lightness 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

/// CMYK colour with all components 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cmyk {
    pub cyan: u8,
    pub magenta: u8,
    pub yellow: u8,
    pub key: u8,
}

#[expect(clippy::cast_possible_truncation, reason = "clamped to 0-255 before the cast")]
#[expect(clippy::cast_sign_loss, reason = "clamped to a non-negative range")]
fn channel(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

#[expect(clippy::cast_possible_truncation, reason = "clamped to 0-100 before the cast")]
#[expect(clippy::cast_sign_loss, reason = "clamped to a non-negative range")]
fn percent(fraction: f64) -> u8 {
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}

#[expect(clippy::cast_possible_truncation, reason = "clamped to 0-360 before the cast")]
#[expect(clippy::cast_sign_loss, reason = "clamped to a non-negative range")]
fn degrees(fraction: f64) -> u16 {
    (fraction * 360.0).round().clamp(0.0, 360.0) as u16
}

#[expect(clippy::cast_possible_truncation, reason = "value is verified to fit in u8")]
#[expect(clippy::cast_sign_loss, reason = "value is verified non-negative")]
fn narrow(value: i64) -> u8 {
    value as u8
}

#[expect(clippy::cast_possible_truncation, reason = "value is verified to fit in u16")]
#[expect(clippy::cast_sign_loss, reason = "value is verified non-negative")]
fn narrow_hue(value: i64) -> u16 {
    value as u16
}

impl Rgb {
    /// Create an RGB colour from channel values.
    #[must_use]
    pub const fn from_channels(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Validate raw channel values and create an RGB colour.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColourInput`] if any channel falls outside 0-255.
    pub fn new(red: i64, green: i64, blue: i64) -> Result<Self, InvalidColourInput> {
        check_range("red", red, 255, RGB_RANGE)?;
        check_range("green", green, 255, RGB_RANGE)?;
        check_range("blue", blue, 255, RGB_RANGE)?;
        Ok(Self {
            red: narrow(red),
            green: narrow(green),
            blue: narrow(blue),
        })
    }

    /// Returns normalized channels as floats in 0.0-1.0.
    #[must_use]
    pub fn normalized(&self) -> (f64, f64, f64) {
        (
            f64::from(self.red) / 255.0,
            f64::from(self.green) / 255.0,
            f64::from(self.blue) / 255.0,
        )
    }

    /// Canonical hex code: uppercase, leading `#`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Parse a hex code in `RGB`, `RGBA`, `RRGGBB` or `RRGGBBAA` form.
    ///
    /// The leading `#` is optional and parsing is case-insensitive. Shorthand
    /// digits expand by duplication (`#abc` -> `#aabbcc`); an alpha component
    /// is validated, then dropped.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColourInput`] for any other length or any non-hex
    /// character.
    pub fn parse_hex(code: &str) -> Result<Self, InvalidColourInput> {
        static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(?i)^#?([0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})$")
                .expect("valid regex")
        });

        let digits = HEX_RE
            .captures(code.trim())
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| InvalidColourInput {
                field: "hex code",
                value: code.to_string(),
                expected: HEX_FORMAT,
            })?;

        let expanded = if digits.len() <= 4 {
            // #RGB / #RGBA shorthand: each digit stands for a doubled pair.
            digits.chars().flat_map(|d| [d, d]).collect()
        } else {
            digits
        };

        let pair = |at: usize| {
            u8::from_str_radix(&expanded[at..at + 2], 16).expect("digits verified hexadecimal")
        };
        Ok(Self {
            red: pair(0),
            green: pair(2),
            blue: pair(4),
        })
    }

    /// Convert an HSV colour to RGB.
    #[must_use]
    pub fn from_hsv(hsv: Hsv) -> Self {
        let h = f64::from(hsv.hue) / 360.0;
        let s = f64::from(hsv.saturation) / 100.0;
        let v = f64::from(hsv.value) / 100.0;

        if hsv.saturation == 0 {
            let grey = channel(v);
            return Self::from_channels(grey, grey, grey);
        }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        // Hue 360 lands in sector 6, a full turn back to sector 0.
        #[expect(clippy::cast_possible_truncation, reason = "sector is 0-6")]
        #[expect(clippy::cast_sign_loss, reason = "h is non-negative")]
        let (r, g, b) = match sector as u8 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::from_channels(channel(r), channel(g), channel(b))
    }

    /// Convert an HSL colour to RGB.
    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let h = f64::from(hsl.hue) / 360.0;
        let s = f64::from(hsl.saturation) / 100.0;
        let l = f64::from(hsl.lightness) / 100.0;

        if hsl.saturation == 0 {
            let grey = channel(l);
            return Self::from_channels(grey, grey, grey);
        }

        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let hue_channel = |offset: f64| {
            let mut t = h + offset;
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };

        Self::from_channels(
            channel(hue_channel(1.0 / 3.0)),
            channel(hue_channel(0.0)),
            channel(hue_channel(-1.0 / 3.0)),
        )
    }

    /// Convert a CMYK colour to RGB.
    #[must_use]
    pub fn from_cmyk(cmyk: Cmyk) -> Self {
        // Full key is pure black; skip the per-channel formula entirely.
        if cmyk.key == 100 {
            return Self::from_channels(0, 0, 0);
        }
        let key = f64::from(cmyk.key) / 100.0;
        let apply = |component: u8| channel((1.0 - f64::from(component) / 100.0) * (1.0 - key));
        Self::from_channels(apply(cmyk.cyan), apply(cmyk.magenta), apply(cmyk.yellow))
    }

    /// Convert to HSV, rounding hue to whole degrees and saturation/value to
    /// whole percent.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max < f64::EPSILON { 0.0 } else { delta / max };
        Hsv {
            hue: degrees(hue_fraction(r, g, b)),
            saturation: percent(saturation),
            value: percent(max),
        }
    }

    /// Convert to HSL, rounding hue to whole degrees and
    /// saturation/lightness to whole percent.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let lightness = f64::midpoint(max, min);

        let saturation = if delta < f64::EPSILON {
            0.0
        } else if lightness <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        Hsl {
            hue: degrees(hue_fraction(r, g, b)),
            saturation: percent(saturation),
            lightness: percent(lightness),
        }
    }

    /// Convert to CMYK with all components rounded to whole percent.
    #[must_use]
    pub fn to_cmyk(self) -> Cmyk {
        let (r, g, b) = self.normalized();
        let max = r.max(g).max(b);

        // Pure black has key 1.0, which would divide by zero below.
        if max < f64::EPSILON {
            return Cmyk {
                cyan: 0,
                magenta: 0,
                yellow: 0,
                key: 100,
            };
        }

        let k = 1.0 - max;
        let component = |value: f64| percent((1.0 - value - k) / (1.0 - k));
        Cmyk {
            cyan: component(r),
            magenta: component(g),
            yellow: component(b),
            key: percent(k),
        }
    }
}

/// Hue as a fraction of a turn in `[0, 1)`; 0 for achromatic colours.
fn hue_fraction(r: f64, g: f64, b: f64) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta < f64::EPSILON {
        return 0.0;
    }

    let hue = if (max - r).abs() < f64::EPSILON {
        (g - b) / delta + (if g < b { 6.0 } else { 0.0 })
    } else if (max - g).abs() < f64::EPSILON {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    hue / 6.0
}

impl Hsv {
    /// Validate raw values and create an HSV colour.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColourInput`] if hue is outside 0-360 or
    /// saturation/value are outside 0-100.
    pub fn new(hue: i64, saturation: i64, value: i64) -> Result<Self, InvalidColourInput> {
        check_range("hue", hue, 360, HUE_RANGE)?;
        check_range("saturation", saturation, 100, PERCENT_RANGE)?;
        check_range("value", value, 100, PERCENT_RANGE)?;
        Ok(Self {
            hue: narrow_hue(hue),
            saturation: narrow(saturation),
            value: narrow(value),
        })
    }
}

impl Hsl {
    /// Validate raw values and create an HSL colour.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColourInput`] if hue is outside 0-360 or
    /// saturation/lightness are outside 0-100.
    pub fn new(hue: i64, saturation: i64, lightness: i64) -> Result<Self, InvalidColourInput> {
        check_range("hue", hue, 360, HUE_RANGE)?;
        check_range("saturation", saturation, 100, PERCENT_RANGE)?;
        check_range("lightness", lightness, 100, PERCENT_RANGE)?;
        Ok(Self {
            hue: narrow_hue(hue),
            saturation: narrow(saturation),
            lightness: narrow(lightness),
        })
    }
}

impl Cmyk {
    /// Validate raw values and create a CMYK colour.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidColourInput`] if any component is outside 0-100.
    pub fn new(cyan: i64, magenta: i64, yellow: i64, key: i64) -> Result<Self, InvalidColourInput> {
        check_range("cyan", cyan, 100, PERCENT_RANGE)?;
        check_range("magenta", magenta, 100, PERCENT_RANGE)?;
        check_range("yellow", yellow, 100, PERCENT_RANGE)?;
        check_range("key", key, 100, PERCENT_RANGE)?;
        Ok(Self {
            cyan: narrow(cyan),
            magenta: narrow(magenta),
            yellow: narrow(yellow),
            key: narrow(key),
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.hue, self.saturation, self.value)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.hue, self.saturation, self.lightness)
    }
}

impl fmt::Display for Cmyk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.cyan, self.magenta, self.yellow, self.key
        )
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::from_channels(red, green, blue)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_channels(red, green, blue)
    }
}

impl FromStr for Rgb {
    type Err = InvalidColourInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}
