//! Conversion orchestration: one typed input in, every representation out.
//!
//! The argument-parsing layer builds a [`ColourInput`] from raw user text
//! and hands it to [`convert`], which validates the input, normalizes it to
//! RGB, derives the remaining models, and resolves the closest palette name.
//! The presentation layer renders the returned [`ConversionResult`] however
//! it likes; nothing here formats user-facing text.
//!
//! # Examples
//!
//! ```
//! use colourful::convert::{ColourInput, convert};
//! use colourful::palette::Palette;
//!
//! let palette = Palette::default_palette();
//! let result = convert(palette, ColourInput::Hex("#FF0000".to_string())).unwrap();
//! assert_eq!(result.hex, "#FF0000");
//! assert_eq!(result.name.as_deref(), Some("Red"));
//! ```

use std::fmt;

use log::debug;

use crate::colour::{Cmyk, Hsl, Hsv, InvalidColourInput, Rgb};
use crate::palette::Palette;

/// One colour, as the argument parser hands it over: raw integers and
/// strings, validated only once a conversion runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColourInput {
    Rgb { red: i64, green: i64, blue: i64 },
    Hsv { hue: i64, saturation: i64, value: i64 },
    Hsl { hue: i64, saturation: i64, lightness: i64 },
    Cmyk { cyan: i64, magenta: i64, yellow: i64, key: i64 },
    Hex(String),
    Name(String),
    Random,
}

/// Error type for a conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A field was out of range or malformed.
    InvalidInput(InvalidColourInput),
    /// A name lookup found nothing at or above the similarity cutoff.
    NoMatchFound { query: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(inner) => inner.fmt(f),
            Self::NoMatchFound { query } => write!(f, "no colour matches `{query}`"),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(inner) => Some(inner),
            Self::NoMatchFound { .. } => None,
        }
    }
}

impl From<InvalidColourInput> for ConversionError {
    fn from(inner: InvalidColourInput) -> Self {
        Self::InvalidInput(inner)
    }
}

/// Every representation of one colour, produced fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub rgb: Rgb,
    pub hsv: Hsv,
    pub hsl: Hsl,
    pub cmyk: Cmyk,
    /// Canonical hex code, `#RRGGBB` uppercase.
    pub hex: String,
    /// Closest palette name, when one scores at or above the cutoff.
    pub name: Option<String>,
    /// Similarity score of the matched name, 0-100.
    pub confidence: Option<u8>,
}

impl ConversionResult {
    /// Derive every representation of an already-validated RGB colour.
    #[must_use]
    pub fn derive(palette: &Palette, rgb: Rgb) -> Self {
        let hex = rgb.hex();
        let matched = palette.find_name_by_hex(&hex);
        debug!("derived {hex}, palette match: {matched:?}");
        Self {
            rgb,
            hsv: rgb.to_hsv(),
            hsl: rgb.to_hsl(),
            cmyk: rgb.to_cmyk(),
            hex,
            name: matched.map(|(name, _)| name.to_string()),
            confidence: matched.map(|(_, score)| score),
        }
    }

    /// Label/value rows for each representation, in presentation order.
    ///
    /// The `Name` row falls back to a `No match found` placeholder so the
    /// table always has six rows.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("RGB", self.rgb.to_string()),
            ("HSV", self.hsv.to_string()),
            ("HSL", self.hsl.to_string()),
            ("CMYK", self.cmyk.to_string()),
            ("Hex", self.hex.clone()),
            (
                "Name",
                self.name.clone().unwrap_or_else(|| "No match found".to_string()),
            ),
        ]
    }
}

/// Validate one input representation and normalize it to RGB.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] for out-of-range or malformed
/// fields and [`ConversionError::NoMatchFound`] when a name lookup misses
/// the similarity cutoff.
pub fn resolve(palette: &Palette, input: ColourInput) -> Result<Rgb, ConversionError> {
    match input {
        ColourInput::Rgb { red, green, blue } => Ok(Rgb::new(red, green, blue)?),
        ColourInput::Hsv { hue, saturation, value } => {
            Ok(Rgb::from_hsv(Hsv::new(hue, saturation, value)?))
        }
        ColourInput::Hsl { hue, saturation, lightness } => {
            Ok(Rgb::from_hsl(Hsl::new(hue, saturation, lightness)?))
        }
        ColourInput::Cmyk { cyan, magenta, yellow, key } => {
            Ok(Rgb::from_cmyk(Cmyk::new(cyan, magenta, yellow, key)?))
        }
        ColourInput::Hex(code) => Ok(Rgb::parse_hex(&code)?),
        ColourInput::Name(query) => {
            let hex = palette
                .find_hex_by_name(&query)
                .ok_or_else(|| ConversionError::NoMatchFound { query: query.clone() })?;
            Ok(Rgb::parse_hex(hex)?)
        }
        ColourInput::Random => Ok(Rgb::parse_hex(&palette.random_entry().hex)?),
    }
}

/// Validate, normalize, and derive the full set of representations.
///
/// # Errors
///
/// Same failure modes as [`resolve`]; a failed conversion never yields a
/// partial [`ConversionResult`].
pub fn convert(palette: &Palette, input: ColourInput) -> Result<ConversionResult, ConversionError> {
    let rgb = resolve(palette, input)?;
    Ok(ConversionResult::derive(palette, rgb))
}

/// Convert from RGB channel values.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] if any channel is outside 0-255.
pub fn convert_rgb(
    palette: &Palette,
    red: i64,
    green: i64,
    blue: i64,
) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Rgb { red, green, blue })
}

/// Convert from HSV values.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] if hue is outside 0-360 or
/// saturation/value are outside 0-100.
pub fn convert_hsv(
    palette: &Palette,
    hue: i64,
    saturation: i64,
    value: i64,
) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Hsv { hue, saturation, value })
}

/// Convert from HSL values.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] if hue is outside 0-360 or
/// saturation/lightness are outside 0-100.
pub fn convert_hsl(
    palette: &Palette,
    hue: i64,
    saturation: i64,
    lightness: i64,
) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Hsl { hue, saturation, lightness })
}

/// Convert from CMYK values.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] if any component is outside
/// 0-100.
pub fn convert_cmyk(
    palette: &Palette,
    cyan: i64,
    magenta: i64,
    yellow: i64,
    key: i64,
) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Cmyk { cyan, magenta, yellow, key })
}

/// Convert from a hex code.
///
/// # Errors
///
/// Returns [`ConversionError::InvalidInput`] for anything but 3, 4, 6 or 8
/// hex digits with an optional leading `#`.
pub fn convert_hex(palette: &Palette, code: &str) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Hex(code.to_string()))
}

/// Convert from an approximate colour name.
///
/// # Errors
///
/// Returns [`ConversionError::NoMatchFound`] when nothing scores at or above
/// the similarity cutoff.
pub fn convert_name(palette: &Palette, query: &str) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Name(query.to_string()))
}

/// Convert a randomly chosen palette entry.
///
/// # Errors
///
/// Infallible in practice; typed for uniformity with the other entry points.
pub fn convert_random(palette: &Palette) -> Result<ConversionResult, ConversionError> {
    convert(palette, ColourInput::Random)
}
