//! # colourful
//!
//! Colour-model conversions and fuzzy palette matching, the core behind a
//! colour-info chat command.
//!
//! Given one representation of a colour (RGB, HSV, HSL, CMYK, a hex code,
//! or an approximate name), the crate validates it, normalizes it to RGB,
//! and derives every other representation plus the closest named colour in
//! a fixed reference palette.
//!
//! ## Quick Start
//!
//! ```rust
//! use colourful::prelude::*;
//!
//! let palette = Palette::default_palette();
//! let result = convert(palette, ColourInput::Name("redd".to_string())).unwrap();
//! assert_eq!(result.hex, "#FF0000");
//! assert_eq!(result.hsv, Hsv { hue: 0, saturation: 100, value: 100 });
//! ```
//!
//! ## Core Concepts
//!
//! - **Rgb**: The canonical pivot; every conversion passes through it
//! - **Palette**: Immutable name-to-hex reference table with fuzzy lookup
//! - **ColourInput**: One tagged input variant per supported representation
//! - **ConversionResult**: Every derived representation of one colour
//!
//! All operations are synchronous and side-effect-free; the palette is
//! loaded once and shared read-only, so requests can run concurrently
//! without locking.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod colour;
pub mod convert;
pub mod fuzzy;
pub mod palette;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::colour::{Cmyk, Hsl, Hsv, InvalidColourInput, Rgb};
    pub use crate::convert::{ColourInput, ConversionError, ConversionResult, convert, resolve};
    pub use crate::palette::{Palette, PaletteEntry, PaletteLoadError};
}

// Re-export key types at crate root
pub use colour::{Cmyk, Hsl, Hsv, InvalidColourInput, Rgb};
pub use convert::{ColourInput, ConversionError, ConversionResult, convert};
pub use palette::{Palette, PaletteEntry, PaletteLoadError};
