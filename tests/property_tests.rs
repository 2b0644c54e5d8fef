//! Property-based tests for colourful.
//!
//! Uses proptest to verify the conversion invariants with 1000+ generated
//! cases: round trips through the derived models, range clamping, and the
//! resolve path never failing on in-range input.
//!
//! Round trips are checked against per-model worst-case bounds derived from
//! the quantization steps, not the typical drift: hue rounds to whole
//! degrees (±0.5°, moving a fully saturated channel by up to 255·6/720 ≈
//! 2.2 units), and each percent-valued component rounds by ±0.5 (up to
//! 255/200 ≈ 1.3 units, with lightness carrying twice that weight in the
//! HSL transform). Summing the terms and the final channel rounding gives
//! HSV ≤ 5, HSL ≤ 6, and CMYK ≤ 3.

use proptest::prelude::*;

use colourful::colour::Rgb;
use colourful::convert::{ColourInput, convert, resolve};
use colourful::fuzzy::ratio;
use colourful::palette::Palette;

// ceil(2.125 + 1.275 + 1.275 + 0.5)
const HSV_TOLERANCE: u8 = 5;
// ceil(2.125 + 1.275 + 2.55 + 0.5)
const HSL_TOLERANCE: u8 = 6;
// ceil(1.275 + 1.275 + 0.5)
const CMYK_TOLERANCE: u8 = 3;

fn rgb_triplet() -> impl Strategy<Value = Rgb> {
    (any::<u8>(), any::<u8>(), any::<u8>())
        .prop_map(|(r, g, b)| Rgb::from_channels(r, g, b))
}

fn assert_within_tolerance(
    original: Rgb,
    back: Rgb,
    tolerance: u8,
    label: &str,
) -> Result<(), TestCaseError> {
    prop_assert!(
        original.red.abs_diff(back.red) <= tolerance
            && original.green.abs_diff(back.green) <= tolerance
            && original.blue.abs_diff(back.blue) <= tolerance,
        "{} round trip drifted: {} -> {}",
        label,
        original,
        back
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// RGB -> HSV -> RGB reproduces the original within tolerance.
    #[test]
    fn prop_hsv_round_trip(rgb in rgb_triplet()) {
        assert_within_tolerance(rgb, Rgb::from_hsv(rgb.to_hsv()), HSV_TOLERANCE, "hsv")?;
    }

    /// RGB -> HSL -> RGB reproduces the original within tolerance.
    #[test]
    fn prop_hsl_round_trip(rgb in rgb_triplet()) {
        assert_within_tolerance(rgb, Rgb::from_hsl(rgb.to_hsl()), HSL_TOLERANCE, "hsl")?;
    }

    /// RGB -> CMYK -> RGB reproduces the original within tolerance.
    #[test]
    fn prop_cmyk_round_trip(rgb in rgb_triplet()) {
        assert_within_tolerance(rgb, Rgb::from_cmyk(rgb.to_cmyk()), CMYK_TOLERANCE, "cmyk")?;
    }

    /// Hex round trip is exact: format then parse returns the original.
    #[test]
    fn prop_hex_round_trip(rgb in rgb_triplet()) {
        prop_assert_eq!(Rgb::parse_hex(&rgb.hex()).unwrap(), rgb);
    }

    /// Derived model values always sit inside their documented ranges.
    #[test]
    fn prop_derived_values_in_range(rgb in rgb_triplet()) {
        let hsv = rgb.to_hsv();
        prop_assert!(hsv.hue <= 360 && hsv.saturation <= 100 && hsv.value <= 100);

        let hsl = rgb.to_hsl();
        prop_assert!(hsl.hue <= 360 && hsl.saturation <= 100 && hsl.lightness <= 100);

        let cmyk = rgb.to_cmyk();
        prop_assert!(
            cmyk.cyan <= 100 && cmyk.magenta <= 100 && cmyk.yellow <= 100 && cmyk.key <= 100
        );
    }

    /// Every in-range HSV input resolves without error.
    #[test]
    fn prop_resolve_accepts_in_range_hsv(
        hue in 0i64..=360,
        saturation in 0i64..=100,
        value in 0i64..=100,
    ) {
        let palette = Palette::default_palette();
        let input = ColourInput::Hsv { hue, saturation, value };
        prop_assert!(resolve(palette, input).is_ok());
    }

    /// Every in-range CMYK input resolves without error.
    #[test]
    fn prop_resolve_accepts_in_range_cmyk(
        cyan in 0i64..=100,
        magenta in 0i64..=100,
        yellow in 0i64..=100,
        key in 0i64..=100,
    ) {
        let palette = Palette::default_palette();
        let input = ColourInput::Cmyk { cyan, magenta, yellow, key };
        prop_assert!(resolve(palette, input).is_ok());
    }

    /// convert() always reports the canonical hex of the resolved RGB and a
    /// confidence only alongside a name.
    #[test]
    fn prop_convert_result_is_consistent(rgb in rgb_triplet()) {
        let palette = Palette::default_palette();
        let input = ColourInput::Rgb {
            red: i64::from(rgb.red),
            green: i64::from(rgb.green),
            blue: i64::from(rgb.blue),
        };
        let result = convert(palette, input).unwrap();
        prop_assert_eq!(result.rgb, rgb);
        let expected_hex = rgb.hex();
        prop_assert_eq!(result.hex.as_str(), expected_hex.as_str());
        prop_assert_eq!(result.name.is_some(), result.confidence.is_some());
        if let Some(confidence) = result.confidence {
            prop_assert!(confidence >= 80);
        }
    }

    /// The similarity ratio is symmetric, bounded, and reflexive.
    #[test]
    fn prop_ratio_laws(a in "[a-zA-Z0-9]{0,12}", b in "[a-zA-Z0-9]{0,12}") {
        let forward = ratio(&a, &b);
        prop_assert!(forward <= 100);
        prop_assert_eq!(forward, ratio(&b, &a));
        prop_assert_eq!(ratio(&a, &a), 100);
    }
}
