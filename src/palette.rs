//! The fixed reference table of named colours.
//!
//! A [`Palette`] is loaded once from a JSON object mapping colour name to
//! 6-hex-digit code, then shared read-only. Lookups in both directions use
//! the similarity score from [`crate::fuzzy`] with the
//! [`SCORE_CUTOFF`](crate::fuzzy::SCORE_CUTOFF) threshold.
//!
//! The bundled table is exposed through [`Palette::default_palette`]; its
//! JSON source carries a reserved `"_"` key crediting the data origin, which
//! is validated and then stripped from the usable table.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{LazyLock, Mutex};

use log::debug;
use lru::LruCache;
use rand::Rng;

use crate::fuzzy::{SCORE_CUTOFF, ratio};

/// Reserved key marking data provenance in the palette resource.
pub const PROVENANCE_KEY: &str = "_";

const NAME_CACHE_CAPACITY: usize = 1024;

/// One named colour: human-readable name plus canonical hex code
/// (6 uppercase digits, no `#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub name: String,
    pub hex: String,
}

/// Error type for palette loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteLoadError {
    /// The source is not a JSON object of string values.
    Malformed(String),
    /// The reserved provenance key is absent.
    MissingProvenance,
    /// No usable entries remain after stripping the provenance key.
    Empty,
    /// An entry has an empty name or a code that is not 6 hex digits.
    InvalidEntry { name: String, hex: String },
}

impl fmt::Display for PaletteLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(detail) => write!(f, "malformed palette source: {detail}"),
            Self::MissingProvenance => {
                write!(f, "palette source lacks the `{PROVENANCE_KEY}` provenance key")
            }
            Self::Empty => write!(f, "palette source has no usable entries"),
            Self::InvalidEntry { name, hex } => {
                write!(f, "invalid palette entry `{name}`: `{hex}` is not a 6-hex-digit code")
            }
        }
    }
}

impl std::error::Error for PaletteLoadError {}

/// Immutable name-to-hex reference table with fuzzy lookup.
pub struct Palette {
    entries: Vec<PaletteEntry>,
    // Fuzzy name lookups scan every entry; repeat queries hit this instead.
    name_cache: Mutex<LruCache<String, Option<usize>>>,
}

impl Palette {
    /// Parse and validate a palette from its JSON source.
    ///
    /// Entry order follows the source; it is the tie-breaking order for
    /// equal-scoring fuzzy matches. The provenance entry is required and is
    /// stripped from the usable table.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteLoadError`] if the source is not a JSON object of
    /// strings, lacks the provenance key, contains an invalid entry, or is
    /// empty once the provenance key is removed.
    pub fn load(source: &str) -> Result<Self, PaletteLoadError> {
        let value: serde_json::Value = serde_json::from_str(source)
            .map_err(|e| PaletteLoadError::Malformed(e.to_string()))?;
        let map = value
            .as_object()
            .ok_or_else(|| PaletteLoadError::Malformed("expected a JSON object".to_string()))?;

        let mut entries = Vec::with_capacity(map.len().saturating_sub(1));
        let mut provenance_seen = false;
        for (name, code) in map {
            let Some(code) = code.as_str() else {
                return Err(PaletteLoadError::Malformed(format!(
                    "value for `{name}` is not a string"
                )));
            };
            if name.as_str() == PROVENANCE_KEY {
                provenance_seen = true;
                continue;
            }
            if name.is_empty() || code.len() != 6 || !code.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(PaletteLoadError::InvalidEntry {
                    name: name.clone(),
                    hex: code.to_string(),
                });
            }
            entries.push(PaletteEntry {
                name: name.clone(),
                hex: code.to_ascii_uppercase(),
            });
        }

        if !provenance_seen {
            return Err(PaletteLoadError::MissingProvenance);
        }
        if entries.is_empty() {
            return Err(PaletteLoadError::Empty);
        }

        debug!("loaded palette with {} entries", entries.len());
        Ok(Self {
            entries,
            name_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(NAME_CACHE_CAPACITY).expect("non-zero"),
            )),
        })
    }

    /// The bundled reference palette, loaded once per process.
    ///
    /// # Panics
    ///
    /// Panics if the embedded resource is invalid, which only a broken build
    /// can produce.
    #[must_use]
    pub fn default_palette() -> &'static Self {
        static DEFAULT: LazyLock<Palette> = LazyLock::new(|| {
            match Palette::load(include_str!("../data/colours.json")) {
                Ok(palette) => palette,
                Err(e) => panic!("embedded colour table is invalid: {e}"),
            }
        });
        &DEFAULT
    }

    /// Find the entry whose hex code is most similar to `hex`.
    ///
    /// The query may carry a leading `#` and any letter case. Returns the
    /// best-scoring name and its score when the score reaches the cutoff;
    /// the first entry in palette order wins ties.
    #[must_use]
    pub fn find_name_by_hex(&self, hex: &str) -> Option<(&str, u8)> {
        let query = hex.trim().trim_start_matches('#').to_ascii_uppercase();

        let mut best: Option<(&PaletteEntry, u8)> = None;
        for entry in &self.entries {
            let score = ratio(&query, &entry.hex);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((entry, score));
            }
        }

        let (entry, score) = best?;
        if score < SCORE_CUTOFF {
            debug!("no hex match for `{query}` (best score {score})");
            return None;
        }
        Some((entry.name.as_str(), score))
    }

    /// Find the hex code of the entry whose name is most similar to `query`.
    ///
    /// Case-insensitive; the cutoff and tie-breaking rules match
    /// [`Self::find_name_by_hex`]. Results are cached per query.
    #[must_use]
    pub fn find_hex_by_name(&self, query: &str) -> Option<&str> {
        let needle = query.trim().to_lowercase();

        if let Ok(mut cache) = self.name_cache.lock()
            && let Some(&hit) = cache.get(&needle)
        {
            return hit.map(|index| self.entries[index].hex.as_str());
        }

        let mut best: Option<(usize, u8)> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            let score = ratio(&needle, &entry.name.to_lowercase());
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        let found = best.and_then(|(index, score)| (score >= SCORE_CUTOFF).then_some(index));
        if found.is_none() {
            debug!("no name match for `{needle}`");
        }

        if let Ok(mut cache) = self.name_cache.lock() {
            cache.put(needle, found);
        }
        found.map(|index| self.entries[index].hex.as_str())
    }

    /// A uniformly random entry.
    #[must_use]
    pub fn random_entry(&self) -> &PaletteEntry {
        // Load guarantees at least one entry.
        let index = rand::thread_rng().gen_range(0..self.entries.len());
        &self.entries[index]
    }

    /// Entries in palette order.
    pub fn entries(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Number of usable entries (the provenance key never counts).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_palette() -> Palette {
        Palette::load(r#"{"_": "test data", "Red": "FF0000"}"#).unwrap()
    }

    #[test]
    fn test_load_strips_provenance() {
        let palette = red_palette();
        assert_eq!(palette.len(), 1);
        assert_eq!(
            palette.entries().next().unwrap(),
            &PaletteEntry { name: "Red".to_string(), hex: "FF0000".to_string() }
        );
    }

    #[test]
    fn test_load_canonicalizes_hex_case() {
        let palette = Palette::load(r#"{"_": "x", "Red": "ff0000"}"#).unwrap();
        assert_eq!(palette.entries().next().unwrap().hex, "FF0000");
    }

    #[test]
    fn test_load_rejects_non_object() {
        assert!(matches!(
            Palette::load(r#"["FF0000"]"#),
            Err(PaletteLoadError::Malformed(_))
        ));
        assert!(matches!(
            Palette::load("not json at all"),
            Err(PaletteLoadError::Malformed(_))
        ));
        assert!(matches!(
            Palette::load(r#"{"_": "x", "Red": 255}"#),
            Err(PaletteLoadError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_requires_provenance() {
        assert_eq!(
            Palette::load("{}").unwrap_err(),
            PaletteLoadError::MissingProvenance
        );
        assert_eq!(
            Palette::load(r#"{"Red": "FF0000"}"#).unwrap_err(),
            PaletteLoadError::MissingProvenance
        );
    }

    #[test]
    fn test_load_rejects_empty_table() {
        assert_eq!(
            Palette::load(r#"{"_": "credit only"}"#).unwrap_err(),
            PaletteLoadError::Empty
        );
    }

    #[test]
    fn test_load_rejects_invalid_entries() {
        assert_eq!(
            Palette::load(r#"{"_": "x", "Red": "FF00"}"#).unwrap_err(),
            PaletteLoadError::InvalidEntry { name: "Red".to_string(), hex: "FF00".to_string() }
        );
        assert!(matches!(
            Palette::load(r#"{"_": "x", "Red": "GG0000"}"#),
            Err(PaletteLoadError::InvalidEntry { .. })
        ));
        assert!(matches!(
            Palette::load(r#"{"_": "x", "": "FF0000"}"#),
            Err(PaletteLoadError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_find_name_by_hex_fuzzy() {
        let palette = red_palette();
        let (name, score) = palette.find_name_by_hex("#FE0000").unwrap();
        assert_eq!(name, "Red");
        assert!(score >= SCORE_CUTOFF);
    }

    #[test]
    fn test_find_name_by_hex_exact() {
        let palette = red_palette();
        assert_eq!(palette.find_name_by_hex("#FF0000"), Some(("Red", 100)));
        // leading # optional, case-insensitive
        assert_eq!(palette.find_name_by_hex("ff0000"), Some(("Red", 100)));
    }

    #[test]
    fn test_find_name_by_hex_below_cutoff() {
        let palette = red_palette();
        assert_eq!(palette.find_name_by_hex("#000000"), None);
    }

    #[test]
    fn test_find_hex_by_name_fuzzy() {
        let palette = red_palette();
        assert_eq!(palette.find_hex_by_name("redd"), Some("FF0000"));
        assert_eq!(palette.find_hex_by_name("RED"), Some("FF0000"));
        assert_eq!(palette.find_hex_by_name("zzzzz"), None);
    }

    #[test]
    fn test_find_hex_by_name_cached_queries_agree() {
        let palette = red_palette();
        let first = palette.find_hex_by_name("redd").map(ToOwned::to_owned);
        let second = palette.find_hex_by_name("redd").map(ToOwned::to_owned);
        assert_eq!(first, second);
        assert_eq!(palette.find_hex_by_name("zzzzz"), None);
        assert_eq!(palette.find_hex_by_name("zzzzz"), None);
    }

    #[test]
    fn test_tie_break_is_first_in_palette_order() {
        let palette = Palette::load(
            r#"{"_": "x", "Reda": "111111", "Redb": "222222"}"#,
        )
        .unwrap();
        // "red" scores Reda and Redb identically; the earlier entry wins.
        assert_eq!(palette.find_hex_by_name("red"), Some("111111"));
    }

    #[test]
    fn test_random_entry_is_a_member() {
        let palette = Palette::default_palette();
        for _ in 0..32 {
            let chosen = palette.random_entry();
            assert!(palette.entries().any(|e| e == chosen));
        }
    }

    #[test]
    fn test_default_palette_loads() {
        let palette = Palette::default_palette();
        assert!(!palette.is_empty());
        assert_eq!(palette.find_hex_by_name("red"), Some("FF0000"));
        // every stored code is canonical
        for entry in palette.entries() {
            assert_eq!(entry.hex.len(), 6);
            assert_eq!(entry.hex, entry.hex.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_default_palette_duplicate_hex_tie_break() {
        // Aqua and Cyan share 00FFFF; Aqua comes first in the resource.
        let palette = Palette::default_palette();
        assert_eq!(palette.find_name_by_hex("#00FFFF"), Some(("Aqua", 100)));
    }
}
