//! Locale bundle encoding, decoding, and fallback resolution.
//!
//! Source definitions carry display text as locale-keyed mappings
//! (`{en: "Frigate", ja: "フリゲート"}`). The store keeps each of these as a
//! single opaque JSON string; this module is the only place that serializes
//! or deserializes that payload.
//!
//! ## Fallback
//!
//! Rendering always produces a value for every supported locale. Each locale
//! is resolved independently:
//! 1. the locale's own entry, if present;
//! 2. else the default locale's entry (`en`), if present;
//! 3. else the empty string.
//!
//! The supported set and its order are fixed — table columns and detail rows
//! across the whole generated site follow [`Locale::ALL`].

use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("unparseable locale bundle {payload:?}: {source}")]
pub struct DecodeError {
    payload: String,
    source: serde_json::Error,
}

/// The supported locales, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    Ja,
    Ru,
    De,
    Fr,
    Zh,
}

impl Locale {
    /// Every supported locale, in the order tables and detail views use.
    pub const ALL: [Locale; 6] = [
        Locale::En,
        Locale::Ja,
        Locale::Ru,
        Locale::De,
        Locale::Fr,
        Locale::Zh,
    ];

    /// Fallback source when a locale has no entry of its own.
    pub const DEFAULT: Locale = Locale::En;

    /// Key used inside serialized bundles.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ja => "ja",
            Locale::Ru => "ru",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Zh => "zh",
        }
    }

    /// Column caption in rendered tables.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Ja => "Japanese",
            Locale::Ru => "Russian",
            Locale::De => "German",
            Locale::Fr => "French",
            Locale::Zh => "Chinese",
        }
    }
}

/// A bundle resolved against every supported locale.
///
/// Holds one text per entry of [`Locale::ALL`], in that order, with the
/// fallback rule already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized {
    texts: [String; 6],
}

impl Localized {
    /// Resolved text for one locale.
    pub fn get(&self, locale: Locale) -> &str {
        &self.texts[locale as usize]
    }

    /// Resolved text for the first supported locale — used as page titles
    /// and link labels (the site's editorial language).
    pub fn primary(&self) -> &str {
        self.get(Locale::ALL[0])
    }
}

/// Serialize a locale bundle to its stored form.
///
/// The empty bundle encodes to `{}`, which is what the importer stores for
/// absent source fields.
pub fn encode(bundle: &BTreeMap<String, String>) -> Result<String, serde_json::Error> {
    serde_json::to_string(bundle)
}

/// Decode a stored payload and resolve every supported locale.
///
/// A payload that is not a JSON object of strings is fatal for the record —
/// the error propagates, nothing is substituted.
pub fn decode(serialized: &str) -> Result<Localized, DecodeError> {
    let raw: BTreeMap<String, String> =
        serde_json::from_str(serialized).map_err(|source| DecodeError {
            payload: serialized.to_string(),
            source,
        })?;

    let fallback = raw.get(Locale::DEFAULT.code());
    let texts = Locale::ALL.map(|locale| {
        raw.get(locale.code())
            .or(fallback)
            .cloned()
            .unwrap_or_default()
    });
    Ok(Localized { texts })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[(&str, &str)]) -> String {
        let map: BTreeMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        encode(&map).unwrap()
    }

    #[test]
    fn locale_order_is_fixed() {
        let codes: Vec<&str> = Locale::ALL.iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["en", "ja", "ru", "de", "fr", "zh"]);
    }

    #[test]
    fn exact_locale_wins_over_fallback() {
        let resolved = decode(&bundle(&[("en", "Frigate"), ("ja", "フリゲート")])).unwrap();
        assert_eq!(resolved.get(Locale::Ja), "フリゲート");
        assert_eq!(resolved.get(Locale::En), "Frigate");
    }

    #[test]
    fn missing_locales_fall_back_to_default() {
        let resolved = decode(&bundle(&[("en", "Ship")])).unwrap();
        for locale in Locale::ALL {
            assert_eq!(resolved.get(locale), "Ship", "locale {}", locale.code());
        }
    }

    #[test]
    fn missing_default_leaves_other_locales_empty() {
        // No fallback target exists; each locale resolves on its own.
        let resolved = decode(&bundle(&[("ja", "フリゲート")])).unwrap();
        assert_eq!(resolved.get(Locale::Ja), "フリゲート");
        for locale in Locale::ALL {
            if locale != Locale::Ja {
                assert_eq!(resolved.get(locale), "", "locale {}", locale.code());
            }
        }
    }

    #[test]
    fn empty_bundle_resolves_all_empty() {
        let resolved = decode("{}").unwrap();
        for locale in Locale::ALL {
            assert_eq!(resolved.get(locale), "");
        }
    }

    #[test]
    fn empty_map_encodes_to_empty_object() {
        assert_eq!(encode(&BTreeMap::new()).unwrap(), "{}");
    }

    #[test]
    fn unparseable_payload_is_fatal() {
        assert!(decode("not json").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn primary_is_the_first_supported_locale() {
        let resolved = decode(&bundle(&[("en", "Rifter"), ("ru", "Рифтер")])).unwrap();
        assert_eq!(resolved.primary(), "Rifter");
    }
}
