//! Localization resolver
//!
//! Language tables are flat `key = "value"` TOML files embedded at compile
//! time. English is the mandatory default: it covers both a missing language
//! and a key missing from a present language.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Amenity, Station};

/// Supported interface languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Tamil,
    Malayalam,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Malayalam,
    ];

    /// Code used as the table key and in settings
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Malayalam => "Malayalam",
        }
    }

    /// Label written in the language itself, as shown on the picker
    pub fn native_label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Tamil => "தமிழ்",
            Language::Malayalam => "മലയാളം",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "hindi" | "hi" => Ok(Language::Hindi),
            "tamil" | "ta" => Ok(Language::Tamil),
            "malayalam" | "ml" => Ok(Language::Malayalam),
            other => Err(Error::invalid_command(format!("unknown language '{other}'"))),
        }
    }
}

/// Anything whose display name may be localized
pub trait Localized {
    fn translation_key(&self) -> Option<&str>;
    fn literal_name(&self) -> &str;
}

impl Localized for Station {
    fn translation_key(&self) -> Option<&str> {
        self.translation_key.as_deref()
    }

    fn literal_name(&self) -> &str {
        &self.name
    }
}

impl Localized for Amenity {
    fn translation_key(&self) -> Option<&str> {
        self.translation_key.as_deref()
    }

    fn literal_name(&self) -> &str {
        &self.name
    }
}

/// One language's key → display string mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LanguageTable(HashMap<String, String>);

impl LanguageTable {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Single-table lookup: `table[key]` when the entity has a key present in
/// the table, otherwise the literal name.
pub fn resolve<'a, E: Localized + ?Sized>(entity: &'a E, table: &'a LanguageTable) -> &'a str {
    entity
        .translation_key()
        .and_then(|key| table.get(key))
        .unwrap_or_else(|| entity.literal_name())
}

const BUILTIN_SOURCES: [(Language, &str); 4] = [
    (Language::English, include_str!("../locales/en.toml")),
    (Language::Hindi, include_str!("../locales/hi.toml")),
    (Language::Tamil, include_str!("../locales/ta.toml")),
    (Language::Malayalam, include_str!("../locales/ml.toml")),
];

/// All loaded language tables, keyed by language code
#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<String, LanguageTable>,
    default_code: String,
}

impl Translations {
    /// Build from explicit tables. The default language must be present.
    pub fn new(
        tables: impl IntoIterator<Item = (String, LanguageTable)>,
        default_code: impl Into<String>,
    ) -> Result<Self> {
        let tables: HashMap<_, _> = tables.into_iter().collect();
        let default_code = default_code.into();
        if !tables.contains_key(&default_code) {
            return Err(Error::config(format!(
                "default language table '{default_code}' is missing"
            )));
        }
        Ok(Self {
            tables,
            default_code,
        })
    }

    /// The four embedded tables, English as default
    pub fn builtin() -> Result<Self> {
        let mut tables = Vec::with_capacity(BUILTIN_SOURCES.len());
        for (language, source) in BUILTIN_SOURCES {
            let table = LanguageTable::parse(source).map_err(|e| {
                Error::config(format!("locale table for {language} is invalid: {e}"))
            })?;
            tables.push((language.code().to_string(), table));
        }
        Self::new(tables, Language::default().code())
    }

    pub fn default_table(&self) -> &LanguageTable {
        // Presence checked in `new`.
        &self.tables[&self.default_code]
    }

    /// Table for `code`, or the default table when that language has none.
    ///
    /// Short codes and names accepted by [`Language::from_str`] (`hi`,
    /// `tamil`, ...) select the same table as [`Language::code`].
    pub fn table_for(&self, code: &str) -> &LanguageTable {
        self.tables
            .get(code)
            .or_else(|| {
                code.parse::<Language>()
                    .ok()
                    .and_then(|language| self.tables.get(language.code()))
            })
            .unwrap_or_else(|| self.default_table())
    }

    pub fn resolver(&self, code: &str) -> Resolver<'_> {
        Resolver {
            active: self.table_for(code),
            default: self.default_table(),
        }
    }
}

/// Lookups bound to one language, with layered fallback:
/// active table, then default table, then the literal.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    active: &'a LanguageTable,
    default: &'a LanguageTable,
}

impl<'a> Resolver<'a> {
    fn lookup(&self, key: &str) -> Option<&'a str> {
        self.active.get(key).or_else(|| self.default.get(key))
    }

    /// Display name of a station or amenity
    pub fn resolve<'e, E: Localized + ?Sized>(&self, entity: &'e E) -> &'e str
    where
        'a: 'e,
    {
        entity
            .translation_key()
            .and_then(|key| self.lookup(key))
            .unwrap_or_else(|| entity.literal_name())
    }

    /// UI string; an unknown key yields the key itself
    pub fn text<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        self.lookup(key).unwrap_or(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;

    fn station(key: Option<&str>, name: &str) -> Station {
        Station {
            id: "x".into(),
            name: name.to_string(),
            translation_key: key.map(str::to_string),
            distance: "1 km".to_string(),
            line: None,
            is_favorite: false,
        }
    }

    fn sample() -> Translations {
        let en: LanguageTable = [("station_A", "Alpha"), ("only_en", "English only")]
            .into_iter()
            .collect();
        let hi: LanguageTable = [("station_A", "अल्फा")].into_iter().collect();
        Translations::new(
            [("English".to_string(), en), ("Hindi".to_string(), hi)],
            "English",
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_uses_table_value() {
        let t = sample();
        let s = station(Some("station_A"), "Alpha Literal");
        assert_eq!(resolve(&s, t.table_for("Hindi")), "अल्फा");
    }

    #[test]
    fn test_resolve_without_key_is_literal() {
        let t = sample();
        let s = station(None, "Plain");
        assert_eq!(resolve(&s, t.table_for("Hindi")), "Plain");
        assert_eq!(t.resolver("Hindi").resolve(&s), "Plain");
    }

    #[test]
    fn test_missing_key_in_both_tables_is_literal() {
        let t = sample();
        let s = station(Some("station_Z"), "Zeta");
        assert_eq!(t.resolver("Hindi").resolve(&s), "Zeta");
    }

    #[test]
    fn test_missing_key_falls_back_to_default_table() {
        let t = sample();
        let s = station(Some("only_en"), "literal");
        assert_eq!(t.resolver("Hindi").resolve(&s), "English only");
        // the single-table contract does not layer
        assert_eq!(resolve(&s, t.table_for("Hindi")), "literal");
    }

    #[test]
    fn test_unknown_language_uses_default() {
        let t = sample();
        let s = station(Some("station_A"), "literal");
        assert_eq!(t.resolver("Klingon").resolve(&s), "Alpha");
    }

    #[test]
    fn test_short_codes_select_language_table() {
        let t = sample();
        let s = station(Some("station_A"), "literal");
        assert_eq!(t.resolver("hi").resolve(&s), "अल्फा");
        assert_eq!(t.resolver("HINDI").resolve(&s), "अल्फा");
        assert_eq!(resolve(&s, t.table_for("hi")), "अल्फा");
    }

    #[test]
    fn test_builtin_short_code_matches_full_code() {
        let t = Translations::builtin().unwrap();
        for (short, language) in [
            ("en", Language::English),
            ("hi", Language::Hindi),
            ("ta", Language::Tamil),
            ("ml", Language::Malayalam),
        ] {
            assert_eq!(
                t.resolver(short).text("chatTrainResponse"),
                t.resolver(language.code()).text("chatTrainResponse"),
                "{short}"
            );
        }
        assert_ne!(
            t.resolver("hi").text("chatTrainResponse"),
            t.resolver("en").text("chatTrainResponse")
        );
    }

    #[test]
    fn test_text_falls_back_to_key() {
        let t = sample();
        assert_eq!(t.resolver("English").text("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn test_default_table_required() {
        let err = Translations::new(Vec::new(), "English").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_builtin_tables_load() {
        let t = Translations::builtin().unwrap();
        for language in Language::ALL {
            assert!(!t.table_for(language.code()).is_empty(), "{language}");
        }
    }

    #[test]
    fn test_builtin_covers_every_catalog_key_in_english() {
        let t = Translations::builtin().unwrap();
        let en = t.default_table();
        let catalog = builtin();
        for s in catalog.station_universe() {
            if let Some(key) = s.translation_key() {
                assert!(en.get(key).is_some(), "missing {key}");
            }
        }
        for a in catalog.amenities() {
            if let Some(key) = a.translation_key() {
                assert!(en.get(key).is_some(), "missing {key}");
            }
        }
    }

    #[test]
    fn test_builtin_partial_table_falls_back_to_english() {
        let t = Translations::builtin().unwrap();
        assert!(t.table_for("Tamil").get("navHeavyCrowd").is_none());
        assert_eq!(
            t.resolver("Tamil").text("navHeavyCrowd"),
            "Heavy crowd expected near the main entrance"
        );
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("Hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("ml".parse::<Language>().unwrap(), Language::Malayalam);
        assert!("French".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serializes_as_code() {
        let json = serde_json::to_string(&Language::Tamil).unwrap();
        assert_eq!(json, "\"Tamil\"");
    }
}
