//! UI translation strings and their lookup cache.

use crate::cache::EntityCache;
use denkmal_core::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, Default)]
struct Translations {
    de: Option<&'static str>,
    cs: Option<&'static str>,
}

impl Translations {
    const fn de(de: &'static str) -> Self {
        Self {
            de: Some(de),
            cs: None,
        }
    }

    fn for_language(&self, language: Language) -> Option<&'static str> {
        match language {
            Language::En => None,
            Language::De => self.de,
            Language::Cs => self.cs,
        }
    }
}

/// Source strings are the English UI literals; values carry the available
/// translations.
static LIBRARY: Lazy<HashMap<&'static str, Translations>> = Lazy::new(|| {
    HashMap::from([
        ("About", Translations::de("Über")),
        ("Address", Translations::de("Adresse")),
        ("Also known as", Translations::de("Auch bekannt als")),
        ("Author", Translations::de("Autor/in")),
        ("Authors", Translations::de("Autor/innen")),
        ("Back to homepage.", Translations::de("Zurück zur Startseite.")),
        ("Biography", Translations::de("Biographie")),
        ("Born", Translations::de("Geboren")),
        ("Close", Translations::de("Schließen")),
        ("Description", Translations::de("Beschreibung")),
        (
            "Detailed description",
            Translations::de("Detaillierte Beschreibung"),
        ),
        ("Died", Translations::de("Gestorben")),
        ("Directions", Translations::de("Wegbeschreibung")),
        ("Discover", Translations::de("Entdecken")),
        ("Error", Translations::de("Fehler")),
        ("Genres", Translations::de("Genres")),
        (
            "Imprint & data protection",
            Translations::de("Impressum & Datenschutz"),
        ),
        ("Intro", Translations::de("Einleitung")),
        ("Keyword search", Translations::de("Schlagwortsuche")),
        ("Language", Translations::de("Sprache")),
        ("Languages", Translations::de("Sprachen")),
        (
            "Literary landscape",
            Translations::de("Literaturlandschaft"),
        ),
        ("Map", Translations::de("Karte")),
        ("Material", Translations::de("Material")),
        ("Memorial", Translations::de("Erinnerungsstelle")),
        ("Memorials", Translations::de("Erinnerungsstellen")),
        ("More", Translations::de("Mehr")),
        ("Not found", Translations::de("Nicht gefunden")),
        ("Periods", Translations::de("Epochen")),
        ("Research", Translations::de("Vertiefen")),
        ("Search", Translations::de("Suche")),
        ("See on map", Translations::de("Auf der Karte ansehen")),
        ("Works", Translations::de("Werk")),
    ])
});

/// Memoizing translator for the active language.
///
/// The cache is keyed by the source string alone; entries written before a
/// language switch keep serving the previous language's strings until the
/// session ends.
pub struct Translator {
    language: Mutex<Language>,
    cache: EntityCache<String, String>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self {
            language: Mutex::new(language),
            cache: EntityCache::new(),
        }
    }

    pub fn language(&self) -> Language {
        *self.language.lock().unwrap()
    }

    pub fn set_language(&self, language: Language) {
        *self.language.lock().unwrap() = language;
    }

    /// Resolve a source string for the active language, memoized per source
    /// string.
    pub fn translate(&self, source: &str) -> String {
        let source = source.trim();
        if source.is_empty() {
            return String::new();
        }
        let language = self.language();
        self.cache
            .get_or_insert_with(source.to_string(), || resolve(language, source))
    }
}

fn resolve(language: Language, source: &str) -> String {
    if language == Language::En {
        return source.to_string();
    }
    match LIBRARY.get(source) {
        None => {
            tracing::warn!(source, "missing translation");
            source.to_string()
        }
        Some(translations) => match translations.for_language(language) {
            Some(translated) => translated.to_string(),
            None => {
                tracing::warn!(source, language = language.code(), "missing translation for language");
                source.to_string()
            }
        },
    }
}
