//! Translations, the translators repository and rendering.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{TranslationError, TranslationResult};
use crate::message::ValidationError;
use crate::template::Template;

// ============================================================================
// TRANSLATION
// ============================================================================

/// A named dictionary of phrases, keyed by phrase key.
///
/// Phrase templates are parsed once on insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    name: String,
    phrases: HashMap<String, Template>,
}

impl Translation {
    /// Creates a translation from `(key, phrase)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::EmptyName`] for a blank name.
    pub fn new<K, V>(
        name: impl Into<String>,
        phrases: impl IntoIterator<Item = (K, V)>,
    ) -> TranslationResult<Self>
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TranslationError::EmptyName);
        }

        let mut translation = Self {
            name,
            phrases: HashMap::new(),
        };
        translation.insert_all(phrases);
        Ok(translation)
    }

    /// Loads a translation from a JSON object of phrases.
    ///
    /// Nested objects are flattened with `.`, so
    /// `{"Texts": {"MinLength": "..."}}` defines `Texts.MinLength`.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::InvalidDictionary`] when the input is not
    /// a JSON object or holds a value that is neither a string nor an object.
    pub fn from_json(name: impl Into<String>, json: &str) -> TranslationResult<Self> {
        let name = name.into();
        let invalid = |message: String| TranslationError::InvalidDictionary {
            name: name.clone(),
            message,
        };

        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        let serde_json::Value::Object(root) = value else {
            return Err(invalid("expected a JSON object at the top level".to_string()));
        };

        let mut phrases = Vec::new();
        flatten("", &root, &mut phrases).map_err(invalid)?;
        Self::new(name.clone(), phrases)
    }

    /// The translation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if a phrase exists for the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    /// The parsed phrase for a key.
    #[must_use]
    pub fn phrase(&self, key: &str) -> Option<&Template> {
        self.phrases.get(key)
    }

    /// Number of phrases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns true if the translation has no phrases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Iterates over phrase keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.phrases.keys().map(String::as_str)
    }

    fn insert_all<K, V>(&mut self, phrases: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        for (key, phrase) in phrases {
            self.phrases
                .insert(key.into(), Template::parse(phrase.as_ref()));
        }
    }
}

fn flatten(
    prefix: &str,
    object: &serde_json::Map<String, serde_json::Value>,
    out: &mut Vec<(String, String)>,
) -> Result<(), String> {
    for (key, value) in object {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        match value {
            serde_json::Value::String(phrase) => out.push((path, phrase.clone())),
            serde_json::Value::Object(nested) => flatten(&path, nested, out)?,
            other => return Err(format!("phrase '{path}' must be a string, found {other}")),
        }
    }
    Ok(())
}

// ============================================================================
// TRANSLATORS REPOSITORY
// ============================================================================

/// Registered translations, in registration order.
#[derive(Debug, Clone, Default)]
pub struct TranslatorsRepository {
    translations: Vec<Translation>,
}

impl TranslatorsRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a translation.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::DuplicateTranslation`] if the name is taken.
    pub fn add(&mut self, translation: Translation) -> TranslationResult<()> {
        if self.get(translation.name()).is_some() {
            return Err(TranslationError::DuplicateTranslation {
                name: translation.name().to_string(),
            });
        }

        debug!(
            translation = translation.name(),
            phrases = translation.len(),
            "Registered translation"
        );
        self.translations.push(translation);
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn with(mut self, translation: Translation) -> TranslationResult<Self> {
        self.add(translation)?;
        Ok(self)
    }

    /// Adds or overrides phrases of a registered translation.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::UnknownTranslation`] if no translation
    /// has the name.
    pub fn extend<K, V>(
        &mut self,
        name: &str,
        phrases: impl IntoIterator<Item = (K, V)>,
    ) -> TranslationResult<()>
    where
        K: Into<String>,
        V: AsRef<str>,
    {
        let translation = self
            .translations
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| TranslationError::UnknownTranslation {
                name: name.to_string(),
            })?;

        let before = translation.len();
        translation.insert_all(phrases);
        debug!(
            translation = name,
            added = translation.len() - before,
            "Extended translation"
        );
        Ok(())
    }

    /// Looks up a translation by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Translation> {
        self.translations.iter().find(|t| t.name == name)
    }

    /// A translator for a registered translation.
    #[must_use]
    pub fn translator(&self, name: &str) -> Option<Translator<'_>> {
        self.get(name).map(Translator::new)
    }

    /// The translator that renders templates as written.
    #[must_use]
    pub fn default_translator(&self) -> Translator<'_> {
        Translator::identity()
    }

    /// Registered translation names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|t| t.name.as_str())
    }

    /// Number of registered translations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

// ============================================================================
// TRANSLATOR
// ============================================================================

/// Renders errors to text with an optional translation.
///
/// The error's template is looked up as a phrase key; when there is no
/// translation or no matching phrase, the template itself is rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator<'a> {
    translation: Option<&'a Translation>,
}

impl<'a> Translator<'a> {
    /// A translator backed by a translation.
    #[must_use]
    pub fn new(translation: &'a Translation) -> Self {
        Self {
            translation: Some(translation),
        }
    }

    /// A translator without phrases.
    #[must_use]
    pub fn identity() -> Self {
        Self { translation: None }
    }

    /// Name of the backing translation, if any.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.translation.map(Translation::name)
    }

    /// Renders an error.
    #[must_use]
    pub fn render(&self, error: &ValidationError) -> String {
        match self.translation.and_then(|t| t.phrase(error.template())) {
            Some(phrase) => phrase.render(error.args()),
            None => error.render_template(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{NumberArg, TextArg};
    use pretty_assertions::assert_eq;

    fn english() -> Translation {
        Translation::new(
            "English",
            [
                ("Texts.MinLength", "Text value should have minimum {min} characters"),
                ("Global.Required", "Required"),
            ],
        )
        .expect("valid translation")
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = Translation::new("  ", [("a", "b")]);
        assert_eq!(result, Err(TranslationError::EmptyName));
    }

    #[test]
    fn test_from_json_flattens_nested_objects() {
        let json = r#"{"Global": {"Required": "Wymagane"}, "Plain": "Tekst"}"#;
        let polish = Translation::from_json("Polish", json).expect("valid json");
        assert_eq!(polish.len(), 2);
        assert!(polish.contains("Global.Required"));
        assert!(polish.contains("Plain"));
    }

    #[test]
    fn test_from_json_rejects_non_string_phrase() {
        let err = Translation::from_json("Broken", r#"{"a": 1}"#).expect_err("number phrase");
        assert!(matches!(err, TranslationError::InvalidDictionary { .. }));
        let err = Translation::from_json("Broken", "[]").expect_err("array root");
        assert!(matches!(err, TranslationError::InvalidDictionary { .. }));
    }

    #[test]
    fn test_duplicate_translation_rejected() {
        let mut repo = TranslatorsRepository::new();
        repo.add(english()).expect("first add");
        assert_eq!(
            repo.add(english()),
            Err(TranslationError::DuplicateTranslation {
                name: "English".to_string()
            })
        );
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_render_through_phrase_and_fallback() {
        let repo = TranslatorsRepository::new().with(english()).expect("add");
        let english = repo.translator("English").expect("registered");

        let error = ValidationError::new("Texts.MinLength").with_arg(NumberArg::new("min", 6));
        assert_eq!(english.render(&error), "Text value should have minimum 6 characters");
        assert_eq!(repo.default_translator().render(&error), "Texts.MinLength");

        let literal = ValidationError::new("Hi {who}").with_arg(TextArg::new("who", "Bob"));
        assert_eq!(english.render(&literal), "Hi Bob");
    }

    #[test]
    fn test_extend_overrides_phrases() {
        let mut repo = TranslatorsRepository::new().with(english()).expect("add");
        repo.extend("English", [("Global.Required", "Must be given")])
            .expect("known translation");

        let english = repo.translator("English").expect("registered");
        assert_eq!(
            english.render(&ValidationError::new("Global.Required")),
            "Must be given"
        );
        assert_eq!(
            repo.extend("Klingon", [("a", "b")]),
            Err(TranslationError::UnknownTranslation {
                name: "Klingon".to_string()
            })
        );
    }
}
