//! Recipe entity with per-locale translations

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::response::format::OutputFormat;
use crate::domain::response::model::DomainModel;
use crate::domain::response::payload::Payload;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTranslation {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub servings: u32,
    pub tags: Vec<String>,
    pub default_locale: String,
    pub translations: IndexMap<String, RecipeTranslation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Requested locale, falling back to the default one.
    fn translation(&self, locale: &str) -> Option<&RecipeTranslation> {
        self.translations
            .get(locale)
            .or_else(|| self.translations.get(&self.default_locale))
    }

    fn resolved_locale<'a>(&'a self, locale: &'a str) -> &'a str {
        if self.translations.contains_key(locale) {
            locale
        } else {
            &self.default_locale
        }
    }
}

impl DomainModel for Recipe {
    fn type_name(&self) -> &'static str {
        "recipe"
    }

    fn translated(&self, format: OutputFormat) -> IndexMap<String, Payload> {
        self.translated_for_locale(&self.default_locale, format)
    }

    fn translated_for_locale(&self, locale: &str, format: OutputFormat) -> IndexMap<String, Payload> {
        let translation = self.translation(locale);
        let mut fields = IndexMap::new();
        fields.insert("id".to_string(), Payload::from(self.id));
        fields.insert(
            "name".to_string(),
            Payload::from(translation.map(|t| t.name.clone())),
        );
        fields.insert("servings".to_string(), Payload::from(self.servings));
        if format == OutputFormat::Compact {
            return fields;
        }

        fields.insert(
            "description".to_string(),
            Payload::from(translation.and_then(|t| t.description.clone())),
        );
        fields.insert(
            "tags".to_string(),
            self.tags.iter().map(|tag| Payload::from(tag.clone())).collect(),
        );
        fields.insert("created_at".to_string(), Payload::from(self.created_at));
        // Per-locale bookkeeping; the serializer strips this before output
        fields.insert(
            "translations".to_string(),
            self.translations
                .iter()
                .map(|(locale, translation)| {
                    let mut entry = IndexMap::new();
                    entry.insert("name".to_string(), Payload::from(translation.name.clone()));
                    entry.insert(
                        "description".to_string(),
                        Payload::from(translation.description.clone()),
                    );
                    (locale.clone(), Payload::Map(entry))
                })
                .collect(),
        );

        if format == OutputFormat::Expanded {
            fields.insert("updated_at".to_string(), Payload::from(self.updated_at));
            fields.insert(
                "locale".to_string(),
                Payload::from(self.resolved_locale(locale)),
            );
            fields.insert(
                "available_locales".to_string(),
                self.translations
                    .keys()
                    .map(|locale| Payload::from(locale.clone()))
                    .collect(),
            );
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn salmon() -> Recipe {
        Recipe {
            id: Uuid::parse_str("8f14e45f-ceea-467f-a8d8-61fc00c1ca4f").unwrap(),
            servings: 2,
            tags: vec!["fish".to_string(), "dinner".to_string()],
            default_locale: "en".to_string(),
            translations: indexmap! {
                "en".to_string() => RecipeTranslation {
                    name: "Maple Glazed Salmon".to_string(),
                    description: Some("Salmon with a maple glaze".to_string()),
                },
                "fr".to_string() => RecipeTranslation {
                    name: "Saumon laqué à l'érable".to_string(),
                    description: None,
                },
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn compact_format_exports_only_identity_fields() {
        let fields = salmon().translated(OutputFormat::Compact);
        let keys: Vec<&str> = fields.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "name", "servings"]);
    }

    #[test]
    fn requested_locale_drives_the_name() {
        let fields = salmon().translated_for_locale("fr", OutputFormat::Compact);
        assert!(matches!(
            &fields["name"],
            Payload::String(name) if name == "Saumon laqué à l'érable"
        ));
    }

    #[test]
    fn unknown_locales_fall_back_to_the_default() {
        let fields = salmon().translated_for_locale("de", OutputFormat::Compact);
        assert!(matches!(
            &fields["name"],
            Payload::String(name) if name == "Maple Glazed Salmon"
        ));
    }

    #[test]
    fn expanded_format_reports_the_resolved_locale() {
        let fields = salmon().translated_for_locale("de", OutputFormat::Expanded);
        assert!(matches!(&fields["locale"], Payload::String(locale) if locale == "en"));
        assert!(fields.contains_key("available_locales"));
        assert!(fields.contains_key("translations"));
    }
}
