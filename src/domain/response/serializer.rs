//! Recursive normalization of payload trees into JSON-safe values

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::domain::response::format::OutputFormat;
use crate::domain::response::model::ModelFormats;
use crate::domain::response::payload::Payload;

/// ISO-8601 with a colon in the offset, e.g. `2015-12-25T00:00:00-05:00`.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Internal bookkeeping field that must never reach the client.
const TRANSLATIONS_KEY: &str = "translations";

/// Deterministically converts a payload of unknown shape into a JSON-safe
/// tree. Pure; recursion depth is bounded only by the payload, which is
/// acyclic by construction.
pub fn normalize(
    payload: &Payload,
    format: OutputFormat,
    locale: Option<&str>,
    model_formats: &ModelFormats,
) -> Value {
    match payload {
        Payload::Null => Value::Null,
        Payload::Bool(v) => Value::Bool(*v),
        Payload::Number(v) => Value::Number(v.clone()),
        Payload::String(v) => Value::String(v.clone()),
        Payload::DateTime(dt) => json!({
            "date": dt.value.format(DATE_FORMAT).to_string(),
            "timezone": dt.timezone,
        }),
        Payload::Id(id) => Value::String(id.to_string()),
        Payload::List(items) => Value::Array(
            items
                .iter()
                .map(|item| normalize(item, format, locale, model_formats))
                .collect(),
        ),
        Payload::Map(entries) => normalize_entries(entries, format, locale, model_formats),
        Payload::Model(model) => {
            // Per-type override wins over the call-site format
            let format = model_formats
                .get(model.type_name())
                .copied()
                .unwrap_or(format);
            let fields = match locale {
                Some(locale) => model.translated_for_locale(locale, format),
                None => model.translated(format),
            };
            normalize_entries(&fields, format, locale, model_formats)
        }
        Payload::Raw(value) => value.clone(),
    }
}

fn normalize_entries(
    entries: &IndexMap<String, Payload>,
    format: OutputFormat,
    locale: Option<&str>,
    model_formats: &ModelFormats,
) -> Value {
    if is_sequential(entries) {
        return Value::Array(
            entries
                .values()
                .map(|value| normalize(value, format, locale, model_formats))
                .collect(),
        );
    }
    let mut object = Map::new();
    for (key, value) in entries {
        if key == TRANSLATIONS_KEY {
            continue;
        }
        object.insert(key.clone(), normalize(value, format, locale, model_formats));
    }
    Value::Object(object)
}

/// A map whose keys are exactly `"0".."n-1"` in order is a sequence in
/// disguise; anything else (including the empty map) is associative.
fn is_sequential(entries: &IndexMap<String, Payload>) -> bool {
    !entries.is_empty()
        && entries
            .keys()
            .enumerate()
            .all(|(index, key)| key == &index.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::model::DomainModel;
    use crate::domain::response::payload::ZonedDateTime;
    use chrono::{FixedOffset, TimeZone};
    use indexmap::indexmap;

    fn toronto_xmas() -> ZonedDateTime {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let value = offset.with_ymd_and_hms(2015, 12, 25, 0, 0, 0).unwrap();
        ZonedDateTime::new(value, "America/Toronto")
    }

    fn no_overrides() -> ModelFormats {
        ModelFormats::new()
    }

    struct Dish {
        names: IndexMap<String, String>,
        default_locale: String,
    }

    impl Dish {
        fn sample() -> Self {
            Self {
                names: indexmap! {
                    "en".to_string() => "Butter Chicken".to_string(),
                    "fr".to_string() => "Poulet au beurre".to_string(),
                },
                default_locale: "en".to_string(),
            }
        }
    }

    impl DomainModel for Dish {
        fn type_name(&self) -> &'static str {
            "dish"
        }

        fn translated(&self, format: OutputFormat) -> IndexMap<String, Payload> {
            self.translated_for_locale(&self.default_locale, format)
        }

        fn translated_for_locale(
            &self,
            locale: &str,
            format: OutputFormat,
        ) -> IndexMap<String, Payload> {
            let name = self
                .names
                .get(locale)
                .or_else(|| self.names.get(&self.default_locale))
                .cloned();
            let mut fields = indexmap! {
                "name".to_string() => Payload::from(name),
            };
            if format != OutputFormat::Compact {
                fields.insert(
                    "translations".to_string(),
                    self.names
                        .iter()
                        .map(|(k, v)| (k.clone(), Payload::from(v.clone())))
                        .collect(),
                );
                fields.insert("format".to_string(), Payload::from(format.as_str()));
            }
            fields
        }
    }

    #[test]
    fn datetimes_normalize_to_date_and_timezone() {
        let value = normalize(
            &Payload::DateTime(toronto_xmas()),
            OutputFormat::Default,
            None,
            &no_overrides(),
        );
        assert_eq!(
            value,
            json!({"date": "2015-12-25T00:00:00-05:00", "timezone": "America/Toronto"})
        );
    }

    #[test]
    fn ids_normalize_to_canonical_strings() {
        let id = uuid::Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        let value = normalize(
            &Payload::Id(id),
            OutputFormat::Default,
            None,
            &no_overrides(),
        );
        assert_eq!(value, json!("67e55044-10b1-426f-9247-bb680e5fe0c8"));
    }

    #[test]
    fn nested_containers_recurse_preserving_order() {
        let payload = Payload::Map(indexmap! {
            "datetime".to_string() => Payload::DateTime(toronto_xmas()),
            "nested_array".to_string() => Payload::List(vec![
                Payload::List(vec![Payload::from(1i64), Payload::from(2i64)]),
                Payload::Map(indexmap! {"lorem".to_string() => Payload::from("ipsum")}),
            ]),
            "nested_assoc".to_string() => Payload::Map(indexmap! {
                "hello".to_string() => Payload::from("world"),
            }),
        });
        let value = normalize(&payload, OutputFormat::Default, None, &no_overrides());
        assert_eq!(
            value,
            json!({
                "datetime": {"date": "2015-12-25T00:00:00-05:00", "timezone": "America/Toronto"},
                "nested_array": [[1, 2], {"lorem": "ipsum"}],
                "nested_assoc": {"hello": "world"},
            })
        );
    }

    #[test]
    fn contiguous_string_keys_render_as_a_sequence() {
        let sequence = Payload::Map(indexmap! {
            "0".to_string() => Payload::from("a"),
            "1".to_string() => Payload::from("b"),
        });
        assert_eq!(
            normalize(&sequence, OutputFormat::Default, None, &no_overrides()),
            json!(["a", "b"])
        );

        let sparse = Payload::Map(indexmap! {
            "0".to_string() => Payload::from("a"),
            "2".to_string() => Payload::from("b"),
        });
        assert_eq!(
            normalize(&sparse, OutputFormat::Default, None, &no_overrides()),
            json!({"0": "a", "2": "b"})
        );
    }

    #[test]
    fn translations_never_reach_the_output() {
        let payload = Payload::Map(indexmap! {
            "name".to_string() => Payload::from("pad thai"),
            "translations".to_string() => Payload::Map(indexmap! {
                "fr".to_string() => Payload::from("pad thaï"),
            }),
        });
        let value = normalize(&payload, OutputFormat::Default, None, &no_overrides());
        assert_eq!(value, json!({"name": "pad thai"}));
    }

    #[test]
    fn models_translate_to_the_requested_locale() {
        let payload = Payload::model(Dish::sample());
        let value = normalize(&payload, OutputFormat::Default, Some("fr"), &no_overrides());
        assert_eq!(
            value,
            json!({"name": "Poulet au beurre", "format": "default"})
        );

        let default = normalize(&payload, OutputFormat::Default, None, &no_overrides());
        assert_eq!(
            default,
            json!({"name": "Butter Chicken", "format": "default"})
        );
    }

    #[test]
    fn model_format_overrides_win_over_the_call_site() {
        let payload = Payload::model(Dish::sample());
        let mut overrides = ModelFormats::new();
        overrides.insert("dish", OutputFormat::Compact);
        let value = normalize(&payload, OutputFormat::Default, None, &overrides);
        assert_eq!(value, json!({"name": "Butter Chicken"}));
    }

    #[test]
    fn raw_values_pass_through_unchanged() {
        let raw = json!({"translations": {"fr": "kept"}, "n": 1});
        let value = normalize(
            &Payload::raw(raw.clone()),
            OutputFormat::Default,
            None,
            &no_overrides(),
        );
        assert_eq!(value, raw);
    }

    #[test]
    fn normalize_is_idempotent_on_json_safe_trees() {
        let payload = Payload::Map(indexmap! {
            "a".to_string() => Payload::List(vec![Payload::from(1i64), Payload::from("x")]),
            "b".to_string() => Payload::Null,
        });
        let once = normalize(&payload, OutputFormat::Default, None, &no_overrides());
        let twice = normalize(
            &Payload::from(once.clone()),
            OutputFormat::Default,
            None,
            &no_overrides(),
        );
        assert_eq!(once, twice);
    }
}
