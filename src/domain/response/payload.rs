//! Tagged union over the value shapes the serializer recognizes

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use indexmap::IndexMap;
use serde_json::{Number, Value};
use uuid::Uuid;

use crate::domain::response::model::DomainModel;

/// A date/time value paired with the IANA name of the zone it was observed
/// in. The offset lives in `value`; the name travels separately because a
/// fixed offset alone cannot recover it.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonedDateTime {
    pub value: DateTime<FixedOffset>,
    pub timezone: String,
}

impl ZonedDateTime {
    pub fn new(value: DateTime<FixedOffset>, timezone: impl Into<String>) -> Self {
        Self {
            value,
            timezone: timezone.into(),
        }
    }

    pub fn utc(value: DateTime<Utc>) -> Self {
        Self {
            value: value.fixed_offset(),
            timezone: "UTC".to_string(),
        }
    }
}

/// The closed set of payload shapes the serializer dispatches on.
///
/// JSON-shaped data (`serde_json::Value`) converts structurally via `From`,
/// so its maps and lists are walked like any other. [`Payload::raw`] is the
/// deliberate escape hatch: a raw value passes through normalization
/// untouched, which is how unrecognized-but-already-JSON-safe data is
/// carried.
#[derive(Clone, Default)]
pub enum Payload {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    DateTime(ZonedDateTime),
    Id(Uuid),
    List(Vec<Payload>),
    Map(IndexMap<String, Payload>),
    Model(Arc<dyn DomainModel>),
    Raw(Value),
}

impl Payload {
    pub fn model(model: impl DomainModel + 'static) -> Payload {
        Payload::Model(Arc::new(model))
    }

    /// Wraps an already-JSON-safe value that must pass through
    /// normalization unchanged, without being walked.
    pub fn raw(value: Value) -> Payload {
        Payload::Raw(value)
    }

    /// Converts any serializable value into a structural payload tree.
    pub fn from_serialize<T: serde::Serialize>(value: &T) -> Result<Payload, serde_json::Error> {
        serde_json::to_value(value).map(Payload::from)
    }

    pub fn is_empty_container(&self) -> bool {
        match self {
            Payload::List(items) => items.is_empty(),
            Payload::Map(map) => map.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Null => f.write_str("Null"),
            Payload::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Payload::Number(v) => f.debug_tuple("Number").field(v).finish(),
            Payload::String(v) => f.debug_tuple("String").field(v).finish(),
            Payload::DateTime(v) => f.debug_tuple("DateTime").field(v).finish(),
            Payload::Id(v) => f.debug_tuple("Id").field(v).finish(),
            Payload::List(v) => f.debug_tuple("List").field(v).finish(),
            Payload::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Payload::Model(m) => f.debug_tuple("Model").field(&m.type_name()).finish(),
            Payload::Raw(v) => f.debug_tuple("Raw").field(v).finish(),
        }
    }
}

impl From<bool> for Payload {
    fn from(value: bool) -> Self {
        Payload::Bool(value)
    }
}

impl From<i64> for Payload {
    fn from(value: i64) -> Self {
        Payload::Number(Number::from(value))
    }
}

impl From<i32> for Payload {
    fn from(value: i32) -> Self {
        Payload::Number(Number::from(value))
    }
}

impl From<u32> for Payload {
    fn from(value: u32) -> Self {
        Payload::Number(Number::from(value))
    }
}

impl From<u64> for Payload {
    fn from(value: u64) -> Self {
        Payload::Number(Number::from(value))
    }
}

impl From<usize> for Payload {
    fn from(value: usize) -> Self {
        Payload::Number(Number::from(value as u64))
    }
}

impl From<f64> for Payload {
    fn from(value: f64) -> Self {
        // Non-finite floats have no JSON representation
        Number::from_f64(value).map_or(Payload::Null, Payload::Number)
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::String(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::String(value)
    }
}

impl From<Uuid> for Payload {
    fn from(value: Uuid) -> Self {
        Payload::Id(value)
    }
}

impl From<ZonedDateTime> for Payload {
    fn from(value: ZonedDateTime) -> Self {
        Payload::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Payload {
    fn from(value: DateTime<Utc>) -> Self {
        Payload::DateTime(ZonedDateTime::utc(value))
    }
}

impl From<Vec<Payload>> for Payload {
    fn from(value: Vec<Payload>) -> Self {
        Payload::List(value)
    }
}

impl From<IndexMap<String, Payload>> for Payload {
    fn from(value: IndexMap<String, Payload>) -> Self {
        Payload::Map(value)
    }
}

impl<T: Into<Payload>> From<Option<T>> for Payload {
    fn from(value: Option<T>) -> Self {
        value.map_or(Payload::Null, Into::into)
    }
}

impl FromIterator<Payload> for Payload {
    fn from_iter<I: IntoIterator<Item = Payload>>(iter: I) -> Self {
        Payload::List(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Payload)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, Payload)>>(iter: I) -> Self {
        Payload::Map(iter.into_iter().collect())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Bool(v) => Payload::Bool(v),
            Value::Number(v) => Payload::Number(v),
            Value::String(v) => Payload::String(v),
            Value::Array(items) => Payload::List(items.into_iter().map(Payload::from).collect()),
            Value::Object(map) => Payload::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Payload::from(v)))
                    .collect(),
            ),
        }
    }
}
