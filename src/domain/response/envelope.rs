//! Response envelope: owns the outcome of one request cycle and renders the
//! `{response, errors}` wire shape

use axum::http::header::{HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::api::dto::query_dto::PageQuery;
use crate::domain::response::format::{JsonOptions, OutputFormat, ResponseConfig};
use crate::domain::response::model::ModelFormats;
use crate::domain::response::paginator::Paginator;
use crate::domain::response::payload::Payload;
use crate::domain::response::serializer;
use crate::errors::ErrorRecord;

pub const DEFAULT_STATUS: u16 = 200;

/// Bucket key for errors that carry no field name.
const GENERAL_FIELD: &str = "general";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("cannot add an entry to a non-map payload")]
    InvalidPayloadShape,
}

/// One envelope per request cycle. Immutable value: every `with_*` consumes
/// the envelope and returns the transformed one.
///
/// Explicitly-set status is never overridden by error-derived status.
/// Payload and errors are independent; partial success carries both.
#[derive(Debug, Clone, Default)]
pub struct ResponseEnvelope {
    payload: Payload,
    status: Option<u16>,
    errors: Vec<ErrorRecord>,
    headers: Vec<(String, String)>,
    model_formats: ModelFormats,
    format: Option<OutputFormat>,
    locale: Option<String>,
    config: ResponseConfig,
}

impl ResponseEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads the application's rendering defaults into this envelope.
    pub fn with_config(mut self, config: ResponseConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Stores a list, wrapping it in pagination metadata when the request
    /// carries a `page` signal.
    pub fn with_paginated_payload(mut self, items: Vec<Payload>, query: &PageQuery) -> Self {
        if query.page.is_some() {
            let paginator = Paginator::new(
                items,
                None,
                query.page,
                query.per_page,
                self.config.default_page_size,
            );
            self.payload = paginator.into_payload();
        } else {
            self.payload = Payload::List(items);
        }
        self
    }

    /// Like [`Self::with_paginated_payload`] but with caller-supplied
    /// metadata taking priority over the request signal.
    pub fn with_pre_paginated_payload(
        mut self,
        items: Vec<Payload>,
        total: Option<usize>,
        page: Option<usize>,
        per_page: Option<usize>,
        query: &PageQuery,
    ) -> Self {
        if total.is_some() || page.is_some() || per_page.is_some() || query.page.is_some() {
            let paginator = Paginator::new(
                items,
                total,
                page.or(query.page),
                per_page.or(query.per_page),
                self.config.default_page_size,
            );
            self.payload = paginator.into_payload();
            self
        } else {
            self.with_payload(Payload::List(items))
        }
    }

    /// Merges a key into a map payload. An empty payload (null or empty
    /// container) is promoted to a map first; any other shape is a
    /// precondition violation and fails fast.
    pub fn with_payload_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<Payload>,
    ) -> Result<Self, EnvelopeError> {
        if let Payload::Map(map) = &mut self.payload {
            map.insert(key.into(), value.into());
            return Ok(self);
        }
        if matches!(self.payload, Payload::Null) || self.payload.is_empty_container() {
            let mut map = IndexMap::new();
            map.insert(key.into(), value.into());
            self.payload = Payload::Map(map);
            return Ok(self);
        }
        Err(EnvelopeError::InvalidPayloadShape)
    }

    pub fn with_error(mut self, error: impl Into<ErrorRecord>) -> Self {
        self.errors.push(error.into());
        self
    }

    pub fn with_errors<I, E>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<ErrorRecord>,
    {
        self.errors.extend(errors.into_iter().map(Into::into));
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Pins the output format for one model type, overriding the call-site
    /// format wherever that type appears in the payload tree.
    pub fn with_model_format(mut self, type_name: &'static str, format: OutputFormat) -> Self {
        self.model_formats.insert(type_name, format);
        self
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Effective HTTP status: explicit wins; else the worst error status;
    /// else 200. Error statuses of zero never count.
    pub fn status(&self) -> u16 {
        if let Some(status) = self.status {
            return status;
        }
        self.errors
            .iter()
            .map(|error| error.status)
            .max()
            .filter(|status| *status != 0)
            .unwrap_or(DEFAULT_STATUS)
    }

    /// Structured form of the stored payload, for callers that want the
    /// normalized tree without encoding it.
    pub fn to_value(&self) -> Value {
        self.normalize_payload(&self.payload)
    }

    /// Runs an arbitrary value through the serializer with this envelope's
    /// format, locale and per-model overrides.
    pub fn normalize_payload(&self, payload: &Payload) -> Value {
        serializer::normalize(
            payload,
            self.format.unwrap_or(self.config.default_format),
            self.locale.as_deref(),
            &self.model_formats,
        )
    }

    /// The full `{response, errors}` tree. An empty payload renders as
    /// `null`; the `errors` key is present only when errors were captured.
    pub fn to_root_value(&self) -> Value {
        let mut body = self.to_value();
        let is_empty = body.as_object().is_some_and(|object| object.is_empty())
            || body.as_array().is_some_and(|array| array.is_empty());
        if is_empty {
            body = Value::Null;
        }

        let mut root = Map::new();
        root.insert("response".to_string(), body);
        if !self.errors.is_empty() {
            root.insert("errors".to_string(), self.bucketed_errors());
        }
        Value::Object(root)
    }

    pub fn to_json(&self, options: JsonOptions) -> String {
        let root = self.to_root_value();
        if options.pretty {
            format!("{root:#}")
        } else {
            root.to_string()
        }
    }

    /// Groups errors by field, first-seen order. Each bucket keeps the
    /// highest code seen and the unique messages in arrival order; unnamed
    /// errors share the `general` bucket and render with a null field.
    fn bucketed_errors(&self) -> Value {
        struct Bucket {
            field: Option<String>,
            code: u32,
            descriptions: Vec<String>,
        }

        let mut buckets: IndexMap<&str, Bucket> = IndexMap::new();
        for error in &self.errors {
            let field = error.field.as_deref().filter(|field| !field.is_empty());
            let bucket = buckets
                .entry(field.unwrap_or(GENERAL_FIELD))
                .or_insert_with(|| Bucket {
                    field: field.map(str::to_string),
                    code: 0,
                    descriptions: Vec::new(),
                });
            bucket.code = bucket.code.max(error.code);
            if !bucket.descriptions.contains(&error.message) {
                bucket.descriptions.push(error.message.clone());
            }
        }

        Value::Array(
            buckets
                .into_values()
                .map(|bucket| {
                    json!({
                        "field": bucket.field,
                        "error_code": bucket.code,
                        "description": bucket.descriptions,
                    })
                })
                .collect(),
        )
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self.to_root_value())).into_response();
        for (name, value) in &self.headers {
            match (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => warn!(header = %name, "dropping invalid response header"),
            }
        }
        response
    }
}
