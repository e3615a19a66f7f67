//! Contract between the serializer and locale-aware domain models

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::domain::response::format::OutputFormat;
use crate::domain::response::payload::Payload;

/// A domain entity the serializer can resolve into a locale-specific field
/// map. Implementors own their default locale; the serializer only decides
/// which of the two translation paths to take and which format applies.
pub trait DomainModel: Send + Sync {
    /// Stable type tag used to look up per-type format overrides.
    fn type_name(&self) -> &'static str;

    /// Field map translated to the model's default locale.
    fn translated(&self, format: OutputFormat) -> IndexMap<String, Payload>;

    /// Field map translated to the requested locale. Implementors fall back
    /// to their default locale when the requested one is missing.
    fn translated_for_locale(&self, locale: &str, format: OutputFormat) -> IndexMap<String, Payload>;
}

/// Per-model-type output format overrides, keyed by [`DomainModel::type_name`].
pub type ModelFormats = HashMap<&'static str, OutputFormat>;
