//! Output format set and the response configuration threaded through rendering

use serde::{Deserialize, Serialize};

use crate::domain::response::paginator::DEFAULT_PER_PAGE;

/// Closed set of model output formats. Callers hand in free-form strings
/// (query params, env vars); anything outside this set resolves to the
/// configured default via [`OutputFormat::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Default,
    Compact,
    Expanded,
}

impl OutputFormat {
    pub fn parse(name: &str) -> Option<OutputFormat> {
        match name {
            "default" => Some(OutputFormat::Default),
            "compact" => Some(OutputFormat::Compact),
            "expanded" => Some(OutputFormat::Expanded),
            _ => None,
        }
    }

    /// Resolves a caller-supplied format name, substituting `default` for
    /// unrecognized or missing values.
    pub fn resolve(name: Option<&str>, default: OutputFormat) -> OutputFormat {
        name.and_then(OutputFormat::parse).unwrap_or(default)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Default => "default",
            OutputFormat::Compact => "compact",
            OutputFormat::Expanded => "expanded",
        }
    }
}

/// Rendering defaults, built once at startup and threaded explicitly into
/// every envelope instead of living behind a process-wide lookup.
#[derive(Debug, Clone)]
pub struct ResponseConfig {
    pub default_format: OutputFormat,
    pub default_locale: String,
    pub default_page_size: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Default,
            default_locale: "en".to_string(),
            default_page_size: DEFAULT_PER_PAGE,
        }
    }
}

impl ResponseConfig {
    pub fn from_env() -> Self {
        let defaults = ResponseConfig::default();
        Self {
            default_format: std::env::var("RESPONSE_OUTPUT_FORMAT")
                .ok()
                .and_then(|v| OutputFormat::parse(&v))
                .unwrap_or(defaults.default_format),
            default_locale: std::env::var("RESPONSE_DEFAULT_LOCALE")
                .unwrap_or(defaults.default_locale),
            default_page_size: std::env::var("RESPONSE_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_page_size),
        }
    }
}

/// JSON encoding options for [`crate::domain::response::envelope::ResponseEnvelope::to_json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonOptions {
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_the_closed_set() {
        assert_eq!(OutputFormat::parse("compact"), Some(OutputFormat::Compact));
        assert_eq!(OutputFormat::parse("expanded"), Some(OutputFormat::Expanded));
        assert_eq!(OutputFormat::parse("default"), Some(OutputFormat::Default));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::parse(""), None);
    }

    #[test]
    fn resolve_substitutes_the_configured_default() {
        assert_eq!(
            OutputFormat::resolve(Some("compact"), OutputFormat::Default),
            OutputFormat::Compact
        );
        assert_eq!(
            OutputFormat::resolve(Some("bogus"), OutputFormat::Expanded),
            OutputFormat::Expanded
        );
        assert_eq!(
            OutputFormat::resolve(None, OutputFormat::Compact),
            OutputFormat::Compact
        );
    }
}
