use crate::core::markup::{FormatKind, Formatter, SharedFormatter};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MIN_STRING_LENGTH: usize = 2;
pub const DEFAULT_DEBOUNCE_RATE: Duration = Duration::from_millis(200);

/// Settings of one attached widget. Built once and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// A query must be strictly longer than this to trigger a lookup.
    pub min_string_length: usize,
    pub debounce_rate: Duration,
    pub endpoint: Option<String>,
    pub formatter: SharedFormatter,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            min_string_length: DEFAULT_MIN_STRING_LENGTH,
            debounce_rate: DEFAULT_DEBOUNCE_RATE,
            endpoint: None,
            formatter: SharedFormatter::default(),
        }
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays user options on the defaults.
    pub fn from_options(options: &WidgetOptions) -> Self {
        let defaults = Self::default();
        Self {
            min_string_length: options
                .min_string_length
                .unwrap_or(defaults.min_string_length),
            debounce_rate: options
                .debounce_rate_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.debounce_rate),
            endpoint: options.endpoint.clone().or(defaults.endpoint),
            formatter: options
                .format
                .map(FormatKind::formatter)
                .unwrap_or(defaults.formatter),
        }
    }

    pub fn with_min_string_length(mut self, min_string_length: usize) -> Self {
        self.min_string_length = min_string_length;
        self
    }

    pub fn with_debounce_rate(mut self, debounce_rate: Duration) -> Self {
        self.debounce_rate = debounce_rate;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = SharedFormatter::new(formatter);
        self
    }

    pub fn with_shared_formatter(mut self, formatter: SharedFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

/// User-facing options as they appear in config files. Missing fields fall
/// back to [`WidgetConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WidgetOptions {
    pub min_string_length: Option<usize>,
    pub debounce_rate_ms: Option<u64>,
    pub endpoint: Option<String>,
    pub format: Option<FormatKind>,
}

impl WidgetOptions {
    /// Reads options from a `.yaml`/`.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&text)?),
            Some("json") => Ok(serde_json::from_str(&text)?),
            _ => Err(ConfigError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// Fields set in `other` win.
    pub fn merge(self, other: WidgetOptions) -> Self {
        Self {
            min_string_length: other.min_string_length.or(self.min_string_length),
            debounce_rate_ms: other.debounce_rate_ms.or(self.debounce_rate_ms),
            endpoint: other.endpoint.or(self.endpoint),
            format: other.format.or(self.format),
        }
    }
}
