//! Scalar converters and the converter registry.
//!
//! Rails payloads tag scalar fields with a `type="..."` attribute
//! (`integer`, `date`, `datetime`, ...). Each [`Converter`] turns raw
//! element text into a typed [`Value`] for one family of hints; the
//! [`ConverterRegistry`] resolves a hint to the newest converter that
//! handles it and memoizes the lookup.
//!
//! The nil marker is handled by the registry itself as the first,
//! non-bypassable stage of [`ConverterRegistry::decode`]: a `nil="true"`
//! element decodes to `Null` before any converter is consulted, regardless
//! of the declared type.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::error::ResourceError;

/// Decodes raw wire text for one family of `type` hints.
pub trait Converter: Send + Sync {
    /// Whether this converter handles the given wire type hint.
    ///
    /// The empty hint stands for an element with no `type` attribute.
    fn handles(&self, type_hint: &str) -> bool;

    /// Decodes raw element text into a value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidValue`] when the text cannot be
    /// coerced to the converter's type.
    fn decode(&self, raw: &str) -> Result<Value, ResourceError>;
}

/// Untyped elements decode as plain strings.
struct StringConverter;

impl Converter for StringConverter {
    fn handles(&self, type_hint: &str) -> bool {
        type_hint.is_empty() || type_hint == "string"
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        Ok(Value::String(raw.to_string()))
    }
}

struct IntegerConverter;

impl Converter for IntegerConverter {
    fn handles(&self, type_hint: &str) -> bool {
        type_hint == "integer"
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        raw.trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| ResourceError::InvalidValue {
                value: raw.to_string(),
                type_hint: "integer".to_string(),
            })
    }
}

struct FloatConverter;

impl Converter for FloatConverter {
    fn handles(&self, type_hint: &str) -> bool {
        matches!(type_hint, "float" | "decimal" | "double")
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        raw.trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| ResourceError::InvalidValue {
                value: raw.to_string(),
                type_hint: "float".to_string(),
            })
    }
}

struct BooleanConverter;

impl Converter for BooleanConverter {
    fn handles(&self, type_hint: &str) -> bool {
        type_hint == "boolean"
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        match raw.trim() {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(ResourceError::InvalidValue {
                value: raw.to_string(),
                type_hint: "boolean".to_string(),
            }),
        }
    }
}

/// Validates `YYYY-MM-DD` dates; the value stays a string so the target
/// struct decides its own date representation.
struct DateConverter;

impl Converter for DateConverter {
    fn handles(&self, type_hint: &str) -> bool {
        type_hint == "date"
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        let trimmed = raw.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(|_| Value::String(trimmed.to_string()))
            .map_err(|_| ResourceError::InvalidValue {
                value: raw.to_string(),
                type_hint: "date".to_string(),
            })
    }
}

/// Validates RFC 3339 timestamps; the value stays a string.
struct DateTimeConverter;

impl Converter for DateTimeConverter {
    fn handles(&self, type_hint: &str) -> bool {
        matches!(type_hint, "datetime" | "timestamp")
    }

    fn decode(&self, raw: &str) -> Result<Value, ResourceError> {
        let trimmed = raw.trim();
        DateTime::parse_from_rfc3339(trimmed)
            .map(|_| Value::String(trimmed.to_string()))
            .map_err(|_| ResourceError::InvalidValue {
                value: raw.to_string(),
                type_hint: "datetime".to_string(),
            })
    }
}

/// Resolves `type` hints to converters, newest registration first.
///
/// Lookups are memoized per hint. Registering a converter evicts every
/// cached entry it would now win, so the new converter takes effect on the
/// next decode of those hints. Both structures are behind locks; the
/// registry is shared read-mostly across concurrent decodes.
pub struct ConverterRegistry {
    converters: RwLock<Vec<Arc<dyn Converter>>>,
    cache: RwLock<HashMap<String, Arc<dyn Converter>>>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterRegistry {
    /// Creates a registry with the built-in Rails scalar converters.
    #[must_use]
    pub fn new() -> Self {
        let builtins: Vec<Arc<dyn Converter>> = vec![
            Arc::new(DateTimeConverter),
            Arc::new(DateConverter),
            Arc::new(BooleanConverter),
            Arc::new(FloatConverter),
            Arc::new(IntegerConverter),
            Arc::new(StringConverter),
        ];
        Self {
            converters: RwLock::new(builtins),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a converter ahead of all existing ones.
    ///
    /// Cached lookups the new converter would now win are evicted, so the
    /// nil stage and re-resolution apply to it from the next decode on.
    pub fn register(&self, converter: Arc<dyn Converter>) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|hint, _| !converter.handles(hint));
        self.converters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, converter);
    }

    /// Decodes one scalar element.
    ///
    /// The nil marker is checked first and wins over any type hint: a nil
    /// element decodes to `Null` without consulting a converter. A missing
    /// hint decodes as a string.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoConverter`] when no registered converter
    /// handles the hint, or [`ResourceError::InvalidValue`] when the text
    /// cannot be coerced.
    pub fn decode(
        &self,
        raw: &str,
        type_hint: Option<&str>,
        nil: bool,
    ) -> Result<Value, ResourceError> {
        if nil {
            return Ok(Value::Null);
        }
        self.lookup(type_hint.unwrap_or(""))?.decode(raw)
    }

    fn lookup(&self, hint: &str) -> Result<Arc<dyn Converter>, ResourceError> {
        if let Some(found) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(hint)
        {
            return Ok(Arc::clone(found));
        }
        let found = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|converter| converter.handles(hint))
            .map(Arc::clone);
        match found {
            Some(converter) => {
                self.cache
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(hint.to_string(), Arc::clone(&converter));
                Ok(converter)
            }
            None => Err(ResourceError::NoConverter {
                type_hint: hint.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let converters = self
            .converters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ConverterRegistry")
            .field("converters", &converters)
            .finish()
    }
}
