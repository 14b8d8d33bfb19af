//! Type cast rules
//!
//! Query fields may declare a type tag (`field:int`). A tag resolves to a
//! [`CastRule`]: either one of the preset coercions in [`CastTag`], a custom
//! cast function supplied by the host, or `Auto` (no coercion). Cast failures
//! surface as [`SiftError::Cast`] wrapping the original failure.

use crate::{Value, ValueMap};
use siftql_diagnostics::{BoxError, Result, SiftError};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The tag string that selects no coercion
pub const AUTO_TAG: &str = "auto";

/// A custom cast supplied by the host
pub type CastFn = Arc<dyn Fn(Value) -> std::result::Result<Value, BoxError> + Send + Sync>;

/// Preset coercions, resolved from tag strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTag {
    /// `str` | `string`
    Str,
    /// `int` | `integer`
    Int,
    /// `float` | `double`
    Float,
    /// `dict`
    Dict,
    /// `list` | `array`
    List,
    /// `set`
    Set,
    /// `bool` | `boolean`
    Bool,
    /// `mapid`: integer `id` member of a map, or of each map in a sequence
    MapId,
}

impl CastTag {
    /// Resolve a tag string (case-sensitive); `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "str" | "string" => Some(Self::Str),
            "int" | "integer" => Some(Self::Int),
            "float" | "double" => Some(Self::Float),
            "dict" => Some(Self::Dict),
            "list" | "array" => Some(Self::List),
            "set" => Some(Self::Set),
            "bool" | "boolean" => Some(Self::Bool),
            "mapid" => Some(Self::MapId),
            _ => None,
        }
    }

    /// Canonical tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Dict => "dict",
            Self::List => "list",
            Self::Set => "set",
            Self::Bool => "bool",
            Self::MapId => "mapid",
        }
    }
}

impl fmt::Display for CastTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The coercion applied to a field's resolved value
#[derive(Clone, Default)]
pub enum CastRule {
    /// No coercion; the value passes through unchanged
    #[default]
    Auto,
    /// One of the preset coercions
    Preset(CastTag),
    /// A host-supplied cast function
    Custom(CastFn),
}

impl CastRule {
    /// Resolve a tag string, `auto` included; `None` for unknown tags
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag == AUTO_TAG {
            return Some(Self::Auto);
        }
        CastTag::from_tag(tag).map(Self::Preset)
    }

    /// Wrap a host cast function
    pub fn custom(
        f: impl Fn(Value) -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(Arc::new(f))
    }

    /// Whether this rule is the pass-through `Auto`
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Apply the rule; failures come back as [`SiftError::Cast`]
    pub fn apply(&self, value: Value) -> Result<Value> {
        match self {
            Self::Auto => Ok(value),
            Self::Preset(tag) => cast_value(*tag, value).map_err(|e| SiftError::cast(Box::new(e))),
            Self::Custom(f) => f(value).map_err(SiftError::cast),
        }
    }
}

impl fmt::Debug for CastRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Preset(tag) => write!(f, "Preset({tag})"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// A failed preset coercion
#[derive(Debug, Error)]
pub enum CastFailure {
    #[error("cannot cast {from} to {to}")]
    Unsupported {
        from: &'static str,
        to: &'static str,
    },
    #[error("{0}")]
    InvalidInt(#[from] std::num::ParseIntError),
    #[error("{0}")]
    InvalidFloat(#[from] std::num::ParseFloatError),
    #[error("cannot convert float {0} to int")]
    FloatOutOfRange(f64),
    #[error("dict items must be [key, value] pairs, got {0}")]
    NotPairs(&'static str),
    #[error("dict keys must be strings, got {0}")]
    NonStringKey(&'static str),
    #[error("missing 'id' member in {0}")]
    MissingId(&'static str),
}

fn cast_value(tag: CastTag, value: Value) -> std::result::Result<Value, CastFailure> {
    match tag {
        CastTag::Str => Ok(Value::String(value.to_string())),
        CastTag::Int => cast_int(value),
        CastTag::Float => cast_float(value),
        CastTag::Bool => Ok(Value::Bool(value.is_truthy())),
        CastTag::Dict => cast_dict(value),
        CastTag::List => cast_sequence(value, "list").map(Value::List),
        CastTag::Set => cast_sequence(value, "set").map(Value::set),
        CastTag::MapId => cast_map_id(value),
    }
}

fn cast_int(value: Value) -> std::result::Result<Value, CastFailure> {
    match value {
        Value::Int(_) => Ok(value),
        Value::Float(f) => float_to_int(f).map(Value::Int),
        Value::Bool(b) => Ok(Value::Int(i64::from(b))),
        Value::String(s) => Ok(Value::Int(s.trim().parse::<i64>()?)),
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to: "int",
        }),
    }
}

fn float_to_int(f: f64) -> std::result::Result<i64, CastFailure> {
    // 2^63; i64::MAX rounds up to this as f64, so the upper bound is exclusive
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    if !f.is_finite() || t < -BOUND || t >= BOUND {
        return Err(CastFailure::FloatOutOfRange(f));
    }
    Ok(t as i64)
}

fn cast_float(value: Value) -> std::result::Result<Value, CastFailure> {
    match value {
        Value::Float(_) => Ok(value),
        Value::Int(i) => Ok(Value::Float(i as f64)),
        Value::Bool(b) => Ok(Value::Float(if b { 1.0 } else { 0.0 })),
        Value::String(s) => Ok(Value::Float(s.trim().parse::<f64>()?)),
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to: "float",
        }),
    }
}

fn cast_dict(value: Value) -> std::result::Result<Value, CastFailure> {
    match value {
        Value::Map(_) => Ok(value),
        Value::List(items) => {
            let mut map = ValueMap::new();
            for item in items {
                let pair = match item {
                    Value::List(pair) if pair.len() == 2 => pair,
                    other => return Err(CastFailure::NotPairs(other.type_name())),
                };
                let mut pair = pair.into_iter();
                let (key, val) = (pair.next(), pair.next());
                match (key, val) {
                    (Some(Value::String(key)), Some(val)) => {
                        map.insert(key, val);
                    }
                    (Some(other), _) => return Err(CastFailure::NonStringKey(other.type_name())),
                    _ => unreachable!("pair length checked above"),
                }
            }
            Ok(Value::Map(map))
        }
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to: "dict",
        }),
    }
}

fn cast_sequence(
    value: Value,
    to: &'static str,
) -> std::result::Result<Vec<Value>, CastFailure> {
    match value {
        Value::List(items) | Value::Set(items) => Ok(items),
        Value::Map(map) => Ok(map.into_keys().map(Value::String).collect()),
        Value::String(s) => Ok(s.chars().map(|c| Value::String(c.to_string())).collect()),
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to,
        }),
    }
}

fn cast_map_id(value: Value) -> std::result::Result<Value, CastFailure> {
    match value {
        Value::List(items) | Value::Set(items) => {
            let mut ids = Vec::with_capacity(items.len());
            for item in items {
                ids.push(element_id(item)?);
            }
            Ok(Value::List(ids))
        }
        Value::Map(_) => element_id(value),
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to: "mapid",
        }),
    }
}

fn element_id(value: Value) -> std::result::Result<Value, CastFailure> {
    match value {
        Value::Map(mut map) => match map.swap_remove("id") {
            Some(id) => cast_int(id),
            None => Err(CastFailure::MissingId("map")),
        },
        other => Err(CastFailure::Unsupported {
            from: other.type_name(),
            to: "mapid",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_aliases_resolve() {
        assert_eq!(CastTag::from_tag("integer"), Some(CastTag::Int));
        assert_eq!(CastTag::from_tag("double"), Some(CastTag::Float));
        assert_eq!(CastTag::from_tag("array"), Some(CastTag::List));
        assert_eq!(CastTag::from_tag("boolean"), Some(CastTag::Bool));
        assert_eq!(CastTag::from_tag("blob"), None);
        // tags are case-sensitive
        assert_eq!(CastTag::from_tag("Int"), None);
    }

    #[test]
    fn auto_rule_passes_through() {
        let rule = CastRule::from_tag("auto").unwrap();
        assert!(rule.is_auto());
        let value = Value::from("unchanged");
        assert_eq!(rule.apply(value.clone()).unwrap(), value);
    }

    #[test]
    fn custom_rule_is_applied() {
        let rule = CastRule::custom(|v| match v {
            Value::Int(i) => Ok(Value::Int(i * 2)),
            other => Err(format!("expected int, got {}", other.type_name()).into()),
        });
        assert_eq!(rule.apply(Value::Int(21)).unwrap(), Value::Int(42));

        let err = rule.apply(Value::Null).unwrap_err();
        assert!(matches!(err, SiftError::Cast { .. }));
        assert!(err.to_string().contains("expected int"));
    }
}
