//! Scalar values produced by environment resolution.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A scalar environment value.
///
/// The process environment only ever produces strings. File sources may
/// return typed values, see [`Scalar::from_literal`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Returns true if this is [`Scalar::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Interpret an unquoted env-file literal.
    ///
    /// `true`/`false` become `Bool`, `null` becomes `Null`, integers that fit
    /// in `i64` become `Int` and finite decimals become `Float`. Anything
    /// else, including the empty string, stays a `String`.
    pub fn from_literal(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        match raw.as_str() {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            "null" => return Scalar::Null,
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Scalar::Int(i);
        }
        match raw.parse::<f64>() {
            Ok(x) if x.is_finite() => Scalar::Float(x),
            _ => Scalar::String(raw),
        }
    }

    /// Returns the string slice if this is a [`Scalar::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Parse the textual form of this value into `T`.
    ///
    /// Strings are trimmed before parsing. `Null` never parses.
    pub fn parse<T>(&self) -> Result<T, String>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self {
            Scalar::Null => Err("value is null".to_string()),
            Scalar::String(s) => s.trim().parse().map_err(|e: T::Err| e.to_string()),
            other => other
                .to_string()
                .parse()
                .map_err(|e: T::Err| e.to_string()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<()> for Scalar {
    fn from(_: ()) -> Self {
        Scalar::Null
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_strings() {
        let value = Scalar::from(" 42 ");
        assert_eq!(value.parse::<u16>(), Ok(42));
    }

    #[test]
    fn test_parse_typed_scalars_via_text() {
        assert_eq!(Scalar::Bool(true).parse::<bool>(), Ok(true));
        assert_eq!(Scalar::Int(7).parse::<i64>(), Ok(7));
        assert_eq!(Scalar::Float(0.5).parse::<f64>(), Ok(0.5));
    }

    #[test]
    fn test_parse_null_fails() {
        assert!(Scalar::Null.parse::<String>().is_err());
    }

    #[test]
    fn test_serialize_untagged() {
        let values = vec![
            Scalar::Null,
            Scalar::Bool(false),
            Scalar::Int(3),
            Scalar::from("x"),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[null,false,3,"x"]"#);
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(Scalar::from_literal("true"), Scalar::Bool(true));
        assert_eq!(Scalar::from_literal("false"), Scalar::Bool(false));
        assert!(Scalar::from_literal("null").is_null());
        assert_eq!(Scalar::from_literal("5432"), Scalar::Int(5432));
        assert_eq!(Scalar::from_literal("-3"), Scalar::Int(-3));
        assert_eq!(Scalar::from_literal("0.5"), Scalar::Float(0.5));
        assert_eq!(Scalar::from_literal("1e3"), Scalar::Float(1000.0));

        for raw in ["", "TRUE", "Null", "inf", "NaN", "v1.2", "db.internal"] {
            assert_eq!(Scalar::from_literal(raw), Scalar::from(raw), "{:?}", raw);
        }
        assert!(!Scalar::from("null").is_null());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Scalar::from(None::<&str>), Scalar::Null);
        assert_eq!(Scalar::from(Some(1)), Scalar::Int(1));
    }
}
