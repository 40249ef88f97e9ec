use serde_json::Value;
use thiserror::Error;

use crate::label::Id;

/// Enumerates the ways a single attribute value can break its
/// constraints. Each variant carries a message fit for end users.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Violation {
    /// A mandatory value was absent.
    #[error("{0}")]
    MandatoryValue(String),

    /// A value was present but outside its admissible range.
    #[error("{0}")]
    Range(String),

    /// An identifier is already taken.
    #[error("{0}")]
    Uniqueness(String),

    /// A reference does not resolve to an existing entity.
    #[error("{0}")]
    ReferentialIntegrity(String),

    /// A string is longer than allowed.
    #[error("{0}")]
    StringLength(String),

    /// Any other constraint, such as an attribute that does not apply.
    #[error("{0}")]
    Constraint(String),
}

impl Violation {
    /// Returns the name of the kind of violation, as used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Violation::MandatoryValue(_) => "MandatoryValueViolation",
            Violation::Range(_) => "RangeViolation",
            Violation::Uniqueness(_) => "UniquenessViolation",
            Violation::ReferentialIntegrity(_) => "ReferentialIntegrityViolation",
            Violation::StringLength(_) => "StringLengthViolation",
            Violation::Constraint(_) => "ConstraintViolation",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Violation::MandatoryValue(m)
            | Violation::Range(m)
            | Violation::Uniqueness(m)
            | Violation::ReferentialIntegrity(m)
            | Violation::StringLength(m)
            | Violation::Constraint(m) => m,
        }
    }
}

/// The outcome of a check. `Ok` may carry the parsed value.
pub type ValidationResult<T = ()> = Result<T, Violation>;

/// Returns whether `x` is a string with at least one
/// non-whitespace character.
pub fn is_non_empty_string(x: &Value) -> bool {
    matches!(x, Value::String(s) if !s.trim().is_empty())
}

/// Returns whether `x` is an integral number or a string of digits
/// with an optional leading minus sign.
pub fn is_integer_or_integer_string(x: &Value) -> bool {
    match x {
        Value::Number(n) => n.is_i64() || n.is_u64() || n.as_f64().map_or(false, is_integral),
        Value::String(s) => is_integer_string(s),
        _ => false,
    }
}

/// Returns whether a slot is missing altogether or explicitly `null`.
pub fn is_absent(x: Option<&Value>) -> bool {
    matches!(x, None | Some(Value::Null))
}

/// Extracts the integer represented by `x`, if it fits in an `i64`.
pub(crate) fn integer_value(x: &Value) -> Option<i64> {
    match x {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|&f| is_integral(f) && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) if is_integer_string(s) => s.parse().ok(),
        _ => None,
    }
}

/// Extracts the positive integer represented by `x`, if it fits in an
/// [`Id`].
fn id_value(x: &Value) -> Option<Id> {
    let id = match x {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|&f| is_integral(f) && f >= 1.0 && f < Id::MAX as f64)
                .map(|f| f as Id)
        }),
        Value::String(s) if is_integer_string(s) => s.parse().ok(),
        _ => None,
    };

    id.filter(|&id| id >= 1)
}

fn is_integral(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}

fn is_integer_string(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a positive identifier, reporting `message` as a range
/// violation if `x` does not represent one.
pub(crate) fn positive_id(x: &Value, message: &str) -> ValidationResult<Id> {
    id_value(x).ok_or_else(|| Violation::Range(message.to_owned()))
}

/// Checks a mandatory positive identifier.
pub(crate) fn mandatory_positive_id(
    x: Option<&Value>,
    missing: &str,
    invalid: &str,
) -> ValidationResult<Id> {
    match x {
        None | Some(Value::Null) => Err(Violation::MandatoryValue(missing.to_owned())),
        Some(x) => positive_id(x, invalid),
    }
}
