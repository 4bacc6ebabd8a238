use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

use parser::LiteralValue;
use scanner::format_number;

/// Runtime value.
///
/// Every value has a canonical text (see [`Value::text`]) and the language is
/// defined over that text: equality compares it, truthiness looks at it, and a
/// string counts as a number whenever its text parses as one.
#[derive(Debug, Clone, PartialEq, derive_more::From)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// Canonical text, numbers keep a `.0` when integral.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::Number(n) => format_number(*n).into(),
            Value::Str(s) => s.as_str().into(),
            Value::Bool(true) => "true".into(),
            Value::Bool(false) => "false".into(),
            Value::Nil => "nil".into(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Str(s) => s.parse().ok(),
            Value::Bool(_) | Value::Nil => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self.text().as_ref(), "nil" | "false")
    }

    pub fn equals(&self, other: &Value) -> bool {
        self.text() == other.text()
    }

    /// Numeric operands are negated, anything else gets a `-` put in front of its text.
    pub fn negate(&self) -> Value {
        match self.as_number() {
            Some(n) => Value::Number(-n),
            None => Value::Str(format!("-{}", self.text())),
        }
    }
}

/// Result form: unlike [`Value::text`], integral numbers print without a fraction.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            other => write!(f, "{}", other.text()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<LiteralValue<'_>> for Value {
    fn from(literal: LiteralValue<'_>) -> Self {
        match literal {
            LiteralValue::Number(n) => Value::Number(n),
            LiteralValue::Str(s) => s.into(),
            LiteralValue::Boolean(b) => Value::Bool(b),
            LiteralValue::Nil => Value::Nil,
        }
    }
}
