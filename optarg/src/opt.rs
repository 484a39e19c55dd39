use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// Value — tagged default value
// ============================================================================

/// Declared default of an option. The variant doubles as the option's
/// kind: `Bool` makes a flag, everything else a value-bearing option.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

impl Value {
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
        }
    }
}

pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::Str(self.to_string())
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

macro_rules! into_value {
    ($variant:ident, $wide:ty: $($t:ty),*) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::$variant(self as $wide)
                }
            }
        )*
    };
}

into_value!(Int, i64: i8, i16, i32, i64, isize);
into_value!(Uint, u64: u8, u16, u32, u64, usize);
into_value!(Float, f64: f32, f64);

// ============================================================================
// FromValue — coercion of captured strings
// ============================================================================

/// Conversion of a captured raw value into a typed one. A raw value that
/// does not parse falls back to the option's declared default.
pub trait FromValue: Sized {
    /// Type name used in coercion errors.
    const WANTED: &'static str;

    fn from_raw(raw: &str) -> Option<Self>;

    fn from_default(default: &Value) -> Option<Self>;
}

/// Coerce `raw` (absent if the option never matched) for option `name`.
pub(crate) fn coerce<T: FromValue>(name: &str, raw: Option<&str>, default: &Value) -> Result<T> {
    raw.and_then(T::from_raw)
        .or_else(|| T::from_default(default))
        .ok_or_else(|| Error::Coerce {
            name: name.to_string(),
            wanted: T::WANTED,
        })
}

/// Boolean literals accepted on the command line.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

impl FromValue for bool {
    const WANTED: &'static str = "bool";

    fn from_raw(raw: &str) -> Option<Self> {
        parse_bool(raw)
    }

    fn from_default(default: &Value) -> Option<Self> {
        match default {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for String {
    const WANTED: &'static str = "string";

    fn from_raw(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn from_default(default: &Value) -> Option<Self> {
        Some(default.to_string())
    }
}

macro_rules! from_value_int {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                const WANTED: &'static str = stringify!($t);

                fn from_raw(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }

                fn from_default(default: &Value) -> Option<Self> {
                    match default {
                        Value::Int(n) => <$t>::try_from(*n).ok(),
                        Value::Uint(n) => <$t>::try_from(*n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! from_value_float {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                const WANTED: &'static str = stringify!($t);

                fn from_raw(raw: &str) -> Option<Self> {
                    raw.parse().ok()
                }

                fn from_default(default: &Value) -> Option<Self> {
                    match default {
                        Value::Float(n) => Some(*n as $t),
                        Value::Int(n) => Some(*n as $t),
                        Value::Uint(n) => Some(*n as $t),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_value_float!(f32, f64);

// ============================================================================
// Opt — option declaration
// ============================================================================

#[derive(Debug, Clone)]
pub struct Opt {
    name: String,
    short: Option<char>,
    description: String,
    default: Value,
}

impl Opt {
    /// A new flag named `name`. Give it a non-boolean default with
    /// [`Opt::default_val`] to make it take a value.
    pub fn new(name: &str) -> Self {
        Opt {
            name: name.to_string(),
            short: None,
            description: String::new(),
            default: Value::Bool(false),
        }
    }

    pub fn short(mut self, c: char) -> Self {
        self.short = Some(c);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    pub fn default_val<T: IntoValue>(mut self, v: T) -> Self {
        self.default = v.into_value();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short_name(&self) -> Option<char> {
        self.short
    }

    /// Text shown next to the option in the usage listing.
    pub fn help_text(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Flags complete on their own; everything else waits for a value token.
    pub fn is_flag(&self) -> bool {
        self.default.is_bool()
    }

    /// True if `token` names this option in either form.
    pub(crate) fn answers_to(&self, token: &str) -> bool {
        if !self.name.is_empty() && self.name == token {
            return true;
        }
        match self.short {
            Some(c) => {
                let mut chars = token.chars();
                chars.next() == Some(c) && chars.next().is_none()
            }
            None => false,
        }
    }
}

/// A registry entry: either a matchable option or a section header.
#[derive(Debug, Clone)]
pub enum Entry {
    Header(String),
    Option(Opt),
}
