//! Field values, deferred evaluation and the call context
//!
//! This module provides:
//! - `Value`: the tagged union carried by fields and print operands
//! - `Valuer`: a callback evaluated lazily at emission time
//! - `Context`: an immutable key/value scope handed to valuers
//! - `resolve`: unwraps deferred values until a literal is reached

use super::level::Level;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A value computed at emission time. The context may be absent.
pub type Valuer = Arc<dyn Fn(Option<&Context>) -> Value + Send + Sync>;

/// Value type for fields and print operands
#[derive(Clone)]
pub enum Value {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Level(Level),
    Null,
    /// Evaluated against the printer's context when the line is composed
    Deferred(Valuer),
}

impl Value {
    /// Wrap a closure as a deferred value.
    pub fn deferred<F>(f: F) -> Self
    where
        F: Fn(Option<&Context>) -> Value + Send + Sync + 'static,
    {
        Value::Deferred(Arc::new(f))
    }

    #[must_use]
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Value::Deferred(_))
    }

    /// Convert to serde_json::Value for JSON serialization.
    ///
    /// Deferred values must be resolved first; an unresolved one maps to null.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Level(level) => serde_json::Value::String(level.to_string()),
            Value::Null | Value::Deferred(_) => serde_json::Value::Null,
        }
    }
}

/// Resolve `value` against `ctx`, invoking deferred values repeatedly until a
/// literal comes back. Literals are returned borrowed.
///
/// A valuer that keeps returning itself never terminates.
pub fn resolve<'a>(ctx: Option<&Context>, value: &'a Value) -> Cow<'a, Value> {
    let Value::Deferred(valuer) = value else {
        return Cow::Borrowed(value);
    };
    let mut current = valuer(ctx);
    loop {
        match current {
            Value::Deferred(next) => current = next(ctx),
            literal => return Cow::Owned(literal),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Level(level) => write!(f, "{}", level),
            Value::Null => f.write_str("<nil>"),
            Value::Deferred(_) => f.write_str("<deferred>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Uint(u) => write!(f, "Uint({})", u),
            Value::Float(fl) => write!(f, "Float({})", fl),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Level(level) => write!(f, "Level({:?})", level),
            Value::Null => f.write_str("Null"),
            Value::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl PartialEq for Value {
    /// Literals compare by content; deferred values only by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Uint(a), Value::Uint(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Level(a), Value::Level(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Deferred(a), Value::Deferred(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::Level(level)
    }
}

impl From<Valuer> for Value {
    fn from(valuer: Valuer) -> Self {
        Value::Deferred(valuer)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Immutable key/value scope carried by a printer and passed to valuers.
///
/// Cloning is cheap; `with_value` derives a new context and leaves the
/// original untouched.
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<String, Value>>,
}

impl Context {
    /// The empty context used when a caller supplies none.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying `key` in addition to everything in `self`.
    #[must_use]
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = HashMap::clone(&self.values);
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_lookup() -> Value {
        Value::deferred(|ctx| {
            ctx.and_then(|ctx| ctx.value("key").cloned())
                .unwrap_or(Value::Null)
        })
    }

    #[test]
    fn test_resolve_literals_borrowed() {
        let ctx = Context::background();
        for value in [Value::from("abc"), Value::from(1), Value::Null] {
            let resolved = resolve(Some(&ctx), &value);
            assert!(matches!(resolved, Cow::Borrowed(_)));
            assert_eq!(*resolved, value);
        }
    }

    #[test]
    fn test_resolve_deferred_against_context() {
        let ctx = Context::background().with_value("key", "value");
        let binding = context_lookup();
        let resolved = resolve(Some(&ctx), &binding);
        assert_eq!(*resolved, Value::from("value"));
    }

    #[test]
    fn test_resolve_without_context() {
        let binding = context_lookup();
        let resolved = resolve(None, &binding);
        assert_eq!(*resolved, Value::Null);
    }

    #[test]
    fn test_resolve_nested_deferred() {
        let nested = Value::deferred(|_| Value::deferred(|_| Value::deferred(|_| Value::from(7))));
        assert_eq!(*resolve(None, &nested), Value::Int(7));
    }

    #[test]
    fn test_context_is_immutable() {
        let base = Context::background();
        let derived = base.with_value("user", "mike");
        assert!(base.is_empty());
        assert_eq!(derived.value("user"), Some(&Value::from("mike")));
        assert!(base.value("user").is_none());
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(-3).to_string(), "-3");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(None::<i32>).to_string(), "<nil>");
    }

    #[test]
    fn test_value_to_json() {
        assert_eq!(Value::from(42).to_json_value(), serde_json::json!(42));
        assert_eq!(Value::from("x").to_json_value(), serde_json::json!("x"));
        assert_eq!(Value::Float(f64::NAN).to_json_value(), serde_json::Value::Null);
    }
}
