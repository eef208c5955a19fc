//! Output sinks and filtering decorators
//!
//! An [`Output`] is the terminal consumer of a log call: it receives the
//! logger name, level, formatted message and the ordered field list, and
//! turns them into whatever the backend writes. [`OutputFilter`] wraps
//! another output to veto calls or rewrite fields before forwarding.

use super::level::Level;
use super::value::{resolve, Context, Value};
use std::borrow::Cow;
use std::fmt::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Field key for the logging level, prepended by the builtin logger.
pub const LEVEL_KEY: &str = "level";
/// Field key for the logger name, prepended by the builtin logger.
pub const LOGGER_KEY: &str = "logger";

/// A key/value pair attached to a log line. An empty key marks a field that
/// has been suppressed and must not be rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The final destination of composed log calls.
pub trait Output: Send + Sync {
    /// Emit `msg` with `fields` at `level` for logger `name`.
    ///
    /// `caller` is the source location of the print call; sinks that render
    /// file/line information use it directly.
    fn output(
        &self,
        ctx: &Context,
        name: &str,
        level: Level,
        msg: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    );
}

/// Append `key=value ` for every non-empty field, resolving deferred values
/// against `ctx`, then the raw message.
pub fn compose_line(buf: &mut String, ctx: &Context, fields: &[Field], msg: &str) -> fmt::Result {
    for field in fields {
        if field.key.is_empty() {
            continue;
        }
        write!(buf, "{}={} ", field.key, resolve(Some(ctx), &field.value))?;
    }
    buf.push_str(msg);
    Ok(())
}

/// Decides whether a call reaches the wrapped output.
pub type EnableFn = Arc<dyn Fn(&Context, &str, Level) -> bool + Send + Sync>;
/// Rewrites one field in place before forwarding.
pub type FieldModifyFn = Arc<dyn Fn(&Context, &mut Field) + Send + Sync>;

/// An [`Output`] decorator. Filters compose: the wrapped output may itself
/// be a filter.
///
/// Field rewrites apply to a copy; the caller's field list is never touched.
#[derive(Default, Clone)]
pub struct OutputFilter {
    underlying: Option<Arc<dyn Output>>,
    enable: Option<EnableFn>,
    modify: Option<FieldModifyFn>,
}

impl OutputFilter {
    #[must_use]
    pub fn new(underlying: Arc<dyn Output>) -> Self {
        Self {
            underlying: Some(underlying),
            enable: None,
            modify: None,
        }
    }

    /// Skip calls for which `f` returns false.
    #[must_use]
    pub fn with_enable<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context, &str, Level) -> bool + Send + Sync + 'static,
    {
        self.enable = Some(Arc::new(f));
        self
    }

    /// Rewrite every field with `f` before forwarding.
    #[must_use]
    pub fn with_field_modifier<F>(mut self, f: F) -> Self
    where
        F: Fn(&Context, &mut Field) + Send + Sync + 'static,
    {
        self.modify = Some(Arc::new(f));
        self
    }
}

impl Output for OutputFilter {
    fn output(
        &self,
        ctx: &Context,
        name: &str,
        level: Level,
        msg: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        let Some(underlying) = &self.underlying else {
            return;
        };
        if let Some(enable) = &self.enable {
            if !enable(ctx, name, level) {
                return;
            }
        }
        let fields: Cow<'_, [Field]> = match &self.modify {
            Some(modify) => {
                let mut rewritten = fields.to_vec();
                for field in &mut rewritten {
                    modify(ctx, field);
                }
                Cow::Owned(rewritten)
            }
            None => Cow::Borrowed(fields),
        };
        underlying.output(ctx, name, level, msg, &fields, caller);
    }
}

/// Wrap `output` so calls are dropped whenever `f` returns false.
pub fn filter_enable<F>(output: Arc<dyn Output>, f: F) -> Arc<dyn Output>
where
    F: Fn(&Context, &str, Level) -> bool + Send + Sync + 'static,
{
    Arc::new(OutputFilter::new(output).with_enable(f))
}

/// Wrap `output` so any field keyed `key` is suppressed.
pub fn filter_remove_field(output: Arc<dyn Output>, key: impl Into<String>) -> Arc<dyn Output> {
    let key = key.into();
    Arc::new(OutputFilter::new(output).with_field_modifier(move |_, field| {
        if field.key == key {
            field.key.clear();
        }
    }))
}

/// Wrap `output` so the value of any field keyed `key` becomes `replacement`.
pub fn filter_cover_field(
    output: Arc<dyn Output>,
    key: impl Into<String>,
    replacement: impl Into<Value>,
) -> Arc<dyn Output> {
    let key = key.into();
    let replacement = replacement.into();
    Arc::new(OutputFilter::new(output).with_field_modifier(move |_, field| {
        if field.key == key {
            field.value = replacement.clone();
        }
    }))
}
