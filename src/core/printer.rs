//! Level-bound message builders
//!
//! A [`Printer`] is obtained from a logger for one level and one context,
//! used for a few print calls and thrown away. It is a mutating builder:
//! [`Printer::with`] changes the printer in place and hands it back for
//! chaining. Printers are not meant to be shared between threads.

use super::buffer_pool;
use super::level::Level;
use super::output::{Field, Output, LEVEL_KEY, LOGGER_KEY};
use super::value::{resolve, Context, Value};
use std::fmt::{self, Write};
use std::panic::Location;
use std::sync::Arc;

/// Print-family operations bound to a level, a context and a field list.
///
/// The print methods capture the caller's source location, which is passed
/// to the output so file/line annotations point at the call site.
pub trait Printer {
    /// Concatenate `args`, adding a space between two adjacent operands
    /// when neither is a string.
    #[track_caller]
    fn print(&mut self, args: &[Value]);

    /// Format according to a format string.
    #[track_caller]
    fn printf(&mut self, args: fmt::Arguments<'_>);

    /// Join `args` with single spaces.
    #[track_caller]
    fn println(&mut self, args: &[Value]);

    /// Attach `key`, overwriting the value if the key is already present.
    /// An empty key leaves the printer unchanged.
    ///
    /// The builtin `level` and `logger` keys should not be overwritten.
    fn with(&mut self, key: &str, value: Value) -> &mut dyn Printer;
}

/// Printer handed out for disabled levels: discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NopPrinter;

impl Printer for NopPrinter {
    fn print(&mut self, _args: &[Value]) {}

    fn printf(&mut self, _args: fmt::Arguments<'_>) {}

    fn println(&mut self, _args: &[Value]) {}

    fn with(&mut self, _key: &str, _value: Value) -> &mut dyn Printer {
        self
    }
}

/// The builtin printer used by [`StdLogger`](super::logger::StdLogger).
pub struct StdPrinter {
    output: Arc<dyn Output>,
    name: Arc<str>,
    level: Level,
    fields: Vec<Field>,
    ctx: Context,
}

impl StdPrinter {
    /// Create a printer carrying the builtin `level` and `logger` fields.
    pub fn new(output: Arc<dyn Output>, name: Arc<str>, level: Level, ctx: Context) -> Self {
        let fields = vec![
            Field::new(LEVEL_KEY, level),
            Field::new(LOGGER_KEY, &*name),
        ];
        Self {
            output,
            name,
            level,
            fields,
            ctx,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    fn emit(&self, msg: &str, caller: &'static Location<'static>) {
        self.output
            .output(&self.ctx, &self.name, self.level, msg, &self.fields, caller);
    }
}

impl Printer for StdPrinter {
    #[track_caller]
    fn print(&mut self, args: &[Value]) {
        let caller = Location::caller();
        let mut buf = buffer_pool::shared().get();
        let mut previous_is_str = true;
        for (index, arg) in args.iter().enumerate() {
            let value = resolve(Some(&self.ctx), arg);
            let is_str = value.is_str();
            if index > 0 && !previous_is_str && !is_str {
                buf.push(' ');
            }
            let _ = write!(buf, "{}", value);
            previous_is_str = is_str;
        }
        self.emit(&buf, caller);
    }

    #[track_caller]
    fn printf(&mut self, args: fmt::Arguments<'_>) {
        let caller = Location::caller();
        let mut buf = buffer_pool::shared().get();
        let _ = buf.write_fmt(args);
        self.emit(&buf, caller);
    }

    #[track_caller]
    fn println(&mut self, args: &[Value]) {
        let caller = Location::caller();
        let mut buf = buffer_pool::shared().get();
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                buf.push(' ');
            }
            let _ = write!(buf, "{}", resolve(Some(&self.ctx), arg));
        }
        self.emit(&buf, caller);
    }

    fn with(&mut self, key: &str, value: Value) -> &mut dyn Printer {
        if key.is_empty() {
            return self;
        }
        match self.fields.iter_mut().find(|field| field.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(Field::new(key, value)),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::output::compose_line;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Lines {
        lines: Mutex<Vec<String>>,
        callers: Mutex<Vec<&'static Location<'static>>>,
    }

    impl Output for Lines {
        fn output(
            &self,
            ctx: &Context,
            _name: &str,
            _level: Level,
            msg: &str,
            fields: &[Field],
            caller: &'static Location<'static>,
        ) {
            let mut line = String::new();
            compose_line(&mut line, ctx, fields, msg).unwrap();
            self.lines.lock().push(line);
            self.callers.lock().push(caller);
        }
    }

    fn printer(lines: &Arc<Lines>) -> StdPrinter {
        StdPrinter::new(lines.clone(), Arc::from(""), Level::INFO, Context::background())
    }

    fn last(lines: &Lines) -> String {
        lines.lines.lock().last().cloned().unwrap_or_default()
    }

    #[test]
    fn test_print_concatenates_strings() {
        let lines = Arc::new(Lines::default());
        printer(&lines).print(&["1".into(), "2".into(), "3".into()]);
        assert_eq!(last(&lines), "level=INFO logger= 123");
    }

    #[test]
    fn test_print_spaces_between_non_strings() {
        let lines = Arc::new(Lines::default());
        printer(&lines).print(&[1.into(), 2.into(), "x".into(), 3.into(), true.into()]);
        assert_eq!(last(&lines), "level=INFO logger= 1 2x3 true");
    }

    #[test]
    fn test_printf() {
        let lines = Arc::new(Lines::default());
        printer(&lines).printf(format_args!("{} {}", 1, "abc"));
        assert_eq!(last(&lines), "level=INFO logger= 1 abc");
    }

    #[test]
    fn test_println_always_spaces() {
        let lines = Arc::new(Lines::default());
        printer(&lines).println(&[1.into(), "abc".into(), true.into()]);
        assert_eq!(last(&lines), "level=INFO logger= 1 abc true");
    }

    #[test]
    fn test_with_appends_and_overwrites() {
        let lines = Arc::new(Lines::default());
        printer(&lines)
            .with("module", "test1".into())
            .with("module", "test2".into())
            .print(&["abc".into()]);
        assert_eq!(last(&lines), "level=INFO logger= module=test2 abc");
    }

    #[test]
    fn test_with_empty_key_is_noop() {
        let lines = Arc::new(Lines::default());
        let mut p = printer(&lines);
        p.with("", "ignored".into());
        assert_eq!(p.fields().len(), 2);
        p.with("", "ignored".into()).printf(format_args!("abc"));
        assert_eq!(last(&lines), "level=INFO logger= abc");
    }

    #[test]
    fn test_print_resolves_deferred_operands() {
        let lines = Arc::new(Lines::default());
        let mut p = StdPrinter::new(
            lines.clone(),
            Arc::from("svc"),
            Level::WARN,
            Context::background().with_value("user", "mike"),
        );
        let user = Value::deferred(|ctx| {
            ctx.and_then(|ctx| ctx.value("user").cloned())
                .unwrap_or(Value::Null)
        });
        p.with("user", user.clone()).print(&["hello ".into(), user]);
        assert_eq!(last(&lines), "level=WARN logger=svc user=mike hello mike");
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let lines = Arc::new(Lines::default());
        let mut p: Box<dyn Printer> = Box::new(printer(&lines));
        p.print(&[]);
        let caller = lines.callers.lock()[0];
        assert!(caller.file().ends_with("printer.rs"));
    }

    #[test]
    fn test_nop_printer_discards() {
        let mut p = NopPrinter;
        p.with("k", "v".into()).print(&["x".into()]);
        p.printf(format_args!("{}", 1));
        p.println(&[]);
    }
}
