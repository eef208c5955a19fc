//! JSON output for structured logging
//!
//! Writes each call as a single-line JSON object (JSONL), compatible with
//! log aggregation tools like ELK or Loki. Fields become object members;
//! the message goes under `message`.

use super::LockedWriter;
use crate::core::metrics::OutputMetrics;
use crate::core::output::{Field, Output};
use crate::core::timestamp::TimestampFormat;
use crate::core::value::resolve;
use crate::core::{Context, Level};
use serde_json::{Map, Value as JsonValue};
use std::io::Write;
use std::panic::Location;

pub struct JsonOutput {
    writer: LockedWriter,
    timestamp: Option<TimestampFormat>,
    include_caller: bool,
    metrics: OutputMetrics,
}

impl JsonOutput {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: LockedWriter::new(writer),
            timestamp: None,
            include_caller: false,
            metrics: OutputMetrics::new(),
        }
    }

    /// Add a `time` member rendered in UTC
    #[must_use]
    pub fn with_timestamp(mut self, format: TimestampFormat) -> Self {
        self.timestamp = Some(format);
        self
    }

    /// Add a `caller` member holding `file:line`
    #[must_use]
    pub fn with_caller(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }

    pub fn metrics(&self) -> &OutputMetrics {
        &self.metrics
    }

    fn to_object(
        &self,
        ctx: &Context,
        msg: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) -> Map<String, JsonValue> {
        let mut object = Map::new();
        if let Some(format) = &self.timestamp {
            object.insert("time".to_string(), JsonValue::String(format.format_now(true)));
        }
        if self.include_caller {
            object.insert(
                "caller".to_string(),
                JsonValue::String(format!("{}:{}", caller.file(), caller.line())),
            );
        }
        for field in fields.iter().filter(|field| !field.key.is_empty()) {
            object.insert(
                field.key.clone(),
                resolve(Some(ctx), &field.value).to_json_value(),
            );
        }
        object.insert("message".to_string(), JsonValue::String(msg.to_string()));
        object
    }
}

impl Output for JsonOutput {
    fn output(
        &self,
        ctx: &Context,
        _name: &str,
        _level: Level,
        msg: &str,
        fields: &[Field],
        caller: &'static Location<'static>,
    ) {
        let object = self.to_object(ctx, msg, fields, caller);
        match serde_json::to_vec(&object) {
            Ok(mut record) => {
                record.push(b'\n');
                self.writer.write_record(&record, &self.metrics, "json");
            }
            Err(e) => crate::core::metrics::report_write_failure(&self.metrics, "json", &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::tests::NAMES_LOCK;
    use crate::core::output::{LEVEL_KEY, LOGGER_KEY};
    use crate::outputs::SharedBuffer;

    #[test]
    fn test_json_line() {
        let _guard = NAMES_LOCK.lock();
        let buffer = SharedBuffer::new();
        let output = JsonOutput::new(buffer.clone());
        let fields = vec![
            Field::new(LEVEL_KEY, Level::INFO),
            Field::new(LOGGER_KEY, "auth"),
            Field::new("user_id", 123),
            Field::new("", "suppressed"),
        ];
        output.output(&Context::background(), "auth", Level::INFO, "User logged in", &fields, Location::caller());

        let parsed: JsonValue = serde_json::from_str(buffer.contents().trim_end()).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["logger"], "auth");
        assert_eq!(parsed["user_id"], 123);
        assert_eq!(parsed["message"], "User logged in");
        assert_eq!(parsed.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_json_multiple_lines_with_caller() {
        let buffer = SharedBuffer::new();
        let output = JsonOutput::new(buffer.clone())
            .with_caller(true)
            .with_timestamp(TimestampFormat::Iso8601);
        for i in 0..5 {
            output.output(
                &Context::background(),
                "",
                Level::WARN,
                &format!("Iteration {}", i),
                &[Field::new("iteration", i)],
                Location::caller(),
            );
        }

        let contents = buffer.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            let parsed: JsonValue = serde_json::from_str(line).unwrap();
            assert!(parsed["message"].is_string());
            assert!(parsed["time"].is_string());
            assert!(parsed["caller"].as_str().unwrap().contains("json.rs"));
        }
        assert_eq!(output.metrics().lines_written(), 5);
    }
}
