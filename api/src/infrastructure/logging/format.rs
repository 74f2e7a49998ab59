use std::fmt;

use serde_json::{Map, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::correlation::find_correlation_id;
use super::obfuscation::obfuscated;

pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Name of the record field rewritten by the email obfuscation filter.
pub const EMAIL_FIELD: &str = "email";

/// Collects an event's fields, masking `email` on the way in.
pub struct FieldCollector {
    obfuscated_length: usize,
    pub message: String,
    pub fields: Vec<(&'static str, Value)>,
}

impl FieldCollector {
    pub fn new(obfuscated_length: usize) -> Self {
        Self {
            obfuscated_length,
            message: String::new(),
            fields: Vec::new(),
        }
    }

    fn push(&mut self, field: &Field, value: Value) {
        self.fields.push((field.name(), value));
    }

    fn push_text(&mut self, field: &Field, value: String) {
        match field.name() {
            "message" => self.message = value,
            EMAIL_FIELD => {
                let masked = obfuscated(&value, self.obfuscated_length);
                self.push(field, Value::String(masked));
            }
            _ => self.push(field, Value::String(value)),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push_text(field, value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.push_text(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push_text(field, format!("{value:?}"));
    }
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "TRACE",
        Level::DEBUG => "DEBUG",
        Level::INFO => "INFO",
        Level::WARN => "WARNING",
        Level::ERROR => "ERROR",
    }
}

/// Human readable console lines:
/// `<time> <LEVEL> (<correlation_id>) <target>:<line> - <message> k=v...`
#[derive(Clone, Copy, Debug)]
pub struct ConsoleFormat {
    obfuscated_length: usize,
}

impl ConsoleFormat {
    pub fn new(obfuscated_length: usize) -> Self {
        Self { obfuscated_length }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = FieldCollector::new(self.obfuscated_length);
        event.record(&mut fields);

        write!(
            writer,
            "{} {:<7} ({}) {}:{} - {}",
            chrono::Utc::now().format(DATE_FORMAT),
            level_name(meta.level()),
            find_correlation_id(ctx.event_scope()),
            meta.target(),
            meta.line().unwrap_or(0),
            fields.message
        )?;
        for (name, value) in &fields.fields {
            match value {
                Value::String(s) => write!(writer, " {name}={s}")?,
                other => write!(writer, " {name}={other}")?,
            }
        }
        writeln!(writer)
    }
}

/// One JSON object per line, keyed like the classic `asctime msecs levelname
/// correlation_id name lineno message` record layout plus any extra fields.
#[derive(Clone, Copy, Debug)]
pub struct JsonFileFormat {
    obfuscated_length: usize,
}

impl JsonFileFormat {
    pub fn new(obfuscated_length: usize) -> Self {
        Self { obfuscated_length }
    }
}

impl<S, N> FormatEvent<S, N> for JsonFileFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();
        let mut fields = FieldCollector::new(self.obfuscated_length);
        event.record(&mut fields);
        let now = chrono::Utc::now();

        let mut record = Map::new();
        record.insert(
            "asctime".into(),
            Value::String(now.format(DATE_FORMAT).to_string()),
        );
        record.insert("msecs".into(), Value::from(now.timestamp_subsec_millis()));
        record.insert("levelname".into(), Value::from(level_name(meta.level())));
        record.insert(
            "correlation_id".into(),
            Value::String(find_correlation_id(ctx.event_scope())),
        );
        record.insert("name".into(), Value::from(meta.target()));
        record.insert("lineno".into(), Value::from(meta.line().unwrap_or(0)));
        record.insert("message".into(), Value::String(fields.message));
        for (name, value) in fields.fields {
            record.entry(name).or_insert(value);
        }

        let line = serde_json::to_string(&Value::Object(record)).map_err(|_| fmt::Error)?;
        writeln!(writer, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::infrastructure::logging::correlation::CorrelationIdLayer;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Buffer {
        type Writer = Buffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn console_line_carries_correlation_id_and_masked_email() {
        let buf = Buffer::default();
        let subscriber = tracing_subscriber::registry()
            .with(CorrelationIdLayer::new(32))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat::new(2))
                    .with_writer(buf.clone()),
            );
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("http", correlation_id = "abcd1234");
            let _guard = span.enter();
            tracing::info!(email = "jane@example.com", "registering user");
        });

        let out = buf.contents();
        assert!(out.contains("INFO"), "{out}");
        assert!(out.contains("(abcd1234)"), "{out}");
        assert!(out.contains(" - registering user"), "{out}");
        assert!(out.contains("email=ja**@example.com"), "{out}");
        assert!(!out.contains("jane@"), "{out}");
    }

    #[test]
    fn dev_length_shortens_logged_id_only() {
        let buf = Buffer::default();
        let subscriber = tracing_subscriber::registry()
            .with(CorrelationIdLayer::new(8))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat::new(2))
                    .with_writer(buf.clone()),
            );
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!(
                "http",
                correlation_id = "0123456789abcdef0123456789abcdef01234567"
            );
            let _guard = span.enter();
            tracing::info!("handled");
        });
        let out = buf.contents();
        assert!(out.contains("(01234567)"), "{out}");
        assert!(!out.contains("012345678"), "{out}");
    }

    #[test]
    fn console_line_outside_request_uses_default_id() {
        let buf = Buffer::default();
        let subscriber = tracing_subscriber::registry()
            .with(CorrelationIdLayer::new(32))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(ConsoleFormat::new(2))
                    .with_writer(buf.clone()),
            );
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("startup");
        });
        let out = buf.contents();
        assert!(out.contains("WARNING (-)"), "{out}");
    }

    #[test]
    fn json_record_has_expected_keys() {
        let buf = Buffer::default();
        let subscriber = tracing_subscriber::registry()
            .with(CorrelationIdLayer::new(32))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(JsonFileFormat::new(0))
                    .with_writer(buf.clone()),
            );
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("http", correlation_id = %"0123456789abcdef");
            let _guard = span.enter();
            tracing::debug!(email = %"bob@example.com", attempts = 3u64, "login");
        });

        let out = buf.contents();
        let record: Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(record["levelname"], "DEBUG");
        assert_eq!(record["correlation_id"], "0123456789abcdef");
        assert_eq!(record["message"], "login");
        assert_eq!(record["email"], "***@example.com");
        assert_eq!(record["attempts"], 3);
        assert!(record["name"].as_str().unwrap().starts_with("storeapi"));
        assert!(record["lineno"].as_u64().unwrap() > 0);
        assert!(record["asctime"].is_string());
        assert!(record["msecs"].is_u64());
    }
}
