use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::errors::SessionError;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

#[derive(Default)]
struct JsonFieldVisitor {
    fields: Map<String, Value>,
}

impl Visit for JsonFieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_string(), Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), Value::from(format!("{:?}", value)));
    }
}

/// One JSON object per line: timestamp, level, target, message, and the
/// event's structured fields (`event_name` becomes `event`).
struct JsonLineFormatter;

impl<S, N> FormatEvent<S, N> for JsonLineFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);
        let mut fields = visitor.fields;

        let mut line = Map::new();
        line.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        line.insert("level".to_string(), Value::from(metadata.level().as_str()));
        line.insert("target".to_string(), Value::from(metadata.target()));
        if let Some(name) = fields.remove("event_name") {
            line.insert("event".to_string(), name);
        }
        let message = fields
            .remove("message")
            .unwrap_or_else(|| Value::from(metadata.name()));
        line.insert("message".to_string(), message);
        if !fields.is_empty() {
            line.insert("fields".to_string(), Value::Object(fields));
        }

        let serialized = serde_json::to_string(&Value::Object(line)).map_err(|_| std::fmt::Error)?;
        writeln!(writer, "{}", serialized)
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, SessionError> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(SessionError::Logging {
            field: "level",
            value: level.to_string(),
        }),
    }
}

/// Install the global subscriber. Output goes to stderr so command output on
/// stdout stays machine readable. `RUST_LOG` directives override the level.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), SessionError> {
    let level_filter = parse_level(&logging_config.level)?;
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let installed = match logging_config.format.trim().to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(
                fmt::layer()
                    .event_format(JsonLineFormatter)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        "console" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        other => {
            return Err(SessionError::Logging {
                field: "format",
                value: other.to_string(),
            })
        }
    };

    installed.map_err(|e| SessionError::Logging {
        field: "subscriber",
        value: e.to_string(),
    })
}
