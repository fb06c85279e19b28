//! Buffered mode tests

use std::sync::Arc;

use domino_logger::{args, Extra, LogMode, LoggerOptions, RequestContext, RequestRecord};
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::fixtures::{development_factory, production_factory};
use tests::{ClosedSink, MemorySink};

fn short_format(_: Option<&RequestContext>, ns: &str, msg: &str, _: Option<&Extra>) -> String {
    format!("{} {}", ns, msg)
}

fn fields(value: serde_json::Value) -> Extra {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_buffered_overrides_environment() {
    let dev = development_factory(Arc::new(MemorySink::new()));
    let prod = production_factory(Arc::new(MemorySink::new()));

    assert_eq!(dev.create(LoggerOptions::new().buffered(true)).mode(), LogMode::Buffered);
    assert_eq!(prod.create(LoggerOptions::new().buffered(true)).mode(), LogMode::Buffered);
}

#[test]
fn test_request_flushed_as_one_record() {
    let sink = Arc::new(MemorySink::new());
    let context = Arc::new(RequestContext::new());
    let logger = production_factory(sink.clone()).create(
        LoggerOptions::new()
            .buffered(true)
            .with_context(context.clone())
            .with_format(short_format),
    );

    logger.info(args!["request started"]).unwrap();
    logger.warn(args!["slow upstream"]).unwrap();
    logger.fields(fields(json!({"status": 200})));
    logger.fields(fields(json!({"path": "/users"})));

    assert!(sink.is_empty());
    assert_eq!(context.pending_lines(), 2);

    logger.log_request().unwrap();

    let lines = sink.stdout();
    assert_eq!(lines.len(), 1);
    let record: RequestRecord = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(
        record.message,
        "domino-logger:info request started\ndomino-logger:warn slow upstream"
    );
    assert_eq!(record.fields, Some(fields(json!({"status": 200, "path": "/users"}))));
    assert_eq!(context.pending_lines(), 0);
}

#[test]
fn test_flush_without_lines_writes_nothing() {
    let sink = Arc::new(MemorySink::new());
    let context = Arc::new(RequestContext::new());
    let logger = production_factory(sink.clone())
        .create(LoggerOptions::new().buffered(true).with_context(context));

    logger.log_request().unwrap();

    assert!(sink.is_empty());
}

#[test]
fn test_buffered_without_context_writes_directly() {
    let sink = Arc::new(MemorySink::new());
    let logger = production_factory(sink.clone())
        .create(LoggerOptions::new().buffered(true).with_format(short_format));

    logger.info(args!["no request"]).unwrap();
    logger.log_request().unwrap();

    assert_eq!(sink.stdout(), vec!["domino-logger:info no request".to_string()]);
}

#[test]
fn test_failed_flush_keeps_lines() {
    let context = Arc::new(RequestContext::new());
    let logger = production_factory(Arc::new(MemorySink::new()))
        .with_sink(Arc::new(ClosedSink))
        .create(LoggerOptions::new().buffered(true).with_context(context.clone()));

    logger.info(args!["kept"]).unwrap();

    assert!(logger.log_request().is_err());
    assert_eq!(context.pending_lines(), 1);
}

#[tokio::test]
async fn test_buffered_error_still_emits_event() {
    let sink = Arc::new(MemorySink::new());
    let context = Arc::new(RequestContext::new());
    let logger = production_factory(sink.clone())
        .create(LoggerOptions::new().buffered(true).with_context(context));
    let mut rx = logger.subscribe();

    logger.error(args!["buffered failure"]).unwrap();

    let event = tests::events::first_event(&mut rx, tests::events::EVENT_WINDOW)
        .await
        .unwrap();
    assert_eq!(event.message, "buffered failure");
    assert!(sink.is_empty());
}
