//! Development (debug channel) mode tests

use std::sync::Arc;

use chrono::DateTime;
use domino_logger::{args, ChannelRegistry, DebugFilter, LogMode, LoggerOptions};
use pretty_assertions::assert_eq;
use tests::fixtures::{development_factory, development_factory_with_filter, APP_NAME};
use tests::MemorySink;

/// Split a plain debug line into (timestamp, namespace + message)
fn split_plain(line: &str) -> (&str, &str) {
    line.split_once(' ').unwrap_or((line, ""))
}

#[test]
fn test_development_selects_debug_channel_mode() {
    let logger = development_factory(Arc::new(MemorySink::new())).create(LoggerOptions::new());
    assert_eq!(logger.mode(), LogMode::DebugChannel);
}

#[test]
fn test_info_goes_to_channel() {
    let sink = Arc::new(MemorySink::new());
    let logger = development_factory(sink.clone()).create(LoggerOptions::new());

    logger.info(args!["What a nice weather today!"]).unwrap();

    // Channels always write to stderr
    assert!(sink.stdout().is_empty());
    let lines = sink.stderr();
    assert_eq!(lines.len(), 1);

    let (timestamp, rest) = split_plain(&lines[0]);
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok(), "{}", timestamp);
    assert_eq!(rest, "domino-logger:info What a nice weather today!");
}

#[test]
fn test_error_with_placeholder() {
    let sink = Arc::new(MemorySink::new());
    let logger = development_factory(sink.clone()).create(LoggerOptions::new());

    logger.error(args!["Error occured: %s", "Some error"]).unwrap();

    let stderr = sink.stderr();
    let (_, rest) = split_plain(&stderr[0]);
    assert_eq!(rest, "domino-logger:error Error occured: Some error");
}

#[test]
fn test_payload_appended_as_json() {
    let sink = Arc::new(MemorySink::new());
    let logger = development_factory(sink.clone()).create(LoggerOptions::new());

    logger.log(args!["some message", {"key": "value"}]).unwrap();

    let stderr = sink.stderr();
    let (_, rest) = split_plain(&stderr[0]);
    assert_eq!(rest, r#"domino-logger:log some message {"key":"value"}"#);
}

#[test]
fn test_filter_disables_channels() {
    let sink = Arc::new(MemorySink::new());
    let filter = format!("{}:*,-{}:info", APP_NAME, APP_NAME);
    let logger = development_factory_with_filter(sink.clone(), &filter).create(LoggerOptions::new());

    logger.info(args!["hidden"]).unwrap();
    logger.warn(args!["shown"]).unwrap();

    let lines = sink.stderr();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("domino-logger:warn shown"), "{}", lines[0]);
}

#[test]
fn test_empty_filter_silences_everything() {
    let sink = Arc::new(MemorySink::new());
    let logger = development_factory_with_filter(sink.clone(), "").create(LoggerOptions::new());

    logger.info(args!["a"]).unwrap();
    logger.error(args!["b"]).unwrap();

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_disabled_channel_still_emits_events() {
    let sink = Arc::new(MemorySink::new());
    let logger = development_factory_with_filter(sink.clone(), "").create(LoggerOptions::new());
    let mut rx = logger.subscribe();

    logger.error(args!["quiet failure"]).unwrap();

    let event = tests::events::first_event(&mut rx, tests::events::EVENT_WINDOW)
        .await
        .unwrap();
    assert_eq!(event.message, "quiet failure");
    assert!(sink.is_empty());
}

#[test]
fn test_colored_output() {
    let sink = Arc::new(MemorySink::new());
    let channels = Arc::new(ChannelRegistry::new(DebugFilter::all(), true));
    let logger = development_factory(sink.clone())
        .with_channels(channels.clone())
        .create(LoggerOptions::new());

    logger.info(args!["colored"]).unwrap();

    let color = channels.channel("domino-logger:info").color();
    let line = &sink.stderr()[0];
    let prefix = format!("  \x1b[3{};1mdomino-logger:info \x1b[0m", color);
    assert!(line.starts_with(&prefix), "{:?}", line);
    assert!(line.contains("colored \x1b["), "{:?}", line);
    assert!(line.ends_with("ms\x1b[0m"), "{:?}", line);
}
