//! Namespace qualification tests

use std::sync::Arc;

use domino_logger::{args, LoggerOptions};
use pretty_assertions::assert_eq;
use tests::fixtures::{development_factory, production_factory, APP_NAME};
use tests::MemorySink;

fn namespace_of(line: &str) -> &str {
    line.split('\t').nth(1).unwrap_or_default()
}

#[test]
fn test_plain_methods_use_severity_suffix() {
    let sink = Arc::new(MemorySink::new());
    let logger = production_factory(sink.clone()).create(LoggerOptions::new());

    logger.info(args!["a"]).unwrap();
    logger.warn(args!["b"]).unwrap();
    logger.error(args!["c"]).unwrap();
    logger.log(args!["d"]).unwrap();

    assert_eq!(namespace_of(&sink.stdout()[0]), "domino-logger:info");
    let stderr: Vec<_> = sink.stderr().iter().map(|l| namespace_of(l).to_string()).collect();
    assert_eq!(
        stderr,
        vec!["domino-logger:warn", "domino-logger:error", "domino-logger:log"]
    );
}

#[test]
fn test_namespaced_methods_use_root_namespace() {
    let sink = Arc::new(MemorySink::new());
    let logger = production_factory(sink.clone()).create(LoggerOptions::new().with_namespace("API"));

    logger.log_ns("custom", args!["message"]).unwrap();

    assert_eq!(namespace_of(&sink.stderr()[0]), "domino-logger:custom");
}

#[test]
fn test_instance_namespace_is_lower_cased() {
    let sink = Arc::new(MemorySink::new());
    let logger = production_factory(sink.clone()).create(LoggerOptions::new().with_namespace("API"));

    logger.info(args!["message"]).unwrap();

    assert_eq!(logger.namespace(), "domino-logger:api");
    assert_eq!(namespace_of(&sink.stdout()[0]), "domino-logger:api:info");
}

#[test]
fn test_channels_created_per_qualified_namespace() {
    let sink = Arc::new(MemorySink::new());
    let factory = development_factory(sink);
    let logger = factory.create(LoggerOptions::new().with_namespace("api"));

    logger.info(args!["one"]).unwrap();
    logger.info(args!["two"]).unwrap();
    logger.warn_ns("db", args!["three"]).unwrap();

    let channels = factory.channels();
    assert!(channels.contains(&format!("{}:api:info", APP_NAME)));
    assert!(channels.contains(&format!("{}:db", APP_NAME)));
    assert_eq!(channels.len(), 2);
}

#[test]
fn test_custom_segment_is_used_verbatim() {
    let sink = Arc::new(MemorySink::new());
    let logger = production_factory(sink.clone()).create(LoggerOptions::new());

    logger.info_ns("Billing", args!["charged"]).unwrap();

    assert_eq!(namespace_of(&sink.stdout()[0]), "domino-logger:Billing");
}
