//! domino-log - emit one log call from the command line
//!
//! The mode follows `DOMINO_ENV`; debug channels follow `DEBUG`.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use domino_logger::{LogMethod, LoggerFactory, LoggerOptions, RequestContext};
use serde_json::Value;
use tracing::{info, warn};

const DEFAULT_APP: &str = "domino";

#[derive(Parser, Debug)]
#[command(name = "domino-log")]
#[command(about = "Emit one log call through the domino logger", long_about = None)]
struct Cli {
    /// Root namespace
    #[arg(long, default_value = DEFAULT_APP)]
    app: String,

    /// Instance namespace, lower-cased under the root namespace
    #[arg(long)]
    namespace: Option<String>,

    /// Buffer on a request context and flush once
    #[arg(long)]
    buffered: bool,

    /// Do not raise error events
    #[arg(long)]
    no_errors: bool,

    #[arg(value_enum)]
    method: Method,

    /// [SEGMENT] TEMPLATE [ARGS...]; the *NS methods take a namespace segment
    /// first. ARGS are JSON values, anything else is a string.
    #[arg(
        value_name = "WORDS",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    words: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Info,
    #[value(name = "infoNS")]
    InfoNs,
    Warn,
    #[value(name = "warnNS")]
    WarnNs,
    Error,
    #[value(name = "errorNS")]
    ErrorNs,
    Log,
    #[value(name = "logNS")]
    LogNs,
}

impl From<Method> for LogMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Info => LogMethod::Info,
            Method::InfoNs => LogMethod::InfoNs,
            Method::Warn => LogMethod::Warn,
            Method::WarnNs => LogMethod::WarnNs,
            Method::Error => LogMethod::Error,
            Method::ErrorNs => LogMethod::ErrorNs,
            Method::Log => LogMethod::Log,
            Method::LogNs => LogMethod::LogNs,
        }
    }
}

/// One log call, ready for `Logger::dispatch`
#[derive(Debug)]
struct Call {
    method: LogMethod,
    segment: Option<String>,
    args: Vec<Value>,
}

impl Cli {
    fn call(&self) -> Result<Call> {
        let method = LogMethod::from(self.method);
        let mut words = self.words.iter();

        let segment = if method.is_namespaced() {
            Some(words.next().context("Namespaced methods need a SEGMENT")?.clone())
        } else {
            None
        };

        let template = words.next().context("Missing TEMPLATE")?;
        let mut args = vec![Value::String(template.clone())];
        args.extend(words.map(|raw| parse_value(raw)));

        Ok(Call {
            method,
            segment,
            args,
        })
    }

    fn options(&self) -> LoggerOptions {
        let mut options = LoggerOptions::new()
            .emit_errors(!self.no_errors)
            .buffered(self.buffered);
        if let Some(namespace) = &self.namespace {
            options = options.with_namespace(namespace);
        }
        if self.buffered {
            options = options.with_context(Arc::new(RequestContext::new()));
        }
        options
    }
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let call = cli.call()?;
    let factory = LoggerFactory::from_env(&cli.app).context("Invalid logger configuration")?;

    let logger = factory.create(cli.options());
    let mut errors = logger.subscribe();

    info!(
        namespace = logger.namespace(),
        mode = logger.mode().as_str(),
        "[domino-log] Emitting"
    );

    logger
        .dispatch(call.method, call.segment.as_deref(), call.args)
        .context("Log call failed")?;
    logger.log_request().context("Flushing request failed")?;

    for event in errors.drain() {
        warn!(namespace = %event.namespace, "[domino-log] Error event: {}", event);
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,domino_logger=info,domino_log=info"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .compact()
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .init();
}

/// JSON when it parses, a plain string otherwise
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
