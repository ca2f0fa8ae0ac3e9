use std::io;
use std::str::FromStr;

use slog::{Drain, Level, Logger};
use slog_async;
use slog_json;
use slog_term;

use config::{LogFormat, Logging};
use errors::*;

pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level).map_err(|_| ErrorKind::InvalidLogLevel(String::from(level)).into())
}

/// Builds the root logger. Records go through an async drain, so keep the
/// returned logger alive until shutdown to flush them. JSON records go to
/// stderr, leaving stdout to the status lines.
pub fn build_logger(config: &Logging) -> Result<Logger> {
    build_logger_with(config, io::stderr())
}

/// Like `build_logger`, with JSON records written to `json_out`.
pub fn build_logger_with<W>(config: &Logging, json_out: W) -> Result<Logger>
    where W: io::Write + Send + 'static
{
    let level = parse_level(&config.level)?;
    let log = match config.format {
        LogFormat::Term => {
            let decorator = slog_term::TermDecorator::new().build();
            let drain = slog_term::FullFormat::new(decorator).build().fuse();
            let drain = slog_async::Async::new(drain).build().fuse();
            Logger::root(drain.filter_level(level).fuse(), o!())
        }
        LogFormat::Json => {
            let drain = slog_json::Json::new(json_out).add_default_keys().build().fuse();
            let drain = slog_async::Async::new(drain).build().fuse();
            Logger::root(drain.filter_level(level).fuse(), o!())
        }
    };
    Ok(log)
}
