use std::any::Any;
use std::env;
use std::io;
use std::path::Path;

use cfg_if::cfg_if;
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

cfg_if! {
    if #[cfg(debug_assertions)] {
        const DEFAULT_FILTER: &str = "info,pong2d=debug";
    } else {
        const DEFAULT_FILTER: &str = "info";
    }
}

const DEFAULT_LOG_FILE: &str = "logs/pong2d.log";

pub fn init() {
    // Env filter: use RUST_LOG or the build's default
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // Daily rolling file (RUST_LOG_FILE=logs/pong2d.log by default)
    let log_path = env::var("RUST_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let log_path = Path::new(&log_path);
    let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("pong2d.log")),
    ));
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(nb_writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    // try_init so a second call (tests, embedding) doesn't panic
    if tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    install_panic_hook();
}

/// Route panics through tracing so they land in the log file as well.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "<unknown>".to_string());
        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!(
            target: "pong2d::panic",
            %location,
            "{}\nBacktrace:\n{:?}",
            panic_message(info.payload()),
            backtrace
        );
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_from_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("ball escaped");
        let owned: Box<dyn Any + Send> = Box::new(String::from("frame 42"));
        let other: Box<dyn Any + Send> = Box::new(7u32);

        assert_eq!(panic_message(literal.as_ref()), "ball escaped");
        assert_eq!(panic_message(owned.as_ref()), "frame 42");
        assert_eq!(panic_message(other.as_ref()), "<non-string panic>");
    }
}
